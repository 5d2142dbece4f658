pub mod music_group;
pub mod song;
