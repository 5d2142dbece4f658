mod group;
mod song;

pub use group::GroupRepository;
pub use song::{Song, SongDto, SongFilterDto, SongPatch, SongRepository};
