pub mod catalog;
pub mod pagination;
pub mod song_info;

pub use catalog::{CatalogService, NewSong, SongFilter, SongUpdate};
pub use pagination::{Content, Couplet};
pub use song_info::{SongDetail, SongInfoService};
