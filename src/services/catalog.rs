use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::time::Duration;

use super::pagination::{paginate_couplets, paginate_songs, Content, Couplet};
use super::song_info::SongInfoService;
use crate::db::repositories::{
    GroupRepository, Song, SongDto, SongFilterDto, SongPatch, SongRepository,
};
use crate::error::{AppError, Result};

/// Request to catalog a song; everything else comes from the song info service.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSong {
    pub group: String,
    #[serde(rename = "song")]
    pub name: String,
}

/// Fields a caller wants changed, with the group given by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongUpdate {
    pub name: Option<String>,
    pub group: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<Vec<String>>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongFilter {
    pub name: Option<String>,
    pub group: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Clone)]
pub struct CatalogService {
    groups: GroupRepository,
    songs: SongRepository,
    song_info: SongInfoService,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection, song_info: SongInfoService, db_timeout: Duration) -> Self {
        Self {
            groups: GroupRepository::new(db.clone(), db_timeout),
            songs: SongRepository::new(db, db_timeout),
            song_info,
        }
    }

    /// Get-or-create. Two round trips, not atomic: concurrent first use of
    /// the same name can insert it twice.
    async fn resolve_group(&self, name: &str) -> Result<i32> {
        match self.groups.find_group_id(name).await? {
            Some(id) => Ok(id),
            None => self.groups.create_group(name).await,
        }
    }

    /// Resolve the group, enrich from the song info service, then store.
    ///
    /// A group created before a later step fails is left in place.
    pub async fn add_song(&self, new_song: NewSong) -> Result<()> {
        let group_id = self.resolve_group(&new_song.group).await.map_err(|e| {
            tracing::error!(group = %new_song.group, "Failed to resolve group: {}", e);
            e
        })?;

        let detail = self
            .song_info
            .get_song_detail(&new_song.group, &new_song.name)
            .await
            .map_err(|e| {
                tracing::error!(song = %new_song.name, "Can't receive song detail: {}", e);
                e
            })?;

        self.songs
            .create_song(SongDto {
                name: new_song.name,
                group_id,
                release_date: detail.release_date,
                text: detail.text,
                link: detail.link,
            })
            .await
            .map_err(|e| {
                tracing::error!("Can't save new song: {}", e);
                e
            })
    }

    /// `Ok(false)` when no live song is called `name`.
    pub async fn update_song(&self, name: &str, update: SongUpdate) -> Result<bool> {
        let group_id = match &update.group {
            Some(group) => Some(self.resolve_group(group).await?),
            None => None,
        };

        let patch = SongPatch {
            name: update.name,
            group_id,
            release_date: update.release_date,
            text: update.text,
            link: update.link,
        };

        self.songs.update_song(name, patch).await.map_err(|e| {
            tracing::error!(song = %name, "Update song error: {}", e);
            e
        })
    }

    /// `Ok(false)` when no live song is called `name`.
    pub async fn delete_song(&self, name: &str) -> Result<bool> {
        self.songs.delete_song(name).await.map_err(|e| {
            tracing::error!(song = %name, "Delete song error: {}", e);
            e
        })
    }

    /// One lyric couplet per page, with `page` clamped to the lines available.
    pub async fn get_song_text(&self, name: &str, page: i64) -> Result<Content<Couplet>> {
        let lines = self
            .songs
            .get_song_text(name)
            .await?
            .unwrap_or_default();

        paginate_couplets(lines, page)
            .ok_or_else(|| AppError::NotFound(format!("song '{}' has no text", name)))
    }

    pub async fn get_filtered_songs(
        &self,
        filter: SongFilter,
        page: i64,
    ) -> Result<Content<Vec<Song>>> {
        let group_id = match &filter.group {
            Some(group) => Some(
                self.groups
                    .find_group_id(group)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("group '{}'", group)))?,
            ),
            None => None,
        };

        let songs = self
            .songs
            .get_filtered_songs(SongFilterDto {
                name: filter.name,
                group_id,
                release_date: filter.release_date,
            })
            .await?;

        if songs.is_empty() {
            return Err(AppError::NotFound("no songs match the filter".to_string()));
        }

        Ok(paginate_songs(songs, page))
    }
}
