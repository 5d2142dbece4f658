use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QueryTrait, Set, UpdateMany,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::GroupRepository;
use crate::db::{entities::song, is_date, with_timeout};
use crate::error::{AppError, Result};

/// Storage-facing shape of a new song.
#[derive(Debug, Clone, PartialEq)]
pub struct SongDto {
    pub name: String,
    pub group_id: i32,
    pub release_date: String,
    pub text: Vec<String>,
    pub link: String,
}

/// Field-by-field update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongPatch {
    pub name: Option<String>,
    pub group_id: Option<i32>,
    pub release_date: Option<String>,
    pub text: Option<Vec<String>>,
    pub link: Option<String>,
}

impl SongPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.group_id.is_none()
            && self.release_date.is_none()
            && self.text.is_none()
            && self.link.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongFilterDto {
    pub name: Option<String>,
    pub group_id: Option<i32>,
    pub release_date: Option<String>,
}

/// A live song with its group resolved to a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    pub group: String,
    pub release_date: String,
    pub text: Vec<String>,
    pub link: String,
}

#[derive(Clone)]
pub struct SongRepository {
    db: DatabaseConnection,
    timeout: Duration,
    groups: GroupRepository,
}

impl SongRepository {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        let groups = GroupRepository::new(db.clone(), timeout);
        Self {
            db,
            timeout,
            groups,
        }
    }

    pub async fn create_song(&self, song: SongDto) -> Result<()> {
        if let Err(e) = is_date(&song.release_date) {
            tracing::debug!("Wrong date format: {}", e);
            return Err(e);
        }

        let text = serde_json::to_string(&song.text)?;

        let model = song::ActiveModel {
            name: Set(song.name),
            group_id: Set(song.group_id),
            release_date: Set(song.release_date),
            text: Set(text),
            link: Set(song.link),
            deleted: Set(None),
            ..Default::default()
        };

        let created = with_timeout(self.timeout, model.insert(&self.db)).await?;
        tracing::info!(song = %created.name, id = created.id, "Stored new song");

        Ok(())
    }

    /// Soft-delete the live song called exactly `name`.
    ///
    /// Returns `false` when nothing live matched.
    pub async fn delete_song(&self, name: &str) -> Result<bool> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let query = song::Entity::update_many()
            .col_expr(song::Column::Deleted, Expr::value(now))
            .filter(live_song_named(name));

        let result = with_timeout(self.timeout, query.exec(&self.db)).await?;
        let deleted = result.rows_affected > 0;
        if !deleted {
            tracing::debug!(song = %name, "Song does not exist");
        }

        Ok(deleted)
    }

    /// Apply only the fields present in `patch` to the live song called `name`.
    pub async fn update_song(&self, name: &str, patch: SongPatch) -> Result<bool> {
        if patch.is_empty() {
            return Err(AppError::BadRequest("empty update".to_string()));
        }

        if let Some(date) = &patch.release_date {
            if let Err(e) = is_date(date) {
                tracing::debug!("Wrong date format: {}", e);
                return Err(e);
            }
        }

        let query = patch_query(name, patch)?;
        let result = with_timeout(self.timeout, query.exec(&self.db)).await?;
        let updated = result.rows_affected > 0;
        if !updated {
            tracing::debug!(song = %name, "Song does not exist");
        }

        Ok(updated)
    }

    /// Lyric lines of the live song called exactly `name`, or `None`.
    pub async fn get_song_text(&self, name: &str) -> Result<Option<Vec<String>>> {
        let found = with_timeout(
            self.timeout,
            song::Entity::find()
                .filter(song::Column::Name.eq(name))
                .filter(song::Column::Deleted.is_null())
                .one(&self.db),
        )
        .await?;

        let Some(found) = found else {
            tracing::debug!(song = %name, "Song does not exist");
            return Ok(None);
        };

        Ok(Some(decode_text(&found.text)?))
    }

    /// Live songs matching every field present in `filter`, in insertion order.
    ///
    /// The name filter is a case-insensitive substring match; group and release
    /// date are exact.
    pub async fn get_filtered_songs(&self, filter: SongFilterDto) -> Result<Vec<Song>> {
        if let Some(date) = &filter.release_date {
            if let Err(e) = is_date(date) {
                tracing::debug!("Wrong date format: {}", e);
                return Err(e);
            }
        }

        let conditions = Condition::all()
            .add_option(filter.name.map(|n| name_contains(&n)))
            .add_option(filter.group_id.map(|id| song::Column::GroupId.eq(id)))
            .add_option(filter.release_date.map(|d| song::Column::ReleaseDate.eq(d)))
            .add(song::Column::Deleted.is_null());

        let rows = with_timeout(
            self.timeout,
            song::Entity::find()
                .filter(conditions)
                .order_by_asc(song::Column::Id)
                .all(&self.db),
        )
        .await?;

        let mut songs = Vec::with_capacity(rows.len());
        for row in rows {
            // One lookup per row; fine for catalog-sized result sets.
            let group = self
                .groups
                .find_group_name(row.group_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "song '{}' references missing group {}",
                        row.name, row.group_id
                    ))
                })?;

            songs.push(Song {
                text: decode_text(&row.text)?,
                name: row.name,
                group,
                release_date: row.release_date,
                link: row.link,
            });
        }

        Ok(songs)
    }
}

/// `UPDATE songs SET <present fields> WHERE <live song called name>`
fn patch_query(name: &str, patch: SongPatch) -> Result<UpdateMany<song::Entity>> {
    let text = patch
        .text
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    Ok(song::Entity::update_many()
        .apply_if(patch.name, |q, v| q.col_expr(song::Column::Name, Expr::value(v)))
        .apply_if(patch.group_id, |q, v| {
            q.col_expr(song::Column::GroupId, Expr::value(v))
        })
        .apply_if(patch.release_date, |q, v| {
            q.col_expr(song::Column::ReleaseDate, Expr::value(v))
        })
        .apply_if(text, |q, v| q.col_expr(song::Column::Text, Expr::value(v)))
        .apply_if(patch.link, |q, v| q.col_expr(song::Column::Link, Expr::value(v)))
        .filter(live_song_named(name)))
}

fn live_song_named(name: &str) -> Condition {
    Condition::all()
        .add(song::Column::Name.eq(name))
        .add(song::Column::Deleted.is_null())
}

/// `LOWER(name) LIKE %needle%`, with LIKE wildcards in `needle` taken literally.
fn name_contains(needle: &str) -> sea_orm::sea_query::SimpleExpr {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    Expr::expr(Func::lower(Expr::col((song::Entity, song::Column::Name))))
        .like(LikeExpr::new(format!("%{}%", escaped)).escape('\\'))
}

fn decode_text(stored: &str) -> Result<Vec<String>> {
    serde_json::from_str(stored).map_err(|e| {
        tracing::debug!("Can't deserialize song text: {}", e);
        AppError::from(e)
    })
}
