use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::response::ApiResponse;
use crate::{
    db::repositories::Song,
    error::{AppError, Result},
    services::{Couplet, NewSong, SongFilter, SongUpdate},
    state::AppState,
};

#[derive(Deserialize)]
pub struct ListSongsQuery {
    pub name: Option<String>,
    pub group: Option<String>,
    pub release_date: Option<String>,
    pub page: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// `?name=` and friends arrive as empty strings when left blank.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Missing or blank `page` is the first page; anything else must be an integer.
fn page_number(raw: Option<String>) -> Result<i64> {
    match non_empty(raw) {
        None => Ok(1),
        Some(page) => page
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid page '{}'", page))),
    }
}

fn query_or_bad_request<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

fn body_or_incorrect<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(p)| p)
        .map_err(|e| AppError::IncorrectBody(e.body_text()))
}

/// List live songs matching the optional filter
pub async fn list_songs(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListSongsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Song>>>> {
    let query = query_or_bad_request(query)?;
    let page = page_number(query.page)?;

    let filter = SongFilter {
        name: non_empty(query.name),
        group: non_empty(query.group),
        release_date: non_empty(query.release_date),
    };

    let content = state.catalog.get_filtered_songs(filter, page).await?;
    Ok(Json(ApiResponse::with_content(content)))
}

/// One couplet of a song's lyrics per page
pub async fn get_song_text(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: std::result::Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Couplet>>> {
    let page = page_number(query_or_bad_request(query)?.page)?;

    let content = state.catalog.get_song_text(&name, page).await?;
    Ok(Json(ApiResponse::with_content(content)))
}

pub async fn add_song(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewSong>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    let new_song = body_or_incorrect(payload)?;

    if new_song.group.trim().is_empty() {
        return Err(AppError::BadRequest("missing or invalid song group".to_string()));
    }
    if new_song.name.trim().is_empty() {
        return Err(AppError::BadRequest("missing or invalid song name".to_string()));
    }

    state.catalog.add_song(new_song).await?;
    tracing::info!("Song added successfully");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok())))
}

pub async fn update_song(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: std::result::Result<Json<SongUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>> {
    let update = body_or_incorrect(payload)?;
    validate_update(&update)?;

    if !state.catalog.update_song(&name, update).await? {
        return Err(AppError::NotFound(format!("song '{}'", name)));
    }

    tracing::info!(song = %name, "Song updated successfully");
    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_song(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    if !state.catalog.delete_song(&name).await? {
        return Err(AppError::NotFound(format!("song '{}'", name)));
    }

    tracing::info!(song = %name, "Song deleted successfully");
    Ok(Json(ApiResponse::ok()))
}

fn validate_update(update: &SongUpdate) -> Result<()> {
    let strings = [
        ("name", &update.name),
        ("group", &update.group),
        ("release date", &update.release_date),
        ("link", &update.link),
    ];
    for (field, value) in strings {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            return Err(AppError::BadRequest(format!("missing or invalid song {}", field)));
        }
    }

    let nothing_set = update.name.is_none()
        && update.group.is_none()
        && update.release_date.is_none()
        && update.text.is_none()
        && update.link.is_none();
    if nothing_set {
        return Err(AppError::BadRequest("empty update".to_string()));
    }

    Ok(())
}
