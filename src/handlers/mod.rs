pub mod auth;
pub mod health;
pub mod response;
pub mod songs;

use axum::{middleware, routing::get, Router};

use crate::state::AppState;

/// Song routes, all behind the API-key check. Nested under `/api/v1`.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/songs", get(songs::list_songs).post(songs::add_song))
        .route(
            "/songs/:name",
            get(songs::get_song_text)
                .put(songs::update_song)
                .delete(songs::delete_song),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
}
