use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Reject any request whose `Authorization` header is not the configured API key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let key = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match key {
        Some(key) if key == state.config.api_key => {
            tracing::debug!(
                method = %request.method(),
                uri = %request.uri(),
                "Successful authorization"
            );
            Ok(next.run(request).await)
        }
        Some(_) => Err(AppError::Unauthorized("invalid api key".to_string())),
        None => Err(AppError::Unauthorized("missing api key".to_string())),
    }
}
