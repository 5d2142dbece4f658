use axum::Json;

use super::response::ApiResponse;

pub async fn health_check() -> Json<ApiResponse<()>> {
    Json(ApiResponse::ok())
}
