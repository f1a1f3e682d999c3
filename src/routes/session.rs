use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::checkout::SessionCreated,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_session))
}

#[utoipa::path(
    post,
    path = "/api/session",
    responses(
        (status = 201, description = "New storefront session; send its id in the x-session-id header", body = ApiResponse<SessionCreated>),
    ),
    tag = "Session"
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<SessionCreated>>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Session created",
            SessionCreated { session_id },
            Some(Meta::empty()),
        )),
    )
}
