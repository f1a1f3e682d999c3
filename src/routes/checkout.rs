use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::checkout::{CheckoutRequest, CheckoutStatus, CheckoutStatusQuery},
    error::AppResult,
    middleware::session::SessionId,
    models::CheckoutHandoff,
    response::ApiResponse,
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout))
        .route("/status", get(checkout_status))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed; redirect the buyer to the payment page", body = ApiResponse<CheckoutHandoff>),
        (status = 400, description = "Cart is empty"),
        (status = 422, description = "Buyer data incomplete"),
    ),
    security(("session_id" = [])),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutHandoff>>> {
    let resp = checkout_service::checkout(&state, session_id, payload.buyer).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/checkout/status",
    params(
        ("orderId" = Option<String>, Query, description = "Order id; defaults to the session's last order")
    ),
    responses(
        (status = 200, description = "Order status", body = ApiResponse<CheckoutStatus>),
        (status = 404, description = "No order to report on"),
    ),
    security(("session_id" = [])),
    tag = "Checkout"
)]
pub async fn checkout_status(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Query(query): Query<CheckoutStatusQuery>,
) -> AppResult<Json<ApiResponse<CheckoutStatus>>> {
    let resp = checkout_service::checkout_status(&state, session_id, query.order_id).await?;
    Ok(Json(resp))
}
