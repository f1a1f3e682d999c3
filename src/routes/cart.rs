use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::cart::{AddCartItemRequest, CartResponse, RemoveCartItemRequest, UpdateCartItemRequest},
    error::AppResult,
    middleware::session::SessionId,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).delete(clear_cart))
        .route(
            "/items",
            post(add_item)
                .patch(update_item)
                .delete(remove_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current cart", body = ApiResponse<CartResponse>),
        (status = 400, description = "Missing or invalid session header"),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Json<ApiResponse<CartResponse>> {
    Json(cart_service::view_cart(&state, session_id).await)
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Item added, quantity incremented when the line exists", body = ApiResponse<CartResponse>),
        (status = 400, description = "Unknown product or unavailable size/color"),
        (status = 422, description = "Missing size or color"),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(payload): Json<AddCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::add_item(&state, session_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items",
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity set; zero or less removes the line", body = ApiResponse<CartResponse>),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn update_item(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::update_quantity(&state, session_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items",
    request_body = RemoveCartItemRequest,
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartResponse>),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(payload): Json<RemoveCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::remove_item(&state, session_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartResponse>),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Json<ApiResponse<CartResponse>> {
    Json(cart_service::clear_cart(&state, session_id).await)
}
