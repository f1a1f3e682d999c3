use uuid::Uuid;

use crate::{
    cart::{Cart, CartView},
    dto::cart::{AddCartItemRequest, CartResponse, RemoveCartItemRequest, UpdateCartItemRequest},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::catalog_service::find_product,
    state::AppState,
};

fn cart_response(message: &str, cart: CartView) -> ApiResponse<CartResponse> {
    let meta = Meta::with_item_count(cart.item_count);
    ApiResponse::success(message, CartResponse { notice: None, cart }, Some(meta))
}

fn require_line_key(product_id: &str, size: &str, color: &str) -> AppResult<()> {
    let missing: Vec<String> = [("productId", product_id), ("size", size), ("color", color)]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(missing))
    }
}

fn empty_cart() -> CartView {
    Cart::default().view()
}

pub async fn view_cart(state: &AppState, session_id: Uuid) -> ApiResponse<CartResponse> {
    let cart = state.sessions.read(session_id, |s| s.cart.view()).await;
    cart_response("OK", cart)
}

pub async fn add_item(
    state: &AppState,
    session_id: Uuid,
    payload: AddCartItemRequest,
) -> AppResult<ApiResponse<CartResponse>> {
    require_line_key(&payload.product_id, &payload.size, &payload.color)?;

    let product = find_product(&state.api, payload.product_id.trim())
        .await?
        .ok_or_else(|| AppError::BadRequest("product not found".to_string()))?;

    if !product.sizes.is_empty() && !product.sizes.iter().any(|s| s == &payload.size) {
        return Err(AppError::BadRequest(format!(
            "size {} is not offered for {}",
            payload.size, product.name
        )));
    }
    if !product.colors.is_empty()
        && !product
            .in_stock_colors()
            .iter()
            .any(|c| c.name == payload.color || (!c.hex.is_empty() && c.hex == payload.color))
    {
        return Err(AppError::BadRequest(format!(
            "color {} is not available for {}",
            payload.color, product.name
        )));
    }

    let (notice, cart) = state
        .sessions
        .write(session_id, |s| {
            let notice = s.cart.add_item(&product, &payload.size, &payload.color);
            (notice, s.cart.view())
        })
        .await;

    tracing::info!(session_id = %session_id, product_id = %product.id, "cart item added");
    let meta = Meta::with_item_count(cart.item_count);
    Ok(ApiResponse::success(
        notice.title.clone(),
        CartResponse {
            notice: Some(notice),
            cart,
        },
        Some(meta),
    ))
}

pub async fn update_quantity(
    state: &AppState,
    session_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartResponse>> {
    require_line_key(&payload.product_id, &payload.size, &payload.color)?;

    let cart = state
        .sessions
        .update(session_id, |s| {
            s.cart.update_quantity(
                &payload.product_id,
                &payload.size,
                &payload.color,
                payload.quantity,
            );
            s.cart.view()
        })
        .await
        .unwrap_or_else(empty_cart);

    Ok(cart_response("Cart updated", cart))
}

pub async fn remove_item(
    state: &AppState,
    session_id: Uuid,
    payload: RemoveCartItemRequest,
) -> AppResult<ApiResponse<CartResponse>> {
    require_line_key(&payload.product_id, &payload.size, &payload.color)?;

    let cart = state
        .sessions
        .update(session_id, |s| {
            s.cart
                .remove_item(&payload.product_id, &payload.size, &payload.color);
            s.cart.view()
        })
        .await
        .unwrap_or_else(empty_cart);

    Ok(cart_response("Removed from cart", cart))
}

pub async fn clear_cart(state: &AppState, session_id: Uuid) -> ApiResponse<CartResponse> {
    let cart = state
        .sessions
        .update(session_id, |s| {
            s.cart.clear();
            s.cart.view()
        })
        .await
        .unwrap_or_else(empty_cart);

    cart_response("Cart cleared", cart)
}
