use anyhow::anyhow;
use uuid::Uuid;

use crate::{
    client::{NewOrder, PaymentRequest},
    dto::checkout::CheckoutStatus,
    error::{AppError, AppResult},
    models::{BuyerInfo, CheckoutHandoff},
    normalize::FALLBACK_ORDER_ID,
    response::ApiResponse,
    state::AppState,
};

/// Places the order for the session's cart and hands the buyer off to the payment
/// provider. Once a redirect URL is in hand the ordered lines leave the cart; items
/// added while the order was in flight stay.
pub async fn checkout(
    state: &AppState,
    session_id: Uuid,
    buyer: BuyerInfo,
) -> AppResult<ApiResponse<CheckoutHandoff>> {
    let missing = buyer.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }

    let (cart, token) = state
        .sessions
        .read(session_id, |s| (s.cart.clone(), s.token.clone()))
        .await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let api = state.api_with(token);
    let order = api
        .create_order(&NewOrder::from_cart(&cart, buyer.clone()))
        .await?;
    if order.id == FALLBACK_ORDER_ID {
        return Err(AppError::Internal(anyhow!("order created without an id")));
    }

    let redirect_url = api
        .create_payment_checkout(&PaymentRequest::new(&order.id, &cart, &buyer))
        .await?;
    if redirect_url.is_empty() {
        return Err(AppError::Internal(anyhow!(
            "payment checkout for order {} returned no redirect url",
            order.id
        )));
    }

    state
        .sessions
        .update(session_id, |s| {
            s.last_order_id = Some(order.id.clone());
            s.cart.subtract(&cart);
        })
        .await;

    tracing::info!(session_id = %session_id, order_id = %order.id, total = %cart.total(), "checkout handed off");
    Ok(ApiResponse::success(
        "Redirecionando para o pagamento",
        CheckoutHandoff {
            order_id: order.id,
            redirect_url,
        },
        None,
    ))
}

/// Status of `order_id`, or of the session's most recent order when none is given.
pub async fn checkout_status(
    state: &AppState,
    session_id: Uuid,
    order_id: Option<String>,
) -> AppResult<ApiResponse<CheckoutStatus>> {
    let order_id = match order_id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => state
            .sessions
            .read(session_id, |s| s.last_order_id.clone())
            .await
            .ok_or(AppError::NotFound)?,
    };

    let status = state.api.get_order_status(&order_id).await?;
    Ok(ApiResponse::success(
        status.label(),
        CheckoutStatus { order_id, status },
        None,
    ))
}
