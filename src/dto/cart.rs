use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cart::{CartNotice, CartView};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub product_id: String,
    pub size: String,
    pub color: String,
    /// Absolute quantity; zero or negative removes the line.
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartItemRequest {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<CartNotice>,
    pub cart: CartView,
}
