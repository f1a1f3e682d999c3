use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use super::{ApiClient, ApiError};
use crate::{
    cart::Cart,
    models::{BuyerInfo, Order, OrderStatus, Product},
    normalize::{normalize_order, normalize_order_status, normalize_orders, unwrap_object},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product: Product,
    pub quantity: u32,
    pub selected_size: String,
    pub selected_color: String,
}

/// Order snapshot posted at checkout.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub total: Decimal,
    pub status: &'static str,
    pub buyer: BuyerInfo,
}

impl NewOrder {
    pub fn from_cart(cart: &Cart, buyer: BuyerInfo) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| NewOrderItem {
                    product: line.product.clone(),
                    quantity: line.quantity,
                    selected_size: line.selected_size.clone(),
                    selected_color: line.selected_color.clone(),
                })
                .collect(),
            total: cart.total(),
            status: OrderStatus::Pending.api_value(),
            buyer,
        }
    }
}

impl ApiClient {
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        let status = status.map(OrderStatus::api_value).unwrap_or("");
        let value = self.get(&["orders"], &[("status", status)]).await?;
        Ok(normalize_orders(&value))
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        let value = self.get(&["orders", id], &[]).await?;
        Ok(normalize_order(unwrap_object(&value)))
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let value = self.send_json(Method::POST, &["orders"], order).await?;
        Ok(normalize_order(unwrap_object(&value)))
    }

    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        payment_id: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut body = json!({ "status": status.api_value() });
        if let Some(payment_id) = payment_id.filter(|p| !p.is_empty()) {
            body["paymentId"] = json!(payment_id);
        }
        self.send_json(Method::PATCH, &["orders", id, "status"], &body)
            .await
            .map(|_| ())
    }

    pub async fn get_order_status(&self, id: &str) -> Result<OrderStatus, ApiError> {
        let value = self.get(&["orders", id, "status"], &[]).await?;
        Ok(normalize_order_status(&value))
    }
}
