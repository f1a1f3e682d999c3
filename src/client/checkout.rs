use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::{cart::Cart, models::BuyerInfo, normalize::checkout_redirect_url};

#[derive(Debug, Clone, Serialize)]
pub struct PaymentItem {
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentPayer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: String,
    pub items: Vec<PaymentItem>,
    pub payer: PaymentPayer,
}

impl PaymentRequest {
    pub fn new(order_id: &str, cart: &Cart, buyer: &BuyerInfo) -> Self {
        Self {
            order_id: order_id.to_string(),
            items: cart
                .lines()
                .iter()
                .map(|line| PaymentItem {
                    title: format!(
                        "{} ({}/{})",
                        line.product.name, line.selected_size, line.selected_color
                    ),
                    quantity: line.quantity,
                    unit_price: line.product.price,
                })
                .collect(),
            payer: PaymentPayer {
                name: buyer.name.clone(),
                email: buyer.email.clone(),
            },
        }
    }
}

impl ApiClient {
    /// Asks the payment backend for a hosted checkout. Returns the redirect URL,
    /// empty when the answer carried none.
    pub async fn create_payment_checkout(&self, request: &PaymentRequest) -> Result<String, ApiError> {
        let value = self
            .send_json(Method::POST, &["mercadopago", "checkout"], request)
            .await?;
        Ok(checkout_redirect_url(&value))
    }
}
