use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductColor {
    pub name: String,
    pub hex: String,
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category_id: String,
    pub subcategory_id: String,
    pub sizes: Vec<String>,
    pub colors: Vec<ProductColor>,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

impl Product {
    /// Colors the storefront may offer; a missing stock flag counts as in stock.
    pub fn in_stock_colors(&self) -> Vec<ProductColor> {
        self.colors.iter().filter(|c| c.in_stock).cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

/// Order lifecycle. Serialized with the storefront's display labels; the remote
/// API speaks the lowercase English values returned by [`OrderStatus::api_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
pub enum OrderStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Entregue")]
    Delivered,
    #[serde(rename = "Cancelado")]
    Canceled,
    #[serde(rename = "Finalizado")]
    Finished,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
        OrderStatus::Finished,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendente",
            OrderStatus::Delivered => "Entregue",
            OrderStatus::Canceled => "Cancelado",
            OrderStatus::Finished => "Finalizado",
        }
    }

    pub fn api_value(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Finished => "finished",
        }
    }

    /// Strict parse accepting either vocabulary, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Some(OrderStatus::Pending),
            "delivered" | "entregue" => Some(OrderStatus::Delivered),
            "canceled" | "cancelled" | "cancelado" => Some(OrderStatus::Canceled),
            "finished" | "finalizado" | "paid" | "approved" => Some(OrderStatus::Finished),
            _ => None,
        }
    }

    /// Lenient parse for backend payloads: anything unknown reads as pending.
    pub fn from_api(value: &str) -> Self {
        Self::parse(value).unwrap_or(OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub cep: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BuyerInfo {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub address: Address,
}

impl BuyerInfo {
    /// Names of the required checkout fields that are blank.
    pub fn missing_fields(&self) -> Vec<String> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("cpf", &self.cpf),
            ("phone", &self.phone),
            ("street", &self.address.street),
            ("number", &self.address.number),
            ("neighborhood", &self.address.neighborhood),
            ("city", &self.address.city),
            ("state", &self.address.state),
            ("cep", &self.address.cep),
        ];
        required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field.to_string())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderItemProduct {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product: OrderItemProduct,
    pub quantity: u32,
    pub selected_size: String,
    pub selected_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: String,
    pub buyer: BuyerInfo,
    pub payment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub avg_ticket: Decimal,
    pub pending_orders: u64,
    /// Keyed by display label.
    pub status_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub token: String,
    pub user: AdminUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHandoff {
    pub order_id: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}
