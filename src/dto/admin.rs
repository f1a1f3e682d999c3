use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    client::ProductPayload,
    models::{Order, Subcategory},
    normalize::{normalize_colors, normalize_sizes, safe_decimal},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Product form as submitted by the admin console. Price, sizes and colors are
/// accepted in whatever shape the form produced and coerced on the way out.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub price: Value,
    pub category_id: String,
    pub subcategory_id: String,
    pub sizes: Value,
    pub colors: Value,
    pub description: String,
    pub image: String,
    pub featured: bool,
    pub is_new: bool,
}

impl ProductForm {
    pub fn missing_fields(&self) -> Vec<String> {
        [("name", &self.name), ("categoryId", &self.category_id)]
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field.to_string())
            .collect()
    }

    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.trim().to_string(),
            price: safe_decimal(Some(&self.price)),
            category_id: self.category_id.trim().to_string(),
            subcategory_id: self.subcategory_id.trim().to_string(),
            sizes: normalize_sizes(Some(&self.sizes)),
            colors: normalize_colors(Some(&self.colors))
                .into_iter()
                .map(|color| if color.hex.is_empty() { color.name } else { color.hex })
                .collect(),
            description: self.description.trim().to_string(),
            image: self.image.trim().to_string(),
            featured: self.featured,
            is_new: self.is_new,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryForm {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryForm {
    pub name: String,
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryQuery {
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    /// Display label or API value.
    pub status: String,
    pub payment_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SubcategoryList {
    #[schema(value_type = Vec<Subcategory>)]
    pub items: Vec<Subcategory>,
}
