use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Category, Product, ProductColor, Subcategory};

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryTree {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}

/// Product page payload: the product with its resolved category, subcategory and
/// the colors currently offered.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    pub category: Option<Category>,
    pub subcategory: Option<Subcategory>,
    pub in_stock_colors: Vec<ProductColor>,
}
