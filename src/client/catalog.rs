use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{ApiClient, ApiError};
use crate::{
    models::{Category, Product, Subcategory},
    normalize::{
        normalize_categories, normalize_category, normalize_product, normalize_products,
        normalize_subcategories, normalize_subcategory, unwrap_object,
    },
};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    #[serde(alias = "category")]
    pub category_id: Option<String>,
    #[serde(alias = "subcategory")]
    pub subcategory_id: Option<String>,
    pub search: Option<String>,
}

impl ProductFilters {
    fn as_params(&self) -> [(&'static str, &str); 3] {
        [
            ("categoryId", self.category_id.as_deref().unwrap_or("").trim()),
            ("subcategoryId", self.subcategory_id.as_deref().unwrap_or("").trim()),
            ("search", self.search.as_deref().unwrap_or("").trim()),
        ]
    }

    /// Local re-check of the filters, for backends that ignore the query string.
    pub fn matches(&self, product: &Product) -> bool {
        fn wanted(filter: &Option<String>) -> Option<&str> {
            filter
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
        }

        if let Some(category) = wanted(&self.category_id) {
            if product.category_id != category {
                return false;
            }
        }
        if let Some(subcategory) = wanted(&self.subcategory_id) {
            if product.subcategory_id != subcategory {
                return false;
            }
        }
        if let Some(search) = wanted(&self.search) {
            let needle = search.to_lowercase();
            return product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle);
        }
        true
    }
}

/// Product body as the backend expects it: colors travel as a list of hex strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub price: Decimal,
    pub category_id: String,
    pub subcategory_id: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub description: String,
    pub image: String,
    pub featured: bool,
    pub is_new: bool,
}

impl ApiClient {
    pub async fn list_products(&self, filters: &ProductFilters) -> Result<Vec<Product>, ApiError> {
        let value = self.get(&["products"], &filters.as_params()).await?;
        Ok(normalize_products(&value))
    }

    /// `None` when the backend answers without a usable record.
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, ApiError> {
        let value = self.get(&["products", id], &[]).await?;
        let product = normalize_product(unwrap_object(&value));
        Ok((!product.id.is_empty()).then_some(product))
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        let value = self.send_json(Method::POST, &["products"], payload).await?;
        Ok(normalize_product(unwrap_object(&value)))
    }

    pub async fn update_product(&self, id: &str, payload: &ProductPayload) -> Result<Product, ApiError> {
        let value = self
            .send_json(Method::PUT, &["products", id], payload)
            .await?;
        Ok(normalize_product(unwrap_object(&value)))
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&["products", id]).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let value = self.get(&["categories"], &[]).await?;
        Ok(normalize_categories(&value))
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, ApiError> {
        let value = self
            .send_json(Method::POST, &["categories"], &json!({ "name": name }))
            .await?;
        Ok(normalize_category(unwrap_object(&value)))
    }

    pub async fn update_category(&self, id: &str, name: &str) -> Result<Category, ApiError> {
        let value = self
            .send_json(Method::PUT, &["categories", id], &json!({ "name": name }))
            .await?;
        Ok(normalize_category(unwrap_object(&value)))
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&["categories", id]).await
    }

    pub async fn list_subcategories(&self, category_id: Option<&str>) -> Result<Vec<Subcategory>, ApiError> {
        let value = self
            .get(&["subcategories"], &[("categoryId", category_id.unwrap_or(""))])
            .await?;
        Ok(normalize_subcategories(&value))
    }

    pub async fn create_subcategory(&self, name: &str, category_id: &str) -> Result<Subcategory, ApiError> {
        let body = json!({ "name": name, "categoryId": category_id });
        let value = self.send_json(Method::POST, &["subcategories"], &body).await?;
        Ok(normalize_subcategory(unwrap_object(&value)))
    }

    pub async fn update_subcategory(
        &self,
        id: &str,
        name: &str,
        category_id: Option<&str>,
    ) -> Result<Subcategory, ApiError> {
        let mut body = json!({ "name": name });
        if let Some(category_id) = category_id {
            body["categoryId"] = json!(category_id);
        }
        let value = self
            .send_json(Method::PUT, &["subcategories", id], &body)
            .await?;
        Ok(normalize_subcategory(unwrap_object(&value)))
    }

    pub async fn delete_subcategory(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&["subcategories", id]).await
    }
}
