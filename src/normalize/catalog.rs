use serde_json::Value;

use super::coerce::{
    field, first_field, first_string, safe_bool, safe_decimal, safe_string, unwrap_array,
};
use crate::models::{Category, Product, ProductColor, Subcategory};

/// Colors arrive either as plain strings (used as both name and hex) or as
/// objects carrying `name`, `hex` and a stock flag that defaults to true.
pub fn normalize_colors(value: Option<&Value>) -> Vec<ProductColor> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let color = match entry {
                Value::String(_) | Value::Number(_) => {
                    let text = safe_string(Some(entry));
                    ProductColor {
                        name: text.clone(),
                        hex: text,
                        in_stock: true,
                    }
                }
                Value::Object(_) => {
                    let name = safe_string(field(entry, "name"));
                    let hex = safe_string(field(entry, "hex"));
                    ProductColor {
                        name: if name.is_empty() { hex.clone() } else { name.clone() },
                        hex: if hex.is_empty() { name } else { hex },
                        in_stock: safe_bool(first_field(entry, &["inStock", "in_stock"]), true),
                    }
                }
                _ => return None,
            };
            (!color.name.is_empty()).then_some(color)
        })
        .collect()
}

pub fn normalize_sizes(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|size| safe_string(Some(size)))
        .filter(|size| !size.is_empty())
        .collect()
}

pub fn normalize_product(value: &Value) -> Product {
    Product {
        id: safe_string(field(value, "id")),
        name: safe_string(field(value, "name")),
        price: safe_decimal(field(value, "price")),
        category_id: first_string(value, &["categoryId", "category_id"]),
        subcategory_id: first_string(value, &["subcategoryId", "subcategory_id"]),
        sizes: normalize_sizes(field(value, "sizes")),
        colors: normalize_colors(field(value, "colors")),
        description: safe_string(field(value, "description")),
        image: safe_string(field(value, "image")),
        featured: field(value, "featured").map(|v| safe_bool(Some(v), false)),
        is_new: first_field(value, &["isNew", "is_new"]).map(|v| safe_bool(Some(v), false)),
    }
}

pub fn normalize_products(value: &Value) -> Vec<Product> {
    unwrap_array(value).iter().map(normalize_product).collect()
}

pub fn normalize_subcategory(value: &Value) -> Subcategory {
    Subcategory {
        id: safe_string(field(value, "id")),
        name: safe_string(field(value, "name")),
        category_id: first_string(value, &["categoryId", "category_id"]),
    }
}

pub fn normalize_subcategories(value: &Value) -> Vec<Subcategory> {
    unwrap_array(value)
        .iter()
        .map(normalize_subcategory)
        .collect()
}

/// Categories may embed their subcategories; embedded entries without a
/// linkage field inherit the parent's id.
pub fn normalize_category(value: &Value) -> Category {
    let id = safe_string(field(value, "id"));
    let subcategories = field(value, "subcategories")
        .map(unwrap_array)
        .unwrap_or_default()
        .iter()
        .map(|sub| {
            let mut sub = normalize_subcategory(sub);
            if sub.category_id.is_empty() {
                sub.category_id = id.clone();
            }
            sub
        })
        .collect();

    Category {
        name: safe_string(field(value, "name")),
        id,
        subcategories,
    }
}

pub fn normalize_categories(value: &Value) -> Vec<Category> {
    unwrap_array(value).iter().map(normalize_category).collect()
}
