//! Normalization boundary between the remote API and the gateway's strict types.
//!
//! The backend is loosely typed: ids arrive as numbers or strings, lists arrive bare
//! or wrapped, nested records arrive as objects or JSON-encoded strings, and key
//! spellings drift between camelCase and snake_case. Every function here is total:
//! unexpected input degrades to an empty string, zero, or an empty collection.

mod auth;
mod catalog;
mod coerce;
mod orders;

pub use auth::normalize_login;
pub use catalog::{
    normalize_categories, normalize_category, normalize_colors, normalize_product,
    normalize_products, normalize_sizes, normalize_subcategories, normalize_subcategory,
};
pub use coerce::{
    field, first_field, first_string, safe_bool, safe_count, safe_decimal, safe_quantity,
    safe_string, try_json, unwrap_array, unwrap_object,
};
pub use orders::{
    FALLBACK_ORDER_ID, checkout_redirect_url, normalize_metrics, normalize_order,
    normalize_order_status, normalize_orders,
};
