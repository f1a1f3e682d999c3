use serde_json::Value;

use super::coerce::{field, first_string, safe_string, unwrap_object};
use crate::models::{AdminUser, LoginSession};

pub fn normalize_login(value: &Value) -> LoginSession {
    let value = unwrap_object(value);
    let user = field(value, "user");
    let user_field = |key: &str| user.map(|u| safe_string(field(u, key))).unwrap_or_default();

    LoginSession {
        token: first_string(value, &["token", "accessToken", "access_token"]),
        user: AdminUser {
            id: user_field("id"),
            name: user_field("name"),
            email: user_field("email"),
        },
    }
}
