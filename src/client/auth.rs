use reqwest::Method;
use serde_json::json;

use super::{ApiClient, ApiError};
use crate::{models::LoginSession, normalize::normalize_login};

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, ApiError> {
        let body = json!({ "email": email, "password": password });
        let value = self.send_json(Method::POST, &["auth", "login"], &body).await?;
        Ok(normalize_login(&value))
    }
}
