//! Typed client for the retailer's REST API.
//!
//! Every response body passes through [`crate::normalize`] before it leaves this
//! module, so callers only ever see strict types.

use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::normalize::{field, safe_string};

mod auth;
mod catalog;
mod checkout;
mod dashboard;
mod orders;
mod upload;

pub use catalog::{ProductFilters, ProductPayload};
pub use checkout::{PaymentItem, PaymentPayer, PaymentRequest};
pub use orders::{NewOrder, NewOrderItem};
pub use upload::{ImageUploader, UploadError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx answer. `message` comes from the error envelope when present.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        details: Value,
    },

    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A path segment that cannot name a resource (`""`, `.` or `..`).
    #[error("invalid identifier {0:?}")]
    InvalidSegment(String),

    #[error("invalid API base url {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::InvalidSegment(_) | ApiError::InvalidBaseUrl(_) => None,
        }
    }

    /// Message for a transient user notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport(_) | ApiError::InvalidBaseUrl(_) => {
                "Erro de conexão com o servidor".to_string()
            }
            ApiError::InvalidSegment(_) => "Identificador inválido".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Copy of this client that sends `Authorization: Bearer <token>` when a token is set.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL extended with `path`, each segment percent-encoded so ids can never
    /// reach a different resource.
    fn url(&self, path: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = path
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(ApiError::InvalidSegment(bad.to_string()));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|err| ApiError::InvalidBaseUrl(format!("{}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    /// Issues one request. Query params with empty values are dropped; a 204 or an
    /// empty body yields `Value::Null`, as does a body that is not valid JSON.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &[&str],
        params: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let params: Vec<(&str, &str)> = params
            .iter()
            .copied()
            .filter(|(_, value)| !value.is_empty())
            .collect();

        let mut builder = self.http.request(method.clone(), url.clone());
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, %url, "upstream request");
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let envelope = response.json::<Value>().await.ok();
            let message = envelope
                .as_ref()
                .map(|body| safe_string(field(body, "message")))
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("Erro {}", status.as_u16()));
            let details = match &envelope {
                Some(body) => field(body, "details").cloned().unwrap_or_else(|| body.clone()),
                None => Value::Null,
            };
            tracing::warn!(%method, %url, status = status.as_u16(), %message, "upstream request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
                details,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or_else(|err| {
            tracing::warn!(%url, error = %err, "upstream returned malformed json");
            Value::Null
        }))
    }

    pub(crate) async fn get(&self, path: &[&str], params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.request::<Value>(Method::GET, path, params, None).await
    }

    pub(crate) async fn send_json<B>(&self, method: Method, path: &[&str], body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.request(method, path, &[], Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &[&str]) -> Result<(), ApiError> {
        self.request::<Value>(Method::DELETE, path, &[], None)
            .await
            .map(|_| ())
    }
}
