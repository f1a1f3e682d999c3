use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde_json::Value;
use thiserror::Error;

use crate::{
    models::UploadedImage,
    normalize::{field, safe_string},
};

const UPLOAD_FAILED: &str = "Erro ao fazer upload da imagem";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image upload is not configured: set CLOUDINARY_CLOUD_NAME and CLOUDINARY_UPLOAD_PRESET")]
    NotConfigured,

    #[error("{0}")]
    Rejected(String),

    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Unsigned uploads to the image CDN using a preconfigured upload preset.
#[derive(Debug, Clone)]
pub struct ImageUploader {
    http: Client,
    api_base: String,
    cloud_name: Option<String>,
    upload_preset: Option<String>,
}

impl ImageUploader {
    pub fn new(
        http: Client,
        api_base: &str,
        cloud_name: Option<String>,
        upload_preset: Option<String>,
    ) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            cloud_name: non_empty(cloud_name),
            upload_preset: non_empty(upload_preset),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.cloud_name.is_some() && self.upload_preset.is_some()
    }

    pub async fn upload(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, UploadError> {
        let (Some(cloud_name), Some(preset)) = (&self.cloud_name, &self.upload_preset) else {
            return Err(UploadError::NotConfigured);
        };

        let mut part = Part::bytes(bytes).file_name(file_name.to_string());
        if let Some(content_type) = content_type {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", preset.clone());

        let url = format!("{}/v1_1/{}/image/upload", self.api_base, cloud_name);
        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = field(&body, "error")
                .map(|error| safe_string(field(error, "message")))
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| UPLOAD_FAILED.to_string());
            tracing::warn!(status = status.as_u16(), %message, "image upload rejected");
            return Err(UploadError::Rejected(message));
        }

        let image = UploadedImage {
            secure_url: safe_string(field(&body, "secure_url")),
            public_id: safe_string(field(&body, "public_id")),
        };
        if image.secure_url.is_empty() {
            return Err(UploadError::Rejected(UPLOAD_FAILED.to_string()));
        }
        tracing::info!(public_id = %image.public_id, "image uploaded");
        Ok(image)
    }
}
