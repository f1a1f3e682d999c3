use crate::{
    client::{ApiClient, ImageUploader},
    config::AppConfig,
    session::SessionStore,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub uploader: ImageUploader,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .build()?;

        Ok(Self {
            api: ApiClient::new(http.clone(), &config.api_base_url),
            uploader: ImageUploader::new(
                http,
                &config.cloudinary_api_base,
                config.cloudinary_cloud_name.clone(),
                config.cloudinary_upload_preset.clone(),
            ),
            sessions: SessionStore::with_idle_ttl(config.session_idle_ttl),
        })
    }

    /// Client carrying the bearer token stored in `token`.
    pub fn api_with(&self, token: Option<String>) -> ApiClient {
        self.api.with_token(token)
    }
}
