use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub session_idle_ttl: Duration,
    pub cloudinary_api_base: String,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_upload_preset: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_base_url: "http://localhost:3001/api".to_string(),
            api_timeout: Duration::from_secs(15),
            session_idle_ttl: Duration::from_secs(24 * 60 * 60),
            cloudinary_api_base: "https://api.cloudinary.com".to_string(),
            cloudinary_cloud_name: None,
            cloudinary_upload_preset: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let host = env::var("APP_HOST").unwrap_or(defaults.host);
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let api_base_url = env::var("API_BASE_URL").unwrap_or(defaults.api_base_url);
        let api_timeout = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.api_timeout);
        let session_idle_ttl = env::var("SESSION_IDLE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_idle_ttl);
        let cloudinary_api_base =
            env::var("CLOUDINARY_API_BASE").unwrap_or(defaults.cloudinary_api_base);

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("API_BASE_URL must be an http(s) url, got {api_base_url:?}");
        }

        Ok(Self {
            host,
            port,
            api_base_url,
            api_timeout,
            session_idle_ttl,
            cloudinary_api_base,
            cloudinary_cloud_name: env::var("CLOUDINARY_CLOUD_NAME").ok(),
            cloudinary_upload_preset: env::var("CLOUDINARY_UPLOAD_PRESET").ok(),
        })
    }
}
