use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub luis_app_id: String,
    pub luis_api_key: String,
    pub luis_api_host_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3978),
            luis_app_id: env::var("LUIS_APP_ID").unwrap_or_default(),
            luis_api_key: env::var("LUIS_API_KEY").unwrap_or_default(),
            luis_api_host_name: env::var("LUIS_API_HOST_NAME")
                .ok()
                .map(|h| normalize_host(&h))
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| "westus.api.cognitive.microsoft.com".to_string()),
        }
    }

    pub fn is_luis_configured(&self) -> bool {
        !self.luis_app_id.is_empty() && !self.luis_api_key.is_empty()
    }
}

/// Accepts either a bare host name or a full endpoint URL.
fn normalize_host(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}
