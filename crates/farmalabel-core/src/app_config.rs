/// Application configuration for the components that perform I/O.
///
/// The import/merge and layout/render crates are pure and take no
/// configuration dependency; only the API client and the CLI shell consume
/// this, and they receive it explicitly rather than reading ambient globals.
#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the remote product/offer query service.
    pub api_base_url: String,
    /// Token sent as `X-API-TOKEN`; omitted from requests when `None`.
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Pixel multiplier applied to PNG exports for sharper output.
    pub export_scale: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field("export_scale", &self.export_scale)
            .finish()
    }
}
