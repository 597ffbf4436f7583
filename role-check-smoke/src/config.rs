use confique::Config;
use std::time::Duration;

/// Config file read when `ROLE_CHECK_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "role-check.toml";

/// Configuration of the role-check smoke tester
#[derive(Debug, Config, Clone)]
pub struct SmokeConfig {
    /// Base URL of the accounts service, e.g. https://example.com
    #[config(env = "ROLE_CHECK_BASE_URL")]
    pub base_url: String,

    /// Path of the role-check endpoint (default: /accounts/api/role_check/)
    #[config(env = "ROLE_CHECK_ENDPOINT", default = "/accounts/api/role_check/")]
    pub endpoint: String,

    /// Username (or email) to check
    #[config(env = "ROLE_CHECK_USERNAME")]
    pub username: String,

    /// Role to compare against (default: empty)
    #[config(env = "ROLE_CHECK_ROLE", default = "")]
    pub role: String,

    /// CSRF token, installed as the `csrftoken` cookie and sent in the X-CSRFToken header
    #[config(env = "ROLE_CHECK_CSRFTOKEN")]
    pub csrftoken: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[config(env = "ROLE_CHECK_TIMEOUT", default = 10)]
    pub timeout: u64,
}

impl SmokeConfig {
    /// Loads the configuration from environment variables, then the config file
    pub fn load() -> Result<Self, confique::Error> {
        let path = std::env::var("ROLE_CHECK_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::builder().env().file(path).load()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
