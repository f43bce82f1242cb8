//! Client Configuration

/// Default backend when `PAYLINK_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Where the checkout endpoint lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://pay.example.com`
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        std::env::var("PAYLINK_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }

    /// Full URL of `POST /api/checkout`
    pub fn checkout_url(&self) -> String {
        format!("{}/api/checkout", self.base_url.trim_end_matches('/'))
    }
}
