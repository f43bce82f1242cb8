//! Server Configuration
//!
//! Read from the environment (a `.env` file is loaded first when present).

/// Server settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// Directory holding the compiled web frontend
    pub static_dir: String,

    /// Postgres connection string; in-memory store when absent
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:4000".into(),
            static_dir: "static".into(),
            database_url: None,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: non_empty("STATIC_DIR").unwrap_or(defaults.static_dir),
            database_url: non_empty("DATABASE_URL"),
        }
    }
}
