//! API Configuration Module
//!
//! Server and CORS settings, loaded from environment variables with
//! development defaults.

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address for the HTTP listener.
    pub host: String,

    /// Bind port for the HTTP listener.
    pub port: u16,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// - `DOSSIER_HOST`: bind address (default: 0.0.0.0)
    /// - `DOSSIER_PORT`: bind port (default: 8080)
    /// - `DOSSIER_CORS_ORIGINS`: comma-separated allowed origins (empty = allow all)
    pub fn from_env() -> Self {
        let host = std::env::var("DOSSIER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("DOSSIER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let cors_origins = std::env::var("DOSSIER_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
        }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }
}
