//! HTTP server configuration

use serde::Deserialize;

/// HTTP server configuration
///
/// # Example
///
/// ```toml
/// [api_server]
/// host = "0.0.0.0"   # default
/// port = 10000       # default
/// cors = false       # default
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allow cross-origin requests from any origin (needed when the ad
    /// webview is served from another domain)
    pub cors: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            cors: false,
        }
    }
}

impl ApiServerConfig {
    /// Socket address string for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 10000);
        assert!(!config.cors);
        assert_eq!(config.bind_addr(), "0.0.0.0:10000");
    }

    #[test]
    fn test_custom_port() {
        let config: ApiServerConfig = toml::from_str("port = 8080\ncors = true").unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.cors);
        assert_eq!(config.host, "0.0.0.0");
    }
}
