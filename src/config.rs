use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
    pub api_base_dev: String,
    pub api_base_prod: String,
    pub log_level: String,
}

/// Exactly two deployment environments; each carries its own statically
/// configured upstream base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let environment = match env_or("PORTAL_ENV", "development").as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };

        let host: IpAddr = env_or("PORTAL_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PORTAL_HOST: {e}"))?;

        let port: u16 = env_or("PORTAL_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PORTAL_PORT: {e}"))?;

        let api_base_dev = env_or("PORTAL_API_BASE_DEV", "http://localhost:5000/api");

        // The production URL has no sensible default; require it when the
        // production environment is selected.
        let api_base_prod = match environment {
            Environment::Production => env_required("PORTAL_API_BASE_PROD")?,
            Environment::Development => env_or("PORTAL_API_BASE_PROD", ""),
        };

        let log_level = env_or("PORTAL_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            environment,
            api_base_dev,
            api_base_prod,
            log_level,
        })
    }

    /// The upstream base URL for the selected environment.
    pub fn api_base(&self) -> &str {
        match self.environment {
            Environment::Development => &self.api_base_dev,
            Environment::Production => &self.api_base_prod,
        }
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
