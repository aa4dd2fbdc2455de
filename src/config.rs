use std::net::IpAddr;
use std::time::Duration;

pub const DEFAULT_INSIGHTS_HUB_URL: &str = "https://gateway.eu1.mindsphere.io";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Deployment prefix, e.g. `/my-app`. Empty when served from the root.
    pub base_path: String,
    pub insights_hub_url: String,
    pub upstream_timeout: Duration,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let base_path = normalize_base_path(&env_or("BASE_PATH", ""));

        let insights_hub_url = env_or("INSIGHTS_HUB_API_URL", DEFAULT_INSIGHTS_HUB_URL)
            .trim_end_matches('/')
            .to_string();
        if insights_hub_url.is_empty() {
            return Err("Invalid INSIGHTS_HUB_API_URL: must not be empty".to_string());
        }

        let timeout_secs: u64 = env_or("UPSTREAM_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid UPSTREAM_TIMEOUT_SECS: {e}"))?;

        let max_body_size: usize = env_or("MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            base_path,
            insights_hub_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            max_body_size,
            log_level,
        })
    }
}

/// Strip trailing slashes and make sure a non-empty prefix starts with `/`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
