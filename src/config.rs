use std::{env, net::SocketAddr, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const CHAT_PATH: &str = "/api/chat/";
pub const CONTENT_IDEAS_PATH: &str = "/api/content-ideas/";
pub const DASHBOARD_DATA_PATH: &str = "/api/dashboard-data/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub dashboard_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_port(env::var("PORT").ok().as_deref()),
            dashboard_path: env::var("MARTTIN_DASHBOARD_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    match value {
        None => DEFAULT_PORT,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("invalid PORT '{raw}', using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub csrf_token: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token: csrf_token.into(),
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var("MARTTIN_BASE_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{DEFAULT_PORT}"));
        let csrf_token = env::var("MARTTIN_CSRF_TOKEN").unwrap_or_default();
        Self::new(base_url, csrf_token)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn chat_url(&self) -> String {
        self.endpoint(CHAT_PATH)
    }

    pub fn content_ideas_url(&self) -> String {
        self.endpoint(CONTENT_IDEAS_PATH)
    }

    pub fn dashboard_url(&self) -> String {
        self.endpoint(DASHBOARD_DATA_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_to_default() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
        assert_eq!(parse_port(Some("9001")), 9001);
        assert_eq!(parse_port(Some("nope")), DEFAULT_PORT);
    }

    #[test]
    fn endpoints_join_without_double_slash() {
        let config = ClientConfig::new("http://localhost:8080/", "tok");
        assert_eq!(config.chat_url(), "http://localhost:8080/api/chat/");
        assert_eq!(
            config.dashboard_url(),
            "http://localhost:8080/api/dashboard-data/"
        );
    }
}
