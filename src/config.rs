use std::env;

const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8000/api/py/tv/search";
const DEFAULT_PORT: u16 = 3000;

/// Runtime settings, resolved once at startup and handed to the server.
/// Handlers never read the environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where search requests are relayed to.
    pub upstream_url: String,
    /// Port the HTTP server binds on.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let upstream_url = env::var("UPSTREAM_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { upstream_url, port }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
