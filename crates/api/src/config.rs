/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Background poll interval in seconds (default: `15`).
    pub poll_interval_secs: u64,
    /// Poll cycles are skipped when no client has read the snapshot for
    /// this long, in seconds (default: `120`).
    pub poll_idle_window_secs: i64,
    /// Cooldown between forced manual refreshes, in seconds (default: `300`).
    pub refresh_cooldown_secs: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `POLL_INTERVAL_SECS`     | `15`                       |
    /// | `POLL_IDLE_WINDOW_SECS`  | `120`                      |
    /// | `REFRESH_COOLDOWN_SECS`  | `300`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let poll_interval_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("POLL_INTERVAL_SECS must be a valid u64");

        let poll_idle_window_secs: i64 = std::env::var("POLL_IDLE_WINDOW_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("POLL_IDLE_WINDOW_SECS must be a valid i64");

        let refresh_cooldown_secs: i64 = std::env::var("REFRESH_COOLDOWN_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REFRESH_COOLDOWN_SECS must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            poll_interval_secs,
            poll_idle_window_secs,
            refresh_cooldown_secs,
        }
    }
}
