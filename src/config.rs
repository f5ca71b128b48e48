use std::{io, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::libs::gen_id;

/// Service settings, kept in `config/setting.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    port: u16,
    /// Base url of the shop backend
    #[serde(default = "default_backend_url")]
    backend_url: String,
    /// Key for the session tokens handed to the dashboard
    token_secret: String,
    #[serde(default = "default_session_ttl")]
    session_ttl_secs: i64,
    #[serde(default = "default_request_timeout")]
    request_timeout_secs: u64,
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins when set
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_port() -> u16 {
    8080
}
fn default_backend_url() -> String {
    "http://localhost:3001".to_owned()
}
fn default_session_ttl() -> i64 {
    24 * 60 * 60
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_filter() -> String {
    "info".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            backend_url: default_backend_url(),
            token_secret: gen_id(32),
            session_ttl_secs: default_session_ttl(),
            request_timeout_secs: default_request_timeout(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub const PATH: &'static str = "config/setting.json";

    pub fn read() -> io::Result<Config> {
        Self::read_from(Self::PATH)
    }

    /// Reads the settings, writing the defaults first if the file is missing.
    pub fn read_from(path: impl AsRef<Path>) -> io::Result<Config> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(buf) => serde_json::from_str(&buf).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} is damaged: {e}", path.display()),
                )
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Config::default();
                std::fs::write(path, serde_json::to_string_pretty(&config)?)?;
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }
    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_secs
    }
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}
