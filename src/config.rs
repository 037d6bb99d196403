//! Server configuration.
//!
//! Loaded once at startup from environment variables, with defaults that
//! work for a local run:
//! - `TASKBOARD_HOST` - bind address (default `127.0.0.1`)
//! - `TASKBOARD_PORT` - bind port (default `8080`)
//! - `TASKBOARD_DB` - SQLite database path (default `taskboard.db`)
//! - `TASKBOARD_STATIC_DIR` - web client assets (default `static`)

use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB: &str = "taskboard.db";
const DEFAULT_STATIC_DIR: &str = "static";

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = std::env::var("TASKBOARD_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_port(std::env::var("TASKBOARD_PORT").ok());
        let database_path =
            PathBuf::from(std::env::var("TASKBOARD_DB").unwrap_or_else(|_| DEFAULT_DB.to_string()));
        let static_dir = PathBuf::from(
            std::env::var("TASKBOARD_STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
        );

        Self {
            host,
            port,
            database_path,
            static_dir,
        }
    }

    /// Address string to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DB),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(text) => match text.parse() {
            Ok(port) => port,
            Err(_) => {
                tracing::warn!(
                    "Invalid TASKBOARD_PORT '{}', falling back to {}",
                    text,
                    DEFAULT_PORT
                );
                DEFAULT_PORT
            }
        },
    }
}
