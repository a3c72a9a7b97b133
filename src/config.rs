//! Configuration and pod identity resolution.

use std::env;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Application settings resolved once at startup.
///
/// Configuration sources (in order of precedence):
/// 1. Environment variables (`APP_VERSION`, `APP_TITLE`, `HOST`, `PORT`)
/// 2. config file (if present)
/// 3. Built-in defaults
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_app_version")]
    pub app_version: String,
    #[serde(default = "default_app_title")]
    pub app_title: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_version: default_app_version(),
            app_title: default_app_title(),
            host: default_host(),
            port: default_port(),
        }
    }
}

// Default values
fn default_app_version() -> String {
    "1.0".to_string()
}
fn default_app_title() -> String {
    "My FastAPI App".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Settings {
    /// Load settings from the optional config file and environment variables.
    ///
    /// Missing keys fall back to the built-in defaults; no value validation
    /// is performed.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Load from config.toml if exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables. Values stay raw strings so
            // APP_VERSION=1.0 is not parsed into the float 1.
            .add_source(Environment::default())
            .build()?;

        config.try_deserialize()
    }
}

/// Pod identity supplied by the orchestration environment.
///
/// Resolved once at startup and immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct PodIdentity {
    pub name: String,
    pub ip: String,
}

impl PodIdentity {
    /// Read `POD_NAME` and `POD_IP`, falling back to `"unknown"`.
    pub fn from_env() -> Self {
        Self {
            name: env::var("POD_NAME").unwrap_or_else(|_| "unknown".to_string()),
            ip: env::var("POD_IP").unwrap_or_else(|_| "unknown".to_string()),
        }
    }
}
