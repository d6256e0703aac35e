use std::{collections::HashMap, fs};

use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "qrlink-server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".into(),
        }
    }
}

/// Defaults, then `qrlink-server.toml` in the working directory, then the
/// `QRLINK_BIND` environment variable.
pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    let env_bind = std::env::var("QRLINK_BIND").ok();
    merge_settings(file.as_deref(), env_bind)
}

fn merge_settings(file: Option<&str>, env_bind: Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.bind_addr = v.clone();
                }
            }
            Err(e) => warn!("ignoring malformed {SETTINGS_FILE}: {e}"),
        }
    }

    if let Some(v) = env_bind {
        settings.bind_addr = v;
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
