use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bigbike_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let doc = config_file_doc.as_ref();
    let path = config_file_path.as_deref();

    let lines = vec![
        "effective config (source precedence: env > file > default):".to_string(),
        render_line(
            "server.bind_address",
            &config.server.bind_address,
            field_source("server.bind_address", "BIGBIKE_BIND_ADDRESS", doc, path),
        ),
        render_line(
            "server.port",
            &config.server.port.to_string(),
            field_source("server.port", "BIGBIKE_PORT", doc, path),
        ),
        render_line(
            "server.graceful_shutdown_secs",
            &config.server.graceful_shutdown_secs.to_string(),
            field_source("server.graceful_shutdown_secs", "", doc, path),
        ),
        render_line(
            "storage.data_dir",
            &config.storage.data_dir.display().to_string(),
            field_source("storage.data_dir", "BIGBIKE_DATA_DIR", doc, path),
        ),
        render_line(
            "assistant.locale",
            &config.assistant.locale,
            field_source("assistant.locale", "BIGBIKE_LOCALE", doc, path),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            field_source("logging.level", "BIGBIKE_LOG_LEVEL", doc, path),
        ),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format).to_lowercase(),
            field_source("logging.format", "BIGBIKE_LOG_FORMAT", doc, path),
        ),
    ];

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("  {key} = {value}  [{source}]")
}

fn field_source(
    key: &str,
    env_var: &str,
    config_doc: Option<&Value>,
    config_path: Option<&Path>,
) -> String {
    if !env_var.is_empty() && env::var(env_var).map(|value| !value.trim().is_empty()).unwrap_or(false)
    {
        return format!("env:{env_var}");
    }

    if let (Some(doc), Some(path)) = (config_doc, config_path) {
        if file_has_key(doc, key) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn file_has_key(doc: &Value, dotted_key: &str) -> bool {
    let mut current = doc;
    for part in dotted_key.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

fn detect_config_path() -> Option<PathBuf> {
    let default = PathBuf::from("bigbike.toml");
    default.exists().then_some(default)
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}
