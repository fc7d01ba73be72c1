use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::sheet::parser::DEFAULT_LABEL_WRAPPERS;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fillable PDF the TemplateFieldMap was authored against.
    pub template_path: PathBuf,
    /// Directory for per-request output documents.
    pub output_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Characters trimmed as decoration around lines and labels.
    pub label_wrappers: String,
    /// Keep earlier values when a label is repeated with nothing after it.
    pub skip_empty_values: bool,
    /// Recompute missing ability modifiers before rendering.
    pub derive_modifiers: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            template_path: env_or("TEMPLATE_PATH", "assets/ficha_dnd5e.pdf").into(),
            output_dir: env_or("OUTPUT_DIR", "output").into(),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            label_wrappers: env_or("LABEL_WRAPPERS", DEFAULT_LABEL_WRAPPERS),
            skip_empty_values: parse_bool(&env_or("SKIP_EMPTY_VALUES", "false"))
                .context("SKIP_EMPTY_VALUES must be true or false")?,
            derive_modifiers: parse_bool(&env_or("DERIVE_MODIFIERS", "true"))
                .context("DERIVE_MODIFIERS must be true or false")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool(" YES ").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("off").unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        assert!(parse_bool("talvez").is_err());
        assert!(parse_bool("").is_err());
    }
}
