use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::export::pdf::ConverterKind;
use crate::render::labels::Locale;
use crate::render::photo::PhotoStrategy;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding stored photo files.
    pub media_root: PathBuf,
    /// Public URL prefix under which `media_root` is served.
    pub media_url: String,
    /// Photo strategy for the preview endpoint. PDF export always inlines.
    pub photo_strategy: PhotoStrategy,
    pub pdf_converter: ConverterKind,
    pub pdf_converter_bin: String,
    pub locale: Locale,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or_default = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            database_url: var("DATABASE_URL")
                .context("Required environment variable 'DATABASE_URL' is not set")?,
            port: or_default("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
            media_root: PathBuf::from(or_default("MEDIA_ROOT", "media")),
            media_url: or_default("MEDIA_URL", "/media/"),
            photo_strategy: parse_setting("PHOTO_STRATEGY", &or_default("PHOTO_STRATEGY", "inline"))?,
            pdf_converter: parse_setting("PDF_CONVERTER", &or_default("PDF_CONVERTER", "builtin"))?,
            pdf_converter_bin: or_default("PDF_CONVERTER_BIN", "weasyprint"),
            locale: parse_setting("RESUME_LOCALE", &or_default("RESUME_LOCALE", "en"))?,
        })
    }
}

fn parse_setting<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    raw.parse::<T>().map_err(|e| anyhow!("{key}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/resumes")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.media_root, PathBuf::from("media"));
        assert_eq!(config.media_url, "/media/");
        assert_eq!(config.photo_strategy, PhotoStrategy::Inline);
        assert_eq!(config.pdf_converter, ConverterKind::Builtin);
        assert_eq!(config.pdf_converter_bin, "weasyprint");
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_missing_database_url_names_variable() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"), "got {err}");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/resumes"),
            ("PORT", "9000"),
            ("PHOTO_STRATEGY", "url"),
            ("PDF_CONVERTER", "command"),
            ("PDF_CONVERTER_BIN", "/usr/bin/wkhtmltopdf"),
            ("RESUME_LOCALE", "ru"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.photo_strategy, PhotoStrategy::Url);
        assert_eq!(config.pdf_converter, ConverterKind::Command);
        assert_eq!(config.pdf_converter_bin, "/usr/bin/wkhtmltopdf");
        assert_eq!(config.locale, Locale::Ru);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(load(&[("DATABASE_URL", "x"), ("PORT", "http")]).is_err());
        let err = load(&[("DATABASE_URL", "x"), ("RESUME_LOCALE", "de")]).unwrap_err();
        assert!(err.to_string().starts_with("RESUME_LOCALE"), "got {err}");
    }
}
