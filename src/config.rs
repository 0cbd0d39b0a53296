//! Client configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Route appended to the base URL.
pub const PREDICT_ROUTE: &str = "/api/predict";

/// Default scoring service location.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Default minimum time a loading state stays visible.
pub const DEFAULT_MIN_DISPLAY: Duration = Duration::from_millis(1500);

/// Upper bound on the configured minimum display time.
pub const MAX_MIN_DISPLAY: Duration = Duration::from_secs(60);

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the scoring service, without trailing slash
    pub api_url: String,
    /// Minimum time between submission and revealing a result
    pub min_display: Duration,
    /// Run the validation stage before every submission
    pub validate_before_submit: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Problems found while loading, logged once the subscriber is up
    pub warnings: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            min_display: DEFAULT_MIN_DISPLAY,
            validate_before_submit: true,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("hriday.log"),
            warnings: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Load from `HRIDAY_*` environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("HRIDAY_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("HRIDAY_MIN_DISPLAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) if Duration::from_millis(ms) > MAX_MIN_DISPLAY => {
                    config.min_display = MAX_MIN_DISPLAY;
                    config.warnings.push(format!(
                        "HRIDAY_MIN_DISPLAY_MS={ms} capped at {}",
                        MAX_MIN_DISPLAY.as_millis()
                    ));
                }
                Ok(ms) => config.min_display = Duration::from_millis(ms),
                Err(_) => config.warnings.push(format!(
                    "Ignoring HRIDAY_MIN_DISPLAY_MS={raw:?}: not a whole number of milliseconds"
                )),
            }
        }

        if let Some(raw) = lookup("HRIDAY_VALIDATE") {
            match parse_flag(&raw) {
                Some(flag) => config.validate_before_submit = flag,
                None => config
                    .warnings
                    .push(format!("Ignoring HRIDAY_VALIDATE={raw:?}: expected true/false")),
            }
        }

        if let Some(raw) = lookup("HRIDAY_LOG_MODE") {
            config.log_mode = match raw.trim() {
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                "auto" => LogMode::Auto,
                _ => {
                    config.warnings.push(format!(
                        "Ignoring HRIDAY_LOG_MODE={raw:?}: expected auto/file/stdout"
                    ));
                    LogMode::Auto
                }
            };
        }

        if let Some(path) = lookup("HRIDAY_LOG_FILE").filter(|v| !v.trim().is_empty()) {
            config.log_file = PathBuf::from(path);
        }

        config
    }

    /// Log the problems collected while loading. Call after the subscriber is installed.
    pub fn report_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }

    /// Full URL of the prediction route.
    #[must_use]
    pub fn predict_url(&self) -> String {
        format!("{}{}", self.api_url, PREDICT_ROUTE)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.predict_url(), "http://127.0.0.1:5000/api/predict");
        assert_eq!(config.min_display, Duration::from_millis(1500));
        assert!(config.validate_before_submit);
        assert_eq!(config.log_mode, LogMode::Auto);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HRIDAY_API_URL", "https://scoring.example.org/"),
            ("HRIDAY_MIN_DISPLAY_MS", "0"),
            ("HRIDAY_VALIDATE", "no"),
            ("HRIDAY_LOG_MODE", "stdout"),
            ("HRIDAY_LOG_FILE", "/tmp/h.log"),
        ]));
        assert_eq!(config.predict_url(), "https://scoring.example.org/api/predict");
        assert_eq!(config.min_display, Duration::ZERO);
        assert!(!config.validate_before_submit);
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/h.log"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HRIDAY_MIN_DISPLAY_MS", "soon"),
            ("HRIDAY_VALIDATE", "maybe"),
        ]));
        assert_eq!(config.min_display, DEFAULT_MIN_DISPLAY);
        assert!(config.validate_before_submit);
        assert_eq!(config.warnings.len(), 2);
        assert!(config.warnings[0].contains("HRIDAY_MIN_DISPLAY_MS"));
        assert!(config.warnings[1].contains("HRIDAY_VALIDATE"));
    }

    #[test]
    fn test_unknown_log_mode_is_reported() {
        let config = ClientConfig::from_lookup(lookup(&[("HRIDAY_LOG_MODE", "syslog")]));
        assert_eq!(config.log_mode, LogMode::Auto);
        assert_eq!(config.warnings.len(), 1);
        assert!(config.warnings[0].contains("HRIDAY_LOG_MODE"));
    }

    #[test]
    fn test_min_display_is_capped() {
        let config = ClientConfig::from_lookup(lookup(&[(
            "HRIDAY_MIN_DISPLAY_MS",
            "18446744073709551615",
        )]));
        assert_eq!(config.min_display, MAX_MIN_DISPLAY);
        assert_eq!(config.warnings.len(), 1);

        let config = ClientConfig::from_lookup(lookup(&[("HRIDAY_MIN_DISPLAY_MS", "60000")]));
        assert_eq!(config.min_display, MAX_MIN_DISPLAY);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_clean_environment_has_no_warnings() {
        let config = ClientConfig::from_lookup(lookup(&[("HRIDAY_LOG_MODE", "auto")]));
        assert!(config.warnings.is_empty());
    }
}
