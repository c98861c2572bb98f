use crate::store::ImportMode;
use std::{env, path::PathBuf, str::FromStr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/entries.json";
pub const DEFAULT_WINDOW_DAYS: u32 = 14;
pub const DEFAULT_MAX_WINDOW_DAYS: u32 = 91;
/// Hard ceiling for `MAX_WINDOW_DAYS`, about ten years.
pub const WINDOW_DAYS_LIMIT: u32 = 3660;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub import_mode: ImportMode,
    pub default_window_days: u32,
    pub max_window_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            import_mode: ImportMode::default(),
            default_window_days: DEFAULT_WINDOW_DAYS,
            max_window_days: DEFAULT_MAX_WINDOW_DAYS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparsable values keep the
    /// default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_window_days = parsed(&lookup, "MAX_WINDOW_DAYS", defaults.max_window_days).clamp(1, WINDOW_DAYS_LIMIT);
        let default_window_days =
            parsed(&lookup, "DEFAULT_WINDOW_DAYS", defaults.default_window_days).clamp(1, max_window_days);

        Self {
            port: parsed(&lookup, "PORT", defaults.port),
            data_path: lookup("APP_DATA_PATH").map_or(defaults.data_path, PathBuf::from),
            import_mode: parsed(&lookup, "IMPORT_MODE", defaults.import_mode),
            default_window_days,
            max_window_days,
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.data_path, PathBuf::from("data/entries.json"));
        assert_eq!(cfg.import_mode, ImportMode::Replace);
        assert_eq!(cfg.default_window_days, 14);
        assert_eq!(cfg.max_window_days, 91);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("PORT", "9000"),
            ("APP_DATA_PATH", "/tmp/mood.json"),
            ("IMPORT_MODE", "merge"),
            ("DEFAULT_WINDOW_DAYS", "28"),
        ]);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/mood.json"));
        assert_eq!(cfg.import_mode, ImportMode::Merge);
        assert_eq!(cfg.default_window_days, 28);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[("PORT", "eighty"), ("IMPORT_MODE", "append"), ("MAX_WINDOW_DAYS", "0")]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.import_mode, ImportMode::Replace);
        assert_eq!(cfg.max_window_days, 1);
        assert_eq!(cfg.default_window_days, 1);
    }

    #[test]
    fn max_window_is_capped() {
        let cfg = config(&[("MAX_WINDOW_DAYS", "4000000000"), ("DEFAULT_WINDOW_DAYS", "4000000000")]);
        assert_eq!(cfg.max_window_days, WINDOW_DAYS_LIMIT);
        assert_eq!(cfg.default_window_days, WINDOW_DAYS_LIMIT);
    }
}
