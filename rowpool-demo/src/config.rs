//! Demo configuration, read from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use rowpool::RecyclerConfig;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::error::DemoError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub recycler: RecyclerConfig,
    /// Initial number of rows in the list.
    pub rows: usize,
    pub log_file: PathBuf,
    /// One of off, error, warn, info, debug, trace.
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            recycler: RecyclerConfig::default(),
            rows: 10_000_000,
            log_file: PathBuf::from("rowpool-demo.log"),
            log_level: "debug".to_string(),
        }
    }
}

impl DemoConfig {
    /// Load from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, DemoError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.recycler.validate()?;
        Ok(config)
    }

    /// Parsed log level, falling back to `Info` for unknown names.
    pub fn level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::load(None).unwrap();
        assert_eq!(config.rows, 10_000_000);
        assert_eq!(config.recycler, RecyclerConfig::default());
        assert_eq!(config.level(), LevelFilter::Debug);
    }

    #[test]
    fn test_partial_json() {
        let config: DemoConfig =
            serde_json::from_str(r#"{"rows": 500, "recycler": {"overscan": 4}, "log_level": "TRACE"}"#)
                .unwrap();

        assert_eq!(config.rows, 500);
        assert_eq!(config.recycler.overscan, 4);
        assert_eq!(config.recycler.row_height, 1.0);
        assert_eq!(config.log_file, PathBuf::from("rowpool-demo.log"));
        assert_eq!(config.level(), LevelFilter::Trace);
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let config = DemoConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level(), LevelFilter::Info);
    }

    #[test]
    fn test_invalid_recycler_config_rejected() {
        let path = std::env::temp_dir().join(format!("rowpool-demo-{}.json", std::process::id()));
        fs::write(&path, r#"{"recycler": {"row_height": -1.0}}"#).unwrap();

        let result = DemoConfig::load(Some(&path));
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(DemoError::Recycler(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = DemoConfig::load(Some(Path::new("/nonexistent/rowpool-demo.json")));
        assert!(matches!(result, Err(DemoError::Io(_))));
    }
}
