//! Configuration management module
//!
//! Handles loading, saving, and validation of the simulation timings, UI
//! settings and logging preferences.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ExamError, Result, APP_NAME, CONFIG_FILE, LOG_FILE};

/// Longest simulated delay accepted for any operation
const MAX_DELAY_MS: u64 = 60_000;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed seed for mock data; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Simulated backend latencies
    pub simulation: SimulationConfig,
    /// Terminal UI behaviour
    pub ui: UiConfig,
}

/// Fixed delays standing in for network and processing latency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Upload phase of exam creation
    pub upload_ms: u64,
    /// Processing phase of exam creation
    pub processing_ms: u64,
    /// Recalculating every question of an exam
    pub recalculate_all_ms: u64,
    /// Recalculating a single question
    pub recalculate_question_ms: u64,
}

/// Terminal UI settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll interval
    pub tick_rate_ms: u64,
    /// How long a notification stays on screen
    pub notification_ttl_ms: u64,
    /// Notifications shown at once
    pub max_notifications: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_filter: "exam_checker=info".to_string(),
            simulation: SimulationConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            upload_ms: 2000,
            processing_ms: 3000,
            recalculate_all_ms: 2000,
            recalculate_question_ms: 1000,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            notification_ttl_ms: 4000,
            max_notifications: 3,
        }
    }
}

impl SimulationConfig {
    /// All delays zero, for tests and demos
    pub fn instant() -> Self {
        Self {
            upload_ms: 0,
            processing_ms: 0,
            recalculate_all_ms: 0,
            recalculate_question_ms: 0,
        }
    }

    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_ms)
    }

    pub fn recalculate_all_delay(&self) -> Duration {
        Duration::from_millis(self.recalculate_all_ms)
    }

    pub fn recalculate_question_delay(&self) -> Duration {
        Duration::from_millis(self.recalculate_question_ms)
    }

    fn validate(&self) -> Result<()> {
        let delays = [
            ("upload_ms", self.upload_ms),
            ("processing_ms", self.processing_ms),
            ("recalculate_all_ms", self.recalculate_all_ms),
            ("recalculate_question_ms", self.recalculate_question_ms),
        ];
        for (name, value) in delays {
            if value > MAX_DELAY_MS {
                return Err(ExamError::Config(format!(
                    "{} too long: {}ms (max: {}ms)",
                    name, value, MAX_DELAY_MS
                )));
            }
        }
        Ok(())
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    fn validate(&self) -> Result<()> {
        if !(10..=5000).contains(&self.tick_rate_ms) {
            return Err(ExamError::Config(format!(
                "Tick rate must be between 10 and 5000 ms, got {}",
                self.tick_rate_ms
            )));
        }
        if self.notification_ttl_ms == 0 {
            return Err(ExamError::Config(
                "Notification TTL must be greater than 0".to_string(),
            ));
        }
        if self.max_notifications == 0 {
            return Err(ExamError::Config(
                "At least one notification must be visible".to_string(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.ui.validate()?;
        if self.log_filter.trim().is_empty() {
            return Err(ExamError::Config("Log filter must not be empty".to_string()));
        }
        Ok(())
    }

    /// Set the simulated delays
    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Set the mock-data seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the notification lifetime
    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.ui.notification_ttl_ms = ttl.as_millis() as u64;
        self
    }

    /// Load configuration from the standard config file location.
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, defaults when the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ExamError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ExamError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ExamError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            ExamError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Standard configuration file path, `$CONFIG_HOME/exam-checker/exam-checker.toml`
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ExamError::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Standard log file path, `$DATA_HOME/exam-checker/exam-checker.log`
    pub fn log_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            ExamError::Config("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(LOG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.upload_delay(), Duration::from_secs(2));
        assert_eq!(config.simulation.processing_delay(), Duration::from_secs(3));
        assert_eq!(config.simulation.recalculate_all_delay(), Duration::from_secs(2));
        assert_eq!(config.simulation.recalculate_question_delay(), Duration::from_secs(1));
        assert_eq!(config.ui.tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.simulation.processing_ms = MAX_DELAY_MS + 1;
        assert!(matches!(config.validate(), Err(ExamError::Config(_))));

        let mut config = AppConfig::default();
        config.ui.tick_rate_ms = 0;
        assert!(config.validate().is_err());

        let config = AppConfig::default().with_notification_ttl(Duration::ZERO);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.log_filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = AppConfig::default()
            .with_simulation(SimulationConfig::instant())
            .with_seed(Some(99));

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "seed = 5\n\n[simulation]\nupload_ms = 10\n").unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.seed, Some(5));
        assert_eq!(loaded.simulation.upload_ms, 10);
        assert_eq!(loaded.simulation.processing_ms, 3000);
        assert_eq!(loaded.ui, UiConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "seed = \"not a number\"").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ExamError::Config(_))));
    }

    #[test]
    fn test_config_file_path() {
        let path = AppConfig::config_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("exam-checker"));
        assert!(path.to_string_lossy().ends_with("exam-checker.toml"));
    }
}
