use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::sign::{LabelTable, LandmarkerConfig, SignError, SignResult};

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "SIGNLENS_CONFIG";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Classifier weights (.onnx for the ONNX backend, .h5 for Keras)
    pub classifier_model_path: PathBuf,
    /// Fetched into `model_cache_dir` when the weights are missing
    pub classifier_model_url: Option<String>,
    /// Where downloaded models are kept
    pub model_cache_dir: PathBuf,
    /// JSON array of labels; built-in A-Z table when absent
    pub labels_path: Option<PathBuf>,
    /// Directory holding the Python helper modules
    pub python_dir: PathBuf,
    /// Hand landmark engine thresholds
    pub hands: LandmarkerConfig,
}

/// Root for settings and cached models; falls back to the working directory
/// when no home directory is set
fn data_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());

    let mut path = PathBuf::from(home);
    path.push(".signlens");
    path
}

impl Default for Config {
    fn default() -> Self {
        let model_cache_dir = data_dir().join("models");

        Self {
            classifier_model_path: model_cache_dir.join("sign_language_model.onnx"),
            classifier_model_url: None,
            model_cache_dir,
            labels_path: None,
            python_dir: PathBuf::from("python"),
            hands: LandmarkerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating with defaults if it doesn't exist
    pub fn load() -> SignResult<Self> {
        Self::load_or_create(&Self::config_path())
    }

    /// Load from `path`, writing defaults there first if it doesn't exist
    pub fn load_or_create(path: &Path) -> SignResult<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> SignResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> SignResult<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> SignResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values, including that the label file parses
    pub fn validate(&self) -> SignResult<()> {
        self.validate_settings()?;

        if let Some(path) = &self.labels_path {
            LabelTable::load(path).map_err(|e| {
                SignError::InvalidConfig(format!("Invalid label file {}: {}", path.display(), e))
            })?;
        }

        Ok(())
    }

    /// Validate everything except the label file contents
    pub fn validate_settings(&self) -> SignResult<()> {
        if !(0.0..=1.0).contains(&self.hands.min_detection_confidence) {
            return Err(SignError::InvalidConfig(format!(
                "Invalid min detection confidence: {}. Must be between 0.0 and 1.0",
                self.hands.min_detection_confidence
            )));
        }

        if !(0.0..=1.0).contains(&self.hands.min_tracking_confidence) {
            return Err(SignError::InvalidConfig(format!(
                "Invalid min tracking confidence: {}. Must be between 0.0 and 1.0",
                self.hands.min_tracking_confidence
            )));
        }

        if self.classifier_model_path.as_os_str().is_empty() {
            return Err(SignError::InvalidConfig(
                "Classifier model path cannot be empty".to_string(),
            ));
        }

        if let Some(url) = &self.classifier_model_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SignError::InvalidConfig(format!(
                    "Invalid classifier model URL: {}. Must be http(s)",
                    url
                )));
            }
        }

        Ok(())
    }

    /// Resolve the label table this configuration points at
    pub fn label_table(&self) -> SignResult<LabelTable> {
        match &self.labels_path {
            Some(path) => LabelTable::load(path),
            None => Ok(LabelTable::alphabet()),
        }
    }

    /// Reset to default configuration
    pub fn reset() -> SignResult<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        data_dir().join("config").join("settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("signlens_test_config").join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.hands.min_detection_confidence, 0.7);
        assert_eq!(config.hands.min_tracking_confidence, 0.5);
        assert_eq!(config.labels_path, None);
        assert_eq!(config.classifier_model_url, None);
        assert!(config.classifier_model_path.ends_with("sign_language_model.onnx"));
        assert_eq!(config.python_dir, PathBuf::from("python"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid thresholds
        config.hands.min_detection_confidence = 1.5;
        assert!(config.validate().is_err());
        config.hands.min_detection_confidence = 0.7;

        config.hands.min_tracking_confidence = -0.1;
        assert!(config.validate().is_err());
        config.hands.min_tracking_confidence = 0.5;

        // Invalid model location
        config.classifier_model_path = PathBuf::new();
        assert!(config.validate().is_err());
        config.classifier_model_path = PathBuf::from("model.onnx");

        config.classifier_model_url = Some("ftp://example.com/model.onnx".to_string());
        assert!(config.validate().is_err());
        config.classifier_model_url = Some("https://example.com/model.onnx".to_string());
        assert!(config.validate().is_ok());

        // Missing label file
        config.labels_path = Some(PathBuf::from("/nonexistent/labels.json"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = test_dir("roundtrip");
        let path = dir.join("settings.json");

        let mut config = Config::default();
        config.hands.min_detection_confidence = 0.9;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = test_dir("create");
        let path = dir.join("config").join("settings.json");

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.is_file());
        assert_eq!(Config::load_from(&path).unwrap(), config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = test_dir("invalid");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let mut config = Config::default();
        config.hands.min_detection_confidence = 2.0;
        fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert!(matches!(Config::load_from(&path), Err(SignError::InvalidConfig(_))));

        fs::write(&path, "{").unwrap();
        assert!(matches!(Config::load_from(&path), Err(SignError::Json(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_settings_and_models_share_data_dir() {
        let config = Config::default();
        let root = data_dir();
        assert!(config.model_cache_dir.starts_with(&root));
        assert!(config.classifier_model_path.starts_with(&root));
        if std::env::var(CONFIG_ENV).map_or(true, |p| p.is_empty()) {
            assert!(Config::config_path().starts_with(&root));
        }
    }

    #[test]
    fn test_validate_settings_skips_label_file() {
        let mut config = Config::default();
        config.labels_path = Some(PathBuf::from("/nonexistent/labels.json"));
        assert!(config.validate_settings().is_ok());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_label_table_from_file() {
        let dir = test_dir("labels");
        fs::create_dir_all(&dir).unwrap();
        let labels = dir.join("labels.json");
        fs::write(&labels, r#"["hello", "thank you"]"#).unwrap();

        let mut config = Config::default();
        assert_eq!(config.label_table().unwrap().len(), 26);

        config.labels_path = Some(labels);
        assert!(config.validate().is_ok());
        let table = config.label_table().unwrap();
        assert_eq!(table.get(1), Some("thank you"));

        let _ = fs::remove_dir_all(&dir);
    }
}
