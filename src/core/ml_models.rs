// ML model loader and manager utilities
// Handles model downloading and caching

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::config::Config;
use crate::models::sign::{SignError, SignResult};

/// Model source configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    /// Local file path
    LocalFile(PathBuf),
    /// Direct URL
    Url(String),
}

/// ML model metadata
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// File name inside the cache directory
    pub name: String,
    pub source: ModelSource,
}

/// Model manager for caching and loading ML models
pub struct ModelManager {
    cache_dir: PathBuf,
}

impl ModelManager {
    /// Create a new model manager with cache directory
    pub fn new(cache_dir: PathBuf) -> SignResult<Self> {
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Check if a model is cached
    pub fn is_cached(&self, model: &ModelInfo) -> bool {
        self.get_model_path(&model.name).is_file()
    }

    /// Get the local path for a model
    pub fn get_model_path(&self, model_name: &str) -> PathBuf {
        self.cache_dir.join(model_name)
    }

    /// Fetch a model into the cache if it is not there yet
    pub fn ensure_model(&self, model: &ModelInfo) -> SignResult<PathBuf> {
        let model_path = self.get_model_path(&model.name);

        if self.is_cached(model) {
            info!(model = %model.name, path = %model_path.display(), "Model already cached");
            return Ok(model_path);
        }

        // Write next to the target and rename, so a failed fetch never leaves a partial model
        let partial = self.cache_dir.join(format!("{}.partial", model.name));

        info!(model = %model.name, source = ?model.source, "Fetching model");

        match &model.source {
            ModelSource::LocalFile(path) => {
                fs::copy(path, &partial)?;
            }
            ModelSource::Url(url) => {
                if let Err(e) = download(url, &partial) {
                    let _ = fs::remove_file(&partial);
                    return Err(e);
                }
            }
        }

        fs::rename(&partial, &model_path)?;
        Ok(model_path)
    }

    /// Clear the model cache
    pub fn clear_cache(&self) -> SignResult<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Get cache size in bytes
    pub fn get_cache_size(&self) -> SignResult<u64> {
        let mut total_size = 0u64;

        if self.cache_dir.exists() {
            for entry in fs::read_dir(&self.cache_dir)? {
                let entry = entry?;
                let metadata = entry.metadata()?;
                if metadata.is_file() {
                    total_size += metadata.len();
                }
            }
        }

        Ok(total_size)
    }
}

fn download(url: &str, dest: &Path) -> SignResult<()> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| SignError::Download(format!("{}: {}", url, e)))?;

    let mut file = fs::File::create(dest)?;
    response
        .copy_to(&mut file)
        .map_err(|e| SignError::Download(format!("{}: {}", url, e)))?;

    Ok(())
}

// ==============================================================================
// Predefined Model Configurations
// ==============================================================================

/// The sign classifier described by a configuration
/// Returns None when the configured weights are already on disk or there is
/// nowhere to fetch them from
pub fn sign_classifier(config: &Config) -> Option<ModelInfo> {
    if config.classifier_model_path.is_file() {
        return None;
    }

    let url = config.classifier_model_url.clone()?;
    let name = config
        .classifier_model_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sign_language_model.onnx".to_string());

    Some(ModelInfo {
        name,
        source: ModelSource::Url(url),
    })
}

/// Make sure the classifier weights exist locally, returning their path
pub fn resolve_classifier_path(config: &Config) -> SignResult<PathBuf> {
    match sign_classifier(config) {
        Some(model) => ModelManager::new(config.model_cache_dir.clone())?.ensure_model(&model),
        None => Ok(config.classifier_model_path.clone()),
    }
}
