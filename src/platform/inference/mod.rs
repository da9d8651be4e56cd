// Sign classifier platform integration
// The trained network is an opaque scoring function: a [1, 63] feature batch
// in, one score per label index out

use std::path::PathBuf;

use crate::models::sign::SignResult;

#[cfg(feature = "ml-pyo3")]
pub mod keras_backend;
#[cfg(feature = "ml-onnx")]
pub mod onnx_backend;

/// Where a scorer finds its weights and helper code
#[derive(Debug, Clone)]
pub struct ScorerOptions {
    pub model_path: PathBuf,
    pub python_dir: PathBuf,
}

/// Classifier capability
pub trait SignScorer: Send + Sync {
    /// Load weights; failure here leaves the classifier permanently unavailable
    fn load(options: &ScorerOptions) -> SignResult<Self>
    where
        Self: Sized;

    /// Score a single-item batch, returning one value per label index
    fn score(&self, input: &[f32], shape: [usize; 2]) -> SignResult<Vec<f32>>;

    /// Get model info
    fn get_model_info(&self) -> String;
}

// ==============================================================================
// Dummy Implementation (for compilation without features)
// ==============================================================================

#[cfg(not(any(feature = "ml-pyo3", feature = "ml-onnx")))]
pub struct DummyScorer;

#[cfg(not(any(feature = "ml-pyo3", feature = "ml-onnx")))]
impl SignScorer for DummyScorer {
    fn load(options: &ScorerOptions) -> SignResult<Self> {
        Err(crate::models::sign::SignError::ModelLoadFailed(format!(
            "No inference backend compiled in for {:?}; enable 'ml-onnx' or 'ml-pyo3'",
            options.model_path
        )))
    }

    fn score(&self, _input: &[f32], _shape: [usize; 2]) -> SignResult<Vec<f32>> {
        Err(crate::models::sign::SignError::NotInitialized)
    }

    fn get_model_info(&self) -> String {
        "Dummy scorer (no ML inference)".to_string()
    }
}

// ==============================================================================
// Default Backend Selection
// ==============================================================================

#[cfg(feature = "ml-onnx")]
pub type DefaultScorer = onnx_backend::OnnxScorer;

#[cfg(all(feature = "ml-pyo3", not(feature = "ml-onnx")))]
pub type DefaultScorer = keras_backend::KerasScorer;

#[cfg(not(any(feature = "ml-pyo3", feature = "ml-onnx")))]
pub type DefaultScorer = DummyScorer;
