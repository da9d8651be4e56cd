// ONNX Runtime scorer (pure Rust)

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use super::{ScorerOptions, SignScorer};
use crate::models::sign::{SignError, SignResult};

pub struct OnnxScorer {
    // `Session::run` needs exclusive access
    session: Mutex<Session>,
    model_path: PathBuf,
}

fn load_failed<E: Display>(path: &Path) -> impl Fn(E) -> SignError + '_ {
    move |e| SignError::ModelLoadFailed(format!("{}: {}", path.display(), e))
}

fn inference_failed<E: Display>(what: &'static str) -> impl Fn(E) -> SignError {
    move |e| SignError::InferenceFailed(format!("{}: {}", what, e))
}

impl SignScorer for OnnxScorer {
    fn load(options: &ScorerOptions) -> SignResult<Self> {
        let path = options.model_path.as_path();
        if !path.is_file() {
            return Err(SignError::ModelLoadFailed(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let session = Session::builder()
            .map_err(load_failed(path))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(load_failed(path))?
            .with_intra_threads(1)
            .map_err(load_failed(path))?
            .commit_from_file(path)
            .map_err(load_failed(path))?;

        info!(model = %path.display(), "ONNX sign classifier loaded");

        Ok(Self {
            session: Mutex::new(session),
            model_path: options.model_path.clone(),
        })
    }

    fn score(&self, input: &[f32], shape: [usize; 2]) -> SignResult<Vec<f32>> {
        let tensor = Tensor::from_array((shape, input.to_vec().into_boxed_slice()))
            .map_err(inference_failed("Failed to create input tensor"))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| SignError::InferenceFailed("Session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(inference_failed("ONNX inference failed"))?;

        let first = outputs
            .iter()
            .next()
            .ok_or_else(|| SignError::InferenceFailed("Model produced no outputs".to_string()))?
            .1;

        let (_shape, data) = first
            .try_extract_tensor::<f32>()
            .map_err(inference_failed("Failed to extract score tensor"))?;

        Ok(data.to_vec())
    }

    fn get_model_info(&self) -> String {
        format!("ONNX Runtime sign classifier ({})", self.model_path.display())
    }
}
