// Keras scorer over PyO3, for models saved as .h5 / SavedModel

use pyo3::prelude::*;
use pyo3::types::PyModule;
use std::path::PathBuf;
use tracing::info;

use super::{ScorerOptions, SignScorer};
use crate::models::sign::{SignError, SignResult};
use crate::platform::python::import_helper;

pub struct KerasScorer {
    module: Py<PyModule>,
    model: PyObject,
    model_path: PathBuf,
}

impl SignScorer for KerasScorer {
    fn load(options: &ScorerOptions) -> SignResult<Self> {
        let path = options.model_path.to_str().ok_or_else(|| {
            SignError::InvalidConfig(format!("Model path is not valid UTF-8: {:?}", options.model_path))
        })?;

        Python::with_gil(|py| {
            let module = import_helper(py, &options.python_dir, "sign_classifier")?;
            let model = module
                .call_method1("load_model", (path,))
                .map_err(|e| SignError::ModelLoadFailed(format!("{}: {}", path, e)))?;

            info!(model = path, "Keras sign classifier loaded");

            Ok(Self {
                module: module.unbind(),
                model: model.unbind(),
                model_path: options.model_path.clone(),
            })
        })
    }

    fn score(&self, input: &[f32], shape: [usize; 2]) -> SignResult<Vec<f32>> {
        Python::with_gil(|py| {
            let result = self
                .module
                .bind(py)
                .call_method1(
                    "predict",
                    (self.model.clone_ref(py), input.to_vec(), shape[0], shape[1]),
                )
                .map_err(|e| SignError::InferenceFailed(format!("Keras inference failed: {}", e)))?;

            result
                .extract::<Vec<f32>>()
                .map_err(|e| SignError::InferenceFailed(format!("Failed to extract scores: {}", e)))
        })
    }

    fn get_model_info(&self) -> String {
        format!("PyO3 Keras sign classifier ({})", self.model_path.display())
    }
}
