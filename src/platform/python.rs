// Shared helpers for the PyO3 backends

use pyo3::prelude::*;
use pyo3::types::PyModule;
use std::path::Path;

use crate::models::sign::{SignError, SignResult};

/// Import one of the helper modules shipped in `python_dir`
pub fn import_helper<'py>(
    py: Python<'py>,
    python_dir: &Path,
    module: &str,
) -> SignResult<Bound<'py, PyModule>> {
    let dir = python_dir.to_str().ok_or_else(|| {
        SignError::InvalidConfig(format!("Python dir is not valid UTF-8: {:?}", python_dir))
    })?;

    let sys = py
        .import_bound("sys")
        .map_err(|e| SignError::ModelLoadFailed(format!("Failed to import sys: {}", e)))?;
    let path_list = sys
        .getattr("path")
        .map_err(|e| SignError::ModelLoadFailed(format!("Failed to get sys.path: {}", e)))?;

    let present = path_list
        .contains(dir)
        .map_err(|e| SignError::ModelLoadFailed(format!("Failed to read sys.path: {}", e)))?;
    if !present {
        path_list
            .call_method1("insert", (0, dir))
            .map_err(|e| SignError::ModelLoadFailed(format!("Failed to add python dir to path: {}", e)))?;
    }

    py.import_bound(module).map_err(|e| {
        SignError::ModelLoadFailed(format!(
            "Failed to import {}: {}. Make sure Python dependencies are installed (pip install -r python/requirements.txt)",
            module, e
        ))
    })
}
