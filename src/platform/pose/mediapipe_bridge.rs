// MediaPipe Hands integration bridge
// Abstracts the hand landmark engine behind a capability trait so the
// pipeline never depends on a specific vendor library

use serde::Deserialize;
use std::path::Path;

use crate::models::sign::{
    DetectedHand, Handedness, Keypoint3D, LandmarkerConfig, SignError, SignResult,
};

/// Hand landmark capability
/// Input is an interleaved RGB buffer; output is every hand the engine reports,
/// in the engine's own ordering
pub trait HandLandmarker: Send + Sync {
    /// Initialize the engine (static image mode, at most one hand)
    fn new(config: &LandmarkerConfig, python_dir: &Path) -> SignResult<Self>
    where
        Self: Sized;

    /// Run landmark estimation on one RGB frame
    fn detect_hands(&self, rgb: &[u8], width: u32, height: u32) -> SignResult<Vec<DetectedHand>>;

    /// Check if the engine is loaded
    fn is_initialized(&self) -> bool;

    /// Get engine info
    fn get_model_info(&self) -> String;
}

// ==============================================================================
// Engine Output Parsing
// ==============================================================================

#[derive(Debug, Deserialize)]
struct HandsPayload {
    #[serde(default)]
    hands: Vec<HandPayload>,
}

#[derive(Debug, Deserialize)]
struct HandPayload {
    keypoints: Vec<Keypoint3D>,
    #[serde(default)]
    hand_type: Option<String>,
    #[serde(default)]
    score: f32,
}

/// Parse the JSON document produced by `python/hand_landmarks.py`
pub fn parse_hands_json(json: &str) -> SignResult<Vec<DetectedHand>> {
    let payload: HandsPayload = serde_json::from_str(json)
        .map_err(|e| SignError::InferenceFailed(format!("Failed to parse hands JSON: {}", e)))?;

    Ok(payload
        .hands
        .into_iter()
        .map(|hand| DetectedHand {
            landmarks: hand.keypoints,
            handedness: match hand.hand_type.as_deref() {
                Some("Left") => Some(Handedness::Left),
                Some("Right") => Some(Handedness::Right),
                _ => None,
            },
            score: hand.score,
        })
        .collect())
}

// ==============================================================================
// PyO3 Implementation (Python MediaPipe)
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub mod pyo3_backend {
    use super::*;
    use pyo3::prelude::*;
    use pyo3::types::{PyBytes, PyDict, PyModule};
    use std::sync::Mutex;
    use tracing::info;

    use crate::platform::python::import_helper;

    pub struct PyO3Hands {
        module: Py<PyModule>,
        // The Hands solution graph is stateful; one frame at a time
        hands: Mutex<PyObject>,
        config: LandmarkerConfig,
    }

    impl HandLandmarker for PyO3Hands {
        fn new(config: &LandmarkerConfig, python_dir: &Path) -> SignResult<Self> {
            Python::with_gil(|py| {
                let module = import_helper(py, python_dir, "hand_landmarks")?;

                let kwargs = PyDict::new_bound(py);
                let set = |key: &str, value: PyObject| {
                    kwargs.set_item(key, value).map_err(|e| {
                        SignError::ModelLoadFailed(format!("Failed to set {}: {}", key, e))
                    })
                };
                set("static_image_mode", LandmarkerConfig::STATIC_IMAGE_MODE.into_py(py))?;
                set("max_num_hands", LandmarkerConfig::MAX_NUM_HANDS.into_py(py))?;
                set("min_detection_confidence", config.min_detection_confidence.into_py(py))?;
                set("min_tracking_confidence", config.min_tracking_confidence.into_py(py))?;
                set("model_complexity", (config.model_complexity as u8).into_py(py))?;

                let hands = module
                    .call_method("configure", (), Some(&kwargs))
                    .map_err(|e| SignError::ModelLoadFailed(format!("MediaPipe Hands init failed: {}", e)))?;

                info!(
                    min_detection_confidence = config.min_detection_confidence,
                    min_tracking_confidence = config.min_tracking_confidence,
                    "MediaPipe Hands initialized"
                );

                Ok(Self {
                    module: module.unbind(),
                    hands: Mutex::new(hands.unbind()),
                    config: config.clone(),
                })
            })
        }

        fn detect_hands(&self, rgb: &[u8], width: u32, height: u32) -> SignResult<Vec<DetectedHand>> {
            let hands = self
                .hands
                .lock()
                .map_err(|_| SignError::InferenceFailed("Hands engine lock poisoned".to_string()))?;

            Python::with_gil(|py| {
                let image_bytes = PyBytes::new_bound(py, rgb);
                let result = self
                    .module
                    .bind(py)
                    .call_method1("process_rgb", (hands.clone_ref(py), image_bytes, width, height))
                    .map_err(|e| SignError::InferenceFailed(format!("MediaPipe inference failed: {}", e)))?;

                let json: String = result
                    .extract()
                    .map_err(|e| SignError::InferenceFailed(format!("Failed to extract JSON: {}", e)))?;

                parse_hands_json(&json)
            })
        }

        fn is_initialized(&self) -> bool {
            true
        }

        fn get_model_info(&self) -> String {
            format!(
                "PyO3 MediaPipe Hands (Python backend) - detection: {}, tracking: {}, complexity: {:?}",
                self.config.min_detection_confidence,
                self.config.min_tracking_confidence,
                self.config.model_complexity
            )
        }
    }
}

// ==============================================================================
// Dummy Implementation (for compilation without features)
// ==============================================================================

#[cfg(not(feature = "ml-pyo3"))]
pub struct DummyHandLandmarker {
    config: LandmarkerConfig,
}

#[cfg(not(feature = "ml-pyo3"))]
impl HandLandmarker for DummyHandLandmarker {
    fn new(config: &LandmarkerConfig, _python_dir: &Path) -> SignResult<Self> {
        tracing::warn!("Using dummy hand landmarker (no inference); enable 'ml-pyo3' for MediaPipe Hands");
        Ok(Self {
            config: config.clone(),
        })
    }

    fn detect_hands(&self, _rgb: &[u8], _width: u32, _height: u32) -> SignResult<Vec<DetectedHand>> {
        Ok(vec![])
    }

    fn is_initialized(&self) -> bool {
        false
    }

    fn get_model_info(&self) -> String {
        format!(
            "Dummy hand landmarker (no ML inference - enable 'ml-pyo3' feature), detection threshold {}, tracking threshold {}",
            self.config.min_detection_confidence, self.config.min_tracking_confidence
        )
    }
}

// ==============================================================================
// Default Backend Selection
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub type DefaultHandLandmarker = pyo3_backend::PyO3Hands;

#[cfg(not(feature = "ml-pyo3"))]
pub type DefaultHandLandmarker = DummyHandLandmarker;
