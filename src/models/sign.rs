// Data models for hand landmarks, classifier input, labels and recognition results

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of landmarks in one MediaPipe hand skeleton
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Length of the flattened classifier input (21 landmarks x 3 coordinates)
pub const FEATURE_LENGTH: usize = HAND_LANDMARK_COUNT * 3;

// ==============================================================================
// Hand Landmarks (21 keypoints per hand)
// ==============================================================================

/// A 3D landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypoint3D {
    pub x: f32, // Normalized [0, 1] by image width
    pub y: f32, // Normalized [0, 1] by image height
    pub z: f32, // Depth relative to the wrist
}

impl Keypoint3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// MediaPipe Hand Landmark indices (21 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

/// One hand as reported by the landmark engine, before shape validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedHand {
    pub landmarks: Vec<Keypoint3D>,
    pub handedness: Option<Handedness>,
    pub score: f32,
}

/// A validated 21-point skeleton in engine order
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    keypoints: [Keypoint3D; HAND_LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(keypoints: [Keypoint3D; HAND_LANDMARK_COUNT]) -> Self {
        Self { keypoints }
    }

    pub fn keypoints(&self) -> &[Keypoint3D; HAND_LANDMARK_COUNT] {
        &self.keypoints
    }

    pub fn landmark(&self, landmark: HandLandmark) -> Keypoint3D {
        self.keypoints[landmark.index()]
    }
}

impl TryFrom<Vec<Keypoint3D>> for HandPose {
    type Error = SignError;

    fn try_from(landmarks: Vec<Keypoint3D>) -> SignResult<Self> {
        let count = landmarks.len();
        let keypoints: [Keypoint3D; HAND_LANDMARK_COUNT] = landmarks.try_into().map_err(|_| {
            SignError::InferenceFailed(format!(
                "Hand has {} landmarks, expected {}",
                count, HAND_LANDMARK_COUNT
            ))
        })?;
        Ok(Self { keypoints })
    }
}

/// Flattened classifier input: x, y, z of each landmark in HandPose order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f32; FEATURE_LENGTH]);

impl FeatureVector {
    pub fn new(values: [f32; FEATURE_LENGTH]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Shape of the single-item batch handed to the scorer
    pub fn batch_shape(&self) -> [usize; 2] {
        [1, FEATURE_LENGTH]
    }
}

// ==============================================================================
// Label Table
// ==============================================================================

/// Immutable index -> label mapping, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// The 26-letter fingerspelling alphabet, index 0 = "A"
    pub fn alphabet() -> Self {
        Self {
            labels: ('A'..='Z').map(|c| c.to_string()).collect(),
        }
    }

    pub fn from_labels(labels: Vec<String>) -> SignResult<Self> {
        if labels.is_empty() {
            return Err(SignError::LabelTable("Label table cannot be empty".to_string()));
        }
        if let Some(pos) = labels.iter().position(|l| l.trim().is_empty()) {
            return Err(SignError::LabelTable(format!("Label at index {} is blank", pos)));
        }
        Ok(Self { labels })
    }

    /// Load a JSON array of label strings
    pub fn load(path: &Path) -> SignResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let labels: Vec<String> = serde_json::from_str(&contents)?;
        Self::from_labels(labels)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels.iter().enumerate().map(|(i, l)| (i, l.as_str()))
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::alphabet()
    }
}

// ==============================================================================
// Classification Result
// ==============================================================================

/// A resolved label with its raw probability
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub label: String,
    pub index: usize,
    pub confidence: f32, // Max score, [0, 1]
}

impl Recognition {
    /// Confidence as a percentage rounded to two decimals
    pub fn confidence_percent(&self) -> f64 {
        round_percent(self.confidence)
    }
}

/// Closed set of non-success terminal outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    DecodeFailure,
    NoHandDetected,
    ModelUnavailable,
    UnknownLabelIndex,
}

impl FailureReason {
    /// Stable string reported in the `sign` field
    pub fn sign_text(&self) -> &'static str {
        match self {
            FailureReason::DecodeFailure => "",
            FailureReason::NoHandDetected => "No hand detected",
            FailureReason::ModelUnavailable => "Model not loaded",
            FailureReason::UnknownLabelIndex => "Unknown",
        }
    }

    pub fn status(&self) -> ResultStatus {
        match self {
            FailureReason::DecodeFailure => ResultStatus::DecodeFailure,
            FailureReason::NoHandDetected => ResultStatus::NoHandDetected,
            FailureReason::ModelUnavailable => ResultStatus::ModelUnavailable,
            FailureReason::UnknownLabelIndex => ResultStatus::UnknownLabelIndex,
        }
    }
}

/// Terminal result of one pipeline invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResult {
    Recognized(Recognition),
    Failed(FailureReason),
}

impl ClassificationResult {
    pub fn status(&self) -> ResultStatus {
        match self {
            ClassificationResult::Recognized(_) => ResultStatus::Recognized,
            ClassificationResult::Failed(reason) => reason.status(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, ClassificationResult::Recognized(_))
    }

    pub fn to_response(&self) -> SignResponse {
        SignResponse::from(self)
    }
}

impl From<Result<Recognition, FailureReason>> for ClassificationResult {
    fn from(outcome: Result<Recognition, FailureReason>) -> Self {
        match outcome {
            Ok(recognition) => ClassificationResult::Recognized(recognition),
            Err(reason) => ClassificationResult::Failed(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Recognized,
    DecodeFailure,
    NoHandDetected,
    ModelUnavailable,
    UnknownLabelIndex,
}

/// Wire shape: `{"sign": ..., "confidence": ..., "status": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignResponse {
    pub sign: String,
    pub confidence: f64,
    pub status: ResultStatus,
}

impl From<&ClassificationResult> for SignResponse {
    fn from(result: &ClassificationResult) -> Self {
        match result {
            ClassificationResult::Recognized(r) => SignResponse {
                sign: r.label.clone(),
                confidence: r.confidence_percent(),
                status: ResultStatus::Recognized,
            },
            ClassificationResult::Failed(reason) => SignResponse {
                sign: reason.sign_text().to_string(),
                confidence: 0.0,
                status: reason.status(),
            },
        }
    }
}

/// Scale a [0, 1] probability to a percentage with two decimals
pub fn round_percent(probability: f32) -> f64 {
    (probability as f64 * 100.0 * 100.0).round() / 100.0
}

// ==============================================================================
// Landmarker Configuration
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkerConfig {
    /// Higher values drop marginal hands: fewer false positives, more misses (default: 0.7)
    pub min_detection_confidence: f32,
    /// Only consulted by the engine between frames; kept for parity (default: 0.5)
    pub min_tracking_confidence: f32,
    pub model_complexity: ModelComplexity,
}

impl LandmarkerConfig {
    /// Every frame is treated as an unrelated still image
    pub const STATIC_IMAGE_MODE: bool = true;
    pub const MAX_NUM_HANDS: u32 = 1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelComplexity {
    Lite = 0,
    Full = 1,
}

impl Default for LandmarkerConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
            model_complexity: ModelComplexity::Full,
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("Recognizer not initialized")]
    NotInitialized,

    #[error("Model loading failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image decode failed: {0}")]
    DecodeFailed(String),

    #[error("Label table error: {0}")]
    LabelTable(String),

    #[error("Model download failed: {0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SignResult<T> = Result<T, SignError>;
