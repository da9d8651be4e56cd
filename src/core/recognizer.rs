// Sign recognizer: decode -> extract -> build -> classify -> resolve
// Every invocation ends in a ClassificationResult; stages short-circuit with a
// FailureReason and later stages never run

use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, debug_span, error, info};
use uuid::Uuid;

use crate::core::classifier::ClassifierAdapter;
use crate::core::config::Config;
use crate::core::feature_builder::build_features;
use crate::core::frame_decoder;
use crate::core::landmark_extractor::LandmarkExtractor;
use crate::core::ml_models::resolve_classifier_path;
use crate::core::result_resolver::resolve;
use crate::models::frame::Frame;
use crate::models::sign::{
    ClassificationResult, FailureReason, LabelTable, Recognition, SignError, SignResponse,
    SignResult,
};
use crate::platform::inference::{DefaultScorer, ScorerOptions};
use crate::platform::pose::{DefaultHandLandmarker, HandLandmarker};

static RECOGNIZER: OnceLock<SignRecognizer> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Process-wide handle over the read-only recognition resources
/// Holds no per-request state, so one instance serves concurrent callers
pub struct SignRecognizer {
    extractor: LandmarkExtractor,
    classifier: ClassifierAdapter,
    labels: LabelTable,
}

impl SignRecognizer {
    /// Build the recognizer with the compiled-in backends
    /// A landmarker or label table failure is a startup error; a classifier
    /// failure is logged and leaves the model unavailable
    pub fn new(config: &Config) -> SignResult<Self> {
        config.validate_settings()?;

        let labels = config.label_table()?;
        let landmarker = DefaultHandLandmarker::new(&config.hands, &config.python_dir)?;

        let classifier = match resolve_classifier_path(config) {
            Ok(model_path) => ClassifierAdapter::load::<DefaultScorer>(&ScorerOptions {
                model_path,
                python_dir: config.python_dir.clone(),
            }),
            Err(e) => {
                error!(error = %e, "Sign classifier weights unavailable");
                ClassifierAdapter::unavailable(e.to_string())
            }
        };

        let landmarker_ready = landmarker.is_initialized();
        let recognizer = Self::with_components(Arc::new(landmarker), classifier, labels);
        info!(
            landmarker_ready,
            landmarker = %recognizer.extractor.model_info(),
            classifier = %recognizer.classifier.model_info(),
            labels = recognizer.labels.len(),
            "Sign recognizer ready"
        );
        Ok(recognizer)
    }

    /// Assemble a recognizer from explicit capabilities
    pub fn with_components(
        landmarker: Arc<dyn HandLandmarker>,
        classifier: ClassifierAdapter,
        labels: LabelTable,
    ) -> Self {
        Self {
            extractor: LandmarkExtractor::new(landmarker),
            classifier,
            labels,
        }
    }

    /// Initialize the process-wide recognizer; later calls return the first instance
    pub fn init_global(config: &Config) -> SignResult<&'static SignRecognizer> {
        if let Some(recognizer) = RECOGNIZER.get() {
            return Ok(recognizer);
        }

        let _guard = INIT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(recognizer) = RECOGNIZER.get() {
            return Ok(recognizer);
        }

        let recognizer = Self::new(config)?;
        Ok(RECOGNIZER.get_or_init(|| recognizer))
    }

    /// The process-wide recognizer, if `init_global` has succeeded
    pub fn global() -> SignResult<&'static SignRecognizer> {
        RECOGNIZER.get().ok_or(SignError::NotInitialized)
    }

    /// Classify one encoded image
    pub fn classify_bytes(&self, bytes: &[u8]) -> ClassificationResult {
        let span = debug_span!("classify", request_id = %Uuid::new_v4(), len = bytes.len());
        let _enter = span.enter();

        let result = ClassificationResult::from(self.run_bytes(bytes));
        debug!(status = ?result.status(), "Classification finished");
        result
    }

    /// Classify an already decoded frame (BGR camera buffer or RGB)
    pub fn classify_frame(&self, frame: Frame) -> ClassificationResult {
        let span = debug_span!("classify", request_id = %Uuid::new_v4(), width = frame.width, height = frame.height);
        let _enter = span.enter();

        let result = ClassificationResult::from(self.model_ready().and_then(|_| self.run_frame(frame)));
        debug!(status = ?result.status(), "Classification finished");
        result
    }

    /// Classify one encoded image and render the wire response
    pub fn predict_sign(&self, bytes: &[u8]) -> SignResponse {
        self.classify_bytes(bytes).to_response()
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn is_model_available(&self) -> bool {
        self.classifier.is_available()
    }

    pub fn landmarker_info(&self) -> String {
        self.extractor.model_info()
    }

    pub fn classifier_info(&self) -> String {
        self.classifier.model_info()
    }

    // Checked up front so an unloaded model costs no decode or extraction;
    // the outcome matches what the classifier stage would report
    fn model_ready(&self) -> Result<(), FailureReason> {
        if self.classifier.is_available() {
            Ok(())
        } else {
            debug!("Model unavailable, skipping pipeline");
            Err(FailureReason::ModelUnavailable)
        }
    }

    fn run_bytes(&self, bytes: &[u8]) -> Result<Recognition, FailureReason> {
        self.model_ready()?;
        let frame = frame_decoder::decode(bytes)?;
        self.run_frame(frame)
    }

    fn run_frame(&self, frame: Frame) -> Result<Recognition, FailureReason> {
        let pose = self.extractor.extract(frame)?;
        let features = build_features(&pose);
        let scores = self.classifier.classify(&features)?;
        resolve(&scores, &self.labels)
    }
}
