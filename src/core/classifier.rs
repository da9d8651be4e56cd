// Classifier adapter: FeatureVector -> score distribution over label indices

use std::sync::Arc;
use tracing::{error, warn};

use crate::models::sign::{FailureReason, FeatureVector, SignResult};
use crate::platform::inference::{ScorerOptions, SignScorer};

enum ScorerState {
    Ready(Arc<dyn SignScorer>),
    Unavailable(String),
}

/// Wraps the scoring capability. Load state is fixed at construction: a failed
/// load reports `ModelUnavailable` for the life of the process, no retries.
pub struct ClassifierAdapter {
    state: ScorerState,
}

impl ClassifierAdapter {
    /// Load a scorer backend, folding a load failure into the unavailable state
    pub fn load<S: SignScorer + 'static>(options: &ScorerOptions) -> Self {
        Self::from_load_result(S::load(options))
    }

    pub fn from_load_result<S: SignScorer + 'static>(result: SignResult<S>) -> Self {
        match result {
            Ok(scorer) => Self::from_scorer(Arc::new(scorer)),
            Err(e) => {
                error!(error = %e, "Sign classifier failed to load; every request will report ModelUnavailable");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn from_scorer(scorer: Arc<dyn SignScorer>) -> Self {
        Self {
            state: ScorerState::Ready(scorer),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ScorerState::Unavailable(reason.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, ScorerState::Ready(_))
    }

    /// Why the model is unavailable, if it is
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            ScorerState::Ready(_) => None,
            ScorerState::Unavailable(reason) => Some(reason),
        }
    }

    /// Score one feature vector as a single-item batch
    /// The scores are returned as produced; length checks happen at resolution
    pub fn classify(&self, features: &FeatureVector) -> Result<Vec<f32>, FailureReason> {
        let scorer = match &self.state {
            ScorerState::Ready(scorer) => scorer,
            ScorerState::Unavailable(_) => return Err(FailureReason::ModelUnavailable),
        };

        scorer
            .score(features.as_slice(), features.batch_shape())
            .map_err(|e| {
                warn!(error = %e, "Sign classifier inference failed");
                FailureReason::ModelUnavailable
            })
    }

    pub fn model_info(&self) -> String {
        match &self.state {
            ScorerState::Ready(scorer) => scorer.get_model_info(),
            ScorerState::Unavailable(reason) => format!("unavailable: {}", reason),
        }
    }
}
