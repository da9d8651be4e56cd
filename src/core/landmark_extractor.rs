// Landmark extraction: RGB frame -> first detected hand's 21-point skeleton

use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::frame::Frame;
use crate::models::sign::{FailureReason, HandPose};
use crate::platform::pose::HandLandmarker;

/// Wraps the hand landmark capability and selects a single hand
pub struct LandmarkExtractor {
    landmarker: Arc<dyn HandLandmarker>,
}

impl LandmarkExtractor {
    pub fn new(landmarker: Arc<dyn HandLandmarker>) -> Self {
        Self { landmarker }
    }

    /// Extract the first reported hand
    /// Converts to RGB before calling the engine. Engine errors and malformed
    /// skeletons are reported as `NoHandDetected`.
    pub fn extract(&self, frame: Frame) -> Result<HandPose, FailureReason> {
        let frame = frame.into_rgb();

        let hands = match self
            .landmarker
            .detect_hands(&frame.data, frame.width, frame.height)
        {
            Ok(hands) => hands,
            Err(e) => {
                warn!(error = %e, "Hand landmarker failed");
                return Err(FailureReason::NoHandDetected);
            }
        };

        let reported = hands.len();
        let first = hands.into_iter().next().ok_or_else(|| {
            debug!("No hand in frame");
            FailureReason::NoHandDetected
        })?;

        if reported > 1 {
            debug!(reported, "Multiple hands reported, using the first");
        }

        HandPose::try_from(first.landmarks).map_err(|e| {
            warn!(error = %e, "Discarding malformed hand");
            FailureReason::NoHandDetected
        })
    }

    pub fn model_info(&self) -> String {
        self.landmarker.get_model_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{hand, hand_with_landmarks, MockLandmarker};
    use crate::models::sign::HandLandmark;

    #[cfg(not(feature = "ml-pyo3"))]
    #[test]
    fn test_configured_thresholds_reach_landmarker() {
        use crate::core::config::Config;
        use crate::platform::pose::DefaultHandLandmarker;

        let mut config = Config::default();
        config.hands.min_detection_confidence = 0.85;
        config.hands.min_tracking_confidence = 0.25;

        let landmarker = DefaultHandLandmarker::new(&config.hands, &config.python_dir).unwrap();
        let extractor = LandmarkExtractor::new(Arc::new(landmarker));
        let info = extractor.model_info();
        assert!(info.contains("detection threshold 0.85"), "{}", info);
        assert!(info.contains("tracking threshold 0.25"), "{}", info);
    }

    fn frame() -> Frame {
        Frame::from_rgb(2, 2, vec![0; 12]).unwrap()
    }

    #[test]
    fn test_no_hands_is_no_hand_detected() {
        let extractor = LandmarkExtractor::new(Arc::new(MockLandmarker::with_hands(vec![])));
        assert_eq!(extractor.extract(frame()).unwrap_err(), FailureReason::NoHandDetected);
    }

    #[test]
    fn test_engine_error_is_no_hand_detected() {
        let extractor = LandmarkExtractor::new(Arc::new(MockLandmarker::failing("graph crashed")));
        assert_eq!(extractor.extract(frame()).unwrap_err(), FailureReason::NoHandDetected);
    }

    #[test]
    fn test_malformed_hand_is_no_hand_detected() {
        let mock = MockLandmarker::with_hands(vec![hand_with_landmarks(0.0, 20)]);
        let extractor = LandmarkExtractor::new(Arc::new(mock));
        assert_eq!(extractor.extract(frame()).unwrap_err(), FailureReason::NoHandDetected);
    }

    #[test]
    fn test_first_hand_wins() {
        let mock = MockLandmarker::with_hands(vec![hand(0.0), hand(100.0)]);
        let extractor = LandmarkExtractor::new(Arc::new(mock));

        let pose = extractor.extract(frame()).unwrap();
        assert_eq!(pose.landmark(HandLandmark::Wrist).x, 0.0);
        assert_eq!(pose.landmark(HandLandmark::PinkyTip).x, 20.0);
    }

    #[test]
    fn test_bgr_frame_reaches_engine_as_rgb() {
        let mock = Arc::new(MockLandmarker::with_hands(vec![hand(0.0)]));
        let extractor = LandmarkExtractor::new(mock.clone());

        let bgr = Frame::from_bgr(2, 1, vec![10, 20, 30, 40, 50, 60]).unwrap();
        extractor.extract(bgr).unwrap();

        let calls = mock.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec![30, 20, 10, 60, 50, 40]);
        assert_eq!((calls[0].1, calls[0].2), (2, 1));
    }
}
