// Hand landmark estimation platform integration
// Provides the MediaPipe Hands bridge and its backends

pub mod mediapipe_bridge;

pub use mediapipe_bridge::{parse_hands_json, DefaultHandLandmarker, HandLandmarker};
