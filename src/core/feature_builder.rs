// Feature assembly: HandPose -> flat 63-value classifier input

use crate::models::sign::{FeatureVector, HandPose, FEATURE_LENGTH};

/// Concatenate (x, y, z) of every keypoint in skeleton order
/// Coordinates are passed through untouched; the classifier was trained on
/// the engine's normalized values
pub fn build_features(pose: &HandPose) -> FeatureVector {
    let mut values = [0.0f32; FEATURE_LENGTH];
    for (slot, kp) in values.chunks_exact_mut(3).zip(pose.keypoints()) {
        slot[0] = kp.x;
        slot[1] = kp.y;
        slot[2] = kp.z;
    }
    FeatureVector::new(values)
}
