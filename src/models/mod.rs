// Data models for frames, hand landmarks, labels and recognition results

pub mod frame;
pub mod sign;
