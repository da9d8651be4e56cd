pub mod core;
pub mod models;
pub mod platform;

pub use crate::core::config::Config;
pub use crate::core::recognizer::SignRecognizer;
pub use crate::models::frame::{ChannelOrder, Frame};
pub use crate::models::sign::{
    ClassificationResult, FailureReason, LabelTable, Recognition, ResultStatus, SignError,
    SignResponse, SignResult,
};
