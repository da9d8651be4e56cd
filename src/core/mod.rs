pub mod config;
pub mod ml_models;

// Recognition pipeline stages, leaves first
pub mod frame_decoder;
pub mod landmark_extractor;
pub mod feature_builder;
pub mod classifier;
pub mod result_resolver;

pub mod recognizer;

#[cfg(test)]
pub(crate) mod test_support;
