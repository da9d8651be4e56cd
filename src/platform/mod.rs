// Bridges to the external engines the pipeline treats as opaque capabilities:
// hand landmark estimation and sign scoring

pub mod inference;
pub mod pose;

#[cfg(feature = "ml-pyo3")]
pub mod python;
