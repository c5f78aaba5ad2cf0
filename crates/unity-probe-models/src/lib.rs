//! Core data models for unity-probe.
//!
//! This crate provides the values passed between the probe stages: the
//! detected editor version and the outputs reported to the pipeline.

pub mod outputs;
pub mod version;

// Re-export main types
pub use outputs::ProbeOutputs;
pub use version::UnityVersion;
