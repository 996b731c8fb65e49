//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - assay identities and their static labels/units (`AssayKind`, `AssayMeta`)
//! - sweep inputs and outputs (`SweepConfig`, `IndependentSeries`)
//! - model parameters (`SaturationParams`, `DecayConfig`, `ModelParams`)
//! - generated data (`ResponseDataset`) and the run configuration (`SimConfig`)

pub mod types;

pub use types::*;
