//! Dataset building: sweeps + response models -> labelled (x, y) tables.

pub mod builder;

pub use builder::*;
