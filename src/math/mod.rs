//! Mathematical utilities: kinetic primitives used by the response models.

pub mod kinetics;

pub use kinetics::*;
