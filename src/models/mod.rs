//! Assay response models.
//!
//! Models are implemented as small, pure functions so that dataset building can
//! stay generic over the assay kind.

pub mod model;

pub use model::*;
