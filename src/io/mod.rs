//! Input/output helpers.
//!
//! - dataset CSV export + parsing (`export`)
//! - simulation bundle JSON read/write (`bundle`)

pub mod bundle;
pub mod export;

pub use bundle::*;
pub use export::*;
