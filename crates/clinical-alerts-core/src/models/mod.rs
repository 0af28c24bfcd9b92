//! Domain models for the clinical alerts system.

mod alert;
mod knowledge;
mod patient;

pub use alert::*;
pub use knowledge::*;
pub use patient::*;
