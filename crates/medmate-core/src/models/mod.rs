//! Domain models for the interaction check.

mod interaction;
mod medicine;
mod severity;

pub use interaction::*;
pub use medicine::*;
pub use severity::*;
