//! Commonly used imports
//!
//! Use `use outcome::prelude::*;` for quick access to the most common types.

// Core types
pub use crate::{Maybe, Outcome, Validator};

// Seams for joins and fail-slow validation
pub use crate::{DefaultComparer, KeyComparer, Validations};

// Errors
pub use crate::CastError;

// Async lifting
#[cfg(feature = "pending")]
pub use crate::{Payload, PendingOutcome};
