//! # Outcome: Two-Channel Results with a Combinator Algebra
//!
//! Model fallible computations as values that carry either a success payload or a
//! failure payload, and compose them without branching by hand.
//!
//! ## Core Types
//!
//! - **[`Outcome<T, E>`]**: A value or a failure, with map/filter/bind style combinators
//! - **[`Maybe<T>`]**: A value or canonical absence, an `Outcome<T, ()>`
//! - **[`Validator<T, E>`]**: Runs many checks against one candidate and keeps every failure
//! - **[`PendingOutcome<T, E>`]**: A lazily evaluated outcome resolved at most once
//!
//! ## Key Features
//!
//! - **Fail-fast chains**: `.flat_map()` stops at the first failure
//! - **Fail-slow validation**: `.multiple()` and [`Validator`] report every failure
//! - **Key-matched joins**: `.join()` combines two outcomes whose keys agree
//! - **Runtime casts**: `.cast()`, `.safe_cast()` and `.full_cast()` reinterpret payloads
//! - **Async lifting**: every combinator has a deferred counterpart on [`PendingOutcome`]
//!
//! ## Example
//!
//! ```
//! use outcome::prelude::*;
//!
//! fn parse(input: &str) -> Outcome<i32, String> {
//!     Outcome::from(input.parse::<i32>()).map_error(|e| e.to_string())
//! }
//!
//! let checked = parse("42")
//!     .filter(|n| *n > 0, |n| format!("{n} is not positive"))
//!     .flatten(|n| if n % 2 == 0 { Outcome::Value(()) } else { Outcome::Error("odd".to_string()) })
//!     .map(|n| n / 2);
//!
//! assert_eq!(checked, Outcome::Value(21));
//! assert!(parse("x").has_error());
//! ```
//!
//! ## Cargo Features
//!
//! - `pending` (default): [`PendingOutcome`], built on the `futures` crate
//! - `serde`: `Serialize`/`Deserialize` for [`Outcome`] and [`Maybe`]

pub mod cast;
mod disjoint;
pub mod join;
mod maybe;
pub mod multiple;
mod outcome;
#[cfg(feature = "pending")]
mod pending;
pub mod prelude;
mod validator;

pub use cast::CastError;
pub use join::{DefaultComparer, KeyComparer};
pub use maybe::*;
pub use multiple::Validations;
pub use outcome::*;
#[cfg(feature = "pending")]
pub use pending::*;
pub use validator::*;
