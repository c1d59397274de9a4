//! Interop with the left/right disjoint union [`either::Either`].
//!
//! By convention the left side is the failure channel and the right side the
//! success channel, so `Either<E, T>` and `Outcome<T, E>` convert losslessly.
//!
//! ```
//! use either::Either;
//! use outcome::Outcome;
//!
//! let parsed: Outcome<i32, String> = Either::Right(3).into();
//! assert_eq!(parsed, Outcome::Value(3));
//!
//! let back: Either<String, i32> = Outcome::<i32, String>::Error("bad".into()).into();
//! assert_eq!(back, Either::Left("bad".to_string()));
//! ```

use either::Either;

use crate::{Outcome, multiple::Validations};

impl<T, E> Outcome<T, E> {
    /// Converts into `Either`, failures on the left and values on the right.
    #[inline]
    pub fn into_either(self) -> Either<E, T> {
        match self {
            Outcome::Value(t) => Either::Right(t),
            Outcome::Error(e) => Either::Left(e),
        }
    }

    /// Builds an outcome from `Either`, reading the right side as the value.
    #[inline]
    pub fn from_either(either: Either<E, T>) -> Self {
        match either {
            Either::Left(e) => Outcome::Error(e),
            Either::Right(t) => Outcome::Value(t),
        }
    }
}

impl<L, R> From<Either<L, R>> for Outcome<R, L> {
    fn from(either: Either<L, R>) -> Self {
        Outcome::from_either(either)
    }
}

impl<T, E> From<Outcome<T, E>> for Either<E, T> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_either()
    }
}

/// Picks one of two validation sets at runtime.
impl<T, E, L, R> Validations<T, E> for Either<L, R>
where
    L: Validations<T, E>,
    R: Validations<T, E>,
{
    fn collect_failures(self, candidate: &Outcome<T, E>) -> Vec<E> {
        match self {
            Either::Left(l) => l.collect_failures(candidate),
            Either::Right(r) => r.collect_failures(candidate),
        }
    }
}
