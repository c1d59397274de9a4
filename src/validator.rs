//! Accumulating validator for a single candidate value.
//!
//! A [`Validator`] holds one fixed candidate and appends one failure for every check
//! that does not hold. Converting it with [`Validator::into_outcome`] yields the
//! candidate when nothing failed, otherwise every failure in call order.
//!
//! ```
//! use outcome::{Outcome, Validator};
//!
//! let checked = Validator::new("ab")
//!     .ensure(|s| s.len() >= 3, |s| format!("`{s}` is too short"))
//!     .ensure(|s| s.chars().all(char::is_alphabetic), |_| "not alphabetic".to_string())
//!     .ensure_not(|s| s.starts_with('a'), |_| "starts with a".to_string())
//!     .into_outcome();
//!
//! assert_eq!(
//!     checked,
//!     Outcome::Error(vec!["`ab` is too short".to_string(), "starts with a".to_string()])
//! );
//! ```

use crate::Outcome;

/// Runs checks against one candidate and collects every failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a Validator does nothing until converted into an Outcome"]
pub struct Validator<T, E> {
    candidate: T,
    failures: Vec<E>,
}

impl<T, E> Validator<T, E> {
    /// Starts validating `candidate` with no failures recorded.
    pub fn new(candidate: T) -> Self {
        Validator {
            candidate,
            failures: Vec::new(),
        }
    }

    /// The value under validation.
    pub fn candidate(&self) -> &T {
        &self.candidate
    }

    /// Failures recorded so far, in call order.
    pub fn failures(&self) -> &[E] {
        &self.failures
    }

    /// Returns `true` while no check has failed.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Records `failure(candidate)` unless `predicate` holds.
    pub fn ensure<P, F>(mut self, predicate: P, failure: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(&T) -> E,
    {
        if !predicate(&self.candidate) {
            let error = failure(&self.candidate);
            self.failures.push(error);
        }
        self
    }

    /// Records `failure(candidate)` when `predicate` holds.
    pub fn ensure_not<P, F>(self, predicate: P, failure: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(&T) -> E,
    {
        self.ensure(|t| !predicate(t), failure)
    }

    /// Runs an outcome-producing check and records its failure, if any.
    ///
    /// The check's success payload is discarded; the candidate never changes.
    pub fn check<U, F>(mut self, step: F) -> Self
    where
        F: FnOnce(&T) -> Outcome<U, E>,
    {
        if let Outcome::Error(e) = step(&self.candidate) {
            self.failures.push(e);
        }
        self
    }

    /// Checks every item of a collection candidate.
    ///
    /// Records a single failure, built from the first offending item, if any item
    /// fails `predicate`.
    ///
    /// ```
    /// use outcome::{Outcome, Validator};
    ///
    /// let checked = Validator::new(vec![2, 4, 7, 9])
    ///     .ensure_all(|n: &i32| *n % 2 == 0, |n| format!("{n} is odd"))
    ///     .into_outcome();
    ///
    /// assert_eq!(checked, Outcome::Error(vec!["7 is odd".to_string()]));
    /// ```
    pub fn ensure_all<Item, P, F>(mut self, mut predicate: P, failure: F) -> Self
    where
        for<'a> &'a T: IntoIterator<Item = &'a Item>,
        P: FnMut(&Item) -> bool,
        F: FnOnce(&Item) -> E,
    {
        let offending = (&self.candidate)
            .into_iter()
            .find(|item| !predicate(*item))
            .map(failure);
        if let Some(error) = offending {
            self.failures.push(error);
        }
        self
    }

    /// Converts into an outcome: the candidate when no check failed, otherwise all failures.
    pub fn into_outcome(self) -> Outcome<T, Vec<E>> {
        if self.failures.is_empty() {
            Outcome::Value(self.candidate)
        } else {
            Outcome::Error(self.failures)
        }
    }
}

impl<T, E> From<Validator<T, E>> for Outcome<T, Vec<E>> {
    fn from(validator: Validator<T, E>) -> Self {
        validator.into_outcome()
    }
}
