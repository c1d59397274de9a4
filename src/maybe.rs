//! Value-or-absence wrapper built on [`Outcome`].
//!
//! A [`Maybe<T>`] is an `Outcome<T, ()>`: the failure channel carries no information,
//! so there is exactly one way to be absent, [`Maybe::none`].
//!
//! ```
//! use outcome::Maybe;
//!
//! let port = Maybe::some("8080")
//!     .flat_map(|s| Maybe::from(s.parse::<u16>().ok()))
//!     .filter(|p| *p >= 1024);
//!
//! assert_eq!(port, Maybe::some(8080));
//! assert!(Maybe::<u16>::none().is_none());
//! ```

use crate::Outcome;

/// A value that may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maybe<T>(Outcome<T, ()>);

impl<T> Maybe<T> {
    /// Wraps a present value.
    #[inline]
    pub const fn some(value: T) -> Self {
        Maybe(Outcome::Value(value))
    }

    /// The canonical absence.
    #[inline]
    pub const fn none() -> Self {
        Maybe(Outcome::Error(()))
    }

    /// Returns `true` if a value is present.
    #[inline]
    pub const fn has_value(&self) -> bool {
        self.0.has_value()
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0.has_error()
    }

    /// Borrows the value, if present.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        self.0.value()
    }

    /// Borrows the underlying outcome.
    #[inline]
    pub const fn as_outcome(&self) -> &Outcome<T, ()> {
        &self.0
    }

    /// Unwraps the underlying outcome.
    #[inline]
    pub fn into_outcome(self) -> Outcome<T, ()> {
        self.0
    }

    /// Converts into an `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.0.into_value()
    }

    /// Converts into an outcome whose absence becomes `error()`.
    #[inline]
    pub fn ok_or_else<E, F>(self, error: F) -> Outcome<T, E>
    where
        F: FnOnce() -> E,
    {
        self.0.map_error(|()| error())
    }

    /// Returns the value or `default`.
    #[inline]
    pub fn value_or(self, default: T) -> T {
        self.0.value_or(default)
    }

    /// Returns the value or computes one.
    #[inline]
    pub fn value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.0.value_or_else(|()| f())
    }

    /// Maps a present value.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        Maybe(self.0.map(f))
    }

    /// Chains a step that may itself be absent.
    #[inline]
    pub fn flat_map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        Maybe(self.0.flat_map(|t| f(t).0))
    }

    /// Keeps the value only if `predicate` holds.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        Maybe(self.0.filter(predicate, |_| ()))
    }

    /// Pairs two present values through `combine`.
    #[inline]
    pub fn zip<U, R, C>(self, other: Maybe<U>, combine: C) -> Maybe<R>
    where
        C: FnOnce(T, U) -> R,
    {
        Maybe(self.0.zip(other.0, combine))
    }

    /// Returns `self` if present, otherwise computes an alternative.
    #[inline]
    pub fn or_else<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        Maybe(self.0.or_else(|()| f().0))
    }

    /// Calls `f` with the value, if present, and returns `self`.
    #[inline]
    pub fn on_value<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        Maybe(self.0.on_value(f))
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::none()
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(t) => Maybe::some(t),
            None => Maybe::none(),
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        maybe.into_option()
    }
}

impl<T> From<Outcome<T, ()>> for Maybe<T> {
    fn from(outcome: Outcome<T, ()>) -> Self {
        Maybe(outcome)
    }
}

impl<T, E> Outcome<T, E> {
    /// Drops the failure payload, keeping only presence.
    #[inline]
    pub fn into_maybe(self) -> Maybe<T> {
        Maybe(self.map_error(|_| ()))
    }
}
