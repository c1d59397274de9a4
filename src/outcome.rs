//! The two-channel [`Outcome`] type and its synchronous combinator algebra.
//!
//! An [`Outcome`] holds either a success payload or a failure payload, never both and
//! never neither. Combinators consume the receiver and derive a new outcome; a step
//! supplied for the inactive channel is never invoked and the active channel
//! propagates unchanged.
//!
//! # Core Combinators
//!
//! - [`Outcome::map`] / [`Outcome::map_error`] / [`Outcome::full_map`] - transform payloads
//! - [`Outcome::filter`] / [`Outcome::is_error_when`] - turn a value into a failure on a test
//! - [`Outcome::flat_map`] - monadic bind, stops at the first failure
//! - [`Outcome::flatten`] - run a side validation while keeping the carried value
//! - [`Outcome::zip`] - combine two successes, left-biased on failure
//!
//! Fail-slow validation lives in [`crate::multiple`], key matching in [`crate::join`]
//! and runtime type reinterpretation in [`crate::cast`].
//!
//! # Examples
//!
//! ```
//! use outcome::Outcome;
//!
//! let parsed: Outcome<i32, String> = Outcome::success(21);
//! let doubled = parsed
//!     .map(|x| x * 2)
//!     .filter(|x| *x < 100, |x| format!("{x} is too large"));
//!
//! assert_eq!(doubled, Outcome::Value(42));
//! ```

/// Either a success payload (`Value`) or a failure payload (`Error`).
///
/// `Outcome` plays the role `Result` plays in the standard library, with a combinator
/// vocabulary tuned for validation pipelines: filtering into failures, side
/// validations that keep the carried value, key-matched joins and fail-slow
/// aggregation.
///
/// Ordering places every `Value` before every `Error`, then compares payloads.
///
/// # Examples
///
/// ```
/// use outcome::Outcome;
///
/// let ok: Outcome<i32, &str> = Outcome::success(42);
/// let failed: Outcome<i32, &str> = Outcome::failure("boom");
///
/// assert!(ok.has_value());
/// assert!(failed.has_error());
/// assert!(ok < failed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use = "an Outcome may carry a failure that should be handled"]
pub enum Outcome<T, E> {
    /// The computation succeeded with a payload
    Value(T),
    /// The computation failed with a payload
    Error(E),
}

impl<T, E> Outcome<T, E> {
    /// Creates an outcome in the value state.
    #[inline]
    pub const fn success(value: T) -> Self {
        Outcome::Value(value)
    }

    /// Creates an outcome in the error state.
    #[inline]
    pub const fn failure(error: E) -> Self {
        Outcome::Error(error)
    }

    /// Builds an outcome from an `Option`, producing the failure lazily on `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let found = Outcome::from_option(Some(3), || "missing");
    /// assert_eq!(found, Outcome::Value(3));
    ///
    /// let missing: Outcome<i32, _> = Outcome::from_option(None, || "missing");
    /// assert_eq!(missing, Outcome::Error("missing"));
    /// ```
    #[inline]
    pub fn from_option<F>(option: Option<T>, error: F) -> Self
    where
        F: FnOnce() -> E,
    {
        match option {
            Some(t) => Outcome::Value(t),
            None => Outcome::Error(error()),
        }
    }

    /// Returns `true` if the outcome holds a value.
    #[inline]
    pub const fn has_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// Returns `true` if the outcome holds a failure.
    #[inline]
    pub const fn has_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// Borrows the value payload, if any.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Outcome::Value(t) => Some(t),
            Outcome::Error(_) => None,
        }
    }

    /// Borrows the failure payload, if any.
    #[inline]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Outcome::Value(_) => None,
            Outcome::Error(e) => Some(e),
        }
    }

    /// Converts into `Option<T>`, discarding any failure.
    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Value(t) => Some(t),
            Outcome::Error(_) => None,
        }
    }

    /// Converts into `Option<E>`, discarding any value.
    #[inline]
    pub fn into_error(self) -> Option<E> {
        match self {
            Outcome::Value(_) => None,
            Outcome::Error(e) => Some(e),
        }
    }

    /// Converts into the standard library `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Value(t) => Ok(t),
            Outcome::Error(e) => Err(e),
        }
    }

    /// Converts from `&Outcome<T, E>` to `Outcome<&T, &E>`.
    #[inline]
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Value(t) => Outcome::Value(t),
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Converts from `&mut Outcome<T, E>` to `Outcome<&mut T, &mut E>`.
    #[inline]
    pub fn as_mut(&mut self) -> Outcome<&mut T, &mut E> {
        match self {
            Outcome::Value(t) => Outcome::Value(t),
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Returns an iterator over the value payload (zero or one item).
    #[inline]
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.value().into_iter()
    }

    /// Returns `true` if the outcome is a `Value` equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, &str> = Outcome::Value(42);
    /// assert!(x.contains_value(&42));
    /// assert!(!x.contains_value(&7));
    /// ```
    #[inline]
    pub fn contains_value<U>(&self, value: &U) -> bool
    where
        U: PartialEq<T>,
    {
        matches!(self, Outcome::Value(t) if value == t)
    }

    /// Returns `true` if the outcome is an `Error` equal to `error`.
    #[inline]
    pub fn contains_error<U>(&self, error: &U) -> bool
    where
        U: PartialEq<E>,
    {
        matches!(self, Outcome::Error(e) if error == e)
    }

    /// Returns the value or `default` when in the error state.
    #[inline]
    pub fn value_or(self, default: T) -> T {
        match self {
            Outcome::Value(t) => t,
            Outcome::Error(_) => default,
        }
    }

    /// Returns the value or computes one from the failure.
    #[inline]
    pub fn value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Outcome::Value(t) => t,
            Outcome::Error(e) => f(e),
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the outcome is in the error state.
    ///
    /// ```should_panic
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, &str> = Outcome::Error("boom");
    /// x.expect_value("needed a value");
    /// ```
    #[inline]
    #[track_caller]
    pub fn expect_value(self, msg: &str) -> T {
        match self {
            Outcome::Value(t) => t,
            Outcome::Error(_) => panic!("{}", msg),
        }
    }

    /// Returns the contained failure.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the outcome is in the value state.
    #[inline]
    #[track_caller]
    pub fn expect_error(self, msg: &str) -> E {
        match self {
            Outcome::Value(_) => panic!("{}", msg),
            Outcome::Error(e) => e,
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is in the error state, printing the failure.
    #[inline]
    #[track_caller]
    pub fn unwrap_value(self) -> T
    where
        E: std::fmt::Debug,
    {
        match self {
            Outcome::Value(t) => t,
            Outcome::Error(e) => panic!("called `Outcome::unwrap_value()` on an `Error`: {e:?}"),
        }
    }

    /// Returns the contained failure.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is in the value state, printing the value.
    #[inline]
    #[track_caller]
    pub fn unwrap_error(self) -> E
    where
        T: std::fmt::Debug,
    {
        match self {
            Outcome::Value(t) => panic!("called `Outcome::unwrap_error()` on a `Value`: {t:?}"),
            Outcome::Error(e) => e,
        }
    }

    /// Maps the value payload, leaving failures untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, &str> = Outcome::Value(5);
    /// assert_eq!(x.map(|v| v * 2), Outcome::Value(10));
    ///
    /// let y: Outcome<i32, &str> = Outcome::Error("boom");
    /// assert_eq!(y.map(|v| v * 2), Outcome::Error("boom"));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Value(t) => Outcome::Value(f(t)),
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Maps the failure payload, leaving values untouched.
    #[inline]
    pub fn map_error<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Value(t) => Outcome::Value(t),
            Outcome::Error(e) => Outcome::Error(f(e)),
        }
    }

    /// Maps whichever channel is active. Exactly one of the two steps runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, &str> = Outcome::Error("boom");
    /// assert_eq!(x.full_map(|v| v + 1, str::len), Outcome::Error(4));
    /// ```
    #[inline]
    pub fn full_map<U, E2, FV, FE>(self, fv: FV, fe: FE) -> Outcome<U, E2>
    where
        FV: FnOnce(T) -> U,
        FE: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Value(t) => Outcome::Value(fv(t)),
            Outcome::Error(e) => Outcome::Error(fe(e)),
        }
    }

    /// Collapses both channels into a single value.
    #[inline]
    pub fn fold<R, FV, FE>(self, fv: FV, fe: FE) -> R
    where
        FV: FnOnce(T) -> R,
        FE: FnOnce(E) -> R,
    {
        match self {
            Outcome::Value(t) => fv(t),
            Outcome::Error(e) => fe(e),
        }
    }

    /// Keeps the value only if `predicate` holds; otherwise fails with `failure(value)`.
    ///
    /// On an error-state outcome neither closure runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, String> = Outcome::Value(7);
    /// let checked = x.filter(|v| v % 2 == 0, |v| format!("{v} is odd"));
    /// assert_eq!(checked, Outcome::Error("7 is odd".to_string()));
    /// ```
    #[inline]
    pub fn filter<P, F>(self, predicate: P, failure: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(T) -> E,
    {
        match self {
            Outcome::Value(t) => {
                if predicate(&t) {
                    Outcome::Value(t)
                } else {
                    Outcome::Error(failure(t))
                }
            }
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Inverse of [`filter`](Self::filter): fails with `failure(value)` when `predicate` holds.
    #[inline]
    pub fn is_error_when<P, F>(self, predicate: P, failure: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(T) -> E,
    {
        self.filter(|t| !predicate(t), failure)
    }

    /// Chains a step that can itself fail (monadic bind).
    ///
    /// On an error-state outcome `f` is never invoked.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// fn half(x: i32) -> Outcome<i32, &'static str> {
    ///     if x % 2 == 0 { Outcome::Value(x / 2) } else { Outcome::Error("odd") }
    /// }
    ///
    /// assert_eq!(Outcome::success(8).flat_map(half).flat_map(half), Outcome::Value(2));
    /// assert_eq!(Outcome::success(6).flat_map(half).flat_map(half), Outcome::Error("odd"));
    /// ```
    #[inline]
    pub fn flat_map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Outcome::Value(t) => f(t),
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Like [`flat_map`](Self::flat_map), for a step failing with another error type.
    ///
    /// The nested failure is converted through `adapt`.
    #[inline]
    pub fn flat_map_with_error<U, E2, F, A>(self, f: F, adapt: A) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E2>,
        A: FnOnce(E2) -> E,
    {
        self.flat_map(|t| f(t).map_error(adapt))
    }

    /// Chains a failing step, then combines the original value with the step's value.
    ///
    /// `combine` only runs when both the receiver and the nested outcome succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let user: Outcome<&str, &str> = Outcome::Value("ada");
    /// let greeting = user.flat_map_combine(
    ///     |name| if name.is_empty() { Outcome::Error("empty") } else { Outcome::Value(name.len()) },
    ///     |name, len| format!("{name}:{len}"),
    /// );
    /// assert_eq!(greeting, Outcome::Value("ada:3".to_string()));
    /// ```
    #[inline]
    pub fn flat_map_combine<U, R, F, C>(self, f: F, combine: C) -> Outcome<R, E>
    where
        F: FnOnce(&T) -> Outcome<U, E>,
        C: FnOnce(T, U) -> R,
    {
        self.flat_map(|t| f(&t).map(|u| combine(t, u)))
    }

    /// Runs a side validation that may fail, keeping the original value on success.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let age: Outcome<u32, &str> = Outcome::Value(17);
    /// let adult = age.flatten(|a| if *a >= 18 { Outcome::Value(()) } else { Outcome::Error("minor") });
    /// assert_eq!(adult, Outcome::Error("minor"));
    /// ```
    #[inline]
    pub fn flatten<U, F>(self, f: F) -> Self
    where
        F: FnOnce(&T) -> Outcome<U, E>,
    {
        self.flat_map_combine(f, |t, _| t)
    }

    /// Combines two successes. Left-biased: a failing receiver wins over `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let a: Outcome<i32, &str> = Outcome::Value(2);
    /// let b: Outcome<i32, &str> = Outcome::Value(3);
    /// assert_eq!(a.zip(b, |x, y| x * y), Outcome::Value(6));
    ///
    /// let c: Outcome<i32, &str> = Outcome::Error("left");
    /// let d: Outcome<i32, &str> = Outcome::Error("right");
    /// assert_eq!(c.zip(d, |x, y| x * y), Outcome::Error("left"));
    /// ```
    #[inline]
    pub fn zip<U, R, C>(self, other: Outcome<U, E>, combine: C) -> Outcome<R, E>
    where
        C: FnOnce(T, U) -> R,
    {
        match self {
            Outcome::Value(t) => other.map(|u| combine(t, u)),
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Chains a step on the failure channel, leaving values untouched.
    #[inline]
    pub fn or_else<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> Outcome<T, E2>,
    {
        match self {
            Outcome::Value(t) => Outcome::Value(t),
            Outcome::Error(e) => f(e),
        }
    }

    /// Exchanges the two channels.
    #[inline]
    pub fn swap(self) -> Outcome<E, T> {
        match self {
            Outcome::Value(t) => Outcome::Error(t),
            Outcome::Error(e) => Outcome::Value(e),
        }
    }

    /// Calls `f` with the value, if any, and returns the outcome unchanged.
    #[inline]
    pub fn on_value<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Outcome::Value(t) = &self {
            f(t);
        }
        self
    }

    /// Calls `f` with the failure, if any, and returns the outcome unchanged.
    #[inline]
    pub fn on_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Outcome::Error(e) = &self {
            f(e);
        }
        self
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(t) => Outcome::Value(t),
            Err(e) => Outcome::Error(e),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

/// Collects an iterator of outcomes, stopping at the first failure.
///
/// ```
/// use outcome::Outcome;
///
/// let all: Outcome<Vec<i32>, &str> = vec![Outcome::Value(1), Outcome::Value(2)].into_iter().collect();
/// assert_eq!(all, Outcome::Value(vec![1, 2]));
/// ```
impl<T, E, V> FromIterator<Outcome<T, E>> for Outcome<V, E>
where
    V: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        iter.into_iter()
            .map(Outcome::into_result)
            .collect::<Result<V, E>>()
            .into()
    }
}

impl<'a, T, E> IntoIterator for &'a Outcome<T, E> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, E> IntoIterator for Outcome<T, E> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_value().into_iter()
    }
}
