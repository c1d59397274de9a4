//! Key-matched combination of two independent outcomes.
//!
//! [`Outcome::join`] behaves like a single-pair relational equi-join: both sides must
//! succeed, and the keys derived from their payloads must compare equal, before the
//! result selector runs.
//!
//! # Ordering
//!
//! 1. A failing left side is returned as is; no selector runs and the right side is
//!    not inspected.
//! 2. A failing right side is returned next.
//! 3. Both keys are derived, one call per selector.
//! 4. Equal keys produce `Value(result(left, right))`.
//! 5. Unequal keys produce `Error(no_match())`; the factory sees neither key.
//!
//! ```
//! use outcome::Outcome;
//!
//! let left: Outcome<(u32, &str), &str> = Outcome::Value((1, "Hello"));
//! let right: Outcome<(u32, &str), &str> = Outcome::Value((1, "world"));
//!
//! let joined = left.join(
//!     right,
//!     |l| l.0,
//!     |r| r.0,
//!     |l, r| format!("{} {}", l.1, r.1),
//!     || "no match",
//! );
//! assert_eq!(joined, Outcome::Value("Hello world".to_string()));
//! ```

use crate::Outcome;

/// Decides whether two join keys match.
///
/// Implemented by [`DefaultComparer`] and by any `Fn(&K, &K) -> bool`.
pub trait KeyComparer<K: ?Sized> {
    /// Returns `true` when `left` and `right` should be considered the same key.
    fn equals(&self, left: &K, right: &K) -> bool;
}

/// Compares keys with their `PartialEq` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultComparer;

impl<K: PartialEq + ?Sized> KeyComparer<K> for DefaultComparer {
    fn equals(&self, left: &K, right: &K) -> bool {
        left == right
    }
}

impl<K: ?Sized, F> KeyComparer<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn equals(&self, left: &K, right: &K) -> bool {
        self(left, right)
    }
}

impl<T, E> Outcome<T, E> {
    /// Joins two outcomes by key using `PartialEq` on the keys.
    ///
    /// A failing receiver wins over a failing `inner`; keys are derived only when both
    /// sides hold values.
    pub fn join<U, K, R, OK, IK, RS, NM>(
        self,
        inner: Outcome<U, E>,
        outer_key: OK,
        inner_key: IK,
        result: RS,
        no_match: NM,
    ) -> Outcome<R, E>
    where
        K: PartialEq,
        OK: FnOnce(&T) -> K,
        IK: FnOnce(&U) -> K,
        RS: FnOnce(T, U) -> R,
        NM: FnOnce() -> E,
    {
        self.join_by(inner, outer_key, inner_key, result, no_match, DefaultComparer)
    }

    /// Joins two outcomes by key with a caller-supplied comparer.
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let left: Outcome<&str, &str> = Outcome::Value("ADA");
    /// let right: Outcome<&str, &str> = Outcome::Value("ada");
    ///
    /// let joined = left.join_by(
    ///     right,
    ///     |l| l.to_string(),
    ///     |r| r.to_string(),
    ///     |l, r| (l, r),
    ///     || "no match",
    ///     |a: &String, b: &String| a.eq_ignore_ascii_case(b),
    /// );
    /// assert_eq!(joined, Outcome::Value(("ADA", "ada")));
    /// ```
    pub fn join_by<U, K, R, OK, IK, RS, NM, C>(
        self,
        inner: Outcome<U, E>,
        outer_key: OK,
        inner_key: IK,
        result: RS,
        no_match: NM,
        comparer: C,
    ) -> Outcome<R, E>
    where
        OK: FnOnce(&T) -> K,
        IK: FnOnce(&U) -> K,
        RS: FnOnce(T, U) -> R,
        NM: FnOnce() -> E,
        C: KeyComparer<K>,
    {
        let left = match self {
            Outcome::Value(t) => t,
            Outcome::Error(e) => return Outcome::Error(e),
        };
        let right = match inner {
            Outcome::Value(u) => u,
            Outcome::Error(e) => return Outcome::Error(e),
        };

        let left_key = outer_key(&left);
        let right_key = inner_key(&right);
        if comparer.equals(&left_key, &right_key) {
            Outcome::Value(result(left, right))
        } else {
            Outcome::Error(no_match())
        }
    }
}
