//! Asynchronous lifting of [`Outcome`].
//!
//! A [`PendingOutcome`] wraps a computation that will eventually produce an
//! `Outcome`. It exposes the synchronous combinator vocabulary, but nothing runs until
//! a caller observes the result, and the underlying computation is evaluated at most
//! once no matter how many times, or from how many handles, it is observed.
//!
//! # Resolution
//!
//! The wrapped future is held in a [`futures::future::Shared`]. The first observer
//! drives it; concurrent observers wait on the same evaluation and every later
//! observation reads the cached outcome. Side effects inside the computation, or in
//! steps chained onto it with [`map_async`](PendingOutcome::map_async) and friends,
//! therefore happen exactly once.
//!
//! Payloads must be [`Payload`]s (`Clone + Send + Sync + 'static`) because one
//! resolution is shared between handles that may live on different threads.
//!
//! # Examples
//!
//! ```
//! use futures::executor::block_on;
//! use outcome::{Outcome, PendingOutcome};
//!
//! let pending: PendingOutcome<u32, String> = PendingOutcome::from_fn(|| Outcome::Value(20))
//!     .map_async(|v| async move { v + 1 })
//!     .filter(|v| *v > 10, |v| format!("{v} is too small"));
//!
//! block_on(async {
//!     assert!(pending.has_value().await);
//!     assert_eq!(pending.value().await, Some(21));
//! });
//! ```

use std::{fmt, sync::Arc};

use futures::future::{self, BoxFuture, FutureExt, Shared};
use tracing::trace;

use crate::{
    Outcome,
    join::{DefaultComparer, KeyComparer},
    multiple::Validations,
};

/// Bounds shared by every payload of a [`PendingOutcome`].
pub trait Payload: Clone + Send + Sync + 'static {}

impl<T> Payload for T where T: Clone + Send + Sync + 'static {}

type SharedOutcome<T, E> = Shared<BoxFuture<'static, Arc<Outcome<T, E>>>>;

/// A lazily evaluated, single-resolution [`Outcome`].
///
/// Cloning a `PendingOutcome` yields another handle to the same resolution.
#[must_use = "a PendingOutcome does nothing until observed"]
pub struct PendingOutcome<T, E> {
    shared: SharedOutcome<T, E>,
}

impl<T, E> Clone for PendingOutcome<T, E> {
    fn clone(&self) -> Self {
        PendingOutcome {
            shared: self.shared.clone(),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for PendingOutcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingOutcome")
            .field("resolved", &self.shared.peek().map(|outcome| &**outcome))
            .finish()
    }
}

impl<T: Payload, E: Payload> PendingOutcome<T, E> {
    /// Wraps a future. The future is not polled until the outcome is observed.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Outcome<T, E>> + Send + 'static,
    {
        let resolve = async move {
            trace!("resolving pending outcome");
            let outcome = future.await;
            trace!(has_value = outcome.has_value(), "pending outcome resolved");
            Arc::new(outcome)
        };
        PendingOutcome {
            shared: resolve.boxed().shared(),
        }
    }

    /// Defers a synchronous producer until the outcome is observed.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() -> Outcome<T, E> + Send + 'static,
    {
        Self::new(async move { f() })
    }

    /// Lifts an already-known outcome.
    pub fn ready(outcome: Outcome<T, E>) -> Self {
        Self::new(future::ready(outcome))
    }

    /// A pending outcome that resolves to `Value(value)`.
    pub fn success(value: T) -> Self {
        Self::ready(Outcome::Value(value))
    }

    /// A pending outcome that resolves to `Error(error)`.
    pub fn failure(error: E) -> Self {
        Self::ready(Outcome::Error(error))
    }

    async fn resolve(&self) -> Arc<Outcome<T, E>> {
        self.shared.clone().await
    }

    /// Resolves if needed and reports whether the outcome holds a value.
    pub async fn has_value(&self) -> bool {
        self.resolve().await.has_value()
    }

    /// Resolves if needed and reports whether the outcome holds a failure.
    pub async fn has_error(&self) -> bool {
        self.resolve().await.has_error()
    }

    /// Resolves if needed and returns a clone of the value, if any.
    pub async fn value(&self) -> Option<T> {
        self.resolve().await.value().cloned()
    }

    /// Resolves if needed and returns a clone of the failure, if any.
    pub async fn error(&self) -> Option<E> {
        self.resolve().await.error().cloned()
    }

    /// Resolves if needed and returns a clone of the outcome.
    pub async fn outcome(&self) -> Outcome<T, E> {
        Outcome::clone(&*self.resolve().await)
    }

    /// Resolves if needed and returns the outcome, cloning only if other handles remain.
    pub async fn into_outcome(self) -> Outcome<T, E> {
        let resolved = self.shared.await;
        Arc::try_unwrap(resolved).unwrap_or_else(|shared| Outcome::clone(&shared))
    }

    /// Returns the outcome if it has already been resolved, without driving it.
    pub fn peek(&self) -> Option<&Outcome<T, E>> {
        self.shared.peek().map(|outcome| &**outcome)
    }

    /// Returns `true` once some observer has driven the outcome to completion.
    pub fn is_resolved(&self) -> bool {
        self.peek().is_some()
    }

    fn compose<U, E2, F, Fut>(self, step: F) -> PendingOutcome<U, E2>
    where
        U: Payload,
        E2: Payload,
        F: FnOnce(Outcome<T, E>) -> Fut + Send + 'static,
        Fut: Future<Output = Outcome<U, E2>> + Send + 'static,
    {
        PendingOutcome::new(async move { step(self.into_outcome().await).await })
    }

    fn compose_sync<U, E2, F>(self, step: F) -> PendingOutcome<U, E2>
    where
        U: Payload,
        E2: Payload,
        F: FnOnce(Outcome<T, E>) -> Outcome<U, E2> + Send + 'static,
    {
        self.compose(|outcome| future::ready(step(outcome)))
    }

    /// Deferred [`Outcome::map`].
    pub fn map<U, F>(self, f: F) -> PendingOutcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.map(f))
    }

    /// Maps the value through an asynchronous step.
    pub fn map_async<U, F, Fut>(self, f: F) -> PendingOutcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => Outcome::Value(f(t).await),
                Outcome::Error(e) => Outcome::Error(e),
            }
        })
    }

    /// Deferred [`Outcome::map_error`].
    pub fn map_error<E2, F>(self, f: F) -> PendingOutcome<T, E2>
    where
        E2: Payload,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.map_error(f))
    }

    /// Maps the failure through an asynchronous step.
    pub fn map_error_async<E2, F, Fut>(self, f: F) -> PendingOutcome<T, E2>
    where
        E2: Payload,
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = E2> + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => Outcome::Value(t),
                Outcome::Error(e) => Outcome::Error(f(e).await),
            }
        })
    }

    /// Deferred [`Outcome::full_map`].
    pub fn full_map<U, E2, FV, FE>(self, fv: FV, fe: FE) -> PendingOutcome<U, E2>
    where
        U: Payload,
        E2: Payload,
        FV: FnOnce(T) -> U + Send + 'static,
        FE: FnOnce(E) -> E2 + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.full_map(fv, fe))
    }

    /// Maps whichever channel is active through an asynchronous step.
    pub fn full_map_async<U, E2, FV, FE, FutV, FutE>(self, fv: FV, fe: FE) -> PendingOutcome<U, E2>
    where
        U: Payload,
        E2: Payload,
        FV: FnOnce(T) -> FutV + Send + 'static,
        FE: FnOnce(E) -> FutE + Send + 'static,
        FutV: Future<Output = U> + Send + 'static,
        FutE: Future<Output = E2> + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => Outcome::Value(fv(t).await),
                Outcome::Error(e) => Outcome::Error(fe(e).await),
            }
        })
    }

    /// Deferred [`Outcome::filter`].
    pub fn filter<P, F>(self, predicate: P, failure: F) -> Self
    where
        P: FnOnce(&T) -> bool + Send + 'static,
        F: FnOnce(T) -> E + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.filter(predicate, failure))
    }

    /// Filters with an asynchronous predicate, which receives a clone of the value.
    pub fn filter_async<P, Fut, F>(self, predicate: P, failure: F) -> Self
    where
        P: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
        F: FnOnce(T) -> E + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => {
                    if predicate(t.clone()).await {
                        Outcome::Value(t)
                    } else {
                        Outcome::Error(failure(t))
                    }
                }
                Outcome::Error(e) => Outcome::Error(e),
            }
        })
    }

    /// Deferred [`Outcome::is_error_when`].
    pub fn is_error_when<P, F>(self, predicate: P, failure: F) -> Self
    where
        P: FnOnce(&T) -> bool + Send + 'static,
        F: FnOnce(T) -> E + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.is_error_when(predicate, failure))
    }

    /// [`filter_async`](Self::filter_async) with the predicate inverted.
    pub fn is_error_when_async<P, Fut, F>(self, predicate: P, failure: F) -> Self
    where
        P: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
        F: FnOnce(T) -> E + Send + 'static,
    {
        self.filter_async(|t| predicate(t).map(|holds| !holds), failure)
    }

    /// Deferred [`Outcome::flat_map`].
    pub fn flat_map<U, F>(self, f: F) -> PendingOutcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> Outcome<U, E> + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.flat_map(f))
    }

    /// Chains an asynchronous step producing an outcome.
    pub fn flat_map_async<U, F, Fut>(self, f: F) -> PendingOutcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Outcome<U, E>> + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => f(t).await,
                Outcome::Error(e) => Outcome::Error(e),
            }
        })
    }

    /// Chains a step producing another pending outcome.
    pub fn flat_map_pending<U, F>(self, f: F) -> PendingOutcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> PendingOutcome<U, E> + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => f(t).into_outcome().await,
                Outcome::Error(e) => Outcome::Error(e),
            }
        })
    }

    /// Deferred [`Outcome::flat_map_with_error`].
    pub fn flat_map_with_error<U, E2, F, A>(self, f: F, adapt: A) -> PendingOutcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> Outcome<U, E2> + Send + 'static,
        A: FnOnce(E2) -> E + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.flat_map_with_error(f, adapt))
    }

    /// Chains an asynchronous step with its own failure type, adapted through `adapt`.
    pub fn flat_map_with_error_async<U, E2, F, Fut, A>(self, f: F, adapt: A) -> PendingOutcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Outcome<U, E2>> + Send + 'static,
        A: FnOnce(E2) -> E + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => f(t).await.map_error(adapt),
                Outcome::Error(e) => Outcome::Error(e),
            }
        })
    }

    /// Deferred [`Outcome::flat_map_combine`].
    pub fn flat_map_combine<U, R, F, C>(self, f: F, combine: C) -> PendingOutcome<R, E>
    where
        R: Payload,
        F: FnOnce(&T) -> Outcome<U, E> + Send + 'static,
        C: FnOnce(T, U) -> R + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.flat_map_combine(f, combine))
    }

    /// Deferred [`Outcome::flatten`].
    pub fn flatten<U, F>(self, f: F) -> Self
    where
        F: FnOnce(&T) -> Outcome<U, E> + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.flatten(f))
    }

    /// Runs an asynchronous side validation, keeping the value on success.
    ///
    /// The step receives a clone of the value.
    pub fn flatten_async<U, F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Outcome<U, E>> + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => f(t.clone()).await.map(|_| t),
                Outcome::Error(e) => Outcome::Error(e),
            }
        })
    }

    /// Deferred [`Outcome::zip`].
    ///
    /// The receiver is resolved first; `other` is only driven if the receiver holds a
    /// value.
    pub fn zip<U, R, C>(self, other: PendingOutcome<U, E>, combine: C) -> PendingOutcome<R, E>
    where
        U: Payload,
        R: Payload,
        C: FnOnce(T, U) -> R + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => other.into_outcome().await.map(|u| combine(t, u)),
                Outcome::Error(e) => Outcome::Error(e),
            }
        })
    }

    /// Deferred [`Outcome::join`]. The receiver is resolved before `inner`.
    pub fn join<U, K, R, OK, IK, RS, NM>(
        self,
        inner: PendingOutcome<U, E>,
        outer_key: OK,
        inner_key: IK,
        result: RS,
        no_match: NM,
    ) -> PendingOutcome<R, E>
    where
        U: Payload,
        R: Payload,
        K: PartialEq,
        OK: FnOnce(&T) -> K + Send + 'static,
        IK: FnOnce(&U) -> K + Send + 'static,
        RS: FnOnce(T, U) -> R + Send + 'static,
        NM: FnOnce() -> E + Send + 'static,
    {
        self.join_by(inner, outer_key, inner_key, result, no_match, DefaultComparer)
    }

    /// Deferred [`Outcome::join_by`]. The receiver is resolved before `inner`.
    pub fn join_by<U, K, R, OK, IK, RS, NM, C>(
        self,
        inner: PendingOutcome<U, E>,
        outer_key: OK,
        inner_key: IK,
        result: RS,
        no_match: NM,
        comparer: C,
    ) -> PendingOutcome<R, E>
    where
        U: Payload,
        R: Payload,
        OK: FnOnce(&T) -> K + Send + 'static,
        IK: FnOnce(&U) -> K + Send + 'static,
        RS: FnOnce(T, U) -> R + Send + 'static,
        NM: FnOnce() -> E + Send + 'static,
        C: KeyComparer<K> + Send + 'static,
    {
        self.compose(|outcome| async move {
            match outcome {
                Outcome::Value(t) => Outcome::Value(t).join_by(
                    inner.into_outcome().await,
                    outer_key,
                    inner_key,
                    result,
                    no_match,
                    comparer,
                ),
                Outcome::Error(e) => Outcome::Error(e),
            }
        })
    }

    /// Deferred [`Outcome::multiple`].
    pub fn multiple<V>(self, validations: V) -> PendingOutcome<T, Vec<E>>
    where
        V: Validations<T, E> + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.multiple(validations))
    }

    /// Deferred [`Outcome::cast`].
    ///
    /// # Panics
    ///
    /// Observing the result panics if the value is not an `R`. Only the observer that
    /// drives the resolution sees the [`CastError`](crate::CastError) message; the
    /// shared resolution is then poisoned and every other observer panics with the
    /// generic `inner future panicked during poll`. Use
    /// [`safe_cast`](Self::safe_cast) when the payload type is not known statically.
    pub fn cast<R: Payload>(self) -> PendingOutcome<R, E> {
        self.compose_sync(|outcome| outcome.cast::<R>())
    }

    /// Deferred [`Outcome::safe_cast`].
    pub fn safe_cast<R, F>(self, failure: F) -> PendingOutcome<R, E>
    where
        R: Payload,
        F: FnOnce(T) -> E + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.safe_cast::<R, F>(failure))
    }

    /// Deferred [`Outcome::full_cast`].
    ///
    /// # Panics
    ///
    /// Observing the result panics if the active payload is incompatible, with the
    /// same poisoning behavior as [`cast`](Self::cast).
    pub fn full_cast<R: Payload, R2: Payload>(self) -> PendingOutcome<R, R2> {
        self.compose_sync(|outcome| outcome.full_cast::<R, R2>())
    }

    /// Deferred [`Outcome::or_else`].
    pub fn or_else<E2, F>(self, f: F) -> PendingOutcome<T, E2>
    where
        E2: Payload,
        F: FnOnce(E) -> Outcome<T, E2> + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.or_else(f))
    }

    /// Deferred [`Outcome::on_value`]; runs once, on resolution.
    pub fn on_value<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.on_value(f))
    }

    /// Deferred [`Outcome::on_error`]; runs once, on resolution.
    pub fn on_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        self.compose_sync(|outcome| outcome.on_error(f))
    }
}

impl<T: Payload, E: Payload> IntoFuture for PendingOutcome<T, E> {
    type Output = Outcome<T, E>;
    type IntoFuture = BoxFuture<'static, Outcome<T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        self.into_outcome().boxed()
    }
}

impl<T: Payload, E: Payload> From<Outcome<T, E>> for PendingOutcome<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        PendingOutcome::ready(outcome)
    }
}

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Lifts this outcome into an already-resolvable [`PendingOutcome`].
    pub fn into_pending(self) -> PendingOutcome<T, E> {
        PendingOutcome::ready(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::num::ParseIntError;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::{thread, time::Duration};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn counted(source: Outcome<i32, String>, runs: &Arc<AtomicUsize>) -> PendingOutcome<i32, String> {
        let runs = Arc::clone(runs);
        PendingOutcome::from_fn(move || {
            runs.fetch_add(1, Ordering::SeqCst);
            source
        })
    }

    #[test]
    fn test_map_async_side_effect_runs_once() {
        let runs = counter();
        let step_runs = Arc::clone(&runs);
        let pending = PendingOutcome::<i32, String>::success(2).map_async(move |v| async move {
            step_runs.fetch_add(1, Ordering::SeqCst);
            v * 10
        });

        block_on(async {
            assert!(pending.has_value().await);
            assert!(pending.has_value().await);
            assert!(!pending.has_error().await);
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(pending.peek(), Some(&Outcome::Value(20)));
    }

    #[test]
    fn test_construction_is_lazy() {
        let runs = counter();
        let pending = counted(Outcome::Value(1), &runs).map(|v| v + 1);

        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(!pending.is_resolved());
        assert_eq!(pending.peek(), None);

        assert_eq!(block_on(pending.value()), Some(2));
        assert!(pending.is_resolved());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_one_resolution() {
        let runs = counter();
        let first = counted(Outcome::Error("boom".to_string()), &runs);
        let second = first.clone();

        assert_eq!(block_on(first.error()), Some("boom".to_string()));
        assert_eq!(block_on(second.into_outcome()), Outcome::Error("boom".to_string()));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_observation_resolves_once() {
        let runs = counter();
        let slow_runs = Arc::clone(&runs);
        let pending = PendingOutcome::<u32, String>::from_fn(move || {
            slow_runs.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            Outcome::Value(7)
        });

        thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let pending = pending.clone();
                    scope.spawn(move || block_on(pending.has_value()))
                })
                .collect();
            for handle in handles {
                assert!(handle.join().expect("observer thread panicked"));
            }
        });

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_error_short_circuits_async_steps() {
        let runs = counter();
        let step_runs = Arc::clone(&runs);
        let pending = PendingOutcome::<i32, String>::failure("early".to_string())
            .flat_map_async(move |v| async move {
                step_runs.fetch_add(1, Ordering::SeqCst);
                Outcome::<i32, String>::Value(v)
            });

        assert_eq!(block_on(pending.into_outcome()), Outcome::Error("early".to_string()));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zip_never_drives_right_after_left_failure() {
        let runs = counter();
        let right = counted(Outcome::Value(2), &runs);
        let left = PendingOutcome::<i32, String>::failure("left".to_string());

        let zipped = left.zip(right.clone(), |a, b| a + b);
        assert_eq!(block_on(zipped.into_outcome()), Outcome::Error("left".to_string()));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(!right.is_resolved());
    }

    #[test]
    fn test_zip_combines_values() {
        let left = PendingOutcome::<i32, String>::success(4);
        let right = PendingOutcome::<i32, String>::success(5);
        assert_eq!(block_on(left.zip(right, |a, b| a * b).into_outcome()), Outcome::Value(20));
    }

    #[test]
    fn test_join_matches_like_sync_join() {
        let left = PendingOutcome::<(u32, &'static str), &'static str>::success((1, "Hello"));
        let right = PendingOutcome::<(u32, &'static str), &'static str>::success((1, "world"));

        let joined = left.join(
            right,
            |l| l.0,
            |r| r.0,
            |l, r| format!("{} {}", l.1, r.1),
            || "no match",
        );
        assert_eq!(block_on(joined.into_outcome()), Outcome::Value("Hello world".to_string()));
    }

    #[test]
    fn test_join_left_failure_skips_right_and_selectors() {
        let runs = counter();
        let key_runs = Arc::clone(&runs);
        let right = counted(Outcome::Value(1), &runs);
        let left = PendingOutcome::<i32, String>::failure("E1".to_string());

        let joined = left.join(
            right,
            move |l| {
                key_runs.fetch_add(1, Ordering::SeqCst);
                *l
            },
            |r| *r,
            |l, r| l + r,
            || "no match".to_string(),
        );
        assert_eq!(block_on(joined.into_outcome()), Outcome::Error("E1".to_string()));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_flat_map_pending_and_filter_async() {
        let pending = PendingOutcome::<i32, String>::success(3)
            .flat_map_pending(|v| PendingOutcome::from_fn(move || Outcome::Value(v * 3)))
            .filter_async(|v| async move { v % 2 == 0 }, |v| format!("{v} is odd"));

        assert_eq!(block_on(pending.into_outcome()), Outcome::Error("9 is odd".to_string()));
    }

    #[test]
    fn test_multiple_is_fail_slow() {
        type Checked = Outcome<i32, &'static str>;

        let pending = PendingOutcome::<i32, &'static str>::success(5).multiple((
            |o: Checked| o.filter(|v| *v > 0, |_| "not positive"),
            |o: Checked| o.filter(|v| *v < 3, |_| "too big"),
            |o: Checked| o.filter(|v| v % 2 == 0, |_| "not even"),
        ));

        assert_eq!(
            block_on(pending.into_outcome()),
            Outcome::Error(vec!["too big", "not even"])
        );
    }

    #[test]
    fn test_flatten_async_keeps_value() {
        let pending = PendingOutcome::<String, String>::success("name".to_string())
            .flatten_async(|s| async move { Outcome::<usize, String>::Value(s.len()) })
            .map_error(|e| e.to_uppercase());

        assert_eq!(block_on(pending.value()), Some("name".to_string()));
    }

    #[test]
    fn test_safe_cast_and_lift() {
        let pending = Outcome::<u8, String>::Value(1)
            .into_pending()
            .safe_cast::<u16, _>(|v| format!("{v} is not u16"));

        assert_eq!(block_on(pending.error()), Some("1 is not u16".to_string()));
    }

    #[test]
    fn test_taps_run_once_and_await_into_future() {
        let runs = counter();
        let tap_runs = Arc::clone(&runs);
        let pending = PendingOutcome::<i32, String>::success(1).on_value(move |_| {
            tap_runs.fetch_add(1, Ordering::SeqCst);
        });

        block_on(async {
            assert!(pending.has_value().await);
            assert!(!pending.has_error().await);
            assert_eq!(pending.clone().await, Outcome::Value(1));
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_map_error_async_touches_only_error_channel() {
        let failed = PendingOutcome::<i32, String>::failure("e".to_string())
            .map_error_async(|e| async move { e.len() });
        assert_eq!(block_on(failed.into_outcome()), Outcome::Error(1));

        let runs = counter();
        let step_runs = Arc::clone(&runs);
        let kept = PendingOutcome::<i32, String>::success(4).map_error_async(move |e| async move {
            step_runs.fetch_add(1, Ordering::SeqCst);
            e.len()
        });
        assert_eq!(block_on(kept.into_outcome()), Outcome::Value(4));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_map_error_and_or_else_skip_values() {
        let runs = counter();

        let step_runs = Arc::clone(&runs);
        let kept = PendingOutcome::<i32, String>::success(1).map_error(move |e| {
            step_runs.fetch_add(1, Ordering::SeqCst);
            e.len()
        });
        assert_eq!(block_on(kept.into_outcome()), Outcome::Value(1));

        let mapped = PendingOutcome::<i32, String>::failure("abc".to_string()).map_error(|e| e.len());
        assert_eq!(block_on(mapped.into_outcome()), Outcome::Error(3));

        let step_runs = Arc::clone(&runs);
        let untouched = PendingOutcome::<i32, String>::success(2).or_else(move |e| {
            step_runs.fetch_add(1, Ordering::SeqCst);
            Outcome::<i32, usize>::Error(e.len())
        });
        assert_eq!(block_on(untouched.into_outcome()), Outcome::Value(2));

        let recovered = PendingOutcome::<i32, String>::failure("x".to_string())
            .or_else(|_| Outcome::<i32, usize>::Value(0));
        assert_eq!(block_on(recovered.into_outcome()), Outcome::Value(0));

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_full_map_runs_only_active_step() {
        let value_runs = counter();
        let error_runs = counter();

        let (on_value, on_error) = (Arc::clone(&value_runs), Arc::clone(&error_runs));
        let mapped = PendingOutcome::<i32, String>::success(2).full_map(
            move |v| {
                on_value.fetch_add(1, Ordering::SeqCst);
                v + 1
            },
            move |e: String| {
                on_error.fetch_add(1, Ordering::SeqCst);
                e.len()
            },
        );
        assert_eq!(block_on(mapped.into_outcome()), Outcome::Value(3));

        let (on_value, on_error) = (Arc::clone(&value_runs), Arc::clone(&error_runs));
        let mapped = PendingOutcome::<i32, String>::failure("four".to_string()).full_map_async(
            move |v| async move {
                on_value.fetch_add(1, Ordering::SeqCst);
                v + 1
            },
            move |e: String| async move {
                on_error.fetch_add(1, Ordering::SeqCst);
                e.len()
            },
        );
        assert_eq!(block_on(mapped.into_outcome()), Outcome::Error(4));

        assert_eq!(value_runs.load(Ordering::SeqCst), 1);
        assert_eq!(error_runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_is_error_when_sync_and_async() {
        let runs = counter();

        let zero = PendingOutcome::<i32, String>::success(0)
            .is_error_when(|v| *v == 0, |_| "zero".to_string());
        assert_eq!(block_on(zero.into_outcome()), Outcome::Error("zero".to_string()));

        let failure_runs = Arc::clone(&runs);
        let kept = PendingOutcome::<i32, String>::success(5).is_error_when_async(
            |v| async move { v == 0 },
            move |_| {
                failure_runs.fetch_add(1, Ordering::SeqCst);
                "zero".to_string()
            },
        );
        assert_eq!(block_on(kept.into_outcome()), Outcome::Value(5));

        let predicate_runs = Arc::clone(&runs);
        let skipped = PendingOutcome::<i32, String>::failure("early".to_string()).is_error_when(
            move |_| {
                predicate_runs.fetch_add(1, Ordering::SeqCst);
                true
            },
            |_| "zero".to_string(),
        );
        assert_eq!(block_on(skipped.into_outcome()), Outcome::Error("early".to_string()));

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_flat_map_with_error_adapts_nested_failure() {
        let parsed = PendingOutcome::<String, String>::success("12x".to_string())
            .flat_map_with_error(|s| Outcome::from(s.parse::<i32>()), |e: ParseIntError| e.to_string());
        assert_eq!(
            block_on(parsed.into_outcome()),
            Outcome::Error("invalid digit found in string".to_string())
        );

        let parsed = PendingOutcome::<String, String>::success("12".to_string()).flat_map_with_error_async(
            |s| async move { Outcome::from(s.parse::<i32>()) },
            |e: ParseIntError| e.to_string(),
        );
        assert_eq!(block_on(parsed.into_outcome()), Outcome::Value(12));

        let runs = counter();
        let (step_runs, adapt_runs) = (Arc::clone(&runs), Arc::clone(&runs));
        let skipped = PendingOutcome::<String, String>::failure("early".to_string()).flat_map_with_error(
            move |_| {
                step_runs.fetch_add(1, Ordering::SeqCst);
                Outcome::<i32, u8>::Value(1)
            },
            move |e: u8| {
                adapt_runs.fetch_add(1, Ordering::SeqCst);
                e.to_string()
            },
        );
        assert_eq!(block_on(skipped.into_outcome()), Outcome::Error("early".to_string()));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_flat_map_combine_and_flatten() {
        let combined = PendingOutcome::<i32, String>::success(2)
            .flat_map_combine(|v| Outcome::<i32, String>::Value(v * 10), |v: i32, w: i32| v + w);
        assert_eq!(block_on(combined.into_outcome()), Outcome::Value(22));

        let rejected = PendingOutcome::<i32, String>::success(2).flat_map_combine(
            |_| Outcome::<i32, String>::Error("nested".to_string()),
            |v: i32, w: i32| v + w,
        );
        assert_eq!(block_on(rejected.into_outcome()), Outcome::Error("nested".to_string()));

        let non_negative = |v: &i32| {
            if *v >= 0 {
                Outcome::<(), String>::Value(())
            } else {
                Outcome::Error("negative".to_string())
            }
        };
        let kept = PendingOutcome::<i32, String>::success(3).flatten(non_negative);
        assert_eq!(block_on(kept.into_outcome()), Outcome::Value(3));
        let dropped = PendingOutcome::<i32, String>::success(-1).flatten(non_negative);
        assert_eq!(block_on(dropped.into_outcome()), Outcome::Error("negative".to_string()));

        let runs = counter();
        let step_runs = Arc::clone(&runs);
        let skipped = PendingOutcome::<i32, String>::failure("early".to_string()).flatten(move |_| {
            step_runs.fetch_add(1, Ordering::SeqCst);
            Outcome::<(), String>::Value(())
        });
        assert_eq!(block_on(skipped.into_outcome()), Outcome::Error("early".to_string()));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_join_by_custom_comparer_and_no_match() {
        let near = |a: &i32, b: &i32| (a - b).abs() <= 3;

        let joined = PendingOutcome::<i32, String>::success(10).join_by(
            PendingOutcome::success(13),
            |l| *l,
            |r| *r,
            |l, r| l + r,
            || "too far apart".to_string(),
            near,
        );
        assert_eq!(block_on(joined.into_outcome()), Outcome::Value(23));

        let result_runs = counter();
        let no_match_runs = counter();
        let (on_result, on_no_match) = (Arc::clone(&result_runs), Arc::clone(&no_match_runs));
        let joined = PendingOutcome::<i32, String>::success(1).join_by(
            PendingOutcome::success(9),
            |l| *l,
            |r| *r,
            move |l, r| {
                on_result.fetch_add(1, Ordering::SeqCst);
                l + r
            },
            move || {
                on_no_match.fetch_add(1, Ordering::SeqCst);
                "too far apart".to_string()
            },
            near,
        );
        assert_eq!(block_on(joined.into_outcome()), Outcome::Error("too far apart".to_string()));
        assert_eq!(result_runs.load(Ordering::SeqCst), 0);
        assert_eq!(no_match_runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cast_and_full_cast_pass_through() {
        let same = PendingOutcome::<i32, String>::success(7).cast::<i32>();
        assert_eq!(block_on(same.into_outcome()), Outcome::Value(7));

        let kept = PendingOutcome::<i32, String>::failure("kept".to_string()).cast::<u8>();
        assert_eq!(block_on(kept.into_outcome()), Outcome::Error("kept".to_string()));

        let both = PendingOutcome::<i32, String>::failure("bad".to_string()).full_cast::<i32, String>();
        assert_eq!(block_on(both.into_outcome()), Outcome::Error("bad".to_string()));
    }

    #[test]
    fn test_failed_cast_poisons_shared_resolution() {
        let pending = PendingOutcome::<i32, String>::success(5).cast::<u8>();
        let other = pending.clone();

        let first = catch_unwind(AssertUnwindSafe(|| block_on(pending.has_value())));
        let payload = first.expect_err("casting i32 to u8 must panic");
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("cannot cast payload of type `i32` to `u8`")
        );

        let second = catch_unwind(AssertUnwindSafe(|| block_on(other.has_value())));
        assert!(second.is_err());
    }

    #[test]
    fn test_on_error_runs_once_and_skips_values() {
        let runs = counter();

        let tap_runs = Arc::clone(&runs);
        let failed = PendingOutcome::<i32, String>::failure("boom".to_string()).on_error(move |e| {
            assert_eq!(e, "boom");
            tap_runs.fetch_add(1, Ordering::SeqCst);
        });
        block_on(async {
            assert!(failed.has_error().await);
            assert!(failed.has_error().await);
            assert_eq!(failed.error().await, Some("boom".to_string()));
        });

        let tap_runs = Arc::clone(&runs);
        let kept = PendingOutcome::<i32, String>::success(1).on_error(move |_| {
            tap_runs.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(block_on(kept.into_outcome()), Outcome::Value(1));

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
