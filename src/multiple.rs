//! Fail-slow validation over a single outcome.
//!
//! [`Outcome::multiple`] runs every validation step against a clone of the original
//! outcome and collects every failure in declaration order. Unlike a
//! [`flat_map`](Outcome::flat_map) chain, it never stops at the first failure.
//!
//! Steps are supplied through the [`Validations`] seam: a tuple of up to eight
//! heterogenous closures, or an array or `Vec` of steps sharing one type.
//!
//! ```
//! use outcome::Outcome;
//!
//! type Age = Outcome<u32, &'static str>;
//!
//! let age: Age = Outcome::Value(130);
//! let checked = age.multiple((
//!     |o: Age| o.filter(|a| *a >= 18, |_| "minor"),
//!     |o: Age| o.filter(|a| *a < 120, |_| "implausible"),
//!     |o: Age| o.filter(|a| a % 10 != 0, |_| "round number"),
//! ));
//!
//! assert_eq!(checked, Outcome::Error(vec!["implausible", "round number"]));
//! ```

use crate::Outcome;

/// A set of validation steps applied to one candidate outcome.
pub trait Validations<T, E> {
    /// Applies every step to a clone of `candidate` and returns the failures in order.
    fn collect_failures(self, candidate: &Outcome<T, E>) -> Vec<E>;
}

impl<T, E, U, F> Validations<T, E> for Vec<F>
where
    T: Clone,
    E: Clone,
    F: FnOnce(Outcome<T, E>) -> Outcome<U, E>,
{
    fn collect_failures(self, candidate: &Outcome<T, E>) -> Vec<E> {
        self.into_iter()
            .filter_map(|step| step(candidate.clone()).into_error())
            .collect()
    }
}

impl<const N: usize, T, E, U, F> Validations<T, E> for [F; N]
where
    T: Clone,
    E: Clone,
    F: FnOnce(Outcome<T, E>) -> Outcome<U, E>,
{
    fn collect_failures(self, candidate: &Outcome<T, E>) -> Vec<E> {
        self.into_iter()
            .filter_map(|step| step(candidate.clone()).into_error())
            .collect()
    }
}

macro_rules! impl_validations_for_tuple {
    ($(($F:ident, $U:ident, $step:ident)),+) => {
        impl<T, E, $($F, $U),+> Validations<T, E> for ($($F,)+)
        where
            T: Clone,
            E: Clone,
            $($F: FnOnce(Outcome<T, E>) -> Outcome<$U, E>,)+
        {
            fn collect_failures(self, candidate: &Outcome<T, E>) -> Vec<E> {
                let ($($step,)+) = self;
                let mut failures = Vec::new();
                $(
                    if let Outcome::Error(e) = $step(candidate.clone()) {
                        failures.push(e);
                    }
                )+
                failures
            }
        }
    };
}

impl_validations_for_tuple!((F1, U1, f1));
impl_validations_for_tuple!((F1, U1, f1), (F2, U2, f2));
impl_validations_for_tuple!((F1, U1, f1), (F2, U2, f2), (F3, U3, f3));
impl_validations_for_tuple!((F1, U1, f1), (F2, U2, f2), (F3, U3, f3), (F4, U4, f4));
impl_validations_for_tuple!(
    (F1, U1, f1),
    (F2, U2, f2),
    (F3, U3, f3),
    (F4, U4, f4),
    (F5, U5, f5)
);
impl_validations_for_tuple!(
    (F1, U1, f1),
    (F2, U2, f2),
    (F3, U3, f3),
    (F4, U4, f4),
    (F5, U5, f5),
    (F6, U6, f6)
);
impl_validations_for_tuple!(
    (F1, U1, f1),
    (F2, U2, f2),
    (F3, U3, f3),
    (F4, U4, f4),
    (F5, U5, f5),
    (F6, U6, f6),
    (F7, U7, f7)
);
impl_validations_for_tuple!(
    (F1, U1, f1),
    (F2, U2, f2),
    (F3, U3, f3),
    (F4, U4, f4),
    (F5, U5, f5),
    (F6, U6, f6),
    (F7, U7, f7),
    (F8, U8, f8)
);

impl<T: Clone, E: Clone> Outcome<T, E> {
    /// Runs every validation and reports all of their failures.
    ///
    /// Each step receives a clone of this outcome, never the result of a previous step.
    /// With no failures the original value is kept. An error-state receiver whose steps
    /// all succeed still fails, with its own failure as the only entry.
    pub fn multiple<V>(self, validations: V) -> Outcome<T, Vec<E>>
    where
        V: Validations<T, E>,
    {
        let failures = validations.collect_failures(&self);
        if failures.is_empty() {
            self.map_error(|e| vec![e])
        } else {
            Outcome::Error(failures)
        }
    }
}
