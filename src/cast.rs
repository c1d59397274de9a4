//! Runtime reinterpretation of outcome payloads.
//!
//! A cast succeeds when the payload already has the target type, or when the payload
//! is a type-erased box (`Box<dyn Any>` or `Box<dyn Any + Send>`) whose runtime type
//! is the target. Anything else is an incompatible cast:
//!
//! - [`Outcome::cast`] and [`Outcome::full_cast`] panic, since asking for an impossible
//!   cast is a programming error
//! - [`Outcome::try_cast`] returns a [`CastError`] instead
//! - [`Outcome::safe_cast`] turns the mismatch into a domain failure chosen by the caller
//!
//! ```
//! use std::any::Any;
//! use outcome::Outcome;
//!
//! let erased: Outcome<Box<dyn Any>, String> = Outcome::Value(Box::new(7_u8));
//! assert_eq!(erased.cast::<u8>(), Outcome::Value(7));
//! ```

use std::any::{Any, type_name};

use tracing::debug;

use crate::Outcome;

/// A payload could not be reinterpreted as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot cast payload of type `{from}` to `{to}`")]
pub struct CastError {
    from: &'static str,
    to: &'static str,
}

impl CastError {
    fn new<T, R>() -> Self {
        CastError {
            from: type_name::<T>(),
            to: type_name::<R>(),
        }
    }

    /// Name of the payload's static type.
    pub fn from_type(&self) -> &'static str {
        self.from
    }

    /// Name of the requested type.
    pub fn to_type(&self) -> &'static str {
        self.to
    }
}

fn take_erased<R: Any>(slot: &mut Option<Box<dyn Any>>) -> Option<R> {
    match slot.take()?.downcast::<R>() {
        Ok(r) => Some(*r),
        Err(original) => {
            *slot = Some(original);
            None
        }
    }
}

fn take_erased_send<R: Any>(slot: &mut Option<Box<dyn Any + Send>>) -> Option<R> {
    match slot.take()?.downcast::<R>() {
        Ok(r) => Some(*r),
        Err(original) => {
            *slot = Some(original);
            None
        }
    }
}

/// Moves `value` into `R`, handing it back untouched when the types are incompatible.
fn reinterpret<T: Any, R: Any>(value: T) -> Result<R, T> {
    let mut slot = Some(value);
    let any: &mut dyn Any = &mut slot;

    let converted = if let Some(same) = any.downcast_mut::<Option<R>>() {
        same.take()
    } else if let Some(erased) = any.downcast_mut::<Option<Box<dyn Any>>>() {
        take_erased(erased)
    } else if let Some(erased) = any.downcast_mut::<Option<Box<dyn Any + Send>>>() {
        take_erased_send(erased)
    } else {
        None
    };

    match converted {
        Some(r) => Ok(r),
        None => {
            let Some(value) = slot else {
                unreachable!("payload is only taken by a successful cast")
            };
            Err(value)
        }
    }
}

impl<T: Any, E> Outcome<T, E> {
    /// Reinterprets the value payload as `R`, reporting an incompatible payload.
    ///
    /// Error-state outcomes pass through without inspection.
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, &str> = Outcome::Value(1);
    /// assert!(x.try_cast::<String>().is_err());
    /// ```
    pub fn try_cast<R: Any>(self) -> Result<Outcome<R, E>, CastError> {
        match self {
            Outcome::Value(t) => reinterpret::<T, R>(t)
                .map(Outcome::Value)
                .map_err(|_| CastError::new::<T, R>()),
            Outcome::Error(e) => Ok(Outcome::Error(e)),
        }
    }

    /// Reinterprets the value payload as `R`.
    ///
    /// # Panics
    ///
    /// Panics with a [`CastError`] message if the payload is not an `R`.
    #[track_caller]
    pub fn cast<R: Any>(self) -> Outcome<R, E> {
        match self.try_cast::<R>() {
            Ok(cast) => cast,
            Err(err) => {
                debug!(from = err.from_type(), to = err.to_type(), "invalid outcome cast");
                panic!("{err}")
            }
        }
    }

    /// Reinterprets the value payload as `R`, failing with `failure(payload)` on a mismatch.
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, String> = Outcome::Value(1);
    /// let cast = x.safe_cast::<u64, _>(|v| format!("{v} is not a u64"));
    /// assert_eq!(cast, Outcome::Error("1 is not a u64".to_string()));
    /// ```
    pub fn safe_cast<R, F>(self, failure: F) -> Outcome<R, E>
    where
        R: Any,
        F: FnOnce(T) -> E,
    {
        match self {
            Outcome::Value(t) => match reinterpret::<T, R>(t) {
                Ok(r) => Outcome::Value(r),
                Err(t) => {
                    debug!(
                        from = type_name::<T>(),
                        to = type_name::<R>(),
                        "outcome cast mismatch mapped to failure"
                    );
                    Outcome::Error(failure(t))
                }
            },
            Outcome::Error(e) => Outcome::Error(e),
        }
    }
}

impl<T: Any, E: Any> Outcome<T, E> {
    /// Reinterprets whichever channel is active, reporting an incompatible payload.
    pub fn try_full_cast<R: Any, R2: Any>(self) -> Result<Outcome<R, R2>, CastError> {
        match self {
            Outcome::Value(t) => reinterpret::<T, R>(t)
                .map(Outcome::Value)
                .map_err(|_| CastError::new::<T, R>()),
            Outcome::Error(e) => reinterpret::<E, R2>(e)
                .map(Outcome::Error)
                .map_err(|_| CastError::new::<E, R2>()),
        }
    }

    /// Reinterprets the value channel as `R` and the failure channel as `R2`.
    ///
    /// # Panics
    ///
    /// Panics with a [`CastError`] message if the active payload is incompatible.
    #[track_caller]
    pub fn full_cast<R: Any, R2: Any>(self) -> Outcome<R, R2> {
        match self.try_full_cast::<R, R2>() {
            Ok(cast) => cast,
            Err(err) => {
                debug!(from = err.from_type(), to = err.to_type(), "invalid outcome cast");
                panic!("{err}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::panic::catch_unwind;

    #[test]
    fn test_cast_identity_round_trip() {
        let x: Outcome<String, i32> = Outcome::Value("same".to_string());
        assert_eq!(x.cast::<String>(), Outcome::Value("same".to_string()));
    }

    #[test]
    fn test_cast_unboxes_erased_payload() {
        let x: Outcome<Box<dyn Any>, &str> = Outcome::Value(Box::new(42_i64));
        assert_eq!(x.cast::<i64>(), Outcome::Value(42));

        let y: Outcome<Box<dyn Any + Send>, &str> = Outcome::Value(Box::new("text"));
        assert_eq!(y.cast::<&str>(), Outcome::Value("text"));
    }

    #[test]
    fn test_cast_skips_error_channel() {
        let x: Outcome<i32, &str> = Outcome::Error("kept");
        assert_eq!(x.cast::<String>(), Outcome::Error("kept"));
    }

    #[test]
    #[should_panic(expected = "cannot cast payload of type `i32` to `alloc::string::String`")]
    fn test_cast_panics_on_incompatible_payload() {
        let x: Outcome<i32, &str> = Outcome::Value(5);
        let _ = x.cast::<String>();
    }

    #[test]
    fn test_failed_cast_leaves_original_untouched() {
        let x: Outcome<i32, &str> = Outcome::Value(5);
        let attempt = catch_unwind(|| x.cast::<u8>());

        assert!(attempt.is_err());
        assert_eq!(x, Outcome::Value(5));
    }

    #[test]
    fn test_try_cast_reports_types() {
        let x: Outcome<Box<dyn Any>, &str> = Outcome::Value(Box::new(1_u16));
        let err = x.try_cast::<u32>().unwrap_err();

        assert_eq!(err.from_type(), type_name::<Box<dyn Any>>());
        assert_eq!(err.to_type(), "u32");
    }

    #[test]
    fn test_safe_cast_hands_payload_to_failure() {
        let x: Outcome<Box<dyn Any>, String> = Outcome::Value(Box::new(3.5_f64));
        let cast = x.safe_cast::<i32, _>(|payload| {
            format!("not an int: {}", payload.downcast_ref::<f64>().copied().unwrap_or_default())
        });
        assert_eq!(cast, Outcome::Error("not an int: 3.5".to_string()));

        let y: Outcome<Box<dyn Any>, String> = Outcome::Value(Box::new(3_i32));
        assert_eq!(y.safe_cast::<i32, _>(|_| unreachable!()), Outcome::Value(3));
    }

    #[test]
    fn test_full_cast_casts_active_channel() {
        let x: Outcome<Box<dyn Any>, Box<dyn Any>> = Outcome::Error(Box::new("bad"));
        assert_eq!(x.full_cast::<i32, &str>(), Outcome::Error("bad"));

        let y: Outcome<Box<dyn Any>, Box<dyn Any>> = Outcome::Value(Box::new(8_i32));
        assert_eq!(y.full_cast::<i32, &str>(), Outcome::Value(8));

        let z: Outcome<i32, String> = Outcome::Error("wrong".to_string());
        assert!(z.try_full_cast::<i32, u8>().is_err());
    }

    proptest! {
        #[test]
        fn prop_cast_round_trip(v in any::<i64>(), text in "[a-z]{0,12}") {
            let erased: Outcome<Box<dyn Any>, String> = Outcome::Value(Box::new(v));
            prop_assert_eq!(erased.cast::<i64>(), Outcome::Value(v));

            let sendable: Outcome<Box<dyn Any + Send>, String> = Outcome::Value(Box::new(text.clone()));
            prop_assert_eq!(sendable.cast::<String>(), Outcome::Value(text.clone()));

            let same: Outcome<String, i64> = Outcome::Value(text.clone());
            prop_assert_eq!(same.cast::<String>(), Outcome::Value(text));
        }

        #[test]
        fn prop_mismatch_keeps_payload_available(v in any::<i64>()) {
            let x: Outcome<i64, String> = Outcome::Value(v);
            let err = x.clone().try_cast::<u8>().unwrap_err();
            prop_assert_eq!(err.to_type(), "u8");

            let recovered = x.safe_cast::<u8, _>(|payload| format!("kept {payload}"));
            prop_assert_eq!(recovered, Outcome::Error(format!("kept {v}")));
        }

        #[test]
        fn prop_cast_ignores_error_channel(e in "[a-z]{1,8}") {
            let x: Outcome<i64, String> = Outcome::Error(e.clone());
            prop_assert_eq!(x.cast::<u8>(), Outcome::Error(e));
        }
    }
}
