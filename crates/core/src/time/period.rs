use std::{fmt, ops::Deref};

use thiserror::Error;
use uom::{
    Conversion,
    si::{f64::Time, time},
};

use super::TimeScale;

/// A strictly positive span of simulation time.
///
/// `Period` is used wherever the engine needs a length of time that must be
/// greater than zero: a stage's base integration period and the run horizon.
///
/// # Construction
///
/// ```
/// use cadence_core::Period;
///
/// let dt = Period::new(1.0e-4_f64)?;
/// assert_eq!(dt.get(), 1.0e-4);
/// # Ok::<(), cadence_core::PeriodError>(())
/// ```
///
/// With a unit-safe time, a period can also be built from a [`uom`] unit:
///
/// ```
/// use cadence_core::Period;
/// use uom::si::time::minute;
///
/// let dt = Period::from_unit::<minute>(2.0)?;
/// assert_eq!(dt.to_string(), "120 s");
/// # Ok::<(), cadence_core::PeriodError>(())
/// ```
///
/// # Enforcement
///
/// Zero, negative, and NaN values are rejected with
/// [`PeriodError::NotPositive`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Period<T>(T);

/// Error type returned when constructing an invalid [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PeriodError {
    #[error("period must be greater than zero, got {0} s")]
    NotPositive(f64),
}

impl<T: TimeScale> Period<T> {
    /// Constructs a `Period` from a time value.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::NotPositive`] if `value` is not strictly positive.
    pub fn new(value: T) -> Result<Self, PeriodError> {
        let seconds = value.seconds();
        if seconds > 0.0 {
            Ok(Self(value))
        } else {
            Err(PeriodError::NotPositive(seconds))
        }
    }

    /// Returns the underlying time value.
    #[must_use]
    pub fn get(self) -> T {
        self.0
    }

    /// Consumes the `Period` and returns the underlying time value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl Period<Time> {
    /// Constructs a period from a numeric value and a [`uom::si::time`] unit.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::NotPositive`] if `value` is zero or negative.
    pub fn from_unit<U>(value: f64) -> Result<Self, PeriodError>
    where
        U: time::Unit + Conversion<f64, T = f64>,
    {
        Self::new(Time::new::<U>(value))
    }
}

impl TryFrom<f64> for Period<f64> {
    type Error = PeriodError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<Time> for Period<Time> {
    type Error = PeriodError;
    fn try_from(value: Time) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> Deref for Period<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: TimeScale> fmt::Display for Period<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.seconds();
        write!(f, "{s} s")
    }
}
