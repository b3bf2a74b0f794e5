//! Time representations for the simulation clock.
//!
//! Every boundary comparison the clock makes is phrased against an absolute
//! tolerance, [`TimeScale::epsilon`], so that repeated additions of fractional
//! step sizes never miss a sampling point or an event.

mod period;

use std::{
    fmt::Debug,
    ops::{Add, Div, Mul, Sub},
};

use uom::si::{f64::Time, time::second};

pub use period::{Period, PeriodError};

/// A type that can represent simulation time.
///
/// Implemented for `f64` (seconds by convention) and for
/// [`uom::si::f64::Time`]. Both use an epsilon of `1e-8` seconds.
pub trait TimeScale:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + 'static
{
    /// The origin of simulation time.
    fn zero() -> Self;

    /// Absolute tolerance for every time-boundary comparison.
    fn epsilon() -> Self;

    /// Constructs a time value from a number of seconds.
    fn from_seconds(seconds: f64) -> Self;

    /// Returns the value in seconds.
    ///
    /// Integrators scale derivatives by this magnitude.
    fn seconds(self) -> f64;

    /// Returns the absolute value.
    #[must_use]
    fn abs(self) -> Self {
        if self < Self::zero() {
            Self::zero() - self
        } else {
            self
        }
    }

    /// Returns the first multiple of `period` strictly after `self`.
    ///
    /// A value within epsilon below a multiple counts as lying on it, so the
    /// result is always the multiple after the one `self` rounds to:
    ///
    /// ```text
    /// floor((t + epsilon) / period + 1) * period
    /// ```
    #[must_use]
    fn next_multiple(self, period: Self) -> Self {
        let count = ((self + Self::epsilon()).seconds() / period.seconds() + 1.0).floor();
        period * count
    }
}

impl TimeScale for f64 {
    fn zero() -> Self {
        0.0
    }

    fn epsilon() -> Self {
        1.0e-8
    }

    fn from_seconds(seconds: f64) -> Self {
        seconds
    }

    fn seconds(self) -> f64 {
        self
    }
}

impl TimeScale for Time {
    fn zero() -> Self {
        Time::new::<second>(0.0)
    }

    fn epsilon() -> Self {
        Time::new::<second>(1.0e-8)
    }

    fn from_seconds(seconds: f64) -> Self {
        Time::new::<second>(seconds)
    }

    fn seconds(self) -> f64 {
        self.get::<second>()
    }
}
