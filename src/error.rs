//! # Errors
//!
//! Failures a task action can report back to the scheduler. None of them
//! stop the system: the scheduler logs the error and keeps the task on
//! its normal cadence.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A digital pin read or write failed.
    Pin,
    /// The text sink rejected a report.
    Sink,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin => f.write_str("digital pin access failed"),
            Error::Sink => f.write_str("text sink write failed"),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::Sink
    }
}

/// Maps any `embedded-hal` pin error onto [`Error::Pin`].
pub(crate) fn pin<E>(_: E) -> Error {
    Error::Pin
}
