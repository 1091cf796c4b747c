//! # Host Simulation Doubles
//!
//! Pin doubles backed by a borrowed `Cell<bool>`, for driving the tasks
//! on a host without hardware. A `true` level is electrically HIGH; the
//! button is active-low, so a released button reads `true`.
//!
//! Together with [`ManualClock`](crate::time::ManualClock) and any
//! `core::fmt::Write` sink, these run the complete application in unit
//! tests, integration tests and desktop simulations.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// A digital line shared between the code under test and the test body.
#[derive(Debug, Clone, Copy)]
pub struct SimPin<'a> {
    level: &'a Cell<bool>,
}

impl<'a> SimPin<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level }
    }
}

impl ErrorType for SimPin<'_> {
    type Error = Infallible;
}

impl InputPin for SimPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

impl OutputPin for SimPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        Ok(())
    }
}
