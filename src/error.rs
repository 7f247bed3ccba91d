//! Error types for AXP20x operations
//!
//! This module defines the error types that can occur when using the AXP202/AXP192 driver.

/// Error types for AXP20x operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// The IC type register held an identifier that is neither AXP202 nor AXP192
    UnsupportedChip(u8),
    /// Requested voltage is not one of the discrete values the register accepts
    InvalidVoltage,
    /// Requested current is not one of the discrete values the register accepts
    InvalidCurrent,
    /// The detected chip variant does not have this feature
    Unsupported,
    /// Interrupt line could not be sampled
    Pin,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::I2c(error)
    }
}
