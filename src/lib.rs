#![no_std]
//! # AXP202 / AXP192 Power Management IC Driver
//!
//! Register-level driver for the X-Powers AXP202 and AXP192 PMICs. The chip
//! is identified once at construction and every operation afterwards goes
//! through the register layout of the detected variant. It covers:
//! - Power output switching and output voltage set-points (DC1-3, LDO2-4, EXTEN)
//! - ADC channel control and readings (ACIN, VBUS, battery, APS, TS, GPIO, die temperature)
//! - Battery charging control and charge LED
//! - Power key timings and shutdown
//! - The 40-source interrupt vector with a per-source handler table
//!
//! ## Example
//!
//! ```no_run
//! use axp20x::{Axp20x, Error, Irq, PowerChannel};
//! # use embedded_hal::i2c::I2c;
//! # fn example<I: I2c>(i2c: I) -> Result<(), Error<I::Error>> {
//! let mut pmic = Axp20x::new(i2c)?;
//!
//! // DC3 at 3.3V
//! pmic.set_dc3_voltage(3300)?;
//! pmic.power_enable(PowerChannel::Dcdc3)?;
//!
//! // Get told when the power key is pressed
//! fn on_short_press<I: I2c>(pmic: &mut Axp20x<I>) {
//!     let _ = pmic.get_battery_voltage();
//! }
//! pmic.set_irq(Irq::PekShortPress, Some(on_short_press))?;
//!
//! // Later, from the main loop once the IRQ line went low
//! pmic.dispatch_irq()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Deferred dispatch
//!
//! The I2C bus must not be touched from interrupt context. Let the pin
//! interrupt mark an [`IrqSignal`] and service it from the owning task:
//!
//! ```no_run
//! # use axp20x::{Axp20x, IrqSignal};
//! # use embedded_hal::i2c::I2c;
//! static PMU_IRQ: IrqSignal = IrqSignal::new();
//!
//! // In the GPIO falling-edge handler
//! PMU_IRQ.on_falling_edge();
//!
//! # fn poll<I: I2c>(pmic: &mut Axp20x<I>) -> Result<(), axp20x::Error<I::Error>> {
//! // In the task owning the driver
//! pmic.service_irq(&PMU_IRQ)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Async Support
//!
//! When the `async` feature is enabled, the crate provides `AsyncAxp20x`
//! with the same API but async/await support, plus `wait_irq` which awaits
//! the IRQ pin before dispatching:
//!
//! ```no_run
//! # #[cfg(feature = "async")]
//! # async fn example<I, P>(i2c: I, mut irq_pin: P) -> Result<(), axp20x::Error<I::Error>>
//! # where I: embedded_hal_async::i2c::I2c, P: embedded_hal_async::digital::Wait {
//! use axp20x::AsyncAxp20x;
//!
//! let mut pmic = AsyncAxp20x::new(i2c).await?;
//! pmic.set_dc2_voltage(1250).await?;
//! loop {
//!     pmic.wait_irq(&mut irq_pin).await?;
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! Enable either the `log` or the `defmt` feature to get driver diagnostics
//! (chip detection, clamped or rejected set-points, IRQ dispatch).

// MUST be the first module
mod fmt;

pub mod codec;
mod driver;
#[cfg(feature = "async")]
mod driver_async;
mod error;
pub mod irq;
pub mod registers;
mod types;
pub mod variant;

// Re-export main types
pub use driver::{Axp20x, IrqHandler};
#[cfg(feature = "async")]
pub use driver_async::{AsyncAxp20x, AsyncIrqHandler};
pub use error::Error;
pub use irq::{IrqFlags, IrqSignal};
pub use registers::*;
pub use types::*;
pub use variant::ChipVariant;
