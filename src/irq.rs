//! Interrupt vector and deferred dispatch signalling
//!
//! Both chips expose 40 interrupt sources spread over five enable registers
//! and five status registers. Sources are numbered register-major, MSB first:
//! index 0 is bit 7 of the first register, index 39 is bit 0 of the fifth.
//! Interpreted as one 40-bit integer built from the registers in order,
//! index `i` is bit `39 - i`.
//!
//! The IRQ pin is active low. Bus traffic must not happen in interrupt
//! context, so the pin's edge handler only marks an [`IrqSignal`] pending and
//! the driver's `service_irq` performs the actual dispatch later.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::InputPin;

use crate::registers::{AXP20X_IRQ_BANK_LEN, AXP20X_IRQ_COUNT};

/// Location of an IRQ index in a bank: `(register offset, bit)`.
///
/// Returns `None` for indices outside `0..40`.
#[inline]
pub const fn irq_position(index: u8) -> Option<(usize, u8)> {
    if (index as usize) < AXP20X_IRQ_COUNT {
        Some(((index / 8) as usize, 7 - (index % 8)))
    } else {
        None
    }
}

/// A 40-bit set of interrupt sources, kept in register order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqFlags {
    bytes: [u8; AXP20X_IRQ_BANK_LEN],
}

impl IrqFlags {
    pub const fn new() -> Self {
        Self {
            bytes: [0; AXP20X_IRQ_BANK_LEN],
        }
    }

    /// Build from register contents, first register first.
    pub const fn from_bytes(bytes: [u8; AXP20X_IRQ_BANK_LEN]) -> Self {
        Self { bytes }
    }

    pub const fn as_bytes(&self) -> [u8; AXP20X_IRQ_BANK_LEN] {
        self.bytes
    }

    /// The registers concatenated MSB first into a 40-bit value.
    pub const fn as_u64(&self) -> u64 {
        ((self.bytes[0] as u64) << 32)
            | ((self.bytes[1] as u64) << 24)
            | ((self.bytes[2] as u64) << 16)
            | ((self.bytes[3] as u64) << 8)
            | (self.bytes[4] as u64)
    }

    /// Inverse of [`as_u64`](Self::as_u64). Bits above 39 are dropped.
    pub const fn from_u64(val: u64) -> Self {
        Self {
            bytes: [
                ((val >> 32) & 0xFF) as u8,
                ((val >> 24) & 0xFF) as u8,
                ((val >> 16) & 0xFF) as u8,
                ((val >> 8) & 0xFF) as u8,
                (val & 0xFF) as u8,
            ],
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.as_u64() == 0
    }

    /// `true` if source `index` is in the set. Out-of-range indices are never set.
    pub fn contains(&self, index: impl Into<u8>) -> bool {
        match irq_position(index.into()) {
            Some((offset, bit)) => self.bytes[offset] & (1 << bit) != 0,
            None => false,
        }
    }

    /// Add source `index`. Out-of-range indices are ignored.
    pub fn insert(&mut self, index: impl Into<u8>) {
        if let Some((offset, bit)) = irq_position(index.into()) {
            self.bytes[offset] |= 1 << bit;
        }
    }

    /// Remove source `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: impl Into<u8>) {
        if let Some((offset, bit)) = irq_position(index.into()) {
            self.bytes[offset] &= !(1 << bit);
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, index: impl Into<u8>) -> Self {
        self.insert(index);
        self
    }

    /// Indices in the set, ascending.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..AXP20X_IRQ_COUNT as u8).filter(move |&i| self.contains(i))
    }
}

/// Pending-dispatch flag shared between the IRQ pin handler and the task
/// that owns the driver.
///
/// ```text
/// IDLE --edge / line low at start--> PENDING --service_irq--> DISPATCHING --> IDLE
/// ```
///
/// An edge that arrives while a dispatch is running sets the flag again, so
/// the next `service_irq` does one more pass. Several edges before a pass are
/// coalesced into one.
#[derive(Debug, Default)]
pub struct IrqSignal {
    pending: AtomicBool,
}

impl IrqSignal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Call from the falling-edge interrupt of the PMIC IRQ pin.
    #[inline]
    pub fn on_falling_edge(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Request a dispatch pass from thread context.
    pub fn schedule(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Schedule a pass if the line is already asserted, covering interrupts
    /// raised before the edge handler was installed.
    pub fn arm<P: InputPin>(&self, pin: &mut P) -> Result<bool, P::Error> {
        let asserted = pin.is_low()?;
        if asserted {
            self.schedule();
        }
        Ok(asserted)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether a pass was pending.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}
