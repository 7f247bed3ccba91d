//! Register-file fakes shared by the integration tests.
#![allow(dead_code)]

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use embedded_hal::{
    digital::{self, InputPin},
    i2c::{self, ErrorKind, NoAcknowledgeSource, Operation},
};

pub const ADDR: u8 = 0x35;

const AXP202_STATUS_REGS: [u8; 5] = [0x48, 0x49, 0x4A, 0x4B, 0x4C];
const AXP192_STATUS_REGS: [u8; 5] = [0x44, 0x45, 0x46, 0x47, 0x4D];

#[derive(Debug)]
struct State {
    regs: [u8; 256],
    writes: Vec<(u8, u8)>,
    write_one_to_clear: Vec<u8>,
    fail_in: Option<usize>,
}

impl State {
    fn store(&mut self, reg: u8, value: u8) {
        self.writes.push((reg, value));
        if self.write_one_to_clear.contains(&reg) {
            self.regs[reg as usize] &= !value;
        } else {
            self.regs[reg as usize] = value;
        }
    }
}

/// A PMIC register file behind an I2C bus.
///
/// The first byte of a write sets the register pointer, further bytes are
/// stored with auto-increment, and reads continue from the pointer. IRQ
/// status registers are write-1-to-clear like on the real parts. Clones share
/// the same register file so tests can inspect it after handing the bus over.
#[derive(Debug, Clone)]
pub struct FakeBus {
    addr: u8,
    state: Rc<RefCell<State>>,
}

impl FakeBus {
    pub fn with_chip_id(chip_id: u8, write_one_to_clear: &[u8]) -> Self {
        let mut regs = [0u8; 256];
        regs[0x03] = chip_id;
        Self {
            addr: ADDR,
            state: Rc::new(RefCell::new(State {
                regs,
                writes: Vec::new(),
                write_one_to_clear: write_one_to_clear.to_vec(),
                fail_in: None,
            })),
        }
    }

    pub fn axp202() -> Self {
        Self::with_chip_id(0x41, &AXP202_STATUS_REGS)
    }

    pub fn axp192() -> Self {
        Self::with_chip_id(0x03, &AXP192_STATUS_REGS)
    }

    pub fn reg(&self, reg: u8) -> u8 {
        self.state.borrow().regs[reg as usize]
    }

    /// Preload a register without recording a write.
    pub fn set_reg(&self, reg: u8, value: u8) {
        self.state.borrow_mut().regs[reg as usize] = value;
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.state.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.state.borrow_mut().writes.clear();
    }

    /// Fail one transaction, `n` transactions from now (0 is the next one).
    /// The failing transaction neither reads nor stores anything.
    pub fn fail_transaction(&self, n: usize) {
        self.state.borrow_mut().fail_in = Some(n);
    }

    fn run(&self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if address != self.addr {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let mut state = self.state.borrow_mut();
        let fail_in = state.fail_in;
        match fail_in {
            Some(0) => {
                state.fail_in = None;
                return Err(ErrorKind::Bus);
            }
            Some(n) => state.fail_in = Some(n - 1),
            None => {}
        }
        let mut pointer = 0u8;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    pointer = reg;
                    for &byte in data {
                        state.store(pointer, byte);
                        pointer = pointer.wrapping_add(1);
                    }
                }
                Operation::Read(buf) => {
                    for slot in buf.iter_mut() {
                        *slot = state.regs[pointer as usize];
                        pointer = pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

impl i2c::ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl i2c::I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(address, operations)
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for FakeBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(address, operations)
    }
}

/// A PMIC IRQ line held at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct FakeIrqPin {
    pub low: bool,
}

impl digital::ErrorType for FakeIrqPin {
    type Error = Infallible;
}

impl InputPin for FakeIrqPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.low)
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::digital::Wait for FakeIrqPin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// An IRQ line whose GPIO driver always fails.
#[derive(Debug, Clone, Copy)]
pub struct BrokenPin;

impl digital::ErrorType for BrokenPin {
    type Error = digital::ErrorKind;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::digital::Wait for BrokenPin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}
