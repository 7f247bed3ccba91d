//! Async AXP202/AXP192 PMIC driver implementation

use crate::{
    codec::{self, ScaledField},
    error::Error,
    irq::{irq_position, IrqFlags, IrqSignal},
    registers::*,
    types::*,
    variant::{adc_channel, ChipConfig, ChipVariant, RegisterBit},
};
use embedded_hal_async::{digital::Wait, i2c::I2c as AsyncI2c};

/// Interrupt callback, called from [`AsyncAxp20x::dispatch_irq`] with the driver itself.
///
/// Handlers are plain functions and cannot await. Record what happened and do
/// any bus work after `dispatch_irq` returns.
pub type AsyncIrqHandler<I> = fn(&mut AsyncAxp20x<I>);

/// Async AXP202/AXP192 PMIC driver
///
/// Mirrors [`Axp20x`](crate::Axp20x) over `embedded-hal-async` I2C and adds
/// [`wait_irq`](Self::wait_irq), which awaits the IRQ line instead of relying
/// on an interrupt handler.
pub struct AsyncAxp20x<I> {
    i2c: I,
    addr: u8,
    variant: ChipVariant,
    config: &'static ChipConfig,
    int_register: [u8; AXP20X_IRQ_BANK_LEN],
    handlers: [Option<AsyncIrqHandler<I>>; AXP20X_IRQ_COUNT],
}

impl<I> AsyncAxp20x<I>
where
    I: AsyncI2c,
{
    /// Create a driver and identify the chip
    ///
    /// Reads the IC type register once. Returns `Error::UnsupportedChip` if it
    /// holds neither the AXP202 nor the AXP192 identifier.
    ///
    /// # Example
    /// ```no_run
    /// # use axp20x::AsyncAxp20x;
    /// # async fn example<I: embedded_hal_async::i2c::I2c>(i2c: I) -> Result<(), axp20x::Error<I::Error>> {
    /// let pmic = AsyncAxp20x::new(i2c).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(i2c: I) -> Result<Self, Error<I::Error>> {
        Self::with_address(i2c, AXP20X_SLAVE_ADDRESS).await
    }

    /// Create a driver with a custom I2C address and identify the chip
    pub async fn with_address(mut i2c: I, addr: u8) -> Result<Self, Error<I::Error>> {
        let mut buf = [0u8];
        i2c.write_read(addr, &[AXP20X_IC_TYPE], &mut buf)
            .await
            .map_err(Error::I2c)?;

        let Some(variant) = ChipVariant::from_chip_id(buf[0]) else {
            error!("axp20x: unsupported chip id {}", buf[0]);
            return Err(Error::UnsupportedChip(buf[0]));
        };
        info!("axp20x: detected variant with chip id {}", buf[0]);

        Ok(Self {
            i2c,
            addr,
            variant,
            config: variant.config(),
            int_register: [0; AXP20X_IRQ_BANK_LEN],
            handlers: [None; AXP20X_IRQ_COUNT],
        })
    }

    /// Chip variant detected at construction
    pub fn variant(&self) -> ChipVariant {
        self.variant
    }

    /// Read the chip ID register
    pub async fn get_chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_register(AXP20X_IC_TYPE).await
    }

    /// Release the I2C bus
    pub fn release(self) -> I {
        self.i2c
    }

    // ========================================
    // Low-level I2C operations
    // ========================================

    /// Read a single register
    async fn read_register(&mut self, reg: u8) -> Result<u8, Error<I::Error>> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.addr, &[reg], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    /// Write a single register
    async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(self.addr, &[reg, value])
            .await
            .map_err(Error::I2c)
    }

    /// Read consecutive registers
    async fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Error<I::Error>> {
        self.i2c
            .write_read(self.addr, &[reg], buf)
            .await
            .map_err(Error::I2c)
    }

    /// Set or clear one bit with a read-modify-write
    async fn update_register_bit(
        &mut self,
        reg: u8,
        bit: u8,
        set: bool,
    ) -> Result<(), Error<I::Error>> {
        let val = self.read_register(reg).await?;
        let val = if set { val | (1 << bit) } else { val & !(1 << bit) };
        self.write_register(reg, val).await
    }

    /// Get a bit from a register
    async fn get_register_bit(&mut self, reg: u8, bit: u8) -> Result<bool, Error<I::Error>> {
        let val = self.read_register(reg).await?;
        Ok((val & (1 << bit)) != 0)
    }

    /// Read an ADC value stored as H8 in `high_reg` and the low `low_bits` of `high_reg + 1`
    async fn read_split(&mut self, high_reg: u8, low_bits: u8) -> Result<u16, Error<I::Error>> {
        let mut buf = [0u8; 2];
        self.read_registers(high_reg, &mut buf).await?;
        Ok(codec::decode_split(buf[0], buf[1], low_bits))
    }

    /// Read a five-register IRQ bank in index order
    async fn read_bank(
        &mut self,
        regs: [u8; AXP20X_IRQ_BANK_LEN],
    ) -> Result<[u8; AXP20X_IRQ_BANK_LEN], Error<I::Error>> {
        let mut buf = [0u8; AXP20X_IRQ_BANK_LEN];
        if regs.windows(2).all(|w| w[1] == w[0] + 1) {
            self.read_registers(regs[0], &mut buf).await?;
        } else {
            for (slot, &reg) in buf.iter_mut().zip(regs.iter()) {
                *slot = self.read_register(reg).await?;
            }
        }
        Ok(buf)
    }

    /// Toggle a mapped control bit; a missing mapping is ignored
    async fn set_channel(
        &mut self,
        channel: Option<RegisterBit>,
        enabled: bool,
    ) -> Result<(), Error<I::Error>> {
        match channel {
            Some((reg, bit)) => self.update_register_bit(reg, bit, enabled).await,
            None => {
                debug!("axp20x: channel not present on this chip, ignored");
                Ok(())
            }
        }
    }

    /// Write a set-point field, clamping linear ranges and rejecting table misses
    async fn write_field(
        &mut self,
        field: ScaledField,
        value: u16,
        rejected: Error<I::Error>,
    ) -> Result<(), Error<I::Error>> {
        let Some(code) = field.encode(value) else {
            warn!(
                "axp20x: {} is not a supported setting for register {}",
                value, field.reg
            );
            return Err(rejected);
        };
        if field.clamps(value) {
            debug!("axp20x: {} clamped for register {}", value, field.reg);
        }
        let val = self.read_register(field.reg).await?;
        self.write_register(field.reg, field.insert(val, code)).await
    }

    /// Read a set-point field back in physical units
    async fn read_field(&mut self, field: ScaledField) -> Result<u16, Error<I::Error>> {
        let val = self.read_register(field.reg).await?;
        field.decode(field.extract(val)).ok_or(Error::Unsupported)
    }

    // ========================================
    // Status functions
    // ========================================

    /// Check if ACIN is present
    pub async fn is_acin_present(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_register_bit(AXP202_STATUS, 7).await
    }

    /// Check if VBUS is present
    pub async fn is_vbus_present(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_register_bit(AXP202_STATUS, 5).await
    }

    /// Check if battery is charging
    pub async fn is_charging(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_register_bit(AXP202_MODE_CHGSTATUS, 6).await
    }

    /// Check if battery is connected
    pub async fn is_battery_connected(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_register_bit(AXP202_MODE_CHGSTATUS, 5).await
    }

    // ========================================
    // Power outputs
    // ========================================

    /// Enable a power output
    pub async fn power_enable(&mut self, channel: PowerChannel) -> Result<(), Error<I::Error>> {
        self.set_power_output(channel, true).await
    }

    /// Disable a power output
    pub async fn power_disable(&mut self, channel: PowerChannel) -> Result<(), Error<I::Error>> {
        self.set_power_output(channel, false).await
    }

    /// Switch a power output on or off. Outputs the chip lacks are ignored.
    pub async fn set_power_output(
        &mut self,
        channel: PowerChannel,
        enabled: bool,
    ) -> Result<(), Error<I::Error>> {
        self.set_channel(self.config.power_channel(channel), enabled).await
    }

    /// Check if a power output is enabled. Outputs the chip lacks read as disabled.
    pub async fn is_power_enabled(
        &mut self,
        channel: PowerChannel,
    ) -> Result<bool, Error<I::Error>> {
        match self.config.power_channel(channel) {
            Some((reg, bit)) => self.get_register_bit(reg, bit).await,
            None => Ok(false),
        }
    }

    /// Set an output voltage in mV
    ///
    /// Continuous ranges clamp out-of-range requests to the nearest bound.
    /// LDO4 accepts only the values of its table and returns
    /// `Error::InvalidVoltage` without writing otherwise. Outputs without a
    /// voltage setting on this chip are ignored.
    pub async fn set_voltage(
        &mut self,
        channel: PowerChannel,
        millivolt: u16,
    ) -> Result<(), Error<I::Error>> {
        let config = self.config;
        match config.regulator(channel) {
            Some(&field) => {
                self.write_field(field, millivolt, Error::InvalidVoltage)
                    .await
            }
            None => {
                debug!("axp20x: output has no voltage setting on this chip, ignored");
                Ok(())
            }
        }
    }

    /// Get an output voltage in mV
    pub async fn get_voltage(&mut self, channel: PowerChannel) -> Result<u16, Error<I::Error>> {
        let config = self.config;
        match config.regulator(channel) {
            Some(&field) => self.read_field(field).await,
            None => Err(Error::Unsupported),
        }
    }

    /// Set DC1 voltage (AXP192 only, 700-3500mV, 25mV steps, clamped)
    pub async fn set_dc1_voltage(&mut self, millivolt: u16) -> Result<(), Error<I::Error>> {
        self.set_voltage(PowerChannel::Dcdc1, millivolt).await
    }

    /// Get DC1 voltage
    pub async fn get_dc1_voltage(&mut self) -> Result<u16, Error<I::Error>> {
        self.get_voltage(PowerChannel::Dcdc1).await
    }

    /// Set DC2 voltage (700-2275mV, 25mV steps, clamped)
    pub async fn set_dc2_voltage(&mut self, millivolt: u16) -> Result<(), Error<I::Error>> {
        self.set_voltage(PowerChannel::Dcdc2, millivolt).await
    }

    /// Get DC2 voltage
    pub async fn get_dc2_voltage(&mut self) -> Result<u16, Error<I::Error>> {
        self.get_voltage(PowerChannel::Dcdc2).await
    }

    /// Set DC3 voltage (700-3500mV, 25mV steps, clamped)
    pub async fn set_dc3_voltage(&mut self, millivolt: u16) -> Result<(), Error<I::Error>> {
        self.set_voltage(PowerChannel::Dcdc3, millivolt).await
    }

    /// Get DC3 voltage
    pub async fn get_dc3_voltage(&mut self) -> Result<u16, Error<I::Error>> {
        self.get_voltage(PowerChannel::Dcdc3).await
    }

    /// Set LDO2 voltage (1800-3300mV, 100mV steps, clamped)
    pub async fn set_ldo2_voltage(&mut self, millivolt: u16) -> Result<(), Error<I::Error>> {
        self.set_voltage(PowerChannel::Ldo2, millivolt).await
    }

    /// Get LDO2 voltage
    pub async fn get_ldo2_voltage(&mut self) -> Result<u16, Error<I::Error>> {
        self.get_voltage(PowerChannel::Ldo2).await
    }

    /// Set LDO3 voltage (AXP202: 700-3500mV/25mV, AXP192: 1800-3300mV/100mV, clamped)
    pub async fn set_ldo3_voltage(&mut self, millivolt: u16) -> Result<(), Error<I::Error>> {
        self.set_voltage(PowerChannel::Ldo3, millivolt).await
    }

    /// Get LDO3 voltage
    pub async fn get_ldo3_voltage(&mut self) -> Result<u16, Error<I::Error>> {
        self.get_voltage(PowerChannel::Ldo3).await
    }

    /// Set LDO4 voltage (AXP202 only, one of [`AXP202_LDO4_VOLTAGES`])
    pub async fn set_ldo4_voltage(&mut self, millivolt: u16) -> Result<(), Error<I::Error>> {
        self.set_voltage(PowerChannel::Ldo4, millivolt).await
    }

    /// Get LDO4 voltage
    pub async fn get_ldo4_voltage(&mut self) -> Result<u16, Error<I::Error>> {
        self.get_voltage(PowerChannel::Ldo4).await
    }

    /// Select LDO3 output mode (AXP202 only)
    pub async fn set_ldo3_mode(&mut self, mode: Ldo3Mode) -> Result<(), Error<I::Error>> {
        self.set_channel(self.config.ldo3_mode, mode == Ldo3Mode::DcIn).await
    }

    /// Shutdown - turns off all outputs
    pub async fn shutdown(&mut self) -> Result<(), Error<I::Error>> {
        self.update_register_bit(AXP202_OFF_CTL, 7, true).await
    }

    // ========================================
    // ADC
    // ========================================

    /// Enable an ADC input
    pub async fn adc_enable(&mut self, channel: AdcChannel) -> Result<(), Error<I::Error>> {
        self.set_adc(channel, true).await
    }

    /// Disable an ADC input
    pub async fn adc_disable(&mut self, channel: AdcChannel) -> Result<(), Error<I::Error>> {
        self.set_adc(channel, false).await
    }

    /// Enable or disable an ADC input
    pub async fn set_adc(
        &mut self,
        channel: AdcChannel,
        enabled: bool,
    ) -> Result<(), Error<I::Error>> {
        self.set_channel(Some(adc_channel(channel)), enabled).await
    }

    /// Check if an ADC input is enabled
    pub async fn is_adc_enabled(&mut self, channel: AdcChannel) -> Result<bool, Error<I::Error>> {
        let (reg, bit) = adc_channel(channel);
        self.get_register_bit(reg, bit).await
    }

    /// Get ACIN voltage in mV
    pub async fn get_acin_voltage(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_ACIN_VOL_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_ACIN_VOLTAGE_STEP))
    }

    /// Get ACIN current in mA
    pub async fn get_acin_current(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_ACIN_CUR_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_ACIN_CUR_STEP))
    }

    /// Get VBUS voltage in mV
    pub async fn get_vbus_voltage(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_VBUS_VOL_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_VBUS_VOLTAGE_STEP))
    }

    /// Get VBUS current in mA
    pub async fn get_vbus_current(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_VBUS_CUR_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_VBUS_CUR_STEP))
    }

    /// Get die temperature in Celsius
    pub async fn get_internal_temperature(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_INTERNAL_TEMP_H8, 4).await?;
        Ok(codec::internal_temperature(raw))
    }

    /// Get TS pin voltage in mV
    pub async fn get_ts_pin_voltage(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_TS_IN_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_TS_PIN_OUT_STEP))
    }

    /// Get GPIO0 voltage in mV
    pub async fn get_gpio0_voltage(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_GPIO0_VOL_ADC_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_GPIO0_STEP))
    }

    /// Get GPIO1 voltage in mV
    pub async fn get_gpio1_voltage(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_GPIO1_VOL_ADC_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_GPIO1_STEP))
    }

    /// Get instantaneous battery power in mW
    pub async fn get_battery_power(&mut self) -> Result<f32, Error<I::Error>> {
        let mut buf = [0u8; 3];
        self.read_registers(AXP202_BAT_POWER_H8, &mut buf).await?;
        Ok(codec::battery_power_mw(codec::decode_u24(
            buf[0], buf[1], buf[2],
        )))
    }

    /// Get battery voltage in mV
    pub async fn get_battery_voltage(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_BAT_AVERVOL_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_BATT_VOLTAGE_STEP))
    }

    /// Get battery charge current in mA
    pub async fn get_battery_charge_current(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(
            AXP202_BAT_AVERCHGCUR_H8,
            self.config.charge_current_low_bits,
        )
        .await?;
        Ok(codec::to_physical(raw, AXP202_BATT_CHARGE_CUR_STEP))
    }

    /// Get battery discharge current in mA
    pub async fn get_battery_discharge_current(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_BAT_AVERDISCHGCUR_H8, 5).await?;
        Ok(codec::to_physical(raw, AXP202_BATT_DISCHARGE_CUR_STEP))
    }

    /// Get APS (IPSOUT) voltage in mV
    pub async fn get_aps_voltage(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_split(AXP202_APS_AVERVOL_H8, 4).await?;
        Ok(codec::to_physical(raw, AXP202_APS_VOLTAGE_STEP))
    }

    /// Get fuel gauge battery percentage (AXP202 only)
    ///
    /// Returns 0 while the gauge flags its reading as invalid.
    pub async fn get_battery_percentage(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.config.battery_percentage.ok_or(Error::Unsupported)?;
        let val = self.read_register(reg).await?;
        if val & 0x80 != 0 {
            return Ok(0);
        }
        Ok(val & 0x7F)
    }

    // ========================================
    // Charging control
    // ========================================

    /// Enable battery charging
    pub async fn enable_charging(&mut self) -> Result<(), Error<I::Error>> {
        self.update_register_bit(AXP202_CHARGE1, 7, true).await
    }

    /// Disable battery charging
    pub async fn disable_charging(&mut self) -> Result<(), Error<I::Error>> {
        self.update_register_bit(AXP202_CHARGE1, 7, false).await
    }

    /// Check if battery charging is enabled
    pub async fn is_charging_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_register_bit(AXP202_CHARGE1, 7).await
    }

    /// Set charge target voltage (4100, 4150, 4200 or 4360 mV)
    pub async fn set_charge_target_voltage(
        &mut self,
        millivolt: u16,
    ) -> Result<(), Error<I::Error>> {
        self.write_field(
            self.config.charge_target_voltage,
            millivolt,
            Error::InvalidVoltage,
        )
        .await
    }

    /// Get charge target voltage in mV
    pub async fn get_charge_target_voltage(&mut self) -> Result<u16, Error<I::Error>> {
        self.read_field(self.config.charge_target_voltage).await
    }

    /// Set constant charge current in mA
    ///
    /// AXP202 accepts 300-1800mA in 100mA steps; AXP192 accepts one of
    /// [`AXP192_CHARGE_CURRENTS`]. Anything else returns `Error::InvalidCurrent`.
    pub async fn set_charge_current(&mut self, milliamp: u16) -> Result<(), Error<I::Error>> {
        self.write_field(self.config.charge_current, milliamp, Error::InvalidCurrent)
            .await
    }

    /// Get constant charge current in mA
    pub async fn get_charge_current(&mut self) -> Result<u16, Error<I::Error>> {
        self.read_field(self.config.charge_current).await
    }

    /// Set charging LED mode
    pub async fn set_charge_led_mode(
        &mut self,
        mode: ChargeLedMode,
    ) -> Result<(), Error<I::Error>> {
        let val = self.read_register(AXP202_OFF_CTL).await?;
        let val = match mode {
            ChargeLedMode::ControlledByCharger => val & !0x08,
            ChargeLedMode::Off => (val & 0xCF) | 0x08,
            ChargeLedMode::Blink1Hz => (val & 0xCF) | 0x18,
            ChargeLedMode::Blink4Hz => (val & 0xCF) | 0x28,
            ChargeLedMode::LowLevel => (val & 0xCF) | 0x38,
        };
        self.write_register(AXP202_OFF_CTL, val).await
    }

    // ========================================
    // Power key
    // ========================================

    /// Set the key press duration needed to power on
    pub async fn set_startup_time(&mut self, time: StartupTime) -> Result<(), Error<I::Error>> {
        let val = self.read_register(AXP202_POK_SET).await? & 0x3F;
        self.write_register(AXP202_POK_SET, val | ((time as u8) << 6)).await
    }

    /// Set the key press duration reported as a long press
    pub async fn set_long_press_time(
        &mut self,
        time: LongPressTime,
    ) -> Result<(), Error<I::Error>> {
        let val = self.read_register(AXP202_POK_SET).await? & 0xCF;
        self.write_register(AXP202_POK_SET, val | ((time as u8) << 4)).await
    }

    /// Set the key press duration that forces a shutdown
    pub async fn set_shutdown_time(&mut self, time: ShutdownTime) -> Result<(), Error<I::Error>> {
        let val = self.read_register(AXP202_POK_SET).await? & 0xFC;
        self.write_register(AXP202_POK_SET, val | (time as u8)).await
    }

    /// Enable or disable shutdown when the key is held past the shutdown time
    pub async fn set_timeout_shutdown(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.update_register_bit(AXP202_POK_SET, 3, enable).await
    }

    // ========================================
    // Interrupt Control
    // ========================================

    /// Enable or disable one interrupt source and install or remove its handler
    ///
    /// `Some(handler)` sets the enable bit and stores the handler; `None`
    /// clears the bit and the table entry. Indices outside `0..40` are ignored.
    pub async fn set_irq(
        &mut self,
        irq: impl Into<u8>,
        handler: Option<AsyncIrqHandler<I>>,
    ) -> Result<(), Error<I::Error>> {
        let index = irq.into();
        let Some((offset, bit)) = irq_position(index) else {
            debug!("axp20x: irq index {} out of range, ignored", index);
            return Ok(());
        };
        self.update_register_bit(self.config.irq_enable[offset], bit, handler.is_some())
            .await?;
        self.handlers[index as usize] = handler;
        Ok(())
    }

    /// Check whether a handler is installed for an interrupt source
    pub fn has_irq_handler(&self, irq: impl Into<u8>) -> bool {
        self.handlers
            .get(irq.into() as usize)
            .is_some_and(|h| h.is_some())
    }

    /// Enable a set of interrupt sources without touching handlers
    pub async fn enable_irqs(&mut self, irqs: IrqFlags) -> Result<(), Error<I::Error>> {
        self.set_interrupt_impl(irqs, true).await
    }

    /// Disable a set of interrupt sources without touching handlers
    pub async fn disable_irqs(&mut self, irqs: IrqFlags) -> Result<(), Error<I::Error>> {
        self.set_interrupt_impl(irqs, false).await
    }

    /// Internal interrupt implementation
    async fn set_interrupt_impl(
        &mut self,
        irqs: IrqFlags,
        enable: bool,
    ) -> Result<(), Error<I::Error>> {
        let regs = self.config.irq_enable;
        for (&reg, value) in regs.iter().zip(irqs.as_bytes()) {
            if value == 0 {
                continue;
            }
            let data = self.read_register(reg).await?;
            let data = if enable { data | value } else { data & !value };
            self.write_register(reg, data).await?;
        }
        Ok(())
    }

    /// Read the interrupt enable bank
    pub async fn read_irq_enabled(&mut self) -> Result<IrqFlags, Error<I::Error>> {
        let bytes = self.read_bank(self.config.irq_enable).await?;
        Ok(IrqFlags::from_bytes(bytes))
    }

    /// Read the interrupt status bank
    pub async fn read_irq_status(&mut self) -> Result<IrqFlags, Error<I::Error>> {
        let bytes = self.read_bank(self.config.irq_status).await?;
        self.int_register = bytes;
        Ok(IrqFlags::from_bytes(bytes))
    }

    /// Interrupt status as of the last read, without bus access
    pub fn last_irq_status(&self) -> IrqFlags {
        IrqFlags::from_bytes(self.int_register)
    }

    /// Clear all interrupt status
    pub async fn clear_irq_status(&mut self) -> Result<(), Error<I::Error>> {
        let regs = self.config.irq_status;
        for reg in regs {
            self.write_register(reg, 0xFF).await?;
        }
        self.int_register = [0; AXP20X_IRQ_BANK_LEN];
        Ok(())
    }

    /// Run one dispatch pass
    ///
    /// Reads the status bank once, calls the handler of every pending source
    /// that has one in ascending index order, then clears the whole status
    /// bank whether or not any handler ran. Returns the status that was read.
    pub async fn dispatch_irq(&mut self) -> Result<IrqFlags, Error<I::Error>> {
        let status = self.read_irq_status().await?;
        let mut fired = 0u8;
        for index in status.iter() {
            if let Some(handler) = self.handlers[index as usize] {
                handler(self);
                fired += 1;
            }
        }
        trace!(
            "axp20x: irq dispatch, {} pending, {} handled",
            status.iter().count(),
            fired
        );
        self.clear_irq_status().await?;
        Ok(status)
    }

    /// Dispatch if the IRQ pin signalled since the last call
    ///
    /// Call from the task that owns the driver, never from interrupt context.
    /// Returns the status handled, or `None` when nothing was pending. If the
    /// pass fails on the bus the signal stays pending, so the next call retries.
    pub async fn service_irq(
        &mut self,
        signal: &IrqSignal,
    ) -> Result<Option<IrqFlags>, Error<I::Error>> {
        if !signal.take() {
            return Ok(None);
        }
        let result = self.dispatch_irq().await;
        if result.is_err() {
            // the line is still asserted and will not produce another edge
            warn!("axp20x: irq dispatch failed, pass rescheduled");
            signal.schedule();
        }
        result.map(Some)
    }

    /// Wait for the active-low IRQ line, then run one dispatch pass
    ///
    /// Returns immediately if the line is already low, so interrupts raised
    /// before the first call are not lost. Pin errors map to `Error::Pin`.
    pub async fn wait_irq<P: Wait>(&mut self, pin: &mut P) -> Result<IrqFlags, Error<I::Error>> {
        if pin.wait_for_low().await.is_err() {
            warn!("axp20x: irq line wait failed");
            return Err(Error::Pin);
        }
        self.dispatch_irq().await
    }
}
