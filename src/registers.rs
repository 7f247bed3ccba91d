//! Register addresses and constants for AXP202 / AXP192
//!
//! This module defines register addresses, set-point ranges and ADC step sizes
//! for the X-Powers AXP202 and AXP192 Power Management ICs. Both chips share
//! the same register layout for most of the map; the places where they differ
//! carry an `AXP192_` prefix.

use crate::codec::LinearRange;

/// Default I2C address of the AXP202
///
/// AXP192 boards answer at 0x34; use `Axp20x::with_address(i2c, 0x34)` there.
pub const AXP20X_SLAVE_ADDRESS: u8 = 0x35;

/// Device type/ID register - Contains chip identification
pub const AXP20X_IC_TYPE: u8 = 0x03;

/// Chip ID value reported by the AXP202
pub const AXP202_CHIP_ID: u8 = 0x41;

/// Chip ID value reported by the AXP192
pub const AXP192_CHIP_ID: u8 = 0x03;

// ========================================
// Power control
// ========================================

/// Input power status - ACIN present (bit 7), VBUS present (bit 5)
pub const AXP202_STATUS: u8 = 0x00;

/// Power mode / charge state - charging (bit 6), battery connected (bit 5)
pub const AXP202_MODE_CHGSTATUS: u8 = 0x01;

/// OTG VBUS state
pub const AXP202_OTG_STATUS: u8 = 0x02;

/// DC-DC2/3, LDO2/3/4 and EXTEN on/off control
pub const AXP202_LDO234_DC23_CTL: u8 = 0x12;

/// DC-DC2 output voltage, 6 bits
pub const AXP202_DC2OUT_VOL: u8 = 0x23;

/// DC-DC2/LDO3 voltage ramp control
pub const AXP202_LDO3_DC2_DVM: u8 = 0x25;

/// DC-DC1 output voltage (AXP192 only), 7 bits
pub const AXP192_DC1OUT_VOL: u8 = 0x26;

/// DC-DC3 output voltage, 7 bits
pub const AXP202_DC3OUT_VOL: u8 = 0x27;

/// LDO2 (high nibble) and LDO4 (low nibble) output voltage.
/// On the AXP192 the low nibble holds LDO3 instead.
pub const AXP202_LDO24OUT_VOL: u8 = 0x28;

/// LDO3 output voltage (bits 6:0) and LDO3 mode (bit 7), AXP202 only
pub const AXP202_LDO3OUT_VOL: u8 = 0x29;

/// VBUS-IPSOUT path management
pub const AXP202_IPS_SET: u8 = 0x30;

/// VOFF shutdown voltage
pub const AXP202_VOFF_SET: u8 = 0x31;

/// Shutdown (bit 7), battery detection, CHGLED control (bits 5:3)
pub const AXP202_OFF_CTL: u8 = 0x32;

/// Charge enable (bit 7), target voltage (bits 6:5), charge current (bits 3:0)
pub const AXP202_CHARGE1: u8 = 0x33;

/// Charge control 2
pub const AXP202_CHARGE2: u8 = 0x34;

/// Backup battery charge control
pub const AXP202_BACKUP_CHG: u8 = 0x35;

/// PEK (power key) parameters - startup time, long press time, shutdown time
pub const AXP202_POK_SET: u8 = 0x36;

/// ADC enable bank 1
pub const AXP202_ADC_EN1: u8 = 0x82;

/// ADC enable bank 2
pub const AXP202_ADC_EN2: u8 = 0x83;

/// ADC sample rate and TS pin control
pub const AXP202_ADC_SPEED: u8 = 0x84;

// ========================================
// Interrupt control
// ========================================

/// Number of interrupt enable/status registers on both chips
pub const AXP20X_IRQ_BANK_LEN: usize = 5;

/// Number of interrupt sources (one bit each across the bank)
pub const AXP20X_IRQ_COUNT: usize = AXP20X_IRQ_BANK_LEN * 8;

pub const AXP202_INTEN1: u8 = 0x40;
pub const AXP202_INTEN2: u8 = 0x41;
pub const AXP202_INTEN3: u8 = 0x42;
pub const AXP202_INTEN4: u8 = 0x43;
pub const AXP202_INTEN5: u8 = 0x44;
pub const AXP202_INTSTS1: u8 = 0x48;
pub const AXP202_INTSTS2: u8 = 0x49;
pub const AXP202_INTSTS3: u8 = 0x4A;
pub const AXP202_INTSTS4: u8 = 0x4B;
pub const AXP202_INTSTS5: u8 = 0x4C;

pub const AXP192_INTEN1: u8 = 0x40;
pub const AXP192_INTEN2: u8 = 0x41;
pub const AXP192_INTEN3: u8 = 0x42;
pub const AXP192_INTEN4: u8 = 0x43;
pub const AXP192_INTEN5: u8 = 0x4A;
pub const AXP192_INTSTS1: u8 = 0x44;
pub const AXP192_INTSTS2: u8 = 0x45;
pub const AXP192_INTSTS3: u8 = 0x46;
pub const AXP192_INTSTS4: u8 = 0x47;
pub const AXP192_INTSTS5: u8 = 0x4D;

// ========================================
// ADC data
// ========================================

pub const AXP202_ACIN_VOL_H8: u8 = 0x56;
pub const AXP202_ACIN_VOL_L4: u8 = 0x57;
pub const AXP202_ACIN_CUR_H8: u8 = 0x58;
pub const AXP202_ACIN_CUR_L4: u8 = 0x59;
pub const AXP202_VBUS_VOL_H8: u8 = 0x5A;
pub const AXP202_VBUS_VOL_L4: u8 = 0x5B;
pub const AXP202_VBUS_CUR_H8: u8 = 0x5C;
pub const AXP202_VBUS_CUR_L4: u8 = 0x5D;
pub const AXP202_INTERNAL_TEMP_H8: u8 = 0x5E;
pub const AXP202_INTERNAL_TEMP_L4: u8 = 0x5F;
pub const AXP202_TS_IN_H8: u8 = 0x62;
pub const AXP202_TS_IN_L4: u8 = 0x63;
pub const AXP202_GPIO0_VOL_ADC_H8: u8 = 0x64;
pub const AXP202_GPIO0_VOL_ADC_L4: u8 = 0x65;
pub const AXP202_GPIO1_VOL_ADC_H8: u8 = 0x66;
pub const AXP202_GPIO1_VOL_ADC_L4: u8 = 0x67;
pub const AXP202_BAT_POWER_H8: u8 = 0x70;
pub const AXP202_BAT_POWER_M8: u8 = 0x71;
pub const AXP202_BAT_POWER_L8: u8 = 0x72;
pub const AXP202_BAT_AVERVOL_H8: u8 = 0x78;
pub const AXP202_BAT_AVERVOL_L4: u8 = 0x79;
pub const AXP202_BAT_AVERCHGCUR_H8: u8 = 0x7A;
pub const AXP202_BAT_AVERCHGCUR_L4: u8 = 0x7B;
pub const AXP202_BAT_AVERDISCHGCUR_H8: u8 = 0x7C;
pub const AXP202_BAT_AVERDISCHGCUR_L5: u8 = 0x7D;
pub const AXP202_APS_AVERVOL_H8: u8 = 0x7E;
pub const AXP202_APS_AVERVOL_L4: u8 = 0x7F;

/// Fuel gauge battery percentage (AXP202 only). Bit 7 flags an invalid reading.
pub const AXP202_BATT_PERCENTAGE: u8 = 0xB9;

// ADC steps, in mV / mA per LSB
pub const AXP202_BATT_VOLTAGE_STEP: f32 = 1.1;
pub const AXP202_BATT_DISCHARGE_CUR_STEP: f32 = 0.5;
pub const AXP202_BATT_CHARGE_CUR_STEP: f32 = 0.5;
pub const AXP202_ACIN_VOLTAGE_STEP: f32 = 1.7;
pub const AXP202_ACIN_CUR_STEP: f32 = 0.625;
pub const AXP202_VBUS_VOLTAGE_STEP: f32 = 1.7;
pub const AXP202_VBUS_CUR_STEP: f32 = 0.375;
pub const AXP202_INTERNAL_TEMP_STEP: f32 = 0.1;
pub const AXP202_INTERNAL_TEMP_OFFSET: f32 = -144.7;
pub const AXP202_APS_VOLTAGE_STEP: f32 = 1.4;
pub const AXP202_TS_PIN_OUT_STEP: f32 = 0.8;
pub const AXP202_GPIO0_STEP: f32 = 0.5;
pub const AXP202_GPIO1_STEP: f32 = 0.5;

// ========================================
// Output set-points
// ========================================

pub const AXP192_DCDC1_RANGE: LinearRange = LinearRange::new(700, 3500, 25);
pub const AXP202_DCDC2_RANGE: LinearRange = LinearRange::new(700, 2275, 25);
pub const AXP202_DCDC3_RANGE: LinearRange = LinearRange::new(700, 3500, 25);
pub const AXP202_LDO2_RANGE: LinearRange = LinearRange::new(1800, 3300, 100);
pub const AXP202_LDO3_RANGE: LinearRange = LinearRange::new(700, 3500, 25);
pub const AXP192_LDO3_RANGE: LinearRange = LinearRange::new(1800, 3300, 100);

/// LDO4 output voltages in mV, indexed by the 4-bit register code (AXP202 only)
pub const AXP202_LDO4_VOLTAGES: [u16; 16] = [
    1250, 1300, 1400, 1500, 1600, 1700, 1800, 1900, 2000, 2500, 2700, 2800, 3000, 3100, 3200,
    3300,
];

/// Charge target voltages in mV, indexed by CHARGE1 bits 6:5
pub const AXP20X_CHARGE_TARGET_VOLTAGES: [u16; 4] = [4100, 4150, 4200, 4360];

/// Charge currents in mA, indexed by CHARGE1 bits 3:0
pub const AXP202_CHARGE_CURRENTS: [u16; 16] = [
    300, 400, 500, 600, 700, 800, 900, 1000, 1100, 1200, 1300, 1400, 1500, 1600, 1700, 1800,
];

/// Charge currents in mA, indexed by CHARGE1 bits 3:0
pub const AXP192_CHARGE_CURRENTS: [u16; 16] = [
    100, 190, 280, 360, 450, 550, 630, 700, 780, 880, 960, 1000, 1080, 1160, 1240, 1320,
];
