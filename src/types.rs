//! Type definitions and enumerations for AXP202/AXP192 configuration
//!
//! This module provides strongly-typed enumerations for configuring
//! various aspects of the AXP20x PMIC.

/// Power output identifiers.
///
/// Not every output exists on both chips: `Dcdc1` is AXP192 only and `Ldo4`
/// is AXP202 only. Operations on an output the detected chip lacks are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerChannel {
    Exten = 0,
    Dcdc1 = 1,
    Dcdc2 = 2,
    Dcdc3 = 3,
    Ldo2 = 4,
    Ldo3 = 5,
    Ldo4 = 6,
}

impl PowerChannel {
    pub const ALL: [PowerChannel; 7] = [
        PowerChannel::Exten,
        PowerChannel::Dcdc1,
        PowerChannel::Dcdc2,
        PowerChannel::Dcdc3,
        PowerChannel::Ldo2,
        PowerChannel::Ldo3,
        PowerChannel::Ldo4,
    ];
}

/// ADC inputs. The first eight live in ADC enable bank 1, the rest in bank 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcChannel {
    BatteryVoltage = 0,
    BatteryCurrent = 1,
    AcinVoltage = 2,
    AcinCurrent = 3,
    VbusVoltage = 4,
    VbusCurrent = 5,
    ApsVoltage = 6,
    TsPin = 7,
    InternalTemperature = 8,
    Gpio0 = 9,
    Gpio1 = 10,
}

impl AdcChannel {
    pub const ALL: [AdcChannel; 11] = [
        AdcChannel::BatteryVoltage,
        AdcChannel::BatteryCurrent,
        AdcChannel::AcinVoltage,
        AdcChannel::AcinCurrent,
        AdcChannel::VbusVoltage,
        AdcChannel::VbusCurrent,
        AdcChannel::ApsVoltage,
        AdcChannel::TsPin,
        AdcChannel::InternalTemperature,
        AdcChannel::Gpio0,
        AdcChannel::Gpio1,
    ];
}

/// Named interrupt sources, valued by their index in the 40-bit IRQ vector.
///
/// Index 0 is bit 7 of the first IRQ register, index 39 is bit 0 of the
/// fifth. Indices 7, 21 and 35 are reserved and have no name, but can still
/// be addressed by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Irq {
    // IRQ1
    AcinOverVoltage = 0,
    AcinPlugin = 1,
    AcinRemoval = 2,
    VbusOverVoltage = 3,
    VbusPlugin = 4,
    VbusRemoval = 5,
    VbusVoltageLower = 6,
    // IRQ2
    BatteryPlugin = 8,
    BatteryRemoval = 9,
    BatteryEnterActivateMode = 10,
    BatteryExitActivateMode = 11,
    BatteryCharging = 12,
    BatteryChargeDone = 13,
    BatteryTempTooHigh = 14,
    BatteryTempTooLow = 15,
    // IRQ3
    DieTempHigh = 16,
    ChargeCurrentInsufficient = 17,
    Dc1VoltageLower = 18,
    Dc2VoltageLower = 19,
    Dc3VoltageLower = 20,
    PekShortPress = 22,
    PekLongPress = 23,
    // IRQ4
    PowerOn = 24,
    PowerOff = 25,
    VbusValid = 26,
    VbusInvalid = 27,
    VbusSessionValid = 28,
    VbusSessionEnd = 29,
    LowPowerLevel1 = 30,
    LowPowerLevel2 = 31,
    // IRQ5
    Timer = 32,
    PekRisingEdge = 33,
    PekFallingEdge = 34,
    Gpio3InputEdge = 36,
    Gpio2InputEdge = 37,
    Gpio1InputEdge = 38,
    Gpio0InputEdge = 39,
}

impl From<Irq> for u8 {
    fn from(irq: Irq) -> Self {
        irq as u8
    }
}

/// LDO3 output mode (AXP202)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Ldo3Mode {
    Ldo = 0,
    DcIn = 1,
}

/// Charge LED modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeLedMode {
    Off,
    Blink1Hz,
    Blink4Hz,
    /// Output held low (LED on)
    LowLevel,
    /// LED driven by the charger state machine
    ControlledByCharger,
}

/// Power key press duration required to power on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StartupTime {
    Time128ms = 0,
    Time3s = 1,
    Time1s = 2,
    Time2s = 3,
}

/// Power key press duration reported as a long press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LongPressTime {
    Time1s = 0,
    Time1s5 = 1,
    Time2s = 2,
    Time2s5 = 3,
}

/// Power key press duration that forces a shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ShutdownTime {
    Time4s = 0,
    Time6s = 1,
    Time8s = 2,
    Time10s = 3,
}
