//! Chip variant detection and per-variant register tables
//!
//! The AXP202 and AXP192 share most of their register map. Where they differ
//! (which outputs exist, IRQ bank addresses, ADC bit widths, set-point ranges)
//! the driver consults the [`ChipConfig`] of the detected variant instead of
//! branching on the chip id.

use crate::codec::ScaledField;
use crate::registers::*;
use crate::types::{AdcChannel, PowerChannel};

/// Supported PMIC variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipVariant {
    Axp202,
    Axp192,
}

impl ChipVariant {
    /// Classify the value of the IC type register.
    pub const fn from_chip_id(id: u8) -> Option<Self> {
        match id {
            AXP202_CHIP_ID => Some(ChipVariant::Axp202),
            AXP192_CHIP_ID => Some(ChipVariant::Axp192),
            _ => None,
        }
    }

    pub const fn chip_id(self) -> u8 {
        match self {
            ChipVariant::Axp202 => AXP202_CHIP_ID,
            ChipVariant::Axp192 => AXP192_CHIP_ID,
        }
    }

    pub fn config(self) -> &'static ChipConfig {
        match self {
            ChipVariant::Axp202 => &AXP202_CONFIG,
            ChipVariant::Axp192 => &AXP192_CONFIG,
        }
    }
}

/// A control bit: `(register, bit index)`
pub type RegisterBit = (u8, u8);

/// Register layout differences between the supported chips
#[derive(Debug)]
pub struct ChipConfig {
    /// Output enable bits in `AXP202_LDO234_DC23_CTL`
    pub power_channels: &'static [(PowerChannel, RegisterBit)],
    /// Output voltage fields
    pub regulators: &'static [(PowerChannel, ScaledField)],
    /// IRQ enable registers, in IRQ index order
    pub irq_enable: [u8; AXP20X_IRQ_BANK_LEN],
    /// IRQ status registers, in IRQ index order
    pub irq_status: [u8; AXP20X_IRQ_BANK_LEN],
    /// Significant bits in the low register of the charge current reading
    pub charge_current_low_bits: u8,
    pub charge_current: ScaledField,
    pub charge_target_voltage: ScaledField,
    /// LDO3 mode bit, if the chip has one
    pub ldo3_mode: Option<RegisterBit>,
    pub battery_percentage: Option<u8>,
}

impl ChipConfig {
    pub fn power_channel(&self, channel: PowerChannel) -> Option<RegisterBit> {
        self.power_channels
            .iter()
            .find(|(ch, _)| *ch == channel)
            .map(|&(_, bit)| bit)
    }

    pub fn regulator(&self, channel: PowerChannel) -> Option<&ScaledField> {
        self.regulators
            .iter()
            .find(|(ch, _)| *ch == channel)
            .map(|(_, field)| field)
    }
}

/// ADC enable bits. Identical on both chips.
pub const fn adc_channel(channel: AdcChannel) -> RegisterBit {
    match channel {
        AdcChannel::BatteryVoltage => (AXP202_ADC_EN1, 7),
        AdcChannel::BatteryCurrent => (AXP202_ADC_EN1, 6),
        AdcChannel::AcinVoltage => (AXP202_ADC_EN1, 5),
        AdcChannel::AcinCurrent => (AXP202_ADC_EN1, 4),
        AdcChannel::VbusVoltage => (AXP202_ADC_EN1, 3),
        AdcChannel::VbusCurrent => (AXP202_ADC_EN1, 2),
        AdcChannel::ApsVoltage => (AXP202_ADC_EN1, 1),
        AdcChannel::TsPin => (AXP202_ADC_EN1, 0),
        AdcChannel::InternalTemperature => (AXP202_ADC_EN2, 7),
        AdcChannel::Gpio0 => (AXP202_ADC_EN2, 3),
        AdcChannel::Gpio1 => (AXP202_ADC_EN2, 2),
    }
}

pub static AXP202_CONFIG: ChipConfig = ChipConfig {
    power_channels: &[
        (PowerChannel::Exten, (AXP202_LDO234_DC23_CTL, 0)),
        (PowerChannel::Dcdc3, (AXP202_LDO234_DC23_CTL, 1)),
        (PowerChannel::Ldo2, (AXP202_LDO234_DC23_CTL, 2)),
        (PowerChannel::Ldo4, (AXP202_LDO234_DC23_CTL, 3)),
        (PowerChannel::Dcdc2, (AXP202_LDO234_DC23_CTL, 4)),
        (PowerChannel::Ldo3, (AXP202_LDO234_DC23_CTL, 6)),
    ],
    regulators: &[
        (
            PowerChannel::Dcdc2,
            ScaledField::linear(AXP202_DC2OUT_VOL, 0, 0x3F, AXP202_DCDC2_RANGE),
        ),
        (
            PowerChannel::Dcdc3,
            ScaledField::linear(AXP202_DC3OUT_VOL, 0, 0x7F, AXP202_DCDC3_RANGE),
        ),
        (
            PowerChannel::Ldo2,
            ScaledField::linear(AXP202_LDO24OUT_VOL, 4, 0x0F, AXP202_LDO2_RANGE),
        ),
        (
            PowerChannel::Ldo3,
            ScaledField::linear(AXP202_LDO3OUT_VOL, 0, 0x7F, AXP202_LDO3_RANGE),
        ),
        (
            PowerChannel::Ldo4,
            ScaledField::table(AXP202_LDO24OUT_VOL, 0, 0x0F, &AXP202_LDO4_VOLTAGES),
        ),
    ],
    irq_enable: [
        AXP202_INTEN1,
        AXP202_INTEN2,
        AXP202_INTEN3,
        AXP202_INTEN4,
        AXP202_INTEN5,
    ],
    irq_status: [
        AXP202_INTSTS1,
        AXP202_INTSTS2,
        AXP202_INTSTS3,
        AXP202_INTSTS4,
        AXP202_INTSTS5,
    ],
    charge_current_low_bits: 4,
    charge_current: ScaledField::table(AXP202_CHARGE1, 0, 0x0F, &AXP202_CHARGE_CURRENTS),
    charge_target_voltage: ScaledField::table(
        AXP202_CHARGE1,
        5,
        0x03,
        &AXP20X_CHARGE_TARGET_VOLTAGES,
    ),
    ldo3_mode: Some((AXP202_LDO3OUT_VOL, 7)),
    battery_percentage: Some(AXP202_BATT_PERCENTAGE),
};

pub static AXP192_CONFIG: ChipConfig = ChipConfig {
    power_channels: &[
        (PowerChannel::Dcdc1, (AXP202_LDO234_DC23_CTL, 0)),
        (PowerChannel::Dcdc3, (AXP202_LDO234_DC23_CTL, 1)),
        (PowerChannel::Ldo2, (AXP202_LDO234_DC23_CTL, 2)),
        (PowerChannel::Ldo3, (AXP202_LDO234_DC23_CTL, 3)),
        (PowerChannel::Dcdc2, (AXP202_LDO234_DC23_CTL, 4)),
        (PowerChannel::Exten, (AXP202_LDO234_DC23_CTL, 6)),
    ],
    regulators: &[
        (
            PowerChannel::Dcdc1,
            ScaledField::linear(AXP192_DC1OUT_VOL, 0, 0x7F, AXP192_DCDC1_RANGE),
        ),
        (
            PowerChannel::Dcdc2,
            ScaledField::linear(AXP202_DC2OUT_VOL, 0, 0x3F, AXP202_DCDC2_RANGE),
        ),
        (
            PowerChannel::Dcdc3,
            ScaledField::linear(AXP202_DC3OUT_VOL, 0, 0x7F, AXP202_DCDC3_RANGE),
        ),
        (
            PowerChannel::Ldo2,
            ScaledField::linear(AXP202_LDO24OUT_VOL, 4, 0x0F, AXP202_LDO2_RANGE),
        ),
        (
            PowerChannel::Ldo3,
            ScaledField::linear(AXP202_LDO24OUT_VOL, 0, 0x0F, AXP192_LDO3_RANGE),
        ),
    ],
    irq_enable: [
        AXP192_INTEN1,
        AXP192_INTEN2,
        AXP192_INTEN3,
        AXP192_INTEN4,
        AXP192_INTEN5,
    ],
    irq_status: [
        AXP192_INTSTS1,
        AXP192_INTSTS2,
        AXP192_INTSTS3,
        AXP192_INTSTS4,
        AXP192_INTSTS5,
    ],
    charge_current_low_bits: 5,
    charge_current: ScaledField::table(AXP202_CHARGE1, 0, 0x0F, &AXP192_CHARGE_CURRENTS),
    charge_target_voltage: ScaledField::table(
        AXP202_CHARGE1,
        5,
        0x03,
        &AXP20X_CHARGE_TARGET_VOLTAGES,
    ),
    ldo3_mode: None,
    battery_percentage: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_id_classification() {
        assert_eq!(ChipVariant::from_chip_id(0x41), Some(ChipVariant::Axp202));
        assert_eq!(ChipVariant::from_chip_id(0x03), Some(ChipVariant::Axp192));
        assert_eq!(ChipVariant::from_chip_id(0xFF), None);
        assert_eq!(ChipVariant::from_chip_id(0x00), None);
    }

    #[test]
    fn each_variant_lacks_one_rail() {
        assert_eq!(AXP202_CONFIG.power_channel(PowerChannel::Dcdc1), None);
        assert_eq!(AXP192_CONFIG.power_channel(PowerChannel::Ldo4), None);
        assert!(AXP202_CONFIG.regulator(PowerChannel::Dcdc1).is_none());
        assert!(AXP192_CONFIG.regulator(PowerChannel::Ldo4).is_none());
        assert!(AXP202_CONFIG.regulator(PowerChannel::Exten).is_none());
    }

    #[test]
    fn power_bits_are_unique_per_variant() {
        for config in [&AXP202_CONFIG, &AXP192_CONFIG] {
            for (i, (_, a)) in config.power_channels.iter().enumerate() {
                for (_, b) in &config.power_channels[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn adc_banks_are_split_by_group() {
        for ch in AdcChannel::ALL {
            let (reg, _) = adc_channel(ch);
            let expected = if (ch as u8) < 8 { AXP202_ADC_EN1 } else { AXP202_ADC_EN2 };
            assert_eq!(reg, expected);
        }
    }

    #[test]
    fn axp192_irq_banks_are_not_contiguous() {
        assert_eq!(AXP192_CONFIG.irq_status, [0x44, 0x45, 0x46, 0x47, 0x4D]);
        assert_eq!(AXP192_CONFIG.irq_enable, [0x40, 0x41, 0x42, 0x43, 0x4A]);
        assert_eq!(AXP202_CONFIG.irq_status, [0x48, 0x49, 0x4A, 0x4B, 0x4C]);
    }
}
