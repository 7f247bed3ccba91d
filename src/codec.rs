//! Conversions between raw register contents and physical units
//!
//! ADC readings are stored as a full high byte plus a partial low byte
//! (4 or 5 significant bits). Output set-points are either a linear code
//! (`min + code * step`) or an index into a small table of discrete values.

/// Combine a high byte and the low `low_bits` bits of a second byte.
#[inline]
pub const fn decode_split(high: u8, low: u8, low_bits: u8) -> u16 {
    let mask = (1u16 << low_bits) - 1;
    ((high as u16) << low_bits) | (low as u16 & mask)
}

/// Combine three bytes, most significant first, into a 24-bit value.
#[inline]
pub const fn decode_u24(high: u8, mid: u8, low: u8) -> u32 {
    ((high as u32) << 16) | ((mid as u32) << 8) | (low as u32)
}

/// Scale a raw ADC value by its per-LSB step.
#[inline]
pub fn to_physical(raw: u16, step: f32) -> f32 {
    raw as f32 * step
}

/// Inverse of [`to_physical`], rounded to the nearest LSB. Negative values
/// saturate to zero.
#[inline]
pub fn from_physical(value: f32, step: f32) -> u16 {
    let raw = value / step + 0.5;
    if raw <= 0.0 {
        0
    } else {
        raw as u16
    }
}

/// Instantaneous battery power in mW from the 24-bit power register.
#[inline]
pub fn battery_power_mw(raw: u32) -> f32 {
    2.0 * raw as f32 * 1.1 * 0.5 / 1000.0
}

/// Internal die temperature in Celsius.
#[inline]
pub fn internal_temperature(raw: u16) -> f32 {
    crate::registers::AXP202_INTERNAL_TEMP_OFFSET
        + raw as f32 * crate::registers::AXP202_INTERNAL_TEMP_STEP
}

/// A continuous set-point range: `min + code * step`, inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearRange {
    pub min: u16,
    pub max: u16,
    pub step: u16,
}

impl LinearRange {
    pub const fn new(min: u16, max: u16, step: u16) -> Self {
        Self { min, max, step }
    }

    /// Clamp `value` to the nearest bound of the range.
    pub const fn clamp(&self, value: u16) -> u16 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Register code for `value`, clamping first. Values between steps round down.
    pub const fn encode(&self, value: u16) -> u8 {
        ((self.clamp(value) - self.min) / self.step) as u8
    }

    pub const fn decode(&self, code: u8) -> u16 {
        self.min + code as u16 * self.step
    }
}

/// How a register field maps to a physical set-point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Out-of-range requests are clamped.
    Linear(LinearRange),
    /// Only exact matches are accepted; the code is the table index.
    Table(&'static [u16]),
}

/// A set-point stored in `mask` bits of `reg`, starting at bit `shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledField {
    pub reg: u8,
    pub shift: u8,
    pub mask: u8,
    pub scale: Scale,
}

impl ScaledField {
    pub const fn linear(reg: u8, shift: u8, mask: u8, range: LinearRange) -> Self {
        Self {
            reg,
            shift,
            mask,
            scale: Scale::Linear(range),
        }
    }

    pub const fn table(reg: u8, shift: u8, mask: u8, values: &'static [u16]) -> Self {
        Self {
            reg,
            shift,
            mask,
            scale: Scale::Table(values),
        }
    }

    /// Field code for `value`, or `None` when a table has no exact match.
    pub fn encode(&self, value: u16) -> Option<u8> {
        match self.scale {
            Scale::Linear(range) => Some(range.encode(value) & self.mask),
            Scale::Table(values) => values
                .iter()
                .position(|&v| v == value)
                .map(|index| index as u8 & self.mask),
        }
    }

    /// Physical value of a field code.
    pub fn decode(&self, code: u8) -> Option<u16> {
        let code = code & self.mask;
        match self.scale {
            Scale::Linear(range) => Some(range.decode(code)),
            Scale::Table(values) => values.get(code as usize).copied(),
        }
    }

    /// Replace the field in `reg_value` with `code`, keeping all other bits.
    pub const fn insert(&self, reg_value: u8, code: u8) -> u8 {
        (reg_value & !(self.mask << self.shift)) | ((code & self.mask) << self.shift)
    }

    pub const fn extract(&self, reg_value: u8) -> u8 {
        (reg_value >> self.shift) & self.mask
    }

    /// `true` when `value` is outside a linear range and will be clamped.
    pub fn clamps(&self, value: u16) -> bool {
        match self.scale {
            Scale::Linear(range) => range.clamp(value) != value,
            Scale::Table(_) => false,
        }
    }
}
