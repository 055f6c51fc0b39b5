//! Field types stored in the state register.
//!
//! Conversions from raw codes never fail: an unknown code is clamped or
//! coerced to a safe value. Use the `normalize` functions to find out whether
//! that happened.

use strum_macros::{EnumCount, EnumIter, FromRepr};

/// How a raw input was changed to fit its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Value was outside the valid range and moved to the nearest bound.
    Clamped,
    /// Value was not a known code and replaced by the field default.
    Coerced,
}

/// A normalized field value, with a note of any adjustment made to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized<T> {
    pub value: T,
    pub adjustment: Option<Adjustment>,
}

impl<T> Normalized<T> {
    fn exact(value: T) -> Self {
        Self {
            value,
            adjustment: None,
        }
    }

    fn adjusted(value: T, adjustment: Adjustment) -> Self {
        Self {
            value,
            adjustment: Some(adjustment),
        }
    }

    /// Whether the input was used as-is.
    pub fn is_exact(&self) -> bool {
        self.adjustment.is_none()
    }
}

/// Operating mode. Bits 0-2 of byte 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum Mode {
    #[default]
    Auto = 0x00,
    Cool = 0x01,
    Dry = 0x02,
    Fan = 0x03,
    Heat = 0x04,
}

impl Mode {
    /// Only `Auto`, `Cool`, `Dry` and `Heat` can be written. `Fan` still
    /// decodes from a captured state but coerces to `Auto` here.
    pub fn normalize(code: u8) -> Normalized<Self> {
        match Self::from_repr(code) {
            Some(Self::Fan) | None => Normalized::adjusted(Self::Auto, Adjustment::Coerced),
            Some(mode) => Normalized::exact(mode),
        }
    }
}

impl From<u8> for Mode {
    /// Unknown codes and [`Mode::Fan`] fall back to [`Mode::Auto`].
    fn from(code: u8) -> Self {
        Self::normalize(code).value
    }
}

impl From<Mode> for u8 {
    fn from(value: Mode) -> Self {
        value as u8
    }
}

/// Fan speed. Bits 4-7 of byte 0.
///
/// The code is stored shifted into the high nibble, so `High` reads as `0x30`
/// in the raw byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum FanSpeed {
    #[default]
    Auto = 0x00,
    Low = 0x01,
    Medium = 0x02,
    High = 0x03,
}

impl FanSpeed {
    const MAX_VALUE: u8 = Self::High as u8;

    pub fn normalize(code: u8) -> Normalized<Self> {
        match Self::from_repr(code) {
            Some(speed) => Normalized::exact(speed),
            None => Normalized::adjusted(Self::High, Adjustment::Clamped),
        }
    }

    /// The value as it appears in byte 0.
    pub const fn shifted(self) -> u8 {
        (self as u8) << 4
    }
}

impl From<u8> for FanSpeed {
    /// Codes above [`FanSpeed::High`] are clamped to it.
    fn from(code: u8) -> Self {
        Self::normalize(code.min(Self::MAX_VALUE)).value
    }
}

impl From<FanSpeed> for u8 {
    fn from(value: FanSpeed) -> Self {
        value as u8
    }
}

/// Vertical vane direction. Byte 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum VaneVertical {
    /// Also used for "manual", the receiver holds the last position.
    #[default]
    Auto = 0x00,
    Swing = 0x01,
    Up = 0x02,
    MiddleUp = 0x03,
    Middle = 0x04,
    MiddleDown = 0x05,
    Down = 0x06,
}

impl VaneVertical {
    pub fn normalize(code: u8) -> Normalized<Self> {
        match Self::from_repr(code) {
            Some(direction) => Normalized::exact(direction),
            None => Normalized::adjusted(Self::Auto, Adjustment::Coerced),
        }
    }
}

impl From<u8> for VaneVertical {
    /// Unknown codes fall back to [`VaneVertical::Auto`].
    fn from(code: u8) -> Self {
        Self::normalize(code).value
    }
}

impl From<VaneVertical> for u8 {
    fn from(value: VaneVertical) -> Self {
        value as u8
    }
}

/// Lowest settable temperature in degrees Celsius.
pub const MIN_TEMP_C: u8 = 16;
/// Highest settable temperature in degrees Celsius.
pub const MAX_TEMP_C: u8 = 30;

/// Clamp a set point into the supported range.
pub fn normalize_temperature_c(celsius: u8) -> Normalized<u8> {
    let clamped = celsius.clamp(MIN_TEMP_C, MAX_TEMP_C);
    if clamped == celsius {
        Normalized::exact(celsius)
    } else {
        Normalized::adjusted(clamped, Adjustment::Clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn mode_conversions() {
        // Every writable mode survives a trip through its raw code.
        for mode in Mode::iter().filter(|mode| *mode != Mode::Fan) {
            let normalized = Mode::normalize(mode as u8);
            assert_eq!(normalized.value, mode);
            assert!(normalized.is_exact());
        }
        assert_eq!(Mode::COUNT, 5);
    }

    #[test]
    fn unknown_mode_is_coerced_to_auto() {
        for code in Mode::COUNT as u8..=u8::MAX {
            let normalized = Mode::normalize(code);
            assert_eq!(normalized.value, Mode::Auto);
            assert_eq!(normalized.adjustment, Some(Adjustment::Coerced));
            assert_eq!(Mode::from(code), Mode::Auto);
        }
    }

    #[test]
    fn fan_mode_is_not_writable() {
        let normalized = Mode::normalize(Mode::Fan as u8);
        assert_eq!(normalized.value, Mode::Auto);
        assert_eq!(normalized.adjustment, Some(Adjustment::Coerced));
        assert_eq!(Mode::from(3), Mode::Auto);
    }

    #[test]
    fn fan_speed_clamps_to_high() {
        assert_eq!(FanSpeed::from(2), FanSpeed::Medium);
        assert_eq!(FanSpeed::from(4), FanSpeed::High);
        assert_eq!(FanSpeed::from(u8::MAX), FanSpeed::High);
        assert_eq!(
            FanSpeed::normalize(9).adjustment,
            Some(Adjustment::Clamped)
        );
    }

    #[test]
    fn fan_speed_shifted_into_high_nibble() {
        let shifted: heapless::Vec<u8, 4> = FanSpeed::iter().map(FanSpeed::shifted).collect();
        assert_eq!(shifted.as_slice(), &[0x00, 0x10, 0x20, 0x30]);
    }

    #[test]
    fn vane_conversions() {
        for direction in VaneVertical::iter() {
            assert_eq!(VaneVertical::from(direction as u8), direction);
        }
        assert_eq!(VaneVertical::from(7), VaneVertical::Auto);
        assert_eq!(VaneVertical::from(0xFF), VaneVertical::Auto);
        assert_eq!(VaneVertical::COUNT, 7);
    }

    #[test]
    fn temperature_clamping() {
        for celsius in MIN_TEMP_C..=MAX_TEMP_C {
            assert_eq!(normalize_temperature_c(celsius), Normalized::exact(celsius));
        }
        let low = normalize_temperature_c(3);
        assert_eq!(low.value, MIN_TEMP_C);
        assert_eq!(low.adjustment, Some(Adjustment::Clamped));
        assert_eq!(normalize_temperature_c(45).value, MAX_TEMP_C);
    }
}
