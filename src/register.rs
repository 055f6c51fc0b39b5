//! The state register: one complete A/C command packed into 8 bytes.
//!
//! | Byte | Bits | Field |
//! |------|------|-------|
//! | 0    | 0-2  | [`Mode`] |
//! | 0    | 3    | Power |
//! | 0    | 4-7  | [`FanSpeed`] |
//! | 1    | 0-7  | Temperature, degrees C minus 16 |
//! | 4    | 0-7  | [`VaneVertical`] |
//! | 7    | 4-7  | Checksum |
//!
//! Bytes 2, 3, 5 and 6 are reserved and hold fixed values taken from a
//! working remote.

use log::debug;
use modular_bitfield::prelude::*;

use crate::error::{Field, FieldError};
use crate::types::{self, FanSpeed, Mode, VaneVertical};

/// Size of the state in bytes.
pub const STATE_LENGTH: usize = 8;
/// Size of the state in bits.
pub const STATE_BITS: usize = STATE_LENGTH * 8;

/// Known good state, captured from a real remote.
pub const DEFAULT_STATE: [u8; STATE_LENGTH] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00];

const CHECKSUM_OFFSET: u32 = 0x0A;

#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq)]
struct Layout {
    mode: B3,
    power: bool,
    fan: B4,
    temperature: B8,
    #[skip]
    __: B16,
    vane: B8,
    #[skip]
    __: B16,
    #[skip]
    __: B4,
    #[skip(getters)]
    checksum: B4,
}

/// How the checksum nibble is derived from the rest of the state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    /// `0x0A` plus the low nibbles of bytes 0-3 and the high nibbles of bytes
    /// 5-7, truncated to 4 bits. The checksum slot itself counts as zero.
    #[default]
    Nibble,
    /// The arithmetic as the legacy firmware evaluates it: additions bind
    /// tighter than the shifts, so the high nibbles become shift amounts and
    /// the result is always zero. Matches units paired with that firmware.
    AsWritten,
}

impl ChecksumAlgorithm {
    /// Compute the checksum nibble for `bytes`.
    pub fn compute(self, bytes: &[u8; STATE_LENGTH]) -> u8 {
        let low_nibbles: u32 = bytes[..4].iter().map(|b| u32::from(b & 0x0F)).sum();
        match self {
            Self::Nibble => {
                let high_nibbles = u32::from(bytes[5] >> 4) + u32::from(bytes[6] >> 4);
                ((low_nibbles + high_nibbles + CHECKSUM_OFFSET) & 0x0F) as u8
            }
            Self::AsWritten => {
                // a + b5 >> 4 + b6 >> 4 + b7 >> 4 + 0x0A, left to right.
                let head = low_nibbles + u32::from(bytes[5] & 0xF0);
                let value = head
                    .checked_shr(4 + u32::from(bytes[6] & 0xF0))
                    .and_then(|v| v.checked_shr(4 + u32::from(bytes[7] & 0xF0)))
                    .and_then(|v| v.checked_shr(4 + CHECKSUM_OFFSET))
                    .unwrap_or(0);
                ((value & 0xF0) >> 4) as u8
            }
        }
    }

    /// Whether the checksum stored in `bytes` matches.
    pub fn verify(self, bytes: &[u8; STATE_LENGTH]) -> bool {
        bytes[7] >> 4 == self.compute(bytes)
    }
}

/// Bit-packed state of the remote.
///
/// Setters never fail. Out of range values are clamped or coerced, see
/// [`crate::types`]. The `try_set_*` variants reject them instead.
///
/// The checksum goes stale on every edit and is recomputed by
/// [`Self::compute_checksum`] and [`Self::raw_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRegister {
    layout: Layout,
    checksum_algorithm: ChecksumAlgorithm,
}

impl core::fmt::Debug for Layout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02X?}", self.into_bytes())
    }
}

impl Default for StateRegister {
    fn default() -> Self {
        Self::new(ChecksumAlgorithm::default())
    }
}

impl StateRegister {
    pub fn new(checksum_algorithm: ChecksumAlgorithm) -> Self {
        let mut state = Self {
            layout: Layout::new(),
            checksum_algorithm,
        };
        state.reset();
        state
    }

    /// Restore the known good default state.
    pub fn reset(&mut self) {
        self.set_raw(DEFAULT_STATE);
    }

    pub fn checksum_algorithm(&self) -> ChecksumAlgorithm {
        self.checksum_algorithm
    }

    pub fn set_checksum_algorithm(&mut self, algorithm: ChecksumAlgorithm) {
        self.checksum_algorithm = algorithm;
    }

    pub fn set_power(&mut self, on: bool) {
        self.layout.set_power(on);
    }

    pub fn power(&self) -> bool {
        self.layout.power()
    }

    pub fn on(&mut self) {
        self.set_power(true);
    }

    pub fn off(&mut self) {
        self.set_power(false);
    }

    /// Set the operating mode. Unknown raw codes and [`Mode::Fan`] select
    /// [`Mode::Auto`].
    pub fn set_mode(&mut self, mode: impl Into<Mode>) {
        let mode = Mode::normalize(mode.into() as u8).value;
        self.layout.set_mode(mode as u8);
    }

    /// The stored mode. A captured state may still decode as [`Mode::Fan`].
    pub fn mode(&self) -> Mode {
        Mode::from_repr(self.layout.mode()).unwrap_or_default()
    }

    /// Set the fan speed. Raw codes above the maximum select [`FanSpeed::High`].
    pub fn set_fan_speed(&mut self, speed: impl Into<FanSpeed>) {
        self.layout.set_fan(speed.into() as u8);
    }

    pub fn fan_speed(&self) -> FanSpeed {
        FanSpeed::from(self.layout.fan())
    }

    /// Set the target temperature, clamped to 16-30 degrees C.
    pub fn set_temperature_c(&mut self, celsius: u8) {
        let celsius = types::normalize_temperature_c(celsius).value;
        self.layout.set_temperature(celsius - types::MIN_TEMP_C);
    }

    pub fn temperature_c(&self) -> u8 {
        self.layout.temperature().saturating_add(types::MIN_TEMP_C)
    }

    /// Set the vertical vane. Unknown raw codes select [`VaneVertical::Auto`].
    pub fn set_vane_vertical(&mut self, direction: impl Into<VaneVertical>) {
        self.layout.set_vane(direction.into() as u8);
    }

    pub fn vane_vertical(&self) -> VaneVertical {
        VaneVertical::from(self.layout.vane())
    }

    pub fn try_set_mode(&mut self, code: u8) -> Result<(), FieldError> {
        let normalized = Mode::normalize(code);
        reject(Field::Mode, code, normalized.adjustment)?;
        self.set_mode(normalized.value);
        Ok(())
    }

    pub fn try_set_fan_speed(&mut self, code: u8) -> Result<(), FieldError> {
        let normalized = FanSpeed::normalize(code);
        reject(Field::FanSpeed, code, normalized.adjustment)?;
        self.set_fan_speed(normalized.value);
        Ok(())
    }

    pub fn try_set_temperature_c(&mut self, celsius: u8) -> Result<(), FieldError> {
        let normalized = types::normalize_temperature_c(celsius);
        reject(Field::Temperature, celsius, normalized.adjustment)?;
        self.set_temperature_c(normalized.value);
        Ok(())
    }

    pub fn try_set_vane_vertical(&mut self, code: u8) -> Result<(), FieldError> {
        let normalized = VaneVertical::normalize(code);
        reject(Field::VaneVertical, code, normalized.adjustment)?;
        self.set_vane_vertical(normalized.value);
        Ok(())
    }

    /// Recompute the checksum into the high nibble of byte 7.
    pub fn compute_checksum(&mut self) {
        let checksum = self.checksum_algorithm.compute(&self.layout.into_bytes());
        self.layout.set_checksum(checksum);
    }

    /// Whether the stored checksum is current.
    pub fn has_valid_checksum(&self) -> bool {
        self.checksum_algorithm.verify(&self.layout.into_bytes())
    }

    /// The state as it should be sent, with a fresh checksum.
    pub fn raw_bytes(&mut self) -> [u8; STATE_LENGTH] {
        self.compute_checksum();
        self.layout.into_bytes()
    }

    /// The state with a fresh checksum, packed big endian so byte 0 is sent
    /// first.
    pub fn raw_u64(&mut self) -> u64 {
        u64::from_be_bytes(self.raw_bytes())
    }

    /// The bytes as currently stored, checksum possibly stale.
    pub fn stored_bytes(&self) -> [u8; STATE_LENGTH] {
        self.layout.into_bytes()
    }

    /// Load a captured state verbatim.
    pub fn set_raw(&mut self, bytes: [u8; STATE_LENGTH]) {
        self.layout = Layout::from_bytes(bytes);
    }
}

fn reject(
    field: Field,
    value: u8,
    adjustment: Option<types::Adjustment>,
) -> Result<(), FieldError> {
    let error = match adjustment {
        None => return Ok(()),
        Some(types::Adjustment::Clamped) => FieldError::OutOfRange { field, value },
        Some(types::Adjustment::Coerced) => FieldError::UnknownCode { field, value },
    };
    debug!("Rejected {field:?} value {value}");
    Err(error)
}
