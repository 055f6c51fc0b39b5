//! Protocol timing constants.
//!
//! Every duration emitted on the wire by the default configuration is one of
//! the constants below.

use fugit::{KilohertzU32, MicrosDurationU32};

/// IR carrier frequency.
pub const CARRIER: KilohertzU32 = KilohertzU32::from_raw(38);

pub const HDR_MARK: MicrosDurationU32 = MicrosDurationU32::from_ticks(9000);
pub const HDR_SPACE: MicrosDurationU32 = MicrosDurationU32::from_ticks(4000);
pub const BIT_MARK: MicrosDurationU32 = MicrosDurationU32::from_ticks(620);
pub const ONE_SPACE: MicrosDurationU32 = MicrosDurationU32::from_ticks(1600);
pub const ZERO_SPACE: MicrosDurationU32 = MicrosDurationU32::from_ticks(540);
/// Gap between the two payload parts, and after the message.
pub const MSG_SPACE: MicrosDurationU32 = MicrosDurationU32::from_ticks(19000);

/// The set of durations used to render one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub header_mark: MicrosDurationU32,
    pub header_space: MicrosDurationU32,
    pub bit_mark: MicrosDurationU32,
    pub one_space: MicrosDurationU32,
    pub zero_space: MicrosDurationU32,
    pub message_space: MicrosDurationU32,
}

impl Timing {
    /// Timings as measured on the reference remote.
    pub const GREE: Timing = Timing {
        header_mark: HDR_MARK,
        header_space: HDR_SPACE,
        bit_mark: BIT_MARK,
        one_space: ONE_SPACE,
        zero_space: ZERO_SPACE,
        message_space: MSG_SPACE,
    };

    /// Space following the bit mark for a given bit value.
    #[inline]
    pub const fn bit_space(&self, bit: bool) -> MicrosDurationU32 {
        if bit { self.one_space } else { self.zero_space }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::GREE
    }
}
