//! Transmission settings.

use fugit::KilohertzU32;

use crate::register::ChecksumAlgorithm;
use crate::timing::{self, Timing};

/// Order in which the bits of each payload byte go on the air.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitOrder {
    #[default]
    MsbFirst,
    /// Order used by some receivers paired with older firmware.
    LsbFirst,
}

/// Settings shared by every transmission of a remote.
///
/// The defaults reproduce the protocol as the reference hardware expects it;
/// there is normally no need to change them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitConfig {
    pub carrier: KilohertzU32,
    pub timing: Timing,
    pub bit_order: BitOrder,
    /// Extra copies of each message sent by [`crate::remote::GreeRemote::send`].
    pub repeat: u16,
    pub checksum: ChecksumAlgorithm,
}

impl Default for TransmitConfig {
    fn default() -> Self {
        Self {
            carrier: timing::CARRIER,
            timing: Timing::GREE,
            bit_order: BitOrder::default(),
            repeat: 0,
            checksum: ChecksumAlgorithm::default(),
        }
    }
}

impl TransmitConfig {
    pub fn with_carrier(mut self, carrier: KilohertzU32) -> Self {
        self.carrier = carrier;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    /// Number of extra copies of each message.
    pub fn with_repeat(mut self, repeat: u16) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_checksum(mut self, checksum: ChecksumAlgorithm) -> Self {
        self.checksum = checksum;
        self
    }
}
