//! Serializes a state onto a [`PulseOutput`].
//!
//! A message on the air looks like:
//!
//! ```text
//! header | payload part 1 | footer 010 | gap | payload part 2 | trailer
//! ```
//!
//! Each bit is a short mark followed by a long space for a `1` or a short
//! space for a `0`. The gap and trailer are a short mark followed by a long
//! message space.

use log::{debug, trace};

use crate::config::{BitOrder, TransmitConfig};
use crate::error::{Error, Result};
use crate::pulse::PulseOutput;
use crate::register::{STATE_BITS, STATE_LENGTH};

/// Fixed bits sent between the two payload parts.
pub const FOOTER: u8 = 0b010;
pub const FOOTER_BITS: usize = 3;

/// Bytes sent before the footer when sending from a byte buffer.
const FIRST_PART_BYTES: usize = 4;

/// Number of pulses making up one message carrying `payload_bits` bits.
pub const fn pulses_per_message(payload_bits: usize) -> usize {
    // header, payload, footer, gap, trailer
    2 + 2 * payload_bits + 2 * FOOTER_BITS + 2 + 2
}

/// Pulses in one standard 64 bit message.
pub const MESSAGE_PULSES: usize = pulses_per_message(STATE_BITS);

/// Ordered payload bits plus the point at which the footer is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSequence<'a> {
    bytes: &'a [u8],
    split_bit: usize,
}

impl<'a> BitSequence<'a> {
    /// `split_bit` is clamped to the length of the payload.
    pub fn new(bytes: &'a [u8], split_bit: usize) -> Self {
        Self {
            bytes,
            split_bit: split_bit.min(bytes.len() * 8),
        }
    }

    pub fn len_bits(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn split_bit(&self) -> usize {
        self.split_bit
    }

    /// Value of the bit at `index` in transmission order, `None` past the end.
    pub fn bit(&self, index: usize, order: BitOrder) -> Option<bool> {
        let byte = self.bytes.get(index / 8)?;
        let shift = match order {
            BitOrder::MsbFirst => 7 - index % 8,
            BitOrder::LsbFirst => index % 8,
        };
        Some((byte >> shift) & 1 == 1)
    }
}

/// Drives a [`PulseOutput`] with complete messages.
///
/// Holds no state between calls, other than the output and its settings.
pub struct Transmitter<O: PulseOutput> {
    output: O,
    config: TransmitConfig,
}

impl<O: PulseOutput> Transmitter<O> {
    pub fn new(output: O, config: TransmitConfig) -> Self {
        Self { output, config }
    }

    pub fn config(&self) -> &TransmitConfig {
        &self.config
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Give back the output driver.
    pub fn release(self) -> O {
        self.output
    }

    /// Send a state buffer `repeat + 1` times.
    ///
    /// Buffers shorter than a full state are ignored: nothing at all is
    /// emitted. The footer always follows the first four bytes.
    pub fn send_bytes(&mut self, data: &[u8], repeat: u16) -> Result<(), O::Error> {
        if data.len() < STATE_LENGTH {
            debug!(
                "Skipping transmit, got {} bytes, need at least {}",
                data.len(),
                STATE_LENGTH
            );
            return Ok(());
        }
        self.send_sequence(BitSequence::new(data, FIRST_PART_BYTES * 8), repeat)
    }

    /// Send a packed state `repeat + 1` times, most significant byte first.
    ///
    /// `nbits` must be exactly 64, otherwise nothing is emitted. The footer
    /// goes at the midpoint of the bit count.
    pub fn send_u64(&mut self, data: u64, nbits: usize, repeat: u16) -> Result<(), O::Error> {
        if nbits != STATE_BITS {
            debug!("Skipping transmit, got {nbits} bits, need {STATE_BITS}");
            return Ok(());
        }
        let bytes = data.to_be_bytes();
        self.send_sequence(BitSequence::new(&bytes, nbits / 2), repeat)
    }

    /// Send any bit sequence with the protocol framing, `repeat + 1` times.
    pub fn send_sequence(&mut self, bits: BitSequence<'_>, repeat: u16) -> Result<(), O::Error> {
        self.output
            .set_carrier(self.config.carrier)
            .map_err(Error::Output)?;

        for copy in 0..=repeat {
            trace!(
                "Sending message {} of {}, {} bits",
                u32::from(copy) + 1,
                u32::from(repeat) + 1,
                bits.len_bits()
            );
            self.send_message(&bits)?;
        }
        Ok(())
    }

    fn send_message(&mut self, bits: &BitSequence<'_>) -> Result<(), O::Error> {
        let timing = self.config.timing;
        let order = self.config.bit_order;

        self.mark(timing.header_mark)?;
        self.space(timing.header_space)?;

        for bit in (0..bits.split_bit()).filter_map(|index| bits.bit(index, order)) {
            self.send_bit(bit)?;
        }

        for shift in (0..FOOTER_BITS).rev() {
            self.send_bit((FOOTER >> shift) & 1 == 1)?;
        }
        self.mark(timing.bit_mark)?;
        self.space(timing.message_space)?;

        for bit in (bits.split_bit()..bits.len_bits()).filter_map(|index| bits.bit(index, order)) {
            self.send_bit(bit)?;
        }

        self.mark(timing.bit_mark)?;
        self.space(timing.message_space)
    }

    fn send_bit(&mut self, bit: bool) -> Result<(), O::Error> {
        let timing = self.config.timing;
        self.mark(timing.bit_mark)?;
        self.space(timing.bit_space(bit))
    }

    fn mark(&mut self, duration: fugit::MicrosDurationU32) -> Result<(), O::Error> {
        self.output.mark(duration).map_err(Error::Output)
    }

    fn space(&mut self, duration: fugit::MicrosDurationU32) -> Result<(), O::Error> {
        self.output.space(duration).map_err(Error::Output)
    }
}
