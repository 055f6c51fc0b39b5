//! The boundary with the IR LED driver.
//!
//! The codec never touches hardware or timers itself. It asks a
//! [`PulseOutput`] to modulate the carrier for a duration (a mark) or to stay
//! dark for a duration (a space). Blocking drivers delay inside these calls;
//! table driven peripherals can record into a [`PulseTrain`] instead.

use fugit::{KilohertzU32, MicrosDurationU32};
use thiserror::Error;

/// Timing primitives used to put a message on the air.
pub trait PulseOutput {
    type Error: core::fmt::Debug;

    /// Select the carrier frequency for subsequent marks.
    fn set_carrier(&mut self, frequency: KilohertzU32) -> Result<(), Self::Error>;

    /// Emit the carrier for `duration`.
    fn mark(&mut self, duration: MicrosDurationU32) -> Result<(), Self::Error>;

    /// Stay idle for `duration`.
    fn space(&mut self, duration: MicrosDurationU32) -> Result<(), Self::Error>;
}

impl<T: PulseOutput + ?Sized> PulseOutput for &mut T {
    type Error = T::Error;

    fn set_carrier(&mut self, frequency: KilohertzU32) -> Result<(), Self::Error> {
        T::set_carrier(self, frequency)
    }

    fn mark(&mut self, duration: MicrosDurationU32) -> Result<(), Self::Error> {
        T::mark(self, duration)
    }

    fn space(&mut self, duration: MicrosDurationU32) -> Result<(), Self::Error> {
        T::space(self, duration)
    }
}

/// One timed interval on the IR line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    Mark(MicrosDurationU32),
    Space(MicrosDurationU32),
}

impl Pulse {
    pub fn duration(&self) -> MicrosDurationU32 {
        match *self {
            Self::Mark(duration) | Self::Space(duration) => duration,
        }
    }

    pub fn is_mark(&self) -> bool {
        matches!(self, Self::Mark(_))
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseTrainError {
    #[error("Pulse train is full")]
    Full,
}

/// Records a transmission into a fixed buffer rather than emitting it.
///
/// Useful for peripherals which are handed a table of durations (RMT, timer
/// DMA) and for inspecting what would be sent.
#[derive(Debug, Clone, Default)]
pub struct PulseTrain<const N: usize> {
    carrier: Option<KilohertzU32>,
    pulses: heapless::Vec<Pulse, N>,
}

impl<const N: usize> PulseTrain<N> {
    pub fn new() -> Self {
        Self {
            carrier: None,
            pulses: heapless::Vec::new(),
        }
    }

    /// Carrier requested by the last transmission, if any.
    pub fn carrier(&self) -> Option<KilohertzU32> {
        self.carrier
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Total time taken by the recorded pulses.
    pub fn total_duration(&self) -> MicrosDurationU32 {
        self.pulses
            .iter()
            .fold(MicrosDurationU32::from_ticks(0), |acc, pulse| acc + pulse.duration())
    }

    pub fn clear(&mut self) {
        self.carrier = None;
        self.pulses.clear();
    }

    fn push(&mut self, pulse: Pulse) -> Result<(), PulseTrainError> {
        self.pulses.push(pulse).map_err(|_| PulseTrainError::Full)
    }
}

impl<const N: usize> PulseOutput for PulseTrain<N> {
    type Error = PulseTrainError;

    fn set_carrier(&mut self, frequency: KilohertzU32) -> Result<(), Self::Error> {
        self.carrier = Some(frequency);
        Ok(())
    }

    fn mark(&mut self, duration: MicrosDurationU32) -> Result<(), Self::Error> {
        self.push(Pulse::Mark(duration))
    }

    fn space(&mut self, duration: MicrosDurationU32) -> Result<(), Self::Error> {
        self.push(Pulse::Space(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fugit::ExtU32;

    #[test]
    fn pulse_train_records_in_order() {
        let mut train: PulseTrain<4> = PulseTrain::new();
        assert_eq!(train.carrier(), None);

        train.set_carrier(KilohertzU32::from_raw(38)).unwrap();
        train.mark(620.micros()).unwrap();
        train.space(1600.micros()).unwrap();

        assert_eq!(train.carrier(), Some(KilohertzU32::from_raw(38)));
        assert_eq!(
            train.pulses(),
            &[Pulse::Mark(620.micros()), Pulse::Space(1600.micros())]
        );
        assert_eq!(train.total_duration().to_micros(), 2220);
    }

    #[test]
    fn pulse_train_overflow() {
        let mut train: PulseTrain<2> = PulseTrain::new();
        train.mark(1.micros()).unwrap();
        train.space(1.micros()).unwrap();
        assert_eq!(train.mark(1.micros()), Err(PulseTrainError::Full));
        assert_eq!(train.pulses().len(), 2);
    }

    #[test]
    fn pulse_train_clear() {
        let mut train: PulseTrain<2> = PulseTrain::new();
        train.set_carrier(KilohertzU32::from_raw(38)).unwrap();
        train.mark(1.micros()).unwrap();
        train.clear();
        assert!(train.pulses().is_empty());
        assert_eq!(train.carrier(), None);
    }

    #[test]
    fn output_through_mutable_reference() {
        fn emit<O: PulseOutput>(mut output: O) {
            output.space(540.micros()).unwrap();
        }

        let mut train: PulseTrain<1> = PulseTrain::new();
        emit(&mut train);
        let pulse = train.pulses()[0];
        assert!(!pulse.is_mark());
        assert_eq!(pulse, Pulse::Space(540.micros()));
    }
}
