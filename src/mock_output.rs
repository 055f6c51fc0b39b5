//! We use this mocking module in unit tests to emulate the IR LED driver.

use fugit::{KilohertzU32, MicrosDurationU32};

use crate::pulse::{Pulse, PulseOutput};

/// Everything the driver was asked to do, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Carrier(KilohertzU32),
    Pulse(Pulse),
}

/// Our mock type used to emulate a pulse output.
pub struct MockOutput {
    /// Calls made to the mock output
    events: heapless::Vec<Event, 2048>,
    /// Number of pulses to accept before failing, if set
    fail_after: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MockOutputError {
    /// Simulated driver failure
    SimulatedError,
    /// Event log is full
    BufferOverflow,
}

impl PulseOutput for MockOutput {
    type Error = MockOutputError;

    fn set_carrier(&mut self, frequency: KilohertzU32) -> Result<(), Self::Error> {
        self.record(Event::Carrier(frequency))
    }

    fn mark(&mut self, duration: MicrosDurationU32) -> Result<(), Self::Error> {
        self.record(Event::Pulse(Pulse::Mark(duration)))
    }

    fn space(&mut self, duration: MicrosDurationU32) -> Result<(), Self::Error> {
        self.record(Event::Pulse(Pulse::Space(duration)))
    }
}

impl MockOutput {
    /// Create a new MockOutput with an empty event log
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
            fail_after: None,
        }
    }

    /// Fail every call once `pulses` pulses have been recorded
    pub fn set_fail_after(&mut self, pulses: Option<usize>) {
        self.fail_after = pulses;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded pulses, without carrier changes
    pub fn pulses(&self) -> heapless::Vec<Pulse, 2048> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Pulse(pulse) => Some(*pulse),
                Event::Carrier(_) => None,
            })
            .collect()
    }

    pub fn carrier_calls(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Carrier(_)))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, event: Event) -> Result<(), MockOutputError> {
        if let Some(limit) = self.fail_after {
            if self.pulses().len() >= limit {
                return Err(MockOutputError::SimulatedError);
            }
        }
        self.events
            .push(event)
            .map_err(|_| MockOutputError::BufferOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fugit::ExtU32;

    #[test]
    fn test_new_mock_output() {
        let mock = MockOutput::new();
        assert!(mock.events().is_empty());
        assert_eq!(mock.fail_after, None);
    }

    #[test]
    fn test_records_calls_in_order() {
        let mut mock = MockOutput::new();
        mock.set_carrier(KilohertzU32::from_raw(38)).unwrap();
        mock.mark(9000.micros()).unwrap();
        mock.space(4000.micros()).unwrap();

        assert_eq!(
            mock.events(),
            &[
                Event::Carrier(KilohertzU32::from_raw(38)),
                Event::Pulse(Pulse::Mark(9000.micros())),
                Event::Pulse(Pulse::Space(4000.micros())),
            ]
        );
        assert_eq!(mock.carrier_calls(), 1);
        assert_eq!(mock.pulses().len(), 2);
    }

    #[test]
    fn test_fail_after() {
        let mut mock = MockOutput::new();
        mock.set_fail_after(Some(1));
        assert!(mock.mark(620.micros()).is_ok());
        assert_eq!(
            mock.space(540.micros()),
            Err(MockOutputError::SimulatedError)
        );
        assert_eq!(mock.pulses().len(), 1);

        mock.set_fail_after(None);
        assert!(mock.space(540.micros()).is_ok());
    }

    #[test]
    fn test_clear() {
        let mut mock = MockOutput::new();
        mock.mark(620.micros()).unwrap();
        mock.clear();
        assert!(mock.events().is_empty());
    }
}
