use crate::{
    config::TransmitConfig,
    error::Result,
    pulse::PulseOutput,
    register::{STATE_LENGTH, StateRegister},
    transmitter::Transmitter,
};

/// You can create a GreeRemote using any driver which implements [PulseOutput].
///
/// Edit the desired state through [Self::state_mut], then call [Self::send].
/// Nothing is transmitted until then.
pub struct GreeRemote<O: PulseOutput> {
    transmitter: Transmitter<O>,
    state: StateRegister,
}

impl<O: PulseOutput> GreeRemote<O> {
    /// Create a remote with the default protocol settings.
    pub fn new(output: O) -> Self {
        Self::with_config(output, TransmitConfig::default())
    }

    pub fn with_config(output: O, config: TransmitConfig) -> Self {
        Self {
            state: StateRegister::new(config.checksum),
            transmitter: Transmitter::new(output, config),
        }
    }

    pub fn state(&self) -> &StateRegister {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateRegister {
        &mut self.state
    }

    /// Restore the known good default state.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// The current state with a fresh checksum.
    pub fn raw_bytes(&mut self) -> [u8; STATE_LENGTH] {
        self.state.raw_bytes()
    }

    /// Transmit the current state, repeated as configured.
    pub fn send(&mut self) -> Result<(), O::Error> {
        let repeat = self.transmitter.config().repeat;
        self.send_repeat(repeat)
    }

    /// Transmit the current state `repeat + 1` times.
    pub fn send_repeat(&mut self, repeat: u16) -> Result<(), O::Error> {
        let bytes = self.state.raw_bytes();
        self.transmitter.send_bytes(&bytes, repeat)
    }

    pub fn transmitter(&mut self) -> &mut Transmitter<O> {
        &mut self.transmitter
    }

    /// Give back the output driver.
    pub fn release(self) -> O {
        self.transmitter.release()
    }
}
