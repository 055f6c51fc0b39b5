//! This crate encodes the infrared remote control protocol used by Gree air conditioners and their many rebrands.
//!
//! It supports `no-std` environments by use of the `no_std` feature flag.
//!
//! The crate does not drive any hardware itself. Provide an implementation of [`pulse::PulseOutput`]
//! for your IR LED driver (a PWM channel at the carrier frequency plus a delay, an RMT channel, ...),
//! or render into a [`pulse::PulseTrain`] and feed that to your peripheral.
//!
//! A message is 8 bytes of state sent as:
//! * Header: 9000us mark, 4000us space.
//! * First 4 bytes, each bit a 620us mark then 1600us (1) or 540us (0) space.
//! * Footer: the 3 bits `010`.
//! * 620us mark, 19000us space.
//! * Last 4 bytes.
//! * 620us mark, 19000us space.
//!
//! The carrier is 38kHz.
//!
//! ```
//! use gree_ir::pulse::PulseTrain;
//! use gree_ir::remote::GreeRemote;
//! use gree_ir::transmitter::MESSAGE_PULSES;
//! use gree_ir::types::{FanSpeed, Mode, VaneVertical};
//!
//! let mut remote = GreeRemote::new(PulseTrain::<MESSAGE_PULSES>::new());
//!
//! let state = remote.state_mut();
//! state.on();
//! state.set_mode(Mode::Cool);
//! state.set_fan_speed(FanSpeed::High);
//! state.set_temperature_c(24);
//! state.set_vane_vertical(VaneVertical::Middle);
//!
//! remote.send().unwrap();
//! assert_eq!(remote.raw_bytes(), [0x39, 0x08, 0x00, 0x00, 0x04, 0x20, 0x00, 0xD0]);
//! ```

#![cfg_attr(feature = "no_std", no_std)]

pub mod config;
pub mod error;
pub mod pulse;
pub mod register;
pub mod remote;
pub mod timing;
pub mod transmitter;
pub mod types;

#[cfg(test)]
mod mock_output;
