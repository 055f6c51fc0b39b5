//! Our error types for the IR codec.

use thiserror::Error;

pub type Result<T, O> = core::result::Result<T, Error<O>>;

/// Errors raised while driving the pulse output.
///
/// Malformed transmit requests are not errors; they are skipped.
#[derive(Error, Debug)]
pub enum Error<O: core::fmt::Debug> {
    #[error("Pulse output error")]
    Output(O),
}

/// Field which rejected a value in one of the strict `try_set_*` setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mode,
    FanSpeed,
    Temperature,
    VaneVertical,
}

/// Returned by the strict setters instead of silently normalizing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Value {value} out of range for {field:?}")]
    OutOfRange { field: Field, value: u8 },
    #[error("Unknown code {value} for {field:?}")]
    UnknownCode { field: Field, value: u8 },
}
