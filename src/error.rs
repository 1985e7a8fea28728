//! Unified error types for the sculpture firmware.
//!
//! A single `Error` enum that every driver converts into, keeping the
//! bring-up path and the adapters' logging uniform.  All variants are
//! `Copy` so they can be passed around the control loop without allocation.
//!
//! None of these errors ever halt the loop: the port boundaries collapse
//! them into degenerate readings or log lines.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible driver operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A ranging sensor could not be triggered or read.
    Sensor(SensorError),
    /// A servo bus transaction failed.
    Actuator(ActuatorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Driving the trigger pin failed.
    TriggerWriteFailed,
    /// Reading the echo pin failed.
    EchoReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TriggerWriteFailed => write!(f, "trigger write failed"),
            Self::EchoReadFailed => write!(f, "echo read failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// I²C write to the PWM controller failed.
    BusWriteFailed,
    /// I²C read from the PWM controller failed.
    BusReadFailed,
    /// Channel index beyond the controller's 16 outputs.
    InvalidChannel(u8),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusWriteFailed => write!(f, "PWM bus write failed"),
            Self::BusReadFailed => write!(f, "PWM bus read failed"),
            Self::InvalidChannel(ch) => write!(f, "invalid PWM channel {ch}"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
