//! Application core — pure control logic, zero I/O.
//!
//! This module ties the interaction FSM, the movement director, the leaf
//! animator and the host protocol into one cooperative loop pass.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
