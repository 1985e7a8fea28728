//! Leaf sculpture firmware library.
//!
//! Exposes the control loop and its building blocks for integration
//! testing.  Everything that needs ESP-IDF is gated behind the `espidf`
//! feature inside each module; the rest builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod animation;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod link;
pub mod movement;
pub mod pins;
pub mod scheduler;
pub mod sensors;
