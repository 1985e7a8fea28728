//! Servo bus driver and one-shot peripheral bring-up.

pub mod hw_init;
pub mod pca9685;
