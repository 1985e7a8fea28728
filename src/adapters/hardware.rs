//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the distance sampler and the PWM controller, exposing them through
//! [`RangingPort`] and [`ServoPort`].  Bus errors stop here: they are
//! counted and logged, and the control loop never sees them.

use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::{RangingPort, ServoPort};
use crate::drivers::pca9685::Pca9685;
use crate::sensors::{DistanceReading, SensorId};

/// After the first failure, log only every N-th servo write failure.
pub const ACTUATOR_LOG_EVERY: u32 = 500;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<R, I2C> {
    ranging: R,
    servos: Pca9685<I2C>,
    servo_failures: u32,
}

impl<R: RangingPort, I2C: I2c> HardwareAdapter<R, I2C> {
    pub fn new(ranging: R, servos: Pca9685<I2C>) -> Self {
        Self {
            ranging,
            servos,
            servo_failures: 0,
        }
    }

    /// Servo writes that failed since boot.
    pub fn servo_failures(&self) -> u32 {
        self.servo_failures
    }
}

// ── RangingPort implementation ────────────────────────────────

impl<R: RangingPort, I2C: I2c> RangingPort for HardwareAdapter<R, I2C> {
    fn sample(&mut self, sensor: SensorId) -> DistanceReading {
        self.ranging.sample(sensor)
    }
}

// ── ServoPort implementation ──────────────────────────────────

impl<R: RangingPort, I2C: I2c> ServoPort for HardwareAdapter<R, I2C> {
    fn drive(&mut self, channel: u8, pulse_width_us: u16) {
        if let Err(e) = self.servos.write_microseconds(channel, pulse_width_us) {
            if self.servo_failures % ACTUATOR_LOG_EVERY == 0 {
                warn!(
                    "SERVO | ch{} {}us failed: {} ({} failures so far)",
                    channel,
                    pulse_width_us,
                    e,
                    self.servo_failures + 1
                );
            }
            self.servo_failures = self.servo_failures.wrapping_add(1);
        }
    }
}
