//! Distance sampling: ultrasonic drivers and the aggregating [`DistanceSampler`].
//!
//! The sampler owns both rangers plus the delay and clock they share, and
//! serves the [`RangingPort`] to the control loop.  Pin faults are logged
//! and reported as "no echo" so a flaky sensor never stops the loop.

pub mod ultrasonic;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{ClockPort, RangingPort};
use crate::config;
use ultrasonic::UltrasonicSensor;

/// Which ranger to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorId {
    /// Long-range sensor watching for visitors walking up.
    Approach,
    /// Short-range sensor watching for visitors engaging up close.
    Interaction,
}

/// One ranging result in centimetres.  Readings at or below zero, or not
/// finite, mean no echo came back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceReading {
    cm: f32,
}

impl DistanceReading {
    /// Reading for a ping that heard nothing.
    pub const NO_ECHO: Self = Self { cm: 0.0 };

    pub const fn from_cm(cm: f32) -> Self {
        Self { cm }
    }

    /// Convert a round-trip echo time to a one-way distance.
    pub fn from_echo_us(echo_us: u32) -> Self {
        Self {
            cm: echo_us as f32 * config::SPEED_OF_SOUND_CM_PER_US / 2.0,
        }
    }

    /// Raw distance as measured.
    pub fn cm(&self) -> f32 {
        self.cm
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.cm.is_finite() && self.cm > 0.0)
    }

    /// Distance for threshold comparisons: "no echo" reads as infinitely
    /// far, never as present.
    pub fn effective_cm(&self) -> f32 {
        if self.is_degenerate() {
            f32::INFINITY
        } else {
            self.cm
        }
    }
}

/// Both rangers plus the timing resources they share.
pub struct DistanceSampler<Trig, Echo, D, C> {
    approach: UltrasonicSensor<Trig, Echo>,
    interaction: UltrasonicSensor<Trig, Echo>,
    delay: D,
    clock: C,
}

impl<Trig, Echo, D, C> DistanceSampler<Trig, Echo, D, C>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    C: ClockPort,
{
    pub fn new(
        approach: UltrasonicSensor<Trig, Echo>,
        interaction: UltrasonicSensor<Trig, Echo>,
        delay: D,
        clock: C,
    ) -> Self {
        Self {
            approach,
            interaction,
            delay,
            clock,
        }
    }
}

impl<Trig, Echo, D, C> RangingPort for DistanceSampler<Trig, Echo, D, C>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    C: ClockPort,
{
    fn sample(&mut self, sensor: SensorId) -> DistanceReading {
        let ranger = match sensor {
            SensorId::Approach => &mut self.approach,
            SensorId::Interaction => &mut self.interaction,
        };
        match ranger.measure(&mut self.delay, &self.clock) {
            Ok(reading) => reading,
            Err(e) => {
                warn!("RANGE | {:?} sensor failed: {}", sensor, e);
                DistanceReading::NO_ECHO
            }
        }
    }
}
