//! HC-SR04 style ultrasonic ranger.
//!
//! Measurement cycle:
//! ```text
//!  TRIG  ──┐  2µs  ┌──10µs──┐
//!          └───────┘        └──────────────────────────────
//!  ECHO  ───────────────────────┐  width ∝ distance  ┌─────
//!                               └────────────────────┘
//! ```
//! Pulled low for 2 µs to settle, raised for 10 µs to fire a burst, then
//! the echo pin's high time is measured against the microsecond clock.
//! An echo still high from an earlier ping is waited out first so only a
//! fresh rising edge is timed.  Every wait is bounded by the echo timeout;
//! a missed edge yields a zero-width echo, which reads as "no echo".
//!
//! Generic over `embedded_hal` 1.0 digital pins so the same driver runs on
//! ESP-IDF `PinDriver`s and on the mock pins in the tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::DistanceReading;
use crate::app::ports::ClockPort;
use crate::config;
use crate::error::{Result, SensorError};

pub struct UltrasonicSensor<Trig, Echo> {
    trig: Trig,
    echo: Echo,
    timeout_us: u32,
}

impl<Trig: OutputPin, Echo: InputPin> UltrasonicSensor<Trig, Echo> {
    pub fn new(trig: Trig, echo: Echo, timeout_us: u32) -> Self {
        Self {
            trig,
            echo,
            timeout_us,
        }
    }

    /// Fire one ping and measure its echo.  Blocks for at most three echo
    /// timeouts.
    pub fn measure(
        &mut self,
        delay: &mut impl DelayNs,
        clock: &impl ClockPort,
    ) -> Result<DistanceReading> {
        self.trigger(delay)?;
        let echo_us = self.echo_width_us(clock)?;
        Ok(DistanceReading::from_echo_us(echo_us))
    }

    fn trigger(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        self.trig
            .set_low()
            .map_err(|_| SensorError::TriggerWriteFailed)?;
        delay.delay_us(config::ULTRASONIC_CLEAR_PULSE_US);
        self.trig
            .set_high()
            .map_err(|_| SensorError::TriggerWriteFailed)?;
        delay.delay_us(config::ULTRASONIC_TRIGGER_PULSE_US);
        self.trig
            .set_low()
            .map_err(|_| SensorError::TriggerWriteFailed)?;
        Ok(())
    }

    /// High time of a fresh echo pulse in µs, or 0 if any edge timed out.
    fn echo_width_us(&mut self, clock: &impl ClockPort) -> Result<u32> {
        let start = clock.now_us();
        let Some(idle) = self.wait_for_level(false, clock, start)? else {
            return Ok(0);
        };
        let Some(rise) = self.wait_for_level(true, clock, idle)? else {
            return Ok(0);
        };
        let Some(fall) = self.wait_for_level(false, clock, rise)? else {
            return Ok(0);
        };
        Ok(u32::try_from(fall.saturating_sub(rise)).unwrap_or(u32::MAX))
    }

    /// Spin until the echo pin reads `high`, or `timeout_us` past `since`.
    fn wait_for_level(
        &mut self,
        high: bool,
        clock: &impl ClockPort,
        since: u64,
    ) -> Result<Option<u64>> {
        let deadline = since.saturating_add(u64::from(self.timeout_us));
        loop {
            let now = clock.now_us();
            let level = self
                .echo
                .is_high()
                .map_err(|_| SensorError::EchoReadFailed)?;
            if level == high {
                return Ok(Some(now));
            }
            if now >= deadline {
                return Ok(None);
            }
        }
    }
}
