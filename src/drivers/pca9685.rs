//! PCA9685 16-channel, 12-bit PWM controller on I²C.
//!
//! Each leaf servo hangs off one channel.  The controller runs from its
//! internal 25 MHz oscillator; the output frequency is set through the
//! prescaler, and a pulse is expressed as on/off tick counts within one
//! 4096-tick period.
//!
//! ```text
//! prescale = round(osc / (4096 × f)) − 1      (clamped 3..=255)
//! tick_us  = (prescale + 1) × 1e6 / osc
//! ticks    = pulse_us / tick_us
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::info;

use crate::error::{ActuatorError, Result};

/// Default 7-bit bus address with all address pins low.
pub const DEFAULT_ADDRESS: u8 = 0x40;
/// Internal oscillator frequency.
pub const OSCILLATOR_HZ: u32 = 25_000_000;
/// Number of PWM outputs.
pub const CHANNELS: u8 = 16;

const REG_MODE1: u8 = 0x00;
const REG_LED0_ON_L: u8 = 0x06;
const REG_PRESCALE: u8 = 0xFE;

const MODE1_RESTART: u8 = 0x80;
const MODE1_AI: u8 = 0x20;
const MODE1_SLEEP: u8 = 0x10;

const PRESCALE_MIN: u8 = 3;
const PRESCALE_MAX: u8 = 255;
/// Power-on prescale value (≈200 Hz).
const PRESCALE_DEFAULT: u8 = 30;

const TICKS_PER_PERIOD: u16 = 4096;

/// Prescale register value for `freq_hz` from an `oscillator_hz` clock.
pub fn prescale_for(oscillator_hz: u32, freq_hz: u32) -> u8 {
    let freq = freq_hz.max(1) as f32;
    let raw = oscillator_hz as f32 / (f32::from(TICKS_PER_PERIOD) * freq) + 0.5 - 1.0;
    raw.clamp(f32::from(PRESCALE_MIN), f32::from(PRESCALE_MAX)) as u8
}

pub struct Pca9685<I2C> {
    i2c: I2C,
    address: u8,
    oscillator_hz: u32,
    /// Last prescale written, used for µs → tick conversion.
    prescale: u8,
}

impl<I2C: I2c> Pca9685<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            oscillator_hz: OSCILLATOR_HZ,
            prescale: PRESCALE_DEFAULT,
        }
    }

    /// Reset the chip and program the output frequency.
    pub fn begin(&mut self, freq_hz: u32, delay: &mut impl DelayNs) -> Result<()> {
        self.reset(delay)?;
        self.set_pwm_frequency(freq_hz, delay)?;
        info!(
            "PCA9685 @0x{:02x}: {} Hz (prescale {})",
            self.address, freq_hz, self.prescale
        );
        Ok(())
    }

    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        self.write_reg(REG_MODE1, MODE1_RESTART)?;
        delay.delay_ms(10);
        Ok(())
    }

    /// The prescaler only latches while the oscillator sleeps, so the
    /// sequence is sleep, write, wake, restart.
    pub fn set_pwm_frequency(&mut self, freq_hz: u32, delay: &mut impl DelayNs) -> Result<()> {
        let prescale = prescale_for(self.oscillator_hz, freq_hz);

        let old_mode = self.read_reg(REG_MODE1)?;
        let sleep_mode = (old_mode & !MODE1_RESTART) | MODE1_SLEEP;
        self.write_reg(REG_MODE1, sleep_mode)?;
        self.write_reg(REG_PRESCALE, prescale)?;
        self.write_reg(REG_MODE1, old_mode)?;
        delay.delay_ms(5);
        self.write_reg(REG_MODE1, old_mode | MODE1_RESTART | MODE1_AI)?;

        self.prescale = prescale;
        Ok(())
    }

    pub fn prescale(&self) -> u8 {
        self.prescale
    }

    pub fn bus(&self) -> &I2C {
        &self.i2c
    }

    /// Program raw on/off tick positions for `channel`.
    pub fn set_pwm(&mut self, channel: u8, on: u16, off: u16) -> Result<()> {
        if channel >= CHANNELS {
            return Err(ActuatorError::InvalidChannel(channel).into());
        }
        let [on_l, on_h] = on.to_le_bytes();
        let [off_l, off_h] = off.to_le_bytes();
        let frame = [REG_LED0_ON_L + 4 * channel, on_l, on_h, off_l, off_h];
        self.i2c
            .write(self.address, &frame)
            .map_err(|_| ActuatorError::BusWriteFailed)?;
        Ok(())
    }

    /// Tick count for a `pulse_us` pulse at the current prescale.
    pub fn ticks_for_us(&self, pulse_us: u16) -> u16 {
        let tick_us = (f32::from(self.prescale) + 1.0) * 1_000_000.0 / self.oscillator_hz as f32;
        let ticks = f32::from(pulse_us) / tick_us;
        // OFF registers are 12 bits wide; this bounds the encoding, not the pulse.
        (ticks as u16).min(TICKS_PER_PERIOD - 1)
    }

    /// Drive `channel` with a `pulse_us` high pulse each period.
    pub fn write_microseconds(&mut self, channel: u8, pulse_us: u16) -> Result<()> {
        let ticks = self.ticks_for_us(pulse_us);
        self.set_pwm(channel, 0, ticks)
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| ActuatorError::BusWriteFailed)?;
        Ok(())
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| ActuatorError::BusReadFailed)?;
        Ok(buf[0])
    }
}
