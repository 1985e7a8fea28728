//! One-shot hardware peripheral initialization.
//!
//! Builds the ranging GPIOs, the servo I²C bus and the host UART from the
//! assignments in [`pins`](crate::pins).  Called once from `main()` before
//! the control loop starts.  Host builds have nothing to bring up.

#[cfg(feature = "espidf")]
pub use esp::*;

#[cfg(feature = "espidf")]
mod esp {
    use esp_idf_hal::delay::Ets;
    use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, Input, Output, PinDriver};
    use esp_idf_hal::i2c::{I2C0, I2cConfig, I2cDriver};
    use esp_idf_hal::uart::{UART1, UartDriver, config::Config as UartConfig};
    use esp_idf_hal::units::Hertz;
    use esp_idf_sys::EspError;
    use log::{error, info};

    use crate::adapters::time::Esp32Clock;
    use crate::config::{self, SculptureConfig};
    use crate::drivers::pca9685::{DEFAULT_ADDRESS, Pca9685};
    use crate::error::{Error, Result};
    use crate::pins;
    use crate::sensors::DistanceSampler;
    use crate::sensors::ultrasonic::UltrasonicSensor;

    pub type EspTrigPin = PinDriver<'static, AnyOutputPin, Output>;
    pub type EspEchoPin = PinDriver<'static, AnyInputPin, Input>;
    pub type EspSampler = DistanceSampler<EspTrigPin, EspEchoPin, Ets, Esp32Clock>;
    pub type EspServoBus = Pca9685<I2cDriver<'static>>;

    fn init_failed(what: &'static str) -> impl FnOnce(EspError) -> Error {
        move |e| {
            error!("hw_init: {} failed: {}", what, e);
            Error::Init(what)
        }
    }

    fn ranger(trig_gpio: i32, echo_gpio: i32) -> Result<UltrasonicSensor<EspTrigPin, EspEchoPin>> {
        // SAFETY: each GPIO number in `pins` is claimed exactly once, here,
        // before the control loop starts.
        let trig = unsafe { AnyOutputPin::new(trig_gpio) };
        let echo = unsafe { AnyInputPin::new(echo_gpio) };
        let mut trig = PinDriver::output(trig).map_err(init_failed("trigger GPIO"))?;
        trig.set_low().map_err(init_failed("trigger GPIO"))?;
        let echo = PinDriver::input(echo).map_err(init_failed("echo GPIO"))?;
        Ok(UltrasonicSensor::new(trig, echo, config::ECHO_TIMEOUT_US))
    }

    /// Both ultrasonic rangers behind one [`DistanceSampler`].
    pub fn build_sampler() -> Result<EspSampler> {
        let approach = ranger(pins::APPROACH_TRIG_GPIO, pins::APPROACH_ECHO_GPIO)?;
        let interaction = ranger(pins::INTERACTION_TRIG_GPIO, pins::INTERACTION_ECHO_GPIO)?;
        info!(
            "hw_init: rangers on trig/echo {}/{} and {}/{}",
            pins::APPROACH_TRIG_GPIO,
            pins::APPROACH_ECHO_GPIO,
            pins::INTERACTION_TRIG_GPIO,
            pins::INTERACTION_ECHO_GPIO
        );
        Ok(DistanceSampler::new(approach, interaction, Ets, Esp32Clock::new()))
    }

    /// Bring up I²C0 with the PWM controller on it.  The controller itself
    /// is programmed later by [`Pca9685::begin`].
    pub fn build_servo_bus(i2c: I2C0) -> Result<EspServoBus> {
        // SAFETY: see `ranger`.
        let sda = unsafe { AnyIOPin::new(pins::I2C_SDA_GPIO) };
        let scl = unsafe { AnyIOPin::new(pins::I2C_SCL_GPIO) };
        let bus_cfg = I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ));
        let driver = I2cDriver::new(i2c, sda, scl, &bus_cfg).map_err(init_failed("I2C0"))?;

        info!("hw_init: I2C0 on SDA {} / SCL {}", pins::I2C_SDA_GPIO, pins::I2C_SCL_GPIO);
        Ok(Pca9685::new(driver, DEFAULT_ADDRESS))
    }

    /// UART1 to the host computer.  UART0 stays the log console.
    pub fn build_host_uart(uart: UART1, cfg: &SculptureConfig) -> Result<UartDriver<'static>> {
        // SAFETY: see `ranger`.
        let tx = unsafe { AnyIOPin::new(pins::HOST_UART_TX_GPIO) };
        let rx = unsafe { AnyIOPin::new(pins::HOST_UART_RX_GPIO) };
        let uart_cfg = UartConfig::default().baudrate(Hertz(cfg.serial_baud));
        let driver = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &uart_cfg,
        )
        .map_err(init_failed("UART1"))?;
        info!("hw_init: host UART1 at {} baud", cfg.serial_baud);
        Ok(driver)
    }
}
