//! GPIO / peripheral pin assignments for the sculpture controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Ultrasonic rangers (HC-SR04)
// ---------------------------------------------------------------------------

/// Approach sensor trigger (digital output).
pub const APPROACH_TRIG_GPIO: i32 = 2;
/// Approach sensor echo (digital input, 5 V level-shifted).
pub const APPROACH_ECHO_GPIO: i32 = 3;

/// Interaction sensor trigger (digital output).
pub const INTERACTION_TRIG_GPIO: i32 = 4;
/// Interaction sensor echo (digital input, 5 V level-shifted).
pub const INTERACTION_ECHO_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// I²C bus to the PCA9685 servo controller
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
/// 400 kHz fast mode; the PCA9685 supports up to 1 MHz.
pub const I2C_BAUD_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// UART to the host computer
// ---------------------------------------------------------------------------

/// UART1 carries the line protocol; UART0 stays the log console.
pub const HOST_UART_TX_GPIO: i32 = 17;
pub const HOST_UART_RX_GPIO: i32 = 18;
