//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                  |
//! |------------|---------------|------------------------------|
//! | `hardware` | RangingPort   | HC-SR04 rangers (GPIO)       |
//! |            | ServoPort     | PCA9685 over I²C             |
//! | `time`     | ClockPort     | ESP32 high-resolution timer  |
//! | `uart`     | Transport     | ESP32 UART1 to the host      |

pub mod hardware;
pub mod time;
#[cfg(feature = "espidf")]
pub mod uart;
