//! Monotonic clock adapter.
//!
//! - **`espidf`** — wraps `esp_timer_get_time()` from the ESP-IDF
//!   high-resolution timer (microsecond precision, monotonic).
//! - **host** — uses `std::time::Instant` for simulation and tests.

use crate::app::ports::ClockPort;

/// Time since boot for the ESP32-S3 platform.
pub struct Esp32Clock {
    #[cfg(not(feature = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(feature = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for Esp32Clock {
    #[cfg(feature = "espidf")]
    fn now_us(&self) -> u64 {
        // SAFETY: read-only access to the free-running system timer.
        (unsafe { esp_idf_sys::esp_timer_get_time() }) as u64
    }

    #[cfg(not(feature = "espidf"))]
    fn now_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}
