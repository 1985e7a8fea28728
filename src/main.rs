//! Leaf sculpture firmware — main entry point.
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter           HostLink<UartTransport>  Esp32Clock │
//! │  (Ranging + Servo)         (Commands + Events)      (Clock)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            SculptureService (pure logic)               │    │
//! │  │  LeafAnimator · Presence FSM · MovementDirector        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  LoopSchedule: animate → sample → poll command, every pass     │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use sculpture::adapters::hardware::HardwareAdapter;
use sculpture::adapters::time::Esp32Clock;
use sculpture::adapters::uart::UartTransport;
use sculpture::app::ports::ClockPort;
use sculpture::app::service::SculptureService;
use sculpture::config::SculptureConfig;
use sculpture::drivers::hw_init;
use sculpture::link::HostLink;

fn main() -> Result<()> {
    // ── Platform init ─────────────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Leaf Sculpture v{}                ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SculptureConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config: could not serialise ({})", e),
    }

    // ── Peripherals ───────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    let sampler = hw_init::build_sampler()?;
    let mut servos = hw_init::build_servo_bus(peripherals.i2c0)?;
    if let Err(e) = servos.begin(config.servo_frequency_hz, &mut Ets) {
        warn!("PCA9685 bring-up failed, leaves will not move: {}", e);
    }
    let uart = hw_init::build_host_uart(peripherals.uart1, &config)?;

    let mut hw = HardwareAdapter::new(sampler, servos);
    let mut link = HostLink::new(UartTransport::new(uart));
    let clock = Esp32Clock::new();

    // ── Service ───────────────────────────────────────────────
    let settle_ms = config.startup_settle_ms;
    let mut app = SculptureService::new(config);
    app.start(&mut hw);
    FreeRtos::delay_ms(settle_ms);

    info!("System ready. Entering control loop.");

    loop {
        app.tick(clock.now_ms(), &mut hw, &mut link);
        // Let the idle task run so the task watchdog stays fed.
        FreeRtos::delay_ms(1);
    }
}
