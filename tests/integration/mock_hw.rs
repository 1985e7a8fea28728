//! Mock adapters for integration tests.
//!
//! Every port call lands in one shared [`Journal`] so tests can assert on
//! the full call history, including the order of concerns within a pass,
//! without touching real GPIO, I²C or UART.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use sculpture::app::events::HostEvent;
use sculpture::app::ports::{CommandSource, EventSink, RangingPort, ServoPort};
use sculpture::link::codec::LineBuf;
use sculpture::sensors::{DistanceReading, SensorId};

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Drive { channel: u8, pulse_width_us: u16 },
    Sample(SensorId),
    Emit(HostEvent),
    PollLine,
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

#[allow(dead_code)]
impl Journal {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Emit(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// ── MockHardware ──────────────────────────────────────────────

/// Rangers return whatever the test last set; servo writes are recorded.
pub struct MockHardware {
    pub journal: Journal,
    pub approach: DistanceReading,
    pub interaction: DistanceReading,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            approach: DistanceReading::NO_ECHO,
            interaction: DistanceReading::NO_ECHO,
        }
    }

    pub fn set_ranges(&mut self, approach_cm: f32, interaction_cm: f32) {
        self.approach = DistanceReading::from_cm(approach_cm);
        self.interaction = DistanceReading::from_cm(interaction_cm);
    }
}

impl RangingPort for MockHardware {
    fn sample(&mut self, sensor: SensorId) -> DistanceReading {
        self.journal.push(Call::Sample(sensor));
        match sensor {
            SensorId::Approach => self.approach,
            SensorId::Interaction => self.interaction,
        }
    }
}

impl ServoPort for MockHardware {
    fn drive(&mut self, channel: u8, pulse_width_us: u16) {
        self.journal.push(Call::Drive {
            channel,
            pulse_width_us,
        });
    }
}

// ── MockLink ──────────────────────────────────────────────────

/// Queued inbound lines; outbound events go to the journal.
pub struct MockLink {
    pub journal: Journal,
    pub inbound: VecDeque<String>,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            inbound: VecDeque::new(),
        }
    }

    pub fn send(&mut self, line: &str) {
        self.inbound.push_back(line.to_owned());
    }
}

impl CommandSource for MockLink {
    fn poll_line(&mut self) -> Option<LineBuf> {
        self.journal.push(Call::PollLine);
        let line = self.inbound.pop_front()?;
        LineBuf::try_from(line.as_str()).ok()
    }
}

impl EventSink for MockLink {
    fn emit(&mut self, event: HostEvent) {
        self.journal.push(Call::Emit(event));
    }
}
