//! End-to-end tests: bytes on the wire → HostLink → SculptureService → bytes.

use std::collections::VecDeque;

use crate::mock_hw::{Journal, MockHardware};

use sculpture::app::service::SculptureService;
use sculpture::config::{self, SculptureConfig};
use sculpture::fsm::InteractionState;
use sculpture::link::HostLink;
use sculpture::link::transport::Transport;
use sculpture::movement::MovementState;

/// In-memory serial port: queued inbound chunks, captured outbound bytes.
#[derive(Default)]
struct Loopback {
    rx: VecDeque<Vec<u8>>,
    tx: Vec<u8>,
}

impl Transport for Loopback {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let Some(chunk) = self.rx.pop_front() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.rx.push_front(chunk[n..].to_vec());
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }
}

struct Bench {
    app: SculptureService,
    hw: MockHardware,
    link: HostLink<Loopback>,
    now_ms: u64,
}

impl Bench {
    fn new() -> Self {
        let mut hw = MockHardware::new(Journal::default());
        let mut app = SculptureService::new(SculptureConfig::default());
        app.start(&mut hw);
        Self {
            app,
            hw,
            link: HostLink::new(Loopback::default()),
            now_ms: 0,
        }
    }

    fn host_sends(&mut self, bytes: &[u8]) {
        self.link.transport_mut().rx.push_back(bytes.to_vec());
    }

    fn pass(&mut self, approach_cm: f32, interaction_cm: f32) {
        self.hw.set_ranges(approach_cm, interaction_cm);
        self.now_ms += u64::from(config::SAMPLE_INTERVAL_MS);
        self.app.tick(self.now_ms, &mut self.hw, &mut self.link);
    }

    fn host_received(&mut self) -> String {
        let bytes = std::mem::take(&mut self.link.transport_mut().tx);
        String::from_utf8(bytes).expect("events are ASCII")
    }
}

#[test]
fn visit_is_reported_as_exact_lines() {
    let mut bench = Bench::new();
    bench.pass(25.0, 200.0);
    bench.pass(25.0, 5.0);
    bench.pass(25.0, 50.0);
    bench.pass(90.0, 200.0);

    assert_eq!(
        bench.host_received(),
        "event:user_approach_start\n\
         event:user_interaction_start\n\
         event:user_interaction_end\n\
         event:user_approach_end\n"
    );
}

#[test]
fn crlf_command_split_across_reads_is_applied() {
    let mut bench = Bench::new();
    bench.host_sends(b"set_state:REA");
    bench.host_sends(b"CTING_POSITIVE\r\n");
    bench.pass(200.0, 200.0);

    assert_eq!(bench.app.movement_state(), MovementState::ReactingPositive);
    assert!(bench.host_received().is_empty());
}

#[test]
fn garbage_is_dropped_without_reply() {
    let mut bench = Bench::new();
    bench.host_sends(&[b'x'; 200]);
    bench.host_sends(b"\nset_state:BOGUS\nhello\n");
    for _ in 0..4 {
        bench.pass(200.0, 200.0);
    }

    assert_eq!(bench.app.movement_state(), MovementState::Idle);
    assert_eq!(bench.app.interaction_state(), InteractionState::NoUser);
    assert!(bench.host_received().is_empty());
    assert_eq!(bench.link.discarded_lines(), 1);
}

#[test]
fn queued_commands_apply_one_per_pass() {
    let mut bench = Bench::new();
    bench.host_sends(b"set_state:REACTING_NEUTRAL\nset_state:IDLE\n");

    bench.pass(200.0, 200.0);
    assert_eq!(bench.app.movement_state(), MovementState::ReactingNeutral);
    bench.pass(200.0, 200.0);
    assert_eq!(bench.app.movement_state(), MovementState::Idle);
    assert_eq!(bench.link.stats().lines_in, 2);
}
