//! Fuzz target: host bytes → `LineDecoder` → `HostCommand::parse` → service.
//!
//! Drives arbitrary serial input through the inbound path and asserts that
//! it never panics, never yields an out-of-bounds line, and never leaves
//! the movement director in a state the host may not select.
//!
//! cargo fuzz run fuzz_host_link

#![no_main]

use libfuzzer_sys::fuzz_target;
use sculpture::app::commands::HostCommand;
use sculpture::app::service::SculptureService;
use sculpture::config::SculptureConfig;
use sculpture::link::codec::{LineDecoder, MAX_LINE_LEN};
use sculpture::movement::MovementState;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();
    let mut app = SculptureService::new(SculptureConfig::default());

    for &byte in data {
        let Some(line) = decoder.push(byte) else {
            continue;
        };
        assert!(!line.is_empty() && line.len() <= MAX_LINE_LEN);
        assert!(!line.contains('\n'));

        if let Some(cmd) = HostCommand::parse(&line) {
            app.handle_command(cmd);
        }
        assert_ne!(app.movement_state(), MovementState::Listen);
    }
});
