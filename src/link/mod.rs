//! Host link: newline-delimited ASCII over a byte transport.
//!
//! ```text
//!   host ──bytes──▶ Transport ──▶ LineDecoder ──▶ CommandSource::poll_line
//!   host ◀─bytes─── Transport ◀── encode_line ◀── EventSink::emit
//! ```
//!
//! Reads never block: `poll_line` drains whatever the transport has
//! buffered and hands back at most one complete line per call.  Bytes
//! beyond that line stay queued for the next call.  Writes are
//! fire-and-forget; a failed or short write is logged and forgotten.

pub mod codec;
pub mod transport;

use log::{debug, info, warn};

use crate::app::events::HostEvent;
use crate::app::ports::{CommandSource, EventSink};
use codec::{LineBuf, LineDecoder};
use transport::Transport;

/// Bytes pulled from the transport per read.
const RX_CHUNK: usize = 32;

/// Upper bound on transport reads per `poll_line`, so a chatty host
/// cannot hold the loop.
const MAX_READS_PER_POLL: usize = 4;

/// Longest outbound line plus terminator.
const TX_BUF_LEN: usize = 48;

/// Traffic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub lines_in: u32,
    pub events_out: u32,
    pub read_errors: u32,
    pub write_errors: u32,
}

/// Line-protocol endpoint over any [`Transport`].
pub struct HostLink<T: Transport> {
    transport: T,
    decoder: LineDecoder,
    rx: [u8; RX_CHUNK],
    rx_len: usize,
    rx_pos: usize,
    stats: LinkStats,
}

impl<T: Transport> HostLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: LineDecoder::new(),
            rx: [0; RX_CHUNK],
            rx_len: 0,
            rx_pos: 0,
            stats: LinkStats::default(),
        }
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Lines dropped by the decoder as over-long or non-ASCII.
    pub fn discarded_lines(&self) -> u32 {
        self.decoder.discarded()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Pull the next chunk from the transport.  Returns `false` when
    /// nothing was read.
    fn refill(&mut self) -> bool {
        match self.transport.read(&mut self.rx) {
            Ok(0) => false,
            Ok(n) => {
                self.rx_len = n.min(RX_CHUNK);
                self.rx_pos = 0;
                true
            }
            Err(e) => {
                self.stats.read_errors = self.stats.read_errors.wrapping_add(1);
                warn!("LINK | read failed: {:?}", e);
                self.decoder.reset();
                false
            }
        }
    }
}

impl<T: Transport> CommandSource for HostLink<T> {
    fn poll_line(&mut self) -> Option<LineBuf> {
        for _ in 0..=MAX_READS_PER_POLL {
            while self.rx_pos < self.rx_len {
                let byte = self.rx[self.rx_pos];
                self.rx_pos += 1;
                if let Some(line) = self.decoder.push(byte) {
                    self.stats.lines_in = self.stats.lines_in.wrapping_add(1);
                    debug!("LINK | <- {}", line);
                    return Some(line);
                }
            }
            if !self.refill() {
                return None;
            }
        }
        None
    }
}

impl<T: Transport> EventSink for HostLink<T> {
    fn emit(&mut self, event: HostEvent) {
        let mut out = [0u8; TX_BUF_LEN];
        let Some(len) = codec::encode_line(event.as_line(), &mut out) else {
            warn!("LINK | event too long to encode: {:?}", event);
            return;
        };

        match self.transport.write(&out[..len]) {
            Ok(n) if n == len => {
                self.stats.events_out = self.stats.events_out.wrapping_add(1);
                info!("LINK | -> {}", event.as_line());
            }
            Ok(n) => {
                self.stats.write_errors = self.stats.write_errors.wrapping_add(1);
                warn!("LINK | short write for {}: {}/{} bytes", event.as_line(), n, len);
            }
            Err(e) => {
                self.stats.write_errors = self.stats.write_errors.wrapping_add(1);
                warn!("LINK | write failed for {}: {:?}", event.as_line(), e);
            }
        }
    }
}
