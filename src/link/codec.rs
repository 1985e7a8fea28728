//! Newline line codec.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────────────┬─────────┐
//! │ ASCII text (≤ MAX_LINE_LEN)  │ \n      │   optional \r before \n
//! └──────────────────────────────┴─────────┘
//! ```
//!
//! The decoder accumulates incoming bytes one at a time and yields complete
//! lines.  This handles partial reads gracefully: a single
//! `Transport::read` call may return part of a line, a whole line, or
//! several lines back to back.  Lines that outgrow the buffer, or that
//! carry non-ASCII bytes, are discarded up to the next newline.

use heapless::String;

/// Maximum line length, terminator excluded.  The longest command is
/// `set_state:REACTING_POSITIVE` (27 bytes).
pub const MAX_LINE_LEN: usize = 64;

/// One decoded line, terminator stripped.
pub type LineBuf = String<MAX_LINE_LEN>;

/// Decoder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Collecting bytes of a line that still fits.
    Collecting,
    /// Current line is unusable; drop bytes until the next newline.
    Discarding,
}

/// Streaming line decoder.
pub struct LineDecoder {
    state: DecoderState,
    buf: LineBuf,
    discarded: u32,
}

impl LineDecoder {
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Collecting,
            buf: String::new(),
            discarded: 0,
        }
    }

    /// Feed one byte into the decoder.
    ///
    /// Returns `Some(line)` when `byte` completes a non-empty line.
    pub fn push(&mut self, byte: u8) -> Option<LineBuf> {
        if byte == b'\n' {
            return self.finish();
        }

        if self.state == DecoderState::Discarding {
            return None;
        }

        if !byte.is_ascii() || self.buf.push(byte as char).is_err() {
            self.state = DecoderState::Discarding;
            self.buf.clear();
        }
        None
    }

    /// Number of lines dropped as over-long or non-ASCII since boot.
    pub fn discarded(&self) -> u32 {
        self.discarded
    }

    /// Reset decoder state (e.g. after a transport error).
    pub fn reset(&mut self) {
        self.state = DecoderState::Collecting;
        self.buf.clear();
    }

    fn finish(&mut self) -> Option<LineBuf> {
        if self.state == DecoderState::Discarding {
            self.state = DecoderState::Collecting;
            self.discarded = self.discarded.wrapping_add(1);
            log::debug!("LINK | discarded malformed line");
            return None;
        }

        let mut line = core::mem::take(&mut self.buf);
        if line.ends_with('\r') {
            line.pop();
        }
        if line.is_empty() { None } else { Some(line) }
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode `text` as one outbound line into `out_buf`.
///
/// Returns the total number of bytes written, or `None` if it does not fit.
pub fn encode_line(text: &str, out_buf: &mut [u8]) -> Option<usize> {
    let total = text.len() + 1;
    if total > out_buf.len() {
        return None;
    }
    out_buf[..text.len()].copy_from_slice(text.as_bytes());
    out_buf[text.len()] = b'\n';
    Some(total)
}
