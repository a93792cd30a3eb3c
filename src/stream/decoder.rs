//! Incremental line framing over a raw byte stream.
//!
//! HTTP chunk boundaries fall anywhere, including in the middle of a line
//! or of a multi-byte UTF-8 character. The decoder buffers bytes across
//! chunks and only yields complete newline-terminated lines, so downstream
//! parsing always sees whole frames.

/// Splits successive byte chunks of one continuous stream into lines.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk; returns every line completed by it, newline stripped.
    ///
    /// The trailing fragment after the last newline stays buffered until a
    /// later chunk completes it. Splitting on the raw `0x0A` byte is UTF-8
    /// safe (`\n` never occurs inside a multi-byte sequence), so a
    /// character straddling a chunk edge reassembles in the buffer before
    /// its line is decoded.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            lines.push(String::from_utf8_lossy(&line[..line.len() - 1]).into_owned());
        }
        lines
    }

    /// Bytes currently buffered without a terminating newline.
    ///
    /// The protocol newline-terminates every frame, so on stream end this
    /// fragment is simply discarded along with the decoder.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
