use memefeed_domain::RawRecord;
use tracing::warn;

/// Longest incomplete line kept while waiting for its newline.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Splits a chunked byte stream into newline-delimited JSON records.
///
/// Chunks may end mid-line; the remainder is buffered until the next chunk.
/// Blank lines are keep-alives and produce nothing. A pending line that
/// outgrows the limit is dropped and the decoder skips ahead to the next
/// newline.
#[derive(Debug)]
pub struct NdjsonDecoder {
    buffer: Vec<u8>,
    max_line: usize,
    discarding: bool,
}

impl Default for NdjsonDecoder {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_BYTES)
    }
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line(max_line: usize) -> Self {
        Self {
            buffer: Vec::new(),
            max_line,
            discarding: false,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<RawRecord, serde_json::Error>> {
        let mut chunk = chunk;
        if self.discarding {
            let Some(newline) = chunk.iter().position(|b| *b == b'\n') else {
                return Vec::new();
            };
            chunk = &chunk[newline + 1..];
            self.discarding = false;
        }

        self.buffer.extend_from_slice(chunk);

        let mut records = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|b| *b == b'\n') {
            let line = trim_ascii(&self.buffer[start..start + offset]);
            if !line.is_empty() {
                records.push(serde_json::from_slice(line));
            }
            start += offset + 1;
        }
        self.buffer.drain(..start);

        if self.buffer.len() > self.max_line {
            warn!(
                pending = self.buffer.len(),
                limit = self.max_line,
                "Dropping oversized stream line"
            );
            self.buffer.clear();
            self.discarding = true;
        }

        records
    }

    /// Bytes of an incomplete trailing line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn trim_ascii(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |p| p + 1);
    &line[start..end]
}
