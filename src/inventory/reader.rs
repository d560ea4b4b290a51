use crate::error::InventoryError;
use flate2::{Decompress, FlushDecompress, Status};
use std::collections::VecDeque;

/// Size of each compressed window fed to the decompressor
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Reader over a raw `objects.inv` buffer.
///
/// The header is plain text, read with [`InventoryReader::read_line`]; the
/// rest of the buffer is a zlib stream read with
/// [`InventoryReader::compressed_lines`].
pub struct InventoryReader {
    buffer: Vec<u8>,
    pos: usize,
}

impl InventoryReader {
    pub fn new(buffer: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: buffer.into(),
            pos: 0,
        }
    }

    /// Next uncompressed line with trailing whitespace removed.
    ///
    /// Returns an empty string once the buffer is exhausted.
    pub fn read_line(&mut self) -> String {
        let rest = &self.buffer[self.pos..];
        let end = rest
            .iter()
            .position(|&b| b == b'\n')
            .map(|idx| idx + 1)
            .unwrap_or(rest.len());
        let line = String::from_utf8_lossy(&rest[..end]).trim_end().to_string();
        self.pos += end;
        line
    }

    /// Lazily decompress the remainder of the buffer into lines
    pub fn compressed_lines(self) -> CompressedLines {
        CompressedLines {
            input: self.buffer,
            pos: self.pos,
            decompressor: Decompress::new(true),
            pending: Vec::new(),
            lines: VecDeque::new(),
            stream_ended: false,
            finished: false,
        }
    }
}

/// Iterator over the decoded lines of the compressed inventory body
pub struct CompressedLines {
    input: Vec<u8>,
    pos: usize,
    decompressor: Decompress,
    pending: Vec<u8>,
    lines: VecDeque<String>,
    stream_ended: bool,
    finished: bool,
}

impl CompressedLines {
    /// Feed the next window (or the final flush) and split out complete lines
    fn fill(&mut self) -> Result<(), InventoryError> {
        if self.stream_ended || self.pos >= self.input.len() {
            if !self.stream_ended {
                self.inflate(self.input.len(), FlushDecompress::Finish)?;
            }
            self.split_lines();
            if !self.pending.is_empty() {
                // No terminator after the last record; keep it anyway.
                let tail = std::mem::take(&mut self.pending);
                self.lines
                    .push_back(String::from_utf8_lossy(&tail).into_owned());
            }
            self.finished = true;
            return Ok(());
        }

        let end = (self.pos + CHUNK_SIZE).min(self.input.len());
        self.inflate(end, FlushDecompress::None)?;
        self.pos = end;
        self.split_lines();
        Ok(())
    }

    /// Decompress `input[pos..end]` entirely into `pending`
    fn inflate(&mut self, end: usize, flush: FlushDecompress) -> Result<(), InventoryError> {
        let mut offset = self.pos;
        loop {
            if self.pending.capacity() - self.pending.len() < CHUNK_SIZE {
                self.pending.reserve(CHUNK_SIZE * 4);
            }

            let in_before = self.decompressor.total_in();
            let out_before = self.decompressor.total_out();
            let status =
                self.decompressor
                    .decompress_vec(&self.input[offset..end], &mut self.pending, flush)?;
            let consumed = (self.decompressor.total_in() - in_before) as usize;
            let produced = self.decompressor.total_out() - out_before;
            offset += consumed;

            match status {
                Status::StreamEnd => {
                    self.stream_ended = true;
                    return Ok(());
                }
                Status::Ok | Status::BufError => {
                    if consumed == 0 && produced == 0 {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn split_lines(&mut self) {
        let mut start = 0;
        while let Some(idx) = self.pending[start..].iter().position(|&b| b == b'\n') {
            let line = &self.pending[start..start + idx];
            self.lines
                .push_back(String::from_utf8_lossy(line).into_owned());
            start += idx + 1;
        }
        self.pending.drain(..start);
    }
}

impl Iterator for CompressedLines {
    type Item = Result<String, InventoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.lines.pop_front() {
                return Some(Ok(line));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.fill() {
                self.finished = true;
                self.lines.clear();
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_header_lines_then_body() {
        let mut buffer = b"first\nsecond \r\n".to_vec();
        buffer.extend(zlib(b"alpha\nbeta\n"));

        let mut reader = InventoryReader::new(buffer);
        assert_eq!(reader.read_line(), "first");
        assert_eq!(reader.read_line(), "second");

        let lines: Vec<String> = reader
            .compressed_lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_read_line_past_end_is_empty() {
        let mut reader = InventoryReader::new(b"only".to_vec());
        assert_eq!(reader.read_line(), "only");
        assert_eq!(reader.read_line(), "");
        assert_eq!(reader.read_line(), "");
    }

    #[test]
    fn test_trailing_partial_line_is_kept() {
        let reader = InventoryReader::new(zlib(b"one\ntwo\nthree"));
        let lines: Vec<String> = reader
            .compressed_lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_body_spanning_many_windows() {
        let mut body = String::new();
        for i in 0..20_000 {
            body.push_str(&format!("symbol_{i} py:function 1 api.html#$ -\n"));
        }
        // Low compression keeps the compressed size above several windows.
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::none());
        encoder.write_all(body.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        assert!(compressed.len() > CHUNK_SIZE * 4);

        let lines: Vec<String> = InventoryReader::new(compressed)
            .compressed_lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines.len(), 20_000);
        assert_eq!(lines[0], "symbol_0 py:function 1 api.html#$ -");
        assert_eq!(lines[19_999], "symbol_19999 py:function 1 api.html#$ -");
    }

    #[test]
    fn test_empty_body_yields_nothing() {
        let mut reader = InventoryReader::new(b"header\n".to_vec());
        reader.read_line();
        assert_eq!(reader.compressed_lines().count(), 0);
    }

    #[test]
    fn test_corrupt_stream_is_an_error() {
        let garbage = vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x11, 0x22, 0x33];
        let mut lines = InventoryReader::new(garbage).compressed_lines();
        assert!(matches!(
            lines.next(),
            Some(Err(InventoryError::Decompression(_)))
        ));
        assert!(lines.next().is_none());
    }
}
