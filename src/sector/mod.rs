//! Sector window stripper: raw track image → contiguous user data.
//!
//! # How it works
//!
//! The input length `L` is measured once by seeking to the end.  The output
//! size is fixed up front as `payload * floor(L / period)`; a trailing
//! partial sector contributes nothing.  The stripper then walks the input
//! sector by sector:
//!
//! 1. seek forward `header` bytes (relative),
//! 2. read exactly `payload` bytes and hand them to the sink,
//! 3. seek forward `footer` bytes (relative),
//!
//! until the computed output size has been emitted.  Header and footer bytes
//! are never interpreted.
//!
//! If the input turns out shorter than measured (it was truncated while the
//! pass ran) the payload read fails with [`DumpError::ShortRead`] instead of
//! padding the output.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crc32fast::Hasher;
use log::{debug, info, trace, warn};

use crate::config::ToolConfig;
use crate::error::{read_full, DumpError};
use crate::geometry::{SectorGeometry, PAYLOAD_SIZE};
use crate::output::AtomicOutput;

// ── Report ───────────────────────────────────────────────────────────────────

/// Summary of one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    /// Total input size in bytes.
    pub input_len:     u64,
    /// Complete sectors whose payload was emitted.
    pub sectors:       u64,
    /// Payload bytes written to the sink.
    pub bytes_written: u64,
    /// Bytes after the last complete sector that were dropped.
    pub dropped_tail:  u64,
    /// CRC32 of the emitted payload stream.
    pub crc32:         u32,
}

impl ExtractReport {
    pub fn summary(&self) -> String {
        format!(
            "{} sector(s), {} byte(s) of payload, crc32 {:08x}",
            self.sectors, self.bytes_written, self.crc32,
        )
    }
}

// ── Stripper ─────────────────────────────────────────────────────────────────

pub struct SectorStripper<R: Read + Seek> {
    reader:    R,
    geometry:  SectorGeometry,
    input_len: u64,
    target:    u64,
    emitted:   u64,
}

impl<R: Read + Seek> SectorStripper<R> {
    /// Measure `reader` and rewind it to the first sector.
    pub fn new(mut reader: R) -> Result<Self, DumpError> {
        let geometry  = SectorGeometry::MODE2_FORM1;
        let input_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let target = geometry.output_len(input_len);
        debug!(
            "Input is {} byte(s): {} sector(s), {} byte(s) of payload",
            input_len,
            geometry.sector_count(input_len),
            target,
        );

        Ok(Self { reader, geometry, input_len, target, emitted: 0 })
    }

    pub fn input_len(&self) -> u64 {
        self.input_len
    }

    /// Exact number of bytes this stripper will emit.
    pub fn target_len(&self) -> u64 {
        self.target
    }

    /// Read the next sector's payload into `buf`.
    ///
    /// Returns the zero-based index of the sector that was read, or `None`
    /// once the computed output size has been reached.
    pub fn read_payload(&mut self, buf: &mut [u8; PAYLOAD_SIZE]) -> Result<Option<u64>, DumpError> {
        if self.emitted >= self.target {
            return Ok(None);
        }

        let sector = self.emitted / self.geometry.payload;
        let offset = sector * self.geometry.period() + self.geometry.header;

        self.reader.seek(SeekFrom::Current(self.geometry.header as i64))?;
        read_full(&mut self.reader, buf, offset)?;
        self.emitted += self.geometry.payload;
        self.reader.seek(SeekFrom::Current(self.geometry.footer as i64))?;

        trace!("Sector {sector}: payload at {offset:#x}");
        Ok(Some(sector))
    }

    /// Copy every payload into `writer`.
    pub fn strip_to<W: Write>(mut self, writer: &mut W) -> Result<ExtractReport, DumpError> {
        let mut buf     = [0u8; PAYLOAD_SIZE];
        let mut hasher  = Hasher::new();
        let mut sectors = 0u64;

        while self.read_payload(&mut buf)?.is_some() {
            writer.write_all(&buf)?;
            hasher.update(&buf);
            sectors += 1;
        }
        writer.flush()?;

        let dropped_tail = self.geometry.remainder(self.input_len);
        if dropped_tail != 0 {
            warn!(
                "Input does not end on a sector boundary, dropping the last {} byte(s)",
                dropped_tail,
            );
        }

        Ok(ExtractReport {
            input_len:     self.input_len,
            sectors,
            bytes_written: self.emitted,
            dropped_tail,
            crc32:         hasher.finalize(),
        })
    }
}

/// Extract the payload of `config.input` into `config.output`.
///
/// The output only appears at its destination once every payload has been
/// written.
pub fn extract_file(config: &ToolConfig) -> Result<ExtractReport, DumpError> {
    let input = File::open(&config.input).map_err(|source| DumpError::Open {
        path: config.input.clone(),
        source,
    })?;
    let mut output = AtomicOutput::create(&config.output)?;

    let report = SectorStripper::new(input)?.strip_to(&mut output)?;
    let path   = output.commit()?;

    info!("Extracted {} into {}", report.summary(), path.display());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Sectors whose header, payload and footer bytes are distinguishable.
    fn raw_sectors(count: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(count * 2352);
        for i in 0..count {
            data.extend(std::iter::repeat(0xEE).take(24));
            data.extend((0..2048).map(|j| (i * 7 + j) as u8));
            data.extend(std::iter::repeat(0xFF).take(280));
        }
        data
    }

    #[test]
    fn reports_sector_indices_in_order() {
        let mut stripper = SectorStripper::new(Cursor::new(raw_sectors(3))).unwrap();
        assert_eq!(stripper.input_len(), 3 * 2352);
        assert_eq!(stripper.target_len(), 3 * 2048);
        let mut buf = [0u8; PAYLOAD_SIZE];
        assert_eq!(stripper.read_payload(&mut buf).unwrap(), Some(0));
        assert_eq!(stripper.read_payload(&mut buf).unwrap(), Some(1));
        assert_eq!(stripper.read_payload(&mut buf).unwrap(), Some(2));
        assert_eq!(buf[0], 14);
        assert_eq!(stripper.read_payload(&mut buf).unwrap(), None);
    }

    #[test]
    fn drops_trailing_partial_sector() {
        let mut data = raw_sectors(2);
        data.extend([0xAB; 2000]);
        let mut out = Vec::new();
        let report = SectorStripper::new(Cursor::new(data)).unwrap().strip_to(&mut out).unwrap();
        assert_eq!(report.sectors, 2);
        assert_eq!(report.dropped_tail, 2000);
        let expected: Vec<u8> = (0..2)
            .flat_map(|i| (0..2048).map(move |j| (i * 7 + j) as u8))
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn crc_matches_written_bytes() {
        let mut out = Vec::new();
        let report = SectorStripper::new(Cursor::new(raw_sectors(4))).unwrap().strip_to(&mut out).unwrap();
        assert_eq!(report.crc32, crc32fast::hash(&out));
        assert_eq!(report.bytes_written, out.len() as u64);
    }

    /// A reader that claims a longer length than it can deliver.
    struct Shrinking {
        inner: Cursor<Vec<u8>>,
        claimed: u64,
    }

    impl Read for Shrinking {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Seek for Shrinking {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            match pos {
                SeekFrom::End(0) => Ok(self.claimed),
                other => self.inner.seek(other),
            }
        }
    }

    #[test]
    fn truncated_payload_is_short_read() {
        let mut data = raw_sectors(2);
        data.truncate(2352 + 24 + 100);
        let reader = Shrinking { inner: Cursor::new(data), claimed: 2352 * 2 };
        let err = SectorStripper::new(reader).unwrap().strip_to(&mut Vec::new()).unwrap_err();
        match err {
            DumpError::ShortRead { offset, expected, got } => {
                assert_eq!(offset, 2352 + 24);
                assert_eq!(expected, 2048);
                assert_eq!(got, 100);
            }
            other => panic!("expected short read, got {other:?}"),
        }
    }
}
