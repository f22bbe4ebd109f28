//! Table scanner: find 4-byte ASCII tags that follow a zero block.
//!
//! # How it works
//!
//! The input is read in non-overlapping 256-byte windows starting at offset
//! 0.  The last window is read with whatever length remains.  Each window is
//! compared with the one before it, and a [`TagRecord`] is emitted when:
//!
//! | Gate | Rejects with |
//! |------|--------------|
//! | the first 4 bytes are all [`is_tag_char`] | `NotAscii` |
//! | the window is not all zero | `NullBlock` |
//! | the previous window is all zero | `PreviousNotNull` |
//!
//! Gates run in that order and the first failure decides the verdict.  The
//! second gate is implied by the first today; it stays as its own check.
//!
//! Before the first window the previous slot holds [`Block::SENTINEL`], so a
//! tag at offset 0 is never reported.

pub mod block;

pub use block::{is_tag_char, Block, TagRecord, BLOCK_SIZE, TAG_LEN};

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, info};

use crate::config::ToolConfig;
use crate::error::{read_full, DumpError};
use crate::output::AtomicOutput;

// ── Classifier ───────────────────────────────────────────────────────────────

/// Outcome of classifying one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The leading bytes are not a printable tag.
    NotAscii,
    /// The window itself is all zero.
    NullBlock,
    /// The window before this one holds data.
    PreviousNotNull,
    Tag(TagRecord),
}

/// One-window lookback classifier.
#[derive(Debug, Clone)]
pub struct BlockClassifier {
    previous: Block,
}

impl Default for BlockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockClassifier {
    pub fn new() -> Self {
        Self { previous: Block::SENTINEL }
    }

    pub fn previous(&self) -> &Block {
        &self.previous
    }

    /// Classify `current`, found at `offset`, then make it the previous
    /// window whatever the verdict.
    pub fn classify(&mut self, offset: u64, current: Block) -> Verdict {
        let verdict = judge(&self.previous, &current, offset);
        self.previous = current;
        verdict
    }
}

fn judge(previous: &Block, current: &Block, offset: u64) -> Verdict {
    let tag = match current.tag() {
        Some(tag) if tag.iter().all(|&b| is_tag_char(b)) => tag,
        _ => return Verdict::NotAscii,
    };
    if current.is_null() {
        return Verdict::NullBlock;
    }
    if !previous.is_null() {
        return Verdict::PreviousNotNull;
    }
    Verdict::Tag(TagRecord { offset, tag })
}

// ── Report ───────────────────────────────────────────────────────────────────

/// Complete report produced by [`TableScanner::scan_to`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub input_len:         u64,
    pub blocks_scanned:    u64,
    /// Emitted records, in input order.
    pub tags:              Vec<TagRecord>,
    pub not_ascii:         u64,
    pub null_blocks:       u64,
    pub previous_not_null: u64,
}

impl ScanReport {
    fn record(&mut self, verdict: Verdict) {
        self.blocks_scanned += 1;
        match verdict {
            Verdict::NotAscii        => self.not_ascii += 1,
            Verdict::NullBlock       => self.null_blocks += 1,
            Verdict::PreviousNotNull => self.previous_not_null += 1,
            Verdict::Tag(record)     => self.tags.push(record),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} tag(s) in {} block(s) ({} non-ascii, {} null, {} not after a null block)",
            self.tags.len(),
            self.blocks_scanned,
            self.not_ascii,
            self.null_blocks,
            self.previous_not_null,
        )
    }
}

// ── Scanner ──────────────────────────────────────────────────────────────────

pub struct TableScanner<R: Read + Seek> {
    reader:     R,
    input_len:  u64,
    position:   u64,
    classifier: BlockClassifier,
}

impl<R: Read + Seek> TableScanner<R> {
    /// Measure `reader` and rewind it to offset 0.
    pub fn new(mut reader: R) -> Result<Self, DumpError> {
        let input_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        debug!("Input is {} byte(s), {} window(s)", input_len, input_len.div_ceil(BLOCK_SIZE as u64));
        Ok(Self {
            reader,
            input_len,
            position:   0,
            classifier: BlockClassifier::new(),
        })
    }

    pub fn input_len(&self) -> u64 {
        self.input_len
    }

    /// Read the next window and its offset, or `None` at the end of input.
    pub fn next_block(&mut self) -> Result<Option<(u64, Block)>, DumpError> {
        if self.position >= self.input_len {
            return Ok(None);
        }

        let offset = self.position;
        let len    = (self.input_len - offset).min(BLOCK_SIZE as u64) as usize;
        let mut bytes = [0u8; BLOCK_SIZE];
        read_full(&mut self.reader, &mut bytes[..len], offset)?;
        self.position += len as u64;

        Ok(Some((offset, Block::with_len(bytes, len))))
    }

    /// Classify every window and write one line per tag to `writer`.
    pub fn scan_to<W: Write>(mut self, writer: &mut W) -> Result<ScanReport, DumpError> {
        let mut report = ScanReport { input_len: self.input_len, ..ScanReport::default() };

        while let Some((offset, block)) = self.next_block()? {
            let verdict = self.classifier.classify(offset, block);
            if let Verdict::Tag(record) = verdict {
                debug!("Found table {:?} at {:#x}", record.tag_str(), record.offset);
                writeln!(writer, "{record}")?;
            }
            report.record(verdict);
        }
        writer.flush()?;

        Ok(report)
    }
}

/// Scan `config.input` and write the tag list to `config.output`.
pub fn scan_file(config: &ToolConfig) -> Result<ScanReport, DumpError> {
    let input = File::open(&config.input).map_err(|source| DumpError::Open {
        path: config.input.clone(),
        source,
    })?;
    let mut output = AtomicOutput::create(&config.output)?;

    let report = TableScanner::new(input)?.scan_to(&mut output)?;
    let path   = output.commit()?;

    info!("Scanned {} into {}", report.summary(), path.display());
    Ok(report)
}
