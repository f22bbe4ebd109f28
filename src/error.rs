//! Error type shared by the extractor and the scanner.
//!
//! Both tools are single-pass batch jobs: any error aborts the run and no
//! output file is committed.  Argument errors never reach this type, clap
//! reports them before any I/O is attempted.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Unable to open input file {}", path.display())]
    Open {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to create output file {}", path.display())]
    Create {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input ended before the length measured at the start of the pass.
    #[error("Short read at {offset:#x}: expected {expected} bytes, got {got}")]
    ShortRead {
        offset:   u64,
        expected: usize,
        got:      usize,
    },
    #[error("Unable to move finished output into {}", path.display())]
    Persist {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Fill `buf` completely or report how far the read got.
///
/// Unlike `read_exact`, a premature end of input is surfaced as
/// [`DumpError::ShortRead`] carrying the offset and the byte count actually
/// read.  Interrupted reads are retried.
pub fn read_full<R: io::Read>(reader: &mut R, buf: &mut [u8], offset: u64) -> Result<(), DumpError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(DumpError::ShortRead {
                    offset,
                    expected: buf.len(),
                    got:      filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_full_reports_partial_count() {
        let mut src = Cursor::new(vec![7u8; 10]);
        let mut buf = [0u8; 16];
        match read_full(&mut src, &mut buf, 0x40) {
            Err(DumpError::ShortRead { offset, expected, got }) => {
                assert_eq!(offset, 0x40);
                assert_eq!(expected, 16);
                assert_eq!(got, 10);
            }
            other => panic!("expected short read, got {other:?}"),
        }
    }

    #[test]
    fn short_read_message_is_hex() {
        let err = DumpError::ShortRead { offset: 0x930, expected: 2048, got: 12 };
        assert_eq!(err.to_string(), "Short read at 0x930: expected 2048 bytes, got 12");
    }
}
