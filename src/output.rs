//! Output side of both tools: write batching and atomic commit.
//!
//! # Write buffer
//!
//! [`WriteBuffer`] accumulates small writes (2048-byte payloads, short text
//! lines) into a fixed-capacity buffer and flushes to the underlying writer
//! in large chunks, keeping a running byte count.
//!
//! # Atomic output
//!
//! [`AtomicOutput`] writes into a temporary file created next to the final
//! destination and renames it into place on [`AtomicOutput::commit`].  A run
//! that fails part-way drops the temporary file, so the destination either
//! holds a complete result or is untouched.  On Unix the temporary file is
//! opened with mode `0o666` so the committed file gets the same umask-derived
//! permissions as one made by `File::create`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::DumpError;

/// Default flush threshold: 64 KiB.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

// ── Write buffer ─────────────────────────────────────────────────────────────

/// Write batcher in front of the output file.
///
/// [`AtomicOutput`] always uses [`DEFAULT_BUFFER_CAPACITY`]; writes at least
/// that large go straight through.  `bytes_written` counts everything
/// accepted, flushed or not.
pub struct WriteBuffer<W: Write> {
    inner:     W,
    buf:       Vec<u8>,
    capacity:  usize,
    pub bytes_written: u64,
}

impl<W: Write> WriteBuffer<W> {
    /// `capacity` is clamped to at least one byte.
    pub fn new(inner: W, capacity: usize) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
            bytes_written: 0,
        }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.inner)
    }

    fn flush_if_full(&mut self) -> io::Result<()> {
        if self.buf.len() >= self.capacity {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl<W: Write> Write for WriteBuffer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Large writes bypass the buffer.
        if buf.len() >= self.capacity {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
            self.inner.write_all(buf)?;
        } else {
            self.buf.extend_from_slice(buf);
            self.flush_if_full()?;
        }
        self.bytes_written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }
        self.inner.flush()
    }
}

// ── Atomic output ────────────────────────────────────────────────────────────

/// Output file that only appears at its destination once committed.
pub struct AtomicOutput {
    path:  PathBuf,
    inner: WriteBuffer<NamedTempFile>,
}

impl AtomicOutput {
    /// Create the temporary file in the destination's directory.
    ///
    /// Fails with [`DumpError::Create`] before anything is written when the
    /// directory is missing or not writable.
    pub fn create(path: &Path) -> Result<Self, DumpError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = Builder::new();
        builder.prefix(".rawdisc-");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }
        let file = builder.tempfile_in(dir).map_err(|source| DumpError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path:  path.to_path_buf(),
            inner: WriteBuffer::new(file, DEFAULT_BUFFER_CAPACITY),
        })
    }

    pub fn bytes_written(&self) -> u64 {
        self.inner.bytes_written
    }

    /// Flush, sync and rename the temporary file over the destination.
    pub fn commit(self) -> Result<PathBuf, DumpError> {
        let file = self.inner.into_inner()?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| DumpError::Persist {
            path:   self.path.clone(),
            source: e.error,
        })?;
        Ok(self.path)
    }
}

impl Write for AtomicOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
