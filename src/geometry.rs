//! Raw sector geometry.
//!
//! A raw CD-ROM/XA Mode 2 Form 1 sector is 2352 bytes:
//!
//! ```text
//! [0x000] Sync + header + subheader   (24 bytes)
//! [0x018] User data                   (2048 bytes)
//! [0x818] EDC + ECC                   (280 bytes)
//! ```
//!
//! Only the user data is kept; the rest is opaque and discarded.

/// Size of one payload region in bytes.
pub const PAYLOAD_SIZE: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorGeometry {
    pub header:  u64,
    pub payload: u64,
    pub footer:  u64,
}

impl SectorGeometry {
    /// The geometry used by `extract-data`.
    pub const MODE2_FORM1: SectorGeometry = SectorGeometry {
        header:  24,
        payload: PAYLOAD_SIZE as u64,
        footer:  280,
    };

    /// Returns `None` when the sector period would be zero.
    pub fn new(header: u64, payload: u64, footer: u64) -> Option<Self> {
        let geometry = Self { header, payload, footer };
        (geometry.period() > 0).then_some(geometry)
    }

    pub const fn period(&self) -> u64 {
        self.header + self.payload + self.footer
    }

    /// Number of complete sectors in an input of `input_len` bytes.
    pub const fn sector_count(&self, input_len: u64) -> u64 {
        input_len / self.period()
    }

    /// Bytes left over after the last complete sector.
    pub const fn remainder(&self, input_len: u64) -> u64 {
        input_len % self.period()
    }

    /// Exact output size for an input of `input_len` bytes.
    pub const fn output_len(&self, input_len: u64) -> u64 {
        self.payload * self.sector_count(input_len)
    }
}

const _: () = assert!(SectorGeometry::MODE2_FORM1.period() == 2352);
