use std::fmt;

/// Window size used by the table scanner.
pub const BLOCK_SIZE: usize = 0x100;
/// Length of a table tag.
pub const TAG_LEN: usize = 4;

/// One scanner window.  Only the last window of an input can be short;
/// bytes past `len` are zero and are never inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct Block {
    bytes: [u8; BLOCK_SIZE],
    len:   usize,
}

impl Block {
    /// `0xFF` followed by zeroes: never all-zero, so no tag can follow it.
    pub const SENTINEL: Block = {
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes[0] = 0xFF;
        Block { bytes, len: BLOCK_SIZE }
    };

    pub const fn full(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self { bytes, len: BLOCK_SIZE }
    }

    /// `len` is capped at [`BLOCK_SIZE`]; the caller zeroes the tail.
    pub(crate) fn with_len(bytes: [u8; BLOCK_SIZE], len: usize) -> Self {
        debug_assert!(len <= BLOCK_SIZE);
        Self { bytes, len: len.min(BLOCK_SIZE) }
    }

    /// Copy up to [`BLOCK_SIZE`] bytes.  `None` if `data` is longer.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        if data.len() > BLOCK_SIZE {
            return None;
        }
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes[..data.len()].copy_from_slice(data);
        Some(Self { bytes, len: data.len() })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every valid byte is zero.
    pub fn is_null(&self) -> bool {
        self.as_bytes().iter().all(|&b| b == 0)
    }

    /// Leading tag candidate, if the block is long enough to hold one.
    pub fn tag(&self) -> Option<[u8; TAG_LEN]> {
        self.as_bytes().get(..TAG_LEN)?.try_into().ok()
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("len", &self.len)
            .field("head", &&self.as_bytes()[..self.len.min(16)])
            .finish()
    }
}

/// A byte that may appear in a tag: not a control character and not above
/// 0x7F, i.e. `0x20..=0x7E`.
pub fn is_tag_char(b: u8) -> bool {
    !b.is_ascii_control() && b <= 0x7F
}

/// A table tag found after a zero block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRecord {
    /// Byte offset of the block that starts with the tag.
    pub offset: u64,
    pub tag:    [u8; TAG_LEN],
}

impl TagRecord {
    pub fn tag_str(&self) -> String {
        self.tag.iter().copied().map(char::from).collect()
    }
}

/// `OOOO: TTTT` with a lowercase hex offset of at least four digits.
impl fmt::Display for TagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}: {}", self.offset, self.tag_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_not_null() {
        assert!(!Block::SENTINEL.is_null());
        assert_eq!(Block::SENTINEL.len(), BLOCK_SIZE);
    }

    #[test]
    fn short_block_checks_only_valid_bytes() {
        let block = Block::from_slice(&[0, 0, 0]).unwrap();
        assert!(block.is_null());
        assert_eq!(block.tag(), None);
        assert!(Block::from_slice(&[0u8; BLOCK_SIZE + 1]).is_none());
    }

    #[test]
    fn tag_chars() {
        assert!(is_tag_char(b' '));
        assert!(is_tag_char(b'~'));
        assert!(is_tag_char(b'A'));
        assert!(!is_tag_char(0x00));
        assert!(!is_tag_char(0x1F));
        assert!(!is_tag_char(0x7F));
        assert!(!is_tag_char(0x80));
        assert!(!is_tag_char(0xFF));
    }

    #[test]
    fn record_display() {
        let rec = TagRecord { offset: 0x100, tag: *b"ABCD" };
        assert_eq!(rec.to_string(), "0100: ABCD");
        let rec = TagRecord { offset: 0x12_3400, tag: *b"a b~" };
        assert_eq!(rec.to_string(), "123400: a b~");
        let rec = TagRecord { offset: 0, tag: *b"WXYZ" };
        assert_eq!(rec.to_string(), "0000: WXYZ");
    }
}
