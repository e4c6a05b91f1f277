//! A bounds-checked, borrowed view over a slice of a byte buffer that is
//! read as ASCII text.

use std::fmt;

use crate::consts::REPLACEMENT_CHAR;

/// Error type for window construction and ASCII-only operations.
///
/// These are precondition violations made by the caller, not problems with
/// the data being looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// The requested region does not fit inside the backing buffer.
    #[error("window {start}..{start}+{length} does not fit in a buffer of {buffer_len} bytes")]
    OutOfBounds {
        start: usize,
        length: usize,
        buffer_len: usize,
    },

    /// An offset past the end of the window.
    #[error("index {index} is out of range for a window of {length} bytes")]
    IndexOutOfRange { index: usize, length: usize },

    /// A needle that can never appear in ASCII text.
    #[error("non-ASCII character was detected. Code: {code}; Hex: 0x{code:X}")]
    NonAscii { code: u32 },
}

/// A labelled sub-range `start..start + len` of a caller-owned buffer.
///
/// The window never copies: every operation reads the backing buffer in
/// place, and the borrow keeps the buffer alive and unmodified for as long as
/// the window exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AsciiWindow<'a> {
    buffer: &'a [u8],
    start:  usize,
    len:    usize,
}

impl<'a> AsciiWindow<'a> {
    /// Creates a window over `buffer[start..start + len]`.
    ///
    /// # Errors
    /// Returns `WindowError::OutOfBounds` if the region runs past the end of
    /// `buffer`.
    pub const fn new(buffer: &'a [u8], start: usize, len: usize) -> Result<Self, WindowError> {
        match start.checked_add(len) {
            Some(end) if end <= buffer.len() => Ok(Self { buffer, start, len }),
            _ => Err(WindowError::OutOfBounds {
                start,
                length: len,
                buffer_len: buffer.len(),
            }),
        }
    }

    /// Offset of the window within its backing buffer.
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The whole backing buffer, including bytes outside the window.
    #[inline]
    pub const fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// The bytes covered by the window.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buffer[self.start..self.start + self.len]
    }

    /// The byte at offset `index` relative to the window start.
    ///
    /// # Errors
    /// Returns `WindowError::IndexOutOfRange` if `index >= len()`.
    pub fn byte_at(&self, index: usize) -> Result<u8, WindowError> {
        self.as_bytes()
            .get(index)
            .copied()
            .ok_or(WindowError::IndexOutOfRange {
                index,
                length: self.len,
            })
    }

    /// Finds the first occurrence of the ASCII byte `needle` in the
    /// sub-range `search_start..search_start + search_len`, relative to the
    /// window start.
    ///
    /// # Errors
    /// Returns `WindowError::NonAscii` if `needle` is not ASCII, and
    /// `WindowError::IndexOutOfRange` if the sub-range leaves the window.
    pub fn index_of(
        &self,
        needle: u8,
        search_start: usize,
        search_len: usize,
    ) -> Result<Option<usize>, WindowError> {
        if !needle.is_ascii() {
            return Err(WindowError::NonAscii {
                code: needle.into(),
            });
        }
        let haystack = search_start
            .checked_add(search_len)
            .and_then(|end| self.as_bytes().get(search_start..end))
            .ok_or(WindowError::IndexOutOfRange {
                index: search_start.saturating_add(search_len),
                length: self.len,
            })?;
        Ok(haystack
            .iter()
            .position(|&b| b == needle)
            .map(|pos| pos + search_start))
    }

    /// [`index_of`](Self::index_of) for a `char` needle.
    ///
    /// # Errors
    /// Returns `WindowError::NonAscii` if `needle` is not ASCII, and
    /// `WindowError::IndexOutOfRange` if the sub-range leaves the window.
    pub fn index_of_char(
        &self,
        needle: char,
        search_start: usize,
        search_len: usize,
    ) -> Result<Option<usize>, WindowError> {
        let byte = u8::try_from(needle)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(WindowError::NonAscii {
                code: needle.into(),
            })?;
        self.index_of(byte, search_start, search_len)
    }

    /// Byte-for-byte prefix comparison. A `text` longer than the window is
    /// never a prefix.
    pub fn starts_with(&self, text: &str) -> bool {
        self.as_bytes().starts_with(text.as_bytes())
    }

    /// Byte-for-byte suffix comparison. A `text` longer than the window is
    /// never a suffix.
    pub fn ends_with(&self, text: &str) -> bool {
        self.as_bytes().ends_with(text.as_bytes())
    }

    /// Lossy text view for diagnostics. Every non-ASCII byte becomes
    /// U+FFFD; never use this to round-trip values.
    pub fn to_text(&self) -> String {
        self.as_bytes().iter().map(|&b| ascii_char(b)).collect()
    }
}

impl<'a> From<&'a [u8]> for AsciiWindow<'a> {
    fn from(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            start: 0,
            len: buffer.len(),
        }
    }
}

impl fmt::Display for AsciiWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        self.as_bytes()
            .iter()
            .try_for_each(|&b| f.write_char(ascii_char(b)))
    }
}

pub(crate) const fn ascii_char(b: u8) -> char {
    if b.is_ascii() { b as char } else { REPLACEMENT_CHAR }
}
