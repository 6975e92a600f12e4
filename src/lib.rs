#![no_std]

#[cfg(feature = "std")]
extern crate std;

use core::fmt;
use core::ops::Range;

#[cfg(feature = "std")]
mod repr;
#[cfg(feature = "std")]
mod table;

#[cfg(feature = "std")]
pub use repr::{CharList, ColumnList, Listing, RustSource};
#[cfg(feature = "std")]
pub use table::{FontTable, TableError};

/// Index of the first bitmap row within a raw glyph array.
pub const FIRST_ROW: usize = 5;
/// Number of bitmap rows, one per bit of an output column.
pub const ROWS: usize = 8;
/// Shortest raw glyph array that still holds every bitmap row.
pub const RAW_LEN: usize = FIRST_ROW + ROWS;
/// Lowest row bit holding a pixel column.
pub const FIRST_BIT: u32 = 2;
/// Number of byte columns a glyph transposes into.
pub const COLUMNS: usize = 14;

const COLUMN_MASK: u64 = ((1 << COLUMNS) - 1) << FIRST_BIT;

/// Positions 5 through 12 of a raw glyph array, if it is long enough.
#[inline]
pub(crate) fn row_slice<T>(raw: &[T]) -> Option<&[T]> {
    raw.get(FIRST_ROW..RAW_LEN)
}

/// Eight rows of a glyph bitmap. Bits 2 through 15 of each row are pixel
/// columns; all other bits are ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Glyph {
    rows: [u64; ROWS],
}

impl Glyph {
    #[inline]
    pub const fn new(rows: [u64; ROWS]) -> Self {
        Self { rows }
    }

    /// Take the bitmap rows out of a raw glyph array, which carries them at
    /// positions 5 through 12. Entry point for raw rows that don't come from
    /// JSON.
    pub fn from_raw(raw: &[u64]) -> Result<Self, GlyphError> {
        let slice = row_slice(raw).ok_or(GlyphError::TooShort { len: raw.len() })?;
        let mut rows = [0; ROWS];
        rows.copy_from_slice(slice);
        Ok(Self { rows })
    }

    /// Rebuild a glyph from byte columns, `offset` being the number of empty
    /// columns trimmed off the front.
    pub fn from_columns(columns: &[u8], offset: usize) -> Result<Self, GlyphError> {
        if offset.saturating_add(columns.len()) > COLUMNS {
            return Err(GlyphError::ColumnsTooLong {
                len: columns.len(),
                offset,
            });
        }
        Ok(Self {
            rows: untranspose(columns, FIRST_BIT + offset as u32),
        })
    }

    #[inline]
    pub fn rows(&self) -> &[u64; ROWS] {
        &self.rows
    }

    /// The same glyph with every bit outside the pixel columns cleared.
    pub fn masked(&self) -> Self {
        Self {
            rows: self.rows.map(|row| row & COLUMN_MASK),
        }
    }

    /// Whether no pixel is set in any column.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| row & COLUMN_MASK == 0)
    }

    /// Byte columns, left to right. Bit `b` of each byte is row `b`.
    #[inline]
    pub fn columns(&self) -> ColumnIter<'_> {
        ColumnIter {
            rows: &self.rows,
            bit: FIRST_BIT,
            end: FIRST_BIT + COLUMNS as u32,
        }
    }

    pub fn to_columns(&self) -> [u8; COLUMNS] {
        let mut columns = [0; COLUMNS];
        for (dst, src) in columns.iter_mut().zip(self.columns()) {
            *dst = src;
        }
        columns
    }

    pub fn trimmed(&self) -> Trimmed {
        Trimmed::new(self.to_columns())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// Raw glyph array ends before its last bitmap row
    TooShort { len: usize },
    /// Columns don't fit in a glyph at the given offset
    ColumnsTooLong { len: usize, offset: usize },
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GlyphError::TooShort { len } => write!(
                f,
                "glyph has {} elements, at least {} required",
                len, RAW_LEN
            ),
            GlyphError::ColumnsTooLong { len, offset } => write!(
                f,
                "{} columns at offset {} exceed glyph width {}",
                len, offset, COLUMNS
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GlyphError {}

#[derive(Clone)]
pub struct ColumnIter<'a> {
    rows: &'a [u64; ROWS],
    bit: u32,
    end: u32,
}

#[inline]
fn column(rows: &[u64; ROWS], bit: u32) -> u8 {
    rows.iter()
        .enumerate()
        .fold(0, |byte, (b, row)| byte | (((row >> bit) & 1) as u8) << b)
}

fn untranspose(columns: &[u8], first_bit: u32) -> [u64; ROWS] {
    let mut rows = [0; ROWS];
    for (bit, &byte) in (first_bit..).zip(columns) {
        for (b, row) in rows.iter_mut().enumerate() {
            if byte & (1 << b) != 0 {
                *row |= 1 << bit;
            }
        }
    }
    rows
}

impl Iterator for ColumnIter<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.bit >= self.end {
            return None;
        }
        let result = column(self.rows, self.bit);
        self.bit += 1;
        Some(result)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for ColumnIter<'_> {
    #[inline]
    fn len(&self) -> usize {
        (self.end - self.bit) as usize
    }
}

impl DoubleEndedIterator for ColumnIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<u8> {
        if self.bit >= self.end {
            return None;
        }
        self.end -= 1;
        Some(column(self.rows, self.end))
    }
}

fn trim_range(columns: &[u8]) -> Range<usize> {
    let end = columns.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
    let start = columns[..end].iter().position(|&c| c != 0).unwrap_or(end);
    start..end
}

/// Strip trailing, then leading, zero columns. All-zero input trims to an
/// empty slice.
pub fn trim(columns: &[u8]) -> &[u8] {
    &columns[trim_range(columns)]
}

/// A glyph's columns with the empty ones at either end removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Trimmed {
    columns: [u8; COLUMNS],
    start: u8,
    end: u8,
}

impl Trimmed {
    pub fn new(columns: [u8; COLUMNS]) -> Self {
        let range = trim_range(&columns);
        Self {
            columns,
            start: range.start as u8,
            end: range.end as u8,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.columns[self.start as usize..self.end as usize]
    }

    /// Number of leading empty columns that were removed.
    #[inline]
    pub fn offset(&self) -> usize {
        self.start as usize
    }

    #[inline]
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Glyph these columns came from, restricted to its pixel columns.
    pub fn untrim(&self) -> Glyph {
        Glyph {
            rows: untranspose(&self.columns, FIRST_BIT),
        }
    }
}

impl AsRef<[u8]> for Trimmed {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
