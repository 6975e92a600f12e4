use std::collections::btree_map::{BTreeMap, Entry};
use std::fmt;
use std::io;
use std::string::{String, ToString};
use std::vec::Vec;

use serde_json::{Map, Value};
use tracing::{debug, info, trace, warn};

use crate::repr::{CharList, ColumnList, Listing, RustSource};
use crate::{row_slice, Glyph, Trimmed, FIRST_ROW, RAW_LEN, ROWS};

/// Trimmed glyph columns keyed by character, in code point order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    chars: Vec<char>,
    glyphs: Vec<Trimmed>,
}

impl FontTable {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let value = serde_json::from_str::<Value>(json)?;
        Self::from_value(&value)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, TableError> {
        let value = serde_json::from_reader::<_, Value>(io::BufReader::new(reader))?;
        Self::from_value(&value)
    }

    /// Convert every entry of a JSON object whose key is a decimal character
    /// code. Other keys are skipped without looking at their values.
    pub fn from_value(value: &Value) -> Result<Self, TableError> {
        let object = value.as_object().ok_or(TableError::NotAnObject)?;
        let entries = validate(object)?;

        let mut by_char = BTreeMap::<char, (&str, Trimmed)>::new();
        for (c, key, glyph) in entries {
            let trimmed = glyph.trimmed();
            if trimmed.is_empty() {
                warn!(key, "glyph is blank");
            }
            trace!(key, columns = trimmed.len(), offset = trimmed.offset(), "converted glyph");
            match by_char.entry(c) {
                Entry::Vacant(entry) => {
                    entry.insert((key, trimmed));
                }
                Entry::Occupied(entry) => {
                    return Err(TableError::DuplicateCode {
                        code: c as u32,
                        first: entry.get().0.to_string(),
                        second: key.to_string(),
                    });
                }
            }
        }

        let (chars, glyphs) = by_char
            .into_iter()
            .map(|(c, (_, trimmed))| (c, trimmed))
            .unzip::<_, _, Vec<_>, Vec<_>>();
        info!(glyphs = chars.len(), "converted font table");
        Ok(Self { chars, glyphs })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters in ascending code point order.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Trimmed columns, parallel to [`chars`](Self::chars).
    #[inline]
    pub fn glyphs(&self) -> &[Trimmed] {
        &self.glyphs
    }

    pub fn get(&self, c: char) -> Option<&[u8]> {
        let index = self.chars.binary_search(&c).ok()?;
        self.glyphs.get(index).map(Trimmed::as_slice)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (char, &[u8])> + '_ {
        self.chars
            .iter()
            .copied()
            .zip(self.glyphs.iter().map(Trimmed::as_slice))
    }

    #[inline]
    pub fn char_list(&self) -> CharList<'_> {
        CharList(&self.chars)
    }

    #[inline]
    pub fn column_list(&self) -> ColumnList<'_> {
        ColumnList(&self.glyphs)
    }

    /// The character list and the column list, one per line.
    #[inline]
    pub fn listing(&self) -> Listing<'_> {
        Listing(self)
    }

    /// Rust statics holding the table, for embedding in firmware.
    #[inline]
    pub fn rust_source(&self) -> RustSource<'_> {
        RustSource(self)
    }
}

fn is_code(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

fn validate(object: &Map<String, Value>) -> Result<Vec<(char, &str, Glyph)>, TableError> {
    let mut entries = Vec::with_capacity(object.len());
    for (key, value) in object {
        if !is_code(key) {
            debug!(key = key.as_str(), "skipping non-numeric key");
            continue;
        }
        let c = key
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| TableError::InvalidCodePoint { key: key.clone() })?;
        entries.push((c, key.as_str(), Glyph::new(rows(key, value)?)));
    }
    Ok(entries)
}

fn rows(key: &str, value: &Value) -> Result<[u64; ROWS], TableError> {
    let raw = value.as_array().ok_or_else(|| TableError::NotAnArray {
        key: key.to_string(),
    })?;
    let slice = row_slice(raw).ok_or_else(|| TableError::ShortGlyph {
        key: key.to_string(),
        len: raw.len(),
    })?;
    let mut rows = [0; ROWS];
    for (index, (row, element)) in (FIRST_ROW..).zip(rows.iter_mut().zip(slice)) {
        *row = bitmask(element).ok_or_else(|| TableError::NotAnInteger {
            key: key.to_string(),
            index,
        })?;
    }
    Ok(rows)
}

/// Low 64 bits of an integer of any width. Negative integers keep their
/// two's complement bits.
fn bitmask(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|n| n as u64))
            .or_else(|| low_bits(&n.to_string())),
        Value::Bool(b) => Some(u64::from(*b)),
        _ => None,
    }
}

// Wrapping arithmetic keeps the value modulo 2^64.
fn low_bits(number: &str) -> Option<u64> {
    let (negative, digits) = match number.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, number),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.bytes().fold(0u64, |acc, b| {
        acc.wrapping_mul(10).wrapping_add(u64::from(b - b'0'))
    });
    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

#[derive(Debug)]
pub enum TableError {
    /// Input is not valid JSON
    Json(serde_json::Error),
    /// Top-level JSON value is not an object
    NotAnObject,
    /// Glyph value is not an array
    NotAnArray { key: String },
    /// Glyph array ends before its last bitmap row
    ShortGlyph { key: String, len: usize },
    /// Bitmap row is not an integer
    NotAnInteger { key: String, index: usize },
    /// Key is not a Unicode scalar value
    InvalidCodePoint { key: String },
    /// Two keys name the same character, e.g. "7" and "007"
    DuplicateCode {
        code: u32,
        first: String,
        second: String,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableError::Json(_) => f.pad("invalid JSON"),
            TableError::NotAnObject => f.pad("font table is not a JSON object"),
            TableError::NotAnArray { key } => write!(f, "glyph {:?} is not an array", key),
            TableError::ShortGlyph { key, len } => write!(
                f,
                "glyph {:?} has {} elements, at least {} required",
                key, len, RAW_LEN
            ),
            TableError::NotAnInteger { key, index } => {
                write!(f, "glyph {:?} row {} is not an integer", key, index)
            }
            TableError::InvalidCodePoint { key } => {
                write!(f, "key {:?} is not a valid code point", key)
            }
            TableError::DuplicateCode {
                code,
                first,
                second,
            } => write!(
                f,
                "keys {:?} and {:?} both name U+{:04X}",
                first, second, code
            ),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        TableError::Json(e)
    }
}
