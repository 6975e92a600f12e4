//! Textual forms of a converted [`FontTable`].
//!
//! The listing reproduces the Python list notation the table has always been
//! printed in, so existing consumers can keep pasting it.

use std::fmt::{self, Write};

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::{FontTable, Trimmed};

/// Characters as a Python list of one-character strings.
#[derive(Copy, Clone)]
pub struct CharList<'a>(pub(crate) &'a [char]);

impl fmt::Display for CharList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char('[')?;
        for (i, &c) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write_str_literal(f, c)?;
        }
        f.write_char(']')
    }
}

/// Columns as a Python list of integer lists.
#[derive(Copy, Clone)]
pub struct ColumnList<'a>(pub(crate) &'a [Trimmed]);

impl fmt::Display for ColumnList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char('[')?;
        for (i, glyph) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write_bytes(f, glyph.as_slice())?;
        }
        f.write_char(']')
    }
}

/// [`CharList`] and [`ColumnList`], each on its own line.
#[derive(Copy, Clone)]
pub struct Listing<'a>(pub(crate) &'a FontTable);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.0.char_list())?;
        writeln!(f, "{}", self.0.column_list())
    }
}

/// Rust statics: `FONT_DATA` columns and the sorted `CHAR_LIST` to
/// `binary_search` them by.
#[derive(Copy, Clone)]
pub struct RustSource<'a>(pub(crate) &'a FontTable);

impl fmt::Display for RustSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let table = self.0;
        writeln!(f, "const FONT_DATA_LEN: usize = {};", table.len())?;
        writeln!(f)?;
        writeln!(f, "static FONT_DATA: [&[u8]; FONT_DATA_LEN] = [")?;
        for glyph in table.glyphs() {
            f.write_str("    &")?;
            write_bytes(f, glyph.as_slice())?;
            f.write_str(",\n")?;
        }
        writeln!(f, "];")?;
        writeln!(f)?;
        writeln!(f, "static CHAR_LIST: [char; FONT_DATA_LEN] = [")?;
        for c in table.chars() {
            writeln!(f, "    '{}',", c.escape_debug())?;
        }
        writeln!(f, "];")
    }
}

fn write_bytes(f: &mut fmt::Formatter, bytes: &[u8]) -> fmt::Result {
    f.write_char('[')?;
    for (i, byte) in bytes.iter().enumerate() {
        if i != 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", byte)?;
    }
    f.write_char(']')
}

// Same classes as Python's `str.isprintable`: other (C*) and separator (Z*)
// categories are escaped, except the ASCII space.
fn is_printable(c: char) -> bool {
    use GeneralCategory::*;

    c == ' '
        || !matches!(
            get_general_category(c),
            Control
                | Format
                | Surrogate
                | PrivateUse
                | Unassigned
                | LineSeparator
                | ParagraphSeparator
                | SpaceSeparator
        )
}

fn write_str_literal(f: &mut fmt::Formatter, c: char) -> fmt::Result {
    match c {
        '\'' => f.write_str("\"'\""),
        '\\' => f.write_str("'\\\\'"),
        '\t' => f.write_str("'\\t'"),
        '\n' => f.write_str("'\\n'"),
        '\r' => f.write_str("'\\r'"),
        c if is_printable(c) => write!(f, "'{}'", c),
        c if (c as u32) < 0x100 => write!(f, "'\\x{:02x}'", c as u32),
        c if (c as u32) < 0x10000 => write!(f, "'\\u{:04x}'", c as u32),
        c => write!(f, "'\\U{:08x}'", c as u32),
    }
}

#[cfg(test)]
mod tests {
    use std::string::{String, ToString};

    use super::*;
    use crate::Glyph;

    fn literal(c: char) -> String {
        CharList(&[c]).to_string()
    }

    #[test]
    fn char_literals() {
        assert_eq!(literal('A'), "['A']");
        assert_eq!(literal(' '), "[' ']");
        assert_eq!(literal('"'), "['\"']");
        assert_eq!(literal('\''), "[\"'\"]");
        assert_eq!(literal('\\'), r"['\\']");
        assert_eq!(literal('\n'), r"['\n']");
        assert_eq!(literal('\0'), r"['\x00']");
        assert_eq!(literal('\u{7f}'), r"['\x7f']");
        assert_eq!(literal('\u{a0}'), r"['\xa0']");
        assert_eq!(literal('\u{feff}'), r"['\ufeff']");
        assert_eq!(literal('λ'), "['λ']");
        assert_eq!(literal('🄋'), "['🄋']");
    }

    #[test]
    fn escaped_categories() {
        // private use, unassigned, format
        assert_eq!(literal('\u{e000}'), r"['\ue000']");
        assert_eq!(literal('\u{378}'), r"['\u0378']");
        assert_eq!(literal('\u{600}'), r"['\u0600']");
        assert_eq!(literal('\u{2066}'), r"['\u2066']");
        assert_eq!(literal('\u{180e}'), r"['\u180e']");
        assert_eq!(literal('\u{f0000}'), r"['\U000f0000']");
        assert_eq!(literal('\u{10ffff}'), r"['\U0010ffff']");
        // separators
        assert_eq!(literal('\u{2028}'), r"['\u2028']");
        assert_eq!(literal('\u{3000}'), r"['\u3000']");
        // combining mark and symbol stay raw
        assert_eq!(literal('\u{301}'), "['\u{301}']");
        assert_eq!(literal('€'), "['€']");
    }

    #[test]
    fn empty_lists() {
        assert_eq!(CharList(&[]).to_string(), "[]");
        assert_eq!(ColumnList(&[]).to_string(), "[]");
        assert_eq!(Listing(&FontTable::default()).to_string(), "[]\n[]\n");
    }

    #[test]
    fn column_list() {
        let glyphs = [
            Glyph::new([0, 0, 0, 0b1000, 0, 0, 0, 0]).trimmed(),
            Glyph::default().trimmed(),
            Glyph::new([0b10100, 0, 0, 0, 0, 0, 0, 0b100]).trimmed(),
        ];
        assert_eq!(ColumnList(&glyphs).to_string(), "[[8], [], [129, 0, 1]]");
    }

    #[test]
    fn rust_source() {
        let table = FontTable::from_json(
            r#"{"39": [0,0,0,0,0,4,0,0,0,0,0,0,0],
                "66": [0,0,0,0,0,0,0,0,8,0,0,0,0]}"#,
        )
        .unwrap();
        assert_eq!(
            table.rust_source().to_string(),
            "const FONT_DATA_LEN: usize = 2;\n\
             \n\
             static FONT_DATA: [&[u8]; FONT_DATA_LEN] = [\n    \
             &[1],\n    \
             &[8],\n\
             ];\n\
             \n\
             static CHAR_LIST: [char; FONT_DATA_LEN] = [\n    \
             '\\'',\n    \
             'B',\n\
             ];\n"
        );
    }
}
