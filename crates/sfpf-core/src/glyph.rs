//! Glyph tables: where each character lives inside an atlas
//!
//! A table is parsed once from the `chars_data_<n>` entry of a package and
//! never changes afterwards. Each line names one character, its x offset in
//! the atlas strip and its width in atlas pixels:
//!
//! ```text
//! A 0 31
//! B 41 27
//! ```

use std::collections::HashMap;

use crate::error::FormatError;

/// Horizontal slice of an atlas holding one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub ch: char,
    pub x: u32,
    pub width: u32,
}

impl GlyphRecord {
    pub const fn new(ch: char, x: u32, width: u32) -> Self {
        Self { ch, x, width }
    }

    /// First atlas column past this glyph
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }
}

/// Frozen character lookup for one size tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: HashMap<char, GlyphRecord>,
}

impl GlyphTable {
    /// Parses the `chars_data` text of the tier with nominal size `size`.
    ///
    /// Blank lines are skipped. Anything else must be a character, a single
    /// space, then exactly two non-negative integers.
    pub fn parse(size: u32, text: &str) -> Result<Self, FormatError> {
        let mut records = Vec::new();

        for (index, raw) in text.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() {
                continue;
            }
            let record = parse_line(line).map_err(|reason| FormatError::MalformedGlyphLine {
                size,
                line: index + 1,
                reason,
            })?;
            records.push(record);
        }

        Self::from_records(size, records)
    }

    /// Builds a table from already known records, rejecting duplicates
    pub fn from_records(
        size: u32,
        records: impl IntoIterator<Item = GlyphRecord>,
    ) -> Result<Self, FormatError> {
        let mut glyphs = HashMap::new();
        for record in records {
            if glyphs.insert(record.ch, record).is_some() {
                return Err(FormatError::DuplicateGlyph { size, ch: record.ch });
            }
        }
        Ok(Self { glyphs })
    }

    pub fn get(&self, ch: char) -> Option<&GlyphRecord> {
        self.glyphs.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlyphRecord> {
        self.glyphs.values()
    }

    /// Serializes back into the `chars_data` line format, ordered by x
    pub fn to_chars_data(&self) -> String {
        let mut records: Vec<&GlyphRecord> = self.glyphs.values().collect();
        records.sort_by_key(|r| (r.x, r.ch));
        records
            .iter()
            .map(|r| format!("{} {} {}", r.ch, r.x, r.width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_line(line: &str) -> Result<GlyphRecord, String> {
    let mut chars = line.chars();
    let ch = chars.next().ok_or_else(|| "empty line".to_string())?;
    let rest = chars.as_str();
    let fields = rest
        .strip_prefix(' ')
        .ok_or_else(|| format!("expected a space after '{}'", ch))?;

    let mut numbers = fields.split_whitespace();
    let x = parse_field(numbers.next(), "x")?;
    let width = parse_field(numbers.next(), "width")?;
    if let Some(extra) = numbers.next() {
        return Err(format!("unexpected trailing field '{}'", extra));
    }

    Ok(GlyphRecord::new(ch, x, width))
}

fn parse_field(field: Option<&str>, name: &str) -> Result<u32, String> {
    let field = field.ok_or_else(|| format!("missing {} field", name))?;
    field
        .parse::<u32>()
        .map_err(|e| format!("invalid {} '{}': {}", name, field, e))
}
