//! Entry names and the `metadata` entry of a package
//!
//! ```text
//! sizes: 12, 24, 48
//! ```

use sfpf_core::FormatError;

/// Name of the entry declaring the size tiers
pub const METADATA_ENTRY: &str = "metadata";

const SIZES_KEY: &str = "sizes";

pub fn atlas_entry(size: u32) -> String {
    format!("atlas_{}", size)
}

pub fn chars_entry(size: u32) -> String {
    format!("chars_data_{}", size)
}

/// Reads the declared sizes, ascending and without duplicates.
///
/// Lines with other keys are ignored; a missing `sizes` key, an empty list
/// or any entry that is not a positive integer is an error.
pub fn parse_sizes(text: &str) -> Result<Vec<u32>, FormatError> {
    let mut declared = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (key, value) = line.split_once(':').ok_or_else(|| {
            FormatError::InvalidMetadata(format!("expected '<key>: <value>', got '{}'", line))
        })?;
        if key.trim() == SIZES_KEY {
            declared = Some(value);
        } else {
            log::debug!("Ignoring metadata key '{}'", key.trim());
        }
    }

    let list = declared
        .ok_or_else(|| FormatError::InvalidMetadata(format!("no '{}' entry", SIZES_KEY)))?;
    if list.trim().is_empty() {
        return Err(FormatError::InvalidMetadata("no sizes declared".into()));
    }

    let mut sizes = list
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            match entry.parse::<u32>() {
                Ok(size) if size > 0 => Ok(size),
                _ => Err(FormatError::InvalidSize(entry.to_string())),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    sizes.sort_unstable();
    sizes.dedup();
    Ok(sizes)
}

/// Inverse of [`parse_sizes`]
pub fn format_sizes(sizes: &[u32]) -> String {
    let list: Vec<String> = sizes.iter().map(u32::to_string).collect();
    format!("{}: {}", SIZES_KEY, list.join(","))
}
