//! Sort key generation for translation units.
//!
//! Source segments often start with markup leftovers or punctuation inserted
//! by upstream tools (quotes, ampersands, stray dashes, `%`/`#` markers). The
//! sort key is the primary segment with that leading noise removed, so units
//! are ordered by the words a reader actually sees.
//!
//! # Examples
//!
//! ```
//! use tmx_sort::utils::sort_key::normalize;
//!
//! assert_eq!(normalize("   – %#En la Unión"), "En la Unión");
//! assert_eq!(normalize("Apple #1"), "Apple #1");
//! ```

use std::cmp::Ordering;

use crate::model::TranslationUnit;
use crate::{Result, TmxError};

/// Characters stripped from the start of a segment before comparison.
pub const NOISE_CHARS: [char; 7] = ['\u{2013}', '\u{2014}', '%', '#', ' ', '&', '"'];

/// Normalizes a segment into its comparison key.
///
/// Strips the maximal leading run made only of [`NOISE_CHARS`], then trims
/// surrounding whitespace. Characters after the first non-noise character are
/// left untouched.
pub fn normalize(segment: &str) -> &str {
    segment.trim_start_matches(NOISE_CHARS).trim()
}

/// Returns the segment of the unit's primary variant.
///
/// `index` is the unit's position in the body and only used for the error.
pub fn primary_segment(unit: &TranslationUnit, index: usize) -> Result<&str> {
    unit.primary_variant()
        .map(|variant| variant.seg.as_str())
        .ok_or_else(|| TmxError::missing_variant(index, unit.tuid.clone()))
}

/// Returns the normalized sort key of a unit.
pub fn get_sort_key(unit: &TranslationUnit, index: usize) -> Result<&str> {
    primary_segment(unit, index).map(normalize)
}

/// Orders two normalized keys, byte-wise ascending.
pub fn compare_keys(first: &str, second: &str) -> Ordering {
    first.cmp(second)
}

/// Compares the units at positions `first` and `second` of `units`.
///
/// Fails with [`TmxError::MissingVariant`] carrying the unit's real position
/// if either unit has no variants, or with `InvalidParameter` if a position
/// is out of range.
pub fn compare_units(units: &[TranslationUnit], first: usize, second: usize) -> Result<Ordering> {
    Ok(compare_keys(key_at(units, first)?, key_at(units, second)?))
}

fn key_at(units: &[TranslationUnit], index: usize) -> Result<&str> {
    let unit = units.get(index)
        .ok_or_else(|| TmxError::invalid_parameter(format!("No translation unit at position {}", index)))?;
    get_sort_key(unit, index)
}

/// Sort key of a unit already known to have a primary variant.
fn checked_key(unit: &TranslationUnit) -> &str {
    unit.primary_variant().map(|v| normalize(&v.seg)).unwrap_or_default()
}

/// Sorts units ascending by their sort key.
///
/// Every unit is checked before anything moves: the first unit without
/// variants aborts the sort and the sequence is left as it was. The sort is
/// unstable, units with equal keys end up in no particular order.
pub fn sort_units(units: &mut [TranslationUnit]) -> Result<()> {
    for (index, unit) in units.iter().enumerate() {
        primary_segment(unit, index)?;
    }
    units.sort_unstable_by(|a, b| compare_keys(checked_key(a), checked_key(b)));
    Ok(())
}

/// Checks that the units are in non-decreasing key order.
pub fn is_sorted(units: &[TranslationUnit]) -> Result<bool> {
    for index in 1..units.len() {
        if compare_units(units, index - 1, index)? == Ordering::Greater {
            return Ok(false);
        }
    }
    Ok(true)
}
