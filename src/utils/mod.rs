// Utility functions and helpers
//
// This module provides XML escaping, the output declaration and the sort key
// used to order translation units.

pub mod utils;
pub mod sort_key;

pub use utils::{XML_DECLARATION, escape_attribute, escape_text, string_from_slice};
pub use sort_key::{normalize, get_sort_key, compare_keys, compare_units, sort_units, is_sorted, NOISE_CHARS};
