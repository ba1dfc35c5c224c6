// In-memory model of a TMX 1.4b document
//
// This module provides the typed representation of the document: the root
// element, its header metadata, properties, and the body of translation units
// with their language variants.

pub mod header;
pub mod body;

pub use header::{Tmx, Header, Property};
pub use body::{Body, TranslationUnit, Variant};
