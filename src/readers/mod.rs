// Readers for TMX documents
//
// This module turns the raw bytes of a TMX 1.4b file into the in-memory model.

pub mod tmx_reader;

pub use tmx_reader::{TmxReader, parse_document};
