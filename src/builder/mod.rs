//! Builder module for sorted TMX output
//!
//! This module contains the run configuration, the pipeline that loads and
//! sorts a document, and the writer that serializes it back to TMX.

pub mod tmx_builder;
pub mod tmx_writer;

// Re-export commonly used types for convenience
pub use tmx_builder::{SortConfig, TmxBuilder, DEFAULT_INPUT_PATH};
pub use tmx_writer::{TmxWriter, write_document, to_markup};
