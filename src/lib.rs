//! # tmx-sort - Sort TMX translation memories
//!
//! This crate reads a TMX 1.4b translation memory, sorts its translation units
//! by the text of their primary variant, and writes the document back out in
//! the same schema.
//!
//! ## Features
//!
//! - **Lossless attribute handling**: absent attributes stay absent, empty ones stay empty
//! - **Noise-insensitive ordering**: leading quotes, ampersands, dashes, `%` and `#`
//!   are ignored when comparing segments
//! - **Fixed prolog**: output always starts with `<?xml version="1.0" encoding="utf-8"?>`
//!
//! ## Quick Start
//!
//! ```
//! use tmx_sort::readers::parse_document;
//! use tmx_sort::builder::to_markup;
//! use tmx_sort::utils::sort_units;
//!
//! # fn main() -> tmx_sort::Result<()> {
//! let xml = r#"<tmx version="1.4"><header srclang="en"/><body>
//!   <tu><tuv xml:lang="en"><seg># Zebra</seg></tuv></tu>
//!   <tu><tuv xml:lang="en"><seg>Apple</seg></tuv></tu>
//! </body></tmx>"#;
//!
//! let mut tmx = parse_document(xml.as_bytes())?;
//! sort_units(&mut tmx.body.units)?;
//! assert_eq!(tmx.body.units[0].variants[0].seg, "Apple");
//!
//! let markup = to_markup(&tmx)?;
//! assert!(markup.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<tmx"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Model**: [`model`] for the typed document (header, properties, units, variants)
//! - **Readers**: [`readers`] for parsing TMX bytes into the model
//! - **Builder**: [`builder`] for sorting and serializing a document
//! - **Utilities**: [`utils`] for the sort key, the XML declaration and escaping
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are represented by
//! [`TmxError`]. The crate uses the `snafu` library for error handling with
//! context and backtraces.

pub mod builder;
pub mod error;
pub mod model;
pub mod readers;
pub mod utils;

// Re-export commonly used types for convenience
pub use builder::{SortConfig, TmxBuilder};
pub use model::{Tmx, TranslationUnit, Variant};

// Re-export error types for convenience
pub use error::{TmxError, Result, snafu};
