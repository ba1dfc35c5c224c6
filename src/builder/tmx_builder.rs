//! Load, sort and write a TMX document.
//!
//! [`TmxBuilder`] drives one complete run: it reads the input file into the
//! model, sorts the translation units by their normalized primary segment
//! and writes the result with the fixed XML declaration.
//!
//! # Examples
//!
//! ```no_run
//! use tmx_sort::builder::{SortConfig, TmxBuilder};
//! use std::path::PathBuf;
//!
//! # fn main() -> tmx_sort::Result<()> {
//! let config = SortConfig {
//!     input_path: PathBuf::from("memory.tmx"),
//!     output_file: Some(PathBuf::from("memory.sorted.tmx")),
//!     ..Default::default()
//! };
//! TmxBuilder::new(&config).run()?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use log::*;
use snafu::ResultExt;

use crate::builder::tmx_writer::to_markup;
use crate::error::{OpenInputSnafu, WriteOutputSnafu};
use crate::model::Tmx;
use crate::readers::parse_document;
use crate::utils::sort_key::sort_units;
use crate::{Result, TmxError};

/// Input path used when none is given.
pub const DEFAULT_INPUT_PATH: &str = "test/tm.tmx";

/// Configuration for one sorting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Path to the TMX file to sort
    pub input_path: PathBuf,
    /// Where to write the sorted document; standard output when `None`
    pub output_file: Option<PathBuf>,
    /// Number of sorted units whose keys are logged after sorting
    pub preview: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_file: None,
            preview: 0,
        }
    }
}

/// Runs the load/sort/write pipeline for one document.
#[derive(Debug, Clone)]
pub struct TmxBuilder {
    /// Run configuration
    pub config: SortConfig,
    /// Document being sorted; empty until [`TmxBuilder::load`] succeeds
    pub document: Tmx,
}

impl TmxBuilder {
    pub fn new(config: &SortConfig) -> Self {
        Self {
            config: config.clone(),
            document: Tmx::default(),
        }
    }

    /// Creates a builder for a document that is already in memory.
    pub fn from_document(config: &SortConfig, document: Tmx) -> Self {
        Self {
            config: config.clone(),
            document,
        }
    }

    /// Reads and parses the input file.
    ///
    /// # Errors
    ///
    /// Returns [`TmxError::OpenInput`] if the file cannot be read and a parse
    /// error if it is not a TMX document. The builder's document is left
    /// untouched on failure.
    pub fn load(&mut self) -> Result<()> {
        let path = &self.config.input_path;
        if path.as_os_str().is_empty() {
            return Err(TmxError::invalid_parameter("Input path cannot be empty"));
        }
        info!("Loading TMX file: {}", path.display());
        let data = fs::read(path).context(OpenInputSnafu { path: path.clone() })?;
        self.document = parse_document(&data)?;
        Ok(())
    }

    /// Sorts the body's translation units in place.
    pub fn sort(&mut self) -> Result<()> {
        let units = &mut self.document.body.units;
        debug!("Sorting {} translation units", units.len());
        sort_units(units)?;
        debug!("Sorting translation units: done");
        for (i, unit) in units.iter().take(self.config.preview).enumerate() {
            info!("{}) {}", i + 1, unit);
        }
        Ok(())
    }

    /// Serializes the document with the XML declaration.
    pub fn build(&self) -> Result<String> {
        to_markup(&self.document)
    }

    /// Writes finished markup to the configured output.
    pub fn write_output(&self, markup: &str) -> Result<()> {
        match &self.config.output_file {
            Some(path) => {
                fs::write(path, markup).context(WriteOutputSnafu { path: path.clone() })?;
                info!("Wrote sorted TMX to {}", path.display());
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(markup.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Loads, sorts and writes the document.
    ///
    /// Nothing is written unless every earlier step succeeded.
    pub fn run(&mut self) -> Result<()> {
        self.load()?;
        self.sort()?;
        let markup = self.build()?;
        self.write_output(&markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TranslationUnit, Variant};
    use crate::utils::sort_key::is_sorted;

    const UNSORTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tmx version="1.4"><header srclang="en" changeid="bob"></header><body>
<tu tuid="z"><tuv xml:lang="en"><seg># Zebra</seg></tuv><tuv xml:lang="es"><seg>Cebra</seg></tuv></tu>
<tu tuid="a"><tuv xml:lang="en"><seg>Apple</seg></tuv></tu>
<tu tuid="b" changedate=""><tuv xml:lang="en"><seg>%Banana</seg></tuv></tu>
</body></tmx>"#;

    #[test]
    fn test_default_config() {
        let config = SortConfig::default();
        assert_eq!(config.input_path, PathBuf::from("test/tm.tmx"));
        assert_eq!(config.output_file, None);
        assert_eq!(config.preview, 0);
    }

    #[test]
    fn test_sort_and_build() {
        let document = parse_document(UNSORTED.as_bytes()).unwrap();
        let mut builder = TmxBuilder::from_document(&SortConfig { preview: 5, ..Default::default() }, document);
        builder.sort().unwrap();
        assert!(is_sorted(&builder.document.body.units).unwrap());

        let ids: Vec<_> = builder.document.body.units.iter().map(|u| u.tuid.as_deref().unwrap()).collect();
        assert_eq!(ids, ["a", "b", "z"]);

        let markup = builder.build().unwrap();
        assert!(markup.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<tmx version=\"1.4\">"));
        assert!(markup.contains(r#"changeid="bob""#));
        assert!(markup.contains(r#"<tu changedate="" tuid="b">"#));
        assert!(!markup.contains("changedate=\"\" creationtool"));
    }

    #[test]
    fn test_missing_variant_aborts() {
        let mut document = Tmx::default();
        document.body.units = vec![
            TranslationUnit::with_variants(vec![Variant::new("en", "b")]),
            TranslationUnit::default(),
        ];
        let mut builder = TmxBuilder::from_document(&SortConfig::default(), document);
        assert!(builder.sort().unwrap_err().is_missing_variant());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SortConfig { input_path: dir.path().join("absent.tmx"), ..Default::default() };
        let mut builder = TmxBuilder::new(&config);
        let err = builder.load().unwrap_err();
        assert!(matches!(err, TmxError::OpenInput { .. }));
        assert_eq!(builder.document, Tmx::default());
    }

    #[test]
    fn test_empty_input_path() {
        let config = SortConfig { input_path: PathBuf::new(), ..Default::default() };
        let err = TmxBuilder::new(&config).load().unwrap_err();
        assert!(matches!(err, TmxError::InvalidParameter { .. }));
    }

    #[test]
    fn test_run_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tmx");
        let output = dir.path().join("out.tmx");
        fs::write(&input, UNSORTED).unwrap();

        let config = SortConfig {
            input_path: input,
            output_file: Some(output.clone()),
            preview: 0,
        };
        TmxBuilder::new(&config).run().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        let reparsed = parse_document(written.as_bytes()).unwrap();
        let segs: Vec<_> = reparsed.body.units.iter().map(|u| u.variants[0].seg.as_str()).collect();
        assert_eq!(segs, ["Apple", "%Banana", "# Zebra"]);
        assert_eq!(reparsed.body.units[2].variants[1].seg, "Cebra");
    }
}
