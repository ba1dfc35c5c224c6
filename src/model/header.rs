//! Document root and header metadata.
//!
//! This module defines the root of a TMX document and the document-level
//! metadata stored in its `<header>` element.
//!
//! Optional attributes are modelled as `Option<String>`: `None` means the
//! attribute was absent and is never written back, while `Some(String::new())`
//! is an attribute that was present but empty and is written as `attr=""`.
//!
//! # Examples
//!
//! ```
//! use tmx_sort::model::{Tmx, Property};
//!
//! let mut tmx = Tmx::default();
//! tmx.header.srclang = "en-US".to_string();
//! tmx.header.props.push(Property::new("x-domain", "medicine"));
//! assert_eq!(tmx.to_string(), "tmx [header [Props: 1] body [Tus: 0]]");
//! ```

use std::fmt;

use crate::model::body::Body;

// TMX 1.4b header format:
//   <header creationtool="SDLTM" creationtoolversion="8.05"
//       o-tmf="SDL TM8 Format" datatype="xml" segtype="sentence"
//       adminlang="en-US" srclang="en-US" creationdate="20200101T101010Z"
//       creationid="translator">
//     <prop type="x-Recognizers">RecognizeAll</prop>
//   </header>

/// Root of a TMX document.
///
/// Always holds exactly one header and one body, even when the input had
/// neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tmx {
    /// `version` attribute of the root element
    pub version: Option<String>,
    pub header: Header,
    pub body: Body,
}

impl fmt::Display for Tmx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tmx [{} {}]", self.header, self.body)
    }
}

/// Document-level metadata.
///
/// The plain `String` fields are written even when empty; the `Option`
/// fields only when present on input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub adminlang: String,
    pub changedate: Option<String>,
    pub changeid: Option<String>,
    pub creationdate: Option<String>,
    pub creationid: Option<String>,
    pub creationtool: String,
    pub creationtoolversion: String,
    pub datatype: String,
    pub o_encoding: Option<String>,
    pub o_tmf: String,
    pub segtype: String,
    pub srclang: String,
    pub props: Vec<Property>,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "header [Props: {}]", self.props.len())
    }
}

/// A `<prop type="...">value</prop>` annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    /// Value of the `type` attribute
    pub name: String,
    /// Text content
    pub value: String,
}

impl Property {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prop [{}={}]", self.name, self.value)
    }
}
