//! Translation units and their language variants.

use std::fmt;

use crate::model::header::Property;
use crate::utils::sort_key::normalize;

/// The `<body>` element: translation units in document order.
///
/// Duplicate source texts are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub units: Vec<TranslationUnit>,
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body [Tus: {}]", self.units.len())
    }
}

/// One `<tu>` entry.
///
/// Every attribute is optional. The first variant is the primary one and
/// provides the sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationUnit {
    pub changedate: Option<String>,
    pub changeid: Option<String>,
    pub creationdate: Option<String>,
    pub creationid: Option<String>,
    pub creationtool: Option<String>,
    pub creationtoolversion: Option<String>,
    pub datatype: Option<String>,
    pub lastusagedate: Option<String>,
    pub o_encoding: Option<String>,
    pub o_tmf: Option<String>,
    pub segtype: Option<String>,
    pub srclang: Option<String>,
    pub tuid: Option<String>,
    pub usagecount: Option<String>,
    pub props: Vec<Property>,
    pub variants: Vec<Variant>,
}

impl TranslationUnit {
    /// Creates a unit holding the given variants and no attributes.
    pub fn with_variants(variants: Vec<Variant>) -> Self {
        Self { variants, ..Default::default() }
    }

    /// The variant at position 0, if any.
    pub fn primary_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }
}

impl fmt::Display for TranslationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primary_variant() {
            Some(variant) => f.write_str(normalize(&variant.seg)),
            None => Ok(()),
        }
    }
}

/// One `<tuv>` language rendering of a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variant {
    pub changedate: Option<String>,
    pub changeid: Option<String>,
    pub creationdate: Option<String>,
    pub creationid: Option<String>,
    pub creationtool: Option<String>,
    pub creationtoolversion: Option<String>,
    pub datatype: Option<String>,
    pub lang: String,
    /// The language was read from `xml:lang` rather than a bare `lang`
    pub xml_lang: bool,
    pub lastusagedate: Option<String>,
    pub o_encoding: Option<String>,
    pub o_tmf: Option<String>,
    pub props: Vec<Property>,
    /// Text of the `<seg>` child
    pub seg: String,
}

impl Variant {
    pub fn new<L: Into<String>, S: Into<String>>(lang: L, seg: S) -> Self {
        Self { lang: lang.into(), seg: seg.into(), ..Default::default() }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.seg)
    }
}
