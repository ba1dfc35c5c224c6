//! TMX document writer.
//!
//! Serializes the [`Tmx`] model back into the TMX 1.4b element tree. Optional
//! attributes are written only when present; an attribute that was read as
//! `attr=""` is written back as `attr=""`. Every element is written as a
//! start/end pair, with no indentation. Tabs, newlines and carriage returns in
//! attribute values, and carriage returns in text, are written as character
//! references so they survive a parser's whitespace normalization.
//!
//! The XML declaration is not produced here, see [`to_markup`].

use std::io::Write;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::model::{Header, Property, Tmx, TranslationUnit, Variant};
use crate::utils::{escape_attribute, escape_text, XML_DECLARATION};
use crate::Result;

/// Writes the TMX element tree to an underlying byte sink.
pub struct TmxWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> TmxWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { writer: Writer::new(inner) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn start(&mut self, name: &str, attrs: &[(&str, Option<&str>)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        for (key, value) in attrs {
            if let Some(value) = value {
                let escaped = escape_attribute(value);
                elem.push_attribute(Attribute::from((key.as_bytes(), escaped.as_bytes())));
            }
        }
        self.writer.write_event(Event::Start(elem))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if !text.is_empty() {
            self.writer.write_event(Event::Text(BytesText::from_escaped(escape_text(text))))?;
        }
        Ok(())
    }

    pub fn write_document(&mut self, tmx: &Tmx) -> Result<()> {
        self.start("tmx", &[("version", tmx.version.as_deref())])?;
        self.write_header(&tmx.header)?;
        self.start("body", &[])?;
        for unit in &tmx.body.units {
            self.write_unit(unit)?;
        }
        self.end("body")?;
        self.end("tmx")
    }

    fn write_header(&mut self, header: &Header) -> Result<()> {
        self.start("header", &[
            ("adminlang", Some(header.adminlang.as_str())),
            ("changedate", header.changedate.as_deref()),
            ("changeid", header.changeid.as_deref()),
            ("creationdate", header.creationdate.as_deref()),
            ("creationid", header.creationid.as_deref()),
            ("creationtool", Some(header.creationtool.as_str())),
            ("creationtoolversion", Some(header.creationtoolversion.as_str())),
            ("datatype", Some(header.datatype.as_str())),
            ("o-encoding", header.o_encoding.as_deref()),
            ("o-tmf", Some(header.o_tmf.as_str())),
            ("segtype", Some(header.segtype.as_str())),
            ("srclang", Some(header.srclang.as_str())),
        ])?;
        self.write_props(&header.props)?;
        self.end("header")
    }

    fn write_props(&mut self, props: &[Property]) -> Result<()> {
        for prop in props {
            self.start("prop", &[("type", Some(prop.name.as_str()))])?;
            self.text(&prop.value)?;
            self.end("prop")?;
        }
        Ok(())
    }

    fn write_unit(&mut self, unit: &TranslationUnit) -> Result<()> {
        self.start("tu", &[
            ("changedate", unit.changedate.as_deref()),
            ("changeid", unit.changeid.as_deref()),
            ("creationdate", unit.creationdate.as_deref()),
            ("creationid", unit.creationid.as_deref()),
            ("creationtool", unit.creationtool.as_deref()),
            ("creationtoolversion", unit.creationtoolversion.as_deref()),
            ("datatype", unit.datatype.as_deref()),
            ("lastusagedate", unit.lastusagedate.as_deref()),
            ("o-encoding", unit.o_encoding.as_deref()),
            ("o-tmf", unit.o_tmf.as_deref()),
            ("segtype", unit.segtype.as_deref()),
            ("srclang", unit.srclang.as_deref()),
            ("tuid", unit.tuid.as_deref()),
            ("usagecount", unit.usagecount.as_deref()),
        ])?;
        self.write_props(&unit.props)?;
        for variant in &unit.variants {
            self.write_variant(variant)?;
        }
        self.end("tu")
    }

    fn write_variant(&mut self, variant: &Variant) -> Result<()> {
        let lang_key = if variant.xml_lang { "xml:lang" } else { "lang" };
        self.start("tuv", &[
            ("changedate", variant.changedate.as_deref()),
            ("changeid", variant.changeid.as_deref()),
            ("creationdate", variant.creationdate.as_deref()),
            ("creationid", variant.creationid.as_deref()),
            ("creationtool", variant.creationtool.as_deref()),
            ("creationtoolversion", variant.creationtoolversion.as_deref()),
            ("datatype", variant.datatype.as_deref()),
            (lang_key, Some(variant.lang.as_str())),
            ("lastusagedate", variant.lastusagedate.as_deref()),
            ("o-encoding", variant.o_encoding.as_deref()),
            ("o-tmf", variant.o_tmf.as_deref()),
        ])?;
        self.write_props(&variant.props)?;
        self.start("seg", &[])?;
        self.text(&variant.seg)?;
        self.end("seg")?;
        self.end("tuv")
    }
}

/// Serializes the element tree of a document, without an XML declaration.
pub fn write_document(tmx: &Tmx) -> Result<Vec<u8>> {
    let mut writer = TmxWriter::new(Vec::new());
    writer.write_document(tmx)?;
    Ok(writer.into_inner())
}

/// Serializes a document preceded by the fixed XML declaration and a newline.
pub fn to_markup(tmx: &Tmx) -> Result<String> {
    let body = String::from_utf8(write_document(tmx)?)?;
    Ok(format!("{}\n{}", XML_DECLARATION, body))
}
