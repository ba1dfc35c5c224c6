//! TMX document reader.
//!
//! Maps the XML event stream produced by `quick_xml` onto the [`Tmx`] model.
//! Elements and attributes the model does not know about are skipped, so
//! files written by newer tools still load. Attribute names are matched on
//! their local name: `xml:lang` and `lang` both set the variant language.
//!
//! # Examples
//!
//! ```
//! use tmx_sort::readers::parse_document;
//!
//! let xml = r#"<?xml version="1.0" encoding="utf-8"?>
//! <tmx version="1.4">
//!   <header srclang="es" changedate=""/>
//!   <body>
//!     <tu tuid="1"><tuv xml:lang="es"><seg>Hola</seg></tuv></tu>
//!   </body>
//! </tmx>"#;
//!
//! let tmx = parse_document(xml.as_bytes())?;
//! assert_eq!(tmx.header.srclang, "es");
//! assert_eq!(tmx.header.changedate.as_deref(), Some(""));
//! assert_eq!(tmx.header.changeid, None);
//! assert_eq!(tmx.body.units[0].variants[0].seg, "Hola");
//! # Ok::<(), tmx_sort::TmxError>(())
//! ```

use std::io::BufRead;

use log::{debug, warn};
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::model::{Body, Header, Property, Tmx, TranslationUnit, Variant};
use crate::utils::string_from_slice;
use crate::{Result, TmxError};

/// Attributes of one element, collected before the element's children are read.
#[derive(Debug, Default)]
struct NodeAttrs {
    /// (local name, qualified name, unescaped value)
    attrs: Vec<(String, String, String)>,
}

impl NodeAttrs {
    fn from_start<R>(e: &BytesStart, reader: &Reader<R>) -> Result<Self> {
        let mut attrs = Vec::new();
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|e| TmxError::parser_error(reader.buffer_position(), e))?;
            let local = string_from_slice(attr.key.local_name().as_ref());
            let qualified = string_from_slice(attr.key.as_ref());
            let value = attr.decode_and_unescape_value(reader.decoder())
                .map_err(|e| TmxError::parser_error(reader.buffer_position(), e))?
                .into_owned();
            attrs.push((local, qualified, value));
        }
        Ok(Self { attrs })
    }

    /// Present-or-absent attribute; an empty value stays `Some("")`.
    fn get_opt(&self, key: &str) -> Option<String> {
        self.attrs.iter()
            .find(|(local, _, _)| local == key)
            .map(|(_, _, value)| value.clone())
    }

    /// Attribute value, or an empty string when absent.
    fn get_str(&self, key: &str) -> String {
        self.get_opt(key).unwrap_or_default()
    }

    fn qualified_name(&self, key: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|(local, _, _)| local == key)
            .map(|(_, qualified, _)| qualified.as_str())
    }
}

/// Streaming reader that builds a [`Tmx`] from XML events.
pub struct TmxReader<R> {
    reader: Reader<R>,
}

impl<'a> TmxReader<&'a [u8]> {
    pub fn from_bytes(xml: &'a [u8]) -> Self {
        Self::from_reader(xml)
    }
}

impl<R: BufRead> TmxReader<R> {
    pub fn from_reader(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        // Segment text keeps its whitespace.
        reader.config_mut().trim_text(false);
        Self { reader }
    }

    fn next_event<'b>(&mut self, buf: &'b mut Vec<u8>) -> Result<Event<'b>> {
        let reader = &mut self.reader;
        match reader.read_event_into(buf) {
            Ok(event) => Ok(event),
            Err(e) => Err(TmxError::parser_error(reader.error_position(), e)),
        }
    }

    /// Reads the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed, if there is no root element,
    /// or if the root element is not `<tmx>`.
    pub fn read_document(&mut self) -> Result<Tmx> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (start, empty) = match self.next_event(&mut buf)? {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::Eof => return Err(TmxError::invalid_data_format("No root element found in XML")),
                _ => continue,
            };
            let root_name = string_from_slice(start.local_name().as_ref());
            if root_name != "tmx" {
                return Err(TmxError::unexpected_root(root_name));
            }
            let attrs = NodeAttrs::from_start(&start, &self.reader)?;
            let mut tmx = Tmx { version: attrs.get_opt("version"), ..Default::default() };
            if !empty {
                self.read_tmx_children(&mut tmx)?;
            }
            debug!("Loaded {} with {} translation units", tmx, tmx.body.units.len());
            return Ok(tmx);
        }
    }

    fn read_tmx_children(&mut self, tmx: &mut Tmx) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (start, empty) = match self.next_event(&mut buf)? {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(unexpected_eof("tmx")),
                _ => continue,
            };
            let name = string_from_slice(start.local_name().as_ref());
            let attrs = NodeAttrs::from_start(&start, &self.reader)?;
            match name.as_str() {
                "header" => tmx.header = self.read_header(attrs, empty)?,
                "body" => {
                    if !empty {
                        tmx.body = self.read_body()?;
                    }
                }
                _ => self.skip_unknown(&name, empty)?,
            }
        }
    }

    fn read_header(&mut self, attrs: NodeAttrs, empty: bool) -> Result<Header> {
        let mut header = Header {
            adminlang: attrs.get_str("adminlang"),
            changedate: attrs.get_opt("changedate"),
            changeid: attrs.get_opt("changeid"),
            creationdate: attrs.get_opt("creationdate"),
            creationid: attrs.get_opt("creationid"),
            creationtool: attrs.get_str("creationtool"),
            creationtoolversion: attrs.get_str("creationtoolversion"),
            datatype: attrs.get_str("datatype"),
            o_encoding: attrs.get_opt("o-encoding"),
            o_tmf: attrs.get_str("o-tmf"),
            segtype: attrs.get_str("segtype"),
            srclang: attrs.get_str("srclang"),
            props: Vec::new(),
        };
        if !empty {
            self.read_props_only("header", &mut header.props)?;
        }
        Ok(header)
    }

    /// Reads children of an element whose only known children are `<prop>`.
    fn read_props_only(&mut self, parent: &str, props: &mut Vec<Property>) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (start, empty) = match self.next_event(&mut buf)? {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(unexpected_eof(parent)),
                _ => continue,
            };
            let name = string_from_slice(start.local_name().as_ref());
            let attrs = NodeAttrs::from_start(&start, &self.reader)?;
            if name == "prop" {
                props.push(self.read_property(attrs, empty)?);
            } else {
                self.skip_unknown(&name, empty)?;
            }
        }
    }

    fn read_property(&mut self, attrs: NodeAttrs, empty: bool) -> Result<Property> {
        let value = if empty { String::new() } else { self.read_text("prop")? };
        Ok(Property { name: attrs.get_str("type"), value })
    }

    fn read_body(&mut self) -> Result<Body> {
        let mut body = Body::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (start, empty) = match self.next_event(&mut buf)? {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::End(_) => return Ok(body),
                Event::Eof => return Err(unexpected_eof("body")),
                _ => continue,
            };
            let name = string_from_slice(start.local_name().as_ref());
            let attrs = NodeAttrs::from_start(&start, &self.reader)?;
            if name == "tu" {
                body.units.push(self.read_unit(attrs, empty)?);
            } else {
                self.skip_unknown(&name, empty)?;
            }
        }
    }

    fn read_unit(&mut self, attrs: NodeAttrs, empty: bool) -> Result<TranslationUnit> {
        let mut unit = TranslationUnit {
            changedate: attrs.get_opt("changedate"),
            changeid: attrs.get_opt("changeid"),
            creationdate: attrs.get_opt("creationdate"),
            creationid: attrs.get_opt("creationid"),
            creationtool: attrs.get_opt("creationtool"),
            creationtoolversion: attrs.get_opt("creationtoolversion"),
            datatype: attrs.get_opt("datatype"),
            lastusagedate: attrs.get_opt("lastusagedate"),
            o_encoding: attrs.get_opt("o-encoding"),
            o_tmf: attrs.get_opt("o-tmf"),
            segtype: attrs.get_opt("segtype"),
            srclang: attrs.get_opt("srclang"),
            tuid: attrs.get_opt("tuid"),
            usagecount: attrs.get_opt("usagecount"),
            props: Vec::new(),
            variants: Vec::new(),
        };
        if empty {
            return Ok(unit);
        }

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (start, empty) = match self.next_event(&mut buf)? {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::End(_) => return Ok(unit),
                Event::Eof => return Err(unexpected_eof("tu")),
                _ => continue,
            };
            let name = string_from_slice(start.local_name().as_ref());
            let attrs = NodeAttrs::from_start(&start, &self.reader)?;
            match name.as_str() {
                "prop" => unit.props.push(self.read_property(attrs, empty)?),
                "tuv" => unit.variants.push(self.read_variant(attrs, empty)?),
                _ => self.skip_unknown(&name, empty)?,
            }
        }
    }

    fn read_variant(&mut self, attrs: NodeAttrs, empty: bool) -> Result<Variant> {
        let mut variant = Variant {
            changedate: attrs.get_opt("changedate"),
            changeid: attrs.get_opt("changeid"),
            creationdate: attrs.get_opt("creationdate"),
            creationid: attrs.get_opt("creationid"),
            creationtool: attrs.get_opt("creationtool"),
            creationtoolversion: attrs.get_opt("creationtoolversion"),
            datatype: attrs.get_opt("datatype"),
            lang: attrs.get_str("lang"),
            xml_lang: attrs.qualified_name("lang") == Some("xml:lang"),
            lastusagedate: attrs.get_opt("lastusagedate"),
            o_encoding: attrs.get_opt("o-encoding"),
            o_tmf: attrs.get_opt("o-tmf"),
            props: Vec::new(),
            seg: String::new(),
        };
        if empty {
            return Ok(variant);
        }

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (start, empty) = match self.next_event(&mut buf)? {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::End(_) => return Ok(variant),
                Event::Eof => return Err(unexpected_eof("tuv")),
                _ => continue,
            };
            let name = string_from_slice(start.local_name().as_ref());
            let attrs = NodeAttrs::from_start(&start, &self.reader)?;
            match name.as_str() {
                "prop" => variant.props.push(self.read_property(attrs, empty)?),
                "seg" => {
                    if !empty {
                        variant.seg = self.read_text("seg")?;
                    }
                }
                _ => self.skip_unknown(&name, empty)?,
            }
        }
    }

    /// Collects the character data of the current element up to its end tag.
    ///
    /// Entity and character references are resolved. Nested elements such as
    /// `<bpt>` or `<ph>` are dropped together with their content.
    fn read_text(&mut self, parent: &str) -> Result<String> {
        let mut text = String::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.next_event(&mut buf)? {
                Event::Text(e) => {
                    let decoded = e.decode()
                        .map_err(|e| TmxError::invalid_data_format(format!("Invalid text in <{}>: {}", parent, e)))?;
                    text.push_str(&decoded);
                }
                Event::CData(e) => {
                    let decoded = e.decode()
                        .map_err(|e| TmxError::invalid_data_format(format!("Invalid CDATA in <{}>: {}", parent, e)))?;
                    text.push_str(&decoded);
                }
                Event::GeneralRef(e) => {
                    let resolved = e.resolve_char_ref()
                        .map_err(|e| TmxError::invalid_data_format(format!("Invalid character reference in <{}>: {}", parent, e)))?;
                    if let Some(ch) = resolved {
                        text.push(ch);
                        continue;
                    }
                    let entity = e.decode()
                        .map_err(|e| TmxError::invalid_data_format(format!("Invalid entity in <{}>: {}", parent, e)))?;
                    match resolve_xml_entity(&entity) {
                        Some(value) => text.push_str(value),
                        None => return Err(TmxError::invalid_data_format(format!("Unknown entity &{}; in <{}>", entity, parent))),
                    }
                }
                Event::Start(e) => {
                    let name = string_from_slice(e.local_name().as_ref());
                    warn!("Dropping inline element <{}> inside <{}>", name, parent);
                    self.skip_element(&name)?;
                }
                Event::Empty(e) => {
                    warn!("Dropping inline element <{}/> inside <{}>", string_from_slice(e.local_name().as_ref()), parent);
                }
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(unexpected_eof(parent)),
                _ => {}
            }
        }
    }

    fn skip_unknown(&mut self, name: &str, empty: bool) -> Result<()> {
        debug!("Skipping unknown element <{}>", name);
        if empty {
            return Ok(());
        }
        self.skip_element(name)
    }

    /// Consumes events up to and including the end tag of the element whose
    /// start tag was just read.
    fn skip_element(&mut self, name: &str) -> Result<()> {
        let mut depth = 0usize;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.next_event(&mut buf)? {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(()),
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(unexpected_eof(name)),
                _ => {}
            }
        }
    }
}

fn unexpected_eof(element: &str) -> TmxError {
    TmxError::invalid_data_format(format!("Unexpected end of document inside <{}>", element))
}

/// Parses a complete TMX document from memory.
pub fn parse_document(xml: &[u8]) -> Result<Tmx> {
    TmxReader::from_bytes(xml).read_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE tmx SYSTEM "tmx14.dtd">
<tmx version="1.4">
  <header creationtool="SDLTM" creationtoolversion="8.05" o-tmf="SDL TM8 Format" datatype="xml"
          segtype="sentence" adminlang="en-US" srclang="es-ES" creationdate="20200101T101010Z"
          changedate="" x-vendor="ignored">
    <prop type="x-Recognizers">RecognizeAll</prop>
    <note>Dropped</note>
  </header>
  <body>
    <tu tuid="1" creationid="ana" usagecount="0">
      <prop type="x-Origin">TM</prop>
      <tuv xml:lang="es-ES"><seg>  %Hola &amp; adiós </seg></tuv>
      <tuv xml:lang="en-US" changedate="20200102T000000Z"><prop type="x-q">ok</prop><seg>Hello &amp; goodbye</seg></tuv>
    </tu>
    <tu><tuv lang="es-ES"><seg/></tuv></tu>
    <tu/>
  </body>
</tmx>"#;

    #[test]
    fn test_parse_sample() {
        let tmx = parse_document(SAMPLE.as_bytes()).unwrap();
        assert_eq!(tmx.version.as_deref(), Some("1.4"));

        let header = &tmx.header;
        assert_eq!(header.creationtool, "SDLTM");
        assert_eq!(header.srclang, "es-ES");
        assert_eq!(header.creationdate.as_deref(), Some("20200101T101010Z"));
        assert_eq!(header.changedate.as_deref(), Some(""));
        assert_eq!(header.changeid, None);
        assert_eq!(header.o_encoding, None);
        assert_eq!(header.props, vec![Property::new("x-Recognizers", "RecognizeAll")]);

        let units = &tmx.body.units;
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].tuid.as_deref(), Some("1"));
        assert_eq!(units[0].usagecount.as_deref(), Some("0"));
        assert_eq!(units[0].changedate, None);
        assert_eq!(units[0].props, vec![Property::new("x-Origin", "TM")]);
        assert_eq!(units[0].variants.len(), 2);

        let primary = &units[0].variants[0];
        assert_eq!(primary.lang, "es-ES");
        assert!(primary.xml_lang);
        assert_eq!(primary.seg, "  %Hola & adiós ");

        let second = &units[0].variants[1];
        assert_eq!(second.changedate.as_deref(), Some("20200102T000000Z"));
        assert_eq!(second.props, vec![Property::new("x-q", "ok")]);
        assert_eq!(second.seg, "Hello & goodbye");

        assert_eq!(units[1].variants[0].lang, "es-ES");
        assert!(!units[1].variants[0].xml_lang);
        assert_eq!(units[1].variants[0].seg, "");
        assert!(units[2].variants.is_empty());
    }

    #[test]
    fn test_character_references_and_cdata() {
        let xml = r#"<tmx><body><tu><tuv lang="fr"><seg>caf&#233; &lt;b&gt; <![CDATA[<raw>]]></seg></tuv></tu></body></tmx>"#;
        let tmx = parse_document(xml.as_bytes()).unwrap();
        assert_eq!(tmx.body.units[0].variants[0].seg, "café <b> <raw>");
    }

    #[test]
    fn test_inline_markup_is_dropped() {
        let xml = r#"<tmx><body><tu><tuv lang="en"><seg>Press <bpt i="1">&lt;b&gt;</bpt>OK<ept i="1">&lt;/b&gt;</ept><ph/> now</seg></tuv></tu></body></tmx>"#;
        let tmx = parse_document(xml.as_bytes()).unwrap();
        assert_eq!(tmx.body.units[0].variants[0].seg, "Press OK now");
    }

    #[test]
    fn test_missing_header_and_body() {
        let tmx = parse_document(b"<tmx/>").unwrap();
        assert_eq!(tmx, Tmx::default());

        let tmx = parse_document(b"<tmx><body/></tmx>").unwrap();
        assert_eq!(tmx.header, Header::default());
        assert!(tmx.body.units.is_empty());
    }

    #[test]
    fn test_wrong_root() {
        let err = parse_document(b"<xliff><file/></xliff>").unwrap_err();
        assert!(matches!(err, TmxError::UnexpectedRoot { ref found, .. } if found == "xliff"));
    }

    #[test]
    fn test_malformed_xml() {
        let cases: [&[u8]; 4] = [
            b"",
            b"<tmx><body><tu></body></tmx>",
            b"<tmx><body>",
            b"<tmx><header srclang=\"en></tmx>",
        ];
        for xml in cases {
            assert!(parse_document(xml).is_err(), "{:?} should not parse", String::from_utf8_lossy(xml));
        }
    }

    #[test]
    fn test_malformed_xml_is_parser_error() {
        let cases: [&[u8]; 3] = [
            b"<tmx><body></tmx>",
            b"<tmx><header srclang=\"en\" srclang=\"fr\"/></tmx>",
            b"<tmx><body><tu><tuv lang=\"a&bogus;\"/></tu></body></tmx>",
        ];
        for xml in cases {
            match parse_document(xml).unwrap_err() {
                TmxError::ParserError { position, .. } => {
                    assert!(position <= xml.len() as u64, "position {} past end of input", position);
                }
                other => panic!("{:?}: unexpected error {:?}", String::from_utf8_lossy(xml), other),
            }
        }
        let message = parse_document(b"<tmx><body></tmx>").unwrap_err().to_string();
        assert!(message.starts_with("Parser error at byte "), "{}", message);
    }
}
