//! Push-based region events over a quick-xml pull reader
//!
//! [`drive`] turns the pull stream into `start_region` / `characters` /
//! `end_region` callbacks. Text may arrive in several `characters` calls for
//! one logical value (entities, CDATA sections and comments all split it).
//! The reader is configured for untrusted input: document type declarations
//! are refused, so no external or custom entities can ever be defined, and
//! tag names are taken verbatim without namespace resolution.

use crate::errors::{io_error, malformed, Result};
use depconstrain_core::errors::ConstrainError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use std::sync::Arc;

const OP: &str = "read_xml";

/// Attributes of one region start, unescaped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionAttributes {
    pairs: Vec<(String, String)>,
}

impl RegionAttributes {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut pairs = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| malformed(OP, e.to_string()))?;
            let key = utf8(attribute.key.as_ref())?.to_string();
            let value = attribute
                .unescape_value()
                .map_err(|e| malformed(OP, e.to_string()))?
                .into_owned();
            pairs.push((key, value));
        }
        Ok(Self { pairs })
    }
}

/// Receiver of region events
pub trait RegionHandler {
    /// # Errors
    ///
    /// Any error stops the stream; it is returned from [`drive`] unchanged.
    fn start_region(&mut self, name: &str, attributes: &RegionAttributes) -> Result<()>;

    /// # Errors
    ///
    /// As for [`RegionHandler::start_region`].
    fn end_region(&mut self, name: &str) -> Result<()>;

    /// One fragment of text content
    ///
    /// # Errors
    ///
    /// As for [`RegionHandler::start_region`].
    fn characters(&mut self, text: &str) -> Result<()>;
}

/// Stream every event of `reader` into `handler`
///
/// Takes the reader by value: the underlying input is dropped exactly once
/// when this returns, whether the document was accepted or not.
///
/// # Errors
///
/// `MalformedDocument` for syntax errors, document type declarations,
/// unknown entities, multiple or missing root elements and truncated input;
/// `Io` for read failures; otherwise whatever the handler returns.
pub fn drive<R: BufRead, H: RegionHandler>(mut reader: Reader<R>, handler: &mut H) -> Result<()> {
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(e, reader.buffer_position()))?;

        match event {
            Event::Start(start) => {
                if depth == 0 && saw_root {
                    return Err(malformed(OP, "more than one root element"));
                }
                saw_root = true;
                depth += 1;
                let attributes = RegionAttributes::from_start(&start)?;
                handler.start_region(utf8(start.name().as_ref())?, &attributes)?;
            }
            Event::Empty(start) => {
                // not produced while expand_empty_elements is set
                if depth == 0 && saw_root {
                    return Err(malformed(OP, "more than one root element"));
                }
                saw_root = true;
                let attributes = RegionAttributes::from_start(&start)?;
                let qname = start.name();
                let name = utf8(qname.as_ref())?;
                handler.start_region(name, &attributes)?;
                handler.end_region(name)?;
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                handler.end_region(utf8(end.name().as_ref())?)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| malformed(OP, e.to_string()))?;
                if depth == 0 {
                    if !text.trim().is_empty() {
                        return Err(malformed(OP, "text content outside of the root element"));
                    }
                } else {
                    handler.characters(&text)?;
                }
            }
            Event::CData(cdata) => {
                if depth > 0 {
                    handler.characters(utf8(&cdata)?)?;
                }
            }
            Event::DocType(_) => {
                return Err(malformed(OP, "document type declarations are not allowed"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(malformed(OP, "document has no root element"));
    }
    if depth != 0 {
        return Err(malformed(OP, "unexpected end of document"));
    }
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| malformed(OP, e.to_string()))
}

fn xml_error(err: quick_xml::Error, position: impl std::fmt::Display) -> ConstrainError {
    match err {
        quick_xml::Error::Io(shared) => {
            let io = Arc::try_unwrap(shared)
                .unwrap_or_else(|shared| std::io::Error::new(shared.kind(), shared.to_string()));
            io_error(OP, io)
        }
        other => malformed(OP, format!("{} (at byte {})", other, position)).with_source(other),
    }
}
