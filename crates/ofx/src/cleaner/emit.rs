//! Re-emission of start and end tags into the repaired buffer.

use quick_xml::encoding::Decoder;
use quick_xml::events::BytesStart;

use super::CleanError;
use super::escape::escape_text;

/// An opening tag captured from the token stream.
///
/// Holds enough to re-emit an equivalent tag: the qualified name plus any
/// attributes, both passed through opaquely (no namespace resolution).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StartTag {
    name: String,
    attrs: Vec<(String, String)>,
}

impl StartTag {
    pub(crate) fn from_event(e: &BytesStart<'_>, decoder: Decoder) -> Result<Self, CleanError> {
        let name = decoder.decode(e.name().as_ref())?.into_owned();
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = decoder.decode(attr.key.as_ref())?.into_owned();
            if key.is_empty() {
                continue;
            }
            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
            attrs.push((key, value));
        }
        Ok(Self { name, attrs })
    }

    /// Tag recovered from a close token whose start tag was never seen.
    pub(crate) fn from_name(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            attrs: Vec::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn write_open(&self, out: &mut Vec<u8>) {
        out.push(b'<');
        out.extend_from_slice(self.name.as_bytes());
        for (key, value) in &self.attrs {
            out.push(b' ');
            out.extend_from_slice(key.as_bytes());
            out.extend_from_slice(b"=\"");
            out.extend_from_slice(escape_text(value).as_bytes());
            out.push(b'"');
        }
        out.push(b'>');
    }

    pub(crate) fn write_close(&self, out: &mut Vec<u8>) {
        write_end_tag(&self.name, out);
    }

    /// Writes the balanced `<name>text</name>` form in one step. `text` must
    /// already be escaped.
    pub(crate) fn write_with_text(&self, text: &str, out: &mut Vec<u8>) {
        self.write_open(out);
        out.extend_from_slice(text.as_bytes());
        self.write_close(out);
    }
}

pub(crate) fn write_end_tag(name: &str, out: &mut Vec<u8>) {
    out.extend_from_slice(b"</");
    out.extend_from_slice(name.as_bytes());
    out.push(b'>');
}
