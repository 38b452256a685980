//! Streaming repair of malformed OFX markup.
//!
//! Consumes the raw token stream left to right and re-assembles it into a
//! balanced buffer, inserting the start and end tags the source omitted.
//! Aggregate opens are emitted immediately and pushed on the open-tag stack;
//! element opens and text runs are held in single-slot pending buffers and
//! resolved by the next token. There is no backtracking and no lookahead
//! beyond the current token.

mod emit;
mod escape;
mod stack;


use log::trace;
use memchr::memmem;
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

use crate::tags::{TagKind, TagSet};
use emit::StartTag;
pub use escape::escape_text;
use stack::TagStack;

/// Literal opening tag of the document root. Everything before its first
/// occurrence is discarded; its absence is fatal.
const ROOT_OPEN_TAG: &[u8] = b"<OFX>";

/// Terminal failures of a repair pass. No partial buffer is ever returned.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("invalid file, OFX tag not found")]
    MissingRootTag,
    /// A text run has neither a still-open element to attach to nor a close
    /// tag it can be recovered under.
    #[error("character data {0:?} is missing start and end tags")]
    OrphanedText(String),
    /// A close tag follows text while a differently named element is still
    /// pending; it cannot be decided which of the two lost its partner.
    #[error("character data {0:?} has ambiguous closing tags")]
    AmbiguousClosingTags(String),
    #[error("malformed markup: {0}")]
    Tokenizer(#[from] quick_xml::Error),
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("undecodable input: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}

/// Repairs malformed OFX markup into well-formed XML.
///
/// Each call to [`Cleaner::clean`] is an independent single-threaded pass
/// owning its own stack, pending slots and output buffer; a `Cleaner` may be
/// shared freely across passes.
#[derive(Clone, Debug, Default)]
pub struct Cleaner {
    tags: TagSet,
}

impl Cleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleaner with a custom aggregate set.
    pub fn with_tags(tags: TagSet) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Repairs `data` into a balanced XML buffer.
    ///
    /// Scanning starts at the first literal `<OFX>`. In the result every
    /// aggregate and element is balanced, text is trimmed and escaped, and
    /// whitespace-only runs are reduced to nothing. The buffer is a fixed
    /// point: cleaning it again returns it unchanged.
    pub fn clean(&self, data: &[u8]) -> Result<Vec<u8>, CleanError> {
        let Some(root) = memmem::find(data, ROOT_OPEN_TAG) else {
            return Err(CleanError::MissingRootTag);
        };

        let mut reader = Reader::from_reader(&data[root..]);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.expand_empty_elements = true;

        let mut out = Vec::with_capacity(data.len() - root);
        let mut stack = TagStack::new();
        // Single-slot pending buffers: at most one unresolved text run and
        // one unresolved element tag exist at any scan position.
        let mut pending_text: Option<String> = None;
        let mut pending_elem: Option<StartTag> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Text(t) => {
                    let text = t.unescape()?;
                    let escaped = escape_text(text.trim());
                    trace!("text run {escaped:?}");
                    pending_text = (!escaped.is_empty()).then_some(escaped);
                }
                Event::CData(t) => {
                    let bytes = t.into_inner();
                    let text = reader.decoder().decode(bytes.as_ref())?;
                    let escaped = escape_text(text.trim());
                    trace!("cdata run {escaped:?}");
                    pending_text = (!escaped.is_empty()).then_some(escaped);
                }
                Event::Start(e) => {
                    let tag = StartTag::from_event(&e, reader.decoder())?;
                    trace!("start tag {}", tag.name());
                    if let Some(text) = pending_text.take() {
                        // Text before an open tag: the previous element's
                        // end tag is missing.
                        let Some(elem) = pending_elem.take() else {
                            return Err(CleanError::OrphanedText(text));
                        };
                        elem.write_with_text(&text, &mut out);
                    }
                    match self.tags.classify(tag.name()) {
                        TagKind::Aggregate => {
                            tag.write_open(&mut out);
                            stack.push(tag);
                            trace!("stack: {:?}", stack.snapshot());
                        }
                        TagKind::Element => {
                            // Elements cannot nest tags; the close is
                            // inferred from the next token instead.
                            pending_elem = Some(tag);
                        }
                    }
                }
                Event::End(e) => {
                    let name = reader.decoder().decode(e.name().as_ref())?.into_owned();
                    trace!("end tag {name}");
                    let is_aggregate = self.tags.is_aggregate(&name);
                    if let Some(text) = pending_text.take() {
                        match pending_elem.take() {
                            // Close for the pending element itself, or for
                            // an enclosing aggregate that auto-closes it.
                            Some(elem) if elem.name() == name || is_aggregate => {
                                elem.write_with_text(&text, &mut out);
                            }
                            Some(_) => return Err(CleanError::AmbiguousClosingTags(text)),
                            None if is_aggregate => return Err(CleanError::OrphanedText(text)),
                            // Element close whose start tag was dropped:
                            // recover it from the close tag's own name.
                            None => StartTag::from_name(&name).write_with_text(&text, &mut out),
                        }
                    }
                    if is_aggregate {
                        unwind(&mut stack, &name, &mut out);
                    }
                    // A bare element close with nothing pending is a
                    // redundant close and is dropped.
                }
                Event::Eof => break,
                // Prologue, comments and processing instructions carry no
                // statement data.
                _ => {}
            }
            buf.clear();
        }

        // Trailing pending text with no closing event is dropped, and a
        // truncated document legitimately leaves tags open.
        if !stack.is_empty() {
            trace!("input truncated, left open: {:?}", stack.snapshot());
        }
        Ok(out)
    }
}

/// Closes every open tag until the closing tag is matched or the stack runs
/// out (a close for an aggregate that was never opened).
///
/// The tie-break is deliberate: a close for an aggregate always terminates
/// the innermost still-open chain up to and including the first open tag of
/// the same name; it is never treated as spurious.
fn unwind(stack: &mut TagStack, name: &str, out: &mut Vec<u8>) {
    while let Some(open) = stack.pop() {
        open.write_close(out);
        if open.name() == name {
            break;
        }
    }
    trace!("stack: {:?}", stack.snapshot());
}
