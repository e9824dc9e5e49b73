//! Embedded-data extractor for niconico Live embed pages
//!
//! The embed pages ship their payload server-rendered, as a JSON document
//! HTML-escaped into the `data-props` attribute of
//! `<script id="embedded-data">`. This module scans the page as a stream
//! of lexical tokens and returns that attribute's value as soon as the tag
//! is seen, without ever holding the whole document in memory.

use std::cell::RefCell;

use html5ever::local_name;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use crate::error::{NicoliveError, Result};

/// `id` attribute value of the script tag carrying the payload
const SCRIPT_ID: &str = "embedded-data";

/// Attribute holding the HTML-escaped JSON payload
const PROPS_ATTR: &str = "data-props";

/// Token sink that watches for the payload-carrying script start tag
///
/// The tokenizer decodes character references in attribute values, so the
/// captured string is already unescaped (`&quot;` is `"`, `&amp;` is `&`).
struct EmbeddedDataSink {
    props: RefCell<Option<String>>,
}

impl TokenSink for EmbeddedDataSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let Token::TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };
        if tag.kind != TagKind::StartTag || tag.name != local_name!("script") {
            return TokenSinkResult::Continue;
        }

        // Duplicate attributes were already dropped by the tokenizer, so
        // these lookups see the first `id` and first `data-props` only.
        let has_id = tag
            .attrs
            .iter()
            .any(|attr| attr.name.local == local_name!("id") && &*attr.value == SCRIPT_ID);
        if has_id
            && let Some(attr) = tag.attrs.iter().find(|attr| &*attr.name.local == PROPS_ATTR)
        {
            *self.props.borrow_mut() = Some(attr.value.to_string());
            // Pause the tokenizer; the rest of the document is irrelevant.
            return TokenSinkResult::Script(());
        }

        // An id mismatch, or the right id without the payload attribute,
        // does not end the scan: keep looking for a later qualifying tag.
        // The tag still switches the tokenizer into script-data state so
        // the script body is not scanned as markup.
        if tag.self_closing {
            TokenSinkResult::Continue
        } else {
            TokenSinkResult::RawData(RawKind::ScriptData)
        }
    }
}

/// Streaming scanner for the embedded-data payload
///
/// Feed the document with [`push`](Self::push) chunk by chunk; the value is
/// returned as soon as the qualifying tag has been tokenized, so callers
/// can stop reading their source early. Call [`finish`](Self::finish) after
/// the last chunk to flush buffered input and learn whether the scan failed.
///
/// Input is decoded as UTF-8 incrementally: a code point split across
/// chunks is carried over to the next push, and invalid sequences are
/// replaced with U+FFFD instead of aborting the scan.
pub struct EmbeddedDataScanner {
    tokenizer: Tokenizer<EmbeddedDataSink>,
    input: BufferQueue,
    pending: Vec<u8>,
    done: bool,
}

impl EmbeddedDataScanner {
    /// Create a scanner positioned at the start of a document
    pub fn new() -> Self {
        let sink = EmbeddedDataSink {
            props: RefCell::new(None),
        };
        Self {
            tokenizer: Tokenizer::new(sink, TokenizerOpts::default()),
            input: BufferQueue::default(),
            pending: Vec::new(),
            done: false,
        }
    }

    /// Feed the next chunk of the document
    ///
    /// Returns the unescaped `data-props` value on the push that completes
    /// the qualifying tag; further pushes are no-ops once it has been found.
    pub fn push(&mut self, chunk: &[u8]) -> Option<String> {
        if self.done {
            return None;
        }
        self.pending.extend_from_slice(chunk);
        let buffered = std::mem::take(&mut self.pending);
        let mut rest: &[u8] = &buffered;

        while !rest.is_empty() && !self.found() {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.feed(text);
                    rest = &[];
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        self.feed(text);
                    }
                    match err.error_len() {
                        Some(skip) => {
                            self.feed("\u{FFFD}");
                            rest = &tail[skip..];
                        }
                        None => {
                            // Incomplete trailing code point: keep it for
                            // the next chunk.
                            self.pending = tail.to_vec();
                            rest = &[];
                        }
                    }
                }
            }
        }

        let props = self.take_props();
        if props.is_some() {
            self.done = true;
        }
        props
    }

    /// Signal end of input
    ///
    /// Flushes any carried bytes and the tokenizer's internal buffer, then
    /// reports [`NicoliveError::DataNotFound`] if no qualifying tag was
    /// seen anywhere in the document.
    pub fn finish(mut self) -> Result<String> {
        if !self.pending.is_empty() {
            // Truncated document ending mid code point.
            let tail = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            self.feed(&tail);
        }
        self.tokenizer.end();
        self.take_props().ok_or_else(|| {
            NicoliveError::DataNotFound(format!(
                "no <script id=\"{}\"> tag with a {} attribute in document",
                SCRIPT_ID, PROPS_ATTR
            ))
        })
    }

    fn feed(&mut self, text: &str) {
        if text.is_empty() || self.found() {
            return;
        }
        self.input.push_back(StrTendril::from_slice(text));
        let _ = self.tokenizer.feed(&self.input);
    }

    fn found(&self) -> bool {
        self.tokenizer.sink.props.borrow().is_some()
    }

    fn take_props(&mut self) -> Option<String> {
        self.tokenizer.sink.props.borrow_mut().take()
    }
}

impl Default for EmbeddedDataScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans a complete HTML document held in memory
///
/// # Arguments
/// * `html` - Full document text
///
/// # Returns
/// The unescaped `data-props` value of the first
/// `<script id="embedded-data">` tag carrying that attribute
///
/// # Errors
/// Returns `DataNotFound` if no qualifying tag exists, including for empty
/// or malformed input
///
/// # Example
/// ```
/// use nicolive_core::extract_embedded_data;
///
/// let html = r#"<script id="embedded-data" data-props="{&quot;a&quot;:1}"></script>"#;
/// let props = extract_embedded_data(html).unwrap();
/// assert_eq!(props, r#"{"a":1}"#);
/// ```
pub fn extract_embedded_data(html: &str) -> Result<String> {
    let mut scanner = EmbeddedDataScanner::new();
    if let Some(props) = scanner.push(html.as_bytes()) {
        return Ok(props);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Minimal attribute-value escaping, mirroring what the server does
    /// when it renders the payload into the page.
    fn escape_attr(value: &str) -> String {
        value
            .replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    fn page_with_props(props: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head><title>t</title></head><body>\
             <script id=\"embedded-data\" data-props=\"{}\"></script>\
             </body></html>",
            escape_attr(props)
        )
    }

    #[test]
    fn test_extracts_and_unescapes_props() {
        let html = page_with_props(r#"{"reservations":{"reservations":[]}}"#);
        let props = extract_embedded_data(&html).unwrap();
        assert_eq!(props, r#"{"reservations":{"reservations":[]}}"#);
    }

    #[test]
    fn test_decodes_named_and_numeric_references() {
        let html = r#"<script id="embedded-data" data-props="a&quot;b&amp;c&#34;d"></script>"#;
        assert_eq!(extract_embedded_data(html).unwrap(), "a\"b&c\"d");
    }

    #[test]
    fn test_attribute_order_does_not_matter() {
        let html = r#"<script data-props="payload" id="embedded-data"></script>"#;
        assert_eq!(extract_embedded_data(html).unwrap(), "payload");
    }

    #[test]
    fn test_single_quoted_attributes() {
        let html = r#"<script id='embedded-data' data-props='{"a":1}'></script>"#;
        assert_eq!(extract_embedded_data(html).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_first_qualifying_tag_wins() {
        let html = r#"
            <script id="embedded-data" data-props="first"></script>
            <script id="embedded-data" data-props="second"></script>
        "#;
        assert_eq!(extract_embedded_data(html).unwrap(), "first");
    }

    #[test]
    fn test_missing_props_then_later_match() {
        // The right id without data-props does not abort the scan; a later
        // qualifying tag is still found.
        let html = r#"
            <script id="embedded-data"></script>
            <script id="embedded-data" data-props="late"></script>
        "#;
        assert_eq!(extract_embedded_data(html).unwrap(), "late");
    }

    #[test]
    fn test_missing_props_never_found() {
        let html = r#"<html><body><script id="embedded-data">var x;</script></body></html>"#;
        let result = extract_embedded_data(html);
        assert!(matches!(result, Err(NicoliveError::DataNotFound(_))));
    }

    #[test]
    fn test_empty_input_not_found() {
        let result = extract_embedded_data("");
        assert!(matches!(result, Err(NicoliveError::DataNotFound(_))));
    }

    #[test]
    fn test_document_without_tag_not_found() {
        let html = "<html><head></head><body><p>nothing here</p></body></html>";
        let result = extract_embedded_data(html);
        assert!(matches!(result, Err(NicoliveError::DataNotFound(_))));
    }

    #[test]
    fn test_wrong_id_not_found() {
        let html = r#"<script id="other-data" data-props="nope"></script>"#;
        assert!(extract_embedded_data(html).is_err());
    }

    #[test]
    fn test_truncated_document_not_found() {
        let html = r#"<html><body><div class="x"><script id="embedd"#;
        let result = extract_embedded_data(html);
        assert!(matches!(result, Err(NicoliveError::DataNotFound(_))));
    }

    #[test]
    fn test_script_body_is_not_scanned_as_markup() {
        // A lookalike tag inside a script body is raw text, not a token.
        let html = r#"
            <script>document.write('<script id="embedded-data" data-props="fake">');</script>
            <script id="embedded-data" data-props="real"></script>
        "#;
        assert_eq!(extract_embedded_data(html).unwrap(), "real");
    }

    #[test]
    fn test_chunked_pushes_equal_whole_document() {
        let html = page_with_props(r#"{"title":"ニコ生","n":42}"#);
        let whole = extract_embedded_data(&html).unwrap();

        // Push one byte at a time: splits tags, entities, and multibyte
        // characters at every possible boundary.
        let mut scanner = EmbeddedDataScanner::new();
        let mut chunked = None;
        for byte in html.as_bytes() {
            if let Some(props) = scanner.push(std::slice::from_ref(byte)) {
                chunked = Some(props);
                break;
            }
        }
        assert_eq!(chunked.as_deref(), Some(whole.as_str()));
    }

    #[test]
    fn test_early_exit_ignores_later_garbage() {
        let mut scanner = EmbeddedDataScanner::new();
        let head = r#"<script id="embedded-data" data-props="found">"#;
        let props = scanner.push(head.as_bytes());
        assert_eq!(props.as_deref(), Some("found"));
        // Whatever follows is never inspected.
        assert_eq!(scanner.push(b"<<<not html at all"), None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let mut scanner = EmbeddedDataScanner::new();
        assert_eq!(scanner.push(b"<p>\xff\xfe</p>"), None);
        let props = scanner.push(br#"<script id="embedded-data" data-props="ok">"#);
        assert_eq!(props.as_deref(), Some("ok"));
    }

    #[test]
    fn test_empty_props_value() {
        let html = r#"<script id="embedded-data" data-props=""></script>"#;
        assert_eq!(extract_embedded_data(html).unwrap(), "");
    }

    proptest! {
        #[test]
        fn prop_escape_then_extract_is_identity(payload in "[ -~]{0,256}") {
            let html = page_with_props(&payload);
            let extracted = extract_embedded_data(&html).unwrap();
            prop_assert_eq!(extracted, payload);
        }
    }
}
