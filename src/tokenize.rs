use std::borrow::Cow;

use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use crate::error::{BuildError, XmlError};
use crate::event::{Attribute, XmlEventSink};
use crate::util::{text_pos_at, unescape, Normalize};

/// An element whose start tag has been read up to, but not including, `>` or `/>`.
struct PendingElement<'a> {
    name: Cow<'a, str>,
    start: usize,
    attributes: Vec<Attribute<'a>>,
}

/// Drives `sink` with the events of `xml`, tokenized by `xmlparser`.
///
/// Comments, processing instructions, declarations and DTDs produce no events.
pub fn stream_events<S: XmlEventSink>(xml: &str, sink: &mut S) -> Result<(), XmlError> {
    let mut pending: Option<PendingElement> = None;

    for token in Tokenizer::from(xml) {
        match token? {
            Token::ElementStart { prefix, local, span } => {
                pending = Some(PendingElement {
                    name: qualified_name(prefix, local),
                    start: span.start(),
                    attributes: vec![],
                });
            }
            Token::Attribute { prefix, local, value, span } => {
                let value = unescape(value.as_str(), Normalize::AttributeValue)
                    .map_err(|err| unknown_reference(xml, value.start() + err.offset, err.reference))?;
                if let Some(element) = pending.as_mut() {
                    // names are compared as written, before any case folding
                    let name = qualified_name(prefix, local);
                    if element.attributes.iter().any(|attr| attr.name == name) {
                        return Err(XmlError::DuplicatedAttribute {
                            name: name.into_owned(),
                            pos: text_pos_at(xml, span.start()),
                        });
                    }
                    element.attributes.push(Attribute::new(name, value));
                }
            }
            Token::ElementEnd { end, span } => match end {
                ElementEnd::Open | ElementEnd::Empty => {
                    if let Some(element) = pending.take() {
                        sink.on_element_open(&element.name, &element.attributes)
                            .map_err(|source| build_error(xml, element.start, source))?;
                        if matches!(end, ElementEnd::Empty) {
                            sink.on_element_close(&element.name)
                                .map_err(|source| build_error(xml, span.start(), source))?;
                        }
                    }
                }
                ElementEnd::Close(prefix, local) => {
                    sink.on_element_close(&qualified_name(prefix, local))
                        .map_err(|source| build_error(xml, span.start(), source))?;
                }
            },
            Token::Text { text } => {
                let decoded = unescape(text.as_str(), Normalize::Text)
                    .map_err(|err| unknown_reference(xml, text.start() + err.offset, err.reference))?;
                sink.on_text(&decoded)
                    .map_err(|source| build_error(xml, text.start(), source))?;
            }
            Token::Cdata { text, span } => {
                sink.on_text(text.as_str())
                    .map_err(|source| build_error(xml, span.start(), source))?;
            }
            Token::Declaration { .. } |
            Token::ProcessingInstruction { .. } |
            Token::Comment { .. } |
            Token::DtdStart { .. } |
            Token::EmptyDtd { .. } |
            Token::EntityDeclaration { .. } |
            Token::DtdEnd { .. } => {}
        }
    }
    Ok(())
}

fn qualified_name<'a>(prefix: StrSpan<'a>, local: StrSpan<'a>) -> Cow<'a, str> {
    if prefix.as_str().is_empty() {
        Cow::Borrowed(local.as_str())
    } else {
        Cow::Owned(format!("{}:{}", prefix.as_str(), local.as_str()))
    }
}

fn build_error(xml: &str, offset: usize, source: BuildError) -> XmlError {
    XmlError::Build { pos: text_pos_at(xml, offset), source }
}

fn unknown_reference(xml: &str, offset: usize, reference: String) -> XmlError {
    XmlError::UnknownReference { reference, pos: text_pos_at(xml, offset) }
}
