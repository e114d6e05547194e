use std::borrow::Cow;

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::{BuildError, XmlError};
use crate::event::{Attribute, XmlEventSink};

enum Step<'a, 'input> {
    Enter(Node<'a, 'input>),
    Leave(Node<'a, 'input>),
}

/// Drives `sink` with the events of a fully parsed `roxmltree` document.
///
/// roxmltree resolves namespaces, so `xmlns` declarations are not reported
/// as attributes. A document without a root element yields no events.
pub fn walk_document<S: XmlEventSink>(xml: &str, sink: &mut S) -> Result<(), XmlError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = match Document::parse_with_options(xml, options) {
        Ok(doc) => doc,
        Err(roxmltree::Error::NoRootNode) => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    let build_error = |node: Node, source: BuildError| XmlError::Build {
        pos: doc.text_pos_at(node.range().start).into(),
        source,
    };

    let mut steps = vec![Step::Enter(doc.root_element())];
    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(node) if node.is_element() => {
                let attributes: Vec<Attribute> = node.attributes()
                    .map(|attr| Attribute::new(qualified(node, attr.namespace(), attr.name()), attr.value()))
                    .collect();
                sink.on_element_open(&element_name(node), &attributes)
                    .map_err(|source| build_error(node, source))?;

                steps.push(Step::Leave(node));
                let children: Vec<Node> = node.children().collect();
                steps.extend(children.into_iter().rev().map(Step::Enter));
            }
            Step::Enter(node) if node.is_text() => {
                sink.on_text(node.text().unwrap_or_default())
                    .map_err(|source| build_error(node, source))?;
            }
            Step::Enter(_) => {}
            Step::Leave(node) => {
                sink.on_element_close(&element_name(node))
                    .map_err(|source| build_error(node, source))?;
            }
        }
    }
    Ok(())
}

fn element_name<'a>(node: Node<'a, '_>) -> Cow<'a, str> {
    let name = node.tag_name();
    qualified(node, name.namespace(), name.name())
}

/// Re-attaches the prefix bound to `namespace` in scope of `node`.
fn qualified<'a>(node: Node<'a, '_>, namespace: Option<&str>, local: &'a str) -> Cow<'a, str> {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => Cow::Owned(format!("{}:{}", prefix, local)),
        _ => Cow::Borrowed(local),
    }
}
