use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::builder::TreeBuilder;
use crate::document::walk_document;
use crate::error::XmlError;
use crate::tokenize::stream_events;
use crate::tree::XmlTree;

/// Which parser feeds the tree builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Token stream from `xmlparser`. Checks syntax, not well-formedness.
    #[default]
    Streaming,
    /// Full `roxmltree` parse first, then a walk over the document.
    Dom,
}

#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    pub backend: Backend,
}

#[derive(Clone, Debug, Default)]
pub struct XmlParser {
    options: ParseOptions,
}

impl XmlParser {
    pub fn new(options: ParseOptions) -> XmlParser {
        XmlParser { options }
    }

    pub fn with_backend(backend: Backend) -> XmlParser {
        XmlParser::new(ParseOptions { backend })
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `xml` into a Dewey-labelled tree. Either the whole tree is built
    /// or an error is returned.
    #[instrument(level = "debug", skip(self, xml), fields(backend = ?self.options.backend, len = xml.len()))]
    pub fn parse(&self, xml: &str) -> Result<XmlTree, XmlError> {
        let mut builder = TreeBuilder::new();
        match self.options.backend {
            Backend::Streaming => stream_events(xml, &mut builder)?,
            Backend::Dom => walk_document(xml, &mut builder)?,
        }
        let tree = builder.finish().map_err(XmlError::Unclosed)?;
        debug!(
            elements = tree.element_count(),
            attributes = tree.attribute_count(),
            "built tree"
        );
        Ok(tree)
    }

    /// Read a UTF-8 file and parse it.
    #[instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<XmlTree, XmlError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| XmlError::Io { path: path.to_path_buf(), source })?;
        let xml = String::from_utf8(bytes).map_err(|source| XmlError::Encoding { path: path.to_path_buf(), source })?;
        self.parse(xml.strip_prefix('\u{FEFF}').unwrap_or(&xml))
    }
}
