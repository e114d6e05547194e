use std::path::Path;

pub mod builder;
pub mod dewey;
pub mod document;
pub mod error;
pub mod event;
pub mod node;
pub mod outline;
pub mod parse;
pub mod tokenize;
pub mod tree;
pub mod wasm;

mod util;
mod xmlchar;

pub use dewey::DeweyId;
pub use error::{BuildError, XmlError};
pub use node::{NodeId, NodeKind, TreeNode};
pub use parse::{Backend, ParseOptions, XmlParser};
pub use tree::XmlTree;

/// Parse a UTF-8 XML file with the default streaming parser.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<XmlTree, XmlError> {
    XmlParser::default().parse_file(path)
}
