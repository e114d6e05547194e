use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Row and column (both 1-based) inside the parsed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextPos {
    pub row: u32,
    pub col: u32,
}

impl TextPos {
    pub fn new(row: u32, col: u32) -> TextPos {
        TextPos { row, col }
    }
}

impl Display for TextPos {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

impl From<xmlparser::TextPos> for TextPos {
    fn from(pos: xmlparser::TextPos) -> Self {
        TextPos::new(pos.row, pos.col)
    }
}

impl From<roxmltree::TextPos> for TextPos {
    fn from(pos: roxmltree::TextPos) -> Self {
        TextPos::new(pos.row, pos.col)
    }
}

/// Event sequences the tree builder refuses.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("closing tag </{found}> does not match open element <{expected}>")]
    NonMatchingTags { expected: String, found: String },
    #[error("closing tag </{0}> without an open element")]
    UnexpectedEndTag(String),
    #[error("element <{0}> after the root element")]
    MultipleRoots(String),
    #[error("text {0:?} outside the root element")]
    TextOutsideRoot(String),
    #[error("unclosed elements at end of input: {}", .0.join(", "))]
    UnclosedElements(Vec<String>),
}

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("cannot read {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Encoding { path: PathBuf, source: FromUtf8Error },
    #[error(transparent)]
    Syntax(#[from] xmlparser::Error),
    #[error(transparent)]
    Document(#[from] roxmltree::Error),
    #[error("duplicated attribute {name:?} at {pos}")]
    DuplicatedAttribute { name: String, pos: TextPos },
    #[error("unknown reference {reference:?} at {pos}")]
    UnknownReference { reference: String, pos: TextPos },
    #[error("{source} at {pos}")]
    Build { pos: TextPos, source: BuildError },
    #[error(transparent)]
    Unclosed(BuildError),
}

impl XmlError {
    /// Where in the input the error was detected, if known.
    pub fn position(&self) -> Option<TextPos> {
        match self {
            XmlError::Syntax(err) => Some(err.pos().into()),
            XmlError::Document(err) => Some(err.pos().into()),
            XmlError::DuplicatedAttribute { pos, .. } |
            XmlError::UnknownReference { pos, .. } |
            XmlError::Build { pos, .. } => Some(*pos),
            XmlError::Io { .. } |
            XmlError::Encoding { .. } |
            XmlError::Unclosed(_) => None,
        }
    }

    /// The builder error behind this error, if the input was rejected by the builder.
    pub fn build_error(&self) -> Option<&BuildError> {
        match self {
            XmlError::Build { source, .. } |
            XmlError::Unclosed(source) => Some(source),
            _ => None,
        }
    }
}
