use std::borrow::Cow;

use crate::error::BuildError;

/// One attribute as delivered with its element's open event.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Attribute<'a> {
        Attribute { name: name.into(), value: value.into() }
    }
}

/// Consumer of the three events a streaming XML parser produces.
///
/// Events must arrive in document order. Text may be split into several
/// chunks per element.
pub trait XmlEventSink {
    fn on_element_open(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), BuildError>;

    fn on_text(&mut self, text: &str) -> Result<(), BuildError>;

    fn on_element_close(&mut self, name: &str) -> Result<(), BuildError>;
}
