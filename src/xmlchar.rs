pub trait XmlChar {
    fn is_xml_char(&self) -> bool;

    fn is_xml_whitespace(&self) -> bool;
}


impl XmlChar for char {
    /// Char ::= #x9 | #xA | #xD | #x20-#xD7FF | #xE000-#xFFFD | #x10000-#x10FFFF
    /// [https://www.w3.org/TR/xml/#charsets]
    fn is_xml_char(&self) -> bool {
        matches!(self,
            '\u{9}' |
            '\u{A}' |
            '\u{D}' |
            '\u{20}'..='\u{D7FF}' |
            '\u{E000}'..='\u{FFFD}' |
            '\u{10000}'..='\u{10FFFF}')
    }

    /// S ::= (#x20 | #x9 | #xD | #xA)+
    /// [https://www.w3.org/TR/xml/#sec-common-syn]
    fn is_xml_whitespace(&self) -> bool {
        matches!(self, ' ' | '\n' | '\t' | '\r')
    }
}

/// Strip leading and trailing XML whitespace.
pub fn trim_xml_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_xml_whitespace())
}
