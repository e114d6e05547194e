use std::borrow::Cow;

use crate::error::TextPos;
use crate::xmlchar::XmlChar;

/// A reference that could not be decoded, with its byte offset in the raw text.
#[derive(Debug, PartialEq)]
pub struct BadReference {
    pub offset: usize,
    pub reference: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalize {
    /// Line endings become `\n`.
    Text,
    /// Line endings, tabs and newlines become a single space.
    AttributeValue,
}

/// Decode entity and character references and normalise literal whitespace.
/// Characters produced by references are never normalised.
/// [https://www.w3.org/TR/xml/#sec-line-ends]
/// [https://www.w3.org/TR/xml/#AVNormalize]
pub fn unescape(raw: &str, mode: Normalize) -> Result<Cow<str>, BadReference> {
    let special = |c: char| match mode {
        Normalize::Text => matches!(c, '&' | '\r'),
        Normalize::AttributeValue => matches!(c, '&' | '\r' | '\n' | '\t'),
    };
    if !raw.contains(special) {
        return Ok(Cow::Borrowed(raw));
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    let mut offset = 0;
    while let Some(pos) = rest.find(special) {
        decoded.push_str(&rest[..pos]);
        let consumed = match rest.as_bytes()[pos] {
            b'&' => {
                let (c, len) = decode_reference(&rest[pos..]).ok_or_else(|| BadReference {
                    offset: offset + pos,
                    reference: reference_text(&rest[pos..]).to_string(),
                })?;
                decoded.push(c);
                len
            }
            b'\r' => {
                decoded.push(if mode == Normalize::Text { '\n' } else { ' ' });
                if rest[pos + 1..].starts_with('\n') { 2 } else { 1 }
            }
            _ => {
                decoded.push(' ');
                1
            }
        };
        rest = &rest[pos + consumed..];
        offset += pos + consumed;
    }
    decoded.push_str(rest);
    Ok(Cow::Owned(decoded))
}

/// Reference ::= EntityRef | CharRef
/// [https://www.w3.org/TR/xml/#sec-references]
/// Returns the decoded char and the byte length of the reference including `&` and `;`.
fn decode_reference(reference: &str) -> Option<(char, usize)> {
    let end = reference.find(';')?;
    let c = match &reference[1..end] {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        name => decode_char_reference(name.strip_prefix('#')?)?,
    };
    Some((c, end + 1))
}

/// CharRef ::= '&#' [0-9]+ ';' | '&#x' [0-9a-fA-F]+ ';'
fn decode_char_reference(body: &str) -> Option<char> {
    let (digits, radix) = match body.strip_prefix('x') {
        Some(hex) => (hex, 16),
        None => (body, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let c = char::from_u32(u32::from_str_radix(digits, radix).ok()?)?;
    if !c.is_xml_char() {
        return None;
    }
    Some(c)
}

fn reference_text(raw: &str) -> &str {
    match raw.find(|c: char| c == ';' || c.is_xml_whitespace()) {
        Some(end) if raw.as_bytes()[end] == b';' => &raw[..=end],
        Some(end) => &raw[..end],
        None => raw,
    }
}

/// Row and column of a byte offset, counted in chars like the parsers do.
pub fn text_pos_at(text: &str, offset: usize) -> TextPos {
    let before = &text[..offset.min(text.len())];
    let row = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    TextPos::new(row as u32, col as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrows_plain_text() {
        assert!(matches!(unescape("plain text\n", Normalize::Text), Ok(Cow::Borrowed("plain text\n"))));
    }

    #[test]
    fn predefined_and_char_references() {
        assert_eq!("<a & 'b'>", unescape("&lt;a &amp; &apos;b&apos;&gt;", Normalize::Text).unwrap());
        assert_eq!("\"AA\u{10FFFF}", unescape("&quot;&#65;&#x41;&#x10FFFF;", Normalize::Text).unwrap());
    }

    #[test]
    fn line_endings() {
        assert_eq!("a\nb\nc", unescape("a\r\nb\rc", Normalize::Text).unwrap());
        assert_eq!("a b c d", unescape("a\r\nb\tc\nd", Normalize::AttributeValue).unwrap());
        // referenced whitespace is kept
        assert_eq!("a\tb\r", unescape("a&#9;b&#13;", Normalize::AttributeValue).unwrap());
    }

    #[test]
    fn bad_references() {
        for (raw, offset, reference) in [
            ("ab&unknown;", 2, "&unknown;"),
            ("&#x8;", 0, "&#x8;"),
            ("x&#a;", 1, "&#a;"),
            ("&#xaaaaffffffff;", 0, "&#xaaaaffffffff;"),
            ("&#10345672367;", 0, "&#10345672367;"),
            ("&#+1;", 0, "&#+1;"),
            ("&amp &lt;", 0, "&amp"),
        ] {
            assert_eq!(
                Err(BadReference { offset, reference: reference.to_string() }),
                unescape(raw, Normalize::Text),
                "{}", raw
            );
        }
    }

    #[test]
    fn positions() {
        let text = "<a>\n  <b>\u{e4}x</b>\n</a>";
        assert_eq!(TextPos::new(1, 1), text_pos_at(text, 0));
        assert_eq!(TextPos::new(2, 3), text_pos_at(text, 6));
        let x = text.find('x').unwrap();
        assert_eq!(TextPos::new(2, 7), text_pos_at(text, x));
    }
}
