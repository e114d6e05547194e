use wasm_bindgen::prelude::*;

use crate::outline;
use crate::parse::XmlParser;

/// Outline of `xml` for a browser-side renderer.
#[wasm_bindgen(js_name = renderOutline)]
pub fn render_outline(xml: &str) -> Result<String, JsValue> {
    XmlParser::default()
        .parse(xml)
        .map(|tree| outline::render(&tree))
        .map_err(|err| JsValue::from_str(&err.to_string()))
}
