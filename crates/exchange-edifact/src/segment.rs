//! EDIFACT segment tokenizer.
//!
//! Segments are terminated by `'`, elements within a segment are separated
//! by `+`, and components within an element are separated by `:`.

use serde::{Deserialize, Serialize};

/// One tokenized EDIFACT segment: a tag plus its elements, each element an
/// ordered list of components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub tag: String,
    pub elements: Vec<Vec<String>>,
}

impl Segment {
    /// Element at `index`, if present.
    pub fn element(&self, index: usize) -> Option<&[String]> {
        self.elements.get(index).map(Vec::as_slice)
    }

    /// Component `component` of element `element`, if present.
    pub fn component(&self, element: usize, component: usize) -> Option<&str> {
        self.elements
            .get(element)
            .and_then(|e| e.get(component))
            .map(String::as_str)
    }

    /// Like [`component`](Self::component), but absent positions read as "".
    pub fn component_or_empty(&self, element: usize, component: usize) -> &str {
        self.component(element, component).unwrap_or("")
    }
}

/// Tokenize raw EDIFACT text into segments.
///
/// Never fails: empty input yields an empty vector, and absent elements or
/// components simply yield empty entries. Whitespace (including newlines)
/// around segments is ignored.
pub fn parse_segments(raw: &str) -> Vec<Segment> {
    raw.split('\'')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let mut parts = piece.split('+');
            let tag = parts.next().unwrap_or("").to_string();
            let elements = parts
                .map(|element| element.split(':').map(str::to_string).collect())
                .collect();
            Segment { tag, elements }
        })
        .collect()
}

/// Reinterpret an 8-character `YYYYMMDD` value as `YYYY-MM-DD`.
///
/// Anything else passes through unchanged; the codec does not validate that
/// the input is numeric.
pub fn format_date(raw: &str) -> String {
    if raw.len() == 8 && raw.is_ascii() {
        format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..8])
    } else {
        raw.to_string()
    }
}
