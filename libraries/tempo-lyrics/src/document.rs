//! Lyric document parsing.
//!
//! Two shapes are recognized:
//!
//! ```json
//! { "lyrics": ["line one", "", "line three"] }
//! { "sections": [{ "type": "chorus", "lines": ["..."] }] }
//! ```
//!
//! An empty string in `lyrics` is a blank line. Anything else is rejected.

use crate::error::{LyricsError, Result};
use serde_json::Value;
use tempo_core::{LyricsDocument, LyricsSection};

/// Parse a lyric JSON body
pub fn parse_document(value: &Value) -> Result<LyricsDocument> {
    if let Some(lines) = value.get("lyrics").and_then(Value::as_array) {
        return Ok(LyricsDocument::Lines(lines.iter().map(line_text).collect()));
    }

    if let Some(sections) = value.get("sections").and_then(Value::as_array) {
        return Ok(LyricsDocument::Sections(
            sections.iter().map(parse_section).collect(),
        ));
    }

    Err(LyricsError::UnrecognizedFormat)
}

fn parse_section(section: &Value) -> LyricsSection {
    LyricsSection {
        kind: section
            .get("type")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        lines: section
            .get("lines")
            .and_then(Value::as_array)
            .map(|lines| lines.iter().map(line_text).collect())
            .unwrap_or_default(),
    }
}

fn line_text(line: &Value) -> String {
    match line {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
