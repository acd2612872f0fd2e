//! # Sheet Documents
//!
//! A saved or hand-typed chord sheet is plain chord/lyric text with an optional
//! YAML block between `---` markers, either at the top or at the bottom:
//!
//! ```text
//! ---
//! title: Amazing Grace
//! artist: John Newton
//! key: D
//! source-url: https://example.com/amazing-grace
//! ---
//! D        G
//! Amazing grace
//! ```
//!
//! A declared `key` takes priority over key detection during import.

use crate::error::SetlistError;
use serde::Deserialize;

/// Metadata from the YAML block of a sheet.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SheetMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub metadata: SheetMetadata,
    /// Chord/lyric text with the metadata block removed.
    pub body: String,
}

/// Split a sheet into metadata and body.
///
/// # Example
/// ```
/// use setlist::parse_sheet;
///
/// let sheet = parse_sheet("---\ntitle: Hymn\nkey: G\n---\nG  C\nla la").unwrap();
/// assert_eq!(sheet.metadata.title.as_deref(), Some("Hymn"));
/// assert_eq!(sheet.metadata.key.as_deref(), Some("G"));
/// assert_eq!(sheet.body, "G  C\nla la");
/// ```
///
/// # Errors
/// Returns [`SetlistError::Metadata`] when the YAML block does not parse.
pub fn parse_sheet(source: &str) -> Result<Sheet, SetlistError> {
    let (metadata_content, body) = extract_metadata(source);

    let metadata = match metadata_content {
        Some(content) if !content.trim().is_empty() => {
            let metadata: SheetMetadata =
                serde_yaml::from_str(&content).map_err(|e| SetlistError::Metadata(e.to_string()))?;
            if let Some(key) = &metadata.key {
                if crate::note::key_root(key).is_none() {
                    return Err(SetlistError::Metadata(format!("Invalid key: {}", key)));
                }
            }
            metadata
        }
        _ => SheetMetadata::default(),
    };

    Ok(Sheet { metadata, body })
}

/// Split off the metadata block. It must open on the first non-blank line or
/// close on the last one; `---` dividers inside the song stay in the body.
fn extract_metadata(source: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = source.lines().collect();
    let is_marker = |line: &&str| line.trim() == "---";

    let (Some(first), Some(last)) = (
        lines.iter().position(|line| !line.trim().is_empty()),
        lines.iter().rposition(|line| !line.trim().is_empty()),
    ) else {
        return (None, source.to_string());
    };

    let leading = is_marker(&lines[first])
        .then(|| lines[first + 1..].iter().position(is_marker).map(|k| (first, first + 1 + k)))
        .flatten();
    let trailing = || {
        is_marker(&lines[last])
            .then(|| lines[..last].iter().rposition(is_marker).map(|open| (open, last)))
            .flatten()
    };

    match leading.or_else(trailing) {
        Some((open, close)) => {
            let metadata = lines[open + 1..close].join("\n");
            let body: Vec<&str> = lines[..open].iter().chain(&lines[close + 1..]).copied().collect();
            (Some(metadata), body.join("\n"))
        }
        None => (None, source.to_string()),
    }
}
