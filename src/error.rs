//! # Error Types
//!
//! Errors raised at the fallible edges of the crate: sheet metadata, configuration,
//! storage and structural song edits.
//!
//! Parsing chord text and transposing chords never fail. Malformed input degrades to
//! verbatim lyric lines, unknown keys to a zero-semitone shift and unknown chord
//! symbols pass through untouched, so none of those paths produce a `SetlistError`.
//!
//! ## Usage
//! ```rust
//! use setlist::{parse_sheet, SetlistError};
//!
//! match parse_sheet("---\ntitle: [unclosed\n---\nC G\nHello") {
//!     Ok(sheet) => println!("{:?}", sheet.metadata.title),
//!     Err(SetlistError::Metadata(message)) => eprintln!("bad frontmatter: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetlistError {
    /// Invalid YAML frontmatter in a chord sheet.
    ///
    /// # Example
    /// ```
    /// # use setlist::SetlistError;
    /// let err = SetlistError::Metadata("invalid type: sequence".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: invalid type: sequence");
    /// ```
    #[error("Invalid metadata: {0}")]
    Metadata(String),

    /// Invalid import configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A song store could not encode or decode its contents.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An edit referenced a lyric line id the song does not contain.
    ///
    /// # Example
    /// ```
    /// # use setlist::SetlistError;
    /// let err = SetlistError::LineNotFound("line-7".to_string());
    /// assert_eq!(err.to_string(), "Line not found: line-7");
    /// ```
    #[error("Line not found: {0}")]
    LineNotFound(String),

    #[error("Chord {chord_id} not found on line {line_id}")]
    ChordNotFound { line_id: String, chord_id: String },
}
