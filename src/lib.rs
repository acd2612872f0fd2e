//! Chord sheet parsing and transposition for setlists.
//!
//! Plain-text sheets (chords printed on their own line above the lyric, or inline
//! within it) become [`Song`]s made of [`LyricLine`]s, and songs move between keys
//! without touching their lyric layout.
//!
//! ```
//! use setlist::{parse_lyrics_with_chords, transpose_song, Song};
//!
//! let lyrics = parse_lyrics_with_chords("D        G\nAmazing grace");
//! let song = Song::new("Amazing Grace", "John Newton", "D", lyrics);
//! let song = transpose_song(&song, "C");
//! assert_eq!(song.chord_symbols(), vec!["C", "F"]);
//! ```

pub mod chord;
pub mod config;
pub mod editor;
pub mod error;
pub mod import;
pub mod model;
pub mod note;
pub mod parser;
pub mod render;
pub mod repository;
pub mod sheet;
pub mod transpose;

pub use config::{ImportConfig, ParserOptions};
pub use error::SetlistError;
pub use import::{import_page, import_sheet, ImportOutcome, ImportWarning, ScrapedPage};
pub use model::{Chord, LyricLine, Setlist, Song};
pub use parser::{detect_key, extract_key, parse_lyrics_with_chords, parse_lyrics_with_options};
pub use render::{format_lyrics_for_display, render_song};
pub use repository::{JsonFileStore, MemoryStore, SongStore};
pub use sheet::{parse_sheet, Sheet, SheetMetadata};
pub use transpose::{
    normalize_song_key, reset_to_original_key, semitones_between, transpose_chord_symbol, transpose_lyrics,
    transpose_song,
};
