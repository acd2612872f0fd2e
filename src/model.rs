//! # Song Model
//!
//! Types shared by the parser, the transposer and the external collaborators
//! (storage, UI, export).
//!
//! ## Type Hierarchy
//! ```text
//! Setlist
//!   └── Vec<Song>
//!         ├── original_key / current_key
//!         └── Vec<LyricLine>
//!               ├── text
//!               └── Vec<Chord> (symbol + character column)
//! ```
//!
//! The JSON form uses camelCase field names. `Chord::symbol` is stored as `chord`
//! and legacy documents with `cifraClubUrl` / `musics` still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chord annotation placed at a character column of its lyric line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub id: String,
    #[serde(rename = "chord")]
    pub symbol: String,
    pub position: usize,
}

impl Chord {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, position: usize) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            position,
        }
    }
}

/// One line of lyric text with the chords printed above it.
///
/// `text` may be empty for instrumental lines that only carry chords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    pub id: String,
    pub text: String,
    pub chords: Vec<Chord>,
    pub position: usize,
}

impl LyricLine {
    pub fn new(id: impl Into<String>, text: impl Into<String>, chords: Vec<Chord>, position: usize) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            chords,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Key detected or declared at import time.
    pub original_key: String,
    /// Key the chords are currently written in.
    pub current_key: String,
    pub lyrics: Vec<LyricLine>,
    #[serde(default, alias = "cifraClubUrl", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Song {
    /// Create a song whose chords are written in `key`.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        key: impl Into<String>,
        lyrics: Vec<LyricLine>,
    ) -> Self {
        let key = key.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            artist: artist.into(),
            original_key: key.clone(),
            current_key: key,
            lyrics,
            source_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Mark the song as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Every chord symbol in reading order.
    pub fn chord_symbols(&self) -> Vec<&str> {
        self.lyrics
            .iter()
            .flat_map(|line| line.chords.iter().map(|chord| chord.symbol.as_str()))
            .collect()
    }
}

/// An ordered, named collection of songs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setlist {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "musics")]
    pub songs: Vec<Song>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Setlist {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            songs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_song(&mut self, song: Song) {
        self.songs.push(song);
        self.updated_at = Utc::now();
    }

    /// Remove a song by id, returning it if it was present.
    pub fn remove_song(&mut self, song_id: &str) -> Option<Song> {
        let index = self.songs.iter().position(|song| song.id == song_id)?;
        self.updated_at = Utc::now();
        Some(self.songs.remove(index))
    }

    /// Replace the stored song that has the same id, e.g. after transposing or editing it.
    pub fn update_song(&mut self, song: Song) -> bool {
        match self.songs.iter_mut().find(|existing| existing.id == song.id) {
            Some(existing) => {
                *existing = song;
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Move the song at `from` to index `to`. Out-of-range indices leave the setlist unchanged.
    pub fn move_song(&mut self, from: usize, to: usize) -> bool {
        if from >= self.songs.len() || to >= self.songs.len() {
            return false;
        }
        let song = self.songs.remove(from);
        self.songs.insert(to, song);
        self.updated_at = Utc::now();
        true
    }
}
