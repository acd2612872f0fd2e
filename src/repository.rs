//! Song persistence.
//!
//! The library never reaches for a global store; callers hand a [`SongStore`] to
//! whatever needs one.

use crate::error::SetlistError;
use crate::model::Song;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait SongStore {
    fn load(&self) -> Result<Vec<Song>, SetlistError>;
    fn save(&self, songs: &[Song]) -> Result<(), SetlistError>;

    /// Insert a song, replacing any stored song with the same id.
    fn upsert(&self, song: Song) -> Result<(), SetlistError> {
        let mut songs = self.load()?;
        match songs.iter_mut().find(|existing| existing.id == song.id) {
            Some(existing) => *existing = song,
            None => songs.push(song),
        }
        self.save(&songs)
    }
}

/// Keeps songs in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    songs: Mutex<Vec<Song>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SongStore for MemoryStore {
    fn load(&self) -> Result<Vec<Song>, SetlistError> {
        let songs = self.songs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(songs.clone())
    }

    fn save(&self, songs: &[Song]) -> Result<(), SetlistError> {
        let mut stored = self.songs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *stored = songs.to_vec();
        Ok(())
    }
}

/// Stores songs as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SongStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Song>, SetlistError> {
        if !self.path.exists() {
            log::debug!("{} does not exist yet; starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, songs: &[Song]) -> Result<(), SetlistError> {
        let json = serde_json::to_string_pretty(songs)?;
        fs::write(&self.path, json)?;
        log::info!("Saved {} song(s) to {}", songs.len(), self.path.display());
        Ok(())
    }
}
