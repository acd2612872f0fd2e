//! Structural edits on a [`Song`]: metadata, lines and chords.
//!
//! Every successful edit refreshes `updated_at`. Edits addressed to an id the song
//! does not contain fail without modifying anything.

use crate::error::SetlistError;
use crate::model::{Chord, LyricLine, Song};

impl Song {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_artist(&mut self, artist: impl Into<String>) {
        self.artist = artist.into();
        self.touch();
    }

    /// Append a line without chords, returning its id.
    pub fn add_line(&mut self, text: impl Into<String>) -> String {
        let next = self
            .lyrics
            .iter()
            .filter_map(|line| line.id.strip_prefix("line-")?.parse::<usize>().ok())
            .max()
            .map_or(0, |n| n + 1);
        let id = format!("line-{}", next);
        let position = self.lyrics.len();
        self.lyrics.push(LyricLine::new(id.clone(), text, Vec::new(), position));
        self.touch();
        id
    }

    pub fn edit_line_text(&mut self, line_id: &str, text: impl Into<String>) -> Result<(), SetlistError> {
        self.line_mut(line_id)?.text = text.into();
        self.touch();
        Ok(())
    }

    /// Remove a line; the remaining lines are renumbered.
    pub fn remove_line(&mut self, line_id: &str) -> Result<LyricLine, SetlistError> {
        let index = self
            .lyrics
            .iter()
            .position(|line| line.id == line_id)
            .ok_or_else(|| SetlistError::LineNotFound(line_id.to_string()))?;
        let removed = self.lyrics.remove(index);
        for (position, line) in self.lyrics.iter_mut().enumerate() {
            line.position = position;
        }
        self.touch();
        Ok(removed)
    }

    /// Add a chord at a character column, returning the new chord id.
    ///
    /// The line's chords stay sorted by position.
    pub fn add_chord(
        &mut self,
        line_id: &str,
        symbol: impl Into<String>,
        position: usize,
    ) -> Result<String, SetlistError> {
        let line = self.line_mut(line_id)?;
        let prefix = format!("chord-{}-", line.id.strip_prefix("line-").unwrap_or(line.id.as_str()));
        let next = line
            .chords
            .iter()
            .filter_map(|chord| chord.id.rsplit('-').next()?.parse::<usize>().ok())
            .max()
            .map_or(0, |n| n + 1);
        let id = format!("{}{}", prefix, next);

        line.chords.push(Chord::new(id.clone(), symbol, position));
        line.chords.sort_by_key(|chord| chord.position);
        self.touch();
        Ok(id)
    }

    pub fn edit_chord(
        &mut self,
        line_id: &str,
        chord_id: &str,
        symbol: impl Into<String>,
    ) -> Result<(), SetlistError> {
        self.chord_mut(line_id, chord_id)?.symbol = symbol.into();
        self.touch();
        Ok(())
    }

    /// Move a chord to another column of the same line.
    pub fn move_chord(&mut self, line_id: &str, chord_id: &str, position: usize) -> Result<(), SetlistError> {
        self.chord_mut(line_id, chord_id)?.position = position;
        self.line_mut(line_id)?.chords.sort_by_key(|chord| chord.position);
        self.touch();
        Ok(())
    }

    pub fn remove_chord(&mut self, line_id: &str, chord_id: &str) -> Result<Chord, SetlistError> {
        let line = self.line_mut(line_id)?;
        let index = line
            .chords
            .iter()
            .position(|chord| chord.id == chord_id)
            .ok_or_else(|| SetlistError::ChordNotFound {
                line_id: line_id.to_string(),
                chord_id: chord_id.to_string(),
            })?;
        let removed = line.chords.remove(index);
        self.touch();
        Ok(removed)
    }

    fn line_mut(&mut self, line_id: &str) -> Result<&mut LyricLine, SetlistError> {
        self.lyrics
            .iter_mut()
            .find(|line| line.id == line_id)
            .ok_or_else(|| SetlistError::LineNotFound(line_id.to_string()))
    }

    fn chord_mut(&mut self, line_id: &str, chord_id: &str) -> Result<&mut Chord, SetlistError> {
        self.line_mut(line_id)?
            .chords
            .iter_mut()
            .find(|chord| chord.id == chord_id)
            .ok_or_else(|| SetlistError::ChordNotFound {
                line_id: line_id.to_string(),
                chord_id: chord_id.to_string(),
            })
    }
}
