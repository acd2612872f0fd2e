//! # Chord Transposition
//!
//! Shifts chord symbols and whole songs between keys.
//!
//! Intervals are always measured upward: going from `D` to `C` is 10 semitones,
//! not -2. Only the root of a key matters, so `Am` and `A` sit at the same place.
//! Transposed notes come out sharp-spelled; a song in `Bb` transposed away and back
//! again returns with `A#` chords.

use crate::chord::ChordSymbol;
use crate::model::{LyricLine, Song};
use crate::note::key_root;

/// Upward interval in semitones from the root of `from_key` to the root of `to_key`.
///
/// Always in `0..=11`. Returns 0 when either key does not resolve.
///
/// # Example
/// ```
/// use setlist::semitones_between;
///
/// assert_eq!(semitones_between("C", "G"), 7);
/// assert_eq!(semitones_between("G", "C"), 5);
/// assert_eq!(semitones_between("Am", "C"), 3);
/// ```
pub fn semitones_between(from_key: &str, to_key: &str) -> i32 {
    match (key_root(from_key), key_root(to_key)) {
        (Some(from), Some(to)) => (to.index() as i32 - from.index() as i32).rem_euclid(12),
        _ => {
            log::warn!("Cannot resolve key {:?} or {:?}; leaving chords unchanged", from_key, to_key);
            0
        }
    }
}

/// Transpose one chord symbol, including the bass note of slash chords.
///
/// Symbols that do not start with a note are returned unchanged.
///
/// # Example
/// ```
/// use setlist::transpose_chord_symbol;
///
/// assert_eq!(transpose_chord_symbol("G/B", 2), "A/C#");
/// assert_eq!(transpose_chord_symbol("Bbmaj7", 2), "Cmaj7");
/// assert_eq!(transpose_chord_symbol("N.C.", 5), "N.C.");
/// ```
pub fn transpose_chord_symbol(symbol: &str, semitones: i32) -> String {
    if semitones == 0 {
        return symbol.to_string();
    }
    match ChordSymbol::parse(symbol) {
        Some(chord) => chord.transposed(semitones).to_string(),
        None => symbol.to_string(),
    }
}

/// Transpose every chord of every line, leaving ids, positions and text alone.
pub fn transpose_lyrics(lyrics: &[LyricLine], semitones: i32) -> Vec<LyricLine> {
    lyrics
        .iter()
        .map(|line| {
            let mut line = line.clone();
            for chord in &mut line.chords {
                chord.symbol = transpose_chord_symbol(&chord.symbol, semitones);
            }
            line
        })
        .collect()
}

/// A copy of `song` with its chords moved from `current_key` to `new_key`.
pub fn transpose_song(song: &Song, new_key: &str) -> Song {
    let semitones = semitones_between(&song.current_key, new_key);
    let mut transposed = song.clone();

    if semitones != 0 {
        transposed.lyrics = transpose_lyrics(&song.lyrics, semitones);
    }
    if semitones != 0 || song.current_key != new_key {
        transposed.current_key = new_key.to_string();
        transposed.touch();
    }
    transposed
}

/// Move a song back to the key it was imported in.
pub fn reset_to_original_key(song: &Song) -> Song {
    transpose_song(song, &song.original_key)
}

/// Transpose a freshly imported song to `target`, keeping `original_key` as detected.
pub fn normalize_song_key(song: &Song, target: &str) -> Song {
    if song.current_key == target {
        return song.clone();
    }
    log::info!("Normalizing {:?} from {} to {}", song.title, song.current_key, target);
    transpose_song(song, target)
}
