//! Plain-text rendering of lyric lines with chords printed above the words.

use crate::model::{LyricLine, Song};

/// Rightmost column a chord is drawn at on a line with no lyric to clamp against.
const MAX_COLUMN: usize = 256;

/// Render lyric lines as a chord sheet.
///
/// Each chord is written at its column, pulled left when it would run past the end
/// of the lyric and pushed right when it would touch the previous chord.
///
/// # Example
/// ```
/// use setlist::{parse_lyrics_with_chords, format_lyrics_for_display};
///
/// let lyrics = parse_lyrics_with_chords("       C        F\nHello darkness my old friend");
/// assert_eq!(
///     format_lyrics_for_display(&lyrics),
///     "C      F\nHello darkness my old friend"
/// );
/// ```
pub fn format_lyrics_for_display(lyrics: &[LyricLine]) -> String {
    let mut out = Vec::with_capacity(lyrics.len() * 2);
    for line in lyrics {
        if !line.chords.is_empty() {
            out.push(chord_row(line));
        }
        if !line.text.is_empty() || line.chords.is_empty() {
            out.push(line.text.clone());
        }
    }
    out.join("\n")
}

/// Render a whole song with a title header and its key.
pub fn render_song(song: &Song) -> String {
    let mut header = format!("{} - {}\n", song.title, song.artist);
    if song.current_key == song.original_key {
        header.push_str(&format!("Key: {}\n", song.current_key));
    } else {
        header.push_str(&format!("Key: {} (original: {})\n", song.current_key, song.original_key));
    }
    format!("{}\n{}\n", header, format_lyrics_for_display(&song.lyrics))
}

fn chord_row(line: &LyricLine) -> String {
    let width = line.text.chars().count();
    let mut row: Vec<char> = Vec::new();

    for chord in &line.chords {
        let len = chord.symbol.chars().count();
        let mut column = chord.position.min(width.max(MAX_COLUMN));
        if column + len > width && len <= width {
            column = width.saturating_sub(len);
        }
        // keep one space after the previous chord
        let occupied = row.iter().rposition(|c| *c != ' ').map_or(0, |last| last + 2);
        column = column.max(occupied);

        if row.len() < column + len {
            row.resize(column + len, ' ');
        }
        for (offset, c) in chord.symbol.chars().enumerate() {
            row[column + offset] = c;
        }
    }

    row.into_iter().collect::<String>().trim_end().to_string()
}
