//! # Chord Sheet Parser
//!
//! Turns raw chord-sheet text (scraped or typed) into [`LyricLine`]s and guesses
//! the key the sheet is written in.
//!
//! ## Line Classification
//! Every physical line is trimmed; blank lines are dropped, and so are lines that
//! consist only of a key label such as `tom: D` or `Key: Am`. The remaining lines
//! are either:
//!
//! - **chord-only**: at least one chord token, and fewer than
//!   `chord_line_residual_limit` characters left once the chords are removed. Such a
//!   line annotates the line directly below it; the pair becomes one `LyricLine`
//!   whose chord positions are the chord offsets scaled by `position_scale`.
//! - **mixed**: anything else, including a chord-only line with nothing below it.
//!   Chords keep their exact offsets. When there are more than
//!   `inline_strip_threshold` of them they are treated as inline markup and removed
//!   from the text.
//!
//! ```text
//! D        G            ->  LyricLine { text: "Amazing grace",
//! Amazing grace                         chords: [D@0, G@7] }
//! ```
//!
//! Parsing never fails; unrecognized lines are kept verbatim with no chords.
//!
//! ## Key Detection
//! [`extract_key`] looks for an explicit label first (`tom:`, `tom`, `[Intro]`,
//! `Key:`, `tonalidade`, in that order of precedence), then falls back to the first
//! standalone chord in the text, then to `"C"`.

use crate::chord::{find_chords, strip_chords, ChordMatch, ChordSymbol};
use crate::config::ParserOptions;
use crate::model::{Chord, LyricLine};
use crate::note::NoteName;

/// Parse chord-sheet text with the default [`ParserOptions`].
///
/// # Example
/// ```
/// use setlist::parse_lyrics_with_chords;
///
/// let lines = parse_lyrics_with_chords("D        G\nAmazing grace");
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].text, "Amazing grace");
/// assert_eq!(lines[0].chords[0].symbol, "D");
/// assert_eq!(lines[0].chords[1].position, 7);
/// ```
pub fn parse_lyrics_with_chords(raw: &str) -> Vec<LyricLine> {
    parse_lyrics_with_options(raw, &ParserOptions::default())
}

pub fn parse_lyrics_with_options(raw: &str, options: &ParserOptions) -> Vec<LyricLine> {
    let lines: Vec<&str> = raw.lines().collect();
    let mut result: Vec<LyricLine> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let current = lines[i].trim();
        if current.is_empty() || is_key_label_line(current) {
            i += 1;
            continue;
        }

        let line_index = result.len();
        let matches = find_chords(current);

        if is_chord_only(current, &matches, options) {
            let next = lines.get(i + 1).map(|l| l.trim()).filter(|l| !l.is_empty());
            if let Some(lyric) = next {
                let chords = build_chords(line_index, &matches, |start| {
                    scale_position(start, options.position_scale)
                });
                log::debug!(
                    "line {}: chord-only line with {} chords paired with {:?}",
                    line_index,
                    chords.len(),
                    lyric
                );
                result.push(LyricLine::new(format!("line-{}", line_index), lyric, chords, line_index));
                i += 2;
                continue;
            }
        }

        let chords = build_chords(line_index, &matches, |start| start);
        let text = if chords.len() > options.inline_strip_threshold {
            log::debug!("line {}: stripping {} inline chords", line_index, chords.len());
            collapse_whitespace(&strip_chords(current, " "))
        } else {
            current.to_string()
        };
        result.push(LyricLine::new(format!("line-{}", line_index), text, chords, line_index));
        i += 1;
    }

    result
}

fn is_chord_only(line: &str, matches: &[ChordMatch], options: &ParserOptions) -> bool {
    if matches.is_empty() {
        return false;
    }
    let residual = strip_chords(line, "");
    residual.trim().chars().count() < options.chord_line_residual_limit
}

fn build_chords(line_index: usize, matches: &[ChordMatch], position: impl Fn(usize) -> usize) -> Vec<Chord> {
    matches
        .iter()
        .enumerate()
        .map(|(k, m)| Chord::new(format!("chord-{}-{}", line_index, k), m.symbol.clone(), position(m.start)))
        .collect()
}

fn scale_position(offset: usize, scale: f64) -> usize {
    (offset as f64 * scale).round().max(0.0) as usize
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// How a key label is separated from the key that follows it.
#[derive(Clone, Copy)]
enum Gap {
    /// `\s*`
    AnySpace,
    /// `\s+`, and the key must end on a word boundary
    SpaceThenWord,
    /// `[:\s]*`
    ColonOrSpace,
}

/// Key labels in order of precedence. Matched case-insensitively.
const KEY_LABELS: [(&str, Gap); 5] = [
    ("tom:", Gap::AnySpace),
    ("tom", Gap::SpaceThenWord),
    ("[intro]", Gap::AnySpace),
    ("key:", Gap::AnySpace),
    ("tonalidade", Gap::ColonOrSpace),
];

/// Best guess at the key of a chord sheet, defaulting to `"C"`.
///
/// # Example
/// ```
/// use setlist::extract_key;
///
/// assert_eq!(extract_key("Tom: G\nAm  C\nla la"), "G");
/// assert_eq!(extract_key("Em  C  G\nla la"), "Em");
/// assert_eq!(extract_key("no chords at all"), "C");
/// ```
pub fn extract_key(raw: &str) -> String {
    detect_key(raw).unwrap_or_else(|| "C".to_string())
}

/// Like [`extract_key`], but `None` when nothing in the text suggests a key.
pub fn detect_key(raw: &str) -> Option<String> {
    let chars: Vec<char> = raw.chars().collect();

    for (label, gap) in KEY_LABELS {
        if let Some(key) = find_labeled_key(&chars, label, gap) {
            log::debug!("key {} found after label {:?}", key, label);
            return Some(key);
        }
    }

    let first_chord = raw.lines().flat_map(|line| find_chords(line)).next()?;
    let chord = ChordSymbol::parse(&first_chord.symbol)?;
    let key = format!("{}{}", chord.root, if chord.is_minor() { "m" } else { "" });
    log::debug!("key {} guessed from first chord {}", key, first_chord.symbol);
    Some(key)
}

/// True for a line holding nothing but a key label and its key, e.g. `Tom: Eb`.
fn is_key_label_line(line: &str) -> bool {
    let chars: Vec<char> = line.chars().collect();
    KEY_LABELS
        .iter()
        .filter(|(label, _)| !label.starts_with('['))
        .any(|(label, gap)| {
            let label: Vec<char> = label.chars().collect();
            if !label_at(&chars, 0, &label) {
                return false;
            }
            match read_key_after(&chars, label.len(), *gap) {
                Some((_, end)) => chars[end..].iter().all(|c| c.is_whitespace()),
                None => false,
            }
        })
}

fn label_at(chars: &[char], start: usize, label: &[char]) -> bool {
    if start > 0 && chars[start - 1].is_alphanumeric() {
        return false;
    }
    label
        .iter()
        .enumerate()
        .all(|(k, expected)| matches!(chars.get(start + k), Some(c) if c.to_ascii_lowercase() == *expected))
}

fn find_labeled_key(chars: &[char], label: &str, gap: Gap) -> Option<String> {
    let label: Vec<char> = label.chars().collect();
    (0..chars.len()).find_map(|start| {
        if !label_at(chars, start, &label) {
            return None;
        }
        read_key_after(chars, start + label.len(), gap).map(|(key, _)| key)
    })
}

/// Read `<gap><letter><accidental?><m?>` starting at `i`, returning the key and
/// the offset just past it.
fn read_key_after(chars: &[char], mut i: usize, gap: Gap) -> Option<(String, usize)> {
    let gap_start = i;
    while let Some(c) = chars.get(i) {
        let skip = match gap {
            Gap::AnySpace | Gap::SpaceThenWord => c.is_whitespace(),
            Gap::ColonOrSpace => c.is_whitespace() || *c == ':',
        };
        if !skip {
            break;
        }
        i += 1;
    }
    if matches!(gap, Gap::SpaceThenWord) && i == gap_start {
        return None;
    }

    let letter = chars.get(i)?.to_ascii_uppercase();
    NoteName::from_char(letter)?;
    let mut key = String::from(letter);
    i += 1;

    if let Some(&accidental) = chars.get(i).filter(|c| **c == '#' || **c == 'b') {
        key.push(accidental);
        i += 1;
    }
    let starts_maj = chars.get(i + 1) == Some(&'a') && chars.get(i + 2) == Some(&'j');
    if chars.get(i) == Some(&'m') && !starts_maj {
        key.push('m');
        i += 1;
    }

    if matches!(gap, Gap::SpaceThenWord) && matches!(chars.get(i), Some(c) if c.is_alphanumeric()) {
        return None;
    }
    Some((key, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_lyrics_with_chords("").is_empty());
        assert!(parse_lyrics_with_chords("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_chord_only_line_pairs_with_next_line() {
        let lines = parse_lyrics_with_chords("       C        F\nHello darkness my old friend");
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.text, "Hello darkness my old friend");
        assert_eq!(line.chords.len(), 2);
        assert_eq!(line.chords[0].symbol, "C");
        assert_eq!(line.chords[1].symbol, "F");
        // offsets 0 and 9 on the trimmed chord line, scaled by 0.8
        assert_eq!(line.chords[0].position, 0);
        assert_eq!(line.chords[1].position, 7);
        assert!(line.chords[0].position < line.chords[1].position);
    }

    #[test]
    fn test_ids_and_positions_are_sequential() {
        let raw = "C  G\nfirst line\n\nsecond line\nAm     F\nthird line";
        let lines = parse_lyrics_with_chords(raw);
        assert_eq!(lines.len(), 3);
        for (index, line) in lines.iter().enumerate() {
            assert_eq!(line.id, format!("line-{}", index));
            assert_eq!(line.position, index);
        }
        assert_eq!(lines[2].chords[0].id, "chord-2-0");
        assert_eq!(lines[2].chords[1].id, "chord-2-1");
        assert!(lines[1].chords.is_empty());
    }

    #[test]
    fn test_chord_line_followed_by_blank_line_falls_through() {
        let lines = parse_lyrics_with_chords("C G\n\nla la la");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "C G");
        assert_eq!(lines[0].chords.len(), 2);
        assert_eq!(lines[0].chords[1].position, 2);
        assert_eq!(lines[1].text, "la la la");
    }

    #[test]
    fn test_trailing_chord_line_with_many_chords_becomes_instrumental() {
        let lines = parse_lyrics_with_chords("la la\nC G Am F");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "");
        assert_eq!(lines[1].chords.len(), 4);
    }

    #[test]
    fn test_mixed_line_with_few_chords_keeps_text() {
        let line = "[C]Hello there, [G]general Kenobi";
        let lines = parse_lyrics_with_chords(line);
        assert_eq!(lines[0].text, line);
        assert_eq!(lines[0].chords.len(), 2);
        assert_eq!(lines[0].chords[0].position, 1);
        assert_eq!(lines[0].chords[1].position, 17);
    }

    #[test]
    fn test_mixed_line_with_many_chords_is_stripped() {
        let lines = parse_lyrics_with_chords("C Hello darkness G my old  Am friend F");
        assert_eq!(lines[0].text, "Hello darkness my old friend");
        let symbols: Vec<&str> = lines[0].chords.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "G", "Am", "F"]);
        assert_eq!(lines[0].chords[1].position, 17);
    }

    #[test]
    fn test_plain_lyric_line() {
        let lines = parse_lyrics_with_chords("Just some words here");
        assert_eq!(lines[0].text, "Just some words here");
        assert!(lines[0].chords.is_empty());
    }

    #[test]
    fn test_custom_options() {
        let options = ParserOptions {
            position_scale: 1.0,
            ..ParserOptions::default()
        };
        let lines = parse_lyrics_with_options("C        F\nHello darkness", &options);
        assert_eq!(lines[0].chords[1].position, 9);
    }

    #[test]
    fn test_windows_line_endings() {
        let lines = parse_lyrics_with_chords("C   G\r\nla la la\r\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "la la la");
    }

    #[test]
    fn test_key_label_lines_are_not_lyrics() {
        let lines = parse_lyrics_with_chords("tom: D\nD        G\nAmazing grace");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Amazing grace");
        assert_eq!(lines[0].chords[0].position, 0);
        assert_eq!(lines[0].chords[1].position, 7);

        // a label followed by more text stays a lyric line
        let lines = parse_lyrics_with_chords("Key: G is where we sing");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_key_label_precedence() {
        assert_eq!(extract_key("Am F C G\ntom: G\nla"), "G");
        // [Intro] outranks Key: regardless of where each appears
        assert_eq!(extract_key("Key: F#m\n[Intro] A"), "A");
        assert_eq!(extract_key("[Intro] Bb F\nla"), "Bb");
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(extract_key("tom: D"), "D");
        assert_eq!(extract_key("TOM:Ebm"), "Ebm");
        assert_eq!(extract_key("Tom A"), "A");
        assert_eq!(extract_key("Tonalidade: c#m"), "C#m");
        assert_eq!(extract_key("tonalidade E"), "E");
        assert_eq!(extract_key("key: Gmaj7"), "G");
    }

    #[test]
    fn test_tom_without_colon_needs_word_boundaries() {
        // "tomorrow" is not a label and "tom Am7" is not a bare key
        assert_eq!(extract_key("see you tomorrow E"), "E");
        assert_eq!(extract_key("tom Am7"), "Am");
    }

    #[test]
    fn test_key_fallback_uses_first_standalone_chord() {
        assert_eq!(extract_key("Amazing grace\nG/B  C\nhow sweet"), "G");
        assert_eq!(extract_key("Bbm7  Gb\nla"), "Bbm");
        assert_eq!(extract_key("Cmaj7 G\nla"), "C");
    }

    #[test]
    fn test_key_default() {
        assert_eq!(extract_key(""), "C");
        assert_eq!(detect_key("hello world"), None);
    }
}
