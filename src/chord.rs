//! # Chord Grammar
//!
//! Hand-written recognizer for chord symbols as they appear in chord sheets.
//!
//! ## Token Grammar
//! ```text
//! chord    := root quality* bass?
//! root     := [A-G] accidental?
//! quality  := "maj" | "min" | "dim" | "aug" | "sus" | "add" | "m" | "M" | digit
//! bass     := "/" [A-G] accidental?
//! accidental := "#" | "b"
//! ```
//!
//! Quality markers are matched longest-first, so `Cmaj7` is one token rather than
//! `Cm` followed by stray text. A slash chord such as `G/B` is a single token.
//!
//! When scanning a line, a token only counts if it stands alone: the characters
//! directly before and after it must not be letters or digits. `Amazing` therefore
//! contains no `Am` chord, while `[Am]`, `(G/B)` and `C  F` all yield chords.
//!
//! ## Transposition Grammar
//! [`ChordSymbol`] is deliberately more lenient than the token grammar: it needs a
//! root note, then keeps any modifier text verbatim (`7(b9)`, `m7/5-`, `º`), and
//! treats `/<note>` as a bass note only when a note letter follows the slash.

use crate::note::{Note, NoteName};

/// Quality markers, longest first.
const QUALITY_MARKERS: [&str; 8] = ["maj", "min", "dim", "aug", "sus", "add", "m", "M"];

/// A chord token found in a line of text.
///
/// `start` and `end` are character offsets (not byte offsets) into the scanned line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordMatch {
    pub symbol: String,
    pub start: usize,
    pub end: usize,
}

fn is_note_letter(c: Option<&char>) -> bool {
    matches!(c, Some(c) if NoteName::from_char(*c).is_some())
}

fn is_accidental(c: Option<&char>) -> bool {
    matches!(c, Some('#') | Some('b'))
}

fn is_word_char(c: Option<&char>) -> bool {
    matches!(c, Some(c) if c.is_alphanumeric())
}

fn starts_with_at(chars: &[char], at: usize, marker: &str) -> bool {
    let mut i = at;
    for expected in marker.chars() {
        if chars.get(i) != Some(&expected) {
            return false;
        }
        i += 1;
    }
    true
}

/// Match the longest chord token starting at `start`, returning its end offset.
fn match_token(chars: &[char], start: usize) -> Option<usize> {
    if !is_note_letter(chars.get(start)) {
        return None;
    }
    let mut i = start + 1;
    if is_accidental(chars.get(i)) {
        i += 1;
    }

    loop {
        if matches!(chars.get(i), Some(c) if c.is_ascii_digit()) {
            i += 1;
            continue;
        }
        match QUALITY_MARKERS.iter().find(|m| starts_with_at(chars, i, m)) {
            Some(marker) => i += marker.len(),
            None => break,
        }
    }

    if chars.get(i) == Some(&'/') && is_note_letter(chars.get(i + 1)) {
        i += 2;
        if is_accidental(chars.get(i)) {
            i += 1;
        }
    }

    Some(i)
}

/// Find every standalone chord token in `line`, left to right.
///
/// # Example
/// ```
/// use setlist::chord::find_chords;
///
/// let chords = find_chords("C   G/B  Am7");
/// let symbols: Vec<&str> = chords.iter().map(|c| c.symbol.as_str()).collect();
/// assert_eq!(symbols, vec!["C", "G/B", "Am7"]);
/// assert_eq!(chords[1].start, 4);
/// ```
pub fn find_chords(line: &str) -> Vec<ChordMatch> {
    let chars: Vec<char> = line.chars().collect();
    let mut found = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let preceded_by_word = i > 0 && is_word_char(chars.get(i - 1));
        if !preceded_by_word {
            if let Some(end) = match_token(&chars, i) {
                if !is_word_char(chars.get(end)) {
                    found.push(ChordMatch {
                        symbol: chars[i..end].iter().collect(),
                        start: i,
                        end,
                    });
                    i = end;
                    continue;
                }
            }
        }
        i += 1;
    }

    found
}

/// Replace every chord token in `line` with `replacement`.
pub fn strip_chords(line: &str, replacement: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;

    for chord in find_chords(line) {
        out.extend(&chars[cursor..chord.start]);
        out.push_str(replacement);
        cursor = chord.end;
    }
    out.extend(&chars[cursor..]);
    out
}

/// True when `symbol` (ignoring surrounding whitespace) is exactly one chord token.
pub fn is_valid_chord(symbol: &str) -> bool {
    let trimmed = symbol.trim();
    match find_chords(trimmed).as_slice() {
        [only] => only.start == 0 && only.end == trimmed.chars().count(),
        _ => false,
    }
}

/// Trim a chord symbol and drop any whitespace inside it.
pub fn normalize_chord(symbol: &str) -> String {
    symbol.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A chord symbol split into the parts that move under transposition (root and
/// bass) and the parts that are carried along verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordSymbol {
    pub root: Note,
    /// Everything between the root and the slash (or the end of the symbol).
    pub modifiers: String,
    pub bass: Option<Note>,
    /// Anything after the bass note.
    pub bass_modifiers: String,
}

impl ChordSymbol {
    /// Split a chord symbol; `None` when it does not start with a note letter.
    ///
    /// # Example
    /// ```
    /// use setlist::chord::ChordSymbol;
    ///
    /// let chord = ChordSymbol::parse("F#m7/C#").unwrap();
    /// assert_eq!(chord.root.to_string(), "F#");
    /// assert_eq!(chord.modifiers, "m7");
    /// assert_eq!(chord.bass.unwrap().to_string(), "C#");
    /// ```
    pub fn parse(symbol: &str) -> Option<Self> {
        let (root, root_len) = Note::parse_prefix(symbol)?;
        let rest = &symbol[root_len..];

        if let Some(slash) = rest.find('/') {
            let after = &rest[slash + 1..];
            if let Some((bass, bass_len)) = Note::parse_prefix(after) {
                return Some(ChordSymbol {
                    root,
                    modifiers: rest[..slash].to_string(),
                    bass: Some(bass),
                    bass_modifiers: after[bass_len..].to_string(),
                });
            }
        }

        Some(ChordSymbol {
            root,
            modifiers: rest.to_string(),
            bass: None,
            bass_modifiers: String::new(),
        })
    }

    /// Shift root and bass by the same interval. Notes that do not resolve to a
    /// pitch class keep their spelling.
    pub fn transposed(&self, semitones: i32) -> Self {
        ChordSymbol {
            root: shift_note(self.root, semitones),
            modifiers: self.modifiers.clone(),
            bass: self.bass.map(|bass| shift_note(bass, semitones)),
            bass_modifiers: self.bass_modifiers.clone(),
        }
    }

    /// True when the quality reads as minor (`m`, `min`, `m7`...), but not `maj`.
    pub fn is_minor(&self) -> bool {
        self.modifiers.starts_with('m') && !self.modifiers.starts_with("maj")
    }
}

fn shift_note(note: Note, semitones: i32) -> Note {
    match note.pitch_class() {
        Some(pc) => pc.transpose(semitones).note(),
        None => note,
    }
}

impl std::fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.root, self.modifiers)?;
        if let Some(bass) = self.bass {
            write!(f, "/{}{}", bass, self.bass_modifiers)?;
        }
        Ok(())
    }
}
