//! # Note Spelling and Pitch Classes
//!
//! Chord roots, bass notes and keys are all spelled as a letter `A`-`G` plus an
//! optional `#` or `b`. This module resolves those spellings onto the 12-tone
//! chromatic scale and back.
//!
//! Only the twelve sharp spellings and the five common flat aliases resolve:
//!
//! ```text
//! C  C#  D  D#  E  F  F#  G  G#  A  A#  B
//!    Db     Eb         Gb     Ab     Bb
//! ```
//!
//! Output is always sharp-spelled, so `Bb` transposed by 0 comes back as `A#`.
//! `Cb`, `Fb`, `E#` and `B#` are treated as unknown notes.

/// Sharp spelling of every pitch class, starting at C.
pub const CHROMATIC: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Note names A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp, // #
    Flat,  // b
}

/// A spelled note: letter plus accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl Note {
    /// Read a note from the start of `s`.
    ///
    /// Returns the note and the number of bytes it occupies.
    ///
    /// # Example
    /// ```
    /// use setlist::note::{Accidental, Note, NoteName};
    ///
    /// let (note, len) = Note::parse_prefix("Bbm7").unwrap();
    /// assert_eq!(note.name, NoteName::B);
    /// assert_eq!(note.accidental, Accidental::Flat);
    /// assert_eq!(len, 2);
    /// ```
    pub fn parse_prefix(s: &str) -> Option<(Note, usize)> {
        let mut chars = s.chars();
        let name = NoteName::from_char(chars.next()?)?;
        let accidental = match chars.next() {
            Some('#') => Accidental::Sharp,
            Some('b') => Accidental::Flat,
            _ => Accidental::Natural,
        };
        let len = if accidental == Accidental::Natural { 1 } else { 2 };
        Some((Note { name, accidental }, len))
    }

    /// Parse a string that is exactly one note.
    pub fn parse(s: &str) -> Option<Note> {
        match Note::parse_prefix(s) {
            Some((note, len)) if len == s.len() => Some(note),
            _ => None,
        }
    }

    pub fn pitch_class(&self) -> Option<PitchClass> {
        use Accidental::*;
        use NoteName::*;

        let index = match (self.name, self.accidental) {
            (C, Natural) => 0,
            (C, Sharp) | (D, Flat) => 1,
            (D, Natural) => 2,
            (D, Sharp) | (E, Flat) => 3,
            (E, Natural) => 4,
            (F, Natural) => 5,
            (F, Sharp) | (G, Flat) => 6,
            (G, Natural) => 7,
            (G, Sharp) | (A, Flat) => 8,
            (A, Natural) => 9,
            (A, Sharp) | (B, Flat) => 10,
            (B, Natural) => 11,
            _ => return None,
        };
        Some(PitchClass(index))
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let accidental = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}", self.name.as_char(), accidental)
    }
}

/// Position on the chromatic scale, `0` = C through `11` = B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(index: u8) -> Self {
        PitchClass(index % 12)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Shift by any number of semitones, wrapping in both directions.
    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass((self.0 as i32 + semitones).rem_euclid(12) as u8)
    }

    /// Sharp spelling of this pitch class.
    pub fn name(self) -> &'static str {
        CHROMATIC[self.0 as usize]
    }

    /// The sharp-spelled note for this pitch class.
    pub fn note(self) -> Note {
        use NoteName::*;
        const NAMES: [NoteName; 12] = [C, C, D, D, E, F, F, G, G, A, A, B];

        let accidental = match self.0 {
            1 | 3 | 6 | 8 | 10 => Accidental::Sharp,
            _ => Accidental::Natural,
        };
        Note {
            name: NAMES[self.0 as usize],
            accidental,
        }
    }
}

/// Map a flat spelling to its sharp equivalent (`Db` -> `C#`); anything else is returned as-is.
pub fn flat_to_sharp(note: &str) -> &str {
    match note {
        "Db" => "C#",
        "Eb" => "D#",
        "Gb" => "F#",
        "Ab" => "G#",
        "Bb" => "A#",
        other => other,
    }
}

/// Resolve the root of a key such as `"F#m"` or `"Bb"` to its pitch class.
///
/// Everything after the root note (minor `m`, `maj`, digits) is ignored.
pub fn key_root(key: &str) -> Option<PitchClass> {
    let (note, _) = Note::parse_prefix(key.trim())?;
    note.pitch_class()
}

/// Every key a key picker offers: the 12 major roots followed by the 12 minors.
pub fn all_keys() -> Vec<String> {
    CHROMATIC
        .iter()
        .map(|note| note.to_string())
        .chain(CHROMATIC.iter().map(|note| format!("{}m", note)))
        .collect()
}

/// Sharp and flat spelling of a black key; a white key has only itself.
pub fn enharmonic_equivalents(note: &str) -> Vec<String> {
    let sharp = flat_to_sharp(note);
    let flat = match sharp {
        "C#" => Some("Db"),
        "D#" => Some("Eb"),
        "F#" => Some("Gb"),
        "G#" => Some("Ab"),
        "A#" => Some("Bb"),
        _ => None,
    };
    match flat {
        Some(flat) => vec![sharp.to_string(), flat.to_string()],
        None => vec![note.to_string()],
    }
}

/// Keys closely related to `key`: the key itself, its relative major or minor,
/// its dominant and its subdominant.
///
/// # Example
/// ```
/// use setlist::note::related_keys;
///
/// assert_eq!(related_keys("C"), vec!["C", "Am", "G", "F"]);
/// assert_eq!(related_keys("Am"), vec!["Am", "C", "Em", "Dm"]);
/// ```
pub fn related_keys(key: &str) -> Vec<String> {
    let trimmed = key.trim();
    let Some((note, len)) = Note::parse_prefix(trimmed) else {
        return vec![key.to_string()];
    };
    let Some(root) = note.pitch_class() else {
        return vec![key.to_string()];
    };
    let minor = trimmed[len..].starts_with('m') && !trimmed[len..].starts_with("maj");
    let mode = if minor { "m" } else { "" };

    let relative = if minor {
        root.transpose(3).name().to_string()
    } else {
        format!("{}m", root.transpose(-3).name())
    };
    let candidates = [
        key.to_string(),
        relative,
        format!("{}{}", root.transpose(7).name(), mode),
        format!("{}{}", root.transpose(5).name(), mode),
    ];

    let mut related: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !related.contains(&candidate) {
            related.push(candidate);
        }
    }
    related
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_aliases_resolve_to_sharp_pitch_classes() {
        for (flat, sharp) in [("Db", "C#"), ("Eb", "D#"), ("Gb", "F#"), ("Ab", "G#"), ("Bb", "A#")] {
            let flat_pc = Note::parse(flat).unwrap().pitch_class().unwrap();
            assert_eq!(flat_pc.name(), sharp);
        }
    }

    #[test]
    fn test_unusual_spellings_do_not_resolve() {
        for spelling in ["Cb", "Fb", "E#", "B#"] {
            assert_eq!(Note::parse(spelling).unwrap().pitch_class(), None, "{}", spelling);
        }
    }

    #[test]
    fn test_parse_rejects_non_notes() {
        assert!(Note::parse("H").is_none());
        assert!(Note::parse("c").is_none());
        assert!(Note::parse("Cm").is_none());
        assert!(Note::parse("").is_none());
    }

    #[test]
    fn test_pitch_class_wraps_both_directions() {
        let c = PitchClass::new(0);
        assert_eq!(c.transpose(-1).name(), "B");
        assert_eq!(c.transpose(13).name(), "C#");
        assert_eq!(c.transpose(-24).name(), "C");
    }

    #[test]
    fn test_key_root_ignores_quality() {
        assert_eq!(key_root("Am").map(|p| p.index()), Some(9));
        assert_eq!(key_root("Bbm").map(|p| p.index()), Some(10));
        assert_eq!(key_root("Cmaj7").map(|p| p.index()), Some(0));
        assert_eq!(key_root("X"), None);
    }

    #[test]
    fn test_all_keys() {
        let keys = all_keys();
        assert_eq!(keys.len(), 24);
        assert_eq!(keys[0], "C");
        assert_eq!(keys[11], "B");
        assert_eq!(keys[12], "Cm");
        assert_eq!(keys[23], "Bm");
    }

    #[test]
    fn test_enharmonic_equivalents() {
        assert_eq!(enharmonic_equivalents("Eb"), vec!["D#", "Eb"]);
        assert_eq!(enharmonic_equivalents("F#"), vec!["F#", "Gb"]);
        assert_eq!(enharmonic_equivalents("E"), vec!["E"]);
    }

    #[test]
    fn test_related_keys_unknown_key() {
        assert_eq!(related_keys("H"), vec!["H"]);
    }

    #[test]
    fn test_related_keys_sharp_key() {
        assert_eq!(related_keys("E"), vec!["E", "C#m", "B", "A"]);
    }
}
