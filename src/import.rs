//! # Song Import
//!
//! Builds a [`Song`] from text handed over by the scraping collaborator (or from a
//! local sheet file), then normalizes it to the configured key.
//!
//! Import never fails on bad input. When the page yields no usable chord text the
//! result is a clearly labeled placeholder song plus an [`ImportWarning`], so the
//! caller always has something to show.
//!
//! ## Pipeline
//! 1. Reject thin pages (text shorter than `min_text_len`) in favor of a placeholder
//! 2. Parse lines with [`parse_lyrics_with_options`]
//! 3. Take the declared key, else the detected key, else `default_key`
//! 4. Transpose to `normalize_to`, keeping `original_key`

use crate::config::ImportConfig;
use crate::error::SetlistError;
use crate::model::{Chord, LyricLine, Song};
use crate::parser::{detect_key, parse_lyrics_with_options};
use crate::sheet::parse_sheet;
use crate::transpose::normalize_song_key;

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNTITLED: &str = "Imported Song";
const PLACEHOLDER_KEY: &str = "C";

/// Raw material produced by the scraping collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedPage {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub text: String,
    pub source_url: Option<String>,
    /// Key stated outside the chord text, e.g. in sheet metadata.
    pub declared_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportWarning {
    /// Neither title nor chords could be used; everything is placeholder data.
    Placeholder,
    /// The title and artist are real but the chords are placeholder data.
    PartialPlaceholder,
}

impl std::fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportWarning::Placeholder => write!(f, "no usable title or chords; created a placeholder song"),
            ImportWarning::PartialPlaceholder => {
                write!(f, "no usable chords; created a placeholder song with the real title")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub song: Song,
    pub warning: Option<ImportWarning>,
}

/// Import a scraped page.
///
/// # Example
/// ```
/// use setlist::{import_page, ImportConfig, ScrapedPage};
///
/// let page = ScrapedPage {
///     title: Some("Amazing Grace".to_string()),
///     text: "tom: D\nD        G\nAmazing grace how sweet the sound\n\
///            D         A\nThat saved a wretch like me".to_string(),
///     ..ScrapedPage::default()
/// };
/// let outcome = import_page(&page, &ImportConfig::default());
/// assert!(outcome.warning.is_none());
/// assert_eq!(outcome.song.original_key, "D");
/// assert_eq!(outcome.song.current_key, "C");
/// assert_eq!(outcome.song.chord_symbols(), vec!["C", "F", "C", "G"]);
/// ```
pub fn import_page(page: &ScrapedPage, config: &ImportConfig) -> ImportOutcome {
    let title = usable_title(page, config);
    let text_len = page.text.trim().chars().count();

    if text_len < config.min_text_len {
        log::warn!(
            "Page {:?} has only {} characters of chord text; using a placeholder",
            page.source_url.as_deref().unwrap_or("<unknown>"),
            text_len
        );
        return placeholder(page, title, config);
    }
    build_song(page, title, config)
}

/// Import a local sheet, with optional YAML metadata.
///
/// Unlike [`import_page`] there is no minimum text length; a placeholder is only
/// used when the sheet contains no lines at all.
///
/// # Errors
/// Returns [`SetlistError::Metadata`] when the metadata block is invalid.
pub fn import_sheet(source: &str, config: &ImportConfig) -> Result<ImportOutcome, SetlistError> {
    let sheet = parse_sheet(source)?;
    let page = ScrapedPage {
        title: sheet.metadata.title,
        artist: sheet.metadata.artist,
        text: sheet.body,
        source_url: sheet.metadata.source_url,
        declared_key: sheet.metadata.key,
    };
    let title = usable_title(&page, config);
    Ok(build_song(&page, title, config))
}

fn usable_title(page: &ScrapedPage, config: &ImportConfig) -> Option<String> {
    page.title
        .as_deref()
        .map(str::trim)
        .filter(|title| title.chars().count() >= config.min_title_len)
        .map(str::to_string)
}

fn build_song(page: &ScrapedPage, title: Option<String>, config: &ImportConfig) -> ImportOutcome {
    let lyrics = parse_lyrics_with_options(&page.text, &config.parser);
    if lyrics.is_empty() {
        log::warn!("No lines parsed from chord text; using a placeholder");
        return placeholder(page, title, config);
    }

    let key = page
        .declared_key
        .clone()
        .or_else(|| detect_key(&page.text))
        .unwrap_or_else(|| config.default_key.clone());
    let title = title
        .or_else(|| page.source_url.as_deref().and_then(title_from_url))
        .unwrap_or_else(|| UNTITLED.to_string());

    log::info!("Imported {:?}: {} lines in {}", title, lyrics.len(), key);
    let song = finish(Song::new(title, artist_or_default(page), key, lyrics), page, config);
    ImportOutcome { song, warning: None }
}

fn placeholder(page: &ScrapedPage, title: Option<String>, config: &ImportConfig) -> ImportOutcome {
    let warning = if title.is_some() {
        ImportWarning::PartialPlaceholder
    } else {
        ImportWarning::Placeholder
    };
    let title = title
        .or_else(|| page.source_url.as_deref().and_then(title_from_url))
        .unwrap_or_else(|| UNTITLED.to_string());

    let lyrics = placeholder_lyrics(&title);
    let song = finish(
        Song::new(title, artist_or_default(page), PLACEHOLDER_KEY, lyrics),
        page,
        config,
    );
    ImportOutcome { song, warning: Some(warning) }
}

fn finish(mut song: Song, page: &ScrapedPage, config: &ImportConfig) -> Song {
    song.source_url = page.source_url.clone();
    match &config.normalize_to {
        Some(target) => normalize_song_key(&song, target),
        None => song,
    }
}

fn artist_or_default(page: &ScrapedPage) -> String {
    page.artist
        .as_deref()
        .map(str::trim)
        .filter(|artist| !artist.is_empty())
        .unwrap_or(UNKNOWN_ARTIST)
        .to_string()
}

fn placeholder_lyrics(title: &str) -> Vec<LyricLine> {
    let lines: [(String, &[(&str, usize)]); 3] = [
        (
            "[Placeholder] The chords for this song could not be imported".to_string(),
            &[("C", 0), ("Am", 14)],
        ),
        (
            format!("Replace these lines with the chords of {}", title),
            &[("F", 0), ("C", 15), ("G", 25)],
        ),
        (
            "Edit the song or import it again".to_string(),
            &[("Am", 0), ("F", 12), ("C", 28)],
        ),
    ];

    lines
        .into_iter()
        .enumerate()
        .map(|(index, (text, chords))| {
            let chords = chords
                .iter()
                .enumerate()
                .map(|(k, (symbol, position))| Chord::new(format!("chord-{}-{}", index, k), *symbol, *position))
                .collect();
            LyricLine::new(format!("line-{}", index), text, chords, index)
        })
        .collect()
}

/// Title-case the last path segment of a URL: `.../atrai-meu-coracao/` -> `Atrai Meu Coracao`.
pub fn title_from_url(url: &str) -> Option<String> {
    let address = url.split(['?', '#']).next().unwrap_or(url);
    // drop scheme and host; a bare host has no title to offer
    let path = match address.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => address,
    };
    let slug = path.trim_end_matches('/').rsplit('/').next()?;
    let slug = slug.trim_end_matches(".html");

    let words: Vec<String> = slug
        .split(|c: char| c == '-' || c == '_')
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() || slug.contains(':') {
        return None;
    }
    Some(words.join(" "))
}
