//! Integration tests for setlist
//!
//! Tests the pipeline from raw chord text to stored, transposed songs.

use setlist::note::{all_keys, CHROMATIC};
use setlist::{
    extract_key, format_lyrics_for_display, import_page, import_sheet, normalize_song_key, parse_lyrics_with_chords,
    reset_to_original_key, semitones_between, transpose_chord_symbol, transpose_song, ImportConfig, ImportWarning,
    JsonFileStore, ScrapedPage, Song, SongStore,
};

#[test]
fn test_amazing_grace_end_to_end() {
    let raw = "tom: D\nD        G\nAmazing grace";

    let key = extract_key(raw);
    assert_eq!(key, "D");

    let lyrics = parse_lyrics_with_chords(raw);
    assert_eq!(lyrics.len(), 1);
    assert_eq!(lyrics[0].text, "Amazing grace");
    assert_eq!(lyrics[0].chords[0].symbol, "D");
    assert_eq!(lyrics[0].chords[0].position, 0);
    assert_eq!(lyrics[0].chords[1].symbol, "G");
    assert_eq!(lyrics[0].chords[1].position, 7);

    let song = Song::new("Amazing Grace", "John Newton", key, lyrics);
    assert_eq!(semitones_between("D", "C"), 10);
    let stored = normalize_song_key(&song, "C");

    assert_eq!(stored.original_key, "D");
    assert_eq!(stored.current_key, "C");
    assert_eq!(stored.chord_symbols(), vec!["C", "F"]);
    assert_eq!(stored.lyrics[0].chords[0].position, 0);
    assert_eq!(stored.lyrics[0].chords[1].position, 7);
}

#[test]
fn test_import_sheet_matches_manual_pipeline() {
    let outcome = import_sheet("tom: D\nD        G\nAmazing grace", &ImportConfig::default()).unwrap();
    assert!(outcome.warning.is_none());
    assert_eq!(outcome.song.original_key, "D");
    assert_eq!(outcome.song.current_key, "C");
    assert_eq!(outcome.song.chord_symbols(), vec!["C", "F"]);
    assert_eq!(outcome.song.title, "Imported Song");
}

#[test]
fn test_chord_only_line_pairing() {
    let lyrics = parse_lyrics_with_chords("       C        F\nHello darkness my old friend");
    assert_eq!(lyrics.len(), 1);
    assert_eq!(lyrics[0].text, "Hello darkness my old friend");
    let positions: Vec<usize> = lyrics[0].chords.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![0, 7]);
}

#[test]
fn test_mixed_line_stripping() {
    let dense = parse_lyrics_with_chords("C Hello D there E my F friend");
    assert_eq!(dense[0].text, "Hello there my friend");
    assert_eq!(dense[0].chords.len(), 4);

    let sparse = parse_lyrics_with_chords("Hello C there G friend");
    assert_eq!(sparse[0].text, "Hello C there G friend");
    assert_eq!(sparse[0].chords.len(), 2);
    assert_eq!(sparse[0].chords[0].position, 6);
}

#[test]
fn test_blank_lines_and_empty_input() {
    assert!(parse_lyrics_with_chords("").is_empty());
    assert!(parse_lyrics_with_chords("\n   \n\n").is_empty());

    let lyrics = parse_lyrics_with_chords("first\n\n\nsecond");
    assert_eq!(lyrics.len(), 2);
    assert_eq!(lyrics[1].id, "line-1");
    assert_eq!(lyrics[1].position, 1);
}

#[test]
fn test_key_label_beats_chord_fallback() {
    assert_eq!(extract_key("Am  C\nla la\ntom: G"), "G");
    assert_eq!(extract_key("Am  C\nla la"), "Am");
    assert_eq!(extract_key("no chords here"), "C");
}

#[test]
fn test_slash_chords_and_semitones() {
    assert_eq!(transpose_chord_symbol("G/B", 2), "A/C#");
    assert_eq!(transpose_chord_symbol("C/E", 10), "A#/D");
    assert_eq!(semitones_between("C", "C"), 0);
    assert_eq!(semitones_between("C", "G"), 7);
    assert_eq!(semitones_between("G", "C"), 5);
    assert_eq!(semitones_between("Am", "C"), 3);
}

#[test]
fn test_full_circle_through_every_key() {
    let raw = "C        G/B\nfirst line\nAm7      F\nsecond line\nDm  Esus4  E7\nthird line";
    for from in CHROMATIC {
        let song = transpose_song(&Song::new("Circle", "Band", "C", parse_lyrics_with_chords(raw)), from);
        for to in all_keys() {
            let back = transpose_song(&transpose_song(&song, &to), from);
            assert_eq!(back.chord_symbols(), song.chord_symbols(), "{} -> {} -> {}", from, to, from);
        }
    }
}

#[test]
fn test_transpose_to_current_key_is_identity() {
    let song = Song::new("Same", "Band", "E", parse_lyrics_with_chords("E  B/D#\nla la"));
    assert_eq!(transpose_song(&song, "E").chord_symbols(), vec!["E", "B/D#"]);
}

#[test]
fn test_reset_after_several_changes() {
    let outcome = import_sheet("---\nkey: G\n---\nG   D/F#   Em\nla la la", &ImportConfig::default()).unwrap();
    let song = transpose_song(&transpose_song(&outcome.song, "A"), "Eb");
    let reset = reset_to_original_key(&song);
    assert_eq!(reset.current_key, "G");
    assert_eq!(reset.chord_symbols(), vec!["G", "D/F#", "Em"]);
}

#[test]
fn test_unusable_page_becomes_placeholder() {
    let outcome = import_page(&ScrapedPage::default(), &ImportConfig::default());
    assert_eq!(outcome.warning, Some(ImportWarning::Placeholder));
    assert!(!outcome.song.lyrics.is_empty());
    assert!(outcome.song.lyrics[0].text.starts_with("[Placeholder]"));
}

#[test]
fn test_edit_store_and_render() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("songs.json"));

    let outcome = import_sheet(
        "---\ntitle: Hymn\nartist: Choir\nkey: C\n---\nC       G\nHoly holy holy",
        &ImportConfig::default(),
    )
    .unwrap();
    let mut song = outcome.song;
    let line_id = song.add_line("Lord God almighty");
    song.add_chord(&line_id, "F", 5).unwrap();
    store.upsert(song.clone()).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0], song);

    let transposed = transpose_song(&loaded[0], "D");
    assert_eq!(
        format_lyrics_for_display(&transposed.lyrics),
        "D     A\nHoly holy holy\n     G\nLord God almighty"
    );
}
