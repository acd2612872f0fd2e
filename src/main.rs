use clap::{Parser, Subcommand};
use setlist::note::{all_keys, related_keys};
use setlist::{
    import_sheet, render_song, transpose_chord_symbol, transpose_song, ImportConfig, JsonFileStore, SetlistError,
    Song, SongStore,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "setlist")]
#[command(about = "Parse chord sheets and transpose songs for a setlist")]
struct Cli {
    /// YAML import configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log parsing decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a chord sheet and print it in the configured key
    Import {
        file: PathBuf,
        /// Source page the sheet was copied from
        #[arg(long)]
        url: Option<String>,
        /// Keep the detected key instead of normalizing
        #[arg(long)]
        keep_key: bool,
        /// Print the song as JSON
        #[arg(long)]
        json: bool,
        /// Add the song to a JSON song store
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Print a chord sheet transposed to another key
    Transpose {
        file: PathBuf,
        #[arg(long)]
        to: String,
        #[arg(long)]
        json: bool,
    },
    /// Transpose a single chord symbol
    Chord {
        symbol: String,
        #[arg(allow_negative_numbers = true)]
        semitones: i32,
    },
    /// List the selectable keys, or the keys related to one key
    Keys {
        #[arg(long)]
        related: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SetlistError> {
    let mut config = match &cli.config {
        Some(path) => ImportConfig::load(path)?,
        None => ImportConfig::default(),
    };

    match cli.command {
        Command::Import {
            file,
            url,
            keep_key,
            json,
            save,
        } => {
            if keep_key {
                config.normalize_to = None;
            }
            let mut song = read_song(&file, &config)?;
            if let Some(url) = url {
                song.source_url = Some(url);
            }
            if let Some(path) = save {
                let store = JsonFileStore::new(path);
                store.upsert(song.clone())?;
                eprintln!("Saved {:?} to {}", song.title, store.path().display());
            }
            print_song(&song, json)
        }
        Command::Transpose { file, to, json } => {
            config.normalize_to = None;
            let song = read_song(&file, &config)?;
            print_song(&transpose_song(&song, &to), json)
        }
        Command::Chord { symbol, semitones } => {
            println!("{}", transpose_chord_symbol(&symbol, semitones));
            Ok(())
        }
        Command::Keys { related } => {
            let keys = match related {
                Some(key) => related_keys(&key),
                None => all_keys(),
            };
            println!("{}", keys.join(" "));
            Ok(())
        }
    }
}

fn read_song(path: &Path, config: &ImportConfig) -> Result<Song, SetlistError> {
    let source = fs::read_to_string(path)?;
    let outcome = import_sheet(&source, config)?;
    if let Some(warning) = outcome.warning {
        eprintln!("Warning: {}: {}", path.display(), warning);
    }
    Ok(outcome.song)
}

fn print_song(song: &Song, json: bool) -> Result<(), SetlistError> {
    if json {
        println!("{}", serde_json::to_string_pretty(song)?);
    } else {
        print!("{}", render_song(song));
    }
    Ok(())
}
