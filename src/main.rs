use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rhythmbox_browser::artwork::{CoverArtResolver, ImageResolver, NoArtwork};
use rhythmbox_browser::config::{expand_path, DEFAULT_ARTWORK_DIR, DEFAULT_ARTWORK_URL_PREFIX};
use rhythmbox_browser::model::{Facet, Item, ResolvedItem};
use rhythmbox_browser::player::{Player, PlayerCommand, QueueOutcome, RHYTHMBOX_CLIENT};
use rhythmbox_browser::rhythmbox::DEFAULT_DATABASE;
use rhythmbox_browser::{Browser, BrowserConfig};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rhythmbox-browser")]
#[command(about = "Browse a Rhythmbox library and control playback", long_about = None)]
struct Args {
    /// Path to Rhythmbox database (rhythmdb.xml)
    #[arg(short = 'd', long, global = true, default_value = DEFAULT_DATABASE)]
    database: String,

    /// Player client binary
    #[arg(long, global = true, default_value = RHYTHMBOX_CLIENT)]
    client: String,

    /// Directory album covers are copied into
    #[arg(long, global = true, default_value = DEFAULT_ARTWORK_DIR)]
    artwork_dir: PathBuf,

    /// Skip the album cover lookup
    #[arg(long, global = true)]
    no_artwork: bool,

    /// Print listings as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List albums, sorted by artist
    Albums,
    /// List artists
    Artists,
    /// List genres
    Genres,
    /// Show the album of an entry
    Album {
        id: usize,
        /// Highlight this track
        #[arg(long)]
        select: Option<usize>,
    },
    /// List the albums of an entry's artist
    Artist { id: usize },
    /// Show every track of an entry's genre
    Genre { id: usize },
    /// Replace the play queue with an album and start playing
    PlayAlbum {
        id: usize,
        /// Play the tracks in random order
        #[arg(long)]
        shuffle: bool,
        /// Seed for --shuffle, for a repeatable order
        #[arg(long, requires = "shuffle")]
        seed: Option<u64>,
    },
    /// Append an album to the play queue
    EnqueueAlbum { id: usize },
    /// Replace the play queue with one track and start playing
    PlayTrack { id: usize },
    /// Resume playback
    Play,
    /// Pause playback
    Pause,
    /// Toggle play/pause
    Toggle,
    /// Jump to the next song
    Next,
    /// Jump to the previous song
    Previous,
    /// Seek in the current track
    Seek {
        #[arg(allow_hyphen_values = true)]
        seconds: i64,
    },
    /// Set the volume (0.0 - 1.0)
    Volume { value: f64 },
    /// Increase the volume
    VolumeUp,
    /// Decrease the volume
    VolumeDown,
    /// Print the playing song
    NowPlaying {
        /// Format string, e.g. "%tn %aa %tt"
        #[arg(long)]
        format: Option<String>,
    },
    /// Select the source matching a URI
    SelectSource { uri: String },
    /// Rate the playing song (0 - 5)
    Rate { value: f64 },
}

impl Command {
    /// The player command for transport controls, None for library commands
    fn transport(&self) -> Option<PlayerCommand> {
        let command = match self {
            Command::Play => PlayerCommand::Play,
            Command::Pause => PlayerCommand::Pause,
            Command::Toggle => PlayerCommand::PlayPause,
            Command::Next => PlayerCommand::Next,
            Command::Previous => PlayerCommand::Previous,
            Command::Seek { seconds } => PlayerCommand::Seek(*seconds),
            Command::Volume { value } => PlayerCommand::SetVolume(*value),
            Command::VolumeUp => PlayerCommand::VolumeUp,
            Command::VolumeDown => PlayerCommand::VolumeDown,
            Command::NowPlaying { format: None } => PlayerCommand::PrintPlaying,
            Command::NowPlaying { format: Some(f) } => PlayerCommand::PrintPlayingFormat(f.clone()),
            Command::SelectSource { uri } => PlayerCommand::SelectSource(uri.clone()),
            Command::Rate { value } => PlayerCommand::SetRating(*value),
            Command::Albums
            | Command::Artists
            | Command::Genres
            | Command::Album { .. }
            | Command::Artist { .. }
            | Command::Genre { .. }
            | Command::PlayAlbum { .. }
            | Command::EnqueueAlbum { .. }
            | Command::PlayTrack { .. } => return None,
        };
        Some(command)
    }

    /// Whether the output shows album covers
    fn shows_artwork(&self) -> bool {
        matches!(self, Command::Albums | Command::Album { .. } | Command::Artist { .. })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = BrowserConfig::new(expand_path(&args.database))
        .with_client(args.client.clone())
        .with_artwork_dir(args.artwork_dir.clone())
        .with_artwork_url_prefix(DEFAULT_ARTWORK_URL_PREFIX);
    let client = config.client();

    // Transport controls don't need the library
    if let Some(command) = args.command.transport() {
        let out = client
            .execute(&command)
            .with_context(|| format!("{} failed", command))?;
        print!("{}", out);
        return Ok(());
    }

    let resolver: Box<dyn ImageResolver> = if args.no_artwork || !args.command.shows_artwork() {
        Box::new(NoArtwork)
    } else {
        Box::new(CoverArtResolver::new(
            config.artwork_dir.clone(),
            config.artwork_url_prefix.clone(),
        ))
    };

    let mut browser = Browser::setup(&config, client, resolver.as_ref())
        .with_context(|| format!("Could not load library {:?}", config.library_path))?;
    let index = browser.index();

    match args.command {
        Command::Albums => print_items(&index.list_albums(), args.json)?,
        Command::Artists => print_items(&index.list_artists(), args.json)?,
        Command::Genres => print_items(&index.list_genres(), args.json)?,
        Command::Album { id, select } => {
            let mut album = index
                .resolve_album(id)
                .with_context(|| format!("No album for entry {}", id))?;
            if let Some(track) = select {
                if !album.select_track(track) {
                    log::warn!("Track {} is not on {:?}", track, album.item.name);
                }
            }
            print_resolved(&album, args.json)?;
        }
        Command::Artist { id } => print_items(&index.resolve_artist_albums(id), args.json)?,
        Command::Genre { id } => {
            let genre = index
                .resolve_genre_tracks(id)
                .with_context(|| format!("No genre for entry {}", id))?;
            print_resolved(&genre, args.json)?;
        }
        Command::PlayAlbum { id, shuffle, seed } => {
            let outcome = if shuffle {
                browser.play_album_randomly(id, seed)?
            } else {
                browser.play_album(id)?
            };
            print_outcome(outcome, args.json)?;
        }
        Command::EnqueueAlbum { id } => print_outcome(browser.enqueue_album(id)?, args.json)?,
        Command::PlayTrack { id } => print_outcome(browser.play_track(id)?, args.json)?,
        Command::Play
        | Command::Pause
        | Command::Toggle
        | Command::Next
        | Command::Previous
        | Command::Seek { .. }
        | Command::Volume { .. }
        | Command::VolumeUp
        | Command::VolumeDown
        | Command::NowPlaying { .. }
        | Command::SelectSource { .. }
        | Command::Rate { .. } => bail!("{:?} is a transport command", args.command),
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_items(items: &[Item], json: bool) -> Result<()> {
    if json {
        return print_json(items);
    }

    for item in items {
        match item.facet {
            Facet::Album => println!(
                "{:>6} | {} - {}{}",
                item.id,
                item.entry.artist,
                item.name,
                item.image.as_deref().map(|i| format!(" [{}]", i)).unwrap_or_default()
            ),
            Facet::Artist | Facet::Genre => println!("{:>6} | {} ({})", item.id, item.name, item.count),
        }
    }
    log::info!("{} item(s)", items.len());
    Ok(())
}

fn print_resolved(resolved: &ResolvedItem, json: bool) -> Result<()> {
    if json {
        return print_json(resolved);
    }

    println!("{}: {}", resolved.item.facet, resolved.item.name);
    if let Some(image) = &resolved.item.image {
        println!("Cover: {}", image);
    }
    println!("{}", "-".repeat(60));

    for track in &resolved.tracks {
        let marker = if track.selected { '>' } else { ' ' };
        println!(
            "{} {:>6} | {:>2}. {} - {} ({})",
            marker,
            track.id,
            track.track_number,
            track.artist,
            track.title,
            track.duration_display()
        );
    }
    Ok(())
}

fn print_outcome(outcome: QueueOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(&outcome);
    }

    match outcome {
        QueueOutcome::Queued { tracks } => println!("Queued {} track(s)", tracks),
        QueueOutcome::NoTracks => println!("No tracks found"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Command {
        Args::try_parse_from(std::iter::once("rhythmbox-browser").chain(argv.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_transport_commands() {
        assert_eq!(parse(&["toggle"]).transport(), Some(PlayerCommand::PlayPause));
        assert_eq!(parse(&["seek", "-10"]).transport(), Some(PlayerCommand::Seek(-10)));
        assert_eq!(parse(&["volume", "0.5"]).transport(), Some(PlayerCommand::SetVolume(0.5)));
        assert_eq!(
            parse(&["now-playing", "--format", "%tt"]).transport(),
            Some(PlayerCommand::PrintPlayingFormat("%tt".to_string()))
        );
        assert_eq!(parse(&["rate", "4"]).transport(), Some(PlayerCommand::SetRating(4.0)));
    }

    #[test]
    fn test_library_commands_load_the_library() {
        for argv in [
            &["albums"][..],
            &["artists"],
            &["genres"],
            &["album", "3", "--select", "4"],
            &["artist", "3"],
            &["genre", "3"],
            &["play-album", "3", "--shuffle", "--seed", "7"],
            &["enqueue-album", "3"],
            &["play-track", "3"],
        ] {
            assert_eq!(parse(argv).transport(), None, "{:?}", argv);
        }
    }

    #[test]
    fn test_only_album_views_resolve_artwork() {
        assert!(parse(&["albums"]).shows_artwork());
        assert!(parse(&["album", "1"]).shows_artwork());
        assert!(!parse(&["genres"]).shows_artwork());
        assert!(!parse(&["play-album", "1"]).shows_artwork());
    }
}
