//! rhythmbox-client command vocabulary

use serde::Serialize;
use std::fmt;

/// One invocation of the external player client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlayerCommand {
    /// Empty the play queue
    ClearQueue,
    /// Add a track URI to the play queue
    Enqueue(String),
    /// Resume playback if paused
    Play,
    /// Pause playback if playing
    Pause,
    PlayPause,
    Next,
    Previous,
    /// Seek in the current track, in seconds
    Seek(i64),
    /// Set the playback volume, 0.0 to 1.0
    SetVolume(f64),
    VolumeUp,
    VolumeDown,
    PrintVolume,
    /// Title and artist of the playing song
    PrintPlaying,
    /// Details of the playing song using `%`-placeholders
    /// (`%tt` title, `%ta` artist, `%at` album, `%tn` track number,
    /// `%td` duration, `%te` elapsed, ...)
    PrintPlayingFormat(String),
    /// Select the source matching a URI
    SelectSource(String),
    /// Activate the source matching a URI
    ActivateSource(String),
    /// Play from the source matching a URI
    PlaySource(String),
    /// Play a URI, importing it if necessary
    PlayUri(String),
    /// Rate the current song, 0 to 5
    SetRating(f64),
    Repeat,
    NoRepeat,
    Shuffle,
    NoShuffle,
    CheckRunning,
    Quit,
}

impl PlayerCommand {
    /// Option name as understood by rhythmbox-client
    pub fn option(&self) -> &'static str {
        match self {
            PlayerCommand::ClearQueue => "--clear-queue",
            PlayerCommand::Enqueue(_) => "--enqueue",
            PlayerCommand::Play => "--play",
            PlayerCommand::Pause => "--pause",
            PlayerCommand::PlayPause => "--play-pause",
            PlayerCommand::Next => "--next",
            PlayerCommand::Previous => "--previous",
            PlayerCommand::Seek(_) => "--seek",
            PlayerCommand::SetVolume(_) => "--set-volume",
            PlayerCommand::VolumeUp => "--volume-up",
            PlayerCommand::VolumeDown => "--volume-down",
            PlayerCommand::PrintVolume => "--print-volume",
            PlayerCommand::PrintPlaying => "--print-playing",
            PlayerCommand::PrintPlayingFormat(_) => "--print-playing-format",
            PlayerCommand::SelectSource(_) => "--select-source",
            PlayerCommand::ActivateSource(_) => "--activate-source",
            PlayerCommand::PlaySource(_) => "--play-source",
            PlayerCommand::PlayUri(_) => "--play-uri",
            PlayerCommand::SetRating(_) => "--set-rating",
            PlayerCommand::Repeat => "--repeat",
            PlayerCommand::NoRepeat => "--no-repeat",
            PlayerCommand::Shuffle => "--shuffle",
            PlayerCommand::NoShuffle => "--no-shuffle",
            PlayerCommand::CheckRunning => "--check-running",
            PlayerCommand::Quit => "--quit",
        }
    }

    /// Full argument vector for one client invocation
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.option().to_string()];
        match self {
            PlayerCommand::Enqueue(value)
            | PlayerCommand::PrintPlayingFormat(value)
            | PlayerCommand::SelectSource(value)
            | PlayerCommand::ActivateSource(value)
            | PlayerCommand::PlaySource(value)
            | PlayerCommand::PlayUri(value) => args.push(value.clone()),
            PlayerCommand::Seek(seconds) => args.push(seconds.to_string()),
            PlayerCommand::SetVolume(value) | PlayerCommand::SetRating(value) => args.push(value.to_string()),
            _ => {}
        }
        args
    }
}

impl fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_args() {
        assert_eq!(PlayerCommand::ClearQueue.args(), vec!["--clear-queue"]);
        assert_eq!(PlayerCommand::PlayPause.args(), vec!["--play-pause"]);
        assert_eq!(PlayerCommand::VolumeDown.args(), vec!["--volume-down"]);
    }

    #[test]
    fn test_args_with_value() {
        let uri = "file:///home/ae/Music/Doolittle/02%20-%20Tame.flac";
        assert_eq!(PlayerCommand::Enqueue(uri.to_string()).args(), vec!["--enqueue", uri]);
        assert_eq!(PlayerCommand::SetVolume(0.5).args(), vec!["--set-volume", "0.5"]);
        assert_eq!(PlayerCommand::SetRating(4.0).args(), vec!["--set-rating", "4"]);
        assert_eq!(PlayerCommand::Seek(-10).args(), vec!["--seek", "-10"]);
        assert_eq!(
            PlayerCommand::PrintPlayingFormat("%tn %aa %tt".to_string()).args(),
            vec!["--print-playing-format", "%tn %aa %tt"]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PlayerCommand::SelectSource("file:///music".to_string()).to_string(),
            "--select-source file:///music"
        );
    }
}
