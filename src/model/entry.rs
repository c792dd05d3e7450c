use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single record from the Rhythmbox database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Position of the entry in the parsed file (0-based)
    pub id: usize,

    /// Rhythmbox entry type (`song`, `iradio`, `podcast-post`, ...)
    pub entry_type: String,

    /// Track title
    pub title: String,

    /// Genre, empty when unset
    pub genre: String,

    /// Artist name, empty when unset
    pub artist: String,

    /// Album name, empty when unset
    pub album: String,

    /// Track duration in seconds
    pub duration: u32,

    /// Track number in album (0 when unset)
    pub track_number: u32,

    /// Star rating, 0-5
    pub rating: u32,

    pub play_count: u32,

    /// Location URI as stored by Rhythmbox (usually file://)
    pub location: String,

    /// Unix timestamp the file was first seen by Rhythmbox
    pub first_seen: i64,

    /// Unix timestamp the file was last seen by Rhythmbox
    pub last_seen: i64,

    /// MIME type, e.g. audio/mpeg
    pub media_type: String,

    /// UI highlight flag, only ever set on view copies
    #[serde(default)]
    pub selected: bool,
}

impl Entry {
    /// Convert a file:// location to a local path
    pub fn file_path(&self) -> Option<PathBuf> {
        let path = self.location.strip_prefix("file://")?;
        let decoded = urlencoding::decode(path).ok()?;
        Some(PathBuf::from(decoded.into_owned()))
    }

    pub fn first_seen_at(&self) -> Option<DateTime<Utc>> {
        timestamp(self.first_seen)
    }

    pub fn last_seen_at(&self) -> Option<DateTime<Utc>> {
        timestamp(self.last_seen)
    }

    /// Duration as `m:ss`
    pub fn duration_display(&self) -> String {
        format!("{}:{:02}", self.duration / 60, self.duration % 60)
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}
