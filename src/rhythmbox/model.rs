//! Internal Rhythmbox data structures for XML parsing

use crate::error::LoadError;
use crate::model::Entry;

/// Child elements of `<entry>` that we keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Genre,
    Artist,
    Album,
    Duration,
    TrackNumber,
    Rating,
    PlayCount,
    Location,
    FirstSeen,
    LastSeen,
    MediaType,
}

impl EntryField {
    /// Map an element name to a field, None for elements we skip
    /// (file-size, mtime, bitrate, date, ...)
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        let field = match tag {
            b"title" => EntryField::Title,
            b"genre" => EntryField::Genre,
            b"artist" => EntryField::Artist,
            b"album" => EntryField::Album,
            b"duration" => EntryField::Duration,
            b"track-number" => EntryField::TrackNumber,
            b"rating" => EntryField::Rating,
            b"play-count" => EntryField::PlayCount,
            b"location" => EntryField::Location,
            b"first-seen" => EntryField::FirstSeen,
            b"last-seen" => EntryField::LastSeen,
            b"media-type" => EntryField::MediaType,
            _ => return None,
        };
        Some(field)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            EntryField::Title => "title",
            EntryField::Genre => "genre",
            EntryField::Artist => "artist",
            EntryField::Album => "album",
            EntryField::Duration => "duration",
            EntryField::TrackNumber => "track-number",
            EntryField::Rating => "rating",
            EntryField::PlayCount => "play-count",
            EntryField::Location => "location",
            EntryField::FirstSeen => "first-seen",
            EntryField::LastSeen => "last-seen",
            EntryField::MediaType => "media-type",
        }
    }
}

/// Rhythmbox entry being assembled from XML events
#[derive(Debug, Clone, Default)]
pub struct RhythmboxEntry {
    entry: Entry,
}

impl RhythmboxEntry {
    pub fn new(id: usize, entry_type: String) -> Self {
        Self {
            entry: Entry {
                id,
                entry_type,
                ..Default::default()
            },
        }
    }

    /// Store the text content of one child element
    pub fn set(&mut self, field: EntryField, text: String) -> Result<(), LoadError> {
        let e = &mut self.entry;
        match field {
            EntryField::Title => e.title = text,
            EntryField::Genre => e.genre = text,
            EntryField::Artist => e.artist = text,
            EntryField::Album => e.album = text,
            EntryField::Location => e.location = text,
            EntryField::MediaType => e.media_type = text,
            EntryField::Duration => e.duration = parse_number(e.id, field, &text)?,
            EntryField::TrackNumber => e.track_number = parse_number(e.id, field, &text)?,
            EntryField::Rating => e.rating = parse_number(e.id, field, &text)?,
            EntryField::PlayCount => e.play_count = parse_number(e.id, field, &text)?,
            EntryField::FirstSeen => e.first_seen = parse_number(e.id, field, &text)?,
            EntryField::LastSeen => e.last_seen = parse_number(e.id, field, &text)?,
        }
        Ok(())
    }

    pub fn finish(self) -> Entry {
        self.entry
    }
}

fn parse_number<T: std::str::FromStr>(entry: usize, field: EntryField, text: &str) -> Result<T, LoadError> {
    text.trim().parse::<T>().map_err(|_| LoadError::InvalidField {
        entry,
        field: field.tag().to_string(),
        value: text.to_string(),
    })
}
