use super::Entry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which entry field an item groups on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facet {
    Album,
    Artist,
    Genre,
}

impl Facet {
    /// The facet value carried by an entry (may be empty)
    pub fn value_of<'a>(&self, entry: &'a Entry) -> &'a str {
        match self {
            Facet::Album => &entry.album,
            Facet::Artist => &entry.artist,
            Facet::Genre => &entry.genre,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Album => "Album",
            Facet::Artist => "Artist",
            Facet::Genre => "Genre",
        };
        f.write_str(name)
    }
}

/// A deduplicated album, artist or genre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Id of the first entry carrying this facet value
    pub id: usize,

    pub name: String,

    pub facet: Facet,

    /// Number of entries sharing this facet value
    pub count: usize,

    /// Public path of the cover image, albums only
    pub image: Option<String>,

    /// First entry carrying this facet value, used for sorting and display
    pub entry: Entry,
}

impl Item {
    pub fn new(facet: Facet, entry: &Entry) -> Self {
        Self {
            id: entry.id,
            name: facet.value_of(entry).to_string(),
            facet,
            count: 1,
            image: None,
            entry: entry.clone(),
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// An item together with its ordered tracks
///
/// Tracks are copies; marking one as selected never touches the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub item: Item,
    pub tracks: Vec<Entry>,
}

impl ResolvedItem {
    /// Mark the track with `track_id` as selected and clear every other track.
    /// Returns false, with nothing selected, if no track matched.
    pub fn select_track(&mut self, track_id: usize) -> bool {
        let mut matched = false;
        for track in &mut self.tracks {
            track.selected = track.id == track_id;
            matched |= track.selected;
        }
        matched
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.tracks.iter().find(|t| t.selected)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(ids: &[usize]) -> ResolvedItem {
        let tracks: Vec<Entry> = ids
            .iter()
            .map(|&id| Entry {
                id,
                album: "Doolittle".to_string(),
                ..Default::default()
            })
            .collect();
        ResolvedItem {
            item: Item::new(Facet::Album, &tracks[0]),
            tracks,
        }
    }

    #[test]
    fn test_item_from_entry() {
        let entry = Entry {
            id: 7,
            artist: "Pixies".to_string(),
            album: "Doolittle".to_string(),
            ..Default::default()
        };

        let album = Item::new(Facet::Album, &entry);
        assert_eq!(album.id, 7);
        assert_eq!(album.name, "Doolittle");
        assert_eq!(album.count, 1);
        assert!(!album.has_image());

        let artist = Item::new(Facet::Artist, &entry);
        assert_eq!(artist.name, "Pixies");
    }

    #[test]
    fn test_select_track_is_exclusive() {
        let mut album = resolved(&[4, 2, 9]);

        assert!(album.select_track(2));
        assert!(album.select_track(9));

        let selected: Vec<usize> = album.tracks.iter().filter(|t| t.selected).map(|t| t.id).collect();
        assert_eq!(selected, vec![9]);
        assert_eq!(album.selected().map(|t| t.id), Some(9));
    }

    #[test]
    fn test_select_track_without_match() {
        let mut album = resolved(&[4, 2]);

        assert!(!album.select_track(100));
        assert!(album.selected().is_none());
    }

    #[test]
    fn test_select_missing_track_clears_previous_selection() {
        let mut album = resolved(&[0, 1, 2]);

        assert!(album.select_track(0));
        assert!(!album.select_track(99));

        assert!(album.tracks.iter().all(|t| !t.selected));
        assert!(album.selected().is_none());
    }
}
