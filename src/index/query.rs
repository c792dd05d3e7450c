//! Read-only queries over a built index
//!
//! Callers identify albums, artists and genres by the id of any entry that
//! carries the facet value. Lookups go id -> entry -> facet value -> item.

use super::LibraryIndex;
use crate::model::{Entry, Facet, Item, ResolvedItem};
use std::cmp::Ordering;

impl LibraryIndex {
    /// Albums sorted by artist
    pub fn list_albums(&self) -> Vec<Item> {
        sorted(self.albums.items(), |a, b| a.entry.artist.cmp(&b.entry.artist))
    }

    /// Artists sorted by name
    pub fn list_artists(&self) -> Vec<Item> {
        sorted(self.artists.items(), |a, b| a.entry.artist.cmp(&b.entry.artist))
    }

    /// Genres sorted by name
    pub fn list_genres(&self) -> Vec<Item> {
        sorted(self.genres.items(), |a, b| a.entry.genre.cmp(&b.entry.genre))
    }

    /// Items of one facet in their listing order
    pub fn list(&self, facet: Facet) -> Vec<Item> {
        match facet {
            Facet::Album => self.list_albums(),
            Facet::Artist => self.list_artists(),
            Facet::Genre => self.list_genres(),
        }
    }

    /// The album of entry `id` with its tracks ordered by track number
    pub fn resolve_album(&self, id: usize) -> Option<ResolvedItem> {
        self.resolve(Facet::Album, id)
    }

    /// Every track of the genre of entry `id`, ordered by artist
    pub fn resolve_genre_tracks(&self, id: usize) -> Option<ResolvedItem> {
        self.resolve(Facet::Genre, id)
    }

    /// Albums whose first track is by the artist of entry `id`
    pub fn resolve_artist_albums(&self, id: usize) -> Vec<Item> {
        let Some(artist) = self.entry(id).map(|e| e.artist.as_str()) else {
            return Vec::new();
        };
        if artist.is_empty() {
            return Vec::new();
        }

        self.albums
            .items()
            .iter()
            .filter(|album| album.entry.artist == artist)
            .cloned()
            .collect()
    }

    /// Resolve the `facet` value carried by entry `id`
    ///
    /// None when `id` is out of range or the entry has no value for `facet`.
    pub fn resolve(&self, facet: Facet, id: usize) -> Option<ResolvedItem> {
        let entry = self.entry(id)?;
        self.resolve_named(facet, facet.value_of(entry))
    }

    /// Resolve a facet value directly
    pub fn resolve_named(&self, facet: Facet, name: &str) -> Option<ResolvedItem> {
        let group = self.group(facet);
        let item = group.get(name)?;

        let mut tracks: Vec<Entry> = group
            .members(name)
            .iter()
            .filter_map(|&id| self.entry(id))
            .cloned()
            .collect();
        sort_tracks(facet, &mut tracks);

        Some(ResolvedItem {
            item: item.clone(),
            tracks,
        })
    }
}

/// Stable sort of a copy of `items`
fn sorted<F>(items: &[Item], compare: F) -> Vec<Item>
where
    F: Fn(&Item, &Item) -> Ordering,
{
    let mut items = items.to_vec();
    items.sort_by(compare);
    items
}

/// Track order within a resolved item; ties keep file order
fn sort_tracks(facet: Facet, tracks: &mut [Entry]) {
    match facet {
        Facet::Album => tracks.sort_by_key(|t| t.track_number),
        Facet::Genre => tracks.sort_by(|a, b| a.artist.cmp(&b.artist)),
        Facet::Artist => tracks.sort_by(|a, b| {
            a.album
                .cmp(&b.album)
                .then(a.track_number.cmp(&b.track_number))
        }),
    }
}
