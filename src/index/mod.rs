//! In-memory library index
//!
//! Built once from the parsed entries; groups them into albums, artists
//! and genres and answers read-only queries over the result.

mod builder;
mod query;

use crate::model::{Entry, Facet, Item};
use std::collections::HashMap;

/// Deduplicated items of one facet in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetGroup {
    items: Vec<Item>,
    /// Facet value -> position in `items`
    positions: HashMap<String, usize>,
    /// Entry ids per item, in file order
    members: Vec<Vec<usize>>,
}

impl FacetGroup {
    /// Items in first-seen order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.positions.get(name).map(|&pos| &self.items[pos])
    }

    /// Ids of the entries carrying `name`, in file order
    pub fn members(&self, name: &str) -> &[usize] {
        self.positions
            .get(name)
            .map(|&pos| self.members[pos].as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Entries plus their album, artist and genre groupings
///
/// The default value is the empty index: every query on it returns nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryIndex {
    entries: Vec<Entry>,
    albums: FacetGroup,
    artists: FacetGroup,
    genres: FacetGroup,
}

impl LibraryIndex {
    /// All entries, ordered by id
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: usize) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn group(&self, facet: Facet) -> &FacetGroup {
        match facet {
            Facet::Album => &self.albums,
            Facet::Artist => &self.artists,
            Facet::Genre => &self.genres,
        }
    }

    pub fn album_named(&self, name: &str) -> Option<&Item> {
        self.albums.get(name)
    }

    pub fn artist_named(&self, name: &str) -> Option<&Item> {
        self.artists.get(name)
    }

    pub fn genre_named(&self, name: &str) -> Option<&Item> {
        self.genres.get(name)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    pub fn genre_count(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
