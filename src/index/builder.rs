//! Single-pass grouping of entries into albums, artists and genres

use super::{FacetGroup, LibraryIndex};
use crate::artwork::ImageResolver;
use crate::model::{Entry, Facet, Item};

impl FacetGroup {
    /// Fold one entry into the group. Returns the new item if this entry
    /// introduced the facet value, None if it was folded into an existing one
    /// or carries no value.
    fn add(&mut self, facet: Facet, entry: &Entry) -> Option<&mut Item> {
        let name = facet.value_of(entry);
        if name.is_empty() {
            return None;
        }

        if let Some(&pos) = self.positions.get(name) {
            self.items[pos].count += 1;
            self.members[pos].push(entry.id);
            return None;
        }

        let pos = self.items.len();
        self.positions.insert(name.to_string(), pos);
        self.items.push(Item::new(facet, entry));
        self.members.push(vec![entry.id]);
        self.items.last_mut()
    }
}

impl LibraryIndex {
    /// Group `entries` in one linear pass
    ///
    /// Each entry's id is set to its position. Each new album gets one image
    /// lookup through `resolver`. The result depends only on entry order.
    pub fn build<R: ImageResolver + ?Sized>(entries: Vec<Entry>, resolver: &R) -> Self {
        let mut index = LibraryIndex::default();

        for (id, mut entry) in entries.into_iter().enumerate() {
            entry.id = id;
            entry.selected = false;

            if let Some(album) = index.albums.add(Facet::Album, &entry) {
                album.image = resolver.resolve(&entry);
                log::debug!("Album {:?} (id {}), image: {:?}", album.name, album.id, album.image);
            }
            index.artists.add(Facet::Artist, &entry);
            index.genres.add(Facet::Genre, &entry);

            index.entries.push(entry);
        }

        log::info!(
            "Indexed {} entries: {} albums, {} artists, {} genres",
            index.entry_count(),
            index.album_count(),
            index.artist_count(),
            index.genre_count()
        );

        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::NoArtwork;
    use std::cell::RefCell;

    fn entry(id: usize, album: &str, artist: &str, genre: &str, track: u32) -> Entry {
        Entry {
            id,
            entry_type: "song".to_string(),
            title: format!("Track {}", id),
            album: album.to_string(),
            artist: artist.to_string(),
            genre: genre.to_string(),
            track_number: track,
            location: format!("file:///music/{}.mp3", id),
            ..Default::default()
        }
    }

    /// Records which entries were asked for a cover
    struct RecordingResolver {
        calls: RefCell<Vec<usize>>,
    }

    impl ImageResolver for RecordingResolver {
        fn resolve(&self, entry: &Entry) -> Option<String> {
            self.calls.borrow_mut().push(entry.id);
            Some(format!("/albums/a{}.jpg", entry.id))
        }
    }

    #[test]
    fn test_empty_index() {
        let index = LibraryIndex::build(Vec::new(), &NoArtwork);
        assert!(index.is_empty());
        assert_eq!(index.album_count(), 0);
        assert_eq!(index.artist_count(), 0);
        assert_eq!(index.genre_count(), 0);
    }

    #[test]
    fn test_dedup_and_counts() {
        let entries = vec![
            entry(0, "A", "X", "Rock", 2),
            entry(1, "A", "X", "Rock", 1),
            entry(2, "B", "Y", "Jazz", 1),
            entry(3, "A", "Z", "Rock", 3),
        ];
        let index = LibraryIndex::build(entries, &NoArtwork);

        assert_eq!(index.album_count(), 2);
        let album = index.album_named("A").unwrap();
        assert_eq!(album.id, 0);
        assert_eq!(album.count, 3);
        assert_eq!(index.group(Facet::Album).members("A"), &[0, 1, 3]);

        assert_eq!(index.artist_named("X").unwrap().count, 2);
        assert_eq!(index.artist_named("Z").unwrap().id, 3);
        assert_eq!(index.genre_named("Rock").unwrap().count, 3);
        assert_eq!(index.genre_named("Jazz").unwrap().count, 1);
    }

    #[test]
    fn test_empty_album_counts_for_artist_only() {
        let index = LibraryIndex::build(vec![entry(0, "", "X", "", 0)], &NoArtwork);

        assert_eq!(index.album_count(), 0);
        assert_eq!(index.genre_count(), 0);
        assert_eq!(index.artist_count(), 1);
        assert_eq!(index.artist_named("X").unwrap().count, 1);
    }

    #[test]
    fn test_entry_without_facets() {
        let index = LibraryIndex::build(vec![entry(0, "", "", "", 0)], &NoArtwork);

        assert_eq!(index.entry_count(), 1);
        assert_eq!(index.album_count(), 0);
        assert_eq!(index.artist_count(), 0);
        assert_eq!(index.genre_count(), 0);
    }

    #[test]
    fn test_build_is_deterministic() {
        let entries = vec![
            entry(0, "A", "X", "Rock", 2),
            entry(1, "B", "Y", "Jazz", 1),
            entry(2, "A", "X", "Pop", 1),
            entry(3, "C", "Y", "Jazz", 4),
        ];

        let first = LibraryIndex::build(entries.clone(), &NoArtwork);
        let second = LibraryIndex::build(entries, &NoArtwork);
        assert_eq!(first, second);
    }

    #[test]
    fn test_one_image_lookup_per_album() {
        let resolver = RecordingResolver {
            calls: RefCell::new(Vec::new()),
        };
        let entries = vec![
            entry(0, "A", "X", "", 1),
            entry(1, "A", "X", "", 2),
            entry(2, "B", "X", "", 1),
            entry(3, "", "X", "", 1),
        ];

        let index = LibraryIndex::build(entries, &resolver);

        assert_eq!(*resolver.calls.borrow(), vec![0, 2]);
        assert_eq!(index.album_named("B").unwrap().image.as_deref(), Some("/albums/a2.jpg"));
        assert!(index.album_named("B").unwrap().has_image());
    }
}
