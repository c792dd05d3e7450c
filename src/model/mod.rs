//! Library data model
//!
//! Entries as loaded from rhythmdb.xml, and the album/artist/genre
//! items grouped from them.

mod entry;
mod item;

pub use entry::Entry;
pub use item::{Facet, Item, ResolvedItem};
