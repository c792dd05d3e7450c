//! Rhythmbox library parsing
//!
//! Parses Rhythmbox's XML database into a flat list of entries.

mod database;
mod model;

pub use database::{parse_database, parse_reader};

/// Where Rhythmbox keeps its database for the current user
pub const DEFAULT_DATABASE: &str = "~/.local/share/rhythmbox/rhythmdb.xml";
