//! Rhythmbox Browser - browse a Rhythmbox library and drive playback
//!
//! Parses Rhythmbox's rhythmdb.xml, groups the tracks into albums,
//! artists and genres, and queues them on a running Rhythmbox through
//! rhythmbox-client.

pub mod artwork;
pub mod browser;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod player;
pub mod rhythmbox;

pub use browser::Browser;
pub use config::BrowserConfig;
pub use error::{LoadError, ProcessError};
pub use index::LibraryIndex;
