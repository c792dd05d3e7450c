//! Browser configuration

use crate::player::{RhythmboxClient, RHYTHMBOX_CLIENT};
use crate::rhythmbox::DEFAULT_DATABASE;
use std::path::PathBuf;

/// Where covers are copied to, relative to the working directory
pub const DEFAULT_ARTWORK_DIR: &str = "public/albums";

/// Path under which copied covers are served
pub const DEFAULT_ARTWORK_URL_PREFIX: &str = "/albums";

/// Configuration for a browser session
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// rhythmdb.xml to load
    pub library_path: PathBuf,

    /// Player client binary to invoke
    pub client_binary: String,

    /// Directory album covers are copied into
    pub artwork_dir: PathBuf,

    /// Public path prefix for copied covers
    pub artwork_url_prefix: String,
}

impl BrowserConfig {
    pub fn new(library_path: PathBuf) -> Self {
        Self {
            library_path,
            client_binary: RHYTHMBOX_CLIENT.to_string(),
            artwork_dir: PathBuf::from(DEFAULT_ARTWORK_DIR),
            artwork_url_prefix: DEFAULT_ARTWORK_URL_PREFIX.to_string(),
        }
    }

    pub fn with_client(mut self, binary: impl Into<String>) -> Self {
        self.client_binary = binary.into();
        self
    }

    pub fn with_artwork_dir(mut self, dir: PathBuf) -> Self {
        self.artwork_dir = dir;
        self
    }

    pub fn with_artwork_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.artwork_url_prefix = prefix.into();
        self
    }

    /// Player client running the configured binary
    pub fn client(&self) -> RhythmboxClient {
        RhythmboxClient::new(self.client_binary.clone())
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::new(default_library_path())
    }
}

/// Rhythmbox's database for the current user, assuming a recent Rhythmbox
pub fn default_library_path() -> PathBuf {
    expand_path(DEFAULT_DATABASE)
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
