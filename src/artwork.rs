//! Album cover lookup
//!
//! Finds a cover image next to an album's audio files and copies it to a
//! public directory so a front-end can serve it.

use crate::model::Entry;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Image extensions accepted as album covers
pub const COVER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Resolves a cover image for the album an entry belongs to
pub trait ImageResolver {
    /// Public path of the cover image, None if there is none
    fn resolve(&self, entry: &Entry) -> Option<String>;
}

/// Resolver that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArtwork;

impl ImageResolver for NoArtwork {
    fn resolve(&self, _entry: &Entry) -> Option<String> {
        None
    }
}

/// Copies the first image found next to an entry's file into `output_dir`
/// as `a<id>.<ext>`
#[derive(Debug, Clone)]
pub struct CoverArtResolver {
    output_dir: PathBuf,
    url_prefix: String,
}

impl CoverArtResolver {
    pub fn new(output_dir: PathBuf, url_prefix: impl Into<String>) -> Self {
        let url_prefix: String = url_prefix.into();
        Self {
            output_dir,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }

    /// A cover copied by an earlier run
    fn cached(&self, id: usize) -> Option<String> {
        COVER_EXTENSIONS
            .iter()
            .map(|ext| format!("a{}.{}", id, ext))
            .find(|name| self.output_dir.join(name).is_file())
            .map(|name| self.public_path(&name))
    }

    fn copy_cover(&self, entry: &Entry) -> Result<Option<String>> {
        let Some(file_path) = entry.file_path() else {
            return Ok(None);
        };
        let Some(album_dir) = file_path.parent() else {
            return Ok(None);
        };
        let Some(cover) = find_cover(album_dir) else {
            log::debug!("No cover image in {}", album_dir.display());
            return Ok(None);
        };

        let ext = cover
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "jpg".to_string());
        let name = format!("a{}.{}", entry.id, ext);

        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create artwork directory: {}", self.output_dir.display()))?;
        let dest = self.output_dir.join(&name);
        fs::copy(&cover, &dest)
            .with_context(|| format!("Failed to copy {} to {}", cover.display(), dest.display()))?;

        log::debug!("Copied cover {} -> {}", cover.display(), dest.display());
        Ok(Some(self.public_path(&name)))
    }
}

impl ImageResolver for CoverArtResolver {
    fn resolve(&self, entry: &Entry) -> Option<String> {
        if let Some(path) = self.cached(entry.id) {
            return Some(path);
        }

        match self.copy_cover(entry) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Cover lookup failed for entry {}: {:#}", entry.id, e);
                None
            }
        }
    }
}

/// First image file directly inside `dir`, by file name
pub fn find_cover(dir: &Path) -> Option<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .find(|path| is_cover_image(path))
}

fn is_cover_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            COVER_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
