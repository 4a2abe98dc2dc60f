//! Disk persistence for favourite journeys.

use std::path::{Path, PathBuf};

use super::FavouriteJourney;

/// Errors writing the favourites file.
#[derive(Debug, thiserror::Error)]
pub enum FavouritesError {
    /// File could not be written
    #[error("failed to write favourites: {0}")]
    Io(#[from] std::io::Error),

    /// Entries could not be serialized
    #[error("failed to serialize favourites: {0}")]
    Json(#[from] serde_json::Error),
}

/// The favourites persistence collaborator: one JSON file holding the
/// serialized journey list. The store is the sole owner of this file's
/// schema.
#[derive(Debug, Clone)]
pub struct FavouritesFile {
    path: PathBuf,
}

impl FavouritesFile {
    /// Create a handle for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Try to load the saved journeys.
    ///
    /// Returns `None` if the file doesn't exist or doesn't parse; an
    /// absent or unreadable file is equivalent to an empty list.
    pub fn load(&self) -> Option<Vec<FavouriteJourney>> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the journey list, replacing the previous contents.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, journeys: &[FavouriteJourney]) -> Result<(), FavouritesError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(journeys)?;
        std::fs::write(&self.path, json)?;

        Ok(())
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
