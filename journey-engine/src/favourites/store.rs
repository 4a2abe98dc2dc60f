//! Favourite journeys store.

use std::sync::Mutex;

use tracing::warn;

use crate::domain::Crs;

use super::FavouriteJourney;
use super::file::FavouritesFile;

/// Outcome of a toggle: which way the entry flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The journey was not saved; it is now.
    Added,
    /// The journey was saved; it no longer is.
    Removed,
}

/// Deduplicated, order-preserving set of saved journeys.
///
/// Toggle is the only mutation: a second save of the same pair removes
/// it. Every read-modify-write runs under one lock, so two toggles
/// issued back-to-back for the same pair can never both observe
/// "absent" - the second sees the result of the first.
///
/// If the persistence collaborator fails, the store logs a warning and
/// carries on in memory for the rest of the session; favourites then
/// don't survive restart, but the session stays usable.
pub struct FavouritesStore {
    inner: Mutex<Inner>,
}

struct Inner {
    /// Saved journeys, insertion order.
    entries: Vec<FavouriteJourney>,
    /// Persistence collaborator; dropped for the session after a failed
    /// save.
    file: Option<FavouritesFile>,
}

impl FavouritesStore {
    /// Open a store backed by the given file.
    ///
    /// An absent or unreadable file starts the store empty.
    pub fn open(file: FavouritesFile) -> Self {
        let entries = file.load().unwrap_or_default();

        Self {
            inner: Mutex::new(Inner {
                entries,
                file: Some(file),
            }),
        }
    }

    /// Create a store with no persistence (tests, degraded mode).
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: Vec::new(),
                file: None,
            }),
        }
    }

    /// True iff the exact `(from, to)` pair is saved.
    pub fn is_favourite(&self, from: &Crs, to: &Crs) -> bool {
        let inner = self.inner.lock().expect("favourites lock poisoned");
        inner
            .entries
            .iter()
            .any(|fav| fav.from == *from && fav.to == *to)
    }

    /// Flip the saved state of a journey.
    ///
    /// Appends when absent; removes in place when present, leaving the
    /// other entries in their insertion order. This is the only mutation
    /// entry point - there are no separate add/remove calls.
    pub fn toggle(&self, from: Crs, to: Crs) -> ToggleOutcome {
        let mut inner = self.inner.lock().expect("favourites lock poisoned");

        let existing = inner
            .entries
            .iter()
            .position(|fav| fav.from == from && fav.to == to);

        let outcome = match existing {
            Some(index) => {
                inner.entries.remove(index);
                ToggleOutcome::Removed
            }
            None => {
                inner.entries.push(FavouriteJourney { from, to });
                ToggleOutcome::Added
            }
        };

        persist(&mut inner);
        outcome
    }

    /// All saved journeys, insertion order.
    pub fn list(&self) -> Vec<FavouriteJourney> {
        let inner = self.inner.lock().expect("favourites lock poisoned");
        inner.entries.clone()
    }

    /// Number of saved journeys.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("favourites lock poisoned");
        inner.entries.len()
    }

    /// Whether no journeys are saved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write the current entries through to disk, degrading to in-memory
/// operation for the rest of the session on failure.
fn persist(inner: &mut Inner) {
    let Some(file) = &inner.file else {
        return;
    };

    if let Err(e) = file.save(&inner.entries) {
        warn!(
            path = %file.path().display(),
            error = %e,
            "failed to persist favourites; continuing in memory only"
        );
        inner.file = None;
    }
}
