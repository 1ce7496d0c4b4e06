//! In-memory favorites store shared by every screen.
//!
//! [`FavoritesStore`] is the single source of truth for "is this mandal a
//! favorite". It is owned by the application state and handed to screens by
//! reference. Observers registered with [`FavoritesStore::subscribe`] are
//! called synchronously after every mutation, so all favorite-derived views
//! see the new set before the next render.
//!
//! The store accepts any id. It does not check ids against the catalog, and
//! unknown ids simply are not favorites until toggled.
//!
//! # Example
//!
//! ```
//! use mandalguide::store::FavoritesStore;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut store = FavoritesStore::new();
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//! store.subscribe(move |favorites| counter.set(favorites.len()));
//!
//! assert!(store.toggle("1"));
//! assert!(store.toggle("2"));
//! assert!(!store.toggle("1"));
//! assert_eq!(seen.get(), 1);
//! assert!(store.is_favorite("2"));
//! ```

use std::collections::BTreeSet;
use std::fmt;

/// The set of favorited mandal ids.
pub type FavoriteSet = BTreeSet<String>;

/// Handle returned by [`FavoritesStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&FavoriteSet)>;

/// Toggle-able set of favorite ids with change notification.
pub struct FavoritesStore {
    favorites: FavoriteSet,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    revision: u64,
}

impl FavoritesStore {
    /// Creates an empty store with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            favorites: FavoriteSet::new(),
            observers: Vec::new(),
            next_subscription: 0,
            revision: 0,
        }
    }

    /// Returns the current favorite set.
    #[must_use]
    pub const fn get_all(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Membership test. `false` for ids never toggled, catalog entry or not.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Flips the membership of `id` and notifies every observer.
    ///
    /// Returns whether `id` is a favorite after the call. Two successive
    /// toggles of the same id restore the original membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_favorite = if self.favorites.remove(id) {
            false
        } else {
            self.favorites.insert(id.to_string());
            true
        };
        self.revision += 1;

        tracing::debug!(
            mandal_id = %id,
            now_favorite,
            favorites = self.favorites.len(),
            revision = self.revision,
            observers = self.observers.len(),
            "favorite toggled"
        );

        for (_, observer) in &mut self.observers {
            observer(&self.favorites);
        }

        now_favorite
    }

    /// Registers an observer called with the new set after every toggle.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&FavoriteSet) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Number of mutations since the store was created.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("favorites", &self.favorites)
            .field("observers", &self.observers.len())
            .field("revision", &self.revision)
            .finish()
    }
}
