//! State shared across screens.
//!
//! - [`favorites`]: the in-memory favorites store with observer subscriptions

pub mod favorites;

pub use favorites::{FavoriteSet, FavoritesStore, SubscriptionId};
