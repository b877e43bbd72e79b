//! Starboard - GitHub catalog search with locally persisted favorites.
//!
//! This library is the data-synchronization core behind a catalog browser:
//! it reconciles a paginated remote search feed, a persisted local favorites
//! store, and single-item network/cache fallback lookups into one consistent
//! read model.
//!
//! # Features
//!
//! - `migrate` - Enables database migration support. When enabled, you can use
//!   [`connect_and_migrate`] to automatically run migrations on connection.
//!
//! # Example
//!
//! ```ignore
//! use starboard::{connect_and_migrate, FavoriteStore, SearchClient, Starboard};
//!
//! let db = connect_and_migrate("sqlite://starboard.db?mode=rwc").await?;
//! let store = FavoriteStore::new(db).await?;
//! let client = SearchClient::github(None);
//! let board = Starboard::new(client, store);
//!
//! let session = board.search();
//! session.set_query("rust http client");
//! let repo = board.get_repo(42).await?;
//! ```

pub mod db;
pub mod entity;
pub mod feed;
pub mod model;
pub mod reconcile;
pub mod remote;
pub mod service;
pub mod store;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use feed::{FeedCommand, Page, PageView, SearchSession, SearchSnapshot, DEBOUNCE, PAGE_SIZE};
pub use model::Repo;
pub use remote::{RemoteError, SearchClient};
pub use service::{ServiceError, Starboard};
pub use store::{FavoriteStore, StoreError};
