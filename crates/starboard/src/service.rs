//! Top-level facade tying the remote catalog to the local favorites store.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::feed::{fetch_page, Page, PageLoad, SearchSession};
use crate::model::Repo;
use crate::reconcile;
use crate::remote::{RemoteError, SearchClient};
use crate::store::{FavoriteStore, StoreError};

/// Errors surfaced by the facade.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote catalog could not be reached.
    #[error("network error: {message}")]
    Network { message: String },

    /// The remote catalog answered with a failure status.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// Local persistence failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The item exists neither remotely nor in the local cache.
    #[error("repository {id} not found")]
    NotFound { id: i64 },
}

impl From<RemoteError> for ServiceError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::Network { message } => Self::Network { message },
            RemoteError::Api { status, message } => Self::Api { status, message },
        }
    }
}

/// Search, favorites, and detail resolution behind one handle.
///
/// Cheap to clone; all clones share the client and the store.
#[derive(Clone)]
pub struct Starboard {
    client: Arc<SearchClient>,
    store: Arc<FavoriteStore>,
}

impl Starboard {
    pub fn new(client: SearchClient, store: FavoriteStore) -> Self {
        Self {
            client: Arc::new(client),
            store: Arc::new(store),
        }
    }

    /// Start an interactive search session wired to the live favorite id
    /// set. Each call is an independent session.
    pub fn search(&self) -> SearchSession {
        SearchSession::spawn(self.client.clone(), self.store.watch_ids())
    }

    /// Fetch one annotated page of search results, bypassing the session
    /// machinery. Suited to one-shot callers.
    pub async fn search_page(&self, query: &str, page: u32) -> Result<Page, ServiceError> {
        match fetch_page(&self.client, query, page).await {
            PageLoad::Loaded(mut page) => {
                let ids = self.store.watch_ids().borrow().clone();
                reconcile::annotate(&mut page.items, &ids);
                Ok(page)
            }
            PageLoad::Failed { error, .. } => Err(error.into()),
        }
    }

    /// Live favorites listing, pushed on every store mutation.
    pub fn favorites(&self) -> watch::Receiver<Arc<Vec<Repo>>> {
        self.store.watch_favorites()
    }

    /// Live favorite id set.
    pub fn favorite_ids(&self) -> watch::Receiver<Arc<HashSet<i64>>> {
        self.store.watch_ids()
    }

    /// Current favorites, newest state from the store.
    pub async fn list_favorites(&self) -> Result<Vec<Repo>, ServiceError> {
        let models = self.store.list_all().await?;
        Ok(models.iter().map(Repo::from_entity).collect())
    }

    /// Flip the favorite state of `repo` and return the new state.
    pub async fn toggle_favorite(&self, repo: &Repo) -> Result<bool, ServiceError> {
        Ok(self.store.toggle(repo).await?)
    }

    pub async fn is_favorite(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.store.exists(id).await?)
    }

    /// Resolve a single item by id, network first.
    ///
    /// A fresh remote copy wins and gets the live favorite flag. When the
    /// remote fails for any reason the cached favorite copy is served
    /// instead; only when both sources come up empty does the failure
    /// surface, as [`ServiceError::NotFound`] if the remote said the item
    /// does not exist, otherwise as the remote failure itself.
    pub async fn get_repo(&self, id: i64) -> Result<Repo, ServiceError> {
        match self.client.get_repo(id).await {
            Ok(dto) => {
                let is_favorite = self.store.exists(id).await?;
                Ok(Repo::from_remote(&dto).with_favorite(is_favorite))
            }
            Err(error) => {
                tracing::debug!(id, %error, "remote detail failed, trying local cache");
                match self.store.get_by_id(id).await? {
                    Some(model) => Ok(Repo::from_entity(&model)),
                    None if error.status() == Some(404) => Err(ServiceError::NotFound { id }),
                    None => Err(error.into()),
                }
            }
        }
    }
}
