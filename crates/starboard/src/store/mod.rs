//! Local favorites store.
//!
//! The store is the sole source of truth for favorite membership. Every
//! mutation republishes two live views on watch channels: the full favorites
//! listing and the id set used for reconciliation. Watch channels carry
//! latest-state semantics - slow consumers only ever see the newest value -
//! and sharing is structural: all subscribers observe the same `Arc`'d set.

use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use thiserror::Error;
use tokio::sync::watch;

use crate::entity::favorite::{Column, Entity as Favorite, Model as FavoriteModel};
use crate::model::Repo;

/// Errors that can occur during favorites persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sea-orm.
    #[error("storage error: {0}")]
    Database(#[from] DbErr),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Keyed persistent storage of favorited repositories.
pub struct FavoriteStore {
    db: DatabaseConnection,
    favorites_tx: watch::Sender<Arc<Vec<Repo>>>,
    ids_tx: watch::Sender<Arc<HashSet<i64>>>,
}

impl FavoriteStore {
    /// Open the store over an existing connection and seed the live views.
    pub async fn new(db: DatabaseConnection) -> Result<Self> {
        let models = Favorite::find().all(&db).await?;
        let (favorites, ids) = views(&models);

        let (favorites_tx, _) = watch::channel(favorites);
        let (ids_tx, _) = watch::channel(ids);

        Ok(Self {
            db,
            favorites_tx,
            ids_tx,
        })
    }

    /// Snapshot of every persisted favorite record.
    pub async fn list_all(&self) -> Result<Vec<FavoriteModel>> {
        Ok(Favorite::find().all(&self.db).await?)
    }

    /// Live favorites listing. Pushed on every mutation; every item carries
    /// `is_favorite = true` by construction.
    pub fn watch_favorites(&self) -> watch::Receiver<Arc<Vec<Repo>>> {
        self.favorites_tx.subscribe()
    }

    /// Live favorite-id set, computed once per mutation and shared by all
    /// subscribers.
    pub fn watch_ids(&self) -> watch::Receiver<Arc<HashSet<i64>>> {
        self.ids_tx.subscribe()
    }

    /// Look up a favorite record by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FavoriteModel>> {
        Ok(Favorite::find_by_id(id).one(&self.db).await?)
    }

    /// Check favorite membership by id.
    pub async fn exists(&self, id: i64) -> Result<bool> {
        Ok(Favorite::find_by_id(id).one(&self.db).await?.is_some())
    }

    /// Insert or replace a favorite snapshot.
    ///
    /// Replace-on-conflict: re-favoriting overwrites stale cached fields with
    /// the latest known values. A single statement, so readers observe either
    /// the old or the new row, never a partial write.
    pub async fn upsert(&self, repo: &Repo) -> Result<()> {
        Favorite::insert(repo.to_active_model())
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Name,
                        Column::FullName,
                        Column::Description,
                        Column::OwnerAvatarUrl,
                        Column::Stars,
                        Column::Forks,
                        Column::Watchers,
                        Column::OpenIssues,
                        Column::Language,
                        Column::HtmlUrl,
                        Column::SavedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        self.refresh_views().await
    }

    /// Delete a favorite record by id. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: i64) -> Result<()> {
        Favorite::delete_by_id(id).exec(&self.db).await?;
        self.refresh_views().await
    }

    /// Flip the persisted favorite state for `repo`.
    ///
    /// Present -> delete; absent -> insert the full current field snapshot.
    /// Returns the new membership state.
    pub async fn toggle(&self, repo: &Repo) -> Result<bool> {
        if self.exists(repo.id).await? {
            tracing::debug!(id = repo.id, name = %repo.name, "removing favorite");
            self.delete(repo.id).await?;
            Ok(false)
        } else {
            tracing::debug!(id = repo.id, name = %repo.name, "adding favorite");
            self.upsert(repo).await?;
            Ok(true)
        }
    }

    /// Reload both live views from the database and push to subscribers.
    async fn refresh_views(&self) -> Result<()> {
        let models = Favorite::find().all(&self.db).await?;
        let (favorites, ids) = views(&models);
        self.favorites_tx.send_replace(favorites);
        self.ids_tx.send_replace(ids);
        Ok(())
    }
}

fn views(models: &[FavoriteModel]) -> (Arc<Vec<Repo>>, Arc<HashSet<i64>>) {
    let favorites: Vec<Repo> = models.iter().map(Repo::from_entity).collect();
    let ids: HashSet<i64> = models.iter().map(|m| m.id).collect();
    (Arc::new(favorites), Arc::new(ids))
}
