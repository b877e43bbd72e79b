//! Favorite entity - the durable local snapshot of a favorited repository.
//!
//! Presence of a row in this table IS the favorite flag; there is no
//! `is_favorite` column. A re-favorite replaces the row so the cached field
//! snapshot always reflects the latest values seen from the remote catalog.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Favorite model - one row per favorited repository.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    /// The repository's stable numeric id, assigned by the remote catalog.
    /// Immutable once assigned; used as the primary key directly.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,

    /// Repository name (URL-safe slug).
    pub name: String,
    /// Fully-qualified name (owner/name).
    pub full_name: String,
    /// Repository description.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Owner avatar image URL.
    #[sea_orm(column_type = "Text")]
    pub owner_avatar_url: String,

    /// Star count at the time the snapshot was taken.
    pub stars: i32,
    /// Fork count.
    pub forks: i32,
    /// Watcher count.
    pub watchers: i32,
    /// Open issue count.
    pub open_issues: i32,

    /// Primary programming language.
    pub language: Option<String>,
    /// Canonical web URL of the repository.
    #[sea_orm(column_type = "Text")]
    pub html_url: String,

    /// When this snapshot was last written.
    pub saved_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
