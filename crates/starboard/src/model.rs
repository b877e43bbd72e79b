//! Domain model for catalog entries.

use chrono::Utc;
use sea_orm::Set;

use crate::entity::favorite::{ActiveModel as FavoriteActiveModel, Model as FavoriteModel};
use crate::remote::types::RepoDto;

/// A catalog entry with identity, stats, and a live favorite annotation.
///
/// Two values with the same `id` are the same logical entity regardless of
/// which source produced them. `is_favorite` is a view-time annotation
/// computed against the favorites store; it is never trusted from a stale
/// copy (the remote catalog always reports it as false).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    /// Stable numeric id assigned by the remote catalog.
    pub id: i64,
    /// Repository name.
    pub name: String,
    /// Fully-qualified name (owner/name).
    pub full_name: String,
    /// Repository description.
    pub description: Option<String>,
    /// Owner avatar image URL.
    pub owner_avatar_url: String,
    /// Star count.
    pub stars: i32,
    /// Fork count.
    pub forks: i32,
    /// Watcher count.
    pub watchers: i32,
    /// Open issue count.
    pub open_issues: i32,
    /// Primary programming language.
    pub language: Option<String>,
    /// Canonical web URL.
    pub html_url: String,
    /// Live favorite flag. Authoritative only when annotated from the store.
    pub is_favorite: bool,
}

impl Repo {
    /// Build a domain repo from a remote search/detail payload.
    ///
    /// The remote source knows nothing about local favorites, so the flag
    /// starts out false and is overridden by reconciliation.
    pub fn from_remote(dto: &RepoDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.clone(),
            full_name: dto.full_name.clone(),
            description: dto.description.clone(),
            owner_avatar_url: dto.owner.avatar_url.clone(),
            stars: dto.stargazers_count,
            forks: dto.forks_count,
            watchers: dto.watchers_count,
            open_issues: dto.open_issues_count,
            language: dto.language.clone(),
            html_url: dto.html_url.clone(),
            is_favorite: false,
        }
    }

    /// Build a domain repo from a persisted favorite snapshot.
    ///
    /// Presence in the store is the favorite flag, so this is always true.
    pub fn from_entity(model: &FavoriteModel) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            full_name: model.full_name.clone(),
            description: model.description.clone(),
            owner_avatar_url: model.owner_avatar_url.clone(),
            stars: model.stars,
            forks: model.forks,
            watchers: model.watchers,
            open_issues: model.open_issues,
            language: model.language.clone(),
            html_url: model.html_url.clone(),
            is_favorite: true,
        }
    }

    /// Convert to an active model for persistence, stamping `saved_at` now.
    pub fn to_active_model(&self) -> FavoriteActiveModel {
        FavoriteActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            full_name: Set(self.full_name.clone()),
            description: Set(self.description.clone()),
            owner_avatar_url: Set(self.owner_avatar_url.clone()),
            stars: Set(self.stars),
            forks: Set(self.forks),
            watchers: Set(self.watchers),
            open_issues: Set(self.open_issues),
            language: Set(self.language.clone()),
            html_url: Set(self.html_url.clone()),
            saved_at: Set(Utc::now().fixed_offset()),
        }
    }

    /// Return the same repo with the favorite flag overridden.
    #[must_use]
    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::types::OwnerDto;
    use sea_orm::ActiveValue;

    fn dto(id: i64) -> RepoDto {
        RepoDto {
            id,
            name: "ripgrep".to_string(),
            full_name: "BurntSushi/ripgrep".to_string(),
            description: Some("recursively searches directories".to_string()),
            stargazers_count: 45000,
            forks_count: 2000,
            watchers_count: 45000,
            open_issues_count: 150,
            language: Some("Rust".to_string()),
            html_url: "https://github.com/BurntSushi/ripgrep".to_string(),
            owner: OwnerDto {
                avatar_url: "https://avatars.example.com/u/456".to_string(),
            },
        }
    }

    #[test]
    fn from_remote_maps_every_field_and_defaults_favorite_false() {
        let repo = Repo::from_remote(&dto(7));
        assert_eq!(repo.id, 7);
        assert_eq!(repo.name, "ripgrep");
        assert_eq!(repo.full_name, "BurntSushi/ripgrep");
        assert_eq!(repo.stars, 45000);
        assert_eq!(repo.forks, 2000);
        assert_eq!(repo.watchers, 45000);
        assert_eq!(repo.open_issues, 150);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.owner_avatar_url, "https://avatars.example.com/u/456");
        assert!(!repo.is_favorite);
    }

    #[test]
    fn from_entity_is_always_favorite() {
        let entity = Repo::from_remote(&dto(7)).to_active_model();
        let model = FavoriteModel {
            id: 7,
            name: "ripgrep".to_string(),
            full_name: "BurntSushi/ripgrep".to_string(),
            description: None,
            owner_avatar_url: String::new(),
            stars: 1,
            forks: 1,
            watchers: 1,
            open_issues: 1,
            language: None,
            html_url: String::new(),
            saved_at: chrono::Utc::now().fixed_offset(),
        };
        assert!(Repo::from_entity(&model).is_favorite);
        // The active model never carries an is_favorite column.
        assert!(matches!(entity.id, ActiveValue::Set(7)));
    }

    #[test]
    fn entity_round_trip_preserves_fields() {
        let repo = Repo::from_remote(&dto(99)).with_favorite(true);
        let active = repo.to_active_model();
        let model = FavoriteModel {
            id: match active.id {
                ActiveValue::Set(v) => v,
                _ => panic!("id should be set"),
            },
            name: repo.name.clone(),
            full_name: repo.full_name.clone(),
            description: repo.description.clone(),
            owner_avatar_url: repo.owner_avatar_url.clone(),
            stars: repo.stars,
            forks: repo.forks,
            watchers: repo.watchers,
            open_issues: repo.open_issues,
            language: repo.language.clone(),
            html_url: repo.html_url.clone(),
            saved_at: chrono::Utc::now().fixed_offset(),
        };
        assert_eq!(Repo::from_entity(&model), repo);
    }
}
