//! Favorite reconciliation.
//!
//! Remote results never know about local favorites, so every batch handed to
//! a consumer is joined against the live id set from the store. The join is
//! by id only; no other fields take part.

use std::collections::HashSet;

use crate::model::Repo;

/// Overwrite the favorite flag on every item from the authoritative id set.
pub fn annotate(items: &mut [Repo], favorite_ids: &HashSet<i64>) {
    for item in items {
        item.is_favorite = favorite_ids.contains(&item.id);
    }
}

/// Collect the id set of a favorites listing.
pub fn id_set(favorites: &[Repo]) -> HashSet<i64> {
    favorites.iter().map(|r| r.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: i64, is_favorite: bool) -> Repo {
        Repo {
            id,
            name: format!("repo{id}"),
            full_name: format!("o/repo{id}"),
            description: None,
            owner_avatar_url: String::new(),
            stars: 0,
            forks: 0,
            watchers: 0,
            open_issues: 0,
            language: None,
            html_url: String::new(),
            is_favorite,
        }
    }

    #[test]
    fn annotate_sets_flags_from_the_id_set_only() {
        let mut items = vec![repo(42, false), repo(7, false), repo(9, true)];
        let ids: HashSet<i64> = [42].into_iter().collect();

        annotate(&mut items, &ids);

        // 42 is favorited, 7 never was, and 9's stale flag is overwritten.
        assert!(items[0].is_favorite);
        assert!(!items[1].is_favorite);
        assert!(!items[2].is_favorite);
    }

    #[test]
    fn annotate_against_an_empty_set_clears_everything() {
        let mut items = vec![repo(1, true), repo(2, true)];
        annotate(&mut items, &HashSet::new());
        assert!(items.iter().all(|r| !r.is_favorite));
    }

    #[test]
    fn id_set_collects_unique_ids() {
        let favorites = vec![repo(1, true), repo(2, true), repo(1, true)];
        let ids = id_set(&favorites);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&1) && ids.contains(&2));
    }
}
