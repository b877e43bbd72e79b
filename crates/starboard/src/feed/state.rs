//! Accumulated feed state and the snapshots published to consumers.

use std::collections::{BTreeMap, HashSet};

use crate::model::Repo;
use crate::reconcile;
use crate::remote::RemoteError;

use super::page::{Page, PageLoad, PAGE_SIZE};

/// Pages and per-page errors accumulated for one query.
///
/// Loaded pages and failed pages live in separate maps keyed by page number,
/// so one page failing never discards content already on screen.
pub struct SearchFeed {
    query: String,
    pages: BTreeMap<u32, Page>,
    errors: BTreeMap<u32, RemoteError>,
}

impl SearchFeed {
    pub fn new(query: String) -> Self {
        Self {
            query,
            pages: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Fold a page load outcome into the feed. A successful load clears any
    /// earlier failure recorded for the same page.
    pub fn apply(&mut self, load: PageLoad) {
        match load {
            PageLoad::Loaded(page) => {
                self.errors.remove(&page.number);
                self.pages.insert(page.number, page);
            }
            PageLoad::Failed { page, error } => {
                self.errors.insert(page, error);
            }
        }
    }

    /// The next page to fetch, or `None` when there is nothing to do.
    ///
    /// Progression stops at end-of-data and pauses while any page is in a
    /// failed state; a retry has to clear the failure first.
    pub fn next_page(&self) -> Option<u32> {
        if self.is_blank() || !self.errors.is_empty() {
            return None;
        }
        match self.pages.last_key_value() {
            None => Some(1),
            Some((_, page)) => page.next,
        }
    }

    pub fn has_error(&self, page: u32) -> bool {
        self.errors.contains_key(&page)
    }

    /// Starting page for a refresh anchored at item offset `anchor`.
    pub fn refresh_start(anchor: Option<usize>) -> u32 {
        anchor.map_or(1, |a| a as u32 / PAGE_SIZE + 1)
    }

    /// Render the current state as a snapshot, annotating every item with
    /// live favorite membership.
    pub fn snapshot(&self, favorite_ids: &HashSet<i64>) -> SearchSnapshot {
        let numbers: std::collections::BTreeSet<u32> = self
            .pages
            .keys()
            .chain(self.errors.keys())
            .copied()
            .collect();

        let pages = numbers
            .into_iter()
            .map(|number| {
                let mut items = self
                    .pages
                    .get(&number)
                    .map(|p| p.items.clone())
                    .unwrap_or_default();
                reconcile::annotate(&mut items, favorite_ids);
                PageView {
                    number,
                    items,
                    error: self.errors.get(&number).cloned(),
                }
            })
            .collect();

        SearchSnapshot {
            query: self.query.clone(),
            pages,
            next_page: self.next_page(),
        }
    }
}

/// One page as seen by consumers: its items, or the error that replaced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub number: u32,
    pub items: Vec<Repo>,
    pub error: Option<RemoteError>,
}

/// Immutable view of the feed published after every state change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchSnapshot {
    /// The settled query this snapshot answers.
    pub query: String,
    /// Loaded and failed pages in page-number order.
    pub pages: Vec<PageView>,
    /// Next fetchable page, `None` at end-of-data or while a page is failed.
    pub next_page: Option<u32>,
}

impl SearchSnapshot {
    /// All loaded items across pages, in page order.
    pub fn items(&self) -> impl Iterator<Item = &Repo> {
        self.pages.iter().flat_map(|p| p.items.iter())
    }

    /// Page numbers currently in a failed state.
    pub fn failed_pages(&self) -> Vec<u32> {
        self.pages
            .iter()
            .filter(|p| p.error.is_some())
            .map(|p| p.number)
            .collect()
    }
}
