//! Single-page fetch and paging-key math.

use crate::model::Repo;
use crate::remote::{RemoteError, SearchClient};

/// Number of items requested per page.
pub const PAGE_SIZE: u32 = 20;

/// One loaded page of results, keyed by its 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub items: Vec<Repo>,
    /// Previous page number, absent on the first page.
    pub prev: Option<u32>,
    /// Next page number, absent once the remote returns an empty page.
    pub next: Option<u32>,
}

/// Outcome of a single page fetch. A failure keeps enough context to retry
/// precisely that page later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLoad {
    Loaded(Page),
    Failed { page: u32, error: RemoteError },
}

/// Fetch one page of results for `query`.
///
/// A blank query short-circuits to an empty terminal page without touching
/// the network. An empty `items` list from the remote means end-of-data, so
/// `next` is cleared; it is never treated as an error.
pub async fn fetch_page(client: &SearchClient, query: &str, page: u32) -> PageLoad {
    if query.trim().is_empty() {
        return PageLoad::Loaded(Page {
            number: page,
            items: Vec::new(),
            prev: None,
            next: None,
        });
    }

    match client.search_repos(query, page, PAGE_SIZE).await {
        Ok(response) => {
            let items: Vec<Repo> = response.items.iter().map(Repo::from_remote).collect();
            tracing::debug!(page, count = items.len(), "page loaded");
            PageLoad::Loaded(Page {
                number: page,
                prev: (page > 1).then(|| page - 1),
                next: (!items.is_empty()).then(|| page + 1),
                items,
            })
        }
        Err(error) => {
            tracing::warn!(page, %error, "page load failed");
            PageLoad::Failed { page, error }
        }
    }
}
