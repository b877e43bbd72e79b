//! Incremental search feed.
//!
//! A [`SearchSession`] owns a background driver task that turns a stream of
//! query edits and paging commands into a stream of [`SearchSnapshot`]s.
//! Queries are debounced, in-flight page loads are abandoned when the query
//! changes, and a failed page blocks further progression until retried
//! without discarding the pages already loaded.

mod page;
mod session;
mod state;

pub(crate) use page::fetch_page;
pub use page::{Page, PageLoad, PAGE_SIZE};
pub use session::{FeedCommand, SearchSession, DEBOUNCE};
pub use state::{PageView, SearchSnapshot};
