//! Live search session: query edits in, snapshots out.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time;

use crate::remote::SearchClient;

use super::page::fetch_page;
use super::state::{SearchFeed, SearchSnapshot};

/// How long a query must sit unchanged before it is searched.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

const COMMAND_BUFFER: usize = 16;

/// Paging commands accepted by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCommand {
    /// Fetch the next page, if one exists.
    LoadMore,
    /// Refetch a page currently in a failed state.
    Retry { page: u32 },
    /// Drop accumulated pages and restart from the page containing the item
    /// at offset `anchor`, or from the first page.
    Refresh { anchor: Option<usize> },
}

/// Handle to a running search feed.
///
/// The session owns a driver task that serializes all feed work: it debounces
/// query edits, abandons in-flight page loads the moment the query changes,
/// and republishes whenever the favorite id set moves. Dropping the session
/// stops the driver.
pub struct SearchSession {
    query_tx: watch::Sender<String>,
    cmd_tx: mpsc::Sender<FeedCommand>,
    snapshot_rx: watch::Receiver<SearchSnapshot>,
    driver: JoinHandle<()>,
}

impl SearchSession {
    pub(crate) fn spawn(
        client: Arc<SearchClient>,
        ids_rx: watch::Receiver<Arc<HashSet<i64>>>,
    ) -> Self {
        let (query_tx, query_rx) = watch::channel(String::new());
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(SearchSnapshot::default());

        let driver = tokio::spawn(
            Driver {
                client,
                feed: SearchFeed::new(String::new()),
                query_rx,
                cmd_rx,
                ids_rx,
                snapshot_tx,
            }
            .run(),
        );

        Self {
            query_tx,
            cmd_tx,
            snapshot_rx,
            driver,
        }
    }

    /// Replace the query text. Setting the same text again is a no-op, so
    /// consumers can forward raw input events without de-duplicating.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.query_tx.send_if_modified(|current| {
            if *current == query {
                false
            } else {
                *current = query;
                true
            }
        });
    }

    /// Request the next page for the current query.
    pub async fn load_more(&self) {
        let _ = self.cmd_tx.send(FeedCommand::LoadMore).await;
    }

    /// Refetch a failed page.
    pub async fn retry(&self, page: u32) {
        let _ = self.cmd_tx.send(FeedCommand::Retry { page }).await;
    }

    /// Restart the feed, optionally anchored at an item offset.
    pub async fn refresh(&self, anchor: Option<usize>) {
        let _ = self.cmd_tx.send(FeedCommand::Refresh { anchor }).await;
    }

    /// Subscribe to snapshots. Receivers always observe the latest state;
    /// intermediate snapshots may be skipped under load.
    pub fn snapshots(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshot_rx.clone()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.snapshot_rx.borrow().clone()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

enum Fetched {
    Load(super::page::PageLoad),
    /// The query changed while the fetch was in flight.
    Requery,
    Closed,
}

struct Driver {
    client: Arc<SearchClient>,
    feed: SearchFeed,
    query_rx: watch::Receiver<String>,
    cmd_rx: mpsc::Receiver<FeedCommand>,
    ids_rx: watch::Receiver<Arc<HashSet<i64>>>,
    snapshot_tx: watch::Sender<SearchSnapshot>,
}

impl Driver {
    async fn run(mut self) {
        self.publish();
        loop {
            tokio::select! {
                changed = self.query_rx.changed() => {
                    if changed.is_err() || !self.restart().await {
                        return;
                    }
                }
                cmd = self.cmd_rx.recv() => {
                    let Some(cmd) = cmd else { return };
                    if !self.handle(cmd).await {
                        return;
                    }
                }
                changed = self.ids_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    self.publish();
                }
            }
        }
    }

    /// The query moved: debounce, reset the feed, and load the first page.
    /// Returns false only when the session handle is gone.
    async fn restart(&mut self) -> bool {
        loop {
            // Each edit restarts the debounce window.
            loop {
                tokio::select! {
                    () = time::sleep(DEBOUNCE) => break,
                    changed = self.query_rx.changed() => {
                        if changed.is_err() {
                            return false;
                        }
                    }
                }
            }

            let query = self.query_rx.borrow_and_update().clone();
            tracing::debug!(%query, "query settled");
            self.feed = SearchFeed::new(query.clone());
            self.publish();

            let Some(page) = self.feed.next_page() else {
                return true;
            };
            match self.fetch_or_requery(&query, page).await {
                Fetched::Load(load) => {
                    self.feed.apply(load);
                    self.publish();
                    return true;
                }
                Fetched::Requery => continue,
                Fetched::Closed => return false,
            }
        }
    }

    async fn handle(&mut self, cmd: FeedCommand) -> bool {
        let page = match cmd {
            FeedCommand::LoadMore => self.feed.next_page(),
            FeedCommand::Retry { page } => self.feed.has_error(page).then_some(page),
            FeedCommand::Refresh { anchor } => {
                self.feed = SearchFeed::new(self.feed.query().to_string());
                self.publish();
                self.feed
                    .next_page()
                    .map(|_| SearchFeed::refresh_start(anchor))
            }
        };
        let Some(page) = page else { return true };

        let query = self.feed.query().to_string();
        match self.fetch_or_requery(&query, page).await {
            Fetched::Load(load) => {
                self.feed.apply(load);
                self.publish();
                true
            }
            Fetched::Requery => self.restart().await,
            Fetched::Closed => false,
        }
    }

    /// Race a page fetch against the next query edit. Losing the race drops
    /// the request; its result would describe a query nobody is looking at.
    async fn fetch_or_requery(&mut self, query: &str, page: u32) -> Fetched {
        tokio::select! {
            load = fetch_page(&self.client, query, page) => Fetched::Load(load),
            changed = self.query_rx.changed() => match changed {
                Ok(()) => Fetched::Requery,
                Err(_) => Fetched::Closed,
            },
        }
    }

    fn publish(&self) {
        let ids = self.ids_rx.borrow().clone();
        self.snapshot_tx.send_replace(self.feed.snapshot(&ids));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::transport::mock::MockTransport;
    use crate::remote::transport::{Headers, Transport, TransportError, TransportResponse};
    use crate::remote::RemoteError;

    use async_trait::async_trait;

    const BASE: &str = "https://api.example.com";

    fn search_url(query: &str, page: u32) -> String {
        format!("{BASE}/search/repositories?q={query}&page={page}&per_page=20")
    }

    fn body(ids: &[i64]) -> Vec<u8> {
        let items: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{
                        "id": {id},
                        "name": "repo{id}",
                        "full_name": "o/repo{id}",
                        "description": null,
                        "stargazers_count": 1,
                        "forks_count": 0,
                        "watchers_count": 1,
                        "open_issues_count": 0,
                        "language": null,
                        "html_url": "https://github.com/o/repo{id}",
                        "owner": {{ "avatar_url": "https://example.com/a.png" }}
                    }}"#
                )
            })
            .collect();
        format!(r#"{{ "items": [{}] }}"#, items.join(",")).into_bytes()
    }

    fn session_over(
        transport: Arc<dyn Transport>,
    ) -> (SearchSession, watch::Sender<Arc<HashSet<i64>>>) {
        let client = Arc::new(SearchClient::new(transport, BASE, None));
        let (ids_tx, ids_rx) = watch::channel(Arc::new(HashSet::new()));
        (SearchSession::spawn(client, ids_rx), ids_tx)
    }

    /// Let the driver absorb pending edits and finish any mocked fetches.
    /// Time is paused in these tests, so this returns immediately.
    async fn settle() {
        time::sleep(Duration::from_secs(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_settles_into_a_single_request() {
        let transport = MockTransport::new();
        transport.push_response(search_url("rip", 1), 200, body(&[1, 2]));
        let (session, _ids) = session_over(Arc::new(transport.clone()));

        session.set_query("r");
        session.set_query("ri");
        session.set_query("rip");
        settle().await;

        assert_eq!(transport.requests(), vec![search_url("rip", 1)]);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.query, "rip");
        assert_eq!(snapshot.items().count(), 2);
        assert_eq!(snapshot.next_page, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn settling_on_a_blank_query_never_hits_the_network() {
        let transport = MockTransport::new();
        let (session, _ids) = session_over(Arc::new(transport.clone()));

        session.set_query("rust");
        session.set_query("");
        settle().await;

        assert!(transport.requests().is_empty());
        assert!(session.snapshot().pages.is_empty());
        assert_eq!(session.snapshot().next_page, None);
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_the_settled_query_does_not_refetch() {
        let transport = MockTransport::new();
        transport.push_response(search_url("rust", 1), 200, body(&[1]));
        let (session, _ids) = session_over(Arc::new(transport.clone()));

        session.set_query("rust");
        settle().await;
        session.set_query("rust");
        settle().await;

        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn load_more_walks_pages_until_end_of_data() {
        let transport = MockTransport::new();
        transport.push_response(search_url("rust", 1), 200, body(&[1, 2]));
        transport.push_response(search_url("rust", 2), 200, body(&[3]));
        transport.push_response(search_url("rust", 3), 200, body(&[]));
        let (session, _ids) = session_over(Arc::new(transport.clone()));

        session.set_query("rust");
        settle().await;
        session.load_more().await;
        settle().await;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.pages.len(), 2);
        assert_eq!(snapshot.next_page, Some(3));

        session.load_more().await;
        settle().await;
        assert_eq!(session.snapshot().next_page, None);

        // End of data: further load-more requests are ignored.
        session.load_more().await;
        settle().await;
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_page_keeps_earlier_pages_and_retry_recovers() {
        let transport = MockTransport::new();
        transport.push_response(search_url("rust", 1), 200, body(&[1, 2]));
        transport.push_response(
            search_url("rust", 2),
            503,
            br#"{"message": "upstream down"}"#.to_vec(),
        );
        let (session, _ids) = session_over(Arc::new(transport.clone()));

        session.set_query("rust");
        settle().await;
        session.load_more().await;
        settle().await;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.items().count(), 2, "page 1 survives the failure");
        assert_eq!(snapshot.failed_pages(), vec![2]);
        assert_eq!(
            snapshot.pages[1].error,
            Some(RemoteError::api(503, "upstream down".to_string()))
        );

        // Progression is blocked while the failure stands.
        session.load_more().await;
        settle().await;
        assert_eq!(transport.requests().len(), 2);

        transport.push_response(search_url("rust", 2), 200, body(&[3]));
        session.retry(2).await;
        settle().await;

        let snapshot = session.snapshot();
        assert!(snapshot.failed_pages().is_empty());
        assert_eq!(snapshot.items().count(), 3);
        assert_eq!(snapshot.next_page, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_restarts_from_the_anchored_page() {
        let transport = MockTransport::new();
        transport.push_response(search_url("rust", 1), 200, body(&[1, 2]));
        transport.push_response(search_url("rust", 2), 200, body(&[3]));
        let (session, _ids) = session_over(Arc::new(transport.clone()));

        session.set_query("rust");
        settle().await;
        session.load_more().await;
        settle().await;
        assert_eq!(session.snapshot().pages.len(), 2);

        // Offset 25 falls on page 2 at 20 items per page.
        transport.push_response(search_url("rust", 2), 200, body(&[30]));
        session.refresh(Some(25)).await;
        settle().await;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.pages.len(), 1);
        assert_eq!(snapshot.pages[0].number, 2);
        assert_eq!(snapshot.pages[0].items[0].id, 30);
        assert_eq!(
            transport.requests().last().map(String::as_str),
            Some(search_url("rust", 2).as_str())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn favorites_change_republishes_annotated_snapshot() {
        let transport = MockTransport::new();
        transport.push_response(search_url("rust", 1), 200, body(&[7, 8]));
        let (session, ids) = session_over(Arc::new(transport.clone()));

        session.set_query("rust");
        settle().await;
        assert!(session.snapshot().items().all(|r| !r.is_favorite));

        ids.send_replace(Arc::new([7].into_iter().collect()));
        settle().await;

        let flags: Vec<(i64, bool)> = session
            .snapshot()
            .items()
            .map(|r| (r.id, r.is_favorite))
            .collect();
        assert_eq!(flags, vec![(7, true), (8, false)]);
        // Re-annotation comes from published state, not a refetch.
        assert_eq!(transport.requests().len(), 1);
    }

    /// Transport that never completes requests for one URL.
    struct HangOn {
        url: String,
        inner: MockTransport,
    }

    #[async_trait]
    impl Transport for HangOn {
        async fn get(
            &self,
            url: &str,
            headers: &Headers,
        ) -> Result<TransportResponse, TransportError> {
            if url == self.url {
                std::future::pending::<()>().await;
            }
            self.inner.get(url, headers).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn query_change_abandons_the_inflight_fetch() {
        let inner = MockTransport::new();
        inner.push_response(search_url("rust", 1), 200, body(&[1]));
        let transport = HangOn {
            url: search_url("slow", 1),
            inner: inner.clone(),
        };
        let (session, _ids) = session_over(Arc::new(transport));

        session.set_query("slow");
        settle().await;
        // The "slow" fetch is hanging; a new query abandons it.
        session.set_query("rust");
        settle().await;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.query, "rust");
        assert_eq!(snapshot.items().count(), 1);
        assert_eq!(inner.requests(), vec![search_url("rust", 1)]);
    }
}
