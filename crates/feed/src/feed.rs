use std::sync::Arc;

use quill_api::client::Client;
use quill_types::{page::Page, post::Post};
use tracing::{debug, error};

use super::error::Error;

/// Loader state as seen by the "load more" affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    HasMore,
    Exhausted,
}

/// Accumulates pages of posts into a single display list.
///
/// Seeded from the page props produced by the build-time fetch; grows
/// append-only through [`PostFeed::load_more`]. Once the cursor is gone the
/// feed is exhausted for good; only re-seeding produces a fresh one.
///
/// `load_more` takes `&mut self`, so at most one fetch per feed can be in
/// flight; the exclusive borrow is the disabled-while-loading guard.
#[derive(Debug, Clone)]
pub struct PostFeed {
    http: Arc<Client>,
    posts: Vec<Post>,
    next_page: Option<String>,
}

impl PostFeed {
    /// Construct from the initial page supplied at render time.
    pub fn seed(http: Arc<Client>, initial: Page) -> Self {
        PostFeed {
            http,
            posts: initial.results,
            next_page: initial.next_page,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn state(&self) -> FeedState {
        if self.next_page.is_some() {
            FeedState::HasMore
        } else {
            FeedState::Exhausted
        }
    }

    /// Whether the "load more" trigger should be offered.
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Append a page: posts keep their arrival order, the cursor is replaced
    /// by the page's cursor. No de-duplication is done; if the upstream
    /// returns overlapping pages the duplicates are appended as delivered.
    pub fn append_page(&mut self, page: Page) {
        self.next_page = page.next_page;
        self.posts.extend(page.results);
    }

    /// Fetch the next page through the stored cursor and append it, returning
    /// the number of posts appended.
    ///
    /// Without a cursor this is a no-op: no request is issued and nothing
    /// changes. A failed fetch leaves the feed untouched, so the cursor stays
    /// available for a later retry.
    pub async fn load_more(&mut self) -> Result<usize, Error> {
        let Some(cursor) = self.next_page.clone() else {
            debug!("Feed exhausted, nothing to load");
            return Ok(0);
        };
        match self.http.follow_cursor(&cursor).await {
            Ok(page) => {
                let appended = page.results.len();
                self.append_page(page);
                debug!("Appended {} posts, {} total", appended, self.posts.len());
                Ok(appended)
            }
            Err(e) => {
                error!("Error loading next page: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use quill_api::client::Config;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn post(uid: &str) -> Post {
        Post {
            uid: uid.to_string(),
            first_publication_date: "15 mar 2021".to_string(),
            title: uid.to_uppercase(),
            subtitle: "excerpt".to_string(),
            author: "Ana".to_string(),
        }
    }

    fn page(next_page: Option<&str>, uids: &[&str]) -> Page {
        Page {
            next_page: next_page.map(str::to_string),
            results: uids.iter().map(|uid| post(uid)).collect(),
        }
    }

    fn client(addr: SocketAddr) -> Arc<Client> {
        let mut cfg = Config::new(&format!("http://{}/api/v2", addr));
        cfg.max_retries = Some(0);
        cfg.timeout_ms = Some(2_000);
        Arc::new(Client::new(cfg).unwrap())
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    // An unused local port; load_more must never reach for it once the
    // cursor is gone.
    fn dead_client() -> Arc<Client> {
        client("127.0.0.1:9".parse().unwrap())
    }

    #[test]
    fn test_seed_takes_list_and_cursor_from_props() {
        let feed = PostFeed::seed(dead_client(), page(Some("https://x/page2"), &["a", "b"]));
        assert_eq!(feed.posts().len(), 2);
        assert_eq!(feed.state(), FeedState::HasMore);
        assert!(feed.has_more());
    }

    #[test]
    fn test_append_page_preserves_order_and_replaces_cursor() {
        let mut feed = PostFeed::seed(dead_client(), page(Some("https://x/page2"), &["a"]));
        feed.append_page(page(Some("https://x/page3"), &["b", "c"]));
        feed.append_page(page(None, &["d"]));
        let uids: Vec<&str> = feed.posts().iter().map(|p| p.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "b", "c", "d"]);
        assert_eq!(feed.state(), FeedState::Exhausted);
    }

    #[test]
    fn test_append_page_keeps_duplicates() {
        let mut feed = PostFeed::seed(dead_client(), page(Some("https://x/page2"), &["a"]));
        feed.append_page(page(None, &["a"]));
        assert_eq!(feed.posts().len(), 2);
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_load_more_without_cursor_is_a_no_op() {
        let mut feed = PostFeed::seed(dead_client(), page(None, &["a"]));
        assert_eq!(feed.load_more().await.unwrap(), 0);
        assert_eq!(feed.posts().len(), 1);
        assert_eq!(feed.state(), FeedState::Exhausted);
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_load_more_appends_and_exhausts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = hits.clone();
        let app = Router::new().route(
            "/page2",
            get(move || {
                let hits = handler_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(serde_json::json!({
                        "next_page": null,
                        "results": [{
                            "uid": "post-b",
                            "last_publication_date": "2021-03-15T19:25:28+0000",
                            "data": {
                                "title": [{ "type": "heading1", "text": "Post B" }],
                                "author": [{ "type": "paragraph", "text": "Ana" }],
                                "content": [{ "type": "paragraph", "text": "Second post." }]
                            }
                        }]
                    }))
                }
            }),
        );
        let addr = serve(app).await;

        let cursor = format!("http://{}/page2", addr);
        let mut feed = PostFeed::seed(client(addr), page(Some(&cursor), &["post-a"]));

        assert_eq!(feed.load_more().await.unwrap(), 1);
        let uids: Vec<&str> = feed.posts().iter().map(|p| p.uid.as_str()).collect();
        assert_eq!(uids, vec!["post-a", "post-b"]);
        assert_eq!(feed.posts()[1].title, "Post B");
        assert_eq!(feed.state(), FeedState::Exhausted);
        assert!(!feed.has_more());

        // Exhausted is terminal: further calls are no-ops and issue no request.
        assert_eq!(feed.load_more().await.unwrap(), 0);
        assert_eq!(feed.posts().len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_failed_load_leaves_feed_unchanged() {
        let app = Router::new().route(
            "/page2",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let addr = serve(app).await;

        let cursor = format!("http://{}/page2", addr);
        let mut feed = PostFeed::seed(client(addr), page(Some(&cursor), &["a", "b"]));

        let before_posts: Vec<Post> = feed.posts().to_vec();
        feed.load_more().await.unwrap_err();
        assert_eq!(feed.posts(), before_posts.as_slice());
        assert_eq!(feed.state(), FeedState::HasMore);
        assert!(feed.has_more());

        // The cursor survived, so the caller may retry.
        feed.load_more().await.unwrap_err();
        assert_eq!(feed.posts().len(), 2);
    }
}
