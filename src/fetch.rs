//! Homepage fetching with a bounded retry policy.
//!
//! # Architecture
//!
//! - [`Fetch`]: Core trait defining an async "URL in, HTML out" operation
//! - [`HttpFetcher`]: `reqwest` implementation with a browser User-Agent and timeout
//! - [`RetryFetch`]: Decorator that retries any `Fetch` implementation
//!
//! # Retry Strategy
//!
//! - `max_attempts` total attempts (3 by default)
//! - A fixed delay between attempts, never after the last one
//! - Non-200 responses count as failed attempts
//!
//! [`fetch_page`] is the entry point used by the collector: it never returns
//! an error, exhausting the policy yields `None` so the other source can
//! still be processed.

use crate::error::FetchError;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Trait for retrieving the raw HTML of a page.
///
/// Implementors must be stateless across calls.
pub trait Fetch {
    /// Fetch `url` once and return its body.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<T: Fetch> Fetch for &T {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

/// How many times to try a fetch and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Wrapper that adds retry-with-delay to any [`Fetch`] implementation.
pub struct RetryFetch<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> RetryFetch<T>
where
    T: Fetch,
{
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_attempts", &self.policy.max_attempts)
            .field("delay", &self.policy.delay)
            .finish()
    }
}

impl<T> Fetch for RetryFetch<T>
where
    T: Fetch,
{
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let total_t0 = Instant::now();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let attempt_t0 = Instant::now();
            match self.inner.fetch(url).await {
                Ok(body) => {
                    debug!(attempt, bytes = body.len(), "fetch succeeded");
                    return Ok(body);
                }
                Err(e) => {
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt >= self.policy.max_attempts {
                        error!(
                            attempt,
                            max = self.policy.max_attempts,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "fetch exhausted retries"
                        );
                        return Err(e);
                    }

                    warn!(
                        attempt,
                        max = self.policy.max_attempts,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u64,
                        delay = ?self.policy.delay,
                        error = %e,
                        "fetch attempt failed; retrying"
                    );
                    sleep(self.policy.delay).await;
                }
            }
        }
    }
}

/// [`Fetch`] implementation over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client that identifies as a desktop browser.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Fetch a page under `policy`, returning `None` once every attempt failed.
#[instrument(level = "info", skip(fetcher, policy))]
pub async fn fetch_page<F: Fetch>(fetcher: F, url: &str, policy: RetryPolicy) -> Option<String> {
    let t0 = Instant::now();
    let retrying = RetryFetch::new(fetcher, policy);
    match retrying.fetch(url).await {
        Ok(body) => {
            info!(
                elapsed_ms_total = t0.elapsed().as_millis() as u64,
                bytes = body.len(),
                "Fetched page"
            );
            Some(body)
        }
        Err(e) => {
            warn!(error = %e, "Giving up on page");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// In-memory fetcher serving fixed pages; unknown URLs answer 404.
    #[derive(Debug, Default)]
    pub(crate) struct StaticFetcher {
        pages: HashMap<String, String>,
    }

    impl StaticFetcher {
        pub(crate) fn new<'a>(pages: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
            }
        }
    }

    impl Fetch for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.pages.get(url).cloned().ok_or(FetchError::Status(404))
        }
    }

    /// In-memory fetcher that fails a fixed number of times before answering.
    #[derive(Debug)]
    pub(crate) struct FlakyFetcher {
        failures_before_success: u32,
        body: String,
        pub(crate) calls: AtomicU32,
    }

    impl FlakyFetcher {
        pub(crate) fn new(failures_before_success: u32, body: &str) -> Self {
            Self {
                failures_before_success,
                body: body.to_string(),
                calls: AtomicU32::new(0),
            }
        }

        pub(crate) fn always_failing() -> Self {
            Self::new(u32::MAX, "")
        }
    }

    impl Fetch for FlakyFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                Err(FetchError::Status(503))
            } else {
                Ok(self.body.clone())
            }
        }
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt_after_waiting() {
        let fetcher = FlakyFetcher::new(2, "<html>ok</html>");
        let delay = Duration::from_millis(20);
        let t0 = Instant::now();

        let body = fetch_page(&fetcher, "http://example.test", RetryPolicy::new(3, delay)).await;

        assert_eq!(body.as_deref(), Some("<html>ok</html>"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
        assert!(t0.elapsed() >= delay * 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let fetcher = FlakyFetcher::always_failing();
        let body = fetch_page(
            &fetcher,
            "http://example.test",
            RetryPolicy::new(3, Duration::from_millis(1)),
        )
        .await;

        assert!(body.is_none());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_first_success_does_not_wait() {
        let fetcher = FlakyFetcher::new(0, "body");
        let t0 = Instant::now();
        let body = fetch_page(
            &fetcher,
            "http://example.test",
            RetryPolicy::new(3, Duration::from_secs(5)),
        )
        .await;

        assert_eq!(body.as_deref(), Some("body"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(t0.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_retry_fetch_surfaces_last_error() {
        let fetcher = FlakyFetcher::always_failing();
        let retrying = RetryFetch::new(&fetcher, RetryPolicy::new(2, Duration::ZERO));

        let err = retrying.fetch("http://example.test").await.unwrap_err();

        assert!(matches!(err, FetchError::Status(503)));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_zero_attempts_means_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    /// Answer one connection per response, in order, and hand back the raw
    /// request heads (lowercased).
    async fn serve(
        responses: Vec<(&'static str, &'static str)>,
    ) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&chunk[..n]);
                }
                requests.push(String::from_utf8_lossy(&head).to_lowercase());

                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            requests
        });

        (url, server)
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_non_200_and_sends_browser_ua() {
        let (url, server) = serve(vec![
            ("503 Service Unavailable", "busy"),
            ("200 OK", "<html>ok</html>"),
        ])
        .await;
        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(5)).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
        assert_eq!(fetcher.fetch(&url).await.unwrap(), "<html>ok</html>");

        let requests = server.await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.contains("user-agent: mozilla/5.0")));
    }

    #[tokio::test]
    async fn test_http_error_status_is_retried() {
        let (url, server) = serve(vec![
            ("500 Internal Server Error", ""),
            ("200 OK", "<html>second time</html>"),
        ])
        .await;
        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(5)).unwrap();

        let body = fetch_page(&fetcher, &url, RetryPolicy::new(3, Duration::from_millis(1))).await;

        assert_eq!(body.as_deref(), Some("<html>second time</html>"));
        assert_eq!(server.await.unwrap().len(), 2);
    }
}
