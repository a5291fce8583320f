use std::fmt;

use serde::de::DeserializeOwned;

use crate::{timer::sleep, FetchError, RequestOptions, Result, RetryPolicy};

/// Fetches `url` and decodes the JSON body, retrying failed attempts.
///
/// Performs at most `retries + 1` attempts. The wait before retry `i` is
/// `backoff_ms * 2^(i-1)` milliseconds. Transport failures, non-2xx
/// statuses and undecodable bodies are all retried; the error of the last
/// attempt is returned.
///
/// Uses a shared default client on native targets. Build a [`RetryingFetcher`] to supply
/// your own `reqwest::Client`.
pub async fn fetch_with_retry(
    url: &str,
    options: &RequestOptions,
    retries: u32,
    backoff_ms: u64,
) -> Result<serde_json::Value> {
    RetryingFetcher::with_client(default_client())
        .with_policy(RetryPolicy::new(retries, backoff_ms))
        .fetch(url, options)
        .await
}

#[cfg(not(target_arch = "wasm32"))]
fn default_client() -> reqwest::Client {
    static CLIENT: std::sync::OnceLock<reqwest::Client> = std::sync::OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new).clone()
}

// The browser owns connection reuse; a fresh client per call is free.
#[cfg(target_arch = "wasm32")]
fn default_client() -> reqwest::Client {
    reqwest::Client::new()
}

#[derive(Clone)]
/// HTTP client that retries JSON requests according to a [`RetryPolicy`].
///
/// Cloning is cheap; clones share the connection pool.
pub struct RetryingFetcher {
    http: reqwest::Client,
    policy: RetryPolicy,
}

impl fmt::Debug for RetryingFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingFetcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Default for RetryingFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryingFetcher {
    /// Creates a fetcher with a fresh client and the default policy
    /// (2 retries, 200 ms base backoff).
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Wraps an existing client, e.g. one with custom TLS or proxy settings.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches `url` and returns the decoded JSON value.
    pub async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<serde_json::Value> {
        self.fetch_as(url, options).await
    }

    /// Fetches `url` and decodes the body into `T`.
    ///
    /// A body that does not decode into `T` fails the attempt and is retried
    /// like any other failure.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        let policy = self.policy;
        let mut result = self.attempt(url, options).await;

        for retry in 1..=policy.retries {
            let err = match result {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            self.wait_before_retry(retry, &err).await;
            result = self.attempt(url, options).await;
        }

        result.inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                url,
                attempts = policy.max_attempts(),
                error = %_err,
                "request failed after final attempt"
            );
        })
    }

    async fn attempt<T: DeserializeOwned>(&self, url: &str, options: &RequestOptions) -> Result<T> {
        let response = options
            .apply(self.http.request(options.method.clone(), url))
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // The status is the failure; an unreadable body does not change that.
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(FetchError::Transport)?;
        serde_json::from_str::<T>(&body)
            .map_err(|err| {
                FetchError::Decode(format!(
                    "invalid JSON response: {err}; body: {}",
                    body_preview(&body)
                ))
            })
    }

    /// Waits `backoff_ms * 2^(retry-1)` before retry number `retry`.
    async fn wait_before_retry(&self, retry: u32, _err: &FetchError) {
        let delay = self.policy.delay_for(retry);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            retry,
            delay_ms = delay.as_millis() as u64,
            error = %_err,
            "retrying request"
        );

        sleep(delay).await;
    }
}

const BODY_PREVIEW_CHARS: usize = 200;

/// First [`BODY_PREVIEW_CHARS`] characters of `body`, marked when cut.
fn body_preview(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &body[..cut], body.len()),
        None => body.to_owned(),
    }
}
