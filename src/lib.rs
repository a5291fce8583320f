//! `retry-fetch` performs a JSON HTTP request and retries failed attempts
//! with exponential backoff.
//!
//! Entry points:
//! - [`fetch_with_retry`] for one-off calls with call-site retry parameters
//! - [`RetryingFetcher::fetch`] and [`RetryingFetcher::fetch_as`] for a
//!   reusable client with a fixed [`RetryPolicy`]
//!
//! ```no_run
//! # async fn run() -> retry_fetch::Result<()> {
//! use retry_fetch::{fetch_with_retry, RequestOptions};
//!
//! let portfolio = fetch_with_retry(
//!     "https://example.com/api/portfolio",
//!     &RequestOptions::get(),
//!     2,
//!     200,
//! )
//! .await?;
//! println!("{portfolio}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod options;
mod request;
mod timer;

pub use client::{fetch_with_retry, RetryingFetcher};
pub use error::FetchError;
pub use options::RetryPolicy;
pub use request::{Credentials, RequestBody, RequestOptions};

pub type Result<T> = std::result::Result<T, FetchError>;
