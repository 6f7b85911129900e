//! HTTP client module
//!
//! Retry, backoff and rate limiting for the page transport. Failures that
//! survive the retry policy surface to the fetch serializer as transport
//! failures.

mod client;
mod rate_limit;

pub use client::HttpClient;
pub use rate_limit::RateLimiter;

#[cfg(test)]
mod tests;
