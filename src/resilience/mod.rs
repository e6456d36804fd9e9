//! Resilience layer for remote calls.
//!
//! A single mechanism lives here: the [`RetryGateway`], which re-issues a
//! failed call according to a fixed [`RetryPolicy`] and reports each scheduled
//! retry to an optional [`RetryObserver`].

mod retry;

pub use retry::{
    ChannelObserver, RetryGateway, RetryObserver, RetryPolicy, RetryProgress,
    DEFAULT_RETRY_DELAYS_MS,
};
