//! Client entry point.
//!
//! [`RadarClient`] wires configuration, transport, authentication and
//! observability together and hands out lazily built services.

mod builder;
mod client;

pub use builder::RadarClientBuilder;
pub use client::{create_client, create_client_from_env, RadarClient};
