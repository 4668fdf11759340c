//! Household services HTTP client
//!
//! A single point of egress towards the marketplace backend. Every call goes
//! through a request interceptor that attaches the bearer token of the
//! target role, and a response interceptor that refreshes an expired token
//! once or sends the user back to the role's login view.

#[macro_use]
extern crate tracing;

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, PendingRequest, Scope, error::ClientError};
