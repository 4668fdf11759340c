//! Household services client core types and utilities

pub mod config;
pub mod error;
pub mod navigation;
pub mod role;
pub mod routes;
pub mod session;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use navigation::{LogNavigator, NavigationIntent, Navigator, NoopNavigator, RecordingNavigator};
pub use role::Role;
pub use routes::{Resolution, RouteEntry, RouteMatch, RouteMeta, RouteTable, View};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, TokenPair};
