use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Missing route parameter '{param}' for route {route}")]
    MissingRouteParam { route: String, param: String },

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
