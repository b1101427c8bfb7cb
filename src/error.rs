use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token found. Set GITHUB_TOKEN env var or add token to ~/.config/gh-issues/config.toml"
    )]
    MissingToken,

    #[error("Invalid endpoint URL {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid repository path '{0}', expected owner/name")]
    InvalidPath(String),

    #[error("No more issues to load")]
    NoMorePages,

    #[error("No repository loaded, search for one first")]
    NoRepository,

    #[error("Repository {actual} is not the one in view ({expected})")]
    RepositoryMismatch { expected: String, actual: String },

    #[error("Issue not found: {0}")]
    IssueNotFound(String),
}

pub type Result<T> = std::result::Result<T, GhError>;
