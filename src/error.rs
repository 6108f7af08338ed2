//! Error types shared across the provider, lookup and battle layers.

use thiserror::Error;

/// Failure talking to the remote creature-data provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider answered 404 for the requested resource.
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    /// Any other non-success status.
    #[error("provider returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// Connection failure or timeout.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The body was not the JSON we expected.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ProviderError {
    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    pub fn transport(url: impl ToString, message: impl ToString) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Outcome of a by-name lookup that did not yield a creature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("search query is required")]
    EmptyQuery,

    #[error("Pokemon \"{0}\" not found")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("{0} has fainted and cannot act")]
    Fainted(String),

    #[error("the battle is already over")]
    BattleOver,

    #[error("unknown action: {0}")]
    UnknownAction(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
