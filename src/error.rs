//! Error types surfaced by a backup run.
//!
//! Every variant is fatal; the caller logs it once and exits non-zero.
use elasticsearch::http::StatusCode;
use thiserror::Error;

use std::fmt;

/// Boxed transport failure, as produced by a `Cluster`.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// The request a failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Health,
    RepositoryLookup,
    RepositoryCreation,
    SnapshotCreation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Health => "cluster health",
            Stage::RepositoryLookup => "repository lookup",
            Stage::RepositoryCreation => "repository creation",
            Stage::SnapshotCreation => "snapshot creation",
        })
    }
}

/// Failures of a backup run.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrong number of arguments on startup.
    #[error("Missing elasticsearch address as argument")]
    Usage,

    /// The cluster could not be reached, or the reply could not be read.
    #[error("Cannot connect to elasticsearch cluster during {stage}: {source}")]
    Connectivity {
        stage: Stage,
        #[source]
        source: TransportError,
    },

    /// The endpoint answered with a status outside the expected set.
    #[error("{stage} endpoint returned status {status}")]
    UnexpectedStatus { stage: Stage, status: StatusCode },

    /// The body was not JSON, or lacked a field of the expected shape.
    #[error("{stage} endpoint returned a malformed response: {reason}")]
    MalformedResponse { stage: Stage, reason: String },

    /// The cluster processed the request but did not confirm it.
    #[error("{stage} not acknowledged")]
    NotAcknowledged { stage: Stage },
}

impl Error {
    /// Shorthand for a `MalformedResponse` with a reason.
    pub fn malformed<R: Into<String>>(stage: Stage, reason: R) -> Self {
        Error::MalformedResponse {
            stage,
            reason: reason.into(),
        }
    }
}

/// Result alias used by the stages.
pub type Result<T> = std::result::Result<T, Error>;
