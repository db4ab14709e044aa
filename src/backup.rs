//! Naming configuration for a single backup run.
use chrono::{NaiveDateTime, Timelike};

/// Filesystem segment the repositories are rooted under on each node.
pub const REPO_PATH: &str = "snapshots";

/// Everything a run needs to know about where to put a snapshot.
///
/// Names are derived from the clock handed to `Backup::at`, so the same
/// repository is reused for every run within a calendar day while each
/// snapshot is keyed by hour and minute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backup {
    url: String,
    repo_name: String,
    repo_path: String,
    snapshot_name: String,
}

impl Backup {
    /// Constructs the configuration for a cluster at a point in time.
    pub fn at(url: String, now: &NaiveDateTime) -> Self {
        Self {
            url,
            repo_name: now.format("production-%d-%m-%Y").to_string(),
            repo_path: REPO_PATH.to_owned(),
            snapshot_name: format!("{}-{:02}", now.hour(), now.minute()),
        }
    }

    /// Base address of the target cluster.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    pub fn snapshot_name(&self) -> &str {
        &self.snapshot_name
    }

    /// Location of the repository, relative to the nodes' `path.repo`.
    pub fn location(&self) -> String {
        format!("{}/{}", self.repo_path(), self.repo_name())
    }
}
