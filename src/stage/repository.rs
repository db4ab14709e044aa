//! Idempotent provisioning of the snapshot repository.
//!
//! The lookup and the creation are two independent requests; two runs
//! racing on the same repository name are not guarded against.
use elasticsearch::http::StatusCode;
use log::info;
use serde_json::{json, Value};

use super::{connectivity, parse_object};
use crate::backup::Backup;
use crate::cluster::Cluster;
use crate::error::{Error, Result, Stage};

/// How the repository came to be available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provisioned {
    Existing,
    Created,
}

/// Ensures the repository for this backup exists, creating it if needed.
pub async fn ensure<C: Cluster>(cluster: &C, backup: &Backup) -> Result<Provisioned> {
    let lookup = cluster
        .get_repository(backup.repo_name())
        .await
        .map_err(connectivity(Stage::RepositoryLookup))?;

    match lookup.status {
        StatusCode::OK => {
            info!("Using existing repo {}", backup.repo_name());
            return Ok(Provisioned::Existing);
        }
        StatusCode::NOT_FOUND => (),
        status => {
            return Err(Error::UnexpectedStatus {
                stage: Stage::RepositoryLookup,
                status,
            })
        }
    }

    let reply = cluster
        .create_repository(backup.repo_name(), settings(backup))
        .await
        .map_err(connectivity(Stage::RepositoryCreation))?;

    if reply.status != StatusCode::OK {
        return Err(Error::UnexpectedStatus {
            stage: Stage::RepositoryCreation,
            status: reply.status,
        });
    }

    let body = parse_object(Stage::RepositoryCreation, &reply)?;

    // anything but a literal `true` counts as a rejection
    if body.get("acknowledged").and_then(Value::as_bool) != Some(true) {
        return Err(Error::NotAcknowledged {
            stage: Stage::RepositoryCreation,
        });
    }

    info!(
        "Created repo {} at {}",
        backup.repo_name(),
        backup.location()
    );

    Ok(Provisioned::Created)
}

/// Builds the body declaring a filesystem repository for the backup.
fn settings(backup: &Backup) -> Value {
    json!({
        "type": "fs",
        "settings": {
            "location": backup.location()
        }
    })
}
