//! The three steps of a backup run, and the run itself.
//!
//! Each step gates the next one: the cluster is checked, the repository
//! for the day is provisioned, and then a snapshot is taken into it. The
//! first failure ends the run; nothing is retried or rolled back.
use log::info;
use serde_json::{Map, Value};

use crate::backup::Backup;
use crate::cluster::{Cluster, Reply};
use crate::error::{Error, Result, Stage};

pub mod health;
pub mod repository;
pub mod snapshot;

/// Executes a full backup run against a cluster.
pub async fn run<C: Cluster>(cluster: &C, backup: &Backup) -> Result<()> {
    let status = health::check(cluster, backup).await?;
    let provisioned = repository::ensure(cluster, backup).await?;
    snapshot::create(cluster, backup).await?;

    info!("{}", summary(backup, status.as_deref(), provisioned));

    Ok(())
}

/// Final line describing a completed run.
fn summary(backup: &Backup, health: Option<&str>, provisioned: repository::Provisioned) -> String {
    let repo = match provisioned {
        repository::Provisioned::Existing => "existing",
        repository::Provisioned::Created => "new",
    };

    format!(
        "Snapshot {}/{} completed into {} repo (cluster health {})",
        backup.repo_name(),
        backup.snapshot_name(),
        repo,
        health.unwrap_or("unknown")
    )
}

/// Parses a reply body into a JSON object.
///
/// Anything that isn't a JSON object is malformed for our purposes, as
/// every endpoint we talk to answers with one.
fn parse_object(stage: Stage, reply: &Reply) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(&reply.body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::malformed(stage, "body is not a JSON object")),
        Err(e) => Err(Error::malformed(stage, e.to_string())),
    }
}

/// Lifts a transport failure into a connectivity error for a stage.
fn connectivity(stage: Stage) -> impl FnOnce(crate::error::TransportError) -> Error {
    move |source| Error::Connectivity { stage, source }
}
