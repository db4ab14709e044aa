//! Cluster health verification.
//!
//! Health is advisory only: a reachable cluster answering with anything
//! other than `green` is logged and the run carries on.
use elasticsearch::http::StatusCode;
use log::{info, warn};
use serde_json::Value;

use super::{connectivity, parse_object};
use crate::backup::Backup;
use crate::cluster::Cluster;
use crate::error::{Error, Result, Stage};

/// Queries the cluster health, returning the reported status (if any).
pub async fn check<C: Cluster>(cluster: &C, backup: &Backup) -> Result<Option<String>> {
    let reply = cluster
        .health()
        .await
        .map_err(connectivity(Stage::Health))?;

    if reply.status != StatusCode::OK {
        return Err(Error::UnexpectedStatus {
            stage: Stage::Health,
            status: reply.status,
        });
    }

    info!("Connected to cluster {}", backup.url());

    let body = parse_object(Stage::Health, &reply)?;
    let status = body.get("status").and_then(Value::as_str);

    if status != Some("green") {
        warn!(
            "Continues with health concern: {}",
            status.unwrap_or("unknown")
        );
    }

    Ok(status.map(str::to_owned))
}
