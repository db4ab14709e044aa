//! Synchronous snapshot creation.
use elasticsearch::http::StatusCode;
use log::warn;
use serde_json::Value;

use super::{connectivity, parse_object};
use crate::backup::Backup;
use crate::cluster::Cluster;
use crate::error::{Error, Result, Stage};

/// Takes a snapshot into the backup repository and waits for it to finish.
///
/// Only a final state of `SUCCESS` counts; `PARTIAL` and `FAILED` are
/// both treated as the snapshot not being acknowledged.
pub async fn create<C: Cluster>(cluster: &C, backup: &Backup) -> Result<()> {
    let reply = cluster
        .create_snapshot(backup.repo_name(), backup.snapshot_name())
        .await
        .map_err(connectivity(Stage::SnapshotCreation))?;

    if reply.status != StatusCode::OK {
        return Err(Error::UnexpectedStatus {
            stage: Stage::SnapshotCreation,
            status: reply.status,
        });
    }

    let body = parse_object(Stage::SnapshotCreation, &reply)?;

    let snapshot = body
        .get("snapshot")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::malformed(Stage::SnapshotCreation, "missing snapshot object"))?;

    let state = snapshot
        .get("state")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::malformed(Stage::SnapshotCreation, "missing snapshot state"))?;

    if state != "SUCCESS" {
        warn!(
            "Snapshot {} finished in state {}",
            backup.snapshot_name(),
            state
        );
        return Err(Error::NotAcknowledged {
            stage: Stage::SnapshotCreation,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::fake::{reply, FakeCluster};
    use crate::stage::tests::backup;

    #[tokio::test]
    async fn successful_snapshot_passes() {
        let cluster = FakeCluster {
            snapshot: reply(
                200,
                r#"{"snapshot":{"snapshot":"9-05","indices":["logs"],"state":"SUCCESS"}}"#,
            ),
            ..Default::default()
        };

        create(&cluster, &backup()).await.unwrap();
        assert_eq!(
            cluster.requests(),
            vec!["PUT /_snapshot/production-07-03-2024/9-05"]
        );
    }

    #[tokio::test]
    async fn unsuccessful_states_are_not_acknowledged() {
        for state in &["FAILED", "PARTIAL", "IN_PROGRESS"] {
            let cluster = FakeCluster {
                snapshot: reply(200, &format!(r#"{{"snapshot":{{"state":"{}"}}}}"#, state)),
                ..Default::default()
            };

            assert!(matches!(
                create(&cluster, &backup()).await,
                Err(Error::NotAcknowledged {
                    stage: Stage::SnapshotCreation
                })
            ));
        }
    }

    #[tokio::test]
    async fn unexpected_shapes_are_malformed() {
        for body in &[
            r#"{"accepted":true}"#,
            r#"{"snapshot":"SUCCESS"}"#,
            r#"{"snapshot":{"snapshot":"9-05"}}"#,
            r#"{"snapshot":{"state":1}}"#,
            "",
        ] {
            let cluster = FakeCluster {
                snapshot: reply(200, body),
                ..Default::default()
            };

            assert!(matches!(
                create(&cluster, &backup()).await,
                Err(Error::MalformedResponse {
                    stage: Stage::SnapshotCreation,
                    ..
                })
            ));
        }
    }

    #[tokio::test]
    async fn conflicting_snapshot_name_fails() {
        let cluster = FakeCluster {
            snapshot: reply(
                400,
                r#"{"error":{"type":"invalid_snapshot_name_exception"}}"#,
            ),
            ..Default::default()
        };

        assert!(matches!(
            create(&cluster, &backup()).await,
            Err(Error::UnexpectedStatus {
                stage: Stage::SnapshotCreation,
                status: StatusCode::BAD_REQUEST
            })
        ));
    }

    #[tokio::test]
    async fn unreachable_cluster_fails() {
        assert!(matches!(
            create(&FakeCluster::default(), &backup()).await,
            Err(Error::Connectivity {
                stage: Stage::SnapshotCreation,
                ..
            })
        ));
    }
}
