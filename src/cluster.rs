//! Access to the snapshot related endpoints of a cluster.
//!
//! The stages only ever see a `Reply` (status and raw body), which keeps
//! the interpretation of responses separate from the client doing the IO.
use elasticsearch::cluster::ClusterHealthParts;
use elasticsearch::http::response::Response;
use elasticsearch::http::StatusCode;
use elasticsearch::snapshot::{
    SnapshotCreateParts, SnapshotCreateRepositoryParts, SnapshotGetRepositoryParts,
};
use elasticsearch::Elasticsearch;
use serde_json::Value;

use crate::error::TransportError;

/// Status and raw body of a cluster response.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    /// Drains a client response into a `Reply`.
    async fn read(response: Response) -> Result<Self, TransportError> {
        let status = response.status_code();
        let body = response.text().await?;
        Ok(Self { status, body })
    }
}

/// The requests a backup run issues against a cluster.
pub trait Cluster {
    /// `GET /_cluster/health`
    async fn health(&self) -> Result<Reply, TransportError>;

    /// `GET /_snapshot/{repo}`
    async fn get_repository(&self, repo: &str) -> Result<Reply, TransportError>;

    /// `PUT /_snapshot/{repo}`
    async fn create_repository(&self, repo: &str, body: Value) -> Result<Reply, TransportError>;

    /// `PUT /_snapshot/{repo}/{snapshot}?wait_for_completion=true`
    async fn create_snapshot(&self, repo: &str, snapshot: &str)
        -> Result<Reply, TransportError>;
}

impl Cluster for Elasticsearch {
    async fn health(&self) -> Result<Reply, TransportError> {
        let response = self.cluster().health(ClusterHealthParts::None).send().await?;
        Reply::read(response).await
    }

    async fn get_repository(&self, repo: &str) -> Result<Reply, TransportError> {
        let response = self
            .snapshot()
            .get_repository(SnapshotGetRepositoryParts::Repository(&[repo]))
            .send()
            .await?;
        Reply::read(response).await
    }

    async fn create_repository(&self, repo: &str, body: Value) -> Result<Reply, TransportError> {
        let response = self
            .snapshot()
            .create_repository(SnapshotCreateRepositoryParts::Repository(repo))
            .body(body)
            .send()
            .await?;
        Reply::read(response).await
    }

    async fn create_snapshot(
        &self,
        repo: &str,
        snapshot: &str,
    ) -> Result<Reply, TransportError> {
        // blocks until the cluster has finished (or failed) the snapshot
        let response = self
            .snapshot()
            .create(SnapshotCreateParts::RepositorySnapshot(repo, snapshot))
            .wait_for_completion(true)
            .send()
            .await?;
        Reply::read(response).await
    }
}

#[cfg(test)]
pub mod fake {
    //! Canned cluster used to drive the stages in tests.
    use super::*;

    use std::sync::Mutex;

    /// A cluster which serves fixed replies and records every request.
    ///
    /// An endpoint without a configured reply behaves like a refused
    /// connection.
    #[derive(Default)]
    pub struct FakeCluster {
        pub health: Option<Reply>,
        pub repository: Option<Reply>,
        pub creation: Option<Reply>,
        pub snapshot: Option<Reply>,
        pub requests: Mutex<Vec<String>>,
        pub bodies: Mutex<Vec<Value>>,
    }

    /// Shorthand for building a reply.
    pub fn reply(status: u16, body: &str) -> Option<Reply> {
        Some(Reply {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_owned(),
        })
    }

    impl FakeCluster {
        /// Every request issued so far, as `METHOD path`.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        /// Bodies sent to the repository creation endpoint.
        pub fn bodies(&self) -> Vec<Value> {
            self.bodies.lock().unwrap().clone()
        }

        fn serve(&self, request: String, reply: &Option<Reply>) -> Result<Reply, TransportError> {
            self.requests.lock().unwrap().push(request);
            reply.clone().ok_or_else(|| "connection refused".into())
        }
    }

    impl Cluster for FakeCluster {
        async fn health(&self) -> Result<Reply, TransportError> {
            self.serve("GET /_cluster/health".to_owned(), &self.health)
        }

        async fn get_repository(&self, repo: &str) -> Result<Reply, TransportError> {
            self.serve(format!("GET /_snapshot/{}", repo), &self.repository)
        }

        async fn create_repository(
            &self,
            repo: &str,
            body: Value,
        ) -> Result<Reply, TransportError> {
            self.bodies.lock().unwrap().push(body);
            self.serve(format!("PUT /_snapshot/{}", repo), &self.creation)
        }

        async fn create_snapshot(
            &self,
            repo: &str,
            snapshot: &str,
        ) -> Result<Reply, TransportError> {
            self.serve(
                format!("PUT /_snapshot/{}/{}", repo, snapshot),
                &self.snapshot,
            )
        }
    }
}
