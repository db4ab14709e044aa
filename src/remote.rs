//! Utility functions for dealing with remote locations.
//!
//! This module offers functions for interacting with a remote cluster,
//! such as address parsing and client creation.
use anyhow::{anyhow, Result};
use elasticsearch::http::transport::Transport;
use elasticsearch::Elasticsearch;
use url::Url;

/// Creates a new client based on the provided cluster address.
///
/// The client carries no timeout, so a hanging cluster will hang the
/// caller; the scheduler invoking us is expected to deal with that.
pub fn create_client(host: &str) -> Result<Elasticsearch> {
    Ok(Elasticsearch::new(Transport::single_node(host)?))
}

/// Attempts to parse a cluster address out of the CLI arguments.
///
/// We don't test the connection here beyond checking that the provided
/// scheme is HTTP(S) and that a host exists. Query strings, fragments and
/// trailing slashes are removed so the address can be joined with API
/// paths directly.
pub fn parse_cluster(target: &str) -> Result<String> {
    // attempt to parse the resource
    let mut url = Url::parse(target)?;

    // this is invalid, so not entirely sure what to do here
    if !url.has_host() || !url.scheme().starts_with("http") {
        return Err(anyhow!("Invalid cluster address provided: {}", target));
    }

    // the client drops these when joining API paths
    url.set_query(None);
    url.set_fragment(None);

    // assume we have a cluster now, so pass it back
    Ok(url.as_str().trim_end_matches('/').to_owned())
}
