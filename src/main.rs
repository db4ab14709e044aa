//! A one-shot tool for taking snapshots of an Elasticsearch cluster.
//!
//! Each invocation checks the cluster health, makes sure the filesystem
//! repository for the current day exists and then takes a snapshot into
//! it, waiting for the cluster to finish. Scheduling, retention and retry
//! are left to whatever runs this tool (typically a periodic job).
//!
//! Any failure is logged once and ends the process with a non-zero code.
use chrono::Local;
use log::error;
use tokio::runtime::Builder;

use std::process;

mod backup;
mod cli;
mod cluster;
mod error;
mod logging;
mod remote;
mod stage;

use backup::Backup;
use error::Error;

fn main() {
    logging::init();

    // anything but a single address is a usage error in our own format
    let args = match cli::build().try_get_matches() {
        Ok(args) => args,
        Err(_) => fail(Error::Usage),
    };

    if let Err(e) = execute(&args) {
        fail(e);
    }
}

/// Executes a backup run for the parsed arguments.
fn execute(args: &clap::ArgMatches) -> anyhow::Result<()> {
    let host = remote::parse_cluster(cli::cluster(args)?)?;
    let client = remote::create_client(&host)?;

    // names are derived from the clock once, up front
    let backup = Backup::at(host, &Local::now().naive_local());

    // We're entirely IO bound and sequential, so a Runtime on the current
    // thread is all we need to drive the client.
    let rt = Builder::new_current_thread().enable_all().build()?;

    rt.block_on(stage::run(&client, &backup))?;

    Ok(())
}

/// Logs a fatal error and terminates the process.
fn fail<E: std::fmt::Display>(err: E) -> ! {
    error!("{}", err);
    process::exit(1)
}
