//! Command line definition.
use clap::{Arg, ArgMatches, Command};

use crate::error::Error;

/// Creates the parser for the command line.
///
/// All command line usage information can be found in the definitions
/// below, and follows the API of the `clap` library.
pub fn build() -> Command<'static> {
    Command::new(env!("CARGO_PKG_NAME"))
        // package metadata from cargo
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        // the address is the only accepted argument
        .disable_help_flag(true)
        .disable_version_flag(true)
        // cluster: +required
        .arg(
            Arg::new("cluster")
                .help("Base address of the Elasticsearch cluster")
                .required(true),
        )
}

/// Fetches the cluster address from parsed arguments.
pub fn cluster(args: &ArgMatches) -> Result<&str, Error> {
    args.value_of("cluster").ok_or(Error::Usage)
}
