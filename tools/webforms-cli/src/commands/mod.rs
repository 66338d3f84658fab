//! Subcommands and their arguments.

pub mod config;
pub mod routes;

use clap::{Args, Subcommand};

/// `webforms routes`; lists routes when no subcommand is given.
#[derive(Args)]
pub struct RoutesArgs {
    #[command(subcommand)]
    pub command: Option<RoutesCommand>,
}

#[derive(Subcommand)]
pub enum RoutesCommand {
    /// List routes in precedence order.
    List,
    /// Show which route a request path selects.
    Match {
        /// Request path, e.g. /Category/Books.
        path: String,
    },
    /// Generate the URL for a named route.
    Url {
        /// Route name.
        name: String,
        /// Route values as key=value pairs.
        values: Vec<String>,
    },
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration.
    Show,
    /// Write a starter webforms.toml in the working directory.
    Init {
        /// Replace an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Parse the config file and build its route table.
    Validate,
}
