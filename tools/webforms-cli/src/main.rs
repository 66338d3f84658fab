//! `webforms`: inspect the route table and engine configuration of a
//! WebForms application without running it.
//!
//! ```text
//! webforms routes list
//! webforms routes match /Category/Books
//! webforms routes url ProductsByCategoryRoute categoryName=Books
//! webforms config show|init|validate
//! ```

mod commands;
mod config;
mod context;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{ConfigArgs, ConfigCommand, RoutesArgs};
use context::Context;
use output::Output;

#[derive(Parser)]
#[command(name = "webforms", author, version, about, propagate_version = true)]
struct Cli {
    /// Print diagnostic detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Path to webforms.toml (discovered upward from the working directory by default)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List, match and generate routes
    Routes(RoutesArgs),

    /// Show, create or check the configuration file
    Config(ConfigArgs),
}

impl Command {
    /// Whether the existing config file is parsed before the command runs.
    /// `config init` never reads it.
    fn reads_config(&self) -> bool {
        !matches!(
            self,
            Command::Config(ConfigArgs {
                command: ConfigCommand::Init { .. }
            })
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose, cli.json);

    let ctx = if cli.command.reads_config() {
        Context::load(cli.config.as_deref(), output.clone())
    } else {
        Context::without_config(output.clone())
    };

    let result = ctx.and_then(|ctx| {
        match cli.command {
            Command::Routes(args) => commands::routes::run(args, &ctx),
            Command::Config(args) => commands::config::run(args, &ctx),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_only_init_skips_config_loading() {
        assert!(!command(&["webforms", "config", "init", "--force"]).reads_config());
        assert!(command(&["webforms", "config", "validate"]).reads_config());
        assert!(command(&["webforms", "routes", "list"]).reads_config());
    }
}
