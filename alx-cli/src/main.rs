// SPDX-License-Identifier: AGPL-3.0-or-later
//! alx CLI
//!
//! Builds storage proxy requests from command-line options and prints them.

mod commands;

use alx_core::Operation;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "alx")]
#[command(author, version, about = "alx - storage proxy request builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Proxy configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Proxy host, overrides the configuration file
    #[arg(long, global = true)]
    host: Option<String>,

    /// Proxy port, overrides the configuration file
    #[arg(long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported operations
    #[command(alias = "ops")]
    Operations,

    /// Show the options an operation accepts
    Fields {
        /// Operation name, e.g. create-file
        operation: Operation,
    },

    /// Build the request for an operation and print it as JSON
    Request {
        /// Operation name, e.g. create-file
        operation: Operation,

        /// Target path (plain or alluxio:// URI)
        path: String,

        /// Option value as key=value; the value is parsed as JSON, or taken as a string
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Option values from a JSON or TOML file, overridden by --set
        #[arg(short, long, value_name = "FILE")]
        options: Option<PathBuf>,

        /// Destination path (rename)
        #[arg(long)]
        dst: Option<String>,

        /// Under storage URI (mount)
        #[arg(long)]
        src: Option<String>,

        /// Print the body only
        #[arg(long)]
        body_only: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Operations => commands::operations(),
        Commands::Fields { operation } => commands::fields(operation),
        Commands::Request {
            operation,
            path,
            set,
            options,
            dst,
            src,
            body_only,
        } => commands::proxy_config(cli.config.as_deref(), cli.host, cli.port).and_then(|proxy| {
            let args = commands::RequestArgs {
                operation,
                path,
                set,
                options_file: options,
                dst,
                src,
                body_only,
            };
            commands::request(&proxy, &args)
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
