mod cli;
mod client;
mod commands;
mod config;
mod error;
mod operations;
mod output;
mod responses;
mod session;
mod state;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use client::GitHubClient;
use config::Config;
use error::Result;
use session::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let verbose = cli.verbose;
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "gh-issues", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let client = GitHubClient::new(config.endpoint()?, config.token()?);
            debug!(endpoint = %client.endpoint(), "Using GraphQL endpoint");
            let mut session = Session::new(client);

            match command {
                Commands::Search(args) => {
                    commands::issues::search(&mut session, &config, args).await?;
                }
                Commands::Star(args) => {
                    commands::stars::set_starred(&mut session, &config, args, true).await?;
                }
                Commands::Unstar(args) => {
                    commands::stars::set_starred(&mut session, &config, args, false).await?;
                }
                Commands::React(args) => {
                    commands::reactions::react(&mut session, &config, args).await?;
                }
                Commands::Browse(args) => {
                    commands::browse::run(&mut session, &config, args).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
