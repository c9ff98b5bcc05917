//
//  yacargo
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use yacargo::api::ApiError;
use yacargo::cli::{Cli, Commands};
use yacargo::exit_codes;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("YACARGO_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Maps API failures to the documented exit codes
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Param(_)) => exit_codes::USAGE,
        Some(ApiError::Unauthorized { .. }) => exit_codes::AUTH_ERROR,
        Some(ApiError::Api { status: 404, .. }) => exit_codes::NOT_FOUND,
        Some(ApiError::Api { status: 409, .. }) => exit_codes::CONFLICT,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Claim(cmd) => cmd.run(&cli.global).await,
        Commands::Performer(cmd) => cmd.run(&cli.global).await,
        Commands::Report(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("yacargo version {}", yacargo::VERSION);
            Ok(())
        }
    }
}
