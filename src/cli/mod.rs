//
//  yacargo
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod claim;
mod config;
mod performer;
mod report;

pub use auth::AuthCommand;
pub use claim::ClaimCommand;
pub use config::ConfigCommand;
pub use performer::PerformerCommand;
pub use report::ReportCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::CargoClient;
use crate::auth::{resolve_token, Environment, TOKEN_ENV};
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// Work with Yandex cargo delivery from the command line
#[derive(Parser, Debug)]
#[command(
    name = "yacargo",
    version,
    about = "Work with Yandex cargo delivery from the command line",
    long_about = "yacargo is a CLI for the Yandex cargo delivery B2B API.\n\n\
                  It creates and tracks delivery claims, follows the claims journal \
                  and downloads documents and reports.",
    propagate_version = true,
    after_help = "Use 'yacargo <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// OAuth token; overrides the token stored by 'auth login'
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Use the test host b2b.taxi.tst.yandex.net
    #[arg(long, global = true, env = "YACARGO_TEST_SERVER")]
    pub test_server: bool,

    /// Send requests to another base URL, e.g. a local mock
    #[arg(long, global = true, env = "YACARGO_BASE_URL", hide = true)]
    pub base_url: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Loads the configuration with the command line overrides applied.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if self.test_server {
            config.test_server = true;
        }
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.is_empty()) {
            config.base_url = Some(url.to_string());
        }
        Ok(config)
    }

    pub fn environment(&self, config: &Config) -> Environment {
        Environment::from_test_server(config.test_server)
    }

    /// Builds the API client and the output writer for a command.
    pub fn connect(&self) -> Result<(CargoClient, OutputWriter, Config)> {
        let config = self.config()?;
        let token = resolve_token(self.token.as_deref(), self.environment(&config))?;
        let client = CargoClient::from_config(&config, token)?;
        tracing::debug!("Using {}", client.base_url());
        let writer = self.writer(&config);
        Ok((client, writer, config))
    }

    pub fn writer(&self, config: &Config) -> OutputWriter {
        OutputWriter::new(OutputFormat::resolve(self.json, &config.output))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the OAuth token
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Create, track and manage delivery claims
    #[command(visible_alias = "c")]
    Claim(ClaimCommand),

    /// Locate or call the courier of a claim
    Performer(PerformerCommand),

    /// Generate and download order reports
    Report(ReportCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Show version information
    Version,
}
