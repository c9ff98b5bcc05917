//
//  yacargo
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands
//!
//! Tokens are issued in the Yandex business account and are stored per
//! environment in the system keyring.

use std::io::BufRead;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::auth::{mask_token, KeyringStore, TOKEN_ENV};

use super::GlobalOptions;

/// Manage the OAuth token
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a token in the system keyring
    Login,

    /// Remove the stored token
    Logout,

    /// Show whether a token is available
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the token in full
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login => login(global),
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status(args) => status(args, global),
        }
    }
}

/// Reads the token from `--token`, or from the first line of stdin.
fn read_token(global: &GlobalOptions) -> Result<String> {
    if let Some(token) = global.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }
    eprintln!("Paste your OAuth token:");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let token = line.trim();
    if token.is_empty() {
        bail!("No token provided");
    }
    Ok(token.to_string())
}

fn login(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let environment = global.environment(&config);
    let token = read_token(global)?;

    KeyringStore::new().store(environment, &token)?;
    global
        .writer(&config)
        .write_success(&format!("Token for the {} environment saved", environment));
    Ok(())
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let environment = global.environment(&config);

    KeyringStore::new().delete(environment)?;
    global
        .writer(&config)
        .write_success(&format!("Token for the {} environment removed", environment));
    Ok(())
}

fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let environment = global.environment(&config);

    let (token, source) = match global.token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => (Some(token.to_string()), "flag or environment"),
        None => (KeyringStore::new().get(environment)?, "keyring"),
    };
    let shown = token
        .as_deref()
        .map(|t| if args.show_token { t.to_string() } else { mask_token(t) });

    if global.json {
        let result = json!({
            "environment": environment.as_str(),
            "authenticated": token.is_some(),
            "source": token.as_ref().map(|_| source),
            "token": shown,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match shown {
        Some(shown) => {
            println!("Environment: {}", environment);
            println!("Token ({}): {}", source, shown);
        }
        None => {
            println!("Not logged in to the {} environment", environment);
            println!("Run 'yacargo auth login' or set {}", TOKEN_ENV);
        }
    }
    Ok(())
}
