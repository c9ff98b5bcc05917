//
//  yacargo
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for getting, setting, and listing the
//! values stored in the configuration file.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the value of a setting
    Get(GetArgs),

    /// Update a setting
    Set(SetArgs),

    /// Reset a setting to its default
    Unset(GetArgs),

    /// Print all settings
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Setting name
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Setting name
    pub key: String,

    /// New value
    pub value: String,
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown configuration key '{}'. Valid keys: {}",
        key,
        CONFIG_KEYS.join(", ")
    )
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(&args.key, &args.value, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        if !CONFIG_KEYS.contains(&args.key.as_str()) {
            return Err(unknown_key(&args.key));
        }
        let config = Config::load()?;
        let value = config.get(&args.key);
        if global.json {
            let result = serde_json::json!({ "key": args.key, "value": value });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }
        Ok(())
    }

    fn set(&self, key: &str, value: &str, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        if !config.set(key, value)? {
            return Err(unknown_key(key));
        }
        config.save()?;

        if global.json {
            let result = serde_json::json!({ "success": true, "key": key, "value": config.get(key) });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Set {} = {}", style("✓").green(), style(key).cyan(), value);
        }
        Ok(())
    }

    fn unset(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let default = Config::default();
        let value = match args.key.as_str() {
            "test_server" | "output" => default.get(&args.key).unwrap_or_default(),
            "base_url" | "lang" => String::new(),
            _ => return Err(unknown_key(&args.key)),
        };
        self.set(&args.key, &value, global)
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        if global.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        for key in CONFIG_KEYS {
            let value = config.get(key);
            let shown = value.as_deref().unwrap_or("(not set)");
            println!("{} = {}", style(key).cyan(), shown);
        }
        Ok(())
    }
}
