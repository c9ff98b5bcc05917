//
//  yacargo
//  cli/performer.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Performer commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;

/// Locate or call the courier of a claim
#[derive(Args, Debug)]
pub struct PerformerCommand {
    #[command(subcommand)]
    pub command: PerformerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PerformerSubcommand {
    /// Show the courier's last known position
    Position(ClaimArgs),

    /// Get a forwarded phone number for calling the courier
    Phone(ClaimArgs),
}

#[derive(Args, Debug)]
pub struct ClaimArgs {
    /// Claim ID
    pub claim_id: String,
}

impl PerformerCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, writer, _) = global.connect()?;
        match &self.command {
            PerformerSubcommand::Position(args) => {
                let position = client.performer_position(&args.claim_id).await?;
                writer.write(&position)
            }
            PerformerSubcommand::Phone(args) => {
                let phone = client.voiceforwarding(&args.claim_id).await?;
                writer.write(&phone)
            }
        }
    }
}
