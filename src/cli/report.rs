//
//  yacargo
//  cli/report.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Order report commands
//!
//! Reports are built in the background: `generate` returns a task id,
//! `status` shows when the report is ready and `download` saves it.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::api::reports::ReportRequest;
use crate::output::DownloadSummary;
use crate::util::generate_request_id;

use super::GlobalOptions;

/// Generate and download order reports
#[derive(Args, Debug)]
pub struct ReportCommand {
    #[command(subcommand)]
    pub command: ReportSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportSubcommand {
    /// Start generating a report for a period
    Generate(GenerateArgs),

    /// Show the state of a report task
    Status(StatusArgs),

    /// Download a finished report
    Download(DownloadArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// First day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub since: NaiveDate,

    /// Last day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub till: NaiveDate,

    /// Report language (default: the configured 'lang')
    #[arg(long)]
    pub lang: Option<String>,

    /// Idempotency token (generated when omitted)
    #[arg(long)]
    pub idempotency_token: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Task ID returned by 'report generate'
    pub task_id: String,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Report ID from the status URL
    pub report_id: String,

    /// Where to save the report (default: report-<id>.csv)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl ReportCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ReportSubcommand::Generate(args) => generate(args, global).await,
            ReportSubcommand::Status(args) => status(args, global).await,
            ReportSubcommand::Download(args) => download(args, global).await,
        }
    }
}

async fn generate(args: &GenerateArgs, global: &GlobalOptions) -> Result<()> {
    let (client, writer, config) = global.connect()?;
    let token = args.idempotency_token.clone().unwrap_or_else(generate_request_id);
    let mut request = ReportRequest::new(args.since, args.till, token);
    if let Some(lang) = args.lang.clone().or(config.lang) {
        request = request.with_lang(lang);
    }

    let task = client.report_generate(&request).await?;
    writer.write_success(&format!("Report task {} started", task.task_id));
    writer.write(&task)
}

async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let (client, writer, _) = global.connect()?;
    let status = client.report_status(&args.task_id).await?;
    writer.write(&status)
}

async fn download(args: &DownloadArgs, global: &GlobalOptions) -> Result<()> {
    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("report-{}.csv", args.report_id)));
    let (client, writer, _) = global.connect()?;
    let file = client.report_download(&args.report_id, &destination).await?;
    writer.write(&DownloadSummary::from(&file))
}
