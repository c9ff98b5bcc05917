//
//  yacargo
//  cli/claim.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Claim commands
//!
//! A claim is a delivery order. It is created from a JSON file holding the
//! claim fields, priced by the server, then accepted by the client and
//! followed through its statuses until delivery or cancellation.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::claims::{Claim, ClaimCreateRequest, ClaimDraft, ClaimEditRequest, ClaimSearchRequest};
use crate::api::common::{CancelState, ClaimStatus, DocumentType, SearchState};
use crate::output::{DownloadSummary, OutputWriter};
use crate::util::generate_request_id;

use super::GlobalOptions;

/// Poll interval of 'journal --follow' when the server sends no hint.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Create, track and manage delivery claims
#[derive(Args, Debug)]
pub struct ClaimCommand {
    #[command(subcommand)]
    pub command: ClaimSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ClaimSubcommand {
    /// Create a claim from a JSON file
    Create(CreateArgs),

    /// Replace the contents of a claim that is not yet accepted
    Edit(EditArgs),

    /// Show a claim
    #[command(visible_alias = "view")]
    Info(InfoArgs),

    /// Search claims
    #[command(visible_alias = "ls")]
    Search(SearchArgs),

    /// List claims that are still in progress
    Active(PageArgs),

    /// Show several claims at once
    Bulk(BulkArgs),

    /// Confirm a priced claim
    Accept(VersionedArgs),

    /// Cancel a claim
    Cancel(CancelArgs),

    /// Download a claim document
    Document(DocumentArgs),

    /// Show the confirmation code of the current point
    Code(InfoArgs),

    /// Show claim changes since a cursor
    Journal(JournalArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// JSON file with the claim fields, '-' for stdin
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Idempotency key, at most 32 characters (generated when omitted)
    #[arg(long)]
    pub request_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Claim ID
    pub claim_id: String,

    /// Version the edit is based on
    #[arg(long, short = 'v')]
    pub version: i64,

    /// JSON file with the claim fields, '-' for stdin
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Claim ID
    pub claim_id: String,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Number of claims to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Page size, 1 to 1000
    #[arg(long, short = 'L', default_value_t = 100)]
    pub limit: u32,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Claim ID
    #[arg(long)]
    pub claim_id: Option<String>,

    /// Phone of any contact on the route
    #[arg(long)]
    pub phone: Option<String>,

    /// Claim status, e.g. performer_found
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Created at or after (RFC 3339)
    #[arg(long)]
    pub created_from: Option<String>,

    /// Created before (RFC 3339)
    #[arg(long)]
    pub created_to: Option<String>,

    /// Only claims in this state (active)
    #[arg(long)]
    pub state: Option<String>,

    /// Due at or after (RFC 3339)
    #[arg(long)]
    pub due_from: Option<String>,

    /// Due before (RFC 3339)
    #[arg(long)]
    pub due_to: Option<String>,

    /// Client order ID of a route point
    #[arg(long)]
    pub external_order_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// Claim IDs, up to 1000
    #[arg(required = true)]
    pub claim_ids: Vec<String>,
}

#[derive(Args, Debug)]
pub struct VersionedArgs {
    /// Claim ID
    pub claim_id: String,

    /// Current claim version
    #[arg(long, short = 'v')]
    pub version: i64,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    #[command(flatten)]
    pub claim: VersionedArgs,

    /// Cancellation kind the claim currently allows: free or paid
    #[arg(long)]
    pub state: String,
}

#[derive(Args, Debug)]
pub struct DocumentArgs {
    #[command(flatten)]
    pub claim: VersionedArgs,

    /// Claim status the document is requested for
    #[arg(long, short = 's')]
    pub status: String,

    /// Document type
    #[arg(long = "type", default_value = "act")]
    pub document_type: String,

    /// Where to save the document (default: <claim-id>-<type>.pdf)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct JournalArgs {
    /// Cursor returned by the previous call
    #[arg(long)]
    pub cursor: Option<String>,

    /// Keep polling, waiting as long as the server advises between pages
    #[arg(long)]
    pub follow: bool,
}

impl ClaimCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ClaimSubcommand::Create(args) => create(args, global).await,
            ClaimSubcommand::Edit(args) => edit(args, global).await,
            ClaimSubcommand::Info(args) => info(args, global).await,
            ClaimSubcommand::Search(args) => search(args, global).await,
            ClaimSubcommand::Active(args) => active(args, global).await,
            ClaimSubcommand::Bulk(args) => bulk(args, global).await,
            ClaimSubcommand::Accept(args) => accept(args, global).await,
            ClaimSubcommand::Cancel(args) => cancel(args, global).await,
            ClaimSubcommand::Document(args) => document(args, global).await,
            ClaimSubcommand::Code(args) => code(args, global).await,
            ClaimSubcommand::Journal(args) => journal(args, global).await,
        }
    }
}

/// Reads a claim draft from a JSON file or stdin.
fn read_draft(path: &Path) -> Result<ClaimDraft> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid claim JSON in {}", path.display()))
}

fn parse_status(value: &str) -> Result<ClaimStatus> {
    Ok(value.parse()?)
}

fn report_warnings(writer: &OutputWriter, claim: &Claim) {
    for warning in &claim.warnings {
        let code = warning.code.as_ref().map(ToString::to_string).unwrap_or_default();
        match &warning.message {
            Some(message) => writer.write_warning(&format!("{}: {}", code, message)),
            None => writer.write_warning(&code),
        }
    }
}

async fn create(args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
    let draft = read_draft(&args.file)?;
    let request_id = args.request_id.clone().unwrap_or_else(generate_request_id);
    tracing::info!("Creating claim with request_id {}", request_id);

    let (client, writer, _) = global.connect()?;
    let claim = client
        .claim_create(&ClaimCreateRequest::new(request_id, draft))
        .await?;
    writer.write_success(&format!("Created claim {}", claim.claim_id()));
    report_warnings(&writer, &claim);
    writer.write(&claim)
}

async fn edit(args: &EditArgs, global: &GlobalOptions) -> Result<()> {
    let draft = read_draft(&args.file)?;
    let (client, writer, _) = global.connect()?;
    let claim = client
        .claim_edit(&ClaimEditRequest::new(&args.claim_id, args.version, draft))
        .await?;
    writer.write_success(&format!("Updated claim {}", claim.claim_id()));
    report_warnings(&writer, &claim);
    writer.write(&claim)
}

async fn info(args: &InfoArgs, global: &GlobalOptions) -> Result<()> {
    let (client, writer, _) = global.connect()?;
    let claim = client.claim_info(&args.claim_id).await?;
    writer.write(&claim)
}

async fn search(args: &SearchArgs, global: &GlobalOptions) -> Result<()> {
    let mut request = ClaimSearchRequest::new(args.page.offset, args.page.limit);
    request.claim_id = args.claim_id.clone();
    request.phone = args.phone.clone();
    request.status = args.status.as_deref().map(parse_status).transpose()?;
    request.created_from = args.created_from.clone();
    request.created_to = args.created_to.clone();
    request.state = args
        .state
        .as_deref()
        .map(str::parse::<SearchState>)
        .transpose()?;
    request.due_from = args.due_from.clone();
    request.due_to = args.due_to.clone();
    request.external_order_id = args.external_order_id.clone();

    let (client, writer, _) = global.connect()?;
    let result = client.claim_search(&request).await?;
    writer.write(&result)
}

async fn active(args: &PageArgs, global: &GlobalOptions) -> Result<()> {
    let (client, writer, _) = global.connect()?;
    let result = client.search_active(args.offset, args.limit).await?;
    writer.write(&result)
}

async fn bulk(args: &BulkArgs, global: &GlobalOptions) -> Result<()> {
    let (client, writer, _) = global.connect()?;
    let result = client.claim_bulk(&args.claim_ids).await?;
    writer.write(&result)
}

async fn accept(args: &VersionedArgs, global: &GlobalOptions) -> Result<()> {
    let (client, writer, _) = global.connect()?;
    let claim = client.claim_accept(&args.claim_id, args.version).await?;
    writer.write_success(&format!("Accepted claim {}", claim.claim_id()));
    writer.write(&claim)
}

async fn cancel(args: &CancelArgs, global: &GlobalOptions) -> Result<()> {
    let state: CancelState = args.state.parse()?;
    let (client, writer, _) = global.connect()?;
    let claim = client
        .claim_cancel(&args.claim.claim_id, args.claim.version, &state)
        .await?;
    writer.write_success(&format!("Cancelled claim {}", claim.claim_id()));
    writer.write(&claim)
}

async fn document(args: &DocumentArgs, global: &GlobalOptions) -> Result<()> {
    let status = parse_status(&args.status)?;
    let document_type: DocumentType = args.document_type.parse()?;
    let destination = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}-{}.pdf", args.claim.claim_id, document_type))
    });

    let (client, writer, _) = global.connect()?;
    let file = client
        .claim_document(
            &args.claim.claim_id,
            &document_type,
            args.claim.version,
            &status,
            &destination,
        )
        .await?;
    writer.write(&DownloadSummary::from(&file))
}

async fn code(args: &InfoArgs, global: &GlobalOptions) -> Result<()> {
    let (client, writer, _) = global.connect()?;
    let code = client.claim_confirmation_code(&args.claim_id).await?;
    writer.write(&code)
}

async fn journal(args: &JournalArgs, global: &GlobalOptions) -> Result<()> {
    let (client, writer, _) = global.connect()?;
    let mut cursor = args.cursor.clone();

    loop {
        let page = client.claim_journal(cursor.as_deref()).await?;
        if args.follow {
            writer.write_line(&page)?;
        } else {
            return writer.write(&page);
        }

        if page.cursor.is_some() {
            cursor = page.cursor.clone();
        }
        let delay = page.polling_delay().unwrap_or(DEFAULT_POLL_INTERVAL);
        tracing::debug!("Next journal poll in {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}
