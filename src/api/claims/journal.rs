//
//  yacargo
//  api/claims/journal.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Claims journal: the change-event stream of all claims of the client.
//!
//! The journal is polled with an opaque cursor. Each response carries the
//! events after that cursor and the cursor to pass next time. The server
//! also sends `X-Polling-Delay-Ms`, the minimum pause before the next poll;
//! polling faster may be answered with 429.
//!
//! ```rust,no_run
//! use yacargo::api::CargoClient;
//!
//! # async fn example() -> Result<(), yacargo::api::ApiError> {
//! let client = CargoClient::new("token", true)?;
//! let mut cursor: Option<String> = None;
//! loop {
//!     let page = client.claim_journal(cursor.as_deref()).await?;
//!     for event in &page.events {
//!         println!("{} {}", event.claim_id, event.change_type);
//!     }
//!     cursor = page.cursor.clone();
//!     if let Some(delay) = page.polling_delay() {
//!         tokio::time::sleep(delay).await;
//!     }
//! #   break;
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::models::null_as_default;
use crate::api::client::{ApiRequest, CargoClient, POLLING_DELAY_HEADER};
use crate::api::common::{ApiError, ClaimStatus};

type Result<T> = std::result::Result<T, ApiError>;

/// One change of one claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEvent {
    #[serde(default)]
    pub claim_id: String,
    /// What changed, e.g. `status_changed` or `price_changed`.
    #[serde(default)]
    pub change_type: String,
    #[serde(default)]
    pub updated_ts: String,
    pub new_status: Option<ClaimStatus>,
    pub new_price: Option<String>,
    pub new_currency: Option<String>,
    /// Outcome for terminal statuses: `success` or `failed`.
    pub resolution: Option<String>,
}

/// One page of the journal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsJournal {
    /// Cursor for the next poll.
    pub cursor: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<JournalEvent>,
    /// Value of the polling hint header, in milliseconds.
    #[serde(skip)]
    pub polling_delay_ms: Option<u64>,
}

impl ClaimsJournal {
    /// How long to wait before polling again, as advised by the server.
    pub fn polling_delay(&self) -> Option<Duration> {
        self.polling_delay_ms.map(Duration::from_millis)
    }
}

/// Builds `POST v1/claims/journal`.
///
/// Without a cursor the server returns the oldest retained events.
pub fn build_claim_journal(cursor: Option<&str>) -> Result<ApiRequest> {
    let body = match cursor {
        Some(cursor) if !cursor.is_empty() => json!({ "cursor": cursor }),
        _ => json!({}),
    };
    Ok(ApiRequest::post("v1/claims/journal").body(body))
}

impl CargoClient {
    /// Fetches the journal page after `cursor`.
    pub async fn claim_journal(&self, cursor: Option<&str>) -> Result<ClaimsJournal> {
        let request = build_claim_journal(cursor)?;
        let response = self.execute(&request).await?;
        let polling_delay_ms = response
            .header(POLLING_DELAY_HEADER)
            .and_then(|v| v.trim().parse::<u64>().ok());

        let mut journal: ClaimsJournal = response.into_json()?;
        journal.polling_delay_ms = polling_delay_ms;
        Ok(journal)
    }
}
