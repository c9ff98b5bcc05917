//
//  yacargo
//  api/claims/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Claim API: creation, search, status transitions, documents and the
//! change journal.
//!
//! - [`objects`] - Request value objects (items, route points, contacts)
//! - [`models`] - Response types with flat accessors
//! - [`operations`] - Request builders and client methods
//! - [`journal`] - Cursor-based change polling

pub mod journal;
pub mod models;
pub mod objects;
pub mod operations;

pub use journal::{build_claim_journal, ClaimsJournal, JournalEvent};
pub use models::*;
pub use objects::*;
pub use operations::*;
