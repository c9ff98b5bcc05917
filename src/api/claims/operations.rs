//
//  yacargo
//  api/claims/operations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Claim operations.
//!
//! Every operation comes in two halves:
//!
//! - a `build_*` function that validates the arguments and returns an
//!   [`ApiRequest`] without touching the network;
//! - a [`CargoClient`] method that runs the builder, executes the request
//!   and decodes the typed result.
//!
//! A builder that fails means nothing was sent.
//!
//! # Claim Lifecycle
//!
//! 1. `claim_create` - Register the claim, the server starts estimating
//! 2. `claim_info` - Poll until `ready_for_approval`
//! 3. `claim_accept` - Confirm the offer, performer lookup starts
//! 4. `claim_journal` - Follow status and price changes
//! 5. `claim_cancel` - Cancel while `available_cancel_state` allows it

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::models::{Claim, ConfirmationCode, CutClaim, SearchClaimsResponse};
use super::objects::{CargoItem, ClaimRequirement, RoutePoint};
use crate::api::client::{ApiRequest, CargoClient, DownloadedFile};
use crate::api::common::validate::{self, Validate};
use crate::api::common::{
    ApiError, CancelState, CargoType, ClaimStatus, DocumentType, FieldPath, JsonBody, PointType,
    SearchState, TaxiClass,
};

type Result<T> = std::result::Result<T, ApiError>;

/// Largest page accepted by the search operations.
pub const MAX_SEARCH_LIMIT: u32 = 1000;

/// Largest number of ids accepted by `claim_bulk`.
pub const MAX_BULK_IDS: usize = 1000;

/// Longest accepted `request_id`.
pub const MAX_REQUEST_ID_LEN: usize = 32;

/// Wire paths of the flat [`ClaimDraft`] fields.
pub mod draft_fields {
    use crate::api::common::FieldPath;

    pub const SHIPPING_DOCUMENT: FieldPath = FieldPath::new("shipping_document", &["shipping_document"]);
    pub const ITEMS: FieldPath = FieldPath::new("items", &["items"]);
    pub const ROUTE_POINTS: FieldPath = FieldPath::new("route_points", &["route_points"]);
    pub const EMERGENCY_CONTACT_NAME: FieldPath =
        FieldPath::new("emergency_contact_name", &["emergency_contact", "name"]);
    pub const EMERGENCY_CONTACT_PHONE: FieldPath =
        FieldPath::new("emergency_contact_phone", &["emergency_contact", "phone"]);
    pub const TAXI_CLASS: FieldPath =
        FieldPath::new("client_requirements_taxi_class", &["client_requirements", "taxi_class"]);
    pub const CARGO_TYPE: FieldPath =
        FieldPath::new("client_requirements_cargo_type", &["client_requirements", "cargo_type"]);
    pub const CARGO_LOADERS: FieldPath =
        FieldPath::new("client_requirements_cargo_loaders", &["client_requirements", "cargo_loaders"]);
    pub const CARGO_OPTIONS: FieldPath =
        FieldPath::new("client_requirements_cargo_options", &["client_requirements", "cargo_options"]);
    pub const CALLBACK_URL: FieldPath =
        FieldPath::new("callback_properties_callback_url", &["callback_properties", "callback_url"]);
    pub const SKIP_DOOR_TO_DOOR: FieldPath = FieldPath::new("skip_door_to_door", &["skip_door_to_door"]);
    pub const SKIP_CLIENT_NOTIFY: FieldPath = FieldPath::new("skip_client_notify", &["skip_client_notify"]);
    pub const SKIP_EMERGENCY_NOTIFY: FieldPath =
        FieldPath::new("skip_emergency_notify", &["skip_emergency_notify"]);
    pub const SKIP_ACT: FieldPath = FieldPath::new("skip_act", &["skip_act"]);
    pub const OPTIONAL_RETURN: FieldPath = FieldPath::new("optional_return", &["optional_return"]);
    pub const DUE: FieldPath = FieldPath::new("due", &["due"]);
    pub const COMMENT: FieldPath = FieldPath::new("comment", &["comment"]);
    pub const STRICT_REQUIREMENTS: FieldPath =
        FieldPath::new("requirements_strict_requirements", &["requirements", "strict_requirements"]);
    pub const SOFT_REQUIREMENTS: FieldPath =
        FieldPath::new("requirements_soft_requirements", &["requirements", "soft_requirements"]);
    pub const REFERRAL_SOURCE: FieldPath = FieldPath::new("referral_source", &["referral_source"]);
}

/// Claim contents shared by `claim_create` and `claim_edit`.
///
/// Fields use the flat argument names; the builder nests them into the
/// wire body through [`draft_fields`]. `items`, `route_points` and the
/// emergency contact are mandatory: leaving them empty fails validation.
///
/// The struct deserializes from the same flat JSON, which is what the
/// `claim create --file` command reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimDraft {
    /// Accompanying documents.
    pub shipping_document: Option<String>,
    /// At least one item.
    pub items: Vec<CargoItem>,
    /// At least two points, exactly one of them `source`.
    pub route_points: Vec<RoutePoint>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub client_requirements_taxi_class: Option<TaxiClass>,
    pub client_requirements_cargo_type: Option<CargoType>,
    pub client_requirements_cargo_loaders: Option<u32>,
    pub client_requirements_cargo_options: Option<Vec<String>>,
    /// Status callback. Superseded by the claims journal.
    pub callback_properties_callback_url: Option<String>,
    /// Deliver to the entrance only.
    pub skip_door_to_door: Option<bool>,
    pub skip_client_notify: Option<bool>,
    pub skip_emergency_notify: Option<bool>,
    pub skip_act: Option<bool>,
    /// Courier keeps the goods if the order is cancelled.
    pub optional_return: Option<bool>,
    /// Scheduled pickup time, ISO 8601.
    pub due: Option<String>,
    pub comment: Option<String>,
    pub requirements_strict_requirements: Option<Vec<ClaimRequirement>>,
    pub requirements_soft_requirements: Option<Vec<ClaimRequirement>>,
    /// Where the claim came from, e.g. `bitrix`.
    pub referral_source: Option<String>,
}

impl ClaimDraft {
    /// Creates a draft with the mandatory fields set.
    pub fn new(
        items: Vec<CargoItem>,
        route_points: Vec<RoutePoint>,
        emergency_contact_name: impl Into<String>,
        emergency_contact_phone: impl Into<String>,
    ) -> Self {
        Self {
            items,
            route_points,
            emergency_contact_name: emergency_contact_name.into(),
            emergency_contact_phone: emergency_contact_phone.into(),
            ..Default::default()
        }
    }

    /// Validates the draft for `operation` and nests it into the wire body.
    pub fn to_body(&self, operation: &str) -> Result<serde_json::Value> {
        use self::draft_fields::*;

        required_list(operation, &ITEMS, &self.items, 1, usize::MAX)?;
        self.items.validate()?;
        required_list(operation, &ROUTE_POINTS, &self.route_points, 2, usize::MAX)?;
        self.route_points.validate()?;
        check_route(&self.route_points, &self.items)?;

        required_field(operation, &EMERGENCY_CONTACT_NAME, &self.emergency_contact_name)?;
        required_field(operation, &EMERGENCY_CONTACT_PHONE, &self.emergency_contact_phone)?;

        if let Some(class) = &self.client_requirements_taxi_class {
            class.ensure_known()?;
        }
        if let Some(cargo_type) = &self.client_requirements_cargo_type {
            cargo_type.ensure_known()?;
        }
        if let Some(url) = &self.callback_properties_callback_url {
            url::Url::parse(url).map_err(|e| {
                ApiError::param(format!("\"{}\" is not a valid URL: {}", CALLBACK_URL.name, e))
            })?;
        }
        if let Some(due) = &self.due {
            validate::datetime(DUE.name, due)?;
        }
        self.requirements_strict_requirements.validate()?;
        self.requirements_soft_requirements.validate()?;

        let mut body = JsonBody::new();
        body.insert_opt(&SHIPPING_DOCUMENT, self.shipping_document.as_deref())?;
        body.insert(&ITEMS, &self.items)?;
        body.insert(&ROUTE_POINTS, &self.route_points)?;
        body.insert(&EMERGENCY_CONTACT_NAME, &self.emergency_contact_name)?;
        body.insert(&EMERGENCY_CONTACT_PHONE, &self.emergency_contact_phone)?;
        body.insert_opt(&TAXI_CLASS, self.client_requirements_taxi_class.as_ref())?;
        body.insert_opt(&CARGO_TYPE, self.client_requirements_cargo_type.as_ref())?;
        body.insert_opt(&CARGO_LOADERS, self.client_requirements_cargo_loaders.as_ref())?;
        body.insert_opt(&CARGO_OPTIONS, self.client_requirements_cargo_options.as_ref())?;
        body.insert_opt(&CALLBACK_URL, self.callback_properties_callback_url.as_deref())?;
        body.insert_opt(&SKIP_DOOR_TO_DOOR, self.skip_door_to_door.as_ref())?;
        body.insert_opt(&SKIP_CLIENT_NOTIFY, self.skip_client_notify.as_ref())?;
        body.insert_opt(&SKIP_EMERGENCY_NOTIFY, self.skip_emergency_notify.as_ref())?;
        body.insert_opt(&SKIP_ACT, self.skip_act.as_ref())?;
        body.insert_opt(&OPTIONAL_RETURN, self.optional_return.as_ref())?;
        body.insert_opt(&DUE, self.due.as_deref())?;
        body.insert_opt(&COMMENT, self.comment.as_deref())?;
        body.insert_opt(&STRICT_REQUIREMENTS, self.requirements_strict_requirements.as_ref())?;
        body.insert_opt(&SOFT_REQUIREMENTS, self.requirements_soft_requirements.as_ref())?;
        body.insert_opt(&REFERRAL_SOURCE, self.referral_source.as_deref())?;
        Ok(body.into_value())
    }
}

fn required_field<'a>(operation: &str, field: &FieldPath, value: &'a str) -> Result<&'a str> {
    validate::required_str(operation, field.name, &field.dotted(), Some(value))
}

fn required_list<T>(operation: &str, field: &FieldPath, list: &[T], min: usize, max: usize) -> Result<()> {
    if list.is_empty() {
        validate::required::<T>(operation, field.name, &field.dotted(), None)?;
    }
    validate::count_between(field.name, list.len(), min, max)
}

fn check_route(points: &[RoutePoint], items: &[CargoItem]) -> Result<()> {
    let count = |kind: PointType| points.iter().filter(|p| p.point_type == kind).count();

    let sources = count(PointType::Source);
    if sources != 1 {
        return Err(ApiError::param(format!(
            "\"route_points\" should contain exactly one source point, got {}",
            sources
        )));
    }
    let returns = count(PointType::Return);
    if returns > 1 {
        return Err(ApiError::param(format!(
            "\"route_points\" should contain at most one return point, got {}",
            returns
        )));
    }

    let mut ids = HashSet::new();
    for point in points {
        if !ids.insert(point.point_id) {
            return Err(ApiError::param(format!(
                "\"point_id\" {} is used by more than one route point",
                point.point_id
            )));
        }
    }

    for item in items {
        for (field, id) in [("pickup_point", item.pickup_point), ("droppof_point", item.droppof_point)] {
            if !ids.contains(&id) {
                return Err(ApiError::param(format!(
                    "\"{}\" of item \"{}\" references unknown point_id {}",
                    field, item.title, id
                )));
            }
        }
    }
    Ok(())
}

/// Arguments of `claim_create`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimCreateRequest {
    /// Idempotency token, at most 32 characters. Repeating a request with
    /// the same token returns the claim created the first time.
    pub request_id: String,
    pub claim: ClaimDraft,
}

impl ClaimCreateRequest {
    pub fn new(request_id: impl Into<String>, claim: ClaimDraft) -> Self {
        Self {
            request_id: request_id.into(),
            claim,
        }
    }
}

/// Arguments of `claim_edit`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimEditRequest {
    pub claim_id: String,
    /// Version the edit is based on; a stale one yields `old_version`.
    pub version: i64,
    pub claim: ClaimDraft,
}

impl ClaimEditRequest {
    pub fn new(claim_id: impl Into<String>, version: i64, claim: ClaimDraft) -> Self {
        Self {
            claim_id: claim_id.into(),
            version,
            claim,
        }
    }
}

/// Filters of `claim_search`.
///
/// Results are sorted by creation date and paged with `offset`/`limit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSearchRequest {
    pub offset: u32,
    /// Page size, 1 to 1000.
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClaimStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SearchState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_order_id: Option<String>,
}

impl ClaimSearchRequest {
    /// Creates a search page without filters.
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit,
            ..Default::default()
        }
    }
}

impl Validate for ClaimSearchRequest {
    fn validate(&self) -> Result<()> {
        validate::in_range("limit", self.limit, 1, MAX_SEARCH_LIMIT)?;
        if let Some(status) = &self.status {
            status.ensure_known()?;
        }
        if let Some(state) = &self.state {
            state.ensure_known()?;
        }
        for (field, value) in [
            ("created_from", &self.created_from),
            ("created_to", &self.created_to),
            ("due_from", &self.due_from),
            ("due_to", &self.due_to),
        ] {
            if let Some(value) = value {
                validate::datetime(field, value)?;
            }
        }
        Ok(())
    }
}

/// Builds `POST v2/claims/create`.
pub fn build_claim_create(request: &ClaimCreateRequest) -> Result<ApiRequest> {
    let request_id = validate::required_str("claim_create", "request_id", "request_id", Some(request.request_id.as_str()))?;
    validate::length_between("request_id", request_id, 1, MAX_REQUEST_ID_LEN)?;
    let body = request.claim.to_body("claim_create")?;
    Ok(ApiRequest::post("v2/claims/create")
        .query("request_id", request_id)
        .body(body))
}

/// Builds `POST v2/claims/edit`.
pub fn build_claim_edit(request: &ClaimEditRequest) -> Result<ApiRequest> {
    let claim_id = validate::required_str("claim_edit", "claim_id", "claim_id", Some(request.claim_id.as_str()))?;
    validate::at_least("version", request.version, 1)?;
    let body = request.claim.to_body("claim_edit")?;
    Ok(ApiRequest::post("v2/claims/edit")
        .query("claim_id", claim_id)
        .query("version", request.version)
        .body(body))
}

/// Builds `POST v2/claims/info`.
pub fn build_claim_info(claim_id: &str) -> Result<ApiRequest> {
    let claim_id = validate::required_str("claim_info", "claim_id", "claim_id", Some(claim_id))?;
    Ok(ApiRequest::post("v2/claims/info").query("claim_id", claim_id))
}

/// Builds `POST v2/claims/search`.
pub fn build_claim_search(request: &ClaimSearchRequest) -> Result<ApiRequest> {
    request.validate()?;
    Ok(ApiRequest::post("v2/claims/search").body(serde_json::to_value(request)?))
}

/// Builds `POST v2/claims/search/active`.
pub fn build_search_active(offset: u32, limit: u32) -> Result<ApiRequest> {
    validate::in_range("limit", limit, 1, MAX_SEARCH_LIMIT)?;
    Ok(ApiRequest::post("v2/claims/search/active").body(json!({
        "offset": offset,
        "limit": limit,
    })))
}

/// Builds `POST v2/claims/bulk_info`.
pub fn build_claim_bulk(claim_ids: &[String]) -> Result<ApiRequest> {
    if claim_ids.is_empty() {
        validate::required::<[String]>("claim_bulk", "claim_ids", "claim_ids", None)?;
    }
    validate::count_between("claim_ids", claim_ids.len(), 1, MAX_BULK_IDS)?;
    for id in claim_ids {
        validate::non_empty("claim_ids", id)?;
    }
    Ok(ApiRequest::post("v2/claims/bulk_info").body(json!({ "claim_ids": claim_ids })))
}

/// Builds `POST v1/claims/accept`.
pub fn build_claim_accept(claim_id: &str, version: i64) -> Result<ApiRequest> {
    let claim_id = validate::required_str("claim_accept", "claim_id", "claim_id", Some(claim_id))?;
    validate::at_least("version", version, 1)?;
    Ok(ApiRequest::post("v1/claims/accept")
        .query("claim_id", claim_id)
        .body(json!({ "version": version })))
}

/// Builds `POST v1/claims/cancel`.
pub fn build_claim_cancel(claim_id: &str, version: i64, cancel_state: &CancelState) -> Result<ApiRequest> {
    let claim_id = validate::required_str("claim_cancel", "claim_id", "claim_id", Some(claim_id))?;
    validate::at_least("version", version, 1)?;
    cancel_state.ensure_known()?;
    Ok(ApiRequest::post("v1/claims/cancel")
        .query("claim_id", claim_id)
        .body(json!({
            "version": version,
            "cancel_state": cancel_state,
        })))
}

/// Builds `GET v1/claims/document`.
pub fn build_claim_document(
    claim_id: &str,
    document_type: &DocumentType,
    version: i64,
    status: &ClaimStatus,
) -> Result<ApiRequest> {
    let claim_id = validate::required_str("claim_document", "claim_id", "claim_id", Some(claim_id))?;
    document_type.ensure_known()?;
    validate::at_least("version", version, 1)?;
    status.ensure_known()?;
    Ok(ApiRequest::get("v1/claims/document")
        .query("claim_id", claim_id)
        .query("document_type", document_type)
        .query("version", version)
        .query("status", status))
}

/// Builds `POST v2/claims/confirmation_code`.
pub fn build_claim_confirmation_code(claim_id: &str) -> Result<ApiRequest> {
    let claim_id = validate::required_str("claim_confirmation_code", "claim_id", "claim_id", Some(claim_id))?;
    Ok(ApiRequest::post("v2/claims/confirmation_code").body(json!({ "claim_id": claim_id })))
}

impl CargoClient {
    /// Creates a claim. The server starts estimating it right away; poll
    /// [`claim_info`](Self::claim_info) for the result.
    pub async fn claim_create(&self, request: &ClaimCreateRequest) -> Result<Claim> {
        let request = build_claim_create(request)?;
        self.execute(&request).await?.into_json()
    }

    /// Replaces the contents of a claim that has not been accepted yet.
    pub async fn claim_edit(&self, request: &ClaimEditRequest) -> Result<Claim> {
        let request = build_claim_edit(request)?;
        self.execute(&request).await?.into_json()
    }

    /// Fetches one claim.
    pub async fn claim_info(&self, claim_id: &str) -> Result<Claim> {
        let request = build_claim_info(claim_id)?;
        self.execute(&request).await?.into_json()
    }

    /// Searches claims with filters.
    pub async fn claim_search(&self, request: &ClaimSearchRequest) -> Result<SearchClaimsResponse> {
        let request = build_claim_search(request)?;
        self.execute(&request).await?.into_json()
    }

    /// Lists claims currently being executed.
    pub async fn search_active(&self, offset: u32, limit: u32) -> Result<SearchClaimsResponse> {
        let request = build_search_active(offset, limit)?;
        self.execute(&request).await?.into_json()
    }

    /// Fetches up to 1000 claims by id.
    pub async fn claim_bulk(&self, claim_ids: &[String]) -> Result<SearchClaimsResponse> {
        let request = build_claim_bulk(claim_ids)?;
        self.execute(&request).await?.into_json()
    }

    /// Accepts the estimated offer. The offer is valid for a limited time.
    pub async fn claim_accept(&self, claim_id: &str, version: i64) -> Result<CutClaim> {
        let request = build_claim_accept(claim_id, version)?;
        self.execute(&request).await?.into_json()
    }

    /// Cancels a claim. `cancel_state` must match the claim's
    /// `available_cancel_state`.
    pub async fn claim_cancel(&self, claim_id: &str, version: i64, cancel_state: &CancelState) -> Result<CutClaim> {
        let request = build_claim_cancel(claim_id, version, cancel_state)?;
        self.execute(&request).await?.into_json()
    }

    /// Downloads a claim document (PDF) into `destination`.
    pub async fn claim_document(
        &self,
        claim_id: &str,
        document_type: &DocumentType,
        version: i64,
        status: &ClaimStatus,
        destination: &Path,
    ) -> Result<DownloadedFile> {
        let request = build_claim_document(claim_id, document_type, version, status)?;
        self.download(&request, destination).await
    }

    /// Fetches the confirmation code of the current point.
    pub async fn claim_confirmation_code(&self, claim_id: &str) -> Result<ConfirmationCode> {
        let request = build_claim_confirmation_code(claim_id)?;
        self.execute(&request).await?.into_json()
    }
}
