//
//  yacargo
//  api/reports.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Order reports.
//!
//! Reports are generated asynchronously:
//!
//! 1. `report_generate` - Start a report for a date range, get a task id
//! 2. `report_status` - Poll the task until it carries a report `url`
//! 3. `report_download` - Save the report file
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use yacargo::api::reports::ReportRequest;
//! use yacargo::api::CargoClient;
//!
//! # async fn example() -> Result<(), yacargo::api::ApiError> {
//! let client = CargoClient::new("token", false)?;
//! let request = ReportRequest::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!     "f9b4825f45f64914affaeb07fbae9757",
//! );
//! let task = client.report_generate(&request).await?;
//! let status = client.report_status(&task.task_id).await?;
//! println!("{:?}", status.status);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::client::{ApiRequest, CargoClient, DownloadedFile};
use crate::api::common::validate::{self, Validate};
use crate::api::common::ApiError;

type Result<T> = std::result::Result<T, ApiError>;

/// Arguments of `report_generate`. Dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// First day of the period.
    pub since_date: NaiveDate,
    /// Last day of the period.
    pub till_date: NaiveDate,
    /// Report language. The server falls back to `Accept-Language`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Accepted and ignored by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Unique per client; passed through unchanged.
    pub idempotency_token: String,
}

impl ReportRequest {
    pub fn new(since_date: NaiveDate, till_date: NaiveDate, idempotency_token: impl Into<String>) -> Self {
        Self {
            since_date,
            till_date,
            lang: None,
            department_id: None,
            idempotency_token: idempotency_token.into(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl Validate for ReportRequest {
    fn validate(&self) -> Result<()> {
        if self.since_date > self.till_date {
            return Err(ApiError::param(format!(
                "\"since_date\" ({}) should not be after \"till_date\" ({})",
                self.since_date, self.till_date
            )));
        }
        validate::required_str(
            "report_generate",
            "idempotency_token",
            "idempotency_token",
            Some(self.idempotency_token.as_str()),
        )?;
        Ok(())
    }
}

/// Result of `report_generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTask {
    #[serde(default)]
    pub task_id: String,
}

/// Echo of the generation request inside a report status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequestEcho {
    pub since_date: Option<String>,
    pub till_date: Option<String>,
    pub lang: Option<String>,
    pub department_id: Option<String>,
    pub idempotency_token: Option<String>,
}

/// Result of `report_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStatus {
    #[serde(default)]
    pub task_id: String,
    /// Task state as reported by the server.
    pub status: Option<String>,
    pub author: Option<String>,
    pub created_at: Option<String>,
    pub request: Option<ReportRequestEcho>,
    /// Download link, present once the report is ready.
    pub url: Option<String>,
}

impl ReportStatus {
    /// Returns `true` once the report can be downloaded.
    pub fn is_ready(&self) -> bool {
        self.url.is_some()
    }

    /// Extracts the `report_id` query parameter from the download link.
    pub fn report_id(&self) -> Option<String> {
        let url = url::Url::parse(self.url.as_deref()?).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "report_id")
            .map(|(_, value)| value.into_owned())
    }

    pub fn request_since_date(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.since_date.as_deref())
    }

    pub fn request_till_date(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.till_date.as_deref())
    }

    pub fn request_lang(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.lang.as_deref())
    }

    pub fn request_department_id(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.department_id.as_deref())
    }

    pub fn request_idempotency_token(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.idempotency_token.as_deref())
    }
}

/// Builds `POST v1/order-report/generate`.
pub fn build_report_generate(request: &ReportRequest) -> Result<ApiRequest> {
    request.validate()?;
    Ok(ApiRequest::post("v1/order-report/generate").body(serde_json::to_value(request)?))
}

/// Builds `POST v1/order-report/status`.
pub fn build_report_status(task_id: &str) -> Result<ApiRequest> {
    let task_id = validate::required_str("report_status", "task_id", "task_id", Some(task_id))?;
    Ok(ApiRequest::post("v1/order-report/status").body(json!({ "task_id": task_id })))
}

/// Builds `GET v1/order-report/report`.
pub fn build_report_download(report_id: &str) -> Result<ApiRequest> {
    let report_id = validate::required_str("report_download", "report_id", "report_id", Some(report_id))?;
    Ok(ApiRequest::get("v1/order-report/report").query("report_id", report_id))
}

impl CargoClient {
    /// Starts generating a report.
    pub async fn report_generate(&self, request: &ReportRequest) -> Result<ReportTask> {
        let request = build_report_generate(request)?;
        self.execute(&request).await?.into_json()
    }

    /// Returns the state of a report task.
    pub async fn report_status(&self, task_id: &str) -> Result<ReportStatus> {
        let request = build_report_status(task_id)?;
        self.execute(&request).await?.into_json()
    }

    /// Downloads a finished report into `destination`.
    pub async fn report_download(&self, report_id: &str, destination: &Path) -> Result<DownloadedFile> {
        let request = build_report_download(report_id)?;
        self.download(&request, destination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_body() {
        let request = ReportRequest::new(date(2020, 1, 1), date(2020, 1, 2), "token-1").with_lang("ru");
        let body = build_report_generate(&request).unwrap().body.unwrap();
        assert_eq!(
            body,
            json!({
                "since_date": "2020-01-01",
                "till_date": "2020-01-02",
                "lang": "ru",
                "idempotency_token": "token-1"
            })
        );
    }

    #[test]
    fn test_generate_rules() {
        let same_day = ReportRequest::new(date(2020, 1, 1), date(2020, 1, 1), "t");
        assert!(build_report_generate(&same_day).is_ok());

        let reversed = ReportRequest::new(date(2020, 1, 2), date(2020, 1, 1), "t");
        assert!(matches!(build_report_generate(&reversed), Err(ApiError::Param(_))));

        let no_token = ReportRequest::new(date(2020, 1, 1), date(2020, 1, 2), "");
        let err = build_report_generate(&no_token).unwrap_err();
        assert!(err.to_string().contains("<idempotency_token>"));
    }

    #[test]
    fn test_status_decode() {
        let status: ReportStatus = serde_json::from_value(json!({
            "task_id": "t-1",
            "status": "complete",
            "request": {"since_date": "2020-01-01", "till_date": "2020-01-02", "idempotency_token": "x"},
            "url": "https://b2b.taxi.yandex.net/b2b/cargo/integration/v1/order-report/report?report_id=r-9"
        }))
        .unwrap();
        assert!(status.is_ready());
        assert_eq!(status.report_id().as_deref(), Some("r-9"));
        assert_eq!(status.request_since_date(), Some("2020-01-01"));
        assert_eq!(status.request_lang(), None);
    }

    #[test]
    fn test_status_and_download_builders() {
        assert_eq!(
            build_report_status("t-1").unwrap().body.unwrap(),
            json!({"task_id": "t-1"})
        );
        let request = build_report_download("r-9").unwrap();
        assert_eq!(request.query_value("report_id"), Some("r-9"));
        assert!(build_report_download("").is_err());
    }
}
