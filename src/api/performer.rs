//
//  yacargo
//  api/performer.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Performer API: live position of the courier and a forwarded phone
//! number to call them.
//!
//! Both operations only make sense once a performer has been found for
//! the claim; before that the server answers with `not_found`.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::client::{ApiRequest, CargoClient};
use crate::api::common::validate;
use crate::api::common::ApiError;

type Result<T> = std::result::Result<T, ApiError>;

/// Forwarded phone number for calling the courier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceForwarding {
    /// Phone number to dial.
    pub phone: Option<String>,
    /// Extension to dial after connecting.
    pub ext: Option<String>,
    /// How long the number stays valid, seconds.
    pub ttl_seconds: Option<u64>,
}

/// Last known courier position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Unix time, seconds.
    pub timestamp: Option<i64>,
    /// Accuracy, metres.
    pub accuracy: Option<f64>,
    /// Speed, km/h.
    pub speed: Option<f64>,
    /// Heading, degrees clockwise from north.
    pub direction: Option<f64>,
}

/// Result of `performer_position`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformerPosition {
    pub position: Option<Position>,
}

impl PerformerPosition {
    pub fn position_lat(&self) -> Option<f64> {
        self.position.and_then(|p| p.lat)
    }

    pub fn position_lon(&self) -> Option<f64> {
        self.position.and_then(|p| p.lon)
    }

    pub fn position_timestamp(&self) -> Option<i64> {
        self.position.and_then(|p| p.timestamp)
    }

    /// Returns the timestamp as a UTC date-time.
    pub fn position_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.position_timestamp()
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
    }

    pub fn position_accuracy(&self) -> Option<f64> {
        self.position.and_then(|p| p.accuracy)
    }

    pub fn position_speed(&self) -> Option<f64> {
        self.position.and_then(|p| p.speed)
    }

    pub fn position_direction(&self) -> Option<f64> {
        self.position.and_then(|p| p.direction)
    }
}

/// Builds `POST v1/driver-voiceforwarding`.
pub fn build_voiceforwarding(claim_id: &str) -> Result<ApiRequest> {
    let claim_id = validate::required_str("voiceforwarding", "claim_id", "claim_id", Some(claim_id))?;
    Ok(ApiRequest::post("v1/driver-voiceforwarding").body(json!({ "claim_id": claim_id })))
}

/// Builds `GET v1/claims/performer-position`.
pub fn build_performer_position(claim_id: &str) -> Result<ApiRequest> {
    let claim_id = validate::required_str("performer_position", "claim_id", "claim_id", Some(claim_id))?;
    Ok(ApiRequest::get("v1/claims/performer-position").query("claim_id", claim_id))
}

impl CargoClient {
    /// Returns a phone number forwarding to the courier of the claim.
    pub async fn voiceforwarding(&self, claim_id: &str) -> Result<VoiceForwarding> {
        let request = build_voiceforwarding(claim_id)?;
        self.execute(&request).await?.into_json()
    }

    /// Returns the courier's coordinates, speed and heading.
    pub async fn performer_position(&self, claim_id: &str) -> Result<PerformerPosition> {
        let request = build_performer_position(claim_id)?;
        self.execute(&request).await?.into_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn test_builders() {
        let request = build_voiceforwarding("abc").unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body.unwrap(), json!({"claim_id": "abc"}));

        let request = build_performer_position("abc").unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query_value("claim_id"), Some("abc"));

        assert!(matches!(build_voiceforwarding(""), Err(ApiError::Param(_))));
        assert!(matches!(build_performer_position(""), Err(ApiError::Param(_))));
    }

    #[test]
    fn test_position_accessors() {
        let position: PerformerPosition = serde_json::from_value(json!({
            "position": {"lat": 55.7, "lon": 37.6, "timestamp": 1600000000, "speed": 12.5, "direction": 90}
        }))
        .unwrap();
        assert_eq!(position.position_lat(), Some(55.7));
        assert_eq!(position.position_lon(), Some(37.6));
        assert_eq!(position.position_direction(), Some(90.0));
        assert_eq!(position.position_accuracy(), None);
        assert_eq!(
            position.position_time().unwrap().to_rfc3339(),
            "2020-09-13T12:26:40+00:00"
        );

        let empty: PerformerPosition = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.position_lat(), None);
    }

    #[test]
    fn test_voiceforwarding_decode() {
        let vf: VoiceForwarding =
            serde_json::from_value(json!({"phone": "+75555555555", "ext": "1234", "ttl_seconds": 600}))
                .unwrap();
        assert_eq!(vf.phone.as_deref(), Some("+75555555555"));
        assert_eq!(vf.ttl_seconds, Some(600));
    }
}
