//
//  yacargo
//  api/claims/models.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Claim response types.
//!
//! The structs mirror the JSON returned by the claim operations. Missing
//! optional keys decode to `None` or an empty list, and enumerated fields
//! use the open enums from [`crate::api::common::enums`], so a new server
//! value never breaks decoding.
//!
//! Nested objects stay nested, and [`Claim`] and [`ClaimRoutePoint`] add
//! flat accessors named after the path, e.g. `emergency_contact.name` is
//! [`Claim::emergency_contact_name`] and `pricing.offer.price` is
//! [`Claim::pricing_offer_price`].
//!
//! # Example
//!
//! ```rust
//! use yacargo::api::claims::Claim;
//! use yacargo::api::common::ClaimStatus;
//!
//! let claim: Claim = serde_json::from_str(r#"{
//!     "id": "abc",
//!     "status": "new",
//!     "version": 1,
//!     "emergency_contact": {"name": "Rick", "phone": "+79000000000"}
//! }"#).unwrap();
//!
//! assert_eq!(claim.claim_id(), "abc");
//! assert_eq!(claim.status, Some(ClaimStatus::New));
//! assert_eq!(claim.emergency_contact_name(), Some("Rick"));
//! assert!(claim.route_points.is_empty());
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use super::objects::{Address, CustomerFiscalization};
use crate::api::common::{
    CancelState, CargoType, ClaimStatus, PaymentMode, PaymentSubject, PointType, TaxSystemCode,
    TaxiClass, VatCode, VisitStatus, WarningCode, WarningSource,
};

/// Decodes an explicit `null` the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Name and phone of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Item dimensions as stored on the server, metres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimItemSize {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Receipt data of an item as stored on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimItemFiscalization {
    pub vat_code: Option<VatCode>,
    pub payment_subject: Option<PaymentSubject>,
    pub payment_mode: Option<PaymentMode>,
    pub product_code: Option<String>,
    pub country_of_origin_code: Option<String>,
    pub customs_declaration_number: Option<String>,
    pub excise: Option<f64>,
}

/// A cargo item as stored on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimItem {
    pub pickup_point: Option<i64>,
    pub droppof_point: Option<i64>,
    pub title: Option<String>,
    pub cost_value: Option<serde_json::Value>,
    pub cost_currency: Option<String>,
    pub quantity: Option<u32>,
    pub extra_id: Option<String>,
    pub size: Option<ClaimItemSize>,
    pub weight: Option<f64>,
    pub fiscalization: Option<ClaimItemFiscalization>,
}

impl ClaimItem {
    pub fn size_length(&self) -> Option<f64> {
        self.size.and_then(|s| s.length)
    }

    pub fn size_width(&self) -> Option<f64> {
        self.size.and_then(|s| s.width)
    }

    pub fn size_height(&self) -> Option<f64> {
        self.size.and_then(|s| s.height)
    }

    pub fn fiscalization_vat_code(&self) -> Option<&VatCode> {
        self.fiscalization.as_ref().and_then(|f| f.vat_code.as_ref())
    }
}

/// Payment-on-delivery state of a destination point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentOnDeliveryStatus {
    pub client_order_id: Option<String>,
    /// Whether the recipient has paid.
    pub is_paid: Option<bool>,
    pub cost: Option<f64>,
    pub customer: Option<CustomerFiscalization>,
    pub tax_system_code: Option<TaxSystemCode>,
}

/// A route point as stored on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRoutePoint {
    /// Server-assigned id, used as `current_point_id`.
    #[serde(default)]
    pub id: i64,

    pub contact: Option<ContactInfo>,

    pub address: Option<Address>,

    pub skip_confirmation: Option<bool>,

    #[serde(rename = "type")]
    pub point_type: Option<PointType>,

    pub visit_order: Option<u32>,

    pub visit_status: Option<VisitStatus>,

    pub payment_on_delivery: Option<PaymentOnDeliveryStatus>,

    pub external_order_id: Option<String>,

    pub pickup_code: Option<String>,
}

impl ClaimRoutePoint {
    pub fn contact_name(&self) -> Option<&str> {
        self.contact.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn contact_phone(&self) -> Option<&str> {
        self.contact.as_ref().and_then(|c| c.phone.as_deref())
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.contact.as_ref().and_then(|c| c.email.as_deref())
    }

    pub fn address_fullname(&self) -> Option<&str> {
        self.address.as_ref().map(|a| a.fullname.as_str())
    }

    pub fn address_coordinates(&self) -> Option<&[f64]> {
        self.address.as_ref().map(|a| a.coordinates.as_slice())
    }

    pub fn payment_on_delivery_is_paid(&self) -> Option<bool> {
        self.payment_on_delivery.as_ref().and_then(|p| p.is_paid)
    }
}

/// Localized problem found while estimating a claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanErrorMessage {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Offer issued for the claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxiOffer {
    pub offer_id: Option<String>,
    pub price_raw: Option<f64>,
    pub price: Option<String>,
}

/// Currency formatting rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRules {
    pub code: Option<String>,
    pub text: Option<String>,
    pub template: Option<String>,
    pub sign: Option<String>,
}

/// Pricing of the claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimPricing {
    pub offer: Option<TaxiOffer>,
    pub currency: Option<String>,
    pub currency_rules: Option<CurrencyRules>,
    /// Final price, present once the claim is finished.
    pub final_price: Option<String>,
}

/// Vehicle requirements of the claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRequirements {
    pub taxi_class: Option<TaxiClass>,
    pub cargo_type: Option<CargoType>,
    pub cargo_loaders: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cargo_options: Vec<String>,
}

/// Vehicle class the server matched for the claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedCar {
    pub taxi_class: Option<TaxiClass>,
    /// Tariff substituted for the requested one, e.g. `cargocorp`.
    pub client_taxi_class: Option<String>,
    pub cargo_type: Option<CargoType>,
    pub cargo_loaders: Option<u32>,
    pub door_to_door: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cargo_points: Vec<i64>,
    pub cargo_points_field: Option<String>,
}

/// Warning attached to the claim after estimation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimWarning {
    pub source: Option<WarningSource>,
    pub code: Option<WarningCode>,
    pub message: Option<String>,
}

/// Courier and vehicle assigned to the claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformerInfo {
    pub courier_name: Option<String>,
    pub legal_name: Option<String>,
    pub car_model: Option<String>,
    pub car_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackProperties {
    pub callback_url: Option<String>,
}

/// Payment details of person-to-person claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct C2CData {
    pub payment_type: Option<String>,
    pub payment_method_id: Option<String>,
}

/// A claim as returned by create, edit, info, search and bulk info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(default)]
    pub id: String,
    pub corp_client_id: Option<String>,
    pub yandex_uid: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ClaimItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub route_points: Vec<ClaimRoutePoint>,
    /// `id` of the route point the performer is heading to.
    pub current_point_id: Option<i64>,
    pub status: Option<ClaimStatus>,
    /// Bumped on every edit; required by accept, cancel and edit.
    pub version: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_messages: Vec<HumanErrorMessage>,
    pub emergency_contact: Option<ContactInfo>,
    pub skip_door_to_door: Option<bool>,
    pub skip_client_notify: Option<bool>,
    pub skip_emergency_notify: Option<bool>,
    pub skip_act: Option<bool>,
    pub optional_return: Option<bool>,
    /// Estimated minutes until delivery.
    pub eta: Option<i64>,
    pub created_ts: Option<String>,
    pub updated_ts: Option<String>,
    pub taxi_offer: Option<TaxiOffer>,
    pub pricing: Option<ClaimPricing>,
    pub available_cancel_state: Option<CancelState>,
    pub client_requirements: Option<ClientRequirements>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matched_cars: Vec<MatchedCar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<ClaimWarning>,
    pub performer_info: Option<PerformerInfo>,
    pub callback_properties: Option<CallbackProperties>,
    pub due: Option<String>,
    pub shipping_document: Option<String>,
    pub comment: Option<String>,
    /// Server-side revision, bumped on every change including status.
    pub revision: Option<i64>,
    pub c2c_data: Option<C2CData>,
}

impl Claim {
    /// Returns the claim id.
    pub fn claim_id(&self) -> &str {
        &self.id
    }

    /// Returns the route point the performer is heading to.
    pub fn current_point(&self) -> Option<&ClaimRoutePoint> {
        let id = self.current_point_id?;
        self.route_points.iter().find(|p| p.id == id)
    }

    pub fn emergency_contact_name(&self) -> Option<&str> {
        self.emergency_contact.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn emergency_contact_phone(&self) -> Option<&str> {
        self.emergency_contact.as_ref().and_then(|c| c.phone.as_deref())
    }

    pub fn taxi_offer_offer_id(&self) -> Option<&str> {
        self.taxi_offer.as_ref().and_then(|o| o.offer_id.as_deref())
    }

    pub fn taxi_offer_price_raw(&self) -> Option<f64> {
        self.taxi_offer.as_ref().and_then(|o| o.price_raw)
    }

    pub fn taxi_offer_price(&self) -> Option<&str> {
        self.taxi_offer.as_ref().and_then(|o| o.price.as_deref())
    }

    fn pricing_offer(&self) -> Option<&TaxiOffer> {
        self.pricing.as_ref().and_then(|p| p.offer.as_ref())
    }

    pub fn pricing_offer_offer_id(&self) -> Option<&str> {
        self.pricing_offer().and_then(|o| o.offer_id.as_deref())
    }

    pub fn pricing_offer_price_raw(&self) -> Option<f64> {
        self.pricing_offer().and_then(|o| o.price_raw)
    }

    pub fn pricing_offer_price(&self) -> Option<&str> {
        self.pricing_offer().and_then(|o| o.price.as_deref())
    }

    pub fn pricing_currency(&self) -> Option<&str> {
        self.pricing.as_ref().and_then(|p| p.currency.as_deref())
    }

    fn currency_rules(&self) -> Option<&CurrencyRules> {
        self.pricing.as_ref().and_then(|p| p.currency_rules.as_ref())
    }

    pub fn pricing_currency_rules_code(&self) -> Option<&str> {
        self.currency_rules().and_then(|r| r.code.as_deref())
    }

    pub fn pricing_currency_rules_text(&self) -> Option<&str> {
        self.currency_rules().and_then(|r| r.text.as_deref())
    }

    pub fn pricing_currency_rules_template(&self) -> Option<&str> {
        self.currency_rules().and_then(|r| r.template.as_deref())
    }

    pub fn pricing_currency_rules_sign(&self) -> Option<&str> {
        self.currency_rules().and_then(|r| r.sign.as_deref())
    }

    pub fn pricing_final_price(&self) -> Option<&str> {
        self.pricing.as_ref().and_then(|p| p.final_price.as_deref())
    }

    pub fn client_requirements_taxi_class(&self) -> Option<&TaxiClass> {
        self.client_requirements.as_ref().and_then(|r| r.taxi_class.as_ref())
    }

    pub fn client_requirements_cargo_type(&self) -> Option<&CargoType> {
        self.client_requirements.as_ref().and_then(|r| r.cargo_type.as_ref())
    }

    pub fn client_requirements_cargo_loaders(&self) -> Option<u32> {
        self.client_requirements.as_ref().and_then(|r| r.cargo_loaders)
    }

    pub fn client_requirements_cargo_options(&self) -> &[String] {
        self.client_requirements
            .as_ref()
            .map(|r| r.cargo_options.as_slice())
            .unwrap_or_default()
    }

    pub fn performer_info_courier_name(&self) -> Option<&str> {
        self.performer_info.as_ref().and_then(|p| p.courier_name.as_deref())
    }

    pub fn performer_info_legal_name(&self) -> Option<&str> {
        self.performer_info.as_ref().and_then(|p| p.legal_name.as_deref())
    }

    pub fn performer_info_car_model(&self) -> Option<&str> {
        self.performer_info.as_ref().and_then(|p| p.car_model.as_deref())
    }

    pub fn performer_info_car_number(&self) -> Option<&str> {
        self.performer_info.as_ref().and_then(|p| p.car_number.as_deref())
    }

    pub fn callback_properties_callback_url(&self) -> Option<&str> {
        self.callback_properties
            .as_ref()
            .and_then(|c| c.callback_url.as_deref())
    }

    pub fn c2c_data_payment_type(&self) -> Option<&str> {
        self.c2c_data.as_ref().and_then(|c| c.payment_type.as_deref())
    }

    pub fn c2c_data_payment_method_id(&self) -> Option<&str> {
        self.c2c_data.as_ref().and_then(|c| c.payment_method_id.as_deref())
    }
}

/// Short claim summary returned by accept and cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutClaim {
    #[serde(default)]
    pub id: String,
    pub status: Option<ClaimStatus>,
    pub version: Option<i64>,
    pub taxi_order_id: Option<String>,
}

impl CutClaim {
    pub fn claim_id(&self) -> &str {
        &self.id
    }
}

/// Result of the claim search operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchClaimsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims: Vec<Claim>,
}

/// Confirmation code the recipient hands to the courier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationCode {
    pub code: Option<String>,
    /// Remaining attempts.
    pub attempts: Option<u32>,
}
