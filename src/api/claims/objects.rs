//
//  yacargo
//  api/claims/objects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request value objects for claims.
//!
//! These are the building blocks of a claim draft: cargo items, route
//! points and their contact, address and payment details. Each type
//! mirrors one JSON object of the request body, so serde produces the wire
//! shape directly and optional fields are left out when unset.
//!
//! Every type implements [`Validate`]; calling it on the outermost object
//! checks the whole tree.
//!
//! # Example
//!
//! ```rust
//! use yacargo::api::claims::{Address, CargoItem, Contact, RoutePoint};
//! use yacargo::api::common::{PointType, Validate};
//!
//! let source = RoutePoint::new(
//!     1,
//!     1,
//!     PointType::Source,
//!     Contact::new("Rick", "+79000000000"),
//!     Address::new("Moscow, Lva Tolstogo 16", [37.588, 55.733]),
//! );
//! assert_eq!(source.contact_name(), "Rick");
//!
//! let item = CargoItem::new(1, 2, "Box", 100.0, "RUB", 1);
//! assert!(item.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::api::common::validate::{self, Validate};
use crate::api::common::{
    ApiError, PaymentMode, PaymentSubject, PointType, TaxSystemCode, VatCode,
};

type Result<T> = std::result::Result<T, ApiError>;

/// Cargo dimensions in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CargoItemSizes {
    /// Length, metres.
    pub length: f64,
    /// Width, metres.
    pub width: f64,
    /// Height, metres.
    pub height: f64,
}

impl CargoItemSizes {
    /// Creates a size triple.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }
}

impl Validate for CargoItemSizes {
    fn validate(&self) -> Result<()> {
        validate::positive("size.length", self.length)?;
        validate::positive("size.width", self.width)?;
        validate::positive("size.height", self.height)
    }
}

/// Fiscal receipt details of one cargo item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFiscalization {
    /// VAT rate code.
    pub vat_code: VatCode,

    /// Subject of the settlement.
    pub payment_subject: PaymentSubject,

    /// Mode of the settlement.
    pub payment_mode: PaymentMode,

    /// Marking code: 32 uppercase hex bytes separated by spaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,

    /// Two-letter country of origin, e.g. `RU`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin_code: Option<String>,

    /// Customs declaration number, 1 to 32 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customs_declaration_number: Option<String>,

    /// Excise amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excise: Option<f64>,
}

impl ItemFiscalization {
    /// Creates fiscal details with the three mandatory fields.
    pub fn new(vat_code: VatCode, payment_subject: PaymentSubject, payment_mode: PaymentMode) -> Self {
        Self {
            vat_code,
            payment_subject,
            payment_mode,
            product_code: None,
            country_of_origin_code: None,
            customs_declaration_number: None,
            excise: None,
        }
    }
}

impl Validate for ItemFiscalization {
    fn validate(&self) -> Result<()> {
        self.vat_code.ensure_known()?;
        self.payment_subject.ensure_known()?;
        self.payment_mode.ensure_known()?;
        if let Some(code) = &self.product_code {
            validate::product_code("product_code", code)?;
        }
        if let Some(country) = &self.country_of_origin_code {
            validate::country_code("country_of_origin_code", country)?;
        }
        if let Some(number) = &self.customs_declaration_number {
            validate::length_between("customs_declaration_number", number, 1, 32)?;
        }
        if let Some(excise) = self.excise {
            validate::non_negative("excise", excise)?;
        }
        Ok(())
    }
}

/// Contact person at a route point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact name.
    pub name: String,

    /// Contact phone, e.g. `+79000000000`.
    pub phone: String,

    /// Contact email. The server requires it for source and return points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Contact {
    /// Creates a contact without email.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
        }
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Validate for Contact {
    fn validate(&self) -> Result<()> {
        validate::non_empty("contact.name", &self.name)?;
        validate::non_empty("contact.phone", &self.phone)
    }
}

/// Address of a route point.
///
/// Also used when decoding route points from responses, hence the serde
/// defaults on the mandatory fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Full address, e.g. `Moscow, Lva Tolstogo 16`.
    #[serde(default)]
    pub fullname: String,

    /// `[longitude, latitude]`.
    #[serde(default)]
    pub coordinates: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub porch: Option<String>,

    /// Floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfloor: Option<String>,

    /// Flat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sflat: Option<String>,

    /// Intercom code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_code: Option<String>,

    /// Directions for the courier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Yandex Maps URI of the place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Address {
    /// Creates an address from its full text and `[lon, lat]`.
    pub fn new(fullname: impl Into<String>, coordinates: [f64; 2]) -> Self {
        Self {
            fullname: fullname.into(),
            coordinates: coordinates.to_vec(),
            ..Default::default()
        }
    }

    /// Sets the courier comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Longitude, if coordinates are present.
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().copied()
    }

    /// Latitude, if coordinates are present.
    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).copied()
    }
}

impl Validate for Address {
    fn validate(&self) -> Result<()> {
        validate::non_empty("address.fullname", &self.fullname)?;
        validate::coordinates("address.coordinates", &self.coordinates)
    }
}

/// Buyer details for the payment-on-delivery receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFiscalization {
    /// Company name or full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Taxpayer number, 10 or 12 digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone in E.164 format without `+`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Validate for CustomerFiscalization {
    fn validate(&self) -> Result<()> {
        if let Some(inn) = &self.inn {
            validate::inn("customer.inn", inn)?;
        }
        Ok(())
    }
}

/// Payment collected by the courier at a destination point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOnDelivery {
    /// Client order id.
    pub client_order_id: String,

    /// Amount in roubles.
    pub cost: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerFiscalization>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<TaxSystemCode>,
}

impl PaymentOnDelivery {
    /// Creates a payment with the mandatory fields.
    pub fn new(client_order_id: impl Into<String>, cost: f64) -> Self {
        Self {
            client_order_id: client_order_id.into(),
            cost,
            customer: None,
            tax_system_code: None,
        }
    }
}

impl Validate for PaymentOnDelivery {
    fn validate(&self) -> Result<()> {
        validate::non_empty("payment_on_delivery.client_order_id", &self.client_order_id)?;
        validate::non_negative("payment_on_delivery.cost", self.cost)?;
        if let Some(code) = self.tax_system_code {
            code.ensure_known()?;
        }
        self.customer.validate()
    }
}

/// One cargo item of a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    /// `point_id` of the pickup route point.
    pub pickup_point: i64,

    /// `point_id` of the drop-off route point. The wire name keeps the
    /// server's spelling.
    pub droppof_point: i64,

    pub title: String,

    /// Price of one unit.
    pub cost_value: f64,

    /// Three-letter currency code, e.g. `RUB`.
    pub cost_currency: String,

    pub quantity: u32,

    /// Client-side article number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<CargoItemSizes>,

    /// Weight, kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscalization: Option<ItemFiscalization>,
}

impl CargoItem {
    /// Creates an item with the mandatory fields.
    pub fn new(
        pickup_point: i64,
        droppof_point: i64,
        title: impl Into<String>,
        cost_value: f64,
        cost_currency: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            pickup_point,
            droppof_point,
            title: title.into(),
            cost_value,
            cost_currency: cost_currency.into(),
            quantity,
            extra_id: None,
            size: None,
            weight: None,
            fiscalization: None,
        }
    }

    pub fn with_size(mut self, size: CargoItemSizes) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_fiscalization(mut self, fiscalization: ItemFiscalization) -> Self {
        self.fiscalization = Some(fiscalization);
        self
    }

    pub fn with_extra_id(mut self, extra_id: impl Into<String>) -> Self {
        self.extra_id = Some(extra_id.into());
        self
    }
}

impl Validate for CargoItem {
    fn validate(&self) -> Result<()> {
        validate::not_equal("pickup_point", &self.pickup_point, "droppof_point", &self.droppof_point)?;
        validate::non_empty("title", &self.title)?;
        validate::non_negative("cost_value", self.cost_value)?;
        validate::exact_length("cost_currency", &self.cost_currency, 3)?;
        validate::at_least("quantity", self.quantity, 1)?;
        if let Some(weight) = self.weight {
            validate::positive("weight", weight)?;
        }
        self.size.validate()?;
        self.fiscalization.validate()
    }
}

/// One point of the claim route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Client-assigned id, referenced by the items.
    pub point_id: i64,

    /// Position in the visiting order, starting at 1.
    pub visit_order: u32,

    pub contact: Contact,

    pub address: Address,

    #[serde(rename = "type")]
    pub point_type: PointType,

    /// Hand over without a confirmation code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_confirmation: Option<bool>,

    /// Only allowed on destination points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_on_delivery: Option<PaymentOnDelivery>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_order_id: Option<String>,

    /// Code the courier shows at pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_code: Option<String>,
}

impl RoutePoint {
    /// Creates a route point with the mandatory fields.
    pub fn new(
        point_id: i64,
        visit_order: u32,
        point_type: PointType,
        contact: Contact,
        address: Address,
    ) -> Self {
        Self {
            point_id,
            visit_order,
            contact,
            address,
            point_type,
            skip_confirmation: None,
            payment_on_delivery: None,
            external_order_id: None,
            pickup_code: None,
        }
    }

    pub fn with_payment_on_delivery(mut self, payment: PaymentOnDelivery) -> Self {
        self.payment_on_delivery = Some(payment);
        self
    }

    pub fn with_skip_confirmation(mut self, skip: bool) -> Self {
        self.skip_confirmation = Some(skip);
        self
    }

    pub fn with_external_order_id(mut self, id: impl Into<String>) -> Self {
        self.external_order_id = Some(id.into());
        self
    }

    pub fn with_pickup_code(mut self, code: impl Into<String>) -> Self {
        self.pickup_code = Some(code.into());
        self
    }

    pub fn contact_name(&self) -> &str {
        &self.contact.name
    }

    pub fn contact_phone(&self) -> &str {
        &self.contact.phone
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.contact.email.as_deref()
    }

    pub fn address_fullname(&self) -> &str {
        &self.address.fullname
    }

    pub fn address_coordinates(&self) -> &[f64] {
        &self.address.coordinates
    }
}

impl Validate for RoutePoint {
    fn validate(&self) -> Result<()> {
        self.point_type.ensure_known()?;
        self.contact.validate()?;
        self.address.validate()?;
        if self.payment_on_delivery.is_some() && self.point_type != PointType::Destination {
            return Err(ApiError::param(format!(
                "\"payment_on_delivery\" is only allowed on destination points, point {} is {}",
                self.point_id, self.point_type
            )));
        }
        self.payment_on_delivery.validate()
    }
}

/// Additional requirement attached to a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequirement {
    /// Requirement kind.
    #[serde(rename = "type")]
    pub requirement_type: String,

    /// Logistic group the requirement applies to.
    pub logistic_group: String,
}

impl ClaimRequirement {
    pub fn new(requirement_type: impl Into<String>, logistic_group: impl Into<String>) -> Self {
        Self {
            requirement_type: requirement_type.into(),
            logistic_group: logistic_group.into(),
        }
    }
}

impl Validate for ClaimRequirement {
    fn validate(&self) -> Result<()> {
        validate::non_empty("requirement.type", &self.requirement_type)?;
        validate::non_empty("requirement.logistic_group", &self.logistic_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(id: i64, point_type: PointType) -> RoutePoint {
        RoutePoint::new(
            id,
            id as u32,
            point_type,
            Contact::new("Rick", "+79000000000"),
            Address::new("Moscow, Lva Tolstogo 16", [37.588, 55.733]),
        )
    }

    #[test]
    fn test_route_point_round_trip() {
        let p = point(1, PointType::Source);
        assert_eq!(p.contact_name(), "Rick");
        assert_eq!(p.contact_phone(), "+79000000000");
        assert_eq!(p.contact_email(), None);
        assert_eq!(p.address_fullname(), "Moscow, Lva Tolstogo 16");
        assert_eq!(p.address_coordinates(), &[37.588, 55.733]);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_route_point_wire_shape() {
        let value = serde_json::to_value(point(2, PointType::Destination)).unwrap();
        assert_eq!(value["type"], "destination");
        assert_eq!(value["contact"], json!({"name": "Rick", "phone": "+79000000000"}));
        assert!(value.get("skip_confirmation").is_none());
    }

    #[test]
    fn test_payment_only_on_destination() {
        let payment = PaymentOnDelivery::new("order-1", 100.0);
        let ok = point(2, PointType::Destination).with_payment_on_delivery(payment.clone());
        assert!(ok.validate().is_ok());

        let bad = point(1, PointType::Source).with_payment_on_delivery(payment);
        assert!(matches!(bad.validate(), Err(ApiError::Param(_))));
    }

    #[test]
    fn test_item_rules() {
        assert!(CargoItem::new(1, 2, "Box", 10.0, "RUB", 1).validate().is_ok());
        assert!(CargoItem::new(1, 1, "Box", 10.0, "RUB", 1).validate().is_err());
        assert!(CargoItem::new(1, 2, "Box", 10.0, "RUB", 0).validate().is_err());
        assert!(CargoItem::new(1, 2, "Box", 10.0, "RUBL", 1).validate().is_err());
        assert!(CargoItem::new(1, 2, "Box", 10.0, "RUB", 1)
            .with_weight(0.0)
            .validate()
            .is_err());
        assert!(CargoItem::new(1, 2, "Box", 10.0, "RUB", 1)
            .with_size(CargoItemSizes::new(0.1, 0.0, 0.1))
            .validate()
            .is_err());
    }

    #[test]
    fn test_fiscalization_rules() {
        let mut fiscal = ItemFiscalization::new(
            VatCode::new(1).unwrap(),
            PaymentSubject::Commodity,
            PaymentMode::FullPayment,
        );
        assert!(fiscal.validate().is_ok());

        fiscal.country_of_origin_code = Some("Russia".to_string());
        assert!(fiscal.validate().is_err());
        fiscal.country_of_origin_code = Some("RU".to_string());
        fiscal.customs_declaration_number = Some("1".repeat(33));
        assert!(fiscal.validate().is_err());
    }

    #[test]
    fn test_fiscalization_from_unknown_json() {
        let fiscal: ItemFiscalization = serde_json::from_value(json!({
            "vat_code": 1,
            "payment_subject": "bitcoin",
            "payment_mode": "full_payment"
        }))
        .unwrap();
        assert!(matches!(fiscal.validate(), Err(ApiError::Param(_))));
    }

    #[test]
    fn test_address_coordinates() {
        let mut address = Address::new("Somewhere", [37.5, 55.7]);
        assert_eq!(address.longitude(), Some(37.5));
        assert_eq!(address.latitude(), Some(55.7));
        address.coordinates.push(1.0);
        assert!(address.validate().is_err());
    }

    #[test]
    fn test_address_rejects_non_finite_coordinates() {
        assert!(Address::new("Somewhere", [f64::NAN, 55.0]).validate().is_err());
        assert!(Address::new("Somewhere", [37.5, f64::NEG_INFINITY]).validate().is_err());
        assert!(Address::new("Somewhere", [37.5, 55.0]).validate().is_ok());
    }

    #[test]
    fn test_customer_inn() {
        let customer = CustomerFiscalization {
            inn: Some("123".to_string()),
            ..Default::default()
        };
        let mut payment = PaymentOnDelivery::new("order-1", 10.0);
        payment.customer = Some(customer);
        assert!(payment.validate().is_err());
    }
}
