//
//  yacargo
//  api/common/enums.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Enumerated value sets of the cargo API.
//!
//! The server owns these sets and extends them over time, so each enum is
//! open: the known values are variants, anything else the server sends
//! deserializes into `Other(String)` and is logged instead of failing the
//! whole response. Values supplied by the caller go through [`FromStr`]
//! (or the variants directly) and must belong to the known set.
//!
//! The client never computes transitions between these values.
//!
//! # Claim Statuses
//!
//! * `new` - Claim created, not estimated yet
//! * `estimating` / `estimating_failed` - Price and vehicle estimation
//! * `ready_for_approval` - Estimated, waiting for `claim_accept`
//! * `accepted` ... `performer_found` - Performer lookup
//! * `pickup_arrived` ... `delivered_finish` - Delivery in progress and done
//! * `returning` ... `returned_finish` - Cargo is being returned
//! * `failed`, `cancelled*` - Terminal failures and cancellations
//!
//! [`FromStr`]: std::str::FromStr

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ApiError;

macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value this client does not know yet. Only produced when
            /// decoding server responses.
            Other(String),
        }

        impl $name {
            /// Every known value, in documentation order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// Returns `false` for [`Self::Other`].
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }

            /// Fails with a parameter error for [`Self::Other`].
            ///
            /// Request objects decoded from JSON go through serde, which
            /// accepts unknown values; this brings them back under the same
            /// rule as [`FromStr`].
            pub fn ensure_known(&self) -> Result<(), ApiError> {
                match self {
                    Self::Other(value) => Err(unknown_value($label, value, Self::ALL)),
                    _ => Ok(()),
                }
            }

            fn from_wire(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ApiError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match Self::from_wire(value) {
                    Self::Other(_) => Err(unknown_value($label, value, Self::ALL)),
                    known => Ok(known),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                let value = Self::from_wire(&raw);
                if !value.is_known() {
                    tracing::warn!("Unknown {} value received from server: {}", $label, raw);
                }
                Ok(value)
            }
        }
    };
}

macro_rules! code_set {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal, $min:literal ..= $max:literal)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u8);

        impl $name {
            /// Creates a code, rejecting values outside the documented set.
            pub fn new(code: u8) -> Result<Self, ApiError> {
                if !($min..=$max).contains(&code) {
                    return Err(ApiError::param(format!(
                        "\"{}\" should be between {} and {}, got {}",
                        $label, $min, $max, code
                    )));
                }
                Ok(Self(code))
            }

            /// Returns the numeric code.
            pub fn get(self) -> u8 {
                self.0
            }

            /// Returns `true` if the code is inside the documented set.
            ///
            /// Codes decoded from a response are not range-checked.
            pub fn is_known(self) -> bool {
                ($min..=$max).contains(&self.0)
            }

            /// Fails with a parameter error outside the documented set.
            pub fn ensure_known(self) -> Result<(), ApiError> {
                Self::new(self.0).map(|_| ())
            }

            /// Every documented code.
            pub fn all() -> impl Iterator<Item = Self> {
                ($min..=$max).map(Self)
            }
        }

        impl TryFrom<u8> for $name {
            type Error = ApiError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                Self::new(code)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

fn unknown_value<T: fmt::Display>(label: &str, value: &str, allowed: &[T]) -> ApiError {
    let list = allowed
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    ApiError::param(format!(
        "\"{}\" should be one of [{}], got {}",
        label, list, value
    ))
}

open_enum! {
    /// Status of a claim, as reported by the server.
    ClaimStatus ("status") {
        /// New claim.
        New => "new",
        /// Vehicle type and price are being estimated.
        Estimating => "estimating",
        /// Estimation failed, see the claim's `error_messages`.
        EstimatingFailed => "estimating_failed",
        /// Estimated, waiting for the client to accept.
        ReadyForApproval => "ready_for_approval",
        /// Accepted by the client.
        Accepted => "accepted",
        /// Taken into processing, before an order is created.
        PerformerLookup => "performer_lookup",
        /// Looking for a driver.
        PerformerDraft => "performer_draft",
        /// Driver found and heading to the pickup point.
        PerformerFound => "performer_found",
        /// No driver found; the claim may be retried later.
        PerformerNotFound => "performer_not_found",
        /// Driver arrived at the pickup point.
        PickupArrived => "pickup_arrived",
        /// Driver waits for the sender's confirmation code.
        ReadyForPickupConfirmation => "ready_for_pickup_confirmation",
        /// Cargo picked up.
        Pickuped => "pickuped",
        /// Driver arrived at a drop-off point.
        DeliveryArrived => "delivery_arrived",
        /// Driver waits for the recipient's confirmation code.
        ReadyForDeliveryConfirmation => "ready_for_delivery_confirmation",
        /// Waiting for payment on delivery.
        PayWaiting => "pay_waiting",
        /// Cargo delivered.
        Delivered => "delivered",
        /// Delivery finished.
        DeliveredFinish => "delivered_finish",
        /// Driver is returning the cargo.
        Returning => "returning",
        /// Driver arrived at the return point.
        ReturnArrived => "return_arrived",
        /// Driver waits for the return confirmation code.
        ReadyForReturnConfirmation => "ready_for_return_confirmation",
        /// Cargo returned.
        Returned => "returned",
        /// Return finished.
        ReturnedFinish => "returned_finish",
        /// The order could not be started.
        Failed => "failed",
        /// Cancelled by the client for free.
        Cancelled => "cancelled",
        /// Cancelled by the client with payment.
        CancelledWithPayment => "cancelled_with_payment",
        /// Cancelled by the driver before pickup.
        CancelledByTaxi => "cancelled_by_taxi",
        /// Cancelled with payment, cargo stays with the driver.
        CancelledWithItemsOnHands => "cancelled_with_items_on_hands",
    }
}

impl ClaimStatus {
    /// Returns `true` for statuses after which the server reports no further
    /// changes for the claim.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::DeliveredFinish
                | Self::ReturnedFinish
                | Self::Failed
                | Self::Cancelled
                | Self::CancelledWithPayment
                | Self::CancelledByTaxi
                | Self::CancelledWithItemsOnHands
                | Self::EstimatingFailed
                | Self::PerformerNotFound
        )
    }
}

open_enum! {
    /// Kind of cancellation currently available for a claim.
    CancelState ("cancel_state") {
        /// Free cancellation.
        Free => "free",
        /// Paid cancellation.
        Paid => "paid",
    }
}

open_enum! {
    /// Progress of the performer at one route point.
    VisitStatus ("visit_status") {
        /// Not visited yet.
        Pending => "pending",
        /// Courier arrived, cargo not handed over yet.
        Arrived => "arrived",
        /// Cargo handed over or picked up.
        Visited => "visited",
        /// Recipient refused the cargo; it goes to the return point.
        Skipped => "skipped",
    }
}

open_enum! {
    /// Role of a route point.
    PointType ("type") {
        /// Pickup point, exactly one per claim.
        Source => "source",
        /// Drop-off point.
        Destination => "destination",
        /// Optional return point, at most one per claim.
        Return => "return",
    }
}

open_enum! {
    /// Subject of a settlement, for fiscal receipts.
    PaymentSubject ("payment_subject") {
        /// Goods.
        Commodity => "commodity",
        /// Excisable goods.
        Excise => "excise",
        /// Work.
        Job => "job",
        /// Service.
        Service => "service",
        /// Gambling bet.
        GamblingBet => "gambling_bet",
        /// Gambling prize.
        GamblingPrize => "gambling_prize",
        /// Lottery ticket.
        Lottery => "lottery",
        /// Lottery prize.
        LotteryPrize => "lottery_prize",
        /// Results of intellectual activity.
        IntellectualActivity => "intellectual_activity",
        /// Payment.
        Payment => "payment",
        /// Agent commission.
        AgentCommission => "agent_commission",
        /// Property rights.
        PropertyRight => "property_right",
        /// Non-operating gain.
        NonOperatingGain => "non_operating_gain",
        /// Insurance premium.
        InsurancePremium => "insurance_premium",
        /// Sales tax.
        SalesTax => "sales_tax",
        /// Resort fee.
        ResortFee => "resort_fee",
        /// Several subjects.
        Composite => "composite",
        /// Anything else.
        Another => "another",
    }
}

open_enum! {
    /// Mode of a settlement, for fiscal receipts.
    PaymentMode ("payment_mode") {
        /// Full prepayment.
        FullPrepayment => "full_prepayment",
        /// Partial prepayment.
        PartialPrepayment => "partial_prepayment",
        /// Advance.
        Advance => "advance",
        /// Full payment.
        FullPayment => "full_payment",
        /// Partial payment and credit.
        PartialPayment => "partial_payment",
        /// Credit.
        Credit => "credit",
        /// Credit repayment.
        CreditPayment => "credit_payment",
    }
}

open_enum! {
    /// Tariff class requested for a claim.
    TaxiClass ("taxi_class") {
        /// Passenger car.
        Express => "express",
        /// Courier.
        Courier => "courier",
        /// Truck.
        Cargo => "cargo",
    }
}

open_enum! {
    /// Truck size for the `cargo` taxi class.
    CargoType ("cargo_type") {
        /// 190 x 100 x 90 cm.
        Van => "van",
        /// 260 x 160 x 150 cm.
        LcvM => "lcv_m",
        /// 400 x 190 x 200 cm.
        LcvL => "lcv_l",
    }
}

open_enum! {
    /// Document that can be downloaded for a claim.
    DocumentType ("document_type") {
        /// Acceptance certificate.
        Act => "act",
    }
}

open_enum! {
    /// State filter of the claim search.
    SearchState ("state") {
        /// Claims currently being executed.
        Active => "active",
    }
}

open_enum! {
    /// Where a claim warning comes from.
    WarningSource ("source") {
        /// Client requirements.
        ClientRequirements => "client_requirements",
        /// Tariff requirements.
        TaxiRequirements => "taxi_requirements",
    }
}

open_enum! {
    /// Machine-readable code of a claim warning.
    WarningCode ("code") {
        /// Cargo does not fit into the requested vehicle.
        NotFitInCar => "not_fit_in_car",
        /// Some requirements are unavailable for the tariff.
        RequirementUnavailable => "requirement_unavailable",
    }
}

code_set! {
    /// VAT rate of an item:
    ///
    /// * `1` - No VAT
    /// * `2` - 0%
    /// * `3` - 10%
    /// * `4` - 20%
    /// * `5` - 10/110
    /// * `6` - 20/120
    VatCode ("vat_code", 1..=6)
}

code_set! {
    /// Taxation system of the seller:
    ///
    /// * `1` - General
    /// * `2` - Simplified, income
    /// * `3` - Simplified, income minus expenses
    /// * `4` - Unified tax on imputed income
    /// * `5` - Unified agricultural tax
    /// * `6` - Patent
    TaxSystemCode ("tax_system_code", 1..=6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_claim_status_parses() {
        assert_eq!(ClaimStatus::ALL.len(), 27);
        for status in ClaimStatus::ALL {
            assert_eq!(&status.as_str().parse::<ClaimStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_value_is_param_error() {
        let err = "teleported".parse::<ClaimStatus>().unwrap_err();
        assert!(matches!(err, ApiError::Param(_)));
        assert!("invalid".parse::<CancelState>().is_err());
        assert!("arrived".parse::<PointType>().is_err());
    }

    #[test]
    fn test_every_small_set_parses() {
        for v in CancelState::ALL {
            assert!(v.as_str().parse::<CancelState>().is_ok());
        }
        for v in VisitStatus::ALL {
            assert!(v.as_str().parse::<VisitStatus>().is_ok());
        }
        for v in PointType::ALL {
            assert!(v.as_str().parse::<PointType>().is_ok());
        }
        for v in PaymentSubject::ALL {
            assert!(v.as_str().parse::<PaymentSubject>().is_ok());
        }
        for v in PaymentMode::ALL {
            assert!(v.as_str().parse::<PaymentMode>().is_ok());
        }
        assert_eq!(PaymentSubject::ALL.len(), 18);
        assert_eq!(PaymentMode::ALL.len(), 7);
    }

    #[test]
    fn test_deserialize_unknown_is_other() {
        let status: ClaimStatus = serde_json::from_str("\"teleported\"").unwrap();
        assert_eq!(status, ClaimStatus::Other("teleported".to_string()));
        assert!(!status.is_known());
        assert_eq!(status.as_str(), "teleported");
        assert!(matches!(status.ensure_known(), Err(ApiError::Param(_))));
        assert!(ClaimStatus::New.ensure_known().is_ok());
    }

    #[test]
    fn test_serialize_uses_wire_name() {
        let json = serde_json::to_string(&ClaimStatus::ReadyForPickupConfirmation).unwrap();
        assert_eq!(json, "\"ready_for_pickup_confirmation\"");
        assert_eq!(CargoType::LcvM.to_string(), "lcv_m");
    }

    #[test]
    fn test_code_sets() {
        for code in 1..=6u8 {
            assert_eq!(VatCode::new(code).unwrap().get(), code);
            assert!(TaxSystemCode::try_from(code).is_ok());
        }
        assert!(VatCode::new(0).is_err());
        assert!(VatCode::new(7).is_err());
        assert!(TaxSystemCode::new(7).is_err());
        assert_eq!(VatCode::all().count(), 6);
        assert_eq!(serde_json::to_string(&VatCode::new(4).unwrap()).unwrap(), "4");

        let decoded: VatCode = serde_json::from_str("9").unwrap();
        assert!(!decoded.is_known());
        assert!(decoded.ensure_known().is_err());
    }

    #[test]
    fn test_final_statuses() {
        assert!(ClaimStatus::DeliveredFinish.is_final());
        assert!(!ClaimStatus::PerformerFound.is_final());
        assert!(!ClaimStatus::Other("x".to_string()).is_final());
    }
}
