//
//  yacargo
//  output/views.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal views of the API responses.

use super::{format_bool, format_status, or_dash, print_field, print_header, TableBuilder, TableOutput};
use crate::api::claims::{Claim, ClaimsJournal, ConfirmationCode, CutClaim, SearchClaimsResponse};
use crate::api::client::DownloadedFile;
use crate::api::performer::{PerformerPosition, VoiceForwarding};
use crate::api::reports::{ReportStatus, ReportTask};
use crate::util::truncate;

fn status_cell(claim_status: Option<&crate::api::common::ClaimStatus>, color: bool) -> String {
    claim_status
        .map(|s| format_status(s, color))
        .unwrap_or_else(|| "-".to_string())
}

impl TableOutput for Claim {
    fn print_table(&self, color: bool) {
        print_header(&format!("Claim {}", self.claim_id()));
        print_field("Status", &status_cell(self.status.as_ref(), color), color);
        print_field("Version", &or_dash(self.version), color);
        print_field("Created", &or_dash(self.created_ts.as_deref()), color);
        print_field("Updated", &or_dash(self.updated_ts.as_deref()), color);
        if let Some(price) = self.pricing_final_price().or(self.pricing_offer_price()) {
            let currency = self.pricing_currency().unwrap_or("");
            print_field("Price", format!("{} {}", price, currency).trim_end(), color);
        }
        if let Some(class) = self.client_requirements_taxi_class() {
            print_field("Taxi class", class.as_str(), color);
        }
        if let Some(name) = self.performer_info_courier_name() {
            let car = [self.performer_info_car_model(), self.performer_info_car_number()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            print_field("Courier", format!("{} {}", name, car).trim_end(), color);
        }
        if let Some(state) = &self.available_cancel_state {
            print_field("Cancel", state.as_str(), color);
        }
        if let Some(comment) = &self.comment {
            print_field("Comment", comment, color);
        }
        for warning in &self.warnings {
            print_field("Warning", &or_dash(warning.message.as_deref()), color);
        }
        for error in &self.error_messages {
            print_field("Error", &format!("{}: {}", error.code, error.message), color);
        }

        if !self.route_points.is_empty() {
            println!();
            let mut table = TableBuilder::new()
                .color(color)
                .headers(["ID", "#", "TYPE", "ADDRESS", "CONTACT", "VISIT"]);
            for point in &self.route_points {
                let current = self.current_point_id == Some(point.id);
                table = table.row([
                    if current { format!("{} *", point.id) } else { point.id.to_string() },
                    or_dash(point.visit_order),
                    or_dash(point.point_type.as_ref()),
                    truncate(point.address_fullname().unwrap_or("-"), 48),
                    or_dash(point.contact_phone()),
                    or_dash(point.visit_status.as_ref()),
                ]);
            }
            table.print();
        }

        if !self.items.is_empty() {
            let mut table = TableBuilder::new()
                .color(color)
                .headers(["TITLE", "QTY", "FROM", "TO", "WEIGHT"]);
            for item in &self.items {
                table = table.row([
                    truncate(item.title.as_deref().unwrap_or("-"), 40),
                    or_dash(item.quantity),
                    or_dash(item.pickup_point),
                    or_dash(item.droppof_point),
                    or_dash(item.weight),
                ]);
            }
            table.print();
        }
    }
}

impl TableOutput for SearchClaimsResponse {
    fn print_table(&self, color: bool) {
        if self.claims.is_empty() {
            println!("No claims found");
            return;
        }
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "STATUS", "VERSION", "CREATED", "PRICE"]);
        for claim in &self.claims {
            table = table.row([
                claim.claim_id().to_string(),
                status_cell(claim.status.as_ref(), color),
                or_dash(claim.version),
                or_dash(claim.created_ts.as_deref()),
                or_dash(claim.pricing_final_price().or(claim.pricing_offer_price())),
            ]);
        }
        table.print();
    }
}

impl TableOutput for CutClaim {
    fn print_table(&self, color: bool) {
        print_field("Claim", self.claim_id(), color);
        print_field("Status", &status_cell(self.status.as_ref(), color), color);
        print_field("Version", &or_dash(self.version), color);
        if let Some(order) = &self.taxi_order_id {
            print_field("Taxi order", order, color);
        }
    }
}

impl TableOutput for ConfirmationCode {
    fn print_table(&self, color: bool) {
        print_field("Code", &or_dash(self.code.as_deref()), color);
        print_field("Attempts left", &or_dash(self.attempts), color);
    }
}

impl TableOutput for ClaimsJournal {
    fn print_table(&self, color: bool) {
        if !self.events.is_empty() {
            let mut table = TableBuilder::new()
                .color(color)
                .headers(["CLAIM", "CHANGE", "UPDATED", "STATUS", "PRICE"]);
            for event in &self.events {
                let price = event
                    .new_price
                    .as_deref()
                    .map(|p| format!("{} {}", p, event.new_currency.as_deref().unwrap_or("")).trim_end().to_string());
                table = table.row([
                    event.claim_id.clone(),
                    event.change_type.clone(),
                    event.updated_ts.clone(),
                    status_cell(event.new_status.as_ref(), color),
                    or_dash(price),
                ]);
            }
            table.print();
        }
        print_field("Cursor", &or_dash(self.cursor.as_deref()), color);
    }
}

impl TableOutput for PerformerPosition {
    fn print_table(&self, color: bool) {
        if self.position.is_none() {
            println!("Position is not available");
            return;
        }
        print_field("Latitude", &or_dash(self.position_lat()), color);
        print_field("Longitude", &or_dash(self.position_lon()), color);
        print_field("Time", &or_dash(self.position_time().map(|t| t.to_rfc3339())), color);
        print_field("Accuracy, m", &or_dash(self.position_accuracy()), color);
        print_field("Speed, km/h", &or_dash(self.position_speed()), color);
        print_field("Direction", &or_dash(self.position_direction()), color);
    }
}

impl TableOutput for VoiceForwarding {
    fn print_table(&self, color: bool) {
        print_field("Phone", &or_dash(self.phone.as_deref()), color);
        print_field("Extension", &or_dash(self.ext.as_deref()), color);
        print_field("Valid for, s", &or_dash(self.ttl_seconds), color);
    }
}

impl TableOutput for ReportTask {
    fn print_table(&self, color: bool) {
        print_field("Task", &self.task_id, color);
    }
}

impl TableOutput for ReportStatus {
    fn print_table(&self, color: bool) {
        print_field("Task", &self.task_id, color);
        print_field("Status", &or_dash(self.status.as_deref()), color);
        print_field("Ready", &format_bool(self.is_ready(), color), color);
        if let (Some(since), Some(till)) = (self.request_since_date(), self.request_till_date()) {
            print_field("Period", &format!("{} .. {}", since, till), color);
        }
        if let Some(report_id) = self.report_id() {
            print_field("Report", &report_id, color);
        }
    }
}

/// JSON view of a saved download.
#[derive(Debug, serde::Serialize)]
pub struct DownloadSummary {
    pub path: String,
    pub bytes_written: u64,
    pub content_type: Option<String>,
}

impl From<&DownloadedFile> for DownloadSummary {
    fn from(file: &DownloadedFile) -> Self {
        Self {
            path: file.path.display().to_string(),
            bytes_written: file.bytes_written,
            content_type: file.content_type.clone(),
        }
    }
}

impl TableOutput for DownloadSummary {
    fn print_table(&self, color: bool) {
        print_field("Saved", &self.path, color);
        print_field("Size", &crate::util::format_size(self.bytes_written), color);
        if let Some(content_type) = &self.content_type {
            print_field("Type", content_type, color);
        }
    }
}
