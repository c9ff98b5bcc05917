//
//  yacargo
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table formatting helpers built on comfy-table.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::api::common::ClaimStatus;

/// Creates a table with the shared preset.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent builder for list tables.
///
/// ```rust,no_run
/// use yacargo::output::TableBuilder;
///
/// TableBuilder::new()
///     .headers(["ID", "STATUS"])
///     .row(["abc", "new"])
///     .print();
/// ```
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a claim status by phase: green while moving, blue when
/// delivered, red for failures, yellow while waiting for the client.
pub fn format_status(status: &ClaimStatus, color: bool) -> String {
    let text = status.as_str();
    if !color {
        return text.to_string();
    }
    use console::style;
    match status {
        ClaimStatus::DeliveredFinish | ClaimStatus::Delivered | ClaimStatus::ReturnedFinish => {
            style(text).blue().to_string()
        }
        ClaimStatus::ReadyForApproval
        | ClaimStatus::New
        | ClaimStatus::Estimating
        | ClaimStatus::PerformerLookup
        | ClaimStatus::PerformerDraft => style(text).yellow().to_string(),
        ClaimStatus::Other(_) => text.to_string(),
        s if s.is_final() => style(text).red().to_string(),
        _ => style(text).green().to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    use console::style;
    match (value, color) {
        (true, true) => style("Yes").green().to_string(),
        (false, true) => style("No").dim().to_string(),
        (true, false) => "Yes".to_string(),
        (false, false) => "No".to_string(),
    }
}

/// Renders an optional value, `-` when missing.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
