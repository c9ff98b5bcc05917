//
//  yacargo
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting Module
//!
//! Renders API results either as human-readable tables or as pretty JSON.
//!
//! ## Output Formats
//!
//! | Format | Description | Use Case |
//! |--------|-------------|----------|
//! | `Table` | Tables and key/value blocks | Interactive terminal use |
//! | `Json` | The response as the API returned it | Scripting, `jq` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use yacargo::api::claims::CutClaim;
//! use yacargo::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&CutClaim::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod table;
mod views;

pub use table::*;
pub use views::DownloadSummary;

use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// Picks the format from the `--json` flag and the configured default.
    pub fn resolve(json_flag: bool, configured: &str) -> Self {
        if json_flag || configured.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a value as one compact JSON line, or as a table.
    ///
    /// Used when streaming journal pages.
    pub fn write_line<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Prints a warning to stderr in every format.
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Prints a status message. Suppressed in JSON mode so stdout stays
    /// parseable.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        match (self.format, self.color) {
            (OutputFormat::Json, _) => {}
            (_, true) => println!("{} {}", style("✓").green().bold(), msg),
            (_, false) => println!("✓ {}", msg),
        }
    }
}

/// Types that know how to render themselves for the terminal.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format() {
        assert_eq!(OutputFormat::resolve(true, "table"), OutputFormat::Json);
        assert_eq!(OutputFormat::resolve(false, "JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::resolve(false, "table"), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
