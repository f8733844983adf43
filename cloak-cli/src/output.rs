//! Output formatting utilities

use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde::Serialize;

use cloak_core::domain::{FeeQuote, QuoteKind};
use cloak_core::OperationResult;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print a core result as a JSON envelope; failures are still returned
pub fn print_json_result<T: Serialize>(result: cloak_core::Result<T>) -> Result<()> {
    match result {
        Ok(data) => {
            println!("{}", serde_json::to_string_pretty(&OperationResult::ok(data))?);
            Ok(())
        }
        Err(e) => {
            let envelope = OperationResult::<T>::fail(&e);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Err(e.into())
        }
    }
}

/// Human-readable fee line; placeholders are flagged
pub fn format_quote(quote: &FeeQuote) -> String {
    match quote.kind {
        QuoteKind::Estimated => format!("{}", quote.fee),
        QuoteKind::Placeholder => format!("{} (placeholder, backend cannot estimate)", quote.fee),
    }
}
