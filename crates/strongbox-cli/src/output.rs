//! Output formatting helpers for the CLI.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use strongbox_core::VaultRecord;

/// Shown in place of a secret unless `--reveal` is given.
pub const SECRET_MASK: &str = "********";

/// Convert a record to JSON for output.
///
/// `number` is the 1-based position shown to users.
pub fn record_json(number: usize, record: &VaultRecord, reveal: bool) -> serde_json::Value {
    let mut value = serde_json::json!({
        "number": number,
        "name": record.name(),
        "username": record.username(),
        "url": record.url(),
        "notes": record.notes(),
    });
    if reveal {
        value["secret"] = serde_json::Value::String(record.secret().expose().to_string());
    }
    value
}

/// Render the record list as a table.
pub fn record_table(records: &[VaultRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Name", "Username", "URL"]);

    for (index, record) in records.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            record.name().to_string(),
            record.username().to_string(),
            record.url().to_string(),
        ]);
    }

    table.to_string()
}

/// Print a single record in human-readable format.
pub fn print_record(number: usize, record: &VaultRecord, reveal: bool) {
    let secret = if reveal {
        record.secret().expose()
    } else {
        SECRET_MASK
    };

    println!("Record #{}", number);
    println!("Name:     {}", record.name());
    println!("Username: {}", record.username());
    println!("Password: {}", secret);
    println!("URL:      {}", record.url());
    println!("Notes:    {}", record.notes());
}
