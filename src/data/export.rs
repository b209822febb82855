use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;

use crate::data::types::OwnershipEvent;

/// Export the loaded event history to CSV.
///
/// Columns follow the `OwnershipEvent` fields: old_owner, new_owner,
/// block_number, tx_hash, timestamp.
pub fn export_events_csv(events: &[OwnershipEvent], path: &str) -> Result<String, String> {
    let file = fs::File::create(path).map_err(|e| format!("Failed to create file: {e}"))?;
    let mut wtr = csv::Writer::from_writer(file);

    for event in events {
        wtr.serialize(event)
            .map_err(|e| format!("Failed to write CSV row: {e}"))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {e}"))?;

    Ok(format!("Exported {} events to {path}", events.len()))
}

/// Export the loaded event history to pretty-printed JSON.
pub fn export_events_json(events: &[OwnershipEvent], path: &str) -> Result<String, String> {
    let formatted = serde_json::to_string_pretty(events)
        .map_err(|e| format!("Failed to serialize JSON: {e}"))?;

    let mut file = fs::File::create(path).map_err(|e| format!("Failed to create file: {e}"))?;
    file.write_all(formatted.as_bytes())
        .map_err(|e| format!("Failed to write file: {e}"))?;

    Ok(format!("Exported {} events to {path}", events.len()))
}

/// Timestamped export path in the user's home directory (falls back to cwd).
pub fn default_export_path(extension: &str) -> String {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let stamp = Utc::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("owner-events-{stamp}.{extension}"))
        .to_string_lossy()
        .into_owned()
}
