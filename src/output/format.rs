//! Text formatting for reported entries

use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::{Result, SearchError};

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;
const TIB: u64 = 1 << 40;

/// Format a size scaled to the largest binary unit not exceeding it.
///
/// The number is right-aligned in 9 columns and the unit left-aligned in 3,
/// so every size field has the same width. Bytes are shown without decimals.
pub fn format_size(bytes: u64) -> String {
    let (value, unit) = if bytes >= TIB {
        (bytes as f64 / TIB as f64, "TiB")
    } else if bytes >= GIB {
        (bytes as f64 / GIB as f64, "GiB")
    } else if bytes >= MIB {
        (bytes as f64 / MIB as f64, "MiB")
    } else if bytes >= KIB {
        (bytes as f64 / KIB as f64, "KiB")
    } else {
        return format!("{:>9} {:<3}", bytes, "B");
    };
    format!("{:>9.3} {:<3}", value, unit)
}

/// Local-time `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Modification time and size columns, ending with a separating space.
pub fn metadata_columns(path: &Path, metadata: &Metadata) -> Result<String> {
    let modified = metadata
        .modified()
        .map_err(|e| SearchError::traversal(path, e))?;
    Ok(format!(
        "{} {} ",
        format_timestamp(modified),
        format_size(metadata.len())
    ))
}
