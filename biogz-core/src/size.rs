//! Human-readable byte counts.

use crate::error::{BiogzError, Result};

const UNITS: [&str; 5] = ["bytes", "KB", "MB", "GB", "TB"];

/// Render `size` bytes with two decimals in the first unit (1024-based)
/// where the value drops below 1024. Anything past TB is reported in PB.
///
/// Rejects negative and non-finite input.
pub fn format_size(size: f64) -> Result<String> {
    if !size.is_finite() {
        return Err(BiogzError::InvalidArgument(format!(
            "size must be a real number, got {size}"
        )));
    }
    if size < 0.0 {
        return Err(BiogzError::InvalidArgument(format!(
            "size must be non-negative, got {size}"
        )));
    }
    Ok(render(size))
}

/// Infallible form for byte counts read from the filesystem.
pub fn format_bytes(size: u64) -> String {
    render(size as f64)
}

fn render(mut value: f64) -> String {
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}
