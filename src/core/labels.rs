use chrono::{DateTime, Utc};

/// Formats a bar timestamp as `YYYY-MM-DD HH:MM` in UTC.
///
/// Timestamps outside chrono's range fall back to the raw seconds value.
#[must_use]
pub fn format_bar_time(unix_seconds: i64) -> String {
    match DateTime::<Utc>::from_timestamp(unix_seconds, 0) {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => unix_seconds.to_string(),
    }
}

/// Formats a price label with a precision picked from the visible span.
#[must_use]
pub fn format_price(price: f64, span: f64) -> String {
    let decimals = match span.abs() {
        s if s >= 1_000.0 => 0,
        s if s >= 10.0 => 2,
        s if s >= 0.1 => 4,
        _ => 6,
    };
    format!("{price:.decimals$}")
}

/// Compact volume label (`950`, `12.3K`, `4.56M`).
#[must_use]
pub fn format_volume(volume: f64) -> String {
    let abs = volume.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.2}B", volume / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.2}M", volume / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", volume / 1_000.0)
    } else {
        format!("{volume:.0}")
    }
}
