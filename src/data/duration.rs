//! Human-friendly interval strings ("3s", "500ms", "1m", "1h").

use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Suffix to milliseconds multiplier (longer suffixes first so "ms" wins over "s").
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Parse an interval such as "3s", "1.5s", "250ms", "1m" or "2h".
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str
                .trim()
                .parse()
                .with_context(|| format!("invalid number in duration '{}'", s))?;
            if !val.is_finite() || val < 0.0 {
                bail!("duration must be a non-negative number: {}", s);
            }
            return Ok(Duration::from_millis((val * multiplier).round() as u64));
        }
    }

    bail!("Unknown duration format: {} (expected e.g. 3s, 500ms, 1m)", s)
}

/// Compact display form: "500ms", "3s", "1m", "1m30s", "2h".
pub fn format_interval(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1_000 {
        return format!("{}ms", millis);
    }
    let secs = d.as_secs();
    if secs % 3_600 == 0 {
        format!("{}h", secs / 3_600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else if secs > 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_duration("3s").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("1m").unwrap(), Duration::from_secs(60));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7_200));
        assert_eq!(parse_duration(" 1.5s ").unwrap(), Duration::from_millis(1_500));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("3").is_err());
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_millis(500)), "500ms");
        assert_eq!(format_interval(Duration::from_secs(3)), "3s");
        assert_eq!(format_interval(Duration::from_secs(60)), "1m");
        assert_eq!(format_interval(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_interval(Duration::from_secs(3_600)), "1h");
    }
}
