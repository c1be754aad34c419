//! Deterministic JSON reports.

use hra_domain::RunSummary;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for report serialization.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to JSON with 2-space indentation and a trailing
/// newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// The JSON report of a run.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json_report(summary: &RunSummary) -> Result<String, ReportError> {
    to_json_stable(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hra_domain::{CheckResult, Timings};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use uuid::Uuid;

    #[test]
    fn test_json_report() {
        let summary = RunSummary {
            passed: 1,
            failed: 0,
            digest: "1 check(s) passed, 0 check(s) failed".to_string(),
            results: vec![CheckResult {
                check_id: Uuid::nil(),
                title: "GET http://x/".to_string(),
                info: None,
                success: true,
                passed: vec!["Code is 200".to_string()],
                failed: Vec::new(),
                summary: "Passed 1 assertion(s)".to_string(),
                timings: Timings {
                    started_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
                    first_byte: Some(Duration::from_millis(12)),
                    total: Some(Duration::from_millis(30)),
                },
            }],
        };

        let json = json_report(&summary).unwrap();
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"passed\": 1,"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"][0]["timings"]["first_byte"], 12);
        assert_eq!(value["results"][0]["passed"][0], "Code is 200");
        assert!(value["results"][0].get("info").is_none());

        let parsed: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }
}
