//! Human-readable run reports.

use std::time::Duration;

use hra_domain::{CheckResult, RunSummary};

/// Renders every check result followed by the run digest.
#[must_use]
pub fn text_report(summary: &RunSummary) -> String {
    let mut out = String::new();
    for result in &summary.results {
        write_check(&mut out, result);
        out.push('\n');
    }
    out.push_str(&summary.digest);
    out.push('\n');
    out
}

fn write_check(out: &mut String, result: &CheckResult) {
    let status = if result.success { "PASSED" } else { "FAILED" };
    out.push_str(&format!("[{status}] {}", result.title));
    if let Some(info) = &result.info {
        out.push_str(&format!(" ({info})"));
    }
    out.push_str(&format!(
        " - first byte: {}, total: {}\n",
        millis(result.timings.first_byte),
        millis(result.timings.total)
    ));

    for passed in &result.passed {
        out.push_str(&format!("  + {passed}\n"));
    }
    for failed in &result.failed {
        // Handler messages may span several lines.
        for (index, line) in failed.lines().enumerate() {
            let marker = if index == 0 { "  - " } else { "    " };
            out.push_str(marker);
            out.push_str(line);
            out.push('\n');
        }
    }
}

fn millis(duration: Option<Duration>) -> String {
    duration.map_or_else(|| "n/a".to_string(), |d| format!("{} ms", d.as_millis()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hra_domain::Timings;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn result(
        success: bool,
        passed: &[&str],
        failed: &[&str],
        first_byte: Option<u64>,
    ) -> CheckResult {
        CheckResult {
            check_id: Uuid::nil(),
            title: "GET http://x/".to_string(),
            info: None,
            success,
            passed: passed.iter().map(ToString::to_string).collect(),
            failed: failed.iter().map(ToString::to_string).collect(),
            summary: String::new(),
            timings: Timings {
                started_at: Utc::now(),
                first_byte: first_byte.map(Duration::from_millis),
                total: first_byte.map(|ms| Duration::from_millis(ms + 5)),
            },
        }
    }

    #[test]
    fn test_text_report() {
        let mut api = result(
            false,
            &[],
            &["Selector \"p\": None of 2 nodes matching the selector matches the assertion:\
               \n      * a\n      * b"],
            None,
        );
        api.title = "API".to_string();
        api.info = Some("smoke".to_string());

        let summary = RunSummary {
            passed: 1,
            failed: 1,
            digest: "1 check(s) passed, 1 check(s) failed".to_string(),
            results: vec![result(true, &["Code is 200"], &[], Some(12)), api],
        };

        assert_eq!(
            text_report(&summary),
            "[PASSED] GET http://x/ - first byte: 12 ms, total: 17 ms\n\
             \x20 + Code is 200\n\
             \n\
             [FAILED] API (smoke) - first byte: n/a, total: n/a\n\
             \x20 - Selector \"p\": None of 2 nodes matching the selector matches the assertion:\n\
             \x20         * a\n\
             \x20         * b\n\
             \n\
             1 check(s) passed, 1 check(s) failed\n"
        );
    }
}
