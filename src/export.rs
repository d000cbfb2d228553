//! Analysis report export.
//!
//! Renders a session's move-quality history as a plain-text report (and a
//! JSON variant) and writes it to disk. The text layout: a header with the
//! session id, date, and move count; one numbered block per assessed move;
//! and a statistics section with per-badge counts and the accuracy
//! percentage to one decimal.

use uuid::Uuid;

use crate::classify::{BadgeCounts, MoveAssessment};

// ---------------------------------------------------------------------------
// Timestamp formatting
// ---------------------------------------------------------------------------

/// Seconds since the Unix epoch, from the system clock.
pub fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Formats a Unix timestamp into a human-readable UTC datetime string.
///
/// Returns `"—"` for timestamp 0.
fn format_timestamp(ts: u64) -> String {
    if ts == 0 {
        return "—".to_string();
    }

    // Manual UTC formatting without a date-time dependency.
    let days = ts / 86400;
    let time_of_day = ts % 86400;
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let seconds = time_of_day % 60;

    let (year, month, day) = days_to_date(days);

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
        year, month, day, hours, minutes, seconds
    )
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: u64) -> (u64, u64, u64) {
    // Algorithm from http://howardhinnant.github.io/date_algorithms.html
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

// ---------------------------------------------------------------------------
// Plain-text report
// ---------------------------------------------------------------------------

/// Default filename for a report saved at `timestamp`.
pub fn default_report_filename(timestamp: u64) -> String {
    format!("chess_analysis_{}.txt", timestamp)
}

/// Renders the plain-text analysis report.
pub fn format_report(
    session_id: Uuid,
    history: &[MoveAssessment],
    counts: BadgeCounts,
    accuracy: f64,
    timestamp: u64,
) -> String {
    let mut out = String::new();

    out.push_str("CHESSCOACH - MOVE ANALYSIS REPORT\n");
    out.push_str("=================================\n");
    out.push_str(&format!("Session: {}\n", session_id));
    out.push_str(&format!("Date: {}\n", format_timestamp(timestamp)));
    out.push_str(&format!("Total moves: {}\n\n", history.len()));

    out.push_str("MOVE DETAILS:\n");
    out.push_str("=============\n");
    for (i, assessment) in history.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {}\n",
            i + 1,
            assessment.notation,
            assessment.badge
        ));
        out.push_str(&format!("   {}\n", assessment.description));
        out.push_str(&format!(
            "   Score: {} → {}",
            assessment.score_before, assessment.score_after
        ));
        if assessment.score_diff != 0 {
            out.push_str(&format!(" ({:+})", assessment.score_diff));
        }
        out.push_str(&format!(", Rank: #{}\n\n", assessment.rank));
    }

    out.push_str("STATISTICS:\n");
    out.push_str("===========\n");
    out.push_str(&format!("Brilliant: {}\n", counts.brilliant));
    out.push_str(&format!("Best: {}\n", counts.best));
    out.push_str(&format!("Great: {}\n", counts.great));
    out.push_str(&format!("Good: {}\n", counts.good));
    out.push_str(&format!("Inaccuracy: {}\n", counts.inaccuracy));
    out.push_str(&format!("Mistake: {}\n", counts.mistake));
    out.push_str(&format!("Blunder: {}\n", counts.blunder));
    out.push_str(&format!("Accuracy: {:.1}%\n", accuracy));

    out
}

// ---------------------------------------------------------------------------
// JSON report
// ---------------------------------------------------------------------------

/// Renders the analysis history as pretty-printed JSON.
pub fn format_json_report(
    session_id: Uuid,
    history: &[MoveAssessment],
    counts: BadgeCounts,
    accuracy: f64,
    timestamp: u64,
) -> Result<String, String> {
    let report = serde_json::json!({
        "session_id": session_id.to_string(),
        "date": format_timestamp(timestamp),
        "timestamp": timestamp,
        "total_moves": history.len(),
        "moves": history,
        "statistics": counts,
        "accuracy": accuracy,
    });

    serde_json::to_string_pretty(&report)
        .map_err(|e| format!("JSON serialization failed: {}", e))
}

// ---------------------------------------------------------------------------
// File output
// ---------------------------------------------------------------------------

/// Writes a rendered report to `path`, surfacing any I/O failure.
pub fn write_report(path: &str, content: &str) -> Result<(), String> {
    std::fs::write(path, content).map_err(|e| format!("Failed to write to '{}': {}", path, e))
}
