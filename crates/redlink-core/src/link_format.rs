//! Rendering of one enriched markdown link with its tooltip summary.

use chrono::DateTime;
use chrono_tz::Tz;

/// Reference timezone for the human-readable last-update timestamp.
const REFERENCE_TIMEZONE: Tz = chrono_tz::Europe::Kyiv;
/// Line-break entity understood by the host chat renderer inside markdown
/// link title attributes.
const TOOLTIP_LINE_SEPARATOR: &str = "&#013;";
const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Normalized metadata for one tracker issue, produced by the batch fetch
/// and consumed by the formatter. `updated_on` stays an RFC 3339 string
/// until rendering. An empty `subject` means "not found".
pub struct IssueMetadata {
    pub id: String,
    pub subject: String,
    pub status: String,
    pub tracker: String,
    pub priority: String,
    /// Empty when the issue is unassigned.
    pub assignee: String,
    pub author: String,
    pub updated_on: String,
}

/// Builds the replacement string for one matched link. Absent metadata or
/// an empty subject degrades to the raw link unchanged; otherwise the
/// result is `[<Tracker>#<id>: <subject><anchor>](<raw_link> "<tooltip>")`
/// with the query and fragment of the target preserved exactly as typed.
pub fn format_replacement(
    raw_link: &str,
    note_anchor: &str,
    metadata: Option<&IssueMetadata>,
) -> String {
    let Some(metadata) = metadata.filter(|metadata| !metadata.subject.is_empty()) else {
        return raw_link.to_string();
    };

    format!(
        "[{tracker}#{id}: {subject}{anchor}]({link} \"{tooltip}\")",
        tracker = metadata.tracker,
        id = metadata.id,
        subject = metadata.subject,
        anchor = note_anchor,
        link = raw_link,
        tooltip = escape_tooltip(&format_tooltip(metadata)),
    )
}

/// Tooltip lines in fixed order: assignee, priority, status, author, last
/// update. A timestamp that fails to parse omits the last-update line
/// rather than aborting the whole link.
fn format_tooltip(metadata: &IssueMetadata) -> String {
    let assignee = if metadata.assignee.is_empty() {
        "Assignee: Unassigned".to_string()
    } else {
        format!("Assignee: {}", metadata.assignee)
    };

    let mut lines = vec![
        assignee,
        format!("Priority: {}", metadata.priority),
        format!("Status: {}", metadata.status),
        format!("Author: {}", metadata.author),
    ];
    if let Some(timestamp) = format_last_update(&metadata.updated_on) {
        lines.push(format!("Last update: {timestamp}"));
    }
    lines.join(TOOLTIP_LINE_SEPARATOR)
}

fn format_last_update(updated_on: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(updated_on).ok()?;
    let localized = parsed.with_timezone(&REFERENCE_TIMEZONE);
    Some(localized.format(TIMESTAMP_FORMAT).to_string())
}

fn escape_tooltip(tooltip: &str) -> String {
    tooltip.replace('\\', "\\\\").replace('"', "\\\"")
}
