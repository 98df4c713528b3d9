//! Text rendering for issues and the report export.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use domain::models::issue::IssuePriority;
use domain::models::Issue;

/// Directory the report export is written into.
pub const REPORTS_DIR: &str = "Reports";

/// File name of the report export.
pub const REPORT_FILE: &str = "KnownIssuesReport.txt";

fn field<'a>(value: &'a Option<String>) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

fn priority_label(priority: &Option<String>) -> String {
    match priority.as_deref().and_then(IssuePriority::from_code) {
        Some(p) => format!("{} - {}", priority.as_deref().unwrap_or(""), p.label()),
        None => field(priority).to_string(),
    }
}

/// One-line summary used in selection lists.
pub fn issue_line(index: usize, issue: &Issue) -> String {
    format!(
        "{}. {} [{}]",
        index,
        field(&issue.issue_name),
        issue.status.as_deref().unwrap_or("Unresolved"),
    )
}

/// Full detail block for one issue.
pub fn issue_block(issue: &Issue) -> String {
    let mut lines = vec![
        format!(
            "{} [{}] (id {})",
            field(&issue.issue_name),
            issue.status.as_deref().unwrap_or("Unresolved"),
            issue.id
        ),
        format!("   Store: {} ({})", issue.store_name, issue.store_number),
        format!("   Device: {}", field(&issue.device_type)),
        format!("   Category: {}", field(&issue.category)),
        format!("   Computer: {}", field(&issue.computer_number)),
        format!("   Priority: {}", priority_label(&issue.priority)),
        format!("   Description: {}", field(&issue.description)),
    ];

    if issue.global_issue {
        let count = issue
            .global_num
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        lines.push(format!("   Global issue: Yes ({} devices)", count));
    }

    if let Some(narrative) = issue.narrative.as_deref() {
        if !narrative.is_empty() {
            lines.push(format!("   Narrative: {}", narrative));
        }
    }

    if issue
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("resolved"))
    {
        lines.push(format!(
            "   Resolution: {}",
            issue
                .resolution
                .as_deref()
                .filter(|r| !r.is_empty())
                .unwrap_or("None Provided")
        ));
    }

    lines.join("\n")
}

/// Renders a list of issues grouped by store.
pub fn issue_list(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "No issues found.".to_string();
    }

    let mut by_store: BTreeMap<(i32, &str), Vec<&Issue>> = BTreeMap::new();
    for issue in issues {
        by_store
            .entry((issue.store_number, issue.store_name.as_str()))
            .or_default()
            .push(issue);
    }

    let mut output = String::new();
    for ((store_number, store_name), rows) in by_store {
        output.push_str(&format!("{} (Store {})\n", store_name, store_number));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        for issue in rows {
            output.push_str(&issue_block(issue));
            output.push_str("\n\n");
        }
    }
    output.push_str(&format!("Total issues: {}", issues.len()));
    output
}

/// Writes the full issue report to `Reports/KnownIssuesReport.txt` and
/// returns the path.
pub fn export_report(issues: &[Issue], base_dir: &Path) -> io::Result<PathBuf> {
    let reports_dir = base_dir.join(REPORTS_DIR);
    fs::create_dir_all(&reports_dir)?;
    let path = reports_dir.join(REPORT_FILE);

    let mut contents = String::from("*****Known Issues Report*****\n\n");
    if issues.is_empty() {
        contents.push_str("No known issues reported for any stores at this time.\n");
    } else {
        contents.push_str(&issue_list(issues));
        contents.push('\n');
    }

    fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_issue() -> Issue {
        Issue {
            id: 42,
            store_number: 612,
            store_name: "Worcester".to_string(),
            issue_name: Some("Register frozen".to_string()),
            priority: Some("1".to_string()),
            device_type: Some("Computer".to_string()),
            category: Some("Hardware".to_string()),
            computer_number: Some("3".to_string()),
            description: Some("Locks up at boot".to_string()),
            narrative: None,
            replicable: Some("No".to_string()),
            global_issue: false,
            global_num: None,
            status: Some("Unresolved".to_string()),
            resolution: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_line() {
        let line = issue_line(1, &sample_issue());
        assert_eq!(line, "1. Register frozen [Unresolved]");
    }

    #[test]
    fn test_issue_block_translates_priority() {
        let block = issue_block(&sample_issue());
        assert!(block.contains("Priority: 1 - Critical"));
        assert!(block.contains("Store: Worcester (612)"));
        assert!(block.contains("Device: Computer"));
    }

    #[test]
    fn test_issue_block_shows_resolution_when_resolved() {
        let mut issue = sample_issue();
        issue.status = Some("Resolved".to_string());
        issue.resolution = Some("Swapped power supply".to_string());

        let block = issue_block(&issue);
        assert!(block.contains("Resolution: Swapped power supply"));

        issue.resolution = None;
        let block = issue_block(&issue);
        assert!(block.contains("Resolution: None Provided"));
    }

    #[test]
    fn test_issue_block_global_issue() {
        let mut issue = sample_issue();
        issue.global_issue = true;
        issue.global_num = Some(4);

        let block = issue_block(&issue);
        assert!(block.contains("Global issue: Yes (4 devices)"));
    }

    #[test]
    fn test_issue_list_groups_by_store() {
        let mut other = sample_issue();
        other.id = 43;
        other.store_number = 98;
        other.store_name = "Nashua Walmart".to_string();

        let rendered = issue_list(&[sample_issue(), other]);
        assert!(rendered.contains("Worcester (Store 612)"));
        assert!(rendered.contains("Nashua Walmart (Store 98)"));
        assert!(rendered.contains("Total issues: 2"));
    }

    #[test]
    fn test_issue_list_empty() {
        assert_eq!(issue_list(&[]), "No issues found.");
    }

    #[test]
    fn test_export_report_writes_file() {
        let dir = std::env::temp_dir().join(format!("storetrack-report-{}", std::process::id()));
        let path = export_report(&[sample_issue()], &dir).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("*****Known Issues Report*****"));
        assert!(contents.contains("Register frozen"));

        fs::remove_dir_all(&dir).ok();
    }
}
