//! Issue domain models and the legacy-keyed wire payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A tracked issue row.
///
/// Most fields are optional: edits overwrite columns with exactly what the
/// caller supplied, so any column other than the store identity may be
/// cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub store_number: i32,
    pub store_name: String,
    pub issue_name: Option<String>,
    pub priority: Option<String>,
    pub device_type: Option<String>,
    pub category: Option<String>,
    pub computer_number: Option<String>,
    pub description: Option<String>,
    pub narrative: Option<String>,
    pub replicable: Option<String>,
    pub global_issue: bool,
    pub global_num: Option<i32>,
    pub status: Option<String>,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Priority codes as entered by the clients ("1"/"2"/"3").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuePriority {
    Critical,
    Functional,
    Cosmetic,
}

impl IssuePriority {
    /// Parses a priority code. Accepts the bare code or a labelled form
    /// like "1 - Critical".
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().chars().next() {
            Some('1') => Some(IssuePriority::Critical),
            Some('2') => Some(IssuePriority::Functional),
            Some('3') => Some(IssuePriority::Cosmetic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssuePriority::Critical => "Critical",
            IssuePriority::Functional => "Functional",
            IssuePriority::Cosmetic => "Cosmetic",
        }
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Issue statuses the clients suggest. The server does not enforce this
/// set; any string is accepted and stored.
pub const SUGGESTED_STATUSES: [&str; 4] = ["Unresolved", "In Progress", "Resolved", "Closed"];

/// The issue payload in the legacy capitalized-key format used on the wire
/// by every client generation.
///
/// `"Name"` and `"Issue Name"` are aliases (older clients send both); the
/// store number arrives as either a JSON number or a digit string depending
/// on whether the client built the payload from form input or from a
/// fetched row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuePayload {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Issue Name", default, skip_serializing_if = "Option::is_none")]
    pub issue_name: Option<String>,

    #[serde(rename = "Priority", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(rename = "Store Name", default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    #[serde(
        rename = "Store Number",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_number: Option<i32>,

    #[serde(rename = "Computer Number", default, skip_serializing_if = "Option::is_none")]
    pub computer_number: Option<String>,

    #[serde(rename = "Device", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Narrative", default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,

    #[serde(rename = "Replicable?", default, skip_serializing_if = "Option::is_none")]
    pub replicable: Option<String>,

    #[serde(rename = "Global Issue", default, skip_serializing_if = "Option::is_none")]
    pub global_issue: Option<bool>,

    #[serde(
        rename = "Global Number",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub global_num: Option<i32>,

    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "Resolution", default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

impl IssuePayload {
    /// The issue name, preferring the `"Issue Name"` key over the older
    /// `"Name"` alias.
    pub fn resolved_name(&self) -> Option<&str> {
        self.issue_name
            .as_deref()
            .or(self.name.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Builds the legacy payload from a stored row, the shape clients send
    /// back on update.
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            name: issue.issue_name.clone(),
            issue_name: issue.issue_name.clone(),
            priority: issue.priority.clone(),
            store_name: Some(issue.store_name.clone()),
            store_number: Some(issue.store_number),
            computer_number: issue.computer_number.clone(),
            device_type: issue.device_type.clone(),
            category: issue.category.clone(),
            description: issue.description.clone(),
            narrative: issue.narrative.clone(),
            replicable: issue.replicable.clone(),
            global_issue: Some(issue.global_issue),
            global_num: issue.global_num,
            status: issue.status.clone(),
            resolution: issue.resolution.clone(),
        }
    }
}

/// Accepts a JSON number, a digit string, or null.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => i32::try_from(n)
            .map(Some)
            .map_err(|_| serde::de::Error::custom("number out of range")),
        Some(NumberOrString::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<i32>()
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_from_code() {
        assert_eq!(IssuePriority::from_code("1"), Some(IssuePriority::Critical));
        assert_eq!(
            IssuePriority::from_code("2"),
            Some(IssuePriority::Functional)
        );
        assert_eq!(IssuePriority::from_code("3"), Some(IssuePriority::Cosmetic));
        assert_eq!(IssuePriority::from_code("4"), None);
        assert_eq!(IssuePriority::from_code(""), None);
    }

    #[test]
    fn test_priority_from_labelled_code() {
        assert_eq!(
            IssuePriority::from_code("1 - Critical"),
            Some(IssuePriority::Critical)
        );
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(IssuePriority::Critical.label(), "Critical");
        assert_eq!(IssuePriority::Functional.to_string(), "Functional");
        assert_eq!(IssuePriority::Cosmetic.label(), "Cosmetic");
    }

    #[test]
    fn test_payload_legacy_keys() {
        let payload: IssuePayload = serde_json::from_value(json!({
            "Issue Name": "Register frozen",
            "Priority": "1",
            "Store Number": "612",
            "Computer Number": "3",
            "Device": "Computer",
            "Category": "Hardware",
            "Description": "Locks up at boot",
            "Narrative": "",
            "Replicable?": "No",
            "Global Issue": false,
            "Global Number": null,
            "Status": "Unresolved",
            "Resolution": ""
        }))
        .unwrap();

        assert_eq!(payload.resolved_name(), Some("Register frozen"));
        assert_eq!(payload.store_number, Some(612));
        assert_eq!(payload.device_type.as_deref(), Some("Computer"));
        assert_eq!(payload.category.as_deref(), Some("Hardware"));
        assert_eq!(payload.replicable.as_deref(), Some("No"));
        assert_eq!(payload.global_issue, Some(false));
        assert_eq!(payload.global_num, None);
    }

    #[test]
    fn test_payload_store_number_as_json_number() {
        let payload: IssuePayload =
            serde_json::from_value(json!({ "Store Number": 4417 })).unwrap();
        assert_eq!(payload.store_number, Some(4417));
    }

    #[test]
    fn test_payload_global_number_as_string() {
        let payload: IssuePayload =
            serde_json::from_value(json!({ "Global Number": "12" })).unwrap();
        assert_eq!(payload.global_num, Some(12));
    }

    #[test]
    fn test_payload_name_alias() {
        // Older clients only send "Name"
        let payload: IssuePayload =
            serde_json::from_value(json!({ "Name": "Printer jam" })).unwrap();
        assert_eq!(payload.resolved_name(), Some("Printer jam"));

        // "Issue Name" wins when both are present
        let payload: IssuePayload = serde_json::from_value(json!({
            "Name": "old",
            "Issue Name": "new"
        }))
        .unwrap();
        assert_eq!(payload.resolved_name(), Some("new"));
    }

    #[test]
    fn test_payload_blank_name_is_none() {
        let payload: IssuePayload =
            serde_json::from_value(json!({ "Issue Name": "   " })).unwrap();
        assert_eq!(payload.resolved_name(), None);
    }

    #[test]
    fn test_payload_empty_object() {
        let payload: IssuePayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.issue_name.is_none());
        assert!(payload.store_number.is_none());
        assert!(payload.global_issue.is_none());
    }

    #[test]
    fn test_payload_invalid_store_number_rejected() {
        let result: Result<IssuePayload, _> =
            serde_json::from_value(json!({ "Store Number": "not-a-number" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_serializes_with_legacy_keys() {
        let payload = IssuePayload {
            issue_name: Some("Router down".to_string()),
            store_number: Some(98),
            device_type: Some("Network".to_string()),
            global_issue: Some(true),
            global_num: Some(4),
            ..Default::default()
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["Issue Name"], "Router down");
        assert_eq!(value["Store Number"], 98);
        assert_eq!(value["Device"], "Network");
        assert_eq!(value["Global Issue"], true);
        assert_eq!(value["Global Number"], 4);
        // Omitted fields stay off the wire
        assert!(value.get("Description").is_none());
    }

    #[test]
    fn test_from_issue_round_trip() {
        let issue = Issue {
            id: 7,
            store_number: 441,
            store_name: "Worcester".to_string(),
            issue_name: Some("Scanner offline".to_string()),
            priority: Some("2".to_string()),
            device_type: Some("Scanner".to_string()),
            category: Some("Hardware".to_string()),
            computer_number: Some("N/A".to_string()),
            description: Some("Does not power on".to_string()),
            narrative: None,
            replicable: Some("No".to_string()),
            global_issue: false,
            global_num: None,
            status: Some("Unresolved".to_string()),
            resolution: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let payload = IssuePayload::from_issue(&issue);
        assert_eq!(payload.resolved_name(), Some("Scanner offline"));
        assert_eq!(payload.store_number, Some(441));
        assert_eq!(payload.store_name.as_deref(), Some("Worcester"));
        assert_eq!(payload.device_type.as_deref(), Some("Scanner"));
        assert_eq!(payload.global_issue, Some(false));
    }
}
