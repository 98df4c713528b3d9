//! Issue entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the issues table.
#[derive(Debug, Clone, FromRow)]
pub struct IssueEntity {
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

impl From<IssueEntity> for domain::models::Issue {
    fn from(entity: IssueEntity) -> Self {
        Self {
            id: entity.id,
            store_number: entity.store_number,
            store_name: entity.store_name,
            issue_name: entity.issue_name,
            priority: entity.priority,
            device_type: entity.device_type,
            category: entity.category,
            computer_number: entity.computer_number,
            description: entity.description,
            narrative: entity.narrative,
            replicable: entity.replicable,
            global_issue: entity.global_issue,
            global_num: entity.global_num,
            status: entity.status,
            resolution: entity.resolution,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_issue_entity() -> IssueEntity {
        IssueEntity {
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
    fn test_issue_entity_to_domain() {
        let entity = create_test_issue_entity();
        let issue: domain::models::Issue = entity.clone().into();

        assert_eq!(issue.id, entity.id);
        assert_eq!(issue.store_number, entity.store_number);
        assert_eq!(issue.store_name, entity.store_name);
        assert_eq!(issue.issue_name, entity.issue_name);
        assert_eq!(issue.priority, entity.priority);
        assert_eq!(issue.device_type, entity.device_type);
        assert_eq!(issue.global_issue, entity.global_issue);
        assert_eq!(issue.status, entity.status);
    }

    #[test]
    fn test_issue_entity_preserves_stale_global_num() {
        // global_num is not validated against global_issue; stale values
        // survive the mapping untouched
        let mut entity = create_test_issue_entity();
        entity.global_issue = false;
        entity.global_num = Some(9);

        let issue: domain::models::Issue = entity.into();
        assert!(!issue.global_issue);
        assert_eq!(issue.global_num, Some(9));
    }
}
