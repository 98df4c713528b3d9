//! Issue repository for database operations.

use domain::models::issue::IssuePayload;
use sqlx::PgPool;

use crate::entities::IssueEntity;

const ISSUE_COLUMNS: &str = "id, store_number, store_name, issue_name, priority, device_type, \
     category, computer_number, description, narrative, replicable, \
     global_issue, global_num, status, resolution, created_at, updated_at";

/// Conjunctive search filter. Every present field must match.
#[derive(Debug, Clone, Default)]
pub struct IssueSearchFilter {
    pub store_number: Option<i32>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub device: Option<String>,
    pub name: Option<String>,
    pub global_issue: Option<bool>,
}

impl IssueSearchFilter {
    /// True when at least one filter field is present.
    pub fn has_any(&self) -> bool {
        self.store_number.is_some()
            || self.category.is_some()
            || self.status.is_some()
            || self.device.is_some()
            || self.name.is_some()
            || self.global_issue.is_some()
    }
}

/// Repository for issue-related database operations.
#[derive(Clone)]
pub struct IssueRepository {
    pool: PgPool,
}

impl IssueRepository {
    /// Creates a new IssueRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new issue for a store.
    ///
    /// Status defaults to "Unresolved" and global_issue to false when the
    /// payload leaves them out.
    pub async fn insert_issue(
        &self,
        store_number: i32,
        store_name: &str,
        issue: &IssuePayload,
    ) -> Result<IssueEntity, sqlx::Error> {
        sqlx::query_as::<_, IssueEntity>(&format!(
            r#"
            INSERT INTO issues
                (store_number, store_name, issue_name, priority, device_type, category,
                 computer_number, description, narrative, replicable,
                 global_issue, global_num, status, resolution)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    COALESCE($11, false), $12, COALESCE($13, 'Unresolved'), $14)
            RETURNING {ISSUE_COLUMNS}
            "#
        ))
        .bind(store_number)
        .bind(store_name)
        .bind(issue.resolved_name())
        .bind(issue.priority.as_deref())
        .bind(issue.device_type.as_deref())
        .bind(issue.category.as_deref())
        .bind(issue.computer_number.as_deref())
        .bind(issue.description.as_deref())
        .bind(issue.narrative.as_deref())
        .bind(issue.replicable.as_deref())
        .bind(issue.global_issue)
        .bind(issue.global_num)
        .bind(issue.status.as_deref())
        .bind(issue.resolution.as_deref())
        .fetch_one(&self.pool)
        .await
    }

    /// Overwrite an issue in place.
    ///
    /// Store identity (store_name, store_number) and the global fields keep
    /// their existing values when the payload omits them; every other
    /// column is written with exactly what the caller supplied, so an empty
    /// string clears and an omitted field nulls.
    ///
    /// Returns None if no row has the given id.
    pub async fn update_issue(
        &self,
        issue_id: i64,
        issue: &IssuePayload,
    ) -> Result<Option<IssueEntity>, sqlx::Error> {
        sqlx::query_as::<_, IssueEntity>(&format!(
            r#"
            UPDATE issues SET
                store_name = COALESCE($2, store_name),
                store_number = COALESCE($3, store_number),
                issue_name = $4,
                priority = $5,
                device_type = $6,
                category = $7,
                computer_number = $8,
                description = $9,
                narrative = $10,
                replicable = $11,
                global_issue = COALESCE($12, global_issue),
                global_num = COALESCE($13, global_num),
                status = $14,
                resolution = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ISSUE_COLUMNS}
            "#
        ))
        .bind(issue_id)
        .bind(issue.store_name.as_deref())
        .bind(issue.store_number)
        .bind(issue.resolved_name())
        .bind(issue.priority.as_deref())
        .bind(issue.device_type.as_deref())
        .bind(issue.category.as_deref())
        .bind(issue.computer_number.as_deref())
        .bind(issue.description.as_deref())
        .bind(issue.narrative.as_deref())
        .bind(issue.replicable.as_deref())
        .bind(issue.global_issue)
        .bind(issue.global_num)
        .bind(issue.status.as_deref())
        .bind(issue.resolution.as_deref())
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete an issue, returning the deleted row (None if missing).
    pub async fn delete_issue(&self, issue_id: i64) -> Result<Option<IssueEntity>, sqlx::Error> {
        sqlx::query_as::<_, IssueEntity>(&format!(
            r#"
            DELETE FROM issues
            WHERE id = $1
            RETURNING {ISSUE_COLUMNS}
            "#
        ))
        .bind(issue_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Conjunctive search across the optional filter fields.
    ///
    /// Text filters are case-insensitive substring matches; store_number
    /// and global_issue are exact.
    pub async fn search(
        &self,
        filter: &IssueSearchFilter,
    ) -> Result<Vec<IssueEntity>, sqlx::Error> {
        sqlx::query_as::<_, IssueEntity>(&format!(
            r#"
            SELECT {ISSUE_COLUMNS}
            FROM issues
            WHERE ($1::integer IS NULL OR store_number = $1)
              AND ($2::text IS NULL OR category ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR status ILIKE '%' || $3 || '%')
              AND ($4::text IS NULL OR device_type ILIKE '%' || $4 || '%')
              AND ($5::text IS NULL OR issue_name ILIKE '%' || $5 || '%')
              AND ($6::boolean IS NULL OR global_issue = $6)
            ORDER BY store_number, id
            "#
        ))
        .bind(filter.store_number)
        .bind(filter.category.as_deref())
        .bind(filter.status.as_deref())
        .bind(filter.device.as_deref())
        .bind(filter.name.as_deref())
        .bind(filter.global_issue)
        .fetch_all(&self.pool)
        .await
    }

    /// All issues for a store, by store number.
    pub async fn find_by_store_number(
        &self,
        store_number: i32,
    ) -> Result<Vec<IssueEntity>, sqlx::Error> {
        sqlx::query_as::<_, IssueEntity>(&format!(
            r#"
            SELECT {ISSUE_COLUMNS}
            FROM issues
            WHERE store_number = $1
            ORDER BY id
            "#
        ))
        .bind(store_number)
        .fetch_all(&self.pool)
        .await
    }

    /// All issues for a store, by store name (case-insensitive exact match).
    pub async fn find_by_store_name(
        &self,
        store_name: &str,
    ) -> Result<Vec<IssueEntity>, sqlx::Error> {
        sqlx::query_as::<_, IssueEntity>(&format!(
            r#"
            SELECT {ISSUE_COLUMNS}
            FROM issues
            WHERE store_name ILIKE $1
            ORDER BY id
            "#
        ))
        .bind(store_name)
        .fetch_all(&self.pool)
        .await
    }

    /// The full issue list.
    pub async fn find_all(&self) -> Result<Vec<IssueEntity>, sqlx::Error> {
        sqlx::query_as::<_, IssueEntity>(&format!(
            r#"
            SELECT {ISSUE_COLUMNS}
            FROM issues
            ORDER BY store_number, id
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_has_any_empty() {
        assert!(!IssueSearchFilter::default().has_any());
    }

    #[test]
    fn test_filter_has_any_single_field() {
        let filter = IssueSearchFilter {
            status: Some("Resolved".to_string()),
            ..Default::default()
        };
        assert!(filter.has_any());

        let filter = IssueSearchFilter {
            global_issue: Some(false),
            ..Default::default()
        };
        assert!(filter.has_any());

        let filter = IssueSearchFilter {
            store_number: Some(612),
            ..Default::default()
        };
        assert!(filter.has_any());
    }

    #[test]
    fn test_filter_combines_fields() {
        let filter = IssueSearchFilter {
            store_number: Some(612),
            category: Some("Hardware".to_string()),
            device: Some("Computer".to_string()),
            ..Default::default()
        };
        assert!(filter.has_any());
        assert_eq!(filter.status, None);
    }
}
