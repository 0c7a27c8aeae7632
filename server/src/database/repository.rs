//! Repository layer for database reads
//!
//! Every query the pages need lives here. This layer never writes;
//! memos, users, tags and resources are created by the JSON API.

use super::models::*;
use crate::error::{AppError, Result};
use sqlx::SqlitePool;

/// Columns selected for every memo query, creator fields joined in
const MEMO_SELECT: &str = r#"
    SELECT
        m.id,
        m.creator_id,
        m.content,
        m.visibility,
        m.pinned,
        m.row_status,
        m.parent_id,
        m.created_ts,
        m.updated_ts,
        m.display_ts,
        u.nickname AS creator_name,
        u.username AS creator_username,
        u.email AS creator_email
    FROM memos m
    LEFT JOIN users u ON m.creator_id = u.id
"#;

/// Feed order: pinned first, then most recently displayed
const FEED_ORDER: &str = "ORDER BY m.pinned DESC, m.display_ts DESC, m.id DESC";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count public, non-archived memos
    pub async fn count_public_memos(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM memos m
            WHERE m.row_status = 'NORMAL' AND m.visibility = 'PUBLIC'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// One page of the public feed
    pub async fn list_public_memos(&self, limit: i64, offset: i64) -> Result<Vec<Memo>> {
        let sql = format!(
            "{MEMO_SELECT} WHERE m.row_status = 'NORMAL' AND m.visibility = 'PUBLIC' {FEED_ORDER} LIMIT ? OFFSET ?"
        );
        let memos = sqlx::query_as::<_, Memo>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Fetched {} public memos (offset {})", memos.len(), offset);
        Ok(memos)
    }

    /// Get a non-archived memo by ID, whatever its visibility
    pub async fn get_memo(&self, id: i64) -> Result<Memo> {
        let sql = format!("{MEMO_SELECT} WHERE m.id = ? AND m.row_status = 'NORMAL'");
        let memo = sqlx::query_as::<_, Memo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::MemoNotFound(id))?;

        Ok(memo)
    }

    /// Look up a tag by its exact name
    pub async fn get_tag_by_name(&self, name: &str) -> Result<Tag> {
        let tag = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::TagNotFound(name.to_string()))?;

        Ok(tag)
    }

    /// All public memos carrying a tag
    pub async fn list_public_memos_by_tag(&self, tag_id: i64) -> Result<Vec<Memo>> {
        let sql = format!(
            "{MEMO_SELECT} JOIN memo_tags mt ON m.id = mt.memo_id \
             WHERE mt.tag_id = ? AND m.row_status = 'NORMAL' AND m.visibility = 'PUBLIC' {FEED_ORDER}"
        );
        let memos = sqlx::query_as::<_, Memo>(&sql)
            .bind(tag_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Fetched {} memos for tag {}", memos.len(), tag_id);
        Ok(memos)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, nickname, email, is_admin, created_ts
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound(id))?;

        Ok(user)
    }

    /// All public memos created by a user
    pub async fn list_public_memos_by_creator(&self, creator_id: i64) -> Result<Vec<Memo>> {
        let sql = format!(
            "{MEMO_SELECT} WHERE m.creator_id = ? AND m.row_status = 'NORMAL' AND m.visibility = 'PUBLIC' {FEED_ORDER}"
        );
        let memos = sqlx::query_as::<_, Memo>(&sql)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Fetched {} memos for user {}", memos.len(), creator_id);
        Ok(memos)
    }

    /// List resources attached to a memo
    pub async fn list_memo_resources(&self, memo_id: i64) -> Result<Vec<Resource>> {
        let resources = sqlx::query_as::<_, Resource>(
            r#"
            SELECT r.id, r.filename, r.filepath, r.type, r.size
            FROM resources r
            JOIN memo_resources mr ON r.id = mr.resource_id
            WHERE mr.memo_id = ?
            ORDER BY r.id
            "#,
        )
        .bind(memo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(resources)
    }

    /// List tags attached to a memo
    pub async fn list_memo_tags(&self, memo_id: i64) -> Result<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN memo_tags mt ON t.id = mt.tag_id
            WHERE mt.memo_id = ?
            ORDER BY t.name
            "#,
        )
        .bind(memo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// Public memo counts per UTC day for memos created at or after `since_ts`
    pub async fn daily_public_counts(&self, since_ts: i64) -> Result<Vec<DailyCount>> {
        let counts = sqlx::query_as::<_, DailyCount>(
            r#"
            SELECT strftime('%Y-%m-%d', m.created_ts, 'unixepoch') AS day, COUNT(*) AS count
            FROM memos m
            WHERE m.row_status = 'NORMAL' AND m.visibility = 'PUBLIC' AND m.created_ts >= ?
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(since_ts)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Get a site setting
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }
}
