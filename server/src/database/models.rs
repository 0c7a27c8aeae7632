//! Database models
//!
//! Rust structs for the rows the pages read. Column aliases in the
//! repository queries map joined creator fields onto `Memo`.

use sqlx::FromRow;

/// Who can see a memo
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Visibility {
    Public,
    Private,
}

/// Soft-delete flag on a memo row
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum RowStatus {
    Normal,
    Archived,
}

/// A memo joined with its creator's display columns
#[derive(Debug, Clone, FromRow)]
pub struct Memo {
    pub id: i64,
    pub creator_id: i64,
    /// Markdown source
    pub content: String,
    pub visibility: Visibility,
    pub pinned: bool,
    pub row_status: RowStatus,
    pub parent_id: Option<i64>,
    /// Unix seconds
    pub created_ts: i64,
    pub updated_ts: i64,
    pub display_ts: i64,
    pub creator_name: Option<String>,
    pub creator_username: Option<String>,
    pub creator_email: Option<String>,
}

/// Account that owns memos
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub nickname: Option<String>,
    /// Only used to derive the avatar URL
    pub email: Option<String>,
    pub is_admin: bool,
    pub created_ts: i64,
}

/// File attached to a memo
#[derive(Debug, Clone, FromRow)]
pub struct Resource {
    pub id: i64,
    pub filename: String,
    /// Storage path or external URL as stored
    pub filepath: String,
    #[sqlx(rename = "type")]
    pub mime_type: Option<String>,
    pub size: i64,
}

/// Tag attached to a memo
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Public memo count for one UTC day
#[derive(Debug, Clone, FromRow)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub day: String,
    pub count: i64,
}
