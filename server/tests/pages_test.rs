//! Integration tests for memoshare
//!
//! These tests drive the router end to end against a seeded SQLite file:
//! - Feed pages and pagination
//! - Tag, user and memo detail pages
//! - The generic error page for missing rows

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use memoshare::app::AppState;
use memoshare::config::{DatabaseSettings, Settings};
use memoshare::database::create_pool;
use memoshare::server::create_app;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper to create a test database with schema
async fn create_test_db() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let settings = DatabaseSettings {
        path: temp_dir.path().join("test.db"),
        max_connections: 2,
    };
    let pool = create_pool(&settings).await.unwrap();
    (pool, temp_dir)
}

fn test_state(pool: SqlitePool) -> AppState {
    let mut settings = Settings::default();
    settings.site.title = "Test Memos".to_string();
    settings.avatar.base_url = "https://avatar.test/".to_string();
    AppState::new(pool, settings)
}

async fn get(pool: &SqlitePool, uri: &str) -> (StatusCode, String) {
    let app = create_app(test_state(pool.clone()));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn add_user(pool: &SqlitePool, username: &str, nickname: &str, is_admin: bool) -> i64 {
    sqlx::query("INSERT INTO users (username, nickname, email, is_admin) VALUES (?, ?, ?, ?)")
        .bind(username)
        .bind(nickname)
        .bind(format!("{}@example.com", username))
        .bind(is_admin)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

async fn add_memo(
    pool: &SqlitePool,
    creator_id: i64,
    content: &str,
    visibility: &str,
    pinned: bool,
    ts: i64,
) -> i64 {
    sqlx::query(
        r#"
        INSERT INTO memos (creator_id, content, visibility, pinned, created_ts, updated_ts, display_ts)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(creator_id)
    .bind(content)
    .bind(visibility)
    .bind(pinned)
    .bind(ts)
    .bind(ts)
    .bind(ts)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

async fn add_image(pool: &SqlitePool, memo_id: i64, filepath: &str) {
    let resource_id = sqlx::query(
        "INSERT INTO resources (filename, filepath, type, size) VALUES ('photo.png', ?, 'image/png', 4096)",
    )
    .bind(filepath)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid();

    sqlx::query("INSERT INTO memo_resources (memo_id, resource_id) VALUES (?, ?)")
        .bind(memo_id)
        .bind(resource_id)
        .execute(pool)
        .await
        .unwrap();
}

async fn add_tag(pool: &SqlitePool, memo_id: i64, name: &str) {
    sqlx::query("INSERT OR IGNORE INTO tags (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO memo_tags (memo_id, tag_id) SELECT ?, id FROM tags WHERE name = ?")
        .bind(memo_id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

/// Markup before the inline scripts, which carry their own HTML templates
fn body_only(html: &str) -> &str {
    html.split("<script>").next().unwrap()
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[tokio::test]
async fn test_empty_feeds_show_empty_state() {
    let (pool, _temp) = create_test_db().await;

    let (status, html) = get(&pool, "/explore").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"class="empty-state""#));
    assert!(html.contains("广场上还很空，快来创建第一条备忘录吧"));
    assert!(!html.contains(r#"<div class="items">"#));
    assert!(!html.contains(r#"id="loadMoreBtn""#));

    let (_, home) = get(&pool, "/").await;
    assert!(home.contains("这里还很空，快来创建第一条备忘录吧"));
    assert!(home.contains("createMemoForm"));
}

#[tokio::test]
async fn test_explore_lists_only_public_memos() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;

    add_memo(&pool, alice, "public hello", "PUBLIC", false, now()).await;
    add_memo(&pool, alice, "private secret", "PRIVATE", false, now()).await;
    let archived = add_memo(&pool, alice, "archived note", "PUBLIC", false, now()).await;
    sqlx::query("UPDATE memos SET row_status = 'ARCHIVED' WHERE id = ?")
        .bind(archived)
        .execute(&pool)
        .await
        .unwrap();

    let (_, html) = get(&pool, "/explore").await;
    assert!(html.contains("public hello"));
    assert!(!html.contains("private secret"));
    assert!(!html.contains("archived note"));
    assert!(html.contains(r#"href="/user/1""#));
    assert!(html.contains("Alice"));

    // one memo today: the last heatmap cell is the busiest
    assert_eq!(html.matches(r#"class="heatmap-cell""#).count(), 30);
    assert!(html.contains(r#"class="heatmap-cell" data-level="4""#));
}

#[tokio::test]
async fn test_pinned_memo_sorts_first() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;

    add_memo(&pool, alice, "older pinned", "PUBLIC", true, 1_700_000_000).await;
    add_memo(&pool, alice, "newest plain", "PUBLIC", false, 1_710_000_000).await;

    let (_, html) = get(&pool, "/explore").await;
    let pinned = html.find("older pinned").unwrap();
    let plain = html.find("newest plain").unwrap();
    assert!(pinned < plain);
    assert_eq!(body_only(&html).matches(r#"<span class="pinned-badge""#).count(), 1);
}

#[tokio::test]
async fn test_load_more_only_past_first_page() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;

    for i in 0..20 {
        add_memo(&pool, alice, &format!("memo {}", i), "PUBLIC", false, 1_700_000_000 + i).await;
    }
    let (_, html) = get(&pool, "/explore").await;
    assert!(!html.contains(r#"id="loadMoreBtn""#));

    add_memo(&pool, alice, "memo 20", "PUBLIC", false, 1_700_000_100).await;
    let (_, html) = get(&pool, "/explore").await;
    assert!(html.contains(r#"id="loadMoreBtn""#));
    assert_eq!(body_only(&html).matches(r#"<div class="item">"#).count(), 20);
    assert!(html.contains(r#""nextOffset":20"#));
}

#[tokio::test]
async fn test_home_switches_to_own_memos_when_signed_in() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;
    add_memo(&pool, alice, "public hello", "PUBLIC", false, now()).await;

    let (_, html) = get(&pool, "/").await;
    let body = body_only(&html);
    assert!(body.contains(r#"<div id="feedRoot">"#));
    assert!(body.contains("public hello"));
    // kept hidden so the creator feed can page further
    assert!(body.contains(r#"<button id="loadMoreBtn" class="btn-outline" type="button" style="display: none;">"#));

    assert!(html.contains("async function loadUserMemos()"));
    assert!(html.contains("'/api/v1/memo?creatorId=' + Number(cfg.feedCreatorId) + '&rowStatus=NORMAL&limit='"));
    assert!(html.contains("🔒 私密"));
    assert!(html.contains(r#"href="/m/' + Number(memo.id) + '" class="edit-link""#));

    let (_, explore) = get(&pool, "/explore").await;
    assert!(!explore.contains("loadUserMemos"));
}

#[tokio::test]
async fn test_pages_load_markdown_and_code_highlighting() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;
    let id = add_memo(&pool, alice, "```rust\nfn main() {}\n```", "PUBLIC", false, now()).await;
    add_tag(&pool, id, "rust").await;

    let (_, explore) = get(&pool, "/explore").await;
    assert!(explore.contains("highlight.js/11.9.0/styles/github-dark.min.css"));
    assert!(explore.contains("highlight.js/11.9.0/highlight.min.js"));
    assert!(explore.contains("marked/11.1.1/marked.min.js"));
    assert!(body_only(&explore).contains(r#"<pre><code class="language-rust">"#));

    for uri in [format!("/m/{}", id), "/tag/rust".to_string(), format!("/user/{}", alice)] {
        let (_, html) = get(&pool, &uri).await;
        assert!(html.contains("function highlightCodeBlocks"), "{}", uri);
        assert!(!html.contains("marked.min.js"), "{}", uri);
    }
}

#[tokio::test]
async fn test_memo_content_is_escaped() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;
    let id = add_memo(&pool, alice, "<script>alert(1)</script>", "PUBLIC", false, now()).await;

    let (_, html) = get(&pool, &format!("/m/{}", id)).await;
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_memo_detail_page() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;
    let id = add_memo(&pool, alice, "detail body", "PUBLIC", true, 1_704_103_500).await;
    add_image(&pool, id, "uploads/photo.png").await;
    add_image(&pool, id, "https://cdn.test/remote.png").await;

    let (status, html) = get(&pool, &format!("/m/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>备忘录详情</title>"));
    assert!(html.contains("备忘录详情</span>"));
    assert!(html.contains(r#"id="memoContent""#));
    assert!(html.contains("📌 置顶"));
    assert!(html.contains("grid-template-columns: repeat(2, 1fr)"));
    assert!(html.contains(r#"data-image="/api/v1/resource/1/file""#));
    assert!(html.contains(r#"data-image="https://cdn.test/remote.png""#));
    assert!(html.contains(&format!(r#""memoId":{}"#, id)));
    assert!(html.contains("2024年1月1日周一 10:05"));
}

#[tokio::test]
async fn test_missing_rows_render_error_page() {
    let (pool, _temp) = create_test_db().await;

    for uri in ["/m/999", "/m/not-a-number", "/tag/nothing", "/user/42"] {
        let (status, html) = get(&pool, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(html.contains("<title>错误</title>"), "{}", uri);
        assert!(html.contains(r#"class="error-message""#), "{}", uri);
    }

    let (_, html) = get(&pool, "/tag/nothing").await;
    assert!(html.contains("标签不存在: nothing"));
}

#[tokio::test]
async fn test_tag_page() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;
    let first = add_memo(&pool, alice, "tagged one", "PUBLIC", false, now()).await;
    let second = add_memo(&pool, alice, "tagged private", "PRIVATE", false, now()).await;
    let third = add_memo(&pool, alice, "tagged two", "PUBLIC", false, now()).await;
    for id in [first, second, third] {
        add_tag(&pool, id, "读书").await;
    }

    let (_, html) = get(&pool, "/tag/%E8%AF%BB%E4%B9%A6").await;
    assert!(html.contains("<title>#读书</title>"));
    assert!(html.contains("共 2 条备忘录"));
    assert!(html.contains("tagged one"));
    assert!(html.contains("tagged two"));
    assert!(!html.contains("tagged private"));
    assert!(html.contains(r#"href="/tag/%E8%AF%BB%E4%B9%A6""#));
}

#[tokio::test]
async fn test_tag_without_public_memos() {
    let (pool, _temp) = create_test_db().await;
    let alice = add_user(&pool, "alice", "Alice", false).await;
    let hidden = add_memo(&pool, alice, "only private", "PRIVATE", false, now()).await;
    add_tag(&pool, hidden, "rust").await;

    let (_, html) = get(&pool, "/tag/rust").await;
    assert!(html.contains("共 0 条备忘录"));
    assert!(html.contains("还没有带有 #rust 标签的备忘录"));
}

#[tokio::test]
async fn test_user_page() {
    let (pool, _temp) = create_test_db().await;
    let admin = add_user(&pool, "root", "管理员", true).await;
    let bob = add_user(&pool, "bob", "Bob", false).await;
    add_memo(&pool, admin, "admin memo", "PUBLIC", false, now()).await;
    add_memo(&pool, bob, "bob memo", "PUBLIC", false, now()).await;

    let (_, html) = get(&pool, &format!("/user/{}", admin)).await;
    assert!(html.contains("<title>管理员 的备忘录</title>"));
    assert!(html.contains("ADMIN"));
    assert!(html.contains("@root"));
    assert!(html.contains("admin memo"));
    assert!(!html.contains("bob memo"));
    assert!(html.contains("?s=80&amp;d=identicon"));

    let (_, html) = get(&pool, &format!("/user/{}", bob)).await;
    assert!(!html.contains("admin-badge"));

    let carol = add_user(&pool, "carol", "Carol", false).await;
    let (_, html) = get(&pool, &format!("/user/{}", carol)).await;
    assert!(html.contains("Carol 还没有创建任何公开备忘录"));
}

#[tokio::test]
async fn test_site_title_setting_overrides_config() {
    let (pool, _temp) = create_test_db().await;

    let (_, html) = get(&pool, "/explore").await;
    assert!(html.contains(r#"class="site-title">Test Memos</a>"#));

    sqlx::query("INSERT INTO settings (key, value) VALUES ('site_title', '随手记')")
        .execute(&pool)
        .await
        .unwrap();
    let (_, html) = get(&pool, "/explore").await;
    assert!(html.contains(r#"class="site-title">随手记</a>"#));
}

#[tokio::test]
async fn test_health_check() {
    let (pool, _temp) = create_test_db().await;
    let (status, body) = get(&pool, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""status":"ok""#));
}
