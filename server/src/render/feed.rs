//! Memo feed fragments
//!
//! Each memo becomes one `.item` in an `.items` timeline: header line,
//! markdown body, image grid, attachment links.

use super::resource::{grid_columns, partition, size_label};
use super::{avatar::avatar_url, encode_component, escape, markdown};
use super::{format_date, format_iso, format_long_datetime, format_short_datetime};
use crate::config::FEED_AVATAR_SIZE;
use crate::database::{Memo, Resource, Tag};
use crate::services::MemoView;
use std::collections::HashSet;

/// Shown instead of the timeline when there is nothing to list
pub struct EmptyState<'a> {
    pub title: &'a str,
    pub message: String,
}

impl EmptyState<'_> {
    pub fn render(&self) -> String {
        format!(
            r#"
<div class="empty-state">
    <h3>{}</h3>
    <p>{}</p>
</div>"#,
            escape(self.title),
            escape(&self.message)
        )
    }
}

/// Name shown for a memo's author: nickname, then handle, then `匿名`
pub fn display_name(memo: &Memo) -> &str {
    [memo.creator_name.as_deref(), memo.creator_username.as_deref()]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
        .unwrap_or("匿名")
}

const PINNED_BADGE: &str = r#"<span class="pinned-badge" style="display: inline-block; background: var(--highlight-color); color: #fff; padding: 2px 8px; border-radius: 10px; font-size: 11px; font-weight: bold; margin-left: 4px;">置顶</span>"#;

const PINNED_BLOCK: &str = r#"<div class="pinned-badge" style="display: inline-block; background: var(--highlight-color); color: #fff; padding: 0.25rem 0.75rem; border-radius: 12px; font-size: 0.75rem; font-weight: bold; margin-bottom: 12px;">📌 置顶</div><br>"#;

fn pinned_badge(memo: &Memo) -> &'static str {
    if memo.pinned {
        PINNED_BADGE
    } else {
        ""
    }
}

fn pinned_block(memo: &Memo) -> &'static str {
    if memo.pinned {
        PINNED_BLOCK
    } else {
        ""
    }
}

/// Square thumbnails laid out by the column table; empty for no images
pub fn image_grid(images: &[&Resource]) -> String {
    if images.is_empty() {
        return String::new();
    }

    let items: String = images
        .iter()
        .map(|r| {
            let url = escape(&r.filepath);
            format!(
                r#"<div class="image-item" data-image="{url}" style="width: 100%; padding-bottom: 100%; position: relative; overflow: hidden; border-radius: 8px; border: 1px solid var(--border-color); cursor: pointer;"><img src="{url}" alt="{alt}" loading="lazy" style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; object-fit: cover;"></div>"#,
                alt = escape(&r.filename),
            )
        })
        .collect();

    format!(
        r#"<div class="image-grid" style="display: grid; grid-template-columns: repeat({}, 1fr); max-width: 100%; gap: 10px; margin-top: 16px;">{}</div>"#,
        grid_columns(images.len()),
        items
    )
}

/// Download links for non-image resources; empty when there are none
pub fn attachment_links(others: &[&Resource]) -> String {
    if others.is_empty() {
        return String::new();
    }

    let links: String = others
        .iter()
        .map(|r| {
            format!(
                r#"<a href="{}" class="memo-resource" target="_blank" rel="noopener noreferrer" style="display: inline-block; margin-right: 12px; margin-bottom: 8px; padding: 6px 12px; border: 1px solid var(--border-color); border-radius: 4px; text-decoration: none; color: var(--foreground-color);">📎 {}</a>"#,
                escape(&r.filepath),
                escape(&r.filename)
            )
        })
        .collect();

    format!(r#"<div class="memo-resources" style="margin-top: 16px;">{}</div>"#, links)
}

pub fn tag_links(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| {
            format!(
                r#"<a href="/tag/{}" class="memo-tag" style="display: inline-block; margin-left: 8px; padding: 2px 8px; border: 1px solid var(--border-color); border-radius: 12px; font-size: 12px; text-decoration: none; color: var(--link-color);">#{}</a>"#,
                encode_component(&t.name),
                escape(&t.name)
            )
        })
        .collect()
}

/// Markdown body plus its image grid and attachments
fn memo_body(view: &MemoView, body_class: &str) -> String {
    let (images, others) = partition(&view.resources);
    let grid_urls: HashSet<String> = images.iter().map(|r| r.filepath.clone()).collect();

    format!(
        r#"<div class="{body_class}" id="memo-{id}">{content}</div>
        {grid}
        {attachments}"#,
        id = view.memo.id,
        content = markdown::render(&view.memo.content, &grid_urls),
        grid = image_grid(&images),
        attachments = attachment_links(&others),
    )
}

fn timeline_item(view: &MemoView, avatar_base_url: &str) -> String {
    let memo = &view.memo;
    let avatar = avatar_url(avatar_base_url, memo.creator_email.as_deref(), FEED_AVATAR_SIZE);
    let handle = memo
        .creator_username
        .as_deref()
        .map(|u| {
            format!(
                r#"<span style="color: var(--secondary-color); font-size: 13px;">@{}</span>"#,
                escape(u)
            )
        })
        .unwrap_or_default();

    format!(
        r#"
<div class="item">
    <div class="time-box">
        <div class="dot"></div>
        <div class="time" style="display: flex; align-items: center; gap: 12px; flex-wrap: wrap;">
            <a href="/user/{creator_id}" style="display: flex; align-items: center; gap: 8px; text-decoration: none;">
                <img src="{avatar}" alt="头像" style="width: 30px; height: 30px; border-radius: 100%; border: 2px solid #fff; box-shadow: var(--shadows);">
                <span style="color: var(--foreground-color); font-weight: 500; font-size: 14px;">{name}</span>
                {handle}
            </a>
            <span style="color: var(--secondary-color);">·</span>
            <a href="/m/{id}" class="time" style="color: var(--highlight-color);">{date}</a>
            {pinned}
            {tags}
        </div>
    </div>
    <div class="memo-box">
        {body}
    </div>
</div>"#,
        creator_id = memo.creator_id,
        avatar = escape(&avatar),
        name = escape(display_name(memo)),
        id = memo.id,
        date = format_date(memo.created_ts),
        pinned = pinned_badge(memo),
        tags = tag_links(&view.tags),
        body = memo_body(view, "memo-content markdown-content"),
    )
}

/// Timeline with author line, used by home, explore and tag pages
pub fn timeline(memos: &[MemoView], avatar_base_url: &str, empty: &EmptyState) -> String {
    if memos.is_empty() {
        return empty.render();
    }

    let items: String = memos
        .iter()
        .map(|view| timeline_item(view, avatar_base_url))
        .collect();
    format!(r#"<div class="items">{}</div>"#, items)
}

fn profile_item(view: &MemoView) -> String {
    let memo = &view.memo;
    let (dot_style, time_style, link_color) = if memo.pinned {
        (
            "background-color: var(--highlight-color);",
            "color: var(--highlight-color);",
            "var(--highlight-color)",
        )
    } else {
        ("", "", "var(--link-color)")
    };

    format!(
        r#"
<div class="item" style="margin-bottom: 48px;">
    <div class="time-box">
        <div class="dot" style="{dot_style}"></div>
        <div class="time" style="{time_style}">
            <a href="/m/{id}" style="color: {link_color}; text-decoration: none;">
                <time datetime="{iso}">{label}</time>
            </a>
            {tags}
        </div>
    </div>
    <div class="memo-box">
        {pinned}
        {body}
    </div>
</div>"#,
        id = memo.id,
        iso = format_iso(memo.created_ts),
        label = format_short_datetime(memo.created_ts),
        tags = tag_links(&view.tags),
        pinned = pinned_block(memo),
        body = memo_body(view, "memo-text markdown-content"),
    )
}

/// Timeline without author line, used on a user's own profile
pub fn profile_timeline(memos: &[MemoView], empty: &EmptyState) -> String {
    if memos.is_empty() {
        return empty.render();
    }

    let items: String = memos.iter().map(profile_item).collect();
    format!(r#"<div class="items">{}</div>"#, items)
}

fn detail_attachments(others: &[&Resource]) -> String {
    if others.is_empty() {
        return String::new();
    }

    let links: String = others
        .iter()
        .map(|r| {
            let size = size_label(r.size)
                .map(|s| format!(r#" <span style="opacity: 0.7;">({})</span>"#, s))
                .unwrap_or_default();
            format!(
                r#"<a href="{}" class="memo-resource" target="_blank" rel="noopener noreferrer" style="display: inline-flex; align-items: center; gap: 6px; padding: 6px 12px; border: 1px solid var(--border-color); border-radius: var(--box-border-radius); text-decoration: none; color: var(--foreground-color); background: var(--code-background-color); font-size: 14px;">📄 {}{}</a>"#,
                escape(&r.filepath),
                escape(&r.filename),
                size
            )
        })
        .collect();

    format!(
        r#"<div class="memo-resources" style="margin-top: 16px;">
    <strong style="color: var(--secondary-color); font-size: 14px; display: block; margin-bottom: 12px;">📎 附件:</strong>
    <div style="display: flex; flex-wrap: wrap; gap: 10px;">{}</div>
</div>"#,
        links
    )
}

/// A single memo on its own page
pub fn detail(view: &MemoView) -> String {
    let memo = &view.memo;
    let (images, others) = partition(&view.resources);
    let grid_urls: HashSet<String> = images.iter().map(|r| r.filepath.clone()).collect();

    let updated = if memo.updated_ts != memo.created_ts {
        format!(
            r#"<span class="memo-updated" style="color: var(--secondary-color); font-size: 12px; margin-left: 8px;">(已更新 {})</span>"#,
            format_short_datetime(memo.updated_ts)
        )
    } else {
        String::new()
    };

    format!(
        r#"
<div class="items">
    <div class="item">
        <div class="time-box">
            <div class="dot"></div>
            <div class="time">
                <time datetime="{iso}">{label}</time>
                {updated}
                {tags}
            </div>
        </div>
        <div class="memo-box">
            {pinned}
            <div id="memoContent" class="memo-text markdown-content">{content}</div>
            {grid}
            {attachments}
        </div>
    </div>
</div>"#,
        iso = format_iso(memo.created_ts),
        label = format_long_datetime(memo.created_ts),
        tags = tag_links(&view.tags),
        pinned = pinned_block(memo),
        content = markdown::render(&memo.content, &grid_urls),
        grid = image_grid(&images),
        attachments = detail_attachments(&others),
    )
}

/// "Load more" button and status line for paginated feeds.
///
/// A hidden button stays in the page so a client-side feed switch can reveal it.
pub fn load_more_controls(visible: bool) -> String {
    let style = if visible { "" } else { r#" style="display: none;""# };
    format!(
        r#"
<div class="pages-container">
    <button id="loadMoreBtn" class="btn-outline" type="button"{style}>加载更多</button>
</div>
<div id="loadingIndicator" style="display: none; text-align: center; color: var(--secondary-color); margin-top: 16px;">加载中...</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{RowStatus, Visibility};

    const BASE: &str = "https://avatar.test/";

    fn memo(id: i64, pinned: bool) -> Memo {
        Memo {
            id,
            creator_id: 1,
            content: "hello **world**".to_string(),
            visibility: Visibility::Public,
            pinned,
            row_status: RowStatus::Normal,
            parent_id: None,
            created_ts: 1_704_103_500,
            updated_ts: 1_704_103_500,
            display_ts: 1_704_103_500,
            creator_name: Some("Alice".to_string()),
            creator_username: Some("alice".to_string()),
            creator_email: Some("alice@example.com".to_string()),
        }
    }

    fn image(id: i64) -> Resource {
        Resource {
            id,
            filename: format!("img-{}.png", id),
            filepath: format!("/api/v1/resource/{}/file", id),
            mime_type: Some("image/png".to_string()),
            size: 2048,
        }
    }

    fn view(memo: Memo, resources: Vec<Resource>, tags: Vec<Tag>) -> MemoView {
        MemoView {
            memo,
            resources,
            tags,
        }
    }

    fn empty() -> EmptyState<'static> {
        EmptyState {
            title: "暂无备忘录",
            message: "这里还很空".to_string(),
        }
    }

    #[test]
    fn test_grid_columns_by_image_count() {
        for (count, columns) in [(1, 1), (2, 2), (3, 3), (4, 2), (5, 3)] {
            let resources: Vec<Resource> = (1..=count).map(image).collect();
            let html = timeline(&[view(memo(1, false), resources, vec![])], BASE, &empty());
            assert!(
                html.contains(&format!("grid-template-columns: repeat({}, 1fr)", columns)),
                "{} images should use {} columns",
                count,
                columns
            );
            assert_eq!(html.matches(r#"class="image-item""#).count(), count as usize);
        }
    }

    #[test]
    fn test_no_grid_without_images() {
        let html = timeline(&[view(memo(1, false), vec![], vec![])], BASE, &empty());
        assert!(!html.contains("image-grid"));
        assert!(!html.contains("memo-resources"));
    }

    #[test]
    fn test_pinned_badge() {
        let pinned = timeline(&[view(memo(1, true), vec![], vec![])], BASE, &empty());
        assert!(pinned.contains("pinned-badge"));
        assert!(pinned.contains("置顶"));

        let unpinned = timeline(&[view(memo(1, false), vec![], vec![])], BASE, &empty());
        assert!(!unpinned.contains("pinned-badge"));

        assert!(profile_timeline(&[view(memo(1, true), vec![], vec![])], &empty()).contains("📌 置顶"));
        assert!(detail(&view(memo(1, true), vec![], vec![])).contains("pinned-badge"));
        assert!(!detail(&view(memo(1, false), vec![], vec![])).contains("pinned-badge"));
    }

    #[test]
    fn test_empty_feed_renders_empty_state() {
        let html = timeline(&[], BASE, &empty());
        assert!(html.contains(r#"class="empty-state""#));
        assert!(html.contains("暂无备忘录"));
        assert!(!html.contains(r#"class="items""#));

        let profile = profile_timeline(&[], &empty());
        assert!(profile.contains(r#"class="empty-state""#));
    }

    #[test]
    fn test_other_resources_and_tags() {
        let pdf = Resource {
            id: 9,
            filename: "report <final>.pdf".to_string(),
            filepath: "https://cdn.test/report.pdf".to_string(),
            mime_type: Some("application/pdf".to_string()),
            size: 1536,
        };
        let tags = vec![Tag {
            id: 1,
            name: "读书 笔记".to_string(),
        }];

        let html = timeline(&[view(memo(1, false), vec![pdf.clone()], tags.clone())], BASE, &empty());
        assert!(html.contains(r#"href="https://cdn.test/report.pdf""#));
        assert!(html.contains("📎 report &lt;final&gt;.pdf"));
        assert!(html.contains("/tag/%E8%AF%BB%E4%B9%A6%20%E7%AC%94%E8%AE%B0"));
        assert!(html.contains("#读书 笔记"));

        let detail_html = detail(&view(memo(1, false), vec![pdf], tags));
        assert!(detail_html.contains("(1.5 KB)"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut m = memo(1, false);
        assert_eq!(display_name(&m), "Alice");
        m.creator_name = Some(String::new());
        assert_eq!(display_name(&m), "alice");
        m.creator_username = None;
        assert_eq!(display_name(&m), "匿名");
    }

    #[test]
    fn test_author_line() {
        let html = timeline(&[view(memo(7, false), vec![], vec![])], BASE, &empty());
        assert!(html.contains(r#"href="/user/1""#));
        assert!(html.contains(r#"href="/m/7""#));
        assert!(html.contains("2024年1月1日"));
        assert!(html.contains("@alice"));
        assert!(html.contains(r#"id="memo-7""#));
        assert!(html.contains("<strong>world</strong>"));
    }

    #[test]
    fn test_detail_updated_note() {
        let mut m = memo(3, false);
        assert!(!detail(&view(m.clone(), vec![], vec![])).contains("memo-updated"));

        m.updated_ts += 3600;
        let html = detail(&view(m, vec![], vec![]));
        assert!(html.contains("(已更新 1月1日周一 11:05)"));
    }
}
