//! Page handlers
//!
//! One module per page. Every handler funnels through [`render_page`], which
//! turns any failure into the generic error page.

pub mod explore;
pub mod home;
pub mod memo_detail;
pub mod tag;
pub mod user;

use crate::app::AppState;
use crate::error::{AppError, Result};
use crate::render::feed::{self, EmptyState};
use crate::render::heatmap::Heatmap;
use crate::render::layout;
use crate::render::scripts::{self, ClientConfig};
use crate::services::FeedPage;
use axum::response::Html;
use std::future::Future;

/// Await a page body, logging and rendering the error page on failure
pub(crate) async fn render_page<F>(page: &'static str, state: &AppState, body: F) -> Html<String>
where
    F: Future<Output = Result<String>>,
{
    match body.await {
        Ok(html) => {
            tracing::info!("Rendered {} page", page);
            Html(html)
        }
        Err(e) => {
            tracing::error!("Failed to render {} page: {}", page, e);
            let site_title = state.site_title().await;
            Html(layout::error_page(&site_title, "页面加载失败", &e.to_string()).render())
        }
    }
}

/// Numeric id from a path segment
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Generic(format!("无效的{} ID: {}", what, raw)))
}

/// Main column and heatmap sidebar shared by the home and explore feeds.
///
/// `more` is the load-more markup, empty when the feed has no further pages.
pub(crate) fn public_feed_body(
    state: &AppState,
    site_title: &str,
    intro: &str,
    feed_page: &FeedPage,
    heatmap: &Heatmap,
    empty: &EmptyState,
    more: &str,
) -> String {

    format!(
        r#"
<div class="container">
    {aside}
    <div class="main-container">
        {intro}
        <div id="feedRoot">{timeline}</div>
        {more}
    </div>
    {heatmap}
</div>
{image_modal}
{message_modal}
{footer}"#,
        aside = layout::aside(site_title),
        timeline = feed::timeline(&feed_page.memos, state.avatar_base_url(), empty),
        heatmap = heatmap.render(),
        image_modal = layout::image_modal(),
        message_modal = layout::message_modal(),
        footer = layout::footer(),
    )
}

/// Client config for a paginated public feed
pub(crate) fn public_feed_config(state: &AppState, page: &'static str, feed_page: &FeedPage) -> ClientConfig {
    let mut config = ClientConfig::new(page, state.avatar_base_url());
    config.next_offset = feed_page.memos.len() as i64;
    config
}

/// Scripts every public feed carries, followed by page-specific ones
pub(crate) fn public_feed_scripts(config: &ClientConfig, extra: &[&str]) -> String {
    let mut pieces = vec![
        scripts::AUTH,
        scripts::MESSAGES,
        scripts::IMAGE_MODAL,
        scripts::CODE_COPY,
        scripts::CODE_HIGHLIGHT,
        scripts::MARKDOWN,
        scripts::HEATMAP_TOOLTIP,
        scripts::LOAD_MORE,
    ];
    pieces.extend_from_slice(extra);
    scripts::compose(config, &pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "备忘录").unwrap(), 42);
        let err = parse_id("abc", "用户").unwrap_err();
        assert_eq!(err.to_string(), "无效的用户 ID: abc");
    }
}
