//! Explore feed: every public memo, newest first

use super::{public_feed_body, public_feed_config, public_feed_scripts, render_page};
use crate::app::AppState;
use crate::error::Result;
use crate::render::feed::{load_more_controls, EmptyState};
use crate::render::layout::Page;
use axum::extract::State;
use axum::response::Html;
use chrono::Utc;

const INTRO: &str = r#"
<div style="margin-bottom: 20px; padding: 16px; background: var(--cell-background-color); border-radius: var(--box-border-radius); box-shadow: var(--shadows); border: 1px solid var(--border-color);">
    <h2 style="margin: 0 0 8px 0; color: var(--highlight-color); font-size: 20px;">🌍 广场</h2>
    <p style="margin: 0; color: var(--secondary-color); font-size: 14px;">发现来自所有人的公开备忘录</p>
</div>"#;

pub async fn explore(State(state): State<AppState>) -> Html<String> {
    render_page("explore", &state, render(&state)).await
}

async fn render(state: &AppState) -> Result<String> {
    let site_title = state.site_title().await;
    let feed_page = state.feed.public_feed().await?;
    let heatmap = state.feed.heatmap(Utc::now().date_naive()).await?;

    let empty = EmptyState {
        title: "暂无备忘录",
        message: "广场上还很空，快来创建第一条备忘录吧".to_string(),
    };
    let config = public_feed_config(state, "explore", &feed_page);
    let more = if feed_page.has_more {
        load_more_controls(true)
    } else {
        String::new()
    };

    Ok(Page {
        title: "广场",
        body: public_feed_body(state, &site_title, INTRO, &feed_page, &heatmap, &empty, &more),
        scripts: public_feed_scripts(&config, &[]),
    }
    .render())
}
