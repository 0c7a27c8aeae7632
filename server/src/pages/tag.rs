//! Tag page: public memos carrying one tag

use super::render_page;
use crate::app::AppState;
use crate::error::Result;
use crate::render::feed::{self, EmptyState};
use crate::render::layout::{self, Page};
use crate::render::scripts::{self, ClientConfig};
use crate::render::escape;
use axum::extract::{Path, State};
use axum::response::Html;

pub async fn tag(State(state): State<AppState>, Path(name): Path<String>) -> Html<String> {
    render_page("tag", &state, render(&state, &name)).await
}

async fn render(state: &AppState, name: &str) -> Result<String> {
    let site_title = state.site_title().await;
    let (tag, memos) = state.feed.tag_feed(name).await?;

    let empty = EmptyState {
        title: "暂无相关备忘录",
        message: format!("还没有带有 #{} 标签的备忘录", tag.name),
    };

    let body = format!(
        r#"
<div class="container">
    {aside}
    <div class="main-container">
        <div style="padding: 20px; margin-bottom: 24px; background: var(--cell-background-color); border-radius: var(--box-border-radius); box-shadow: var(--shadows); border: 1px solid var(--border-color);">
            <div class="tag-name" style="font-size: 28px; font-weight: 600; color: var(--foreground-color); margin-bottom: 8px;">#{name}</div>
            <div class="tag-count" style="color: var(--secondary-color); font-size: 14px;">共 {count} 条备忘录</div>
        </div>
        <div style="padding: 10px 0; margin-bottom: 24px; display: flex; align-items: center; font-size: 14px; border-bottom: 1px solid var(--border-color); padding-bottom: 16px;">
            <a href="/" style="color: var(--secondary-color); text-decoration: none;">← 返回首页</a>
        </div>
        {timeline}
    </div>
</div>
{image_modal}
{footer}"#,
        aside = layout::aside(&site_title),
        name = escape(&tag.name),
        count = memos.len(),
        timeline = feed::timeline(&memos, state.avatar_base_url(), &empty),
        image_modal = layout::image_modal(),
        footer = layout::footer(),
    );

    let title = format!("#{}", tag.name);
    let config = ClientConfig::new("tag", state.avatar_base_url());

    Ok(Page {
        title: &title,
        body,
        scripts: scripts::compose(
            &config,
            &[
                scripts::AUTH,
                scripts::IMAGE_MODAL,
                scripts::CODE_COPY,
                scripts::CODE_HIGHLIGHT,
            ],
        ),
    }
    .render())
}
