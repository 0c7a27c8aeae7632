//! Home feed: the create form plus the signed-in user's own memos
//!
//! The server renders the public timeline. Once the client confirms a
//! login it swaps that timeline for the user's memos, private ones
//! included, and scopes "load more" to them. Guests are redirected to the
//! explore feed.

use super::{public_feed_body, public_feed_config, public_feed_scripts, render_page};
use crate::app::AppState;
use crate::error::Result;
use crate::render::feed::{load_more_controls, EmptyState};
use crate::render::layout::Page;
use crate::render::scripts;
use axum::extract::State;
use axum::response::Html;
use chrono::Utc;

const INTRO: &str = r#"
<div style="margin-bottom: 20px; padding: 16px; background: var(--cell-background-color); border-radius: var(--box-border-radius); box-shadow: var(--shadows); border: 1px solid var(--border-color);">
    <h2 style="margin: 0 0 8px 0; color: var(--highlight-color); font-size: 20px;">🏠 我的空间</h2>
    <p style="margin: 0; color: var(--secondary-color); font-size: 14px;">在这里发布和浏览备忘录</p>
</div>"#;

const COMPOSER: &str = r#"
<div class="form-card" id="createForm" style="display: none;">
    <h3 class="form-title">创建新备忘录</h3>
    <form id="createMemoForm">
        <div class="form-group">
            <label class="form-label" for="content">内容 <span style="color: var(--secondary-color); font-size: 0.85rem; font-weight: normal;">(支持 Markdown 语法)</span></label>
            <textarea id="content" name="content" class="form-textarea" placeholder="支持 Markdown 语法，例如：&#10;# 标题&#10;**粗体** *斜体*&#10;- 列表项&#10;[链接](url)" required></textarea>
        </div>
        <div class="form-group">
            <label class="form-label" for="visibility">可见性</label>
            <select id="visibility" name="visibility" class="form-input">
                <option value="PUBLIC">公开 - 所有人可见</option>
                <option value="PRIVATE">私密 - 仅自己可见</option>
            </select>
        </div>
        <div style="display: flex; gap: 8px; align-items: center;">
            <button type="submit" class="btn">发布备忘录</button>
            <span id="uploadStatus" style="color: var(--secondary-color); font-size: 14px;"></span>
        </div>
    </form>
</div>
<div class="empty-state" id="loginPrompt">
    <h3>请先登录</h3>
    <p>需要登录后才能创建备忘录</p>
    <a href="/login" class="btn" style="display: inline-block; margin-top: 16px;">立即登录</a>
</div>"#;

pub async fn home(State(state): State<AppState>) -> Html<String> {
    render_page("home", &state, render(&state)).await
}

async fn render(state: &AppState) -> Result<String> {
    let site_title = state.site_title().await;
    let feed_page = state.feed.public_feed().await?;
    let heatmap = state.feed.heatmap(Utc::now().date_naive()).await?;

    let empty = EmptyState {
        title: "暂无备忘录",
        message: "这里还很空，快来创建第一条备忘录吧".to_string(),
    };
    let config = public_feed_config(state, "home", &feed_page);
    let intro = format!("{}{}", INTRO, COMPOSER);

    Ok(Page {
        title: "我的空间",
        body: public_feed_body(
            state,
            &site_title,
            &intro,
            &feed_page,
            &heatmap,
            &empty,
            &load_more_controls(feed_page.has_more),
        ),
        scripts: public_feed_scripts(&config, &[scripts::HOME_COMPOSER, scripts::HOME_FEED]),
    }
    .render())
}
