//! User profile: header card and the user's public memos

use super::{parse_id, render_page};
use crate::app::AppState;
use crate::config::PROFILE_AVATAR_SIZE;
use crate::database::User;
use crate::error::Result;
use crate::render::avatar::avatar_url;
use crate::render::feed::{self, EmptyState};
use crate::render::layout::{self, Page};
use crate::render::scripts::{self, ClientConfig};
use crate::render::escape;
use axum::extract::{Path, State};
use axum::response::Html;

const ADMIN_BADGE: &str = r#"<span class="admin-badge" style="display: inline-block; background: var(--highlight-color); color: #fff; padding: 0.15rem 0.5rem; border-radius: 10px; font-size: 0.65rem; font-weight: bold; margin-left: 0.5rem;">ADMIN</span>"#;

pub async fn user(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    render_page("user", &state, render(&state, &id)).await
}

/// Nickname, or the handle when no nickname is set
fn display_name(user: &User) -> &str {
    user.nickname
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(&user.username)
}

fn profile_card(state: &AppState, user: &User, memo_count: usize) -> String {
    let avatar = avatar_url(state.avatar_base_url(), user.email.as_deref(), PROFILE_AVATAR_SIZE);

    format!(
        r#"
<div class="profile-card" style="padding: 20px; margin-bottom: 24px; display: flex; align-items: center; background: var(--cell-background-color); border-radius: var(--box-border-radius); box-shadow: var(--shadows);">
    <img src="{avatar}" alt="{name}" style="width: 60px; height: 60px; border-radius: 100%; border: 3px solid #fff; box-shadow: var(--shadows); display: block;">
    <div style="flex: 1; margin-left: 16px; padding-right: 16px;">
        <div style="font-size: 24px; font-weight: 600; color: var(--foreground-color);">{name}{admin}</div>
        <div style="font-size: 14px; color: var(--secondary-color); margin-top: 4px;">@{username}</div>
    </div>
    <div style="text-align: right;">
        <div class="memo-count" style="font-size: 32px; font-weight: bold; color: var(--highlight-color); line-height: 1;">{memo_count}</div>
        <div style="font-size: 12px; color: var(--secondary-color); margin-top: 4px;">公开备忘录</div>
    </div>
</div>"#,
        avatar = escape(&avatar),
        name = escape(display_name(user)),
        admin = if user.is_admin { ADMIN_BADGE } else { "" },
        username = escape(&user.username),
    )
}

async fn render(state: &AppState, raw_id: &str) -> Result<String> {
    let user_id = parse_id(raw_id, "用户")?;
    let site_title = state.site_title().await;
    let (user, memos) = state.feed.user_feed(user_id).await?;
    let name = display_name(&user);

    let empty = EmptyState {
        title: "暂无公开备忘录",
        message: format!("{} 还没有创建任何公开备忘录", name),
    };

    let body = format!(
        r#"
<div class="container">
    {aside}
    <div class="main-container">
        {card}
        <div style="padding: 10px 0; margin-bottom: 24px; display: flex; align-items: center; font-size: 14px; border-bottom: 1px solid var(--border-color); padding-bottom: 16px;">
            <a href="/" style="color: var(--secondary-color); text-decoration: none;">← 返回首页</a>
        </div>
        {timeline}
    </div>
</div>
{image_modal}
{footer}"#,
        aside = layout::aside(&site_title),
        card = profile_card(state, &user, memos.len()),
        timeline = feed::profile_timeline(&memos, &empty),
        image_modal = layout::image_modal(),
        footer = layout::footer(),
    );

    let title = format!("{} 的备忘录", name);
    let config = ClientConfig::new("user", state.avatar_base_url());

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
