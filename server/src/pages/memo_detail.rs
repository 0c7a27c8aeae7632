//! Memo detail: one memo with edit and delete controls
//!
//! Any non-archived memo can be opened by id. Whether the controls are
//! usable is decided client-side against the signed-in user.

use super::{parse_id, render_page};
use crate::app::AppState;
use crate::config::FEED_AVATAR_SIZE;
use crate::error::Result;
use crate::render::avatar::avatar_url;
use crate::render::feed;
use crate::render::layout::{self, Page};
use crate::render::scripts::{self, ClientConfig};
use crate::render::escape;
use crate::services::MemoView;
use axum::extract::{Path, State};
use axum::response::Html;

const ACTIONS: &str = r#"
<div style="border-left: 2px solid var(--border-color); padding: 30px 0 10px 30px; margin-left: 3px;">
    <div id="guestActions" style="display: none; text-align: center;">
        <p style="color: var(--secondary-color); margin-bottom: 12px; font-size: 14px;">请登录后编辑此备忘录</p>
        <a href="/login" class="btn">登录</a>
    </div>
    <div id="userActions" style="display: none; gap: 10px; justify-content: flex-start;">
        <button class="btn-outline" type="button" id="editBtn">✏️ 编辑</button>
        <button class="btn-outline" type="button" id="deleteBtn">🗑️ 删除</button>
    </div>
    <div id="noPermissionActions" style="display: none;">
        <p style="color: var(--secondary-color); font-style: italic; font-size: 14px;">只有创建者或管理员可以编辑此备忘录</p>
    </div>
</div>"#;

const DELETE_MODAL: &str = r#"
<div id="deleteModal" style="display: none; position: fixed; z-index: 1000; left: 0; top: 0; width: 100%; height: 100%; background-color: rgba(61, 61, 61, 0.8);">
    <div style="background-color: var(--cell-background-color); margin: 10% auto; padding: 24px; border-radius: var(--box-border-radius); width: 90%; max-width: 400px; text-align: center; box-shadow: 0 4px 20px rgba(0,0,0,0.3); border: 1px solid var(--border-color);">
        <div style="font-size: 48px; margin-bottom: 16px;">⚠️</div>
        <h3 style="color: var(--foreground-color); margin-bottom: 12px;">确认删除</h3>
        <p style="color: var(--secondary-color); margin-bottom: 24px;">
            您确定要删除这条备忘录吗？<br>
            <strong style="color: #c82333;">此操作无法撤销！</strong>
        </p>
        <div style="display: flex; gap: 10px; justify-content: center;">
            <button class="btn-outline" type="button" id="cancelDeleteBtn">取消</button>
            <button class="btn-outline" type="button" id="confirmDeleteBtn" style="color: #c82333; border-color: #c82333;">删除</button>
        </div>
    </div>
</div>"#;

pub async fn memo_detail(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    render_page("memo detail", &state, render(&state, &id)).await
}

fn breadcrumb(state: &AppState, view: &MemoView) -> String {
    let memo = &view.memo;
    let name = feed::display_name(memo);
    let avatar = avatar_url(state.avatar_base_url(), memo.creator_email.as_deref(), FEED_AVATAR_SIZE);

    format!(
        r#"
<div class="breadcrumb" style="padding: 10px 0; margin-bottom: 24px; display: flex; align-items: center; border-bottom: 1px solid var(--border-color); padding-bottom: 16px;">
    <img src="{avatar}" alt="{name}" style="width: 24px; height: 24px; border-radius: 100%; border: 2px solid #fff; box-shadow: var(--shadows); display: block;">
    <div style="flex: 1; font-size: 14px; margin-left: 10px; color: var(--secondary-color);">
        <a href="/explore" style="color: var(--secondary-color); text-decoration: none;">广场</a>
        <span style="margin: 0 0.5rem;">/</span>
        <a href="/user/{creator_id}" style="color: var(--secondary-color); text-decoration: none;">{name}</a>
        <span style="margin: 0 0.5rem;">/</span>
        <span style="color: var(--foreground-color);">备忘录详情</span>
    </div>
</div>"#,
        avatar = escape(&avatar),
        name = escape(name),
        creator_id = memo.creator_id,
    )
}

fn edit_form(view: &MemoView) -> String {
    format!(
        r#"
<div id="editForm" style="display: none; border-left: 2px solid var(--border-color); padding: 30px 0 30px 30px; margin-left: 3px; margin-top: 20px;">
    <h3 style="margin-bottom: 16px; color: var(--highlight-color); font-size: 18px;">✏️ 编辑备忘录</h3>
    <form id="updateMemoForm">
        <div class="form-group">
            <label class="form-label" for="editContent">内容</label>
            <textarea id="editContent" name="content" class="form-textarea" required>{}</textarea>
        </div>
        <div style="display: flex; gap: 10px;">
            <button type="submit" class="btn">保存修改</button>
            <button type="button" class="btn btn-secondary" id="cancelEditBtn">取消</button>
        </div>
    </form>
</div>"#,
        escape(&view.memo.content)
    )
}

async fn render(state: &AppState, raw_id: &str) -> Result<String> {
    let memo_id = parse_id(raw_id, "备忘录")?;
    let site_title = state.site_title().await;
    let view = state.feed.memo_detail(memo_id).await?;

    let body = format!(
        r#"
<div class="container">
    {aside}
    <div class="main-container">
        {breadcrumb}
        {detail}
        {edit_form}
        {actions}
    </div>
</div>
{delete_modal}
{message_modal}
{image_modal}
{footer}"#,
        aside = layout::aside(&site_title),
        breadcrumb = breadcrumb(state, &view),
        detail = feed::detail(&view),
        edit_form = edit_form(&view),
        actions = ACTIONS,
        delete_modal = DELETE_MODAL,
        message_modal = layout::message_modal(),
        image_modal = layout::image_modal(),
        footer = layout::footer(),
    );

    let mut config = ClientConfig::new("detail", state.avatar_base_url());
    config.memo_id = Some(view.memo.id);
    config.creator_id = Some(view.memo.creator_id);

    Ok(Page {
        title: "备忘录详情",
        body,
        scripts: scripts::compose(
            &config,
            &[
                scripts::AUTH,
                scripts::MESSAGES,
                scripts::IMAGE_MODAL,
                scripts::CODE_COPY,
                scripts::CODE_HIGHLIGHT,
                scripts::MEMO_ACTIONS,
            ],
        ),
    }
    .render())
}
