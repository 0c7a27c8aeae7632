//! Document shell shared by every page
//!
//! Header, navigation, footer and the inline stylesheet live here so the
//! page modules only supply their main column and scripts.

use super::escape;

const STYLES: &str = r#"
:root {
    --background-color: #f4f1ea;
    --cell-background-color: #fffdf8;
    --foreground-color: #3d3d3d;
    --secondary-color: #8a8576;
    --highlight-color: #b5651d;
    --link-color: #5b7c99;
    --border-color: #e3ddd0;
    --code-background-color: #f0ece2;
    --box-border-radius: 8px;
    --shadows: 0 2px 8px rgba(61, 61, 61, 0.08);
    --font-mono: ui-monospace, SFMono-Regular, Menlo, monospace;
}
* { box-sizing: border-box; }
body { margin: 0; background: var(--background-color); color: var(--foreground-color); font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "PingFang SC", "Microsoft YaHei", sans-serif; line-height: 1.6; }
a { color: var(--link-color); }
.container { display: flex; gap: 32px; max-width: 1180px; margin: 0 auto; padding: 32px 16px; }
.aside-container { width: 200px; flex-shrink: 0; }
.main-container { flex: 1; min-width: 0; }
.site-title { font-size: 22px; font-weight: 700; color: var(--highlight-color); text-decoration: none; }
.nav { display: flex; flex-direction: column; gap: 8px; margin-top: 24px; }
.nav a { color: var(--secondary-color); text-decoration: none; }
.items { position: relative; }
.item { margin-bottom: 32px; }
.time-box { display: flex; align-items: center; gap: 12px; }
.dot { width: 8px; height: 8px; border-radius: 100%; background: var(--border-color); flex-shrink: 0; }
.time { font-size: 13px; color: var(--secondary-color); }
.memo-box { border-left: 2px solid var(--border-color); margin-left: 3px; padding: 12px 0 0 30px; word-break: break-word; }
.markdown-content pre { background: var(--code-background-color); padding: 12px; border-radius: 6px; overflow-x: auto; font-family: var(--font-mono); }
.markdown-content code { font-family: var(--font-mono); }
.markdown-content blockquote { margin: 0; padding-left: 12px; border-left: 3px solid var(--border-color); color: var(--secondary-color); }
.empty-state { text-align: center; padding: 48px 16px; color: var(--secondary-color); }
.btn, .btn-outline { display: inline-block; padding: 6px 16px; border-radius: 4px; cursor: pointer; font-size: 14px; text-decoration: none; }
.btn { background: var(--highlight-color); color: #fff; border: 1px solid var(--highlight-color); }
.btn-outline { background: transparent; color: var(--highlight-color); border: 1px solid var(--highlight-color); }
.btn-secondary { background: var(--secondary-color); border-color: var(--secondary-color); }
.pages-container { text-align: center; margin-top: 24px; }
.form-card { padding: 16px; margin-bottom: 24px; background: var(--cell-background-color); border-radius: var(--box-border-radius); border: 1px solid var(--border-color); }
.form-group { margin-bottom: 12px; }
.form-label { display: block; margin-bottom: 6px; font-weight: 500; }
.form-input, .form-textarea { width: 100%; padding: 8px; border: 1px solid var(--border-color); border-radius: 4px; background: #fff; font: inherit; }
.form-textarea { min-height: 150px; font-family: var(--font-mono); }
.heatmap-container { width: 220px; flex-shrink: 0; align-self: flex-start; padding: 16px; background: var(--cell-background-color); border-radius: var(--box-border-radius); border: 1px solid var(--border-color); }
.heatmap-title { margin: 0 0 12px 0; font-size: 14px; }
.heatmap-grid { display: grid; grid-template-columns: repeat(10, 1fr); gap: 3px; }
.heatmap-cell { aspect-ratio: 1; border-radius: 2px; background: #ebedf0; }
.heatmap-cell[data-level="1"] { background: #c6e48b; }
.heatmap-cell[data-level="2"] { background: #7bc96f; }
.heatmap-cell[data-level="3"] { background: #239a3b; }
.heatmap-cell[data-level="4"] { background: #196127; }
.heatmap-legend { display: flex; gap: 3px; justify-content: flex-end; margin-top: 8px; }
.heatmap-legend-item { width: 10px; height: 10px; border-radius: 2px; }
.heatmap-tooltip { display: none; position: fixed; z-index: 1002; padding: 4px 8px; background: rgba(0, 0, 0, 0.8); color: #fff; font-size: 12px; border-radius: 4px; pointer-events: none; }
.footer { text-align: center; padding: 24px; color: var(--secondary-color); font-size: 12px; }
@media (max-width: 900px) {
    .container { flex-direction: column; }
    .aside-container, .heatmap-container { width: 100%; }
}
"#;

/// A complete page ready to be wrapped in the document shell
pub struct Page<'a> {
    pub title: &'a str,
    pub body: String,
    pub scripts: String,
}

impl Page<'_> {
    pub fn render(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github-dark.min.css">
    <style>{styles}</style>
</head>
<body>
{body}
{scripts}
</body>
</html>"#,
            title = escape(self.title),
            styles = STYLES,
            body = self.body,
            scripts = self.scripts,
        )
    }
}

pub fn header(site_title: &str) -> String {
    format!(
        r#"<header class="header"><a href="/" class="site-title">{}</a></header>"#,
        escape(site_title)
    )
}

pub fn nav() -> &'static str {
    r##"<nav class="nav">
    <a href="/">🏠 首页</a>
    <a href="/explore">🌏 广场</a>
    <a href="/login" id="navLogin">🔑 登录</a>
    <a href="#" id="navLogout" style="display: none;">🚪 退出</a>
</nav>"##
}

pub fn footer() -> &'static str {
    r#"<footer class="footer">Powered by memoshare</footer>"#
}

/// Header and navigation column shown on every page
pub fn aside(site_title: &str) -> String {
    format!(
        r#"<div class="aside-container">
    {}
    {}
</div>"#,
        header(site_title),
        nav()
    )
}

/// Full-screen overlay that shows one image
pub fn image_modal() -> &'static str {
    r#"
<div id="imageModal" style="display: none; position: fixed; z-index: 1000; left: 0; top: 0; width: 100%; height: 100%; background-color: rgba(0, 0, 0, 0.9); backdrop-filter: blur(20px); align-items: center; justify-content: center;">
    <span id="imageModalClose" style="position: absolute; top: 20px; right: 40px; color: #fff; font-size: 40px; font-weight: bold; cursor: pointer; z-index: 1001;">&times;</span>
    <img id="modalImage" alt="" style="margin: auto; display: block; max-width: 90%; max-height: 90%; width: auto; height: auto; object-fit: contain; border-radius: 8px; box-shadow: 0 4px 20px rgba(0,0,0,0.5);">
</div>"#
}

/// Message dialog used by the create/edit/delete flows
pub fn message_modal() -> &'static str {
    r#"
<div id="messageModal" style="display: none; position: fixed; z-index: 1001; left: 0; top: 0; width: 100%; height: 100%; background-color: rgba(61, 61, 61, 0.8);">
    <div style="background-color: var(--cell-background-color); margin: 10% auto; padding: 24px; border-radius: var(--box-border-radius); width: 90%; max-width: 400px; text-align: center; box-shadow: var(--shadows); border: 1px solid var(--border-color);">
        <div id="messageIcon" style="font-size: 48px; margin-bottom: 16px;">ℹ️</div>
        <h3 id="messageTitle" style="color: var(--foreground-color); margin-bottom: 12px;">消息</h3>
        <p id="messageText" style="color: var(--secondary-color); margin-bottom: 24px;"></p>
        <button class="btn" type="button" id="messageOk">确定</button>
    </div>
</div>"#
}

/// Generic error page body: the same shape for every failure
pub fn error_page(site_title: &str, heading: &str, message: &str) -> Page<'static> {
    Page {
        title: "错误",
        body: format!(
            r#"
<div class="container">
    {aside}
    <div class="main-container">
        <div class="empty-state">
            <h3>{heading}</h3>
            <p class="error-message">{message}</p>
            <a href="/" class="btn" style="display: inline-block; margin-top: 16px;">返回首页</a>
        </div>
    </div>
</div>
{footer}"#,
            aside = aside(site_title),
            heading = escape(heading),
            message = escape(message),
            footer = footer(),
        ),
        scripts: String::new(),
    }
}
