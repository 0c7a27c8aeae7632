//! Client-side behaviour
//!
//! Each page composes the pieces it needs instead of carrying its own copy.
//! Page data reaches the scripts through `window.MEMOSHARE`, written as JSON.

use super::script_json;
use crate::config::FEED_PAGE_SIZE;
use serde::Serialize;

/// Data handed to the client scripts
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub page: &'static str,
    pub page_size: i64,
    /// Offset of the next page for "load more"
    pub next_offset: i64,
    pub avatar_base_url: String,
    /// Set on the memo detail page
    pub memo_id: Option<i64>,
    pub creator_id: Option<i64>,
}

impl ClientConfig {
    pub fn new(page: &'static str, avatar_base_url: &str) -> Self {
        Self {
            page,
            page_size: FEED_PAGE_SIZE,
            avatar_base_url: avatar_base_url.to_string(),
            ..Default::default()
        }
    }
}

fn boot(config: &ClientConfig) -> String {
    format!("<script>window.MEMOSHARE = {};</script>", script_json(config))
}

/// Login state from local storage drives the nav links
pub const AUTH: &str = r##"
<script>
    function accessToken() {
        return localStorage.getItem('accessToken');
    }

    function isLoggedIn() {
        return !!accessToken() && !!localStorage.getItem('username');
    }

    function escapeHtml(text) {
        const div = document.createElement('div');
        div.textContent = text == null ? '' : String(text);
        return div.innerHTML;
    }

    document.addEventListener('DOMContentLoaded', function() {
        const login = document.getElementById('navLogin');
        const logout = document.getElementById('navLogout');
        if (isLoggedIn()) {
            if (login) login.style.display = 'none';
            if (logout) {
                logout.style.display = '';
                logout.addEventListener('click', function(e) {
                    e.preventDefault();
                    localStorage.removeItem('accessToken');
                    localStorage.removeItem('username');
                    window.location.href = '/explore';
                });
            }
        }
    });
</script>
"##;

/// Click any `[data-image]` element to view it full-screen; Esc closes
pub const IMAGE_MODAL: &str = r##"
<script>
    function openImageModal(imageSrc) {
        const modal = document.getElementById('imageModal');
        const modalImg = document.getElementById('modalImage');
        if (!modal || !modalImg) return;
        modalImg.src = imageSrc;
        modal.style.display = 'flex';
        document.body.style.overflow = 'hidden';
    }

    function closeImageModal() {
        const modal = document.getElementById('imageModal');
        if (!modal) return;
        modal.style.display = 'none';
        document.body.style.overflow = 'auto';
    }

    document.addEventListener('click', function(e) {
        const target = e.target.closest('[data-image]');
        if (target) {
            openImageModal(target.getAttribute('data-image'));
            return;
        }
        if (e.target.id === 'imageModal' || e.target.id === 'imageModalClose') {
            closeImageModal();
        }
    });

    document.addEventListener('keydown', function(e) {
        if (e.key === 'Escape') closeImageModal();
    });
</script>
"##;

/// Copy button on every code block
pub const CODE_COPY: &str = r##"
<script>
    function addCopyButtonToCodeBlocks(root) {
        (root || document).querySelectorAll('pre code').forEach(function(codeBlock) {
            const pre = codeBlock.parentElement;
            if (pre.querySelector('.copy-code-btn')) return;

            const button = document.createElement('button');
            button.type = 'button';
            button.className = 'copy-code-btn';
            button.textContent = '📋 复制';
            button.style.cssText = 'position: absolute; top: 8px; right: 8px; padding: 4px 8px; background: rgba(0,0,0,0.05); border: 1px solid var(--border-color); border-radius: 4px; cursor: pointer; font-size: 12px;';
            button.onclick = async function() {
                try {
                    await navigator.clipboard.writeText(codeBlock.textContent);
                    button.textContent = '✓ 已复制';
                } catch (err) {
                    console.error('Failed to copy:', err);
                    button.textContent = '✗ 失败';
                }
                setTimeout(function() { button.textContent = '📋 复制'; }, 2000);
            };

            pre.style.position = 'relative';
            pre.appendChild(button);
        });
    }

    document.addEventListener('DOMContentLoaded', function() { addCopyButtonToCodeBlocks(); });
</script>
"##;

/// highlight.js over every `pre code` block, server-rendered or appended later
pub const CODE_HIGHLIGHT: &str = r##"
<script src="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/highlight.min.js"></script>
<script>
    function highlightCodeBlocks(root) {
        if (!window.hljs) return;
        (root || document).querySelectorAll('pre code').forEach(function(block) {
            if (block.dataset.highlighted) return;
            hljs.highlightElement(block);
        });
    }

    document.addEventListener('DOMContentLoaded', function() { highlightCodeBlocks(); });
</script>
"##;

/// Markdown for memos fetched after page load, matching the server rendering:
/// raw HTML shown as text, line breaks kept, grid images left out of the body
pub const MARKDOWN: &str = r##"
<script src="https://cdnjs.cloudflare.com/ajax/libs/marked/11.1.1/marked.min.js"></script>
<script>
    let markdownGridUrls = new Set();

    function safeHref(href) {
        const lowered = String(href || '').trim().toLowerCase();
        if (lowered.startsWith('javascript:') || lowered.startsWith('vbscript:') || lowered.startsWith('data:')) return '#';
        return href;
    }

    if (window.marked) {
        marked.use({
            breaks: true,
            gfm: true,
            renderer: {
                html: function(html) {
                    return escapeHtml(html);
                },
                link: function(href, title, text) {
                    // a link that only wrapped a grid image
                    if (!text) return '';
                    const titleAttr = title ? ' title="' + escapeHtml(title) + '"' : '';
                    return '<a href="' + escapeHtml(safeHref(href)) + '"' + titleAttr + '>' + text + '</a>';
                },
                image: function(href, title, text) {
                    if (markdownGridUrls.has(href)) return '';
                    const url = escapeHtml(href);
                    const titleAttr = title ? ' title="' + escapeHtml(title) + '"' : '';
                    return '<img src="' + url + '" alt="' + escapeHtml(text) + '"' + titleAttr + ' data-image="' + url + '" style="max-width: 100%; height: auto; border-radius: 8px; cursor: pointer; margin-top: 8px;">';
                }
            }
        });
    }

    function renderMarkdown(content, gridUrls) {
        if (!window.marked) {
            return '<div style="white-space: pre-wrap;">' + escapeHtml(content) + '</div>';
        }
        markdownGridUrls = gridUrls || new Set();
        try {
            return marked.parse(content || '').replace(/<p><\/p>\n?/g, '');
        } finally {
            markdownGridUrls = new Set();
        }
    }
</script>
"##;

/// Tooltip for the server-rendered heatmap cells
pub const HEATMAP_TOOLTIP: &str = r##"
<script>
    document.addEventListener('DOMContentLoaded', function() {
        const tooltip = document.getElementById('heatmapTooltip');
        if (!tooltip) return;

        document.querySelectorAll('.heatmap-cell').forEach(function(cell) {
            cell.removeAttribute('title');
            cell.addEventListener('mouseenter', function() {
                tooltip.textContent = this.getAttribute('data-date') + ': ' + this.getAttribute('data-count') + ' 条备忘录';
                tooltip.style.display = 'block';
                const rect = this.getBoundingClientRect();
                tooltip.style.left = rect.left + (rect.width / 2) + 'px';
                tooltip.style.top = (rect.top - 35) + 'px';
                tooltip.style.transform = 'translateX(-50%)';
            });
            cell.addEventListener('mouseleave', function() {
                tooltip.style.display = 'none';
            });
        });
    });
</script>
"##;

/// Message dialog helpers
pub const MESSAGES: &str = r##"
<script>
    function showMessage(type, title, text, callback) {
        const modal = document.getElementById('messageModal');
        if (!modal) {
            console.error('Modal element not found');
            return;
        }
        document.getElementById('messageIcon').textContent = type === 'success' ? '✓' : type === 'error' ? '⚠️' : 'ℹ️';
        document.getElementById('messageTitle').textContent = title;
        document.getElementById('messageText').textContent = text;
        modal.style.display = 'block';
        modal.callback = callback;
    }

    function hideMessage() {
        const modal = document.getElementById('messageModal');
        if (!modal) return;
        modal.style.display = 'none';
        if (modal.callback) {
            const callback = modal.callback;
            modal.callback = null;
            callback();
        }
    }

    document.addEventListener('click', function(e) {
        if (e.target.id === 'messageOk' || e.target.id === 'messageModal') hideMessage();
    });
</script>
"##;

/// Appends further pages from the memo API below the server-rendered feed
pub const LOAD_MORE: &str = r##"
<script>
    function gridColumns(count) {
        if (count === 1) return 1;
        if (count === 2 || count === 4) return 2;
        return 3;
    }

    function resourceUrl(resource) {
        const path = resource.filepath || '';
        if (path.startsWith('http') || path.startsWith('/api/')) return path;
        return '/api/v1/resource/' + resource.id + '/file';
    }

    // `owned` adds the visibility badge and edit link for the signed-in author's feed
    function renderMemoItem(memo, owned) {
        const cfg = window.MEMOSHARE;
        const resources = (memo.resourceList || []).map(function(r) { return Object.assign({}, r, { filepath: resourceUrl(r) }); });
        const images = resources.filter(function(r) { return r.type && r.type.startsWith('image/'); });
        const others = resources.filter(function(r) { return !r.type || !r.type.startsWith('image/'); });
        const avatar = cfg.avatarBaseUrl + (memo.creatorEmailHash || 'default') + '?s=40&d=identicon';
        const date = new Date(memo.createdTs * 1000);
        const dateStr = date.getUTCFullYear() + '年' + (date.getUTCMonth() + 1) + '月' + date.getUTCDate() + '日';
        const name = memo.creatorName || memo.creatorUsername || '匿名';

        const grid = images.length === 0 ? '' :
            '<div class="image-grid" style="display: grid; grid-template-columns: repeat(' + gridColumns(images.length) + ', 1fr); max-width: 100%; gap: 10px; margin-top: 16px;">' +
            images.map(function(r) {
                return '<div class="image-item" data-image="' + escapeHtml(r.filepath) + '" style="width: 100%; padding-bottom: 100%; position: relative; overflow: hidden; border-radius: 8px; border: 1px solid var(--border-color); cursor: pointer;">' +
                    '<img src="' + escapeHtml(r.filepath) + '" alt="' + escapeHtml(r.filename) + '" loading="lazy" style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; object-fit: cover;"></div>';
            }).join('') + '</div>';

        const attachments = others.length === 0 ? '' :
            '<div class="memo-resources" style="margin-top: 16px;">' +
            others.map(function(r) {
                return '<a href="' + escapeHtml(r.filepath) + '" class="memo-resource" target="_blank" rel="noopener noreferrer" style="display: inline-block; margin-right: 12px; margin-bottom: 8px; padding: 6px 12px; border: 1px solid var(--border-color); border-radius: 4px; text-decoration: none; color: var(--foreground-color);">📎 ' + escapeHtml(r.filename) + '</a>';
            }).join('') + '</div>';

        const tags = (memo.tagList || []).map(function(t) {
            return '<a href="/tag/' + encodeURIComponent(t.name) + '" class="memo-tag" style="display: inline-block; margin-left: 8px; padding: 2px 8px; border: 1px solid var(--border-color); border-radius: 12px; font-size: 12px; text-decoration: none; color: var(--link-color);">#' + escapeHtml(t.name) + '</a>';
        }).join('');

        const body = renderMarkdown(memo.content, new Set(images.map(function(r) { return r.filepath; })));

        const privateBadge = owned && memo.visibility === 'PRIVATE' ? '<span class="visibility-badge" style="display: inline-block; background: #6c757d; color: #fff; padding: 2px 8px; border-radius: 10px; font-size: 11px; font-weight: bold; margin-left: 4px;">🔒 私密</span>' : '';
        const editLink = owned ? '<a href="/m/' + Number(memo.id) + '" class="edit-link" style="margin-left: 8px; font-size: 12px; color: var(--link-color); text-decoration: none;">✏️ 编辑</a>' : '';

        const pinned = memo.pinned ? '<span class="pinned-badge" style="display: inline-block; background: var(--highlight-color); color: #fff; padding: 2px 8px; border-radius: 10px; font-size: 11px; font-weight: bold; margin-left: 4px;">置顶</span>' : '';

        return '<div class="item"><div class="time-box"><div class="dot"></div>' +
            '<div class="time" style="display: flex; align-items: center; gap: 12px; flex-wrap: wrap;">' +
            '<a href="/user/' + Number(memo.creatorId) + '" style="display: flex; align-items: center; gap: 8px; text-decoration: none;">' +
            '<img src="' + escapeHtml(avatar) + '" alt="头像" style="width: 30px; height: 30px; border-radius: 100%; border: 2px solid #fff; box-shadow: var(--shadows);">' +
            '<span style="color: var(--foreground-color); font-weight: 500; font-size: 14px;">' + escapeHtml(name) + '</span></a>' +
            '<span style="color: var(--secondary-color);">·</span>' +
            '<a href="/m/' + Number(memo.id) + '" class="time" style="color: var(--highlight-color);">' + dateStr + '</a>' +
            pinned + privateBadge + tags + editLink + '</div></div>' +
            '<div class="memo-box"><div class="memo-content markdown-content" id="memo-' + Number(memo.id) + '">' + body + '</div>' +
            grid + attachments + '</div></div>';
    }

    // the public feed, or the signed-in author's own memos once the home feed switched over
    function memoFeedUrl(offset) {
        const cfg = window.MEMOSHARE;
        if (cfg.feedCreatorId) {
            return '/api/v1/memo?creatorId=' + Number(cfg.feedCreatorId) + '&rowStatus=NORMAL&limit=' + cfg.pageSize + '&offset=' + offset;
        }
        return '/api/v1/memo?limit=' + cfg.pageSize + '&offset=' + offset;
    }

    function memoFeedHeaders() {
        const cfg = window.MEMOSHARE;
        return cfg.feedCreatorId ? { 'Authorization': 'Bearer ' + accessToken() } : {};
    }

    function appendMemos(container, memos) {
        const owned = !!window.MEMOSHARE.feedCreatorId;
        const existing = new Set();
        document.querySelectorAll('.memo-content').forEach(function(el) {
            existing.add(el.id.replace('memo-', ''));
        });

        memos.forEach(function(memo) {
            if (existing.has(String(memo.id))) return;
            container.insertAdjacentHTML('beforeend', renderMemoItem(memo, owned));
        });

        highlightCodeBlocks(container);
        addCopyButtonToCodeBlocks(container);
    }

    async function loadMoreMemos() {
        const cfg = window.MEMOSHARE;
        const button = document.getElementById('loadMoreBtn');
        const indicator = document.getElementById('loadingIndicator');
        const container = document.querySelector('.items');
        if (!container || !button || !indicator) return;

        button.style.display = 'none';
        indicator.textContent = '加载中...';
        indicator.style.display = 'block';

        try {
            const response = await fetch(memoFeedUrl(cfg.nextOffset), { headers: memoFeedHeaders() });
            if (!response.ok) throw new Error('Failed to load memos');
            const memos = await response.json();

            if (!Array.isArray(memos) || memos.length === 0) {
                indicator.textContent = '没有更多内容了';
                return;
            }

            appendMemos(container, memos);

            cfg.nextOffset += memos.length;
            indicator.style.display = 'none';
            if (memos.length < cfg.pageSize) {
                indicator.textContent = '没有更多内容了';
                indicator.style.display = 'block';
            } else {
                button.style.display = '';
            }
        } catch (error) {
            console.error('Error loading more memos:', error);
            indicator.textContent = '加载失败，请稍后重试';
            button.style.display = '';
        }
    }

    document.addEventListener('DOMContentLoaded', function() {
        const button = document.getElementById('loadMoreBtn');
        if (button) button.addEventListener('click', loadMoreMemos);
    });
</script>
"##;

/// Create form on the home page; guests are sent to the explore feed
pub const HOME_COMPOSER: &str = r##"
<script>
    document.addEventListener('DOMContentLoaded', function() {
        if (!isLoggedIn()) {
            window.location.href = '/explore';
            return;
        }

        const form = document.getElementById('createMemoForm');
        const createForm = document.getElementById('createForm');
        const loginPrompt = document.getElementById('loginPrompt');
        if (createForm) createForm.style.display = 'block';
        if (loginPrompt) loginPrompt.style.display = 'none';
        if (!form) return;

        form.addEventListener('submit', async function(e) {
            e.preventDefault();
            const status = document.getElementById('uploadStatus');
            const content = document.getElementById('content').value.trim();
            const visibility = document.getElementById('visibility').value;
            if (!content) return;

            try {
                status.textContent = '发布中...';
                const response = await fetch('/api/v1/memo', {
                    method: 'POST',
                    headers: {
                        'Content-Type': 'application/json',
                        'Authorization': 'Bearer ' + accessToken()
                    },
                    body: JSON.stringify({ content: content, visibility: visibility })
                });
                if (!response.ok) throw new Error('HTTP ' + response.status);
                status.textContent = '';
                showMessage('success', '发布成功', '备忘录已发布', function() { window.location.reload(); });
            } catch (error) {
                console.error('Error creating memo:', error);
                status.textContent = '发布失败';
                showMessage('error', '发布失败', error.message);
            }
        });
    });
</script>
"##;

/// Swaps the home timeline for the signed-in user's own memos, private ones included
pub const HOME_FEED: &str = r##"
<script>
    async function findCurrentUser() {
        const response = await fetch('/api/v1/user', {
            headers: { 'Authorization': 'Bearer ' + accessToken() }
        });
        if (!response.ok) throw new Error('HTTP ' + response.status);
        const users = await response.json();
        const username = localStorage.getItem('username');
        return (Array.isArray(users) ? users : []).find(function(u) { return u.username === username; });
    }

    async function loadUserMemos() {
        const cfg = window.MEMOSHARE;
        const root = document.getElementById('feedRoot');
        const button = document.getElementById('loadMoreBtn');
        const indicator = document.getElementById('loadingIndicator');
        if (!root) return;

        try {
            const user = await findCurrentUser();
            if (!user) {
                console.error('Signed-in user not found');
                return;
            }

            cfg.feedCreatorId = user.id;
            const response = await fetch(memoFeedUrl(0), { headers: memoFeedHeaders() });
            if (!response.ok) throw new Error('HTTP ' + response.status);
            const data = await response.json();
            const memos = Array.isArray(data) ? data : [];

            if (memos.length === 0) {
                root.innerHTML = '<div class="empty-state"><h3>暂无备忘录</h3><p>还没有任何备忘录</p></div>';
            } else {
                root.innerHTML = '<div class="items"></div>';
                appendMemos(root.querySelector('.items'), memos);
            }

            cfg.nextOffset = memos.length;
            if (indicator) indicator.style.display = 'none';
            if (button) button.style.display = memos.length < cfg.pageSize ? 'none' : '';
        } catch (error) {
            cfg.feedCreatorId = null;
            console.error('Error loading user memos:', error);
        }
    }

    document.addEventListener('DOMContentLoaded', function() {
        if (isLoggedIn()) loadUserMemos();
    });
</script>
"##;

/// Edit and delete controls on the memo detail page
pub const MEMO_ACTIONS: &str = r##"
<script>
    async function checkEditPermission() {
        const cfg = window.MEMOSHARE;
        const guest = document.getElementById('guestActions');
        const owner = document.getElementById('userActions');
        const denied = document.getElementById('noPermissionActions');

        if (!isLoggedIn()) {
            guest.style.display = 'block';
            return;
        }

        try {
            const response = await fetch('/api/v1/user', {
                headers: { 'Authorization': 'Bearer ' + accessToken() }
            });
            if (!response.ok) throw new Error('Failed to get user info');
            const users = await response.json();
            const username = localStorage.getItem('username');
            const current = (users || []).find(function(u) { return u.username === username; });

            if (current && (current.id === cfg.creatorId || current.isAdmin || current.is_admin)) {
                owner.style.display = 'flex';
            } else {
                denied.style.display = 'block';
            }
        } catch (error) {
            console.error('Error checking permission:', error);
            denied.style.display = 'block';
        }
    }

    function toggleEditForm() {
        const form = document.getElementById('editForm');
        form.style.display = form.style.display === 'none' ? 'block' : 'none';
    }

    function showDeleteConfirm() {
        document.getElementById('deleteModal').style.display = 'block';
    }

    function hideDeleteConfirm() {
        document.getElementById('deleteModal').style.display = 'none';
    }

    async function deleteMemo() {
        const cfg = window.MEMOSHARE;
        hideDeleteConfirm();
        try {
            const response = await fetch('/api/v1/memo/' + cfg.memoId, {
                method: 'DELETE',
                headers: { 'Authorization': 'Bearer ' + accessToken() }
            });
            if (!response.ok) throw new Error('HTTP ' + response.status);
            showMessage('success', '删除成功', '备忘录已删除', function() { window.location.href = '/'; });
        } catch (error) {
            console.error('Error deleting memo:', error);
            showMessage('error', '删除失败', error.message);
        }
    }

    document.addEventListener('DOMContentLoaded', function() {
        checkEditPermission();

        const bind = function(id, handler) {
            const el = document.getElementById(id);
            if (el) el.addEventListener('click', handler);
        };
        bind('editBtn', toggleEditForm);
        bind('cancelEditBtn', toggleEditForm);
        bind('deleteBtn', showDeleteConfirm);
        bind('cancelDeleteBtn', hideDeleteConfirm);
        bind('confirmDeleteBtn', deleteMemo);

        const form = document.getElementById('updateMemoForm');
        if (!form) return;
        form.addEventListener('submit', async function(e) {
            e.preventDefault();
            const cfg = window.MEMOSHARE;
            const content = document.getElementById('editContent').value;
            try {
                const response = await fetch('/api/v1/memo/' + cfg.memoId, {
                    method: 'PUT',
                    headers: {
                        'Content-Type': 'application/json',
                        'Authorization': 'Bearer ' + accessToken()
                    },
                    body: JSON.stringify({ content: content })
                });
                if (!response.ok) throw new Error('HTTP ' + response.status);
                showMessage('success', '保存成功', '备忘录已更新', function() { window.location.reload(); });
            } catch (error) {
                console.error('Error updating memo:', error);
                showMessage('error', '保存失败', error.message);
            }
        });
    });
</script>
"##;

/// Boot data followed by the chosen pieces, in order
pub fn compose(config: &ClientConfig, pieces: &[&str]) -> String {
    let mut out = boot(config);
    for piece in pieces {
        out.push_str(piece);
    }
    out
}
