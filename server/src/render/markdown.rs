//! Markdown rendering for memo bodies
//!
//! Raw HTML in memo content is shown as text. Images already present in
//! the memo's image grid are dropped from the body; the rest become
//! clickable, width-capped images.

use super::escape;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;

struct PendingImage {
    url: String,
    title: String,
    alt: String,
}

impl PendingImage {
    fn to_html(&self) -> String {
        let url = escape(&self.url);
        let title = if self.title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape(&self.title))
        };
        format!(
            r#"<img src="{url}" alt="{alt}"{title} data-image="{url}" style="max-width: 100%; height: auto; border-radius: 8px; cursor: pointer; margin-top: 8px;">"#,
            alt = escape(&self.alt),
        )
    }
}

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

fn safe_href(url: CowStr<'_>) -> CowStr<'_> {
    let lowered = url.trim_start().to_ascii_lowercase();
    if ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Render memo markdown to HTML, skipping images whose URL is in `grid_urls`.
///
/// Single newlines become line breaks.
pub fn render(source: &str, grid_urls: &HashSet<String>) -> String {
    let mut events = Vec::new();
    let mut image: Option<PendingImage> = None;
    // start index of each open link, and whether a grid image was dropped inside it
    let mut links: Vec<(usize, bool)> = Vec::new();

    for event in Parser::new_ext(source, parser_options()) {
        if let Some(mut pending) = image.take() {
            match event {
                Event::End(TagEnd::Image) => {
                    if !grid_urls.contains(&pending.url) {
                        events.push(Event::Html(pending.to_html().into()));
                    } else if let Some(link) = links.last_mut() {
                        link.1 = true;
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    pending.alt.push_str(&text);
                    image = Some(pending);
                }
                _ => image = Some(pending),
            }
            continue;
        }

        match event {
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                image = Some(PendingImage {
                    url: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                });
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                links.push((events.len(), false));
                events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url: safe_href(dest_url),
                    title,
                    id,
                }));
            }
            Event::End(TagEnd::Link) => match links.pop() {
                // the link only wrapped a grid image
                Some((start, true)) if events.len() == start + 1 => events.truncate(start),
                _ => events.push(Event::End(TagEnd::Link)),
            },
            Event::SoftBreak => events.push(Event::HardBreak),
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    // a paragraph that only held a grid image
    out.replace("<p></p>\n", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_plain(source: &str) -> String {
        render(source, &HashSet::new())
    }

    #[test]
    fn test_basic_markdown() {
        let html = render_plain("# Title\n\n**bold** and ~~gone~~");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_soft_breaks_become_line_breaks() {
        let html = render_plain("line one\nline two");
        assert!(html.contains("line one<br />"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_plain("hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let block = render_plain("<div onclick=\"x()\">block</div>");
        assert!(!block.contains("<div onclick"));
    }

    #[test]
    fn test_script_links_neutralized() {
        let html = render_plain("[click](javascript:alert(1))");
        assert!(html.contains(r##"<a href="#">click</a>"##));
    }

    #[test]
    fn test_grid_images_dropped() {
        let mut grid = HashSet::new();
        grid.insert("/api/v1/resource/1/file".to_string());

        let html = render(
            "text\n\n![shot](/api/v1/resource/1/file)\n\n![other](https://x.test/o.png)",
            &grid,
        );
        assert!(!html.contains("/api/v1/resource/1/file"));
        assert!(!html.contains("<p></p>"));
        assert!(html.contains(r#"<img src="https://x.test/o.png" alt="other""#));
        assert!(html.contains(r#"data-image="https://x.test/o.png""#));
    }

    #[test]
    fn test_linked_grid_image_dropped_with_link() {
        let mut grid = HashSet::new();
        grid.insert("/api/v1/resource/1/file".to_string());

        let html = render(
            "[![shot](/api/v1/resource/1/file)](https://x.test/full)\n\nafter",
            &grid,
        );
        assert!(!html.contains("<a"));
        assert!(!html.contains("<p></p>"));
        assert!(html.contains("<p>after</p>"));

        // a link with its own text keeps the anchor
        let kept = render(
            "[![shot](/api/v1/resource/1/file) full size](https://x.test/full)",
            &grid,
        );
        assert!(kept.contains(r#"<a href="https://x.test/full"> full size</a>"#));
    }
}
