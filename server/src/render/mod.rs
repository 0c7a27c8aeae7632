//! Presentation toolkit shared by every page
//!
//! - `feed`: memo list and detail fragments
//! - `heatmap`: 30-day activity grid
//! - `layout`: document shell, header, nav, footer, styles
//! - `markdown`: memo body rendering
//! - `resource`: resource URLs and image grid layout
//! - `scripts`: client-side behaviour composed per page

pub mod avatar;
pub mod feed;
pub mod heatmap;
pub mod layout;
pub mod markdown;
pub mod resource;
pub mod scripts;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape text for HTML bodies and double-quoted attributes
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Percent-encode a path segment
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Serialize a value for embedding inside an inline `<script>`
pub fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "周一",
        Weekday::Tue => "周二",
        Weekday::Wed => "周三",
        Weekday::Thu => "周四",
        Weekday::Fri => "周五",
        Weekday::Sat => "周六",
        Weekday::Sun => "周日",
    }
}

/// `2024年1月1日`
pub fn format_date(ts: i64) -> String {
    let t = timestamp(ts);
    format!("{}年{}月{}日", t.year(), t.month(), t.day())
}

/// `1月1日周一 10:05`
pub fn format_short_datetime(ts: i64) -> String {
    let t = timestamp(ts);
    format!(
        "{}月{}日{} {:02}:{:02}",
        t.month(),
        t.day(),
        weekday_label(t.weekday()),
        t.hour(),
        t.minute()
    )
}

/// `2024年1月1日周一 10:05`
pub fn format_long_datetime(ts: i64) -> String {
    format!("{}年{}", timestamp(ts).year(), format_short_datetime(ts))
}

/// RFC 3339 value for `<time datetime>`
pub fn format_iso(ts: i64) -> String {
    timestamp(ts).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_encode_component_matches_uri_component() {
        assert_eq!(encode_component("rust lang"), "rust%20lang");
        assert_eq!(encode_component("读书"), "%E8%AF%BB%E4%B9%A6");
        assert_eq!(encode_component("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_component("keep-_.!~*'()"), "keep-_.!~*'()");
    }

    #[test]
    fn test_script_json_cannot_close_script() {
        let out = script_json(&"</script><b>");
        assert!(!out.contains("</script>"));
        assert_eq!(out, r#""<\/script><b>""#);
    }

    #[test]
    fn test_date_formats() {
        // 2024-01-01T10:05:00Z, a Monday
        let ts = 1_704_103_500;
        assert_eq!(format_date(ts), "2024年1月1日");
        assert_eq!(format_short_datetime(ts), "1月1日周一 10:05");
        assert_eq!(format_long_datetime(ts), "2024年1月1日周一 10:05");
        assert_eq!(format_iso(ts), "2024-01-01T10:05:00+00:00");
    }
}
