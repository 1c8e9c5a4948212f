//! Text utilities for the publication pipeline
//!
//! Slug generation, word counting/trimming, a small allowlist HTML pass,
//! and URL checks.

use regex_lite::Regex;
use std::sync::OnceLock;
use url::Url;

/// HTML tags allowed through the sanitizer
const ALLOWED_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "ul", "ol", "li", "strong", "em", "a", "br", "blockquote",
];

/// Compute a URL-safe slug from a title
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        slug.push_str("article");
    }

    slug
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep at most `max` words of the text
pub fn trim_words(text: &str, max: usize) -> String {
    text.split_whitespace()
        .take(max)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `max` characters, cutting on a word boundary
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max).collect();
    match truncated.rfind(' ') {
        Some(idx) => truncated[..idx].to_string(),
        None => truncated,
    }
}

/// Escape text for embedding in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn script_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").unwrap())
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</?([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").unwrap())
}

/// Strip HTML down to the allowlist
///
/// Script and style blocks are removed with their content; other disallowed
/// tags are removed but their text is kept. Attributes are dropped except
/// href on anchors.
pub fn sanitize_html(input: &str) -> String {
    let without_blocks = script_block_re().replace_all(input, "");

    tag_re()
        .replace_all(&without_blocks, |caps: &regex_lite::Captures<'_>| {
            let whole = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            let name = caps.get(1).map(|m| m.as_str().to_ascii_lowercase()).unwrap_or_default();

            if !ALLOWED_TAGS.contains(&name.as_str()) {
                return String::new();
            }

            let closing = whole.starts_with("</");
            if closing {
                return format!("</{}>", name);
            }

            if name == "a" {
                if let Some(href) = extract_href(whole) {
                    if is_http_url(&href) {
                        return format!("<a href=\"{}\">", href);
                    }
                }
                return "<a>".to_string();
            }

            format!("<{}>", name)
        })
        .to_string()
}

fn extract_href(tag: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"(?i)href\s*=\s*["']([^"']+)["']"#).unwrap());
    re.captures(tag).map(|c| c[1].to_string())
}

/// Check whether a string parses as an absolute http(s) URL
pub fn is_http_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
