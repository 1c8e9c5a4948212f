//! SEO metadata builder
//!
//! Produces the meta description, canonical URL, and schema.org NewsArticle
//! JSON-LD for web articles.

use crate::text::truncate_chars;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Maximum length of a meta description
const META_DESCRIPTION_CHARS: usize = 160;

/// Inputs for building SEO metadata
#[derive(Debug, Clone)]
pub struct SeoInput {
    pub headline: String,
    pub plain_text: String,
    pub slug: String,
    pub hostname: Option<String>,
    pub images: Vec<String>,
    pub language_code: String,
    pub keywords: Vec<String>,
    pub published_at: DateTime<Utc>,
}

/// Built SEO metadata
#[derive(Debug, Clone)]
pub struct SeoMeta {
    pub meta_title: String,
    pub meta_description: String,
    pub canonical_url: Option<String>,
    pub json_ld: Value,
}

/// Build a meta description from plain text
pub fn meta_description(plain_text: &str) -> String {
    truncate_chars(plain_text.trim(), META_DESCRIPTION_CHARS)
}

/// Build the canonical URL for a slug on a hostname
pub fn canonical_url(hostname: &str, slug: &str) -> String {
    format!("https://{}/articles/{}", hostname.trim_end_matches('/'), slug)
}

/// Build the full SEO metadata set
pub fn build(input: SeoInput) -> SeoMeta {
    let description = meta_description(&input.plain_text);
    let canonical = input
        .hostname
        .as_deref()
        .map(|h| canonical_url(h, &input.slug));

    let mut json_ld = json!({
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "headline": input.headline,
        "description": description,
        "inLanguage": input.language_code,
        "datePublished": input.published_at.to_rfc3339(),
        "dateModified": input.published_at.to_rfc3339(),
    });

    if !input.images.is_empty() {
        json_ld["image"] = json!(input.images);
    }

    if !input.keywords.is_empty() {
        json_ld["keywords"] = json!(input.keywords.join(", "));
    }

    if let Some(ref url) = canonical {
        json_ld["mainEntityOfPage"] = json!({
            "@type": "WebPage",
            "@id": url,
        });
    }

    SeoMeta {
        meta_title: input.headline,
        meta_description: description,
        canonical_url: canonical,
        json_ld,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> SeoInput {
        SeoInput {
            headline: "Flood Relief Reaches Krishna District".to_string(),
            plain_text: "Relief teams arrived early on Monday. ".repeat(20),
            slug: "flood-relief-reaches-krishna-district".to_string(),
            hostname: Some("news.example.com".to_string()),
            images: vec!["https://cdn.example.com/a.jpg".to_string()],
            language_code: "en".to_string(),
            keywords: vec!["flood".to_string(), "relief".to_string()],
            published_at: Utc::now(),
        }
    }

    #[test]
    fn test_meta_description_truncates() {
        let meta = meta_description(&"word ".repeat(100));
        assert!(meta.chars().count() <= META_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(
            canonical_url("news.example.com", "some-slug"),
            "https://news.example.com/articles/some-slug"
        );
    }

    #[test]
    fn test_json_ld_shape() {
        let meta = build(sample_input());

        assert_eq!(meta.json_ld["@type"], "NewsArticle");
        assert_eq!(meta.json_ld["headline"], "Flood Relief Reaches Krishna District");
        assert_eq!(meta.json_ld["image"][0], "https://cdn.example.com/a.jpg");
        assert_eq!(meta.json_ld["keywords"], "flood, relief");
        assert_eq!(
            meta.canonical_url.as_deref(),
            Some("https://news.example.com/articles/flood-relief-reaches-krishna-district")
        );
        assert_eq!(meta.json_ld["mainEntityOfPage"]["@id"], meta.canonical_url.unwrap());
    }

    #[test]
    fn test_no_hostname_means_no_canonical() {
        let mut input = sample_input();
        input.hostname = None;
        let meta = build(input);

        assert!(meta.canonical_url.is_none());
        assert!(meta.json_ld.get("mainEntityOfPage").is_none());
    }
}
