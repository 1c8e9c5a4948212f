//! Content normalization
//!
//! Turns the free-form submission fields into canonical blocks, plain text,
//! deduplicated media URLs, a slug, and an SEO-ready representation. The
//! output is used only when a web article must be created synchronously.

use super::submission::{ContentBlock, ContentPayload, MediaPayload, Submission};
use newsdesk_common::text::{escape_html, is_http_url, slugify};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical web-ready representation of a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedContent {
    pub title: String,
    pub heading: String,
    pub slug: String,
    pub lead: Option<String>,
    pub paragraphs: Vec<String>,
    pub plain_text: String,
    pub content_html: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub cover_image: Option<String>,
    pub keywords: Vec<String>,
}

/// Normalize a validated submission
pub fn normalize(submission: &Submission) -> NormalizedContent {
    let title = submission.title.trim().to_string();
    let heading = submission.effective_heading().trim().to_string();
    let slug = slugify(&title);
    let lead = submission
        .lead
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from);

    let paragraphs = extract_paragraphs(&submission.content);
    let plain_text = build_plain_text(lead.as_deref(), &paragraphs, &submission.bullet_points);
    let content_html = build_html(&heading, lead.as_deref(), &submission.content);

    let (images, videos) = collect_media(submission);
    let cover_image = images.first().cloned();

    NormalizedContent {
        title,
        heading,
        slug,
        lead,
        paragraphs,
        plain_text,
        content_html,
        cover_image,
        images,
        videos,
        keywords: submission.tags.clone(),
    }
}

/// Build the "Place, Month Day, Year" dateline
pub fn dateline(place_name: Option<&str>, date: chrono::DateTime<chrono::Utc>) -> String {
    let formatted = date.format("%B %-d, %Y");
    match place_name {
        Some(place) => format!("{}, {}", place, formatted),
        None => formatted.to_string(),
    }
}

fn extract_paragraphs(content: &ContentPayload) -> Vec<String> {
    match content {
        ContentPayload::Text(text) => text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect(),
        ContentPayload::Blocks(blocks) => blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Paragraph { text } => {
                    let text = text.trim();
                    (!text.is_empty()).then(|| text.to_string())
                }
                _ => None,
            })
            .collect(),
    }
}

fn build_plain_text(lead: Option<&str>, paragraphs: &[String], bullets: &[String]) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(lead) = lead {
        parts.push(lead.to_string());
    }

    parts.extend(paragraphs.iter().cloned());

    for bullet in bullets {
        parts.push(format!("- {}", bullet));
    }

    parts.join("\n\n")
}

fn build_html(heading: &str, lead: Option<&str>, content: &ContentPayload) -> String {
    let mut html = String::new();

    html.push_str(&format!("<h1>{}</h1>", escape_html(heading)));

    if let Some(lead) = lead {
        html.push_str(&format!("<p>{}</p>", escape_html(lead)));
    }

    match content {
        ContentPayload::Text(text) => {
            for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
                html.push_str(&format!("<p>{}</p>", escape_html(paragraph)));
            }
        }
        ContentPayload::Blocks(blocks) => {
            for block in blocks {
                match block {
                    ContentBlock::Paragraph { text } => {
                        let text = text.trim();
                        if !text.is_empty() {
                            html.push_str(&format!("<p>{}</p>", escape_html(text)));
                        }
                    }
                    ContentBlock::Heading { text } => {
                        html.push_str(&format!("<h2>{}</h2>", escape_html(text.trim())));
                    }
                    ContentBlock::List { items } => {
                        html.push_str("<ul>");
                        for item in items {
                            html.push_str(&format!("<li>{}</li>", escape_html(item)));
                        }
                        html.push_str("</ul>");
                    }
                    // Media blocks are carried on the article, not the body.
                    ContentBlock::Image { .. } | ContentBlock::Video { .. } => {}
                }
            }
        }
    }

    html
}

/// Collect absolute http(s) media URLs from every accepted shape,
/// deduplicated in insertion order.
fn collect_media(submission: &Submission) -> (Vec<String>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut images = Vec::new();
    let mut videos = Vec::new();

    let mut push = |url: &str, video: bool, images: &mut Vec<String>, videos: &mut Vec<String>| {
        let url = url.trim();
        if !is_http_url(url) || !seen.insert(url.to_string()) {
            return;
        }
        if video {
            videos.push(url.to_string());
        } else {
            images.push(url.to_string());
        }
    };

    // Direct field
    for url in &submission.image_urls {
        push(url, false, &mut images, &mut videos);
    }

    // Structured media object
    match &submission.media {
        Some(MediaPayload::Urls(urls)) => {
            for url in urls {
                push(url, false, &mut images, &mut videos);
            }
        }
        Some(MediaPayload::Structured {
            images: imgs,
            videos: vids,
        }) => {
            for url in imgs {
                push(url, false, &mut images, &mut videos);
            }
            for url in vids {
                push(url, true, &mut images, &mut videos);
            }
        }
        Some(MediaPayload::Entries(entries)) => {
            for entry in entries {
                let video = entry
                    .media_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case("video"));
                push(&entry.url, video, &mut images, &mut videos);
            }
        }
        None => {}
    }

    // Inline content blocks
    if let ContentPayload::Blocks(blocks) = &submission.content {
        for block in blocks {
            match block {
                ContentBlock::Image { url } => push(url, false, &mut images, &mut videos),
                ContentBlock::Video { url } => push(url, true, &mut images, &mut videos),
                _ => {}
            }
        }
    }

    (images, videos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::submission::{MediaEntry, MediaPayload};
    use crate::pipeline::testing::minimal_submission;
    use chrono::TimeZone;

    #[test]
    fn test_plain_text_concatenation() {
        let mut sub = minimal_submission();
        sub.lead = Some("The lead.".to_string());
        sub.content = ContentPayload::Blocks(vec![
            ContentBlock::Paragraph {
                text: "First paragraph.".to_string(),
            },
            ContentBlock::Paragraph {
                text: "Second paragraph.".to_string(),
            },
        ]);
        sub.bullet_points = vec!["quick highlight".to_string()];

        let normalized = normalize(&sub);
        assert_eq!(
            normalized.plain_text,
            "The lead.\n\nFirst paragraph.\n\nSecond paragraph.\n\n- quick highlight"
        );
    }

    #[test]
    fn test_html_blocks() {
        let mut sub = minimal_submission();
        sub.heading = Some("Main <Heading>".to_string());
        sub.content = ContentPayload::Blocks(vec![
            ContentBlock::Heading {
                text: "Section".to_string(),
            },
            ContentBlock::Paragraph {
                text: "Body & text.".to_string(),
            },
            ContentBlock::List {
                items: vec!["a".to_string(), "b".to_string()],
            },
        ]);

        let normalized = normalize(&sub);
        assert_eq!(
            normalized.content_html,
            "<h1>Main &lt;Heading&gt;</h1><h2>Section</h2><p>Body &amp; text.</p><ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn test_media_dedupe_across_shapes() {
        let mut sub = minimal_submission();
        sub.image_urls = vec![
            "https://cdn.example.com/a.jpg".to_string(),
            "/relative.jpg".to_string(),
        ];
        sub.media = Some(MediaPayload::Entries(vec![
            MediaEntry {
                url: "https://cdn.example.com/a.jpg".to_string(),
                media_type: Some("image".to_string()),
            },
            MediaEntry {
                url: "https://cdn.example.com/clip.mp4".to_string(),
                media_type: Some("video".to_string()),
            },
        ]));
        sub.content = ContentPayload::Blocks(vec![ContentBlock::Image {
            url: "https://cdn.example.com/b.jpg".to_string(),
        }]);

        let normalized = normalize(&sub);
        assert_eq!(
            normalized.images,
            vec![
                "https://cdn.example.com/a.jpg".to_string(),
                "https://cdn.example.com/b.jpg".to_string(),
            ]
        );
        assert_eq!(normalized.videos, vec!["https://cdn.example.com/clip.mp4".to_string()]);
        assert_eq!(
            normalized.cover_image.as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn test_slug_from_title() {
        let mut sub = minimal_submission();
        sub.title = "Flood Relief in Krishna District".to_string();
        let normalized = normalize(&sub);
        assert_eq!(normalized.slug, "flood-relief-in-krishna-district");
    }

    #[test]
    fn test_text_payload_splits_paragraphs() {
        let mut sub = minimal_submission();
        sub.content = ContentPayload::Text("First part.\n\nSecond part.".to_string());
        let normalized = normalize(&sub);
        assert_eq!(normalized.paragraphs.len(), 2);
        assert!(normalized.content_html.contains("<p>First part.</p>"));
    }

    #[test]
    fn test_dateline() {
        let date = chrono::Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        assert_eq!(dateline(Some("Hyderabad"), date), "Hyderabad, August 7, 2026");
        assert_eq!(dateline(None, date), "August 7, 2026");
    }
}
