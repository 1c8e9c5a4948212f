//! Submission model and fail-closed validation
//!
//! The wire payload accepts several historical shapes for content, media,
//! and location. Everything is funneled through one normalization step
//! before persistence; nothing loosely-shaped survives past this module.

use newsdesk_common::errors::{AppError, Result};
use newsdesk_common::text::{is_http_url, word_count};
use newsdesk_common::{MAX_BULLET_POINTS, MAX_BULLET_WORDS};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Maximum title and subtitle length in characters
pub const MAX_TITLE_CHARS: usize = 50;

/// Maximum body length in words
pub const MAX_BODY_WORDS: usize = 2000;

/// One content payload submitted by a reporter or editor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[validate(length(min = 1, max = 50))]
    pub title: String,

    #[validate(length(max = 50))]
    pub subtitle: Option<String>,

    /// Print headline; falls back to the title
    pub heading: Option<String>,

    /// Lead paragraph
    #[serde(default)]
    pub lead: Option<String>,

    /// Body content, either a plain string or typed blocks
    #[serde(default)]
    pub content: ContentPayload,

    #[serde(default)]
    pub bullet_points: Vec<String>,

    #[serde(default)]
    pub location: LocationPayload,

    pub language_code: Option<String>,

    /// Tenant hint; only honored for global principals
    pub tenant_id: Option<Uuid>,

    pub domain_id: Option<Uuid>,

    pub domain_name: Option<String>,

    /// Structured media payload (one of several accepted shapes)
    #[serde(default)]
    pub media: Option<MediaPayload>,

    /// Direct image URL list (legacy shape)
    #[serde(default)]
    pub image_urls: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub category_id: Option<Uuid>,

    pub category_name: Option<String>,

    /// Publish immediately instead of keeping a draft
    #[serde(default)]
    pub publish: bool,

    pub callback_url: Option<String>,
}

/// Body content in either of the accepted shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPayload {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl Default for ContentPayload {
    fn default() -> Self {
        ContentPayload::Blocks(Vec::new())
    }
}

/// A typed content block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph { text: String },
    Heading { text: String },
    List { items: Vec<String> },
    Image { url: String },
    Video { url: String },
}

/// Media payload in any of the accepted shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaPayload {
    Urls(Vec<String>),
    Structured {
        #[serde(default)]
        images: Vec<String>,
        #[serde(default)]
        videos: Vec<String>,
    },
    Entries(Vec<MediaEntry>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub url: String,
    pub media_type: Option<String>,
}

/// Loosely-shaped location reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    pub village_id: Option<Uuid>,
    pub mandal_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub state_id: Option<Uuid>,

    /// Free-text fallback name
    #[serde(alias = "name", alias = "placeName")]
    pub city: Option<String>,

    pub address: Option<String>,
}

impl Submission {
    /// The print headline (defaults to the title)
    pub fn effective_heading(&self) -> &str {
        self.heading
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(&self.title)
    }

    /// The callback URL, kept only when it parses as absolute http(s).
    /// A malformed URL is dropped silently rather than rejected.
    pub fn effective_callback_url(&self) -> Option<String> {
        self.callback_url
            .as_deref()
            .filter(|u| is_http_url(u))
            .map(String::from)
    }

    /// Total body word count across lead and content
    pub fn body_word_count(&self) -> usize {
        let lead = self.lead.as_deref().map(word_count).unwrap_or(0);

        let body = match &self.content {
            ContentPayload::Text(text) => word_count(text),
            ContentPayload::Blocks(blocks) => blocks
                .iter()
                .map(|b| match b {
                    ContentBlock::Paragraph { text } | ContentBlock::Heading { text } => {
                        word_count(text)
                    }
                    ContentBlock::List { items } => items.iter().map(|i| word_count(i)).sum(),
                    ContentBlock::Image { .. } | ContentBlock::Video { .. } => 0,
                })
                .sum(),
        };

        lead + body
    }

    /// Fail-closed validation; runs before any write
    pub fn check(&self) -> Result<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::MissingField {
                field: "title".to_string(),
            });
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::validation(
                "title",
                format!("title exceeds {} characters", MAX_TITLE_CHARS),
            ));
        }

        if let Some(subtitle) = &self.subtitle {
            if subtitle.chars().count() > MAX_TITLE_CHARS {
                return Err(AppError::validation(
                    "subtitle",
                    format!("subtitle exceeds {} characters", MAX_TITLE_CHARS),
                ));
            }
        }

        if self.body_word_count() > MAX_BODY_WORDS {
            return Err(AppError::validation(
                "content",
                format!("body exceeds {} words", MAX_BODY_WORDS),
            ));
        }

        if self.bullet_points.len() > MAX_BULLET_POINTS {
            return Err(AppError::validation(
                "bulletPoints",
                format!("at most {} bullet points allowed", MAX_BULLET_POINTS),
            ));
        }

        for (idx, point) in self.bullet_points.iter().enumerate() {
            if word_count(point) > MAX_BULLET_WORDS {
                return Err(AppError::validation(
                    "bulletPoints",
                    format!(
                        "bullet point {} exceeds {} words",
                        idx + 1,
                        MAX_BULLET_WORDS
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::minimal_submission;

    #[test]
    fn test_valid_submission_passes() {
        assert!(minimal_submission().check().is_ok());
    }

    #[test]
    fn test_title_of_51_chars_rejected() {
        let mut sub = minimal_submission();
        sub.title = "x".repeat(51);
        let err = sub.check().unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_title_of_50_chars_accepted() {
        let mut sub = minimal_submission();
        sub.title = "x".repeat(50);
        assert!(sub.check().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut sub = minimal_submission();
        sub.title = "   ".to_string();
        assert!(sub.check().is_err());
    }

    #[test]
    fn test_six_word_bullet_rejected() {
        let mut sub = minimal_submission();
        sub.bullet_points = vec!["one two three four five six".to_string()];
        assert!(sub.check().is_err());
    }

    #[test]
    fn test_six_bullets_rejected() {
        let mut sub = minimal_submission();
        sub.bullet_points = (0..6).map(|i| format!("point {}", i)).collect();
        assert!(sub.check().is_err());
    }

    #[test]
    fn test_body_word_limit() {
        let mut sub = minimal_submission();
        sub.content = ContentPayload::Text("word ".repeat(2001));
        assert!(sub.check().is_err());

        sub.content = ContentPayload::Text("word ".repeat(2000));
        assert!(sub.check().is_ok());
    }

    #[test]
    fn test_malformed_callback_url_dropped_silently() {
        let mut sub = minimal_submission();
        sub.callback_url = Some("not a url".to_string());
        assert!(sub.check().is_ok());
        assert_eq!(sub.effective_callback_url(), None);

        sub.callback_url = Some("https://example.com/hook".to_string());
        assert_eq!(
            sub.effective_callback_url(),
            Some("https://example.com/hook".to_string())
        );
    }

    #[test]
    fn test_heading_defaults_to_title() {
        let mut sub = minimal_submission();
        sub.heading = None;
        assert_eq!(sub.effective_heading(), "Test");

        sub.heading = Some("Actual Heading".to_string());
        assert_eq!(sub.effective_heading(), "Actual Heading");
    }

    #[test]
    fn test_content_payload_accepts_both_shapes() {
        let text: Submission =
            serde_json::from_str(r#"{"title":"T","content":"plain body"}"#).unwrap();
        assert_eq!(text.body_word_count(), 2);

        let blocks: Submission = serde_json::from_str(
            r#"{"title":"T","content":[{"type":"paragraph","text":"a b c"}]}"#,
        )
        .unwrap();
        assert_eq!(blocks.body_word_count(), 3);
    }
}
