//! SQS Queue integration for async rewrite processing
//!
//! Provides:
//! - SQS client wrapper
//! - Message serialization/deserialization
//! - The rewrite worker message contract

use crate::errors::{AppError, Result};
use aws_sdk_sqs::types::Message;
use aws_sdk_sqs::Client as SqsClient;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// SQS queue configuration
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Queue URL
    pub url: String,
    /// Dead letter queue URL (optional)
    pub dlq_url: Option<String>,
    /// Visibility timeout in seconds
    pub visibility_timeout: i32,
    /// Wait time for long polling (seconds)
    pub wait_time_seconds: i32,
    /// Maximum number of messages per poll
    pub max_messages: i32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            dlq_url: None,
            visibility_timeout: 30,
            wait_time_seconds: 20,
            max_messages: 10,
        }
    }
}

/// SQS Queue client wrapper
pub struct Queue {
    client: SqsClient,
    config: QueueConfig,
}

impl Queue {
    /// Create a new queue client
    pub async fn new(config: QueueConfig) -> Result<Self> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = SqsClient::new(&aws_config);

        Ok(Self { client, config })
    }

    /// Create with existing AWS config
    pub fn with_client(client: SqsClient, config: QueueConfig) -> Self {
        Self { client, config }
    }

    /// Send a message to the queue
    pub async fn send<T: Serialize>(&self, message: &T) -> Result<String> {
        let body = serde_json::to_string(message).map_err(|e| AppError::QueueError {
            message: format!("Failed to serialize message: {}", e),
        })?;

        let result = self
            .client
            .send_message()
            .queue_url(&self.config.url)
            .message_body(&body)
            .send()
            .await
            .map_err(|e| AppError::QueueError {
                message: format!("Failed to send message: {}", e),
            })?;

        let message_id = result.message_id.unwrap_or_default();
        debug!(message_id = %message_id, "Message sent to queue");

        Ok(message_id)
    }

    /// Parse message body as JSON (used by queue consumers)
    pub fn parse_message<T: DeserializeOwned>(message: &Message) -> Result<T> {
        let body = message.body.as_ref().ok_or_else(|| AppError::QueueError {
            message: "Message has no body".to_string(),
        })?;

        serde_json::from_str(body).map_err(|e| AppError::QueueError {
            message: format!("Failed to parse message: {}", e),
        })
    }
}

/// Formats the rewrite worker must produce for an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedFormats {
    pub web: bool,
    pub short: bool,
    pub newspaper: bool,
}

/// Rewrite job message sent to the AI worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteJobMessage {
    pub base_article_id: Uuid,
    pub tenant_id: Uuid,
    pub ai_mode: String,
    pub formats: QueuedFormats,
    pub language_code: String,
    pub callback_url: Option<String>,
}
