//! Base article entity
//!
//! The canonical record created exactly once per submission. The descriptor
//! JSONB carries the normalized submission snapshot, the AI decision audit
//! fact, the queue descriptor, and the worker-owned ai_status.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Article status enum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    Pending,
    Published,
}

impl From<String> for ArticleStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "draft" => ArticleStatus::Draft,
            "pending" => ArticleStatus::Pending,
            "published" => ArticleStatus::Published,
            _ => ArticleStatus::Draft,
        }
    }
}

impl From<ArticleStatus> for String {
    fn from(status: ArticleStatus) -> Self {
        match status {
            ArticleStatus::Draft => "draft".to_string(),
            ArticleStatus::Pending => "pending".to_string(),
            ArticleStatus::Published => "published".to_string(),
        }
    }
}

/// AI processing status carried in the descriptor; owned by the rewrite
/// worker once the article is enqueued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl AiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiStatus::Pending => "pending",
            AiStatus::Processing => "processing",
            AiStatus::Completed => "completed",
            AiStatus::Failed => "failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub tenant_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    /// Normalized plain-text content
    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(column_type = "Text")]
    pub status: String,

    /// Absolute media URLs as a JSON array
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,

    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,

    pub category_id: Option<Uuid>,

    /// Opaque descriptor blob: submission snapshot, AI decision, queue
    /// descriptor, ai_status
    #[sea_orm(column_type = "JsonBinary")]
    pub descriptor: Json,

    #[sea_orm(column_type = "Text")]
    pub language_code: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Get the article status as an enum
    pub fn article_status(&self) -> ArticleStatus {
        ArticleStatus::from(self.status.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id"
    )]
    Tenant,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    #[sea_orm(has_one = "super::newspaper_article::Entity")]
    NewspaperArticle,

    #[sea_orm(has_many = "super::web_article::Entity")]
    WebArticles,
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::newspaper_article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewspaperArticle.def()
    }
}

impl Related<super::web_article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WebArticles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
