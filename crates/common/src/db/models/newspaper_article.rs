//! Newspaper (print) article entity
//!
//! 1:1 with the base article; always created by the pipeline.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "newspaper_articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub base_article_id: Uuid,

    pub tenant_id: Uuid,

    /// Human-facing identifier, ART{YYYYMMDD}{seq:04}
    #[sea_orm(column_type = "Text")]
    pub external_id: String,

    #[sea_orm(column_type = "Text")]
    pub headline: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub subtitle: Option<String>,

    /// Bullet highlights as a JSON array (at most five)
    #[sea_orm(column_type = "JsonBinary")]
    pub points: Json,

    /// "Place, Month Day, Year" byline prefix
    #[sea_orm(column_type = "Text")]
    pub dateline: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub place_name: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub status: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::BaseArticleId",
        to = "super::article::Column::Id"
    )]
    BaseArticle,

    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id"
    )]
    Tenant,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseArticle.def()
    }
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
