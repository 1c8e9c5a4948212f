//! Tenant web article entity
//!
//! Created synchronously only in limited-rewrite mode; otherwise the
//! rewrite worker creates it later.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "web_articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub base_article_id: Uuid,

    pub tenant_id: Uuid,

    pub domain_id: Option<Uuid>,

    #[sea_orm(column_type = "Text")]
    pub slug: String,

    #[sea_orm(column_type = "Text")]
    pub content_html: String,

    #[sea_orm(column_type = "Text")]
    pub plain_text: String,

    #[sea_orm(column_type = "Text")]
    pub meta_title: String,

    #[sea_orm(column_type = "Text")]
    pub meta_description: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub canonical_url: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub json_ld: Json,

    #[sea_orm(column_type = "Text", nullable)]
    pub cover_image: Option<String>,

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

    #[sea_orm(
        belongs_to = "super::domain::Entity",
        from = "Column::DomainId",
        to = "super::domain::Column::Id"
    )]
    Domain,
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

impl Related<super::domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Domain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
