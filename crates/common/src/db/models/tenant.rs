//! Tenant entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text", unique)]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub api_key_hash: String,

    pub is_active: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::domain::Entity")]
    Domains,

    #[sea_orm(has_many = "super::reporter::Entity")]
    Reporters,

    #[sea_orm(has_many = "super::article::Entity")]
    Articles,

    #[sea_orm(has_one = "super::tenant_feature_flags::Entity")]
    FeatureFlags,
}

impl Related<super::domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Domains.def()
    }
}

impl Related<super::reporter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reporters.def()
    }
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Articles.def()
    }
}

impl Related<super::tenant_feature_flags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeatureFlags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
