//! Village entity (most specific level of the geographic chain)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "villages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub mandal_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mandal::Entity",
        from = "Column::MandalId",
        to = "super::mandal::Column::Id"
    )]
    Mandal,
}

impl Related<super::mandal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mandal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
