use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::enums::HitKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "landing_hits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub page_id: i32,
    pub kind: HitKind,
    pub time: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::landing_page::Entity",
        from = "Column::PageId",
        to = "super::landing_page::Column::Id",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    LandingPage,
}

impl Related<super::landing_page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LandingPage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
