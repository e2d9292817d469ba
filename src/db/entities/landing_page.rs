use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "landing_pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    // Bijective base-62 value of `code`, only meaningful for codes shorter than 5 chars
    #[sea_orm(indexed)]
    pub code_index: i64,
    pub group_id: i32,
    pub board_id: Option<i32>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub html: String,
    pub redirect_uri: Option<String>,
    pub notify_email: Option<String>,
    pub page_views: i32,
    pub leads: i32,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::board::Entity",
        from = "Column::BoardId",
        to = "super::board::Column::Id",
        on_delete = "SetNull",
        on_update = "Cascade"
    )]
    Board,
    #[sea_orm(has_many = "super::landing_hit::Entity")]
    LandingHit,
}

impl Related<super::board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Board.def()
    }
}

impl Related<super::landing_hit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LandingHit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
