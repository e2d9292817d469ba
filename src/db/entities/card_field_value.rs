use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "card_field_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub card_id: i32,
    pub board_field_id: i32,
    #[sea_orm(column_type = "Text")]
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::card::Entity",
        from = "Column::CardId",
        to = "super::card::Column::Id",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    Card,
    #[sea_orm(
        belongs_to = "super::board_field::Entity",
        from = "Column::BoardFieldId",
        to = "super::board_field::Column::Id",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    BoardField,
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl Related<super::board_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoardField.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
