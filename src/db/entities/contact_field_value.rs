use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_field_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub contact_id: String,
    pub contact_field_id: i32,
    #[sea_orm(column_type = "Text")]
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::Id",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    Contact,
    #[sea_orm(
        belongs_to = "super::contact_field::Entity",
        from = "Column::ContactFieldId",
        to = "super::contact_field::Column::Id",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    ContactField,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::contact_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContactField.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
