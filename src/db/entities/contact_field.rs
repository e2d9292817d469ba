use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_fields")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub group_id: i32,
    pub label: String,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contact_field_value::Entity")]
    ContactFieldValue,
}

impl Related<super::contact_field_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContactFieldValue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
