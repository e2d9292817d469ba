use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A captured lead. Absent form fields are stored as empty strings so the
/// duplicate check can compare them with plain equality.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub last_text: String,
    pub first_activity: ChronoDateTimeUtc,
    pub last_activity: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contact_field_value::Entity")]
    ContactFieldValue,
    #[sea_orm(has_many = "super::card::Entity")]
    Card,
}

impl Related<super::contact_field_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContactFieldValue.def()
    }
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
