//! Table creation straight from the entity definitions. Used by the test
//! suites and by `auto_migrate` on first boot; production schemas are expected
//! to be managed out of band.

use sea_orm::{ConnectionTrait, DbErr, EntityName, EntityTrait, Schema};
use tracing::debug;

use crate::db::entities::{
    board, board_field, card, card_field_value, contact, contact_field, contact_field_value,
    landing_hit, landing_page, stage,
};

/// Creates every table this service touches, parents before children, along
/// with the column indexes the entities declare.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, board::Entity).await?;
    create_table(db, stage::Entity).await?;
    create_table(db, board_field::Entity).await?;
    create_table(db, landing_page::Entity).await?;
    create_table(db, landing_hit::Entity).await?;
    create_table(db, contact::Entity).await?;
    create_table(db, contact_field::Entity).await?;
    create_table(db, contact_field_value::Entity).await?;
    create_table(db, card::Entity).await?;
    create_table(db, card_field_value::Entity).await?;
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    debug!(table = %table, "Creating table if missing.");
    db.execute(backend.build(&statement)).await?;

    for mut index in schema.create_index_from_entity(E::default()) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }
    Ok(())
}
