//! Fixtures for tests that need a real database: an in-memory SQLite
//! connection with every table created, plus small seeding helpers.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use crate::db::entities::{board, board_field, contact_field, landing_page, stage};
use crate::db::schema;
use crate::landing::code;

pub const TEST_GROUP: i32 = 1;

pub async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // One connection, otherwise each pooled connection sees its own empty database.
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    schema::create_tables(&db).await.unwrap();
    db
}

pub async fn seed_page<F>(db: &DatabaseConnection, page_code: &str, customize: F) -> landing_page::Model
where
    F: FnOnce(&mut landing_page::ActiveModel),
{
    let mut page = landing_page::ActiveModel {
        code: Set(page_code.to_string()),
        code_index: Set(code::code_to_index(page_code).unwrap_or(0)),
        group_id: Set(TEST_GROUP),
        board_id: Set(None),
        title: Set(format!("Page {page_code}")),
        html: Set("<html><body><form method=\"post\"></form></body></html>".to_string()),
        redirect_uri: Set(None),
        notify_email: Set(None),
        page_views: Set(0),
        leads: Set(0),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    customize(&mut page);
    page.insert(db).await.unwrap()
}

pub async fn seed_board(db: &DatabaseConnection) -> board::Model {
    board::ActiveModel {
        group_id: Set(TEST_GROUP),
        name: Set("Sales".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_stage(db: &DatabaseConnection, board_id: i32, name: &str, position: i32) -> stage::Model {
    stage::ActiveModel {
        board_id: Set(board_id),
        name: Set(name.to_string()),
        position: Set(position),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_contact_field(db: &DatabaseConnection, label: &str, enabled: bool) -> contact_field::Model {
    contact_field::ActiveModel {
        group_id: Set(TEST_GROUP),
        label: Set(label.to_string()),
        enabled: Set(enabled),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_board_field(
    db: &DatabaseConnection,
    board_id: i32,
    label: &str,
    enabled: bool,
) -> board_field::Model {
    board_field::ActiveModel {
        board_id: Set(board_id),
        label: Set(label.to_string()),
        enabled: Set(enabled),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
