//! SeaORM Entity Crate
//!
//! Defines the SeaORM entities that map to database tables.
//! Each entity is defined in its own module (e.g., `landing_page.rs`, `contact.rs`).

pub mod landing_page;
pub mod landing_hit;
pub mod contact;
pub mod contact_field;
pub mod contact_field_value;
pub mod board;
pub mod stage;
pub mod card;
pub mod board_field;
pub mod card_field_value;

