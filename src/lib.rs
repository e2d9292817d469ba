pub mod db;
pub mod landing;
pub mod notifications;
pub mod server;
pub mod version;
pub mod web;
