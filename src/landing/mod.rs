//! The landing-page request workflow: resolve, record, ingest, notify, respond.

pub mod code;
pub mod form;
pub mod response;
pub mod service;

pub use service::LandingService;
