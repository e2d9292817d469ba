//! The `services` module provides the data-access API for the landing
//! workflow. Handlers and the landing service work with entities and
//! outcomes without knowing the queries behind them.
//!
//! All public functions from these sub-modules are re-exported here for
//! convenient access under the `crate::db::services::` path.

pub mod lead_service;
pub mod page_service;

pub use lead_service::*;
pub use page_service::*;
