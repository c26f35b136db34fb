//! Data transfer objects shared by the HTTP API.
//!
//! Every type here is serialized to or deserialized from JSON and documented in the
//! OpenAPI schema. Monetary amounts are integer cents; a formatted `*_display`
//! companion field is provided where clients render prices directly.

pub mod api;
pub mod book;
pub mod chapter;
pub mod purchase;
pub mod vip;
pub mod wallet;
