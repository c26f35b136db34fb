//! Domain models and operation-specific parameter types.
//!
//! Repositories convert SeaORM entity models into these types at the data layer
//! boundary, validating stored invariants on the way. Services operate exclusively on
//! domain models, and controllers convert them to DTOs for API responses.

pub mod access;
pub mod catalog;
pub mod chapter;
pub mod context;
pub mod money;
pub mod purchase;
pub mod rating;
pub mod user;
pub mod vip;
