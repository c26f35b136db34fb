//! Server-side API backend and business logic.
//!
//! This module contains the complete backend for selling chapters of serialized books:
//! pricing, access decisions, purchases against an external wallet, VIP grants, and
//! purchase history. The backend uses Axum as the web framework, SeaORM for the
//! purchase ledger, and Redis (or an in-process store) for VIP status and
//! purchased-chapter caching.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Pricing, access resolution and purchase orchestration
//! - **Data Layer** (`data/`) - Ledger and wallet operations, entity-to-domain conversion
//! - **Cache Layer** (`cache/`) - VIP status store and purchased-chapter cache
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Caller identity extraction and permission guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, cache stores, event bus)
//! - **Startup** (`startup`) - Tracing, database, and cache initialization
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Events** (`event`) - Purchase and VIP domain events
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** extracts the caller's `X-User-Id`
//! 3. **Controller** validates access, builds services, calls them with an operation context
//! 4. **Service** executes business logic, debits or refunds the wallet, records purchases
//! 5. **Data** queries database, converts entities to domain models
//! 6. **Controller** converts domain model to DTO, returns HTTP response

pub mod cache;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod event;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
