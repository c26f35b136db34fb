//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for the catalog, ledger and wallet
//! - VIP status store and purchased-chapter cache (Redis or in-process)
//! - Event bus for purchase and VIP events
//! - Purchase settings and the admin allow-list
//! - Server shutdown token from which per-request operation contexts derive

use std::{collections::HashSet, sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::server::{
    cache::{PurchasedChapterCache, VipStatusStore},
    event::EventBus,
    model::context::OperationContext,
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the connection is a pool handle, stores are
/// behind `Arc`, and the event bus and token are reference-counted handles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// VIP membership store.
    pub vip_store: Arc<dyn VipStatusStore>,

    /// Fast-path cache of purchased chapter IDs in front of the ledger.
    pub purchase_cache: Arc<dyn PurchasedChapterCache>,

    /// Purchase and VIP event bus.
    pub events: EventBus,

    /// Discount applied to whole-book bundles, 0-100.
    pub bundle_discount_percent: i32,

    /// Deadline given to each request's core operation.
    pub purchase_timeout: Duration,

    /// User IDs allowed to grant and revoke VIP access.
    pub admin_user_ids: Arc<HashSet<i64>>,

    /// Cancelled on server shutdown; in-flight operations observe it at checkpoints.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        vip_store: Arc<dyn VipStatusStore>,
        purchase_cache: Arc<dyn PurchasedChapterCache>,
        events: EventBus,
        bundle_discount_percent: i32,
        purchase_timeout: Duration,
        admin_user_ids: HashSet<i64>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            db,
            vip_store,
            purchase_cache,
            events,
            bundle_discount_percent,
            purchase_timeout,
            admin_user_ids: Arc::new(admin_user_ids),
            shutdown,
        }
    }

    /// Context for one request: cancelled on shutdown or after the purchase timeout.
    pub fn operation_context(&self) -> OperationContext {
        OperationContext::with_timeout(self.shutdown.child_token(), self.purchase_timeout)
    }
}
