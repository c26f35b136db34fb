//! HTTP request handlers.
//!
//! Controllers extract caller identity and parameters, build the per-request services
//! from `AppState`, and convert domain results into DTOs. Each module exposes an
//! OpenAPI tag and `#[utoipa::path]`-annotated handlers.

pub mod book;
pub mod chapter;
pub mod purchase;
pub mod vip;
pub mod wallet;

use serde::Deserialize;

use crate::server::{data::wallet::WalletRepository, service::purchase::PurchaseService, state::AppState};

/// Largest page size a client may request.
pub const MAX_ENTRIES: u64 = 100;

#[derive(Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

impl PaginationParams {
    /// Requested page size clamped to `1..=MAX_ENTRIES`.
    pub fn per_page(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES)
    }
}

/// Builds the purchase orchestrator for one request.
fn purchase_service<'a>(state: &'a AppState, wallet: &'a WalletRepository<'a>) -> PurchaseService<'a> {
    PurchaseService::new(
        &state.db,
        wallet,
        state.vip_store.as_ref(),
        state.purchase_cache.as_ref(),
        &state.events,
        state.bundle_discount_percent,
    )
}

#[cfg(test)]
mod test;
