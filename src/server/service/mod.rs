//! Business logic services.
//!
//! Services sit between controllers and the data layer. Pricing and the access
//! decision are pure; the purchase orchestrator sequences wallet, ledger, cache and
//! event bus, and is the only place that compensates a debit.

pub mod access;
pub mod catalog;
pub mod pricing;
pub mod purchase;
pub mod vip;

#[cfg(test)]
mod test;
