//! # Storage Layer
//!
//! Persistence for the brewhouse, all plain files under `.brewhouse/`.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | State snapshot | JSON | `.brewhouse/state.json` |
//! | Order history | JSONL (one order per line) | `.brewhouse/orders.jsonl` |
//! | Config | TOML | `.brewhouse/config.toml` |
//!
//! The state file uses `fs2` locking and temp-file + rename writes, so a
//! crashed or failed commit always leaves the last-known-good snapshot in
//! place. Loading a missing state file is a hard error ([`StoreError`]),
//! never an implicit empty brewery.

mod brewery;
mod config;
mod orders;
mod store;

pub use brewery::{Brewery, BreweryError};
pub use config::BrewhouseConfig;
pub use orders::OrderBook;
pub use store::{StateStore, StoreError};
