//! Brewhouse - Batch tracking and planning for a small brewery
//!
//! Brewhouse follows each batch of beer from the hot brew through
//! fermentation, conditioning, and bottling into the inventory, tracks
//! which tank holds it at every step, and recommends what to brew next
//! from historical sales.

pub mod brewhouse;
pub mod cli;
pub mod domain;
pub mod storage;

pub use brewhouse::{Brewhouse, BrewhouseError};
pub use domain::{Batch, Container, Occupancy, Recipe, Snapshot, Stage};
