//! Domain models for the brewhouse
//!
//! Contains the core business logic without any I/O concerns.

mod allocator;
mod batch;
mod container;
mod forecast;
mod inventory;
mod recipe;
mod snapshot;

pub use allocator::{eligible_containers, EligibleContainer};
pub use batch::{Batch, Stage};
pub use container::{Container, Occupancy};
pub use forecast::{forecast, plan, Forecast, ForecastError, Order, Plan, RecipeForecast};
pub use inventory::{bottle_counts, projected_bottle_counts};
pub use recipe::{Recipe, RecipeError};
pub use snapshot::{Snapshot, SnapshotError};
