//! Batch lifecycle controller
//!
//! The single mutating entry point for the brewery. Every operation runs a
//! full load-modify-commit cycle against the state store, serialized behind
//! one lock so no two mutations interleave. Queries read a fresh snapshot
//! and never hold state across calls.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    bottle_counts, eligible_containers, forecast, plan, projected_bottle_counts, Batch,
    Container, EligibleContainer, Forecast, ForecastError, Plan, Recipe, Snapshot, Stage,
};
use crate::storage::{Brewery, BrewhouseConfig, OrderBook, StateStore, StoreError};

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Batch {0} is already bottled")]
    AlreadyBottled(u32),

    #[error("Moving batch {gyle} to {stage} requires choosing a vessel")]
    VesselRequired { gyle: u32, stage: Stage },

    #[error("Container '{name}' is not eligible for batch {gyle}")]
    NotEligible { gyle: u32, name: String },

    #[error("Moving batch {gyle} to {stage} does not take a vessel")]
    VesselNotAllowed { gyle: u32, stage: Stage },
}

#[derive(Debug, Error)]
pub enum BrewhouseError {
    #[error("Invalid batch volume: {0} litres (must be between 1 and {1})")]
    InvalidVolume(u32, u32),

    #[error("No batch with gyle number {0}")]
    BatchNotFound(u32),

    #[error("No container named '{0}'")]
    ContainerNotFound(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Failed to read order history: {0}")]
    Orders(anyhow::Error),
}

/// How long a batch has left in its current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTime {
    /// The stage deadline has passed
    Finished,
    /// Time left until the vessel's stage deadline, floored to minutes
    Remaining(Duration),
    /// Nominal estimate for the bottling line (no stored deadline)
    Nominal(Duration),
    /// The stage has no timing (hot brew, bottled)
    NotApplicable,
}

impl fmt::Display for StageTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageTime::Finished => f.write_str("finished"),
            StageTime::Remaining(d) => {
                let minutes = d.num_minutes();
                write!(
                    f,
                    "{} days {} hours {} minutes",
                    minutes / (24 * 60),
                    (minutes / 60) % 24,
                    minutes % 60
                )
            }
            StageTime::Nominal(d) => write!(f, "less than {} hours", d.num_hours()),
            StageTime::NotApplicable => f.write_str("-"),
        }
    }
}

/// One row of the production overview
#[derive(Debug, Clone, Serialize)]
pub struct BatchOverview {
    pub gyle: u32,
    pub recipe: Recipe,
    pub volume: u32,
    pub stage: Stage,
    /// Name of the vessel holding the batch, if any
    pub container: Option<String>,
    /// Formatted stage time remaining
    pub time_remaining: String,
}

/// Stage and equipment counts for the status command
#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub hot_brew: usize,
    pub fermenting: usize,
    pub conditioning: usize,
    pub bottling: usize,
    pub bottled_batches: usize,
    pub free_tanks: usize,
    pub total_tanks: usize,
}

/// Outcome of the planning recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlanOutcome {
    /// Brew this beer next
    Brew(Plan),
    /// Every fermenter is in use, so no new batch can start
    NoFreeFermenter,
}

/// The brewhouse: lifecycle controller over the state store
pub struct Brewhouse {
    store: StateStore,
    orders: OrderBook,
    config: BrewhouseConfig,
    // Serializes all load-modify-commit cycles (single-writer discipline)
    write_lock: Mutex<()>,
}

impl Brewhouse {
    pub fn new(store: StateStore, orders: OrderBook, config: BrewhouseConfig) -> Self {
        Self {
            store,
            orders,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the brewhouse for a brewery site
    pub fn for_brewery(brewery: &Brewery) -> Self {
        Self::new(
            brewery.state_store(),
            brewery.order_book(),
            brewery.config().clone(),
        )
    }

    /// Opens the brewhouse for the site at or above the current directory
    pub fn open_current() -> anyhow::Result<Self> {
        Ok(Self::for_brewery(&Brewery::open_current()?))
    }

    pub fn config(&self) -> &BrewhouseConfig {
        &self.config
    }

    // --- queries ------------------------------------------------------

    /// All containers, in name order
    pub fn list_containers(&self) -> Result<Vec<Container>, BrewhouseError> {
        Ok(self.store.load()?.containers.into_values().collect())
    }

    /// A single container by name
    pub fn get_container(&self, name: &str) -> Result<Container, BrewhouseError> {
        let name = name.to_lowercase();
        self.store
            .load()?
            .containers
            .remove(&name)
            .ok_or(BrewhouseError::ContainerNotFound(name))
    }

    /// All batches still in production, in gyle order
    pub fn list_active_batches(&self) -> Result<Vec<Batch>, BrewhouseError> {
        Ok(self
            .store
            .load()?
            .batches
            .into_values()
            .filter(|b| !b.is_bottled())
            .collect())
    }

    /// A single batch by gyle number
    pub fn get_batch(&self, gyle: u32) -> Result<Batch, BrewhouseError> {
        self.store
            .load()?
            .batches
            .remove(&gyle)
            .ok_or(BrewhouseError::BatchNotFound(gyle))
    }

    /// The containers a batch may move into for its next stage
    pub fn eligible_for(&self, gyle: u32) -> Result<Vec<EligibleContainer>, BrewhouseError> {
        let snapshot = self.store.load()?;
        let batch = snapshot
            .batches
            .get(&gyle)
            .ok_or(BrewhouseError::BatchNotFound(gyle))?;
        Ok(eligible_containers(&snapshot, batch))
    }

    /// Bottles of each beer currently in the inventory
    pub fn inventory_totals(&self) -> Result<BTreeMap<Recipe, u64>, BrewhouseError> {
        let snapshot = self.store.load()?;
        Ok(bottle_counts(&snapshot, self.config.bottle_millilitres))
    }

    /// Time remaining in a batch's current stage
    pub fn time_remaining(
        &self,
        snapshot: &Snapshot,
        batch: &Batch,
        now: DateTime<Utc>,
    ) -> StageTime {
        match batch.stage {
            Stage::Fermentation | Stage::Conditioning => {
                let Some(deadline) = snapshot
                    .vessel_of(batch.gyle)
                    .and_then(|c| c.occupant.deadline())
                else {
                    return StageTime::NotApplicable;
                };
                let minutes = (deadline - now).num_minutes();
                if minutes <= 0 {
                    StageTime::Finished
                } else {
                    StageTime::Remaining(Duration::minutes(minutes))
                }
            }
            Stage::Bottling => StageTime::Nominal(Duration::hours(i64::from(
                self.config.bottling_estimate_hours,
            ))),
            Stage::HotBrew | Stage::Bottled => StageTime::NotApplicable,
        }
    }

    /// Production overview: every active batch with its vessel and timing
    pub fn production_overview(&self) -> Result<Vec<BatchOverview>, BrewhouseError> {
        let snapshot = self.store.load()?;
        let now = Utc::now();

        Ok(snapshot
            .batches
            .values()
            .filter(|b| !b.is_bottled())
            .map(|batch| BatchOverview {
                gyle: batch.gyle,
                recipe: batch.recipe,
                volume: batch.volume,
                stage: batch.stage,
                container: snapshot.vessel_of(batch.gyle).map(|c| c.name.clone()),
                time_remaining: self.time_remaining(&snapshot, batch, now).to_string(),
            })
            .collect())
    }

    /// Stage and equipment counts
    pub fn status(&self) -> Result<StatusSummary, BrewhouseError> {
        let snapshot = self.store.load()?;

        let count = |stage: Stage| {
            snapshot
                .batches
                .values()
                .filter(|b| b.stage == stage)
                .count()
        };

        Ok(StatusSummary {
            hot_brew: count(Stage::HotBrew),
            fermenting: count(Stage::Fermentation),
            conditioning: count(Stage::Conditioning),
            bottling: count(Stage::Bottling),
            bottled_batches: count(Stage::Bottled),
            free_tanks: snapshot
                .containers
                .values()
                .filter(|c| !c.is_occupied())
                .count(),
            total_tanks: snapshot.containers.len(),
        })
    }

    /// Sales forecast for a month in the future
    pub fn forecast(&self, months: u32) -> Result<Forecast, BrewhouseError> {
        let orders = self.orders.read_all().map_err(BrewhouseError::Orders)?;
        Ok(forecast(&orders, months)?)
    }

    /// Recommends the next beer to brew, or reports that no fermenter is
    /// free to start one
    pub fn plan(&self) -> Result<PlanOutcome, BrewhouseError> {
        let snapshot = self.store.load()?;
        if !snapshot.has_free_fermenter() {
            return Ok(PlanOutcome::NoFreeFermenter);
        }

        let orders = self.orders.read_all().map_err(BrewhouseError::Orders)?;
        let projected = projected_bottle_counts(&snapshot, self.config.bottle_millilitres);
        Ok(PlanOutcome::Brew(plan(&orders, &projected)?))
    }

    // --- mutations ----------------------------------------------------

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new batch in the hot brew stage.
    ///
    /// The gyle number is one past the highest across both the order
    /// history and every batch in the store, so numbers stay unique even
    /// after deletions.
    pub fn create_batch(&self, recipe: Recipe, volume: u32) -> Result<Batch, BrewhouseError> {
        if volume == 0 || volume > self.config.max_batch_litres {
            return Err(BrewhouseError::InvalidVolume(
                volume,
                self.config.max_batch_litres,
            ));
        }

        let _guard = self.guard();
        let mut snapshot = self.store.load()?;

        let historical = self
            .orders
            .highest_gyle()
            .map_err(BrewhouseError::Orders)?;
        let gyle = historical.max(snapshot.highest_gyle()) + 1;

        let batch = Batch::new(gyle, recipe, volume);
        snapshot.batches.insert(gyle, batch.clone());
        self.store.commit(&snapshot)?;

        Ok(batch)
    }

    /// Moves a batch to its next stage.
    ///
    /// The fermentation and conditioning transitions require a chosen
    /// vessel from the batch's eligible set; the later transitions refuse
    /// one. Reusing the batch's own dual-purpose vessel updates its
    /// deadline in place, so the container is never observably free in
    /// between.
    pub fn advance(&self, gyle: u32, vessel: Option<&str>) -> Result<Batch, BrewhouseError> {
        let _guard = self.guard();
        let mut snapshot = self.store.load()?;

        let mut batch = snapshot
            .batches
            .get(&gyle)
            .cloned()
            .ok_or(BrewhouseError::BatchNotFound(gyle))?;
        let next = batch
            .stage
            .next()
            .ok_or(TransitionError::AlreadyBottled(gyle))?;

        match batch.stage {
            Stage::HotBrew | Stage::Fermentation => {
                let name = vessel
                    .ok_or(TransitionError::VesselRequired { gyle, stage: next })?
                    .to_lowercase();
                if !snapshot.containers.contains_key(&name) {
                    return Err(BrewhouseError::ContainerNotFound(name));
                }

                let choice = eligible_containers(&snapshot, &batch)
                    .into_iter()
                    .find(|c| c.name == name)
                    .ok_or_else(|| TransitionError::NotEligible {
                        gyle,
                        name: name.clone(),
                    })?;

                let days = if batch.stage == Stage::HotBrew {
                    self.config.fermentation_days
                } else {
                    self.config.conditioning_days
                };
                let deadline = Utc::now() + Duration::days(i64::from(days));

                if !choice.stay_put {
                    if let Some(held) = snapshot.vessel_of_mut(gyle) {
                        held.release();
                    }
                }
                let target = snapshot
                    .containers
                    .get_mut(&name)
                    .ok_or(BrewhouseError::ContainerNotFound(name))?;
                target.occupy(gyle, deadline);
            }
            Stage::Conditioning | Stage::Bottling => {
                if vessel.is_some() {
                    return Err(TransitionError::VesselNotAllowed { gyle, stage: next }.into());
                }
                if let Some(held) = snapshot.vessel_of_mut(gyle) {
                    held.release();
                }
            }
            Stage::Bottled => unreachable!("next() returned Some for a terminal stage"),
        }

        batch.stage = next;
        snapshot.batches.insert(gyle, batch.clone());
        self.store.commit(&snapshot)?;

        Ok(batch)
    }

    /// Removes a batch, unconditionally freeing any vessel it holds
    pub fn delete_batch(&self, gyle: u32) -> Result<(), BrewhouseError> {
        let _guard = self.guard();
        let mut snapshot = self.store.load()?;

        if snapshot.batches.remove(&gyle).is_none() {
            return Err(BrewhouseError::BatchNotFound(gyle));
        }
        if let Some(held) = snapshot.vessel_of_mut(gyle) {
            held.release();
        }

        self.store.commit(&snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn brewhouse() -> (TempDir, Brewhouse) {
        let dir = TempDir::new().unwrap();
        let brewery = Brewery::init(dir.path()).unwrap();
        let brewhouse = Brewhouse::for_brewery(&brewery);
        (dir, brewhouse)
    }

    fn write_orders(dir: &TempDir, lines: &[&str]) {
        fs::write(
            dir.path().join(".brewhouse").join("orders.jsonl"),
            lines.join("\n"),
        )
        .unwrap();
    }

    #[test]
    fn create_batch_validates_volume() {
        let (_dir, bh) = brewhouse();

        assert!(matches!(
            bh.create_batch(Recipe::Pilsner, 0),
            Err(BrewhouseError::InvalidVolume(0, 1000))
        ));
        assert!(matches!(
            bh.create_batch(Recipe::Pilsner, 1001),
            Err(BrewhouseError::InvalidVolume(1001, 1000))
        ));

        assert!(bh.create_batch(Recipe::Pilsner, 1).is_ok());
        assert!(bh.create_batch(Recipe::Pilsner, 1000).is_ok());
    }

    #[test]
    fn gyle_numbers_increase_and_respect_history() {
        let (dir, bh) = brewhouse();
        write_orders(
            &dir,
            &[r#"{"gyle": 117, "recipe": "Organic Pilsner", "quantity": 100, "date_required": "2025-03-10"}"#],
        );

        let first = bh.create_batch(Recipe::Pilsner, 100).unwrap();
        assert_eq!(first.gyle, 118);

        let second = bh.create_batch(Recipe::Dunkel, 200).unwrap();
        assert_eq!(second.gyle, 119);

        // Deleting the newest batch does not free its number for reuse as
        // long as history still pins a higher one... here the snapshot's
        // highest drops back, but history keeps the floor.
        bh.delete_batch(119).unwrap();
        bh.delete_batch(118).unwrap();
        let third = bh.create_batch(Recipe::RedHelles, 300).unwrap();
        assert_eq!(third.gyle, 118);
    }

    #[test]
    fn full_lifecycle_end_to_end() {
        let (_dir, bh) = brewhouse();
        let batch = bh.create_batch(Recipe::RedHelles, 500).unwrap();
        let gyle = batch.gyle;
        assert_eq!(batch.stage, Stage::HotBrew);

        // Into a dual-purpose fermenter.
        let eligible = bh.eligible_for(gyle).unwrap();
        assert!(eligible.iter().any(|c| c.name == "camilla"));
        let batch = bh.advance(gyle, Some("camilla")).unwrap();
        assert_eq!(batch.stage, Stage::Fermentation);

        let camilla = bh.get_container("camilla").unwrap();
        assert!(camilla.occupied_by(gyle));
        let deadline = camilla.occupant.deadline().unwrap();
        let days = (deadline - Utc::now()).num_days();
        assert!((27..=28).contains(&days));

        // Same vessel carries the batch into conditioning.
        let eligible = bh.eligible_for(gyle).unwrap();
        let stay = eligible.iter().find(|c| c.name == "camilla").unwrap();
        assert!(stay.stay_put);
        let batch = bh.advance(gyle, Some("camilla")).unwrap();
        assert_eq!(batch.stage, Stage::Conditioning);
        assert!(bh.get_container("camilla").unwrap().occupied_by(gyle));

        // Bottling takes no vessel and frees the tank.
        let batch = bh.advance(gyle, None).unwrap();
        assert_eq!(batch.stage, Stage::Bottling);
        assert!(!bh.get_container("camilla").unwrap().is_occupied());

        // Bottled: the batch leaves the active set and joins the inventory.
        let batch = bh.advance(gyle, None).unwrap();
        assert_eq!(batch.stage, Stage::Bottled);
        assert!(bh.list_active_batches().unwrap().is_empty());

        let totals = bh.inventory_totals().unwrap();
        assert_eq!(totals[&Recipe::RedHelles], 1000);
        assert_eq!(totals[&Recipe::Pilsner], 0);
    }

    #[test]
    fn advance_requires_a_vessel_for_fermentation() {
        let (_dir, bh) = brewhouse();
        let batch = bh.create_batch(Recipe::Pilsner, 500).unwrap();

        assert!(matches!(
            bh.advance(batch.gyle, None),
            Err(BrewhouseError::Transition(
                TransitionError::VesselRequired { .. }
            ))
        ));
    }

    #[test]
    fn advance_rejects_ineligible_vessel() {
        let (_dir, bh) = brewhouse();
        let batch = bh.create_batch(Recipe::Pilsner, 500).unwrap();

        // Gertrude is a conditioner, no good for fermentation.
        assert!(matches!(
            bh.advance(batch.gyle, Some("gertrude")),
            Err(BrewhouseError::Transition(TransitionError::NotEligible { .. }))
        ));
        // Unknown tank names are reported as such.
        assert!(matches!(
            bh.advance(batch.gyle, Some("nonsuch")),
            Err(BrewhouseError::ContainerNotFound(_))
        ));
    }

    #[test]
    fn advance_rejects_vessel_for_bottling() {
        let (_dir, bh) = brewhouse();
        let batch = bh.create_batch(Recipe::Pilsner, 500).unwrap();
        let gyle = batch.gyle;
        bh.advance(gyle, Some("camilla")).unwrap();
        bh.advance(gyle, Some("camilla")).unwrap();

        assert!(matches!(
            bh.advance(gyle, Some("albert")),
            Err(BrewhouseError::Transition(
                TransitionError::VesselNotAllowed { .. }
            ))
        ));
    }

    #[test]
    fn bottled_batches_cannot_advance() {
        let (_dir, bh) = brewhouse();
        let gyle = bh.create_batch(Recipe::Pilsner, 500).unwrap().gyle;
        bh.advance(gyle, Some("camilla")).unwrap();
        bh.advance(gyle, Some("camilla")).unwrap();
        bh.advance(gyle, None).unwrap();
        bh.advance(gyle, None).unwrap();

        assert!(matches!(
            bh.advance(gyle, None),
            Err(BrewhouseError::Transition(TransitionError::AlreadyBottled(
                _
            )))
        ));
    }

    #[test]
    fn moving_to_a_different_conditioner_releases_the_fermenter() {
        let (_dir, bh) = brewhouse();
        let gyle = bh.create_batch(Recipe::Dunkel, 500).unwrap().gyle;
        bh.advance(gyle, Some("albert")).unwrap();
        assert!(bh.get_container("albert").unwrap().occupied_by(gyle));

        bh.advance(gyle, Some("gertrude")).unwrap();
        assert!(!bh.get_container("albert").unwrap().is_occupied());
        assert!(bh.get_container("gertrude").unwrap().occupied_by(gyle));
    }

    #[test]
    fn two_batches_never_share_a_tank() {
        let (_dir, bh) = brewhouse();
        let first = bh.create_batch(Recipe::Pilsner, 500).unwrap().gyle;
        let second = bh.create_batch(Recipe::Dunkel, 500).unwrap().gyle;

        bh.advance(first, Some("albert")).unwrap();

        let eligible = bh.eligible_for(second).unwrap();
        assert!(!eligible.iter().any(|c| c.name == "albert"));
        assert!(matches!(
            bh.advance(second, Some("albert")),
            Err(BrewhouseError::Transition(TransitionError::NotEligible { .. }))
        ));
    }

    #[test]
    fn delete_frees_the_vessel() {
        let (_dir, bh) = brewhouse();
        let gyle = bh.create_batch(Recipe::Pilsner, 500).unwrap().gyle;
        bh.advance(gyle, Some("albert")).unwrap();

        bh.delete_batch(gyle).unwrap();
        assert!(!bh.get_container("albert").unwrap().is_occupied());
        assert!(matches!(
            bh.get_batch(gyle),
            Err(BrewhouseError::BatchNotFound(_))
        ));
    }

    #[test]
    fn delete_unknown_gyle_is_not_found_and_changes_nothing() {
        let (_dir, bh) = brewhouse();
        let gyle = bh.create_batch(Recipe::Pilsner, 500).unwrap().gyle;

        assert!(matches!(
            bh.delete_batch(9999),
            Err(BrewhouseError::BatchNotFound(9999))
        ));
        assert!(bh.get_batch(gyle).is_ok());
    }

    #[test]
    fn overview_reports_vessels_and_timing() {
        let (_dir, bh) = brewhouse();
        let gyle = bh.create_batch(Recipe::Pilsner, 500).unwrap().gyle;
        bh.advance(gyle, Some("camilla")).unwrap();

        let overview = bh.production_overview().unwrap();
        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].container.as_deref(), Some("camilla"));
        assert!(overview[0].time_remaining.contains("days"));
    }

    #[test]
    fn expired_deadline_reports_finished() {
        let (_dir, bh) = brewhouse();
        let gyle = bh.create_batch(Recipe::Pilsner, 500).unwrap().gyle;
        bh.advance(gyle, Some("camilla")).unwrap();

        let snapshot = bh.store.load().unwrap();
        let batch = snapshot.batches[&gyle].clone();
        let future = Utc::now() + Duration::days(60);
        assert_eq!(bh.time_remaining(&snapshot, &batch, future), StageTime::Finished);
    }

    #[test]
    fn bottling_uses_the_configured_nominal_estimate() {
        let (dir, _) = brewhouse();
        fs::write(
            dir.path().join(".brewhouse").join("config.toml"),
            "bottling_estimate_hours = 8\n",
        )
        .unwrap();
        let bh = Brewhouse::for_brewery(&Brewery::open(dir.path()).unwrap());

        let gyle = bh.create_batch(Recipe::Pilsner, 500).unwrap().gyle;
        bh.advance(gyle, Some("camilla")).unwrap();
        bh.advance(gyle, Some("camilla")).unwrap();
        bh.advance(gyle, None).unwrap();

        let snapshot = bh.store.load().unwrap();
        let batch = snapshot.batches[&gyle].clone();
        let time = bh.time_remaining(&snapshot, &batch, Utc::now());
        assert_eq!(time, StageTime::Nominal(Duration::hours(8)));
        assert_eq!(time.to_string(), "less than 8 hours");
    }

    #[test]
    fn plan_reports_no_capacity_when_fermenters_are_full() {
        let (dir, bh) = brewhouse();

        // Occupy every fermenting-capable tank.
        for tank in ["albert", "brigadier", "camilla", "dylon", "emily", "florence", "r2d2"] {
            let gyle = bh.create_batch(Recipe::Pilsner, 100).unwrap().gyle;
            bh.advance(gyle, Some(tank)).unwrap();
        }

        write_orders(
            &dir,
            &[
                r#"{"gyle": 1, "recipe": "Organic Pilsner", "quantity": 100, "date_required": "2025-01-10"}"#,
                r#"{"gyle": 2, "recipe": "Organic Pilsner", "quantity": 100, "date_required": "2025-02-10"}"#,
                r#"{"gyle": 3, "recipe": "Organic Red Helles", "quantity": 100, "date_required": "2025-01-12"}"#,
                r#"{"gyle": 4, "recipe": "Organic Red Helles", "quantity": 100, "date_required": "2025-02-12"}"#,
                r#"{"gyle": 5, "recipe": "Organic Dunkel", "quantity": 100, "date_required": "2025-01-14"}"#,
                r#"{"gyle": 6, "recipe": "Organic Dunkel", "quantity": 100, "date_required": "2025-02-14"}"#,
            ],
        );

        assert_eq!(bh.plan().unwrap(), PlanOutcome::NoFreeFermenter);
    }

    #[test]
    fn status_counts_stages_and_tanks() {
        let (_dir, bh) = brewhouse();
        let first = bh.create_batch(Recipe::Pilsner, 500).unwrap().gyle;
        bh.create_batch(Recipe::Dunkel, 300).unwrap();
        bh.advance(first, Some("albert")).unwrap();

        let status = bh.status().unwrap();
        assert_eq!(status.hot_brew, 1);
        assert_eq!(status.fermenting, 1);
        assert_eq!(status.free_tanks, 8);
        assert_eq!(status.total_tanks, 9);
    }
}
