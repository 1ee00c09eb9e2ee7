//! Whole-state snapshot
//!
//! The snapshot is the single source of truth: every container and every
//! batch (in production or bottled), loaded and committed as one structurally
//! complete document. The persisted form keeps the legacy flat fields,
//! including the `-1`/`10` occupancy markers, and loading cross-checks them
//! against the enum model so an inconsistent file is rejected rather than
//! half-interpreted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::batch::{Batch, Stage, BOTTLING_TAG, UNASSIGNED_TAG};
use super::container::{Container, Occupancy};
use super::recipe::Recipe;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("container '{0}' has inconsistent occupancy fields")]
    InconsistentContainer(String),

    #[error("batch {0} has an occupancy tag that does not match its stage")]
    InconsistentBatch(u32),

    #[error("batch record keyed '{key}' carries gyle number {gyle}")]
    MismatchedKey { key: String, gyle: u32 },

    #[error("container '{0}' is held by unknown batch {1}")]
    UnknownOccupant(String, u32),

    #[error("container '{0}' is held by batch {1}, which is in the {2} stage")]
    OccupantNotInVessel(String, u32, Stage),

    #[error("batch {0} is held by both '{1}' and '{2}'")]
    DoubleBooked(u32, String, String),

    #[error("batch {0} is in the {1} stage but no container holds it")]
    MissingVessel(u32, Stage),
}

/// Current state of every container and batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub containers: BTreeMap<String, Container>,
    pub batches: BTreeMap<u32, Batch>,
}

impl Snapshot {
    /// Returns the container currently holding the given batch, if any
    pub fn vessel_of(&self, gyle: u32) -> Option<&Container> {
        self.containers.values().find(|c| c.occupied_by(gyle))
    }

    /// Mutable variant of [`vessel_of`](Self::vessel_of)
    pub fn vessel_of_mut(&mut self, gyle: u32) -> Option<&mut Container> {
        self.containers.values_mut().find(|c| c.occupied_by(gyle))
    }

    /// Highest gyle number among all batches, bottled included (0 if none)
    pub fn highest_gyle(&self) -> u32 {
        self.batches.keys().next_back().copied().unwrap_or(0)
    }

    /// Returns true if any fermenting-capable container is free
    pub fn has_free_fermenter(&self) -> bool {
        self.containers
            .values()
            .any(|c| c.can_ferment && !c.is_occupied())
    }

    /// Checks the occupancy invariants across the whole snapshot.
    ///
    /// Every occupied container must name a known batch in a vessel stage, no
    /// batch may hold two containers, and every vessel-stage batch must be
    /// held by exactly one container.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut held_by: BTreeMap<u32, &str> = BTreeMap::new();

        for (name, container) in &self.containers {
            let Some(gyle) = container.occupant.gyle() else {
                continue;
            };
            match self.batches.get(&gyle) {
                None => return Err(SnapshotError::UnknownOccupant(name.clone(), gyle)),
                Some(batch) if !batch.stage.holds_vessel() => {
                    return Err(SnapshotError::OccupantNotInVessel(
                        name.clone(),
                        gyle,
                        batch.stage,
                    ));
                }
                Some(_) => {}
            }
            if let Some(first) = held_by.insert(gyle, name) {
                return Err(SnapshotError::DoubleBooked(
                    gyle,
                    first.to_string(),
                    name.clone(),
                ));
            }
        }

        for batch in self.batches.values() {
            if batch.stage.holds_vessel() && !held_by.contains_key(&batch.gyle) {
                return Err(SnapshotError::MissingVessel(batch.gyle, batch.stage));
            }
        }

        Ok(())
    }
}

// Persisted record forms. Field names and sentinel values match the legacy
// file layout so existing state files round-trip losslessly.

#[derive(Serialize, Deserialize)]
struct ContainerRecord {
    capacity: u32,
    fermenter: bool,
    conditioner: bool,
    occupied: bool,
    id: i64,
    #[serde(default)]
    finish: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize)]
struct BatchRecord {
    id: i64,
    gyle: u32,
    state: Stage,
    volume: u32,
    recipe: Recipe,
}

#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    containers: BTreeMap<String, ContainerRecord>,
    batches: BTreeMap<String, BatchRecord>,
}

fn container_to_record(container: &Container) -> ContainerRecord {
    ContainerRecord {
        capacity: container.capacity,
        fermenter: container.can_ferment,
        conditioner: container.can_condition,
        occupied: container.is_occupied(),
        id: container
            .occupant
            .gyle()
            .map_or(UNASSIGNED_TAG, i64::from),
        finish: container.occupant.deadline(),
    }
}

fn container_from_record(name: &str, record: ContainerRecord) -> Result<Container, SnapshotError> {
    let occupant = match (record.occupied, record.id, record.finish) {
        (false, UNASSIGNED_TAG, None) => Occupancy::Empty,
        (true, id, Some(deadline)) if id >= 0 => Occupancy::Occupied {
            gyle: id as u32,
            deadline,
        },
        _ => return Err(SnapshotError::InconsistentContainer(name.to_string())),
    };

    Ok(Container {
        name: name.to_string(),
        capacity: record.capacity,
        can_ferment: record.fermenter,
        can_condition: record.conditioner,
        occupant,
    })
}

fn batch_to_record(batch: &Batch) -> BatchRecord {
    BatchRecord {
        id: batch.occupancy_tag(),
        gyle: batch.gyle,
        state: batch.stage,
        volume: batch.volume,
        recipe: batch.recipe,
    }
}

fn batch_from_record(key: &str, record: BatchRecord) -> Result<Batch, SnapshotError> {
    if key.parse::<u32>() != Ok(record.gyle) {
        return Err(SnapshotError::MismatchedKey {
            key: key.to_string(),
            gyle: record.gyle,
        });
    }

    let batch = Batch {
        gyle: record.gyle,
        recipe: record.recipe,
        volume: record.volume,
        stage: record.state,
    };

    let expected = batch.occupancy_tag();
    // Legacy files wrote 0 for batches still in hot brew; accept it.
    let legacy_hot_brew = record.state == Stage::HotBrew && record.id == 0;
    if record.id != expected && !legacy_hot_brew {
        return Err(SnapshotError::InconsistentBatch(record.gyle));
    }

    Ok(batch)
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let file = SnapshotFile {
            containers: self
                .containers
                .iter()
                .map(|(name, c)| (name.clone(), container_to_record(c)))
                .collect(),
            batches: self
                .batches
                .iter()
                .map(|(gyle, b)| (gyle.to_string(), batch_to_record(b)))
                .collect(),
        };
        file.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let file = SnapshotFile::deserialize(deserializer)?;

        let mut containers = BTreeMap::new();
        for (name, record) in file.containers {
            let container =
                container_from_record(&name, record).map_err(serde::de::Error::custom)?;
            containers.insert(name, container);
        }

        let mut batches = BTreeMap::new();
        for (key, record) in file.batches {
            let batch = batch_from_record(&key, record).map_err(serde::de::Error::custom)?;
            batches.insert(batch.gyle, batch);
        }

        Ok(Snapshot {
            containers,
            batches,
        })
    }
}
