//! Container eligibility rules
//!
//! Given a batch, computes the set of containers it could move into for its
//! next stage. Capability is matched against what the next stage actually
//! requires (a hot brew needs a fermenter, a fermenting batch needs a
//! conditioner), the container must be large enough, and an occupied
//! container is only ever offered back to its own occupant as the stay-put
//! option across the fermentation-to-conditioning hand-off.

use super::batch::{Batch, Stage};
use super::snapshot::Snapshot;

/// A container a batch may move into, with its capability flags exposed
/// directly for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EligibleContainer {
    pub name: String,
    pub capacity: u32,
    pub can_ferment: bool,
    pub can_condition: bool,
    /// True when this is the vessel the batch already occupies
    pub stay_put: bool,
}

/// Capability required of a vessel for a batch's next stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StageNeeds {
    ferment: bool,
    condition: bool,
}

impl StageNeeds {
    /// What the next transition out of `stage` requires, if it needs a vessel
    fn for_next_stage(stage: Stage) -> Option<StageNeeds> {
        match stage {
            Stage::HotBrew => Some(StageNeeds {
                ferment: true,
                condition: false,
            }),
            Stage::Fermentation => Some(StageNeeds {
                ferment: false,
                condition: true,
            }),
            Stage::Conditioning | Stage::Bottling | Stage::Bottled => None,
        }
    }
}

/// Computes the containers eligible to receive `batch` at its next stage.
///
/// Fails closed: a zero-volume batch, or one whose next stage takes no
/// vessel, gets an empty set.
pub fn eligible_containers(snapshot: &Snapshot, batch: &Batch) -> Vec<EligibleContainer> {
    let Some(needs) = StageNeeds::for_next_stage(batch.stage) else {
        return Vec::new();
    };
    if batch.volume == 0 {
        return Vec::new();
    }

    snapshot
        .containers
        .values()
        .filter_map(|container| {
            let capable = (needs.ferment && container.can_ferment)
                || (needs.condition && container.can_condition);
            if !capable || container.capacity < batch.volume {
                return None;
            }

            let stay_put = if container.is_occupied() {
                // Only the batch's own dual-purpose fermenter may carry it
                // straight into conditioning.
                let reusable = container.occupied_by(batch.gyle)
                    && container.can_condition
                    && batch.stage == Stage::Fermentation;
                if !reusable {
                    return None;
                }
                true
            } else {
                false
            };

            Some(EligibleContainer {
                name: container.name.clone(),
                capacity: container.capacity,
                can_ferment: container.can_ferment,
                can_condition: container.can_condition,
                stay_put,
            })
        })
        .collect()
}
