//! Batch model and the production stage state machine
//!
//! A batch moves through the stages in strict forward order, with no skipping
//! and no way back. `Bottled` is terminal: a bottled batch is an inventory
//! record, never again tied to a container.

use serde::{Deserialize, Serialize};

use super::recipe::Recipe;

/// Occupancy tag written for batches on the bottling line (legacy marker)
pub(crate) const BOTTLING_TAG: i64 = 10;

/// Occupancy tag written for batches not tied to a container (legacy marker)
pub(crate) const UNASSIGNED_TAG: i64 = -1;

/// Production stage of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "hot brew")]
    HotBrew,
    #[serde(rename = "fermentation")]
    Fermentation,
    #[serde(rename = "conditioning")]
    Conditioning,
    #[serde(rename = "bottling")]
    Bottling,
    #[serde(rename = "bottled")]
    Bottled,
}

impl Stage {
    /// Returns the next stage in the sequence, or None from `Bottled`
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::HotBrew => Some(Stage::Fermentation),
            Stage::Fermentation => Some(Stage::Conditioning),
            Stage::Conditioning => Some(Stage::Bottling),
            Stage::Bottling => Some(Stage::Bottled),
            Stage::Bottled => None,
        }
    }

    /// Returns true if a batch in this stage holds a vessel
    pub fn holds_vessel(&self) -> bool {
        matches!(self, Stage::Fermentation | Stage::Conditioning)
    }

    /// Returns true if this is the terminal stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Bottled)
    }

    /// Returns a display label matching the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            Stage::HotBrew => "hot brew",
            Stage::Fermentation => "fermentation",
            Stage::Conditioning => "conditioning",
            Stage::Bottling => "bottling",
            Stage::Bottled => "bottled",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One production run of beer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Unique gyle number
    pub gyle: u32,

    /// Which beer is being brewed
    pub recipe: Recipe,

    /// Batch volume in litres
    pub volume: u32,

    /// Current production stage
    pub stage: Stage,
}

impl Batch {
    /// Creates a new batch at the start of production
    pub fn new(gyle: u32, recipe: Recipe, volume: u32) -> Self {
        Self {
            gyle,
            recipe,
            volume,
            stage: Stage::HotBrew,
        }
    }

    /// Returns true if this batch is a bottled inventory record
    pub fn is_bottled(&self) -> bool {
        self.stage.is_terminal()
    }

    /// The occupancy tag persisted alongside the batch.
    ///
    /// Vessel stages carry the gyle number; the bottling line and the
    /// unassigned states keep the legacy `10`/`-1` markers.
    pub(crate) fn occupancy_tag(&self) -> i64 {
        match self.stage {
            Stage::Fermentation | Stage::Conditioning => i64::from(self.gyle),
            Stage::Bottling => BOTTLING_TAG,
            Stage::HotBrew | Stage::Bottled => UNASSIGNED_TAG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_strict_order() {
        let mut stage = Stage::HotBrew;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            stage = next;
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                Stage::HotBrew,
                Stage::Fermentation,
                Stage::Conditioning,
                Stage::Bottling,
                Stage::Bottled,
            ]
        );
    }

    #[test]
    fn bottled_is_terminal() {
        assert!(Stage::Bottled.is_terminal());
        assert_eq!(Stage::Bottled.next(), None);
    }

    #[test]
    fn vessel_stages() {
        assert!(!Stage::HotBrew.holds_vessel());
        assert!(Stage::Fermentation.holds_vessel());
        assert!(Stage::Conditioning.holds_vessel());
        assert!(!Stage::Bottling.holds_vessel());
        assert!(!Stage::Bottled.holds_vessel());
    }

    #[test]
    fn stage_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Stage::HotBrew).unwrap();
        assert_eq!(json, "\"hot brew\"");

        let parsed: Stage = serde_json::from_str("\"conditioning\"").unwrap();
        assert_eq!(parsed, Stage::Conditioning);
    }

    #[test]
    fn occupancy_tags_follow_the_stage() {
        let mut batch = Batch::new(126, Recipe::Pilsner, 500);
        assert_eq!(batch.occupancy_tag(), UNASSIGNED_TAG);

        batch.stage = Stage::Fermentation;
        assert_eq!(batch.occupancy_tag(), 126);

        batch.stage = Stage::Bottling;
        assert_eq!(batch.occupancy_tag(), BOTTLING_TAG);

        batch.stage = Stage::Bottled;
        assert_eq!(batch.occupancy_tag(), UNASSIGNED_TAG);
    }
}
