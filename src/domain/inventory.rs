//! Bottled-stock aggregation

use std::collections::BTreeMap;

use super::recipe::Recipe;
use super::snapshot::Snapshot;

/// Counts bottles of each beer across all bottled batches.
///
/// Every recipe appears in the result, so a beer with no bottled stock
/// reports 0 instead of being silently absent.
pub fn bottle_counts(snapshot: &Snapshot, bottle_millilitres: u32) -> BTreeMap<Recipe, u64> {
    let mut counts: BTreeMap<Recipe, u64> =
        Recipe::ALL.into_iter().map(|r| (r, 0)).collect();

    for batch in snapshot.batches.values().filter(|b| b.is_bottled()) {
        let bottles = bottles_from_litres(batch.volume, bottle_millilitres);
        *counts.entry(batch.recipe).or_default() += bottles;
    }

    counts
}

/// Counts projected bottles of each beer, including batches still in
/// production. Used by planning to see total committed stock.
pub fn projected_bottle_counts(
    snapshot: &Snapshot,
    bottle_millilitres: u32,
) -> BTreeMap<Recipe, u64> {
    let mut counts: BTreeMap<Recipe, u64> =
        Recipe::ALL.into_iter().map(|r| (r, 0)).collect();

    for batch in snapshot.batches.values() {
        *counts.entry(batch.recipe).or_default() +=
            bottles_from_litres(batch.volume, bottle_millilitres);
    }

    counts
}

fn bottles_from_litres(litres: u32, bottle_millilitres: u32) -> u64 {
    if bottle_millilitres == 0 {
        return 0;
    }
    u64::from(litres) * 1000 / u64::from(bottle_millilitres)
}
