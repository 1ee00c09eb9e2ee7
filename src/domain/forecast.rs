//! Sales forecasting and production planning
//!
//! Pure analytics over historical order records: average month-on-month
//! growth per beer, a sales prediction for a future month, the ratio of
//! sales between beers, and a recommendation for which beer to brew next
//! based on projected stock run-out.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::recipe::Recipe;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("not enough order history for {0} (need at least two months of sales)")]
    NotEnoughHistory(Recipe),

    #[error("no projected stock shortfall within {0} months")]
    NoShortfall(u32),
}

/// One historical order record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Gyle number of the batch the order was fulfilled from
    pub gyle: u32,
    pub recipe: Recipe,
    /// Bottles ordered
    pub quantity: u32,
    pub date_required: NaiveDate,
}

/// Forecast figures for one beer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeForecast {
    /// Average monthly sale in bottles
    pub average: u64,
    /// Predicted sale for the requested month
    pub prediction: u64,
    /// Average month-on-month growth rate
    pub growth: f64,
}

/// Full forecast across the catalogue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// Months ahead the prediction is for
    pub months: u32,
    pub per_recipe: BTreeMap<Recipe, RecipeForecast>,
    /// Ratio of past sales between beers, in catalogue order, smallest
    /// non-zero seller normalized to 1.0
    pub ratio: Vec<f64>,
}

/// Recommendation for the next brew
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    /// The beer projected to run out first
    pub recipe: Recipe,
    /// Months the current stock lasts before the shortfall
    pub months_of_stock: u32,
    /// Projected bottles of that beer in the shortfall month (negative)
    pub projected_bottles: i64,
    /// Expected sale of that beer in the shortfall month
    pub expected_sale: u64,
}

/// Safety cap on the planning walk, in months
const PLAN_HORIZON: u32 = 120;

/// Buckets sales per calendar month (year + month of the required date)
fn monthly_sales(orders: &[Order], recipe: Recipe) -> Vec<u64> {
    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.recipe == recipe) {
        let key = (order.date_required.year(), order.date_required.month());
        *buckets.entry(key).or_default() += u64::from(order.quantity);
    }
    buckets.into_values().collect()
}

/// Average month-on-month growth over a sales series.
///
/// Pairs with a zero-sale previous month are skipped rather than dividing
/// by zero.
fn average_growth(series: &[u64]) -> Option<f64> {
    let mut total = 0.0;
    let mut pairs = 0u32;
    for window in series.windows(2) {
        let (prev, cur) = (window[0], window[1]);
        if prev == 0 {
            continue;
        }
        total += (cur as f64 - prev as f64) / prev as f64;
        pairs += 1;
    }
    (pairs > 0).then(|| total / f64::from(pairs))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Builds the sales forecast for a month `months` ahead.
pub fn forecast(orders: &[Order], months: u32) -> Result<Forecast, ForecastError> {
    let mut per_recipe = BTreeMap::new();
    let mut totals = Vec::with_capacity(Recipe::ALL.len());

    for recipe in Recipe::ALL {
        let series = monthly_sales(orders, recipe);
        let growth =
            average_growth(&series).ok_or(ForecastError::NotEnoughHistory(recipe))?;

        let total: u64 = series.iter().sum();
        let average = total as f64 / series.len() as f64;
        let prediction = average * (1.0 + growth).powi(months as i32);

        per_recipe.insert(
            recipe,
            RecipeForecast {
                average: average as u64,
                prediction: prediction.max(0.0) as u64,
                growth: round3(growth),
            },
        );
        totals.push(total);
    }

    let smallest = totals
        .iter()
        .copied()
        .filter(|&t| t > 0)
        .min()
        .unwrap_or(1);
    let ratio = totals
        .iter()
        .map(|&t| round3(t as f64 / smallest as f64))
        .collect();

    Ok(Forecast {
        months,
        per_recipe,
        ratio,
    })
}

/// Walks months forward, subtracting predicted sales from projected stock,
/// until one beer first runs out. That beer is the recommendation.
pub fn plan(
    orders: &[Order],
    projected_bottles: &BTreeMap<Recipe, u64>,
) -> Result<Plan, ForecastError> {
    let mut remaining: BTreeMap<Recipe, i64> = Recipe::ALL
        .into_iter()
        .map(|r| (r, projected_bottles.get(&r).copied().unwrap_or(0) as i64))
        .collect();

    for months in 1..=PLAN_HORIZON {
        let forecast = forecast(orders, months)?;

        for recipe in Recipe::ALL {
            remaining.insert(
                recipe,
                remaining[&recipe] - forecast.per_recipe[&recipe].prediction as i64,
            );
        }

        let (&recipe, &left) = remaining
            .iter()
            .min_by_key(|(_, &left)| left)
            .expect("catalogue is never empty");

        if left < 0 {
            return Ok(Plan {
                recipe,
                months_of_stock: months,
                projected_bottles: left,
                expected_sale: forecast.per_recipe[&recipe].prediction,
            });
        }
    }

    Err(ForecastError::NoShortfall(PLAN_HORIZON))
}
