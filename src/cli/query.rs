//! Analytics and status commands (inventory, forecast, plan, status)

use anyhow::Result;

use super::output::Output;
use crate::brewhouse::{Brewhouse, PlanOutcome};

/// Show bottled stock per beer
pub fn inventory(output: &Output) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let totals = brewhouse.inventory_totals()?;

    if output.is_json() {
        output.data(&totals);
    } else {
        println!("{:<22} BOTTLES", "BEER");
        println!("{}", "-".repeat(32));
        for (recipe, bottles) in &totals {
            println!("{:<22} {}", recipe.label(), bottles);
        }
    }

    Ok(())
}

/// Show the sales forecast for a future month
pub fn forecast(output: &Output, months: u32) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    output.verbose_ctx("forecast", &format!("Forecasting {} months ahead", months));
    let forecast = brewhouse.forecast(months)?;

    if output.is_json() {
        output.data(&forecast);
    } else {
        println!("Forecast for {} month(s) ahead", forecast.months);
        println!();
        println!(
            "{:<22} {:<10} {:<12} GROWTH",
            "BEER", "AVERAGE", "PREDICTED"
        );
        println!("{}", "-".repeat(56));
        for (recipe, figures) in &forecast.per_recipe {
            println!(
                "{:<22} {:<10} {:<12} {:+.1}%",
                recipe.label(),
                figures.average,
                figures.prediction,
                figures.growth * 100.0
            );
        }
        println!();
        let ratio: Vec<String> = forecast.ratio.iter().map(|r| format!("{:.3}", r)).collect();
        println!("Sales ratio: {}", ratio.join(" : "));
    }

    Ok(())
}

/// Recommend the next beer to brew
pub fn plan(output: &Output) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;

    match brewhouse.plan()? {
        PlanOutcome::NoFreeFermenter => {
            if output.is_json() {
                output.data(&serde_json::json!({ "recommendation": null, "reason": "no free fermenter" }));
            } else {
                println!("No fermenter is free, so no new batch can start.");
            }
        }
        PlanOutcome::Brew(plan) => {
            if output.is_json() {
                output.data(&serde_json::json!({ "recommendation": plan }));
            } else {
                println!("Brew next: {}", plan.recipe.label());
                println!(
                    "  Stock runs out in {} month(s); projected {} bottles short against an expected sale of {}.",
                    plan.months_of_stock,
                    -plan.projected_bottles,
                    plan.expected_sale
                );
            }
        }
    }

    Ok(())
}

/// Show the brewery status overview
pub fn status(output: &Output) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let status = brewhouse.status()?;

    if output.is_json() {
        output.data(&status);
    } else {
        println!("Brewery Status");
        println!("{}", "=".repeat(40));
        println!();
        println!("Batches in production:");
        println!("  Hot brew:     {}", status.hot_brew);
        println!("  Fermenting:   {}", status.fermenting);
        println!("  Conditioning: {}", status.conditioning);
        println!("  Bottling:     {}", status.bottling);
        println!();
        println!("Bottled batches: {}", status.bottled_batches);
        println!(
            "Tanks: {} free of {}",
            status.free_tanks, status.total_tanks
        );
    }

    Ok(())
}
