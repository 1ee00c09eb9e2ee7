//! Batch CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::brewhouse::Brewhouse;
use crate::domain::Recipe;

#[derive(Subcommand)]
pub enum BatchCommands {
    /// Start a new batch in the hot brew stage
    ///
    /// Examples:
    ///   brewhouse batch add pilsner 500
    ///   brewhouse batch add red-helles 1000
    Add {
        /// Recipe to brew
        #[arg(value_enum)]
        recipe: Recipe,

        /// Batch volume in litres
        volume: u32,
    },

    /// List batches still in production
    List,

    /// Show batch details
    Show {
        /// Gyle number
        gyle: u32,
    },

    /// Show the tanks a batch may move into next
    Options {
        /// Gyle number
        gyle: u32,
    },

    /// Move a batch to its next stage
    ///
    /// Moving into fermentation or conditioning requires --tank; the
    /// later moves refuse one.
    Advance {
        /// Gyle number
        gyle: u32,

        /// Destination tank for the next stage
        #[arg(long)]
        tank: Option<String>,
    },

    /// Remove a batch, freeing any tank it holds
    Delete {
        /// Gyle number
        gyle: u32,
    },
}

pub fn run(cmd: BatchCommands, output: &Output) -> Result<()> {
    match cmd {
        BatchCommands::Add { recipe, volume } => add_batch(output, recipe, volume),
        BatchCommands::List => list_batches(output),
        BatchCommands::Show { gyle } => show_batch(output, gyle),
        BatchCommands::Options { gyle } => show_options(output, gyle),
        BatchCommands::Advance { gyle, tank } => advance_batch(output, gyle, tank.as_deref()),
        BatchCommands::Delete { gyle } => delete_batch(output, gyle),
    }
}

fn add_batch(output: &Output, recipe: Recipe, volume: u32) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let batch = brewhouse.create_batch(recipe, volume)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "gyle": batch.gyle,
            "recipe": batch.recipe,
            "volume": batch.volume,
            "stage": batch.stage,
        }));
    } else {
        output.success(&format!(
            "Started gyle {}: {} litres of {}",
            batch.gyle,
            batch.volume,
            batch.recipe.label()
        ));
    }

    Ok(())
}

fn list_batches(output: &Output) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let overview = brewhouse.production_overview()?;
    output.verbose_ctx("batch", &format!("{} batches in production", overview.len()));

    if output.is_json() {
        output.data(&overview);
    } else if overview.is_empty() {
        println!("No batches in production");
    } else {
        println!(
            "{:<6} {:<20} {:<8} {:<14} {:<12} TIME REMAINING",
            "GYLE", "RECIPE", "VOLUME", "STAGE", "TANK"
        );
        println!("{}", "-".repeat(90));
        for row in &overview {
            println!(
                "{:<6} {:<20} {:<8} {:<14} {:<12} {}",
                row.gyle,
                row.recipe.label(),
                format!("{}L", row.volume),
                row.stage,
                row.container.as_deref().unwrap_or("-"),
                row.time_remaining
            );
        }
    }

    Ok(())
}

fn show_batch(output: &Output, gyle: u32) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let batch = brewhouse.get_batch(gyle)?;
    let vessel = brewhouse
        .list_containers()?
        .into_iter()
        .find(|c| c.occupied_by(gyle));

    if output.is_json() {
        output.data(&serde_json::json!({
            "gyle": batch.gyle,
            "recipe": batch.recipe,
            "volume": batch.volume,
            "stage": batch.stage,
            "tank": vessel.as_ref().map(|c| c.name.clone()),
            "stage_deadline": vessel.as_ref().and_then(|c| c.occupant.deadline()),
        }));
    } else {
        println!("Gyle {}", batch.gyle);
        println!("  Recipe: {}", batch.recipe.label());
        println!("  Volume: {} litres", batch.volume);
        println!("  Stage:  {}", batch.stage);
        match vessel {
            Some(tank) => {
                println!("  Tank:   {}", tank.name);
                if let Some(deadline) = tank.occupant.deadline() {
                    println!("  Stage ends: {}", deadline.format("%Y-%m-%d %H:%M UTC"));
                }
            }
            None => println!("  Tank:   -"),
        }
    }

    Ok(())
}

fn show_options(output: &Output, gyle: u32) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let eligible = brewhouse.eligible_for(gyle)?;

    if output.is_json() {
        output.data(&eligible);
    } else if eligible.is_empty() {
        println!("No tanks available for gyle {}", gyle);
    } else {
        println!("{:<12} {:<10} CAPABILITIES", "TANK", "CAPACITY");
        println!("{}", "-".repeat(50));
        for tank in &eligible {
            let mut caps = Vec::new();
            if tank.can_ferment {
                caps.push("ferment");
            }
            if tank.can_condition {
                caps.push("condition");
            }
            let note = if tank.stay_put { " (current tank)" } else { "" };
            println!(
                "{:<12} {:<10} {}{}",
                tank.name,
                format!("{}L", tank.capacity),
                caps.join(", "),
                note
            );
        }
    }

    Ok(())
}

fn advance_batch(output: &Output, gyle: u32, tank: Option<&str>) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let batch = brewhouse.advance(gyle, tank)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "gyle": batch.gyle,
            "stage": batch.stage,
            "tank": tank,
        }));
    } else {
        match tank {
            Some(name) => output.success(&format!(
                "Gyle {} moved to {} in {}",
                gyle, batch.stage, name
            )),
            None => output.success(&format!("Gyle {} moved to {}", gyle, batch.stage)),
        }
    }

    Ok(())
}

fn delete_batch(output: &Output, gyle: u32) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    brewhouse.delete_batch(gyle)?;
    output.success(&format!("Deleted gyle {}", gyle));
    Ok(())
}
