//! Tank CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::brewhouse::Brewhouse;
use crate::domain::Container;

#[derive(Subcommand)]
pub enum TankCommands {
    /// List every tank and its occupant
    List,

    /// Show tank details
    Show {
        /// Tank name
        name: String,
    },
}

pub fn run(cmd: TankCommands, output: &Output) -> Result<()> {
    match cmd {
        TankCommands::List => list_tanks(output),
        TankCommands::Show { name } => show_tank(output, &name),
    }
}

fn tank_json(tank: &Container) -> serde_json::Value {
    serde_json::json!({
        "name": tank.name,
        "capacity": tank.capacity,
        "can_ferment": tank.can_ferment,
        "can_condition": tank.can_condition,
        "occupied_by": tank.occupant.gyle(),
        "stage_deadline": tank.occupant.deadline(),
    })
}

fn list_tanks(output: &Output) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let tanks = brewhouse.list_containers()?;

    if output.is_json() {
        let items: Vec<_> = tanks.iter().map(tank_json).collect();
        output.data(&items);
    } else {
        println!(
            "{:<12} {:<10} {:<20} OCCUPANT",
            "TANK", "CAPACITY", "CAPABILITIES"
        );
        println!("{}", "-".repeat(60));
        for tank in &tanks {
            let mut caps = Vec::new();
            if tank.can_ferment {
                caps.push("ferment");
            }
            if tank.can_condition {
                caps.push("condition");
            }
            let occupant = match tank.occupant.gyle() {
                Some(gyle) => format!("gyle {}", gyle),
                None => "free".to_string(),
            };
            println!(
                "{:<12} {:<10} {:<20} {}",
                tank.name,
                format!("{}L", tank.capacity),
                caps.join(", "),
                occupant
            );
        }
    }

    Ok(())
}

fn show_tank(output: &Output, name: &str) -> Result<()> {
    let brewhouse = Brewhouse::open_current()?;
    let tank = brewhouse.get_container(name)?;

    if output.is_json() {
        output.data(&tank_json(&tank));
    } else {
        println!("{}", tank.name);
        println!("  Capacity: {} litres", tank.capacity);
        println!(
            "  Ferments: {}   Conditions: {}",
            if tank.can_ferment { "yes" } else { "no" },
            if tank.can_condition { "yes" } else { "no" }
        );
        match tank.occupant.gyle() {
            Some(gyle) => {
                println!("  Occupant: gyle {}", gyle);
                if let Some(deadline) = tank.occupant.deadline() {
                    println!("  Stage ends: {}", deadline.format("%Y-%m-%d %H:%M UTC"));
                }
            }
            None => println!("  Occupant: free"),
        }
    }

    Ok(())
}
