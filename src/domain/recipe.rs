//! Product catalogue
//!
//! The brewery produces a fixed set of three beers. The on-disk labels match
//! the names used in the historical order records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Unknown recipe: '{0}'")]
pub struct RecipeError(String);

/// One of the beers the brewery produces
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Recipe {
    #[serde(rename = "Organic Red Helles")]
    RedHelles,
    #[serde(rename = "Organic Pilsner")]
    Pilsner,
    #[serde(rename = "Organic Dunkel")]
    Dunkel,
}

impl Recipe {
    /// All known recipes, in catalogue order
    pub const ALL: [Recipe; 3] = [Recipe::RedHelles, Recipe::Pilsner, Recipe::Dunkel];

    /// Returns the full product label as it appears on order records
    pub fn label(&self) -> &'static str {
        match self {
            Recipe::RedHelles => "Organic Red Helles",
            Recipe::Pilsner => "Organic Pilsner",
            Recipe::Dunkel => "Organic Dunkel",
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Recipe {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Recipe::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| RecipeError(s.to_string()))
    }
}
