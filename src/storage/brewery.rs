//! Brewery site management
//!
//! Handles site initialization and provides access to the state store,
//! order book, and configuration. A site is a directory containing a
//! `.brewhouse/` folder.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::domain::{Container, Snapshot};

use super::{BrewhouseConfig, OrderBook, StateStore};

#[derive(Debug, Error)]
pub enum BreweryError {
    #[error("Not in a brewery site. Run 'brewhouse init' first.")]
    NotInSite,
}

/// The tank fleet a new site starts with
fn default_fleet() -> Vec<Container> {
    vec![
        Container::new("albert", 1000, true, false),
        Container::new("brigadier", 800, true, false),
        Container::new("camilla", 1000, true, true),
        Container::new("dylon", 800, true, true),
        Container::new("emily", 1000, true, true),
        Container::new("florence", 800, true, true),
        Container::new("gertrude", 680, false, true),
        Container::new("harry", 680, false, true),
        Container::new("r2d2", 800, true, false),
    ]
}

/// A brewery site
pub struct Brewery {
    root: PathBuf,
    config: BrewhouseConfig,
}

impl Brewery {
    /// Opens an existing site at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let site_dir = root.join(".brewhouse");

        if !site_dir.is_dir() {
            return Err(BreweryError::NotInSite.into());
        }

        let config = BrewhouseConfig::load(&site_dir.join("config.toml"))?;

        Ok(Self { root, config })
    }

    /// Opens the site at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Self::find_site_root().ok_or(BreweryError::NotInSite)?;
        Self::open(root)
    }

    /// Walks up from the current directory looking for `.brewhouse/`
    pub fn find_site_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".brewhouse").is_dir() {
                return Some(current);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Initializes a new site at the given path with the default tank
    /// fleet and no batches
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let site_dir = root.join(".brewhouse");

        fs::create_dir_all(&site_dir).with_context(|| {
            format!(
                "Failed to create .brewhouse directory: {}",
                site_dir.display()
            )
        })?;

        let store = StateStore::new(site_dir.join("state.json"));
        if !store.path().exists() {
            let mut snapshot = Snapshot::default();
            for tank in default_fleet() {
                snapshot.containers.insert(tank.name.clone(), tank);
            }
            store.commit(&snapshot)?;
        }

        let config_path = site_dir.join("config.toml");
        if !config_path.exists() {
            BrewhouseConfig::default().save(&config_path)?;
        }

        let orders_path = site_dir.join("orders.jsonl");
        if !orders_path.exists() {
            fs::write(&orders_path, "").with_context(|| {
                format!("Failed to create order book: {}", orders_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the site root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.brewhouse` directory path
    pub fn site_dir(&self) -> PathBuf {
        self.root.join(".brewhouse")
    }

    /// Returns the configuration
    pub fn config(&self) -> &BrewhouseConfig {
        &self.config
    }

    /// Returns the state store
    pub fn state_store(&self) -> StateStore {
        StateStore::new(self.site_dir().join("state.json"))
    }

    /// Returns the order book
    pub fn order_book(&self) -> OrderBook {
        OrderBook::new(self.site_dir().join("orders.jsonl"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let brewery = Brewery::init(dir.path()).unwrap();

        assert!(brewery.site_dir().is_dir());
        assert!(brewery.site_dir().join("state.json").is_file());
        assert!(brewery.site_dir().join("config.toml").is_file());
        assert!(brewery.site_dir().join("orders.jsonl").is_file());
    }

    #[test]
    fn init_seeds_the_default_fleet() {
        let dir = TempDir::new().unwrap();
        let brewery = Brewery::init(dir.path()).unwrap();

        let snapshot = brewery.state_store().load().unwrap();
        assert_eq!(snapshot.containers.len(), 9);
        assert!(snapshot.batches.is_empty());

        let camilla = &snapshot.containers["camilla"];
        assert!(camilla.can_ferment && camilla.can_condition);
        assert_eq!(camilla.capacity, 1000);

        let gertrude = &snapshot.containers["gertrude"];
        assert!(!gertrude.can_ferment && gertrude.can_condition);
    }

    #[test]
    fn init_is_idempotent_and_preserves_state() {
        let dir = TempDir::new().unwrap();
        let brewery = Brewery::init(dir.path()).unwrap();

        let mut snapshot = brewery.state_store().load().unwrap();
        snapshot.batches.insert(
            126,
            crate::domain::Batch::new(126, crate::domain::Recipe::Pilsner, 500),
        );
        brewery.state_store().commit(&snapshot).unwrap();

        let brewery = Brewery::init(dir.path()).unwrap();
        let reloaded = brewery.state_store().load().unwrap();
        assert!(reloaded.batches.contains_key(&126));
    }

    #[test]
    fn open_non_site_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Brewery::open(dir.path()).is_err());
    }
}
