//! Vessel model
//!
//! A container is a fixed piece of equipment: a tank with a capacity and one
//! or both of the fermenting/conditioning capabilities. Occupancy is a tagged
//! status rather than the legacy `occupied`/`id`/`finish` field triple, so a
//! container can never be simultaneously free and holding a batch.

use chrono::{DateTime, Utc};

/// Occupancy status of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Nothing in the tank
    Empty,
    /// Held by the batch with this gyle number until the stage deadline
    Occupied {
        gyle: u32,
        deadline: DateTime<Utc>,
    },
}

impl Occupancy {
    /// Returns the occupant's gyle number, if any
    pub fn gyle(&self) -> Option<u32> {
        match self {
            Occupancy::Empty => None,
            Occupancy::Occupied { gyle, .. } => Some(*gyle),
        }
    }

    /// Returns the stage deadline, if the container is held
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match self {
            Occupancy::Empty => None,
            Occupancy::Occupied { deadline, .. } => Some(*deadline),
        }
    }
}

/// A physical vessel in the brewhouse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Unique name, also the key in the persisted containers map
    pub name: String,

    /// Capacity in litres
    pub capacity: u32,

    /// Can run the fermentation stage
    pub can_ferment: bool,

    /// Can run the conditioning stage
    pub can_condition: bool,

    /// Current occupancy status
    pub occupant: Occupancy,
}

impl Container {
    /// Creates an empty container with the given capabilities
    pub fn new(
        name: impl Into<String>,
        capacity: u32,
        can_ferment: bool,
        can_condition: bool,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            can_ferment,
            can_condition,
            occupant: Occupancy::Empty,
        }
    }

    /// Returns true if a batch currently holds this container
    pub fn is_occupied(&self) -> bool {
        self.occupant != Occupancy::Empty
    }

    /// Returns true if the given batch holds this container
    pub fn occupied_by(&self, gyle: u32) -> bool {
        self.occupant.gyle() == Some(gyle)
    }

    /// Hands the container to a batch until the given stage deadline
    pub fn occupy(&mut self, gyle: u32, deadline: DateTime<Utc>) {
        self.occupant = Occupancy::Occupied { gyle, deadline };
    }

    /// Frees the container
    pub fn release(&mut self) {
        self.occupant = Occupancy::Empty;
    }
}
