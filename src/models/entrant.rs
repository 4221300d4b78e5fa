//! Entrant (team) records referenced by bracket slots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entrant (used in match slots and lookups).
pub type EntrantId = Uuid;

/// A team entered into the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
    /// 1-based roster position, assigned when the bracket is built.
    pub seed: u32,
    pub wins: u32,
    /// Only counted under double elimination; two losses eliminate.
    pub losses: u32,
    pub eliminated: bool,
}

impl Entrant {
    /// Create a new entrant with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            seed: 0,
            wins: 0,
            losses: 0,
            eliminated: false,
        }
    }

    /// Record a win for this entrant.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Record a loss for this entrant.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Mark the entrant as out of the tournament.
    pub fn eliminate(&mut self) {
        self.eliminated = true;
    }

    /// True if the record has never been through a bracket.
    pub fn is_fresh(&self) -> bool {
        self.wins == 0 && self.losses == 0 && !self.eliminated
    }
}
