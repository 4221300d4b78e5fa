//! Match records, their identifiers and the sub-bracket they belong to.

use crate::models::entrant::EntrantId;
use crate::models::error::BracketError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which tree of the bracket a match lives in. Single elimination only uses `Winners`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BracketSide {
    Winners,
    Losers,
    GrandFinal,
    Reset,
}

/// Stable match identifier: `(side, round, position)`, both indices 0-based.
///
/// Serialized as its display form (`W1-1`, `L3-2`, `GF`, `GF-R`) so it can key JSON maps.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MatchId {
    pub side: BracketSide,
    pub round: u32,
    pub position: u32,
}

impl MatchId {
    pub fn winners(round: u32, position: u32) -> Self {
        Self {
            side: BracketSide::Winners,
            round,
            position,
        }
    }

    pub fn losers(round: u32, position: u32) -> Self {
        Self {
            side: BracketSide::Losers,
            round,
            position,
        }
    }

    pub fn grand_final() -> Self {
        Self {
            side: BracketSide::GrandFinal,
            round: 0,
            position: 0,
        }
    }

    pub fn reset() -> Self {
        Self {
            side: BracketSide::Reset,
            round: 0,
            position: 0,
        }
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            BracketSide::Winners => write!(f, "W{}-{}", self.round + 1, self.position + 1),
            BracketSide::Losers => write!(f, "L{}-{}", self.round + 1, self.position + 1),
            BracketSide::GrandFinal => write!(f, "GF"),
            BracketSide::Reset => write!(f, "GF-R"),
        }
    }
}

impl FromStr for MatchId {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BracketError::InvalidMatchId(s.to_string());
        match s {
            "GF" => return Ok(Self::grand_final()),
            "GF-R" => return Ok(Self::reset()),
            _ => {}
        }
        let side = match s.chars().next() {
            Some('W') => BracketSide::Winners,
            Some('L') => BracketSide::Losers,
            _ => return Err(invalid()),
        };
        let (round, position) = s[1..].split_once('-').ok_or_else(invalid)?;
        let round: u32 = round.parse().map_err(|_| invalid())?;
        let position: u32 = position.parse().map_err(|_| invalid())?;
        if round == 0 || position == 0 {
            return Err(invalid());
        }
        Ok(Self {
            side,
            round: round - 1,
            position: position - 1,
        })
    }
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for MatchId {
    type Error = BracketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One node of the bracket graph. The forward edges are fixed at construction; slots and
/// the result fields fill in as entrants arrive.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub slot_a: Option<EntrantId>,
    pub slot_b: Option<EntrantId>,
    pub winner: Option<EntrantId>,
    /// Never set for byes.
    pub loser: Option<EntrantId>,
    pub completed: bool,
    pub is_bye: bool,
    /// None only for terminal matches.
    pub winner_next: Option<MatchId>,
    /// Double elimination only: where the loser drops to.
    pub loser_next: Option<MatchId>,
    /// How many incoming sources (seeded slots or live feeder matches) will deliver an
    /// entrant here: 2 for a real game, 1 for a bye, 0 for a void match.
    pub sources: u8,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    pub fn new(id: MatchId) -> Self {
        Self {
            id,
            slot_a: None,
            slot_b: None,
            winner: None,
            loser: None,
            completed: false,
            is_bye: false,
            winner_next: None,
            loser_next: None,
            sources: 0,
            completed_at: None,
        }
    }

    pub fn side(&self) -> BracketSide {
        self.id.side
    }

    /// Both slots filled and no result yet.
    pub fn is_ready(&self) -> bool {
        !self.completed && self.slot_a.is_some() && self.slot_b.is_some()
    }

    /// No entrant will ever reach this match.
    pub fn is_void(&self) -> bool {
        self.sources == 0 && self.slot_a.is_none() && self.slot_b.is_none()
    }

    pub fn has_entrant(&self, id: EntrantId) -> bool {
        self.slot_a == Some(id) || self.slot_b == Some(id)
    }

    /// Entrants currently seated, slot A first.
    pub fn entrants(&self) -> impl Iterator<Item = EntrantId> {
        self.slot_a.into_iter().chain(self.slot_b)
    }

    pub fn filled_slots(&self) -> usize {
        self.entrants().count()
    }

    /// The other entrant in a two-entrant match.
    pub fn opponent_of(&self, id: EntrantId) -> Option<EntrantId> {
        match (self.slot_a, self.slot_b) {
            (Some(a), Some(b)) if a == id => Some(b),
            (Some(a), Some(b)) if b == id => Some(a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ids_parse_their_display_form() {
        for id in [
            MatchId::winners(0, 0),
            MatchId::winners(3, 7),
            MatchId::losers(5, 1),
            MatchId::grand_final(),
            MatchId::reset(),
        ] {
            assert_eq!(id.to_string().parse::<MatchId>(), Ok(id));
        }
        assert_eq!(MatchId::losers(2, 0).to_string(), "L3-1");
    }

    #[test]
    fn malformed_match_ids_are_rejected() {
        for raw in ["", "X1-1", "W0-1", "W1", "W1-", "L-2-1", "GF-X"] {
            assert!(matches!(
                raw.parse::<MatchId>(),
                Err(BracketError::InvalidMatchId(_))
            ));
        }
    }

    #[test]
    fn match_ids_serialize_as_strings() {
        let json = serde_json::to_string(&MatchId::winners(1, 2)).unwrap();
        assert_eq!(json, "\"W2-3\"");
        let back: MatchId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MatchId::winners(1, 2));
    }
}
