//! Bracket, its rounds, format and construction limits, plus the read-only query surface.

use crate::models::entrant::{Entrant, EntrantId};
use crate::models::error::BracketError;
use crate::models::game::{BracketSide, GameMatch, MatchId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a bracket.
pub type BracketId = Uuid;

/// Losses that knock an entrant out under double elimination.
pub const ELIMINATION_LOSSES: u32 = 2;

pub const DEFAULT_MAX_ENTRANTS: usize = 1024;
pub const DEFAULT_MAX_ROUNDS: u32 = 10;
pub const DEFAULT_MAX_ROUND_MATCHES: usize = 512;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketFormat {
    #[default]
    #[serde(alias = "single")]
    SingleElimination,
    #[serde(alias = "double")]
    DoubleElimination,
}

/// Resource guards applied at construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketOptions {
    pub max_entrants: usize,
    pub max_rounds: u32,
    pub max_round_matches: usize,
}

impl Default for BracketOptions {
    fn default() -> Self {
        Self {
            max_entrants: DEFAULT_MAX_ENTRANTS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_round_matches: DEFAULT_MAX_ROUND_MATCHES,
        }
    }
}

/// One column of a sub-bracket, matches ordered by position.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub side: BracketSide,
    pub index: u32,
    pub name: String,
    pub matches: Vec<MatchId>,
}

/// Full bracket: entrants, match graph and round layout.
///
/// The shape (rounds, edges, `sources`) is fixed at construction; only slots and results
/// change afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub format: BracketFormat,
    /// Roster snapshot taken at construction; carries loss counters.
    pub entrants: Vec<Entrant>,
    pub winners_rounds: Vec<Round>,
    /// Double elimination only.
    pub losers_rounds: Vec<Round>,
    pub grand_final: Option<MatchId>,
    /// Allocated up front; only filled when the losers-bracket champion wins the grand final.
    pub reset_match: Option<MatchId>,
    pub matches: HashMap<MatchId, GameMatch>,
    pub entrant_count: usize,
    /// Next power of two >= `entrant_count`.
    pub total_slots: usize,
    pub created_at: DateTime<Utc>,
}

impl Bracket {
    /// Empty bracket shell; the builder fills in rounds and matches.
    pub fn new(format: BracketFormat, entrants: Vec<Entrant>, total_slots: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            format,
            entrant_count: entrants.len(),
            entrants,
            winners_rounds: Vec::new(),
            losers_rounds: Vec::new(),
            grand_final: None,
            reset_match: None,
            matches: HashMap::new(),
            total_slots,
            created_at: Utc::now(),
        }
    }

    pub fn get_match(&self, id: &MatchId) -> Option<&GameMatch> {
        self.matches.get(id)
    }

    /// Mutable lookup that treats a missing match as a broken link from `from`.
    pub(crate) fn linked_match_mut(
        &mut self,
        from: MatchId,
        to: MatchId,
    ) -> Result<&mut GameMatch, BracketError> {
        match self.matches.get_mut(&to) {
            Some(m) => Ok(m),
            None => {
                log::error!("match {} links to missing match {}", from, to);
                Err(BracketError::BrokenLink { from, to })
            }
        }
    }

    pub fn entrant(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    pub(crate) fn entrant_mut(&mut self, id: EntrantId) -> Result<&mut Entrant, BracketError> {
        match self.entrants.iter_mut().find(|e| e.id == id) {
            Some(e) => Ok(e),
            None => {
                log::error!("bracket references unknown entrant {}", id);
                Err(BracketError::UnknownEntrant(id))
            }
        }
    }

    /// Match ids in display order: winners rounds, losers rounds, grand final, reset.
    pub fn match_ids(&self) -> Vec<MatchId> {
        self.winners_rounds
            .iter()
            .chain(self.losers_rounds.iter())
            .flat_map(|r| r.matches.iter().copied())
            .chain(self.grand_final)
            .chain(self.reset_match)
            .collect()
    }

    pub fn all_matches(&self) -> Vec<&GameMatch> {
        self.match_ids()
            .iter()
            .filter_map(|id| self.matches.get(id))
            .collect()
    }

    /// Matches with both slots filled and no result yet.
    pub fn ready_matches(&self) -> Vec<&GameMatch> {
        self.all_matches()
            .into_iter()
            .filter(|m| m.is_ready())
            .collect()
    }

    pub fn completed_matches(&self) -> Vec<&GameMatch> {
        self.all_matches()
            .into_iter()
            .filter(|m| m.completed)
            .collect()
    }

    /// Ids of every match `entrant` has been seated in, in display order.
    pub fn matches_for_entrant(&self, entrant: EntrantId) -> Vec<MatchId> {
        self.all_matches()
            .into_iter()
            .filter(|m| m.has_entrant(entrant))
            .map(|m| m.id)
            .collect()
    }

    /// Slot layout of the first winners round, two entries per match.
    pub fn first_round_slots(&self) -> Vec<Option<EntrantId>> {
        self.winners_rounds
            .first()
            .map(|round| {
                round
                    .matches
                    .iter()
                    .filter_map(|id| self.matches.get(id))
                    .flat_map(|m| [m.slot_a, m.slot_b])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Matches auto-completed with a single entrant.
    pub fn bye_count(&self) -> usize {
        self.matches.values().filter(|m| m.is_bye).count()
    }

    /// True once the losers-bracket champion has forced a second grand final.
    pub fn reset_activated(&self) -> bool {
        self.reset_match
            .and_then(|id| self.matches.get(&id))
            .map_or(false, |m| m.slot_a.is_some() || m.slot_b.is_some())
    }

    /// The match whose result decides the tournament.
    pub fn final_match_id(&self) -> Option<MatchId> {
        match self.format {
            BracketFormat::SingleElimination => self
                .winners_rounds
                .last()
                .and_then(|r| r.matches.first().copied()),
            BracketFormat::DoubleElimination => {
                if self.reset_activated() {
                    self.reset_match
                } else {
                    self.grand_final
                }
            }
        }
    }

    /// True once the deciding match (grand final or reset, if activated) has a result.
    pub fn is_complete(&self) -> bool {
        self.final_match_id()
            .and_then(|id| self.matches.get(&id))
            .map_or(false, |m| m.completed)
    }

    pub fn champion(&self) -> Option<&Entrant> {
        if !self.is_complete() {
            return None;
        }
        let id = self.final_match_id()?;
        self.matches
            .get(&id)
            .and_then(|m| m.winner)
            .and_then(|w| self.entrant(w))
    }

    pub fn runner_up(&self) -> Option<&Entrant> {
        if !self.is_complete() {
            return None;
        }
        let id = self.final_match_id()?;
        self.matches
            .get(&id)
            .and_then(|m| m.loser)
            .and_then(|l| self.entrant(l))
    }

    /// Display name of the round a match belongs to.
    pub fn round_name(&self, id: &MatchId) -> Option<&str> {
        let rounds = match id.side {
            BracketSide::Winners => &self.winners_rounds,
            BracketSide::Losers => &self.losers_rounds,
            BracketSide::GrandFinal => return self.grand_final.map(|_| "Grand Final"),
            BracketSide::Reset => return self.reset_match.map(|_| "Grand Final Reset"),
        };
        rounds
            .get(id.round as usize)
            .filter(|r| r.matches.contains(id))
            .map(|r| r.name.as_str())
    }
}
