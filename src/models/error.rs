//! BracketError and its three categories.

use crate::models::entrant::EntrantId;
use crate::models::game::MatchId;

/// Coarse category of a [`BracketError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input. Surface to the caller, never retry.
    Validation,
    /// `apply_result` preconditions violated (stale click, wrong entrant, ...).
    IllegalTransition,
    /// Broken wiring or missing records. Signals a bug, not a user mistake.
    StructuralInvariant,
}

/// Errors that can occur while building or progressing a bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Fewer than two entrants.
    NotEnoughEntrants { count: usize },
    /// More entrants than the configured ceiling.
    TooManyEntrants { count: usize, max: usize },
    /// Bracket would need more rounds than the configured ceiling.
    TooManyRounds { rounds: u32, max: u32 },
    /// First round would hold more matches than the configured ceiling.
    TooManyMatches { matches: usize, max: usize },
    /// Entrant at this roster index has an empty name.
    BlankEntrantName { index: usize },
    /// The same entrant id appears twice.
    DuplicateEntrant(EntrantId),
    /// A roster names the same team twice (case-insensitive).
    DuplicateEntrantName(String),
    /// Entrant arrived with results already recorded.
    MalformedEntrant(EntrantId),
    /// Text that does not parse as a match id.
    InvalidMatchId(String),
    /// Roster text or CSV could not be read.
    InvalidRoster(String),
    /// Serialized bracket data could not be decoded.
    InvalidData(String),
    MatchNotFound(MatchId),
    MatchAlreadyCompleted(MatchId),
    /// One or both slots are still empty.
    MatchNotReady(MatchId),
    EntrantNotInMatch { match_id: MatchId, entrant: EntrantId },
    /// A forward edge points at a match that does not exist.
    BrokenLink { from: MatchId, to: MatchId },
    /// A match references an entrant the bracket does not know.
    UnknownEntrant(EntrantId),
    /// No open slot left for an incoming entrant.
    SlotOverflow(MatchId),
    /// Any other broken structural rule, with a description.
    Inconsistent(String),
}

impl BracketError {
    pub fn kind(&self) -> ErrorKind {
        use BracketError::*;
        match self {
            NotEnoughEntrants { .. }
            | TooManyEntrants { .. }
            | TooManyRounds { .. }
            | TooManyMatches { .. }
            | BlankEntrantName { .. }
            | DuplicateEntrant(_)
            | DuplicateEntrantName(_)
            | MalformedEntrant(_)
            | InvalidMatchId(_)
            | InvalidRoster(_)
            | InvalidData(_) => ErrorKind::Validation,
            MatchNotFound(_)
            | MatchAlreadyCompleted(_)
            | MatchNotReady(_)
            | EntrantNotInMatch { .. } => ErrorKind::IllegalTransition,
            BrokenLink { .. } | UnknownEntrant(_) | SlotOverflow(_) | Inconsistent(_) => {
                ErrorKind::StructuralInvariant
            }
        }
    }
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::NotEnoughEntrants { count } => {
                write!(f, "Need at least 2 entrants to build a bracket (got {})", count)
            }
            BracketError::TooManyEntrants { count, max } => {
                write!(f, "Too many entrants: {} (maximum {})", count, max)
            }
            BracketError::TooManyRounds { rounds, max } => {
                write!(f, "Bracket would need {} rounds (maximum {})", rounds, max)
            }
            BracketError::TooManyMatches { matches, max } => {
                write!(f, "Round would hold {} matches (maximum {})", matches, max)
            }
            BracketError::BlankEntrantName { index } => {
                write!(f, "Entrant #{} has an empty name", index + 1)
            }
            BracketError::DuplicateEntrant(id) => write!(f, "Entrant {} is listed twice", id),
            BracketError::DuplicateEntrantName(name) => {
                write!(f, "A team named \"{}\" already exists", name)
            }
            BracketError::MalformedEntrant(id) => {
                write!(f, "Entrant {} already has results recorded", id)
            }
            BracketError::InvalidMatchId(raw) => write!(f, "Invalid match id \"{}\"", raw),
            BracketError::InvalidRoster(msg) => write!(f, "Invalid roster: {}", msg),
            BracketError::InvalidData(msg) => write!(f, "Invalid bracket data: {}", msg),
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            BracketError::MatchAlreadyCompleted(id) => {
                write!(f, "Match {} already has a result", id)
            }
            BracketError::MatchNotReady(id) => {
                write!(f, "Match {} is still waiting for entrants", id)
            }
            BracketError::EntrantNotInMatch { match_id, entrant } => {
                write!(f, "Entrant {} is not playing in match {}", entrant, match_id)
            }
            BracketError::BrokenLink { from, to } => {
                write!(f, "Match {} links to missing match {}", from, to)
            }
            BracketError::UnknownEntrant(id) => write!(f, "Unknown entrant {}", id),
            BracketError::SlotOverflow(id) => write!(f, "No open slot left in match {}", id),
            BracketError::Inconsistent(msg) => write!(f, "Inconsistent bracket: {}", msg),
        }
    }
}

impl std::error::Error for BracketError {}
