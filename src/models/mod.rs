//! Data structures for elimination brackets: entrants, matches, brackets, errors.

mod bracket;
mod entrant;
mod error;
mod game;

pub use bracket::{
    Bracket, BracketFormat, BracketId, BracketOptions, Round, DEFAULT_MAX_ENTRANTS,
    DEFAULT_MAX_ROUNDS, DEFAULT_MAX_ROUND_MATCHES, ELIMINATION_LOSSES,
};
pub use entrant::{Entrant, EntrantId};
pub use error::{BracketError, ErrorKind};
pub use game::{BracketSide, GameMatch, MatchId};
