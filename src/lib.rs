//! Elimination bracket engine: builds single- and double-elimination brackets from a
//! roster, seeds byes, wires winner and loser edges, and applies match results until a
//! champion is decided. No I/O; callers own persistence and presentation.

pub mod logic;
pub mod models;

pub use logic::{
    apply_result, build_bracket, build_bracket_with, deserialize, from_json, parse_roster,
    play_out, play_random_match, read_roster_csv, serialize, shuffle_entrants, to_json,
    validate_entrants, verify_structure, MatchOutcome,
};
pub use models::{
    Bracket, BracketError, BracketFormat, BracketId, BracketOptions, BracketSide, Entrant,
    EntrantId, ErrorKind, GameMatch, MatchId, Round, ELIMINATION_LOSSES,
};
