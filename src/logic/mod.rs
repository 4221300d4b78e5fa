//! Bracket engine logic: construction, wiring, byes, results, persistence, rosters.

pub mod advance;
mod build;
pub mod byes;
mod persist;
mod results;
mod roster;
pub mod seeding;
mod simulate;
pub mod topology;
pub mod wiring;

pub use build::{build_bracket, build_bracket_with, validate_entrants};
pub use persist::{deserialize, from_json, serialize, to_json, verify_structure};
pub use results::{apply_result, MatchOutcome};
pub use roster::{parse_roster, read_roster_csv, shuffle_entrants};
pub use simulate::{play_out, play_random_match};
