//! Random play-through: decide ready matches with coin-flip winners.

use crate::logic::results::{apply_result, MatchOutcome};
use crate::models::{Bracket, BracketError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one ready match at random and give it a random winner.
/// Returns `None` when nothing is ready.
pub fn play_random_match<R: Rng + ?Sized>(
    bracket: &mut Bracket,
    rng: &mut R,
) -> Result<Option<MatchOutcome>, BracketError> {
    let picked = bracket
        .ready_matches()
        .choose(rng)
        .and_then(|m| Some((m.id, m.slot_a?, m.slot_b?)));
    let Some((id, a, b)) = picked else {
        return Ok(None);
    };
    let winner = if rng.gen_bool(0.5) { a } else { b };
    apply_result(bracket, &id, winner).map(Some)
}

/// Keep playing random matches until none is ready. Returns how many were played.
pub fn play_out<R: Rng + ?Sized>(bracket: &mut Bracket, rng: &mut R) -> Result<usize, BracketError> {
    let mut played = 0;
    while play_random_match(bracket, rng)?.is_some() {
        played += 1;
    }
    Ok(played)
}
