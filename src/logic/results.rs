//! Result application: record a match winner and push entrants along the wired edges.

use crate::logic::advance;
use crate::models::{
    Bracket, BracketError, BracketFormat, BracketSide, EntrantId, GameMatch, MatchId,
    ELIMINATION_LOSSES,
};
use chrono::Utc;
use serde::Serialize;

/// What a recorded result did to the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchOutcome {
    /// The match as it stands after the result.
    pub game: GameMatch,
    pub winner: EntrantId,
    pub loser: Option<EntrantId>,
    /// The loser reached two losses on this result (double elimination).
    pub eliminated: Option<EntrantId>,
    /// The losers-bracket champion won the grand final; the reset match is now ready.
    pub reset_activated: bool,
    /// The tournament is decided.
    pub terminal: bool,
}

/// Record `winner` as the winner of `match_id`.
///
/// Fails without touching the bracket when the match is unknown, already decided, still
/// waiting for an entrant, or `winner` is not one of its two entrants. The update runs on
/// a draft and is committed only when every advancement succeeded.
pub fn apply_result(
    bracket: &mut Bracket,
    match_id: &MatchId,
    winner: EntrantId,
) -> Result<MatchOutcome, BracketError> {
    let mut draft = bracket.clone();
    let outcome = record(&mut draft, *match_id, winner)?;
    *bracket = draft;
    Ok(outcome)
}

fn record(
    bracket: &mut Bracket,
    match_id: MatchId,
    winner: EntrantId,
) -> Result<MatchOutcome, BracketError> {
    let game = bracket
        .matches
        .get(&match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    if game.completed {
        return Err(BracketError::MatchAlreadyCompleted(match_id));
    }
    let (slot_a, slot_b) = match (game.slot_a, game.slot_b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(BracketError::MatchNotReady(match_id)),
    };
    let loser = game
        .opponent_of(winner)
        .ok_or(BracketError::EntrantNotInMatch {
            match_id,
            entrant: winner,
        })?;
    let (winner_next, loser_next) = (game.winner_next, game.loser_next);

    let game = bracket
        .matches
        .get_mut(&match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    game.winner = Some(winner);
    game.loser = Some(loser);
    game.completed = true;
    game.completed_at = Some(Utc::now());
    bracket.entrant_mut(winner)?.add_win();

    let mut eliminated = None;
    let mut reset_activated = false;
    let terminal = match bracket.format {
        BracketFormat::SingleElimination => {
            if let Some(next) = winner_next {
                advance::deliver(bracket, match_id, next, winner)?;
            }
            winner_next.is_none()
        }
        BracketFormat::DoubleElimination => {
            if charge_loss(bracket, loser)? {
                eliminated = Some(loser);
            }
            match match_id.side {
                BracketSide::GrandFinal if winner == slot_a => true,
                BracketSide::GrandFinal => {
                    activate_reset(bracket, match_id, winner_next, slot_a, slot_b)?;
                    reset_activated = true;
                    false
                }
                BracketSide::Reset => true,
                BracketSide::Winners | BracketSide::Losers => {
                    if let Some(next) = winner_next {
                        advance::deliver(bracket, match_id, next, winner)?;
                    }
                    if let (None, Some(next)) = (eliminated, loser_next) {
                        advance::deliver(bracket, match_id, next, loser)?;
                    }
                    false
                }
            }
        }
    };

    if terminal {
        let name = bracket.entrant(winner).map(|e| e.name.as_str()).unwrap_or("?");
        log::info!("bracket {} decided: {} is champion", bracket.id, name);
    }

    let game = bracket
        .matches
        .get(&match_id)
        .cloned()
        .ok_or(BracketError::MatchNotFound(match_id))?;
    Ok(MatchOutcome {
        game,
        winner,
        loser: Some(loser),
        eliminated,
        reset_activated,
        terminal,
    })
}

/// Add a loss; returns true when it eliminates the entrant.
fn charge_loss(bracket: &mut Bracket, loser: EntrantId) -> Result<bool, BracketError> {
    let entrant = bracket.entrant_mut(loser)?;
    entrant.add_loss();
    if entrant.losses >= ELIMINATION_LOSSES {
        entrant.eliminate();
        log::debug!("{} eliminated with {} losses", entrant.name, entrant.losses);
        return Ok(true);
    }
    Ok(false)
}

/// Seat both grand finalists in the reset match, keeping their slots.
fn activate_reset(
    bracket: &mut Bracket,
    grand_final: MatchId,
    reset: Option<MatchId>,
    slot_a: EntrantId,
    slot_b: EntrantId,
) -> Result<(), BracketError> {
    let reset = reset.ok_or_else(|| {
        log::error!("grand final {} has no reset match wired", grand_final);
        BracketError::Inconsistent("grand final has no reset match".to_string())
    })?;
    let game = bracket.linked_match_mut(grand_final, reset)?;
    if game.slot_a.is_some() || game.slot_b.is_some() {
        return Err(BracketError::SlotOverflow(reset));
    }
    game.slot_a = Some(slot_a);
    game.slot_b = Some(slot_b);
    log::info!("bracket {}: grand final reset activated", bracket.id);
    Ok(())
}
