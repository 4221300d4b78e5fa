//! Plain-data round trip for brackets, with a structural check on the way back in.

use crate::models::{Bracket, BracketError, BracketSide, EntrantId, GameMatch};
use serde_json::Value;
use std::collections::HashSet;

/// Bracket as a JSON value, for callers that persist it as an opaque document.
pub fn serialize(bracket: &Bracket) -> Result<Value, BracketError> {
    serde_json::to_value(bracket).map_err(|e| BracketError::InvalidData(e.to_string()))
}

/// Rebuild a bracket from [`serialize`] output. The structure is verified before use.
pub fn deserialize(value: Value) -> Result<Bracket, BracketError> {
    let bracket: Bracket =
        serde_json::from_value(value).map_err(|e| BracketError::InvalidData(e.to_string()))?;
    verify_structure(&bracket)?;
    Ok(bracket)
}

pub fn to_json(bracket: &Bracket) -> Result<String, BracketError> {
    serde_json::to_string(bracket).map_err(|e| BracketError::InvalidData(e.to_string()))
}

pub fn from_json(json: &str) -> Result<Bracket, BracketError> {
    let bracket: Bracket =
        serde_json::from_str(json).map_err(|e| BracketError::InvalidData(e.to_string()))?;
    verify_structure(&bracket)?;
    Ok(bracket)
}

/// Check the invariants the engine relies on:
/// - every map key matches its match id and every round entry exists
/// - every forward edge points at an existing match
/// - every seated entrant, winner and loser is a known entrant
/// - a completed match has a winner seated in it, and a loser unless it is a bye
pub fn verify_structure(bracket: &Bracket) -> Result<(), BracketError> {
    let known: HashSet<EntrantId> = bracket.entrants.iter().map(|e| e.id).collect();

    for (key, game) in &bracket.matches {
        if *key != game.id {
            return Err(broken(format!("match stored under {} claims id {}", key, game.id)));
        }
        for to in game.winner_next.iter().chain(game.loser_next.iter()) {
            if !bracket.matches.contains_key(to) {
                log::error!("match {} links to missing match {}", game.id, to);
                return Err(BracketError::BrokenLink { from: game.id, to: *to });
            }
        }
        for id in game.entrants().chain(game.winner).chain(game.loser) {
            if !known.contains(&id) {
                log::error!("match {} references unknown entrant {}", game.id, id);
                return Err(BracketError::UnknownEntrant(id));
            }
        }
        check_result(game)?;
    }

    let listed = bracket
        .winners_rounds
        .iter()
        .chain(bracket.losers_rounds.iter())
        .flat_map(|r| r.matches.iter().map(move |id| (r.side, r.index, id)));
    for (side, index, id) in listed {
        if id.side != side || id.round != index || !bracket.matches.contains_key(id) {
            return Err(broken(format!("round {:?} {} lists bad match {}", side, index, id)));
        }
    }
    for id in [bracket.grand_final, bracket.reset_match].into_iter().flatten() {
        if !matches!(id.side, BracketSide::GrandFinal | BracketSide::Reset)
            || !bracket.matches.contains_key(&id)
        {
            return Err(broken(format!("final match {} is missing", id)));
        }
    }
    if bracket.match_ids().len() != bracket.matches.len() {
        return Err(broken("matches outside the round layout".to_string()));
    }
    Ok(())
}

fn check_result(game: &GameMatch) -> Result<(), BracketError> {
    if !game.completed {
        if game.winner.is_some() {
            return Err(broken(format!("undecided match {} has a winner", game.id)));
        }
        return Ok(());
    }
    let winner_seated = game.winner.map_or(false, |w| game.has_entrant(w));
    let loser_ok = if game.is_bye {
        game.loser.is_none() && game.filled_slots() == 1
    } else {
        game.loser.is_some() && game.winner.and_then(|w| game.opponent_of(w)) == game.loser
    };
    if !winner_seated || !loser_ok {
        return Err(broken(format!("match {} has an illegal result", game.id)));
    }
    Ok(())
}

fn broken(msg: String) -> BracketError {
    log::error!("{}", msg);
    BracketError::Inconsistent(msg)
}
