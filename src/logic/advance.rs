//! Advancement: seat an entrant in the next match and cascade through byes.
//!
//! Every delivery goes through one work queue. After a placement the target is checked:
//! a match expecting a single entrant completes as a bye and forwards its winner, which
//! may trigger the next bye, and so on until the queue drains.

use crate::models::{Bracket, BracketError, BracketSide, EntrantId, MatchId};
use chrono::Utc;
use std::collections::VecDeque;

/// One entrant travelling along an edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Delivery {
    pub from: MatchId,
    pub to: MatchId,
    pub entrant: EntrantId,
}

/// Which slot of the target an entrant ended up in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    A,
    B,
}

/// Deliver one entrant and run any byes it unlocks.
pub fn deliver(
    bracket: &mut Bracket,
    from: MatchId,
    to: MatchId,
    entrant: EntrantId,
) -> Result<(), BracketError> {
    let mut queue = VecDeque::from([Delivery { from, to, entrant }]);
    drain(bracket, &mut queue)
}

/// Complete `id` as a bye if it can only ever see one entrant and that entrant is seated,
/// then forward the winner and keep cascading.
pub fn settle_bye(bracket: &mut Bracket, id: MatchId) -> Result<(), BracketError> {
    let mut queue = VecDeque::new();
    if let Some(next) = complete_bye(bracket, id)? {
        queue.push_back(next);
    }
    drain(bracket, &mut queue)
}

fn drain(bracket: &mut Bracket, queue: &mut VecDeque<Delivery>) -> Result<(), BracketError> {
    while let Some(delivery) = queue.pop_front() {
        let seated_in = place(bracket, delivery)?;
        if let Some(next) = complete_bye(bracket, seated_in)? {
            queue.push_back(next);
        }
    }
    Ok(())
}

/// Seat the entrant in the target's first open slot. Grand-final deliveries keep the
/// winners-bracket champion in slot A and the losers-bracket champion in slot B.
/// Returns the match the entrant was actually seated in.
fn place(bracket: &mut Bracket, delivery: Delivery) -> Result<MatchId, BracketError> {
    let Delivery { from, to, entrant } = delivery;
    let target = bracket.linked_match_mut(from, to)?;

    let preferred = match (to.side, from.side) {
        (BracketSide::GrandFinal, BracketSide::Winners) => Some(Slot::A),
        (BracketSide::GrandFinal, BracketSide::Losers) => Some(Slot::B),
        _ => None,
    };
    let slot = match (preferred, target.slot_a, target.slot_b) {
        (Some(Slot::B), _, None) => Some(Slot::B),
        (_, None, _) => Some(Slot::A),
        (_, _, None) => Some(Slot::B),
        _ => None,
    };

    let seated = match slot {
        Some(Slot::A) if !target.completed => {
            target.slot_a = Some(entrant);
            true
        }
        Some(Slot::B) if !target.completed => {
            target.slot_b = Some(entrant);
            true
        }
        _ => false,
    };
    if !seated {
        return place_in_round(bracket, to, entrant);
    }
    log::debug!("{} -> {} ({:?})", from, to, slot);
    Ok(to)
}

/// Fallback when a wired target is already full: first open slot in the same round.
fn place_in_round(
    bracket: &mut Bracket,
    to: MatchId,
    entrant: EntrantId,
) -> Result<MatchId, BracketError> {
    let rounds = match to.side {
        BracketSide::Winners => &bracket.winners_rounds,
        BracketSide::Losers => &bracket.losers_rounds,
        _ => return Err(BracketError::SlotOverflow(to)),
    };
    let candidates = rounds
        .get(to.round as usize)
        .map(|r| r.matches.clone())
        .unwrap_or_default();

    for id in candidates {
        if let Some(m) = bracket.matches.get_mut(&id) {
            if m.completed {
                continue;
            }
            let seated = if m.slot_a.is_none() {
                m.slot_a = Some(entrant);
                true
            } else if m.slot_b.is_none() {
                m.slot_b = Some(entrant);
                true
            } else {
                false
            };
            if seated {
                log::warn!("match {} was full, seated entrant {} in {}", to, entrant, id);
                return Ok(id);
            }
        }
    }
    log::error!("no open slot for entrant {} in the round of {}", entrant, to);
    Err(BracketError::SlotOverflow(to))
}

/// Mark `id` as a completed bye when it expects exactly one entrant and has it.
/// Returns the onward delivery for the bye winner.
fn complete_bye(bracket: &mut Bracket, id: MatchId) -> Result<Option<Delivery>, BracketError> {
    let Some(game) = bracket.matches.get_mut(&id) else {
        log::error!("bye check on missing match {}", id);
        return Err(BracketError::Inconsistent(format!("missing match {}", id)));
    };
    if game.completed || game.sources != 1 || game.filled_slots() != 1 {
        return Ok(None);
    }
    let Some(entrant) = game.entrants().next() else {
        return Ok(None);
    };
    game.is_bye = true;
    game.completed = true;
    game.winner = Some(entrant);
    game.completed_at = Some(Utc::now());
    log::debug!("{} is a bye for entrant {}", id, entrant);

    Ok(game.winner_next.map(|to| Delivery {
        from: id,
        to,
        entrant,
    }))
}
