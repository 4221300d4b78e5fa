//! Bye resolution: count how many entrants each match can receive, then auto-complete
//! the first-round matches that only have one.

use crate::logic::advance;
use crate::models::{Bracket, BracketError, BracketSide, MatchId};

/// Fill in `sources` for every match.
///
/// First-round matches count their seeded entrants. Every other match counts its live
/// feeders: a feeder delivers a winner when it has at least one source, and a loser only
/// when it is a real two-entrant game. Matches are visited winners rounds first, then
/// losers rounds, then the finals, so feeders are always settled before their targets.
pub fn count_sources(bracket: &mut Bracket) {
    let order = bracket.match_ids();

    for id in &order {
        if let Some(m) = bracket.matches.get_mut(id) {
            m.sources = if id.side == BracketSide::Winners && id.round == 0 {
                m.filled_slots() as u8
            } else {
                0
            };
        }
    }

    for id in &order {
        let Some(m) = bracket.matches.get(id) else {
            continue;
        };
        let sources = m.sources;
        let (winner_next, loser_next) = (m.winner_next, m.loser_next);
        if sources >= 1 {
            bump(bracket, winner_next);
        }
        if sources == 2 {
            bump(bracket, loser_next);
        }
    }
}

fn bump(bracket: &mut Bracket, target: Option<MatchId>) {
    if let Some(m) = target.and_then(|id| bracket.matches.get_mut(&id)) {
        m.sources = m.sources.saturating_add(1);
    }
}

/// Auto-complete every first-round bye and cascade the winners onward. Returns how many
/// matches were settled as byes.
pub fn resolve_initial_byes(bracket: &mut Bracket) -> Result<usize, BracketError> {
    let first_round: Vec<MatchId> = bracket
        .winners_rounds
        .first()
        .map(|r| r.matches.clone())
        .unwrap_or_default();
    for id in first_round {
        advance::settle_bye(bracket, id)?;
    }
    let byes = bracket.bye_count();
    log::debug!("resolved {} byes at construction", byes);
    Ok(byes)
}
