//! Bracket construction: validate entrants, seed, allocate, wire, resolve byes.

use crate::logic::{byes, seeding, topology, wiring};
use crate::models::{Bracket, BracketError, BracketFormat, BracketOptions, Entrant, EntrantId};
use std::collections::HashSet;

/// Build a bracket with the default limits.
pub fn build_bracket(entrants: Vec<Entrant>, format: BracketFormat) -> Result<Bracket, BracketError> {
    build_bracket_with(entrants, format, &BracketOptions::default())
}

/// Build a bracket from a finalized roster.
///
/// 1. Validate the roster against `options`.
/// 2. Seed entrants into `2^ceil(log2 N)` first-round slots.
/// 3. Allocate rounds and wire every forward edge.
/// 4. Count live sources per match and auto-complete the byes.
pub fn build_bracket_with(
    mut entrants: Vec<Entrant>,
    format: BracketFormat,
    options: &BracketOptions,
) -> Result<Bracket, BracketError> {
    validate_entrants(&entrants, options)?;
    let total_slots = seeding::slot_count(entrants.len());
    let rounds = topology::check_limits(total_slots, options)?;

    for (i, e) in entrants.iter_mut().enumerate() {
        e.seed = i as u32 + 1;
    }
    let ids: Vec<EntrantId> = entrants.iter().map(|e| e.id).collect();
    let slots = seeding::seed_slots(&ids);

    let mut bracket = Bracket::new(format, entrants, total_slots);
    topology::build_topology(&mut bracket);
    wiring::wire(&mut bracket);

    let first_round = bracket
        .winners_rounds
        .first()
        .map(|r| r.matches.clone())
        .unwrap_or_default();
    for (id, pair) in first_round.iter().zip(slots.chunks(2)) {
        if let Some(m) = bracket.matches.get_mut(id) {
            m.slot_a = pair[0];
            m.slot_b = pair.get(1).copied().flatten();
        }
    }

    byes::count_sources(&mut bracket);
    let byes = byes::resolve_initial_byes(&mut bracket)?;

    log::info!(
        "built {:?} bracket {}: {} entrants, {} slots, {} rounds, {} matches, {} byes",
        format,
        bracket.id,
        bracket.entrant_count,
        total_slots,
        rounds,
        bracket.matches.len(),
        byes
    );
    Ok(bracket)
}

/// Reject rosters that cannot form a bracket.
pub fn validate_entrants(entrants: &[Entrant], options: &BracketOptions) -> Result<(), BracketError> {
    if entrants.len() < 2 {
        return Err(BracketError::NotEnoughEntrants {
            count: entrants.len(),
        });
    }
    if entrants.len() > options.max_entrants {
        return Err(BracketError::TooManyEntrants {
            count: entrants.len(),
            max: options.max_entrants,
        });
    }
    let mut seen = HashSet::with_capacity(entrants.len());
    for (index, e) in entrants.iter().enumerate() {
        if e.name.trim().is_empty() {
            return Err(BracketError::BlankEntrantName { index });
        }
        if !seen.insert(e.id) {
            return Err(BracketError::DuplicateEntrant(e.id));
        }
        if !e.is_fresh() {
            return Err(BracketError::MalformedEntrant(e.id));
        }
    }
    Ok(())
}
