//! Integration tests for double elimination: shape, loser routing, grand final and reset.

use elimination_bracket::{
    apply_result, build_bracket, play_random_match, Bracket, BracketFormat, BracketSide, Entrant,
    EntrantId, MatchId, ELIMINATION_LOSSES,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn roster(names: &[&str]) -> Vec<Entrant> {
    names.iter().map(|n| Entrant::new(*n)).collect()
}

fn double(n: usize) -> Bracket {
    let entrants = (1..=n).map(|i| Entrant::new(format!("T{i}"))).collect();
    build_bracket(entrants, BracketFormat::DoubleElimination).unwrap()
}

fn id_of(bracket: &Bracket, name: &str) -> EntrantId {
    bracket.entrants.iter().find(|e| e.name == name).unwrap().id
}

fn losses(bracket: &Bracket, id: EntrantId) -> u32 {
    bracket.entrant(id).unwrap().losses
}

/// Four entrants played up to the grand final: A unbeaten, B through the losers side.
fn four_to_grand_final() -> (Bracket, [EntrantId; 4]) {
    let mut b = build_bracket(roster(&["A", "B", "C", "D"]), BracketFormat::DoubleElimination)
        .unwrap();
    let ids = [id_of(&b, "A"), id_of(&b, "B"), id_of(&b, "C"), id_of(&b, "D")];
    let [a, bb, c, d] = ids;

    apply_result(&mut b, &MatchId::winners(0, 0), a).unwrap();
    apply_result(&mut b, &MatchId::winners(0, 1), c).unwrap();
    let first_drop = b.get_match(&MatchId::losers(0, 0)).unwrap();
    assert_eq!((first_drop.slot_a, first_drop.slot_b), (Some(bb), Some(d)));

    let out = apply_result(&mut b, &MatchId::losers(0, 0), bb).unwrap();
    assert_eq!(out.eliminated, Some(d));
    assert_eq!(losses(&b, bb), 1);
    assert_eq!(losses(&b, d), 2);
    assert!(b.entrant(d).unwrap().eliminated);

    apply_result(&mut b, &MatchId::winners(1, 0), a).unwrap();
    let losers_final = b.get_match(&MatchId::losers(1, 0)).unwrap();
    assert!(losers_final.has_entrant(bb) && losers_final.has_entrant(c));

    let out = apply_result(&mut b, &MatchId::losers(1, 0), bb).unwrap();
    assert_eq!(out.eliminated, Some(c));

    let gf = b.get_match(&MatchId::grand_final()).unwrap();
    assert_eq!((gf.slot_a, gf.slot_b), (Some(a), Some(bb)));
    assert!(gf.is_ready());
    (b, ids)
}

#[test]
fn shape_has_two_trees_and_both_finals() {
    let b = double(8);
    let winners: Vec<usize> = b.winners_rounds.iter().map(|r| r.matches.len()).collect();
    let losers: Vec<usize> = b.losers_rounds.iter().map(|r| r.matches.len()).collect();
    assert_eq!(winners, vec![4, 2, 1]);
    assert_eq!(losers, vec![2, 2, 1, 1]);
    assert_eq!(b.grand_final, Some(MatchId::grand_final()));
    assert_eq!(b.reset_match, Some(MatchId::reset()));
    assert_eq!(b.matches.len(), 7 + 6 + 2);

    let names: Vec<&str> = b.losers_rounds.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Losers Round 1", "Losers Round 2", "Losers Semifinal", "Losers Final"]
    );
    assert_eq!(b.round_name(&MatchId::winners(2, 0)), Some("Winners Final"));
    assert_eq!(b.round_name(&MatchId::grand_final()), Some("Grand Final"));
    assert_eq!(b.round_name(&MatchId::reset()), Some("Grand Final Reset"));
}

#[test]
fn every_winners_match_drops_its_loser() {
    let b = double(16);
    for round in &b.winners_rounds {
        for id in &round.matches {
            let m = b.get_match(id).unwrap();
            let to = m.loser_next.expect("winners matches drop their loser");
            assert_eq!(to.side, BracketSide::Losers);
        }
    }
    for round in &b.losers_rounds {
        for id in &round.matches {
            assert!(b.get_match(id).unwrap().loser_next.is_none());
        }
    }
    let winners_final = b.get_match(&MatchId::winners(3, 0)).unwrap();
    assert_eq!(winners_final.winner_next, Some(MatchId::grand_final()));
    assert_eq!(winners_final.loser_next, Some(MatchId::losers(5, 0)));
    assert_eq!(
        b.get_match(&MatchId::losers(5, 0)).unwrap().winner_next,
        Some(MatchId::grand_final())
    );
    let gf = b.get_match(&MatchId::grand_final()).unwrap();
    assert_eq!(gf.winner_next, Some(MatchId::reset()));
    assert_eq!(gf.loser_next, Some(MatchId::reset()));
}

#[test]
fn grand_final_won_by_the_unbeaten_side_ends_the_bracket() {
    let (mut b, [a, bb, _, _]) = four_to_grand_final();
    let out = apply_result(&mut b, &MatchId::grand_final(), a).unwrap();
    assert!(out.terminal);
    assert!(!out.reset_activated);
    assert_eq!(out.eliminated, Some(bb));
    assert!(!b.reset_activated());
    assert!(b.is_complete());
    assert_eq!(b.champion().map(|e| e.id), Some(a));
    assert_eq!(b.runner_up().map(|e| e.id), Some(bb));
    assert!(b.ready_matches().is_empty());
}

#[test]
fn grand_final_lost_by_the_unbeaten_side_activates_the_reset() {
    let (mut b, [a, bb, _, _]) = four_to_grand_final();
    let out = apply_result(&mut b, &MatchId::grand_final(), bb).unwrap();
    assert!(out.reset_activated);
    assert!(!out.terminal);
    assert_eq!(out.eliminated, None);
    assert_eq!(losses(&b, a), 1);
    assert!(b.reset_activated());
    assert!(!b.is_complete());
    assert!(b.champion().is_none());
    assert_eq!(b.final_match_id(), Some(MatchId::reset()));

    let reset = b.get_match(&MatchId::reset()).unwrap();
    assert_eq!((reset.slot_a, reset.slot_b), (Some(a), Some(bb)));
    let ready: Vec<MatchId> = b.ready_matches().iter().map(|m| m.id).collect();
    assert_eq!(ready, vec![MatchId::reset()]);

    let out = apply_result(&mut b, &MatchId::reset(), bb).unwrap();
    assert!(out.terminal);
    assert_eq!(out.eliminated, Some(a));
    assert_eq!(b.champion().map(|e| e.id), Some(bb));
    assert_eq!(losses(&b, a), ELIMINATION_LOSSES);
}

#[test]
fn two_entrants_meet_twice_at_least() {
    let mut b = double(2);
    let (t1, t2) = (id_of(&b, "T1"), id_of(&b, "T2"));
    apply_result(&mut b, &MatchId::winners(0, 0), t1).unwrap();

    // The only losers match has one source and passes the loser straight through.
    let bye = b.get_match(&MatchId::losers(0, 0)).unwrap();
    assert!(bye.is_bye && bye.completed);
    let gf = b.get_match(&MatchId::grand_final()).unwrap();
    assert_eq!((gf.slot_a, gf.slot_b), (Some(t1), Some(t2)));

    apply_result(&mut b, &MatchId::grand_final(), t1).unwrap();
    assert_eq!(b.champion().map(|e| e.id), Some(t1));
}

#[test]
fn random_play_never_exceeds_two_losses() {
    for n in 2..=20 {
        for seed in 0..4u64 {
            let mut rng = StdRng::seed_from_u64(seed * 1000 + n as u64);
            let mut b = double(n);
            let mut played = 0u32;
            while play_random_match(&mut b, &mut rng).unwrap().is_some() {
                played += 1;
                for e in &b.entrants {
                    assert!(e.losses <= ELIMINATION_LOSSES, "{} has {} losses", e.name, e.losses);
                    assert_eq!(e.eliminated, e.losses == ELIMINATION_LOSSES);
                }
                for m in b.all_matches().into_iter().filter(|m| !m.completed) {
                    for id in m.entrants() {
                        assert!(!b.entrant(id).unwrap().eliminated, "{} seats an eliminated entrant", m.id);
                    }
                }
            }

            assert!(b.is_complete(), "n={n} seed={seed}");
            let champion = b.champion().unwrap();
            assert!(!champion.eliminated);
            assert_eq!(played, 2 * (n as u32 - 1) + champion.losses);
            assert_eq!(b.entrants.iter().filter(|e| !e.eliminated).count(), 1);
            for m in b.all_matches() {
                let dormant_reset = m.id == MatchId::reset() && !b.reset_activated();
                assert!(m.completed || m.is_void() || dormant_reset, "{} left open", m.id);
            }
        }
    }
}
