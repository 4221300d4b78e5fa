//! Seeding: order entrants into first-round slots, padding with byes to a power of two.

/// Up to this many entrants are seeded in plain input order.
pub const LADDER_THRESHOLD: usize = 8;

/// Slots needed for `entrants` entrants: the next power of two, at least 2.
pub fn slot_count(entrants: usize) -> usize {
    entrants.max(2).next_power_of_two()
}

/// Place entrants into a slot array of length [`slot_count`]; `None` marks a bye.
///
/// Small fields fill the first-round matches in input order: the first `N - S/2` matches
/// get two entrants and the rest get one each, so byes sit at the end and no match is
/// left empty. Larger fields use the ladder from [`ladder_order`].
pub fn seed_slots<T: Copy>(entrants: &[T]) -> Vec<Option<T>> {
    let slots = slot_count(entrants.len());
    let mut out = vec![None; slots];

    if entrants.len() <= LADDER_THRESHOLD {
        let matches = slots / 2;
        let full = entrants.len().saturating_sub(matches);
        let mut next = entrants.iter().copied();
        for m in 0..matches {
            out[2 * m] = next.next();
            if m < full {
                out[2 * m + 1] = next.next();
            }
        }
    } else {
        for (entrant, slot) in entrants.iter().zip(ladder_order(slots)) {
            out[slot] = Some(*entrant);
        }
    }
    out
}

/// Slot fill order for ladder seeding: first slot, last slot, middle, middle + 1, then
/// alternately the next free slot from the left edge and from the right edge.
pub fn ladder_order(slots: usize) -> Vec<usize> {
    // Anchors would collide below 8 slots.
    if slots < 8 {
        return (0..slots).collect();
    }
    let middle = slots / 2;
    let mut order = vec![0, slots - 1, middle, middle + 1];
    let mut taken = vec![false; slots];
    for &s in &order {
        taken[s] = true;
    }

    // Every free slot stays inside [left, right].
    let (mut left, mut right) = (1, slots - 2);
    let mut from_left = true;
    while order.len() < slots {
        let slot = if from_left {
            while taken[left] {
                left += 1;
            }
            left
        } else {
            while taken[right] {
                right -= 1;
            }
            right
        };
        taken[slot] = true;
        order.push(slot);
        from_left = !from_left;
    }
    order
}
