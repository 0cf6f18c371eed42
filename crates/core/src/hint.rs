//! Hint search - find a free triplet worth going for
//!
//! The scan walks free patterns from the top layer down. A type qualifies once the
//! holding area already has two of it, so the next pick of that type completes a
//! triplet. For the first qualifying type with at least three free patterns on the
//! table, the first three of them in deck order are returned.
//!
//! The result depends only on the deck and the holding area. `None` is a legitimate
//! dead end: layouts are not guaranteed to be solvable.

use std::collections::HashSet;

use arrayvec::ArrayVec;

use crate::layout::Deck;
use crate::pattern::PatternId;
use crate::player::Player;
use crate::types::MATCH_SIZE;

/// Three free patterns of one type
pub type Hint = [PatternId; MATCH_SIZE];

pub fn find_hint(deck: &Deck, player: &Player) -> Option<Hint> {
    let mut tried = HashSet::new();

    for id in deck.free_patterns() {
        let type_id = deck.patterns()[id.index()].type_id;
        if !tried.insert(type_id) || player.count_of(type_id) + 1 < MATCH_SIZE {
            continue;
        }

        let picks: ArrayVec<PatternId, MATCH_SIZE> = deck
            .iter()
            .filter(|(other, p)| p.type_id == type_id && deck.is_free(*other))
            .map(|(other, _)| other)
            .take(MATCH_SIZE)
            .collect();

        if let Ok(hint) = picks.into_inner() {
            return Some(hint);
        }
    }

    None
}
