//! Occlusion queries over a [`Deck`]
//!
//! Coverage is recomputed from the current `cleared` flags on every call. A pattern is
//! covered when any uncleared pattern on a strictly higher layer overlaps it with
//! positive area.

use crate::layout::Deck;
use crate::pattern::PatternId;
use crate::types::Point;

impl Deck {
    /// Whether `id` is hidden under an uncleared pattern on a higher layer
    pub fn is_covered(&self, id: PatternId) -> bool {
        let target = &self.patterns()[id.index()];
        self.layers()
            .iter()
            .skip(target.layer + 1)
            .flatten()
            .map(|other| &self.patterns()[other.index()])
            .any(|other| !other.cleared && other.overlaps(target))
    }

    /// Still on the table and not covered
    pub fn is_free(&self, id: PatternId) -> bool {
        !self.patterns()[id.index()].cleared && !self.is_covered(id)
    }

    /// The selectable pattern under `point`, searching from the top layer down
    pub fn pick(&self, point: Point) -> Option<PatternId> {
        self.layers().iter().rev().flatten().copied().find(|&id| {
            let p = &self.patterns()[id.index()];
            !p.cleared && p.contains_point(point) && !self.is_covered(id)
        })
    }

    /// All free patterns, top layer first
    pub fn free_patterns(&self) -> impl Iterator<Item = PatternId> + '_ {
        self.layers()
            .iter()
            .rev()
            .flatten()
            .copied()
            .filter(|&id| self.is_free(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;
    use crate::types::Size;

    fn pattern(type_id: u32, layer: usize, x: f64, y: f64) -> Pattern {
        let mut p = Pattern::new(type_id, Size::square(10.0));
        p.layer = layer;
        p.position = Point::new(x, y);
        p
    }

    #[test]
    fn test_higher_overlap_covers() {
        let deck = Deck::from_patterns(vec![pattern(0, 0, 0.0, 0.0), pattern(1, 1, 5.0, 5.0)]);
        assert!(deck.is_covered(PatternId(0)));
        assert!(!deck.is_covered(PatternId(1)));
    }

    #[test]
    fn test_same_layer_never_covers() {
        let deck = Deck::from_patterns(vec![pattern(0, 0, 0.0, 0.0), pattern(1, 0, 1.0, 1.0)]);
        assert!(!deck.is_covered(PatternId(0)));
        assert!(!deck.is_covered(PatternId(1)));
    }

    #[test]
    fn test_edge_contact_does_not_cover() {
        let deck = Deck::from_patterns(vec![pattern(0, 0, 0.0, 0.0), pattern(1, 1, 10.0, 0.0)]);
        assert!(!deck.is_covered(PatternId(0)));
    }

    #[test]
    fn test_cleared_pattern_stops_covering() {
        let mut deck =
            Deck::from_patterns(vec![pattern(0, 0, 0.0, 0.0), pattern(1, 2, 2.0, 2.0)]);
        assert!(deck.is_covered(PatternId(0)));

        deck.set_cleared(PatternId(1), true);
        assert!(!deck.is_covered(PatternId(0)));
        assert!(deck.is_free(PatternId(0)));
        assert!(!deck.is_free(PatternId(1)));
    }

    #[test]
    fn test_pick_prefers_top_layer() {
        let deck = Deck::from_patterns(vec![pattern(0, 0, 0.0, 0.0), pattern(1, 1, 3.0, 0.0)]);
        assert_eq!(deck.pick(Point::new(1.0, 0.0)), Some(PatternId(1)));
    }

    #[test]
    fn test_pick_skips_covered_and_cleared() {
        let mut deck =
            Deck::from_patterns(vec![pattern(0, 0, 0.0, 0.0), pattern(1, 1, 8.0, 0.0)]);

        // Visible sliver of the bottom pattern is still covered elsewhere.
        assert_eq!(deck.pick(Point::new(-4.0, 0.0)), None);

        deck.set_cleared(PatternId(1), true);
        assert_eq!(deck.pick(Point::new(-4.0, 0.0)), Some(PatternId(0)));
        assert_eq!(deck.pick(Point::new(12.0, 0.0)), None);
    }

    #[test]
    fn test_pick_misses_empty_space() {
        let deck = Deck::from_patterns(vec![pattern(0, 0, 0.0, 0.0)]);
        assert_eq!(deck.pick(Point::new(100.0, 100.0)), None);
    }
}
