//! Layout module - deals the deck and stacks it into layers
//!
//! Dealing happens in three steps:
//!
//! 1. Round the requested count up to a multiple of [`MATCH_SIZE`] and build one
//!    triplet per group, cycling through the available type ids.
//! 2. Shuffle the whole deck.
//! 3. Cut the shuffled deck into `layer_count` contiguous slices (the last layer also
//!    takes any remainder) and scatter each pattern around the centre of the play area.
//!
//! Layers are fixed for the lifetime of a session; only the `cleared` flags change.

use tracing::debug;

use crate::error::ConfigError;
use crate::pattern::{Pattern, PatternId};
use crate::rng::SimpleRng;
use crate::types::{LevelConfig, PlayArea, Point, MATCH_SIZE, SPREAD_FACTOR};

/// Reject configurations that cannot produce a playable session.
pub fn validate(config: &LevelConfig) -> Result<(), ConfigError> {
    if config.pattern_types == 0 {
        return Err(ConfigError::ZeroPatternTypes);
    }
    if config.total_patterns == 0 {
        return Err(ConfigError::ZeroTotalPatterns);
    }
    if config.layer_count == 0 {
        return Err(ConfigError::ZeroLayers);
    }
    if config.storage_limit == 0 {
        return Err(ConfigError::ZeroStorage);
    }
    if config.time_limit_secs == 0 {
        return Err(ConfigError::ZeroTimeLimit);
    }
    Ok(())
}

/// Deck size after rounding up to a whole number of triplets
pub fn padded_total(total_patterns: u32) -> usize {
    let total = total_patterns as usize;
    total.div_ceil(MATCH_SIZE) * MATCH_SIZE
}

/// Unshuffled type ids: triplet `i` gets type `i % pattern_types`.
pub fn deal_type_ids(pattern_types: u32, total_patterns: u32) -> Vec<u32> {
    let total = padded_total(total_patterns);
    (0..total / MATCH_SIZE)
        .flat_map(|group| [group as u32 % pattern_types; MATCH_SIZE])
        .collect()
}

/// All patterns of a session plus their layer grouping
#[derive(Debug, Clone)]
pub struct Deck {
    patterns: Vec<Pattern>,
    /// `layers[i]` lists the patterns on layer `i`, bottom first
    layers: Vec<Vec<PatternId>>,
}

impl Deck {
    /// Deal a fresh deck for `config` into `area`.
    pub fn generate(
        config: &LevelConfig,
        area: PlayArea,
        rng: &mut SimpleRng,
    ) -> Result<Self, ConfigError> {
        validate(config)?;

        let mut type_ids = deal_type_ids(config.pattern_types, config.total_patterns);
        rng.shuffle(&mut type_ids);

        let size = area.token_size();
        let mut patterns: Vec<Pattern> = type_ids
            .into_iter()
            .map(|type_id| Pattern::new(type_id, size))
            .collect();

        let layer_count = config.layer_count as usize;
        let per_layer = patterns.len() / layer_count;
        let center = area.center();
        let max_offset = size.width * SPREAD_FACTOR;

        let mut layers = Vec::with_capacity(layer_count);
        for layer in 0..layer_count {
            let start = layer * per_layer;
            let end = if layer + 1 == layer_count {
                patterns.len()
            } else {
                start + per_layer
            };

            let mut members = Vec::with_capacity(end - start);
            for index in start..end {
                let p = &mut patterns[index];
                p.layer = layer;
                p.position = Point::new(
                    center.x + rng.uniform(-max_offset, max_offset),
                    center.y + rng.uniform(-max_offset, max_offset),
                );
                members.push(PatternId(index));
            }
            layers.push(members);
        }

        debug!(
            patterns = patterns.len(),
            layers = layer_count,
            per_layer,
            seed = rng.seed(),
            "dealt deck"
        );

        Ok(Self { patterns, layers })
    }

    /// Build a deck from hand-placed patterns, grouping by each pattern's `layer`.
    ///
    /// Useful for fixtures where exact positions matter.
    pub fn from_patterns(patterns: Vec<Pattern>) -> Self {
        let layer_count = patterns.iter().map(|p| p.layer + 1).max().unwrap_or(0);
        let mut layers = vec![Vec::new(); layer_count];
        for (index, p) in patterns.iter().enumerate() {
            layers[p.layer].push(PatternId(index));
        }
        Self { patterns, layers }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn layers(&self) -> &[Vec<PatternId>] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id.0)
    }

    /// Iterate over `(id, pattern)` pairs in deck order
    pub fn iter(&self) -> impl Iterator<Item = (PatternId, &Pattern)> {
        self.patterns
            .iter()
            .enumerate()
            .map(|(i, p)| (PatternId(i), p))
    }

    /// Number of patterns still on the table
    pub fn remaining(&self) -> usize {
        self.patterns.iter().filter(|p| !p.cleared).count()
    }

    pub fn all_cleared(&self) -> bool {
        self.patterns.iter().all(|p| p.cleared)
    }

    pub(crate) fn set_cleared(&mut self, id: PatternId, cleared: bool) {
        self.patterns[id.0].cleared = cleared;
    }

    pub(crate) fn patterns_mut(&mut self) -> &mut [Pattern] {
        &mut self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pattern_types: u32, total_patterns: u32, layer_count: u32) -> LevelConfig {
        LevelConfig {
            pattern_types,
            total_patterns,
            layer_count,
            time_limit_secs: 60,
            hint_limit: 3,
            undo_limit: 3,
            storage_limit: 7,
        }
    }

    #[test]
    fn test_padded_total() {
        assert_eq!(padded_total(30), 30);
        assert_eq!(padded_total(31), 33);
        assert_eq!(padded_total(1), 3);
    }

    #[test]
    fn test_deal_type_ids_cycles_types() {
        let ids = deal_type_ids(2, 12);
        assert_eq!(ids, vec![0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_per_type_counts_are_multiples_of_three() {
        let mut rng = SimpleRng::new(42);
        let deck = Deck::generate(&config(7, 40, 5), PlayArea::default(), &mut rng).unwrap();
        assert_eq!(deck.len(), 42);

        let mut counts: HashMap<u32, usize> = HashMap::new();
        for p in deck.patterns() {
            *counts.entry(p.type_id).or_default() += 1;
        }
        assert!(counts.values().all(|c| c % MATCH_SIZE == 0));
    }

    #[test]
    fn test_remainder_goes_to_last_layer() {
        let mut rng = SimpleRng::new(5);
        let deck = Deck::generate(&config(3, 30, 4), PlayArea::default(), &mut rng).unwrap();

        let sizes: Vec<usize> = deck.layers().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![7, 7, 7, 9]);
        assert_eq!(sizes.iter().sum::<usize>(), deck.len());
    }

    #[test]
    fn test_layer_field_matches_group() {
        let mut rng = SimpleRng::new(11);
        let deck = Deck::generate(&config(5, 30, 3), PlayArea::default(), &mut rng).unwrap();
        for (layer, members) in deck.layers().iter().enumerate() {
            for id in members {
                assert_eq!(deck.get(*id).unwrap().layer, layer);
            }
        }
    }

    #[test]
    fn test_positions_stay_within_spread() {
        let area = PlayArea::default();
        let mut rng = SimpleRng::new(8);
        let deck = Deck::generate(&config(5, 30, 3), area, &mut rng).unwrap();

        let max = area.token_size().width * SPREAD_FACTOR;
        let c = area.center();
        for p in deck.patterns() {
            assert!((p.position.x - c.x).abs() <= max);
            assert!((p.position.y - c.y).abs() <= max);
            assert_eq!(p.size, area.token_size());
            assert!(!p.cleared);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let cfg = config(5, 30, 3);
        let a = Deck::generate(&cfg, PlayArea::default(), &mut SimpleRng::new(77)).unwrap();
        let b = Deck::generate(&cfg, PlayArea::default(), &mut SimpleRng::new(77)).unwrap();
        assert_eq!(a.patterns(), b.patterns());
    }

    #[test]
    fn test_rejects_zero_counts() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(
            Deck::generate(&config(0, 30, 3), PlayArea::default(), &mut rng).unwrap_err(),
            ConfigError::ZeroPatternTypes
        );
        assert_eq!(
            Deck::generate(&config(5, 0, 3), PlayArea::default(), &mut rng).unwrap_err(),
            ConfigError::ZeroTotalPatterns
        );
        assert_eq!(
            Deck::generate(&config(5, 30, 0), PlayArea::default(), &mut rng).unwrap_err(),
            ConfigError::ZeroLayers
        );
    }

    #[test]
    fn test_more_layers_than_patterns() {
        let mut rng = SimpleRng::new(2);
        let deck = Deck::generate(&config(1, 3, 5), PlayArea::default(), &mut rng).unwrap();
        assert_eq!(deck.layer_count(), 5);
        assert_eq!(deck.layers()[4].len(), 3);
        assert!(deck.layers()[..4].iter().all(Vec::is_empty));
    }

    #[test]
    fn test_from_patterns_groups_by_layer() {
        let size = PlayArea::default().token_size();
        let mut top = Pattern::new(1, size);
        top.layer = 2;
        let deck = Deck::from_patterns(vec![Pattern::new(0, size), top]);
        assert_eq!(deck.layer_count(), 3);
        assert_eq!(deck.layers()[0], vec![PatternId(0)]);
        assert!(deck.layers()[1].is_empty());
        assert_eq!(deck.layers()[2], vec![PatternId(1)]);
    }
}
