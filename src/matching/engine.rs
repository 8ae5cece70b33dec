use rayon::prelude::*;

use crate::core::card::Card;
use crate::matching::card_set::{CardSet, DashJoined};
use crate::matching::classify::{group_set_types, match_group};
use crate::matching::combinations::{combination_count, PositionCombinations};
use crate::utils::diagnostics::DiagnosticSink;

/// Group size of the physical card game
pub const DEFAULT_SET_SIZE: usize = 3;

/// Options for a solve pass
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Number of cards in each group
    pub set_size: usize,
    /// Spread the search over the rayon thread pool
    pub parallel: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            set_size: DEFAULT_SET_SIZE,
            parallel: false,
        }
    }
}

impl SolveOptions {
    pub fn with_set_size(set_size: usize) -> Self {
        Self {
            set_size,
            ..Self::default()
        }
    }
}

/// Searches an ordered slice of cards for every set
pub struct SolvingEngine<'a> {
    cards: &'a [Card],
    sink: &'a dyn DiagnosticSink,
}

impl<'a> SolvingEngine<'a> {
    pub fn new(cards: &'a [Card], sink: &'a dyn DiagnosticSink) -> Self {
        Self { cards, sink }
    }

    /// Find every set of `options.set_size` cards.
    ///
    /// Results are ordered lexicographically by position, whether or not the
    /// search runs in parallel.
    pub fn find_sets(&self, options: &SolveOptions) -> Vec<CardSet> {
        let len = self.cards.len();
        let size = options.set_size;

        match combination_count(len, size) {
            Some(count) => self.sink.info(format_args!(
                "Checking {count} combinations of {size} from {len} cards"
            )),
            None => self.sink.info(format_args!(
                "Checking combinations of {size} from {len} cards"
            )),
        }

        let sets = if options.parallel && size > 0 {
            self.find_sets_parallel(size)
        } else {
            let mut group = Vec::with_capacity(size);
            PositionCombinations::new(len, size)
                .filter_map(|positions| self.evaluate(&mut group, positions))
                .collect()
        };

        self.sink
            .info(format_args!("Found {} sets of {size}", sets.len()));
        sets
    }

    /// One shard per first position. Shards are collected in index order, so
    /// flattening them gives the same order as the sequential search.
    fn find_sets_parallel(&self, size: usize) -> Vec<CardSet> {
        let len = self.cards.len();

        let shards: Vec<Vec<CardSet>> = (0..len)
            .into_par_iter()
            .map(|first| {
                let mut group = Vec::with_capacity(size);
                PositionCombinations::new(len - first - 1, size - 1)
                    .filter_map(|rest| {
                        let mut positions = Vec::with_capacity(size);
                        positions.push(first);
                        positions.extend(rest.into_iter().map(|p| p + first + 1));
                        self.evaluate(&mut group, positions)
                    })
                    .collect()
            })
            .collect();

        shards.into_iter().flatten().collect()
    }

    /// `group` is scratch space reused across calls
    fn evaluate(&self, group: &mut Vec<&'a Card>, positions: Vec<usize>) -> Option<CardSet> {
        let cards = self.cards;
        group.clear();
        group.extend(positions.iter().map(|&p| &cards[p]));

        if let Some(set_types) = group_set_types(group) {
            self.sink
                .debug(format_args!("Set is a match: {}", DashJoined(&positions)));
            let cards = group.iter().map(|&card| card.clone()).collect();
            return Some(
                CardSet::new(cards)
                    .with_positions(positions)
                    .with_set_types(set_types),
            );
        }

        // The reason is only rebuilt when debug output is kept
        if self.sink.debug_enabled() {
            if let Some(reason) = match_group(group).rejection() {
                self.sink.debug(format_args!(
                    "Set is not a match: {} ({reason})",
                    DashJoined(&positions)
                ));
            }
        }
        None
    }
}
