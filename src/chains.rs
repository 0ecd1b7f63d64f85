use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{GameError, Result};

/// Chains shipped with the game. Every chain reads as a run of compound words.
pub const BUILTIN_CHAINS: &[&[&str]] = &[
    &["HOT", "DOG", "HOUSE", "BOAT"],
    &["PAPER", "PLANE", "TICKET", "OFFICE"],
    &["ICE", "CREAM", "SODA", "POP"],
    &["RAIN", "BOW", "TIE", "BREAKER"],
    &["SWIMMING", "POOL", "TABLE", "TENNIS"],
    &["CREDIT", "CARD", "GAME", "NIGHT"],
    &["CHOP", "STICK", "FIGURE", "SKATER"],
    &["BOOK", "SHELF", "LIFE", "GUARD"],
];

/// Ordered words of one puzzle. The first and last entries are anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChain {
    words: Vec<String>,
}

impl WordChain {
    /// Builds a chain, uppercasing every word. Needs at least three non-empty words.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .collect();

        if words.len() < 3 {
            return Err(GameError::InvalidChain {
                chain: words,
                reason: "a chain needs two anchors and at least one word to guess".to_string(),
            });
        }
        if words.iter().any(|w| w.is_empty()) {
            return Err(GameError::InvalidChain {
                chain: words,
                reason: "empty word".to_string(),
            });
        }

        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed chain; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, idx: usize) -> Option<&str> {
        self.words.get(idx).map(String::as_str)
    }

    pub fn last_index(&self) -> usize {
        self.words.len() - 1
    }

    pub fn is_anchor(&self, idx: usize) -> bool {
        idx == 0 || idx == self.last_index()
    }
}

pub fn builtin_chains() -> Vec<WordChain> {
    BUILTIN_CHAINS
        .iter()
        .filter_map(|words| WordChain::new(words.iter()).ok())
        .collect()
}

/// Hands out chains in a shuffled order, reshuffling once every chain has been played.
#[derive(Debug)]
pub struct ChainDeck<R: Rng = StdRng> {
    chains: Vec<WordChain>,
    order: Vec<usize>,
    cursor: usize,
    rng: R,
}

impl ChainDeck<StdRng> {
    pub fn new(chains: Vec<WordChain>) -> Result<Self> {
        Self::with_rng(chains, StdRng::from_entropy())
    }

    pub fn builtin() -> Result<Self> {
        Self::new(builtin_chains())
    }
}

impl<R: Rng> ChainDeck<R> {
    pub fn with_rng(chains: Vec<WordChain>, mut rng: R) -> Result<Self> {
        if chains.is_empty() {
            return Err(GameError::InvalidChain {
                chain: Vec::new(),
                reason: "the chain set is empty".to_string(),
            });
        }
        let mut order: Vec<usize> = (0..chains.len()).collect();
        order.shuffle(&mut rng);
        Ok(Self {
            chains,
            order,
            cursor: 0,
            rng,
        })
    }

    /// The chain at the current position of the shuffle order.
    pub fn current(&self) -> &WordChain {
        &self.chains[self.order[self.cursor]]
    }

    /// Moves to the next chain, starting a freshly shuffled pass when the current one is used up.
    pub fn advance(&mut self) -> &WordChain {
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            self.reshuffle();
        }
        self.current()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    fn reshuffle(&mut self) {
        let just_played = self.order.last().copied();
        self.order.shuffle(&mut self.rng);
        // keep the chain that was just played from coming straight back
        if self.order.len() > 1 && self.order.first().copied() == just_played {
            let swap_with = self.rng.gen_range(1..self.order.len());
            self.order.swap(0, swap_with);
        }
        self.cursor = 0;
        tracing::debug!(order = ?self.order, "reshuffled chain set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashSet;

    fn seeded(chains: Vec<WordChain>, seed: u64) -> ChainDeck {
        ChainDeck::with_rng(chains, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn chain_uppercases_and_trims() {
        let chain = WordChain::new(["hot ", "Dog", "house"]).unwrap();
        assert_eq!(chain.words(), ["HOT", "DOG", "HOUSE"]);
        assert_eq!(chain.last_index(), 2);
        assert!(chain.is_anchor(0));
        assert!(chain.is_anchor(2));
        assert!(!chain.is_anchor(1));
    }

    #[test]
    fn chain_needs_three_words() {
        assert_matches!(
            WordChain::new(["HOT", "DOG"]),
            Err(GameError::InvalidChain { .. })
        );
    }

    #[test]
    fn chain_rejects_empty_words() {
        assert_matches!(
            WordChain::new(["HOT", "  ", "DOG"]),
            Err(GameError::InvalidChain { .. })
        );
    }

    #[test]
    fn builtin_chains_are_all_valid() {
        assert_eq!(builtin_chains().len(), BUILTIN_CHAINS.len());
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert_matches!(
            ChainDeck::with_rng(Vec::new(), StdRng::seed_from_u64(1)),
            Err(GameError::InvalidChain { .. })
        );
    }

    #[test]
    fn deck_plays_every_chain_once_per_pass() {
        let mut deck = seeded(builtin_chains(), 42);
        let n = deck.len();

        for _pass in 0..3 {
            let mut seen = HashSet::new();
            seen.insert(deck.current().words().join(" "));
            for _ in 1..n {
                seen.insert(deck.advance().words().join(" "));
            }
            assert_eq!(seen.len(), n, "every chain should appear exactly once per pass");
            deck.advance();
        }
    }

    #[test]
    fn reshuffle_does_not_repeat_last_chain_immediately() {
        let chains = vec![
            WordChain::new(["A", "B", "C"]).unwrap(),
            WordChain::new(["D", "E", "F"]).unwrap(),
        ];
        for seed in 0..50 {
            let mut deck = seeded(chains.clone(), seed);
            for _ in 0..20 {
                let before = deck.current().clone();
                let after = deck.advance().clone();
                assert_ne!(before, after, "seed {seed} repeated a chain back to back");
            }
        }
    }

    #[test]
    fn single_chain_deck_keeps_returning_it() {
        let chain = WordChain::new(["HOT", "DOG", "HOUSE", "BOAT"]).unwrap();
        let mut deck = seeded(vec![chain.clone()], 7);
        assert_eq!(deck.current(), &chain);
        assert_eq!(deck.advance(), &chain);
        assert_eq!(deck.advance(), &chain);
    }
}
