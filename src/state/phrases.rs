//! Phrase supply.
//!
//! Phrase content lives outside this crate; rounds only need something that
//! hands out the next phrase.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A puzzle phrase. Never changes once a round uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub category: String,
    pub text: String,
}

impl Phrase {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Source of round phrases.
pub trait PhraseSource: Send {
    fn next_phrase(&mut self) -> Phrase;
}

/// Shuffled deck of phrases, reshuffled whenever it runs out.
#[derive(Debug)]
pub struct PhraseDeck {
    phrases: Vec<Phrase>,
    order: Vec<usize>,
    rng: StdRng,
}

impl PhraseDeck {
    /// Build a deck. An empty list falls back to [`fallback_phrases`].
    pub fn new(phrases: Vec<Phrase>) -> Self {
        Self::with_rng(phrases, StdRng::from_entropy())
    }

    pub fn with_seed(phrases: Vec<Phrase>, seed: u64) -> Self {
        Self::with_rng(phrases, StdRng::seed_from_u64(seed))
    }

    fn with_rng(phrases: Vec<Phrase>, rng: StdRng) -> Self {
        let phrases = if phrases.is_empty() {
            fallback_phrases()
        } else {
            phrases
        };
        Self {
            phrases,
            order: Vec::new(),
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    fn refill(&mut self) {
        self.order = (0..self.phrases.len()).collect();
        self.order.shuffle(&mut self.rng);
    }
}

impl PhraseSource for PhraseDeck {
    fn next_phrase(&mut self) -> Phrase {
        if self.order.is_empty() {
            self.refill();
        }
        // refill always leaves at least one index: the deck is never empty
        let idx = self.order.pop().unwrap_or(0);
        self.phrases[idx].clone()
    }
}

/// Phrases a fresh server can play with before any are configured.
pub fn fallback_phrases() -> Vec<Phrase> {
    vec![
        Phrase::new("PROVERBIO", "CHI DORME NON PIGLIA PESCI"),
        Phrase::new("LUOGO", "LA CASA DEGLI ZII"),
        Phrase::new("MODO DI DIRE", "ACQUA IN BOCCA!"),
        Phrase::new("FILM", "LA VITA È BELLA"),
        Phrase::new("CUCINA", "UN PO' D'OLIO"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_deck_deals_each_phrase_once_per_cycle() {
        let phrases = vec![
            Phrase::new("A", "UNO"),
            Phrase::new("B", "DUE"),
            Phrase::new("C", "TRE"),
        ];
        let mut deck = PhraseDeck::with_seed(phrases, 42);

        let first: HashSet<String> = (0..3).map(|_| deck.next_phrase().text).collect();
        assert_eq!(first.len(), 3);

        let second: HashSet<String> = (0..3).map(|_| deck.next_phrase().text).collect();
        assert_eq!(second, first);
    }

    #[test]
    fn test_empty_deck_uses_fallback() {
        let mut deck = PhraseDeck::with_seed(Vec::new(), 1);
        assert_eq!(deck.len(), fallback_phrases().len());
        assert!(!deck.next_phrase().text.is_empty());
    }
}
