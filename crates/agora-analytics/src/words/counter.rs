use std::cmp::Ordering;
use std::collections::HashMap;

use super::stopwords::is_stop_word;
use super::text::{clean_text, tokenize};

/// Accumulates weighted word frequencies.
#[derive(Debug, Clone)]
pub struct WordCounter {
    locales: Vec<String>,
    min_word_length: usize,
    weights: HashMap<String, f64>,
}

impl WordCounter {
    pub fn new(locales: Vec<String>, min_word_length: usize) -> Self {
        Self {
            locales,
            min_word_length,
            weights: HashMap::new(),
        }
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Strip markup from `text` and add `weight` for every kept word.
    pub fn add_text(&mut self, text: &str, weight: f64) {
        if weight <= 0.0 {
            return;
        }
        let cleaned = clean_text(text);
        for word in tokenize(&cleaned, self.min_word_length) {
            if is_stop_word(&word, &self.locales) {
                continue;
            }
            *self.weights.entry(word).or_insert(0.0) += weight;
        }
    }

    pub fn weight(&self, word: &str) -> f64 {
        self.weights.get(word).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The `n` heaviest words, ties broken alphabetically.
    pub fn best(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<(&String, f64)> = self.weights.iter().map(|(w, &v)| (w, v)).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked.into_iter().take(n).map(|(w, _)| w.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> WordCounter {
        WordCounter::new(vec!["en".to_string()], 3)
    }

    #[test]
    fn weights_accumulate() {
        let mut c = counter();
        c.add_text("Solar panels", 2.0);
        c.add_text("<p>solar power</p>", 0.5);
        assert_eq!(c.weight("solar"), 2.5);
        assert_eq!(c.weight("panels"), 2.0);
        assert_eq!(c.weight("power"), 0.5);
    }

    #[test]
    fn stop_words_and_short_words_are_dropped() {
        let mut c = counter();
        c.add_text("The bus is on time", 1.0);
        assert_eq!(c.best(10), vec!["bus", "time"]);
    }

    #[test]
    fn best_breaks_ties_alphabetically() {
        let mut c = counter();
        c.add_text("zebra apple mango", 1.0);
        c.add_text("mango", 1.0);
        assert_eq!(c.best(2), vec!["mango", "apple"]);
        assert_eq!(c.best(10).len(), 3);
    }

    #[test]
    fn zero_weight_adds_nothing() {
        let mut c = counter();
        c.add_text("ignored entirely", 0.0);
        assert!(c.is_empty());
    }
}
