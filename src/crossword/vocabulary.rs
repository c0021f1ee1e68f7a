//! Candidate words addressed by dense ids

use std::collections::BTreeSet;
use std::ops::Range;

/// Index of a word in the [`Vocabulary`]
pub type WordId = usize;

/// Normalized, sorted, duplicate-free word list.
///
/// Words are trimmed and upper-cased; blank entries are dropped. Letters are
/// compared as `char`s, so a word's length is its `char` count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
    letters: Vec<Vec<char>>,
}

impl Vocabulary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let letters = words.iter().map(|word| word.chars().collect()).collect();

        Self { words, letters }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn ids(&self) -> Range<WordId> {
        0..self.words.len()
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    /// Length of a word in letters
    pub fn length(&self, id: WordId) -> usize {
        self.letters[id].len()
    }

    /// Letter at position `index`, if the word is long enough
    pub fn letter(&self, id: WordId, index: usize) -> Option<char> {
        self.letters[id].get(index).copied()
    }

    /// Look up a word after normalizing it the same way as the list
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        let normalized = word.trim().to_uppercase();
        self.words.binary_search(&normalized).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &str)> {
        self.words.iter().enumerate().map(|(id, word)| (id, word.as_str()))
    }
}
