//! Partial and complete slot-to-word assignments

use crate::crossword::{Crossword, VarId, Variable, WordId};
use std::collections::BTreeMap;

/// Mapping from slot to the single word chosen for it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<VarId, WordId>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `word` to `var`, returning the word it replaces
    pub fn assign(&mut self, var: VarId, word: WordId) -> Option<WordId> {
        self.values.insert(var, word)
    }

    pub fn unassign(&mut self, var: VarId) -> Option<WordId> {
        self.values.remove(&var)
    }

    pub fn get(&self, var: VarId) -> Option<WordId> {
        self.values.get(&var).copied()
    }

    pub fn contains(&self, var: VarId) -> bool {
        self.values.contains_key(&var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Assigned pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (VarId, WordId)> + '_ {
        self.values.iter().map(|(&var, &word)| (var, word))
    }

    /// Slots and words as text, in slot order
    pub fn words<'a>(&'a self, crossword: &'a Crossword) -> impl Iterator<Item = (&'a Variable, &'a str)> + 'a {
        self.iter()
            .map(move |(var, word)| (crossword.variable(var), crossword.vocabulary().word(word)))
    }

    /// Every slot of the puzzle has a word
    pub fn is_complete(&self, crossword: &Crossword) -> bool {
        self.values.len() == crossword.variable_count()
    }

    /// Check every assigned slot against every other assigned slot
    pub fn is_consistent(&self, crossword: &Crossword) -> bool {
        self.values
            .keys()
            .all(|&var| self.is_consistent_with(crossword, var))
    }

    /// Check the word of `var` against all other assigned slots.
    ///
    /// Fails on a length mismatch, on a word already used by another slot, or
    /// on a crossing slot disagreeing at the shared cell. Slot or word ids
    /// outside the puzzle are inconsistent. An unassigned `var` is trivially
    /// consistent.
    pub fn is_consistent_with(&self, crossword: &Crossword, var: VarId) -> bool {
        let Some(word) = self.get(var) else {
            return true;
        };
        let vocabulary = crossword.vocabulary();

        if var >= crossword.variable_count() || word >= vocabulary.len() {
            return false;
        }
        if vocabulary.length(word) != crossword.variable(var).length {
            return false;
        }

        self.iter()
            .filter(|&(other, _)| other != var)
            .all(|(other, other_word)| {
                if other_word == word || other_word >= vocabulary.len() {
                    return false;
                }
                match crossword.overlap(var, other) {
                    Some(overlap) => matches!(
                        (vocabulary.letter(word, overlap.first), vocabulary.letter(other_word, overlap.second)),
                        (Some(a), Some(b)) if a == b
                    ),
                    None => true,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::fixtures;

    fn assign_words(crossword: &Crossword, pairs: &[(VarId, &str)]) -> Assignment {
        let mut assignment = Assignment::new();
        for &(var, word) in pairs {
            assignment.assign(var, crossword.vocabulary().id_of(word).unwrap());
        }
        assignment
    }

    #[test]
    fn test_completeness() {
        let crossword = fixtures::corner_pair(["CAT", "ANT"]);
        let mut assignment = Assignment::new();
        assert!(!assignment.is_complete(&crossword));

        assignment.assign(0, 1);
        assert!(!assignment.is_complete(&crossword));

        assignment.assign(1, 0);
        assert!(assignment.is_complete(&crossword));
        assert_eq!(assignment.len(), crossword.variable_count());

        assignment.unassign(0);
        assert!(!assignment.is_complete(&crossword));
    }

    #[test]
    fn test_overlap_letters_must_agree() {
        // Four-letter across slot (id 1) crosses five-letter down slot (id 0)
        // at across index 1 and down index 2
        let crossword = fixtures::long_cross(["CODE", "ABCDE", "ACODE"]);

        let clash = assign_words(&crossword, &[(1, "CODE"), (0, "ABCDE")]);
        assert!(!clash.is_consistent(&crossword));

        let agree = assign_words(&crossword, &[(1, "CODE"), (0, "ACODE")]);
        assert!(agree.is_consistent(&crossword));
    }

    #[test]
    fn test_length_mismatch_is_inconsistent() {
        let crossword = fixtures::long_cross(["CODE", "ABCDE"]);
        let assignment = assign_words(&crossword, &[(1, "ABCDE")]);

        assert!(!assignment.is_consistent(&crossword));
        assert!(!assignment.is_consistent_with(&crossword, 1));
    }

    #[test]
    fn test_word_reuse_is_inconsistent() {
        // The two across slots of the frame do not cross each other
        let crossword = fixtures::frame(["TEAM", "PART"]);
        let assignment = assign_words(&crossword, &[(0, "TEAM"), (3, "TEAM")]);
        assert!(!assignment.is_consistent(&crossword));

        let distinct = assign_words(&crossword, &[(0, "TEAM"), (3, "PART")]);
        assert!(distinct.is_consistent(&crossword));
    }

    #[test]
    fn test_every_assigned_slot_is_checked() {
        // The down slot and the bottom slot disagree (P vs M) while the top
        // slot is fine with both
        let crossword = fixtures::frame(fixtures::FRAME_WORDS);
        let assignment = assign_words(&crossword, &[(0, "TEAM"), (1, "TRAP"), (3, "MAST")]);

        assert!(!assignment.is_consistent(&crossword));
        assert!(!assignment.is_consistent_with(&crossword, 3));
    }

    #[test]
    fn test_unassigned_slot_is_trivially_consistent() {
        let crossword = fixtures::corner_pair(["CAT"]);
        assert!(Assignment::new().is_consistent(&crossword));
        assert!(Assignment::new().is_consistent_with(&crossword, 0));
    }

    #[test]
    fn test_unknown_ids_are_inconsistent() {
        let crossword = fixtures::corner_pair(["CAT", "ANT"]);

        let mut unknown_word = assign_words(&crossword, &[(0, "CAT")]);
        unknown_word.assign(1, 99);
        assert!(!unknown_word.is_consistent(&crossword));
        assert!(!unknown_word.is_consistent_with(&crossword, 0));
        assert!(!unknown_word.is_consistent_with(&crossword, 1));

        let mut unknown_slot = assign_words(&crossword, &[(0, "CAT"), (1, "ANT")]);
        unknown_slot.assign(7, 99);
        assert!(!unknown_slot.is_consistent(&crossword));
        assert!(!unknown_slot.is_consistent_with(&crossword, 7));
    }

    #[test]
    fn test_words() {
        let crossword = fixtures::corner_pair(["CAT", "ANT"]);
        let assignment = assign_words(&crossword, &[(1, "ANT"), (0, "CAT")]);
        let words: Vec<&str> = assignment.words(&crossword).map(|(_, word)| word).collect();
        assert_eq!(words, vec!["CAT", "ANT"]);
    }
}
