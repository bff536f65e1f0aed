use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const OPTION_COUNT: usize = 4;

/// One-based index of a multiple-choice option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OptionIndex(u8);

impl OptionIndex {
    pub const ALL: [OptionIndex; OPTION_COUNT] =
        [OptionIndex(1), OptionIndex(2), OptionIndex(3), OptionIndex(4)];

    pub fn new(value: u8) -> Option<Self> {
        (1..=OPTION_COUNT as u8)
            .contains(&value)
            .then_some(OptionIndex(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn slot(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl TryFrom<u8> for OptionIndex {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        OptionIndex::new(value).ok_or_else(|| {
            AppError::InvalidSelection(format!(
                "option {} is outside 1..={}",
                value, OPTION_COUNT
            ))
        })
    }
}

impl From<OptionIndex> for u8 {
    fn from(index: OptionIndex) -> Self {
        index.0
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub statement: String,
    pub options: [String; OPTION_COUNT],
    /// Kept as delivered by the catalog; values outside 1..=4 never match an answer.
    pub correct_option: i64,
}

impl Question {
    /// Text of an option, or `None` when that slot is blank.
    pub fn option_text(&self, option: OptionIndex) -> Option<&str> {
        let text = self.options[option.slot()].as_str();
        (!text.trim().is_empty()).then_some(text)
    }

    /// Options worth offering to the user; blank slots are skipped but keep their numbering.
    pub fn offered_options(&self) -> Vec<(OptionIndex, &str)> {
        OptionIndex::ALL
            .iter()
            .filter_map(|&index| self.option_text(index).map(|text| (index, text)))
            .collect()
    }

    pub fn correct_option_index(&self) -> Option<OptionIndex> {
        u8::try_from(self.correct_option)
            .ok()
            .and_then(OptionIndex::new)
    }

    pub fn is_correct(&self, answer: Option<OptionIndex>) -> bool {
        answer.is_some_and(|selected| i64::from(selected.get()) == self.correct_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_option: i64) -> Question {
        Question {
            id: 1,
            title: "Capitals".to_string(),
            statement: "What is the capital of France?".to_string(),
            options: [
                "Berlin".to_string(),
                "Paris".to_string(),
                "".to_string(),
                "Rome".to_string(),
            ],
            correct_option,
        }
    }

    #[test]
    fn option_index_accepts_only_one_through_four() {
        assert!(OptionIndex::new(0).is_none());
        assert_eq!(OptionIndex::new(1).map(OptionIndex::get), Some(1));
        assert_eq!(OptionIndex::new(4).map(OptionIndex::get), Some(4));
        assert!(OptionIndex::new(5).is_none());
        assert!(matches!(
            OptionIndex::try_from(9),
            Err(AppError::InvalidSelection(_))
        ));
    }

    #[test]
    fn option_index_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<OptionIndex>("0").is_err());
        assert_eq!(
            serde_json::from_str::<OptionIndex>("3").ok(),
            OptionIndex::new(3)
        );
    }

    #[test]
    fn blank_options_are_not_offered_but_keep_numbering() {
        let q = question(2);
        let offered: Vec<u8> = q.offered_options().iter().map(|(i, _)| i.get()).collect();

        assert_eq!(offered, vec![1, 2, 4]);
        assert_eq!(q.option_text(OptionIndex::ALL[3]), Some("Rome"));
        assert_eq!(q.option_text(OptionIndex::ALL[2]), None);
    }

    #[test]
    fn unanswered_never_matches() {
        let q = question(2);

        assert!(!q.is_correct(None));
        assert!(q.is_correct(OptionIndex::new(2)));
        assert!(!q.is_correct(OptionIndex::new(1)));
    }

    #[test]
    fn out_of_range_correct_option_never_matches() {
        let q = question(7);

        assert!(q.correct_option_index().is_none());
        assert!(OptionIndex::ALL.iter().all(|&i| !q.is_correct(Some(i))));
    }
}
