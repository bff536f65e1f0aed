#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{OptionIndex, Question, Quiz, UserContext};

    /// Builds one question per entry, options labelled "Q{n} option {k}".
    pub fn questions_with_correct(correct: &[i64]) -> Vec<Question> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &correct_option)| {
                let n = i + 1;
                Question {
                    id: n as i64,
                    title: format!("Question {}", n),
                    statement: format!("Statement {}", n),
                    options: [1, 2, 3, 4].map(|k| format!("Q{} option {}", n, k)),
                    correct_option,
                }
            })
            .collect()
    }

    pub fn answers(raw: &[Option<u8>]) -> Vec<Option<OptionIndex>> {
        raw.iter()
            .map(|a| a.and_then(OptionIndex::new))
            .collect()
    }

    pub fn test_quiz(duration_minutes: u32) -> Quiz {
        Quiz::new(1, duration_minutes)
    }

    pub fn test_user() -> UserContext {
        UserContext::new(42).with_display_name("tester")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_questions() {
        let questions = questions_with_correct(&[1, 3]);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].correct_option, 3);
        assert_eq!(questions[1].options[0], "Q2 option 1");
    }

    #[test]
    fn test_fixtures_answers_drop_invalid_options() {
        let answers = answers(&[Some(1), None, Some(7)]);
        assert_eq!(answers.iter().filter(|a| a.is_some()).count(), 1);
    }

    #[test]
    fn test_fixtures_user() {
        assert_eq!(test_user().user_id, 42);
        assert_eq!(test_quiz(2).duration_seconds(), 120);
    }
}
