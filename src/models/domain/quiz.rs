use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Quiz metadata needed to run an attempt.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: i64,
    pub duration_minutes: u32,
    pub chapter_name: Option<String>,
    pub subject_name: Option<String>,
    pub date_of_quiz: Option<NaiveDate>,
    pub remarks: Option<String>,
}

impl Quiz {
    pub fn new(id: i64, duration_minutes: u32) -> Self {
        Quiz {
            id,
            duration_minutes,
            chapter_name: None,
            subject_name: None,
            date_of_quiz: None,
            remarks: None,
        }
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_minutes.saturating_mul(60)
    }

    /// "Subject / Chapter" when the catalog supplied them.
    pub fn display_name(&self) -> String {
        match (&self.subject_name, &self.chapter_name) {
            (Some(subject), Some(chapter)) => format!("{} / {}", subject, chapter),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => format!("Quiz #{}", self.id),
        }
    }
}
