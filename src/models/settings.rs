use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::question::Difficulty;
use super::topic::Topic;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Please select at least one topic")]
    NoTopics,

    #[error("Time per question must be greater than zero")]
    ZeroTime,

    #[error("Number of questions must be greater than zero")]
    ZeroQuestions,
}

/// Quiz configuration handed from the setup screen to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    /// Ordered, non-empty.
    pub selected_topics: Vec<Topic>,
    /// Seconds per question.
    pub time_per_question: u32,
    pub difficulty: Difficulty,
    pub number_of_questions: usize,
}

impl QuizSettings {
    pub fn new(
        selected_topics: Vec<Topic>,
        time_per_question: u32,
        difficulty: Difficulty,
        number_of_questions: usize,
    ) -> Result<Self, SettingsError> {
        if selected_topics.is_empty() {
            return Err(SettingsError::NoTopics);
        }
        if time_per_question == 0 {
            return Err(SettingsError::ZeroTime);
        }
        if number_of_questions == 0 {
            return Err(SettingsError::ZeroQuestions);
        }

        Ok(Self {
            selected_topics,
            time_per_question,
            difficulty,
            number_of_questions,
        })
    }

    pub fn topic_names(&self) -> Vec<&str> {
        self.selected_topics.iter().map(|t| t.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, find_topic};

    #[test]
    fn test_settings_validation() {
        let arrays = find_topic("dsa-1").unwrap();

        assert_eq!(
            QuizSettings::new(vec![], 30, Difficulty::Easy, 5),
            Err(SettingsError::NoTopics)
        );
        assert_eq!(
            QuizSettings::new(vec![arrays.clone()], 0, Difficulty::Easy, 5),
            Err(SettingsError::ZeroTime)
        );
        assert_eq!(
            QuizSettings::new(vec![arrays.clone()], 30, Difficulty::Easy, 0),
            Err(SettingsError::ZeroQuestions)
        );

        let settings = QuizSettings::new(vec![arrays], 30, Difficulty::Easy, 5).unwrap();
        assert_eq!(settings.selected_topics[0].category, Category::Dsa);
        assert_eq!(settings.topic_names(), vec!["Arrays"]);
    }
}
