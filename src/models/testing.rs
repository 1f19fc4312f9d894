//! Builders shared by unit tests across the crate.

use super::{Category, Difficulty, QuizOption, QuizQuestion, QuizSettings, find_topic};

/// A four-option question whose option ids are `{id}-0` .. `{id}-3`.
pub fn sample_question(id: &str, correct: usize) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        text: format!("Question {}", id),
        options: (0..4)
            .map(|i| QuizOption {
                id: format!("{}-{}", id, i),
                text: format!("Option {}", i),
                is_correct: i == correct,
            })
            .collect(),
        explanation: format!("Option {} is right", correct),
        difficulty: Difficulty::Medium,
        category: Category::Dsa,
        topic: "dsa-1".to_string(),
        template_id: None,
    }
}

pub fn sample_settings(time_per_question: u32, number_of_questions: usize) -> QuizSettings {
    let topics = vec![find_topic("dsa-1").expect("catalog has dsa-1")];
    QuizSettings::new(topics, time_per_question, Difficulty::Medium, number_of_questions)
        .expect("valid settings")
}
