use std::fmt;

use serde::{Deserialize, Serialize};

use super::topic::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The next difficulty, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

/// A single multiple-choice question.
///
/// Exactly one option is expected to be correct. Producers guarantee it,
/// consumers do not re-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub category: Category,
    /// Topic id the question was filed under.
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl QuizQuestion {
    pub fn option(&self, id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_json_layout() {
        let json = r#"{
            "id": "8",
            "text": "How many days together?",
            "options": [
                { "id": "8a", "text": "5 days", "isCorrect": false },
                { "id": "8b", "text": "6 days", "isCorrect": true }
            ],
            "explanation": "1/10 + 1/15 = 1/6",
            "difficulty": "medium",
            "category": "aptitude",
            "topic": "aptitude-7"
        }"#;

        let question: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question.difficulty, Difficulty::Medium);
        assert_eq!(question.template_id, None);
        assert_eq!(question.correct_option().unwrap().id, "8b");
        assert_eq!(question.option("8a").unwrap().text, "5 days");
        assert!(question.option("8z").is_none());
    }

    #[test]
    fn test_difficulty_cycles() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }
}
