use serde::{Deserialize, Serialize};

use super::question::QuizQuestion;
use super::settings::QuizSettings;

/// The recorded outcome of one presented question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: String,
    pub selected_option_id: Option<String>,
    pub is_correct: bool,
    pub is_skipped: bool,
    /// Seconds, within `[0, time_per_question]`.
    pub time_taken: u32,
}

impl QuizAnswer {
    /// An answer recorded when the countdown ran out.
    pub fn timed_out(question_id: impl Into<String>, time_per_question: u32) -> Self {
        Self {
            question_id: question_id.into(),
            selected_option_id: None,
            is_correct: false,
            is_skipped: true,
            time_taken: time_per_question,
        }
    }
}

/// Aggregate of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub total_questions: usize,
    pub correct_answers: usize,
    pub skipped_questions: usize,
    /// Seconds of wall-clock time for the whole session.
    pub total_time_taken: u64,
    pub answers: Vec<QuizAnswer>,
    pub quiz_settings: QuizSettings,
    pub questions: Vec<QuizQuestion>,
}

impl QuizResult {
    pub fn from_answers(
        quiz_settings: QuizSettings,
        questions: Vec<QuizQuestion>,
        answers: Vec<QuizAnswer>,
        total_time_taken: u64,
    ) -> Self {
        let correct_answers = answers.iter().filter(|a| a.is_correct).count();
        let skipped_questions = answers.iter().filter(|a| a.is_skipped).count();

        Self {
            total_questions: questions.len(),
            correct_answers,
            skipped_questions,
            total_time_taken,
            answers,
            quiz_settings,
            questions,
        }
    }

    /// Questions answered with an option, right or wrong.
    pub fn attempted_questions(&self) -> usize {
        self.total_questions.saturating_sub(self.skipped_questions)
    }

    pub fn incorrect_answers(&self) -> usize {
        self.answers
            .iter()
            .filter(|a| !a.is_correct && !a.is_skipped)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::{sample_question, sample_settings};

    fn answer(question_id: &str, selected: Option<&str>, is_correct: bool) -> QuizAnswer {
        QuizAnswer {
            question_id: question_id.to_string(),
            selected_option_id: selected.map(str::to_string),
            is_correct,
            is_skipped: selected.is_none(),
            time_taken: 4,
        }
    }

    #[test]
    fn test_result_counts_partition_total() {
        let questions = vec![
            sample_question("q1", 0),
            sample_question("q2", 1),
            sample_question("q3", 2),
            sample_question("q4", 3),
        ];
        let answers = vec![
            answer("q1", Some("q1-0"), true),
            answer("q2", Some("q2-0"), false),
            answer("q3", None, false),
            QuizAnswer::timed_out("q4", 30),
        ];

        let result = QuizResult::from_answers(sample_settings(30, 4), questions, answers, 95);

        assert_eq!(result.total_questions, 4);
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.skipped_questions, 2);
        assert_eq!(result.incorrect_answers(), 1);
        assert_eq!(result.attempted_questions(), 2);
        assert_eq!(
            result.correct_answers + result.incorrect_answers() + result.skipped_questions,
            result.total_questions
        );
        assert_eq!(result.total_time_taken, 95);
    }

    #[test]
    fn test_timed_out_answer() {
        let answer = QuizAnswer::timed_out("q1", 45);
        assert_eq!(answer.selected_option_id, None);
        assert!(answer.is_skipped);
        assert!(!answer.is_correct);
        assert_eq!(answer.time_taken, 45);
    }
}
