//! Results screen model built from a finished session.

use crate::models::{QuizAnswer, QuizQuestion, QuizResult};
use crate::stats::{calculate_accuracy, calculate_score, format_time_in_words};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Correct,
    Incorrect,
    Skipped,
}

impl AnswerStatus {
    fn of(answer: &QuizAnswer) -> Self {
        if answer.is_skipped {
            AnswerStatus::Skipped
        } else if answer.is_correct {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        }
    }
}

/// One line of the per-question breakdown.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewRow {
    Item {
        number: usize,
        question: QuizQuestion,
        answer: QuizAnswer,
        status: AnswerStatus,
    },
    /// The answer refers to a question that is not in the result.
    Missing { number: usize, question_id: String },
}

impl ReviewRow {
    pub fn number(&self) -> usize {
        match self {
            ReviewRow::Item { number, .. } | ReviewRow::Missing { number, .. } => *number,
        }
    }

    /// Text of the option the user picked.
    pub fn selected_text(&self) -> Option<&str> {
        match self {
            ReviewRow::Item {
                question, answer, ..
            } => answer
                .selected_option_id
                .as_deref()
                .and_then(|id| question.option(id))
                .map(|o| o.text.as_str()),
            ReviewRow::Missing { .. } => None,
        }
    }

    pub fn correct_text(&self) -> Option<&str> {
        match self {
            ReviewRow::Item { question, .. } => question.correct_option().map(|o| o.text.as_str()),
            ReviewRow::Missing { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub result: QuizResult,
    pub rows: Vec<ReviewRow>,
}

impl Review {
    pub fn accuracy(&self) -> u32 {
        calculate_accuracy(self.result.correct_answers, self.result.total_questions)
    }

    pub fn score(&self) -> u32 {
        calculate_score(self.result.correct_answers, self.result.total_questions)
    }

    pub fn time_in_words(&self) -> String {
        format_time_in_words(self.result.total_time_taken)
    }

    pub fn has_skipped(&self) -> bool {
        self.result.skipped_questions > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewState {
    /// No result was handed over.
    NotAvailable,
    /// A result without questions or answers.
    Invalid,
    Ready(Review),
}

impl ReviewState {
    pub fn from_result(result: Option<QuizResult>) -> Self {
        let Some(result) = result else {
            return ReviewState::NotAvailable;
        };
        if result.questions.is_empty() || result.answers.is_empty() {
            return ReviewState::Invalid;
        }

        let rows = result
            .answers
            .iter()
            .enumerate()
            .map(|(i, answer)| {
                let number = i + 1;
                match result.questions.iter().find(|q| q.id == answer.question_id) {
                    Some(question) => ReviewRow::Item {
                        number,
                        question: question.clone(),
                        answer: answer.clone(),
                        status: AnswerStatus::of(answer),
                    },
                    None => ReviewRow::Missing {
                        number,
                        question_id: answer.question_id.clone(),
                    },
                }
            })
            .collect();

        ReviewState::Ready(Review { result, rows })
    }

    pub fn review(&self) -> Option<&Review> {
        match self {
            ReviewState::Ready(review) => Some(review),
            _ => None,
        }
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
            time_taken: 5,
        }
    }

    fn result(answers: Vec<QuizAnswer>) -> QuizResult {
        let questions = vec![sample_question("q1", 0), sample_question("q2", 2), sample_question("q3", 1)];
        QuizResult::from_answers(sample_settings(30, 3), questions, answers, 125)
    }

    #[test]
    fn test_missing_result() {
        assert_eq!(ReviewState::from_result(None), ReviewState::NotAvailable);
    }

    #[test]
    fn test_empty_result_is_invalid() {
        let empty = QuizResult::from_answers(sample_settings(30, 1), vec![], vec![], 0);
        assert_eq!(ReviewState::from_result(Some(empty)), ReviewState::Invalid);

        let unanswered = result(vec![]);
        assert_eq!(ReviewState::from_result(Some(unanswered)), ReviewState::Invalid);
    }

    #[test]
    fn test_rows_follow_answers() {
        let state = ReviewState::from_result(Some(result(vec![
            answer("q1", Some("q1-0"), true),
            answer("q2", Some("q2-1"), false),
            answer("q3", None, false),
        ])));
        let review = state.review().unwrap();

        let statuses: Vec<_> = review
            .rows
            .iter()
            .map(|row| match row {
                ReviewRow::Item { status, .. } => Some(*status),
                ReviewRow::Missing { .. } => None,
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                Some(AnswerStatus::Correct),
                Some(AnswerStatus::Incorrect),
                Some(AnswerStatus::Skipped),
            ]
        );

        assert_eq!(review.rows[1].selected_text(), Some("Option 1"));
        assert_eq!(review.rows[1].correct_text(), Some("Option 2"));
        assert_eq!(review.rows[2].selected_text(), None);

        assert_eq!(review.accuracy(), 33);
        assert_eq!(review.score(), 3);
        assert_eq!(review.time_in_words(), "2 minutes and 5 seconds");
        assert!(review.has_skipped());
    }

    #[test]
    fn test_unknown_question_gives_missing_row() {
        let state = ReviewState::from_result(Some(result(vec![
            answer("q1", Some("q1-0"), true),
            answer("gone", Some("gone-0"), false),
        ])));
        let review = state.review().unwrap();

        assert_eq!(
            review.rows[1],
            ReviewRow::Missing {
                number: 2,
                question_id: "gone".to_string(),
            }
        );
        assert_eq!(review.rows[1].number(), 2);
        assert_eq!(review.rows[1].correct_text(), None);
    }
}
