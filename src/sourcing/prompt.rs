//! Natural-language generation request for the remote source.

use crate::models::{Category, QuizSettings};

const APTITUDE_GUIDANCE: &str = "\
For Aptitude questions:
- Include varied template styles (e.g., direct calculations, word problems, application scenarios)
- Balance numerical, algebraic, geometric and logical questions
- Provide clear mathematical working in explanations
- Cover multiple approaches to solution when relevant
";

const REASONING_GUIDANCE: &str = "\
For Reasoning questions:
- Include diverse question formats (verbal, non-verbal, critical thinking)
- For verbal reasoning, include analogies, syllogisms, and logical deductions
- For non-verbal reasoning, include patterns, matrices, and sequence completion
- Clearly explain the logical principle behind each answer
";

const RESPONSE_FORMAT: &str = r#"Format the response as JSON with the following structure:
{
  "questions": [
    {
      "text": "Question text goes here?",
      "options": [
        { "text": "First option", "isCorrect": false },
        { "text": "Second option", "isCorrect": true },
        { "text": "Third option", "isCorrect": false },
        { "text": "Fourth option", "isCorrect": false }
      ],
      "explanation": "Detailed step-by-step explanation with formulas and calculations if applicable",
      "topic": "Specific topic name",
      "templateId": "unique-template-identifier-for-this-question-type"
    }
  ]
}"#;

/// Build the generation prompt.
///
/// `timestamp` and `session_id` make every request distinct so the model
/// does not return a cached batch.
pub fn build_prompt(settings: &QuizSettings, timestamp: &str, session_id: &str) -> String {
    let topic_names = settings.topic_names().join(", ");
    let count = settings.number_of_questions;
    let difficulty = settings.difficulty;

    let has = |category: Category| {
        settings
            .selected_topics
            .iter()
            .any(|t| t.category == category)
    };

    let mut prompt = format!(
        "You are QuestionMaster, a specialized quiz-generation AI.
Generate {count} unique multiple-choice questions for the topics: {topic_names} at {difficulty} level.
Current timestamp: {timestamp} - Generate brand new questions with unique templates.
Session ID: {session_id}

For each question:
- Create a clear, grammatically correct question with high diversity.
- Provide exactly 4 distinct answer options, with only one being correct.
- Write a detailed explanation that thoroughly explains the solution.
- Include a unique templateId to prevent repetition within the same topic.
- For mathematical questions, include step-by-step calculations and formulas.
- For programming questions, include code explanations or examples where relevant.
- For reasoning questions, clearly explain the logical framework used to arrive at the answer.
- Ensure NO duplicate questions or content across this batch.
- Make each question focused on a specific concept within the topic.
- Vary the difficulty and complexity within the specified {difficulty} level.

"
    );

    if has(Category::Aptitude) {
        prompt.push_str(APTITUDE_GUIDANCE);
        prompt.push('\n');
    }
    if has(Category::Reasoning) {
        prompt.push_str(REASONING_GUIDANCE);
        prompt.push('\n');
    }

    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, find_topic};

    fn settings(topic_ids: &[&str]) -> QuizSettings {
        let topics = topic_ids.iter().map(|id| find_topic(id).unwrap()).collect();
        QuizSettings::new(topics, 60, Difficulty::Hard, 7).unwrap()
    }

    #[test]
    fn test_prompt_embeds_request_details() {
        let prompt = build_prompt(
            &settings(&["dsa-1", "programming-2"]),
            "2025-03-01T10:00:00Z",
            "session-42",
        );

        assert!(prompt.contains("Generate 7 unique multiple-choice questions"));
        assert!(prompt.contains("Arrays, Python at hard level"));
        assert!(prompt.contains("2025-03-01T10:00:00Z"));
        assert!(prompt.contains("Session ID: session-42"));
        assert!(prompt.contains("\"questions\""));
        assert!(!prompt.contains("For Aptitude questions"));
        assert!(!prompt.contains("For Reasoning questions"));
    }

    #[test]
    fn test_prompt_adds_category_guidance() {
        let prompt = build_prompt(&settings(&["aptitude-2", "reasoning-2"]), "t", "s");
        assert!(prompt.contains("For Aptitude questions"));
        assert!(prompt.contains("For Reasoning questions"));
    }
}
