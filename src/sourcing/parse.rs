//! Parsing of the generated question batch.

use serde::Deserialize;

use super::error::SourceError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedOption {
    pub text: String,
    pub is_correct: bool,
}

/// One question as produced by a generator, before ids and category are assigned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub text: String,
    pub options: Vec<GeneratedOption>,
    pub explanation: String,
    /// Topic name, matched against the selected topics.
    pub topic: String,
    #[serde(default)]
    pub template_id: Option<String>,
}

impl GeneratedQuestion {
    /// Deduplication key: the template id, or topic plus a text prefix.
    pub fn dedup_key(&self) -> String {
        match &self.template_id {
            Some(id) => id.clone(),
            None => {
                let prefix: String = self.text.chars().take(20).collect();
                format!("{}-{}", self.topic, prefix)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedBatch {
    questions: Vec<GeneratedQuestion>,
}

/// Remove markdown code fences the model sometimes wraps JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse `{ "questions": [...] }`, tolerating code fences.
pub fn parse_batch(text: &str) -> Result<Vec<GeneratedQuestion>, SourceError> {
    let cleaned = strip_code_fences(text);
    let batch: GeneratedBatch = serde_json::from_str(&cleaned)?;
    Ok(batch.questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = r#"{
        "questions": [
            {
                "text": "What is 2 + 2?",
                "options": [
                    { "text": "3", "isCorrect": false },
                    { "text": "4", "isCorrect": true },
                    { "text": "5", "isCorrect": false },
                    { "text": "22", "isCorrect": false }
                ],
                "explanation": "Basic addition.",
                "topic": "Number System",
                "templateId": "sum-small-ints"
            }
        ]
    }"#;

    #[test]
    fn test_parse_plain_batch() {
        let questions = parse_batch(BATCH).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].template_id.as_deref(), Some("sum-small-ints"));
        assert!(questions[0].options[1].is_correct);
    }

    #[test]
    fn test_parse_fenced_batch() {
        let fenced = format!("```json\n{}\n```", BATCH);
        let questions = parse_batch(&fenced).unwrap();
        assert_eq!(questions[0].topic, "Number System");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(matches!(
            parse_batch(r#"{ "items": [] }"#),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(parse_batch("Sorry, I can't."), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_dedup_key_falls_back_to_text_prefix() {
        let mut question = parse_batch(BATCH).unwrap().remove(0);
        assert_eq!(question.dedup_key(), "sum-small-ints");

        question.template_id = None;
        question.text = "A train leaves the station at noon".to_string();
        assert_eq!(question.dedup_key(), "Number System-A train leaves the s");
    }
}
