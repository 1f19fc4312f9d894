use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::QuizQuestion;

/// Error loading a question bank file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain at least one question", path.display())]
    Empty { path: PathBuf },
}

/// Load a question bank from a JSON array of questions.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<QuizQuestion>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let questions: Vec<QuizQuestion> =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if questions.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), count = questions.len(), "loaded question bank");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("career-quiz-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_bank() {
        let path = write_temp(
            "valid.json",
            r#"[{
                "id": "2",
                "text": "Which data structure follows LIFO?",
                "options": [
                    { "id": "2a", "text": "Queue", "isCorrect": false },
                    { "id": "2b", "text": "Stack", "isCorrect": true }
                ],
                "explanation": "A stack is last in, first out.",
                "difficulty": "medium",
                "category": "dsa",
                "topic": "dsa-2"
            }]"#,
        );

        let questions = load_questions_from_json(&path).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_option().unwrap().text, "Stack");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_rejects_empty_and_malformed() {
        let empty = write_temp("empty.json", "[]");
        assert!(matches!(
            load_questions_from_json(&empty),
            Err(LoadError::Empty { .. })
        ));
        fs::remove_file(empty).unwrap();

        let broken = write_temp("broken.json", "{ not json");
        assert!(matches!(
            load_questions_from_json(&broken),
            Err(LoadError::Parse { .. })
        ));
        fs::remove_file(broken).unwrap();

        assert!(matches!(
            load_questions_from_json("/nonexistent/career-quiz.json"),
            Err(LoadError::Io { .. })
        ));
    }
}
