//! Runtime configuration handed from the binary to the library.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::{Difficulty, Topic};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Seconds-per-question choices offered on the setup screen.
pub const TIME_CHOICES: [u32; 5] = [30, 45, 60, 90, 120];

/// Question-count choices offered on the setup screen.
pub const COUNT_CHOICES: [usize; 4] = [5, 10, 15, 20];

/// Where quiz questions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Remote generation, with the synthetic generator as fallback.
    #[default]
    Remote,
    /// The static local bank.
    Local,
}

/// Settings for the remote generation endpoint.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Supplied from outside the program (flag or environment), never embedded.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub request_timeout: Duration,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(60),
            temperature: 0.9,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

/// Everything the application needs to start.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub source: SourceMode,
    pub gemini: GeminiConfig,
    /// JSON bank file; the built-in bank is used when absent.
    pub bank_path: Option<PathBuf>,
    /// Show the correct answer and explanation after each question.
    pub reveal_answers: bool,
    pub preselected_topics: Vec<Topic>,
    pub time_per_question: u32,
    pub difficulty: Difficulty,
    pub number_of_questions: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            source: SourceMode::default(),
            gemini: GeminiConfig::default(),
            bank_path: None,
            reveal_answers: false,
            preselected_topics: Vec::new(),
            time_per_question: 60,
            difficulty: Difficulty::Medium,
            number_of_questions: 10,
        }
    }
}
