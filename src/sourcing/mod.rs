//! Question sourcing.
//!
//! [`QuestionService`] produces the questions for one quiz. In remote mode it
//! asks a [`TextGenerator`] for a batch, drops templates it has already served
//! during this process, and falls back to the [`synthetic`] generator when
//! the remote path fails. In local mode it samples the static bank.

mod error;
mod gemini;
mod parse;
mod prompt;
pub mod synthetic;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{QuizConfig, SourceMode};
use crate::data::random_questions;
use crate::models::{Category, QuizOption, QuizQuestion, QuizSettings};

pub use error::{SourceError, SourcingError};
pub use gemini::{GeminiClient, TextGenerator};
pub use parse::{GeneratedOption, GeneratedQuestion, parse_batch, strip_code_fences};
pub use prompt::build_prompt;

/// Survivors below this share of the requested count trigger a warning.
const MIN_UNIQUE_RATIO: f64 = 0.8;

/// Produces question lists and remembers which templates it has served.
pub struct QuestionService {
    mode: SourceMode,
    generator: Arc<dyn TextGenerator>,
    bank: Vec<QuizQuestion>,
    /// Template keys served by the remote path since this service was built.
    seen_templates: Mutex<HashSet<String>>,
}

impl QuestionService {
    pub fn new(mode: SourceMode, generator: Arc<dyn TextGenerator>, bank: Vec<QuizQuestion>) -> Self {
        Self {
            mode,
            generator,
            bank,
            seen_templates: Mutex::new(HashSet::new()),
        }
    }

    /// Build a service backed by the Gemini client described in `config`.
    pub fn from_config(config: &QuizConfig, bank: Vec<QuizQuestion>) -> Result<Self, SourceError> {
        let client = GeminiClient::new(config.gemini.clone())?;
        Ok(Self::new(config.source, Arc::new(client), bank))
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    /// Fetch up to `settings.number_of_questions` questions.
    pub async fn fetch_questions(
        &self,
        settings: &QuizSettings,
    ) -> Result<Vec<QuizQuestion>, SourcingError> {
        match self.mode {
            SourceMode::Local => Ok(self.from_bank(settings)),
            SourceMode::Remote => self.from_generator(settings).await,
        }
    }

    fn from_bank(&self, settings: &QuizSettings) -> Vec<QuizQuestion> {
        let mut rng = StdRng::from_os_rng();
        let questions = random_questions(&self.bank, settings, settings.number_of_questions, &mut rng);
        info!(
            requested = settings.number_of_questions,
            returned = questions.len(),
            "sampled local question bank"
        );
        questions
    }

    async fn from_generator(
        &self,
        settings: &QuizSettings,
    ) -> Result<Vec<QuizQuestion>, SourcingError> {
        let now = Utc::now();
        let session_id = Uuid::new_v4().to_string();
        let prompt = build_prompt(settings, &now.to_rfc3339(), &session_id);

        match self.request_batch(&prompt, settings.number_of_questions).await {
            Ok(batch) => {
                let unique = self.keep_unseen(batch).await;
                let requested = settings.number_of_questions;

                if (unique.len() as f64) < requested as f64 * MIN_UNIQUE_RATIO {
                    warn!(
                        unique = unique.len(),
                        requested, "too many duplicate templates filtered"
                    );
                }

                info!(count = unique.len(), "using generated questions");
                Ok(unique
                    .into_iter()
                    .map(|q| to_quiz_question(q, settings))
                    .collect())
            }
            Err(err) => {
                error!(error = %err, "remote question source failed, falling back to synthetic questions");
                self.seen_templates.lock().await.clear();

                let date = now.format("%Y-%m-%d").to_string();
                let mut rng = StdRng::from_os_rng();
                let generated = synthetic::generate(settings, &session_id, &date, &mut rng)
                    .inspect_err(|err| error!(error = %err, "synthetic generator failed"))?;

                Ok(generated
                    .into_iter()
                    .map(|q| to_quiz_question(q, settings))
                    .collect())
            }
        }
    }

    async fn request_batch(
        &self,
        prompt: &str,
        requested: usize,
    ) -> Result<Vec<GeneratedQuestion>, SourceError> {
        let text = self.generator.generate(prompt).await?;
        let mut batch = parse_batch(&text)?;
        debug!(received = batch.len(), requested, "parsed generated batch");
        batch.truncate(requested);
        Ok(batch)
    }

    /// Drop entries whose template was already served and record the rest.
    async fn keep_unseen(&self, batch: Vec<GeneratedQuestion>) -> Vec<GeneratedQuestion> {
        let mut seen = self.seen_templates.lock().await;
        let received = batch.len();

        let unique: Vec<GeneratedQuestion> = batch
            .into_iter()
            .filter(|q| {
                let key = q.dedup_key();
                if seen.contains(&key) {
                    debug!(template = %key, "skipping duplicate template");
                    false
                } else {
                    seen.insert(key);
                    true
                }
            })
            .collect();

        debug!(filtered = received - unique.len(), "filtered duplicate templates");
        unique
    }

    /// Number of template keys currently remembered.
    pub async fn seen_template_count(&self) -> usize {
        self.seen_templates.lock().await.len()
    }
}

/// Assign ids and resolve the category of a generated question.
///
/// The category comes from the first selected topic whose name matches the
/// generated topic name, or the first selected topic when none does.
fn to_quiz_question(question: GeneratedQuestion, settings: &QuizSettings) -> QuizQuestion {
    let topic = settings
        .selected_topics
        .iter()
        .find(|t| t.name == question.topic)
        .or_else(|| settings.selected_topics.first());

    let (topic_id, category) = match topic {
        Some(t) => (t.id.clone(), t.category),
        None => (question.topic.clone(), Category::Aptitude),
    };

    let template_id = question.template_id.unwrap_or_else(|| {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        format!("{}-{}", topic_id, suffix)
    });

    QuizQuestion {
        id: Uuid::new_v4().to_string(),
        text: question.text,
        options: question
            .options
            .into_iter()
            .map(|o| QuizOption {
                id: Uuid::new_v4().to_string(),
                text: o.text,
                is_correct: o.is_correct,
            })
            .collect(),
        explanation: question.explanation,
        difficulty: settings.difficulty,
        category,
        topic: topic_id,
        template_id: Some(template_id),
    }
}
