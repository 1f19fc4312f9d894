use std::path::{Path, PathBuf};
use std::time::Duration;

use career_quiz::config::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use career_quiz::models::{Difficulty, Topic, find_topic};
use career_quiz::{GeminiConfig, QuizConfig, SourceMode};
use clap::{Parser, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// API key for the question generation endpoint
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Generation model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the generation endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Seconds to wait for the generation endpoint
    #[arg(long, default_value_t = 60)]
    request_timeout: u64,

    /// Where questions come from
    #[arg(long, value_enum, default_value_t = Source::Remote)]
    source: Source,

    /// JSON question bank used by the local source
    #[arg(long)]
    bank: Option<PathBuf>,

    /// Show the correct answer and explanation after each question
    #[arg(long)]
    reveal: bool,

    /// Topic id to preselect, e.g. dsa-3 (repeatable)
    #[arg(long = "topic", value_parser = parse_topic)]
    topics: Vec<Topic>,

    /// Seconds per question
    #[arg(long, default_value_t = 60)]
    time: u32,

    #[arg(long, value_enum, default_value_t = Level::Medium)]
    difficulty: Level,

    /// Number of questions
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Log file; the terminal is reserved for the quiz
    #[arg(long, default_value = "career-quiz.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Source {
    Remote,
    Local,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

fn parse_topic(id: &str) -> Result<Topic, String> {
    find_topic(id).ok_or_else(|| format!("unknown topic id '{}'", id))
}

impl From<Args> for QuizConfig {
    fn from(args: Args) -> Self {
        QuizConfig {
            source: match args.source {
                Source::Remote => SourceMode::Remote,
                Source::Local => SourceMode::Local,
            },
            gemini: GeminiConfig {
                api_key: args.api_key,
                endpoint: args.endpoint,
                model: args.model,
                request_timeout: Duration::from_secs(args.request_timeout),
                ..GeminiConfig::default()
            },
            bank_path: args.bank,
            reveal_answers: args.reveal,
            preselected_topics: args.topics,
            time_per_question: args.time,
            difficulty: match args.difficulty {
                Level::Easy => Difficulty::Easy,
                Level::Medium => Difficulty::Medium,
                Level::Hard => Difficulty::Hard,
            },
            number_of_questions: args.count,
        }
    }
}

fn init_logging(path: &Path) -> WorkerGuard {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("career-quiz.log"));

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    guard
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let _guard = init_logging(&args.log_file);

    if let Err(e) = career_quiz::run(args.into()).await {
        tracing::error!(error = %e, "quiz exited with an error");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
