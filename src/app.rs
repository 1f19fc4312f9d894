use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::config::{COUNT_CHOICES, QuizConfig, TIME_CHOICES};
use crate::models::{Category, Difficulty, QuizQuestion, QuizSettings, SettingsError, Topic, topics_in};
use crate::review::ReviewState;
use crate::session::{Phase, QuizSession, TimerEvent};
use crate::sourcing::{QuestionService, SourcingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Loading,
    Quiz,
    Results,
    /// The source returned no questions.
    Empty,
    Failed,
}

/// Completion of background work, delivered to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    QuestionsLoaded {
        epoch: u64,
        result: Result<Vec<QuizQuestion>, SourcingError>,
    },
}

/// Topic, time, difficulty and count pickers of the setup screen.
#[derive(Debug, Clone)]
pub struct SetupForm {
    category_index: usize,
    cursor: usize,
    /// In selection order.
    selected: Vec<Topic>,
    pub time_per_question: u32,
    pub difficulty: Difficulty,
    pub number_of_questions: usize,
    pub error: Option<String>,
}

impl SetupForm {
    pub fn new(config: &QuizConfig) -> Self {
        Self {
            category_index: 0,
            cursor: 0,
            selected: config.preselected_topics.clone(),
            time_per_question: config.time_per_question,
            difficulty: config.difficulty,
            number_of_questions: config.number_of_questions,
            error: None,
        }
    }

    pub fn category(&self) -> Category {
        Category::ALL[self.category_index]
    }

    /// Topics of the active category tab.
    pub fn topics(&self) -> Vec<Topic> {
        topics_in(self.category())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &[Topic] {
        &self.selected
    }

    pub fn is_selected(&self, topic: &Topic) -> bool {
        self.selected.iter().any(|t| t.id == topic.id)
    }

    pub fn next_category(&mut self) {
        self.category_index = (self.category_index + 1) % Category::ALL.len();
        self.cursor = 0;
    }

    pub fn previous_category(&mut self) {
        let len = Category::ALL.len();
        self.category_index = (self.category_index + len - 1) % len;
        self.cursor = 0;
    }

    pub fn cursor_down(&mut self) {
        let len = self.topics().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn cursor_up(&mut self) {
        let len = self.topics().len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    /// Select or deselect the topic under the cursor.
    pub fn toggle_topic(&mut self) {
        let Some(topic) = self.topics().into_iter().nth(self.cursor) else {
            return;
        };

        if let Some(pos) = self.selected.iter().position(|t| t.id == topic.id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(topic);
            self.error = None;
        }
    }

    pub fn cycle_time(&mut self) {
        self.time_per_question = next_choice(&TIME_CHOICES, self.time_per_question);
    }

    pub fn cycle_difficulty(&mut self) {
        self.difficulty = self.difficulty.next();
    }

    pub fn cycle_count(&mut self) {
        self.number_of_questions = next_choice(&COUNT_CHOICES, self.number_of_questions);
    }

    pub fn settings(&self) -> Result<QuizSettings, SettingsError> {
        QuizSettings::new(
            self.selected.clone(),
            self.time_per_question,
            self.difficulty,
            self.number_of_questions,
        )
    }
}

/// The choice after `current`, wrapping; the first choice when `current` is not listed.
fn next_choice<T: Copy + PartialEq>(choices: &[T], current: T) -> T {
    choices
        .iter()
        .position(|c| *c == current)
        .and_then(|i| choices.get((i + 1) % choices.len()))
        .or_else(|| choices.first())
        .copied()
        .unwrap_or(current)
}

pub struct App {
    pub screen: Screen,
    pub setup: SetupForm,
    service: Arc<QuestionService>,
    reveal: bool,
    app_tx: UnboundedSender<AppEvent>,
    timer_tx: UnboundedSender<TimerEvent>,
    /// Bumped for every fetch; results tagged with an older epoch are dropped.
    load_epoch: u64,
    pending: Option<QuizSettings>,
    session: Option<QuizSession>,
    review: ReviewState,
    last_settings: Option<QuizSettings>,
    /// Warning shown above the quiz, e.g. when fewer questions arrived.
    notice: Option<String>,
    failure: Option<String>,
    results_cursor: usize,
    expanded: Option<usize>,
}

impl App {
    pub fn new(
        config: &QuizConfig,
        service: Arc<QuestionService>,
        app_tx: UnboundedSender<AppEvent>,
        timer_tx: UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            screen: Screen::Setup,
            setup: SetupForm::new(config),
            service,
            reveal: config.reveal_answers,
            app_tx,
            timer_tx,
            load_epoch: 0,
            pending: None,
            session: None,
            review: ReviewState::NotAvailable,
            last_settings: None,
            notice: None,
            failure: None,
            results_cursor: 0,
            expanded: None,
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn review(&self) -> &ReviewState {
        &self.review
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn results_cursor(&self) -> usize {
        self.results_cursor
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Validate the setup form and start fetching questions.
    pub fn start_quiz(&mut self) {
        match self.setup.settings() {
            Ok(settings) => {
                self.setup.error = None;
                self.begin_loading(settings);
            }
            Err(err) => {
                debug!(error = %err, "setup rejected");
                self.setup.error = Some(err.to_string());
            }
        }
    }

    fn begin_loading(&mut self, settings: QuizSettings) {
        self.load_epoch += 1;
        let epoch = self.load_epoch;

        info!(
            epoch,
            topics = ?settings.topic_names(),
            count = settings.number_of_questions,
            difficulty = %settings.difficulty,
            "fetching questions"
        );

        let service = Arc::clone(&self.service);
        let tx = self.app_tx.clone();
        let request = settings.clone();
        tokio::spawn(async move {
            let result = service.fetch_questions(&request).await;
            // receiver is gone only when the app is shutting down
            let _ = tx.send(AppEvent::QuestionsLoaded { epoch, result });
        });

        self.pending = Some(settings);
        self.session = None;
        self.notice = None;
        self.failure = None;
        self.screen = Screen::Loading;
    }

    /// Leave the loading screen; the fetch in flight is ignored when it lands.
    pub fn cancel_loading(&mut self) {
        if self.screen == Screen::Loading {
            self.load_epoch += 1;
            self.pending = None;
            self.screen = Screen::Setup;
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::QuestionsLoaded { epoch, result } => self.questions_loaded(epoch, result),
        }
    }

    fn questions_loaded(&mut self, epoch: u64, result: Result<Vec<QuizQuestion>, SourcingError>) {
        if epoch != self.load_epoch || self.screen != Screen::Loading {
            debug!(epoch, current = self.load_epoch, "dropping stale question batch");
            return;
        }
        let Some(settings) = self.pending.take() else {
            return;
        };

        let questions = match result {
            Ok(questions) => questions,
            Err(err) => {
                error!(error = %err, "question loading failed");
                self.failure = Some(err.to_string());
                self.screen = Screen::Failed;
                return;
            }
        };

        if questions.len() < settings.number_of_questions {
            warn!(
                received = questions.len(),
                requested = settings.number_of_questions,
                "fewer questions than requested"
            );
            self.notice = Some(format!(
                "Only {} of {} questions could be loaded",
                questions.len(),
                settings.number_of_questions
            ));
        }

        self.last_settings = Some(settings.clone());

        match QuizSession::start(settings, questions, self.reveal, self.timer_tx.clone()) {
            Ok(session) => {
                self.session = Some(session);
                self.screen = Screen::Quiz;
            }
            Err(err) => {
                info!(error = %err, "no questions available");
                self.notice = None;
                self.screen = Screen::Empty;
            }
        }
    }

    pub fn handle_timer(&mut self, event: TimerEvent) {
        if let Some(session) = self.session.as_mut() {
            session.handle_timer(event);
        }
        self.check_finished();
    }

    pub fn move_option_down(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.move_cursor_down();
        }
    }

    pub fn move_option_up(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.move_cursor_up();
        }
    }

    pub fn select_option(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.select_at_cursor();
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.clear_selection();
        }
    }

    /// Submit the selection, or the option under the cursor when nothing is
    /// selected. On a revealed question, move on instead.
    pub fn confirm(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.phase() {
            Phase::AwaitingAnswer => {
                if session.selected_option_id().is_none() {
                    session.select_at_cursor();
                }
                session.submit();
            }
            Phase::Revealed | Phase::TimedOut => session.advance(),
            Phase::Finished => {}
        }
        self.check_finished();
    }

    /// Submit with no option selected.
    pub fn skip_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.phase() == Phase::AwaitingAnswer {
            session.clear_selection();
            session.submit();
        }
        self.check_finished();
    }

    /// Abandon the running quiz and return to setup.
    pub fn quit_quiz(&mut self) {
        if self.session.take().is_some() {
            info!("quiz abandoned");
        }
        self.notice = None;
        self.screen = Screen::Setup;
    }

    fn check_finished(&mut self) {
        let finished = self
            .session
            .as_ref()
            .is_some_and(|s| s.phase() == Phase::Finished);
        if !finished {
            return;
        }

        let result = self.session.take().and_then(QuizSession::into_result);
        self.review = ReviewState::from_result(result);
        self.results_cursor = 0;
        self.expanded = None;
        self.notice = None;
        self.screen = Screen::Results;
    }

    pub fn results_down(&mut self) {
        if let Some(review) = self.review.review() {
            if self.results_cursor + 1 < review.rows.len() {
                self.results_cursor += 1;
            }
        }
    }

    pub fn results_up(&mut self) {
        self.results_cursor = self.results_cursor.saturating_sub(1);
    }

    /// Show or hide the correct answer and explanation of the row under the cursor.
    pub fn toggle_details(&mut self) {
        self.expanded = match self.expanded {
            Some(row) if row == self.results_cursor => None,
            _ => Some(self.results_cursor),
        };
    }

    /// Run a new quiz with the settings of the last one.
    pub fn retake(&mut self) {
        match self.last_settings.clone() {
            Some(settings) => self.begin_loading(settings),
            None => self.new_quiz(),
        }
    }

    pub fn new_quiz(&mut self) {
        self.review = ReviewState::NotAvailable;
        self.go_home();
    }

    pub fn go_home(&mut self) {
        self.session = None;
        self.pending = None;
        self.failure = None;
        self.notice = None;
        self.screen = Screen::Setup;
    }
}
