//! Quiz session: presents questions one at a time under a countdown and
//! records exactly one answer per question.

mod timer;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::models::{QuizAnswer, QuizQuestion, QuizResult, QuizSettings};

pub use timer::{Countdown, TimerEvent, TimerKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a quiz needs at least one question")]
    NoQuestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAnswer,
    /// Answer submitted; correct option and explanation are shown.
    Revealed,
    /// Countdown ran out; correct option and explanation are shown.
    TimedOut,
    Finished,
}

pub struct QuizSession {
    settings: QuizSettings,
    questions: Vec<QuizQuestion>,
    /// Practice mode: pause on each answer until `advance` is called.
    reveal: bool,
    index: usize,
    cursor: usize,
    selected: Option<String>,
    answers: Vec<QuizAnswer>,
    phase: Phase,
    remaining: u32,
    countdown: Countdown,
    started_at: Instant,
    question_started_at: Instant,
    result: Option<QuizResult>,
}

impl QuizSession {
    /// Start a session and arm the countdown for the first question.
    pub fn start(
        settings: QuizSettings,
        questions: Vec<QuizQuestion>,
        reveal: bool,
        timer_tx: UnboundedSender<TimerEvent>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        let now = Instant::now();
        let mut countdown = Countdown::new(timer_tx);
        countdown.arm(settings.time_per_question);

        info!(
            questions = questions.len(),
            time_per_question = settings.time_per_question,
            reveal,
            "quiz session started"
        );

        Ok(Self {
            remaining: settings.time_per_question,
            answers: Vec::with_capacity(questions.len()),
            settings,
            questions,
            reveal,
            index: 0,
            cursor: 0,
            selected: None,
            phase: Phase::AwaitingAnswer,
            countdown,
            started_at: now,
            question_started_at: now,
            result: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn is_practice(&self) -> bool {
        self.reveal
    }

    /// The question on screen; `None` once finished.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            Phase::Finished => None,
            _ => self.questions.get(self.index),
        }
    }

    /// 1-based position of the current question.
    pub fn question_number(&self) -> usize {
        (self.index + 1).min(self.questions.len())
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Seconds left on the countdown.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_option_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }

    /// The answer recorded for the current question, if any.
    pub fn current_answer(&self) -> Option<&QuizAnswer> {
        self.answers.get(self.index)
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<QuizResult> {
        self.result
    }

    pub fn move_cursor_down(&mut self) {
        if let Some(len) = self.open_option_count() {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if let Some(len) = self.open_option_count() {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    /// Select the option under the cursor.
    pub fn select_at_cursor(&mut self) {
        let id = self
            .current_question()
            .and_then(|q| q.options.get(self.cursor))
            .map(|o| o.id.clone());
        if let Some(id) = id {
            self.select_option(&id);
        }
    }

    /// Select an option by id. Unknown ids are ignored.
    pub fn select_option(&mut self, option_id: &str) {
        if self.phase != Phase::AwaitingAnswer {
            return;
        }
        let Some(position) = self
            .current_question()
            .and_then(|q| q.options.iter().position(|o| o.id == option_id))
        else {
            return;
        };

        self.cursor = position;
        self.selected = Some(option_id.to_string());
    }

    pub fn clear_selection(&mut self) {
        if self.phase == Phase::AwaitingAnswer {
            self.selected = None;
        }
    }

    /// Record the current selection as the answer.
    ///
    /// Returns `false` when an answer was already recorded for this question.
    pub fn submit(&mut self) -> bool {
        if self.phase != Phase::AwaitingAnswer {
            return false;
        }
        let Some(question) = self.questions.get(self.index) else {
            return false;
        };

        let elapsed = self.question_started_at.elapsed().as_secs_f64().round() as u32;
        let time_taken = elapsed.min(self.settings.time_per_question);

        let is_correct = self
            .selected
            .as_deref()
            .and_then(|id| question.option(id))
            .is_some_and(|o| o.is_correct);

        let answer = QuizAnswer {
            question_id: question.id.clone(),
            is_skipped: self.selected.is_none(),
            selected_option_id: self.selected.take(),
            is_correct,
            time_taken,
        };

        debug!(
            question = self.index,
            is_correct,
            skipped = answer.is_skipped,
            time_taken,
            "answer submitted"
        );
        self.record(answer, Phase::Revealed);
        true
    }

    /// Apply a countdown event. Stale events and events outside
    /// `AwaitingAnswer` are ignored.
    pub fn handle_timer(&mut self, event: TimerEvent) {
        if event.epoch != self.countdown.epoch() || self.phase != Phase::AwaitingAnswer {
            return;
        }

        match event.kind {
            TimerKind::Tick { remaining } => self.remaining = remaining,
            TimerKind::Expired => {
                let Some(question) = self.questions.get(self.index) else {
                    return;
                };
                debug!(question = self.index, "question timed out");
                let answer = QuizAnswer::timed_out(question.id.clone(), self.settings.time_per_question);
                self.remaining = 0;
                self.selected = None;
                self.record(answer, Phase::TimedOut);
            }
        }
    }

    /// Leave a revealed question. Does nothing in other phases.
    pub fn advance(&mut self) {
        if matches!(self.phase, Phase::Revealed | Phase::TimedOut) {
            self.next_question();
        }
    }

    fn record(&mut self, answer: QuizAnswer, reveal_phase: Phase) {
        self.countdown.cancel();
        self.answers.push(answer);

        if self.reveal {
            self.phase = reveal_phase;
        } else {
            self.next_question();
        }
    }

    fn next_question(&mut self) {
        self.index += 1;
        if self.index >= self.questions.len() {
            self.finish();
            return;
        }

        self.cursor = 0;
        self.selected = None;
        self.remaining = self.settings.time_per_question;
        self.question_started_at = Instant::now();
        self.countdown.arm(self.settings.time_per_question);
        self.phase = Phase::AwaitingAnswer;
    }

    fn finish(&mut self) {
        self.countdown.cancel();
        let total_time_taken = self.started_at.elapsed().as_secs_f64().round() as u64;

        let result = QuizResult::from_answers(
            self.settings.clone(),
            self.questions.clone(),
            self.answers.clone(),
            total_time_taken,
        );
        info!(
            correct = result.correct_answers,
            skipped = result.skipped_questions,
            total = result.total_questions,
            total_time_taken,
            "quiz session finished"
        );

        self.result = Some(result);
        self.phase = Phase::Finished;
    }

    fn open_option_count(&self) -> Option<usize> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        self.current_question()
            .map(|q| q.options.len())
            .filter(|len| *len > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::{sample_question, sample_settings};
    use std::time::Duration;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn session(count: usize, reveal: bool) -> (QuizSession, UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let questions = (0..count).map(|i| sample_question(&format!("q{}", i), 1)).collect();
        let session = QuizSession::start(sample_settings(10, count), questions, reveal, tx).unwrap();
        (session, rx)
    }

    /// Feed countdown events until the session leaves `AwaitingAnswer` for the current question.
    async fn run_out_clock(session: &mut QuizSession, rx: &mut UnboundedReceiver<TimerEvent>) {
        let answered = session.answers().len();
        while session.answers().len() == answered {
            let event = rx.recv().await.unwrap();
            session.handle_timer(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_requires_questions() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = QuizSession::start(sample_settings(10, 1), vec![], false, tx);
        assert!(matches!(result, Err(SessionError::NoQuestions)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_records_rounded_time() {
        let (mut session, _rx) = session(2, false);

        session.move_cursor_down();
        session.select_at_cursor();
        assert_eq!(session.selected_option_id(), Some("q0-1"));

        tokio::time::advance(Duration::from_millis(2600)).await;
        assert!(session.submit());

        let answer = &session.answers()[0];
        assert_eq!(answer.question_id, "q0");
        assert!(answer.is_correct);
        assert!(!answer.is_skipped);
        assert_eq!(answer.time_taken, 3);

        assert_eq!(session.question_number(), 2);
        assert_eq!(session.selected_option_id(), None);
        assert_eq!(session.remaining(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_submit_is_skipped() {
        let (mut session, _rx) = session(1, false);

        session.select_option("q0-2");
        session.clear_selection();
        assert!(session.submit());

        let result = session.result().unwrap();
        assert_eq!(result.skipped_questions, 1);
        assert_eq!(result.correct_answers, 0);
        assert_eq!(result.answers[0].selected_option_id, None);
        assert!(!result.answers[0].is_correct);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_records_full_time() {
        let (mut session, mut rx) = session(2, false);

        run_out_clock(&mut session, &mut rx).await;

        let answer = &session.answers()[0];
        assert_eq!(answer.selected_option_id, None);
        assert!(answer.is_skipped);
        assert!(!answer.is_correct);
        assert_eq!(answer.time_taken, 10);
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.question_number(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_is_discarded_on_timeout() {
        let (mut session, mut rx) = session(1, false);

        session.select_option("q0-1");
        run_out_clock(&mut session, &mut rx).await;

        let answer = &session.result().unwrap().answers[0];
        assert_eq!(answer.selected_option_id, None);
        assert!(!answer.is_correct);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_of_submit_and_timeout_wins() {
        let (mut session, mut rx) = session(1, true);

        session.select_option("q0-0");
        assert!(session.submit());
        assert_eq!(session.phase(), Phase::Revealed);

        // a late expiry from the cancelled countdown is ignored
        session.handle_timer(TimerEvent {
            epoch: session.countdown.epoch(),
            kind: TimerKind::Expired,
        });
        assert!(!session.submit());

        tokio::time::sleep(Duration::from_secs(30)).await;
        while let Ok(event) = rx.try_recv() {
            session.handle_timer(event);
        }

        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.answers()[0].selected_option_id.as_deref(), Some("q0-0"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_events_are_ignored() {
        let (mut session, _rx) = session(2, false);

        session.handle_timer(TimerEvent {
            epoch: 0,
            kind: TimerKind::Expired,
        });
        session.handle_timer(TimerEvent {
            epoch: 0,
            kind: TimerKind::Tick { remaining: 1 },
        });

        assert!(session.answers().is_empty());
        assert_eq!(session.remaining(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_submit_is_clamped_to_time_limit() {
        let (mut session, _rx) = session(2, false);

        session.select_option("q0-1");
        tokio::time::advance(Duration::from_secs(15)).await;
        assert!(session.submit());

        let answer = &session.answers()[0];
        assert_eq!(answer.time_taken, 10);
        assert!(answer.is_correct);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_from_previous_session_are_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let abandoned = QuizSession::start(
            sample_settings(10, 1),
            vec![sample_question("a0", 0)],
            false,
            tx.clone(),
        )
        .unwrap();
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        drop(abandoned);

        let mut fresh = QuizSession::start(
            sample_settings(10, 1),
            vec![sample_question("b0", 0)],
            false,
            tx,
        )
        .unwrap();

        let mut drained = 0;
        while let Ok(event) = rx.try_recv() {
            fresh.handle_timer(event);
            drained += 1;
        }

        assert_eq!(drained, 10);
        assert!(fresh.answers().is_empty());
        assert_eq!(fresh.phase(), Phase::AwaitingAnswer);
        assert_eq!(fresh.remaining(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_update_remaining() {
        let (mut session, mut rx) = session(1, false);

        let event = rx.recv().await.unwrap();
        session.handle_timer(event);

        assert_eq!(session.remaining(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_practice_mode_waits_for_advance() {
        let (mut session, mut rx) = session(2, true);

        run_out_clock(&mut session, &mut rx).await;
        assert_eq!(session.phase(), Phase::TimedOut);
        assert_eq!(session.current_answer().map(|a| a.is_skipped), Some(true));

        // selection is frozen while revealed
        session.select_option("q0-1");
        assert_eq!(session.selected_option_id(), None);

        session.advance();
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.question_number(), 2);

        session.select_option("q1-1");
        session.submit();
        assert_eq!(session.phase(), Phase::Revealed);
        session.advance();
        assert_eq!(session.phase(), Phase::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_answer_per_question_in_order() {
        let (mut session, mut rx) = session(4, false);

        session.select_option("q0-1");
        session.submit();
        run_out_clock(&mut session, &mut rx).await;
        session.select_option("q2-3");
        tokio::time::advance(Duration::from_secs(4)).await;
        session.submit();
        session.submit();

        assert_eq!(session.phase(), Phase::Finished);
        let result = session.into_result().unwrap();

        let ids: Vec<_> = result.answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q0", "q1", "q2", "q3"]);
        assert_eq!(result.total_questions, 4);
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.skipped_questions, 2);
        assert!(result.answers.iter().all(|a| a.time_taken <= 10));
        assert_eq!(result.total_time_taken, 14);
    }
}
