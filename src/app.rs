use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::round::{Phase, Round, TickOutcome};
use crate::runtime::{RepeatingTimer, ShellEvent, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Help,
    About,
}

/// Terminal shell around a single round
#[derive(Debug)]
pub struct App {
    pub round: Round,
    pub input: String,
    pub popup: Option<Popup>,
    pub should_quit: bool,
    timer: RepeatingTimer,
}

impl App {
    pub fn new(round: Round) -> Self {
        Self {
            round,
            input: String::new(),
            popup: None,
            should_quit: false,
            timer: RepeatingTimer::every_second(),
        }
    }

    /// "Go again" is unavailable while the countdown runs
    pub fn can_go_again(&self) -> bool {
        self.round.phase() != Phase::Running
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Apply one runner step, then catch the countdown up to its instant.
    /// Steady typing never yields `Idle`, so the timer is polled on every step.
    pub fn handle(&mut self, step: Step) {
        if let ShellEvent::Key(key) = step.event {
            self.on_key(key, step.now);
        }
        self.on_poll(step.now);
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // any key dismisses a popup
        if self.popup.take().is_some() {
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.popup = Some(Popup::Help),
            KeyCode::F(2) => self.popup = Some(Popup::About),
            KeyCode::Tab => {
                self.go_again();
            }
            KeyCode::Enter => self.submit(now),
            KeyCode::Backspace => {
                if !self.round.state().is_locked() {
                    self.input.pop();
                }
            }
            // control and alt chords are commands, not text
            KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                self.type_char(c, now)
            }
            _ => {}
        }
    }

    /// Advance the countdown for every second elapsed by `now`
    pub fn on_poll(&mut self, now: Instant) {
        while self.timer.poll(now) {
            if let TickOutcome::Finished(_) = self.round.tick() {
                self.input.clear();
            }
            self.sync_timer(now);
        }
    }

    pub fn go_again(&mut self) -> bool {
        if !self.can_go_again() {
            return false;
        }
        self.round.reset();
        self.input.clear();
        self.timer.cancel();
        true
    }

    fn type_char(&mut self, c: char, now: Instant) {
        if self.round.state().is_locked() {
            return;
        }
        self.input.push(c);
        self.round.on_input(&self.input);
        self.sync_timer(now);
    }

    fn submit(&mut self, now: Instant) {
        let typed = std::mem::take(&mut self.input);
        self.round.submit_entry(&typed);
        self.sync_timer(now);
    }

    fn sync_timer(&mut self, now: Instant) {
        match self.round.phase() {
            Phase::Running => {
                if !self.timer.is_armed() {
                    self.timer.arm(now);
                }
            }
            Phase::Idle | Phase::Finished => self.timer.cancel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::FixedPhrases;
    use crate::round::RoundConfig;
    use crate::tier::Tier;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(duration_secs: u32) -> App {
        let phrases = FixedPhrases::new()
            .with(Tier::LongSentence, &["hello world"])
            .with(Tier::OneWord, &["apple"]);
        let config = RoundConfig {
            duration_secs,
            ..RoundConfig::default()
        };
        App::new(Round::new(config, Box::new(phrases)))
    }

    fn type_str(app: &mut App, s: &str, now: Instant) {
        for c in s.chars() {
            app.on_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn test_first_char_arms_timer() {
        let mut app = test_app(60);
        let now = Instant::now();

        assert!(!app.timer_armed());
        type_str(&mut app, "h", now);
        assert_eq!(app.round.phase(), Phase::Running);
        assert!(app.timer_armed());
    }

    #[test]
    fn test_enter_submits_and_clears_input() {
        let mut app = test_app(60);
        let now = Instant::now();

        type_str(&mut app, "hello world", now);
        app.on_key(key(KeyCode::Enter), now);

        assert!(app.input.is_empty());
        assert_eq!(app.round.state().counters.correct_submissions, 1);
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut app = test_app(60);
        let now = Instant::now();

        type_str(&mut app, "helo", now);
        app.on_key(key(KeyCode::Backspace), now);
        assert_eq!(app.input, "hel");
    }

    #[test]
    fn test_poll_counts_down_and_finishes() {
        let mut app = test_app(3);
        let start = Instant::now();
        type_str(&mut app, "hel", start);

        app.on_poll(start + Duration::from_millis(1000));
        assert_eq!(app.round.state().remaining_secs, 2);

        app.on_poll(start + Duration::from_millis(5000));
        assert_eq!(app.round.phase(), Phase::Finished);
        assert_eq!(app.round.state().remaining_secs, 0);
        assert!(app.input.is_empty());
        assert!(!app.timer_armed());
    }

    #[test]
    fn test_input_locked_after_finish() {
        let mut app = test_app(1);
        let start = Instant::now();
        type_str(&mut app, "h", start);
        app.on_poll(start + Duration::from_secs(1));
        assert_eq!(app.round.phase(), Phase::Finished);

        type_str(&mut app, "abc", start);
        app.on_key(key(KeyCode::Enter), start);
        assert!(app.input.is_empty());
        assert_eq!(app.round.state().counters.total_submissions, 0);
    }

    #[test]
    fn test_go_again_disabled_while_running() {
        let mut app = test_app(60);
        let now = Instant::now();
        type_str(&mut app, "h", now);

        app.on_key(key(KeyCode::Tab), now);
        assert_eq!(app.round.phase(), Phase::Running);
        assert!(!app.go_again());
    }

    #[test]
    fn test_go_again_after_finish_cancels_stale_ticks() {
        let mut app = test_app(1);
        let start = Instant::now();
        type_str(&mut app, "h", start);
        app.on_poll(start + Duration::from_secs(1));

        app.on_key(key(KeyCode::Tab), start);
        assert_eq!(app.round.phase(), Phase::Idle);
        assert!(!app.timer_armed());

        // nothing may fire against the fresh round
        app.on_poll(start + Duration::from_secs(30));
        assert_eq!(app.round.state().remaining_secs, 1);
        assert_eq!(app.round.phase(), Phase::Idle);
    }

    #[test]
    fn test_popups_open_and_close() {
        let mut app = test_app(60);
        let now = Instant::now();

        app.on_key(key(KeyCode::F(1)), now);
        assert_eq!(app.popup, Some(Popup::Help));

        // closing key is swallowed
        app.on_key(key(KeyCode::Char('x')), now);
        assert_eq!(app.popup, None);
        assert!(app.input.is_empty());
        assert_eq!(app.round.phase(), Phase::Idle);

        app.on_key(key(KeyCode::F(2)), now);
        assert_eq!(app.popup, Some(Popup::About));
        app.on_key(key(KeyCode::Esc), now);
        assert_eq!(app.popup, None);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app(60);
        app.on_key(key(KeyCode::Esc), Instant::now());
        assert!(app.should_quit);

        let mut app = test_app(60);
        app.on_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(app.should_quit);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_control_chords_are_not_typed() {
        let mut app = test_app(60);
        let now = Instant::now();

        app.on_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL), now);
        app.on_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT), now);

        assert!(app.input.is_empty());
        assert_eq!(app.round.phase(), Phase::Idle);
        assert!(!app.timer_armed());
    }

    #[test]
    fn test_shifted_chars_are_typed() {
        let mut app = test_app(60);
        app.on_key(
            KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT),
            Instant::now(),
        );

        assert_eq!(app.input, "H");
        assert_eq!(app.round.phase(), Phase::Running);
    }

    #[test]
    fn test_handle_polls_after_key() {
        let mut app = test_app(60);
        let start = Instant::now();
        type_str(&mut app, "h", start);

        app.handle(Step {
            event: ShellEvent::Key(key(KeyCode::Char('e'))),
            now: start + Duration::from_secs(2),
        });

        assert_eq!(app.input, "he");
        assert_eq!(app.round.state().remaining_secs, 58);
    }
}
