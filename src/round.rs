use tracing::{debug, info};

use crate::config::DEFAULT_DURATION_SECS;
use crate::corpus::PhraseSource;
use crate::scoring::{score_entry, Counters, EntryScore, ScoreSummary};
use crate::tier::{Tier, TierThresholds};
use crate::tint::{tint_for, Tint};

/// Immutable per-session round settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub duration_secs: u32,
    pub tiers: TierThresholds,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            tiers: TierThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Indicator shown under the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Prompt,
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn text(&self) -> &'static str {
        match self {
            Feedback::Prompt => "Type the phrase and hit 'Enter'",
            Feedback::Correct => "✔",
            Feedback::Incorrect => "✖",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Ignored,
    Counting { remaining_secs: u32 },
    Finished(ScoreSummary),
}

/// Mutable state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub remaining_secs: u32,
    pub phase: Phase,
    pub target: String,
    pub next_target: String,
    pub counters: Counters,
    pub feedback: Feedback,
    pub summary: Option<ScoreSummary>,
}

impl RoundState {
    pub fn fresh(config: &RoundConfig, opening: String) -> Self {
        Self {
            remaining_secs: config.duration_secs,
            phase: Phase::Idle,
            target: opening.clone(),
            next_target: opening,
            counters: Counters::default(),
            feedback: Feedback::Prompt,
            summary: None,
        }
    }

    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    pub fn tick(&mut self, config: &RoundConfig) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Ignored;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Counting {
                remaining_secs: self.remaining_secs,
            };
        }

        let summary = ScoreSummary::from_counters(&self.counters, config.duration_secs);
        self.phase = Phase::Finished;
        self.summary = Some(summary);
        TickOutcome::Finished(summary)
    }

    /// Score `typed` against the current target and queue `next` as the following target.
    /// `next` only replaces the displayed target while running.
    pub fn apply_entry(&mut self, typed: &str, next: String) -> Option<EntryScore> {
        if self.phase == Phase::Finished {
            return None;
        }

        let score = score_entry(&self.target, typed);
        self.counters.record(&score);
        self.feedback = if score.exact {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };

        self.next_target = next;
        if self.phase == Phase::Running {
            self.target = self.next_target.clone();
        }

        Some(score)
    }

    /// Countdown tint; `None` means neutral
    pub fn tint(&self) -> Option<Tint> {
        match self.phase {
            Phase::Finished => None,
            Phase::Idle | Phase::Running => tint_for(self.remaining_secs),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.phase == Phase::Finished
    }
}

/// Fires once for the first keystroke of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstInputTrigger {
    armed: bool,
}

impl FirstInputTrigger {
    pub fn armed() -> Self {
        Self { armed: true }
    }

    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    pub fn rearm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Owns the round state and its phrase supply
#[derive(Debug)]
pub struct Round {
    config: RoundConfig,
    state: RoundState,
    trigger: FirstInputTrigger,
    phrases: Box<dyn PhraseSource>,
}

impl Round {
    pub fn new(config: RoundConfig, mut phrases: Box<dyn PhraseSource>) -> Self {
        let opening = phrases.draw(Tier::LongSentence);
        Self {
            state: RoundState::fresh(&config, opening),
            config,
            trigger: FirstInputTrigger::armed(),
            phrases,
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn summary(&self) -> Option<ScoreSummary> {
        self.state.summary
    }

    /// Called whenever the input buffer changes; starts the round on the first character.
    /// Returns true if this call started the round.
    pub fn on_input(&mut self, text: &str) -> bool {
        if text.is_empty() || self.state.phase != Phase::Idle {
            return false;
        }
        self.fire_trigger()
    }

    fn fire_trigger(&mut self) -> bool {
        if self.trigger.fire() && self.state.start() {
            debug!(duration = self.config.duration_secs, "round started");
            return true;
        }
        false
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.tick(&self.config);
        if let TickOutcome::Finished(summary) = outcome {
            info!(
                wpm = summary.words_per_minute,
                entry_accuracy = summary.entry_accuracy,
                word_accuracy = summary.word_accuracy,
                "round finished"
            );
        }
        outcome
    }

    /// Score one entry. Ignored (returns `None`) once the round has finished.
    /// An entry submitted before the countdown runs starts it.
    pub fn submit_entry(&mut self, typed: &str) -> Option<EntryScore> {
        if self.state.is_locked() {
            return None;
        }

        let tier = self.config.tiers.tier_for(self.state.remaining_secs);
        let next = self.phrases.draw(tier);
        let score = self.state.apply_entry(typed, next)?;
        debug!(
            exact = score.exact,
            matched = score.words_matched,
            offered = score.words_offered,
            %tier,
            "entry scored"
        );

        if self.state.phase == Phase::Idle {
            self.fire_trigger();
        }
        Some(score)
    }

    /// Start over from any phase with zeroed counters and a fresh long sentence
    pub fn reset(&mut self) {
        let opening = self.phrases.draw(Tier::LongSentence);
        self.state = RoundState::fresh(&self.config, opening);
        self.trigger.rearm();
        debug!("round reset");
    }

    pub fn live_entry_accuracy(&self) -> f64 {
        self.state.counters.live_entry_accuracy()
    }
}
