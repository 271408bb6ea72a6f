use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// How often the shell wakes up to poll the countdown timer
pub const POLL_RATE: Duration = Duration::from_millis(100);

#[derive(Clone, Debug)]
pub enum ShellEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived within the poll interval
    Idle,
}

pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for the next event
    fn recv_timeout(&self, timeout: Duration) -> Result<ShellEvent, RecvTimeoutError>;
}

/// Events fed through a channel, by the terminal reader thread or by a test script
pub struct ChannelEvents {
    rx: Receiver<ShellEvent>,
}

impl ChannelEvents {
    pub fn new(rx: Receiver<ShellEvent>) -> Self {
        Self { rx }
    }

    pub fn channel() -> (Sender<ShellEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }

    /// Spawn a reader thread forwarding terminal key presses and resizes
    pub fn terminal() -> Self {
        let (tx, events) = Self::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(ShellEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(ShellEvent::Resize),
                Ok(_) => Ok(()),
                Err(_) => break,
            };
            if forwarded.is_err() {
                break;
            }
        });

        events
    }
}

impl EventSource for ChannelEvents {
    fn recv_timeout(&self, timeout: Duration) -> Result<ShellEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Time source for the countdown
pub trait Clock {
    fn now(&self) -> Instant;

    /// Called when a poll interval passed without events
    fn idle(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Synthetic clock that jumps `step` forward on every idle poll
#[derive(Clone, Copy, Debug)]
pub struct SteppedClock {
    now: Instant,
    step: Duration,
}

impl SteppedClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Instant::now(),
            step,
        }
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> Instant {
        self.now
    }

    fn idle(&mut self) {
        self.now += self.step;
    }
}

/// One event together with the instant it is handled at
#[derive(Clone, Debug)]
pub struct Step {
    pub event: ShellEvent,
    pub now: Instant,
}

/// Pulls events from a source, stamping each with the clock
pub struct Runner<E: EventSource, C: Clock> {
    events: E,
    clock: C,
    poll_interval: Duration,
}

impl<E: EventSource, C: Clock> Runner<E, C> {
    pub fn new(events: E, clock: C, poll_interval: Duration) -> Self {
        Self {
            events,
            clock,
            poll_interval,
        }
    }

    /// Blocks up to the poll interval; a timeout or a closed source yields `Idle`
    pub fn step(&mut self) -> Step {
        let event = match self.events.recv_timeout(self.poll_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                self.clock.idle();
                ShellEvent::Idle
            }
        };
        Step {
            event,
            now: self.clock.now(),
        }
    }
}

/// Cancellable repeating timer driven by explicit instants.
///
/// `poll` fires at most once per call and re-arms one period after the deadline
/// it consumed, so a caller looping `while timer.poll(now)` catches up on missed
/// periods. `cancel` drops any pending deadline; nothing fires until `arm`.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}
