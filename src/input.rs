// Copyright (c) 2026 rezky_nightky

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

/// Presses arriving closer together than this are treated as key repeat
/// when no release was seen in between.
///
/// Known limitation: without release reporting, a deliberate double tap
/// faster than this window only flips the mode once.
pub const REPEAT_WINDOW: Duration = Duration::from_millis(600);

/// What the loop needs to know after one poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    /// The toggle key went down since the last poll.
    pub toggle: bool,
    pub exit: bool,
    pub resized: bool,
}

pub trait InputSource {
    /// Drains pending input without blocking.
    fn poll(&mut self) -> io::Result<Signals>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyLevel {
    Pressed,
    Repeated,
    Released,
}

/// Turns key level reports into one edge per press-release cycle.
#[derive(Clone, Debug)]
pub struct ToggleLatch {
    reports_release: bool,
    held: bool,
    last_seen: Option<Instant>,
}

impl ToggleLatch {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            held: false,
            last_seen: None,
        }
    }

    fn recently_seen(&self, now: Instant) -> bool {
        self.last_seen
            .is_some_and(|t| now.saturating_duration_since(t) < REPEAT_WINDOW)
    }

    /// Returns `true` exactly when this report starts a new press.
    ///
    /// Some keys (Enter under the kitty protocol) never report a release
    /// even when others do, so a held latch also re-arms once the key has
    /// been quiet for longer than [`REPEAT_WINDOW`].
    pub fn observe(&mut self, level: KeyLevel, now: Instant) -> bool {
        match level {
            KeyLevel::Released => {
                self.held = false;
                false
            }
            KeyLevel::Repeated => {
                self.last_seen = Some(now);
                false
            }
            KeyLevel::Pressed => {
                let repeat = (self.held || !self.reports_release) && self.recently_seen(now);
                self.last_seen = Some(now);
                self.held = true;
                !repeat
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Key {
    Toggle,
    Exit,
}

fn classify(k: &KeyEvent) -> Option<Key> {
    match (k.code, k.modifiers) {
        (KeyCode::Enter, _) => Some(Key::Toggle),
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Key::Exit),
        (KeyCode::Char(' '), _) | (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => Some(Key::Exit),
        _ => None,
    }
}

fn level(kind: KeyEventKind) -> KeyLevel {
    match kind {
        KeyEventKind::Press => KeyLevel::Pressed,
        KeyEventKind::Repeat => KeyLevel::Repeated,
        KeyEventKind::Release => KeyLevel::Released,
    }
}

/// Keyboard and resize events from the controlling terminal.
pub struct TerminalInput {
    latch: ToggleLatch,
}

impl TerminalInput {
    pub fn new(reports_release: bool) -> Self {
        Self {
            latch: ToggleLatch::new(reports_release),
        }
    }

    fn apply(&mut self, ev: Event, now: Instant, out: &mut Signals) {
        match ev {
            Event::Resize(cols, rows) => {
                debug!("terminal resized to {}x{}", cols, rows);
                out.resized = true;
            }
            Event::Key(k) => match classify(&k) {
                Some(Key::Toggle) => {
                    if self.latch.observe(level(k.kind), now) {
                        out.toggle = true;
                    }
                }
                Some(Key::Exit) if k.kind != KeyEventKind::Release => out.exit = true,
                _ => {}
            },
            _ => {}
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<Signals> {
        let mut out = Signals::default();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.apply(ev, Instant::now(), &mut out);
        }
        Ok(out)
    }
}
