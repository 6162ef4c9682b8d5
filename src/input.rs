/// Terminal key stream → per-tick [`FrameInput`].
///
/// Held state: instead of acting on each key event individually, we record the
/// tick of the last press/repeat event for every key.  A key counts as held if
/// it was refreshed within `HOLD_WINDOW` ticks.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` ticks of silence.
///
/// Fire is edge-triggered: a Space press only fires if Space was seen within
/// `FIRE_DEBOUNCE` ticks, so auto-repeat never turns into a stream of shots.
/// The debounce window is longer than the hold window because it has to span
/// the OS's initial repeat delay, not just the gap between repeats.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::{FrameInput, HeldKeys, InputEvent};

/// At 20 ticks/s, 3 ticks (150 ms) outlasts the gap between auto-repeats once
/// they are running.  It does not cover the initial repeat delay, so a held
/// movement key may flicker off for a few ticks right after the first press.
const HOLD_WINDOW: u64 = 3;

/// 14 ticks (700 ms) outlasts the OS's initial key-repeat delay (typically
/// 250–600 ms).  A Space press within this window of the last Space event is
/// a repeat, not a new shot.
const FIRE_DEBOUNCE: u64 = 14;

#[derive(Debug, Default)]
pub struct KeyTracker {
    key_tick: HashMap<KeyCode, u64>,
    events: Vec<InputEvent>,
    tick: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw key event received during the current tick.
    pub fn handle(&mut self, key: KeyEvent) {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;
        let code = normalize(code);
        match kind {
            KeyEventKind::Press => {
                if is_quit(code, modifiers) {
                    self.events.push(InputEvent::Quit);
                }
                if code == KeyCode::Char(' ') && !self.seen_within(code, FIRE_DEBOUNCE) {
                    self.events.push(InputEvent::Fire);
                }
                self.key_tick.insert(code, self.tick);
            }
            KeyEventKind::Repeat => {
                self.key_tick.insert(code, self.tick);
            }
            KeyEventKind::Release => {
                self.key_tick.remove(&code);
            }
        }
    }

    /// Close the current tick: report held keys and drain queued events.
    pub fn end_tick(&mut self) -> FrameInput {
        let held = HeldKeys {
            left: self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            right: self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            up: self.is_held(KeyCode::Up) || self.is_held(KeyCode::Char('w')),
            down: self.is_held(KeyCode::Down) || self.is_held(KeyCode::Char('s')),
        };
        self.tick += 1;
        FrameInput {
            held,
            events: std::mem::take(&mut self.events),
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.seen_within(key, HOLD_WINDOW)
    }

    fn seen_within(&self, key: KeyCode, window: u64) -> bool {
        self.key_tick
            .get(&key)
            .map(|&last| self.tick.saturating_sub(last) <= window)
            .unwrap_or(false)
    }
}

/// Letters are tracked case-insensitively so Shift or Caps Lock don't stick keys.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Q, Esc or Ctrl-C.  Raw mode swallows SIGINT, so Ctrl-C has to be handled
/// as an ordinary key everywhere the program waits for input.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && is_quit(normalize(key.code), key.modifiers)
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
