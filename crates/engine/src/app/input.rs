use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Logical key identity delivered to scenes. Letters and digits arrive as
/// `Char` in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Up,
    Enter,
    Backspace,
    Escape,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown { key: Key, text: Option<char> },
    /// Left click in frame-buffer pixel coordinates.
    MouseDown { x: i32, y: i32 },
    Timer(TimerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampedEvent {
    pub at_ms: u64,
    pub event: InputEvent,
}

impl StampedEvent {
    pub fn new(at_ms: u64, event: InputEvent) -> Self {
        Self { at_ms, event }
    }
}

/// Collects discrete events between frames. Key presses are edge-triggered:
/// a held key produces one `KeyDown` until it is released.
#[derive(Debug, Default)]
pub(crate) struct InputCollector {
    pending: Vec<StampedEvent>,
    down_keys: Vec<PhysicalKey>,
    cursor_position_px: Option<(f64, f64)>,
    left_mouse_is_down: bool,
}

impl InputCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_quit(&mut self, now_ms: u64) {
        self.pending.push(StampedEvent::new(now_ms, InputEvent::Quit));
    }

    pub(crate) fn handle_keyboard_input(&mut self, key_event: &KeyEvent, now_ms: u64) {
        let text = key_event
            .text
            .as_ref()
            .and_then(|text| printable_text(text.as_str()));
        self.handle_key_state(
            key_event.physical_key,
            key_event.state,
            key_event.repeat,
            text,
            now_ms,
        );
    }

    pub(crate) fn handle_key_state(
        &mut self,
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
        text: Option<char>,
        now_ms: u64,
    ) {
        match state {
            ElementState::Pressed => {
                if repeat || self.down_keys.contains(&physical_key) {
                    return;
                }
                self.down_keys.push(physical_key);
                let key = key_from_physical(physical_key);
                self.pending
                    .push(StampedEvent::new(now_ms, InputEvent::KeyDown { key, text }));
            }
            ElementState::Released => {
                self.down_keys.retain(|down| *down != physical_key);
            }
        }
    }

    pub(crate) fn set_cursor_position_px(&mut self, x: f64, y: f64) {
        self.cursor_position_px = Some((x, y));
    }

    pub(crate) fn clear_cursor_position(&mut self) {
        self.cursor_position_px = None;
    }

    pub(crate) fn cursor_position_px(&self) -> Option<(f64, f64)> {
        self.cursor_position_px
    }

    /// Records a left press at an already-mapped buffer position. Returns
    /// false for a held button.
    pub(crate) fn handle_left_mouse(
        &mut self,
        state: ElementState,
        buffer_pos: Option<(i32, i32)>,
        now_ms: u64,
    ) -> bool {
        match state {
            ElementState::Pressed => {
                if self.left_mouse_is_down {
                    return false;
                }
                self.left_mouse_is_down = true;
                if let Some((x, y)) = buffer_pos {
                    self.pending
                        .push(StampedEvent::new(now_ms, InputEvent::MouseDown { x, y }));
                    return true;
                }
                false
            }
            ElementState::Released => {
                self.left_mouse_is_down = false;
                false
            }
        }
    }

    /// Forgets held keys and the held left button. Releases that happen
    /// while the window is unfocused are never delivered.
    pub(crate) fn release_held(&mut self) {
        self.down_keys.clear();
        self.left_mouse_is_down = false;
    }

    pub(crate) fn take_batch(&mut self) -> Vec<StampedEvent> {
        std::mem::take(&mut self.pending)
    }
}

pub(crate) fn key_from_physical(physical_key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical_key else {
        return Key::Other;
    };
    match code {
        KeyCode::Space => Key::Space,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Escape => Key::Escape,
        other => letter_or_digit(other).map_or(Key::Other, Key::Char),
    }
}

fn letter_or_digit(code: KeyCode) -> Option<char> {
    const LETTERS: [(KeyCode, char); 26] = [
        (KeyCode::KeyA, 'a'),
        (KeyCode::KeyB, 'b'),
        (KeyCode::KeyC, 'c'),
        (KeyCode::KeyD, 'd'),
        (KeyCode::KeyE, 'e'),
        (KeyCode::KeyF, 'f'),
        (KeyCode::KeyG, 'g'),
        (KeyCode::KeyH, 'h'),
        (KeyCode::KeyI, 'i'),
        (KeyCode::KeyJ, 'j'),
        (KeyCode::KeyK, 'k'),
        (KeyCode::KeyL, 'l'),
        (KeyCode::KeyM, 'm'),
        (KeyCode::KeyN, 'n'),
        (KeyCode::KeyO, 'o'),
        (KeyCode::KeyP, 'p'),
        (KeyCode::KeyQ, 'q'),
        (KeyCode::KeyR, 'r'),
        (KeyCode::KeyS, 's'),
        (KeyCode::KeyT, 't'),
        (KeyCode::KeyU, 'u'),
        (KeyCode::KeyV, 'v'),
        (KeyCode::KeyW, 'w'),
        (KeyCode::KeyX, 'x'),
        (KeyCode::KeyY, 'y'),
        (KeyCode::KeyZ, 'z'),
    ];
    const DIGITS: [(KeyCode, char); 10] = [
        (KeyCode::Digit0, '0'),
        (KeyCode::Digit1, '1'),
        (KeyCode::Digit2, '2'),
        (KeyCode::Digit3, '3'),
        (KeyCode::Digit4, '4'),
        (KeyCode::Digit5, '5'),
        (KeyCode::Digit6, '6'),
        (KeyCode::Digit7, '7'),
        (KeyCode::Digit8, '8'),
        (KeyCode::Digit9, '9'),
    ];
    LETTERS
        .iter()
        .chain(DIGITS.iter())
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, ch)| *ch)
}

/// First character of the key's text when it is printable.
pub(crate) fn printable_text(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if chars.next().is_some() || first.is_control() {
        return None;
    }
    Some(first)
}
