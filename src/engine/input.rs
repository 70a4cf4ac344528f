use crate::browser;
use anyhow::Result;
use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use wasm_bindgen::JsCast;

/// Movement keys the game reacts to, everything else is dropped at the edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Maps a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held movement keys in the order they were pressed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    held: Vec<Direction>,
}

impl InputState {
    pub fn press(&mut self, direction: Direction) {
        if !self.held.contains(&direction) {
            self.held.push(direction);
        }
    }

    pub fn release(&mut self, direction: Direction) {
        self.held.retain(|held| *held != direction);
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    pub fn held(&self) -> &[Direction] {
        &self.held
    }
}

/// Raw key events as they arrive from the window, carrying `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPress {
    KeyDown(String),
    KeyUp(String),
}

/// Hooks window keydown/keyup into a channel drained once per frame
pub fn prepare_input() -> Result<UnboundedReceiver<KeyPress>> {
    let (keydown_sender, keyevent_receiver) = unbounded();
    let keyup_sender = keydown_sender.clone();

    let onkeydown = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        let key = event.key();
        // arrow keys would otherwise scroll the page
        if Direction::from_key(&key).is_some() {
            event.prevent_default();
        }
        let _ = keydown_sender.unbounded_send(KeyPress::KeyDown(key));
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    let onkeyup = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        let _ = keyup_sender.unbounded_send(KeyPress::KeyUp(event.key()));
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    let window = browser::window()?;
    window.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
    window.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
    // listeners live for the whole page
    onkeydown.forget();
    onkeyup.forget();

    Ok(keyevent_receiver)
}

/// Collects every key event queued since the last frame
pub fn drain(keyevent_receiver: &mut UnboundedReceiver<KeyPress>) -> Vec<KeyPress> {
    let mut keys = Vec::new();
    // Err : nothing queued right now, or the channel closed
    while let Ok(key) = keyevent_receiver.try_recv() {
        keys.push(key);
    }
    keys
}
