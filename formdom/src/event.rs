/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press event, targeted at focused element
    Key {
        target: Option<String>,
        key: Key,
        modifiers: Modifiers,
    },
    /// Mouse click event (press and release on the same element)
    Click {
        target: Option<String>,
        x: i32,
        y: i32,
        button: MouseButton,
    },
    /// Mouse button pressed
    Press {
        target: Option<String>,
        button: MouseButton,
    },
    /// Mouse button released
    Release {
        target: Option<String>,
        button: MouseButton,
    },
    /// Pointer entered an element
    Enter { target: String },
    /// Pointer left an element
    Leave { target: String },
    /// Mouse wheel. Positive `delta_y` scrolls content down.
    Wheel { target: Option<String>, delta_y: i32 },
    /// Text field value changed by typing
    Input { target: String, value: String },
    /// Element gained focus
    Focus { target: String },
    /// Element lost focus
    Blur { target: String },
    /// Window resized
    Resize { width: i32, height: i32 },
    /// Window scrolled to a new position
    Scroll { x: i32, y: i32 },
}

impl Event {
    /// Convenience constructor for an unmodified key press.
    pub fn key(key: Key) -> Self {
        Event::Key {
            target: None,
            key,
            modifiers: Modifiers::new(),
        }
    }

    /// Convenience constructor for a left click on an element.
    pub fn click(target: impl Into<String>) -> Self {
        Event::Click {
            target: Some(target.into()),
            x: 0,
            y: 0,
            button: MouseButton::Left,
        }
    }

    /// The element the event was dispatched to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Event::Key { target, .. }
            | Event::Click { target, .. }
            | Event::Press { target, .. }
            | Event::Release { target, .. }
            | Event::Wheel { target, .. } => target.as_deref(),
            Event::Enter { target }
            | Event::Leave { target }
            | Event::Input { target, .. }
            | Event::Focus { target }
            | Event::Blur { target } => Some(target),
            Event::Resize { .. } | Event::Scroll { .. } => None,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` name.
    pub fn from_dom(name: &str) -> Option<Self> {
        let key = match name {
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}
