use crate::config::BindingConfig;
use crate::error::AppError;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

/// Raw input the scenes care about
///
/// This is the subset of SDL2 events the menus react to, stripped of
/// timestamps and window ids so scenes can be driven without a live SDL
/// context (tests build these directly).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close requested
    Closed,
    KeyPressed(Keycode),
    MouseMoved { x: i32, y: i32 },
    MousePressed { button: MouseButton, x: i32, y: i32 },
    JoystickPressed { button: u8 },
}

impl InputEvent {
    /// Translate an SDL2 event, dropping kinds no scene handles
    pub fn from_sdl(event: &Event) -> Option<Self> {
        match *event {
            Event::Quit { .. } => Some(InputEvent::Closed),
            Event::KeyDown {
                keycode: Some(key), ..
            } => Some(InputEvent::KeyPressed(key)),
            Event::MouseMotion { x, y, .. } => Some(InputEvent::MouseMoved { x, y }),
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => Some(InputEvent::MousePressed {
                button: mouse_btn,
                x,
                y,
            }),
            Event::JoyButtonDown { button_idx, .. } => {
                Some(InputEvent::JoystickPressed { button: button_idx })
            }
            _ => None,
        }
    }
}

/// Drain every pending SDL2 event in arrival order
pub fn poll_events(event_pump: &mut EventPump) -> Vec<InputEvent> {
    event_pump
        .poll_iter()
        .filter_map(|event| InputEvent::from_sdl(&event))
        .collect()
}

/// Navigation intents a scene can act on
///
/// Decouples "which key was pressed" from "what the menu should do", the same
/// way for every scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    /// Enter, keypad enter, space or the joystick confirm button
    Confirm,
    /// Left mouse press at a screen position
    Click(i32, i32),
    /// Pointer moved to a screen position
    Hover(i32, i32),
    ToggleMusic,
    OpenWebLink,
    /// Escape: leave the current scene
    Back,
    Close,
}

/// Resolved key bindings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    pub music_toggle: Keycode,
    pub web_link: Keycode,
    pub joystick_confirm: u8,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            music_toggle: Keycode::M,
            web_link: Keycode::W,
            joystick_confirm: 0,
        }
    }
}

impl KeyBindings {
    /// Resolve the key names from the config file
    pub fn from_config(config: &BindingConfig) -> Result<Self, AppError> {
        let lookup = |name: &str| {
            Keycode::from_name(name).ok_or_else(|| AppError::InvalidKey(name.to_string()))
        };

        Ok(KeyBindings {
            music_toggle: lookup(&config.music_toggle)?,
            web_link: lookup(&config.web_link)?,
            joystick_confirm: config.joystick_confirm,
        })
    }

    /// Map an input event to a navigation action, if it has one
    pub fn action_for(&self, event: &InputEvent) -> Option<NavAction> {
        match *event {
            InputEvent::Closed => Some(NavAction::Close),
            InputEvent::KeyPressed(key) => self.action_for_key(key),
            InputEvent::MouseMoved { x, y } => Some(NavAction::Hover(x, y)),
            InputEvent::MousePressed {
                button: MouseButton::Left,
                x,
                y,
            } => Some(NavAction::Click(x, y)),
            InputEvent::MousePressed { .. } => None,
            InputEvent::JoystickPressed { button } if button == self.joystick_confirm => {
                Some(NavAction::Confirm)
            }
            InputEvent::JoystickPressed { .. } => None,
        }
    }

    fn action_for_key(&self, key: Keycode) -> Option<NavAction> {
        // Hotkeys first so a rebinding can't be shadowed by the fixed keys
        if key == self.music_toggle {
            return Some(NavAction::ToggleMusic);
        }
        if key == self.web_link {
            return Some(NavAction::OpenWebLink);
        }

        match key {
            Keycode::Up => Some(NavAction::Up),
            Keycode::Down => Some(NavAction::Down),
            Keycode::Return | Keycode::KpEnter | Keycode::Space => Some(NavAction::Confirm),
            Keycode::Escape => Some(NavAction::Back),
            _ => None,
        }
    }
}
