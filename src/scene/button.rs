//! Selectable menu buttons
//!
//! A button is a rectangle with two textures (default and selected) and the
//! action it triggers when confirmed. The music button's icons are swapped at
//! runtime between the "on" and "off" pairs.

use super::{Effect, SceneId};
use crate::audio::AudioCommand;
use crate::render::{Frame, TextureId};
use sdl2::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Play,
    MapMaker,
    Instructions,
    Exit,
    /// Background music toggle; confirmation is handled by the owning menu
    Music,
    Web,
}

/// Default and selected textures of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPair {
    pub default: TextureId,
    pub selected: TextureId,
}

impl IconPair {
    pub const MUSIC_ON: IconPair = IconPair {
        default: TextureId::MusicOn,
        selected: TextureId::MusicOnSelected,
    };

    pub const MUSIC_OFF: IconPair = IconPair {
        default: TextureId::MusicOff,
        selected: TextureId::MusicOffSelected,
    };
}

impl ButtonKind {
    /// Icons a freshly built button of this kind starts with
    pub fn icons(self) -> IconPair {
        let (default, selected) = match self {
            ButtonKind::Play => (TextureId::Play, TextureId::PlaySelected),
            ButtonKind::MapMaker => (TextureId::MapMaker, TextureId::MapMakerSelected),
            ButtonKind::Instructions => (TextureId::Instructions, TextureId::InstructionsSelected),
            ButtonKind::Exit => (TextureId::Exit, TextureId::ExitSelected),
            ButtonKind::Music => return IconPair::MUSIC_ON,
            ButtonKind::Web => (TextureId::Web, TextureId::WebSelected),
        };
        IconPair { default, selected }
    }
}

/// What confirming a button does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    SwitchScene(SceneId),
    LaunchLevelMaker,
    OpenLink(String),
    /// Stop all audio and quit
    Exit,
    /// Never performed by the button itself, see [`MenuScene`](super::MenuScene)
    ToggleMusic,
}

#[derive(Debug, Clone)]
pub struct Button {
    kind: ButtonKind,
    bounds: Rect,
    selected: bool,
    icons: IconPair,
    action: ButtonAction,
}

impl Button {
    pub fn new(kind: ButtonKind, bounds: Rect, action: ButtonAction) -> Self {
        Button {
            kind,
            bounds,
            selected: false,
            icons: kind.icons(),
            action,
        }
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    #[cfg(test)]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    #[cfg(test)]
    pub fn icons(&self) -> IconPair {
        self.icons
    }

    pub fn set_icons(&mut self, icons: IconPair) {
        self.icons = icons;
    }

    /// Hit test against a screen position
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains_point((x, y))
    }

    /// Texture matching the current selection state
    pub fn current_icon(&self) -> TextureId {
        if self.selected {
            self.icons.selected
        } else {
            self.icons.default
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.texture(self.current_icon(), self.bounds);
    }

    /// Push the effects of this button's action
    pub fn perform(&self, effects: &mut Vec<Effect>) {
        match &self.action {
            ButtonAction::SwitchScene(id) => {
                effects.push(Effect::Transition(super::Transition::SwitchTo(*id)))
            }
            ButtonAction::LaunchLevelMaker => effects.push(Effect::LaunchLevelMaker),
            ButtonAction::OpenLink(url) => effects.push(Effect::OpenLink(url.clone())),
            ButtonAction::Exit => {
                effects.push(Effect::Audio(AudioCommand::StopAll));
                effects.push(Effect::Quit);
            }
            ButtonAction::ToggleMusic => {
                log::debug!("Music toggle is handled by its menu, ignoring direct perform");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transition;

    #[test]
    fn test_icon_follows_selection() {
        let mut button = Button::new(
            ButtonKind::Play,
            Rect::new(0, 0, 200, 40),
            ButtonAction::SwitchScene(SceneId::LevelMenu),
        );
        assert_eq!(button.current_icon(), TextureId::Play);

        button.set_selected(true);
        assert_eq!(button.current_icon(), TextureId::PlaySelected);
    }

    #[test]
    fn test_contains_uses_bounds() {
        let button = Button::new(ButtonKind::Exit, Rect::new(100, 100, 50, 20), ButtonAction::Exit);
        assert!(button.contains(100, 100));
        assert!(button.contains(149, 119));
        assert!(!button.contains(150, 100));
        assert!(!button.contains(99, 110));
    }

    #[test]
    fn test_perform_switch_scene() {
        let button = Button::new(
            ButtonKind::Play,
            Rect::new(0, 0, 1, 1),
            ButtonAction::SwitchScene(SceneId::LevelMenu),
        );
        let mut effects = Vec::new();
        button.perform(&mut effects);

        assert_eq!(
            effects,
            vec![Effect::Transition(Transition::SwitchTo(SceneId::LevelMenu))]
        );
    }

    #[test]
    fn test_perform_exit_stops_audio_then_quits() {
        let button = Button::new(ButtonKind::Exit, Rect::new(0, 0, 1, 1), ButtonAction::Exit);
        let mut effects = Vec::new();
        button.perform(&mut effects);

        assert_eq!(
            effects,
            vec![Effect::Audio(AudioCommand::StopAll), Effect::Quit]
        );
    }

    #[test]
    fn test_music_button_starts_with_on_icons() {
        let button = Button::new(
            ButtonKind::Music,
            Rect::new(0, 0, 1, 1),
            ButtonAction::ToggleMusic,
        );
        assert_eq!(button.icons(), IconPair::MUSIC_ON);

        let mut effects = Vec::new();
        button.perform(&mut effects);
        assert!(effects.is_empty());
    }
}
