//! Gameplay scene stand-in
//!
//! The maze itself (level parsing, movement, collisions) lives outside this
//! crate's scope. This scene only knows which level was chosen and how to get
//! back to the menu.

use super::{Effect, SceneBase, SceneId, Transition};
use crate::audio::AudioCommand;
use crate::input_system::{InputEvent, KeyBindings, NavAction};
use crate::render::{Frame, TextureId};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

pub struct GameScene {
    pub(super) base: SceneBase,
    level: Option<i32>,
    bindings: KeyBindings,
    screen_width: u32,
    screen_height: u32,
}

impl GameScene {
    pub fn new(title: &str, screen_width: u32, screen_height: u32, bindings: KeyBindings) -> Self {
        GameScene {
            base: SceneBase::new(title),
            level: None,
            bindings,
            screen_width,
            screen_height,
        }
    }

    #[cfg(test)]
    pub fn level(&self) -> Option<i32> {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        log::debug!("Game scene loading level {}", level);
        self.level = Some(level);
    }

    pub fn execute_event(&mut self, event: &InputEvent, effects: &mut Vec<Effect>) {
        match self.bindings.action_for(event) {
            Some(NavAction::Back) => {
                effects.push(Effect::Transition(Transition::SwitchTo(SceneId::MainMenu)))
            }
            Some(NavAction::Close) => {
                effects.push(Effect::Audio(AudioCommand::StopAll));
                effects.push(Effect::Quit);
                self.base.running = false;
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.clear(Color::BLACK);
        frame.texture(
            TextureId::Background,
            Rect::new(0, 0, self.screen_width, self.screen_height),
        );

        let banner = match self.level {
            Some(level) => format!("Level {}", level),
            None => "No level".to_string(),
        };
        let line = self.screen_height / 16;
        frame.text(banner, line as i32, line as i32, line, Color::WHITE);
        frame.text(
            "ESC - menu",
            line as i32,
            (self.screen_height - 2 * line) as i32,
            line / 2,
            Color::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Keycode;

    #[test]
    fn test_banner_shows_chosen_level() {
        let mut game = GameScene::new("Game", 800, 800, KeyBindings::default());
        game.set_level(4);

        let mut frame = Frame::new();
        game.draw(&mut frame);
        assert!(frame.texts().any(|text| text == "Level 4"));
    }

    #[test]
    fn test_escape_switches_to_main_menu() {
        let mut game = GameScene::new("Game", 800, 800, KeyBindings::default());
        let mut effects = Vec::new();
        game.execute_event(&InputEvent::KeyPressed(Keycode::Escape), &mut effects);

        assert_eq!(
            effects,
            vec![Effect::Transition(Transition::SwitchTo(SceneId::MainMenu))]
        );
    }

    #[test]
    fn test_arrows_are_ignored() {
        let mut game = GameScene::new("Game", 800, 800, KeyBindings::default());
        let mut effects = Vec::new();
        game.execute_event(&InputEvent::KeyPressed(Keycode::Up), &mut effects);
        assert!(effects.is_empty());
    }
}
