//! Level select scene
//!
//! A single number stepper. Up/Down change the level, Confirm passes the
//! level to the game scene and hands control straight to it.

use super::{Effect, SceneBase, SceneId, Transition};
use crate::audio::{AudioCommand, Sound};
use crate::config::LevelBounds;
use crate::input_system::{InputEvent, KeyBindings, NavAction};
use crate::render::{Frame, TextureId};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

/// Level shown when the scene is first built
const FIRST_LEVEL: i32 = 1;

pub struct LevelMenuScene {
    pub(super) base: SceneBase,
    level: i32,
    bounds: LevelBounds,
    bindings: KeyBindings,
    screen_width: u32,
    screen_height: u32,
}

impl LevelMenuScene {
    pub fn new(
        title: &str,
        screen_width: u32,
        screen_height: u32,
        bounds: LevelBounds,
        bindings: KeyBindings,
    ) -> Self {
        LevelMenuScene {
            base: SceneBase::new(title),
            level: bounds.clamp(FIRST_LEVEL),
            bounds,
            bindings,
            screen_width,
            screen_height,
        }
    }

    #[cfg(test)]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Text shown for the current level
    pub fn label(&self) -> String {
        format!("Level {}", self.level)
    }

    pub fn execute_event(&mut self, event: &InputEvent, effects: &mut Vec<Effect>) {
        match self.bindings.action_for(event) {
            Some(NavAction::Up) => self.arrow_up(effects),
            Some(NavAction::Down) => self.arrow_down(effects),
            Some(NavAction::Confirm) => self.confirm(effects),
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

    pub fn arrow_up(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::Audio(AudioCommand::Play(Sound::Click)));
        self.level = self.bounds.clamp(self.level.saturating_add(1));
    }

    pub fn arrow_down(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::Audio(AudioCommand::Play(Sound::Click)));
        self.level = self.bounds.clamp(self.level.saturating_sub(1));
    }

    /// Hand the chosen level to the game and display it right away
    pub fn confirm(&mut self, effects: &mut Vec<Effect>) {
        log::info!("Starting level {}", self.level);
        effects.push(Effect::LevelChosen(self.level));
        effects.push(Effect::Transition(Transition::HandOff(SceneId::Game)));
    }

    pub fn draw(&self, frame: &mut Frame) {
        let (width, height) = (self.screen_width as f32, self.screen_height as f32);

        frame.clear(Color::WHITE);
        frame.texture(
            TextureId::Background,
            Rect::new(0, 0, self.screen_width, self.screen_height),
        );

        // Wall-textured plate behind the level number
        let plate = Rect::new(
            (width / 12.0) as i32,
            (height / 2.5) as i32,
            (width / 1.2) as u32,
            (height / 5.0) as u32,
        );
        frame.texture(TextureId::Wall, plate);

        let text_height = plate.height() * 3 / 4;
        frame.text(
            self.label(),
            plate.x() + (width / 9.5) as i32,
            plate.y() + (plate.height() - text_height) as i32 / 2,
            text_height,
            Color::BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Keycode;

    fn scene(bounds: LevelBounds) -> LevelMenuScene {
        LevelMenuScene::new("Select Level", 800, 800, bounds, KeyBindings::default())
    }

    fn press(scene: &mut LevelMenuScene, key: Keycode) -> Vec<Effect> {
        let mut effects = Vec::new();
        scene.execute_event(&InputEvent::KeyPressed(key), &mut effects);
        effects
    }

    #[test]
    fn test_starts_at_level_one() {
        let scene = scene(LevelBounds::default());
        assert_eq!(scene.level(), 1);
        assert_eq!(scene.label(), "Level 1");
    }

    #[test]
    fn test_three_ups_then_confirm() {
        let mut scene = scene(LevelBounds::default());
        for _ in 0..3 {
            press(&mut scene, Keycode::Up);
        }
        assert_eq!(scene.label(), "Level 4");

        let effects = press(&mut scene, Keycode::Return);
        assert_eq!(
            effects,
            vec![
                Effect::LevelChosen(4),
                Effect::Transition(Transition::HandOff(SceneId::Game)),
            ]
        );
    }

    #[test]
    fn test_unbounded_counter_goes_negative() {
        let mut scene = scene(LevelBounds::default());
        for _ in 0..3 {
            press(&mut scene, Keycode::Down);
        }
        assert_eq!(scene.level(), -2);
        assert_eq!(scene.label(), "Level -2");
    }

    #[test]
    fn test_bounds_saturate() {
        let mut scene = scene(LevelBounds {
            min: Some(1),
            max: Some(3),
        });

        press(&mut scene, Keycode::Down);
        assert_eq!(scene.level(), 1);

        for _ in 0..5 {
            press(&mut scene, Keycode::Up);
        }
        assert_eq!(scene.level(), 3);
    }

    #[test]
    fn test_escape_returns_to_main_menu() {
        let mut scene = scene(LevelBounds::default());
        let effects = press(&mut scene, Keycode::Escape);
        assert_eq!(
            effects,
            vec![Effect::Transition(Transition::SwitchTo(SceneId::MainMenu))]
        );
    }

    #[test]
    fn test_close_quits() {
        let mut scene = scene(LevelBounds::default());
        let mut effects = Vec::new();
        scene.execute_event(&InputEvent::Closed, &mut effects);
        assert_eq!(effects.last(), Some(&Effect::Quit));
    }

    #[test]
    fn test_draw_shows_label_on_wall() {
        let mut scene = scene(LevelBounds::default());
        press(&mut scene, Keycode::Up);

        let mut frame = Frame::new();
        scene.draw(&mut frame);

        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["Level 2"]);
        assert!(frame.textures().any(|id| id == TextureId::Wall));
    }
}
