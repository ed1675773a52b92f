//! Scenes: full-screen interactive modes
//!
//! Each scene owns its own state and reacts to input, but never performs side
//! effects directly. Handling an event pushes [`Effect`]s (play a sound, switch
//! scene, quit...) which the [`Window`](crate::window::Window) carries out in
//! order. Drawing pushes commands into a [`Frame`].
//!
//! # Available Scenes
//!
//! - [`MenuScene`] - Main menu with the selection ring and music toggle
//! - [`LevelMenuScene`] - Level number stepper that hands off into the game
//! - [`GameScene`] - Gameplay stand-in
//!
//! # Example Usage
//!
//! ```rust
//! let mut scene = Scene::LevelMenu(LevelMenuScene::new(/* ... */));
//! let tick = scene.tick(&[InputEvent::KeyPressed(Keycode::Up)]);
//! // tick.frame is ready to present, tick.effects ready to apply
//! ```

pub mod button;
pub mod game;
pub mod level_menu;
pub mod menu;

pub use button::{Button, ButtonAction, ButtonKind, IconPair};
pub use game::GameScene;
pub use level_menu::LevelMenuScene;
pub use menu::MenuScene;

use crate::audio::AudioCommand;
use crate::input_system::InputEvent;
use crate::render::Frame;

/// Names every scene the window can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    MainMenu,
    LevelMenu,
    Game,
}

/// How control moves to another scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Set the current scene and stop the active one; the window's loop
    /// picks the new scene up
    SwitchTo(SceneId),
    /// Set the current scene and display it immediately, nested inside the
    /// active scene's frame
    HandOff(SceneId),
}

impl Transition {
    pub fn target(self) -> SceneId {
        match self {
            Transition::SwitchTo(id) | Transition::HandOff(id) => id,
        }
    }
}

/// Scene that should be current after `transition` is applied to `current`
pub fn next_scene(current: SceneId, transition: Option<Transition>) -> SceneId {
    match transition {
        Some(transition) => transition.target(),
        None => current,
    }
}

/// Side effects requested by a scene, applied by the window in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Audio(AudioCommand),
    Transition(Transition),
    /// Level picked in the level menu, passed on to the game scene
    LevelChosen(i32),
    OpenLink(String),
    LaunchLevelMaker,
    /// Close the window and end the program
    Quit,
}

/// Output of one frame of a scene
#[derive(Debug, Default)]
pub struct Tick {
    pub frame: Frame,
    pub effects: Vec<Effect>,
}

/// State every scene shares
#[derive(Debug, Clone)]
pub struct SceneBase {
    title: String,
    running: bool,
}

impl SceneBase {
    pub fn new(title: impl Into<String>) -> Self {
        SceneBase {
            title: title.into(),
            running: false,
        }
    }
}

/// Every scene variant
///
/// A closed enum rather than a trait object so the window can look into the
/// game scene (to pass it the chosen level) and every match stays exhaustive.
pub enum Scene {
    Menu(MenuScene),
    LevelMenu(LevelMenuScene),
    Game(GameScene),
}

impl Scene {
    pub fn id(&self) -> SceneId {
        match self {
            Scene::Menu(_) => SceneId::MainMenu,
            Scene::LevelMenu(_) => SceneId::LevelMenu,
            Scene::Game(_) => SceneId::Game,
        }
    }

    fn base(&self) -> &SceneBase {
        match self {
            Scene::Menu(scene) => &scene.base,
            Scene::LevelMenu(scene) => &scene.base,
            Scene::Game(scene) => &scene.base,
        }
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        match self {
            Scene::Menu(scene) => &mut scene.base,
            Scene::LevelMenu(scene) => &mut scene.base,
            Scene::Game(scene) => &mut scene.base,
        }
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }

    pub fn is_running(&self) -> bool {
        self.base().running
    }

    pub fn set_running(&mut self, running: bool) {
        self.base_mut().running = running;
    }

    /// Called each time the window starts displaying this scene
    pub fn enter(&mut self, effects: &mut Vec<Effect>) {
        self.set_running(true);
        match self {
            Scene::Menu(scene) => scene.enter(effects),
            Scene::LevelMenu(_) | Scene::Game(_) => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self {
            Scene::Menu(scene) => scene.draw(frame),
            Scene::LevelMenu(scene) => scene.draw(frame),
            Scene::Game(scene) => scene.draw(frame),
        }
    }

    /// Dispatch one input event; unmatched events do nothing
    pub fn execute_event(&mut self, event: &InputEvent, effects: &mut Vec<Effect>) {
        match self {
            Scene::Menu(scene) => scene.execute_event(event, effects),
            Scene::LevelMenu(scene) => scene.execute_event(event, effects),
            Scene::Game(scene) => scene.execute_event(event, effects),
        }
    }

    /// Run one frame: draw the current state, then dispatch `events` in order
    pub fn tick(&mut self, events: &[InputEvent]) -> Tick {
        let mut tick = Tick::default();
        self.draw(&mut tick.frame);
        for event in events {
            self.execute_event(event, &mut tick.effects);
        }
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelBounds;
    use crate::input_system::KeyBindings;
    use sdl2::keyboard::Keycode;

    #[test]
    fn test_next_scene() {
        assert_eq!(next_scene(SceneId::MainMenu, None), SceneId::MainMenu);
        assert_eq!(
            next_scene(SceneId::MainMenu, Some(Transition::SwitchTo(SceneId::LevelMenu))),
            SceneId::LevelMenu
        );
        assert_eq!(
            next_scene(SceneId::LevelMenu, Some(Transition::HandOff(SceneId::Game))),
            SceneId::Game
        );
    }

    #[test]
    fn test_scene_ids_match_variants() {
        let bindings = KeyBindings::default();
        let level = Scene::LevelMenu(LevelMenuScene::new(
            "Levels",
            800,
            800,
            LevelBounds::default(),
            bindings,
        ));
        let game = Scene::Game(GameScene::new("Game", 800, 800, bindings));

        assert_eq!(level.id(), SceneId::LevelMenu);
        assert_eq!(game.id(), SceneId::Game);
        assert_eq!(game.title(), "Game");
    }

    #[test]
    fn test_enter_sets_running() {
        let mut scene = Scene::Game(GameScene::new("Game", 800, 800, KeyBindings::default()));
        assert!(!scene.is_running());

        let mut effects = Vec::new();
        scene.enter(&mut effects);
        assert!(scene.is_running());
    }

    #[test]
    fn test_tick_dispatches_events_in_order() {
        let mut scene = Scene::LevelMenu(LevelMenuScene::new(
            "Levels",
            800,
            800,
            LevelBounds::default(),
            KeyBindings::default(),
        ));

        let tick = scene.tick(&[
            InputEvent::KeyPressed(Keycode::Up),
            InputEvent::KeyPressed(Keycode::Return),
            InputEvent::KeyPressed(Keycode::Up),
            InputEvent::KeyPressed(Keycode::Return),
        ]);

        let chosen: Vec<i32> = tick
            .effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::LevelChosen(level) => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(chosen, vec![2, 3]);
    }

    #[test]
    fn test_tick_draws_state_before_events() {
        let mut scene = Scene::LevelMenu(LevelMenuScene::new(
            "Levels",
            800,
            800,
            LevelBounds::default(),
            KeyBindings::default(),
        ));

        let first = scene.tick(&[InputEvent::KeyPressed(Keycode::Up)]);
        assert!(first.frame.texts().any(|text| text == "Level 1"));

        let second = scene.tick(&[]);
        assert!(second.frame.texts().any(|text| text == "Level 2"));
    }
}
