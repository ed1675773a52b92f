//! Scene registry and display loop
//!
//! The [`Window`] owns every scene and knows which one is current. Its display
//! loop shows the current scene until that scene stops running, then looks up
//! the current scene again; that re-read is how scene switches happen.
//!
//! # Frame Loop
//!
//! Each frame of the active scene:
//! 1. Drain the pending input batch from the [`Backend`]
//! 2. [`Scene::tick`]: draw the frame, then dispatch every event in order
//! 3. Apply the resulting effects in order (audio, links, transitions, quit)
//! 4. Present the frame, unless the window closed during this frame
//!
//! All toolkit access goes through [`Backend`], so the loop runs the same
//! under SDL2 and under a scripted test backend.

use crate::audio::AudioCommand;
use crate::error::AppError;
use crate::input_system::InputEvent;
use crate::render::Frame;
use crate::scene::{Effect, Scene, SceneId, Transition, next_scene};

/// The window's view of the rendering/audio toolkit
pub trait Backend {
    /// All input received since the last call, in arrival order
    fn poll_events(&mut self) -> Vec<InputEvent>;

    fn present(&mut self, frame: &Frame) -> Result<(), AppError>;

    fn play(&mut self, command: AudioCommand);

    fn set_title(&mut self, title: &str) -> Result<(), AppError>;

    fn open_link(&mut self, url: &str);

    fn launch_level_maker(&mut self);
}

pub struct Window {
    screen_width: u32,
    screen_height: u32,
    scenes: Vec<Scene>,
    current_scene: SceneId,
    open: bool,
}

impl Window {
    /// Create an open window starting on the main menu
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Window {
            screen_width,
            screen_height,
            scenes: Vec::new(),
            current_scene: SceneId::MainMenu,
            open: true,
        }
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// Append scenes to the registry in the given order
    pub fn add_scenes(&mut self, scenes: impl IntoIterator<Item = Scene>) {
        self.scenes.extend(scenes);
    }

    #[cfg(test)]
    pub fn current_scene(&self) -> SceneId {
        self.current_scene
    }

    /// Make `id` the current scene; unregistered ids are rejected
    pub fn set_scene(&mut self, id: SceneId) -> Result<(), AppError> {
        if self.scene(id).is_none() {
            return Err(AppError::SceneNotRegistered(id));
        }
        log::debug!("Current scene {:?} -> {:?}", self.current_scene, id);
        self.current_scene = id;
        Ok(())
    }

    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id() == id)
    }

    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|scene| scene.id() == id)
    }

    fn registered_mut(&mut self, id: SceneId) -> Result<&mut Scene, AppError> {
        self.scene_mut(id).ok_or(AppError::SceneNotRegistered(id))
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        log::info!("Window closing");
        self.open = false;
    }

    /// Show scenes until the window closes
    pub fn display_this(&mut self, backend: &mut impl Backend) -> Result<(), AppError> {
        while self.open {
            let id = self.current_scene;
            self.display_scene(id, backend)?;
        }
        Ok(())
    }

    /// Run scene `id` until it stops or the window closes
    pub fn display_scene(&mut self, id: SceneId, backend: &mut impl Backend) -> Result<(), AppError> {
        let mut effects = Vec::new();
        let scene = self.registered_mut(id)?;
        scene.enter(&mut effects);
        let title = scene.title().to_string();

        log::debug!("Displaying scene {:?} ({})", id, title);
        if let Err(e) = backend.set_title(&title) {
            log::warn!("Could not set window title: {}", e);
        }
        self.apply_effects(id, effects, backend)?;

        while self.open && self.scene(id).is_some_and(Scene::is_running) {
            let events = backend.poll_events();
            let tick = self.registered_mut(id)?.tick(&events);

            self.apply_effects(id, tick.effects, backend)?;
            if !self.open {
                break;
            }
            // A transition already moved on from this scene; its frame is stale
            if self.current_scene != id && !self.scene(id).is_some_and(Scene::is_running) {
                continue;
            }

            if let Err(e) = backend.present(&tick.frame) {
                log::error!("Scene {:?} failed to draw a frame: {}; leaving scene", id, e);
                self.registered_mut(id)?.set_running(false);
            }
        }

        log::debug!("Left scene {:?}", id);
        Ok(())
    }

    fn apply_effects(
        &mut self,
        origin: SceneId,
        effects: Vec<Effect>,
        backend: &mut impl Backend,
    ) -> Result<(), AppError> {
        for effect in effects {
            if !self.open {
                break;
            }

            match effect {
                Effect::Audio(command) => backend.play(command),
                Effect::OpenLink(url) => {
                    log::info!("Opening {}", url);
                    backend.open_link(&url);
                }
                Effect::LaunchLevelMaker => backend.launch_level_maker(),
                Effect::LevelChosen(level) => match self.scene_mut(SceneId::Game) {
                    Some(Scene::Game(game)) => game.set_level(level),
                    _ => log::warn!("Level {} chosen but no game scene is registered", level),
                },
                Effect::Transition(transition) => self.transition(origin, transition, backend)?,
                Effect::Quit => self.close(),
            }
        }
        Ok(())
    }

    fn transition(
        &mut self,
        origin: SceneId,
        transition: Transition,
        backend: &mut impl Backend,
    ) -> Result<(), AppError> {
        let next = next_scene(self.current_scene, Some(transition));
        if let Err(e) = self.set_scene(next) {
            log::error!("Ignoring transition {:?}: {}", transition, e);
            return Ok(());
        }

        match transition {
            Transition::SwitchTo(_) => {
                self.registered_mut(origin)?.set_running(false);
            }
            Transition::HandOff(_) if next == origin => {
                log::debug!("Scene {:?} handed off to itself, ignoring", origin);
            }
            Transition::HandOff(_) => {
                self.display_scene(next, backend)?;
                if self.current_scene != origin {
                    self.registered_mut(origin)?.set_running(false);
                }
            }
        }
        Ok(())
    }
}
