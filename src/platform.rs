//! SDL2 implementation of the window [`Backend`]

use crate::audio::{AudioCommand, SdlAudio};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::input_system::{poll_events, InputEvent};
use crate::render::{Frame, SdlRenderer};
use crate::window::Backend;
use sdl2::joystick::Joystick;
use sdl2::EventPump;
use std::process::Command;
use std::time::{Duration, Instant};

pub struct SdlBackend<'a> {
    renderer: SdlRenderer<'a>,
    audio: SdlAudio,
    event_pump: EventPump,
    // Kept open so its button events keep arriving
    _joystick: Option<Joystick>,
    frame_duration: Duration,
    last_present: Instant,
    level_maker_command: Option<Vec<String>>,
}

impl<'a> SdlBackend<'a> {
    pub fn new(
        renderer: SdlRenderer<'a>,
        audio: SdlAudio,
        event_pump: EventPump,
        joystick: Option<Joystick>,
        config: &AppConfig,
    ) -> Self {
        let fps = config.window.frame_limit.max(1);
        SdlBackend {
            renderer,
            audio,
            event_pump,
            _joystick: joystick,
            frame_duration: Duration::from_secs(1) / fps,
            last_present: Instant::now(),
            level_maker_command: config.level_maker_command.clone(),
        }
    }
}

impl Backend for SdlBackend<'_> {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        poll_events(&mut self.event_pump)
    }

    fn present(&mut self, frame: &Frame) -> Result<(), AppError> {
        self.renderer.render(frame)?;

        // Wait out the rest of the frame
        let elapsed = self.last_present.elapsed();
        if elapsed < self.frame_duration {
            std::thread::sleep(self.frame_duration - elapsed);
        }
        self.last_present = Instant::now();
        Ok(())
    }

    fn play(&mut self, command: AudioCommand) {
        self.audio.execute(command);
    }

    fn set_title(&mut self, title: &str) -> Result<(), AppError> {
        self.renderer.set_title(title)
    }

    fn open_link(&mut self, url: &str) {
        if let Err(e) = link_opener(url).spawn() {
            log::error!("Failed to open {}: {}", url, e);
        }
    }

    fn launch_level_maker(&mut self) {
        let Some((program, args)) = self
            .level_maker_command
            .as_ref()
            .and_then(|command| command.split_first())
        else {
            log::warn!("No level maker configured (set level_maker_command)");
            return;
        };

        match Command::new(program).args(args).spawn() {
            Ok(child) => log::info!("Level maker started (pid {})", child.id()),
            Err(e) => log::error!("Failed to start level maker {}: {}", program, e),
        }
    }
}

/// Command that opens `url` with the desktop's default handler
fn link_opener(url: &str) -> Command {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    command.arg(url);
    command
}

/// Open the first attached joystick, if any
pub fn open_joystick(sdl_context: &sdl2::Sdl) -> Option<Joystick> {
    let subsystem = sdl_context
        .joystick()
        .map_err(|e| log::warn!("Joystick support unavailable: {}", e))
        .ok()?;

    let count = subsystem.num_joysticks().unwrap_or(0);
    if count == 0 {
        log::debug!("No joystick attached");
        return None;
    }

    match subsystem.open(0) {
        Ok(joystick) => {
            log::info!("Using joystick: {}", joystick.name());
            Some(joystick)
        }
        Err(e) => {
            log::warn!("Failed to open joystick: {}", e);
            None
        }
    }
}
