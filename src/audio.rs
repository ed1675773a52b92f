//! Sound effects and background music
//!
//! Scenes request audio through [`AudioCommand`]s; [`SdlAudio`] carries them
//! out with SDL2_mixer. If the mixer can't be opened or a clip fails to load,
//! the failure is logged and that sound is silent from then on.

use crate::config::AppConfig;
use crate::error::AppError;
use sdl2::mixer::{self, Channel, Chunk, InitFlag, Music, Sdl2MixerContext};
use std::path::Path;

/// Short one-shot clips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Menu selection moved
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play(Sound),
    /// Start the background loop, or resume it if paused
    PlayMusic,
    PauseMusic,
    /// Silence music and every effect channel
    StopAll,
}

/// SDL2_mixer backed audio output
pub struct SdlAudio {
    _mixer: Option<Sdl2MixerContext>,
    music: Option<Music<'static>>,
    click: Option<Chunk>,
}

impl SdlAudio {
    /// Open the mixer and load both clips
    ///
    /// Never fails: a missing audio device or missing files leave the game
    /// silent but running.
    pub fn new(config: &AppConfig) -> Self {
        if let Err(e) = mixer::open_audio(
            mixer::DEFAULT_FREQUENCY,
            mixer::DEFAULT_FORMAT,
            mixer::DEFAULT_CHANNELS,
            1024,
        ) {
            log::warn!("Could not open audio device ({}), running without sound", e);
            return SdlAudio {
                _mixer: None,
                music: None,
                click: None,
            };
        }

        let context = mixer::init(InitFlag::OGG)
            .map_err(|e| log::warn!("SDL2_mixer OGG support unavailable: {}", e))
            .ok();
        mixer::allocate_channels(4);

        let music = load_music(&config.resolve(&config.assets.background_music))
            .map_err(|e| log::warn!("{}; background music disabled", e))
            .ok();
        let click = load_chunk(&config.resolve(&config.assets.click))
            .map_err(|e| log::warn!("{}; click sound disabled", e))
            .ok();

        SdlAudio {
            _mixer: context,
            music,
            click,
        }
    }

    pub fn execute(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::Play(Sound::Click) => {
                if let Some(click) = &self.click {
                    if let Err(e) = Channel::all().play(click, 0) {
                        log::debug!("Click sound dropped: {}", e);
                    }
                }
            }
            AudioCommand::PlayMusic => {
                let Some(music) = &self.music else {
                    return;
                };
                if Music::is_paused() {
                    Music::resume();
                } else if !Music::is_playing() {
                    // -1 loops forever
                    if let Err(e) = music.play(-1) {
                        log::warn!("Could not start background music: {}", e);
                    }
                }
            }
            AudioCommand::PauseMusic => {
                if self.music.is_some() {
                    Music::pause();
                }
            }
            AudioCommand::StopAll => {
                if self.music.is_some() || self.click.is_some() {
                    Music::halt();
                    Channel::all().halt();
                }
            }
        }
    }
}

fn load_music(path: &Path) -> Result<Music<'static>, AppError> {
    Music::from_file(path).map_err(|message| AppError::Asset {
        path: path.to_path_buf(),
        message,
    })
}

fn load_chunk(path: &Path) -> Result<Chunk, AppError> {
    Chunk::from_file(path).map_err(|message| AppError::Asset {
        path: path.to_path_buf(),
        message,
    })
}
