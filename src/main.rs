use anyhow::Context;
use env_logger::Env;
use std::io::Write;

mod audio;
mod config;
mod error;
mod input_system;
mod platform;
mod render;
mod scene;
mod text;
mod window;

use audio::SdlAudio;
use config::AppConfig;
use error::AppError;
use input_system::KeyBindings;
use platform::{open_joystick, SdlBackend};
use render::SdlRenderer;
use scene::{GameScene, LevelMenuScene, MenuScene, Scene};
use window::Window;

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::load().context("Failed to load config")?;
    let bindings = KeyBindings::from_config(&config.bindings)?;
    let (width, height) = (config.window.width, config.window.height);

    let sdl_context = sdl2::init()
        .map_err(AppError::Sdl)
        .context("Failed to initialise SDL2")?;
    let video_subsystem = sdl_context.video().map_err(AppError::Sdl)?;
    let _image_context =
        sdl2::image::init(sdl2::image::InitFlag::PNG).map_err(AppError::Sdl)?;
    let ttf_context = sdl2::ttf::init().map_err(|e| AppError::Sdl(e.to_string()))?;
    // Audio is optional; the mixer logs and stays silent without it
    let _audio_subsystem = sdl_context
        .audio()
        .map_err(|e| log::warn!("Audio subsystem unavailable: {}", e))
        .ok();

    let sdl_window = video_subsystem
        .window(&config.window.title, width, height)
        .position_centered()
        .build()
        .map_err(|e| AppError::Sdl(e.to_string()))?;
    let canvas = sdl_window
        .into_canvas()
        .build()
        .map_err(|e| AppError::Sdl(e.to_string()))?;
    let texture_creator = canvas.texture_creator();
    let event_pump = sdl_context.event_pump().map_err(AppError::Sdl)?;

    // Scene order matches navigation order: the main menu comes first
    let mut window = Window::new(width, height);
    window.add_scenes([
        Scene::Menu(MenuScene::main_menu(
            "Main Menu",
            width,
            height,
            &config.links,
            bindings,
        )),
        Scene::LevelMenu(LevelMenuScene::new(
            "Select Level",
            width,
            height,
            config.level_bounds,
            bindings,
        )),
        Scene::Game(GameScene::new("Game", width, height, bindings)),
    ]);
    log::info!(
        "Window {}x{} ready",
        window.screen_width(),
        window.screen_height()
    );

    let renderer = SdlRenderer::new(canvas, &texture_creator, &ttf_context, &config);
    let audio = SdlAudio::new(&config);
    let joystick = open_joystick(&sdl_context);
    let mut backend = SdlBackend::new(renderer, audio, event_pump, joystick, &config);

    window.display_this(&mut backend)?;

    log::info!("Goodbye");
    Ok(())
}
