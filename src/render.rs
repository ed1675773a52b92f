//! Frame description and SDL2 execution
//!
//! Scenes never touch the canvas. Each frame they describe what to draw as an
//! ordered list of [`DrawCommand`]s in a [`Frame`]; [`SdlRenderer`] replays the
//! list onto the real canvas. This keeps every scene testable without a window.
//!
//! # Degraded assets
//!
//! Textures or the font that failed to load are logged once at startup and
//! then substituted at draw time: missing textures become flat rectangles,
//! missing font becomes the built-in bitmap glyphs from [`crate::text`].

use crate::config::{AppConfig, AssetPaths};
use crate::error::AppError;
use crate::text::{draw_bitmap_text, scale_for_height};
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{Window, WindowContext};
use std::collections::HashMap;
use std::path::Path;

/// Point size the TTF font is rasterised at; text is scaled from this
const FONT_POINT_SIZE: u16 = 96;

/// Fill for a missing, unhighlighted texture
const FALLBACK_COLOR: Color = Color::RGB(0, 0, 0);

/// Fill for a missing highlighted (selected) texture
const FALLBACK_HIGHLIGHT: Color = Color::RGB(200, 30, 30);

/// Every texture the scenes can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Background,
    Wall,
    Play,
    PlaySelected,
    MapMaker,
    MapMakerSelected,
    Instructions,
    InstructionsSelected,
    Exit,
    ExitSelected,
    MusicOn,
    MusicOnSelected,
    MusicOff,
    MusicOffSelected,
    Web,
    WebSelected,
}

impl TextureId {
    pub const ALL: [TextureId; 16] = [
        TextureId::Background,
        TextureId::Wall,
        TextureId::Play,
        TextureId::PlaySelected,
        TextureId::MapMaker,
        TextureId::MapMakerSelected,
        TextureId::Instructions,
        TextureId::InstructionsSelected,
        TextureId::Exit,
        TextureId::ExitSelected,
        TextureId::MusicOn,
        TextureId::MusicOnSelected,
        TextureId::MusicOff,
        TextureId::MusicOffSelected,
        TextureId::Web,
        TextureId::WebSelected,
    ];

    /// Path of this texture relative to the resource root
    pub fn path(self, assets: &AssetPaths) -> &Path {
        match self {
            TextureId::Background => &assets.background,
            TextureId::Wall => &assets.wall,
            TextureId::Play => &assets.play,
            TextureId::PlaySelected => &assets.play_selected,
            TextureId::MapMaker => &assets.map_maker,
            TextureId::MapMakerSelected => &assets.map_maker_selected,
            TextureId::Instructions => &assets.instructions,
            TextureId::InstructionsSelected => &assets.instructions_selected,
            TextureId::Exit => &assets.exit,
            TextureId::ExitSelected => &assets.exit_selected,
            TextureId::MusicOn => &assets.music_on,
            TextureId::MusicOnSelected => &assets.music_on_selected,
            TextureId::MusicOff => &assets.music_off,
            TextureId::MusicOffSelected => &assets.music_off_selected,
            TextureId::Web => &assets.web,
            TextureId::WebSelected => &assets.web_selected,
        }
    }

    /// Whether this is the highlighted half of an icon pair
    pub fn is_highlight(self) -> bool {
        matches!(
            self,
            TextureId::PlaySelected
                | TextureId::MapMakerSelected
                | TextureId::InstructionsSelected
                | TextureId::ExitSelected
                | TextureId::MusicOnSelected
                | TextureId::MusicOffSelected
                | TextureId::WebSelected
        )
    }
}

/// One drawing step
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Texture { id: TextureId, dest: Rect },
    /// Text with its top-left at (`x`, `y`), `height` pixels tall
    Text {
        text: String,
        x: i32,
        y: i32,
        height: u32,
        color: Color,
    },
}

/// Ordered draw commands for one presented frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn texture(&mut self, id: TextureId, dest: Rect) {
        self.commands.push(DrawCommand::Texture { id, dest });
    }

    pub fn text(&mut self, text: impl Into<String>, x: i32, y: i32, height: u32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            x,
            y,
            height,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text strings in draw order
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// All textures in draw order
    #[cfg(test)]
    pub fn textures(&self) -> impl Iterator<Item = TextureId> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Texture { id, .. } => Some(*id),
            _ => None,
        })
    }
}

/// Replays [`Frame`]s onto the SDL2 canvas
///
/// Owns every texture and the font for the lifetime of the process; nothing
/// is unloaded until the renderer drops at exit.
pub struct SdlRenderer<'a> {
    canvas: Canvas<Window>,
    texture_creator: &'a TextureCreator<WindowContext>,
    textures: HashMap<TextureId, Texture<'a>>,
    font: Option<Font<'a, 'static>>,
}

impl<'a> SdlRenderer<'a> {
    /// Create the renderer and load every asset, logging the ones that fail
    pub fn new(
        canvas: Canvas<Window>,
        texture_creator: &'a TextureCreator<WindowContext>,
        ttf_context: &'a Sdl2TtfContext,
        config: &AppConfig,
    ) -> Self {
        let mut textures = HashMap::new();
        for id in TextureId::ALL {
            match load_texture(texture_creator, &config.resolve(id.path(&config.assets))) {
                Ok(texture) => {
                    textures.insert(id, texture);
                }
                Err(e) => log::warn!("{}; drawing {:?} as a flat rectangle", e, id),
            }
        }

        let font_path = config.resolve(&config.assets.font);
        let font = match ttf_context.load_font(&font_path, FONT_POINT_SIZE) {
            Ok(font) => Some(font),
            Err(message) => {
                log::warn!(
                    "{}; using built-in glyphs",
                    AppError::Asset {
                        path: font_path,
                        message,
                    }
                );
                None
            }
        };

        log::debug!("Loaded {}/{} textures", textures.len(), TextureId::ALL.len());

        SdlRenderer {
            canvas,
            texture_creator,
            textures,
            font,
        }
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), AppError> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| AppError::Sdl(e.to_string()))
    }

    /// Draw every command of `frame` and present it
    pub fn render(&mut self, frame: &Frame) -> Result<(), AppError> {
        for command in frame.commands() {
            self.execute(command)?;
        }
        self.canvas.present();
        Ok(())
    }

    fn execute(&mut self, command: &DrawCommand) -> Result<(), AppError> {
        match command {
            DrawCommand::Clear(color) => {
                self.canvas.set_draw_color(*color);
                self.canvas.clear();
            }
            DrawCommand::Texture { id, dest } => match self.textures.get(id) {
                Some(texture) => self.canvas.copy(texture, None, Some(*dest))?,
                None => {
                    let color = if id.is_highlight() {
                        FALLBACK_HIGHLIGHT
                    } else {
                        FALLBACK_COLOR
                    };
                    self.canvas.set_draw_color(color);
                    self.canvas.draw_rect(*dest)?;
                }
            },
            DrawCommand::Text {
                text,
                x,
                y,
                height,
                color,
            } => self.draw_text(text, *x, *y, *height, *color)?,
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        height: u32,
        color: Color,
    ) -> Result<(), AppError> {
        let Some(font) = &self.font else {
            draw_bitmap_text(&mut self.canvas, text, x, y, color, scale_for_height(height))?;
            return Ok(());
        };
        if text.is_empty() {
            return Ok(());
        }

        let surface = font
            .render(text)
            .blended(color)
            .map_err(|e| AppError::Sdl(e.to_string()))?;
        let texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .map_err(|e| AppError::Sdl(e.to_string()))?;

        let query = texture.query();
        let width = query.width * height / query.height.max(1);
        self.canvas
            .copy(&texture, None, Some(Rect::new(x, y, width, height)))?;
        Ok(())
    }
}

fn load_texture<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    path: &Path,
) -> Result<Texture<'a>, AppError> {
    texture_creator
        .load_texture(path)
        .map_err(|message| AppError::Asset {
            path: path.to_path_buf(),
            message,
        })
}
