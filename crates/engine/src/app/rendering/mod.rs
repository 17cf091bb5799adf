mod canvas;
mod font;
mod renderer;
mod sprite;

pub use canvas::FrameCanvas;
pub use font::{GLYPH_HEIGHT, GLYPH_WIDTH};
pub use renderer::Renderer;
pub use sprite::{load_sprite_or_placeholder, Sprite, SpriteLoadError};

use super::geometry::Rect;

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub scale: i32,
    pub color: Rgba,
}

impl TextStyle {
    pub const fn new(scale: i32, color: Rgba) -> Self {
        Self { scale, color }
    }
}

/// Draw target for a scene's render pass. Coordinates are frame-buffer
/// pixels; everything clips silently at the edges.
pub trait Canvas {
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, thickness: i32, color: Rgba);
    /// Draws `sprite` with its top-left at (x, y); fully transparent texels
    /// are skipped.
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32);
    /// Draws `text` with its top-left at (x, y).
    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle);
}

/// Pixel extent of `text` at `scale`, without trailing letter spacing.
pub fn text_size(text: &str, scale: i32) -> (i32, i32) {
    let scale = scale.max(1);
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return (0, GLYPH_HEIGHT * scale);
    }
    let width = chars * (GLYPH_WIDTH + 1) * scale - scale;
    (width, GLYPH_HEIGHT * scale)
}

/// Draws `text` centred on (center_x, center_y) and returns the covered rect.
pub fn draw_text_centered(
    canvas: &mut dyn Canvas,
    text: &str,
    center_x: i32,
    center_y: i32,
    style: TextStyle,
) -> Rect {
    let (width, height) = text_size(text, style.scale);
    let rect = Rect::centered(center_x, center_y, width, height);
    canvas.draw_text(text, rect.x, rect.y, style);
    rect
}
