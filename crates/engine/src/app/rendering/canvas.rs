use crate::app::geometry::Rect;

use super::font::{glyph_or_fallback, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::sprite::Sprite;
use super::{Canvas, Rgba, TextStyle};

/// `Canvas` over a tightly packed RGBA8 frame.
pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let offset = self.byte_offset(x, y)?;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.frame[offset..offset + 4]);
        Some(rgba)
    }

    fn byte_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let pixel_offset = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?;
        let byte_offset = pixel_offset.checked_mul(4)?;
        (byte_offset.checked_add(4)? <= self.frame.len()).then_some(byte_offset)
    }

    fn write_pixel_clipped(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(offset) = self.byte_offset(x, y) {
            self.frame[offset..offset + 4].copy_from_slice(&color);
        }
    }

    fn clip(&self, rect: Rect) -> Option<Rect> {
        rect.intersection(&Rect::new(0, 0, self.width as i32, self.height as i32))
    }
}

impl Canvas for FrameCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(clipped) = self.clip(rect) else {
            return;
        };
        for py in clipped.y..clipped.bottom() {
            for px in clipped.x..clipped.right() {
                self.write_pixel_clipped(px, py, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: i32, color: Rgba) {
        let t = thickness.max(1);
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.height), color);
        self.fill_rect(Rect::new(rect.right() - t, rect.y, t, rect.height), color);
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let target = Rect::new(x, y, sprite.width() as i32, sprite.height() as i32);
        let Some(clipped) = self.clip(target) else {
            return;
        };
        for py in clipped.y..clipped.bottom() {
            for px in clipped.x..clipped.right() {
                let Some(texel) = sprite.texel((px - x) as u32, (py - y) as u32) else {
                    continue;
                };
                if texel[3] == 0 {
                    continue;
                }
                self.write_pixel_clipped(px, py, texel);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) {
        let scale = style.scale.max(1);
        let advance = (GLYPH_WIDTH + 1) * scale;
        let mut pen_x = x;
        for ch in text.chars() {
            let glyph = glyph_or_fallback(ch);
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if glyph.is_set(row, col) {
                        self.fill_rect(
                            Rect::new(pen_x + col * scale, y + row * scale, scale, scale),
                            style.color,
                        );
                    }
                }
            }
            pen_x += advance;
        }
    }
}
