use std::path::{Path, PathBuf};

use image::{ImageError, ImageReader};
use thiserror::Error;
use tracing::warn;

use super::Rgba;

#[derive(Debug, Error)]
pub enum SpriteLoadError {
    #[error("failed to open sprite {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sprite {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("sprite {path} has zero size")]
    Empty { path: PathBuf },
}

/// RGBA8 image. Placeholders are solid rectangles standing in for an image
/// that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    placeholder: bool,
}

impl Sprite {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba.len() == expected).then_some(Self {
            width,
            height,
            rgba,
            placeholder: false,
        })
    }

    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        let pixel_count = width as usize * height as usize;
        let rgba = color
            .iter()
            .copied()
            .cycle()
            .take(pixel_count * 4)
            .collect();
        Self {
            width,
            height,
            rgba,
            placeholder: true,
        }
    }

    pub fn load_png(path: &Path) -> Result<Self, SpriteLoadError> {
        let reader = ImageReader::open(path).map_err(|source| SpriteLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = reader.decode().map_err(|source| SpriteLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let image = decoded.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(SpriteLoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
            placeholder: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn texel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(self.rgba.get(offset..offset + 4)?);
        Some(rgba)
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.texel(x, y).map_or(0, |texel| texel[3])
    }
}

/// Loads `path`, or logs once and returns `placeholder` when the image is
/// missing or unreadable.
pub fn load_sprite_or_placeholder(sprite_key: &str, path: &Path, placeholder: Sprite) -> Sprite {
    match Sprite::load_png(path) {
        Ok(sprite) => sprite,
        Err(error) => {
            warn!(
                sprite_key,
                path = %path.display(),
                reason = %error,
                "sprite_load_failed_using_placeholder"
            );
            placeholder
        }
    }
}
