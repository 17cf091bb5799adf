use engine::{Rect, Sprite};

const SOLID_ALPHA_THRESHOLD: u8 = 127;

/// Per-pixel solidity for a decoded sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CollisionMask {
    width: i32,
    height: i32,
    solid: Vec<bool>,
}

impl CollisionMask {
    /// Placeholders have no mask; they collide as their bounding box.
    pub(crate) fn from_sprite(sprite: &Sprite) -> Option<Self> {
        if sprite.is_placeholder() {
            return None;
        }
        let (width, height) = (sprite.width(), sprite.height());
        let mut solid = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                solid.push(sprite.alpha_at(x, y) > SOLID_ALPHA_THRESHOLD);
            }
        }
        Some(Self {
            width: width as i32,
            height: height as i32,
            solid,
        })
    }

    pub(crate) fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.solid[(y * self.width + x) as usize]
    }

    #[cfg(test)]
    pub(crate) fn solid_count(&self) -> usize {
        self.solid.iter().filter(|solid| **solid).count()
    }
}

fn solid_at(rect: &Rect, mask: Option<&CollisionMask>, x: i32, y: i32) -> bool {
    match mask {
        Some(mask) => mask.is_solid(x - rect.x, y - rect.y),
        None => true,
    }
}

/// Bounding boxes must overlap first; inside the overlap both shapes need a
/// solid pixel at the same screen position.
pub(crate) fn shapes_collide(
    a_rect: Rect,
    a_mask: Option<&CollisionMask>,
    b_rect: Rect,
    b_mask: Option<&CollisionMask>,
) -> bool {
    let Some(overlap) = a_rect.intersection(&b_rect) else {
        return false;
    };
    if a_mask.is_none() && b_mask.is_none() {
        return true;
    }
    (overlap.y..overlap.bottom()).any(|y| {
        (overlap.x..overlap.right())
            .any(|x| solid_at(&a_rect, a_mask, x, y) && solid_at(&b_rect, b_mask, x, y))
    })
}
