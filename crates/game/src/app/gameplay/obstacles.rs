use engine::Rect;
use rand::Rng;

pub(crate) const SPAWN_OFFSET_MIN: i32 = 50;
pub(crate) const SPAWN_OFFSET_MAX: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Obstacle {
    pub(crate) rect: Rect,
    pub(crate) speed: i32,
}

impl Obstacle {
    pub(crate) fn advance(&mut self) {
        self.rect.x -= self.speed;
    }

    /// Trailing edge has left the visible area.
    pub(crate) fn is_off_screen(&self) -> bool {
        self.rect.right() < 0
    }
}

/// Active obstacles in spawn order. Culling compacts the vector in place.
#[derive(Debug, Clone)]
pub(crate) struct ObstacleField {
    obstacles: Vec<Obstacle>,
    width: i32,
    height: i32,
}

impl ObstacleField {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            obstacles: Vec::new(),
            width,
            height,
        }
    }

    /// Places a new obstacle just past the right edge, standing on the
    /// ground line, with a random gap so spacing never looks periodic.
    pub(crate) fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        visible_width: i32,
        ground_y: i32,
        speed: i32,
    ) -> Obstacle {
        let offset = rng.gen_range(SPAWN_OFFSET_MIN..=SPAWN_OFFSET_MAX);
        let obstacle = Obstacle {
            rect: Rect::from_bottom_left(visible_width + offset, ground_y, self.width, self.height),
            speed,
        };
        self.obstacles.push(obstacle);
        obstacle
    }

    /// Moves every obstacle, then drops the ones that are fully off-screen.
    /// Returns how many were culled.
    pub(crate) fn advance_all(&mut self) -> usize {
        for obstacle in &mut self.obstacles {
            obstacle.advance();
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|obstacle| !obstacle.is_off_screen());
        before - self.obstacles.len()
    }

    pub(crate) fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}
