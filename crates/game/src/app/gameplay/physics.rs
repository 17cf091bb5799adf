use engine::Rect;

/// The player's body: fixed column, vertical motion only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlayerBody {
    pub(crate) rect: Rect,
    pub(crate) velocity_y: f32,
    pub(crate) airborne: bool,
}

impl PlayerBody {
    pub(crate) fn new(spawn_bottom_left: (i32, i32), width: i32, height: i32) -> Self {
        let (left, bottom) = spawn_bottom_left;
        Self {
            rect: Rect::from_bottom_left(left, bottom, width, height),
            velocity_y: 0.0,
            airborne: false,
        }
    }

    /// One frame of gravity. Sub-pixel velocity is truncated toward zero
    /// when applied to the integer position.
    pub(crate) fn integrate(&mut self, gravity: f32, ground_y: i32) {
        self.velocity_y += gravity;
        self.rect.y += self.velocity_y.trunc() as i32;
        if self.rect.bottom() >= ground_y {
            self.rect.y = ground_y - self.rect.height;
            self.velocity_y = 0.0;
            self.airborne = false;
        }
    }

    pub(crate) fn jump(&mut self, jump_speed: f32) {
        if self.airborne {
            return;
        }
        self.velocity_y = jump_speed;
        self.airborne = true;
    }

    pub(crate) fn reset(&mut self, spawn_bottom_left: (i32, i32)) {
        let (left, bottom) = spawn_bottom_left;
        self.rect = Rect::from_bottom_left(left, bottom, self.rect.width, self.rect.height);
        self.velocity_y = 0.0;
        self.airborne = false;
    }

    #[cfg(test)]
    pub(crate) fn is_grounded_on(&self, ground_y: i32) -> bool {
        !self.airborne && self.velocity_y == 0.0 && self.rect.bottom() == ground_y
    }
}
