/// Top-level control state; mode-specific data lives in the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GameMode {
    Playing,
    /// `save_offered` is the eligibility computed when the run ended; it is
    /// cleared once the player answers the prompt.
    GameOver { save_offered: bool },
    EnteringName { name: String },
    ViewingScores { save_offered: bool },
}

impl GameMode {
    fn label(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::GameOver { .. } => "game_over",
            Self::EnteringName { .. } => "entering_name",
            Self::ViewingScores { .. } => "viewing_scores",
        }
    }
}

/// Sprites plus their collision masks. Placeholder sprites carry no mask.
#[derive(Debug, Clone)]
pub(crate) struct GameSprites {
    player: Sprite,
    player_mask: Option<CollisionMask>,
    obstacle: Sprite,
    obstacle_mask: Option<CollisionMask>,
    ground: Sprite,
}

impl GameSprites {
    pub(crate) fn load(images_dir: &Path, tuning: &GameTuning) -> Self {
        let placeholders = Self::placeholders(tuning);
        Self::from_sprites(
            load_sprite_or_placeholder(
                "player",
                &images_dir.join(PLAYER_IMAGE),
                placeholders.player,
            ),
            load_sprite_or_placeholder(
                "obstacle",
                &images_dir.join(OBSTACLE_IMAGE),
                placeholders.obstacle,
            ),
            load_sprite_or_placeholder(
                "ground",
                &images_dir.join(GROUND_IMAGE),
                placeholders.ground,
            ),
        )
    }

    /// Solid stand-ins: red player, green obstacle and a grey ground band.
    pub(crate) fn placeholders(tuning: &GameTuning) -> Self {
        let band_height = (tuning.visible_height() - tuning.ground_y).max(0) as u32;
        Self::from_sprites(
            Sprite::solid(PLAYER_FALLBACK_SIZE.0, PLAYER_FALLBACK_SIZE.1, RED),
            Sprite::solid(OBSTACLE_FALLBACK_SIZE.0, OBSTACLE_FALLBACK_SIZE.1, GREEN),
            Sprite::solid(tuning.window_width, band_height, GREY),
        )
    }

    pub(crate) fn from_sprites(player: Sprite, obstacle: Sprite, ground: Sprite) -> Self {
        Self {
            player_mask: CollisionMask::from_sprite(&player),
            obstacle_mask: CollisionMask::from_sprite(&obstacle),
            player,
            obstacle,
            ground,
        }
    }
}

/// The game state machine. Owns every entity, the running score and the
/// leaderboard; the frame driver only feeds it events and ticks.
pub(crate) struct GameSession {
    tuning: GameTuning,
    mode: GameMode,
    player: PlayerBody,
    obstacles: ObstacleField,
    leaderboard: Leaderboard,
    score: u64,
    run_started_ms: u64,
    sprites: GameSprites,
    rng: StdRng,
}

impl GameSession {
    pub(crate) fn new(
        tuning: GameTuning,
        leaderboard: Leaderboard,
        sprites: GameSprites,
        rng: StdRng,
    ) -> Self {
        let player = PlayerBody::new(
            player_spawn(&tuning),
            sprites.player.width() as i32,
            sprites.player.height() as i32,
        );
        let obstacles = ObstacleField::new(
            sprites.obstacle.width() as i32,
            sprites.obstacle.height() as i32,
        );
        Self {
            tuning,
            mode: GameMode::Playing,
            player,
            obstacles,
            leaderboard,
            score: 0,
            run_started_ms: 0,
            sprites,
            rng,
        }
    }

    pub(crate) fn mode(&self) -> &GameMode {
        &self.mode
    }

    pub(crate) fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Resets entities and score and re-arms spawning from `ctx`'s time.
    fn start_run(&mut self, ctx: &mut FrameContext<'_>) {
        self.player.reset(player_spawn(&self.tuning));
        self.obstacles.clear();
        self.score = 0;
        self.run_started_ms = ctx.now_ms();
        self.mode = GameMode::Playing;
        ctx.set_timer(SPAWN_TIMER, Some(self.tuning.spawn_interval()));
        info!(started_ms = self.run_started_ms, "run_started");
    }

    fn end_run(&mut self, ctx: &mut FrameContext<'_>) {
        ctx.set_timer(SPAWN_TIMER, None);
        let save_offered = self.leaderboard.is_eligible(self.score);
        self.mode = GameMode::GameOver { save_offered };
        info!(score = self.score, eligible = save_offered, "run_ended");
    }

    fn spawn_obstacle(&mut self) {
        let obstacle = self.obstacles.spawn(
            &mut self.rng,
            self.tuning.visible_width(),
            self.tuning.ground_y,
            self.tuning.obstacle_speed,
        );
        debug!(
            x = obstacle.rect.x,
            active = self.obstacles.len(),
            "obstacle_spawned"
        );
    }

    fn player_hits_obstacle(&self) -> bool {
        let player_mask = self.sprites.player_mask.as_ref();
        let obstacle_mask = self.sprites.obstacle_mask.as_ref();
        self.obstacles.iter().any(|obstacle| {
            shapes_collide(self.player.rect, player_mask, obstacle.rect, obstacle_mask)
        })
    }

    fn submit_name(&mut self, name: String) {
        if !name.is_empty() {
            match self.leaderboard.insert(Some(&name), self.score) {
                Ok(()) => info!(
                    name = %name.trim(),
                    score = self.score,
                    path = %self.leaderboard.path().display(),
                    "high_score_saved"
                ),
                Err(error) => error!(error = %error, "high_score_insert_failed"),
            }
        }
        self.mode = GameMode::GameOver {
            save_offered: false,
        };
    }

    fn scores_button_rect(&self) -> Rect {
        let (width, height) = SCORES_BUTTON_SIZE;
        Rect::centered(
            self.tuning.visible_width() / 2,
            self.tuning.visible_height() / 2 + 80,
            width,
            height,
        )
    }

    fn scores_list_rect(&self) -> Rect {
        let rows = leaderboard::LEADERBOARD_CAPACITY as i32;
        Rect::new(
            (self.tuning.visible_width() - SCORES_LIST_WIDTH) / 2,
            SCORES_LIST_TOP - SCORES_LINE_HEIGHT / 2,
            SCORES_LIST_WIDTH,
            rows * SCORES_LINE_HEIGHT,
        )
    }

    fn handle_playing_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown {
                key: Key::Space | Key::Up,
                ..
            } => self.player.jump(self.tuning.jump_speed),
            InputEvent::Timer(SPAWN_TIMER) => self.spawn_obstacle(),
            _ => {}
        }
    }

    fn handle_game_over_event(
        &mut self,
        event: InputEvent,
        save_offered: bool,
        ctx: &mut FrameContext<'_>,
    ) -> SceneCommand {
        match event {
            InputEvent::KeyDown {
                key: Key::Char('r'),
                ..
            } => self.start_run(ctx),
            InputEvent::KeyDown {
                key: Key::Char('q'),
                ..
            } => {
                info!(reason = "quit_key", "quit_requested");
                return SceneCommand::Quit;
            }
            InputEvent::KeyDown {
                key: Key::Char('y'),
                ..
            } if save_offered => {
                self.mode = GameMode::EnteringName {
                    name: String::new(),
                };
            }
            InputEvent::KeyDown {
                key: Key::Char('n'),
                ..
            } if save_offered => {
                self.mode = GameMode::GameOver {
                    save_offered: false,
                };
            }
            InputEvent::KeyDown {
                key: Key::Char('h'),
                ..
            } => self.mode = GameMode::ViewingScores { save_offered },
            InputEvent::MouseDown { x, y } if self.scores_button_rect().contains(x, y) => {
                self.mode = GameMode::ViewingScores { save_offered };
            }
            _ => {}
        }
        SceneCommand::None
    }

    fn handle_name_event(&mut self, event: InputEvent) {
        let GameMode::EnteringName { name } = &mut self.mode else {
            return;
        };
        match event {
            InputEvent::KeyDown {
                key: Key::Enter, ..
            } => {
                let name = std::mem::take(name);
                self.submit_name(name);
            }
            InputEvent::KeyDown {
                key: Key::Backspace,
                ..
            } => {
                name.pop();
            }
            InputEvent::KeyDown {
                text: Some(ch), ..
            } if !ch.is_control() && name.chars().count() < NAME_LIMIT => name.push(ch),
            _ => {}
        }
    }

    fn handle_scores_event(&mut self, event: InputEvent, save_offered: bool) {
        let dismiss = match event {
            InputEvent::KeyDown {
                key: Key::Escape, ..
            } => true,
            InputEvent::MouseDown { x, y } => !self.scores_list_rect().contains(x, y),
            _ => false,
        };
        if dismiss {
            self.mode = GameMode::GameOver { save_offered };
        }
    }
}

fn player_spawn(tuning: &GameTuning) -> (i32, i32) {
    (tuning.player_x, tuning.ground_y)
}
