impl Scene for GameSession {
    fn load(&mut self, ctx: &mut FrameContext<'_>) {
        info!(
            entries = self.leaderboard.records().len(),
            player_mask = self.sprites.player_mask.is_some(),
            obstacle_mask = self.sprites.obstacle_mask.is_some(),
            "scene_loaded"
        );
        self.start_run(ctx);
    }

    fn handle_event(&mut self, event: InputEvent, ctx: &mut FrameContext<'_>) -> SceneCommand {
        if event == InputEvent::Quit {
            return SceneCommand::Quit;
        }

        let before = self.mode.label();
        let command = match self.mode {
            GameMode::Playing => {
                self.handle_playing_event(event);
                SceneCommand::None
            }
            GameMode::GameOver { save_offered } => {
                self.handle_game_over_event(event, save_offered, ctx)
            }
            GameMode::EnteringName { .. } => {
                self.handle_name_event(event);
                SceneCommand::None
            }
            GameMode::ViewingScores { save_offered } => {
                self.handle_scores_event(event, save_offered);
                SceneCommand::None
            }
        };

        let after = self.mode.label();
        if before != after {
            debug!(from = before, to = after, "mode_changed");
        }
        command
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> SceneCommand {
        if self.mode != GameMode::Playing {
            return SceneCommand::None;
        }

        let culled = self.obstacles.advance_all();
        if culled > 0 {
            debug!(culled, active = self.obstacles.len(), "obstacles_culled");
        }
        self.player.integrate(self.tuning.gravity, self.tuning.ground_y);
        self.score = ctx.now_ms().saturating_sub(self.run_started_ms) / SCORE_TICK_MS;

        if self.player_hits_obstacle() {
            self.end_run(ctx);
        }
        SceneCommand::None
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        self.draw(canvas);
    }

    fn unload(&mut self) {
        info!(
            mode = self.mode.label(),
            score = self.score,
            "scene_unloaded"
        );
    }
}
