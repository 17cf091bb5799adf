impl GameSession {
    /// Draw pass: sky, ground, entities, HUD, then the mode overlay. The
    /// score screen replaces everything.
    fn draw(&self, canvas: &mut dyn Canvas) {
        if let GameMode::ViewingScores { .. } = self.mode {
            self.draw_scores_screen(canvas);
            return;
        }

        canvas.clear(WHITE);
        let ground = &self.sprites.ground;
        canvas.blit(
            ground,
            0,
            self.tuning.visible_height() - ground.height() as i32,
        );
        canvas.blit(&self.sprites.player, self.player.rect.x, self.player.rect.y);
        for obstacle in self.obstacles.iter() {
            canvas.blit(&self.sprites.obstacle, obstacle.rect.x, obstacle.rect.y);
        }
        canvas.draw_text(&format!("Score: {}", self.score), 10, 10, HUD_STYLE);

        match &self.mode {
            GameMode::Playing | GameMode::ViewingScores { .. } => {}
            GameMode::GameOver { save_offered } => self.draw_game_over(canvas, *save_offered),
            GameMode::EnteringName { name } => self.draw_name_entry(canvas, name),
        }
    }

    fn draw_final_score_header(&self, canvas: &mut dyn Canvas) {
        let center_x = self.tuning.visible_width() / 2;
        let center_y = self.tuning.visible_height() / 2;
        draw_text_centered(canvas, "GAME OVER", center_x, center_y - 50, HEADLINE_STYLE);
        draw_text_centered(
            canvas,
            &format!("Final Score: {}", self.score),
            center_x,
            center_y,
            BODY_STYLE,
        );
    }

    fn draw_game_over(&self, canvas: &mut dyn Canvas, save_offered: bool) {
        let center_x = self.tuning.visible_width() / 2;
        let center_y = self.tuning.visible_height() / 2;
        self.draw_final_score_header(canvas);
        if save_offered {
            draw_text_centered(
                canvas,
                "High Score! Save? (Y/N)",
                center_x,
                center_y + 40,
                PROMPT_STYLE,
            );
        }

        let button = self.scores_button_rect();
        canvas.stroke_rect(button, 2, BLACK);
        draw_text_centered(
            canvas,
            "High Scores (H)",
            button.x + button.width / 2,
            button.y + button.height / 2,
            BODY_STYLE,
        );

        draw_text_centered(
            canvas,
            "Press 'R' to Restart or 'Q' to Quit",
            center_x,
            center_y + 120,
            BODY_STYLE,
        );
    }

    fn draw_name_entry(&self, canvas: &mut dyn Canvas, name: &str) {
        let center_x = self.tuning.visible_width() / 2;
        let center_y = self.tuning.visible_height() / 2;
        self.draw_final_score_header(canvas);
        draw_text_centered(
            canvas,
            &format!("Enter Name: {name}"),
            center_x,
            center_y + 40,
            BODY_STYLE,
        );
        draw_text_centered(
            canvas,
            "Press Enter to Save",
            center_x,
            center_y + 80,
            BODY_STYLE,
        );
    }

    fn draw_scores_screen(&self, canvas: &mut dyn Canvas) {
        let width = self.tuning.visible_width();
        let height = self.tuning.visible_height();
        let center_x = width / 2;

        canvas.clear(GREY);
        draw_text_centered(canvas, "High Scores", center_x, 50, TITLE_STYLE);

        let records = self.leaderboard.records();
        if records.is_empty() {
            draw_text_centered(
                canvas,
                "No high scores yet!",
                center_x,
                height / 2 - 20,
                BODY_STYLE,
            );
        } else {
            for (row, record) in records.iter().enumerate() {
                draw_text_centered(
                    canvas,
                    &score_line(row + 1, record),
                    center_x,
                    SCORES_LIST_TOP + row as i32 * SCORES_LINE_HEIGHT,
                    BODY_STYLE,
                );
            }
        }

        draw_text_centered(
            canvas,
            "Press ESC or Click to Return",
            center_x,
            height - 30,
            BODY_STYLE,
        );
    }
}

fn score_line(rank: usize, record: &LeaderboardRecord) -> String {
    format!(
        "{rank}. {} - {}",
        record.display_name(),
        record.display_score()
    )
}
