use super::*;
use engine::{Clock, FrameDriver, FrameOutcome, ManualClock, StampedEvent};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

use super::leaderboard::LEADERBOARD_FILE_NAME;
use super::obstacles::Obstacle;

#[derive(Debug, Clone, PartialEq)]
enum DrawOp {
    Clear(Rgba),
    Fill(Rect, Rgba),
    Stroke(Rect, Rgba),
    Blit(u32, u32, i32, i32),
    Text(String, Rgba),
}

#[derive(Default)]
struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text, _) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text == needle)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (900, 400)
    }

    fn clear(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ops.push(DrawOp::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, _thickness: i32, color: Rgba) {
        self.ops.push(DrawOp::Stroke(rect, color));
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        self.ops
            .push(DrawOp::Blit(sprite.width(), sprite.height(), x, y));
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, style: TextStyle) {
        self.ops.push(DrawOp::Text(text.to_string(), style.color));
    }
}

struct Harness {
    _temp: TempDir,
    board_path: std::path::PathBuf,
    driver: FrameDriver<ManualClock>,
    session: GameSession,
}

impl Harness {
    fn new() -> Self {
        Self::with_board(None)
    }

    fn with_board(seed: Option<serde_json::Value>) -> Self {
        let temp = TempDir::new().expect("temp");
        let board_path = temp.path().join(LEADERBOARD_FILE_NAME);
        if let Some(seed) = seed {
            fs::write(&board_path, seed.to_string()).expect("seed board");
        }
        let tuning = GameTuning::default();
        let leaderboard = Leaderboard::open(&board_path).expect("open board");
        let sprites = GameSprites::placeholders(&tuning);
        let session = GameSession::new(tuning, leaderboard, sprites, StdRng::seed_from_u64(3));
        let mut harness = Self {
            _temp: temp,
            board_path,
            driver: FrameDriver::new(ManualClock::new(1_000)),
            session,
        };
        harness.driver.load(&mut harness.session);
        harness
    }

    /// Advances one 33ms frame and feeds `events` stamped at the new time.
    fn frame(&mut self, events: Vec<InputEvent>) -> FrameOutcome {
        self.advance(33);
        let now = self.driver.clock().now_ms();
        let batch = events
            .into_iter()
            .map(|event| StampedEvent::new(now, event))
            .collect();
        self.driver.step(&mut self.session, batch)
    }

    fn advance(&mut self, delta_ms: u64) {
        self.driver.clock().advance(delta_ms);
    }

    fn press(&mut self, key: Key) -> FrameOutcome {
        self.frame(vec![key_down(key)])
    }

    fn type_text(&mut self, text: &str) {
        let events = text
            .chars()
            .map(|ch| InputEvent::KeyDown {
                key: Key::Char(ch.to_ascii_lowercase()),
                text: Some(ch),
            })
            .collect();
        self.frame(events);
    }

    /// Places an obstacle right on top of the resting player.
    fn force_collision(&mut self) {
        let player = self.session.player.rect;
        self.session.obstacles.push(Obstacle {
            rect: Rect::new(player.x + 10 + 8, player.y + 10, 25, 50),
            speed: 8,
        });
        self.frame(Vec::new());
    }

    fn render(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::default();
        self.session.render(&mut canvas);
        canvas
    }
}

fn key_down(key: Key) -> InputEvent {
    let text = match key {
        Key::Space => Some(' '),
        Key::Char(ch) => Some(ch),
        _ => None,
    };
    InputEvent::KeyDown { key, text }
}

fn ten_entries() -> serde_json::Value {
    serde_json::Value::Array(
        (0..10)
            .map(|i| json!({"name": format!("P{i}"), "score": (10 - i) * 10}))
            .collect(),
    )
}

#[test]
fn session_starts_playing_with_spawn_timer_armed() {
    let harness = Harness::new();
    assert_eq!(harness.session.mode(), &GameMode::Playing);
    assert!(harness.driver.timers().is_active(SPAWN_TIMER));
    assert_eq!(
        harness.driver.timers().next_due_ms(SPAWN_TIMER),
        Some(1_000 + 2_000)
    );
}

#[test]
fn score_tracks_elapsed_time_in_tens_of_ms() {
    let mut harness = Harness::new();
    harness.frame(Vec::new());
    assert_eq!(harness.session.score(), 3);
    harness.advance(1_000 - 33 - 33);
    harness.frame(Vec::new());
    assert_eq!(harness.session.score(), 100);
}

#[test]
fn spawn_timer_adds_obstacles_while_playing() {
    let mut harness = Harness::new();
    harness.advance(2_000);
    harness.frame(Vec::new());
    assert_eq!(harness.session.obstacles.len(), 1);
}

#[test]
fn jump_lifts_player_and_ignores_repeat_in_air() {
    let mut harness = Harness::new();
    harness.press(Key::Space);
    assert!(harness.session.player.airborne);
    let velocity = harness.session.player.velocity_y;

    harness.press(Key::Up);
    assert_eq!(harness.session.player.velocity_y, velocity + 1.5);
}

#[test]
fn collision_ends_run_in_same_frame() {
    let mut harness = Harness::new();
    harness.frame(Vec::new());
    harness.force_collision();

    assert!(matches!(harness.session.mode(), GameMode::GameOver { .. }));
    assert!(!harness.driver.timers().is_active(SPAWN_TIMER));
}

#[test]
fn empty_board_offers_save_after_game_over() {
    let mut harness = Harness::new();
    harness.force_collision();
    assert_eq!(
        harness.session.mode(),
        &GameMode::GameOver { save_offered: true }
    );
}

#[test]
fn full_board_with_low_score_does_not_offer_save() {
    let mut harness = Harness::with_board(Some(ten_entries()));
    harness.force_collision();
    // One frame of play scores 3, below the tenth place of 10.
    assert_eq!(
        harness.session.mode(),
        &GameMode::GameOver {
            save_offered: false
        }
    );

    harness.press(Key::Char('y'));
    assert_eq!(
        harness.session.mode(),
        &GameMode::GameOver {
            save_offered: false
        }
    );
}

#[test]
fn score_freezes_after_game_over() {
    let mut harness = Harness::new();
    harness.force_collision();
    let frozen = harness.session.score();
    harness.advance(5_000);
    harness.frame(Vec::new());
    assert_eq!(harness.session.score(), frozen);
}

#[test]
fn inputs_illegal_for_mode_are_ignored() {
    let mut harness = Harness::new();
    assert_eq!(harness.press(Key::Char('q')), FrameOutcome::Continue);
    assert_eq!(harness.press(Key::Char('r')), FrameOutcome::Continue);
    assert_eq!(harness.session.mode(), &GameMode::Playing);

    harness.force_collision();
    let player = harness.session.player;
    harness.press(Key::Space);
    assert_eq!(harness.session.player, player);
}

#[test]
fn spawn_events_outside_playing_are_ignored() {
    let mut harness = Harness::new();
    harness.force_collision();
    let before = harness.session.obstacles.len();
    harness.frame(vec![InputEvent::Timer(SPAWN_TIMER)]);
    assert_eq!(harness.session.obstacles.len(), before);
}

#[test]
fn decline_clears_the_prompt() {
    let mut harness = Harness::new();
    harness.force_collision();
    harness.press(Key::Char('n'));
    assert_eq!(
        harness.session.mode(),
        &GameMode::GameOver {
            save_offered: false
        }
    );
    assert!(!harness.render().has_text("High Score! Save? (Y/N)"));
}

#[test]
fn confirm_name_entry_saves_trimmed_bounded_name() {
    let mut harness = Harness::new();
    harness.force_collision();
    let score = harness.session.score();

    harness.press(Key::Char('y'));
    assert_eq!(
        harness.session.mode(),
        &GameMode::EnteringName {
            name: String::new()
        }
    );

    harness.type_text("Quinn Ri");
    assert_eq!(
        harness.session.mode(),
        &GameMode::EnteringName {
            name: "Quinn ".to_string()
        }
    );
    harness.press(Key::Backspace);
    harness.press(Key::Enter);

    assert_eq!(
        harness.session.mode(),
        &GameMode::GameOver {
            save_offered: false
        }
    );
    let records = harness.session.leaderboard().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].display_name(), "Quinn");
    assert_eq!(records[0].rank_score(), score as f64);

    let reloaded = leaderboard::load_records(&harness.board_path).expect("reload");
    assert_eq!(reloaded, records);
}

#[test]
fn quit_letters_are_name_text_while_entering_name() {
    let mut harness = Harness::new();
    harness.force_collision();
    harness.press(Key::Char('y'));

    assert_eq!(harness.press(Key::Char('q')), FrameOutcome::Continue);
    harness.press(Key::Char('r'));
    assert_eq!(
        harness.session.mode(),
        &GameMode::EnteringName {
            name: "qr".to_string()
        }
    );
}

#[test]
fn empty_name_submit_skips_insert() {
    let mut harness = Harness::new();
    harness.force_collision();
    harness.press(Key::Char('y'));
    harness.press(Key::Enter);

    assert_eq!(
        harness.session.mode(),
        &GameMode::GameOver {
            save_offered: false
        }
    );
    assert!(harness.session.leaderboard().records().is_empty());
    assert!(!harness.board_path.exists());
}

#[test]
fn restart_resets_run_and_rearms_spawning() {
    let mut harness = Harness::new();
    harness.advance(2_000);
    harness.frame(vec![key_down(Key::Space)]);
    harness.force_collision();

    harness.press(Key::Char('r'));
    let now = harness.driver.clock().now_ms();

    assert_eq!(harness.session.mode(), &GameMode::Playing);
    assert!(harness.session.obstacles.is_empty());
    assert_eq!(harness.session.run_started_ms, now);
    assert_eq!(
        harness.driver.timers().next_due_ms(SPAWN_TIMER),
        Some(now + 2_000)
    );
    // Restart happened during event dispatch; the frame's update ran after.
    assert!(harness.session.player.is_grounded_on(235));
    assert_eq!(harness.session.score(), 0);
}

#[test]
fn quit_key_in_game_over_stops_the_loop() {
    let mut harness = Harness::new();
    harness.force_collision();
    assert_eq!(harness.press(Key::Char('q')), FrameOutcome::Quit);
}

#[test]
fn window_close_quits_in_every_mode() {
    let mut harness = Harness::new();
    assert_eq!(harness.frame(vec![InputEvent::Quit]), FrameOutcome::Quit);

    let mut harness = Harness::new();
    harness.force_collision();
    harness.press(Key::Char('y'));
    assert_eq!(harness.frame(vec![InputEvent::Quit]), FrameOutcome::Quit);
    assert!(matches!(
        harness.session.mode(),
        GameMode::EnteringName { .. }
    ));
}

#[test]
fn scores_view_opens_from_key_and_button_and_returns_to_game_over() {
    let mut harness = Harness::new();
    harness.force_collision();

    harness.press(Key::Char('h'));
    assert_eq!(
        harness.session.mode(),
        &GameMode::ViewingScores { save_offered: true }
    );
    harness.press(Key::Char('a'));
    assert!(matches!(
        harness.session.mode(),
        GameMode::ViewingScores { .. }
    ));
    harness.press(Key::Escape);
    assert_eq!(
        harness.session.mode(),
        &GameMode::GameOver { save_offered: true }
    );

    let button = harness.session.scores_button_rect();
    harness.frame(vec![InputEvent::MouseDown {
        x: button.x + 5,
        y: button.y + 5,
    }]);
    assert!(matches!(
        harness.session.mode(),
        GameMode::ViewingScores { .. }
    ));

    let list = harness.session.scores_list_rect();
    harness.frame(vec![InputEvent::MouseDown {
        x: list.x + 10,
        y: list.y + 10,
    }]);
    assert!(matches!(
        harness.session.mode(),
        GameMode::ViewingScores { .. }
    ));
    harness.frame(vec![InputEvent::MouseDown { x: 5, y: 395 }]);
    assert!(matches!(harness.session.mode(), GameMode::GameOver { .. }));
}

#[test]
fn new_tenth_place_is_offered_and_saved() {
    let mut harness = Harness::with_board(Some(ten_entries()));
    harness.advance(150);
    harness.force_collision();
    let score = harness.session.score();
    assert!(score > 10);
    assert_eq!(
        harness.session.mode(),
        &GameMode::GameOver { save_offered: true }
    );

    harness.press(Key::Char('y'));
    harness.type_text("Zed");
    harness.press(Key::Enter);

    let records = harness.session.leaderboard().records();
    assert_eq!(records.len(), 10);
    assert_eq!(records[9].display_name(), "Zed");
    assert!(!records.iter().any(|record| record.display_name() == "P9"));
}

#[test]
fn playing_draw_pass_runs_in_fixed_order() {
    let harness = Harness::new();
    let canvas = harness.render();
    let player = harness.session.player.rect;

    assert_eq!(canvas.ops[0], DrawOp::Clear(WHITE));
    assert_eq!(canvas.ops[1], DrawOp::Blit(900, 165, 0, 235));
    assert_eq!(
        canvas.ops[2],
        DrawOp::Blit(40, 60, player.x, player.y)
    );
    assert_eq!(
        canvas.ops.last(),
        Some(&DrawOp::Text("Score: 0".to_string(), BLACK))
    );
}

#[test]
fn game_over_overlay_shows_prompt_only_when_offered() {
    let mut harness = Harness::new();
    harness.force_collision();
    let canvas = harness.render();

    assert!(canvas.has_text("GAME OVER"));
    assert!(canvas.has_text(&format!("Final Score: {}", harness.session.score())));
    assert!(canvas
        .ops
        .contains(&DrawOp::Text("High Score! Save? (Y/N)".to_string(), RED)));
    assert!(canvas.has_text("Press 'R' to Restart or 'Q' to Quit"));
    assert!(canvas.has_text("High Scores (H)"));
}

#[test]
fn name_entry_overlay_shows_buffer() {
    let mut harness = Harness::new();
    harness.force_collision();
    harness.press(Key::Char('y'));
    harness.type_text("Al");
    let canvas = harness.render();

    assert!(canvas.has_text("Enter Name: Al"));
    assert!(canvas.has_text("Press Enter to Save"));
    assert!(!canvas.has_text("High Score! Save? (Y/N)"));
}

#[test]
fn scores_screen_lists_ranked_entries() {
    let mut harness = Harness::with_board(Some(json!([
        {"name": "Bo", "score": 20},
        {"name": "Al", "score": 50},
        {"name": "Cy"}
    ])));
    harness.force_collision();
    harness.press(Key::Char('h'));
    let canvas = harness.render();

    assert_eq!(canvas.ops[0], DrawOp::Clear(GREY));
    assert_eq!(
        canvas.texts(),
        vec![
            "High Scores",
            "1. Al - 50",
            "2. Bo - 20",
            "3. Cy - 0",
            "Press ESC or Click to Return",
        ]
    );
}

#[test]
fn empty_scores_screen_says_so() {
    let mut harness = Harness::new();
    harness.force_collision();
    harness.press(Key::Char('h'));
    assert!(harness.render().has_text("No high scores yet!"));
}
