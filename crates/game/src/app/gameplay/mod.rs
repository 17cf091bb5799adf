pub(crate) mod collision;
pub(crate) mod leaderboard;
pub(crate) mod obstacles;
pub(crate) mod physics;

use std::path::Path;

use engine::{
    draw_text_centered, load_sprite_or_placeholder, Canvas, FrameContext, InputEvent, Key, Rect,
    Rgba, Scene, SceneCommand, Sprite, TextStyle, TimerId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use self::collision::{shapes_collide, CollisionMask};
use self::leaderboard::{Leaderboard, LeaderboardRecord};
use self::obstacles::ObstacleField;
use self::physics::PlayerBody;
use super::tuning::GameTuning;

const SPAWN_TIMER: TimerId = TimerId(1);
const NAME_LIMIT: usize = 6;
const SCORE_TICK_MS: u64 = 10;

const WHITE: Rgba = [255, 255, 255, 255];
const BLACK: Rgba = [0, 0, 0, 255];
const GREY: Rgba = [128, 128, 128, 255];
const RED: Rgba = [255, 0, 0, 255];
const GREEN: Rgba = [0, 255, 0, 255];

const PLAYER_FALLBACK_SIZE: (u32, u32) = (40, 60);
const OBSTACLE_FALLBACK_SIZE: (u32, u32) = (25, 50);
const PLAYER_IMAGE: &str = "llama.png";
const OBSTACLE_IMAGE: &str = "cactus.png";
const GROUND_IMAGE: &str = "ground.png";

const HUD_STYLE: TextStyle = TextStyle::new(3, BLACK);
const HEADLINE_STYLE: TextStyle = TextStyle::new(6, BLACK);
const TITLE_STYLE: TextStyle = TextStyle::new(5, BLACK);
const BODY_STYLE: TextStyle = TextStyle::new(3, BLACK);
const PROMPT_STYLE: TextStyle = TextStyle::new(3, RED);

const SCORES_BUTTON_SIZE: (i32, i32) = (220, 30);
const SCORES_LIST_TOP: i32 = 95;
const SCORES_LINE_HEIGHT: i32 = 24;
const SCORES_LIST_WIDTH: i32 = 440;

include!("session.rs");
include!("scene_impl.rs");
include!("view.rs");

/// Builds the playable session with sprites from `images_dir`.
pub(crate) fn build_session(
    tuning: GameTuning,
    leaderboard: Leaderboard,
    images_dir: &Path,
) -> GameSession {
    let sprites = GameSprites::load(images_dir, &tuning);
    GameSession::new(tuning, leaderboard, sprites, StdRng::from_entropy())
}
