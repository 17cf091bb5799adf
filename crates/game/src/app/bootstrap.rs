use std::path::Path;

use engine::{resolve_app_paths, LoopConfig, Scene};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use super::gameplay::leaderboard::{Leaderboard, LEADERBOARD_FILE_NAME};
use super::gameplay;
use super::tuning::{load_tuning, GameTuning};

const WINDOW_TITLE: &str = "Llama Run";
const IMAGES_DIR: &str = "images";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

/// Resolves paths, reads tuning and the leaderboard, and builds the scene.
/// `None` means startup failed and has already been logged.
pub(crate) fn build_app() -> Option<AppWiring> {
    init_tracing();
    info!("=== Llama Run Startup ===");

    let paths = match resolve_app_paths() {
        Ok(paths) => paths,
        Err(err) => {
            error!(error = %err, "startup_failed");
            return None;
        }
    };
    info!(root = %paths.root.display(), "app_paths_resolved");

    let tuning = match load_tuning(&paths.assets_dir) {
        Ok(tuning) => tuning,
        Err(err) => {
            error!(
                code = ?err.code,
                error = %err,
                "tuning_load_failed"
            );
            return None;
        }
    };

    let leaderboard = open_leaderboard(&paths.root.join(LEADERBOARD_FILE_NAME));
    let config = loop_config(&tuning);
    let scene = gameplay::build_session(tuning, leaderboard, &paths.assets_dir.join(IMAGES_DIR));

    Some(AppWiring {
        config,
        scene: Box::new(scene),
    })
}

fn open_leaderboard(path: &Path) -> Leaderboard {
    match Leaderboard::open(path) {
        Ok(leaderboard) => leaderboard,
        Err(err) => {
            error!(error = %err, "leaderboard_contract_violation_starting_empty");
            Leaderboard::empty(path)
        }
    }
}

fn loop_config(tuning: &GameTuning) -> LoopConfig {
    LoopConfig {
        window_title: WINDOW_TITLE.to_string(),
        window_width: tuning.window_width,
        window_height: tuning.window_height,
        target_fps: tuning.target_fps,
        ..LoopConfig::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
