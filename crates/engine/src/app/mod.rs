mod clock;
mod driver;
mod geometry;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod timers;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use driver::{FrameDriver, FrameOutcome};
pub use geometry::Rect;
pub use input::{InputEvent, Key, StampedEvent, TimerId};
pub use loop_runner::{compute_cap_sleep, run_app, target_frame_duration, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    draw_text_centered, load_sprite_or_placeholder, text_size, Canvas, FrameCanvas, Renderer,
    Rgba, Sprite, SpriteLoadError, TextStyle, GLYPH_HEIGHT, GLYPH_WIDTH,
};
pub use scene::{FrameContext, Scene, SceneCommand};
pub use timers::{TimerSchedule, MAX_TIMER_CATCH_UP};
