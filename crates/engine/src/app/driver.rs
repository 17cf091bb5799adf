use tracing::info;

use super::clock::Clock;
use super::input::{InputEvent, StampedEvent};
use super::scene::{FrameContext, Scene, SceneCommand};
use super::timers::TimerSchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Headless frame sequencing: collect, dispatch in arrival order, update.
/// The window loop owns one of these and renders after each `step`.
#[derive(Debug)]
pub struct FrameDriver<C: Clock> {
    clock: C,
    timers: TimerSchedule,
    frame_index: u64,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            timers: TimerSchedule::new(),
            frame_index: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timers(&self) -> &TimerSchedule {
        &self.timers
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn load(&mut self, scene: &mut dyn Scene) {
        let now_ms = self.clock.now_ms();
        let mut ctx = FrameContext::new(now_ms, &mut self.timers);
        scene.load(&mut ctx);
    }

    pub fn unload(&mut self, scene: &mut dyn Scene) {
        scene.unload();
    }

    pub fn step(
        &mut self,
        scene: &mut dyn Scene,
        device_events: Vec<StampedEvent>,
    ) -> FrameOutcome {
        self.frame_index = self.frame_index.saturating_add(1);
        let now_ms = self.clock.now_ms();

        let mut batch = device_events;
        batch.extend(self.timers.drain_due(now_ms));
        // Stable: device events stay ahead of timer events with the same stamp.
        batch.sort_by_key(|stamped| stamped.at_ms);

        let mut ctx = FrameContext::new(now_ms, &mut self.timers);
        for stamped in batch {
            if stamped.event == InputEvent::Quit {
                info!(reason = "quit_event", "shutdown_requested");
                return FrameOutcome::Quit;
            }
            if scene.handle_event(stamped.event, &mut ctx) == SceneCommand::Quit {
                info!(reason = "scene_command", "shutdown_requested");
                return FrameOutcome::Quit;
            }
        }

        match scene.update(&mut ctx) {
            SceneCommand::Quit => {
                info!(reason = "scene_command", "shutdown_requested");
                FrameOutcome::Quit
            }
            SceneCommand::None => FrameOutcome::Continue,
        }
    }
}
