use std::time::Duration;

use super::input::{InputEvent, TimerId};
use super::rendering::Canvas;
use super::timers::TimerSchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

/// Per-frame view of engine services handed to a scene.
pub struct FrameContext<'a> {
    now_ms: u64,
    timers: &'a mut TimerSchedule,
}

impl<'a> FrameContext<'a> {
    pub fn new(now_ms: u64, timers: &'a mut TimerSchedule) -> Self {
        Self { now_ms, timers }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arms a repeating timer measured from the current frame time, or
    /// disarms it with `None`.
    pub fn set_timer(&mut self, id: TimerId, interval: Option<Duration>) {
        self.timers.set(id, interval, self.now_ms);
    }
}

pub trait Scene {
    fn load(&mut self, ctx: &mut FrameContext<'_>);
    fn handle_event(&mut self, event: InputEvent, ctx: &mut FrameContext<'_>) -> SceneCommand;
    fn update(&mut self, ctx: &mut FrameContext<'_>) -> SceneCommand;
    fn render(&self, canvas: &mut dyn Canvas);
    fn unload(&mut self) {}
}
