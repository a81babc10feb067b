//! Animation clock: one shared `{time, scroll_offset, pointer}` sample per
//! frame for everything that wants ambient motion.
//!
//! The frame loop is a tokio task that only *signals* the owner; the owner
//! applies the signal on its own loop.  Every signal carries the generation
//! of the task that sent it, so a signal still queued when the clock is
//! stopped (or restarted) is dropped on arrival.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Generations are unique across all clocks so two clocks sharing a channel
/// can never accept each other's frames.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Nominal time advanced per frame (~1.0 per second at 60 Hz).
pub const DEFAULT_FRAME_STEP: f64 = 0.016;

/// Pointer position in virtual pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// What consumers read.  Copied out, never borrowed across frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockState {
    pub time: f64,
    pub scroll_offset: f64,
    pub pointer: Pointer,
}

#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    /// Added to `time` on every frame, regardless of how long the frame took.
    pub frame_step: f64,
    /// How often the frame task fires.
    pub frame_interval: Duration,
}

impl ClockConfig {
    pub fn with_fps(fps: u32) -> Self {
        let fps = fps.clamp(1, 240);
        Self {
            frame_step: DEFAULT_FRAME_STEP,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(fps)),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::with_fps(60)
    }
}

/// Sent by the frame task to the clock's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    Frame { generation: u64 },
}

struct FrameTask {
    generation: u64,
    alive: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// A per-scope clock.  Created stopped; `start` attaches it to the runtime,
/// `stop` (or drop) detaches it.
pub struct AnimationClock {
    config: ClockConfig,
    state: ClockState,
    task: Option<FrameTask>,
}

impl AnimationClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            state: ClockState::default(),
            task: None,
        }
    }

    /// Start the frame loop.  Returns `false` (and stays inert) when there is
    /// no runtime to schedule frames on.
    pub fn start(&mut self, tx: mpsc::UnboundedSender<ClockSignal>) -> bool {
        if self.task.is_some() {
            return true;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("clock: no runtime, staying inert");
            return false;
        };

        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        let alive = Arc::new(AtomicBool::new(true));
        let token = Arc::clone(&alive);
        let period = self.config.frame_interval.max(Duration::from_millis(1));

        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the first frame lands
            // one period after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !token.load(Ordering::Acquire) {
                    break;
                }
                if tx.send(ClockSignal::Frame { generation }).is_err() {
                    break; // owner gone
                }
            }
        });

        tracing::debug!(generation, ?period, "clock: started");
        self.task = Some(FrameTask {
            generation,
            alive,
            handle,
        });
        true
    }

    /// Cancel the frame loop.  Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.alive.store(false, Ordering::Release);
            task.handle.abort();
            tracing::debug!(generation = task.generation, "clock: stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Apply a frame signal.  Returns `true` if the state changed.
    pub fn on_signal(&mut self, signal: ClockSignal) -> bool {
        match signal {
            ClockSignal::Frame { generation } => self.on_frame(generation),
        }
    }

    fn on_frame(&mut self, generation: u64) -> bool {
        let live = self
            .task
            .as_ref()
            .is_some_and(|t| t.generation == generation && t.alive.load(Ordering::Acquire));
        if !live {
            return false;
        }
        self.state.time += self.config.frame_step;
        true
    }

    /// Scroll listener.  Overwrites the offset; ignored while stopped.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state.scroll_offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        true
    }

    /// Pointer listener.  Overwrites the position; ignored while stopped.
    pub fn on_pointer(&mut self, x: f64, y: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        self.state.pointer = Pointer {
            x: finite(x),
            y: finite(y),
        };
        true
    }

    pub fn state(&self) -> ClockState {
        self.state
    }
}

impl Drop for AnimationClock {
    fn drop(&mut self) {
        self.stop();
    }
}
