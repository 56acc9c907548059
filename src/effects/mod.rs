//! Screen-wide visual effects layered over the normal render pass.
//!
//! An effect is a time-driven state machine: the caller supplies elapsed
//! time every frame, the effect turns it into an interpolation state, and
//! its renderer draws over the finished frame. Effects never read a clock
//! themselves and never retrigger themselves; every transition is driven
//! from outside through [`VisualEffect::start`], [`VisualEffect::advance`],
//! and [`VisualEffect::stop`].
//!
//! Lifecycle: `Idle → Preparing → Running → TearingDown → Idle`. The
//! preparing and tearing-down phases run exactly once per activation and
//! bracket the per-frame running phase; an effect back at `Idle` is inert
//! and can be restarted with a fresh `start`.

pub mod stripesfadeout;

use bevy_ecs::prelude::Resource;
use raylib::prelude::RaylibDrawHandle;

use crate::resources::screensize::ScreenSize;

/// Where an effect currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectPhase {
    /// Not started, or finished and inert.
    Idle,
    /// One-time setup: geometry is being computed.
    Preparing,
    /// Advancing with elapsed time, re-rendered every tick.
    Running,
    /// One-time cleanup before going inert.
    TearingDown,
}

/// Timing state shared by every effect: the current phase, the accumulated
/// elapsed time, and the configured duration and frame rate.
#[derive(Debug, Clone, Copy)]
pub struct EffectCore {
    phase: EffectPhase,
    /// Seconds accumulated while running.
    elapsed: f32,
    /// Total duration in seconds. Never zero.
    duration: f32,
    fps: f32,
}

impl EffectCore {
    /// Build from a duration in milliseconds and a target frame rate.
    pub fn new(duration_ms: f32, fps: f32) -> Self {
        Self {
            phase: EffectPhase::Idle,
            elapsed: 0.0,
            duration: (duration_ms / 1000.0).max(0.001),
            fps,
        }
    }

    pub fn phase(&self) -> EffectPhase {
        self.phase
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Elapsed fraction, clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

/// The closed capability set every effect implements: prepare, advance,
/// render, tear down. Driver logic lives in the provided methods; concrete
/// effects only supply their geometry hooks and renderer.
pub trait VisualEffect {
    fn core(&self) -> &EffectCore;
    fn core_mut(&mut self) -> &mut EffectCore;

    /// One-time setup at `start`: compute geometry for the given screen.
    fn prepare_instance(&mut self, screen: ScreenSize);

    /// One-time cleanup at `stop`.
    fn tidy_up_instance(&mut self);

    /// Draw the overlay for the current interpolation state. Takes `&self`:
    /// renderers draw, they do not touch geometry computed at prepare time.
    fn render(&self, d: &mut RaylibDrawHandle);

    /// Begin (or restart) the effect: runs the one-time preparation and
    /// enters the running phase with the clock rewound.
    fn start(&mut self, screen: ScreenSize) {
        let core = self.core_mut();
        core.phase = EffectPhase::Preparing;
        core.elapsed = 0.0;
        self.prepare_instance(screen);
        self.core_mut().phase = EffectPhase::Running;
    }

    /// Accumulate caller-supplied elapsed seconds. Ignored outside the
    /// running phase.
    fn advance(&mut self, dt: f32) {
        let core = self.core_mut();
        if core.phase == EffectPhase::Running {
            core.elapsed += dt;
        }
    }

    /// End the effect: runs the one-time teardown and goes inert. A
    /// stopped or never-started effect stays untouched.
    fn stop(&mut self) {
        if self.core().phase != EffectPhase::Running {
            return;
        }
        self.core_mut().phase = EffectPhase::TearingDown;
        self.tidy_up_instance();
        self.core_mut().phase = EffectPhase::Idle;
    }

    fn phase(&self) -> EffectPhase {
        self.core().phase
    }

    fn is_running(&self) -> bool {
        self.core().phase == EffectPhase::Running
    }

    /// Elapsed fraction in `[0, 1]`.
    fn progress(&self) -> f32 {
        self.core().progress()
    }
}

/// The effect currently layered over the frame, if any.
///
/// One slot: the engine renders at most one screen-wide effect at a time.
#[derive(Resource, Default)]
pub struct ActiveEffect(pub Option<Box<dyn VisualEffect + Send + Sync>>);

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop {
        core: EffectCore,
        prepared: usize,
        tidied: usize,
    }

    impl Noop {
        fn new() -> Self {
            Self {
                core: EffectCore::new(1000.0, 60.0),
                prepared: 0,
                tidied: 0,
            }
        }
    }

    impl VisualEffect for Noop {
        fn core(&self) -> &EffectCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut EffectCore {
            &mut self.core
        }
        fn prepare_instance(&mut self, _screen: ScreenSize) {
            self.prepared += 1;
        }
        fn tidy_up_instance(&mut self) {
            self.tidied += 1;
        }
        fn render(&self, _d: &mut RaylibDrawHandle) {}
    }

    const SCREEN: ScreenSize = ScreenSize { w: 800, h: 600 };

    #[test]
    fn starts_idle_and_runs_after_start() {
        let mut fx = Noop::new();
        assert_eq!(fx.phase(), EffectPhase::Idle);
        fx.start(SCREEN);
        assert_eq!(fx.phase(), EffectPhase::Running);
        assert_eq!(fx.prepared, 1);
    }

    #[test]
    fn advance_only_counts_while_running() {
        let mut fx = Noop::new();
        fx.advance(0.5);
        assert_eq!(fx.progress(), 0.0);
        fx.start(SCREEN);
        fx.advance(0.25);
        assert!((fx.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn progress_clamps_at_one() {
        let mut fx = Noop::new();
        fx.start(SCREEN);
        fx.advance(10.0);
        assert_eq!(fx.progress(), 1.0);
    }

    #[test]
    fn stop_tears_down_once_and_goes_inert() {
        let mut fx = Noop::new();
        fx.start(SCREEN);
        fx.stop();
        assert_eq!(fx.phase(), EffectPhase::Idle);
        assert_eq!(fx.tidied, 1);
        fx.stop();
        assert_eq!(fx.tidied, 1);
    }

    #[test]
    fn restart_reruns_preparation_and_rewinds() {
        let mut fx = Noop::new();
        fx.start(SCREEN);
        fx.advance(0.7);
        fx.stop();
        fx.start(SCREEN);
        assert_eq!(fx.prepared, 2);
        assert_eq!(fx.progress(), 0.0);
        assert!(fx.is_running());
    }
}
