//! The boundary between tweenline and the per-frame scheduler that
//! actually advances time.
//!
//! tweenline only *computes and registers* time-stamped operations.
//! A [`Backend`] owns timelines, advances them, samples registered
//! [`TweenOp`]s and invokes registered callbacks. Every offset handed
//! to a backend is absolute within its timeline, so operations are
//! independent of each other: ordering comes from offsets alone.

use crate::ease::NativeEase;
use crate::error::Result;
use crate::subject::SubjectWorld;

/// A one-shot operation on the subject world.
pub type WorldOp<W> = Box<dyn FnMut(&mut W)>;

/// An operation sampled with a progress value.
pub type SampleOp<W> = Box<dyn FnMut(&mut W, f32)>;

/// Handle of a timeline owned by a [`Backend`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct TimelineId(u64);

impl TimelineId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Timeline-wide playback settings applied after compilation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineConfig {
    /// Number of times the whole timeline plays. `0` loops forever.
    pub loops: u32,
    /// Multiplier applied to the backend clock.
    pub speed_scale: f32,
    /// Length of one loop, trailing pauses included.
    pub duration: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            loops: 1,
            speed_scale: 1.0,
            duration: 0.0,
        }
    }
}

/// An interpolation spanning `[start, start + duration]`.
pub struct TweenOp<W> {
    pub start: f32,
    pub duration: f32,
    pub kind: TweenKind<W>,
}

impl<W> TweenOp<W> {
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// How a [`TweenOp`] is sampled.
pub enum TweenKind<W> {
    /// The backend evaluates `ease` itself and passes the eased
    /// progress to `apply`.
    Native { ease: NativeEase, apply: SampleOp<W> },
    /// The backend passes raw progress in `[0, 1]`; the operation
    /// applies its own curve.
    Sampled(SampleOp<W>),
}

impl<W> TweenKind<W> {
    /// Sample the operation at raw progress `t`.
    pub fn sample(&mut self, world: &mut W, t: f32) {
        match self {
            TweenKind::Native { ease, apply } => apply(world, ease.sample(t)),
            TweenKind::Sampled(sample) => sample(world, t),
        }
    }
}

/// An external per-frame scheduler.
///
/// The trait is object safe: tweeners receive it as
/// `&mut dyn Backend<W>` through [`PlayCtx`](crate::tweener::PlayCtx).
pub trait Backend<W: SubjectWorld> {
    /// Creates a fresh timeline hosted by `subject`.
    ///
    /// Fails with
    /// [`AnimationError::TimelineUnavailable`](crate::error::AnimationError::TimelineUnavailable)
    /// if the subject cannot host one.
    fn create_timeline(
        &mut self,
        world: &W,
        subject: W::Id,
    ) -> Result<TimelineId>;

    /// Liveness check of a timeline handle.
    fn is_valid(&self, timeline: TimelineId) -> bool;

    fn register_tween(&mut self, timeline: TimelineId, op: TweenOp<W>);

    /// Registers a zero-duration callback at `start`.
    fn register_callback(
        &mut self,
        timeline: TimelineId,
        start: f32,
        callback: WorldOp<W>,
    );

    fn configure(&mut self, timeline: TimelineId, config: TimelineConfig);

    /// Drops a timeline and everything registered on it without running
    /// its completion callbacks.
    ///
    /// Returns `false` if the timeline was not alive.
    fn kill(&mut self, timeline: TimelineId) -> bool;

    /// Invokes `callback` once the whole timeline, loops included, has
    /// completed.
    fn on_completed(&mut self, timeline: TimelineId, callback: WorldOp<W>);
}
