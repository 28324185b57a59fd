//! Schedulable units.
//!
//! A [`Tweener`] is given a backend timeline and a start offset. It
//! registers its time-stamped operations and reports how much time it
//! consumes, which is how a [`Sequence`](crate::sequence::Sequence)
//! computes where the next group begins.

use crate::backend::{Backend, TimelineId, TweenOp};
use crate::error::Result;
use crate::item::Callback;
use crate::subject::SubjectWorld;
use crate::ThreadSafe;

pub mod callback;
pub mod keyframes;
pub mod nested;
pub mod pause;
pub mod property;
pub mod steps;

pub use callback::CallbackTweener;
pub use keyframes::{KeyframeTweenerBuilder, PropertyKeyframeTweener};
pub use nested::NestedSequence;
pub use pause::PauseTweener;
pub use property::PropertyTweener;
pub use steps::{
    AbsoluteSteps, OffsetSteps, PropertyStepTweener, StepTweenerBuilder,
};

/// Everything a [`Tweener`] needs to schedule itself.
pub struct PlayCtx<'a, W: SubjectWorld> {
    pub backend: &'a mut dyn Backend<W>,
    /// Read-only view of the world at scheduling time.
    pub world: &'a W,
    pub timeline: TimelineId,
}

impl<'a, W: SubjectWorld> PlayCtx<'a, W> {
    pub fn new(
        backend: &'a mut dyn Backend<W>,
        world: &'a W,
        timeline: TimelineId,
    ) -> Self {
        Self {
            backend,
            world,
            timeline,
        }
    }

    /// Registers `callback` at `start`, bound to `subject`.
    pub fn register_callback(
        &mut self,
        start: f32,
        callback: &Callback<W>,
        subject: W::Id,
    ) {
        tracing::trace!(
            timeline = ?self.timeline,
            start,
            ?subject,
            "register callback"
        );

        let callback = callback.clone();
        self.backend.register_callback(
            self.timeline,
            start,
            Box::new(move |world| callback(world, subject)),
        );
    }

    pub fn register_tween(&mut self, op: TweenOp<W>) {
        tracing::trace!(
            timeline = ?self.timeline,
            start = op.start,
            duration = op.duration,
            "register tween"
        );

        self.backend.register_tween(self.timeline, op);
    }

    #[inline]
    pub fn is_timeline_valid(&self) -> bool {
        self.backend.is_valid(self.timeline)
    }
}

/// The outcome of starting a [`Tweener`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSlot {
    /// Operations were registered; the tweener occupies this many
    /// seconds.
    Consumed(f32),
    /// Nothing was registered and no time is consumed.
    Skipped(SkipReason),
}

impl TimeSlot {
    #[inline]
    pub fn duration(&self) -> f32 {
        match self {
            TimeSlot::Consumed(duration) => *duration,
            TimeSlot::Skipped(_) => 0.0,
        }
    }

    #[inline]
    pub fn is_skipped(&self) -> bool {
        matches!(self, TimeSlot::Skipped(_))
    }
}

/// Why a [`Tweener`] skipped scheduling. These are runtime races, not
/// configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The subject no longer exists in the world.
    SubjectGone,
    /// The backend reports the timeline handle as no longer valid.
    TimelineInvalid,
}

pub trait Tweener<W: SubjectWorld>: ThreadSafe {
    /// Registers this tweener's operations starting at `delay` and
    /// returns the time it occupies.
    fn start(
        &self,
        ctx: &mut PlayCtx<'_, W>,
        delay: f32,
        subject: W::Id,
    ) -> Result<TimeSlot>;

    fn is_compatible_with(&self, _world: &W, _subject: W::Id) -> bool {
        true
    }
}
