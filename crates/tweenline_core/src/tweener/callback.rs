use crate::error::{check_duration, Result};
use crate::item::{callback, Callback};
use crate::subject::SubjectWorld;
use crate::ThreadSafe;

use super::{PlayCtx, SkipReason, TimeSlot, Tweener};

/// Fires a callback `delay` seconds after its start offset and
/// occupies that delay.
pub struct CallbackTweener<W: SubjectWorld> {
    callback: Callback<W>,
    delay: f32,
}

impl<W: SubjectWorld> CallbackTweener<W> {
    pub fn new(
        f: impl Fn(&mut W, W::Id) + ThreadSafe,
        delay: f32,
    ) -> Result<Self> {
        Ok(Self {
            callback: callback(f),
            delay: check_duration(delay)?,
        })
    }

    #[inline]
    pub fn delay(&self) -> f32 {
        self.delay
    }
}

impl<W: SubjectWorld> Tweener<W> for CallbackTweener<W> {
    fn start(
        &self,
        ctx: &mut PlayCtx<'_, W>,
        delay: f32,
        subject: W::Id,
    ) -> Result<TimeSlot> {
        if !ctx.is_timeline_valid() {
            tracing::warn!(
                timeline = ?ctx.timeline,
                ?subject,
                "timeline is no longer valid, skipping callback"
            );
            return Ok(TimeSlot::Skipped(SkipReason::TimelineInvalid));
        }

        ctx.register_callback(delay + self.delay, &self.callback, subject);
        Ok(TimeSlot::Consumed(self.delay))
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{log, Recorded, RecordingBackend, TestWorld};

    use super::*;

    #[test]
    fn callback_fires_after_its_delay() {
        let mut world = TestWorld::with_subjects([(1, 0.0), (2, 0.0)]);
        let mut backend = RecordingBackend::new();
        let timeline = backend.timeline();

        let tweener = CallbackTweener::new(log("ping"), 0.25).unwrap();
        let slot = {
            let mut ctx = PlayCtx::new(&mut backend, &world, timeline);
            tweener.start(&mut ctx, 1.0, 2).unwrap()
        };

        assert_eq!(slot, TimeSlot::Consumed(0.25));
        assert_eq!(backend.ops(), &[Recorded::Callback { start: 1.25 }]);

        backend.finish(&mut world);
        // Bound to the subject it was started with.
        assert_eq!(world.events, vec![(2, "ping")]);
    }

    #[test]
    fn invalid_timeline_skips_without_error() {
        let world = TestWorld::with_subjects([(1, 0.0)]);
        let mut backend = RecordingBackend::new();
        let timeline = backend.timeline();
        backend.invalidate();

        let tweener = CallbackTweener::new(log("ping"), 0.5).unwrap();
        let slot = {
            let mut ctx = PlayCtx::new(&mut backend, &world, timeline);
            tweener.start(&mut ctx, 0.0, 1).unwrap()
        };

        assert_eq!(slot, TimeSlot::Skipped(SkipReason::TimelineInvalid));
        assert_eq!(slot.duration(), 0.0);
        assert!(backend.ops().is_empty());
    }
}
