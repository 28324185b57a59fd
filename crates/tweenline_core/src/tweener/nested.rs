use std::sync::Arc;

use crate::error::{InvalidAnimation, Result};
use crate::sequence::Sequence;
use crate::subject::SubjectWorld;

use super::{PlayCtx, TimeSlot, Tweener};

/// Replays another [`Sequence`] inside the parent's timeline.
///
/// The sequence is shared, so the same declaration can be nested in
/// several places, each playback computing its own offsets.
pub struct NestedSequence<W: SubjectWorld> {
    sequence: Arc<Sequence<W>>,
}

impl<W: SubjectWorld> NestedSequence<W> {
    pub fn new(sequence: impl Into<Arc<Sequence<W>>>) -> Self {
        Self {
            sequence: sequence.into(),
        }
    }

    #[inline]
    pub fn sequence(&self) -> &Arc<Sequence<W>> {
        &self.sequence
    }
}

impl<W: SubjectWorld> Tweener<W> for NestedSequence<W> {
    fn start(
        &self,
        ctx: &mut PlayCtx<'_, W>,
        delay: f32,
        subject: W::Id,
    ) -> Result<TimeSlot> {
        let config = self.sequence.config();

        // An infinite nested loop would never hand control back.
        if config.loops() == 0 {
            return Err(InvalidAnimation::InfiniteNestedLoops.into());
        }
        if self.sequence.is_empty() {
            return Err(InvalidAnimation::NoGroups.into());
        }

        let subject = config.default_target().unwrap_or(subject);
        tracing::debug!(
            ?subject,
            delay,
            loops = config.loops(),
            groups = self.sequence.group_count(),
            "expand nested sequence"
        );

        let mut elapsed = 0.0;
        for _ in 0..config.loops() {
            elapsed +=
                self.sequence.execute_groups(ctx, delay + elapsed, subject)?;
        }

        if let Some(finish_all) = config.finish_all_action() {
            ctx.register_callback(delay + elapsed, finish_all, subject);
        }

        Ok(TimeSlot::Consumed(elapsed))
    }
}
