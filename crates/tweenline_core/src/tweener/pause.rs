use crate::error::{check_duration, Result};
use crate::subject::SubjectWorld;

use super::{PlayCtx, TimeSlot, Tweener};

/// Reserves a slot of time without registering anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseTweener {
    delay: f32,
}

impl PauseTweener {
    pub fn new(delay: f32) -> Result<Self> {
        Ok(Self {
            delay: check_duration(delay)?,
        })
    }

    #[inline]
    pub fn delay(&self) -> f32 {
        self.delay
    }
}

impl<W: SubjectWorld> Tweener<W> for PauseTweener {
    fn start(
        &self,
        _ctx: &mut PlayCtx<'_, W>,
        _delay: f32,
        _subject: W::Id,
    ) -> Result<TimeSlot> {
        Ok(TimeSlot::Consumed(self.delay))
    }
}
