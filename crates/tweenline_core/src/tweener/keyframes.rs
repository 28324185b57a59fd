use nonempty::NonEmpty;

use crate::accessor::PropertyFactory;
use crate::ease::Curve;
use crate::error::{check_duration, AnimationError, InvalidAnimation, Result};
use crate::interpolation::Animatable;
use crate::item::{callback, AnimationItem, AnimationKeyframe, ItemValue, ValueSource};
use crate::sequence::{GroupMode, SequenceBuilder};
use crate::subject::SubjectWorld;
use crate::ThreadSafe;

use super::{PlayCtx, PropertyTweener, TimeSlot, Tweener};

/// Animates one property through keyframes placed at fractions of a
/// fixed duration.
///
/// The span between two consecutive keyframes behaves like a step of
/// `(percent_i - percent_{i-1}) * duration` seconds. The tweener
/// always occupies its full duration: after the last keyframe the
/// final value is held.
pub struct PropertyKeyframeTweener<W: SubjectWorld, T> {
    core: PropertyTweener<W, T>,
    /// Sorted by percent.
    keyframes: NonEmpty<AnimationKeyframe<W, T>>,
    duration: f32,
}

impl<W: SubjectWorld, T: Animatable> PropertyKeyframeTweener<W, T> {
    /// Sorts `keyframes` by percent, keeping the insertion order of
    /// equal percents.
    ///
    /// Without an explicit starting value, an absolute keyframe at 0%
    /// becomes the starting value.
    pub fn new(
        mut core: PropertyTweener<W, T>,
        keyframes: NonEmpty<AnimationKeyframe<W, T>>,
        duration: f32,
    ) -> Self {
        let NonEmpty { head, mut tail } = keyframes;
        tail.insert(0, head);
        tail.sort_by(|a, b| a.percent.total_cmp(&b.percent));
        let head = tail.remove(0);
        let mut keyframes = NonEmpty { head, tail };

        let first = keyframes.first();
        if !core.has_from() && first.percent == 0.0 {
            if let ItemValue::Absolute(source) = &first.item.value {
                core.set_from(source.clone());
            }
        }

        // Percentages are validated by the builder, clamp the rest.
        for keyframe in keyframes.iter_mut() {
            keyframe.percent = keyframe.percent.clamp(0.0, 1.0);
        }

        Self {
            core,
            keyframes,
            duration,
        }
    }

    #[inline]
    pub fn keyframes(&self) -> &NonEmpty<AnimationKeyframe<W, T>> {
        &self.keyframes
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

impl<W: SubjectWorld, T: Animatable> Tweener<W>
    for PropertyKeyframeTweener<W, T>
{
    fn start(
        &self,
        ctx: &mut PlayCtx<'_, W>,
        delay: f32,
        subject: W::Id,
    ) -> Result<TimeSlot> {
        let mut previous = 0.0;
        let spans = self.keyframes.iter().map(|keyframe| {
            let span = (keyframe.percent - previous) * self.duration;
            previous = keyframe.percent;
            (&keyframe.item, span)
        });

        let slot = self.core.run_items(ctx, delay, subject, spans)?;
        Ok(match slot {
            TimeSlot::Consumed(_) => TimeSlot::Consumed(self.duration),
            skipped => skipped,
        })
    }

    fn is_compatible_with(&self, world: &W, subject: W::Id) -> bool {
        self.core.is_compatible_with(world, subject)
    }
}

/// Collects the keyframes of a [`PropertyKeyframeTweener`] and hands
/// it back to the [`SequenceBuilder`] on [`end`](Self::end).
#[must_use = "Call `end()` to add the tweener to the sequence."]
pub struct KeyframeTweenerBuilder<W: SubjectWorld, T, M: GroupMode> {
    sequence: SequenceBuilder<W, M>,
    core: PropertyTweener<W, T>,
    keyframes: Vec<AnimationKeyframe<W, T>>,
    duration: f32,
    error: Option<AnimationError>,
}

impl<W, T, M> KeyframeTweenerBuilder<W, T, M>
where
    W: SubjectWorld,
    T: Animatable,
    M: GroupMode,
{
    pub(crate) fn new(
        sequence: SequenceBuilder<W, M>,
        property: PropertyFactory<W, T>,
        duration: f32,
    ) -> Self {
        let (duration, error) = match check_duration(duration) {
            Ok(duration) => (duration, None),
            Err(err) => (0.0, Some(err)),
        };

        Self {
            sequence,
            core: PropertyTweener::new(property, None),
            keyframes: Vec::new(),
            duration,
            error,
        }
    }

    /// Reaches `value` at `percent` of the duration.
    pub fn key(self, percent: f32, value: T) -> Self {
        self.push_keyframe(AnimationItem::absolute(ValueSource::constant(value)), percent)
    }

    /// Reaches a value computed from the subject at `percent` of the
    /// duration.
    pub fn key_fn(
        self,
        percent: f32,
        value: impl Fn(&W, W::Id) -> T + ThreadSafe,
    ) -> Self {
        self.push_keyframe(AnimationItem::absolute(ValueSource::new(value)), percent)
    }

    /// Moves by `delta` from the previous keyframe's value, reached at
    /// `percent` of the duration.
    pub fn key_offset(self, percent: f32, delta: T) -> Self {
        self.push_keyframe(AnimationItem::offset(ValueSource::constant(delta)), percent)
    }

    pub fn from(mut self, value: T) -> Self {
        self.core.set_from(ValueSource::constant(value));
        self
    }

    pub fn from_fn(mut self, from: impl Fn(&W, W::Id) -> T + ThreadSafe) -> Self {
        self.core.set_from(ValueSource::new(from));
        self
    }

    /// Sets the curve leading into the last keyframe. Before any
    /// keyframe is added, sets the default curve of the whole tweener.
    pub fn with_ease(mut self, curve: impl Into<Curve>) -> Self {
        let curve = curve.into();
        match self.keyframes.last_mut() {
            Some(keyframe) => keyframe.item.curve = Some(curve),
            None => {
                self.core.set_curve(curve);
            }
        }
        self
    }

    /// Fires `f` with the subject when the span leading into the last
    /// keyframe begins.
    pub fn with_callback(
        mut self,
        f: impl Fn(&mut W, W::Id) + ThreadSafe,
    ) -> Self {
        match self.keyframes.last_mut() {
            Some(keyframe) => keyframe.item.callback = Some(callback(f)),
            None => {
                tracing::warn!("`with_callback` called before any keyframe, ignoring");
            }
        }
        self
    }

    fn push_keyframe(mut self, item: AnimationItem<W, T>, percent: f32) -> Self {
        if (0.0..=1.0).contains(&percent) {
            self.keyframes.push(AnimationKeyframe::new(item, percent));
        } else {
            self.error
                .get_or_insert(InvalidAnimation::InvalidPercent(percent).into());
        }
        self
    }

    /// Seals the tweener and registers it with the sequence.
    pub fn end(self) -> Result<SequenceBuilder<W, M>> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let keyframes =
            NonEmpty::from_vec(self.keyframes).ok_or(InvalidAnimation::NoSteps)?;

        Ok(self.sequence.add_tweener(PropertyKeyframeTweener::new(
            self.core,
            keyframes,
            self.duration,
        )))
    }
}

#[cfg(test)]
mod tests {
    use crate::sequence::Sequence;
    use crate::testing::{value_property, RecordingBackend, TestWorld};

    use super::*;

    fn keyframe(percent: f32, value: f32) -> AnimationKeyframe<TestWorld, f32> {
        AnimationKeyframe::new(
            AnimationItem::absolute(ValueSource::constant(value)),
            percent,
        )
    }

    fn tweener(
        keyframes: Vec<AnimationKeyframe<TestWorld, f32>>,
        duration: f32,
    ) -> PropertyKeyframeTweener<TestWorld, f32> {
        PropertyKeyframeTweener::new(
            PropertyTweener::new(value_property(), None),
            NonEmpty::from_vec(keyframes).unwrap(),
            duration,
        )
    }

    fn start(
        tweener: &PropertyKeyframeTweener<TestWorld, f32>,
        backend: &mut RecordingBackend,
        world: &TestWorld,
    ) -> TimeSlot {
        let timeline = backend.timeline();
        let mut ctx = PlayCtx::new(backend, world, timeline);
        tweener.start(&mut ctx, 1.0, 1).unwrap()
    }

    #[test]
    fn keyframes_become_spans_of_the_duration() {
        let world = TestWorld::with_subjects([(1, 0.0)]);
        let mut backend = RecordingBackend::new();

        // Inserted out of order.
        let tweener =
            tweener(vec![keyframe(1.0, 20.0), keyframe(0.5, 10.0)], 2.0);
        let slot = start(&tweener, &mut backend, &world);

        assert_eq!(slot, TimeSlot::Consumed(2.0));
        assert_eq!(backend.tween_spans(), vec![(1.0, 1.0), (2.0, 1.0)]);
        assert_eq!(backend.endpoints(0, &world, 1), (0.0, 10.0));
        assert_eq!(backend.endpoints(1, &world, 1), (10.0, 20.0));
    }

    #[test]
    fn final_value_is_held_until_the_end() {
        let world = TestWorld::with_subjects([(1, 0.0)]);
        let mut backend = RecordingBackend::new();

        let tweener = tweener(vec![keyframe(0.25, 4.0)], 4.0);
        let slot = start(&tweener, &mut backend, &world);

        assert_eq!(slot, TimeSlot::Consumed(4.0));
        assert_eq!(backend.tween_spans(), vec![(1.0, 1.0)]);
    }

    #[test]
    fn keyframe_at_zero_is_the_start_value() {
        let world = TestWorld::with_subjects([(1, 100.0)]);
        let mut backend = RecordingBackend::new();

        let tweener =
            tweener(vec![keyframe(1.0, 10.0), keyframe(0.0, 5.0)], 1.0);
        start(&tweener, &mut backend, &world);

        assert_eq!(backend.tween_spans(), vec![(1.0, 1.0)]);
        assert_eq!(backend.endpoints(0, &world, 1), (5.0, 10.0));
    }

    #[test]
    fn equal_percents_keep_insertion_order() {
        let world = TestWorld::with_subjects([(1, 0.0)]);
        let mut backend = RecordingBackend::new();

        let tweener = tweener(
            vec![keyframe(0.5, 1.0), keyframe(0.5, 2.0), keyframe(1.0, 3.0)],
            2.0,
        );
        start(&tweener, &mut backend, &world);

        // The second 50% keyframe is a jump, not an interpolation.
        assert_eq!(backend.tween_spans(), vec![(1.0, 1.0), (2.0, 1.0)]);
        assert_eq!(backend.endpoints(1, &world, 1), (2.0, 3.0));
    }

    #[test]
    fn offset_keyframes_accumulate() {
        let world = TestWorld::with_subjects([(1, 1.0)]);
        let mut backend = RecordingBackend::new();

        let sequence = Sequence::<TestWorld>::builder()
            .animate_keyframes(value_property(), 1.0)
            .key_offset(0.5, 2.0)
            .key_offset(1.0, 2.0)
            .end()
            .unwrap()
            .build()
            .unwrap();
        sequence.play(&mut backend, &world, Some(1), 0.0).unwrap();

        assert_eq!(backend.endpoints(1, &world, 1), (3.0, 5.0));
    }

    #[test]
    fn builder_rejects_bad_keyframes() {
        let err = Sequence::<TestWorld>::builder()
            .animate_keyframes(value_property(), 1.0)
            .key(1.5, 0.0)
            .end()
            .unwrap_err();
        assert_eq!(err, AnimationError::from(InvalidAnimation::InvalidPercent(1.5)));

        let err = Sequence::<TestWorld>::builder()
            .animate_keyframes(value_property(), -1.0)
            .key(0.5, 0.0)
            .end()
            .unwrap_err();
        assert_eq!(err, AnimationError::from(InvalidAnimation::InvalidDuration(-1.0)));

        let err = Sequence::<TestWorld>::builder()
            .animate_keyframes(value_property(), 1.0)
            .end()
            .unwrap_err();
        assert_eq!(err, AnimationError::from(InvalidAnimation::NoSteps));
    }
}
