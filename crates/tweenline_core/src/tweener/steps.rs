use core::marker::PhantomData;

use nonempty::NonEmpty;

use crate::accessor::PropertyFactory;
use crate::ease::Curve;
use crate::error::{check_duration, AnimationError, InvalidAnimation, Result};
use crate::interpolation::Animatable;
use crate::item::{
    callback, AnimationItem, AnimationStep, ItemValue, ValueSource,
};
use crate::sequence::{GroupMode, SequenceBuilder};
use crate::subject::SubjectWorld;
use crate::ThreadSafe;

use super::{PlayCtx, PropertyTweener, TimeSlot, Tweener};

/// Animates one property through an ordered list of steps.
pub struct PropertyStepTweener<W: SubjectWorld, T> {
    core: PropertyTweener<W, T>,
    steps: NonEmpty<AnimationStep<W, T>>,
}

impl<W: SubjectWorld, T: Animatable> PropertyStepTweener<W, T> {
    /// Seals `steps` into a tweener.
    ///
    /// Without an explicit starting value, a leading zero-duration
    /// absolute step becomes the starting value.
    pub fn new(
        mut core: PropertyTweener<W, T>,
        steps: NonEmpty<AnimationStep<W, T>>,
    ) -> Self {
        let first = steps.first();
        if !core.has_from() && first.duration == 0.0 {
            if let ItemValue::Absolute(source) = &first.item.value {
                core.set_from(source.clone());
            }
        }

        Self { core, steps }
    }

    #[inline]
    pub fn steps(&self) -> &NonEmpty<AnimationStep<W, T>> {
        &self.steps
    }

    #[inline]
    pub fn has_from(&self) -> bool {
        self.core.has_from()
    }

    /// Sum of all step durations.
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(|step| step.duration).sum()
    }
}

impl<W: SubjectWorld, T: Animatable> Tweener<W> for PropertyStepTweener<W, T> {
    fn start(
        &self,
        ctx: &mut PlayCtx<'_, W>,
        delay: f32,
        subject: W::Id,
    ) -> Result<TimeSlot> {
        self.core.run_items(
            ctx,
            delay,
            subject,
            self.steps.iter().map(|step| (&step.item, step.duration)),
        )
    }

    fn is_compatible_with(&self, world: &W, subject: W::Id) -> bool {
        self.core.is_compatible_with(world, subject)
    }
}

/// Steps given as absolute targets: [`to`](StepTweenerBuilder::to),
/// [`to_fn`](StepTweenerBuilder::to_fn) and
/// [`offset`](StepTweenerBuilder::offset).
pub struct AbsoluteSteps;

/// Steps given as deltas: [`by`](StepTweenerBuilder::by) and
/// [`by_fn`](StepTweenerBuilder::by_fn).
pub struct OffsetSteps;

/// Collects the steps of a [`PropertyStepTweener`] and hands it back
/// to the [`SequenceBuilder`] on [`end`](Self::end).
#[must_use = "Call `end()` to add the tweener to the sequence."]
pub struct StepTweenerBuilder<W: SubjectWorld, T, M: GroupMode, V> {
    sequence: SequenceBuilder<W, M>,
    core: PropertyTweener<W, T>,
    steps: Vec<AnimationStep<W, T>>,
    error: Option<AnimationError>,
    _values: PhantomData<V>,
}

impl<W, T, M, V> StepTweenerBuilder<W, T, M, V>
where
    W: SubjectWorld,
    T: Animatable,
    M: GroupMode,
{
    pub(crate) fn new(
        sequence: SequenceBuilder<W, M>,
        property: PropertyFactory<W, T>,
        relative_to_from: bool,
    ) -> Self {
        let mut core = PropertyTweener::new(property, None);
        core.set_relative_to_from(relative_to_from);

        Self {
            sequence,
            core,
            steps: Vec::new(),
            error: None,
            _values: PhantomData,
        }
    }

    /// Starts from `value` instead of the property's current value.
    pub fn from(self, value: T) -> Self {
        self.from_source(ValueSource::constant(value))
    }

    /// Starts from a value computed from the subject.
    pub fn from_fn(self, from: impl Fn(&W, W::Id) -> T + ThreadSafe) -> Self {
        self.from_source(ValueSource::new(from))
    }

    fn from_source(mut self, from: ValueSource<W, T>) -> Self {
        self.core.set_from(from);
        self
    }

    /// Sets the curve of the last step. Before any step is added, sets
    /// the default curve of the whole tweener.
    pub fn with_ease(mut self, curve: impl Into<Curve>) -> Self {
        let curve = curve.into();
        match self.steps.last_mut() {
            Some(step) => step.item.curve = Some(curve),
            None => {
                self.core.set_curve(curve);
            }
        }
        self
    }

    /// Fires `f` with the subject when the last step begins.
    pub fn with_callback(
        mut self,
        f: impl Fn(&mut W, W::Id) + ThreadSafe,
    ) -> Self {
        match self.steps.last_mut() {
            Some(step) => step.item.callback = Some(callback(f)),
            None => {
                tracing::warn!("`with_callback` called before any step, ignoring");
            }
        }
        self
    }

    fn push_step(mut self, item: AnimationItem<W, T>, duration: f32) -> Self {
        match check_duration(duration) {
            Ok(duration) => self.steps.push(AnimationStep::new(item, duration)),
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    /// Seals the tweener and registers it with the sequence.
    pub fn end(self) -> Result<SequenceBuilder<W, M>> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let steps = NonEmpty::from_vec(self.steps).ok_or(InvalidAnimation::NoSteps)?;

        Ok(self
            .sequence
            .add_tweener(PropertyStepTweener::new(self.core, steps)))
    }
}

impl<W, T, M> StepTweenerBuilder<W, T, M, AbsoluteSteps>
where
    W: SubjectWorld,
    T: Animatable,
    M: GroupMode,
{
    /// Animates towards `value` over `duration` seconds.
    pub fn to(self, value: T, duration: f32) -> Self {
        self.push_step(AnimationItem::absolute(ValueSource::constant(value)), duration)
    }

    /// Animates towards a value computed from the subject.
    pub fn to_fn(
        self,
        to: impl Fn(&W, W::Id) -> T + ThreadSafe,
        duration: f32,
    ) -> Self {
        self.push_step(AnimationItem::absolute(ValueSource::new(to)), duration)
    }

    /// Animates by `delta` relative to the value reached by the
    /// previous step.
    pub fn offset(self, delta: T, duration: f32) -> Self {
        self.push_step(AnimationItem::offset(ValueSource::constant(delta)), duration)
    }
}

impl<W, T, M> StepTweenerBuilder<W, T, M, OffsetSteps>
where
    W: SubjectWorld,
    T: Animatable,
    M: GroupMode,
{
    /// Animates by `delta` over `duration` seconds.
    pub fn by(self, delta: T, duration: f32) -> Self {
        self.push_step(AnimationItem::offset(ValueSource::constant(delta)), duration)
    }

    /// Animates by a delta computed from the subject.
    pub fn by_fn(
        self,
        delta: impl Fn(&W, W::Id) -> T + ThreadSafe,
        duration: f32,
    ) -> Self {
        self.push_step(AnimationItem::offset(ValueSource::new(delta)), duration)
    }
}
