//! Execution primitives shared by the property-based tweeners.

use crate::accessor::{PropertyFactory, SharedProperty};
use crate::backend::{SampleOp, TweenKind, TweenOp};
use crate::ease::Curve;
use crate::error::{AnimationError, Result};
use crate::interpolation::Animatable;
use crate::item::{AnimationItem, ValueSource};
use crate::subject::SubjectWorld;

use super::{PlayCtx, SkipReason, TimeSlot};

/// The part of a property tweener that does not depend on how its
/// items are timed.
pub struct PropertyTweener<W: SubjectWorld, T> {
    factory: PropertyFactory<W, T>,
    /// Explicit starting value, used instead of the property's
    /// current value.
    from: Option<ValueSource<W, T>>,
    /// Offsets resolve against the initial value instead of the
    /// running value.
    relative_to_from: bool,
    curve: Option<Curve>,
}

impl<W: SubjectWorld, T: Animatable> PropertyTweener<W, T> {
    pub fn new(factory: PropertyFactory<W, T>, curve: Option<Curve>) -> Self {
        Self {
            factory,
            from: None,
            relative_to_from: false,
            curve,
        }
    }

    pub fn set_from(&mut self, from: ValueSource<W, T>) -> &mut Self {
        self.from = Some(from);
        self
    }

    pub fn set_relative_to_from(&mut self, relative: bool) -> &mut Self {
        self.relative_to_from = relative;
        self
    }

    /// Sets the curve used by items without their own.
    pub fn set_curve(&mut self, curve: Curve) -> &mut Self {
        self.curve = Some(curve);
        self
    }

    #[inline]
    pub fn has_from(&self) -> bool {
        self.from.is_some()
    }

    #[inline]
    pub fn relative_to_from(&self) -> bool {
        self.relative_to_from
    }

    #[inline]
    pub fn curve(&self) -> Option<Curve> {
        self.curve
    }

    pub fn is_compatible_with(&self, world: &W, subject: W::Id) -> bool {
        self.factory
            .resolve(world, subject)
            .is_compatible_with(world, subject)
    }

    /// Resolves the property for `subject` and checks that it can be
    /// animated.
    ///
    /// A subject that is gone is reported as `Ok(None)`: it is a
    /// runtime race, not a mistake in the declaration.
    pub fn validate(
        &self,
        world: &W,
        subject: W::Id,
    ) -> Result<Option<SharedProperty<W, T>>> {
        if !world.contains(subject) {
            tracing::warn!(?subject, "subject is gone, skipping property tweener");
            return Ok(None);
        }

        let property = self.factory.resolve(world, subject);
        if !property.is_compatible_with(world, subject) {
            return Err(AnimationError::NotCompatible {
                subject: format!("{subject:?}"),
                property: property.name().into_owned(),
            });
        }

        Ok(Some(property))
    }

    /// Schedules `items`, each lasting its paired duration, one after
    /// another from `delay`.
    ///
    /// Returns the sum of all durations, whether or not an item
    /// ended up registering an interpolation.
    pub fn run_items<'a>(
        &self,
        ctx: &mut PlayCtx<'_, W>,
        delay: f32,
        subject: W::Id,
        items: impl IntoIterator<Item = (&'a AnimationItem<W, T>, f32)>,
    ) -> Result<TimeSlot>
    where
        W: 'a,
        T: 'a,
    {
        let Some(property) = self.validate(ctx.world, subject)? else {
            return Ok(TimeSlot::Skipped(SkipReason::SubjectGone));
        };

        let from_value = match &self.from {
            Some(from) => Some(from.get(ctx.world, subject)),
            None => property.get(ctx.world, subject),
        };
        let Some(mut from) = from_value else {
            // Compatible, yet the value cannot be read.
            return Err(AnimationError::NotCompatible {
                subject: format!("{subject:?}"),
                property: property.name().into_owned(),
            });
        };
        let initial_from = from.clone();

        let mut start_time = 0.0;

        for (item, duration) in items {
            let base = if self.relative_to_from {
                &initial_from
            } else {
                &from
            };
            let to = item.resolve(ctx.world, subject, base);

            if duration > 0.0 && to != from {
                let curve = item.curve.or(self.curve).unwrap_or(Curve::LINEAR);

                Self::run_step(
                    ctx,
                    subject,
                    &property,
                    from.clone(),
                    to.clone(),
                    delay + start_time,
                    duration,
                    curve,
                );
            }

            if let Some(callback) = &item.callback {
                ctx.register_callback(delay + start_time, callback, subject);
            }

            from = to;
            start_time += duration;
        }

        Ok(TimeSlot::Consumed(start_time))
    }

    /// Registers one interpolation from `from` to `to`.
    ///
    /// Native curves are handed to the backend, which samples the
    /// transition itself. Custom curves are evaluated here on every
    /// sample the backend requests.
    #[allow(clippy::too_many_arguments)]
    pub fn run_step(
        ctx: &mut PlayCtx<'_, W>,
        subject: W::Id,
        property: &SharedProperty<W, T>,
        from: T,
        to: T,
        start: f32,
        duration: f32,
        curve: Curve,
    ) {
        let kind = match curve {
            Curve::Native(ease) => TweenKind::Native {
                ease,
                apply: lerp_op(property.clone(), subject, from, to, |t| t),
            },
            Curve::Custom(ease) => {
                TweenKind::Sampled(lerp_op(property.clone(), subject, from, to, ease))
            }
        };

        ctx.register_tween(TweenOp {
            start,
            duration,
            kind,
        });
    }
}

/// Writes `from` interpolated towards `to` at `ease(t)`.
fn lerp_op<W, T>(
    property: SharedProperty<W, T>,
    subject: W::Id,
    from: T,
    to: T,
    ease: fn(f32) -> f32,
) -> SampleOp<W>
where
    W: SubjectWorld,
    T: Animatable,
{
    Box::new(move |world, t| {
        let value = T::interp(&from, &to, ease(t));
        property.set(world, subject, value);
    })
}

impl<W: SubjectWorld, T> Clone for PropertyTweener<W, T> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            from: self.from.clone(),
            relative_to_from: self.relative_to_from,
            curve: self.curve,
        }
    }
}
