//! Group composition and playback.
//!
//! A [`Sequence`] is an ordered list of groups. Tweeners inside a
//! group start at the same offset and the group lasts as long as its
//! slowest member. Groups run one after another.

use core::marker::PhantomData;
use std::sync::Arc;

use nonempty::NonEmpty;

use crate::accessor::PropertyFactory;
use crate::animation::PlaybackConfig;
use crate::backend::{Backend, TimelineConfig, TimelineId};
use crate::error::{AnimationError, InvalidAnimation, Result};
use crate::interpolation::Animatable;
use crate::item::callback;
use crate::subject::SubjectWorld;
use crate::tweener::{
    AbsoluteSteps, CallbackTweener, KeyframeTweenerBuilder,
    NestedSequence, OffsetSteps, PauseTweener, PlayCtx,
    StepTweenerBuilder, Tweener,
};
use crate::ThreadSafe;

/// Tweeners that start together.
pub type Group<W> = NonEmpty<Box<dyn Tweener<W>>>;

/// A compiled animation declaration.
///
/// Playback never mutates a sequence, so the same sequence can be
/// played again or shared as a [`NestedSequence`].
pub struct Sequence<W: SubjectWorld> {
    groups: Vec<Group<W>>,
    config: PlaybackConfig<W>,
}

impl<W: SubjectWorld> Sequence<W> {
    pub fn builder() -> SequenceBuilder<W, Chained> {
        SequenceBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &PlaybackConfig<W> {
        &self.config
    }

    #[inline]
    pub fn groups(&self) -> &[Group<W>] {
        &self.groups
    }

    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns `true` if every tweener can animate `subject`.
    pub fn is_compatible_with(&self, world: &W, subject: W::Id) -> bool {
        self.groups
            .iter()
            .flat_map(|group| group.iter())
            .all(|tweener| tweener.is_compatible_with(world, subject))
    }

    /// Schedules every group on `ctx` starting at `initial_delay` and
    /// returns the time consumed by the whole sequence.
    pub fn execute_groups(
        &self,
        ctx: &mut PlayCtx<'_, W>,
        initial_delay: f32,
        subject: W::Id,
    ) -> Result<f32> {
        if let Some(start) = self.config.start_action() {
            ctx.register_callback(initial_delay, start, subject);
        }

        let mut accumulated = 0.0;
        for group in self.groups.iter() {
            let mut group_duration = 0.0_f32;
            for tweener in group.iter() {
                let slot =
                    tweener.start(ctx, initial_delay + accumulated, subject)?;
                group_duration = group_duration.max(slot.duration());
            }

            accumulated += group_duration;
        }

        if let Some(finish) = self.config.finish_action() {
            ctx.register_callback(initial_delay + accumulated, finish, subject);
        }

        Ok(accumulated)
    }

    /// Plays the sequence on a fresh timeline of `backend`.
    ///
    /// `target` falls back to the configured default target.
    pub fn play(
        &self,
        backend: &mut dyn Backend<W>,
        world: &W,
        target: Option<W::Id>,
        initial_delay: f32,
    ) -> Result<TimelineId> {
        let subject = target
            .or(self.config.default_target())
            .ok_or(InvalidAnimation::NoTarget)?;

        self.play_on(backend, world, &[subject], 0.0, initial_delay)
    }

    /// Plays the sequence once per subject of `targets` on a single
    /// timeline hosted by the first subject. Subject `i` starts at
    /// `initial_delay + i * delay_between`.
    pub fn play_many(
        &self,
        backend: &mut dyn Backend<W>,
        world: &W,
        targets: &[W::Id],
        delay_between: f32,
        initial_delay: f32,
    ) -> Result<TimelineId> {
        self.play_on(backend, world, targets, delay_between, initial_delay)
    }

    fn play_on(
        &self,
        backend: &mut dyn Backend<W>,
        world: &W,
        targets: &[W::Id],
        delay_between: f32,
        initial_delay: f32,
    ) -> Result<TimelineId> {
        let Some(&host) = targets.first() else {
            return Err(AnimationError::from(InvalidAnimation::NoTargets));
        };
        if self.groups.is_empty() {
            return Err(AnimationError::from(InvalidAnimation::NoGroups));
        }
        self.config.validate()?;

        let timeline = backend.create_timeline(world, host)?;
        tracing::debug!(
            ?timeline,
            subjects = targets.len(),
            groups = self.groups.len(),
            loops = self.config.loops(),
            "play sequence"
        );

        let mut ctx = PlayCtx::new(&mut *backend, world, timeline);
        let compiled = targets.iter().enumerate().try_fold(
            0.0_f32,
            |duration, (i, &subject)| {
                let delay = initial_delay + i as f32 * delay_between;
                let elapsed = self.execute_groups(&mut ctx, delay, subject)?;
                Ok::<_, AnimationError>(duration.max(delay + elapsed))
            },
        );

        // Nothing of a failed playback may stay scheduled.
        let duration = match compiled {
            Ok(duration) => duration,
            Err(err) => {
                tracing::debug!(?timeline, %err, "playback failed, killing timeline");
                backend.kill(timeline);
                return Err(err);
            }
        };

        backend.configure(
            timeline,
            TimelineConfig {
                duration,
                ..self.config.timeline_config()
            },
        );

        if let Some(finish_all) = self.config.finish_all_action() {
            for &subject in targets {
                let finish_all = finish_all.clone();
                backend.on_completed(
                    timeline,
                    Box::new(move |world| finish_all(world, subject)),
                );
            }
        }

        Ok(timeline)
    }
}

impl<W: SubjectWorld> core::fmt::Debug for Sequence<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sequence")
            .field(
                "groups",
                &self.groups.iter().map(NonEmpty::len).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Chained {}
    impl Sealed for super::Parallel {}
}

/// Where a [`SequenceBuilder`] puts the next tweener.
pub trait GroupMode: sealed::Sealed + ThreadSafe {
    #[doc(hidden)]
    fn push<W: SubjectWorld>(
        groups: &mut Vec<Group<W>>,
        tweener: Box<dyn Tweener<W>>,
    );
}

/// Every tweener starts a new group.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chained;

/// Tweeners join the last group.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

impl GroupMode for Chained {
    fn push<W: SubjectWorld>(
        groups: &mut Vec<Group<W>>,
        tweener: Box<dyn Tweener<W>>,
    ) {
        groups.push(NonEmpty::new(tweener));
    }
}

impl GroupMode for Parallel {
    fn push<W: SubjectWorld>(
        groups: &mut Vec<Group<W>>,
        tweener: Box<dyn Tweener<W>>,
    ) {
        match groups.last_mut() {
            Some(group) => group.push(tweener),
            None => groups.push(NonEmpty::new(tweener)),
        }
    }
}

/// Builds a [`Sequence`].
///
/// The group mode is part of the type: [`chain`](Self::chain) and
/// [`parallel`](Self::parallel) switch between [`Chained`] and
/// [`Parallel`]. Validation errors are kept until
/// [`build`](Self::build).
#[must_use = "Call `build()` to finish the sequence."]
pub struct SequenceBuilder<W: SubjectWorld, M: GroupMode = Chained> {
    groups: Vec<Group<W>>,
    config: PlaybackConfig<W>,
    error: Option<AnimationError>,
    _mode: PhantomData<M>,
}

impl<W: SubjectWorld> SequenceBuilder<W, Chained> {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            config: PlaybackConfig::new(),
            error: None,
            _mode: PhantomData,
        }
    }
}

impl<W: SubjectWorld, M: GroupMode> core::fmt::Debug for SequenceBuilder<W, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SequenceBuilder")
            .field("groups", &self.groups.len())
            .field("config", &self.config)
            .field("error", &self.error)
            .finish()
    }
}

impl<W: SubjectWorld> Default for SequenceBuilder<W, Chained> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: SubjectWorld, M: GroupMode> SequenceBuilder<W, M> {
    /// Following tweeners each start a new group.
    pub fn chain(self) -> SequenceBuilder<W, Chained> {
        self.into_mode()
    }

    /// Following tweeners join the current group. With no group yet,
    /// the next tweener starts the first one.
    pub fn parallel(self) -> SequenceBuilder<W, Parallel> {
        self.into_mode()
    }

    fn into_mode<N: GroupMode>(self) -> SequenceBuilder<W, N> {
        SequenceBuilder {
            groups: self.groups,
            config: self.config,
            error: self.error,
            _mode: PhantomData,
        }
    }

    /// Registers any [`Tweener`] according to the current group mode.
    pub fn add_tweener(mut self, tweener: impl Tweener<W>) -> Self {
        M::push(&mut self.groups, Box::new(tweener));
        self
    }

    fn add_checked(self, tweener: Result<impl Tweener<W>>) -> Self {
        match tweener {
            Ok(tweener) => self.add_tweener(tweener),
            Err(err) => self.fail(err),
        }
    }

    fn fail(mut self, err: AnimationError) -> Self {
        self.error.get_or_insert(err);
        self
    }

    /// Reserves `delay` seconds.
    pub fn pause(self, delay: f32) -> Self {
        self.add_checked(PauseTweener::new(delay))
    }

    /// Fires `f` with the subject `delay` seconds into the slot.
    pub fn callback(
        self,
        f: impl Fn(&mut W, W::Id) + ThreadSafe,
        delay: f32,
    ) -> Self {
        self.add_checked(CallbackTweener::new(f, delay))
    }

    /// Nests another sequence.
    pub fn add(self, sequence: impl Into<Arc<Sequence<W>>>) -> Self {
        self.add_tweener(NestedSequence::new(sequence))
    }

    /// Animates a property through absolute steps.
    pub fn animate_steps<T: Animatable>(
        self,
        property: impl Into<PropertyFactory<W, T>>,
    ) -> StepTweenerBuilder<W, T, M, AbsoluteSteps> {
        StepTweenerBuilder::new(self, property.into(), false)
    }

    /// Animates a property through deltas, each one applied to the
    /// value reached by the previous step.
    pub fn animate_steps_by<T: Animatable>(
        self,
        property: impl Into<PropertyFactory<W, T>>,
    ) -> StepTweenerBuilder<W, T, M, OffsetSteps> {
        StepTweenerBuilder::new(self, property.into(), false)
    }

    /// Animates a property through deltas, each one applied to the
    /// value the tweener started from.
    pub fn animate_relative_steps<T: Animatable>(
        self,
        property: impl Into<PropertyFactory<W, T>>,
    ) -> StepTweenerBuilder<W, T, M, OffsetSteps> {
        StepTweenerBuilder::new(self, property.into(), true)
    }

    /// Animates a property through keyframes spread over `duration`
    /// seconds.
    pub fn animate_keyframes<T: Animatable>(
        self,
        property: impl Into<PropertyFactory<W, T>>,
        duration: f32,
    ) -> KeyframeTweenerBuilder<W, T, M> {
        KeyframeTweenerBuilder::new(self, property.into(), duration)
    }

    pub fn with_config(mut self, config: PlaybackConfig<W>) -> Self {
        self.config = config;
        self
    }

    pub fn with_loops(mut self, loops: u32) -> Self {
        self.config.set_loops(loops);
        self
    }

    pub fn with_speed_scale(mut self, speed_scale: f32) -> Self {
        self.config.set_speed_scale(speed_scale);
        self
    }

    pub fn with_default_target(mut self, target: W::Id) -> Self {
        self.config.set_default_target(Some(target));
        self
    }

    pub fn on_start(mut self, f: impl Fn(&mut W, W::Id) + ThreadSafe) -> Self {
        self.config.set_start_action(Some(callback(f)));
        self
    }

    pub fn on_finish(mut self, f: impl Fn(&mut W, W::Id) + ThreadSafe) -> Self {
        self.config.set_finish_action(Some(callback(f)));
        self
    }

    pub fn on_finish_all(
        mut self,
        f: impl Fn(&mut W, W::Id) + ThreadSafe,
    ) -> Self {
        self.config.set_finish_all_action(Some(callback(f)));
        self
    }

    pub fn build(self) -> Result<Sequence<W>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.config.validate()?;

        Ok(Sequence {
            groups: self.groups,
            config: self.config,
        })
    }
}
