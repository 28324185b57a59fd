//! Playback configuration and the [`Animation`] entry point.

use crate::backend::{Backend, TimelineConfig, TimelineId};
use crate::error::{InvalidAnimation, Result};
use crate::item::{callback, Callback};
use crate::sequence::Sequence;
use crate::subject::SubjectWorld;
use crate::ThreadSafe;

/// Settings shared by every playback of a [`Sequence`].
pub struct PlaybackConfig<W: SubjectWorld> {
    loops: u32,
    speed_scale: f32,
    default_target: Option<W::Id>,
    start_action: Option<Callback<W>>,
    finish_action: Option<Callback<W>>,
    finish_all_action: Option<Callback<W>>,
}

impl<W: SubjectWorld> PlaybackConfig<W> {
    pub fn new() -> Self {
        Self {
            loops: 1,
            speed_scale: 1.0,
            default_target: None,
            start_action: None,
            finish_action: None,
            finish_all_action: None,
        }
    }

    /// Number of times the timeline plays. `0` loops forever, which
    /// is only allowed for top-level playback.
    pub fn with_loops(mut self, loops: u32) -> Self {
        self.loops = loops;
        self
    }

    pub fn with_speed_scale(mut self, speed_scale: f32) -> Self {
        self.speed_scale = speed_scale;
        self
    }

    /// Subject used when playback is started without one.
    pub fn with_default_target(mut self, target: W::Id) -> Self {
        self.default_target = Some(target);
        self
    }

    /// Fires when a playback of the sequence begins, once per subject
    /// and per loop.
    pub fn with_start_action(
        mut self,
        action: impl Fn(&mut W, W::Id) + ThreadSafe,
    ) -> Self {
        self.start_action = Some(callback(action));
        self
    }

    /// Fires when the last group of the sequence ends, once per
    /// subject and per loop.
    pub fn with_finish_action(
        mut self,
        action: impl Fn(&mut W, W::Id) + ThreadSafe,
    ) -> Self {
        self.finish_action = Some(callback(action));
        self
    }

    /// Fires once per subject when the whole playback, loops
    /// included, has completed.
    pub fn with_finish_all_action(
        mut self,
        action: impl Fn(&mut W, W::Id) + ThreadSafe,
    ) -> Self {
        self.finish_all_action = Some(callback(action));
        self
    }

    pub fn set_loops(&mut self, loops: u32) -> &mut Self {
        self.loops = loops;
        self
    }

    pub fn set_speed_scale(&mut self, speed_scale: f32) -> &mut Self {
        self.speed_scale = speed_scale;
        self
    }

    pub fn set_default_target(&mut self, target: Option<W::Id>) -> &mut Self {
        self.default_target = target;
        self
    }

    pub fn set_start_action(
        &mut self,
        action: Option<Callback<W>>,
    ) -> &mut Self {
        self.start_action = action;
        self
    }

    pub fn set_finish_action(
        &mut self,
        action: Option<Callback<W>>,
    ) -> &mut Self {
        self.finish_action = action;
        self
    }

    pub fn set_finish_all_action(
        &mut self,
        action: Option<Callback<W>>,
    ) -> &mut Self {
        self.finish_all_action = action;
        self
    }

    #[inline]
    pub fn loops(&self) -> u32 {
        self.loops
    }

    #[inline]
    pub fn speed_scale(&self) -> f32 {
        self.speed_scale
    }

    #[inline]
    pub fn default_target(&self) -> Option<W::Id> {
        self.default_target
    }

    #[inline]
    pub fn start_action(&self) -> Option<&Callback<W>> {
        self.start_action.as_ref()
    }

    #[inline]
    pub fn finish_action(&self) -> Option<&Callback<W>> {
        self.finish_action.as_ref()
    }

    #[inline]
    pub fn finish_all_action(&self) -> Option<&Callback<W>> {
        self.finish_all_action.as_ref()
    }

    /// The part of the configuration the backend applies to a
    /// timeline. The duration is filled in at playback.
    pub fn timeline_config(&self) -> TimelineConfig {
        TimelineConfig {
            loops: self.loops,
            speed_scale: self.speed_scale,
            duration: 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.speed_scale.is_finite() && self.speed_scale > 0.0 {
            Ok(())
        } else {
            Err(InvalidAnimation::InvalidSpeedScale(self.speed_scale).into())
        }
    }
}

impl<W: SubjectWorld> Default for PlaybackConfig<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: SubjectWorld> Clone for PlaybackConfig<W> {
    fn clone(&self) -> Self {
        Self {
            loops: self.loops,
            speed_scale: self.speed_scale,
            default_target: self.default_target,
            start_action: self.start_action.clone(),
            finish_action: self.finish_action.clone(),
            finish_all_action: self.finish_all_action.clone(),
        }
    }
}

impl<W: SubjectWorld> core::fmt::Debug for PlaybackConfig<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlaybackConfig")
            .field("loops", &self.loops)
            .field("speed_scale", &self.speed_scale)
            .field("default_target", &self.default_target)
            .field("start_action", &self.start_action.is_some())
            .field("finish_action", &self.finish_action.is_some())
            .field("finish_all_action", &self.finish_all_action.is_some())
            .finish()
    }
}

/// A playable animation.
///
/// Implementors only expose the [`Sequence`] they wrap. Playback
/// compiles that sequence onto a fresh backend timeline every time,
/// so an animation can be played any number of times.
///
/// ```
/// use std::collections::HashMap;
///
/// use tweenline_core::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Sprite {
///     alpha: f32,
/// }
///
/// type World = HashMap<u32, Sprite>;
///
/// /// Fades a sprite out and back in.
/// struct Blink(Sequence<World>);
///
/// impl Blink {
///     fn new() -> Result<Self> {
///         let sequence = Sequence::<World>::builder()
///             .animate_steps(accessor!(<Sprite>::alpha))
///             .to(0.0, 0.2)
///             .to(1.0, 0.2)
///             .end()?
///             .build()?;
///
///         Ok(Self(sequence))
///     }
/// }
///
/// impl Animation<World> for Blink {
///     fn sequence(&self) -> &Sequence<World> {
///         &self.0
///     }
/// }
///
/// # fn main() -> Result<()> {
/// # use tweenline_core::backend::{TweenOp, WorldOp};
/// # #[derive(Default)]
/// # struct Backend(Vec<f32>);
/// # impl tweenline_core::backend::Backend<World> for Backend {
/// #     fn create_timeline(&mut self, _: &World, _: u32) -> Result<TimelineId> {
/// #         Ok(TimelineId::new(0))
/// #     }
/// #     fn is_valid(&self, _: TimelineId) -> bool { true }
/// #     fn register_tween(&mut self, _: TimelineId, op: TweenOp<World>) {
/// #         self.0.push(op.start);
/// #     }
/// #     fn register_callback(&mut self, _: TimelineId, _: f32, _: WorldOp<World>) {}
/// #     fn configure(&mut self, _: TimelineId, _: TimelineConfig) {}
/// #     fn kill(&mut self, _: TimelineId) -> bool { false }
/// #     fn on_completed(&mut self, _: TimelineId, _: WorldOp<World>) {}
/// # }
/// let mut world = World::new();
/// world.insert(7, Sprite { alpha: 1.0 });
///
/// let mut backend = Backend::default();
/// Blink::new()?.play(&mut backend, &world, Some(7), 0.0)?;
/// # assert_eq!(backend.0, vec![0.0, 0.2]);
/// # Ok(())
/// # }
/// ```
pub trait Animation<W: SubjectWorld> {
    fn sequence(&self) -> &Sequence<W>;

    fn config(&self) -> &PlaybackConfig<W> {
        self.sequence().config()
    }

    /// Plays the animation on `target`, or on the configured default
    /// target.
    fn play(
        &self,
        backend: &mut dyn Backend<W>,
        world: &W,
        target: Option<W::Id>,
        initial_delay: f32,
    ) -> Result<TimelineId> {
        self.sequence().play(backend, world, target, initial_delay)
    }

    /// Plays the animation on every subject of `targets`, staggered by
    /// `delay_between`, on one shared timeline.
    fn play_many(
        &self,
        backend: &mut dyn Backend<W>,
        world: &W,
        targets: &[W::Id],
        delay_between: f32,
        initial_delay: f32,
    ) -> Result<TimelineId> {
        self.sequence()
            .play_many(backend, world, targets, delay_between, initial_delay)
    }
}

impl<W: SubjectWorld> Animation<W> for Sequence<W> {
    fn sequence(&self) -> &Sequence<W> {
        self
    }
}
