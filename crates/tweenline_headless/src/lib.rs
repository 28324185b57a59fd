//! A [`Backend`] without a scene graph or a frame loop.
//!
//! Time only moves when [`HeadlessBackend::tick`] is called, which
//! makes playback deterministic. Useful for tests, servers and
//! offline baking.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use tweenline_core::prelude::*;
//! use tweenline_headless::HeadlessBackend;
//!
//! #[derive(Debug, Clone, Copy)]
//! struct Node {
//!     x: f32,
//! }
//!
//! type World = HashMap<u32, Node>;
//!
//! # fn main() -> Result<()> {
//! let mut world = World::new();
//! world.insert(1, Node { x: 100.0 });
//!
//! let sequence = Sequence::<World>::builder()
//!     .animate_steps(accessor!(<Node>::x))
//!     .to(120.0, 0.1)
//!     .to(-90.0, 0.2)
//!     .end()?
//!     .build()?;
//!
//! let mut backend = HeadlessBackend::<World>::new();
//! let timeline = sequence.play(&mut backend, &world, Some(1), 0.0)?;
//!
//! backend.tick(&mut world, 0.1);
//! assert_eq!(world[&1].x, 120.0);
//!
//! backend.tick(&mut world, 0.25);
//! assert_eq!(world[&1].x, -90.0);
//! assert!(backend.is_finished(timeline));
//! # Ok(())
//! # }
//! ```

use bevy_platform::collections::HashMap;
use smallvec::SmallVec;
use tweenline_core::backend::{
    Backend, TimelineConfig, TimelineId, TweenOp, WorldOp,
};
use tweenline_core::error::{AnimationError, Result};
use tweenline_core::subject::SubjectWorld;

/// Owns timelines and advances them on [`tick`](Self::tick).
pub struct HeadlessBackend<W: SubjectWorld> {
    timelines: HashMap<TimelineId, Timeline<W>>,
    next_id: u64,
}

impl<W: SubjectWorld> HeadlessBackend<W> {
    pub fn new() -> Self {
        Self {
            timelines: HashMap::new(),
            next_id: 0,
        }
    }

    /// Advances every live timeline by `delta` seconds, scaled by each
    /// timeline's speed scale.
    ///
    /// Timelines whose host subject is gone are dropped without
    /// completing.
    pub fn tick(&mut self, world: &mut W, delta: f32) {
        let mut ended = SmallVec::<[(TimelineId, bool); 4]>::new();

        for (id, timeline) in self.timelines.iter_mut() {
            if !world.contains(timeline.subject) {
                tracing::debug!(
                    timeline = ?id,
                    subject = ?timeline.subject,
                    "host subject is gone, dropping timeline"
                );
                ended.push((*id, false));
                continue;
            }

            if timeline.advance(world, delta) {
                ended.push((*id, true));
            }
        }

        for (id, completed) in ended {
            let Some(timeline) = self.timelines.remove(&id) else {
                continue;
            };

            if completed {
                tracing::debug!(timeline = ?id, "timeline completed");
                for mut callback in timeline.completed {
                    callback(world);
                }
            }
        }
    }

    /// Returns `true` once a timeline has completed or was killed.
    #[inline]
    pub fn is_finished(&self, timeline: TimelineId) -> bool {
        !self.timelines.contains_key(&timeline)
    }

    /// Number of live timelines.
    #[inline]
    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn timeline(&self, timeline: TimelineId) -> Option<&Timeline<W>> {
        self.timelines.get(&timeline)
    }

    fn timeline_mut(
        &mut self,
        timeline: TimelineId,
    ) -> Option<&mut Timeline<W>> {
        let found = self.timelines.get_mut(&timeline);
        if found.is_none() {
            tracing::warn!(?timeline, "operation on a dead timeline, ignoring");
        }
        found
    }
}

impl<W: SubjectWorld> Default for HeadlessBackend<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: SubjectWorld> Backend<W> for HeadlessBackend<W> {
    fn create_timeline(
        &mut self,
        world: &W,
        subject: W::Id,
    ) -> Result<TimelineId> {
        if !world.contains(subject) {
            return Err(AnimationError::TimelineUnavailable {
                subject: format!("{subject:?}"),
            });
        }

        self.next_id += 1;
        let id = TimelineId::new(self.next_id);
        self.timelines.insert(id, Timeline::new(subject));

        Ok(id)
    }

    fn is_valid(&self, timeline: TimelineId) -> bool {
        self.timelines.contains_key(&timeline)
    }

    fn register_tween(&mut self, timeline: TimelineId, op: TweenOp<W>) {
        if let Some(timeline) = self.timeline_mut(timeline) {
            timeline.push(Op::Tween(op));
        }
    }

    fn register_callback(
        &mut self,
        timeline: TimelineId,
        start: f32,
        callback: WorldOp<W>,
    ) {
        if let Some(timeline) = self.timeline_mut(timeline) {
            timeline.push(Op::Callback { start, callback });
        }
    }

    fn configure(&mut self, timeline: TimelineId, config: TimelineConfig) {
        if let Some(timeline) = self.timeline_mut(timeline) {
            timeline.duration = timeline.duration.max(config.duration);
            timeline.config = config;
        }
    }

    fn kill(&mut self, timeline: TimelineId) -> bool {
        self.timelines.remove(&timeline).is_some()
    }

    fn on_completed(&mut self, timeline: TimelineId, callback: WorldOp<W>) {
        if let Some(timeline) = self.timeline_mut(timeline) {
            timeline.completed.push(callback);
        }
    }
}

enum Op<W> {
    Tween(TweenOp<W>),
    Callback { start: f32, callback: WorldOp<W> },
}

impl<W> Op<W> {
    fn start(&self) -> f32 {
        match self {
            Op::Tween(op) => op.start,
            Op::Callback { start, .. } => *start,
        }
    }

    fn end(&self) -> f32 {
        match self {
            Op::Tween(op) => op.end(),
            Op::Callback { start, .. } => *start,
        }
    }
}

/// One timeline of a [`HeadlessBackend`].
pub struct Timeline<W: SubjectWorld> {
    subject: W::Id,
    /// Sorted by start time, registration order kept for ties.
    ops: Vec<Op<W>>,
    /// Whether each op of `ops` is done for the current loop.
    done: Vec<bool>,
    completed: SmallVec<[WorldOp<W>; 1]>,
    config: TimelineConfig,
    /// Time within the current loop.
    curr_time: f32,
    /// Number of fully played loops.
    loops_played: u32,
    duration: f32,
}

impl<W: SubjectWorld> Timeline<W> {
    fn new(subject: W::Id) -> Self {
        Self {
            subject,
            ops: Vec::new(),
            done: Vec::new(),
            completed: SmallVec::new(),
            config: TimelineConfig::default(),
            curr_time: 0.0,
            loops_played: 0,
            duration: 0.0,
        }
    }

    fn push(&mut self, op: Op<W>) {
        self.duration = self.duration.max(op.end());

        // Insert after every op starting at the same time or earlier.
        let index = self
            .ops
            .partition_point(|other| other.start() <= op.start());
        self.ops.insert(index, op);
        self.done.insert(index, false);
    }

    /// Advances by `delta` seconds of backend time. Returns `true` once
    /// every loop has played.
    fn advance(&mut self, world: &mut W, delta: f32) -> bool {
        let mut remaining = delta * self.config.speed_scale;

        loop {
            let target = self.curr_time + remaining;
            if target < self.duration {
                self.sample(world, target);
                self.curr_time = target;
                return false;
            }

            self.sample(world, self.duration);
            remaining = target - self.duration;
            self.loops_played += 1;

            let infinite = self.config.loops == 0;
            if !infinite && self.loops_played >= self.config.loops {
                return true;
            }
            // A zero-length timeline would loop forever within one tick.
            if self.duration <= 0.0 {
                return !infinite;
            }

            self.curr_time = 0.0;
            self.done.iter_mut().for_each(|done| *done = false);
        }
    }

    /// Applies every pending op that starts at or before `time`.
    fn sample(&mut self, world: &mut W, time: f32) {
        for (op, done) in self.ops.iter_mut().zip(self.done.iter_mut()) {
            if op.start() > time {
                break;
            }
            if *done {
                continue;
            }

            match op {
                Op::Tween(tween) => {
                    let t = if tween.duration > 0.0 {
                        ((time - tween.start) / tween.duration).clamp(0.0, 1.0)
                    } else {
                        1.0
                    };

                    tween.kind.sample(world, t);
                    *done = t >= 1.0;
                }
                Op::Callback { callback, .. } => {
                    callback(world);
                    *done = true;
                }
            }
        }
    }
}

// Getter methods.
impl<W: SubjectWorld> Timeline<W> {
    /// The subject hosting this timeline.
    #[inline]
    pub fn subject(&self) -> W::Id {
        self.subject
    }

    #[inline]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    /// Length of one loop: the configured duration or the end of the
    /// last registered operation, whichever is later.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Time within the current loop.
    #[inline]
    pub fn curr_time(&self) -> f32 {
        self.curr_time
    }

    #[inline]
    pub fn loops_played(&self) -> u32 {
        self.loops_played
    }

    /// Number of registered operations.
    #[inline]
    pub fn op_count(&self) -> usize {
        self.ops.len()
    }
}
