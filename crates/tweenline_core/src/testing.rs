//! A subject world and a recording backend shared by the unit tests.

use std::collections::HashMap;

use crate::accessor::{accessor, PropertyFactory};
use crate::backend::{
    Backend, TimelineConfig, TimelineId, TweenKind, TweenOp, WorldOp,
};
use crate::error::{AnimationError, Result};
use crate::subject::{SubjectStore, SubjectWorld};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Node {
    pub value: f32,
}

/// Subjects plus a log that callbacks write into.
#[derive(Debug, Clone, Default)]
pub(crate) struct TestWorld {
    pub nodes: HashMap<u32, Node>,
    pub events: Vec<(u32, &'static str)>,
}

impl TestWorld {
    pub fn with_subjects(
        subjects: impl IntoIterator<Item = (u32, f32)>,
    ) -> Self {
        Self {
            nodes: subjects
                .into_iter()
                .map(|(id, value)| (id, Node { value }))
                .collect(),
            events: Vec::new(),
        }
    }

    pub fn value(&self, id: u32) -> f32 {
        self.nodes[&id].value
    }
}

impl SubjectWorld for TestWorld {
    type Id = u32;

    fn contains(&self, id: u32) -> bool {
        self.nodes.contains_key(&id)
    }
}

impl SubjectStore<Node> for TestWorld {
    fn subject(&self, id: u32) -> Option<&Node> {
        self.nodes.get(&id)
    }

    fn subject_mut(&mut self, id: u32) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }
}

pub(crate) fn value_property() -> PropertyFactory<TestWorld, f32> {
    accessor!(<Node>::value).into()
}

/// A callback that logs `tag` for the subject it fires on.
pub(crate) fn log(
    tag: &'static str,
) -> impl Fn(&mut TestWorld, u32) + Send + Sync + 'static {
    move |world: &mut TestWorld, id: u32| world.events.push((id, tag))
}

/// What got registered, in registration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Recorded {
    Tween {
        start: f32,
        duration: f32,
        native: bool,
    },
    Callback {
        start: f32,
    },
}

#[derive(Default)]
pub(crate) struct RecordingBackend {
    next_timeline: u64,
    invalid: bool,
    fail_create: bool,
    ops: Vec<Recorded>,
    tweens: Vec<TweenOp<TestWorld>>,
    callbacks: Vec<(f32, WorldOp<TestWorld>)>,
    completed: Vec<WorldOp<TestWorld>>,
    configs: Vec<(TimelineId, TimelineConfig)>,
    killed: Vec<TimelineId>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a timeline without a subject, for driving tweeners
    /// directly.
    pub fn timeline(&mut self) -> TimelineId {
        self.next_timeline += 1;
        TimelineId::new(self.next_timeline)
    }

    pub fn invalidate(&mut self) {
        self.invalid = true;
    }

    pub fn refuse_timelines(&mut self) {
        self.fail_create = true;
    }

    pub fn ops(&self) -> &[Recorded] {
        &self.ops
    }

    pub fn tween_spans(&self) -> Vec<(f32, f32)> {
        self.tweens.iter().map(|op| (op.start, op.duration)).collect()
    }

    pub fn callback_starts(&self) -> Vec<f32> {
        self.callbacks.iter().map(|(start, _)| *start).collect()
    }

    pub fn configs(&self) -> &[(TimelineId, TimelineConfig)] {
        &self.configs
    }

    pub fn killed(&self) -> &[TimelineId] {
        &self.killed
    }

    pub fn completion_count(&self) -> usize {
        self.completed.len()
    }

    /// Values written by tween `index` at `t = 0` and `t = 1` on a
    /// scratch copy of `world`.
    pub fn endpoints(
        &mut self,
        index: usize,
        world: &TestWorld,
        id: u32,
    ) -> (f32, f32) {
        let mut scratch = world.clone();
        let kind = &mut self.tweens[index].kind;

        kind.sample(&mut scratch, 0.0);
        let from = scratch.value(id);
        kind.sample(&mut scratch, 1.0);
        let to = scratch.value(id);

        (from, to)
    }

    /// Samples tween `index` at raw progress `t`.
    pub fn sample(&mut self, index: usize, world: &mut TestWorld, t: f32) {
        self.tweens[index].kind.sample(world, t);
    }

    /// Runs every operation to completion in start order, then the
    /// completion callbacks.
    pub fn finish(&mut self, world: &mut TestWorld) {
        enum Pending<'a> {
            Tween(&'a mut TweenKind<TestWorld>),
            Callback(&'a mut WorldOp<TestWorld>),
        }

        let mut pending = self
            .tweens
            .iter_mut()
            .map(|op| (op.end(), Pending::Tween(&mut op.kind)))
            .chain(
                self.callbacks
                    .iter_mut()
                    .map(|(start, op)| (*start, Pending::Callback(op))),
            )
            .collect::<Vec<_>>();
        pending.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, op) in pending {
            match op {
                Pending::Tween(kind) => kind.sample(world, 1.0),
                Pending::Callback(callback) => callback(world),
            }
        }

        for callback in self.completed.iter_mut() {
            callback(world);
        }
    }
}

impl Backend<TestWorld> for RecordingBackend {
    fn create_timeline(
        &mut self,
        world: &TestWorld,
        subject: u32,
    ) -> Result<TimelineId> {
        if self.fail_create || !world.contains(subject) {
            return Err(AnimationError::TimelineUnavailable {
                subject: format!("{subject:?}"),
            });
        }

        Ok(self.timeline())
    }

    fn is_valid(&self, timeline: TimelineId) -> bool {
        !self.invalid && !self.killed.contains(&timeline)
    }

    fn register_tween(&mut self, _timeline: TimelineId, op: TweenOp<TestWorld>) {
        self.ops.push(Recorded::Tween {
            start: op.start,
            duration: op.duration,
            native: matches!(op.kind, TweenKind::Native { .. }),
        });
        self.tweens.push(op);
    }

    fn register_callback(
        &mut self,
        _timeline: TimelineId,
        start: f32,
        callback: WorldOp<TestWorld>,
    ) {
        self.ops.push(Recorded::Callback { start });
        self.callbacks.push((start, callback));
    }

    fn configure(&mut self, timeline: TimelineId, config: TimelineConfig) {
        self.configs.push((timeline, config));
    }

    fn kill(&mut self, timeline: TimelineId) -> bool {
        if self.killed.contains(&timeline) {
            return false;
        }
        self.killed.push(timeline);
        true
    }

    fn on_completed(
        &mut self,
        _timeline: TimelineId,
        callback: WorldOp<TestWorld>,
    ) {
        self.completed.push(callback);
    }
}

/// Float comparison for accumulated offsets.
pub(crate) fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
