//! Value descriptors.
//!
//! An [`AnimationItem`] describes a single value change: where the
//! value comes from ([`ItemValue`]), an optional curve override and an
//! optional callback fired when the change begins. It carries no
//! timing. [`AnimationStep`] adds a fixed duration and
//! [`AnimationKeyframe`] a position relative to a total duration.

use std::sync::Arc;

use crate::ease::Curve;
use crate::interpolation::Addable;
use crate::subject::SubjectWorld;
use crate::ThreadSafe;

/// A callback bound to the subject at execution time.
pub type Callback<W> =
    Arc<dyn Fn(&mut W, <W as SubjectWorld>::Id) + Send + Sync>;

/// Wraps a closure into a [`Callback`].
pub fn callback<W: SubjectWorld>(
    f: impl Fn(&mut W, W::Id) + ThreadSafe,
) -> Callback<W> {
    Arc::new(f)
}

/// Produces a value from the subject it is resolved against.
pub struct ValueSource<W: SubjectWorld, T> {
    source: Arc<dyn Fn(&W, W::Id) -> T + Send + Sync>,
}

impl<W: SubjectWorld, T: 'static> ValueSource<W, T> {
    pub fn new(source: impl Fn(&W, W::Id) -> T + ThreadSafe) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// A source that ignores the subject.
    pub fn constant(value: T) -> Self
    where
        T: Clone + ThreadSafe,
    {
        Self::new(move |_, _| value.clone())
    }

    pub fn get(&self, world: &W, id: W::Id) -> T {
        (self.source)(world, id)
    }
}

impl<W: SubjectWorld, T> Clone for ValueSource<W, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

/// Whether a value is standalone or relative to a base value.
pub enum ItemValue<W: SubjectWorld, T> {
    /// Resolves to the source value, ignoring the base.
    Absolute(ValueSource<W, T>),
    /// Resolves to `base + delta`.
    Offset(ValueSource<W, T>),
}

impl<W: SubjectWorld, T> Clone for ItemValue<W, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Absolute(source) => Self::Absolute(source.clone()),
            Self::Offset(source) => Self::Offset(source.clone()),
        }
    }
}

/// Descriptor of one value change.
pub struct AnimationItem<W: SubjectWorld, T> {
    pub value: ItemValue<W, T>,
    pub curve: Option<Curve>,
    pub callback: Option<Callback<W>>,
}

impl<W: SubjectWorld, T: 'static> AnimationItem<W, T> {
    pub fn absolute(source: ValueSource<W, T>) -> Self {
        Self::new(ItemValue::Absolute(source))
    }

    pub fn offset(source: ValueSource<W, T>) -> Self {
        Self::new(ItemValue::Offset(source))
    }

    pub fn new(value: ItemValue<W, T>) -> Self {
        Self {
            value,
            curve: None,
            callback: None,
        }
    }

    pub fn with_curve(mut self, curve: impl Into<Curve>) -> Self {
        self.curve = Some(curve.into());
        self
    }

    pub fn with_callback(mut self, callback: Callback<W>) -> Self {
        self.callback = Some(callback);
        self
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        matches!(self.value, ItemValue::Absolute(_))
    }

    /// Resolves the target value of this item.
    pub fn resolve(&self, world: &W, id: W::Id, base: &T) -> T
    where
        T: Addable,
    {
        match &self.value {
            ItemValue::Absolute(source) => source.get(world, id),
            ItemValue::Offset(delta) => base.add(&delta.get(world, id)),
        }
    }
}

impl<W: SubjectWorld, T> Clone for AnimationItem<W, T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            curve: self.curve,
            callback: self.callback.clone(),
        }
    }
}

/// An [`AnimationItem`] lasting a fixed number of seconds.
pub struct AnimationStep<W: SubjectWorld, T> {
    pub item: AnimationItem<W, T>,
    pub duration: f32,
}

impl<W: SubjectWorld, T> AnimationStep<W, T> {
    pub fn new(item: AnimationItem<W, T>, duration: f32) -> Self {
        Self { item, duration }
    }
}

impl<W: SubjectWorld, T> Clone for AnimationStep<W, T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            duration: self.duration,
        }
    }
}

/// An [`AnimationItem`] placed at a fraction of a total duration.
pub struct AnimationKeyframe<W: SubjectWorld, T> {
    pub item: AnimationItem<W, T>,
    /// Position within `[0, 1]` of the owning tweener's duration.
    pub percent: f32,
}

impl<W: SubjectWorld, T> AnimationKeyframe<W, T> {
    pub fn new(item: AnimationItem<W, T>, percent: f32) -> Self {
        Self { item, percent }
    }
}

impl<W: SubjectWorld, T> Clone for AnimationKeyframe<W, T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            percent: self.percent,
        }
    }
}
