//! [`Sequence`]: sequence::Sequence
//! [`Tweener`]: tweener::Tweener
//! [`Backend`]: backend::Backend
//! [`SubjectWorld`]: subject::SubjectWorld
//! [`Animation`]: animation::Animation
//!
//! # tweenline core
//!
//! Declarative animation timelines. A caller describes value
//! transitions on properties of external *subjects*, and playback
//! compiles that description into time-stamped operations registered
//! on a per-frame [`Backend`].
//!
//! ## Core Concepts
//!
//! - **[`SubjectWorld`]**: the container that owns the subjects.
//!   Subjects are addressed by a copyable id and may disappear at any
//!   time.
//!
//! - **[`Tweener`]**: a schedulable unit. Given a start offset it
//!   registers its operations and reports how much time it occupies.
//!
//! - **[`Sequence`]**: ordered groups of tweeners. Tweeners in a group
//!   start together, groups run one after another.
//!
//! - **[`Backend`]**: the scheduler that owns timelines and advances
//!   time. This crate never advances time itself.
//!
//! - **[`Animation`]**: the playback entry point over a sequence.
//!
//! ## Declaring a sequence
//!
//! ```
//! use std::collections::HashMap;
//!
//! use tweenline_core::prelude::*;
//!
//! #[derive(Debug, Clone, Copy)]
//! struct Node {
//!     x: f32,
//!     opacity: f32,
//! }
//!
//! type World = HashMap<u32, Node>;
//!
//! # fn main() -> Result<()> {
//! let sequence = Sequence::<World>::builder()
//!     // Slide right, then back half way.
//!     .animate_steps(accessor!(<Node>::x))
//!     .to(120.0, 0.1)
//!     .with_ease(NativeEase::new(Transition::Quad, EaseType::Out))
//!     .offset(-60.0, 0.2)
//!     .end()?
//!     // Fade out while sliding.
//!     .parallel()
//!     .animate_steps(accessor!(<Node>::opacity))
//!     .to(0.0, 0.3)
//!     .end()?
//!     .chain()
//!     .pause(0.5)
//!     .callback(|world: &mut World, id| {
//!         world.remove(&id);
//!     }, 0.0)
//!     .build()?;
//!
//! assert_eq!(sequence.group_count(), 3);
//! # Ok(())
//! # }
//! ```

pub mod accessor;
pub mod animation;
pub mod backend;
pub mod ease;
pub mod error;
pub mod interpolation;
pub mod item;
pub mod sequence;
pub mod subject;
pub mod tweener;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::accessor::{
        accessor, Accessor, FieldProperty, Property, PropertyFactory,
    };
    pub use crate::animation::{Animation, PlaybackConfig};
    pub use crate::backend::{
        Backend, TimelineConfig, TimelineId, TweenKind, TweenOp,
    };
    pub use crate::ease::{self, Curve, EaseType, NativeEase, Transition};
    pub use crate::error::{AnimationError, InvalidAnimation, Result};
    pub use crate::interpolation::{Addable, Animatable, Interpolation};
    pub use crate::item::{
        AnimationItem, AnimationKeyframe, AnimationStep, Callback,
        ValueSource,
    };
    pub use crate::sequence::{Chained, Parallel, Sequence, SequenceBuilder};
    pub use crate::subject::{SubjectId, SubjectStore, SubjectWorld};
    pub use crate::tweener::{
        PlayCtx, SkipReason, TimeSlot, Tweener,
    };
    pub use crate::ThreadSafe;
}

/// Auto trait for types that implements [`Send`] + [`Sync`] +
/// `'static`.
pub trait ThreadSafe: Send + Sync + 'static {}

impl<T> ThreadSafe for T where T: Send + Sync + 'static {}
