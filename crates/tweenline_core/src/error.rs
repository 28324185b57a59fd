use thiserror::Error;

/// Configuration mistakes in an animation declaration.
///
/// These are raised synchronously by the builder or by
/// [`Sequence::play`](crate::sequence::Sequence::play) and are never
/// retried: the declaration itself has to change.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidAnimation {
    #[error("no target subject given and no default target configured")]
    NoTarget,
    #[error("no target subjects given")]
    NoTargets,
    #[error("a property tweener needs at least one step")]
    NoSteps,
    #[error("a sequence needs at least one tweener before it can be played")]
    NoGroups,
    #[error("a nested sequence cannot loop infinitely")]
    InfiniteNestedLoops,
    #[error("durations must be finite and non-negative, got {0}")]
    InvalidDuration(f32),
    #[error("keyframe percentages must be within [0, 1], got {0}")]
    InvalidPercent(f32),
    #[error("speed scale must be finite and positive, got {0}")]
    InvalidSpeedScale(f32),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    #[error("invalid animation: {0}")]
    InvalidAnimation(#[from] InvalidAnimation),
    #[error("subject {subject} is not compatible with property `{property}`")]
    NotCompatible { subject: String, property: String },
    #[error("backend could not create a timeline for subject {subject}")]
    TimelineUnavailable { subject: String },
}

impl AnimationError {
    /// Returns `true` for errors caused by the animation declaration
    /// itself rather than by the subject it was played on.
    pub fn is_invalid_animation(&self) -> bool {
        matches!(self, Self::InvalidAnimation(_))
    }
}

pub type Result<T, E = AnimationError> = core::result::Result<T, E>;

/// Checks that a step duration or delay is usable on a timeline.
pub(crate) fn check_duration(duration: f32) -> Result<f32> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(duration)
    } else {
        Err(InvalidAnimation::InvalidDuration(duration).into())
    }
}
