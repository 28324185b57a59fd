//! [`Sequence`]: tweenline_core::sequence::Sequence
//! [`Backend`]: tweenline_core::backend::Backend
//! [`HeadlessBackend`]: tweenline_headless::HeadlessBackend
//!
//! tweenline turns declarative animation descriptions into
//! time-stamped operations on a per-frame tween backend.
//!
//! A [`Sequence`] is made of groups of tweeners. Each tweener animates
//! one property of a subject through steps or keyframes, fires a
//! callback, waits, or replays another sequence. Playing a sequence
//! compiles it onto a timeline of any [`Backend`]; the
//! [`HeadlessBackend`] is a manually ticked one.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use bevy_math::Vec3;
//! use tweenline::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Body {
//!     position: Vec3,
//!     scale: f32,
//! }
//!
//! type World = HashMap<u32, Body>;
//!
//! # fn main() -> Result<()> {
//! let mut world = World::new();
//! world.insert(
//!     7,
//!     Body {
//!         position: Vec3::ZERO,
//!         scale: 1.0,
//!     },
//! );
//!
//! let hop = Sequence::<World>::builder()
//!     .animate_steps_by(accessor!(<Body>::position))
//!     .by(Vec3::Y, 0.5)
//!     .by(-Vec3::Y, 0.5)
//!     .end()?
//!     .parallel()
//!     .animate_keyframes(accessor!(<Body>::scale), 1.0)
//!     .key(0.5, 1.5)
//!     .key(1.0, 1.0)
//!     .end()?
//!     .with_default_target(7)
//!     .build()?;
//!
//! let mut backend = HeadlessBackend::<World>::new();
//! let timeline = hop.play(&mut backend, &world, None, 0.0)?;
//!
//! backend.tick(&mut world, 0.5);
//! assert_eq!(world[&7].position, Vec3::Y);
//! assert_eq!(world[&7].scale, 1.5);
//!
//! backend.tick(&mut world, 0.5);
//! assert_eq!(world[&7].position, Vec3::ZERO);
//! assert!(backend.is_finished(timeline));
//! # Ok(())
//! # }
//! ```

pub use tweenline_core;

#[cfg(feature = "headless")]
pub use tweenline_headless;

pub mod prelude {
    pub use tweenline_core::prelude::*;

    #[cfg(feature = "headless")]
    pub use tweenline_headless::HeadlessBackend;
}
