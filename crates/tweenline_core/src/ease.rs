//! Easing curves.
//!
//! A [`Curve`] maps normalized time `t` in `[0, 1]` to eased time.
//! Overshooting curves ([`Transition::Back`], [`Transition::Elastic`],
//! [`Transition::Spring`]) may leave that range.
//!
//! Curves come in two flavors:
//! - [`Curve::Native`]: a [`Transition`]/[`EaseType`] pair that a
//!   backend understands and samples on its own.
//! - [`Curve::Custom`]: any [`EaseFn`], sampled by the tweener on every
//!   backend tick.

use core::f32::consts::{PI, TAU};

/// Easing function on a [`f32`] time.
pub type EaseFn = fn(t: f32) -> f32;

/// The shape of an easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transition {
    #[default]
    Linear,
    Sine,
    Quint,
    Quart,
    Quad,
    Expo,
    Elastic,
    Cubic,
    Circ,
    Bounce,
    Back,
    Spring,
}

/// Which end(s) of a [`Transition`] gets eased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EaseType {
    #[default]
    In,
    Out,
    InOut,
    OutIn,
}

/// A transition/ease pair natively understood by backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeEase {
    pub transition: Transition,
    pub ease: EaseType,
}

impl NativeEase {
    pub const LINEAR: Self = Self::new(Transition::Linear, EaseType::In);

    pub const fn new(transition: Transition, ease: EaseType) -> Self {
        Self { transition, ease }
    }

    /// Samples the curve at `t`.
    pub fn sample(&self, t: f32) -> f32 {
        let f = self.transition.ease_in_fn();

        match self.ease {
            EaseType::In => f(t),
            EaseType::Out => 1.0 - f(1.0 - t),
            EaseType::InOut => {
                if t < 0.5 {
                    f(t * 2.0) * 0.5
                } else {
                    1.0 - f((1.0 - t) * 2.0) * 0.5
                }
            }
            EaseType::OutIn => {
                if t < 0.5 {
                    (1.0 - f(1.0 - t * 2.0)) * 0.5
                } else {
                    0.5 + f(t * 2.0 - 1.0) * 0.5
                }
            }
        }
    }
}

impl Transition {
    /// The "ease in" form of the transition. Every other [`EaseType`]
    /// is derived from it.
    fn ease_in_fn(self) -> EaseFn {
        match self {
            Transition::Linear => linear,
            Transition::Sine => sine::ease_in,
            Transition::Quint => quint::ease_in,
            Transition::Quart => quart::ease_in,
            Transition::Quad => quad::ease_in,
            Transition::Expo => expo::ease_in,
            Transition::Elastic => elastic::ease_in,
            Transition::Cubic => cubic::ease_in,
            Transition::Circ => circ::ease_in,
            Transition::Bounce => bounce::ease_in,
            Transition::Back => back::ease_in,
            Transition::Spring => spring::ease_in,
        }
    }
}

/// An interpolation curve.
#[derive(Debug, Clone, Copy)]
pub enum Curve {
    Native(NativeEase),
    Custom(EaseFn),
}

impl Curve {
    /// The curve used when neither a step nor its tweener sets one.
    pub const LINEAR: Self = Self::Native(NativeEase::LINEAR);

    pub const fn native(transition: Transition, ease: EaseType) -> Self {
        Self::Native(NativeEase::new(transition, ease))
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            Curve::Native(native) => native.sample(t),
            Curve::Custom(ease) => ease(t),
        }
    }

    #[inline]
    pub fn is_native(&self) -> bool {
        matches!(self, Curve::Native(_))
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl From<NativeEase> for Curve {
    fn from(native: NativeEase) -> Self {
        Self::Native(native)
    }
}

impl From<EaseFn> for Curve {
    fn from(ease: EaseFn) -> Self {
        Self::Custom(ease)
    }
}

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

macro_rules! power_ease {
    ($name:ident, $pow:expr) => {
        pub mod $name {
            #[inline]
            pub fn ease_in(t: f32) -> f32 {
                t.powi($pow)
            }

            #[inline]
            pub fn ease_out(t: f32) -> f32 {
                1.0 - (1.0 - t).powi($pow)
            }

            #[inline]
            pub fn ease_in_out(t: f32) -> f32 {
                if t < 0.5 {
                    ease_in(t * 2.0) * 0.5
                } else {
                    1.0 - ease_in((1.0 - t) * 2.0) * 0.5
                }
            }
        }
    };
}

power_ease!(quad, 2);
power_ease!(cubic, 3);
power_ease!(quart, 4);
power_ease!(quint, 5);

pub mod sine {
    use super::PI;

    #[inline]
    pub fn ease_in(t: f32) -> f32 {
        1.0 - f32::cos(t * PI * 0.5)
    }

    #[inline]
    pub fn ease_out(t: f32) -> f32 {
        f32::sin(t * PI * 0.5)
    }

    #[inline]
    pub fn ease_in_out(t: f32) -> f32 {
        -(f32::cos(PI * t) - 1.0) * 0.5
    }
}

pub mod expo {
    #[inline]
    pub fn ease_in(t: f32) -> f32 {
        if t <= 0.0 {
            0.0
        } else {
            f32::powf(2.0, 10.0 * t - 10.0)
        }
    }

    #[inline]
    pub fn ease_out(t: f32) -> f32 {
        if t >= 1.0 {
            1.0
        } else {
            1.0 - f32::powf(2.0, -10.0 * t)
        }
    }
}

pub mod circ {
    #[inline]
    pub fn ease_in(t: f32) -> f32 {
        1.0 - f32::sqrt(1.0 - t * t)
    }

    #[inline]
    pub fn ease_out(t: f32) -> f32 {
        f32::sqrt(1.0 - (t - 1.0) * (t - 1.0))
    }
}

pub mod back {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;

    #[inline]
    pub fn ease_in(t: f32) -> f32 {
        C3 * t * t * t - C1 * t * t
    }

    #[inline]
    pub fn ease_out(t: f32) -> f32 {
        1.0 - ease_in(1.0 - t)
    }
}

pub mod elastic {
    use super::TAU;

    const C4: f32 = TAU / 3.0;

    #[inline]
    pub fn ease_in(t: f32) -> f32 {
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else {
            -f32::powf(2.0, 10.0 * t - 10.0)
                * f32::sin((t * 10.0 - 10.75) * C4)
        }
    }

    #[inline]
    pub fn ease_out(t: f32) -> f32 {
        1.0 - ease_in(1.0 - t)
    }
}

pub mod bounce {
    #[inline]
    pub fn ease_out(t: f32) -> f32 {
        const N1: f32 = 7.5625;
        const D1: f32 = 2.75;

        if t < 1.0 / D1 {
            N1 * t * t
        } else if t < 2.0 / D1 {
            let t = t - 1.5 / D1;
            N1 * t * t + 0.75
        } else if t < 2.5 / D1 {
            let t = t - 2.25 / D1;
            N1 * t * t + 0.9375
        } else {
            let t = t - 2.625 / D1;
            N1 * t * t + 0.984375
        }
    }

    #[inline]
    pub fn ease_in(t: f32) -> f32 {
        1.0 - ease_out(1.0 - t)
    }
}

pub mod spring {
    use super::PI;

    /// Damped oscillation settling at 1.0, expressed as an "in" curve.
    #[inline]
    pub fn ease_in(t: f32) -> f32 {
        1.0 - ease_out(1.0 - t)
    }

    #[inline]
    pub fn ease_out(t: f32) -> f32 {
        if t >= 1.0 {
            return 1.0;
        }

        let s = f32::sin(t * PI * (0.2 + 2.5 * t * t * t))
            * f32::powf(1.0 - t, 2.2)
            + t;
        s * (1.0 + 1.2 * (1.0 - t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSITIONS: [Transition; 12] = [
        Transition::Linear,
        Transition::Sine,
        Transition::Quint,
        Transition::Quart,
        Transition::Quad,
        Transition::Expo,
        Transition::Elastic,
        Transition::Cubic,
        Transition::Circ,
        Transition::Bounce,
        Transition::Back,
        Transition::Spring,
    ];

    const EASES: [EaseType; 4] =
        [EaseType::In, EaseType::Out, EaseType::InOut, EaseType::OutIn];

    #[test]
    fn native_curves_hit_both_ends() {
        for transition in TRANSITIONS {
            for ease in EASES {
                let native = NativeEase::new(transition, ease);
                assert!(
                    native.sample(0.0).abs() < 1e-3,
                    "{native:?} at t=0: {}",
                    native.sample(0.0)
                );
                assert!(
                    (native.sample(1.0) - 1.0).abs() < 1e-3,
                    "{native:?} at t=1: {}",
                    native.sample(1.0)
                );
            }
        }
    }

    #[test]
    fn in_out_is_symmetric() {
        let native = NativeEase::new(Transition::Cubic, EaseType::InOut);
        assert!((native.sample(0.5) - 0.5).abs() < 1e-6);
        assert!(
            (native.sample(0.25) + native.sample(0.75) - 1.0).abs() < 1e-6
        );
    }

    #[test]
    fn custom_curve_evaluates_fn() {
        let curve = Curve::Custom(quad::ease_in);
        assert_eq!(curve.evaluate(0.5), 0.25);
        assert!(!curve.is_native());
        assert!(Curve::default().is_native());
        assert_eq!(Curve::LINEAR.evaluate(0.3), 0.3);
    }

    #[test]
    fn back_overshoots() {
        assert!(back::ease_in(0.2) < 0.0);
    }
}
