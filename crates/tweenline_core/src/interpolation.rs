use bevy_math::*;

/// Trait for interpolating between 2 values based on a f32 `t` value.
pub trait Interpolation<T = Self, U = Self> {
    /// Linearly interpolate between 2 values based on a f32 `t` value.
    fn interp(a: &Self, b: &T, t: f32) -> U;
}

/// Type-appropriate addition used by offset steps: the resolved value
/// of an offset is `base.add(&delta)`.
pub trait Addable {
    fn add(&self, rhs: &Self) -> Self;
}

/// Every bound a value needs to be animated by a property tweener.
pub trait Animatable:
    Interpolation + Addable + Clone + PartialEq + crate::ThreadSafe
{
}

impl<T> Animatable for T where
    T: Interpolation + Addable + Clone + PartialEq + crate::ThreadSafe
{
}

#[macro_export]
macro_rules! impl_float_interpolation {
    ($ty:ty, $base:ty) => {
        impl $crate::interpolation::Interpolation for $ty {
            #[inline]
            fn interp(a: &Self, b: &Self, t: f32) -> Self {
                let t = <$base>::from(t);
                (*a) * (1.0 - t) + (*b) * t
            }
        }
    };
}

macro_rules! impl_slerp_interpolation {
    ($ty: ty, $base: ty) => {
        impl $crate::interpolation::Interpolation for $ty {
            #[inline]
            fn interp(a: &Self, b: &Self, t: f32) -> Self {
                let t = <$base>::from(t);
                a.slerp(*b, t)
            }
        }
    };
}

macro_rules! impl_step_interpolation {
    ($ty: ty) => {
        impl $crate::interpolation::Interpolation for $ty {
            #[inline]
            fn interp(a: &Self, b: &Self, t: f32) -> Self {
                $crate::interpolation::step(*a, *b, t)
            }
        }
    };
}

macro_rules! impl_int_interpolation {
    ($ty: ty) => {
        impl $crate::interpolation::Interpolation for $ty {
            #[inline]
            fn interp(a: &Self, b: &Self, t: f32) -> Self {
                let a = *a as f64;
                let b = *b as f64;

                ((b - a) * t as f64 + a).round() as $ty
            }
        }
    };
}

/// Implements [`Addable`] through the type's own `+` operator.
#[macro_export]
macro_rules! impl_add_addable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::interpolation::Addable for $ty {
                #[inline]
                fn add(&self, rhs: &Self) -> Self {
                    *self + *rhs
                }
            }
        )+
    };
}

impl_step_interpolation!(bool);

impl_float_interpolation!(f32, f32);
impl_float_interpolation!(Vec2, f32);
impl_float_interpolation!(Vec3, f32);
impl_float_interpolation!(Vec3A, f32);
impl_float_interpolation!(Vec4, f32);

impl_float_interpolation!(f64, f64);
impl_float_interpolation!(DVec2, f64);
impl_float_interpolation!(DVec3, f64);
impl_float_interpolation!(DVec4, f64);

impl_slerp_interpolation!(Quat, f32);
impl_slerp_interpolation!(DQuat, f64);

impl_int_interpolation!(i32);
impl_int_interpolation!(i64);

impl Interpolation for u8 {
    fn interp(a: &Self, b: &Self, t: f32) -> Self {
        let a = *a as f32;
        let b = *b as f32;

        ((b - a) * t + a) as u8
    }
}

impl_add_addable!(f32, f64, Vec2, Vec3, Vec3A, Vec4, DVec2, DVec3, DVec4);

/// Integer offsets saturate at the bounds of the type.
macro_rules! impl_saturating_addable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Addable for $ty {
                #[inline]
                fn add(&self, rhs: &Self) -> Self {
                    self.saturating_add(*rhs)
                }
            }
        )+
    };
}

impl_saturating_addable!(u8, i32, i64);

/// A `true` offset toggles the flag.
impl Addable for bool {
    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        *self ^ *rhs
    }
}

/// Offsetting a rotation applies `rhs` on top of it.
impl Addable for Quat {
    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        (*rhs * *self).normalize()
    }
}

impl Addable for DQuat {
    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        (*rhs * *self).normalize()
    }
}

#[cfg(feature = "color")]
pub mod color {
    use bevy_color::prelude::*;

    use super::{Addable, Interpolation};

    macro_rules! impl_color_interpolation {
        ($ty:ty) => {
            impl $crate::interpolation::Interpolation for $ty {
                #[inline]
                fn interp(a: &Self, b: &Self, t: f32) -> Self {
                    (*a) * (1.0 - t) + (*b) * t
                }
            }
        };
    }

    impl_color_interpolation!(LinearRgba);
    impl_color_interpolation!(Laba);
    impl_color_interpolation!(Oklaba);
    impl_color_interpolation!(Srgba);
    impl_color_interpolation!(Xyza);

    // Channel-wise addition, alpha included.
    crate::impl_add_addable!(LinearRgba, Laba, Oklaba, Srgba, Xyza);

    impl Interpolation for Color {
        #[inline]
        fn interp(a: &Self, b: &Self, t: f32) -> Self {
            Color::mix(a, b, t)
        }
    }

    /// Offsets are applied in linear space.
    impl Addable for Color {
        #[inline]
        fn add(&self, rhs: &Self) -> Self {
            Color::LinearRgba(self.to_linear() + rhs.to_linear())
        }
    }
}

#[cfg(feature = "transform")]
pub mod transform {
    use bevy_transform::components::Transform;

    use super::{Addable, Interpolation};

    impl Interpolation for Transform {
        fn interp(a: &Self, b: &Self, t: f32) -> Self {
            Self {
                translation: Interpolation::interp(
                    &a.translation,
                    &b.translation,
                    t,
                ),
                rotation: Interpolation::interp(
                    &a.rotation,
                    &b.rotation,
                    t,
                ),
                scale: Interpolation::interp(&a.scale, &b.scale, t),
            }
        }
    }

    impl Addable for Transform {
        fn add(&self, rhs: &Self) -> Self {
            Self {
                translation: self.translation.add(&rhs.translation),
                rotation: self.rotation.add(&rhs.rotation),
                scale: self.scale.add(&rhs.scale),
            }
        }
    }
}

/// Steps between two different discrete values of any type.
/// Returns `a` if `t < 1.0`, otherwise returns `b`.
#[inline]
pub fn step<T>(a: T, b: T, t: f32) -> T {
    if t < 1.0 {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_interp_hits_endpoints() {
        assert_eq!(f32::interp(&100.0, &120.0, 0.0), 100.0);
        assert_eq!(f32::interp(&100.0, &120.0, 1.0), 120.0);
        assert_eq!(f32::interp(&100.0, &120.0, 0.5), 110.0);
        assert_eq!(
            Vec2::interp(&Vec2::ZERO, &Vec2::new(2.0, 4.0), 0.5),
            Vec2::new(1.0, 2.0)
        );
    }

    #[test]
    fn integer_interp_rounds() {
        assert_eq!(i32::interp(&0, &3, 0.5), 2);
        assert_eq!(i64::interp(&-10, &10, 0.25), -5);
    }

    #[test]
    fn addition_is_type_appropriate() {
        assert_eq!(100.0f32.add(&20.0), 120.0);
        assert_eq!(250u8.add(&10), 255);
        assert_eq!(i32::MAX.add(&1), i32::MAX);
        assert_eq!(i64::MIN.add(&-1), i64::MIN);
        assert_eq!(40i32.add(&-50), -10);
        assert_eq!(Vec3::X.add(&Vec3::Y), Vec3::new(1.0, 1.0, 0.0));

        let quarter = Quat::from_rotation_z(core::f32::consts::FRAC_PI_4);
        let half = quarter.add(&quarter);
        assert!(half.abs_diff_eq(
            Quat::from_rotation_z(core::f32::consts::FRAC_PI_2),
            1e-5
        ));
    }

    #[test]
    fn bool_steps_at_end() {
        assert!(!bool::interp(&false, &true, 0.99));
        assert!(bool::interp(&false, &true, 1.0));
    }

    #[test]
    fn bool_offsets_toggle() {
        fn animatable<T: Animatable>() {}
        animatable::<bool>();

        assert!(false.add(&true));
        assert!(!true.add(&true));
        assert!(true.add(&false));
    }
}
