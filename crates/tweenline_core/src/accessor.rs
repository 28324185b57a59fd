//! Property access on subjects.
//!
//! A [`Property`] reads and writes one typed value on a subject that
//! lives in a [`SubjectWorld`]. Tweeners never hold a [`Property`]
//! directly: they hold a [`PropertyFactory`] and resolve the concrete
//! property per subject at playback time, which allows one animation
//! to target subjects of different shapes.
//!
//! The most common property is a [`FieldProperty`]: an [`Accessor`]
//! into a field of a subject stored in a [`SubjectStore`].

use std::borrow::Cow;
use std::sync::Arc;

use crate::subject::{SubjectStore, SubjectWorld};
use crate::ThreadSafe;

/// A typed accessor to a field of type `T` within a source type `S`.
///
/// This holds both immutable and mutable function pointers, which
/// allows retrieving references to the target field inside a source.
///
/// # Example
/// ```
/// use tweenline_core::accessor::Accessor;
///
/// #[derive(Default)]
/// struct Foo { value: i32 }
///
/// fn ref_fn(s: &Foo) -> &i32 { &s.value }
/// fn mut_fn(s: &mut Foo) -> &mut i32 { &mut s.value }
///
/// let accessor = Accessor { ref_fn, mut_fn, path: "::value" };
/// let mut foo = Foo { value: 42 };
///
/// assert_eq!(*accessor.get_ref(&foo), 42);
/// *accessor.get_mut(&mut foo) = 999;
/// assert_eq!(foo.value, 999);
/// ```
#[derive(Debug)]
pub struct Accessor<S: 'static, T: 'static> {
    pub ref_fn: fn(&S) -> &T,
    pub mut_fn: fn(&mut S) -> &mut T,
    /// Field path used for diagnostics, e.g. `"::translation::x"`.
    pub path: &'static str,
}

impl<S, T> Accessor<S, T> {
    #[inline]
    pub fn get_ref<'a>(&self, source: &'a S) -> &'a T {
        (self.ref_fn)(source)
    }

    #[inline]
    pub fn get_mut<'a>(&self, source: &'a mut S) -> &'a mut T {
        (self.mut_fn)(source)
    }
}

impl<S, T> Copy for Accessor<S, T> {}

impl<S, T> Clone for Accessor<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

/// Creates an [`Accessor`] from a source type and a field path.
///
/// # Example
///
/// ```
/// use tweenline_core::accessor;
///
/// struct Point { x: f32, y: f32 }
/// struct Line { p0: Point, p1: Point }
///
/// let accessor = accessor!(<Line>::p1::y);
/// let mut line = Line {
///     p0: Point { x: 0.0, y: 0.0 },
///     p1: Point { x: 1.0, y: 2.0 },
/// };
///
/// assert_eq!(*accessor.get_ref(&line), 2.0);
/// *accessor.get_mut(&mut line) = 5.0;
/// assert_eq!(line.p1.y, 5.0);
/// assert_eq!(accessor.path, "::p1::y");
/// ```
#[macro_export]
macro_rules! accessor {
    (<$source:ty>$(::$field:tt)*) => {
        $crate::accessor::Accessor::<$source, _> {
            ref_fn: |source: &$source| &source$(.$field)*,
            mut_fn: |source: &mut $source| &mut source$(.$field)*,
            path: $crate::stringify_field!($(::$field)*),
        }
    };
}
pub use accessor;

/// Stringify a field path into its canonical string form.
///
/// # Example
///
/// ```
/// use tweenline_core::accessor::stringify_field;
///
/// let stringify = stringify_field!(::translation::x);
/// assert_eq!(stringify, "::translation::x");
/// ```
#[macro_export]
macro_rules! stringify_field {
    ($(::$field:tt)*) => {
        concat!($("::", stringify!($field),)*)
    };
}
pub use stringify_field;

/// Reads and writes one value of type `T` on subjects of world `W`.
pub trait Property<W: SubjectWorld, T>: ThreadSafe {
    /// Current value of the property, `None` if the subject does not
    /// expose it.
    fn get(&self, world: &W, id: W::Id) -> Option<T>;

    fn set(&self, world: &mut W, id: W::Id, value: T);

    fn is_compatible_with(&self, world: &W, id: W::Id) -> bool;

    /// Name used in diagnostics.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(core::any::type_name::<T>())
    }
}

/// A [`Property`] over a field of subjects of type `S`.
pub struct FieldProperty<S: 'static, T: 'static> {
    accessor: Accessor<S, T>,
}

impl<S, T> FieldProperty<S, T> {
    pub fn new(accessor: Accessor<S, T>) -> Self {
        Self { accessor }
    }

    pub fn accessor(&self) -> Accessor<S, T> {
        self.accessor
    }
}

impl<S, T> Clone for FieldProperty<S, T> {
    fn clone(&self) -> Self {
        Self {
            accessor: self.accessor,
        }
    }
}

impl<W, S, T> Property<W, T> for FieldProperty<S, T>
where
    W: SubjectStore<S>,
    S: 'static,
    T: Clone + ThreadSafe,
{
    fn get(&self, world: &W, id: W::Id) -> Option<T> {
        world
            .subject(id)
            .map(|subject| self.accessor.get_ref(subject).clone())
    }

    fn set(&self, world: &mut W, id: W::Id, value: T) {
        if let Some(subject) = world.subject_mut(id) {
            *self.accessor.get_mut(subject) = value;
        }
    }

    fn is_compatible_with(&self, world: &W, id: W::Id) -> bool {
        world.subject(id).is_some()
    }

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.accessor.path)
    }
}

impl<S, T> From<Accessor<S, T>> for FieldProperty<S, T> {
    fn from(accessor: Accessor<S, T>) -> Self {
        Self::new(accessor)
    }
}

/// A shared, type-erased [`Property`].
pub type SharedProperty<W, T> = Arc<dyn Property<W, T>>;

/// Resolves the concrete [`Property`] for a subject.
///
/// Factories may inspect the subject to pick a property, which lets a
/// single tweener animate subjects of different runtime shapes.
pub struct PropertyFactory<W: SubjectWorld, T> {
    resolve: Arc<dyn Fn(&W, W::Id) -> SharedProperty<W, T> + Send + Sync>,
}

impl<W: SubjectWorld, T: 'static> PropertyFactory<W, T> {
    pub fn new(
        resolve: impl Fn(&W, W::Id) -> SharedProperty<W, T> + ThreadSafe,
    ) -> Self {
        Self {
            resolve: Arc::new(resolve),
        }
    }

    /// A factory that always resolves to the same property.
    pub fn fixed(property: impl Property<W, T>) -> Self {
        let property: SharedProperty<W, T> = Arc::new(property);
        Self::new(move |_, _| property.clone())
    }

    pub fn resolve(&self, world: &W, id: W::Id) -> SharedProperty<W, T> {
        (self.resolve)(world, id)
    }
}

impl<W: SubjectWorld, T> Clone for PropertyFactory<W, T> {
    fn clone(&self) -> Self {
        Self {
            resolve: self.resolve.clone(),
        }
    }
}

impl<W, S, T> From<Accessor<S, T>> for PropertyFactory<W, T>
where
    W: SubjectStore<S>,
    S: 'static,
    T: Clone + ThreadSafe,
{
    fn from(accessor: Accessor<S, T>) -> Self {
        Self::fixed(FieldProperty::new(accessor))
    }
}

impl<W, S, T> From<FieldProperty<S, T>> for PropertyFactory<W, T>
where
    W: SubjectStore<S>,
    S: 'static,
    T: Clone + ThreadSafe,
{
    fn from(property: FieldProperty<S, T>) -> Self {
        Self::fixed(property)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Point {
        x: f32,
        y: f32,
    }

    type World = HashMap<u32, Point>;

    #[test]
    fn accessor_macro_builds_path() {
        let accessor = accessor!(<Point>::y);
        assert_eq!(accessor.path, "::y");

        let mut point = Point { x: 1.0, y: 2.0 };
        *accessor.get_mut(&mut point) += 1.0;
        assert_eq!(point.y, 3.0);
    }

    #[test]
    fn field_property_reads_and_writes_world() {
        let mut world = World::new();
        world.insert(1, Point { x: 1.0, y: 2.0 });

        let property = FieldProperty::new(accessor!(<Point>::x));

        assert_eq!(Property::<World, f32>::get(&property, &world, 1), Some(1.0));
        assert_eq!(Property::<World, f32>::get(&property, &world, 2), None);

        Property::<World, f32>::set(&property, &mut world, 1, 8.0);
        assert_eq!(world[&1].x, 8.0);

        // Writing to a missing subject is a no-op.
        Property::<World, f32>::set(&property, &mut world, 7, 8.0);
        assert_eq!(world.len(), 1);

        assert!(Property::<World, f32>::is_compatible_with(&property, &world, 1));
        assert!(!Property::<World, f32>::is_compatible_with(&property, &world, 2));
        assert_eq!(Property::<World, f32>::name(&property), "::x");
    }

    #[test]
    fn factory_resolves_per_subject() {
        let mut world = World::new();
        world.insert(1, Point { x: 1.0, y: 2.0 });
        world.insert(2, Point { x: 3.0, y: 4.0 });

        let x: SharedProperty<World, f32> =
            Arc::new(FieldProperty::new(accessor!(<Point>::x)));
        let y: SharedProperty<World, f32> =
            Arc::new(FieldProperty::new(accessor!(<Point>::y)));

        // Odd subjects animate `x`, even ones `y`.
        let factory = PropertyFactory::<World, f32>::new(move |_, id| {
            if id % 2 == 1 {
                x.clone()
            } else {
                y.clone()
            }
        });

        assert_eq!(factory.resolve(&world, 1).get(&world, 1), Some(1.0));
        assert_eq!(factory.resolve(&world, 2).get(&world, 2), Some(4.0));
    }
}
