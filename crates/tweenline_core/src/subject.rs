//! The [`SubjectId`] trait represents an identifier for a "subject"
//! within a timeline. A subject is the object that tweeners animate:
//! a scene node, an entity, a widget. Subjects live in a world that
//! tweenline does not own, so they may disappear at any point between
//! declaring an animation and playing it.
//!
//! [`SubjectWorld`] answers the only question the scheduler itself
//! needs to ask that world: "is this subject still alive?".
//! [`SubjectStore`] additionally exposes typed access to the subject
//! so that [`FieldProperty`](crate::accessor::FieldProperty) can read
//! and write its fields.

use core::fmt::Debug;
use core::hash::Hash;
use std::collections::{BTreeMap, HashMap};

use crate::ThreadSafe;

pub trait SubjectId:
    ThreadSafe
    + Debug
    + Copy
    + Clone
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
{
}

impl<T> SubjectId for T where
    T: ThreadSafe
        + Debug
        + Copy
        + Clone
        + PartialEq
        + Eq
        + PartialOrd
        + Ord
        + Hash
{
}

/// A container of subjects addressed by [`SubjectWorld::Id`].
pub trait SubjectWorld: 'static {
    type Id: SubjectId;

    /// Returns `true` if the subject still exists in this world.
    fn contains(&self, id: Self::Id) -> bool;
}

/// Typed access to subjects of type `S` inside a [`SubjectWorld`].
pub trait SubjectStore<S>: SubjectWorld {
    fn subject(&self, id: Self::Id) -> Option<&S>;

    fn subject_mut(&mut self, id: Self::Id) -> Option<&mut S>;
}

impl<I, S> SubjectWorld for HashMap<I, S>
where
    I: SubjectId,
    S: 'static,
{
    type Id = I;

    fn contains(&self, id: I) -> bool {
        self.contains_key(&id)
    }
}

impl<I, S> SubjectStore<S> for HashMap<I, S>
where
    I: SubjectId,
    S: 'static,
{
    fn subject(&self, id: I) -> Option<&S> {
        self.get(&id)
    }

    fn subject_mut(&mut self, id: I) -> Option<&mut S> {
        self.get_mut(&id)
    }
}

impl<I, S> SubjectWorld for BTreeMap<I, S>
where
    I: SubjectId,
    S: 'static,
{
    type Id = I;

    fn contains(&self, id: I) -> bool {
        self.contains_key(&id)
    }
}

impl<I, S> SubjectStore<S> for BTreeMap<I, S>
where
    I: SubjectId,
    S: 'static,
{
    fn subject(&self, id: I) -> Option<&S> {
        self.get(&id)
    }

    fn subject_mut(&mut self, id: I) -> Option<&mut S> {
        self.get_mut(&id)
    }
}
