use std::fmt::{Debug, Display, Formatter, Error};
use std::iter::FromIterator;
use std::vec;

use log::trace;
use parking_lot::RwLock;

use crate::SetId;
use crate::set::hashset::Set;
use crate::set::policy::{Keyed, Policy, Simple};

/// A `Set` behind a reader-writer lock.
///
/// Queries take the shared lock and mutations take the exclusive lock, so a
/// `SyncSet` can be shared between threads (for instance in an `Arc`) without
/// further coordination. Operations over two sets lock both of them, always in
/// ascending `SetId` order.
pub struct SyncSet<T, P> where P: Policy<T> {
    id: SetId,
    inner: RwLock<Set<T, P>>,
}

/// A synchronized set where each element is its own key.
pub type SyncSimpleSet<T> = SyncSet<T, Simple>;

/// A synchronized set keyed by a derived key.
pub type SyncKeyedSet<T, K> = SyncSet<T, Keyed<T, K>>;

impl <T, P> SyncSet<T, P> where P: Policy<T> {

    /// Creates an empty synchronized set governed by `policy`.
    pub fn new(policy: P) -> SyncSet<T, P> {
        SyncSet::from(Set::new(policy))
    }

    /// Returns the identity used to order lock acquisition.
    pub fn id(&self) -> SetId {
        self.id
    }

    /// Unwraps the underlying unsynchronized set.
    pub fn into_inner(self) -> Set<T, P> {
        self.inner.into_inner()
    }

    /// Adds a single element. Returns true if the set changed.
    pub fn insert(&self, element: T) -> bool {
        self.inner.write().insert(element)
    }

    /// Adds every element under one exclusive lock. Returns true if at least
    /// one of them was inserted or replaced a stored element.
    ///
    /// ### Example
    ///
    /// ```
    /// use keyset::new_set;
    ///
    /// let set = new_set(vec![1, 2, 3, 4, 5]);
    /// assert!(set.add(vec![3, 4, 5, 6]));
    /// assert_eq!(6, set.len());
    /// ```
    pub fn add<I>(&self, elements: I) -> bool where I: IntoIterator<Item=T> {
        self.inner.write().add(elements)
    }

    /// Removes and returns the element stored under `element`'s key.
    pub fn remove(&self, element: &T) -> Option<T> {
        self.inner.write().remove(element)
    }

    /// Removes the elements stored under each of the given elements' keys.
    pub fn remove_all(&self, elements: &[T]) {
        self.inner.write().remove_all(elements)
    }

    /// Returns true if an element with the same key is present.
    pub fn contains(&self, element: &T) -> bool {
        self.inner.read().contains(element)
    }

    /// Returns true if the keys of all the given elements are present.
    pub fn contains_all(&self, elements: &[T]) -> bool {
        self.inner.read().contains_all(elements)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Calls `visit` on each element until it returns false.
    ///
    /// The shared lock is held for the whole walk. `visit` must not call back
    /// into this set at all: a mutation deadlocks at once, and a read takes a
    /// second shared lock that deadlocks if a writer is already waiting.
    pub fn each<F>(&self, visit: F) where F: FnMut(&T) -> bool {
        self.inner.read().each(visit)
    }

    /// Removes and returns an arbitrary element, or `None` if the set is empty.
    pub fn pop(&self) -> Option<T> {
        self.inner.write().pop()
    }

    pub fn equal(&self, other: &SyncSet<T, P>) -> bool {
        self.read_both(other, |this, that| this.equal(that))
    }

    pub fn is_subset(&self, other: &SyncSet<T, P>) -> bool {
        self.read_both(other, |this, that| this.is_subset(that))
    }

    pub fn is_proper_subset(&self, other: &SyncSet<T, P>) -> bool {
        self.read_both(other, |this, that| this.is_proper_subset(that))
    }

    pub fn is_superset(&self, other: &SyncSet<T, P>) -> bool {
        self.read_both(other, |this, that| this.is_superset(that))
    }

    pub fn is_proper_superset(&self, other: &SyncSet<T, P>) -> bool {
        self.read_both(other, |this, that| this.is_proper_superset(that))
    }

    /// Runs `f` over both sets with both shared locks held.
    ///
    /// Locks are taken in ascending id order. When `other` is `self` a single
    /// guard serves both sides, since a second shared lock could queue behind
    /// a waiting writer.
    fn read_both<R, F>(&self, other: &SyncSet<T, P>, f: F) -> R
    where F: FnOnce(&Set<T, P>, &Set<T, P>) -> R {
        if self.id == other.id {
            let set = self.inner.read();
            return f(&set, &set);
        }
        trace!("locking sets {} and {} for reading", self.id.id().min(other.id.id()),
               self.id.id().max(other.id.id()));
        if self.id < other.id {
            let this = self.inner.read();
            let that = other.inner.read();
            f(&this, &that)
        } else {
            let that = other.inner.read();
            let this = self.inner.read();
            f(&this, &that)
        }
    }
}

impl <T, P> SyncSet<T, P> where T: Clone, P: Policy<T> + Clone {

    /// Returns a snapshot iterator over the elements.
    ///
    /// The elements are copied out under the shared lock, which is released
    /// before this returns. The iterator can be dropped at any point and does
    /// not block writers while it is consumed.
    ///
    /// ### Example
    ///
    /// ```
    /// use keyset::new_set;
    ///
    /// let set = new_set(vec![1, 2, 3]);
    /// let snapshot = set.iter();
    /// set.insert(4);
    /// assert_eq!(3, snapshot.count());
    /// ```
    pub fn iter(&self) -> vec::IntoIter<T> {
        self.to_vec().into_iter()
    }

    /// Collects the elements into a vector, in unspecified order.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().to_vec()
    }

    /// See `Set::difference`.
    pub fn difference(&self, other: &SyncSet<T, P>) -> SyncSet<T, P> {
        SyncSet::from(self.read_both(other, |this, that| this.difference(that)))
    }

    /// See `Set::symmetric_difference`.
    pub fn symmetric_difference(&self, other: &SyncSet<T, P>) -> SyncSet<T, P> {
        SyncSet::from(self.read_both(other, |this, that| this.symmetric_difference(that)))
    }

    /// See `Set::union`. Collisions are resolved by the policy of `self`.
    pub fn union(&self, other: &SyncSet<T, P>) -> SyncSet<T, P> {
        SyncSet::from(self.read_both(other, |this, that| this.union(that)))
    }

    /// See `Set::intersection`. Shared keys keep the element of the smaller
    /// set.
    pub fn intersection(&self, other: &SyncSet<T, P>) -> SyncSet<T, P> {
        SyncSet::from(self.read_both(other, |this, that| this.intersection(that)))
    }
}

impl <T, P> From<Set<T, P>> for SyncSet<T, P> where P: Policy<T> {
    fn from(set: Set<T, P>) -> SyncSet<T, P> {
        SyncSet { id: SetId::next(), inner: RwLock::new(set) }
    }
}

impl <T, P> Clone for SyncSet<T, P> where T: Clone, P: Policy<T> + Clone {
    fn clone(&self) -> SyncSet<T, P> {
        let set = self.inner.read().clone();
        SyncSet::from(set)
    }
}

impl <T, P> Default for SyncSet<T, P> where P: Policy<T> + Default {
    fn default() -> SyncSet<T, P> {
        SyncSet::from(Set::default())
    }
}

impl <T, P> FromIterator<T> for SyncSet<T, P> where P: Policy<T> + Default {
    fn from_iter<I>(elements: I) -> SyncSet<T, P> where I: IntoIterator<Item=T> {
        SyncSet::from(elements.into_iter().collect::<Set<T, P>>())
    }
}

impl <T, P> Debug for SyncSet<T, P> where T: Debug, P: Policy<T> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        Debug::fmt(&*self.inner.read(), f)
    }
}

impl <T, P> Display for SyncSet<T, P> where T: Debug, P: Policy<T> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        Display::fmt(&*self.inner.read(), f)
    }
}
