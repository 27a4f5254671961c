use std::cmp::Ordering::{self, Greater, Less, Equal};
use indexmap::map::{self, IndexMap};
use indexmap::map::Entry::{Occupied, Vacant};
use std::fmt::{Debug, Display, Formatter, Error};
use std::iter::FromIterator;

#[cfg(any(feature = "quickcheck_generators", test))]
use quickcheck::{Arbitrary, Gen};

use log::trace;

use crate::set::policy::{Keyed, Policy, Simple};

/// A set whose elements are unique by the key its `Policy` derives from them.
///
/// `Set` is not synchronized; mutation needs `&mut self`. Wrap it in a
/// `SyncSet` to share it between threads.
pub struct Set<T, P> where P: Policy<T> {
    elements: IndexMap<P::Key, T>,
    policy: P,
}

/// A set where each element is its own key.
pub type SimpleSet<T> = Set<T, Simple>;

/// A set keyed by a derived key, with optional collision resolution.
pub type KeyedSet<T, K> = Set<T, Keyed<T, K>>;

impl <T, P> Set<T, P> where P: Policy<T> {

    /// Creates an empty set governed by `policy`.
    ///
    /// ### Example
    ///
    /// ```
    /// use keyset::set::{Set, Simple};
    ///
    /// let set = Set::<i32, _>::new(Simple);
    /// assert!(set.is_empty());
    /// ```
    pub fn new(policy: P) -> Set<T, P> {
        Set { elements: IndexMap::new(), policy: policy }
    }

    /// Creates an empty set with room for at least `capacity` keys.
    pub fn with_capacity(policy: P, capacity: usize) -> Set<T, P> {
        Set { elements: IndexMap::with_capacity(capacity), policy: policy }
    }

    /// Returns the policy governing this set.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Adds a single element.
    ///
    /// A new key is always inserted. An existing key is handed to the policy,
    /// which may replace the stored element. Returns true if the set changed.
    ///
    /// ### Example
    ///
    /// ```
    /// use keyset::new_thread_unsafe_set;
    ///
    /// let mut set = new_thread_unsafe_set(vec![1, 2]);
    /// assert!(set.insert(3));
    /// assert!(!set.insert(3));
    /// ```
    pub fn insert(&mut self, element: T) -> bool {
        match self.elements.entry(self.policy.key_of(&element)) {
            Vacant(entry) => {
                entry.insert(element);
                true
            },
            Occupied(mut entry) => {
                match self.policy.resolve(entry.get(), element) {
                    Some(winner) => {
                        trace!("collision resolved in favor of the incoming element");
                        entry.insert(winner);
                        true
                    },
                    None => false,
                }
            },
        }
    }

    /// Adds every element in turn. Returns true if at least one of them was
    /// inserted or replaced a stored element.
    pub fn add<I>(&mut self, elements: I) -> bool where I: IntoIterator<Item=T> {
        elements.into_iter().fold(false, |changed, element| self.insert(element) || changed)
    }

    /// Removes the element stored under `element`'s key, regardless of its
    /// payload, and returns it.
    pub fn remove(&mut self, element: &T) -> Option<T> {
        self.elements.swap_remove(&self.policy.key_of(element))
    }

    /// Removes the elements stored under each of the given elements' keys.
    pub fn remove_all(&mut self, elements: &[T]) {
        for element in elements {
            self.remove(element);
        }
    }

    /// Returns true if an element with the same key is present.
    ///
    /// Only the key is compared; the stored element may differ from `element`
    /// in any other way.
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains_key(&self.policy.key_of(element))
    }

    /// Returns true if the keys of all the given elements are present.
    pub fn contains_all(&self, elements: &[T]) -> bool {
        elements.iter().all(|element| self.contains(element))
    }

    /// Returns the number of distinct keys in the set.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Removes every element. The policy is kept.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Calls `visit` on each element until it returns false.
    pub fn each<F>(&self, mut visit: F) where F: FnMut(&T) -> bool {
        for element in self.elements.values() {
            if !visit(element) {
                break;
            }
        }
    }

    /// Iterates over the elements in unspecified order.
    pub fn iter(&self) -> Iter<'_, T, P::Key> {
        Iter { inner: self.elements.values() }
    }

    /// Removes and returns an arbitrary element, or `None` if the set is empty.
    ///
    /// The element taken is the last one in the map's internal order, so
    /// draining a set with `pop` costs constant time per call. Removals
    /// reorder the map, so the choice is deterministic but not insertion
    /// order.
    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop().map(|(_, element)| element)
    }

    /// Returns true if the sets have the same number of keys and every key of
    /// `self` is in `other`. Payloads are not compared.
    pub fn equal(&self, other: &Set<T, P>) -> bool {
        self.len() == other.len() && self.keys_within(other)
    }

    /// Returns true if every key of `self` is in `other`.
    pub fn is_subset(&self, other: &Set<T, P>) -> bool {
        self.len() <= other.len() && self.keys_within(other)
    }

    /// Returns true if `self` is a subset of `other` with fewer keys.
    pub fn is_proper_subset(&self, other: &Set<T, P>) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    /// Returns true if every key of `other` is in `self`.
    pub fn is_superset(&self, other: &Set<T, P>) -> bool {
        other.is_subset(self)
    }

    /// Returns true if `self` is a superset of `other` with more keys.
    pub fn is_proper_superset(&self, other: &Set<T, P>) -> bool {
        self.len() > other.len() && self.is_superset(other)
    }

    fn keys_within(&self, other: &Set<T, P>) -> bool {
        self.elements.keys().all(|key| other.elements.contains_key(key))
    }
}

impl <T, P> Set<T, P> where T: Clone, P: Policy<T> + Clone {

    fn empty_like(&self) -> Set<T, P> {
        Set::new(self.policy.clone())
    }

    /// Returns a new set with the elements of `self` whose keys are not in
    /// `other`.
    ///
    /// ### Example
    ///
    /// ```
    /// use keyset::new_thread_unsafe_set;
    ///
    /// let a = new_thread_unsafe_set(vec![1, 2, 3]);
    /// let b = new_thread_unsafe_set(vec![2, 3, 4, 5]);
    /// assert_eq!(vec![1], a.difference(&b).to_vec());
    /// ```
    pub fn difference(&self, other: &Set<T, P>) -> Set<T, P> {
        let mut difference = self.empty_like();
        for (key, element) in self.elements.iter() {
            if !other.elements.contains_key(key) {
                difference.insert(element.clone());
            }
        }
        difference
    }

    /// Returns a new set with the elements whose keys are in exactly one of
    /// the two sets.
    ///
    /// The result carries the policy of `other`.
    pub fn symmetric_difference(&self, other: &Set<T, P>) -> Set<T, P> {
        let mut difference = other.difference(self);
        for (key, element) in self.elements.iter() {
            if !other.elements.contains_key(key) {
                difference.insert(element.clone());
            }
        }
        difference
    }

    /// Returns a new set with every element of `self`, then every element of
    /// `other` added through `insert`.
    ///
    /// When both sets hold the same key, the policy of `self` decides which
    /// element survives, exactly as a plain `insert` would.
    pub fn union(&self, other: &Set<T, P>) -> Set<T, P> {
        let mut union = Set::with_capacity(self.policy.clone(), self.len().max(other.len()));
        union.add(self.elements.values().cloned());
        union.add(other.elements.values().cloned());
        union
    }

    /// Returns a new set with the elements whose keys are in both sets.
    ///
    /// The smaller set is walked and probed against the larger one (`self` is
    /// walked when the sizes tie). For a shared key the element is taken from
    /// the walked side; the two payloads are never resolved against each
    /// other.
    ///
    /// ### Example
    ///
    /// ```
    /// use keyset::new_thread_unsafe_keyed_set;
    ///
    /// let mut a = new_thread_unsafe_keyed_set(|pair: &(u8, char)| pair.0, None);
    /// let mut b = new_thread_unsafe_keyed_set(|pair: &(u8, char)| pair.0, None);
    /// a.add(vec![(1, 'a'), (2, 'a'), (3, 'a')]);
    /// b.add(vec![(1, 'b'), (2, 'b')]);
    ///
    /// let mut shared = a.intersection(&b).to_vec();
    /// shared.sort();
    /// assert_eq!(vec![(1, 'b'), (2, 'b')], shared);
    /// ```
    pub fn intersection(&self, other: &Set<T, P>) -> Set<T, P> {
        let (smaller, larger) = if other.len() < self.len() { (other, self) } else { (self, other) };
        let mut intersection = Set::with_capacity(self.policy.clone(), smaller.len());
        for (key, element) in smaller.elements.iter() {
            if larger.elements.contains_key(key) {
                intersection.insert(element.clone());
            }
        }
        intersection
    }

    /// Collects the elements into a vector, in unspecified order.
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.values().cloned().collect()
    }
}

impl <T, P> Clone for Set<T, P> where T: Clone, P: Policy<T> + Clone {
    fn clone(&self) -> Set<T, P> {
        let mut clone = Set::with_capacity(self.policy.clone(), self.len());
        clone.add(self.elements.values().cloned());
        clone
    }
}

impl <T, P> Default for Set<T, P> where P: Policy<T> + Default {
    fn default() -> Set<T, P> {
        Set::new(P::default())
    }
}

impl <T, P> FromIterator<T> for Set<T, P> where P: Policy<T> + Default {
    fn from_iter<I>(elements: I) -> Set<T, P> where I: IntoIterator<Item=T> {
        let mut set = Set::default();
        set.add(elements);
        set
    }
}

impl <T, P> Extend<T> for Set<T, P> where P: Policy<T> {
    fn extend<I>(&mut self, elements: I) where I: IntoIterator<Item=T> {
        self.add(elements);
    }
}

impl <'a, T, P> IntoIterator for &'a Set<T, P> where P: Policy<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P::Key>;

    fn into_iter(self) -> Iter<'a, T, P::Key> {
        self.iter()
    }
}

impl <T, P> PartialEq for Set<T, P> where P: Policy<T> {
    fn eq(&self, other: &Set<T, P>) -> bool {
        self.equal(other)
    }
}

impl <T, P> Eq for Set<T, P> where P: Policy<T> {}

impl <T, P> PartialOrd for Set<T, P> where P: Policy<T> {
    fn partial_cmp(&self, other: &Set<T, P>) -> Option<Ordering> {
        if self.equal(other) {
            Some(Equal)
        } else if self.is_subset(other) {
            Some(Less)
        } else if self.is_superset(other) {
            Some(Greater)
        } else {
            None
        }
    }
}

impl <T, P> Debug for Set<T, P> where T: Debug, P: Policy<T> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.debug_set().entries(self.elements.values()).finish()
    }
}

impl <T, P> Display for Set<T, P> where T: Debug, P: Policy<T> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "Set{{")?;
        for (i, element) in self.elements.values().enumerate() {
            if i != 0 { write!(f, ", ")?; }
            write!(f, "{:?}", element)?;
        }
        write!(f, "}}")
    }
}

/// An iterator over the elements of a `Set`.
pub struct Iter<'a, T: 'a, K: 'a> {
    inner: map::Values<'a, K, T>,
}

impl <'a, T, K> Iterator for Iter<'a, T, K> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl <'a, T, K> ExactSizeIterator for Iter<'a, T, K> {}

impl <'a, T, K> Clone for Iter<'a, T, K> {
    fn clone(&self) -> Iter<'a, T, K> {
        Iter { inner: self.inner.clone() }
    }
}

#[cfg(any(feature = "quickcheck_generators", test))]
impl <T> Arbitrary for SimpleSet<T> where T: Arbitrary + Eq + std::hash::Hash {
    fn arbitrary(g: &mut Gen) -> SimpleSet<T> {
        let elements: Vec<T> = Arbitrary::arbitrary(g);
        elements.into_iter().collect()
    }
    fn shrink(&self) -> Box<dyn Iterator<Item=SimpleSet<T>>> {
        Box::new(self.to_vec().shrink().map(|elements| elements.into_iter().collect::<SimpleSet<T>>()))
    }
}
