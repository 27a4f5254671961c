use std::cmp::Ordering;
use std::fmt::{Debug, Formatter, Error};
use std::hash::Hash;
use std::sync::Arc;

/// Decides how a set derives keys from its elements and what happens when an
/// incoming element collides with a stored one.
///
/// Both methods **must** be pure. `key_of` must return the same key for the
/// same element for as long as the element lives in a set, otherwise removal
/// and membership tests will miss it.
pub trait Policy<T> {

    /// The uniqueness key of an element.
    type Key: Eq + Hash;

    /// Derives the key of an element.
    fn key_of(&self, element: &T) -> Self::Key;

    /// Arbitrates a key collision.
    ///
    /// Called only when `incoming` has the same key as `existing`. Returns the
    /// element to store in place of `existing`, or `None` to keep `existing`.
    fn resolve(&self, existing: &T, incoming: T) -> Option<T>;
}

/// The policy of simple sets: an element is its own key.
///
/// Collisions never replace the stored element, since it is equal to the
/// incoming one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Simple;

impl <T> Policy<T> for Simple where T: Clone + Eq + Hash {

    type Key = T;

    fn key_of(&self, element: &T) -> T {
        element.clone()
    }

    fn resolve(&self, _existing: &T, _incoming: T) -> Option<T> {
        None
    }
}

/// A collision rule for keyed sets.
///
/// Two shapes are supported. They are interchangeable as far as the set is
/// concerned; pick whichever reads better at the call site.
pub enum Resolver<T> {

    /// Compares `(existing, incoming)`. The incoming element wins only when the
    /// comparator returns `Ordering::Greater`.
    Priority(Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>),

    /// Inspects `(existing, incoming)` and returns the element to store, or
    /// `None` to keep the existing element. The returned element may be either
    /// argument or a new value built from both.
    Resolving(Arc<dyn Fn(&T, &T) -> Option<T> + Send + Sync>),
}

impl <T> Resolver<T> {

    /// Creates a comparator-based resolver.
    ///
    /// ### Example
    ///
    /// ```
    /// use keyset::set::Resolver;
    ///
    /// // Higher numbers win.
    /// let resolver = Resolver::priority(|existing: &u32, incoming: &u32| incoming.cmp(existing));
    /// assert_eq!(Some(5), resolver.resolve(&3, 5));
    /// assert_eq!(None, resolver.resolve(&3, 1));
    /// ```
    pub fn priority<F>(comparator: F) -> Resolver<T>
    where F: Fn(&T, &T) -> Ordering + Send + Sync + 'static {
        Resolver::Priority(Arc::new(comparator))
    }

    /// Creates a resolver that picks the element to keep explicitly.
    ///
    /// ### Example
    ///
    /// ```
    /// use keyset::set::Resolver;
    ///
    /// // Collisions merge by summing.
    /// let resolver = Resolver::resolving(|existing: &u32, incoming: &u32| Some(existing + incoming));
    /// assert_eq!(Some(8), resolver.resolve(&3, 5));
    /// ```
    pub fn resolving<F>(resolve: F) -> Resolver<T>
    where F: Fn(&T, &T) -> Option<T> + Send + Sync + 'static {
        Resolver::Resolving(Arc::new(resolve))
    }

    /// Applies the resolver to a collision, returning the element to store if
    /// the stored one should be replaced.
    pub fn resolve(&self, existing: &T, incoming: T) -> Option<T> {
        match *self {
            Resolver::Priority(ref comparator) => {
                if comparator(existing, &incoming) == Ordering::Greater {
                    Some(incoming)
                } else {
                    None
                }
            },
            Resolver::Resolving(ref resolve) => resolve(existing, &incoming),
        }
    }
}

impl <T> Clone for Resolver<T> {
    fn clone(&self) -> Resolver<T> {
        match *self {
            Resolver::Priority(ref comparator) => Resolver::Priority(comparator.clone()),
            Resolver::Resolving(ref resolve) => Resolver::Resolving(resolve.clone()),
        }
    }
}

impl <T> Debug for Resolver<T> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Resolver::Priority(_) => write!(f, "Resolver::Priority"),
            Resolver::Resolving(_) => write!(f, "Resolver::Resolving"),
        }
    }
}

/// The policy of keyed sets: keys come from a caller-supplied function and
/// collisions go to an optional `Resolver`.
///
/// Without a resolver the first element stored under a key stays there until
/// it is removed.
pub struct Keyed<T, K> {
    key_of: Arc<dyn Fn(&T) -> K + Send + Sync>,
    resolver: Option<Resolver<T>>,
}

impl <T, K> Keyed<T, K> {

    /// Creates a keyed policy.
    pub fn new<F>(key_of: F, resolver: Option<Resolver<T>>) -> Keyed<T, K>
    where F: Fn(&T) -> K + Send + Sync + 'static {
        Keyed { key_of: Arc::new(key_of), resolver: resolver }
    }

    /// Returns the collision rule, if any.
    pub fn resolver(&self) -> Option<&Resolver<T>> {
        self.resolver.as_ref()
    }
}

impl <T, K> Policy<T> for Keyed<T, K> where K: Eq + Hash {

    type Key = K;

    fn key_of(&self, element: &T) -> K {
        (self.key_of)(element)
    }

    fn resolve(&self, existing: &T, incoming: T) -> Option<T> {
        self.resolver.as_ref().and_then(|resolver| resolver.resolve(existing, incoming))
    }
}

impl <T, K> Clone for Keyed<T, K> {
    fn clone(&self) -> Keyed<T, K> {
        Keyed { key_of: self.key_of.clone(), resolver: self.resolver.clone() }
    }
}

impl <T, K> Debug for Keyed<T, K> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.debug_struct("Keyed").field("resolver", &self.resolver).finish()
    }
}
