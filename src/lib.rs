//! Hash sets with derived keys and pluggable conflict resolution.
//!
//! Besides the usual set algebra (union, intersection, differences, subset
//! tests), sets in this crate can be keyed by something other than the whole
//! element, such as an id field. When an incoming element carries a key that
//! is already present, a caller-supplied `Resolver` decides which of the two
//! is kept. See the `set` module for the available kinds.
//!
//! Each kind comes in an unsynchronized flavor (`Set`) and a flavor guarded
//! by a reader-writer lock (`SyncSet`). The functions at the root of the
//! crate build the four common combinations.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::SeqCst;

pub mod set;

#[cfg(any(feature = "quickcheck_generators", test))]
pub mod test;

use set::{Keyed, KeyedSet, Resolver, Set, SimpleSet, SyncKeyedSet, SyncSet, SyncSimpleSet};

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(0);

/// The identity of a synchronized set.
///
/// Ids are unique within the process and increase with creation order. A
/// clone, or the result of an operation between two sets, is a new set and
/// gets a new id. Operations that lock two sets lock the lower id first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(u64);

impl SetId {
    pub fn id(self) -> u64 {
        self.0
    }

    pub(crate) fn next() -> SetId {
        SetId(NEXT_SET_ID.fetch_add(1, SeqCst))
    }
}

/// Creates a synchronized simple set holding `elements`.
///
/// ### Example
///
/// ```
/// let set = keyset::new_set(vec!["a", "b", "a"]);
/// assert_eq!(2, set.len());
/// assert!(set.contains(&"b"));
/// ```
pub fn new_set<T, I>(elements: I) -> SyncSimpleSet<T>
where T: Clone + Eq + std::hash::Hash, I: IntoIterator<Item=T> {
    elements.into_iter().collect()
}

/// Creates an unsynchronized simple set holding `elements`.
///
/// ### Example
///
/// ```
/// let mut set = keyset::new_thread_unsafe_set(vec![1, 2, 3, 4, 5]);
/// set.add(vec![3, 4, 5, 6, 7, 8, 9, 10]);
///
/// let mut elements = set.to_vec();
/// elements.sort();
/// assert_eq!((1..11).collect::<Vec<_>>(), elements);
/// ```
pub fn new_thread_unsafe_set<T, I>(elements: I) -> SimpleSet<T>
where T: Clone + Eq + std::hash::Hash, I: IntoIterator<Item=T> {
    elements.into_iter().collect()
}

/// Creates an empty synchronized keyed set.
///
/// `key_of` derives the uniqueness key of each element. `resolver` arbitrates
/// key collisions; without one the first element written under a key is kept.
///
/// ### Example
///
/// ```
/// use keyset::set::Resolver;
///
/// #[derive(Clone)]
/// struct Task { id: u32, priority: u8 }
///
/// let tasks = keyset::new_keyed_set(
///     |task: &Task| task.id,
///     Some(Resolver::priority(|existing: &Task, incoming: &Task| {
///         incoming.priority.cmp(&existing.priority)
///     })));
///
/// tasks.insert(Task { id: 1, priority: 1 });
/// tasks.insert(Task { id: 1, priority: 5 });
/// tasks.insert(Task { id: 1, priority: 3 });
///
/// assert_eq!(1, tasks.len());
/// assert_eq!(5, tasks.to_vec()[0].priority);
/// ```
pub fn new_keyed_set<T, K, F>(key_of: F, resolver: Option<Resolver<T>>) -> SyncKeyedSet<T, K>
where K: Eq + std::hash::Hash, F: Fn(&T) -> K + Send + Sync + 'static {
    SyncSet::new(Keyed::new(key_of, resolver))
}

/// Creates an empty unsynchronized keyed set.
///
/// See `new_keyed_set` for the meaning of the arguments.
pub fn new_thread_unsafe_keyed_set<T, K, F>(key_of: F, resolver: Option<Resolver<T>>) -> KeyedSet<T, K>
where K: Eq + std::hash::Hash, F: Fn(&T) -> K + Send + Sync + 'static {
    Set::new(Keyed::new(key_of, resolver))
}
