//! Hash sets with pluggable uniqueness.
//!
//! Every set stores at most one element per key. What the key is, and what
//! happens when an incoming element has the same key as a stored one, is
//! decided by the set's `Policy`.
//!
//! ##### Set Kinds
//!
//! ###### Simple sets
//!
//! The element is its own key (`Simple` policy), so uniqueness is plain
//! equality. Adding an element that is already present changes nothing.
//!
//! ###### Priority sets
//!
//! A `Keyed` policy derives the key from the element, for example an id
//! field, and a `Resolver::Priority` comparator ranks the stored element
//! against the incoming one. The incoming element replaces the stored one only
//! when it ranks strictly higher.
//!
//! ###### Resolving sets
//!
//! Like priority sets, but a `Resolver::Resolving` function returns the element
//! to keep outright, which may also be a merge of the two.
//!
//! A keyed set without a resolver keeps the first element written under each
//! key until that key is removed.
//!
//! ##### Synchronization
//!
//! `Set` has no internal locking. `SyncSet` wraps one in a reader-writer lock
//! and exposes the same operations through `&self`.
//!
//! ##### Membership
//!
//! Membership, equality and the subset relations only look at keys. Two keyed
//! sets holding different payloads under the same keys are equal.

pub use self::hashset::{Iter, KeyedSet, Set, SimpleSet};
pub use self::policy::{Keyed, Policy, Resolver, Simple};
pub use self::syncset::{SyncKeyedSet, SyncSet, SyncSimpleSet};

mod hashset;
mod policy;
mod syncset;
