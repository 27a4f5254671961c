//! Property checks and fixtures shared by the set tests.
//!
//! Each check is a plain function returning `bool`, so it can be handed to
//! `quickcheck` with whatever concrete set type a test module is exercising.

use std::collections::HashMap;
use std::hash::Hash;

use quickcheck::{Arbitrary, Gen};

use crate::set::{Keyed, KeyedSet, Policy, Resolver, Set};

/// An element with an identity and a rank, used to exercise keyed sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub id: u8,
    pub importance: u8,
}

impl Item {
    pub fn new(id: u8, importance: u8) -> Item {
        Item { id: id, importance: importance }
    }
}

impl Arbitrary for Item {
    fn arbitrary(g: &mut Gen) -> Item {
        // Few ids so that collisions are common.
        let id = u8::arbitrary(g) % 8;
        Item::new(id, Arbitrary::arbitrary(g))
    }
    fn shrink(&self) -> Box<dyn Iterator<Item=Item>> {
        let id = self.id;
        Box::new(self.importance.shrink().map(move |importance| Item::new(id, importance)))
    }
}

/// Creates an unsynchronized set of items keyed by id, where the item with
/// the higher importance wins a collision.
pub fn by_importance() -> KeyedSet<Item, u8> {
    Set::new(Keyed::new(|item: &Item| item.id,
                        Some(Resolver::priority(|existing: &Item, incoming: &Item| {
                            incoming.importance.cmp(&existing.importance)
                        }))))
}

/// Priority sets of items, so the generic checks below also run over keyed
/// sets whose payloads differ under the same key.
impl Arbitrary for KeyedSet<Item, u8> {
    fn arbitrary(g: &mut Gen) -> KeyedSet<Item, u8> {
        let items: Vec<Item> = Arbitrary::arbitrary(g);
        let mut set = by_importance();
        set.add(items);
        set
    }
    fn shrink(&self) -> Box<dyn Iterator<Item=KeyedSet<Item, u8>>> {
        Box::new(self.to_vec().shrink().map(|items| {
            let mut set = by_importance();
            set.add(items);
            set
        }))
    }
}

fn keys<T, P>(set: &Set<T, P>) -> Vec<P::Key> where P: Policy<T>, P::Key: Ord {
    let mut keys: Vec<P::Key> = set.iter().map(|element| set.policy().key_of(element)).collect();
    keys.sort();
    keys
}

pub fn add_is_idempotent<T, P>(mut set: Set<T, P>, element: T) -> bool
where T: Clone, P: Policy<T> {
    set.insert(element.clone());
    let len = set.len();
    let changed = set.insert(element.clone());
    !changed && set.len() == len && set.contains(&element)
}

pub fn union_covers_operands<T, P>(a: Set<T, P>, b: Set<T, P>) -> bool
where T: Clone, P: Policy<T> + Clone {
    let union = a.union(&b);
    union.len() >= a.len().max(b.len()) && a.is_subset(&union) && b.is_subset(&union)
}

pub fn differences_partition_symmetric_difference<T, P>(a: Set<T, P>, b: Set<T, P>) -> bool
where T: Clone, P: Policy<T> + Clone {
    let a_only = a.difference(&b);
    let b_only = b.difference(&a);
    let disjoint = a_only.intersection(&b_only).is_empty();
    disjoint && a_only.union(&b_only).equal(&a.symmetric_difference(&b))
}

pub fn intersection_commutes_by_key<T, P>(a: Set<T, P>, b: Set<T, P>) -> bool
where T: Clone, P: Policy<T> + Clone, P::Key: Ord {
    let ab = a.intersection(&b);
    let ba = b.intersection(&a);
    ab.equal(&ba) && keys(&ab) == keys(&ba)
}

pub fn subset_antisymmetry<T, P>(a: Set<T, P>, b: Set<T, P>) -> bool
where P: Policy<T> {
    !(a.is_subset(&b) && b.is_subset(&a)) || a.equal(&b)
}

pub fn equal_reflexive_symmetric<T, P>(a: Set<T, P>, b: Set<T, P>) -> bool
where P: Policy<T> {
    a.equal(&a) && b.equal(&b) && a.equal(&b) == b.equal(&a)
}

pub fn pop_reduces_len<T, P>(mut set: Set<T, P>) -> bool
where P: Policy<T> {
    let len = set.len();
    match set.pop() {
        Some(element) => set.len() == len - 1 && !set.contains(&element),
        None => len == 0,
    }
}

/// Replays `items` into a priority set and compares the outcome against a
/// hand-rolled trace of the same rule.
pub fn priority_matches_trace(items: Vec<Item>) -> bool {
    let mut set = by_importance();
    let mut expected: HashMap<u8, Item> = HashMap::new();
    for item in items.iter().cloned() {
        set.insert(item);
        let winner = expected.entry(item.id).or_insert(item);
        if item.importance > winner.importance {
            *winner = item;
        }
    }

    set.len() == expected.len()
        && set.iter().all(|item| expected.get(&item.id) == Some(item))
}

/// Returns the elements of a set in ascending order.
pub fn sorted<T, P>(set: &Set<T, P>) -> Vec<T> where T: Clone + Ord, P: Policy<T> + Clone {
    let mut elements = set.to_vec();
    elements.sort();
    elements
}

/// Counts how many times each element occurs in `elements`.
pub fn histogram<T>(elements: &[T]) -> HashMap<&T, usize> where T: Eq + Hash {
    let mut counts = HashMap::new();
    for element in elements {
        *counts.entry(element).or_insert(0) += 1;
    }
    counts
}
