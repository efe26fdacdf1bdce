//! Insertion-ordered growable storage shared by the world and the mesh loader.

use std::ops::{Deref, Index};

/// Capacity reserved by the first append into an empty collection.
pub const INITIAL_CAPACITY: usize = 256;

/// A growable sequence with a geometric growth policy.
///
/// When an append finds the collection full, the capacity doubles, or jumps to
/// [`INITIAL_CAPACITY`] if nothing was reserved yet. Growth never reorders or
/// alters stored elements.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Appends an element and returns its index.
    pub fn push(&mut self, item: T) -> usize {
        if self.items.len() == self.capacity {
            self.capacity = if self.capacity == 0 {
                INITIAL_CAPACITY
            } else {
                self.capacity * 2
            };
            self.items.reserve_exact(self.capacity - self.items.len());
        }

        self.items.push(item);
        self.items.len() - 1
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> Index<usize> for Collection<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<T> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> std::iter::FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Collection::new();
        collection.extend(iter);
        collection
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[test]
fn first_push_reserves_initial_capacity() {
    let mut collection = Collection::new();
    assert_eq!(0, collection.capacity());

    assert_eq!(0, collection.push('a'));
    assert_eq!(INITIAL_CAPACITY, collection.capacity());
    assert_eq!(1, collection.len());
}

#[test]
fn growth_doubles_and_preserves_order() {
    let mut collection = Collection::new();
    for v in 0..INITIAL_CAPACITY {
        collection.push(v * 3);
    }
    assert_eq!(INITIAL_CAPACITY, collection.capacity());

    collection.push(usize::MAX);
    assert_eq!(2 * INITIAL_CAPACITY, collection.capacity());

    for (idx, v) in collection.iter().take(INITIAL_CAPACITY).enumerate() {
        assert_eq!(idx * 3, *v);
    }
    assert_eq!(usize::MAX, collection[INITIAL_CAPACITY]);

    for v in 0..INITIAL_CAPACITY {
        collection.push(v);
    }
    assert_eq!(4 * INITIAL_CAPACITY, collection.capacity());
    assert_eq!(2 * INITIAL_CAPACITY + 1, collection.len());
}
