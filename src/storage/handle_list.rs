//! Doubly-linked sequence with stable handles.
//!
//! Elements live in an arena of slots and are linked in insertion order.
//! Every inserted element is given a [`Handle`] that stays valid until the
//! element is removed, regardless of other insertions and removals. Removal
//! by handle is _O(1)_ and does not move any other element. Freed slots are
//! recycled, and the slot generation makes sure that a handle to a removed
//! element does not resolve to the element that reuses its slot.

use std::{iter::FusedIterator, mem};

use crate::core::id::Handle;

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied {
        value: T,
        prev: Option<usize>,
        next: Option<usize>,
    },
    Vacant {
        next_free: Option<usize>,
    },
}

#[derive(Debug, Clone)]
struct Entry<T> {
    generation: u32,
    slot: Slot<T>,
}

#[derive(Debug, Clone)]
pub struct HandleList<T> {
    entries: Vec<Entry<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
    len: usize,
}

impl<T> HandleList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the arena, including vacant ones. All handles of
    /// present elements have slot position below this bound.
    pub fn slot_bound(&self) -> usize {
        self.entries.len()
    }

    /// Appends the value at the end of the sequence.
    pub fn push_back(&mut self, value: T) -> Handle {
        let prev = self.tail;
        let occupied = Slot::Occupied {
            value,
            prev,
            next: None,
        };

        let slot = match self.free {
            Some(slot) => {
                let entry = &mut self.entries[slot];
                self.free = match entry.slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied { .. } => unreachable!("free list points to an occupied slot"),
                };
                entry.slot = occupied;
                slot
            }
            None => {
                self.entries.push(Entry {
                    generation: 0,
                    slot: occupied,
                });
                self.entries.len() - 1
            }
        };

        match prev {
            Some(prev) => *self.next_mut(prev) = Some(slot),
            None => self.head = Some(slot),
        }

        self.tail = Some(slot);
        self.len += 1;

        Handle::new(slot, self.entries[slot].generation)
    }

    /// Removes the element from the sequence and returns it, or `None` if the
    /// handle does not refer to a present element.
    pub fn remove(&mut self, handle: &Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }

        let entry = &mut self.entries[handle.slot];
        let slot = mem::replace(
            &mut entry.slot,
            Slot::Vacant {
                next_free: self.free,
            },
        );
        // Invalidate all handles pointing to this slot.
        entry.generation = entry.generation.wrapping_add(1);

        let (value, prev, next) = match slot {
            Slot::Occupied { value, prev, next } => (value, prev, next),
            Slot::Vacant { .. } => unreachable!("contains checked the slot"),
        };

        match prev {
            Some(prev) => *self.next_mut(prev) = next,
            None => self.head = next,
        }

        match next {
            Some(next) => *self.prev_mut(next) = prev,
            None => self.tail = prev,
        }

        self.free = Some(handle.slot);
        self.len -= 1;

        Some(value)
    }

    pub fn contains(&self, handle: &Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.entries.get(handle.slot) {
            Some(Entry {
                generation,
                slot: Slot::Occupied { value, .. },
            }) if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.entries.get_mut(handle.slot) {
            Some(Entry {
                generation,
                slot: Slot::Occupied { value, .. },
            }) if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            entries: &self.entries,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Iterates over the handles of the elements in insertion order.
    pub fn handles(&self) -> Handles<'_, T> {
        Handles { inner: self.iter() }
    }

    /// Removes all elements. Handles obtained before the call are invalidated.
    pub fn clear(&mut self) {
        self.free = None;

        // Chain the vacant slots in reverse so that the slots are reused from
        // the front.
        for (slot, entry) in self.entries.iter_mut().enumerate().rev() {
            if let Slot::Occupied { .. } = entry.slot {
                entry.generation = entry.generation.wrapping_add(1);
            }

            entry.slot = Slot::Vacant {
                next_free: self.free,
            };
            self.free = Some(slot);
        }

        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn next_mut(&mut self, slot: usize) -> &mut Option<usize> {
        match &mut self.entries[slot].slot {
            Slot::Occupied { next, .. } => next,
            Slot::Vacant { .. } => unreachable!("linked slot is vacant"),
        }
    }

    fn prev_mut(&mut self, slot: usize) -> &mut Option<usize> {
        match &mut self.entries[slot].slot {
            Slot::Occupied { prev, .. } => prev,
            Slot::Vacant { .. } => unreachable!("linked slot is vacant"),
        }
    }
}

impl<T> Default for HandleList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a HandleList<T> {
    type Item = (Handle, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    entries: &'a [Entry<T>],
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let entry = &self.entries[slot];

        match &entry.slot {
            Slot::Occupied { value, next, .. } => {
                self.next = *next;
                self.remaining -= 1;
                Some((Handle::new(slot, entry.generation), value))
            }
            Slot::Vacant { .. } => unreachable!("linked slot is vacant"),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

pub struct Handles<'a, T> {
    inner: Iter<'a, T>,
}

impl<T> Iterator for Handles<'_, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(handle, _)| handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Handles<'_, T> {}

impl<T> FusedIterator for Handles<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Clone>(list: &HandleList<T>) -> Vec<T> {
        list.iter().map(|(_, value)| value.clone()).collect()
    }

    #[test]
    fn push_and_iterate_in_order() {
        let mut list = HandleList::new();
        assert!(list.is_empty());

        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec!['a', 'b', 'c']);
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(list.iter().len(), 3);
    }

    #[test]
    fn remove_head_middle_tail() {
        let mut list = HandleList::new();

        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);
        let d = list.push_back(4);

        assert_eq!(list.remove(&b), Some(2));
        assert_eq!(values(&list), vec![1, 3, 4]);

        assert_eq!(list.remove(&a), Some(1));
        assert_eq!(values(&list), vec![3, 4]);
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![c, d]);

        assert_eq!(list.remove(&d), Some(4));
        assert_eq!(values(&list), vec![3]);
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![c]);

        assert_eq!(list.remove(&c), Some(3));
        assert!(list.is_empty());
        assert_eq!(list.handles().next(), None);

        let e = list.push_back(5);
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![e]);
    }

    #[test]
    fn removed_handle_is_invalidated() {
        let mut list = HandleList::new();

        let a = list.push_back("a");
        assert_eq!(list.remove(&a), Some("a"));
        assert_eq!(list.remove(&a), None);
        assert_eq!(list.get(&a), None);

        // The slot is reused, but the old handle still does not resolve.
        let b = list.push_back("b");
        assert_eq!(b.slot(), a.slot());
        assert_ne!(b, a);
        assert_eq!(list.get(&a), None);
        assert_eq!(list.get(&b), Some(&"b"));
        assert_eq!(list.slot_bound(), 1);
    }

    #[test]
    fn get_mut_modifies_in_place() {
        let mut list = HandleList::new();

        let a = list.push_back(String::from("x"));
        list.get_mut(&a).unwrap().push('y');

        assert_eq!(list.get(&a).map(String::as_str), Some("xy"));
    }

    #[test]
    fn append_after_removals_keeps_order() {
        let mut list = HandleList::new();

        let handles = (0..5).map(|i| list.push_back(i)).collect::<Vec<_>>();
        list.remove(&handles[1]);
        list.remove(&handles[3]);

        list.push_back(5);
        list.push_back(6);

        assert_eq!(values(&list), vec![0, 2, 4, 5, 6]);
        assert_eq!(list.slot_bound(), 5);
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut list = HandleList::new();

        let a = list.push_back(1);
        list.push_back(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.get(&a), None);

        let b = list.push_back(3);
        assert_eq!(b.slot(), 0);
        assert_eq!(list.get(&a), None);
        assert_eq!(values(&list), vec![3]);
    }
}
