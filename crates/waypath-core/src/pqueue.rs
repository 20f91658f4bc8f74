use tracing::debug;

use crate::error::QueueError;

/// Smallest capacity the backing arrays shrink to.
pub const MIN_CAPACITY: usize = 4;

const VACANT: usize = usize::MAX;

/// Stable reference to an element of a [`PriorityQueue`].
///
/// A handle stays valid while its element is in the queue, however often the
/// element moves inside the heap. Once the element is popped (or the queue is
/// cleared) the handle is rejected, even if its slot is later reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    generation: u32,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    index: usize,
    generation: u32,
}

/// Array-backed binary min-heap of payloads ordered by priority.
///
/// Priorities, payloads and the slot owning each heap entry live in parallel
/// arrays. For every index `i`, `priorities[i] <= priorities[2i + 1]` and
/// `priorities[i] <= priorities[2i + 2]` where those children exist.
///
/// Capacity is managed explicitly: the arrays double when full and halve once
/// fewer than a quarter of the slots are in use, never going below
/// [`MIN_CAPACITY`].
#[derive(Clone, Debug)]
pub struct PriorityQueue<P, T> {
    priorities: Vec<P>,
    payloads: Vec<T>,
    owners: Vec<usize>,
    capacity: usize,
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl<P, T> Default for PriorityQueue<P, T> {
    fn default() -> Self {
        PriorityQueue {
            priorities: vec![],
            payloads: vec![],
            owners: vec![],
            capacity: 0,
            slots: vec![],
            free: vec![],
        }
    }
}

impl<P: PartialOrd + Copy, T> PriorityQueue<P, T> {
    /// Create an empty queue. No memory is allocated until the first push.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue able to hold `capacity` elements before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut queue = Self::new();
        if capacity > 0 {
            queue.resize_storage(capacity.max(MIN_CAPACITY));
        }
        queue
    }

    /// Build a queue from arbitrary `(priority, payload)` pairs in O(n).
    pub fn from_pairs(pairs: impl IntoIterator<Item = (P, T)>) -> Self {
        let mut queue = Self::new();
        queue.bulk_push(pairs);
        queue
    }

    /// Number of elements in the queue.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.priorities.len()
    }

    /// Whether the queue holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty()
    }

    /// Number of elements the backing arrays hold before they need to grow.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert `payload` with `priority` and return a handle to it.
    pub fn push(&mut self, priority: P, payload: T) -> Handle {
        if self.len() == self.capacity {
            self.grow();
        }
        let index = self.len();
        let handle = self.allocate_slot(index);
        self.priorities.push(priority);
        self.payloads.push(payload);
        self.owners.push(handle.slot);
        self.sift_up(index);
        handle
    }

    /// Insert many pairs at once, restoring the heap order a single time
    /// afterwards. Handles are returned in input order.
    pub fn bulk_push(&mut self, pairs: impl IntoIterator<Item = (P, T)>) -> Vec<Handle> {
        let pairs = pairs.into_iter();
        let mut handles = Vec::with_capacity(pairs.size_hint().0);
        for (priority, payload) in pairs {
            if self.len() == self.capacity {
                self.grow();
            }
            let handle = self.allocate_slot(self.len());
            self.priorities.push(priority);
            self.payloads.push(payload);
            self.owners.push(handle.slot);
            handles.push(handle);
        }
        self.heapify();
        handles
    }

    /// Remove and return the payload with the smallest priority.
    ///
    /// Among equal priorities the choice is arbitrary. Returns `None` if the
    /// queue is empty.
    pub fn pop_min(&mut self) -> Option<T> {
        self.pop_min_entry().map(|(_, payload)| payload)
    }

    /// Remove and return the smallest priority together with its payload.
    pub fn pop_min_entry(&mut self) -> Option<(P, T)> {
        let last = self.len().checked_sub(1)?;
        self.swap(0, last);
        let (Some(priority), Some(payload), Some(slot)) =
            (self.priorities.pop(), self.payloads.pop(), self.owners.pop())
        else {
            return None;
        };
        self.release_slot(slot);
        if !self.is_empty() {
            self.sift_down(0);
        }
        self.maybe_shrink();
        Some((priority, payload))
    }

    /// Like [`pop_min`](Self::pop_min), but an empty queue is an error.
    pub fn try_pop_min(&mut self) -> Result<T, QueueError> {
        self.pop_min().ok_or(QueueError::Empty)
    }

    /// Return the payload with the smallest priority without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.payloads.first()
    }

    /// Return the smallest priority without removing it.
    pub fn peek_priority(&self) -> Option<P> {
        self.priorities.first().copied()
    }

    /// Like [`peek`](Self::peek), but an empty queue is an error.
    pub fn try_peek(&self) -> Result<&T, QueueError> {
        self.peek().ok_or(QueueError::Empty)
    }

    /// Whether `handle` addresses an element of this queue.
    pub fn contains(&self, handle: Handle) -> bool {
        self.locate(handle).is_some()
    }

    /// Current priority of the element behind `handle`.
    pub fn priority(&self, handle: Handle) -> Option<P> {
        self.locate(handle).map(|index| self.priorities[index])
    }

    /// Payload of the element behind `handle`.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.locate(handle).map(|index| &self.payloads[index])
    }

    /// Replace the priority of the element behind `handle`.
    ///
    /// The new priority is always stored. The element then moves towards the
    /// root if its priority decreased, or towards the leaves if it increased.
    pub fn update_priority(&mut self, handle: Handle, priority: P) -> Result<(), QueueError> {
        let index = self.locate(handle).ok_or(QueueError::StaleHandle)?;
        let old = std::mem::replace(&mut self.priorities[index], priority);
        if priority < old {
            self.sift_up(index);
        } else if priority > old {
            self.sift_down(index);
        }
        Ok(())
    }

    /// Restore the heap order over the whole array in O(n).
    ///
    /// Sinks every non-leaf node, from the last one back to the root. Leaves a
    /// queue that is already ordered unchanged.
    pub fn heapify(&mut self) {
        for index in (0..self.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    /// Remove every element, invalidating all outstanding handles. The
    /// capacity is kept.
    pub fn clear(&mut self) {
        for slot in std::mem::take(&mut self.owners) {
            self.release_slot(slot);
        }
        self.priorities.clear();
        self.payloads.clear();
        self.owners.reserve_exact(self.capacity);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.priorities[parent] > self.priorities[index] {
                self.swap(parent, index);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.len();
        loop {
            let left = index * 2 + 1;
            if left >= len {
                break;
            }
            // A missing right child is never a candidate.
            let right = left + 1;
            let child = if right < len && self.priorities[right] < self.priorities[left] {
                right
            } else {
                left
            };
            if self.priorities[child] < self.priorities[index] {
                self.swap(index, child);
                index = child;
            } else {
                break;
            }
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.priorities.swap(a, b);
        self.payloads.swap(a, b);
        self.owners.swap(a, b);
        self.slots[self.owners[a]].index = a;
        self.slots[self.owners[b]].index = b;
    }

    fn allocate_slot(&mut self, index: usize) -> Handle {
        match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot];
                entry.index = index;
                Handle {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                let slot = self.slots.len();
                self.slots.push(Slot {
                    index,
                    generation: 0,
                });
                Handle {
                    slot,
                    generation: 0,
                }
            }
        }
    }

    fn release_slot(&mut self, slot: usize) {
        let entry = &mut self.slots[slot];
        entry.index = VACANT;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
    }

    fn locate(&self, handle: Handle) -> Option<usize> {
        let slot = self.slots.get(handle.slot)?;
        (slot.generation == handle.generation && slot.index != VACANT).then_some(slot.index)
    }

    fn grow(&mut self) {
        let capacity = (self.capacity * 2).max(MIN_CAPACITY);
        debug!(from = self.capacity, to = capacity, "growing priority queue");
        self.resize_storage(capacity);
    }

    fn maybe_shrink(&mut self) {
        if self.capacity > MIN_CAPACITY && self.len() < self.capacity / 4 {
            let capacity = (self.capacity / 2).max(MIN_CAPACITY);
            debug!(from = self.capacity, to = capacity, "shrinking priority queue");
            self.resize_storage(capacity);
        }
    }

    fn resize_storage(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len());
        if capacity > self.capacity {
            let additional = capacity - self.len();
            self.priorities.reserve_exact(additional);
            self.payloads.reserve_exact(additional);
            self.owners.reserve_exact(additional);
        } else {
            self.priorities.shrink_to(capacity);
            self.payloads.shrink_to(capacity);
            self.owners.shrink_to(capacity);
        }
        self.capacity = capacity;
    }
}

impl<P: PartialOrd + Copy, T> FromIterator<(P, T)> for PriorityQueue<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<P: PartialOrd + Copy, T> Extend<(P, T)> for PriorityQueue<P, T> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        self.bulk_push(iter);
    }
}
