/// Fixed-capacity ring buffer that overwrites its oldest element when full.
///
/// Inserting never blocks and never allocates after construction; a full
/// queue trades the oldest unread element for the new one. `pop` yields
/// elements oldest first.
#[derive(Debug, Clone)]
pub struct CircularEventQueue<T, const N: usize> {
    slots: [Option<T>; N],
    write_index: usize,
    read_index: usize,
    count: usize,
}

impl<T, const N: usize> CircularEventQueue<T, N> {
    /// Creates an empty queue. `N` must be non-zero.
    pub fn new() -> Self {
        const { assert!(N > 0, "CircularEventQueue capacity must be non-zero") };

        Self {
            slots: std::array::from_fn(|_| None),
            write_index: 0,
            read_index: 0,
            count: 0,
        }
    }

    /// Inserts `value`, returning the element it displaced when the queue was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.count == N {
            // Full: write slot and read slot coincide, so the oldest goes.
            self.read_index = (self.read_index + 1) % N;
            self.slots[self.write_index].take()
        } else {
            self.count += 1;
            None
        };

        self.slots[self.write_index] = Some(value);
        self.write_index = (self.write_index + 1) % N;

        evicted
    }

    /// Removes and returns the oldest element, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let value = self.slots[self.read_index].take();
        self.read_index = (self.read_index + 1) % N;
        self.count -= 1;
        value
    }

    /// Returns the oldest element without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.count == 0 {
            return None;
        }
        self.slots[self.read_index].as_ref()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drops every stored element.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.write_index = 0;
        self.read_index = 0;
        self.count = 0;
    }

    /// Iterates over stored elements, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.count).filter_map(move |i| self.slots[(self.read_index + i) % N].as_ref())
    }

    /// Removes every element, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        std::iter::from_fn(move || self.pop())
    }
}

impl<T, const N: usize> Default for CircularEventQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<const N: usize>(q: &CircularEventQueue<i32, N>) -> Vec<i32> {
        q.iter().copied().collect()
    }

    // ── push / pop ────────────────────────────────────────────────────────

    #[test]
    fn pop_empty_is_none() {
        let mut q: CircularEventQueue<i32, 3> = CircularEventQueue::new();
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn pops_in_insertion_order() {
        let mut q: CircularEventQueue<i32, 4> = CircularEventQueue::new();
        q.push(1);
        q.push(2);
        q.push(3);
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.pop(), None);
    }

    // ── overflow ──────────────────────────────────────────────────────────

    #[test]
    fn overflow_overwrites_oldest() {
        let mut q: CircularEventQueue<i32, 3> = CircularEventQueue::new();
        for v in [1, 2, 3] {
            assert_eq!(q.push(v), None);
        }
        assert_eq!(q.push(4), Some(1));

        assert_eq!(q.len(), 3);
        assert!(q.is_full());
        assert_eq!(contents(&q), vec![2, 3, 4]);
    }

    #[test]
    fn overflow_then_drain_keeps_order() {
        let mut q: CircularEventQueue<i32, 3> = CircularEventQueue::new();
        for v in 1..=7 {
            q.push(v);
        }
        assert_eq!(q.drain().collect::<Vec<_>>(), vec![5, 6, 7]);
        assert!(q.is_empty());
    }

    #[test]
    fn wraps_after_interleaved_pops() {
        let mut q: CircularEventQueue<i32, 3> = CircularEventQueue::new();
        q.push(1);
        q.push(2);
        assert_eq!(q.pop(), Some(1));
        q.push(3);
        q.push(4);
        assert_eq!(q.peek(), Some(&2));
        assert_eq!(contents(&q), vec![2, 3, 4]);

        q.push(5);
        assert_eq!(contents(&q), vec![3, 4, 5]);
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn clear_resets_state() {
        let mut q: CircularEventQueue<i32, 2> = CircularEventQueue::new();
        q.push(1);
        q.push(2);
        q.push(3);
        q.clear();
        assert!(q.is_empty());
        q.push(9);
        assert_eq!(contents(&q), vec![9]);
        assert_eq!(q.capacity(), 2);
    }
}
