use std::cmp::Ordering;
use std::ptr::NonNull;

use crate::queue::{connect, Node, Queue};

mod sort;

pub use self::sort::QueueContext;

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl Eq for Queue {}

impl Queue {
    /// Returns `true` if the `Queue` contains an element with the given
    /// payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let queue = Queue::from_iter(["a", "b"]);
    /// assert!(queue.contains("b"));
    /// assert!(!queue.contains("c"));
    /// ```
    pub fn contains(&self, value: &str) -> bool {
        self.iter().any(|e| e.value() == value)
    }

    /// Reverse the whole chain in place.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    /// queue.reverse();
    /// assert_eq!(queue, Queue::from_iter(["c", "b", "a"]));
    /// ```
    pub fn reverse(&mut self) {
        if self.is_empty() {
            return;
        }
        // SAFETY: `front..=back` is a valid run whenever the queue is
        // non-empty.
        unsafe { reverse_run(self.front_node(), self.back_node()) };
    }

    /// Reverse every contiguous run of exactly `k` elements, left to right.
    /// A trailing run shorter than `k` is left in its original order, and
    /// `k <= 1` is a no-op.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// queue.reverse_k(3);
    /// assert_eq!(queue, Queue::from_iter(["c", "b", "a", "d", "e"]));
    /// ```
    pub fn reverse_k(&mut self, k: usize) {
        if self.is_empty() || k <= 1 {
            return;
        }
        let sentinel = self.sentinel_node();
        unsafe {
            let mut next_group = sentinel.as_ref().next;
            loop {
                let front = next_group;
                // Find the start of the next group; fewer than `k` elements
                // left means the partial tail stays untouched.
                for _ in 0..k {
                    if next_group == sentinel {
                        return;
                    }
                    next_group = next_group.as_ref().next;
                }
                reverse_run(front, next_group.as_ref().prev);
            }
        }
    }

    /// Swap each adjacent pair of elements in place, left to right; with an
    /// odd element count the final element stays put.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// queue.swap_pairs();
    /// assert_eq!(queue, Queue::from_iter(["b", "a", "d", "c", "e"]));
    /// ```
    pub fn swap_pairs(&mut self) {
        let sentinel = self.sentinel_node();
        unsafe {
            let mut node = sentinel.as_ref().next;
            while node != sentinel && node.as_ref().next != sentinel {
                let partner = node.as_ref().next;
                let rest = partner.as_ref().next;
                reverse_run(node, partner);
                node = rest;
            }
        }
    }

    /// Unlink and release the structural middle element; with an even
    /// element count the right-of-center element is the one removed.
    ///
    /// Returns `false` if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
    /// assert!(queue.delete_mid()); // "c": right of center
    /// assert_eq!(queue, Queue::from_iter(["a", "b", "d"]));
    /// ```
    pub fn delete_mid(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        unsafe {
            let mid = find_mid(self.front_node(), self.back_node());
            drop(self.detach_node(mid));
        }
        true
    }

    /// Release **every** member of each run of adjacent elements with equal
    /// payloads; no member of such a run survives. Elements are expected to
    /// be pre-grouped (e.g. sorted) by the caller; non-adjacent duplicates
    /// are not considered.
    ///
    /// Returns `false` if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "a", "b", "c", "c"]);
    /// assert!(queue.delete_dup());
    /// assert_eq!(queue, Queue::from_iter(["b"]));
    /// ```
    pub fn delete_dup(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let sentinel = self.sentinel_node();
        unsafe {
            let mut node = sentinel.as_ref().next;
            while node != sentinel {
                // `run_end` is the first node after the run of payloads equal
                // to `node`'s.
                let mut run_end = node.as_ref().next;
                while run_end != sentinel
                    && run_end.as_ref().element.value == node.as_ref().element.value
                {
                    run_end = run_end.as_ref().next;
                }
                if node.as_ref().next != run_end {
                    let mut curr = node;
                    while curr != run_end {
                        let follow = curr.as_ref().next;
                        drop(self.detach_node(curr));
                        curr = follow;
                    }
                }
                node = run_end;
            }
        }
        true
    }

    /// Release every element that has a strictly smaller payload somewhere
    /// to its right; the survivors are non-decreasing from left to right.
    /// Returns the surviving length.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["5", "3", "8", "1", "9"]);
    /// assert_eq!(queue.ascend(), 2);
    /// assert_eq!(queue, Queue::from_iter(["1", "9"]));
    /// ```
    pub fn ascend(&mut self) -> usize {
        self.remove_unordered(false)
    }

    /// Release every element that has a strictly greater payload somewhere
    /// to its right; the survivors are non-increasing from left to right.
    /// Returns the surviving length.
    pub fn descend(&mut self) -> usize {
        self.remove_unordered(true)
    }

    fn remove_unordered(&mut self, descend: bool) -> usize {
        if self.is_empty() {
            return 0;
        }
        if self.is_singular() {
            return 1;
        }
        let sentinel = self.sentinel_node();
        unsafe {
            let mut last = sentinel.as_ref().next;
            let mut curr = last;
            while curr != sentinel {
                // Walk back from `curr`, releasing every element it beats.
                while last != sentinel
                    && compare(
                        &curr.as_ref().element.value,
                        &last.as_ref().element.value,
                        descend,
                    ) == Ordering::Less
                {
                    let before = last.as_ref().prev;
                    drop(self.detach_node(last));
                    last = before;
                }
                last = curr;
                curr = curr.as_ref().next;
            }
        }
        self.len()
    }
}

/// Lexicographic payload comparison, inverted when `descend` is set.
pub(crate) fn compare(a: &str, b: &str, descend: bool) -> Ordering {
    if descend {
        b.cmp(a)
    } else {
        a.cmp(b)
    }
}

/// Reverse the closed run `front..=back` in place, and reconnect the
/// reversed run to the run's former neighbors.
///
/// It is unsafe because it does not check that `front..=back` is a valid run
/// of a well-formed chain.
pub(crate) unsafe fn reverse_run(front: NonNull<Node>, back: NonNull<Node>) {
    let before = front.as_ref().prev;
    let after = back.as_ref().next;
    let mut node = front;
    loop {
        // Swapping the link pair of every run member reverses all interior
        // links; the two boundary links are patched below.
        let next = node.as_ref().next;
        let prev = node.as_ref().prev;
        node.as_mut().next = prev;
        node.as_mut().prev = next;
        if node == back {
            break;
        }
        node = next;
    }
    connect(before, back);
    connect(front, after);
}

/// Two pointers converge inward one step at a time; with an even node count
/// the left pointer advances first, so its landing spot — the right-of-center
/// node — is the middle.
///
/// It is unsafe because `left..=right` must be a valid non-empty run.
pub(crate) unsafe fn find_mid(
    mut left: NonNull<Node>,
    mut right: NonNull<Node>,
) -> NonNull<Node> {
    while left != right {
        left = left.as_ref().next;
        if left == right {
            break;
        }
        right = right.as_ref().prev;
    }
    left
}
