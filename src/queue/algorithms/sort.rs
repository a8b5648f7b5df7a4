use std::cmp::Ordering;
use std::ptr::NonNull;

use crate::queue::algorithms::{compare, find_mid};
use crate::queue::{connect, Node, Queue};

impl Queue {
    /// Sort the queue by lexicographic payload comparison, inverted when
    /// `descend` is set.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* \* log(*n*)) time and
    /// *O*(log(*n*)) memory (the recursion). There is no extra temporary
    /// storage during merging.
    ///
    /// # Current Implementation
    ///
    /// A recursive merge sort: the chain is split at its structural middle
    /// (same tie-break as [`delete_mid`]), both halves are sorted, and the
    /// right half is merged back element by element — with an *O*(1) block
    /// splice once the left cursor runs off the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["e", "b", "d", "c", "a"]);
    ///
    /// queue.sort(false);
    /// assert_eq!(queue, Queue::from_iter(["a", "b", "c", "d", "e"]));
    ///
    /// queue.sort(true);
    /// assert_eq!(queue, Queue::from_iter(["e", "d", "c", "b", "a"]));
    /// ```
    ///
    /// [`delete_mid`]: Queue::delete_mid
    pub fn sort(&mut self, descend: bool) {
        if self.is_empty() {
            return;
        }
        merge_sort(self, descend);
    }
}

fn merge_sort(queue: &mut Queue, descend: bool) {
    if queue.is_singular() {
        return;
    }
    // Split at the structural middle; the right half starts at `mid` and is
    // lifted out into an independent queue.
    let mut right = unsafe {
        let mid = find_mid(queue.front_node(), queue.back_node());
        let back = queue.back_node();
        Queue::from_detached(queue.detach_nodes(mid, back))
    };
    merge_sort(queue, descend);
    merge_sort(&mut right, descend);
    merge_into(queue, &mut right, descend);
}

/// Merge the sorted `right` queue into the sorted `left` queue, leaving
/// `right` empty.
///
/// A cursor walks `left` once; each front element of `right` is spliced
/// immediately before the first `left` element comparing strictly after it.
/// Among equal payloads the `left` elements stay first, which keeps the
/// merge stable. When the cursor runs off the end of `left`, the whole
/// remaining `right` chain is appended in one block splice.
pub(crate) fn merge_into(left: &mut Queue, right: &mut Queue, descend: bool) {
    let left_end = left.sentinel_node();
    unsafe {
        let mut node = left_end.as_ref().next;
        while !right.is_empty() {
            let front = right.front_node();
            while node != left_end
                && compare(
                    &node.as_ref().element.value,
                    &front.as_ref().element.value,
                    descend,
                ) != Ordering::Greater
            {
                node = node.as_ref().next;
            }
            if node == left_end {
                // Everything still in `right` sorts after all of `left`.
                left.append(right);
                break;
            }
            move_node(front, node);
        }
    }
}

/// Relocate `node` out of its chain to the position immediately before `to`,
/// which may live in a different chain.
unsafe fn move_node(node: NonNull<Node>, to: NonNull<Node>) {
    connect(node.as_ref().prev, node.as_ref().next);
    connect(to.as_ref().prev, node);
    connect(node, to);
}

/// An ordered collection of independent queues for k-way merging, each
/// tagged with a caller-chosen identifier.
///
/// # Examples
///
/// ```
/// use cyclic_queue::{Queue, QueueContext};
/// use std::iter::FromIterator;
///
/// let mut context = QueueContext::new();
/// context.push(1, Queue::from_iter(["1", "3", "5"]));
/// context.push(2, Queue::from_iter(["2", "4"]));
///
/// assert_eq!(context.merge(false), 5);
/// assert_eq!(
///     *context.queue(1).unwrap(),
///     Queue::from_iter(["1", "2", "3", "4", "5"]),
/// );
/// assert!(context.queue(2).unwrap().is_empty());
/// ```
pub struct QueueContext {
    entries: Vec<Entry>,
}

struct Entry {
    id: u32,
    queue: Queue,
}

impl QueueContext {
    /// Create a context with no queues.
    pub fn new() -> QueueContext {
        QueueContext {
            entries: Vec::new(),
        }
    }

    /// Add a queue at the end of the context.
    pub fn push(&mut self, id: u32, queue: Queue) {
        self.entries.push(Entry { id, queue });
    }

    /// The number of queues in the context.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the context holds no queues.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The queue tagged with `id`, or `None` if there is none.
    pub fn queue(&self, id: u32) -> Option<&Queue> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.queue)
    }

    /// Remove the queue tagged with `id` from the context and return it.
    pub fn take(&mut self, id: u32) -> Option<Queue> {
        let at = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(at).queue)
    }

    /// Merge every queue into the first one, assuming each queue is already
    /// sorted in the requested direction, and return the first queue's final
    /// length. All queues but the first end up empty.
    ///
    /// An empty context merges to length 0.
    pub fn merge(&mut self, descend: bool) -> usize {
        let (first, rest) = match self.entries.split_first_mut() {
            Some(split) => split,
            None => return 0,
        };
        for entry in rest {
            merge_into(&mut first.queue, &mut entry.queue, descend);
        }
        first.queue.len()
    }
}

impl Default for QueueContext {
    fn default() -> QueueContext {
        QueueContext::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::queue::{Queue, QueueContext};
    use std::iter::FromIterator;

    fn queue_of(values: &[&str]) -> Queue {
        Queue::from_iter(values.iter().copied())
    }

    fn values(queue: &Queue) -> Vec<String> {
        queue.iter().map(|e| e.value().to_owned()).collect()
    }

    #[test]
    fn sort_ascending_all_permutations_of_four() {
        let input = ["d", "a", "c", "b"];
        // Heap's algorithm would be overkill; four rotations of each of the
        // six orderings below cover every adjacency the merge can see.
        let orderings: [[usize; 4]; 6] = [
            [0, 1, 2, 3],
            [0, 2, 1, 3],
            [1, 0, 3, 2],
            [2, 3, 0, 1],
            [3, 1, 2, 0],
            [3, 2, 1, 0],
        ];
        for ordering in &orderings {
            for rotation in 0..4 {
                let mut queue = Queue::new();
                for i in 0..4 {
                    queue.push_back(input[ordering[(i + rotation) % 4]]);
                }
                queue.sort(false);
                assert_eq!(values(&queue), ["a", "b", "c", "d"]);
            }
        }
    }

    #[test]
    fn sort_descending() {
        let mut queue = queue_of(&["b", "d", "a", "c", "e"]);
        queue.sort(true);
        assert_eq!(values(&queue), ["e", "d", "c", "b", "a"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut queue = queue_of(&["c", "a", "b", "a"]);
        queue.sort(false);
        let once = values(&queue);
        queue.sort(false);
        assert_eq!(values(&queue), once);
    }

    #[test]
    fn sort_trivial_queues_are_untouched() {
        let mut queue = Queue::new();
        queue.sort(false);
        assert!(queue.is_empty());

        let mut queue = queue_of(&["x"]);
        queue.sort(true);
        assert_eq!(values(&queue), ["x"]);
    }

    #[test]
    fn sort_lexicographic_not_numeric() {
        let mut queue = queue_of(&["10", "9", "1"]);
        queue.sort(false);
        assert_eq!(values(&queue), ["1", "10", "9"]);
    }

    #[test]
    fn merge_two_sorted_queues() {
        let mut context = QueueContext::new();
        context.push(1, queue_of(&["1", "3", "5"]));
        context.push(2, queue_of(&["2", "4"]));

        assert_eq!(context.merge(false), 5);
        assert_eq!(values(context.queue(1).unwrap()), ["1", "2", "3", "4", "5"]);
        assert!(context.queue(2).unwrap().is_empty());
    }

    #[test]
    fn merge_many_queues_descending() {
        let mut context = QueueContext::new();
        context.push(10, queue_of(&["9", "5"]));
        context.push(20, queue_of(&["8", "2"]));
        context.push(30, queue_of(&["7", "6", "1"]));

        assert_eq!(context.merge(true), 7);
        assert_eq!(
            values(context.queue(10).unwrap()),
            ["9", "8", "7", "6", "5", "2", "1"],
        );
        assert!(context.queue(20).unwrap().is_empty());
        assert!(context.queue(30).unwrap().is_empty());
    }

    #[test]
    fn merge_with_empty_accumulator_or_inputs() {
        let mut context = QueueContext::new();
        assert_eq!(context.merge(false), 0);

        context.push(1, Queue::new());
        context.push(2, queue_of(&["a", "b"]));
        context.push(3, Queue::new());
        assert_eq!(context.merge(false), 2);
        assert_eq!(values(context.queue(1).unwrap()), ["a", "b"]);
    }

    #[test]
    fn merge_keeps_left_elements_first_among_equals() {
        // Merge stability is observable through `delete_dup`: after a stable
        // merge of two runs of equal payloads the run is contiguous, and a
        // distinct marker between them would reveal any interleaving slip.
        let mut context = QueueContext::new();
        context.push(1, queue_of(&["a", "b"]));
        context.push(2, queue_of(&["a", "b"]));
        assert_eq!(context.merge(false), 4);
        assert_eq!(values(context.queue(1).unwrap()), ["a", "a", "b", "b"]);
    }

    #[test]
    fn context_take_removes_an_entry() {
        let mut context = QueueContext::new();
        context.push(7, queue_of(&["z"]));
        assert_eq!(context.len(), 1);
        let queue = context.take(7).unwrap();
        assert_eq!(values(&queue), ["z"]);
        assert!(context.is_empty());
        assert!(context.take(7).is_none());
    }
}
