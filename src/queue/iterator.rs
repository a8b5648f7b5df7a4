use std::fmt::{self, Formatter};
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::queue::{Element, Node, Queue};

/// An iterator over the elements of a [`Queue`].
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange of
/// the queue, where `start` is inclusive and `end` is not.
///
/// Though the `Iter` does not hold a reference to the queue, it *borrows*
/// (immutably) from it, so a phantom marker of `&'a Queue` is added to
/// protect the queue from being written.
#[derive(Clone)]
pub struct Iter<'a> {
    start: NonNull<Node>,
    end: NonNull<Node>,
    _marker: PhantomData<&'a Queue>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(queue: &'a Queue) -> Self {
        Self {
            start: queue.front_node(),
            end: queue.sentinel_node(),
            _marker: PhantomData,
        }
    }
}

impl<'a> fmt::Debug for Iter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        // SAFETY: `start..end` is always a valid range of a queue.
        let mut ptr = self.start;
        while ptr != self.end {
            let current = unsafe { ptr.as_ref() };
            f.field(&current.element);
            ptr = current.next;
        }
        f.finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is a valid, non-empty range of a queue here.
        let current = unsafe { self.start.as_ref() };
        self.start = current.next;
        Some(&current.element)
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is a valid, non-empty range of a queue here.
        self.end = unsafe { self.end.as_ref().prev };
        let current = unsafe { self.end.as_ref() };
        Some(&current.element)
    }
}

impl<'a> FusedIterator for Iter<'a> {}

/// An owning iterator over the elements of a [`Queue`].
///
/// This `struct` is created by the [`into_iter`] method on [`Queue`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: Queue::into_iter
pub struct IntoIter {
    queue: Queue,
}

impl fmt::Debug for IntoIter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("queue", &self.queue).finish()
    }
}

impl Iterator for IntoIter {
    type Item = Element;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.queue.pop_back()
    }
}

impl FusedIterator for IntoIter {}

impl IntoIterator for Queue {
    type Item = Element;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a Element;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl FromIterator<String> for Queue {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<'a> Extend<&'a str> for Queue {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        iter.into_iter()
            .for_each(|s| self.cursor_end_mut().insert(Element::new(s.to_owned())));
    }
}

impl Extend<String> for Queue {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        iter.into_iter()
            .for_each(|value| self.cursor_end_mut().insert(Element::new(value)));
    }
}

#[cfg(test)]
mod tests {
    use crate::queue::Queue;
    use std::iter::FromIterator;

    #[test]
    fn iter_forward_and_backward() {
        let input = ["a", "b", "c", "d"];
        let queue = Queue::from_iter(input);

        let forward: Vec<&str> = queue.iter().map(|e| e.value()).collect();
        assert_eq!(forward, input);

        let backward: Vec<&str> = queue.iter().rev().map(|e| e.value()).collect();
        assert_eq!(backward, ["d", "c", "b", "a"]);

        let mut iter = queue.iter();
        assert_eq!(iter.next().unwrap().value(), "a");
        assert_eq!(iter.next_back().unwrap().value(), "d");
        assert_eq!(iter.next().unwrap().value(), "b");
        assert_eq!(iter.next_back().unwrap().value(), "c");
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None); // fused
    }

    #[test]
    fn iter_on_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.iter().next(), None);
        assert_eq!(queue.iter().next_back(), None);
    }

    #[test]
    fn into_iter_drains_in_order() {
        let queue = Queue::from_iter(["x", "y", "z"]);
        let drained: Vec<String> = queue.into_iter().map(|e| e.into_value()).collect();
        assert_eq!(drained, ["x", "y", "z"]);
    }

    #[test]
    fn extend_owned_strings() {
        let mut queue = Queue::new();
        queue.extend((0..3).map(|i| i.to_string()));
        assert_eq!(queue, Queue::from_iter(["0", "1", "2"]));
    }
}
