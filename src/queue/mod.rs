use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

use crate::queue::cursor::{Cursor, CursorMut};
use crate::Iter;

pub mod cursor;
pub mod iterator;

mod algorithms;

pub use self::algorithms::QueueContext;

/// The `Queue` is a queue of owned string elements, implemented as a cyclic
/// doubly-linked list rooted at a sentinel node.
///
/// Insertion and removal at either end take *O*(1) time, and the bulk
/// transforms ([`reverse`], [`reverse_k`], [`swap_pairs`], [`sort`], ...)
/// rework the chain in place with *O*(1) auxiliary space, by relinking nodes
/// instead of moving payloads.
///
/// The sentinel never carries data and is never unlinked; an empty queue is
/// exactly the sentinel pointing at itself in both directions.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed run of queue nodes, both inclusive;
/// - `start..end`: a half-open run of queue nodes, left inclusive and right
///   exclusive (probably the sentinel).
///
/// [`reverse`]: Queue::reverse
/// [`reverse_k`]: Queue::reverse_k
/// [`swap_pairs`]: Queue::swap_pairs
/// [`sort`]: Queue::sort
pub struct Queue {
    head: Box<Sentinel>,
}

/// An element of a [`Queue`], owning a single heap string payload.
///
/// Elements are created by the insert operations and handed back, already
/// unlinked, by the remove operations. An element is never linked into two
/// queues at once.
pub struct Element {
    pub(crate) value: String,
}

#[repr(C)]
pub(crate) struct Node {
    pub(crate) next: NonNull<Node>,
    pub(crate) prev: NonNull<Node>,
    pub(crate) element: Element,
}

/// The sentinel shares the link prefix of [`Node`] (`repr(C)`, links first)
/// but carries no payload. It is cast to `NonNull<Node>` for link surgery;
/// its element field is never read, which every access guards by a sentinel
/// check.
#[repr(C)]
struct Sentinel {
    next: NonNull<Node>,
    prev: NonNull<Node>,
}

/// Nodes detached from a queue as a contiguous run, used in splitting and
/// splicing.
///
/// While detached, reading of `front.prev` and `back.next` is invalid.
pub(crate) struct DetachedNodes {
    pub(crate) front: NonNull<Node>,
    pub(crate) back: NonNull<Node>,
}

impl Element {
    pub(crate) fn new(value: String) -> Element {
        Element { value }
    }

    /// Duplicate `s` into a fresh element, or return `None` when the string
    /// allocation fails. On failure nothing has been created, so there is
    /// nothing to unlink or leak.
    pub(crate) fn create(s: &str) -> Option<Element> {
        let mut value = String::new();
        value.try_reserve_exact(s.len()).ok()?;
        value.push_str(s);
        Some(Element { value })
    }

    /// The string payload.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume the element and return its payload.
    pub fn into_value(self) -> String {
        self.value
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.value, f)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Element {}

impl PartialEq<str> for Element {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Element {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

/// Make `prev` and `next` adjacent, overwriting their facing links.
pub(crate) unsafe fn connect(mut prev: NonNull<Node>, mut next: NonNull<Node>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

// private methods
impl Queue {
    pub(crate) fn sentinel_node(&self) -> NonNull<Node> {
        NonNull::from(self.head.as_ref()).cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node> {
        // SAFETY: `head.next` is always valid (either the sentinel itself, or
        // the first element of the cyclic chain).
        NonNull::from(unsafe { self.sentinel_node().as_ref().next.as_ref() })
    }
    pub(crate) fn back_node(&self) -> NonNull<Node> {
        // SAFETY: `head.prev` is always valid (either the sentinel itself, or
        // the last element of the cyclic chain).
        NonNull::from(unsafe { self.sentinel_node().as_ref().prev.as_ref() })
    }

    /// Detach a single node from the queue and return it as a box,
    /// reconnecting its former neighbors.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the
    /// queue, or whether `node` is the sentinel. Detaching a foreign node or
    /// the sentinel makes the queue ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node>) -> Box<Node> {
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        node
    }

    /// Attach a single detached node between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the queue, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node>,
        next: NonNull<Node>,
        node: NonNull<Node>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Detach the closed run `front..=back` from the queue as a block,
    /// reconnecting the neighbors around the gap.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a
    /// valid run (i.e. `front` must **not** be at the right of `back`), or
    /// whether it belongs to the queue.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node>,
        back: NonNull<Node>,
    ) -> DetachedNodes {
        connect(front.as_ref().prev, back.as_ref().next);
        DetachedNodes { front, back }
    }

    /// Attach a detached run between `prev` and `next` in one splice.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the queue, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node>,
        next: NonNull<Node>,
        detached: DetachedNodes,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, detached.front);
            assert_adjacent(detached.back, next);
        }
    }

    /// Detach every node from the queue, or return `None` if it is empty.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a valid
    /// run whenever the queue is non-empty.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node())) }
    }

    /// Construct a queue around a detached run.
    pub(crate) fn from_detached(detached: DetachedNodes) -> Queue {
        let mut queue = Queue::new();
        unsafe {
            queue.attach_nodes(queue.sentinel_node(), queue.sentinel_node(), detached);
        }
        queue
    }

    /// A queue with exactly one element.
    pub(crate) fn is_singular(&self) -> bool {
        !self.is_empty() && self.front_node() == self.back_node()
    }
}

impl Queue {
    /// Create an empty `Queue`.
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::Queue;
    /// let queue = Queue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Queue {
        Queue {
            head: new_sentinel(),
        }
    }

    /// Returns `true` if the `Queue` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.sentinel_node()
    }

    /// Returns the number of elements in the `Queue`, by traversal.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("gerbil");
    /// queue.push_back("hamster");
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes and releases every element of the `Queue`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides the front payload, or `None` if the queue is empty.
    #[inline]
    pub fn front(&self) -> Option<&str> {
        self.cursor_start().current().map(Element::value)
    }

    /// Provides the back payload, or `None` if the queue is empty.
    #[inline]
    pub fn back(&self) -> Option<&str> {
        self.cursor_end().previous().map(Element::value)
    }

    /// Duplicate `s` into a new element linked at the front of the queue.
    ///
    /// Returns `false` without mutating the queue when the element cannot
    /// be created.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert!(queue.push_front("world"));
    /// assert!(queue.push_front("hello"));
    /// assert_eq!(queue.front(), Some("hello"));
    /// ```
    pub fn push_front(&mut self, s: &str) -> bool {
        match Element::create(s) {
            Some(element) => {
                self.cursor_start_mut().insert(element);
                true
            }
            None => false,
        }
    }

    /// Duplicate `s` into a new element linked at the back of the queue.
    ///
    /// Returns `false` without mutating the queue when the element cannot
    /// be created.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, s: &str) -> bool {
        match Element::create(s) {
            Some(element) => {
                self.cursor_end_mut().insert(element);
                true
            }
            None => false,
        }
    }

    /// Unlink the front element and return it, or `None` if the queue is
    /// empty. Ownership of the now-isolated element passes to the caller.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("gerbil");
    /// assert_eq!(queue.pop_front().unwrap().value(), "gerbil");
    /// assert_eq!(queue.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        self.cursor_start_mut().remove()
    }

    /// Unlink the back element and return it, or `None` if the queue is
    /// empty. Ownership of the now-isolated element passes to the caller.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        self.cursor_end_mut().backspace()
    }

    /// Like [`pop_front`], additionally copying the payload into `buf`:
    /// at most `buf.len() - 1` bytes, followed by a NUL terminator.
    ///
    /// Passing a zero-length buffer is a caller contract violation; the
    /// copy-out is skipped and the element is still returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("hello");
    ///
    /// let mut buf = [0xffu8; 3];
    /// queue.pop_front_into(&mut buf);
    /// assert_eq!(&buf, b"he\0");
    /// ```
    ///
    /// [`pop_front`]: Queue::pop_front
    pub fn pop_front_into(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.pop_front()?;
        copy_out(&element, buf);
        Some(element)
    }

    /// Like [`pop_back`], additionally copying the payload into `buf`:
    /// at most `buf.len() - 1` bytes, followed by a NUL terminator.
    ///
    /// [`pop_back`]: Queue::pop_back
    pub fn pop_back_into(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.pop_back()?;
        copy_out(&element, buf);
        Some(element)
    }

    /// Provides a cursor at the front node.
    ///
    /// The cursor is pointing to the sentinel if the queue is empty.
    pub fn cursor_start(&self) -> Cursor<'_> {
        Cursor::new(self, self.front_node())
    }

    /// Provides a cursor at the sentinel node.
    pub fn cursor_end(&self) -> Cursor<'_> {
        Cursor::new(self, self.sentinel_node())
    }

    /// Provides a cursor with editing operations at the front node.
    ///
    /// The cursor is pointing to the sentinel if the queue is empty.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    /// Provides a cursor with editing operations at the sentinel node.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_> {
        let sentinel = self.sentinel_node();
        CursorMut::new(self, sentinel)
    }

    /// Provides a forward iterator over the elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let queue = Queue::from_iter(["a", "b", "c"]);
    /// let mut iter = queue.iter();
    /// assert_eq!(iter.next().unwrap().value(), "a");
    /// assert_eq!(iter.next_back().unwrap().value(), "c");
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Moves all elements from `other` to the end of this queue in one
    /// splice. After this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a"]);
    /// let mut other = Queue::from_iter(["b", "c"]);
    ///
    /// queue.append(&mut other);
    ///
    /// assert_eq!(queue, Queue::from_iter(["a", "b", "c"]));
    /// assert!(other.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Queue) {
        if let Some(detached) = other.detach_all_nodes() {
            // `self.back_node()` and `self.sentinel_node()` are valid nodes
            // of this queue and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.back_node(), self.sentinel_node(), detached) }
        }
    }
}

fn copy_out(element: &Element, buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }
    let n = element.value.len().min(buf.len() - 1);
    buf[..n].copy_from_slice(&element.value.as_bytes()[..n]);
    buf[n] = 0;
}

fn new_sentinel() -> Box<Sentinel> {
    let mut head = Box::new(Sentinel {
        next: NonNull::dangling(),
        prev: NonNull::dangling(),
    });
    // The links are initialized to the sentinel itself immediately after the
    // box exists, so the dangling placeholders are never read.
    let node = NonNull::from(head.as_ref()).cast();
    head.next = node;
    head.prev = node;
    head
}

#[cfg(debug_assertions)]
fn assert_adjacent(prev: NonNull<Node>, next: NonNull<Node>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl Node {
    /// Create a detached node with the given element. The links are dangling
    /// until the node is attached.
    pub(crate) fn new_detached(element: Element) -> NonNull<Node> {
        NonNull::from(Box::leak(Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        })))
    }

    pub(crate) fn into_element(self: Box<Self>) -> Element {
        self.element
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Queue {
        Queue::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
    }
}

// The queue exclusively owns its nodes; the raw links never alias another
// owner, so ownership transfer across threads is sound.
unsafe impl Send for Queue {}

unsafe impl Sync for Queue {}

#[cfg(test)]
mod tests {
    use crate::queue::Queue;
    use std::iter::FromIterator;

    fn values(queue: &Queue) -> Vec<String> {
        queue.iter().map(|e| e.value().to_owned()).collect()
    }

    #[test]
    fn queue_create() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        assert!(queue.push_back("1"));
        assert!(!queue.is_empty());
        assert_eq!(queue.pop_back().unwrap().value(), "1");
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_push_and_pop() {
        let mut queue = Queue::new();
        assert_eq!(queue.front(), None);
        assert_eq!(queue.back(), None);
        assert_eq!(queue.pop_front(), None);
        assert_eq!(queue.pop_back(), None);

        queue.push_back("1");
        assert_eq!(queue.back(), Some("1"));
        assert_eq!(queue.pop_front().unwrap().value(), "1");
        assert_eq!(queue.pop_back(), None);
        assert!(queue.is_empty());

        queue.push_front("1");
        queue.push_front("2");
        queue.push_back("3");
        assert_eq!(queue.front(), Some("2"));
        assert_eq!(queue.back(), Some("3"));
        assert_eq!(queue.pop_front().unwrap().value(), "2");
        assert_eq!(queue.pop_back().unwrap().value(), "3");
        assert_eq!(queue.pop_front().unwrap().value(), "1");
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_len_is_traversal_count() {
        let mut queue = Queue::new();
        assert_eq!(queue.len(), 0);
        for i in 0..5 {
            queue.push_back(&i.to_string());
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.iter().rev().count(), 5);
        queue.clear();
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn queue_pop_into_truncates() {
        let mut queue = Queue::new();
        queue.push_back("hello");
        queue.push_back("hi");

        let mut buf = [0xffu8; 3];
        let element = queue.pop_front_into(&mut buf).unwrap();
        assert_eq!(element.value(), "hello");
        assert_eq!(&buf, b"he\0");

        // A roomy buffer keeps everything after the terminator untouched.
        let mut buf = [0xffu8; 8];
        queue.pop_back_into(&mut buf).unwrap();
        assert_eq!(&buf[..3], b"hi\0");
        assert!(buf[3..].iter().all(|&b| b == 0xff));

        assert!(queue.pop_front_into(&mut buf).is_none());
    }

    #[test]
    fn queue_pop_into_empty_buffer_is_skipped() {
        let mut queue = Queue::new();
        queue.push_back("x");
        let element = queue.pop_front_into(&mut []).unwrap();
        assert_eq!(element.value(), "x");
    }

    #[test]
    fn queue_append_splices_whole_queue() {
        let mut queue = Queue::from_iter(["a", "b"]);
        let mut other = Queue::from_iter(["c", "d"]);
        queue.append(&mut other);
        assert_eq!(values(&queue), ["a", "b", "c", "d"]);
        assert!(other.is_empty());

        // Appending an empty queue is a no-op.
        queue.append(&mut other);
        assert_eq!(queue.len(), 4);

        // Appending onto an empty queue moves everything over.
        let mut empty = Queue::new();
        empty.append(&mut queue);
        assert_eq!(values(&empty), ["a", "b", "c", "d"]);
        assert!(queue.is_empty());
    }
}
