use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

use crate::queue::{Element, Node, Queue};

/// A cursor over a [`Queue`].
///
/// A `Cursor` is like an iterator, except that it can freely seek
/// back-and-forth. In a queue with length *n*, there are *n* + 1 valid
/// locations for the cursor: one at each element, and one at the sentinel.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
/// use std::iter::FromIterator;
///
/// let queue = Queue::from_iter(["a", "b", "c"]);
///
/// let mut cursor = queue.cursor_start();
/// assert_eq!(cursor.current().unwrap().value(), "a");
///
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current().unwrap().value(), "b");
///
/// let mut cursor = queue.cursor_end();
/// assert_eq!(cursor.current(), None); // the sentinel holds no element
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current().unwrap().value(), "c");
/// ```
#[derive(Clone)]
pub struct Cursor<'a> {
    pub(crate) current: NonNull<Node>,
    pub(crate) queue: &'a Queue,
}

/// A cursor over a [`Queue`] with editing operations.
///
/// A `CursorMut` can seek like a [`Cursor`] and can also safely mutate the
/// queue during traversal: the lifetime of its yielded references is tied to
/// its own lifetime, so it never yields multiple elements at once.
pub struct CursorMut<'a> {
    pub(crate) current: NonNull<Node>,
    pub(crate) queue: &'a mut Queue,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a> $CURSOR<'a> {
            pub(crate) fn is_sentinel(&self) -> bool {
                self.current == self.queue.sentinel_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.queue.sentinel_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Node> {
                // SAFETY: `current.next` is always valid since the chain is cyclic.
                unsafe { self.current.as_ref().next }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node> {
                // SAFETY: `current.prev` is always valid since the chain is cyclic.
                unsafe { self.current.as_ref().prev }
            }
        }

        impl<'a> $CURSOR<'a> {
            /// Returns `true` if the underlying queue is empty.
            pub fn is_empty(&self) -> bool {
                self.queue.is_empty()
            }

            /// Move the cursor to the next position, where passing through
            /// the sentinel is allowed.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                self.current = self.next_node();
            }

            /// Move the cursor to the previous position, where passing
            /// through the sentinel is allowed.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or return an error when
            /// it would pass through the sentinel.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_sentinel() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err("`move_next` across the sentinel boundary")
            }

            /// Move the cursor to the previous position, or return an error
            /// when it would pass through the sentinel.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err("`move_prev` across the sentinel boundary")
            }

            /// Return a reference to the element at the cursor, or `None` if
            /// it is located at the sentinel.
            pub fn current(&self) -> Option<&'a Element> {
                if self.is_sentinel() {
                    return None;
                }
                // SAFETY: non-sentinel nodes always hold a valid element.
                unsafe { Some(&self.current.as_ref().element) }
            }

            /// Return a reference to the element before the cursor, or `None`
            /// if it is located at the front node.
            pub fn previous(&self) -> Option<&'a Element> {
                if self.is_front_node() {
                    return None;
                }
                // SAFETY: the previous node of a non-front node is never the
                // sentinel, and non-sentinel nodes always hold a valid element.
                Some(unsafe { &self.prev_node().as_ref().element })
            }
        }

        impl<'a> Debug for $CURSOR<'a> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("queue", &self.queue)
                    .field("current", &self.current())
                    .finish()
            }
        }
    };
}

impl_cursor!(Cursor);
impl_cursor!(CursorMut);

impl<'a> Cursor<'a> {
    pub(crate) fn new(queue: &'a Queue, current: NonNull<Node>) -> Self {
        Self { current, queue }
    }
}

impl<'a> CursorMut<'a> {
    pub(crate) fn new(queue: &'a mut Queue, current: NonNull<Node>) -> Self {
        Self { current, queue }
    }

    /// Link a new element before the cursor position. The cursor stays put.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn insert(&mut self, element: Element) {
        let node = Node::new_detached(element);
        // SAFETY: `current.prev` and `current` are valid adjacent nodes of
        // the queue, so it is safe.
        unsafe { self.queue.attach_node(self.prev_node(), self.current, node) };
    }

    /// Unlink the element at the cursor and return it, or return `None` if
    /// the cursor is at the sentinel. After removal, the cursor is moved to
    /// the next node.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn remove(&mut self) -> Option<Element> {
        if self.is_sentinel() {
            return None;
        }
        // SAFETY: `current` is a valid non-sentinel node of the queue.
        let node = unsafe { self.queue.detach_node(self.current) };
        self.current = node.next;
        Some(Node::into_element(node))
    }

    /// Unlink the element before the cursor and return it, or return `None`
    /// if the cursor is at the front node. The cursor stays put.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn backspace(&mut self) -> Option<Element> {
        self.move_prev().ok().and_then(|_| self.remove())
    }
}

unsafe impl Send for Cursor<'_> {}

unsafe impl Sync for Cursor<'_> {}

unsafe impl Send for CursorMut<'_> {}

unsafe impl Sync for CursorMut<'_> {}

#[cfg(test)]
mod tests {
    use crate::queue::Queue;
    use std::iter::FromIterator;

    #[test]
    fn cursor_moves_stop_at_the_sentinel() {
        let queue = Queue::from_iter(["a", "b"]);
        let mut cursor = queue.cursor_start();
        assert!(cursor.move_prev().is_err());
        assert!(cursor.move_next().is_ok());
        assert!(cursor.move_next().is_ok());
        assert_eq!(cursor.current(), None);
        assert!(cursor.move_next().is_err());

        cursor.move_next_cyclic();
        assert_eq!(cursor.current().unwrap().value(), "a");
        cursor.move_prev_cyclic();
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn cursor_moves_on_empty_queue_stay_put() {
        let queue = Queue::new();
        let mut cursor = queue.cursor_start();
        cursor.move_next_cyclic();
        cursor.move_prev_cyclic();
        assert_eq!(cursor.current(), None);
        assert!(cursor.move_next().is_err());
        assert!(cursor.move_prev().is_err());
    }

    #[test]
    fn cursor_insert_and_remove() {
        let mut queue = Queue::from_iter(["b", "d"]);
        let mut cursor = queue.cursor_start_mut();

        cursor.insert(crate::queue::Element::new("a".to_owned()));
        assert_eq!(cursor.current().unwrap().value(), "b");

        assert_eq!(cursor.remove().unwrap().value(), "b");
        assert_eq!(cursor.current().unwrap().value(), "d");

        assert_eq!(cursor.backspace().unwrap().value(), "a");
        assert_eq!(cursor.current().unwrap().value(), "d");
        assert!(cursor.backspace().is_none());

        assert_eq!(queue, Queue::from_iter(["d"]));
    }
}
