//! This crate provides a queue of owned strings, implemented as a cyclic
//! doubly-linked list with a sentinel node.
//!
//! The [`Queue`] allows inserting and removing elements at both ends, and at
//! any cursor position, in constant time. In compromise, accessing elements
//! at any position, and counting them, take *O*(*n*) time.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter(["b", "c", "a"]);
//!
//! queue.push_front("d"); // becomes [d, b, c, a]
//! assert_eq!(queue.front(), Some("d"));
//!
//! queue.sort(false); // becomes [a, b, c, d]
//! assert_eq!(queue, Queue::from_iter(["a", "b", "c", "d"]));
//!
//! queue.delete_mid(); // removes "c" (the right of the two middles)
//! assert_eq!(queue, Queue::from_iter(["a", "b", "d"]));
//!
//! assert_eq!(queue.pop_back().unwrap().into_value(), "d");
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the queue is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────┐
//!          ↓                                                     Sentinel    │
//!    ╔═══════════╗           ╔═══════════╗                    ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ───→ ┄┄ ────────→  │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢   Node 2, 3, ...   ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←─── ┄┄ ←────────  │   prev    │
//! │  ╟───────────╢           ╟───────────╢                    ├───────────┤
//! │  ║  element  ║           ║  element  ║                    ┊No element ┊
//! │  ╚═══════════╝           ╚═══════════╝                    └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                            ↑   ↑
//! └────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                        │
//! ║   head    ║ ───────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     Queue
//! ```
//! The `Queue` owns a heap-allocated sentinel node that holds only the link
//! pair and *NO* element. Each element node is allocated on the heap as well,
//! and contains:
//! - the `next` pointer that points to the next node (or the sentinel if it
//!   is the last element in the queue);
//! - the `prev` pointer that points to the previous node (or the sentinel if
//!   it is the first element in the queue);
//! - the owned string [`Element`].
//!
//! In an empty queue, the `next` and `prev` pointers of the sentinel point to
//! itself. As elements are inserted, `sentinel.next` points to the first
//! element, and `sentinel.prev` points to the last element of the queue.
//!
//! Every linking operation preserves the cyclic invariant: for every node
//! `n` in the chain, `n.next.prev == n` and `n.prev.next == n`.
//!
//! # Iteration
//!
//! Iterating over a queue is by the [`Iter`] iterator. It is a double-ended
//! iterator and iterates the queue like an array (fused and non-cyclic).
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::Queue;
//! use std::iter::FromIterator;
//!
//! let queue = Queue::from_iter(["a", "b", "c"]);
//! let mut iter = queue.iter();
//! assert_eq!(iter.next().unwrap().value(), "a");
//! assert_eq!(iter.next_back().unwrap().value(), "c");
//! assert_eq!(iter.next().unwrap().value(), "b");
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//! ```
//!
//! # Cursors
//!
//! Beside iteration, the cursors [`Cursor`] and [`CursorMut`] provide more
//! flexible ways of viewing and editing a queue.
//!
//! As the names suggest, they are like cursors and can move forward or
//! backward over the queue. In a queue with length *n*, there are *n* + 1
//! valid locations for the cursor: one at each element, and one at the
//! sentinel. The `move_next` and `move_prev` methods refuse to pass through
//! the sentinel boundary; the `*_cyclic` variants wrap around instead.
//!
//! [`CursorMut`] can mutate the queue in any position:
//! - [`insert`]: link a new element before the cursor;
//! - [`remove`]: unlink the element at the cursor;
//! - [`backspace`]: unlink the element before the cursor.
//!
//! # Algorithms
//!
//! The queue ships the link-rewiring transforms of a classic queue drill kit,
//! all of them operating in place without reallocating nodes:
//!
//! - [`reverse`], [`reverse_k`] and [`swap_pairs`] reorder elements purely by
//!   rewriting the link pairs;
//! - [`delete_mid`] and [`delete_dup`] unlink elements structurally (the
//!   middle node, or every run of equal payloads);
//! - [`ascend`] and [`descend`] prune elements violating a monotonic order;
//! - [`sort`] is a stable, in-place merge sort, and [`QueueContext`] merges
//!   many sorted queues into one.
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::Queue;
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter(["5", "3", "8", "1", "9"]);
//! assert_eq!(queue.ascend(), 2);
//! assert_eq!(queue, Queue::from_iter(["1", "9"]));
//! ```
//!
//! [`Queue`]: crate::Queue
//! [`Element`]: crate::Element
//! [`Iter`]: crate::Iter
//! [`Cursor`]: crate::queue::cursor::Cursor
//! [`CursorMut`]: crate::queue::cursor::CursorMut
//! [`insert`]: crate::queue::cursor::CursorMut::insert
//! [`remove`]: crate::queue::cursor::CursorMut::remove
//! [`backspace`]: crate::queue::cursor::CursorMut::backspace
//! [`reverse`]: crate::Queue::reverse
//! [`reverse_k`]: crate::Queue::reverse_k
//! [`swap_pairs`]: crate::Queue::swap_pairs
//! [`delete_mid`]: crate::Queue::delete_mid
//! [`delete_dup`]: crate::Queue::delete_dup
//! [`ascend`]: crate::Queue::ascend
//! [`descend`]: crate::Queue::descend
//! [`sort`]: crate::Queue::sort
//! [`QueueContext`]: crate::QueueContext

#[doc(inline)]
pub use queue::cursor::{Cursor, CursorMut};
#[doc(inline)]
pub use queue::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use queue::{Element, Queue, QueueContext};

pub mod queue;

mod experiments;
