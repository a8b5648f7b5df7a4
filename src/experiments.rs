//! A fully safe rendition of the string deque, built from `GhostCell` and
//! fractional ownership (`StaticRc`) instead of raw pointers.
//!
//! Each node is owned by exactly two halves: one held by its predecessor's
//! forward link (or the deque head), the other by its successor's backward
//! link (or the deque tail). Joining the two halves back into a full owner
//! is what permits deallocation without `unsafe`.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct Deque<'id> {
    links: [Option<NodePtr<'id>>; 2],
}

struct Node<'id> {
    links: [Option<NodePtr<'id>>; 2],
    value: String,
}

type NodePtr<'id> = Half<GhostCell<'id, Node<'id>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id> Node<'id> {
    const NEXT: usize = 0;
    const PREV: usize = 1;
    fn new(value: String) -> Self {
        let links = [None, None];
        Self { links, value }
    }
}

impl<'id> Default for Deque<'id> {
    fn default() -> Self {
        let links = [None, None];
        Self { links }
    }
}

impl<'id> Deque<'id> {
    const HEAD: usize = 0;
    const TAIL: usize = 1;

    // `side` indexes both the deque ends and the node links: pushing at the
    // head rewires `next` links (index 0), pushing at the tail rewires
    // `prev` links (index 1).
    fn push_at(&mut self, side: usize, value: String, token: &mut GhostToken<'id>) {
        let oppo = 1 - side;
        let (left, right) = Full::split(Full::new(GhostCell::new(Node::new(value))));
        match self.links[side].take() {
            Some(this_side) => {
                this_side.deref().borrow_mut(token).links[oppo] = Some(left);
                right.deref().borrow_mut(token).links[side] = Some(this_side);
            }
            None => self.links[oppo] = Some(left),
        }
        self.links[side] = Some(right);
    }

    fn pop_at(&mut self, side: usize, token: &mut GhostToken<'id>) -> Option<String> {
        debug_assert!(side < 2);
        let oppo = 1 - side;
        let right = self.links[side].take()?;
        let left = match right.deref().borrow_mut(token).links[side].take() {
            Some(this_side) => {
                let left = this_side.deref().borrow_mut(token).links[oppo]
                    .take()
                    .unwrap();
                self.links[side] = Some(this_side);
                left
            }
            None => self.links[oppo].take().unwrap(),
        };
        Some(Full::into_box(Full::join(left, right)).into_inner().value)
    }
}

impl<'id> Deque<'id> {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn is_empty(&self) -> bool {
        self.links[Self::HEAD].is_none()
    }
    pub fn push_back(&mut self, value: String, token: &mut GhostToken<'id>) {
        self.push_at(Self::TAIL, value, token);
    }
    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<String> {
        self.pop_at(Self::TAIL, token)
    }
    pub fn push_front(&mut self, value: String, token: &mut GhostToken<'id>) {
        self.push_at(Self::HEAD, value, token);
    }
    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<String> {
        self.pop_at(Self::HEAD, token)
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::Deque;
    use ghost_cell::GhostToken;

    #[test]
    fn deque_push_pop() {
        GhostToken::new(|mut token| {
            let mut deque = Deque::new();
            assert!(deque.is_empty());
            deque.push_back("a".to_owned(), &mut token);
            deque.push_back("b".to_owned(), &mut token);
            deque.push_front("c".to_owned(), &mut token);
            assert!(!deque.is_empty());
            assert_eq!(deque.pop_back(&mut token).as_deref(), Some("b"));
            assert_eq!(deque.pop_front(&mut token).as_deref(), Some("c"));
            assert_eq!(deque.pop_back(&mut token).as_deref(), Some("a"));
            assert!(deque.is_empty());
            assert_eq!(deque.pop_front(&mut token), None);
        })
    }
}
