//! Doubly-linked cells of a [`SafeList`](super::SafeList).
//!
//! The list owns its nodes through the `next` chain starting at the front.
//! `prev` is a [`Weak`] back-reference used only to reach the neighbour of the
//! last node in O(1); it never keeps a node alive.
//!
//! Each node sits behind its own mutex. Node mutexes are leaf locks: they are
//! only taken while the relevant end lock is held, and never two at once.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Owning link to a node.
pub(crate) type Link<T> = Arc<Mutex<Node<T>>>;

/// Non-owning back-reference to a node.
pub(crate) type WeakLink<T> = Weak<Mutex<Node<T>>>;

pub(crate) struct Node<T> {
    /// `None` once the element has been moved out by a pop or drain.
    pub(crate) value: Option<T>,
    pub(crate) prev: Option<WeakLink<T>>,
    pub(crate) next: Option<Link<T>>,
}

impl<T> Node<T> {
    pub(crate) fn link(value: T, prev: Option<WeakLink<T>>, next: Option<Link<T>>) -> Link<T> {
        Arc::new(Mutex::new(Self {
            value: Some(value),
            prev,
            next,
        }))
    }
}

/// Follows `next` from `link`.
pub(crate) fn successor<T>(link: &Link<T>) -> Option<Link<T>> {
    link.lock().next.clone()
}

/// Follows `prev` from `link`. A dropped predecessor reads as none.
pub(crate) fn predecessor<T>(link: &Link<T>) -> Option<Link<T>> {
    link.lock().prev.as_ref().and_then(Weak::upgrade)
}

/// Appends `value` after `back`, making it the new back.
///
/// When `back` is empty the chain is empty too, and the new node becomes both
/// ends. Callers must hold every end lock they pass in.
pub(crate) fn attach_back<T>(front: Option<&mut Option<Link<T>>>, back: &mut Option<Link<T>>, value: T) {
    match back.as_ref() {
        Some(tail) => {
            let node = Node::link(value, Some(Arc::downgrade(tail)), None);
            tail.lock().next = Some(Arc::clone(&node));
            *back = Some(node);
        }
        None => {
            let node = Node::link(value, None, None);
            if let Some(front) = front {
                *front = Some(Arc::clone(&node));
            }
            *back = Some(node);
        }
    }
}

/// Prepends `value` before `front`, making it the new front.
///
/// Mirror of [`attach_back`].
pub(crate) fn attach_front<T>(front: &mut Option<Link<T>>, back: Option<&mut Option<Link<T>>>, value: T) {
    match front.as_ref() {
        Some(head) => {
            let node = Node::link(value, None, Some(Arc::clone(head)));
            head.lock().prev = Some(Arc::downgrade(&node));
            *front = Some(node);
        }
        None => {
            let node = Node::link(value, None, None);
            if let Some(back) = back {
                *back = Some(Arc::clone(&node));
            }
            *front = Some(node);
        }
    }
}

/// Removes the front node.
///
/// Returns `None` if `front` is empty, otherwise the element the node held
/// (itself `None` only for an already-vacated slot). If the removed node was
/// the last one, `back` is cleared as well; `back` must then be provided.
pub(crate) fn detach_front<T>(
    front: &mut Option<Link<T>>,
    back: Option<&mut Option<Link<T>>>,
) -> Option<Option<T>> {
    let head = front.take()?;
    let (value, next) = {
        let mut node = head.lock();
        (node.value.take(), node.next.take())
    };
    match next {
        Some(next) => {
            next.lock().prev = None;
            *front = Some(next);
        }
        None => {
            if let Some(back) = back {
                *back = None;
            }
        }
    }
    Some(value)
}

/// Removes the back node. Mirror of [`detach_front`].
pub(crate) fn detach_back<T>(
    front: Option<&mut Option<Link<T>>>,
    back: &mut Option<Link<T>>,
) -> Option<Option<T>> {
    let tail = back.take()?;
    let (value, prev) = {
        let mut node = tail.lock();
        (node.value.take(), node.prev.take().and_then(|prev| prev.upgrade()))
    };
    match prev {
        Some(prev) => {
            prev.lock().next = None;
            *back = Some(prev);
        }
        None => {
            if let Some(front) = front {
                *front = None;
            }
        }
    }
    Some(value)
}

/// Unlinks every node reachable from `front`, collecting the elements in order.
///
/// Works iteratively so a long chain never recurses on drop.
pub(crate) fn unlink_chain<T>(front: Option<Link<T>>) -> Vec<T> {
    let mut values = Vec::new();
    let mut cursor = front;
    while let Some(node) = cursor {
        let mut guard = node.lock();
        guard.prev = None;
        values.extend(guard.value.take());
        cursor = guard.next.take();
    }
    values
}
