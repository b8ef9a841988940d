//! Node storage for [`Deque`](super::Deque).
//!
//! Nodes live in a per-deque arena and refer to their neighbours by slot
//! index, so the chain carries no ownership cycles and needs no `unsafe`.
//! Released slots are recycled through a free list; every release bumps the
//! slot's generation so that a [`NodeHandle`] taken before the release can be
//! told apart from the node that later reuses the slot.

use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

/// Position of a node inside its deque's arena.
pub(crate) type NodeIndex = usize;

/// A single storage cell: a value plus its chain neighbours.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) pred: Option<NodeIndex>,
    pub(crate) succ: Option<NodeIndex>,
}

impl<T> Node<T> {
    pub(crate) const fn new(value: T, pred: Option<NodeIndex>, succ: Option<NodeIndex>) -> Self {
        Self { value, pred, succ }
    }
}

struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Slot vector holding every live node of one deque.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<NodeIndex>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Stores `node` in a vacant slot and returns its index.
    pub(crate) fn allocate(&mut self, node: Node<T>) -> NodeIndex {
        if let Some(index) = self.free.pop() {
            self.slots[index].node = Some(node);
            index
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            self.slots.len() - 1
        }
    }

    /// Vacates the slot at `index` and hands back the node it held.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already vacant.
    pub(crate) fn release(&mut self, index: NodeIndex) -> Node<T> {
        let slot = &mut self.slots[index];
        let Some(node) = slot.node.take() else {
            panic!("released vacant node slot {index}");
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        node
    }

    /// Returns the generation of an occupied slot.
    pub(crate) fn live_generation(&self, index: NodeIndex) -> Option<u32> {
        self.slots
            .get(index)
            .filter(|slot| slot.node.is_some())
            .map(|slot| slot.generation)
    }

    /// Indices of the occupied slots, in slot order.
    pub(crate) fn live_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.node.is_some())
            .map(|(index, _)| index)
    }

    /// Vacates every occupied slot, invalidating all outstanding handles.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.free.reverse();
    }
}

impl<T> Index<NodeIndex> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, index: NodeIndex) -> &Node<T> {
        match self.slots[index].node.as_ref() {
            Some(node) => node,
            None => panic!("dangling link to node slot {index}"),
        }
    }
}

impl<T> IndexMut<NodeIndex> for Arena<T> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Node<T> {
        match self.slots[index].node.as_mut() {
            Some(node) => node,
            None => panic!("dangling link to node slot {index}"),
        }
    }
}

/// An opaque reference to one node of one [`Deque`](super::Deque).
///
/// Handles are plain values: holding one does not borrow the deque. A handle
/// stays valid until its node is removed (or the deque is cleared or
/// dropped); after that, and for every other deque, operations taking
/// the handle fail with [`DequeError::ForeignNode`](crate::DequeError::ForeignNode).
///
/// A handle follows its node, not its position: after
/// [`swap_nodes`](super::Deque::swap_nodes) the handle still refers to the same
/// value, now at the other position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub(crate) owner: u64,
    pub(crate) index: NodeIndex,
    pub(crate) generation: u32,
}

/// Returns an identity no other deque in this process has been given.
pub(crate) fn next_identity() -> u64 {
    static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(0);
    NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed)
}
