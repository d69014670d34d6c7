//! FIFO queue of pending orders.
//!
//! Orders join at the back as their creation tick arrives and leave only
//! when an assignment is committed.  A failed assignment never removes the
//! order, so it keeps its queue position — "returns to the head" for free.

use std::collections::VecDeque;

use fleet_core::OrderId;

/// Pending orders awaiting assignment, in intake order.
#[derive(Default)]
pub struct OrderQueue {
    inner: VecDeque<OrderId>,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly created order.
    pub fn push_back(&mut self, order: OrderId) {
        self.inner.push_back(order);
    }

    /// Remove `order` after a committed assignment.  Returns `false` if it
    /// was not queued.
    pub fn remove(&mut self, order: OrderId) -> bool {
        match self.inner.iter().position(|&o| o == order) {
            Some(i) => {
                self.inner.remove(i);
                true
            }
            None => false,
        }
    }

    /// Pending orders, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.inner.iter().copied()
    }

    pub fn front(&self) -> Option<OrderId> {
        self.inner.front().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
