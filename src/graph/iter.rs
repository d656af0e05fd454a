//! Cursor protocol for streaming graph scans.
//!
//! Range scans return a cursor rather than a collection so that I/O-backed
//! backends can stream results without materializing them. The cursor starts
//! before the first element; callers drive it with [`Cursor::advance`] and
//! read elements with [`Cursor::current`]. After `advance` returns `false`,
//! [`Cursor::error`] distinguishes clean exhaustion from a mid-scan fault.

use crate::core::error::{Error, Result};
use crate::graph::{Edge, Link};

/// A cursor over a scan result, yielding defensive copies one at a time.
///
/// Terminal state is sticky: once `advance` has returned `false` it keeps
/// returning `false`. [`Cursor::close`] releases backend resources and must be
/// safe to call any number of times, including mid-iteration.
pub trait Cursor: Send {
    /// The entity type this cursor yields.
    type Item;

    /// Move the cursor to the next element. Returns `false` when the scan is
    /// exhausted or a fault stopped it.
    fn advance(&mut self) -> bool;

    /// Copy of the element at the cursor. `None` before the first successful
    /// `advance`, after exhaustion, and after `close`.
    fn current(&self) -> Option<Self::Item>;

    /// The fault that stopped iteration, if any. `None` means any `false`
    /// from `advance` was clean exhaustion.
    fn error(&self) -> Option<&Error>;

    /// Release any resources held by the cursor. Idempotent.
    fn close(&mut self) -> Result<()>;
}

/// Boxed cursor over links, as returned by [`Graph::links`](crate::graph::Graph::links).
pub type LinkIterator = Box<dyn Cursor<Item = Link>>;

/// Boxed cursor over edges, as returned by [`Graph::edges`](crate::graph::Graph::edges).
pub type EdgeIterator = Box<dyn Cursor<Item = Edge>>;

/// Cursor over a list materialized at scan time.
///
/// The in-memory backend snapshots matching entries under the store's read
/// lock and hands the frozen list to this cursor, so iteration never touches
/// the store again and concurrent writes cannot affect an in-flight scan.
pub struct SnapshotIter<T> {
    items: Vec<T>,
    cursor: Option<usize>,
    done: bool,
}

impl<T> SnapshotIter<T> {
    /// Wrap a frozen snapshot list.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            cursor: None,
            done: false,
        }
    }
}

impl<T: Clone + Send> Cursor for SnapshotIter<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.items.len() {
            self.done = true;
            self.cursor = None;
            return false;
        }
        self.cursor = Some(next);
        true
    }

    fn current(&self) -> Option<T> {
        self.cursor.map(|i| self.items[i].clone())
    }

    fn error(&self) -> Option<&Error> {
        // The snapshot is immutable; nothing can fault mid-scan.
        None
    }

    fn close(&mut self) -> Result<()> {
        self.done = true;
        self.cursor = None;
        self.items = Vec::new();
        Ok(())
    }
}
