//! Core types for spark-cells.
//!
//! These types are shared by the registry, the builder and every cell
//! implementation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Marker
// =============================================================================

/// Attribute that marks an element as the host of a cell.
///
/// Its value is the registered type name, e.g. `<div data-cell="greeter">`.
pub const DEFAULT_MARKER: &str = "data-cell";

// =============================================================================
// Hook Result
// =============================================================================

/// Result returned by cell constructors and lifecycle hooks.
///
/// Hooks use `anyhow` so cell authors can `?` any error type. The builder wraps
/// failures into [`ReconcileError`](crate::ReconcileError) with the cell's
/// identity attached.
pub type HookResult<T = ()> = anyhow::Result<T>;

// =============================================================================
// Lifecycle Hooks (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Lifecycle hooks a cell implements.
    ///
    /// The builder only invokes hooks whose flag is set, so a cell that does
    /// not advertise `RELOAD` never sees a `reload` call.
    ///
    /// Combine with bitwise OR: `Hooks::INITIALIZE | Hooks::DESTROY`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Hooks: u8 {
        const NONE = 0;
        const INITIALIZE = 1 << 0;
        const RELOAD = 1 << 1;
        const DESTROY = 1 << 2;
    }
}

// =============================================================================
// CellId
// =============================================================================

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of one cell instance.
///
/// Ids are never reused, so a cell built for a reintroduced element always
/// gets a new id even when the element handle compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(u64);

impl CellId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ids_are_unique() {
        let a = CellId::next();
        let b = CellId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_cell_id_display() {
        let id = CellId(7);
        assert_eq!(id.to_string(), "c7");
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn test_hooks_combine() {
        let hooks = Hooks::INITIALIZE | Hooks::DESTROY;
        assert!(hooks.contains(Hooks::INITIALIZE));
        assert!(!hooks.contains(Hooks::RELOAD));
        assert!(hooks.contains(Hooks::DESTROY));
        assert_eq!(Hooks::default(), Hooks::NONE);
    }
}
