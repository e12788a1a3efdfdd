//! Cells - units of behaviour bound to one marker element.
//!
//! A cell is any type implementing [`Cell`]. The builder wraps each one in a
//! [`CellInstance`] that pins it to its element and tracks whether it has been
//! activated yet.
//!
//! # Optional hooks
//!
//! All three lifecycle hooks are optional. A cell advertises the ones it
//! implements through [`Cell::hooks`] and the builder only calls those:
//!
//! ```ignore
//! struct Clock { ticks: u32 }
//!
//! impl Cell<NodeId> for Clock {
//!     fn hooks(&self) -> Hooks {
//!         Hooks::INITIALIZE | Hooks::DESTROY
//!     }
//!
//!     fn initialize(&mut self, _element: &NodeId) -> HookResult {
//!         self.ticks += 1;
//!         Ok(())
//!     }
//!
//!     fn destroy(&mut self) -> HookResult {
//!         Ok(())
//!     }
//! }
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::ReconcileError;
use crate::types::{CellId, HookResult, Hooks};

// =============================================================================
// Cell Trait
// =============================================================================

/// Behaviour attached to one marker element.
///
/// `E` is the element handle type of the tree being scanned.
///
/// [`hooks`](Cell::hooks) is the only switch for the three lifecycle methods.
/// Overriding `initialize`, `reload` or `destroy` without setting the matching
/// [`Hooks`] flag does nothing: the builder never calls it.
pub trait Cell<E> {
    /// Hooks this cell implements. Hooks not listed here are never invoked.
    fn hooks(&self) -> Hooks;

    /// Called on every pass that finds the element, after `reload` for cells
    /// that already existed.
    fn initialize(&mut self, _element: &E) -> HookResult {
        Ok(())
    }

    /// Called on every pass after the first that still finds the element.
    fn reload(&mut self, _element: &E) -> HookResult {
        Ok(())
    }

    /// Called once, when the element is no longer found.
    fn destroy(&mut self) -> HookResult {
        Ok(())
    }
}

// =============================================================================
// CellInstance
// =============================================================================

/// A live cell bound to exactly one element for its whole lifetime.
pub struct CellInstance<E> {
    id: CellId,
    type_name: Rc<str>,
    element: E,
    initialized: bool,
    cell: Box<dyn Cell<E>>,
}

impl<E: fmt::Debug> CellInstance<E> {
    pub(crate) fn new(element: E, type_name: Rc<str>, cell: Box<dyn Cell<E>>) -> Self {
        Self {
            id: CellId::next(),
            type_name,
            element,
            initialized: false,
            cell,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    /// Type name the cell was built from.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Element this cell is bound to.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// True once the cell has gone through at least one activation.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn cell(&self) -> &dyn Cell<E> {
        self.cell.as_ref()
    }

    /// Run the activation step of a pass.
    ///
    /// Already-initialized cells get `reload` first. Every cell then gets
    /// `initialize`, so a reused cell sees both hooks on each pass.
    pub(crate) fn activate(&mut self) -> Result<(), ReconcileError> {
        let hooks = self.cell.hooks();

        if self.initialized && hooks.contains(Hooks::RELOAD) {
            self.cell
                .reload(&self.element)
                .map_err(|source| ReconcileError::Reload {
                    cell: self.id,
                    type_name: self.type_name.to_string(),
                    source,
                })?;
        }

        self.initialized = true;

        if hooks.contains(Hooks::INITIALIZE) {
            self.cell
                .initialize(&self.element)
                .map_err(|source| ReconcileError::Initialize {
                    cell: self.id,
                    type_name: self.type_name.to_string(),
                    source,
                })?;
        }

        Ok(())
    }

    /// Destroy the cell. Consumes the instance so it can never be reused.
    pub(crate) fn retire(mut self) -> Result<CellId, ReconcileError> {
        if !self.cell.hooks().contains(Hooks::DESTROY) {
            tracing::debug!(
                cell = %self.id,
                type_name = &*self.type_name,
                "retiring cell without a destroy hook"
            );
            return Ok(self.id);
        }

        self.cell.destroy().map_err(|source| ReconcileError::Destroy {
            cell: self.id,
            type_name: self.type_name.to_string(),
            source,
        })?;
        Ok(self.id)
    }
}

impl<E: fmt::Debug> fmt::Debug for CellInstance<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellInstance")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("element", &self.element)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
