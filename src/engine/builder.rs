//! Cell Builder - Reconciles live cells against the marker elements of a tree.
//!
//! Each pass:
//! 1. **Discovery** - query the tree for marked elements (document order),
//!    resolve each type name, reuse the live cell already bound to the element
//!    or construct a new one
//! 2. **Activation** - `reload` (cells that already existed) then `initialize`
//!    on every cell of the new live set
//! 3. **Retirement** - `destroy` every previous cell whose element was not
//!    found, in previous live-set order
//!
//! The new live set is stored before activation starts. A hook failure aborts
//! the rest of the pass without rolling anything back.

use std::collections::{HashMap, HashSet};
use std::mem;
use std::rc::Rc;

use crate::cell::{Cell, CellInstance};
use crate::config::BuilderOptions;
use crate::error::ReconcileError;
use crate::tree::{CellTree, Element, Marked};
use crate::types::{CellId, HookResult};

use super::registry::CellRegistry;

// =============================================================================
// Report
// =============================================================================

/// What a completed pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Cells constructed during this pass, in live-set order.
    pub built: Vec<CellId>,
    /// Cells carried over from the previous pass, in live-set order.
    pub reused: Vec<CellId>,
    /// Cells destroyed during this pass, in previous live-set order.
    pub destroyed: Vec<CellId>,
    /// Type names with no registered constructor, in discovery order.
    pub unresolved: Vec<String>,
}

impl ReconcileReport {
    /// True if the pass neither built nor destroyed anything.
    pub fn is_stable(&self) -> bool {
        self.built.is_empty() && self.destroyed.is_empty()
    }
}

enum Found<E> {
    /// Index into the previous live set.
    Reused(usize),
    Built(CellInstance<E>),
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug)]
pub struct CellBuilder<E> {
    registry: CellRegistry<E>,
    options: BuilderOptions,
    cells: Vec<CellInstance<E>>,
}

impl<E: Element> CellBuilder<E> {
    pub fn new(registry: CellRegistry<E>) -> Self {
        Self::with_options(registry, BuilderOptions::default())
    }

    pub fn with_options(registry: CellRegistry<E>, options: BuilderOptions) -> Self {
        Self {
            registry,
            options,
            cells: Vec::new(),
        }
    }

    pub fn registry(&self) -> &CellRegistry<E> {
        &self.registry
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Register a cell type on the owned registry. See [`CellRegistry::register`].
    pub fn register<F, C>(&mut self, constructor: F, name: &str) -> bool
    where
        F: Fn(&E) -> HookResult<C> + 'static,
        C: Cell<E> + 'static,
    {
        self.registry.register(constructor, name)
    }

    /// First pass at startup. Identical to [`reconcile`](Self::reconcile).
    pub fn initialize<T>(&mut self, tree: &T) -> Result<ReconcileReport, ReconcileError>
    where
        T: CellTree<Element = E> + ?Sized,
    {
        self.reconcile(tree)
    }

    /// Build new cells, reload existing ones and destroy orphans.
    pub fn reconcile<T>(&mut self, tree: &T) -> Result<ReconcileReport, ReconcileError>
    where
        T: CellTree<Element = E> + ?Sized,
    {
        let marked = tree.query_marked(&self.options.marker);
        let mut report = ReconcileReport::default();

        let found = self.discover(marked, &mut report)?;

        // Swap in the new live set, leaving unclaimed previous cells as orphans.
        let mut previous: Vec<Option<CellInstance<E>>> =
            mem::take(&mut self.cells).into_iter().map(Some).collect();

        self.cells = found
            .into_iter()
            .filter_map(|found| match found {
                Found::Reused(index) => {
                    let cell = previous[index].take();
                    if let Some(cell) = &cell {
                        report.reused.push(cell.id());
                    }
                    cell
                }
                Found::Built(cell) => {
                    tracing::debug!(cell = %cell.id(), type_name = cell.type_name(), "built cell");
                    report.built.push(cell.id());
                    Some(cell)
                }
            })
            .collect();

        let orphans: Vec<CellInstance<E>> = previous.into_iter().flatten().collect();

        for cell in &mut self.cells {
            cell.activate()?;
        }

        for orphan in orphans {
            let id = orphan.retire()?;
            tracing::debug!(cell = %id, "destroyed orphan cell");
            report.destroyed.push(id);
        }

        tracing::trace!(
            built = report.built.len(),
            reused = report.reused.len(),
            destroyed = report.destroyed.len(),
            unresolved = report.unresolved.len(),
            "reconcile pass complete"
        );

        Ok(report)
    }

    /// Resolve marked elements to reused or freshly built cells.
    ///
    /// Leaves the live set untouched, so a constructor failure aborts the pass
    /// with nothing changed.
    fn discover(
        &self,
        marked: Vec<Marked<E>>,
        report: &mut ReconcileReport,
    ) -> Result<Vec<Found<E>>, ReconcileError> {
        let live: HashMap<&E, usize> = self
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (cell.element(), index))
            .collect();

        let mut seen: HashSet<E> = HashSet::with_capacity(marked.len());
        let mut found = Vec::with_capacity(marked.len());

        for Marked { element, type_name } in marked {
            if !seen.insert(element.clone()) {
                tracing::warn!(?element, "element reported twice in one pass, keeping the first");
                continue;
            }

            let Some(constructor) = self.registry.resolve(&type_name) else {
                tracing::warn!(type_name = %type_name, "cell with name '{}' not found", type_name);
                report.unresolved.push(type_name);
                continue;
            };

            if let Some(&index) = live.get(&element) {
                let existing = &self.cells[index];
                if existing.type_name() != type_name {
                    tracing::debug!(
                        cell = %existing.id(),
                        from = existing.type_name(),
                        to = %type_name,
                        "marker changed on a live element, keeping the existing cell"
                    );
                }
                found.push(Found::Reused(index));
                continue;
            }

            let cell = constructor(&element).map_err(|source| ReconcileError::Construct {
                type_name: type_name.clone(),
                element: format!("{element:?}"),
                source,
            })?;
            found.push(Found::Built(CellInstance::new(element, Rc::from(type_name), cell)));
        }

        Ok(found)
    }

    /// Destroy every live cell in order and empty the live set.
    ///
    /// Cells after a failing `destroy` are dropped without their hook running.
    pub fn teardown(&mut self) -> Result<Vec<CellId>, ReconcileError> {
        let cells = mem::take(&mut self.cells);
        let mut destroyed = Vec::with_capacity(cells.len());
        for cell in cells {
            destroyed.push(cell.retire()?);
        }
        Ok(destroyed)
    }

    /// The live cell bound to `element`, if any.
    pub fn find_by_element(&self, element: &E) -> Option<&CellInstance<E>> {
        self.cells.iter().find(|cell| cell.element() == element)
    }

    pub fn get(&self, id: CellId) -> Option<&CellInstance<E>> {
        self.cells.iter().find(|cell| cell.id() == id)
    }

    /// Live cells in document order of the last pass.
    pub fn active_cells(&self) -> &[CellInstance<E>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
