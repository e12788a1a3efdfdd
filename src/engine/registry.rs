//! Cell Registry - Type name to constructor mapping.
//!
//! Registration is append-only and first-write-wins:
//! - A name is bound at most once
//! - Registering an already bound name is a silent no-op
//! - There is no unregister
//!
//! One registry is created at startup, filled by cell authors, then handed to
//! (or owned by) the [`CellBuilder`](super::CellBuilder).

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::cell::Cell;
use crate::types::HookResult;

/// Builds a cell for an element.
pub type Constructor<E> = Rc<dyn Fn(&E) -> HookResult<Box<dyn Cell<E>>>>;

// =============================================================================
// Registry
// =============================================================================

pub struct CellRegistry<E> {
    /// Kept in registration order so `names()` is deterministic.
    constructors: IndexMap<String, Constructor<E>>,
}

impl<E: 'static> CellRegistry<E> {
    pub fn new() -> Self {
        Self {
            constructors: IndexMap::new(),
        }
    }

    /// Bind `name` to `constructor`.
    ///
    /// Returns `true` if the name was bound by this call. An already bound name
    /// keeps its first constructor and the call returns `false`. Empty names are
    /// rejected.
    ///
    /// # Example
    ///
    /// ```ignore
    /// registry.register(|element: &NodeId| Ok(Greeter::new(*element)), "greeter");
    /// ```
    pub fn register<F, C>(&mut self, constructor: F, name: &str) -> bool
    where
        F: Fn(&E) -> HookResult<C> + 'static,
        C: Cell<E> + 'static,
    {
        if name.is_empty() {
            tracing::warn!("ignoring cell registration with an empty name");
            return false;
        }

        match self.constructors.entry(name.to_owned()) {
            Entry::Occupied(_) => {
                tracing::debug!(
                    name,
                    "cell type already registered, keeping the first constructor"
                );
                false
            }
            Entry::Vacant(slot) => {
                let constructor: Constructor<E> =
                    Rc::new(move |element: &E| -> HookResult<Box<dyn Cell<E>>> {
                        Ok(Box::new(constructor(element)?))
                    });
                slot.insert(constructor);
                true
            }
        }
    }

    /// Look up the constructor for a type name.
    ///
    /// `None` is an expected outcome: the caller skips the element.
    pub fn resolve(&self, name: &str) -> Option<&Constructor<E>> {
        self.constructors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<E: 'static> Default for CellRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for CellRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRegistry")
            .field("names", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hooks;

    struct Named;

    impl Cell<u32> for Named {
        fn hooks(&self) -> Hooks {
            Hooks::NONE
        }
    }

    fn build(registry: &CellRegistry<u32>, name: &str) -> Option<Box<dyn Cell<u32>>> {
        registry.resolve(name).map(|constructor| constructor(&0).unwrap())
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = CellRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register(|_: &u32| Ok(Named), "greeter"));
        assert!(registry.contains("greeter"));
        assert_eq!(registry.len(), 1);
        assert!(build(&registry, "greeter").is_some());
    }

    #[test]
    fn test_unknown_name_resolves_to_none() {
        let registry = CellRegistry::<u32>::new();
        assert!(registry.resolve("unknown").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        use std::cell::Cell as Counter;

        let first_calls = Rc::new(Counter::new(0));
        let second_calls = Rc::new(Counter::new(0));

        let mut registry = CellRegistry::new();
        let first = first_calls.clone();
        assert!(registry.register(
            move |_: &u32| {
                first.set(first.get() + 1);
                Ok(Named)
            },
            "greeter",
        ));
        let second = second_calls.clone();
        assert!(!registry.register(
            move |_: &u32| {
                second.set(second.get() + 1);
                Ok(Named)
            },
            "greeter",
        ));

        assert_eq!(registry.len(), 1);
        build(&registry, "greeter");
        assert_eq!(first_calls.get(), 1);
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = CellRegistry::new();
        assert!(!registry.register(|_: &u32| Ok(Named), ""));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_names_in_registration_order() {
        let mut registry = CellRegistry::new();
        registry.register(|_: &u32| Ok(Named), "slider");
        registry.register(|_: &u32| Ok(Named), "greeter");
        registry.register(|_: &u32| Ok(Named), "slider");

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["slider", "greeter"]);
    }
}
