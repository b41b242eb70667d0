//! State discovery cache.
//!
//! Every kind of entity lists its concrete states once, through
//! [`StateSet::register`]. The resulting [`FactoryTable`] is cached in a
//! [`StateCatalog`] keyed by the `(context, tag)` pair, so spawning many
//! entities of the same kind pays for the listing only once. The catalog is an
//! owned object: create it at startup, share it behind an `Arc`, and pass it to
//! every machine you build.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::{State, StateKind};

/// Error returned by a state factory that cannot build its state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateBuildError {
    #[error("state {state} is missing required data: {reason}")]
    MissingData { state: &'static str, reason: String },

    #[error("state {state} rejected its configuration: {reason}")]
    InvalidConfig { state: &'static str, reason: String },
}

/// Constructor for one concrete state.
pub type StateFactory<C, K> = fn() -> Result<Box<dyn State<C, K>>, StateBuildError>;

/// Factory for states that need nothing beyond their `Default` value.
///
/// ```ignore
/// table.register(Mode::Idle, default_factory::<Ctx, Mode, IdleState>);
/// ```
pub fn default_factory<C, K, S>() -> Result<Box<dyn State<C, K>>, StateBuildError>
where
    K: StateKind,
    S: State<C, K> + Default + 'static,
{
    Ok(Box::new(S::default()))
}

/// Ordered `(tag, constructor)` pairs for one kind of entity.
pub struct FactoryTable<C, K> {
    entries: Vec<(K, StateFactory<C, K>)>,
}

impl<C, K: StateKind> FactoryTable<C, K> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers the constructor for `kind`.
    ///
    /// The first registration of a tag wins; later duplicates are logged and
    /// ignored.
    pub fn register(&mut self, kind: K, factory: StateFactory<C, K>) -> &mut Self {
        if self.entries.iter().any(|(existing, _)| *existing == kind) {
            warn!(
                target: "state_machine::catalog",
                state = ?kind,
                "duplicate state registration ignored"
            );
            return self;
        }
        self.entries.push((kind, factory));
        self
    }

    /// Returns the number of registered tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no tag is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `kind` has a constructor.
    pub fn contains(&self, kind: K) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == kind)
    }

    /// Iterates over the registered entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &(K, StateFactory<C, K>)> + '_ {
        self.entries.iter()
    }
}

/// The set of concrete states of one kind of entity.
///
/// Implemented on the kind's tag enum; adding a state to a kind means adding a
/// line to `register`, the engine itself never changes.
pub trait StateSet<C>: StateKind {
    /// Lists every concrete state of this kind.
    fn register(table: &mut FactoryTable<C, Self>);
}

/// Process-wide cache of factory tables, filled lazily and read-mostly after
/// warm-up.
pub struct StateCatalog {
    tables: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    scans: AtomicUsize,
}

impl StateCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            scans: AtomicUsize::new(0),
        }
    }

    /// Returns the factory table for `K`, listing its states on first use.
    pub fn factories<C: 'static, K: StateSet<C>>(&self) -> Arc<FactoryTable<C, K>> {
        let key = TypeId::of::<FactoryTable<C, K>>();

        let cached = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(table) = cached.and_then(downcast::<C, K>) {
            return table;
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have filled the slot between the two locks.
        if let Some(table) = tables.get(&key).cloned().and_then(downcast::<C, K>) {
            return table;
        }

        let mut table = FactoryTable::new();
        K::register(&mut table);
        self.scans.fetch_add(1, Ordering::Relaxed);
        debug!(
            target: "state_machine::catalog",
            kind = core::any::type_name::<K>(),
            states = table.len(),
            "listed state factories"
        );

        let table = Arc::new(table);
        tables.insert(key, Arc::clone(&table) as Arc<dyn Any + Send + Sync>);
        table
    }

    /// Number of times a kind's states were listed since creation.
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    /// Number of kinds currently cached.
    pub fn cached_kinds(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for StateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for StateCatalog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateCatalog")
            .field("cached_kinds", &self.cached_kinds())
            .field("scans", &self.scan_count())
            .finish()
    }
}

fn downcast<C: 'static, K: StateKind>(
    entry: Arc<dyn Any + Send + Sync>,
) -> Option<Arc<FactoryTable<C, K>>> {
    entry.downcast::<FactoryTable<C, K>>().ok()
}
