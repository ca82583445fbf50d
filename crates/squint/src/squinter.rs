//! The lazy inspection wrapper.

use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use squint_obj::{Obj, ObjKind};

use crate::cycles;
use crate::errors::SquintError;
use crate::refs::iter_refs;
use crate::render::{format_object, Report};

/// Lazy wrapper around one object.
///
/// A `Squinter` owns a private reference table mapping synthetic edge
/// names to referenced objects. The table is built on first use and kept
/// for the wrapper's lifetime; it reflects the object as of the most
/// recent [`Squinter::reload`], not necessarily its current live
/// structure. Navigation hands out fresh, independent wrappers - there is
/// no persistent wrapper graph, only whatever a traversal is holding.
pub struct Squinter {
    obj: Obj,
    refs: RwLock<Option<FxHashMap<String, Obj>>>,
}

impl Squinter {
    /// Wrap an object. No references are discovered yet.
    pub fn new(obj: Obj) -> Self {
        Squinter {
            obj,
            refs: RwLock::new(None),
        }
    }

    /// The wrapped object.
    pub fn target(&self) -> &Obj {
        &self.obj
    }

    // Discovering and delivering referenced objects.

    /// Discover referenced objects, if we have not done so already.
    pub fn load(&self) {
        if self.refs.read().is_none() {
            self.reload();
        }
    }

    /// Rebuild the reference table from the object's current structure.
    pub fn reload(&self) {
        let table: FxHashMap<String, Obj> = iter_refs(&self.obj).collect();
        tracing::debug!(id = self.obj.id(), refs = table.len(), "rebuilt reference table");
        *self.refs.write() = Some(table);
    }

    /// Navigate to the referenced object registered under `name`, wrapped
    /// in a new `Squinter`.
    pub fn get(&self, name: &str) -> Result<Squinter, SquintError> {
        self.load();
        self.with_refs(|refs| refs.get(name).cloned())
            .map(Squinter::new)
            .ok_or_else(|| SquintError::AttributeNotFound {
                name: name.to_string(),
            })
    }

    // Safe primitive operations on the wrapped object.

    /// Identity of the wrapped object.
    pub fn id(&self) -> usize {
        self.obj.id()
    }

    /// Qualified type name of the wrapped object.
    pub fn type_name(&self) -> String {
        self.obj.type_name()
    }

    /// Raw shape tag of the wrapped object.
    pub fn kind(&self) -> ObjKind {
        self.obj.kind()
    }

    // User conveniences.

    /// Plain report: the summary line, a histogram of primitively-typed
    /// references, and one line per remaining reference.
    pub fn render(&self) -> Report {
        Report::new(format_object(self, false))
    }

    /// Verbose report: the summary line and one line per reference.
    pub fn render_verbose(&self) -> Report {
        Report::new(format_object(self, true))
    }

    /// Report every reference cycle reachable from the wrapped object
    /// within `max_depth` levels, one line per closed loop.
    ///
    /// Walks the live object directly; the wrapper's cached table is not
    /// consulted.
    pub fn find_cycles(&self, max_depth: usize) -> Report {
        let lines: Vec<String> = cycles::find_cycles(&self.obj, max_depth)
            .iter()
            .map(ToString::to_string)
            .collect();
        Report::new(lines.join("\n"))
    }

    /// All `(name, target)` pairs from the cached table, name-sorted.
    /// Loads the table first.
    pub(crate) fn refs_sorted(&self) -> Vec<(String, Obj)> {
        self.load();
        let mut pairs = self.with_refs(|refs| {
            refs.iter()
                .map(|(name, target)| (name.clone(), target.clone()))
                .collect::<Vec<_>>()
        });
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    fn with_refs<R>(&self, f: impl FnOnce(&FxHashMap<String, Obj>) -> R) -> R {
        let guard = self.refs.read();
        match guard.as_ref() {
            Some(refs) => f(refs),
            None => f(&FxHashMap::default()),
        }
    }
}

impl fmt::Display for Squinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_object(self, false))
    }
}

impl fmt::Debug for Squinter {
    /// Same as `Display`: the report is the debugging view.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_object(self, false))
    }
}
