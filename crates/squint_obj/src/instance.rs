//! Instance objects: named composites with an attribute table and hooks.

use parking_lot::RwLock;

use crate::obj::Obj;

/// Attribute-access hook, consulted by [`Obj::attr`] when table lookup
/// misses. Models computed or virtual attributes.
pub type GetattrHook = Box<dyn Fn(&str) -> Option<Obj> + Send + Sync>;

/// String-conversion hook, consulted by [`Obj::repr`].
pub type ReprHook = Box<dyn Fn() -> String + Send + Sync>;

/// A user-defined object: a qualified type name, an insertion-ordered
/// attribute table, and the optional hooks that stand in for the object's
/// own code.
///
/// The table lives behind an `RwLock` so attributes can be rewired after
/// construction; [`InstanceValue::attr_entries`] hands out a point-in-time
/// snapshot. The hooks are deliberately separate from the table: storage
/// reads never touch them.
pub struct InstanceValue {
    module: String,
    type_name: String,
    attrs: RwLock<Vec<(String, Obj)>>,
    getattr_hook: Option<GetattrHook>,
    repr_hook: Option<ReprHook>,
}

impl InstanceValue {
    /// New instance with an empty attribute table and no hooks.
    pub fn new(module: impl Into<String>, type_name: impl Into<String>) -> Self {
        InstanceValue {
            module: module.into(),
            type_name: type_name.into(),
            attrs: RwLock::new(Vec::new()),
            getattr_hook: None,
            repr_hook: None,
        }
    }

    /// Seed an attribute during construction.
    pub fn with_attr(mut self, name: impl Into<String>, value: Obj) -> Self {
        self.attrs.get_mut().push((name.into(), value));
        self
    }

    /// Install an attribute-access hook.
    pub fn with_getattr(
        mut self,
        hook: impl Fn(&str) -> Option<Obj> + Send + Sync + 'static,
    ) -> Self {
        self.getattr_hook = Some(Box::new(hook));
        self
    }

    /// Install a string-conversion hook.
    pub fn with_repr(mut self, hook: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.repr_hook = Some(Box::new(hook));
        self
    }

    /// `module.TypeName`, with the `builtins` namespace elided.
    pub fn qualified_name(&self) -> String {
        if self.module == "builtins" {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.module, self.type_name)
        }
    }

    /// Snapshot of the attribute table in storage order. A direct read:
    /// the attribute-access hook is not consulted.
    pub fn attr_entries(&self) -> Vec<(String, Obj)> {
        self.attrs.read().clone()
    }

    /// Store an attribute, replacing an existing entry in place so the
    /// table keeps its order.
    pub fn set_attr(&self, name: String, value: Obj) {
        let mut attrs = self.attrs.write();
        if let Some(slot) = attrs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            attrs.push((name, value));
        }
    }

    /// The object's own lookup: the table first, then the hook on a miss.
    pub fn lookup(&self, name: &str) -> Option<Obj> {
        if let Some((_, value)) = self.attrs.read().iter().find(|(n, _)| n.as_str() == name) {
            return Some(value.clone());
        }
        self.getattr_hook.as_ref().and_then(|hook| hook(name))
    }

    /// The installed string-conversion hook, if any.
    pub fn repr_hook(&self) -> Option<&ReprHook> {
        self.repr_hook.as_ref()
    }
}
