//! Handles and storage for runtime objects.
//!
//! All allocation goes through factory methods on [`Obj`]; the handle's
//! `Arc` field is private, so a shape cannot be constructed without one
//! heap allocation, and identity is always well-defined.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::instance::InstanceValue;
use crate::kind::ObjKind;

/// A handle to one runtime object.
///
/// Cloning is an `Arc` bump: clones refer to the same object, compare
/// identical under [`Obj::is`], and report the same [`Obj::id`]. The
/// handle carries no inspection logic of its own; it exposes the object's
/// raw storage plus the object's own (hook-dispatching) access routes.
#[derive(Clone)]
pub struct Obj(Arc<Repr>);

/// Underlying storage for each exact runtime shape.
///
/// Mutable shapes keep their payload behind an `RwLock` so object graphs
/// can be rewired after construction; that is also how cyclic structures
/// come to exist. Immutable shapes store their payload directly.
pub enum Repr {
    Int(i64),
    Float(f64),
    Complex { re: f64, im: f64 },
    Bool(bool),
    None,
    Str(String),
    List(RwLock<Vec<Obj>>),
    Tuple(Vec<Obj>),
    /// Insertion-ordered entries. Scalar keys replace by value on insert,
    /// all other keys by identity.
    Dict(RwLock<Vec<(Obj, Obj)>>),
    Set(RwLock<Vec<Obj>>),
    FrozenSet(Vec<Obj>),
    Instance(InstanceValue),
}

// Factory methods (the only way to allocate objects).

impl Obj {
    /// Create an integer object.
    #[inline]
    pub fn int(n: i64) -> Self {
        Obj(Arc::new(Repr::Int(n)))
    }

    /// Create a floating-point object.
    #[inline]
    pub fn float(x: f64) -> Self {
        Obj(Arc::new(Repr::Float(x)))
    }

    /// Create a complex-number object.
    #[inline]
    pub fn complex(re: f64, im: f64) -> Self {
        Obj(Arc::new(Repr::Complex { re, im }))
    }

    /// Create a boolean object.
    #[inline]
    pub fn boolean(b: bool) -> Self {
        Obj(Arc::new(Repr::Bool(b)))
    }

    /// Create the unit "nothing" object.
    ///
    /// Each call allocates; there is no shared singleton, so two `none()`
    /// objects have distinct identities.
    #[inline]
    pub fn none() -> Self {
        Obj(Arc::new(Repr::None))
    }

    /// Create a text object.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Obj(Arc::new(Repr::Str(s.into())))
    }

    /// Create a mutable ordered sequence.
    #[inline]
    pub fn list(items: Vec<Obj>) -> Self {
        Obj(Arc::new(Repr::List(RwLock::new(items))))
    }

    /// Create an immutable ordered sequence.
    #[inline]
    pub fn tuple(items: Vec<Obj>) -> Self {
        Obj(Arc::new(Repr::Tuple(items)))
    }

    /// Create a mapping from insertion-ordered entries.
    #[inline]
    pub fn dict(entries: Vec<(Obj, Obj)>) -> Self {
        Obj(Arc::new(Repr::Dict(RwLock::new(entries))))
    }

    /// Create a mutable set from insertion-ordered members.
    #[inline]
    pub fn set(members: Vec<Obj>) -> Self {
        Obj(Arc::new(Repr::Set(RwLock::new(members))))
    }

    /// Create an immutable set from insertion-ordered members.
    #[inline]
    pub fn frozen_set(members: Vec<Obj>) -> Self {
        Obj(Arc::new(Repr::FrozenSet(members)))
    }

    /// Create a user-defined instance object.
    #[inline]
    pub fn instance(value: InstanceValue) -> Self {
        Obj(Arc::new(Repr::Instance(value)))
    }
}

// Safe primitive operations: storage reads that never run object code.

impl Obj {
    /// Exact shape tag.
    pub fn kind(&self) -> ObjKind {
        match &*self.0 {
            Repr::Int(_) => ObjKind::Int,
            Repr::Float(_) => ObjKind::Float,
            Repr::Complex { .. } => ObjKind::Complex,
            Repr::Bool(_) => ObjKind::Bool,
            Repr::None => ObjKind::None,
            Repr::Str(_) => ObjKind::Str,
            Repr::List(_) => ObjKind::List,
            Repr::Tuple(_) => ObjKind::Tuple,
            Repr::Dict(_) => ObjKind::Dict,
            Repr::Set(_) => ObjKind::Set,
            Repr::FrozenSet(_) => ObjKind::FrozenSet,
            Repr::Instance(_) => ObjKind::Instance,
        }
    }

    /// Identity: the allocation address, stable for the object's lifetime
    /// and independent of its value.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Identity comparison: do both handles refer to the same allocation?
    pub fn is(&self, other: &Obj) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Borrow the underlying storage directly.
    pub fn storage(&self) -> &Repr {
        &self.0
    }

    /// Qualified type name. Builtin shapes use their bare names; instances
    /// report `module.TypeName` with the `builtins` namespace elided.
    pub fn type_name(&self) -> String {
        match &*self.0 {
            Repr::Instance(inst) => inst.qualified_name(),
            _ => self.kind().name().to_string(),
        }
    }

    /// Element, entry, member, or char count for shapes that have one.
    pub fn len(&self) -> Option<usize> {
        match &*self.0 {
            Repr::Str(s) => Some(s.chars().count()),
            Repr::List(items) => Some(items.read().len()),
            Repr::Tuple(items) => Some(items.len()),
            Repr::Dict(entries) => Some(entries.read().len()),
            Repr::Set(members) => Some(members.read().len()),
            Repr::FrozenSet(members) => Some(members.len()),
            _ => Option::None,
        }
    }

    /// Snapshot of an instance's attribute table, in storage order.
    ///
    /// Reads the table directly; the instance's attribute-access hook is
    /// never consulted. `None` for shapes without an attribute table.
    pub fn attr_entries(&self) -> Option<Vec<(String, Obj)>> {
        match &*self.0 {
            Repr::Instance(inst) => Some(inst.attr_entries()),
            _ => Option::None,
        }
    }

    /// Snapshot of sequence elements in index order (list or tuple).
    pub fn elements(&self) -> Option<Vec<Obj>> {
        match &*self.0 {
            Repr::List(items) => Some(items.read().clone()),
            Repr::Tuple(items) => Some(items.clone()),
            _ => Option::None,
        }
    }

    /// Snapshot of mapping entries in storage order.
    pub fn entries(&self) -> Option<Vec<(Obj, Obj)>> {
        match &*self.0 {
            Repr::Dict(entries) => Some(entries.read().clone()),
            _ => Option::None,
        }
    }

    /// Snapshot of set members in storage order (set or frozenset).
    pub fn members(&self) -> Option<Vec<Obj>> {
        match &*self.0 {
            Repr::Set(members) => Some(members.read().clone()),
            Repr::FrozenSet(members) => Some(members.clone()),
            _ => Option::None,
        }
    }

    /// The integer payload, if this object is an int.
    pub fn as_int(&self) -> Option<i64> {
        match &*self.0 {
            Repr::Int(n) => Some(*n),
            _ => Option::None,
        }
    }

    /// The float payload, if this object is a float.
    pub fn as_f64(&self) -> Option<f64> {
        match &*self.0 {
            Repr::Float(x) => Some(*x),
            _ => Option::None,
        }
    }

    /// The text payload, if this object is a str.
    pub fn as_str(&self) -> Option<&str> {
        match &*self.0 {
            Repr::Str(s) => Some(s.as_str()),
            _ => Option::None,
        }
    }
}

// Mutators: the runtime's own storage-rewiring routes.

impl Obj {
    /// Store attribute `name` on an instance, replacing any existing entry
    /// in place. Returns `false` when the object carries no attribute
    /// table.
    pub fn set_attr(&self, name: impl Into<String>, value: Obj) -> bool {
        match &*self.0 {
            Repr::Instance(inst) => {
                inst.set_attr(name.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Append to a list. Returns `false` for any other shape.
    pub fn push(&self, item: Obj) -> bool {
        match &*self.0 {
            Repr::List(items) => {
                items.write().push(item);
                true
            }
            _ => false,
        }
    }

    /// Insert into a dict. A matching key (by value for scalar keys, by
    /// identity otherwise) has its value replaced in place; a new key is
    /// appended. Returns `false` for any other shape.
    pub fn dict_insert(&self, key: Obj, value: Obj) -> bool {
        match &*self.0 {
            Repr::Dict(entries) => {
                let mut entries = entries.write();
                if let Some(slot) = entries.iter_mut().find(|(k, _)| same_key(k, &key)) {
                    slot.1 = value;
                } else {
                    entries.push((key, value));
                }
                true
            }
            _ => false,
        }
    }

    /// Add to a set unless a matching member is already present. Returns
    /// `false` for frozen sets and non-set shapes.
    pub fn set_add(&self, member: Obj) -> bool {
        match &*self.0 {
            Repr::Set(members) => {
                let mut members = members.write();
                if !members.iter().any(|m| same_key(m, &member)) {
                    members.push(member);
                }
                true
            }
            _ => false,
        }
    }
}

// The object's own access routes. These may run user-installed code and
// must not be used by inspection passes.

impl Obj {
    /// The object's own attribute lookup: the attribute table first, then
    /// the instance's attribute-access hook on a miss.
    pub fn attr(&self, name: &str) -> Option<Obj> {
        match &*self.0 {
            Repr::Instance(inst) => inst.lookup(name),
            _ => Option::None,
        }
    }

    /// The object's own string conversion: the instance's repr hook when
    /// one is installed, the default rendering otherwise.
    pub fn repr(&self) -> String {
        if let Repr::Instance(inst) = &*self.0 {
            if let Some(hook) = inst.repr_hook() {
                return hook();
            }
        }
        self.to_string()
    }
}

/// Key equality for dict and set storage: int, bool, str, and none keys
/// compare by value, everything else (floats included) by identity.
fn same_key(a: &Obj, b: &Obj) -> bool {
    match (a.storage(), b.storage()) {
        (Repr::Int(x), Repr::Int(y)) => x == y,
        (Repr::Bool(x), Repr::Bool(y)) => x == y,
        (Repr::Str(x), Repr::Str(y)) => x == y,
        (Repr::None, Repr::None) => true,
        _ => a.is(b),
    }
}

impl fmt::Display for Obj {
    /// The runtime's default string conversion. Recursive for containers;
    /// not used by inspection code, which renders bounded summaries
    /// instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Repr::Int(n) => write!(f, "{n}"),
            Repr::Float(x) => write!(f, "{x}"),
            Repr::Complex { re, im } => {
                if *im < 0.0 {
                    write!(f, "({re}-{}i)", -im)
                } else {
                    write!(f, "({re}+{im}i)")
                }
            }
            Repr::Bool(b) => write!(f, "{b}"),
            Repr::None => write!(f, "none"),
            Repr::Str(s) => write!(f, "\"{s}\""),
            Repr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Repr::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Repr::Dict(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Repr::Set(members) => {
                write!(f, "{{")?;
                for (i, member) in members.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, "}}")
            }
            Repr::FrozenSet(members) => {
                write!(f, "frozenset({{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, "}})")
            }
            Repr::Instance(inst) => {
                write!(f, "<{} object at 0x{:x}>", inst.qualified_name(), self.id())
            }
        }
    }
}

impl fmt::Debug for Obj {
    /// Shallow by intent: a debug print of a handle must not walk a
    /// possibly-cyclic graph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Obj<{} 0x{:x}>", self.type_name(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceValue;

    mod identity {
        use super::*;

        #[test]
        fn clones_share_identity() {
            let obj = Obj::list(vec![]);
            let alias = obj.clone();
            assert!(obj.is(&alias));
            assert_eq!(obj.id(), alias.id());
        }

        #[test]
        fn equal_values_keep_distinct_identities() {
            let a = Obj::int(7);
            let b = Obj::int(7);
            assert!(!a.is(&b));
            assert_ne!(a.id(), b.id());
        }

        #[test]
        fn identity_is_stable_across_reads() {
            let obj = Obj::string("anchor");
            let before = obj.id();
            let _ = obj.type_name();
            let _ = obj.len();
            assert_eq!(obj.id(), before);
        }
    }

    mod shape {
        use super::*;

        #[test]
        fn factories_produce_their_kind() {
            assert_eq!(Obj::int(1).kind(), ObjKind::Int);
            assert_eq!(Obj::float(1.5).kind(), ObjKind::Float);
            assert_eq!(Obj::complex(0.0, 1.0).kind(), ObjKind::Complex);
            assert_eq!(Obj::boolean(true).kind(), ObjKind::Bool);
            assert_eq!(Obj::none().kind(), ObjKind::None);
            assert_eq!(Obj::string("s").kind(), ObjKind::Str);
            assert_eq!(Obj::list(vec![]).kind(), ObjKind::List);
            assert_eq!(Obj::tuple(vec![]).kind(), ObjKind::Tuple);
            assert_eq!(Obj::dict(vec![]).kind(), ObjKind::Dict);
            assert_eq!(Obj::set(vec![]).kind(), ObjKind::Set);
            assert_eq!(Obj::frozen_set(vec![]).kind(), ObjKind::FrozenSet);
        }

        #[test]
        fn builtin_type_names_are_bare() {
            assert_eq!(Obj::int(1).type_name(), "int");
            assert_eq!(Obj::frozen_set(vec![]).type_name(), "frozenset");
            assert_eq!(Obj::none().type_name(), "none");
        }

        #[test]
        fn instance_type_names_are_qualified() {
            let user = Obj::instance(InstanceValue::new("app.models", "User"));
            assert_eq!(user.type_name(), "app.models.User");
        }

        #[test]
        fn builtins_namespace_is_elided() {
            let obj = Obj::instance(InstanceValue::new("builtins", "Thing"));
            assert_eq!(obj.type_name(), "Thing");
        }
    }

    mod storage {
        use super::*;

        #[test]
        fn len_counts_chars_not_bytes() {
            assert_eq!(Obj::string("héllo").len(), Some(5));
        }

        #[test]
        fn payload_readers_match_shape() {
            assert_eq!(Obj::int(9).as_int(), Some(9));
            assert_eq!(Obj::float(2.5).as_f64(), Some(2.5));
            assert_eq!(Obj::string("t").as_str(), Some("t"));
            assert_eq!(Obj::float(2.5).as_int(), Option::None);
            assert_eq!(Obj::int(9).as_f64(), Option::None);
        }

        #[test]
        fn len_per_shape() {
            assert_eq!(Obj::list(vec![Obj::int(1), Obj::int(2)]).len(), Some(2));
            assert_eq!(Obj::tuple(vec![Obj::int(1)]).len(), Some(1));
            assert_eq!(
                Obj::dict(vec![(Obj::string("k"), Obj::int(1))]).len(),
                Some(1)
            );
            assert_eq!(Obj::set(vec![]).len(), Some(0));
            assert_eq!(Obj::int(3).len(), Option::None);
            assert_eq!(Obj::none().len(), Option::None);
        }

        #[test]
        fn push_extends_lists_only() {
            let list = Obj::list(vec![]);
            assert!(list.push(Obj::int(1)));
            assert_eq!(list.len(), Some(1));
            assert!(!Obj::tuple(vec![]).push(Obj::int(1)));
            assert!(!Obj::int(0).push(Obj::int(1)));
        }

        #[test]
        fn snapshots_are_point_in_time() {
            let list = Obj::list(vec![Obj::int(1)]);
            let before = list.elements().unwrap_or_default();
            list.push(Obj::int(2));
            assert_eq!(before.len(), 1);
            assert_eq!(list.elements().unwrap_or_default().len(), 2);
        }

        #[test]
        fn dict_insert_replaces_scalar_keys_in_place() {
            let dict = Obj::dict(vec![
                (Obj::string("a"), Obj::int(1)),
                (Obj::string("b"), Obj::int(2)),
            ]);
            assert!(dict.dict_insert(Obj::string("a"), Obj::int(10)));
            let entries = dict.entries().unwrap_or_default();
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].1.as_int(), Some(10));
            assert_eq!(entries[1].1.as_int(), Some(2));
        }

        #[test]
        fn dict_insert_compares_composite_keys_by_identity() {
            let dict = Obj::dict(vec![]);
            dict.dict_insert(Obj::tuple(vec![Obj::int(1)]), Obj::int(1));
            dict.dict_insert(Obj::tuple(vec![Obj::int(1)]), Obj::int(2));
            assert_eq!(dict.len(), Some(2));
        }

        #[test]
        fn set_add_dedups_scalars() {
            let set = Obj::set(vec![Obj::int(1)]);
            assert!(set.set_add(Obj::int(1)));
            assert!(set.set_add(Obj::int(2)));
            assert_eq!(set.len(), Some(2));
            assert!(!Obj::frozen_set(vec![]).set_add(Obj::int(1)));
        }

        #[test]
        fn attr_replace_keeps_table_position() {
            let obj = Obj::instance(
                InstanceValue::new("app", "T")
                    .with_attr("first", Obj::int(1))
                    .with_attr("second", Obj::int(2)),
            );
            assert!(obj.set_attr("first", Obj::int(100)));
            let attrs = obj.attr_entries().unwrap_or_default();
            assert_eq!(attrs[0].0, "first");
            assert_eq!(attrs[0].1.as_int(), Some(100));
            assert_eq!(attrs[1].0, "second");
        }

        #[test]
        fn set_attr_rejects_non_instances() {
            assert!(!Obj::list(vec![]).set_attr("x", Obj::int(1)));
        }
    }

    mod own_code {
        use super::*;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        #[test]
        fn attr_reads_table_then_hook() {
            let obj = Obj::instance(
                InstanceValue::new("app", "Lazy")
                    .with_attr("stored", Obj::int(1))
                    .with_getattr(|name| {
                        (name == "virtual").then(|| Obj::string("computed"))
                    }),
            );
            assert_eq!(obj.attr("stored").and_then(|v| v.as_int()), Some(1));
            assert_eq!(
                obj.attr("virtual").and_then(|v| v.as_str().map(String::from)),
                Some("computed".to_string())
            );
            assert!(obj.attr("absent").is_none());
        }

        #[test]
        fn hook_fires_only_on_table_miss() {
            let calls = Arc::new(AtomicUsize::new(0));
            let seen = Arc::clone(&calls);
            let obj = Obj::instance(
                InstanceValue::new("app", "Lazy")
                    .with_attr("stored", Obj::int(1))
                    .with_getattr(move |_| {
                        seen.fetch_add(1, Ordering::Relaxed);
                        Option::None
                    }),
            );
            let _ = obj.attr("stored");
            assert_eq!(calls.load(Ordering::Relaxed), 0);
            let _ = obj.attr("missing");
            assert_eq!(calls.load(Ordering::Relaxed), 1);
        }

        #[test]
        fn repr_hook_overrides_default_rendering() {
            let obj = Obj::instance(
                InstanceValue::new("app", "Masked").with_repr(|| "<masked>".to_string()),
            );
            assert_eq!(obj.repr(), "<masked>");
        }

        #[test]
        fn default_repr_names_the_type() {
            let obj = Obj::instance(InstanceValue::new("app", "Plain"));
            let rendered = obj.repr();
            assert!(rendered.starts_with("<app.Plain object at 0x"));
        }
    }

    mod display {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn scalars() {
            assert_eq!(Obj::int(-3).to_string(), "-3");
            assert_eq!(Obj::float(2.5).to_string(), "2.5");
            assert_eq!(Obj::boolean(false).to_string(), "false");
            assert_eq!(Obj::none().to_string(), "none");
            assert_eq!(Obj::string("hi").to_string(), "\"hi\"");
        }

        #[test]
        fn complex_signs() {
            assert_eq!(Obj::complex(1.0, 2.0).to_string(), "(1+2i)");
            assert_eq!(Obj::complex(1.0, -2.0).to_string(), "(1-2i)");
        }

        #[test]
        fn containers() {
            let list = Obj::list(vec![Obj::int(1), Obj::string("x")]);
            assert_eq!(list.to_string(), "[1, \"x\"]");
            let dict = Obj::dict(vec![(Obj::string("k"), Obj::int(1))]);
            assert_eq!(dict.to_string(), "{\"k\": 1}");
            let frozen = Obj::frozen_set(vec![Obj::int(1), Obj::int(2)]);
            assert_eq!(frozen.to_string(), "frozenset({1, 2})");
        }

        #[test]
        fn debug_is_shallow() {
            let list = Obj::list(vec![Obj::int(1)]);
            let debugged = format!("{list:?}");
            assert!(debugged.starts_with("Obj<list 0x"));
            assert!(!debugged.contains('['));
        }
    }
}
