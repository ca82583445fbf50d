//! Reference discovery.
//!
//! [`iter_refs`] walks an object's underlying storage and yields one
//! synthetically-named edge per referenced object. Name prefixes are
//! disjoint per reference kind, so no two edges from the same object
//! share a name:
//!
//! - `a_<name>` for stored attributes
//! - `item<i>` for sequence elements
//! - `k<int>` / `k_<ident>` / `key<i>` + `value<i>` for mapping entries
//! - `member<i>` for set members
//!
//! Discovery uses only storage snapshots. Attribute-access hooks,
//! string-conversion hooks, and any other object-owned code never run.

use squint_obj::{Obj, ObjKind, Repr};

/// Yield a `(name, target)` pair for each object directly referenced by
/// `obj`: attribute edges first in attribute-table order, then element,
/// entry, or member edges in storage order.
///
/// Mapping entries are named by key shape: an int key `k` becomes the
/// single edge `k<k>`; an identifier-shaped text key becomes `k_<key>`;
/// any other key contributes a `key<i>` edge for the key object and a
/// `value<i>` edge for the value, where `i` is the entry's position in
/// the full iteration (so these ordinals can skip numbers).
#[tracing::instrument(level = "trace", skip(obj), fields(kind = ?obj.kind(), id = obj.id()))]
pub fn iter_refs(obj: &Obj) -> impl Iterator<Item = (String, Obj)> {
    let mut refs = Vec::new();
    if let Some(attrs) = obj.attr_entries() {
        for (name, value) in attrs {
            refs.push((format!("a_{name}"), value));
        }
    }
    match obj.kind() {
        ObjKind::List | ObjKind::Tuple => {
            if let Some(elements) = obj.elements() {
                for (i, element) in elements.into_iter().enumerate() {
                    refs.push((format!("item{i}"), element));
                }
            }
        }
        ObjKind::Dict => {
            if let Some(entries) = obj.entries() {
                for (i, (key, value)) in entries.into_iter().enumerate() {
                    match key.storage() {
                        Repr::Int(n) => refs.push((format!("k{n}"), value)),
                        Repr::Str(s) if is_identifier(s) => {
                            refs.push((format!("k_{s}"), value));
                        }
                        _ => {
                            refs.push((format!("key{i}"), key.clone()));
                            refs.push((format!("value{i}"), value));
                        }
                    }
                }
            }
        }
        ObjKind::Set | ObjKind::FrozenSet => {
            if let Some(members) = obj.members() {
                for (i, member) in members.into_iter().enumerate() {
                    refs.push((format!("member{i}"), member));
                }
            }
        }
        _ => {}
    }
    refs.into_iter()
}

/// Identifier-shaped text: `[A-Za-z_][A-Za-z_0-9]*`.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
