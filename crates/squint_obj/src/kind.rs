//! Exact-shape category flags.

/// Closed set of runtime shape categories.
///
/// Policy code (summaries, reference discovery) dispatches on `ObjKind`
/// rather than on any behavior of the object itself, so classification can
/// never run user-installed hooks. Exactness matters: an instance is an
/// `Instance` no matter what it models, and only the literal builtin
/// shapes select the builtin policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjKind {
    Int,
    Float,
    Complex,
    Bool,
    None,
    Str,
    List,
    Tuple,
    Dict,
    Set,
    FrozenSet,
    Instance,
}

impl ObjKind {
    /// Display name of the builtin shape.
    ///
    /// Instances report their own qualified type name through
    /// [`crate::Obj::type_name`]; the `"instance"` string here is only the
    /// category label.
    pub fn name(self) -> &'static str {
        match self {
            ObjKind::Int => "int",
            ObjKind::Float => "float",
            ObjKind::Complex => "complex",
            ObjKind::Bool => "bool",
            ObjKind::None => "none",
            ObjKind::Str => "str",
            ObjKind::List => "list",
            ObjKind::Tuple => "tuple",
            ObjKind::Dict => "dict",
            ObjKind::Set => "set",
            ObjKind::FrozenSet => "frozenset",
            ObjKind::Instance => "instance",
        }
    }
}
