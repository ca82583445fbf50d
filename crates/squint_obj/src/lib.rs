//! squint_obj - the dynamic object model that squint inspects.
//!
//! Rust has no reflection over arbitrary native values, so the inspectable
//! universe is an explicit object model: [`Obj`], a cheaply-cloneable
//! handle over a closed set of runtime shapes (numbers, text, containers,
//! instances). The model draws a hard line between two access surfaces:
//!
//! - **Raw storage reads** ([`Obj::attr_entries`], [`Obj::elements`],
//!   [`Obj::entries`], [`Obj::members`], [`Obj::len`], [`Obj::kind`],
//!   [`Obj::id`]): snapshot the object's underlying storage and never run
//!   any code belonging to the object.
//! - **The object's own routes** ([`Obj::attr`], [`Obj::repr`]): consult
//!   user-installed hooks and may run arbitrary code.
//!
//! Inspection code uses only the first surface. The second exists so the
//! distinction is testable: a hook that counts its invocations can prove
//! an inspection pass never touched it.
//!
//! # Identity
//!
//! Every `Obj` is one heap allocation; [`Obj::id`] is the allocation
//! address, stable for the object's lifetime and independent of its value.
//! Clones share the allocation and therefore the identity ([`Obj::is`]).

mod instance;
mod kind;
mod obj;

pub use instance::{GetattrHook, InstanceValue, ReprHook};
pub use kind::ObjKind;
pub use obj::{Obj, Repr};
