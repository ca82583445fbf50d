//! squint - a side-effect-free inspector for `squint_obj` object graphs.
//!
//! Given any [`Obj`], squint discovers the objects it references
//! (attributes, container elements) without running any of the object's
//! own code - no attribute-access hooks, no string-conversion hooks -
//! renders bounded human-readable summaries, and detects reference cycles
//! up to a configurable depth.
//!
//! # Architecture
//!
//! - `summary`: one-line exact-shape summaries ([`summarize`])
//! - `refs`: reference discovery over raw storage ([`iter_refs`])
//! - `squinter`: the lazy, caching wrapper and navigation ([`Squinter`])
//! - `render`: report formatting ([`Report`])
//! - `cycles`: bounded-depth cycle detection ([`find_cycles`])
//!
//! # Example
//!
//! ```
//! use squint::at;
//! use squint_obj::{InstanceValue, Obj};
//!
//! let config = Obj::instance(
//!     InstanceValue::new("app", "Config").with_attr("retries", Obj::int(3)),
//! );
//! let wrapper = at(config);
//! let retries = wrapper.get("a_retries")?;
//! assert_eq!(retries.type_name(), "int");
//! # Ok::<(), squint::SquintError>(())
//! ```

pub mod cycles;
mod errors;
pub mod refs;
mod render;
mod squinter;
pub mod summary;

pub use cycles::{find_cycles, CycleEntry, DEFAULT_MAX_DEPTH};
pub use errors::SquintError;
pub use refs::iter_refs;
pub use render::Report;
pub use squinter::Squinter;
pub use summary::summarize;

// Re-export the object model so callers need only one crate.
pub use squint_obj::{InstanceValue, Obj, ObjKind, Repr};

/// Wrap `obj` for inspection.
///
/// The sole entry point: hands back a [`Squinter`] whose reference table
/// is not built until first use.
pub fn at(obj: Obj) -> Squinter {
    Squinter::new(obj)
}
