//! One-line object summaries.
//!
//! Summaries classify by exact shape and read at most the type tag, the
//! identity, and a length. They never recurse and never run an object's
//! own code, so they are total: every object gets some summary.

use squint_obj::{Obj, Repr};

/// Length in chars above which text is truncated in summaries.
const TEXT_PREVIEW_LIMIT: usize = 50;

/// Summarize an object's type, identity, and size or value in one line.
///
/// Four buckets, selected by exact shape:
/// - numbers render their value: `<int 3>`, `<float 2.5>`, `<complex (1+2i)>`
/// - text renders a literal, truncated past 50 chars with a trailing `+`
///   and the original length: `<str "abcd..."+ len=60>`
/// - bulk containers render identity and size: `<list 0x55da3f len=3>`
/// - everything else renders its qualified type name and identity:
///   `<app.models.User 0x55da40>`
pub fn summarize(obj: &Obj) -> String {
    match obj.storage() {
        Repr::Int(n) => format!("<int {n}>"),
        Repr::Float(x) => format!("<float {x}>"),
        Repr::Complex { .. } => format!("<complex {obj}>"),
        Repr::Str(s) => {
            let total = s.chars().count();
            if total > TEXT_PREVIEW_LIMIT {
                let head: String = s.chars().take(TEXT_PREVIEW_LIMIT).collect();
                format!("<str {head:?}+ len={total}>")
            } else {
                format!("<str {s:?}>")
            }
        }
        Repr::List(_) | Repr::Tuple(_) | Repr::Dict(_) | Repr::Set(_) | Repr::FrozenSet(_) => {
            format!(
                "<{} 0x{:x} len={}>",
                obj.kind().name(),
                obj.id(),
                obj.len().unwrap_or(0)
            )
        }
        Repr::Bool(_) | Repr::None | Repr::Instance(_) => {
            format!("<{} 0x{:x}>", obj.type_name(), obj.id())
        }
    }
}
