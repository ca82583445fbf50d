//! Report formatting.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use squint_obj::Repr;

use crate::squinter::Squinter;
use crate::summary::summarize;

/// A report string that displays as itself.
///
/// Both `Display` and `Debug` print the raw text, so a report embedded in
/// assertion output or logs never picks up an extra layer of quoting or
/// escaping.
pub struct Report(String);

impl Report {
    pub(crate) fn new(text: String) -> Self {
        Report(text)
    }

    /// The report text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Report {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<Report> for String {
    fn from(report: Report) -> String {
        report.0
    }
}

/// Render a wrapper's object and its one-level references.
///
/// The first line summarizes the object itself; each reference follows as
/// `  name summary`, name-sorted. Plain mode first folds references whose
/// exact shape is int, float, complex, or str into a single histogram
/// line of `typename*count` cells (str cells accumulate total char length
/// rather than occurrence count); zero-valued cells are dropped.
pub(crate) fn format_object(squinter: &Squinter, verbose: bool) -> String {
    let mut out = summarize(squinter.target());
    let mut pairs = squinter.refs_sorted();
    if !verbose {
        let mut histogram: BTreeMap<&'static str, usize> = BTreeMap::new();
        pairs.retain(|(_, target)| match target.storage() {
            Repr::Int(_) => {
                *histogram.entry("int").or_insert(0) += 1;
                false
            }
            Repr::Float(_) => {
                *histogram.entry("float").or_insert(0) += 1;
                false
            }
            Repr::Complex { .. } => {
                *histogram.entry("complex").or_insert(0) += 1;
                false
            }
            Repr::Str(s) => {
                *histogram.entry("str").or_insert(0) += s.chars().count();
                false
            }
            _ => true,
        });
        let cells: Vec<String> = histogram
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(name, count)| format!("{name}*{count}"))
            .collect();
        if !cells.is_empty() {
            out.push_str("\n  ");
            out.push_str(&cells.join(" "));
        }
    }
    for (name, target) in &pairs {
        out.push_str(&format!("\n  {name} {}", summarize(target)));
    }
    out
}
