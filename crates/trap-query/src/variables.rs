//! Distinct values for dashboard variables.

use std::collections::HashSet;

use trap_core::{Sampling, Trap};

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Every person named in any analysis, first-seen order.
#[must_use]
pub fn persons(samplings: &[Sampling]) -> Vec<String> {
    distinct(samplings.iter().flat_map(|s| s.persons()))
}

/// Every trap entry point, first-seen order.
#[must_use]
pub fn entry_points(traps: &[Trap]) -> Vec<String> {
    distinct(traps.iter().filter_map(Trap::entry_point))
}
