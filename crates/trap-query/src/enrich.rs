//! Sampling enrichment with the parent trap's entry point and island.

use std::collections::HashMap;

use trap_core::{Sampling, Trap, TrapProjection};

/// Trap join key to projection. A later trap with a repeated id wins.
///
/// Keys are [`trap_core::RecordId::join_key`], so a sampling referencing
/// trap `1` finds a trap whose id is `"1"`.
#[must_use]
pub fn trap_index(traps: &[Trap]) -> HashMap<String, TrapProjection> {
    traps
        .iter()
        .map(|trap| (trap.id().join_key(), trap.projection()))
        .collect()
}

/// Copy each sampling's trap projection onto it. Samplings without a known
/// trap get null entry point and island. Order and count are preserved.
#[must_use]
pub fn enrich(samplings: Vec<Sampling>, index: &HashMap<String, TrapProjection>) -> Vec<Sampling> {
    samplings
        .into_iter()
        .map(|mut sampling| {
            let projection = sampling
                .trap_id()
                .and_then(|id| index.get(&id.join_key()));
            sampling.attach_trap(projection);
            sampling
        })
        .collect()
}
