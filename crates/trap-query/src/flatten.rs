//! Expansion of nested analyses (and their results) into sibling samplings.
//!
//! A path query can only address array elements by index. Flattening turns
//! "any analysis of this sampling" into "the only analysis of this row", so a
//! query like `$[?(@.analyzes[0].person=='ana')]` matches every analysis, and
//! each matched value maps back to one analysis or result by row order.

use std::sync::LazyLock;

use regex::Regex;
use trap_core::Sampling;

static ANALYSES_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\.analyzes\b").expect("valid regex"));

static RESULTS_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.analyzes\[\d+\]\.results\b").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenMode {
    /// Leave samplings as they are.
    None,
    /// One row per analysis.
    Analyses,
    /// One row per analysis result; analyses without results keep one row.
    AnalysesAndResults,
}

impl FlattenMode {
    /// Pick the mode from the fields a query references. Any reference into
    /// an analysis's results wins over a plain analysis reference.
    #[must_use]
    pub fn detect(query: &str) -> Self {
        if RESULTS_REF.is_match(query) {
            Self::AnalysesAndResults
        } else if ANALYSES_REF.is_match(query) {
            Self::Analyses
        } else {
            Self::None
        }
    }
}

/// Flatten `samplings` according to `mode`.
///
/// In both flattening modes a sampling without an analyses array yields no
/// rows at all. Flattening already-flattened rows gives the same rows back.
#[must_use]
pub fn flatten(samplings: Vec<Sampling>, mode: FlattenMode) -> Vec<Sampling> {
    match mode {
        FlattenMode::None => samplings,
        FlattenMode::Analyses => samplings
            .iter()
            .flat_map(|sampling| {
                sampling
                    .analyses()
                    .map(move |analysis| sampling.with_single_analysis(analysis.to_value()))
            })
            .collect(),
        FlattenMode::AnalysesAndResults => {
            let mut rows = Vec::new();
            for sampling in &samplings {
                for analysis in sampling.analyses() {
                    match analysis.results() {
                        [] => rows.push(sampling.with_single_analysis(analysis.to_value())),
                        results => rows.extend(results.iter().map(|result| {
                            sampling.with_single_analysis(analysis.with_single_result(result))
                        })),
                    }
                }
            }
            rows
        }
    }
}
