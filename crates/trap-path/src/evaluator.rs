//! Path evaluation over `serde_json::Value` trees.
//!
//! Results come back in document order: array elements by index, object
//! members in insertion order, and for recursive descent each node before
//! its descendants.

use serde_json::Value;

use crate::ast::{JsonPath, Segment, Selector};
use crate::filter::normalize_index;

/// Evaluate `path` against `root`, borrowing the matched nodes.
#[must_use]
pub fn evaluate<'a>(path: &JsonPath, root: &'a Value) -> Vec<&'a Value> {
    let mut nodes = vec![root];
    for segment in &path.segments {
        let mut next = Vec::new();
        match segment {
            Segment::Child(selectors) => {
                for &node in &nodes {
                    select_all(selectors, node, root, &mut next);
                }
            }
            Segment::Descendant(selectors) => {
                for &node in &nodes {
                    let mut stack = vec![node];
                    while let Some(current) = stack.pop() {
                        select_all(selectors, current, root, &mut next);
                        push_children_reversed(current, &mut stack);
                    }
                }
            }
        }
        nodes = next;
    }
    nodes
}

/// Evaluate `path` against `root`, cloning the matched nodes.
#[must_use]
pub fn evaluate_owned(path: &JsonPath, root: &Value) -> Vec<Value> {
    evaluate(path, root).into_iter().cloned().collect()
}

fn select_all<'a>(selectors: &[Selector], node: &'a Value, root: &Value, out: &mut Vec<&'a Value>) {
    for selector in selectors {
        select(selector, node, root, out);
    }
}

fn select<'a>(selector: &Selector, node: &'a Value, root: &Value, out: &mut Vec<&'a Value>) {
    match (selector, node) {
        (Selector::Name(name), Value::Object(map)) => out.extend(map.get(name)),
        (Selector::Index(index), Value::Array(items)) => {
            out.extend(normalize_index(*index, items.len()).and_then(|i| items.get(i)));
        }
        (Selector::Wildcard, _) => out.extend(children(node)),
        (Selector::Slice { start, end, step }, Value::Array(items)) => {
            out.extend(slice_indices(*start, *end, *step, items.len()).filter_map(|i| items.get(i)));
        }
        (Selector::Filter(expr), _) => {
            out.extend(children(node).filter(|child| expr.matches(child, root)));
        }
        _ => {}
    }
}

/// Direct children of a node: array elements or object member values.
fn children(node: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match node {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(map) => Box::new(map.values()),
        _ => Box::new(std::iter::empty()),
    }
}

fn push_children_reversed<'a>(node: &'a Value, stack: &mut Vec<&'a Value>) {
    match node {
        Value::Array(items) => stack.extend(items.iter().rev()),
        Value::Object(map) => stack.extend(map.values().rev()),
        _ => {}
    }
}

/// Indices selected by `[start:end:step]` on an array of length `len`.
///
/// Bounds are clamped, negative bounds count from the end, a zero step
/// selects nothing and a negative step walks backwards.
fn slice_indices(
    start: Option<i64>,
    end: Option<i64>,
    step: Option<i64>,
    len: usize,
) -> Box<dyn Iterator<Item = usize>> {
    let step = step.unwrap_or(1);
    let Ok(len) = i64::try_from(len) else {
        return Box::new(std::iter::empty());
    };
    let normalize = |i: i64| if i < 0 { len + i } else { i };

    if step > 0 {
        let lower = start.map_or(0, normalize).clamp(0, len);
        let upper = end.map_or(len, normalize).clamp(0, len);
        let step = usize::try_from(step).unwrap_or(usize::MAX);
        Box::new(
            (lower..upper)
                .step_by(step)
                .filter_map(|i| usize::try_from(i).ok()),
        )
    } else if step < 0 {
        let upper = start.map_or(len - 1, normalize).clamp(-1, len - 1);
        let lower = end.map_or(-1, normalize).clamp(-1, len - 1);
        let step = usize::try_from(step.unsigned_abs()).unwrap_or(usize::MAX);
        Box::new(
            ((lower + 1)..=upper)
                .rev()
                .step_by(step)
                .filter_map(|i| usize::try_from(i).ok()),
        )
    } else {
        Box::new(std::iter::empty())
    }
}
