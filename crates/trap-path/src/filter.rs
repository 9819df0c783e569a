//! Filter expressions: `[?( ... )]`.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or       := and ( "||" and )*
//! and      := equality ( "&&" equality )*
//! equality := relation ( ( "===" | "!==" | "==" | "!=" ) relation )*
//! relation := unary ( ( "<=" | ">=" | "<" | ">" ) unary )*
//! unary    := "!" unary | primary
//! primary  := "(" or ")" | literal | path
//! path     := ( "@" | "$" ) ( "." name | "[" ( string | int ) "]" )*
//! literal  := string | number | true | false | null | undefined
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::error::PathError;
use crate::parser::Parser;

/// A filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal; `None` is `undefined`.
    Literal(Option<Value>),
    Path(FilterPath),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare {
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A singular path inside a filter, relative to `@` or to `$`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPath {
    pub root: PathRoot,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRoot {
    Current,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Name(String),
    Index(i64),
}

// ── Parsing ────────────────────────────────────────────────────────

impl Parser {
    pub(crate) fn parse_filter_expr(&mut self) -> Result<Expr, PathError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, PathError> {
        let mut lhs = self.parse_and()?;
        loop {
            self.skip_ws();
            if !self.eat_str("||") {
                return Ok(lhs);
            }
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_and(&mut self) -> Result<Expr, PathError> {
        let mut lhs = self.parse_equality()?;
        loop {
            self.skip_ws();
            if !self.eat_str("&&") {
                return Ok(lhs);
            }
            let rhs = self.parse_equality()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_equality(&mut self) -> Result<Expr, PathError> {
        let mut lhs = self.parse_relation()?;
        loop {
            self.skip_ws();
            let op = if self.eat_str("===") {
                CompareOp::StrictEq
            } else if self.eat_str("!==") {
                CompareOp::StrictNe
            } else if self.eat_str("==") {
                CompareOp::Eq
            } else if self.eat_str("!=") {
                CompareOp::Ne
            } else if self.peek() == Some('=') {
                return Err(self.error("assignment is not allowed, use '=='"));
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_relation()?;
            lhs = Expr::Compare {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_relation(&mut self) -> Result<Expr, PathError> {
        let mut lhs = self.parse_unary()?;
        loop {
            self.skip_ws();
            let op = if self.eat_str("<=") {
                CompareOp::Le
            } else if self.eat_str(">=") {
                CompareOp::Ge
            } else if self.eat('<') {
                CompareOp::Lt
            } else if self.eat('>') {
                CompareOp::Gt
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_unary()?;
            lhs = Expr::Compare {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, PathError> {
        self.skip_ws();
        if self.peek() == Some('!') && self.peek_at(1) != Some('=') {
            self.bump();
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, PathError> {
        self.skip_ws();
        match self.peek() {
            Some('(') => {
                self.bump();
                let inner = self.parse_or()?;
                self.skip_ws();
                self.expect(')')?;
                Ok(inner)
            }
            Some('@') => {
                self.bump();
                Ok(Expr::Path(self.parse_filter_path(PathRoot::Current)?))
            }
            Some('$') => {
                self.bump();
                Ok(Expr::Path(self.parse_filter_path(PathRoot::Document)?))
            }
            Some('\'' | '"') => Ok(Expr::Literal(Some(Value::String(self.parse_string()?)))),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_alphabetic() => {
                let offset = self.pos;
                let word = self.parse_name()?;
                match word.as_str() {
                    "true" => Ok(Expr::Literal(Some(Value::Bool(true)))),
                    "false" => Ok(Expr::Literal(Some(Value::Bool(false)))),
                    "null" => Ok(Expr::Literal(Some(Value::Null))),
                    "undefined" => Ok(Expr::Literal(None)),
                    _ => Err(PathError::Syntax {
                        offset,
                        message: format!("unknown identifier '{word}'"),
                    }),
                }
            }
            Some(c) => Err(self.error(format!("unexpected '{c}' in filter"))),
            None => Err(self.error("unexpected end of filter")),
        }
    }

    fn parse_filter_path(&mut self, root: PathRoot) -> Result<FilterPath, PathError> {
        let mut steps = Vec::new();
        loop {
            match self.peek() {
                Some('.') => {
                    self.bump();
                    steps.push(Step::Name(self.parse_name()?));
                }
                Some('[') => {
                    self.bump();
                    self.skip_ws();
                    let step = match self.peek() {
                        Some('\'' | '"') => Step::Name(self.parse_string()?),
                        Some(c) if c == '-' || c.is_ascii_digit() => {
                            let offset = self.pos;
                            match self.parse_number()? {
                                Expr::Literal(Some(Value::Number(n))) if n.is_i64() => {
                                    Step::Index(n.as_i64().unwrap_or_default())
                                }
                                _ => {
                                    return Err(PathError::Syntax {
                                        offset,
                                        message: "expected an integer index".into(),
                                    });
                                }
                            }
                        }
                        _ => return Err(self.error("expected a quoted name or an index")),
                    };
                    self.skip_ws();
                    self.expect(']')?;
                    steps.push(step);
                }
                _ => return Ok(FilterPath { root, steps }),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Expr, PathError> {
        let start = self.pos;
        let mut text = String::new();
        if self.eat('-') {
            text.push('-');
        }
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-') && text.ends_with(['e', 'E']);
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E') || exponent_sign {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        let invalid = || PathError::Syntax {
            offset: start,
            message: format!("invalid number '{text}'"),
        };
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Expr::Literal(Some(Value::from(i))));
        }
        let f = text.parse::<f64>().map_err(|_| invalid())?;
        Number::from_f64(f)
            .map(|n| Expr::Literal(Some(Value::Number(n))))
            .ok_or_else(invalid)
    }
}

// ── Evaluation ─────────────────────────────────────────────────────

impl Expr {
    /// Whether `current` passes this filter.
    #[must_use]
    pub fn matches(&self, current: &Value, root: &Value) -> bool {
        truthy(self.eval(current, root).as_deref())
    }

    /// Evaluate to a value; `None` is `undefined`.
    fn eval<'a>(&'a self, current: &'a Value, root: &'a Value) -> Option<Cow<'a, Value>> {
        match self {
            Self::Literal(value) => value.as_ref().map(Cow::Borrowed),
            Self::Path(path) => path.resolve(current, root),
            Self::Not(inner) => Some(Cow::Owned(Value::Bool(!inner.matches(current, root)))),
            Self::And(lhs, rhs) => Some(Cow::Owned(Value::Bool(
                lhs.matches(current, root) && rhs.matches(current, root),
            ))),
            Self::Or(lhs, rhs) => Some(Cow::Owned(Value::Bool(
                lhs.matches(current, root) || rhs.matches(current, root),
            ))),
            Self::Compare { op, lhs, rhs } => {
                let l = lhs.eval(current, root);
                let r = rhs.eval(current, root);
                Some(Cow::Owned(Value::Bool(compare(
                    *op,
                    l.as_deref(),
                    r.as_deref(),
                ))))
            }
        }
    }
}

impl FilterPath {
    fn resolve<'a>(&self, current: &'a Value, root: &'a Value) -> Option<Cow<'a, Value>> {
        let mut node = match self.root {
            PathRoot::Current => current,
            PathRoot::Document => root,
        };
        for (i, step) in self.steps.iter().enumerate() {
            let next = match (step, node) {
                (Step::Name(name), Value::Object(map)) => map.get(name),
                (Step::Name(name), Value::Array(items)) if name == "length" => {
                    return self.finish_length(i, items.len());
                }
                (Step::Name(name), Value::String(s)) if name == "length" => {
                    return self.finish_length(i, s.encode_utf16().count());
                }
                (Step::Index(index), Value::Array(items)) => normalize_index(*index, items.len())
                    .and_then(|idx| items.get(idx)),
                (Step::Index(index), Value::Object(map)) => map.get(&index.to_string()),
                _ => None,
            };
            node = next?;
        }
        Some(Cow::Borrowed(node))
    }

    /// `.length` yields a number, which has no members of its own.
    fn finish_length<'a>(&self, step: usize, len: usize) -> Option<Cow<'a, Value>> {
        (step + 1 == self.steps.len()).then(|| Cow::Owned(Value::from(len)))
    }
}

/// Resolve a possibly negative index against an array of length `len`.
pub(crate) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let idx = if index < 0 { len + index } else { index };
    if (0..len).contains(&idx) {
        usize::try_from(idx).ok()
    } else {
        None
    }
}

/// Scripting truthiness: missing, `null`, `false`, `0`, `NaN` and `""` are false.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Numeric coercion used by loose equality and ordering.
fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_) | Value::Object(_)) => f64::NAN,
    }
}

fn is_nullish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

#[allow(clippy::float_cmp)]
fn loose_eq(lhs: Option<&Value>, rhs: Option<&Value>) -> bool {
    if is_nullish(lhs) || is_nullish(rhs) {
        return is_nullish(lhs) && is_nullish(rhs);
    }
    match (lhs, rhs) {
        (Some(Value::String(a)), Some(Value::String(b))) => a == b,
        (Some(a @ (Value::Array(_) | Value::Object(_))), Some(b)) => a == b,
        (Some(_), Some(Value::Array(_) | Value::Object(_))) => false,
        _ => to_number(lhs) == to_number(rhs),
    }
}

#[allow(clippy::float_cmp)]
fn strict_eq(lhs: Option<&Value>, rhs: Option<&Value>) -> bool {
    match (lhs, rhs) {
        (None, None) => true,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (Some(a), Some(b)) => std::mem::discriminant(a) == std::mem::discriminant(b) && a == b,
        _ => false,
    }
}

fn compare(op: CompareOp, lhs: Option<&Value>, rhs: Option<&Value>) -> bool {
    match op {
        CompareOp::Eq => loose_eq(lhs, rhs),
        CompareOp::Ne => !loose_eq(lhs, rhs),
        CompareOp::StrictEq => strict_eq(lhs, rhs),
        CompareOp::StrictNe => !strict_eq(lhs, rhs),
        CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
            let ordering = match (lhs, rhs) {
                (Some(Value::String(a)), Some(Value::String(b))) => Some(a.cmp(b)),
                _ => to_number(lhs).partial_cmp(&to_number(rhs)),
            };
            ordering.is_some_and(|ord| match op {
                CompareOp::Lt => ord == Ordering::Less,
                CompareOp::Le => ord != Ordering::Greater,
                CompareOp::Gt => ord == Ordering::Greater,
                _ => ord != Ordering::Less,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn filter(text: &str) -> Expr {
        let mut parser = Parser::new(text);
        let expr = parser.parse_filter_expr().unwrap();
        parser.skip_ws();
        assert_eq!(parser.peek(), None, "trailing input in {text}");
        expr
    }

    fn sample() -> Value {
        json!({
            "id": 7,
            "entryPoint": "Harbour",
            "leavingDate": null,
            "presenceOfIndividuals": true,
            "count": "12",
            "analyzes": [{"person": "ana", "results": [{"n": 1}]}],
            "empty": ""
        })
    }

    #[rstest]
    #[case("@.entryPoint == 'Harbour'", true)]
    #[case("@.entryPoint=='Airport'", false)]
    #[case("@.entryPoint != 'Airport'", true)]
    #[case("@.leavingDate == null", true)]
    #[case("@.missing == null", true)]
    #[case("@.missing === null", false)]
    #[case("@.leavingDate === null", true)]
    #[case("@.leavingDate", false)]
    #[case("@.entryPoint", true)]
    #[case("!@.leavingDate", true)]
    #[case("@.empty", false)]
    #[case("@.presenceOfIndividuals==true", true)]
    #[case("@.presenceOfIndividuals==false", false)]
    #[case("@.count == 12", true)]
    #[case("@.count === 12", false)]
    #[case("@.count > 10", true)]
    #[case("@.id >= 7 && @.id < 8", true)]
    #[case("@.id < 3 || @.entryPoint == 'Harbour'", true)]
    #[case("(@.id < 3 || @.id > 10) && @.entryPoint == 'Harbour'", false)]
    #[case("@.analyzes.length == 1", true)]
    #[case("@.entryPoint.length == 7", true)]
    #[case("@.analyzes[0].person == 'ana'", true)]
    #[case("@.analyzes[-1]['person'] == \"ana\"", true)]
    #[case("@.analyzes[0].results[0].n == 1", true)]
    #[case("@.analyzes[3].person == 'ana'", false)]
    #[case("@.id == 7.0", true)]
    #[case("@.id > -1e2", true)]
    #[case("@.missing == undefined", true)]
    fn evaluates_against_sample(#[case] text: &str, #[case] expected: bool) {
        let value = sample();
        assert_eq!(filter(text).matches(&value, &value), expected, "{text}");
    }

    #[test]
    fn document_rooted_paths() {
        let root = json!({"threshold": 5, "items": [{"n": 3}, {"n": 8}]});
        let expr = filter("@.n > $.threshold");
        assert!(!expr.matches(&root["items"][0], &root));
        assert!(expr.matches(&root["items"][1], &root));
    }

    #[test]
    fn string_ordering_is_lexicographic() {
        let value = json!({"date": "2024-04-02"});
        assert!(filter("@.date >= '2024-04-01'").matches(&value, &value));
        assert!(!filter("@.date > '2024-05'").matches(&value, &value));
    }

    #[test]
    fn precedence_of_and_over_or() {
        assert_eq!(
            filter("@.a || @.b && @.c"),
            Expr::Or(
                Box::new(Expr::Path(FilterPath {
                    root: PathRoot::Current,
                    steps: vec![Step::Name("a".into())]
                })),
                Box::new(Expr::And(
                    Box::new(Expr::Path(FilterPath {
                        root: PathRoot::Current,
                        steps: vec![Step::Name("b".into())]
                    })),
                    Box::new(Expr::Path(FilterPath {
                        root: PathRoot::Current,
                        steps: vec![Step::Name("c".into())]
                    })),
                ))
            )
        );
    }

    #[test]
    fn rejects_bad_filters() {
        for text in ["@.a = 1", "@.a == ", "@.a == 'open", "@.a == bogus", "@[1.5] == 1"] {
            let mut parser = Parser::new(text);
            assert!(parser.parse_filter_expr().is_err(), "{text} should fail");
        }
    }

    #[rstest]
    #[case("@.a == bogus", 7)]
    #[case("@[1.5] == 1", 2)]
    #[case("@.a == 1e", 7)]
    fn errors_point_at_the_offending_token(#[case] text: &str, #[case] expected: usize) {
        let mut parser = Parser::new(text);
        match parser.parse_filter_expr() {
            Err(PathError::Syntax { offset, .. }) => assert_eq!(offset, expected, "{text}"),
            other => panic!("{text}: expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn normalize_index_bounds() {
        assert_eq!(normalize_index(0, 3), Some(0));
        assert_eq!(normalize_index(-1, 3), Some(2));
        assert_eq!(normalize_index(3, 3), None);
        assert_eq!(normalize_index(-4, 3), None);
    }
}
