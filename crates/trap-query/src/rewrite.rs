//! Rewriting of the user-facing filter shorthand into plain path-query syntax.
//!
//! Two passes run in order:
//!
//! 1. Set membership. `@.entryPoint == '{A,B}'`, which is what a multi-valued
//!    template variable renders to, becomes
//!    `@.entryPoint == 'A' || @.entryPoint == 'B'`. The query is first split
//!    into [`Clause`]s so every value list stays with the field written in
//!    front of it.
//! 2. Synonyms. `'ACTIVE'`/`'INACTIVE'` on `leavingDate` become a null test
//!    and a presence test; quoted `'true'`/`'false'` on
//!    `presenceOfIndividuals` become boolean literals.
//!
//! Rewriting already rewritten text changes nothing.

use std::sync::LazyLock;

use regex::Regex;

static SET_MEMBERSHIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(@\.[^\s=!<>'"()|&]+)\s*==\s*'\{([^}]*)\}'"#).expect("valid regex")
});

static SYNONYMS: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"@\.leavingDate\s*==\s*'ACTIVE'").expect("valid regex"),
            "@.leavingDate == null",
        ),
        (
            Regex::new(r"@\.leavingDate\s*==\s*'INACTIVE'").expect("valid regex"),
            "@.leavingDate",
        ),
        (
            Regex::new(r"@\.presenceOfIndividuals\s*==\s*'true'").expect("valid regex"),
            "@.presenceOfIndividuals==true",
        ),
        (
            Regex::new(r"@\.presenceOfIndividuals\s*==\s*'false'").expect("valid regex"),
            "@.presenceOfIndividuals==false",
        ),
    ]
});

/// A piece of query text: either passed through verbatim or a set-membership
/// test to expand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Text(String),
    SetMembership { field: String, values: Vec<String> },
}

impl Clause {
    fn render_into(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::SetMembership { field, values } => {
                let alternatives: Vec<String> = values
                    .iter()
                    .map(|value| format!("{field} == '{value}'"))
                    .collect();
                out.push_str(&alternatives.join(" || "));
            }
        }
    }
}

/// Split `text` into verbatim runs and set-membership clauses. Values are
/// split on commas and kept exactly as written.
#[must_use]
pub fn parse_clauses(text: &str) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let mut last = 0;
    for caps in SET_MEMBERSHIP.captures_iter(text) {
        let (Some(whole), Some(field), Some(values)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        if whole.start() > last {
            clauses.push(Clause::Text(text[last..whole.start()].to_string()));
        }
        clauses.push(Clause::SetMembership {
            field: field.as_str().to_string(),
            values: values.as_str().split(',').map(str::to_string).collect(),
        });
        last = whole.end();
    }
    if last < text.len() {
        clauses.push(Clause::Text(text[last..].to_string()));
    }
    clauses
}

/// Join clauses back into query text.
#[must_use]
pub fn render(clauses: &[Clause]) -> String {
    let mut out = String::new();
    for clause in clauses {
        clause.render_into(&mut out);
    }
    out
}

/// Apply both rewriting passes.
#[must_use]
pub fn rewrite(text: &str) -> String {
    let mut query = render(&parse_clauses(text));
    for (pattern, replacement) in SYNONYMS.iter() {
        query = pattern.replace_all(&query, *replacement).into_owned();
    }
    query
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "$[?(@.entryPoint=='{A,B,C}')].id",
        "$[?(@.entryPoint == 'A' || @.entryPoint == 'B' || @.entryPoint == 'C')].id"
    )]
    #[case(
        "$[?(@.island == '{North}')].id",
        "$[?(@.island == 'North')].id"
    )]
    #[case(
        "$[?(@.analyzes[0].person=='{ana,luis}')].date",
        "$[?(@.analyzes[0].person == 'ana' || @.analyzes[0].person == 'luis')].date"
    )]
    #[case(
        "$[?(@.entryPoint=='{Old Harbour, Airport}')].id",
        "$[?(@.entryPoint == 'Old Harbour' || @.entryPoint == ' Airport')].id"
    )]
    fn expands_set_membership(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite(input), expected);
    }

    #[rstest]
    #[case("@.leavingDate == 'ACTIVE'", "@.leavingDate == null")]
    #[case("@.leavingDate=='ACTIVE'", "@.leavingDate == null")]
    #[case("@.leavingDate == 'INACTIVE'", "@.leavingDate")]
    #[case("@.presenceOfIndividuals == 'true'", "@.presenceOfIndividuals==true")]
    #[case("@.presenceOfIndividuals=='false'", "@.presenceOfIndividuals==false")]
    #[case("@.leavingDate == 'active'", "@.leavingDate == 'active'")]
    fn applies_synonyms(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite(input), expected);
    }

    #[test]
    fn each_field_keeps_its_own_values() {
        let query = "$[?(@.island=='{North,South}' && @.entryPoint=='{Harbour}')].id";
        assert_eq!(
            parse_clauses(query),
            vec![
                Clause::Text("$[?(".into()),
                Clause::SetMembership {
                    field: "@.island".into(),
                    values: vec!["North".into(), "South".into()],
                },
                Clause::Text(" && ".into()),
                Clause::SetMembership {
                    field: "@.entryPoint".into(),
                    values: vec!["Harbour".into()],
                },
                Clause::Text(")].id".into()),
            ]
        );
        assert_eq!(
            rewrite(query),
            "$[?(@.island == 'North' || @.island == 'South' && @.entryPoint == 'Harbour')].id"
        );
    }

    #[test]
    fn both_passes_combine() {
        assert_eq!(
            rewrite("$[?(@.entryPoint=='{A,B}' && @.leavingDate == 'ACTIVE')].id"),
            "$[?(@.entryPoint == 'A' || @.entryPoint == 'B' && @.leavingDate == null)].id"
        );
    }

    #[rstest]
    #[case("$[?(@.entryPoint=='{A,B,C}')].id")]
    #[case("$[?(@.leavingDate == 'INACTIVE')].entryPoint")]
    #[case("$[?(@.presenceOfIndividuals == 'true' && @.island=='{N,S}')].id")]
    fn rewriting_is_idempotent(#[case] input: &str) {
        let once = rewrite(input);
        assert_eq!(rewrite(&once), once);
    }

    #[test]
    fn plain_text_is_untouched() {
        let query = "$[?(@.entryPoint == 'Harbour')].id";
        assert_eq!(parse_clauses(query), vec![Clause::Text(query.into())]);
        assert_eq!(rewrite(query), query);
        assert!(parse_clauses("").is_empty());
    }
}
