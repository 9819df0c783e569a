//! Template-variable substitution in query text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(\w+)\}|\[\[(\w+)\]\]|\$(\w+)").expect("valid regex")
});

/// Replaces template variables in a target's query text before it is
/// evaluated.
pub trait Substitutor: Send + Sync {
    fn substitute(&self, text: &str) -> String;
}

/// Named variables with one or more selected values.
///
/// `$name`, `${name}` and `[[name]]` are replaced. A single value is inserted
/// as-is; several values render as `{v1,v2}`, which the set-membership rewrite
/// expands. References to unknown variables are left in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVariables {
    values: HashMap<String, Vec<String>>,
}

impl TemplateVariables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Self::insert`].
    #[must_use]
    pub fn with<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, values);
        self
    }

    pub fn insert<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .insert(name.into(), values.into_iter().map(Into::into).collect());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn render(values: &[String]) -> String {
        match values {
            [single] => single.clone(),
            many => format!("{{{}}}", many.join(",")),
        }
    }
}

impl Substitutor for TemplateVariables {
    fn substitute(&self, text: &str) -> String {
        if self.values.is_empty() {
            return text.to_string();
        }
        VARIABLE
            .replace_all(text, |caps: &Captures<'_>| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map_or("", |m| m.as_str());
                self.values.get(name).map_or_else(
                    || caps.get(0).map_or_else(String::new, |m| m.as_str().to_string()),
                    |values| Self::render(values),
                )
            })
            .into_owned()
    }
}
