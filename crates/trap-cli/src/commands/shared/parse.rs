use chrono::{DateTime, Utc};
use trap_core::{QueryTarget, QueryType};

/// A `--target` argument: `<Traps|Samplings>:<field>=<path query>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSpec {
    pub target: QueryTarget,
}

/// A `--var` argument: `name=v1,v2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarSpec {
    pub name: String,
    pub values: Vec<String>,
}

/// Parse a range bound in any of the date formats upstream records use.
pub fn parse_instant_arg(raw: &str) -> Result<DateTime<Utc>, String> {
    trap_query::parse_instant(raw).ok_or_else(|| format!("invalid date '{raw}'"))
}

/// Parse a `--target` value. The query type must be `Traps` or `Samplings`;
/// the query itself is everything after the first `=`, so it may contain `=`.
pub fn parse_target(raw: &str) -> Result<TargetSpec, String> {
    let (kind, rest) = raw
        .split_once(':')
        .ok_or_else(|| format!("invalid target '{raw}': expected <Type>:<field>=<query>"))?;
    let (field, query) = rest
        .split_once('=')
        .ok_or_else(|| format!("invalid target '{raw}': expected <Type>:<field>=<query>"))?;

    let query_type = QueryType::parse(kind.trim());
    if query_type == QueryType::Unknown {
        return Err(format!(
            "invalid target '{raw}': query type must be Traps or Samplings, got '{kind}'"
        ));
    }
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("invalid target '{raw}': field name is empty"));
    }

    Ok(TargetSpec {
        target: QueryTarget::new(query_type, query, field),
    })
}

/// Parse a `--var` value; values are split on commas.
pub fn parse_var(raw: &str) -> Result<VarSpec, String> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid variable '{raw}': expected name=value[,value...]"))?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(format!("invalid variable name '{name}'"));
    }
    Ok(VarSpec {
        name: name.to_string(),
        values: values.split(',').map(str::to_string).collect(),
    })
}
