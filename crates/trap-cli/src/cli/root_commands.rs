use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use crate::commands::shared::parse::{TargetSpec, VarSpec, parse_instant_arg, parse_target, parse_var};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run one query invocation and print the resulting fields.
    Query(QueryArgs),
    /// List the values of a dashboard variable.
    Variables(VariablesArgs),
    /// Report data source health.
    Health,
}

#[derive(Clone, Debug, Args)]
pub struct QueryArgs {
    /// Range start (RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`, UTC).
    #[arg(long, value_parser = parse_instant_arg)]
    pub from: DateTime<Utc>,

    /// Range end, inclusive. Same formats as `--from`.
    #[arg(long, value_parser = parse_instant_arg)]
    pub to: DateTime<Utc>,

    /// Query target as `<Traps|Samplings>:<field>=<path query>`; repeatable,
    /// fields come out in the order given.
    #[arg(long = "target", short = 't', required = true, value_parser = parse_target)]
    pub targets: Vec<TargetSpec>,

    /// Template variable as `name=v1,v2`; repeatable.
    #[arg(long = "var", value_parser = parse_var)]
    pub vars: Vec<VarSpec>,

    /// Fail with the pipeline error instead of printing an empty response.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct VariablesArgs {
    /// Variable to list: Persons or EntryPoints.
    pub name: String,
}
