use anyhow::Context;
use trap_core::VariableQuery;
use trap_query::DataSource;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::VariablesArgs;
use crate::output::output;

/// Handle `trapq variables <name>`.
pub async fn handle(
    args: &VariablesArgs,
    source: &DataSource,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if VariableQuery::parse(args.name.trim()).is_none() {
        tracing::warn!(name = %args.name, "unknown variable; expected Persons or EntryPoints");
    }
    let values = source
        .metric_find_query(&args.name)
        .await
        .with_context(|| format!("failed to list values of variable '{}'", args.name))?;
    output(&values, flags.format)
}
