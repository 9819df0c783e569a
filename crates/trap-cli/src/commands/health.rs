use trap_query::DataSource;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `trapq health`.
pub fn handle(source: &DataSource, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !source.config().is_configured() {
        tracing::warn!("api.traps_url / api.samplings_url are not set; queries will return nothing");
    }
    output(&source.test_datasource(), flags.format)
}
