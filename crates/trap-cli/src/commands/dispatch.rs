use trap_query::DataSource;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: &Commands,
    source: &DataSource,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Query(args) => commands::query::handle(args, source, flags).await,
        Commands::Variables(args) => commands::variables::handle(args, source, flags).await,
        Commands::Health => commands::health::handle(source, flags),
    }
}
