//! Query pipeline error types.

use std::time::Duration;

use thiserror::Error;
use trap_api::ApiError;
use trap_config::ConfigError;
use trap_path::PathError;

/// Anything that aborts a query invocation or a variable listing.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Fetching either collection failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A target's query text is not a valid path query.
    #[error("invalid query for field {field:?}: {source}")]
    Path {
        field: String,
        #[source]
        source: PathError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The whole invocation ran past its deadline.
    #[error("query invocation exceeded its {0:?} deadline")]
    Deadline(Duration),

    /// Records could not be turned into queryable JSON.
    #[error("cannot serialize {collection}: {source}")]
    Serialize {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
