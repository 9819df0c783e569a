//! Query invocation, variable listing and health check.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use trap_api::{ApiClient, Snapshot};
use trap_config::ApiConfig;
use trap_core::{
    Field, HealthStatus, MetricFindValue, QueryRequest, QueryResponse, QueryTarget, QueryType,
    VariableQuery,
};

use crate::enrich::{enrich, trap_index};
use crate::error::QueryError;
use crate::flatten::{FlattenMode, flatten};
use crate::projection::{assemble, project};
use crate::rewrite::rewrite;
use crate::template::Substitutor;
use crate::time_range::{filter_samplings, filter_traps};
use crate::variables::{entry_points, persons};

/// Answers query requests against freshly fetched trap and sampling
/// collections. Nothing is cached between invocations.
#[derive(Debug, Clone)]
pub struct DataSource {
    config: ApiConfig,
}

impl DataSource {
    #[must_use]
    pub const fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Run one invocation. Any failure is logged and yields an empty
    /// response; see [`Self::try_query`] for the failing variant.
    pub async fn query(&self, request: &QueryRequest, vars: &dyn Substitutor) -> QueryResponse {
        match self.try_query(request, vars).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, targets = request.targets.len(), "query invocation failed");
                QueryResponse::empty()
            }
        }
    }

    /// Run one invocation: fetch both collections (with fallback), then
    /// evaluate every target in order.
    ///
    /// A request without targets returns an empty response without fetching.
    ///
    /// # Errors
    ///
    /// Configuration, fetch and query errors abort the whole invocation, as
    /// does running past the configured invocation deadline.
    pub async fn try_query(
        &self,
        request: &QueryRequest,
        vars: &dyn Substitutor,
    ) -> Result<QueryResponse, QueryError> {
        if request.targets.is_empty() {
            return Ok(QueryResponse::empty());
        }
        self.config.validate()?;
        let client = ApiClient::new(&self.config)?;
        let snapshot = self.bounded(client.fetch_snapshot()).await??;
        run_targets(&snapshot, request, vars)
    }

    /// List the values of a dashboard variable (`Persons` or
    /// `EntryPoints`). Unknown names list nothing.
    ///
    /// # Errors
    ///
    /// Fetch failures propagate once the fallback endpoint has been tried
    /// for connectivity errors.
    pub async fn metric_find_query(&self, name: &str) -> Result<Vec<MetricFindValue>, QueryError> {
        let Some(variable) = VariableQuery::parse(name.trim()) else {
            tracing::debug!(name, "unknown variable query");
            return Ok(Vec::new());
        };
        self.config.validate()?;
        let client = ApiClient::new(&self.config)?;
        let values = match variable {
            VariableQuery::Persons => {
                persons(&self.bounded(client.fetch_samplings_with_fallback()).await??)
            }
            VariableQuery::EntryPoints => {
                entry_points(&self.bounded(client.fetch_traps_with_fallback()).await??)
            }
        };
        tracing::debug!(%variable, count = values.len(), "listed variable values");
        Ok(values.into_iter().map(MetricFindValue::new).collect())
    }

    /// The data source has no connection of its own to check.
    #[must_use]
    pub fn test_datasource(&self) -> HealthStatus {
        HealthStatus::success()
    }

    async fn bounded<F: Future>(&self, work: F) -> Result<F::Output, QueryError> {
        let deadline = self.config.invocation_deadline();
        tokio::time::timeout(deadline, work)
            .await
            .map_err(|_| QueryError::Deadline(deadline))
    }
}

/// Evaluate every target of `request` against an already fetched snapshot.
///
/// Traps are filtered on installation date. Samplings are filtered on
/// observation date, enriched from the unfiltered traps and flattened per
/// target according to the fields its query references. A target whose
/// resolved query text is blank produces no field; a target of unknown type
/// produces a field without values.
///
/// # Errors
///
/// The first query that does not parse aborts the whole run.
pub fn run_targets(
    snapshot: &Snapshot,
    request: &QueryRequest,
    vars: &dyn Substitutor,
) -> Result<QueryResponse, QueryError> {
    let traps = to_json("traps", &filter_traps(&snapshot.traps, &request.range))?;
    let mut samplings = enrich(
        filter_samplings(&snapshot.samplings, &request.range),
        &trap_index(&snapshot.traps),
    );
    tracing::debug!(
        traps = traps.as_array().map_or(0, Vec::len),
        samplings = samplings.len(),
        "snapshot filtered to range"
    );

    let mut fields = Vec::with_capacity(request.targets.len());
    let mut last_query = None;
    for target in &request.targets {
        let query = resolve_query(target, vars);
        last_query = Some(query.clone());
        if query.trim().is_empty() {
            tracing::debug!(field = %target.field_name, "skipping target without query");
            continue;
        }

        let field = match target.query_type {
            QueryType::Traps => select(&traps, &query, &target.field_name)?,
            QueryType::Samplings => {
                let mode = FlattenMode::detect(&query);
                tracing::debug!(field = %target.field_name, ?mode, "flattening samplings");
                samplings = flatten(std::mem::take(&mut samplings), mode);
                let rows = to_json("samplings", &samplings)?;
                select(&rows, &query, &target.field_name)?
            }
            QueryType::Unknown => {
                tracing::warn!(field = %target.field_name, "unknown query type, field left empty");
                Field::other(target.field_name.clone(), Vec::new())
            }
        };
        fields.push(field);
    }
    Ok(assemble(fields, last_query.as_deref()))
}

/// Substitute template variables; rewrite only if that changed the text.
fn resolve_query(target: &QueryTarget, vars: &dyn Substitutor) -> String {
    let raw = target.query_text.as_deref().unwrap_or_default();
    let substituted = vars.substitute(raw);
    if substituted == raw {
        substituted
    } else {
        let rewritten = rewrite(&substituted);
        tracing::debug!(raw, query = %rewritten, "rewrote substituted query");
        rewritten
    }
}

fn select(root: &Value, query: &str, field_name: &str) -> Result<Field, QueryError> {
    let matches = trap_path::query(root, query).map_err(|source| QueryError::Path {
        field: field_name.to_string(),
        source,
    })?;
    Ok(project(field_name, matches))
}

fn to_json<T: Serialize>(collection: &'static str, records: &[T]) -> Result<Value, QueryError> {
    serde_json::to_value(records).map_err(|source| QueryError::Serialize { collection, source })
}
