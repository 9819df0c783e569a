use anyhow::Context;
use trap_core::{QueryRequest, TimeRange};
use trap_query::{DataSource, TemplateVariables};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::QueryArgs;
use crate::output::output_response;

/// Handle `trapq query`.
pub async fn handle(args: &QueryArgs, source: &DataSource, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = build_request(args)?;
    let vars = build_variables(args);

    let response = if args.strict {
        source
            .try_query(&request, &vars)
            .await
            .context("query invocation failed")?
    } else {
        source.query(&request, &vars).await
    };
    output_response(&response, flags.format)
}

fn build_request(args: &QueryArgs) -> anyhow::Result<QueryRequest> {
    if args.from > args.to {
        anyhow::bail!("--from ({}) is after --to ({})", args.from, args.to);
    }
    Ok(QueryRequest {
        range: TimeRange::new(args.from, args.to),
        targets: args.targets.iter().map(|spec| spec.target.clone()).collect(),
    })
}

fn build_variables(args: &QueryArgs) -> TemplateVariables {
    let mut vars = TemplateVariables::new();
    for var in &args.vars {
        vars.insert(var.name.clone(), var.values.iter().cloned());
    }
    vars
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use trap_query::Substitutor;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn query_args(extra: &[&str]) -> QueryArgs {
        let mut argv = vec!["trapq", "query", "--target", "Traps:ID=$[*].id"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).expect("cli should parse").command {
            Commands::Query(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn request_keeps_range_and_targets() {
        let args = query_args(&["--from", "2024-03-01", "--to", "2024-03-31"]);
        let request = build_request(&args).expect("request");
        assert_eq!(request.range.from, args.from);
        assert_eq!(request.range.to, args.to);
        assert_eq!(request.targets.len(), 1);
        assert_eq!(request.targets[0].field_name, "ID");
    }

    #[test]
    fn reversed_range_is_rejected() {
        let args = query_args(&["--from", "2024-03-31", "--to", "2024-03-01"]);
        let err = build_request(&args).expect_err("should fail");
        assert!(err.to_string().contains("is after"));
    }

    #[test]
    fn variables_feed_substitution() {
        let args = query_args(&[
            "--from",
            "2024-03-01",
            "--to",
            "2024-03-31",
            "--var",
            "entry=Harbour,Airport",
            "--var",
            "island=North",
        ]);
        let vars = build_variables(&args);
        assert_eq!(vars.substitute("$entry/${island}"), "{Harbour,Airport}/North");
    }
}
