use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `trapq` binary.
#[derive(Debug, Parser)]
#[command(
    name = "trapq",
    version,
    about = "Trapline - query trap and sampling collections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to general.default_format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root holding `.env` and `.trapline/config.toml` (defaults to
    /// the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers, taking the
    /// output format from configuration when none was given.
    pub fn global_flags(&self, default_format: &str) -> anyhow::Result<GlobalFlags> {
        let format = match self.format {
            Some(format) => format,
            None => default_format.parse()?,
        };
        Ok(GlobalFlags {
            format,
            quiet: self.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["trapq", "--format", "table", "--verbose", "health"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Table));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["trapq", "health", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Raw));
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["trapq", "--format", "xml", "health"]).is_err());
    }

    #[test]
    fn format_falls_back_to_configured_default() {
        let cli = Cli::try_parse_from(["trapq", "health"]).expect("cli should parse");
        let flags = cli.global_flags("table").expect("flags");
        assert_eq!(flags.format, OutputFormat::Table);

        let cli = Cli::try_parse_from(["trapq", "-f", "raw", "health"]).expect("cli should parse");
        assert_eq!(cli.global_flags("table").expect("flags").format, OutputFormat::Raw);

        let cli = Cli::try_parse_from(["trapq", "health"]).expect("cli should parse");
        assert!(cli.global_flags("yaml").is_err());
    }

    #[test]
    fn query_collects_targets_and_vars() {
        let cli = Cli::try_parse_from([
            "trapq",
            "query",
            "--from",
            "2024-03-01",
            "--to",
            "2024-03-31T23:59:59Z",
            "--target",
            "Traps:EP=$[*].entryPoint",
            "-t",
            "Samplings:ID=$[?(@.entryPoint=='$entry')].id",
            "--var",
            "entry=Harbour,Airport",
        ])
        .expect("cli should parse");

        let Commands::Query(args) = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(args.targets.len(), 2);
        assert_eq!(args.targets[1].target.field_name, "ID");
        assert_eq!(args.vars[0].values, vec!["Harbour", "Airport"]);
        assert!(args.from < args.to);
        assert!(!args.strict);
    }

    #[test]
    fn query_requires_a_target() {
        assert!(
            Cli::try_parse_from(["trapq", "query", "--from", "2024-03-01", "--to", "2024-03-02"])
                .is_err()
        );
    }

    #[test]
    fn variables_takes_a_name() {
        let cli = Cli::try_parse_from(["trapq", "variables", "Persons", "--project", "/tmp/demo"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Variables(ref args) if args.name == "Persons"));
        assert_eq!(cli.project.as_deref(), Some("/tmp/demo"));
    }
}
