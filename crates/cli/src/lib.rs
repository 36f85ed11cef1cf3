//! Command line access to the filter compiler and the operator registry.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use filter_editor_configuration::environment::Environment;
use filter_editor_configuration::{
    make_runtime_configuration, parse_configuration, write_parsed_configuration, Configuration,
    ParsedConfiguration, CONFIGURATION_FILENAME,
};
use query_engine_metadata::metadata::{list_operators, Dialect, FilterGroupSequence};
use query_engine_translation::translation::query::compile;
use tokio::io::AsyncReadExt;

#[derive(Debug, Parser)]
#[command(name = "filter-cli", version, about = "Compile saved filters into query dialects")]
pub struct Arguments {
    /// The directory holding the editor configuration.
    #[arg(long, env = "FILTER_EDITOR_CONFIGURATION_DIR", default_value = ".")]
    pub configuration: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a filter group sequence, read as JSON from a file or stdin.
    Compile {
        /// Defaults to the configured dialect.
        #[arg(long)]
        dialect: Option<Dialect>,
        file: Option<PathBuf>,
    },
    /// List the operators a dialect supports, as JSON.
    Operators {
        #[arg(long)]
        dialect: Option<Dialect>,
    },
    /// Print a JSON schema.
    Schema {
        #[arg(long, value_enum, default_value_t = SchemaKind::Filter)]
        of: SchemaKind,
    },
    /// Write a configuration file with the default settings.
    Initialize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    /// The saved filter format.
    Filter,
    /// The configuration file format.
    Configuration,
}

/// Run a command, writing its output to `out`.
pub async fn run(
    arguments: Arguments,
    environment: impl Environment,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match arguments.command {
        Command::Compile { dialect, file } => {
            let configuration = read_configuration(&arguments.configuration, environment).await?;
            let dialect = dialect.unwrap_or(configuration.editor.dialect);
            let input = read_input(file.as_deref()).await?;
            let sequence: FilterGroupSequence =
                serde_json::from_str(&input).context("the input is not a filter group sequence")?;
            let compiled = compile(&sequence, dialect)?;
            tracing::info!(%dialect, groups = sequence.groups().len(), "compiled filter");
            writeln!(out, "{compiled}")?;
        }
        Command::Operators { dialect } => {
            let configuration = read_configuration(&arguments.configuration, environment).await?;
            let dialect = dialect.unwrap_or(configuration.editor.dialect);
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&list_operators(dialect))?
            )?;
        }
        Command::Schema { of } => {
            let schema = match of {
                SchemaKind::Filter => schemars::schema_for!(FilterGroupSequence),
                SchemaKind::Configuration => schemars::schema_for!(ParsedConfiguration),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
        }
        Command::Initialize => {
            let configuration_file = arguments.configuration.join(CONFIGURATION_FILENAME);
            if tokio::fs::try_exists(&configuration_file).await? {
                bail!("{} already exists", configuration_file.display());
            }
            write_parsed_configuration(&ParsedConfiguration::initial(), &arguments.configuration)
                .await?;
            tracing::info!(path = %configuration_file.display(), "wrote configuration");
            writeln!(out, "{}", configuration_file.display())?;
        }
    }
    Ok(())
}

async fn read_configuration(
    configuration_dir: &Path,
    environment: impl Environment,
) -> anyhow::Result<Configuration> {
    let parsed = parse_configuration(configuration_dir).await?;
    Ok(make_runtime_configuration(parsed, environment)?)
}

async fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("unable to read {}", path.display())),
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("unable to read stdin")?;
            Ok(input)
        }
    }
}
