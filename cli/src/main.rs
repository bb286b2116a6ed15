use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use formkit_config::presets::create_function_form;
use formkit_config::{ActionScript, FormDefinition};
use formkit_core::OutputNode;
use formkit_widgets::Outcome;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for normalized records.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "formkit")]
#[command(about = "Validate form definitions and replay scripted form input")]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and validate one or more form definitions.
    Check(CheckArgs),
    /// Run an action script against a form and print the submitted record.
    Replay(ReplayArgs),
    /// Write the built-in "create new function" form definition.
    Preset(PresetArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Definition files (YAML or JSON).
    #[arg(required = true)]
    definitions: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ReplayArgs {
    /// Form definition file.
    #[arg(long)]
    definition: PathBuf,
    /// Action script file.
    #[arg(long)]
    script: PathBuf,
    /// Output format for the record.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct PresetArgs {
    /// Destination file; YAML or JSON by extension. Prints YAML when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Replay(args) => run_replay(args),
        Command::Preset(args) => run_preset(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_definition(path: &Path) -> Result<FormDefinition, String> {
    FormDefinition::load(path)
        .map_err(|err| format!("Failed to load definition '{}': {err}", path.display()))
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    for path in &args.definitions {
        let definition = load_definition(path)?;
        let session = definition
            .build_session()
            .map_err(|err| format!("'{}': {err}", path.display()))?;

        let invalid = session.state().invalid_fields();
        if invalid.is_empty() {
            println!(
                "'{}': {} field(s), initially valid.",
                path.display(),
                session.state().len()
            );
        } else {
            println!(
                "'{}': {} field(s), initially invalid ({}).",
                path.display(),
                session.state().len(),
                invalid.join(", ")
            );
        }
    }
    println!("Checked {} definition(s).", args.definitions.len());
    Ok(())
}

fn run_replay(args: ReplayArgs) -> Result<(), String> {
    let definition = load_definition(&args.definition)?;
    let script = ActionScript::load(&args.script)
        .map_err(|err| format!("Failed to load script '{}': {err}", args.script.display()))?;

    let mut session = definition.build_session().map_err(|err| err.to_string())?;
    let outcomes = script.run(&mut session).map_err(|err| err.to_string())?;

    let mut records: Vec<OutputNode> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            Outcome::Submitted(record) => Some(record),
            Outcome::Changed { .. } => None,
        })
        .collect();
    if records.is_empty() {
        debug!("Script did not submit; printing current record");
        records.push(session.state().normalize());
    }

    for record in &records {
        println!("{}", render(record, args.format)?);
    }
    Ok(())
}

fn run_preset(args: PresetArgs) -> Result<(), String> {
    let definition = create_function_form();
    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|err| {
                        format!(
                            "Failed to create output directory '{}': {err}",
                            parent.display()
                        )
                    })?;
                }
            }
            definition
                .save(&path)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            println!("Wrote preset to '{}'.", path.display());
        }
        None => {
            let raw = serde_yaml::to_string(&definition)
                .map_err(|err| format!("Failed to serialize preset: {err}"))?;
            print!("{raw}");
        }
    }
    Ok(())
}

fn render(record: &OutputNode, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(record)
            .map_err(|err| format!("Failed to serialize record: {err}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(record)
            .map(|raw| raw.trim_end().to_string())
            .map_err(|err| format!("Failed to serialize record: {err}")),
    }
}
