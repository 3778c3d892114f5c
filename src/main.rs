//! validgen CLI - generate Valid() methods for Go structs
//!
//! Usage: validgen --type <A,B> [OPTIONS] <FILE>
//!
//! Writes `<stem>_validgen.go` next to FILE unless `--out`, `--stdout`,
//! `--check` or `--dump` says otherwise.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use validgen::config::Config;
use validgen::pipeline::{self, parse_type_list, GenerateRequest, OutputMode, RunOutcome};
use validgen::{logging, CheckOutcome, ValidgenError};

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(status) => std::process::exit(status),
        Err(err) => {
            if let Some(output) = err
                .downcast_ref::<ValidgenError>()
                .and_then(ValidgenError::output)
            {
                debug!("rejected output:\n{}", output);
            }
            eprintln!("error: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(tag) = &cli.tag {
        config.generate.tag = tag.clone();
    }
    if let Some(method) = &cli.method {
        config.generate.method = method.clone();
    }
    if let Some(suffix) = &cli.suffix {
        config.generate.suffix = suffix.clone();
    }
}

fn output_mode(cli: &Cli) -> OutputMode {
    if cli.dump {
        OutputMode::Dump
    } else if cli.check {
        OutputMode::Check
    } else if cli.stdout {
        OutputMode::Stdout
    } else {
        OutputMode::Write
    }
}

fn run(cli: Cli) -> Result<i32> {
    let source_dir = pipeline::source_dir(&cli.file);
    let (mut config, warnings) = Config::load_or_default(cli.config.as_deref(), Some(source_dir))
        .context("failed to load configuration")?;

    logging::init(logging::level_for(cli.verbose, config.output.verbosity));
    for warning in &warnings {
        warn!("{}", warning);
    }
    apply_cli_overrides(&mut config, &cli);

    let mode = output_mode(&cli);
    let types = cli.types.as_deref().map(parse_type_list).unwrap_or_default();
    if types.is_empty() && mode != OutputMode::Dump {
        bail!("--type must name at least one struct");
    }

    let request = GenerateRequest {
        source: cli.file.clone(),
        types,
        out: cli.out.clone(),
        mode,
    };
    let outcome = pipeline::run(&request, &config)
        .with_context(|| format!("failed to generate from {}", cli.file.display()))?;

    match outcome {
        RunOutcome::Written { .. } => Ok(0),
        RunOutcome::Printed { code } => {
            print!("{}", code);
            Ok(0)
        }
        RunOutcome::Checked { path, outcome } => match outcome {
            CheckOutcome::UpToDate => Ok(0),
            CheckOutcome::Missing => {
                eprintln!("{} does not exist", path.display());
                Ok(1)
            }
            CheckOutcome::Stale { diff } => {
                print!("{}", diff);
                eprintln!("{} is out of date", path.display());
                Ok(1)
            }
        },
        RunOutcome::Dumped { package } => {
            let json = serde_json::to_string_pretty(&package).context("failed to encode declarations")?;
            println!("{}", json);
            Ok(0)
        }
    }
}
