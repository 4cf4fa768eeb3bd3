// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line interface for fake generation
//!
//! Reads a Go file or a package directory and writes one fake per interface.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fakegen::diagnostics::{Diagnostic, DiagnosticFormatter, Format};
use fakegen::{GenerationOutput, GeneratorConfig, Renderer, generate, parse_unit};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fakegen")]
#[command(about = "Generate thread-safe test fakes for Go interfaces")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that reads declarations
#[derive(clap::Args)]
struct SourceArgs {
    /// Go file or package directory to read interfaces from
    path: PathBuf,
    /// Only handle these interfaces; comma separated or repeated
    #[arg(short, long = "select", value_delimiter = ',')]
    select: Vec<String>,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Import path of the package being faked
    #[arg(long)]
    source_import: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fakes and write them to the fake directory
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        /// Directory to write the fakes to; defaults to `<parent of PATH>/fake`
        #[arg(short = 'd', long = "fake-dir")]
        fake_dir: Option<PathBuf>,
        /// Package clause of the generated files
        #[arg(short, long)]
        package: Option<String>,
        /// Leave out the generated-code header comment
        #[arg(long)]
        no_header: bool,
    },
    /// Print the resolved contract model as JSON
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() -> ExitCode {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            source,
            fake_dir,
            package,
            no_header,
        } => {
            let mut config = load_config(&source)?;
            if let Some(package) = package {
                config.package = package;
            }
            if no_header {
                config.header = false;
            }
            let fake_dir = fake_dir.unwrap_or_else(|| default_fake_dir(&source.path));
            handle_generate(&source.path, config, &fake_dir)
        }
        Commands::Inspect { source } => {
            let config = load_config(&source)?;
            handle_inspect(&source.path, config)
        }
    }
}

fn load_config(args: &SourceArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            GeneratorConfig::from_toml_str(&content)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if !args.select.is_empty() {
        config.select = args.select.clone();
    }
    if let Some(source_import) = &args.source_import {
        config.source_import = Some(source_import.clone());
    }
    config.validate()?;
    Ok(config)
}

fn default_fake_dir(path: &Path) -> PathBuf {
    path.parent().unwrap_or_else(|| Path::new("")).join("fake")
}

/// Non-test Go files named by `path`, sorted
fn collect_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("{} is neither a file nor a directory", path.display());
    }

    let pattern = path.join("*.go");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("path {} is not valid UTF-8", path.display()))?;

    let mut files = Vec::new();
    for entry in glob::glob(pattern).context("invalid source pattern")? {
        let file = entry?;
        let is_test = file
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with("_test.go"));
        if !is_test {
            files.push(file);
        }
    }
    files.sort();

    if files.is_empty() {
        bail!("no Go files found in {}", path.display());
    }
    Ok(files)
}

/// Parse every source file; `None` when a parse error was reported
fn parse_sources(path: &Path) -> Result<Option<Vec<fakegen::ast::SourceUnit>>> {
    let mut units = Vec::new();
    let mut failed = false;

    for file in collect_sources(path)? {
        let source = fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let name = file.display().to_string();
        match parse_unit(&name, &source) {
            Ok(unit) => units.push(unit),
            Err(error) => {
                print_diagnostics(&[error.to_diagnostic(&name, &source)]);
                failed = true;
            }
        }
    }

    Ok((!failed).then_some(units))
}

fn run_pipeline(path: &Path, config: GeneratorConfig) -> Result<Option<GenerationOutput>> {
    let Some(units) = parse_sources(path)? else {
        return Ok(None);
    };

    match generate(&units, config) {
        Ok(output) => {
            print_diagnostics(output.diagnostics.diagnostics());
            Ok((!output.has_errors()).then_some(output))
        }
        Err(error) => {
            print_diagnostics(&[error.to_diagnostic()]);
            Ok(None)
        }
    }
}

fn handle_generate(path: &Path, config: GeneratorConfig, fake_dir: &Path) -> Result<ExitCode> {
    let renderer = Renderer::new().with_header(config.header);
    let Some(output) = run_pipeline(path, config)? else {
        return Ok(ExitCode::FAILURE);
    };

    let rendered = output.render(&renderer);
    if rendered.is_empty() {
        log::warn!("no interfaces to fake in {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    fs::create_dir_all(fake_dir)
        .with_context(|| format!("failed to create {}", fake_dir.display()))?;
    for (file_name, text) in rendered {
        let target = fake_dir.join(file_name);
        fs::write(&target, text).with_context(|| format!("failed to write {}", target.display()))?;
        println!("{}", target.display());
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct InspectReport<'a> {
    package: &'a str,
    contracts: &'a [fakegen::Contract],
    diagnostics: &'a [Diagnostic],
}

fn handle_inspect(path: &Path, config: GeneratorConfig) -> Result<ExitCode> {
    let Some(output) = run_pipeline(path, config)? else {
        return Ok(ExitCode::FAILURE);
    };

    let report = InspectReport {
        package: &output.package,
        contracts: &output.contracts,
        diagnostics: output.diagnostics.diagnostics(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::SUCCESS)
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let formatter = DiagnosticFormatter::new(Format::Text);
    #[cfg(feature = "terminal")]
    let formatter = {
        use std::io::IsTerminal;
        formatter.with_color(std::io::stderr().is_terminal())
    };
    eprint!("{}", formatter.format_all(diagnostics));
}
