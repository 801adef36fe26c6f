use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use yamlselect::config::{Config, OutputFormat};
use yamlselect::document::cursor::NodeRef;
use yamlselect::document::tree::YamlTree;
use yamlselect::file::loader::{load_yaml_file, load_yaml_from_stdin};
use yamlselect::yamlpath::{self, PathException};

/// yamlselect - select values from YAML documents with path expressions
#[derive(Parser)]
#[command(name = "yamlselect")]
#[command(version)]
#[command(about = "Select values from YAML documents with path expressions", long_about = None)]
struct Cli {
    /// Path expression, e.g. `users[active=true].name`
    path: String,

    /// YAML file to read (omit to read from stdin; `.gz` files are decompressed)
    file: Option<PathBuf>,

    /// Only check the syntax of the path expression
    #[arg(long)]
    validate: bool,

    /// Output format: yaml or json (default: from config, else yaml)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Config file to use instead of ~/.config/yamlselect/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {:#}", err);
                return ExitCode::FAILURE;
            }
        },
        None => Config::load(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    match run(&cli, &config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<ExitCode> {
    if cli.validate {
        let validation = yamlpath::validate(&cli.path);
        return Ok(match validation.exception() {
            None => {
                println!("OK");
                ExitCode::SUCCESS
            }
            Some(err) => {
                report(&cli.path, err, config);
                ExitCode::FAILURE
            }
        });
    }

    let tree = load_input(cli)?;
    match tree.resolve(&cli.path) {
        Ok(node) => {
            let format = cli.format.unwrap_or(config.output_format);
            print!("{}", render(&node, format)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report(&cli.path, &err, config);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn load_input(cli: &Cli) -> Result<YamlTree> {
    match &cli.file {
        Some(path) => load_yaml_file(path),
        None if !io::stdin().is_terminal() => load_yaml_from_stdin(),
        None => bail!("No input: pass a YAML file or pipe one on stdin"),
    }
}

fn render(node: &NodeRef<'_>, format: OutputFormat) -> Result<String> {
    let value = node.to_serde_value();
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(&value).context("Failed to write YAML"),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&value).context("Failed to write JSON")?;
            text.push('\n');
            Ok(text)
        }
    }
}

fn report(path: &str, err: &PathException, config: &Config) {
    eprintln!("Error: {}", err);
    if config.show_caret {
        eprintln!("{}", err.caret(path));
    }
}
