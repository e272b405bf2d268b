use std::collections::HashMap;

use clap::{Parser, Subcommand};
use serde_json::Value;

use spy_options::observability::logging::{init_logging, DEFAULT_FILTER};
use spy_options::{OptionsManagement, SpyOptions};

#[derive(Parser)]
#[command(name = "spy-options-cli")]
#[command(about = "Inspect the spy options registry", long_about = None)]
struct Cli {
    /// Raw option applied before the command runs (repeatable), e.g. `autoflush=true`.
    #[arg(short, long = "set", value_parser = parse_pair)]
    set: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the defaults table
    Defaults,
    /// Print every effective option
    Show,
    /// Print one option by name
    Get { key: String },
    /// List the registered type names
    Types,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(DEFAULT_FILTER);

    let options = SpyOptions::new();
    let overrides: HashMap<String, String> = cli.set.into_iter().collect();
    if !overrides.is_empty() {
        options.load(&overrides)?;
    }

    match cli.command {
        Commands::Defaults => print_json(&serde_json::to_value(OptionsManagement::defaults(&options))?)?,
        Commands::Show => print_json(&serde_json::to_value(options.snapshot())?)?,
        Commands::Get { key } => {
            let value = options.get_attribute(&key)?;
            print_json(&serde_json::json!({ key: value }))?;
        }
        Commands::Types => {
            let types = options.types();
            print_json(&serde_json::json!({
                "appenders": types.appenders.names(),
                "formats": types.formats.names(),
                "modules": types.modules.names(),
            }))?;
        }
    }

    Ok(())
}

fn print_json(json: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(json)?);
    Ok(())
}
