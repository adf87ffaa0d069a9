//! View Context CLI
//!
//! Usage:
//!   view-context [OPTIONS] <VIEW>...
//!
//! Options:
//!   -c, --config <FILE>      Config file (TOML) merged into the config store
//!   -d, --data <FILE>        Data file (TOML) bound as template variables
//!   -p, --views-path <DIR>   Base directory for relative view paths
//!   -a, --alias <NAME>       Expose the view to templates under NAME
//!       --set <KEY=VALUE>    Set a content item before rendering
//!   -h, --help               Print help

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use view_context::{load_bindings, load_config, Bindings, InterpolatingExecutor, ViewContext};

#[derive(Parser)]
#[command(name = "view-context")]
#[command(about = "Render a view template with content and data bindings")]
struct Cli {
    /// View candidates, tried in order; the first readable one is rendered
    #[arg(required = true)]
    views: Vec<String>,

    /// Config file (TOML) merged into the config store
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data file (TOML) whose top-level keys become template variables
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Base directory for relative view paths
    #[arg(short = 'p', long)]
    views_path: Option<PathBuf>,

    /// Expose the view to templates under this name
    #[arg(short, long)]
    alias: Option<String>,

    /// Set a content item, as KEY=VALUE
    #[arg(long = "set", value_parser = parse_key_value)]
    content: Vec<(String, String)>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load config
    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Bindings::new(),
    };

    // Load data
    let data = match &cli.data {
        Some(path) => match load_bindings(path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error loading data '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Bindings::new(),
    };

    let mut view = ViewContext::with_config(config).with_executor(InterpolatingExecutor);
    if let Some(path) = &cli.views_path {
        view = view.with_views_path(path);
    }
    if let Some(alias) = cli.alias {
        view = view.with_self_alias(alias);
    }
    for (key, value) in cli.content {
        view.set_content_item(key, value);
    }

    let result = view
        .render_to_output(&cli.views, data)
        .and_then(|()| view.flush());
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
