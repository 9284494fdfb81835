//! Beerburst CLI
//!
//! Renders a beer description taxonomy from a JSON file.
//!
//! # Commands
//!
//! - `tree`: print the forest as an outline with child counts
//! - `json`: print the weighted hierarchy JSON
//! - `svg`: render the sunburst chart, optionally zoomed
//! - `list`: render the collapsible list as HTML
//! - `page`: render a standalone HTML page with both views
//! - `shell`: drive both views interactively

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use beerburst::{
    load_records, render_page, HierarchyData, ListView, ParentPolicy, Sunburst, SunburstConfig,
    Taxonomy, DEFAULT_ROOT_LABEL,
};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod shell;

/// Beerburst - beer style taxonomies as sunburst charts and nested lists
#[derive(Parser)]
#[command(name = "beerburst")]
#[command(version)]
#[command(about = "Render beer description taxonomies as sunburst charts and nested lists")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// What to do when a description is given a second parent
    #[arg(long, global = true, default_value = "accumulate")]
    policy: ParentPolicy,

    /// Chart width in pixels
    #[arg(long, global = true, default_value_t = 932.0)]
    width: f64,

    /// Name of the synthetic node above the roots
    #[arg(long, global = true, default_value = DEFAULT_ROOT_LABEL)]
    root_label: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the forest as an indented outline
    Tree(InputArgs),
    /// Print the hierarchy JSON consumed by the chart
    Json(InputArgs),
    /// Render the sunburst chart as SVG
    Svg {
        #[command(flatten)]
        input: InputArgs,

        /// Zoom into these descriptions in turn
        #[arg(long = "zoom", value_name = "NAME")]
        zoom: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render the collapsible list as HTML
    List {
        #[command(flatten)]
        input: InputArgs,

        /// Expand these descriptions in turn
        #[arg(long = "expand", value_name = "NAME")]
        expand: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render a standalone HTML page with the list and the chart
    Page {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Start an interactive session
    Shell(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// JSON array of {"name", "parent"} records
    input: PathBuf,
}

#[derive(Args)]
struct OutputArgs {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let config = SunburstConfig::with_width(cli.width).root_label(cli.root_label.as_str());

    match cli.command {
        Commands::Tree(input) => {
            let taxonomy = load(&input.input, cli.policy)?;
            let mut view = ListView::new();
            view.expand_all(&taxonomy);
            if let Some(list) = view.build(&taxonomy) {
                print!("{}", list.to_outline());
            }
        }
        Commands::Json(input) => {
            let taxonomy = load(&input.input, cli.policy)?;
            let data = HierarchyData::from_taxonomy(&taxonomy, &config.root_label);
            println!("{}", data.to_json().context("Failed to serialize hierarchy")?);
        }
        Commands::Svg {
            input,
            zoom,
            output,
        } => {
            let taxonomy = load(&input.input, cli.policy)?;
            let mut chart = Sunburst::from_taxonomy(&taxonomy, config);
            for name in &zoom {
                chart
                    .click_name(name)
                    .with_context(|| format!("Cannot zoom into '{}'", name))?;
                chart.finish();
            }
            emit(&chart.to_svg(), output.output.as_deref())?;
        }
        Commands::List {
            input,
            expand,
            output,
        } => {
            let taxonomy = load(&input.input, cli.policy)?;
            let mut view = ListView::new();
            for name in &expand {
                view.toggle_name(&taxonomy, name)
                    .with_context(|| format!("Cannot expand '{}'", name))?;
            }
            let html = view
                .build(&taxonomy)
                .map(|list| list.to_html())
                .unwrap_or_default();
            emit(&html, output.output.as_deref())?;
        }
        Commands::Page { input, output } => {
            let taxonomy = load(&input.input, cli.policy)?;
            let chart = Sunburst::from_taxonomy(&taxonomy, config);
            let page = render_page(&taxonomy, &ListView::new(), &chart);
            emit(&page, output.output.as_deref())?;
        }
        Commands::Shell(input) => {
            let taxonomy = load(&input.input, cli.policy)?;
            shell::run(taxonomy, config)?;
        }
    }

    Ok(())
}

/// Read and build the taxonomy in `path`.
fn load(path: &Path, policy: ParentPolicy) -> Result<Taxonomy> {
    let records = load_records(path)
        .with_context(|| format!("Failed to read descriptions from {}", path.display()))?;
    Taxonomy::from_records_with_policy(&records, policy)
        .with_context(|| format!("Failed to build taxonomy from {}", path.display()))
}

/// Write `text` to `path`, or to stdout when no path is given.
fn emit(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => print!("{}", text),
    }
    Ok(())
}
