//! Tessera CLI
//!
//! Lays out a JSON component description headlessly and prints the computed
//! geometry.

mod report;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tessera_component::{ComponentTree, ItemConfig};
use tessera_layout::{Coordinator, RecordingHost, Size};

/// Tessera: headless container layout
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the layout tree of a description
    tessera demos/border.json

    # Lay out at a custom size and print JSON
    tessera demos/toolbar.json --width 320 --height 40 --format json

    # Inline description
    tessera --json '{"layout":{"type":"hbox"},"items":[{"width":50},{"flex":1}]}'
"#)]
struct Cli {
    /// Path to a JSON component description
    #[arg(value_name = "FILE", conflicts_with = "json")]
    path: Option<PathBuf>,

    /// Read the description from this string instead of a file
    #[arg(long, value_name = "JSON")]
    json: Option<String>,

    /// Root width in pixels
    #[arg(long, default_value_t = 800)]
    width: i32,

    /// Root height in pixels
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Also print the notifications delivered during layout
    #[arg(long)]
    events: bool,

    /// Log layout decisions (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented tree of rectangles
    Tree,
    /// JSON document
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = load_config(&cli)?;
    let mut tree = ComponentTree::from_config(config);
    let mut host = RecordingHost::new();
    let mut coordinator = Coordinator::new();
    let root = tree.root();

    coordinator
        .layout_root(&mut tree, &mut host, root, Size::new(cli.width, cli.height))
        .with_context(|| format!("layout at {}x{} failed", cli.width, cli.height))?;
    log::debug!("{} notification(s) delivered", host.events.len());

    let dirty: HashSet<_> = tree.take_dirty().into_iter().collect();
    match cli.format {
        Format::Tree => {
            println!("=== Layout ({}x{}) ===\n", cli.width, cli.height);
            report::print_tree(&tree, &coordinator, &dirty, root, 0);
        }
        Format::Json => {
            let document = report::ComponentReport::build(&tree, root);
            let json = serde_json::to_string_pretty(&document)
                .context("failed to serialize layout report")?;
            println!("{json}");
        }
    }

    if cli.events {
        println!("\n=== Events ===");
        report::print_events(&tree, &host.events);
    }

    Ok(())
}

/// Read the component description from the CLI arguments.
fn load_config(cli: &Cli) -> Result<ItemConfig> {
    if let Some(ref json) = cli.json {
        serde_json::from_str(json).context("invalid --json description")
    } else if let Some(ref path) = cli.path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid component description in {}", path.display()))
    } else {
        anyhow::bail!("expected a description file or --json")
    }
}
