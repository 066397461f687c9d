//! Classification picker CLI
//!
//! Drives one picker session non-interactively: apply filters, wait for the
//! debounced lookup, print the grouped tree, toggle ids, confirm.
//!
//! # Usage
//!
//! ```bash
//! # Nice group 9, pick two classes, against a running gateway
//! classify --gateway http://localhost:4200 nice --group 9 --select 090001 --select 090652
//!
//! # Vienna free-text search straight from the JSON exports
//! classify --data-dir ./data vienna --search star
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ipms_console::{ClassificationPicker, PickerConfig, ResultTree};
use ipms_types::{Classified, TaxonomyEntry, TaxonomyKind};
use taxonomy_client::{HttpSource, InProcessSource, TaxonomySource};
use taxonomy_core::{GatewayConfig, TaxonomyStore};

#[derive(Parser)]
#[command(name = "classify")]
#[command(version = "0.1.0")]
#[command(about = "Search Nice/Vienna classifications and build a selection")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Taxonomy gateway root URL (falls back to IPMS_GATEWAY_URL); takes
    /// precedence over --data-dir
    #[arg(long, global = true)]
    gateway: Option<String>,

    /// Read the JSON exports directly instead of calling a gateway
    #[arg(long, global = true, env = "TAXONOMY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Nice goods/services classes
    Nice {
        /// Nice group (1-45)
        #[arg(short, long)]
        group: Option<u32>,

        /// Free text matched against descriptions and class codes
        #[arg(short, long)]
        search: Option<String>,

        /// Entry ids to toggle into the selection
        #[arg(long = "select")]
        select: Vec<String>,
    },

    /// Vienna figurative-element sections
    Vienna {
        /// Free text matched against category, division and section descriptions
        #[arg(short, long)]
        search: String,

        /// Entry ids to toggle into the selection
        #[arg(long = "select")]
        select: Vec<String>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ipms_console=warn,classify=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = PickerConfig::from_env();
    let gateway = cli.gateway.or_else(|| config.gateway_url.clone());
    let source = build_source(gateway, cli.data_dir)?;

    let (kind, group, search, select) = match cli.command {
        Commands::Nice {
            group,
            search,
            select,
        } => (TaxonomyKind::Nice, group, search, select),
        Commands::Vienna { search, select } => {
            (TaxonomyKind::Vienna, None, Some(search), select)
        }
    };

    let confirmed: Arc<Mutex<Vec<TaxonomyEntry>>> = Arc::default();
    let sink = Arc::clone(&confirmed);
    let mut picker = ClassificationPicker::new(
        kind,
        source,
        config,
        Box::new(move |selection| {
            if let Ok(mut slot) = sink.lock() {
                *slot = selection;
            }
        }),
    );

    picker.open(&[]);
    if group.is_some() {
        picker.set_group(group)?;
    }
    if let Some(text) = search {
        picker.set_text(text)?;
    }
    picker.settle().await?;

    if group.is_none() && picker.session()?.results().is_empty() {
        tracing::info!("No results; give --group or --search to narrow the lookup");
    }

    for id in &select {
        picker
            .toggle_entry(id)
            .with_context(|| format!("cannot select '{id}'"))?;
    }

    if cli.format == OutputFormat::Pretty {
        print_tree(&picker)?;
    }

    picker.confirm()?;
    let selection = match confirmed.lock() {
        Ok(slot) => slot.clone(),
        Err(_) => bail!("selection callback panicked"),
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selection)?),
        OutputFormat::Pretty => print_summary(&selection),
    }
    Ok(())
}

fn build_source(
    gateway: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<Arc<dyn TaxonomySource>> {
    if let Some(url) = gateway {
        tracing::info!(gateway = %url, "Using taxonomy gateway");
        return Ok(Arc::new(HttpSource::new(url)?));
    }

    let gateway_config = GatewayConfig::load()?;
    let dir = data_dir.unwrap_or(gateway_config.data.dir);
    tracing::info!(dir = %dir.display(), "Using local reference data");
    let store = TaxonomyStore::load(&dir, gateway_config.limits)
        .with_context(|| format!("failed to load reference data from {}", dir.display()))?;
    Ok(Arc::new(InProcessSource::new(Arc::new(store))))
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_tree(picker: &ClassificationPicker) -> Result<()> {
    let session = picker.session()?;
    let expand = session.expand_state();
    let selection = session.selection();
    let marker = |id: &str| {
        if selection.contains(id) {
            "[x]".green().bold()
        } else {
            "[ ]".normal()
        }
    };

    match session.tree() {
        ResultTree::Empty => println!("{}", "No matching entries".yellow()),
        ResultTree::Nice(groups) => {
            for node in groups {
                let title = picker
                    .nice_groups()
                    .iter()
                    .find(|g| g.group == node.group)
                    .map(|g| g.description.clone())
                    .unwrap_or_default();
                println!(
                    "{} {} ({})",
                    format!("Group {}", node.group).bold(),
                    title,
                    node.entries.len()
                );
                if !expand.is_expanded(&node.key()) {
                    continue;
                }
                for entry in &node.entries {
                    println!(
                        "  {} {}  {}",
                        marker(&entry.id),
                        entry.code.cyan(),
                        entry.description
                    );
                }
            }
        }
        ResultTree::Vienna(categories) => {
            for category in categories {
                println!(
                    "{} {}",
                    category.category.to_string().bold(),
                    category.description
                );
                if !expand.is_expanded(&category.key()) {
                    continue;
                }
                for division in &category.divisions {
                    println!("  {} {}", division.division.bold(), division.description);
                    if !expand.is_expanded(&division.key()) {
                        continue;
                    }
                    for section in &division.sections {
                        println!(
                            "    {} {}  {}",
                            marker(&section.id),
                            section.section.cyan(),
                            section.section_description
                        );
                    }
                }
            }
        }
    }

    println!(
        "{} {} result(s), {} selected",
        "OK".green(),
        session.tree().leaf_count(),
        selection.len()
    );
    Ok(())
}

/// The caller-side summary a filing form derives from the selection.
fn print_summary(selection: &[TaxonomyEntry]) {
    if selection.is_empty() {
        println!("{}", "Nothing selected".yellow());
        return;
    }
    println!("{}", "Selected:".bold());
    for entry in selection {
        println!("  {}", entry.label());
    }
    let summary: Vec<&str> = selection.iter().map(TaxonomyEntry::description).collect();
    println!("{} {}", "Description:".bold(), summary.join("; "));
}
