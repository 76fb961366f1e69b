//! dockorder CLI - inspect and edit the persisted dock orders.
//!
//! ```text
//! dockorder show [REGION]              print persisted orders
//! dockorder forget REGION ENTRY        drop an entry from a region
//! dockorder move ENTRY FROM TO INDEX   reorder or move across regions
//! dockorder simulate --left a,b ...    dry-run a session start
//! dockorder path                       print the orders file location
//! ```
//!
//! Edits are written to the orders file; a running host session picks them
//! up through the store's change notifications.

mod render;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use dockorder_config::{DockOrderConfig, MemoryStore, OrderStore, TomlFileStore};
use dockorder_engine::{Entry, GroupKey, MemoryLiveSet, OrderEditor, Region, Session, Token};

#[derive(Debug, Parser)]
#[command(name = "dockorder", version, about = "Inspect and edit persisted dock orders")]
struct Cli {
    /// Orders file to use instead of the configured one.
    #[arg(long, global = true)]
    orders: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the persisted order of one or all regions.
    Show { region: Option<Region> },
    /// Remove an entry from a region's order.
    Forget {
        region: Region,
        entry: String,
        /// Treat ENTRY as a group name rather than a token.
        #[arg(long)]
        group: bool,
    },
    /// Move an entry to INDEX (0-based) of region TO.
    Move {
        entry: String,
        from: Region,
        to: Region,
        index: usize,
        /// Treat ENTRY as a group name rather than a token.
        #[arg(long)]
        group: bool,
    },
    /// Start a session against a scripted bar without touching the file.
    Simulate(SimulateArgs),
    /// Print the orders file location.
    Path,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Entries docked in the left region, left to right.
    #[arg(long, value_delimiter = ',')]
    left: Vec<String>,
    /// Entries docked in the center region, left to right.
    #[arg(long, value_delimiter = ',')]
    center: Vec<String>,
    /// Entries docked in the right region, left to right.
    #[arg(long, value_delimiter = ',')]
    right: Vec<String>,
    /// Mark TOKEN=GROUP as a member of an aggregator group.
    #[arg(long = "group", value_parser = parse_group)]
    groups: Vec<(String, String)>,
}

fn parse_group(raw: &str) -> Result<(String, String), String> {
    let (token, group) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TOKEN=GROUP, got '{raw}'"))?;
    Ok((token.to_string(), group.to_string()))
}

fn init_tracing(config: &DockOrderConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter().unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(stderr).with_target(false))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match DockOrderConfig::load() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(err) => (DockOrderConfig::default(), Some(err)),
    };
    init_tracing(&config);
    if let Some(err) = config_error {
        tracing::warn!("Ignoring config: {err}");
    }

    let orders_path = cli
        .orders
        .or_else(|| config.orders_path())
        .ok_or_else(|| anyhow!("could not determine the orders file location"))?;

    if let Command::Path = cli.command {
        println!("{}", orders_path.display());
        return Ok(());
    }

    let store = TomlFileStore::open(&orders_path)
        .with_context(|| format!("opening {}", orders_path.display()))?;

    match cli.command {
        Command::Show { region } => show(store, region),
        Command::Forget {
            region,
            entry,
            group,
        } => {
            let entry = parse_entry(&entry, group)?;
            let mut editor = OrderEditor::new(store);
            if !editor.forget(region, &entry)? {
                bail!("'{}' is not in the {region} order", entry.display_name());
            }
            println!("Forgot {} from {region}", entry.display_name());
            Ok(())
        }
        Command::Move {
            entry,
            from,
            to,
            index,
            group,
        } => {
            let entry = parse_entry(&entry, group)?;
            let mut editor = OrderEditor::new(store);
            editor.move_entry(&entry, from, to, index)?;
            print!("{}", render::render_orders(&[(to, editor.entries(to))]));
            Ok(())
        }
        Command::Simulate(args) => simulate(&store, args),
        Command::Path => Ok(()),
    }
}

fn show(store: TomlFileStore, region: Option<Region>) -> Result<()> {
    let editor = OrderEditor::new(store);
    let regions = match region {
        Some(region) => vec![region],
        None => Region::ALL.to_vec(),
    };
    let orders: Vec<_> = regions
        .into_iter()
        .map(|region| (region, editor.entries(region)))
        .collect();
    print!("{}", render::render_orders(&orders));
    Ok(())
}

fn parse_entry(raw: &str, group: bool) -> Result<Entry> {
    let entry = if group {
        GroupKey::new(raw).map(Entry::GroupPlaceholder)
    } else {
        Entry::from_persisted(raw)
    };
    entry.with_context(|| format!("invalid entry '{raw}'"))
}

fn simulate(store: &TomlFileStore, args: SimulateArgs) -> Result<()> {
    let mut scratch = MemoryStore::new();
    for region in Region::ALL {
        scratch = scratch.with_order(region, store.get(region));
    }

    let mut live = MemoryLiveSet::new();
    for (region, names) in [
        (Region::Left, args.left),
        (Region::Center, args.center),
        (Region::Right, args.right),
    ] {
        for (index, name) in names.into_iter().enumerate() {
            let token = Token::new(name).context("invalid live entry")?;
            live.dock_at(token, region, index);
        }
    }
    for (token, group) in args.groups {
        live.set_group(
            Token::new(token).context("invalid grouped entry")?,
            GroupKey::new(group).context("invalid group name")?,
        );
    }

    println!("before:");
    print!("{}", render::render_live(&live));

    let session = Session::start(scratch, &mut live)?;
    println!("after:");
    print!("{}", render::render_live(&live));

    let scratch = session.end();
    let orders: Vec<_> = Region::ALL
        .into_iter()
        .map(|region| {
            let entries: Vec<Entry> = scratch
                .get(region)
                .iter()
                .filter_map(|raw| Entry::from_persisted(raw).ok())
                .collect();
            (region, entries)
        })
        .collect();
    println!("merged orders (not saved):");
    print!("{}", render::render_orders(&orders));
    Ok(())
}
