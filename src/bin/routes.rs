use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use relstore::db::{migrate, Db};
use relstore::model::{EdgeEntity, NodeRecord, RelationshipRecord};
use relstore::store::{traverse, GraphStore};
use relstore::Config;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "routes")]
#[command(about = "Manage stations and route records in the relationship store")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a station (endpoint node)
    AddStation {
        /// Station name
        name: String,
    },
    /// Add a route between two existing stations
    AddRoute {
        /// Origin station name
        origin: String,
        /// Destination station name
        destination: String,
        /// Route name, e.g. "Bakerloo"
        name: String,
    },
    /// List outgoing routes from a station
    Routes {
        /// Station name
        station: String,
    },
    /// Traverse routes reachable from a station
    Traverse {
        /// Station name
        station: String,
        /// Maximum hops (defaults to traversal.default_max_depth)
        #[arg(short, long)]
        depth: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load()?;
    log::info!("Database path: {}", config.db_path().display());

    // Initialize database
    let db = Db::new(config.db_path());

    // Run migrations
    let migrations_dir = Path::new("migrations");
    db.with_connection(|conn| {
        migrate::run_migrations(conn, migrations_dir)
    }).await?;

    let store = GraphStore::new(db);

    match args.command {
        Command::AddStation { name } => {
            if store.find_node_by_name(&name).await?.is_some() {
                bail!("Station already exists: {}", name);
            }
            let mut node = NodeRecord::new(&name);
            let id = store.insert_node(&mut node).await?;
            println!("Added station {} (id {})", name, id);
        }
        Command::AddRoute { origin, destination, name } => {
            let origin = require_station(&store, &origin).await?;
            let destination = require_station(&store, &destination).await?;
            let mut record = RelationshipRecord::new(origin, destination, &name);
            let id = store.insert_relationship(&mut record).await?;
            println!("Added {} {} (id {})", RelationshipRecord::EDGE_TYPE, name, id);
        }
        Command::Routes { station } => {
            let node = require_station(&store, &station).await?;
            let records: Vec<RelationshipRecord> =
                store.relationships_from(station_id(&node)?).await?;
            if records.is_empty() {
                println!("No routes from {}", station);
            } else {
                for record in &records {
                    print_record(record);
                }
            }
        }
        Command::Traverse { station, depth } => {
            let node = require_station(&store, &station).await?;
            let max_depth = depth.unwrap_or(config.traversal.default_max_depth);
            let records: Vec<RelationshipRecord> = traverse(
                &store,
                station_id(&node)?,
                max_depth,
                config.traversal.max_visited,
            )
            .await?;
            println!(
                "{} route(s) within {} hop(s) of {}:",
                records.len(),
                max_depth,
                station
            );
            for record in &records {
                print_record(record);
            }
        }
    }

    Ok(())
}

async fn require_station(store: &GraphStore, name: &str) -> Result<NodeRecord> {
    match store.find_node_by_name(name).await? {
        Some(node) => Ok(node),
        None => bail!("Unknown station: {} (add it with add-station first)", name),
    }
}

fn station_id(node: &NodeRecord) -> Result<i64> {
    node.id()
        .ok_or_else(|| anyhow::anyhow!("Station {} has no persisted id", node.name()))
}

fn print_record(record: &RelationshipRecord) {
    println!(
        "  [{}] {} -> {} ({})",
        record.id().unwrap_or_default(),
        record.origin().map(|n| n.name()).unwrap_or("?"),
        record.destination().map(|n| n.name()).unwrap_or("?"),
        record.name().unwrap_or("unnamed"),
    );
}
