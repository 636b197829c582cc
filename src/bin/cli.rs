//! recfile CLI
//!
//! Command-line demonstration of the record store, working with a sample
//! product catalog.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use recfile::{Config, Identity, Store};

/// A sample record type: stored at `{data_dir}/Product.jsonl`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Product {
    id: i64,
    name: String,
    price: f64,
}

impl Identity for Product {
    fn id(&self) -> i64 {
        self.id
    }
}

/// recfile CLI
#[derive(Parser, Debug)]
#[command(name = "recfile-cli")]
#[command(about = "CLI for the recfile embedded record store")]
#[command(version)]
struct Args {
    /// Base directory for backing files
    #[arg(short, long, default_value = "./data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a product
    Add {
        /// Identity key
        id: i64,

        /// Product name
        name: String,

        /// Unit price
        price: f64,
    },

    /// Get a product by id
    Get {
        /// Identity key to look up
        id: i64,
    },

    /// List all products
    List,

    /// Update the product with the given id
    Update {
        /// Identity key to update
        id: i64,

        /// New product name
        name: String,

        /// New unit price
        price: f64,
    },

    /// Remove all products with the given id
    Remove {
        /// Identity key to remove
        id: i64,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,recfile=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("recfile v{}", recfile::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);

    let config = Config::builder().base_dir(&args.data_dir).build();

    let store: Store<Product> = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&store, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(store: &Store<Product>, command: Commands) -> recfile::Result<()> {
    match command {
        Commands::Add { id, name, price } => {
            store.add(&Product { id, name, price })?;
            println!("added product {}", id);
        }
        Commands::Get { id } => match store.get_by_id(id)? {
            Some(product) => println!("{}: {} @ {}", product.id, product.name, product.price),
            None => println!("product {} not found", id),
        },
        Commands::List => {
            for product in store.get_all()? {
                println!("{}: {} @ {}", product.id, product.name, product.price);
            }
        }
        Commands::Update { id, name, price } => {
            store.update(id, &Product { id, name, price })?;
            println!("updated product {}", id);
        }
        Commands::Remove { id } => {
            store.remove(id)?;
            println!("removed product {}", id);
        }
    }
    Ok(())
}
