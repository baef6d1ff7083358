//! Inventory CLI - schema, user and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create missing tables and columns
//! inv-cli migrate
//!
//! # Same, for a deployment with authentication disabled
//! inv-cli migrate --no-users
//!
//! # Create a login
//! inv-cli user create -e owner@example.com -p 'long-password' -n "Shop Owner"
//!
//! # Load the demo catalog (or a catalog file of your own)
//! inv-cli seed
//! inv-cli seed --file catalog.yaml
//!
//! # Print the catalog
//! inv-cli products list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Ensure the database schema
//! - `user create` - Create login accounts
//! - `seed` - Load products from a YAML file
//! - `products list` - Print the catalog
//!
//! Every command reads `DATABASE_URL` the same way the server does.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "inv-cli")]
#[command(author, version, about = "Clothing inventory CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing tables and columns
    Migrate {
        /// Skip the users table (for deployments without authentication)
        #[arg(long)]
        no_users: bool,
    },
    /// Manage login accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Load products from a YAML file (defaults to the demo catalog)
    Seed {
        /// Path to a YAML list of products
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Inspect the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// Print all products, newest first
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { no_users } => commands::migrate::run(!no_users).await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                name,
            } => {
                commands::user::create(&email, &password, name.as_deref()).await?;
            }
        },
        Commands::Seed { file } => {
            commands::seed::products(file.as_deref()).await?;
        }
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list().await?,
        },
    }
    Ok(())
}
