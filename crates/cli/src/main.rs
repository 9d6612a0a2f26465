//! Pawstore CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Show the effective system parameters
//! paw params
//!
//! # Browse the catalog
//! paw catalog
//! paw catalog --category treats
//!
//! # Work the cart
//! paw cart show
//! paw cart add 7 --quantity 2
//! paw cart update <line-id> 3
//! paw cart remove <line-id>
//! paw cart clear
//!
//! # Sign in and check out
//! paw auth login -e pat@example.com -p <password>
//! paw checkout --payment card
//! paw orders
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// A terminal front end prints its output
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use pawstore_core::{LineId, ProductId};
use pawstore_storefront::config::StorefrontConfig;
use pawstore_storefront::models::PaymentMethod;
use pawstore_storefront::notify::{Notifier, Severity};
use pawstore_storefront::state::Storefront;

mod commands;

#[derive(Parser)]
#[command(name = "paw")]
#[command(author, version, about = "Pawstore terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective system parameters
    Params,
    /// Browse available products
    Catalog {
        /// Only show products whose category matches this name
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Work with the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout {
        /// Payment method (`card`, `bank_transfer`)
        #[arg(short, long, default_value = "card")]
        payment: PaymentMethod,
    },
    /// Show order history for the signed-in account
    Orders,
    /// Manage the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID from the catalog
        product_id: ProductId,

        /// How many units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change the quantity of a cart line (0 removes it)
    Update {
        /// Line ID from `paw cart show`
        line_id: LineId,
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Line ID from `paw cart show`
        line_id: LineId,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
}

/// Notification sink that prints to the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        println!("[{severity}] {message}");
    }
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
    let config = StorefrontConfig::from_env()?;
    let store = Storefront::new(config, std::sync::Arc::new(ConsoleNotifier))?;

    match cli.command {
        Commands::Params => commands::params::show(&store).await,
        Commands::Catalog { category } => commands::catalog::list(&store, category).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&store).await,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&store, product_id, quantity).await?,
            CartAction::Update { line_id, quantity } => {
                commands::cart::update(&store, line_id, quantity).await;
            }
            CartAction::Remove { line_id } => commands::cart::remove(&store, line_id).await,
            CartAction::Clear => commands::cart::clear(&store).await,
        },
        Commands::Checkout { payment } => commands::cart::checkout(&store, payment).await?,
        Commands::Orders => commands::orders::list(&store).await?,
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&store, &email, password).await?;
            }
            AuthAction::Logout => commands::auth::logout(&store).await,
            AuthAction::Whoami => commands::auth::whoami(&store).await,
        },
    }
    Ok(())
}
