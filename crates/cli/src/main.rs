//! Meeple Market CLI - command-line front end for the demo storefront.
//!
//! # Usage
//!
//! ```bash
//! # Seed the default administrator into an empty data file
//! meeple seed
//!
//! # Register and sign in
//! meeple register -e ana@example.com -u ana -n "Ana Soto" -p Secret1
//! meeple login -e ana@example.com -p Secret1
//!
//! # Shop
//! meeple cart products
//! meeple cart add --id catan --qty 2
//! meeple cart list
//!
//! # Admin panel
//! meeple users list
//! meeple users set-status --id <uuid> --status inactive
//! ```
//!
//! All state lives in a single JSON data file (`MEEPLE_DATA_PATH`, default
//! `meeple-market.json`). The CLI is presentation glue only: every policy
//! decision is made by `meeple-market-store`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;

use meeple_market_store::{CartStore, IdentityStore, JsonFileStorage};

mod catalog;
mod commands;

#[derive(Parser)]
#[command(name = "meeple")]
#[command(author, version, about = "Meeple Market demo storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default administrator if no users exist
    Seed,
    /// Register a new customer account
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display username
        #[arg(short, long)]
        username: String,

        /// Full name
        #[arg(short, long)]
        name: String,

        /// Password (6-18 chars, one uppercase letter, one digit)
        #[arg(short, long)]
        password: String,

        /// Birth date (free-form, e.g. 1990-05-14)
        #[arg(long, default_value = "")]
        birth_date: String,

        /// Shipping address
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Sign in and start a session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Clear the session and empty the cart
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update profile fields of the signed-in user
    Profile {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        birth_date: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
    /// Change the signed-in user's password
    Passwd {
        /// Current password
        #[arg(short, long)]
        current: String,

        /// New password
        #[arg(short, long)]
        new: String,
    },
    /// Password reset flow
    Reset {
        #[command(subcommand)]
        action: ResetAction,
    },
    /// Manage user accounts (administrators only)
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ResetAction {
    /// Request a reset code for an email
    Start {
        #[arg(short, long)]
        email: String,
    },
    /// Complete the reset with the emailed code
    Complete {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        code: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List all accounts
    List,
    /// Activate or deactivate an account
    SetStatus {
        /// User id (UUID)
        #[arg(short, long)]
        id: String,

        /// `active` or `inactive`
        #[arg(short, long)]
        status: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the catalog
    Products,
    /// List cart lines with count and total
    List,
    /// Add a product
    Add {
        /// Product id
        #[arg(short, long)]
        id: String,

        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Overwrite a line's quantity (minimum 1)
    SetQty {
        #[arg(short, long)]
        id: String,

        #[arg(short, long)]
        qty: u32,
    },
    /// Remove a line
    Remove {
        #[arg(short, long)]
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn data_path() -> String {
    std::env::var("MEEPLE_DATA_PATH").unwrap_or_else(|_| "meeple-market.json".to_owned())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let storage = JsonFileStorage::open(data_path());
    let identity = IdentityStore::new(storage.clone());

    match cli.command {
        Commands::Seed => commands::auth::seed(&identity).await,
        Commands::Register {
            email,
            username,
            name,
            password,
            birth_date,
            address,
        } => {
            commands::auth::register(
                &identity,
                meeple_market_store::Registration {
                    email,
                    username,
                    full_name: name,
                    password: SecretString::from(password),
                    birth_date,
                    address,
                },
            )
            .await
        }
        Commands::Login { email, password } => {
            commands::auth::login(&identity, &email, &SecretString::from(password)).await
        }
        Commands::Logout => {
            let cart = CartStore::new(storage, catalog::demo_catalog());
            commands::auth::logout(&identity, cart)
        }
        Commands::Whoami => commands::auth::whoami(&identity),
        Commands::Profile {
            username,
            name,
            birth_date,
            address,
        } => commands::auth::update_profile(&identity, username, name, birth_date, address),
        Commands::Passwd { current, new } => {
            commands::auth::change_password(
                &identity,
                &SecretString::from(current),
                &SecretString::from(new),
            )
            .await
        }
        Commands::Reset { action } => match action {
            ResetAction::Start { email } => commands::auth::reset_start(&identity, &email),
            ResetAction::Complete {
                email,
                code,
                password,
            } => {
                commands::auth::reset_complete(
                    &identity,
                    &email,
                    &code,
                    &SecretString::from(password),
                )
                .await
            }
        },
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list(&identity),
            UsersAction::SetStatus { id, status } => {
                commands::users::set_status(&identity, &id, &status)
            }
        },
        Commands::Cart { action } => {
            let cart = CartStore::new(storage, catalog::demo_catalog());
            match action {
                CartAction::Products => commands::cart::products(),
                CartAction::List => commands::cart::list(&identity, &cart),
                CartAction::Add { id, qty } => commands::cart::add(&identity, cart, &id, qty),
                CartAction::SetQty { id, qty } => {
                    commands::cart::set_qty(&identity, cart, &id, qty)
                }
                CartAction::Remove { id } => commands::cart::remove(&identity, cart, &id),
                CartAction::Clear => commands::cart::clear(&identity, cart),
            }
        }
    }
}
