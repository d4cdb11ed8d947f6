//! GranitoSkate CLI - migrations and administrator management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! granito-cli migrate
//!
//! # Create an administrator
//! granito-cli admin create -u marta -e marta@granitoskate.com \
//!     -n "Marta Ruiz" -p "secreto seguro" -r superadmin
//!
//! # List administrators
//! granito-cli admin list
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "granito-cli")]
#[command(author, version, about = "GranitoSkate CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage administrator accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new administrator
    Create {
        /// Login username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,

        /// Role (`admin` or `superadmin`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
    /// List administrators
    List,
}

#[tokio::main]
async fn main() {
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                email,
                name,
                password,
                role,
            } => {
                commands::admin::create(&username, &email, &name, &password, &role).await?;
            }
            AdminAction::List => commands::admin::list().await?,
        },
    }
    Ok(())
}
