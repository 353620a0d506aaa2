//! Maintenance commands
//!
//! `seed-admin` creates or resets the admin account so the admin API is
//! usable on a fresh database.

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::get_config;
use crate::errors::Result;
use crate::repository::Repository;
use crate::utils::password::hash_password;

#[derive(Parser)]
#[command(name = "portfolio-backend")]
#[command(about = "Portfolio content API with view tracking and ranked listings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the admin user, or reset its password when it already exists
    SeedAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::SeedAdmin { email, password } => seed_admin(&email, &password).await,
    }
}

async fn seed_admin(email: &str, password: &str) -> Result<()> {
    let config = get_config();
    let repository = Repository::connect(&config.database.url, &config.database.backend).await?;

    let password_hash = hash_password(password)?;

    match repository.find_user_by_email(email).await? {
        Some(user) => {
            repository.set_user_password(user.id, &password_hash).await?;
            info!("Admin password reset: {}", email);
            println!("Password reset for existing user {}", email);
        }
        None => {
            repository.insert_user(email, &password_hash, "ADMIN").await?;
            info!("Admin user created: {}", email);
            println!("Admin user {} created", email);
        }
    }

    Ok(())
}
