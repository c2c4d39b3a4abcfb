//! CLI administration tool for makeshort.
//!
//! Provides commands for inspecting accounts, issuing debug tokens,
//! viewing statistics, and performing database operations without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Look up an account
//! cargo run --bin admin -- user info --email alice@example.com
//!
//! # Delete an account (and its URLs)
//! cargo run --bin admin -- user delete 42
//!
//! # Issue a debug access token
//! cargo run --bin admin -- token issue 42
//!
//! # Inspect an access token
//! cargo run --bin admin -- token inspect "eyJhbGciOi..."
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `JWT_SECRET` (required for token commands): access token signing secret
//!
//! # Features
//!
//! - **Account Tools**: Look up and delete user accounts
//! - **Token Tools**: Issue and inspect access tokens for debugging
//! - **Statistics**: View user, URL, and redirect counts
//! - **Database Tools**: Connection checks and info queries
//! - **Interactive Prompts**: User-friendly CLI with confirmation dialogs
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use makeshort::application::services::TokenManager;
use makeshort::domain::repositories::UserRepository;
use makeshort::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing makeshort.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Issue and inspect access tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Look up an account by email or id
    Info {
        /// Email address to look up
        #[arg(short, long)]
        email: Option<String>,

        /// User id to look up
        #[arg(short, long)]
        id: Option<i64>,
    },

    /// Delete an account and all its short URLs
    Delete {
        /// User id to delete
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a debug access token for a user
    Issue {
        /// User id the token is issued for
        user_id: i64,

        /// Token lifetime in seconds
        #[arg(long, default_value_t = 900)]
        ttl: i64,
    },

    /// Verify an access token and print its claims
    Inspect {
        /// The raw access token
        token: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::User { action } => {
            let pool = connect(&database_url()?).await?;
            handle_user_action(action, &pool).await?;
        }
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Stats => {
            let pool = connect(&database_url()?).await?;
            handle_stats(&pool).await?;
        }
        Commands::Db { action } => {
            let pool = connect(&database_url()?).await?;
            handle_db_action(action, &pool).await?;
        }
    }

    Ok(())
}

fn database_url() -> Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

async fn connect(database_url: &str) -> Result<PgPool> {
    PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Info { email, id } => {
            user_info(repo, pool, email, id).await?;
        }
        UserAction::Delete { id, yes } => {
            delete_user(repo, id, yes).await?;
        }
    }

    Ok(())
}

/// Looks up an account and prints its details.
///
/// # Lookup
///
/// - `--id` takes priority when both are given
/// - Otherwise lookup by `--email` (exact match)
async fn user_info(
    repo: Arc<PgUserRepository>,
    pool: &PgPool,
    email: Option<String>,
    id: Option<i64>,
) -> Result<()> {
    println!("{}", "👤 User Info".bright_blue().bold());
    println!();

    let user = match (id, email) {
        (Some(id), _) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        (None, Some(email)) => repo
            .find_by_email(&email)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        (None, None) => {
            anyhow::bail!("Pass --email or --id to select an account");
        }
    };

    let user = user.context("User not found")?;

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(pool)
        .await?;

    println!("  ID:       {}", user.id.to_string().bright_white());
    println!("  Email:    {}", user.email.cyan());
    println!("  Username: {}", user.username.cyan());
    println!(
        "  Created:  {}",
        user.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!(
        "  URLs:     {}",
        urls_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Deletes an account by id with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No)
/// - All short URLs owned by the account are removed with it
async fn delete_user(repo: Arc<PgUserRepository>, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Account".bright_blue().bold());
    println!();

    let user = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Email:    {}", user.email.cyan());
    println!("  Username: {}", user.username.cyan());
    println!();
    println!(
        "{}",
        "⚠️  All short URLs owned by this account will be deleted with it."
            .yellow()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this account?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.delete(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete account: {}", e))?;

    println!();
    println!("{}", "✅ Account deleted!".green().bold());
    println!();

    Ok(())
}

/// Dispatches token commands. These only need `JWT_SECRET`, not a database.
fn handle_token_action(action: TokenAction) -> Result<()> {
    let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

    match action {
        TokenAction::Issue { user_id, ttl } => issue_token(&secret, user_id, ttl)?,
        TokenAction::Inspect { token } => inspect_token(&secret, &token)?,
    }

    Ok(())
}

/// Issues a short-lived access token for debugging.
///
/// # Security
///
/// - The token is signed with the same secret the service uses, so it is
///   accepted by any protected endpoint
/// - No refresh session is opened; the token expires and cannot be renewed
fn issue_token(secret: &str, user_id: i64, ttl: i64) -> Result<()> {
    println!("{}", "🔑 Issue Access Token".bright_blue().bold());
    println!();

    let manager = TokenManager::new(secret, ttl);
    let pair = manager
        .issue_pair(user_id)
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!("  User id: {}", user_id.to_string().bright_white());
    println!("  TTL:     {}s", ttl.to_string().bright_white());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        pair.access_token.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/user/{}/urls",
        pair.access_token.bright_yellow(),
        user_id
    );
    println!();

    Ok(())
}

/// Verifies an access token and prints its claims.
fn inspect_token(secret: &str, token: &str) -> Result<()> {
    println!("{}", "🔍 Inspect Access Token".bright_blue().bold());
    println!();

    // TTL is irrelevant for verification.
    let manager = TokenManager::new(secret, 0);

    match manager.verify_access(token) {
        Ok(claims) => {
            let issued = DateTime::from_timestamp(claims.iat, 0)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| claims.iat.to_string());
            let expires = DateTime::from_timestamp(claims.exp, 0)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| claims.exp.to_string());

            println!("{}", "✅ Token is valid".green().bold());
            println!();
            println!("  User id: {}", claims.sub.to_string().bright_white());
            println!("  Issued:  {}", issued.bright_black());
            println!("  Expires: {}", expires.bright_black());
        }
        Err(_) => {
            println!("{}", "❌ Token is invalid or expired".red().bold());
        }
    }

    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of accounts
/// - Total number of short URLs
/// - Total number of served redirects
/// - Top aliases by redirect count
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    // SUM over BIGINT yields NUMERIC, hence the cast.
    let redirects_count: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(redirects), 0)::BIGINT FROM urls")
            .fetch_one(pool)
            .await?;

    println!(
        "  Users:     {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  URLs:      {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Redirects: {}",
        redirects_count.to_string().bright_green().bold()
    );
    println!();

    let top: Vec<(String, i64)> = sqlx::query_as(
        "SELECT alias, redirects FROM urls WHERE redirects > 0 \
         ORDER BY redirects DESC LIMIT 5",
    )
    .fetch_all(pool)
    .await?;

    if !top.is_empty() {
        println!("{}", "  Top aliases:".bright_white());
        for (alias, redirects) in top {
            println!(
                "    {:<20} {}",
                alias.cyan(),
                redirects.to_string().bright_green()
            );
        }
        println!();
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
