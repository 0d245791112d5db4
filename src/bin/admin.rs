//! CLI administration tool for shorturls.
//!
//! Creates and inspects short links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link (prompts for the URL when omitted)
//! cargo run --bin admin -- link create https://example.com --validity 60
//!
//! # Create a link with a custom code
//! cargo run --bin admin -- link create https://example.com --code promo2026
//!
//! # Show analytics for a code
//! cargo run --bin admin -- link show promo2026
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
//! - `BASE_URL`: prefix for printed short links

use shorturls::api::dto::timestamp;
use shorturls::application::services::{LinkService, StatsService};
use shorturls::config::{self, Config};
use shorturls::domain::repositories::LinkRepository;
use shorturls::infrastructure::audit::AuditLog;
use shorturls::server::open_repository;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;

/// CLI tool for managing shorturls.
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
    /// Create and inspect short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Target URL (prompted for when omitted)
        url: Option<String>,

        /// Lifetime in minutes
        #[arg(short, long)]
        validity: Option<u32>,

        /// Custom short code (4-10 alphanumeric characters)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show a link and its click history
    Show {
        /// Short code
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.database_url.is_none() {
        anyhow::bail!("DATABASE_URL must be set; the in-memory store is per-process");
    }

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config).await?,
        Commands::Stats => handle_stats(&config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, config: &Config) -> Result<()> {
    let repository = open_repository(config).await?;
    let settings = config.service_settings();

    match action {
        LinkAction::Create {
            url,
            validity,
            code,
        } => {
            let service = LinkService::new(repository.clone(), AuditLog::disabled(), &settings);
            create_link(&service, url, validity, code).await?;
        }
        LinkAction::Show { code } => {
            let service = StatsService::new(repository.clone(), settings.store_timeout);
            show_link(&service, &code).await?;
        }
    }

    repository.close().await;
    Ok(())
}

/// Creates a link, prompting for the URL when none was given.
async fn create_link(
    service: &LinkService,
    url: Option<String>,
    validity: Option<u32>,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "Create short link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let link = service
        .create_short_link(&url, validity, code, Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "Link created".green().bold());
    println!();
    println!(
        "  Short link: {}",
        service.short_url(&link.code).bright_yellow().bold()
    );
    println!("  Target:     {}", link.original_url.cyan());
    println!(
        "  Expires:    {}",
        timestamp::format(&link.expiry).bright_black()
    );
    println!();

    Ok(())
}

/// Prints a link's metadata and click history.
///
/// # Output Format
///
/// ```text
/// Link promo2026
///
///   Target:  https://example.com
///   Created: 2026-03-01T12:00:00.000Z
///   Expires: 2026-03-01T12:30:00.000Z (active)
///   Clicks:  2
///
///   Timestamp                  Location  Referrer
///   ─────────────────────────────────────────────────────────────
///   2026-03-01T12:01:10.512Z   DE        https://news.example
///   2026-03-01T12:02:44.001Z   unknown   direct
/// ```
async fn show_link(service: &StatsService, code: &str) -> Result<()> {
    let link = service
        .get_analytics(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{} {}", "Link".bright_blue().bold(), link.code.bright_white());
    println!();

    let state = if link.is_expired_at(Utc::now()) {
        "expired".red()
    } else {
        "active".green()
    };

    println!("  Target:  {}", link.original_url.cyan());
    println!("  Created: {}", timestamp::format(&link.created_at));
    println!("  Expires: {} ({})", timestamp::format(&link.expiry), state);
    println!(
        "  Clicks:  {}",
        link.total_clicks().to_string().bright_green().bold()
    );

    if link.clicks.is_empty() {
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  {:<26} {:<9} {}",
        "Timestamp".bright_white().bold(),
        "Location".bright_white().bold(),
        "Referrer".bright_white().bold()
    );
    println!("  {}", "─".repeat(61).bright_black());

    for click in &link.clicks {
        println!(
            "  {:<26} {:<9} {}",
            timestamp::format(&click.timestamp).bright_black(),
            click.location,
            click.referrer
        );
    }
    println!();

    Ok(())
}

/// Displays the total number of links.
async fn handle_stats(config: &Config) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let repository = open_repository(config).await?;
    let service = StatsService::new(repository.clone(), config.service_settings().store_timeout);

    let links_count = service
        .count_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    repository.close().await;
    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let repository = open_repository(config)
                .await
                .context("Database unreachable")?;
            repository
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database unreachable: {}", e))?;
            repository.close().await;

            println!("{}", "Database connection OK".green().bold());
        }
    }

    Ok(())
}
