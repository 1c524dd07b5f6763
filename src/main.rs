//! intercom-events - command-line client for the Intercom events API

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intercom_events::{config::LoggingConfig, AppConfig, Event, EventService, Services};

#[derive(Parser)]
#[command(name = "intercom-events")]
#[command(about = "Record and inspect Intercom user events")]
#[command(version)]
struct Cli {
    /// API base URL (overrides configuration)
    #[arg(long, env = "INTERCOM_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a new event
    Save {
        /// Event name
        #[arg(long)]
        name: String,

        #[arg(long)]
        user_id: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Intercom user id
        #[arg(long)]
        id: Option<String>,

        /// Unix timestamp in seconds (defaults to now)
        #[arg(long)]
        created_at: Option<i64>,

        /// Metadata as a JSON object
        #[arg(long)]
        metadata: Option<String>,
    },

    /// List events for a user
    List(UserFilter),

    /// Summarize events for a user
    Summary(UserFilter),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct UserFilter {
    #[arg(long)]
    user_id: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// Intercom user id
    #[arg(long)]
    id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);

    let services = Services::new(&config.api).context("Failed to create services")?;
    run(cli.command, &services.events).await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("intercom_events={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(command: Command, events: &EventService) -> anyhow::Result<()> {
    match command {
        Command::Save {
            name,
            user_id,
            email,
            id,
            created_at,
            metadata,
        } => {
            let mut event = Event::new(name);
            event.user_id = user_id;
            event.email = email;
            event.intercom_user_id = id;
            event = match created_at {
                Some(ts) => event.with_created_at(ts),
                None => event.created_now(),
            };
            if let Some(raw) = metadata {
                let map: Map<String, Value> =
                    serde_json::from_str(&raw).context("Metadata must be a JSON object")?;
                event.metadata = map.into_iter().collect();
            }

            events.save(&event).await?;
            tracing::info!("Saved {}", event);
        }
        Command::List(filter) => {
            let list = match filter {
                UserFilter { user_id: Some(v), .. } => events.list_by_user_id(&v).await?,
                UserFilter { email: Some(v), .. } => events.list_by_email(&v).await?,
                UserFilter { id: Some(v), .. } => events.list_by_id(&v).await?,
                _ => anyhow::bail!("one of --user-id, --email or --id is required"),
            };
            print_json(&list)?;
        }
        Command::Summary(filter) => {
            let summaries = match filter {
                UserFilter { user_id: Some(v), .. } => events.summary_by_user_id(&v).await?,
                UserFilter { email: Some(v), .. } => events.summary_by_email(&v).await?,
                UserFilter { id: Some(v), .. } => events.summary_by_id(&v).await?,
                _ => anyhow::bail!("one of --user-id, --email or --id is required"),
            };
            print_json(&summaries)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
