//! Chatlytics CLI
//!
//! Command-line surface for the analytics dashboard:
//! - Log in, sign up, log out
//! - Check the stored session
//! - Show the dashboard tiles and recent conversations
//! - Open a single conversation by its position in the list

use anyhow::{bail, Context, Result};
use chatlytics::api::HttpClient;
use chatlytics::config::{generate_default_config, Config};
use chatlytics::navigation::HistoryNavigator;
use chatlytics::session::FileStorage;
use chatlytics::{Access, AppContext, DashboardSnapshot, LoadState};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chatlytics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Conversation analytics dashboard for your chatbot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/chatlytics/config.toml or ./chatlytics.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Analytics API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: String,
    },

    /// Forget the stored session
    Logout,

    /// Show whether a session is stored
    Status,

    /// Show dashboard stats and recent conversations
    Dashboard,

    /// Show one conversation by its position in the recent list
    Open {
        /// Zero-based position from `chatlytics dashboard`
        index: usize,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    config.validate()?;

    init_logging(&config);

    let navigator = Rc::new(HistoryNavigator::new());
    let api = HttpClient::new(config.api.endpoints()?, config.api.request_timeout())?;
    let ctx = AppContext::builder()
        .storage(Rc::new(FileStorage::new(&config.session.path)))
        .navigator(navigator.clone())
        .api(Rc::new(api))
        .build()?;

    match cli.command {
        Commands::Login { email, password } => {
            let guard = ctx.guard();
            if guard.redirect_if_authenticated() {
                println!(
                    "Already logged in as {}",
                    ctx.session().get().email.unwrap_or_default()
                );
                return Ok(());
            }

            match ctx.auth_form().submit_login(&email, &password).await {
                Ok(()) => println!("Logged in as {}", email),
                Err(e) => bail!("{}", e),
            }
        }

        Commands::Signup {
            email,
            password,
            confirm,
        } => match ctx.auth_form().submit_signup(&email, &password, &confirm).await {
            Ok(notice) => println!("{}", notice),
            Err(e) => bail!("{}", e),
        },

        Commands::Logout => {
            ctx.guard()
                .logout()
                .context("Failed to clear the stored session")?;
            println!("Logged out");
        }

        Commands::Status => match ctx.guard().check() {
            Access::Granted(session) => {
                println!(
                    "Logged in as {}",
                    session.email.as_deref().unwrap_or("(unknown email)")
                );
            }
            Access::Redirected => println!("Not logged in. Run `chatlytics login`."),
        },

        Commands::Dashboard => {
            let loader = ctx.dashboard_loader();
            match loader.activate(&ctx.guard()).await {
                LoadState::Ready(snapshot) => print_dashboard(&snapshot),
                LoadState::Failed(message) => {
                    bail!("Error loading dashboard data: {}", message)
                }
                LoadState::Idle | LoadState::Loading => {
                    bail!("Not logged in. Run `chatlytics login`.")
                }
            }
        }

        Commands::Open { index } => {
            let loader = ctx.dashboard_loader();
            match loader.activate(&ctx.guard()).await {
                LoadState::Ready(_) => {}
                LoadState::Failed(message) => {
                    bail!("Error loading dashboard data: {}", message)
                }
                LoadState::Idle | LoadState::Loading => {
                    bail!("Not logged in. Run `chatlytics login`.")
                }
            }

            if !loader.select_conversation(index) {
                bail!("No conversation at position {}", index);
            }
            tracing::debug!(location = ?navigator.current(), "Opened conversation");

            if let Some(conversation) = loader.conversation(index) {
                println!("Conversation #{} (id {})", conversation.index, conversation.id());
                let pretty = serde_json::to_string_pretty(&conversation.record)?;
                println!("{}", pretty);
            }
        }

        Commands::Config { .. } => unreachable!("handled before config loading"),
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("chatlytics={}", config.logging.level).into());

    if config.logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&std::path::Path>) -> Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn print_dashboard(snapshot: &DashboardSnapshot) {
    let tiles = snapshot.tiles();
    for (label, value) in tiles.entries() {
        println!("{:<20} {:>10}", label, value);
    }

    println!();
    if snapshot.conversations.is_empty() {
        println!("No recent conversations");
        return;
    }

    println!("Recent conversations:");
    for conversation in &snapshot.conversations {
        let started = conversation
            .record
            .text_field("startTime")
            .unwrap_or("-");
        println!(
            "  [{}] {}  started {}",
            conversation.index,
            conversation.id(),
            started
        );
    }
}
