use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use oracle_compute::response::Policy;
use oracle_compute::{Client, Config, OrchestrationAction};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line client for the Oracle Compute Cloud API
#[derive(Parser, Debug)]
#[command(name = "ocompute", version, about, long_about = None)]
struct Args {
    /// Account username
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Identity domain
    #[arg(short, long, global = true)]
    identify: Option<String>,

    /// REST endpoint base URL
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authenticate and print the session expiry
    Auth,
    /// Security lists
    #[command(subcommand)]
    Seclist(SecListCommand),
    /// Compute instances
    #[command(subcommand)]
    Instance(InstanceCommand),
    /// Orchestrations
    #[command(subcommand)]
    Orchestration(OrchestrationCommand),
}

#[derive(Subcommand, Debug)]
enum SecListCommand {
    List,
    Get {
        name: String,
    },
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "permit")]
        outbound_policy: Policy,
        #[arg(long, default_value = "deny")]
        policy: Policy,
    },
    Update {
        name: String,
        /// Rename the list
        #[arg(long, default_value = "")]
        new_name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "permit")]
        outbound_policy: Policy,
        #[arg(long, default_value = "deny")]
        policy: Policy,
    },
    Delete {
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum InstanceCommand {
    List,
    Names,
    Get { name: String },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum OrchestrationCommand {
    List,
    Get { name: String },
    Start { name: String },
    Stop { name: String },
    Delete { name: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("ocompute started with log level: {:?}", level);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("oracle-compute").join("ocompute.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".oracle-compute").join("ocompute.log");
    }
    PathBuf::from("ocompute.log")
}

/// Config file and environment, overridden by flags
fn effective_config(args: &Args) -> Config {
    let mut config = Config::load();
    config.merge(Config {
        username: args.username.clone().unwrap_or_default(),
        identify: args.identify.clone().unwrap_or_default(),
        endpoint: args.endpoint.clone().unwrap_or_default(),
        ..Config::default()
    });
    config
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let config = effective_config(&args);
    tracing::debug!("Using configuration: {:?}", config);

    let mut client = Client::new(config).context("Invalid configuration")?;
    client.authenticate().await.context("Authentication failed")?;

    run(&client, args.command).await
}

async fn run(client: &Client, command: Command) -> Result<()> {
    match command {
        Command::Auth => {
            let expires = client.session().and_then(|s| s.expires);
            print(&json!({
                "authenticated": client.is_authenticated(),
                "user": client.qualified_user(),
                "expires": expires,
            }))
        }
        Command::Seclist(cmd) => match cmd {
            SecListCommand::List => print(&client.all_sec_lists().await?),
            SecListCommand::Get { name } => print(&client.sec_list_details(&name).await?),
            SecListCommand::Create {
                name,
                description,
                outbound_policy,
                policy,
            } => print(
                &client
                    .create_sec_list(&description, &name, outbound_policy, policy)
                    .await?,
            ),
            SecListCommand::Update {
                name,
                new_name,
                description,
                outbound_policy,
                policy,
            } => print(
                &client
                    .update_sec_list(&description, &name, &new_name, outbound_policy, policy)
                    .await?,
            ),
            SecListCommand::Delete { name } => {
                client.delete_sec_list(&name).await?;
                println!("Deleted security list {}", name);
                Ok(())
            }
        },
        Command::Instance(cmd) => match cmd {
            InstanceCommand::List => print(&client.all_instances().await?),
            InstanceCommand::Names => print(&client.all_instance_names().await?),
            InstanceCommand::Get { name } => print(&client.instance_details(&name).await?),
            InstanceCommand::Delete { name } => {
                client.delete_instance(&name).await?;
                println!("Deleted instance {}", name);
                Ok(())
            }
        },
        Command::Orchestration(cmd) => match cmd {
            OrchestrationCommand::List => print(&client.all_orchestrations().await?),
            OrchestrationCommand::Get { name } => {
                let orchestration = client.orchestration_details(&name).await?;
                print(&json!({
                    "type": orchestration.orchestration_type(),
                    "orchestration": orchestration,
                }))
            }
            OrchestrationCommand::Start { name } => print(
                &client
                    .update_orchestration_state(&name, OrchestrationAction::Start)
                    .await?,
            ),
            OrchestrationCommand::Stop { name } => print(
                &client
                    .update_orchestration_state(&name, OrchestrationAction::Stop)
                    .await?,
            ),
            OrchestrationCommand::Delete { name } => {
                client.delete_orchestration(&name).await?;
                println!("Deleted orchestration {}", name);
                Ok(())
            }
        },
    }
}
