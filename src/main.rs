use anyhow::{Context, Result};
use atlas_cfn::atlas::client::AtlasClient;
use atlas_cfn::config::{Config, ProfileConfig};
use atlas_cfn::resource::{dispatch, get_all_resource_keys, get_resource, Action, CallbackContext, ResourceKind};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{Instrument, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// MongoDB Atlas resource provider for CloudFormation
#[derive(Parser, Debug)]
#[command(name = "atlas-cfn", version = atlas_cfn::VERSION, about, long_about = None)]
struct Args {
    /// Config profile to use when the model names none
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Atlas request body built from a model
    Expand {
        #[arg(short, long, value_parser = parse_resource_kind)]
        resource: ResourceKind,
        /// Model document (JSON, or YAML by extension)
        #[arg(short, long)]
        model: PathBuf,
    },
    /// Print the model after merging an Atlas response into it
    Flatten {
        #[arg(short, long, value_parser = parse_resource_kind)]
        resource: ResourceKind,
        #[arg(short, long)]
        model: PathBuf,
        /// Atlas response body
        #[arg(long)]
        response: PathBuf,
    },
    /// Run one handler step against Atlas and print the progress event
    Invoke {
        #[arg(short, long, value_parser = parse_resource_kind)]
        resource: ResourceKind,
        #[arg(short, long, value_enum)]
        action: Action,
        #[arg(short, long)]
        model: PathBuf,
        /// Callback context returned by a previous in-progress step
        #[arg(long)]
        callback_context: Option<PathBuf>,
    },
    /// Store credentials for a profile
    Configure {
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        client_id: Option<String>,
        #[arg(long)]
        client_secret: Option<String>,
        #[arg(long)]
        access_token: Option<String>,
        /// Make this profile the default
        #[arg(long)]
        default: bool,
    },
    /// List the supported resource types
    Resources,
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

fn parse_resource_kind(name: &str) -> Result<ResourceKind, String> {
    ResourceKind::parse(name).ok_or_else(|| {
        format!(
            "unknown resource '{}', expected one of: {}",
            name,
            get_all_resource_keys().join(", ")
        )
    })
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("atlas-cfn {} started with log level: {:?}", atlas_cfn::VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("atlas-cfn").join("atlas-cfn.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".atlas-cfn").join("atlas-cfn.log");
    }
    PathBuf::from("atlas-cfn.log")
}

/// Read a JSON document, or YAML when the extension says so
fn read_document(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML {:?}", path))
    } else {
        serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON {:?}", path))
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match args.command {
        Command::Expand { resource, model } => {
            let model = read_document(&model)?;
            print_json(&dispatch::expand(resource, &model)?)
        }
        Command::Flatten {
            resource,
            model,
            response,
        } => {
            let model = read_document(&model)?;
            let response = read_document(&response)?;
            print_json(&dispatch::flatten(resource, &model, &response)?)
        }
        Command::Invoke {
            resource,
            action,
            model,
            callback_context,
        } => {
            let model = read_document(&model)?;
            let context: Option<CallbackContext> = match callback_context {
                Some(path) => Some(
                    serde_json::from_value(read_document(&path)?)
                        .context("Invalid callback context")?,
                ),
                None => None,
            };

            let config = Config::load();
            let requested = model
                .get("Profile")
                .and_then(Value::as_str)
                .or(args.profile.as_deref());
            let profile_name = config.effective_profile_name(requested);
            let client = AtlasClient::new(&config.resolve_profile(requested))?;

            let request_id = uuid::Uuid::new_v4();
            let span = tracing::info_span!("request", id = %request_id, profile = %profile_name);
            let event = dispatch::invoke(resource, action, &client, &model, context.as_ref())
                .instrument(span)
                .await?;
            print_json(&event)
        }
        Command::Configure {
            base_url,
            client_id,
            client_secret,
            access_token,
            default,
        } => {
            let mut config = Config::load();
            let name = config.effective_profile_name(args.profile.as_deref());
            let mut profile = config.profiles.get(&name).cloned().unwrap_or_default();

            if base_url.is_some() {
                profile.base_url = base_url;
            }
            if client_id.is_some() {
                profile.client_id = client_id;
            }
            if client_secret.is_some() {
                profile.client_secret = client_secret;
            }
            if access_token.is_some() {
                profile.access_token = access_token;
            }
            validate_profile(&profile)?;

            if default {
                config.default_profile = Some(name.clone());
            }
            config.set_profile(&name, profile)?;
            eprintln!("Saved profile '{}'", name);
            Ok(())
        }
        Command::Resources => {
            for key in get_all_resource_keys() {
                if let Some(def) = get_resource(key) {
                    let handlers: Vec<&str> = def.handlers.iter().map(Action::as_str).collect();
                    println!(
                        "{:<14} {:<42} {}",
                        key,
                        def.type_name,
                        handlers.join(",")
                    );
                    println!("{:<14} create-only: {}", "", def.create_only_properties.join(", "));
                    println!("{:<14} read-only:   {}", "", def.read_only_properties.join(", "));
                }
            }
            Ok(())
        }
    }
}

/// Credentials may come from the environment later; only the URL is checked
fn validate_profile(profile: &ProfileConfig) -> Result<()> {
    url::Url::parse(profile.base_url()).context("Invalid Atlas base URL")?;
    Ok(())
}
