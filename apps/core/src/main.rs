// SimCoach command line entry point

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use simcoach_core::config::EvaluatorConfig;
use simcoach_core::telemetry;
use simcoach_core::{
    sanitize, validate_file_type, FileUpload, MessageEvaluator, SimulationSession, SimulatorService,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Bytes read from an upload for signature sniffing
const SNIFF_LEN: usize = 8192;

#[derive(Parser, Debug)]
#[command(
    name = "simcoach",
    about = "Score and sanitize communication simulator messages",
    version
)]
struct Cli {
    /// Load configuration from this dotenv file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a message and print the feedback report as JSON
    Evaluate {
        /// Message text; read from stdin when omitted
        message: Option<String>,
    },
    /// Print the sanitized form of a message
    Sanitize {
        /// Message text; read from stdin when omitted
        message: Option<String>,
    },
    /// Run a message through the full pipeline for a fresh session
    Simulate {
        /// Message text; read from stdin when omitted
        message: Option<String>,
        /// Owning user of the session
        #[arg(long, default_value = "cli-user")]
        user: String,
        /// Scenario being practiced
        #[arg(long, default_value = "default")]
        scenario: String,
        /// Request origin or referrer
        #[arg(long)]
        origin: Option<String>,
    },
    /// Check whether a file may be uploaded
    CheckFile {
        path: PathBuf,
        /// Declared MIME type
        #[arg(long)]
        mime: String,
    },
}

fn read_message(message: Option<String>) -> Result<String> {
    if let Some(message) = message {
        return Ok(message);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read message from stdin")?;
    Ok(buffer)
}

fn load_upload(path: &Path, mime: String) -> Result<FileUpload> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no file name", path.display()))?
        .to_string();
    let mut bytes = Vec::with_capacity(SNIFF_LEN);
    std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut bytes)?;
    Ok(FileUpload::new(name, mime).with_bytes(bytes))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.env_file {
        Some(path) => EvaluatorConfig::from_env_file(path)?,
        None => EvaluatorConfig::from_env()?,
    };
    telemetry::init_tracing(&config)?;
    info!(format = ?config.log_format, "SimCoach starting");

    match cli.command {
        Command::Evaluate { message } => {
            let message = read_message(message)?;
            let sanitized = sanitize(&message, config.max_message_length)?;
            let report = MessageEvaluator::new().evaluate(&sanitized);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Sanitize { message } => {
            let message = read_message(message)?;
            println!("{}", sanitize(&message, config.max_message_length)?);
        }
        Command::Simulate {
            message,
            user,
            scenario,
            origin,
        } => {
            let message = read_message(message)?;
            let mut session = SimulationSession::new(user, scenario);
            let service = SimulatorService::new(config);
            let reply = service
                .process_message(&session, &message, origin.as_deref())
                .await?;
            session.record_exchange(&reply)?;
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        Command::CheckFile { path, mime } => {
            let upload = load_upload(&path, mime)?;
            if let Err(e) = validate_file_type(&upload) {
                bail!("{}: {}", path.display(), e);
            }
            println!("{}: ok", path.display());
        }
    }

    Ok(())
}
