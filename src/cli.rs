use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use crate::chat::{ChatClient, Platform, Targets};
use crate::gitlab::{object_kind, translate_payload, Translation};
use crate::server::{AppState, Server, ServerConfig};

#[derive(Parser)]
#[command(name = "gitlab-notifier")]
#[command(author, version, about = "Forwards GitLab webhooks to chat robots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Receive GitLab webhooks and forward them to chat robots
    ///
    /// Robot webhook URLs are read from `WEBHOOK_URL` (for `/webhook`) and
    /// `WEBHOOK_URL_<GROUP>` (for `/webhook/<group>`).
    Serve {
        /// Address to bind
        #[arg(long, env = "NOTIFIER_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "NOTIFIER_PORT", default_value_t = 8080)]
        port: u16,

        /// Chat platform the robot webhooks belong to
        #[arg(long, env = "PLATFORM", value_enum, default_value_t = Platform::Wecom)]
        platform: Platform,

        /// Timeout for each delivery, in seconds
        #[arg(long, env = "DELIVERY_TIMEOUT", default_value_t = 10)]
        timeout: u64,
    },

    /// Print the chat message a webhook payload would produce
    Translate {
        /// Path to a GitLab webhook JSON body
        payload: PathBuf,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty print JSON output
        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Serve {
                host,
                port,
                platform,
                timeout,
            } => {
                let targets = Targets::from_env()?;
                if targets.is_empty() {
                    warn!("No WEBHOOK_URL variables set, every event will be dropped");
                } else {
                    info!("Loaded {} webhook target(s): {targets:?}", targets.len());
                }
                info!("Platform: {platform}");

                let client = ChatClient::new(Duration::from_secs(*timeout))?;
                let state = AppState::new(targets, client, *platform);
                let config = ServerConfig {
                    host: host.clone(),
                    port: *port,
                };

                Server::new(config, state).serve().await?;
                Ok(())
            }
            Commands::Translate {
                payload,
                output,
                pretty,
            } => {
                let raw = std::fs::read_to_string(payload)
                    .with_context(|| format!("Failed to read {}", payload.display()))?;
                let value: serde_json::Value = serde_json::from_str(&raw)
                    .with_context(|| format!("{} is not valid JSON", payload.display()))?;

                let message = match translate_payload(&value)? {
                    Translation::Deliver(message) => message,
                    Translation::Suppressed => {
                        info!("Pipeline has unsettled builds, nothing would be sent");
                        return Ok(());
                    }
                    Translation::Ignored => {
                        info!(
                            "object_kind {:?} is not supported, nothing would be sent",
                            object_kind(&value).unwrap_or_default()
                        );
                        return Ok(());
                    }
                };

                let json_output = if *pretty {
                    serde_json::to_string_pretty(&message)?
                } else {
                    serde_json::to_string(&message)?
                };

                if let Some(output_path) = output {
                    std::fs::write(output_path, json_output)?;
                    info!("Message written to: {}", output_path.display());
                } else {
                    println!("{json_output}");
                }

                Ok(())
            }
        }
    }
}
