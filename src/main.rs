use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use voice_enrollment::{
    AppConfig, CreationRequest, DeleteRequest, ListQuery, PollOutcome, StatusQuery, TaskResponse,
    VoiceCloningClient, VoiceStatus,
    core::enrollment::{
        DEFAULT_LANGUAGE_HINTS, DEFAULT_TARGET_MODEL, config::FALLBACK_PREFIX,
        messages::DEFAULT_PAGE_SIZE, sanitize_prefix,
    },
    wait_until_ready,
};

/// Voice enrollment - create and track cloned voices
#[derive(Parser, Debug)]
#[command(name = "voice-enrollment")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a voice creation task from a remote audio sample
    Create {
        /// Publicly reachable URL of the sample recording
        #[arg(long)]
        url: String,

        /// Naming prefix for the generated voice
        #[arg(short = 'p', long, default_value = FALLBACK_PREFIX)]
        prefix: String,

        /// Model the cloned voice will be used with
        #[arg(short = 'm', long, default_value = DEFAULT_TARGET_MODEL)]
        target_model: String,

        /// Language hint code (repeatable)
        #[arg(short = 'l', long = "language-hint", default_values_t = DEFAULT_LANGUAGE_HINTS.iter().map(|hint| hint.to_string()))]
        language_hints: Vec<String>,

        /// Strip the prefix to at most 10 ASCII letters and digits before sending
        #[arg(long)]
        sanitize_prefix: bool,
    },

    /// Query the deployment status of a voice
    Status {
        /// Voice identifier returned by `create`
        voice_id: String,
    },

    /// Poll the status of a voice until it is ready or attempts run out
    Wait {
        /// Voice identifier returned by `create`
        voice_id: String,

        /// Seconds between queries (overrides config)
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Maximum number of queries (overrides config)
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// List cloned voices
    List {
        /// Only list voices created with this prefix
        #[arg(short = 'p', long)]
        prefix: Option<String>,

        #[arg(long, default_value_t = 0)]
        page_index: u32,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },

    /// Delete a cloned voice
    Delete {
        /// Voice identifier to delete
        voice_id: String,
    },
}

fn print_response(response: &TaskResponse) {
    println!("Status code: {}", response.status_code);
    println!("Response:");
    println!("{}", response.pretty_body());
}

fn status_line(status: &VoiceStatus) -> String {
    match status {
        VoiceStatus::Usable => format!("✓ Voice status: {status}"),
        VoiceStatus::Pending => format!("⏳ Voice status: {status}"),
        VoiceStatus::Unknown(_) => format!("⚠ Voice status: {status}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only responses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration from file or environment
    let config = if let Some(config_path) = cli.config {
        AppConfig::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        AppConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    let client_config = config
        .client_config()
        .map_err(|e| anyhow!(e.to_string()))?;
    let client = VoiceCloningClient::from_config(client_config)?;

    match cli.command {
        Commands::Create {
            url,
            prefix,
            target_model,
            language_hints,
            sanitize_prefix: sanitize,
        } => {
            let prefix = if sanitize {
                sanitize_prefix(&prefix)
            } else {
                prefix
            };
            let request = CreationRequest::new(prefix, url)
                .with_target_model(target_model)
                .with_language_hints(language_hints);

            println!("Submitting voice creation task...");
            println!("URL: {}", client.endpoint());
            println!("Audio URL: {}", request.url);

            let response = client
                .submit(request)
                .await
                .context("Voice creation failed")?;
            print_response(&response);

            if let Some(voice_id) = response.voice_id() {
                println!("\nVoice ID: {voice_id}");
            }
        }

        Commands::Status { voice_id } => {
            let report = client
                .query_status(StatusQuery::new(voice_id))
                .await
                .context("Status query failed")?;
            print_response(&report.response);
            println!("\n{}", status_line(&report.status));
        }

        Commands::Wait {
            voice_id,
            interval_secs,
            max_attempts,
        } => {
            let mut options = config.poll_options();
            if let Some(secs) = interval_secs {
                options.interval = Duration::from_secs(secs);
            }
            if let Some(attempts) = max_attempts {
                options.max_attempts = attempts;
            }

            let outcome = wait_until_ready(&client, &StatusQuery::new(voice_id), options)
                .await
                .context("Status polling failed")?;

            match outcome {
                PollOutcome::Ready(report) => {
                    print_response(&report.response);
                    println!("\n{}", status_line(&report.status));
                }
                PollOutcome::Undeployed(report) => {
                    print_response(&report.response);
                    return Err(anyhow!(
                        "Voice deployment failed (UNDEPLOYED); check the sample audio quality and retry"
                    ));
                }
                PollOutcome::TimedOut { attempts, last } => {
                    let last = last
                        .map(|status| status.to_string())
                        .unwrap_or_else(|| "no response".to_string());
                    return Err(anyhow!(
                        "Voice not ready after {attempts} attempts (last status: {last})"
                    ));
                }
            }
        }

        Commands::List {
            prefix,
            page_index,
            page_size,
        } => {
            let response = client
                .list_voices(ListQuery {
                    prefix,
                    page_index,
                    page_size,
                })
                .await
                .context("Listing voices failed")?;
            print_response(&response);

            let voices = response.voices();
            if !voices.is_empty() {
                println!();
                for voice in voices {
                    println!("{}\t{}\t{}", voice.voice_id, voice.status, voice.created_at);
                }
            }
        }

        Commands::Delete { voice_id } => {
            let response = client
                .delete_voice(DeleteRequest::new(voice_id))
                .await
                .context("Deleting voice failed")?;
            print_response(&response);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_defaults_follow_library() {
        let cli = Cli::try_parse_from(["voice-enrollment", "create", "--url", "https://cdn.example.com/a.m4a"])
            .unwrap();

        match cli.command {
            Commands::Create {
                prefix,
                target_model,
                language_hints,
                sanitize_prefix,
                ..
            } => {
                assert_eq!(prefix, FALLBACK_PREFIX);
                assert_eq!(target_model, DEFAULT_TARGET_MODEL);
                assert_eq!(language_hints, DEFAULT_LANGUAGE_HINTS);
                assert!(!sanitize_prefix);
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_list_defaults_follow_library() {
        let cli = Cli::try_parse_from(["voice-enrollment", "list"]).unwrap();

        match cli.command {
            Commands::List {
                prefix,
                page_index,
                page_size,
            } => {
                let defaults = ListQuery::default();
                assert_eq!(prefix, defaults.prefix);
                assert_eq!(page_index, defaults.page_index);
                assert_eq!(page_size, defaults.page_size);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }
}
