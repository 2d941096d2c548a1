//! # Mathscribe CLI
//!
//! Command-line entry point: serve the HTTP API, run one-off recognition
//! or solving, and manage configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "mathscribe")]
#[command(version)]
#[command(about = "Handwritten math recognition and symbolic solving", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Recognition model (HuggingFace repo ID or local path)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Recognize the expression in an image file
    Recognize {
        /// Path to the image
        image: PathBuf,

        /// Recognition model (HuggingFace repo ID or local path)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Solve an equation symbolically
    Solve {
        /// The equation, e.g. "2x^2+3x-5=0"
        equation: String,

        /// Variable to solve for
        #[arg(short, long)]
        variable: Option<String>,
    },

    /// Display version info
    Version,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set default recognition model
    SetModel {
        /// Model identifier (HuggingFace repo ID or local path)
        model: String,
    },

    /// Clear default recognition model
    ClearModel,

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let telemetry_config = mathscribe_telemetry::TelemetryConfig::new("mathscribe")
        .with_log_level(&cli.log_level);
    let telemetry_config = if cli.json_logs {
        telemetry_config.with_json_logs()
    } else {
        telemetry_config
    };
    mathscribe_telemetry::init_logging(&telemetry_config);

    let cfg = config::Config::load();

    match cli.command {
        Commands::Serve { host, port, model } => {
            let model = model.or(cfg.default_model.clone());
            commands::serve(host, port, model).await?;
        }

        Commands::Recognize { image, model } => {
            let model = model.or(cfg.default_model.clone());
            commands::recognize(image, model).await?;
        }

        Commands::Solve { equation, variable } => {
            commands::solve(equation, variable)?;
        }

        Commands::Version => {
            commands::version();
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config::show_config();
            }
            ConfigAction::SetModel { model } => {
                let mut cfg = config::Config::load();
                match cfg.set_default_model(&model) {
                    Ok(()) => {
                        println!("Default model set to: {model}");
                        println!(
                            "Config saved to: {}",
                            config::Config::config_path().display()
                        );
                    }
                    Err(e) => {
                        eprintln!("Failed to save config: {e}");
                    }
                }
            }
            ConfigAction::ClearModel => {
                let mut cfg = config::Config::load();
                match cfg.clear_default_model() {
                    Ok(()) => {
                        println!("Default model cleared.");
                    }
                    Err(e) => {
                        eprintln!("Failed to save config: {e}");
                    }
                }
            }
            ConfigAction::Path => {
                println!("{}", config::Config::config_path().display());
            }
        },
    }

    Ok(())
}
