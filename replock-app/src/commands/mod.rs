mod apps;
mod config_cmd;
mod session_cmd;
mod stats;
mod thresholds_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use session_cmd::SessionCommand;
pub use stats::StatsCommand;
pub use thresholds_cmd::ThresholdFieldArg;

#[derive(Parser)]
#[command(name = "replock")]
#[command(about = "Push-up gated app locking", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage locked apps
    #[command(subcommand)]
    Apps(AppsSubcommands),

    /// Run a counting session over a recorded frame file
    Session(SessionCommand),

    /// Inspect or adjust classification thresholds
    #[command(subcommand)]
    Thresholds(ThresholdsSubcommands),

    /// Show workout history
    Stats(StatsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),
}

#[derive(Subcommand)]
enum AppsSubcommands {
    /// List locked apps and their unlock state
    List,

    /// Lock an app behind a push-up requirement
    Lock {
        /// Package identifier, e.g. com.example.social
        package: String,

        /// Display name (defaults to the package identifier)
        #[arg(short, long)]
        name: Option<String>,

        /// Push-ups required per unlock
        #[arg(short, long)]
        reps: Option<u32>,

        /// Minutes one unlock lasts
        #[arg(short, long)]
        minutes: Option<i64>,
    },

    /// Remove a lock
    Unlock {
        /// Package identifier
        package: String,
    },
}

#[derive(Subcommand)]
enum ThresholdsSubcommands {
    /// Show the configured thresholds
    Show,

    /// Set one threshold field, in degrees
    Set {
        /// Which threshold to change
        #[arg(value_enum)]
        field: ThresholdFieldArg,

        /// New value in degrees
        value: f32,
    },

    /// Restore the default thresholds
    Reset,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        match self.command {
            Commands::Apps(subcmd) => match subcmd {
                AppsSubcommands::List => apps::list_apps().await,
                AppsSubcommands::Lock {
                    package,
                    name,
                    reps,
                    minutes,
                } => apps::lock_app(package, name, reps, minutes).await,
                AppsSubcommands::Unlock { package } => apps::unlock_app(&package).await,
            },
            Commands::Session(cmd) => cmd.execute().await,
            Commands::Thresholds(subcmd) => match subcmd {
                ThresholdsSubcommands::Show => thresholds_cmd::show_thresholds().await,
                ThresholdsSubcommands::Set { field, value } => {
                    thresholds_cmd::set_threshold(field, value).await
                }
                ThresholdsSubcommands::Reset => thresholds_cmd::reset_thresholds().await,
            },
            Commands::Stats(cmd) => cmd.execute().await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config().await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(force).await,
            },
        }
    }
}
