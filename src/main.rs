// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand, ValueEnum};
use momento::Config;
use momento::config::PhotoOutputFormat;
use momento::pipelines::photo::EncodingQuality;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "momento")]
#[command(about = "Photo enhancement and gallery filters for the Momento camera")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// Settings file (default: ~/.config/momento/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a captured photo, enhancing it when post-processing is on
    Capture {
        /// Captured photo file
        input: PathBuf,

        /// Override the post-processing setting for this capture
        #[arg(short, long)]
        post_processing: Option<bool>,

        /// Directory to save into (default: configured photo directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Run the enhancement pass on a photo
    Enhance {
        /// Input photo
        input: PathBuf,

        /// Output file; the extension selects JPEG or PNG
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Apply a gallery filter to a photo
    Filter {
        /// Input photo
        input: PathBuf,

        /// Filter name (see `momento filters`); unknown names apply no filter
        #[arg(short, long)]
        filter: String,

        /// Output file; the extension selects JPEG or PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Center-crop the filtered photo to a square
        #[arg(long)]
        square: bool,
    },

    /// List available filters
    Filters,

    /// List stored photos, newest first
    Gallery {
        /// Photo directory (default: configured photo directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Delete all stored photos
    Clear {
        /// Photo directory (default: configured photo directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Show or change settings
    Settings {
        /// Enhance photos after capture
        #[arg(long)]
        post_processing: Option<bool>,

        /// Default gallery filter
        #[arg(long)]
        filter: Option<String>,

        /// Output format for processed photos
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// JPEG quality preset
        #[arg(long, value_enum)]
        quality: Option<QualityArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Jpeg,
    Png,
}

impl From<FormatArg> for PhotoOutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpeg => PhotoOutputFormat::Jpeg,
            FormatArg::Png => PhotoOutputFormat::Png,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum QualityArg {
    Low,
    Medium,
    High,
    Maximum,
}

impl From<QualityArg> for EncodingQuality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Low => EncodingQuality::Low,
            QualityArg::Medium => EncodingQuality::Medium,
            QualityArg::High => EncodingQuality::High,
            QualityArg::Maximum => EncodingQuality::Maximum,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=momento=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::default_path);

    match cli.command {
        Commands::Capture {
            input,
            post_processing,
            output_dir,
        } => cli::capture(&config_path, input, post_processing, output_dir),
        Commands::Enhance { input, output } => cli::enhance(&config_path, input, output),
        Commands::Filter {
            input,
            filter,
            output,
            square,
        } => cli::filter(&config_path, input, &filter, output, square),
        Commands::Filters => cli::list_filters(),
        Commands::Gallery { dir } => cli::gallery(&config_path, dir),
        Commands::Clear { dir } => cli::clear(&config_path, dir),
        Commands::Settings {
            post_processing,
            filter,
            format,
            quality,
        } => cli::settings(
            &config_path,
            cli::SettingsUpdate {
                post_processing,
                filter,
                format: format.map(Into::into),
                quality: quality.map(Into::into),
            },
        ),
    }
}
