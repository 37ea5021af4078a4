//! Varta CLI: compose, crop, and export newspaper clippings.
//!
//! Usage:
//!   varta init <PATH>              Write an empty content file
//!   varta info <PATH>              Show a content file and its layout
//!   varta fit [OPTIONS]            Show layout parameters for given lengths
//!   varta crop <IMAGE> -o <PNG>    Crop a portrait to the reporter-photo square
//!   varta render <PATH>            Download the clipping as a PNG
//!   varta print <PATH>             Send the clipping to the printer
//!   varta themes                   List themes and their colours

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use varta_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "varta",
    about = "Newspaper clipping composer",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/varta/config.json).
    /// An explicit file must exist and parse.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty content file
    Init {
        /// Path of the content JSON to create
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show a content file, its layout parameters, and the dateline
    Info {
        /// Path to the content JSON
        path: PathBuf,
    },

    /// Show the layout parameters for the given lengths
    Fit {
        /// Headline length in characters
        #[arg(long, default_value = "0")]
        headline_len: usize,

        /// Body length in characters
        #[arg(long, default_value = "0")]
        body_len: usize,

        /// A news photo is attached
        #[arg(long)]
        photo: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Crop an image to the square reporter-photo raster
    Crop {
        /// Source image
        image: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        adjust: CropArgs,

        /// Also write the circular preview to this path
        #[arg(long)]
        preview: Option<PathBuf>,
    },

    /// Download the clipping as a high-resolution PNG
    Render {
        /// Path to the content JSON
        path: PathBuf,

        /// Output directory (overrides the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixel ratio, 1 to 4
        #[arg(long)]
        scale: Option<u32>,

        /// Theme override: classic, kesari, or "modern blue"
        #[arg(long)]
        theme: Option<String>,

        /// Portrait to crop into the reporter photo slot
        #[arg(long)]
        reporter_photo: Option<PathBuf>,

        #[command(flatten)]
        adjust: CropArgs,
    },

    /// Send the clipping to the system printer
    Print {
        /// Path to the content JSON
        path: PathBuf,
    },

    /// List themes and their colours
    Themes,
}

/// Pan and zoom applied in the crop viewport.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct CropArgs {
    /// Zoom factor, 1.0 to 3.0
    #[arg(long, default_value = "1.0")]
    zoom: f64,

    /// Horizontal pan in viewport pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pan_x: f64,

    /// Vertical pan in viewport pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pan_y: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::read(path)?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    varta_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Info { path } => commands::info::run(path),
        Commands::Fit {
            headline_len,
            body_len,
            photo,
            json,
        } => commands::fit::run(headline_len, body_len, photo, json),
        Commands::Crop {
            image,
            output,
            adjust,
            preview,
        } => commands::crop::run(&config, image, output, adjust, preview),
        Commands::Render {
            path,
            output,
            scale,
            theme,
            reporter_photo,
            adjust,
        } => {
            let options = commands::render::RenderOptions {
                output,
                scale,
                theme,
                reporter_photo,
                adjust,
            };
            commands::render::run(config, path, options).await
        }
        Commands::Print { path } => commands::print::run(config, path),
        Commands::Themes => commands::themes::run(),
    }
}
