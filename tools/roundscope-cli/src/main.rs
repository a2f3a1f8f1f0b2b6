//! Roundscope CLI — Command-line interface for match timeline extraction.
//!
//! Usage:
//!   roundscope sample <VIDEO>     Sample raw gauge readings to CSV
//!   roundscope events <CSV>       Extract events from a readings CSV
//!   roundscope analyze <VIDEO>    Full pipeline: video to event timeline
//!   roundscope narrate <CSV>      Build commentary requests from events
//!   roundscope info <VIDEO>       Show media information
//!   roundscope check              Check decoder availability

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "roundscope",
    about = "Fighting-game match analysis: health gauges to event timelines",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample raw gauge readings from a video into a CSV
    Sample {
        /// Input video file
        video: PathBuf,

        /// Output readings CSV path
        #[arg(short, long, default_value = "readings.csv")]
        output: PathBuf,

        /// Sampling interval in milliseconds (default from config, 100)
        #[arg(long)]
        interval: Option<u64>,

        /// Per-seek watchdog timeout in milliseconds (default from config, 2000)
        #[arg(long)]
        seek_timeout: Option<u64>,

        /// Explicit analysis window start (seconds)
        #[arg(long)]
        start: Option<f64>,

        /// Explicit analysis window end (seconds)
        #[arg(long)]
        end: Option<f64>,

        /// Player 1 bar as x1,y1,x2,y2 in 1920x1080 reference space
        #[arg(long)]
        p1_bar: Option<String>,

        /// Player 2 bar as x1,y1,x2,y2 in 1920x1080 reference space
        #[arg(long)]
        p2_bar: Option<String>,
    },

    /// Extract the event timeline from a readings CSV
    Events {
        /// Input readings CSV
        input: PathBuf,

        /// Output events CSV path
        #[arg(short, long, default_value = "events.csv")]
        output: PathBuf,

        /// Also write the player JSON document here
        #[arg(long)]
        json: Option<PathBuf>,

        /// Smoothing window (samples)
        #[arg(long, default_value = "5")]
        smooth_window: usize,

        /// Minimum health drop that counts as damage
        #[arg(long, default_value = "2")]
        min_damage: i32,
    },

    /// Run the full pipeline: video to event timeline
    Analyze {
        /// Input video file
        video: PathBuf,

        /// Output events CSV path
        #[arg(short, long, default_value = "events.csv")]
        output: PathBuf,

        /// Also write the player JSON document here
        #[arg(long)]
        json: Option<PathBuf>,

        /// Sampling interval in milliseconds (default from config, 100)
        #[arg(long)]
        interval: Option<u64>,

        /// Per-seek watchdog timeout in milliseconds (default from config, 2000)
        #[arg(long)]
        seek_timeout: Option<u64>,

        /// Explicit analysis window start (seconds)
        #[arg(long)]
        start: Option<f64>,

        /// Explicit analysis window end (seconds)
        #[arg(long)]
        end: Option<f64>,

        /// Player 1 bar as x1,y1,x2,y2 in 1920x1080 reference space
        #[arg(long)]
        p1_bar: Option<String>,

        /// Player 2 bar as x1,y1,x2,y2 in 1920x1080 reference space
        #[arg(long)]
        p2_bar: Option<String>,

        /// Smoothing window (samples)
        #[arg(long, default_value = "5")]
        smooth_window: usize,
    },

    /// Build commentary generation requests from an events CSV
    Narrate {
        /// Input events CSV
        input: PathBuf,

        /// Commentary mode: play_by_play, color, or minimal
        #[arg(long, default_value = "play_by_play")]
        mode: String,

        /// Player 1 character name
        #[arg(long, default_value = "Player 1")]
        p1_character: String,

        /// Player 2 character name
        #[arg(long, default_value = "Player 2")]
        p2_character: String,

        /// Output request JSON path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show media information
    Info {
        /// Input video file
        video: PathBuf,
    },

    /// Check decoder availability
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    roundscope_common::logging::init_cli_logging(cli.verbose);

    match cli.command {
        Commands::Sample {
            video,
            output,
            interval,
            seek_timeout,
            start,
            end,
            p1_bar,
            p2_bar,
        } => {
            commands::sample::run(
                video,
                output,
                interval,
                seek_timeout,
                start,
                end,
                p1_bar,
                p2_bar,
            )
            .await
        }
        Commands::Events {
            input,
            output,
            json,
            smooth_window,
            min_damage,
        } => commands::events::run(input, output, json, smooth_window, min_damage),
        Commands::Analyze {
            video,
            output,
            json,
            interval,
            seek_timeout,
            start,
            end,
            p1_bar,
            p2_bar,
            smooth_window,
        } => {
            commands::analyze::run(
                video,
                output,
                json,
                interval,
                seek_timeout,
                start,
                end,
                p1_bar,
                p2_bar,
                smooth_window,
            )
            .await
        }
        Commands::Narrate {
            input,
            mode,
            p1_character,
            p2_character,
            output,
        } => commands::narrate::run(input, mode, p1_character, p2_character, output),
        Commands::Info { video } => commands::info::run(video),
        Commands::Check => commands::check::run(),
    }
}
