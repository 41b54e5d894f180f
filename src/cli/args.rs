use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{EdgeMode, Range};

#[derive(Parser)]
#[command(name = "quake-explorer")]
#[command(about = "Filter, bin and aggregate significant-earthquake data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: quake-explorer.toml when present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose the data selection interactively, then write chart data
    Explore {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Apply the range filters given as flags, then write chart data
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,

        #[arg(long, allow_hyphen_values = true, value_parser = parse_numeric_range, help = "Latitude range, e.g. -10,40")]
        latitude: Option<Range<f64>>,

        #[arg(long, allow_hyphen_values = true, value_parser = parse_numeric_range, help = "Longitude range, e.g. 90,150")]
        longitude: Option<Range<f64>>,

        #[arg(long, value_parser = parse_date_range, help = "Date range, e.g. 01/02/1965,12/30/2016")]
        date: Option<Range<NaiveDate>>,

        #[arg(long, value_parser = parse_numeric_range, help = "Magnitude range, e.g. 6.5,9.1")]
        magnitude: Option<Range<f64>>,
    },

    /// Show statistics and the strongest events of the whole dataset
    Info {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, help = "Number of strongest events to list")]
        top: Option<usize>,
    },

    /// Play the tile-sliding puzzle in the terminal
    Play,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(short, long, help = "Seismic events CSV file")]
    pub seismic_file: Option<PathBuf>,

    #[arg(long, help = "World cities CSV file")]
    pub cities_file: Option<PathBuf>,

    #[arg(long, help = "Memory-map input files")]
    pub mmap: bool,

    #[arg(short, long, help = "Hide the progress spinner")]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(
        short,
        long,
        help = "Chart output path [default: output/quake-charts-{YYMMDD}.json]"
    )]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Chart output format: json or csv")]
    pub format: Option<String>,

    #[arg(short, long, help = "Number of longitude bins")]
    pub bins: Option<usize>,

    #[arg(long, help = "Bin edge handling: inclusive or legacy")]
    pub edge_mode: Option<EdgeMode>,
}

fn parse_numeric_range(s: &str) -> std::result::Result<Range<f64>, String> {
    Range::parse(s).map_err(|e| e.to_string())
}

fn parse_date_range(s: &str) -> std::result::Result<Range<NaiveDate>, String> {
    Range::parse(s).map_err(|e| e.to_string())
}
