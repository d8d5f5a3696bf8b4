//! flamebearer CLI
//!
//! Decodes flamebearer profiles and turns them into SVG flame graphs,
//! function tables and collapsed stacks.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use flamebearer_engine::aggregator::SortColumn;
use flamebearer_engine::codec::UnitKind;
use flamebearer_engine::commands::{
    display_version, execute_build, execute_collapse, execute_inspect, execute_render,
    execute_table, validate_flamebearer_file, BuildArgs, CollapseArgs, InspectArgs, RenderArgs,
    TableArgs,
};
use flamebearer_engine::flamegraph::FitMode;
use flamebearer_engine::model::NodeRef;

/// flamebearer - flame graph rendering and analysis for flamebearer profiles
#[derive(Parser, Debug)]
#[command(name = "flamebearer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Render configuration (TOML)
    #[arg(long, global = true, env = "FLAMEBEARER_CONFIG")]
    config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a flamebearer as an SVG flame graph
    Render {
        /// Flamebearer JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the SVG
        #[arg(short, long, default_value = "flamegraph.svg")]
        output: PathBuf,

        /// Flame graph width in pixels
        #[arg(long)]
        width: Option<usize>,

        /// Flame graph title
        #[arg(long)]
        title: Option<String>,

        /// Which end of a label survives truncation
        #[arg(long, value_enum)]
        fit_mode: Option<FitMode>,

        /// Dim frames whose name does not contain this
        #[arg(long)]
        highlight: Option<String>,

        /// Focus on a node, as LEVEL:J
        #[arg(long)]
        focus: Option<NodeRef>,

        /// Zoom into a node, as LEVEL:J
        #[arg(long)]
        zoom: Option<NodeRef>,

        /// Color palette (default, colorblind)
        #[arg(long)]
        palette: Option<String>,
    },

    /// Print the per-function table
    Table {
        /// Flamebearer JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Column to sort by
        #[arg(long, value_enum, default_value = "total")]
        sort: SortColumn,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Number of rows to print
        #[arg(long)]
        limit: Option<usize>,

        /// Keep only functions whose name contains this
        #[arg(long)]
        highlight: Option<String>,

        /// Also write the table as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Export a flamebearer as collapsed stacks
    Collapse {
        /// Flamebearer JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a flamebearer from collapsed stacks
    Build {
        /// Collapsed stacks (the comparison when --baseline is given)
        #[arg(short, long)]
        input: PathBuf,

        /// Baseline collapsed stacks; produces a diff profile
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Output path for the flamebearer JSON
        #[arg(short, long, default_value = "flamebearer.json")]
        output: PathBuf,

        /// What one tick measures
        #[arg(long, value_enum, default_value = "samples")]
        units: UnitKind,

        /// Samples per second
        #[arg(long, default_value = "100")]
        sample_rate: u32,

        /// Profiler name, used for package coloring
        #[arg(long)]
        spy_name: Option<String>,
    },

    /// Print the tooltip of the node under a pixel position
    Inspect {
        /// Flamebearer JSON file
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        x: f64,

        #[arg(short, long)]
        y: f64,

        /// Flame graph width in pixels
        #[arg(long)]
        width: Option<usize>,

        /// Focus on a node, as LEVEL:J
        #[arg(long)]
        focus: Option<NodeRef>,

        /// Zoom into a node, as LEVEL:J
        #[arg(long)]
        zoom: Option<NodeRef>,
    },

    /// Validate a flamebearer JSON file
    Validate {
        /// Flamebearer JSON file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            output,
            width,
            title,
            fit_mode,
            highlight,
            focus,
            zoom,
            palette,
        } => execute_render(RenderArgs {
            input,
            output,
            config: cli.config,
            title,
            width,
            fit_mode,
            palette,
            highlight,
            focus,
            zoom,
        })?,

        Commands::Table {
            input,
            sort,
            asc,
            limit,
            highlight,
            json,
        } => execute_table(TableArgs {
            input,
            sort,
            ascending: asc,
            limit,
            highlight,
            json,
        })?,

        Commands::Collapse { input, output } => execute_collapse(CollapseArgs { input, output })?,

        Commands::Build {
            input,
            baseline,
            output,
            units,
            sample_rate,
            spy_name,
        } => execute_build(BuildArgs {
            input,
            baseline,
            output,
            units,
            sample_rate,
            spy_name,
        })?,

        Commands::Inspect {
            input,
            x,
            y,
            width,
            focus,
            zoom,
        } => execute_inspect(InspectArgs {
            input,
            config: cli.config,
            x,
            y,
            width,
            focus,
            zoom,
        })?,

        Commands::Validate { input } => validate_flamebearer_file(input)?,

        Commands::Version => display_version(),
    }

    Ok(())
}
