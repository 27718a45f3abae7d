//! roadmap CLI - Timeline Layout Engine
//!
//! Command-line interface for laying out, summarising and exporting sprint
//! roadmaps.

mod config;
mod report;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use roadmap_core::{parse_date, Granularity, RoadmapData};
use roadmap_layout::{
    recompute, AssigneeFilter, InteractionState, RoadmapFilters, RoadmapInput, RoadmapView,
    StatusFilter, TeamFilter, Viewport, ZoomController,
};
use roadmap_render::{present, CsvExporter};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::RoadmapConfig;

/// Viewport width used when neither the config nor `--width` sets one
const DEFAULT_WIDTH: f64 = 1280.0;

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(author, version, about = "Roadmap timeline layout engine", long_about = None)]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./roadmap.toml when present)
    #[arg(short, long, global = true, env = "ROADMAP_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the computed view as JSON
    Layout {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Print per-sprint progress as a table
    Stats {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Export the visible sprints as CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix the CSV with a UTF-8 byte-order mark
        #[arg(long)]
        bom: bool,
    },

    /// Print the mobile cards or desktop rows for the viewport as JSON
    Cards {
        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Inputs shared by every command
#[derive(Args, Debug)]
struct ViewArgs {
    /// Roadmap dataset
    #[arg(value_name = "DATA.json")]
    data: PathBuf,

    /// Reference date framing the window (defaults to today)
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Window granularity (month, quarter, year)
    #[arg(short, long)]
    granularity: Option<Granularity>,

    /// Viewport width in pixels
    #[arg(short, long)]
    width: Option<f64>,

    /// Timeline container width in pixels (defaults to viewport minus labels)
    #[arg(long)]
    container_width: Option<f64>,

    /// Zoom level, clamped to 0.5..=2.5
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Sprint status filter (all, planned, active, completed, cancelled)
    #[arg(long)]
    status: Option<StatusFilter>,

    /// Team id filter, or "all"
    #[arg(long)]
    team: Option<String>,

    /// Task assignee filter: contact id, "unassigned" or "all"
    #[arg(long)]
    assignee: Option<String>,

    /// Expand a story's task rows (repeatable)
    #[arg(long = "expand-story", value_name = "ID")]
    expand_stories: Vec<String>,

    /// Expand the task rows of every story
    #[arg(long)]
    expand_all: bool,

    /// Collapse a sprint's story rows (repeatable)
    #[arg(long = "collapse-sprint", value_name = "ID")]
    collapse_sprints: Vec<String>,

    /// Date of the "today" marker (defaults to the local date)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

/// A loaded dataset with fully resolved settings
struct Session {
    data: RoadmapData,
    filters: RoadmapFilters,
    reference_date: NaiveDate,
    granularity: Granularity,
    viewport: Viewport,
    today: NaiveDate,
    state: InteractionState,
}

impl Session {
    fn open(args: &ViewArgs, config: &RoadmapConfig) -> Result<Self> {
        let data = load_data(&args.data)?;
        info!(
            sprints = data.sprints.len(),
            stories = data.stories.len(),
            tasks = data.tasks.len(),
            "loaded {}",
            args.data.display()
        );

        let mut filters = config.filters.clone();
        if let Some(status) = args.status {
            filters.status = status;
        }
        if let Some(team) = &args.team {
            filters.team = TeamFilter::from(team.as_str());
        }
        if let Some(assignee) = &args.assignee {
            filters.assignee = AssigneeFilter::from(assignee.as_str());
        }

        let mut viewport = Viewport::new(args.width.or(config.width).unwrap_or(DEFAULT_WIDTH));
        if let Some(width) = args.container_width.or(config.container_width) {
            viewport = viewport.with_container(width);
        }

        let mut state = InteractionState::default();
        if let Some(zoom) = args.zoom.or(config.zoom) {
            state.zoom = ZoomController::with_level(zoom);
        }
        if args.expand_all {
            state
                .expansion
                .expand_all_stories(data.stories.iter().map(|s| s.id.as_str()));
        }
        state
            .expansion
            .expand_all_stories(args.expand_stories.iter().map(String::as_str));
        for sprint_id in &args.collapse_sprints {
            state.expansion.set_sprint_expanded(sprint_id, false);
        }

        let today = args
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        Ok(Self {
            filters,
            reference_date: args.date.unwrap_or(today),
            granularity: args.granularity.or(config.granularity).unwrap_or_default(),
            viewport,
            today,
            state,
            data,
        })
    }

    fn view(&self) -> RoadmapView {
        let input = RoadmapInput {
            data: &self.data,
            reference_date: self.reference_date,
            granularity: self.granularity,
            filters: &self.filters,
            viewport: self.viewport,
            today: self.today,
        };
        recompute(&input, &self.state)
    }
}

fn load_data(path: &Path) -> Result<RoadmapData> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read dataset {}", path.display()))?;
    RoadmapData::from_json(&source).with_context(|| format!("in {}", path.display()))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("cannot resolve working directory")?;
    let config = RoadmapConfig::discover(cli.config.as_deref(), &cwd)?;

    let stdout = io::stdout();
    match cli.command {
        Commands::Layout { view } => {
            let view = Session::open(&view, &config)?.view();
            let json = serde_json::to_string_pretty(&view).context("cannot serialize view")?;
            writeln!(stdout.lock(), "{}", json)?;
        }
        Commands::Stats { view } => {
            let view = Session::open(&view, &config)?.view();
            report::write_stats(&view, stdout.lock())?;
        }
        Commands::Export { view, output, bom } => {
            let view = Session::open(&view, &config)?.view();
            let exporter = CsvExporter {
                bom: bom || config.export.bom,
            };
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("cannot create {}", path.display()))?;
                    exporter.write_to(&view, BufWriter::new(file))?;
                    info!(sprints = view.sprints.len(), "wrote {}", path.display());
                }
                None => exporter.write_to(&view, stdout.lock())?,
            }
        }
        Commands::Cards { view } => {
            let view = Session::open(&view, &config)?.view();
            writeln!(stdout.lock(), "{}", present(&view).to_json()?)?;
        }
    }

    Ok(())
}
