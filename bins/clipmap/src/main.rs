//! clipmap - map view resolution and navigation tooling
//!
//! Resolves the center and zoom a map would show, builds and parses filter
//! URLs, and replays recorded UI sessions.

mod replay;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clipmap_cli::output::{format_coordinate, format_count, format_duration, format_viewport, format_zoom, Status};
use clipmap_core::config::{Config, ConfigSchema};
use clipmap_core::error::exit_codes;
use clipmap_geo::{fit_bounds, BoundingRegion, Coordinate, MapView, ViewportResolver, Viewport};
use clipmap_navigation::{fit_options, view_defaults, FilterState};
use clipmap_telemetry::{names, TelemetryConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "clipmap")]
#[command(about = "Map view resolution and navigation tooling for clipmap")]
#[command(version)]
struct Cli {
    /// Path to a clipmap.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the center and zoom for a city region
    Resolve {
        /// Northwest corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        nw: Coordinate,
        /// Southeast corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        se: Coordinate,
        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value = "800")]
        height: u32,
        /// Location of the selected video, as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        selected: Option<Coordinate>,
        /// Zoom the map currently shows
        #[arg(long)]
        zoom: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the filter URL for a city/year/month selection
    Path {
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "0")]
        year: u32,
        #[arg(long, default_value = "0")]
        month: u32,
    },

    /// Decode a query string back into filters
    Parse {
        /// Query string, with or without the leading '?'
        search: String,
    },

    /// Replay a JSON session script against an in-memory history
    Replay {
        /// Script file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    clipmap_telemetry::init_with_config(TelemetryConfig {
        log_level: level,
        show_target: config.schema.logging.show_target,
    })?;

    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let code = match cli.command {
        Commands::Resolve {
            nw,
            se,
            width,
            height,
            selected,
            zoom,
            json,
        } => run_resolve(&config.schema, BoundingRegion::new(nw, se), Viewport::new(width, height), selected, zoom, json)?,
        Commands::Path { city, year, month } => run_path(&config.schema, &city, year, month),
        Commands::Parse { search } => run_parse(&search),
        Commands::Replay { file, json } => run_replay(&config.schema, &file, json)?,
    };

    std::process::exit(code);
}

fn run_resolve(
    schema: &ConfigSchema,
    region: BoundingRegion,
    viewport: Viewport,
    selected: Option<Coordinate>,
    zoom: Option<f64>,
    json: bool,
) -> Result<i32> {
    if let Err(e) = region.validate() {
        Status::warning(&format!("{}; falling back to the default view", e));
    }
    if let Err(e) = viewport.validate() {
        Status::warning(&format!("{}; falling back to the default view", e));
    }

    let defaults = view_defaults(&schema.map);
    let options = fit_options(&schema.map);
    let fitted = fit_bounds(&region, viewport, &options);
    let resolver = ViewportResolver::new(defaults, options);
    let view = resolver.resolve(viewport, Some(&region), selected, zoom.unwrap_or(defaults.zoom));

    let source = match (selected, fitted) {
        (Some(_), _) => "selection",
        (None, Some(_)) => "fit",
        (None, None) => "defaults",
    };

    if json {
        let out = serde_json::json!({
            "center": view.center,
            "zoom": view.zoom,
            "source": source,
            "viewport": viewport,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_view(&view, viewport);
        Status::field("source", source);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_path(schema: &ConfigSchema, city: &str, year: u32, month: u32) -> i32 {
    if month > 12 {
        Status::error(&format!("Month must be between 1 and 12, got {}", month));
        return exit_codes::VALIDATION_ERROR;
    }
    println!("{}", FilterState::new(city, year, month).to_path(&schema.history.base_path));
    exit_codes::SUCCESS
}

fn run_parse(search: &str) -> i32 {
    match FilterState::from_query(search) {
        Ok(filters) if filters.is_empty() => {
            Status::info("No filters set");
            exit_codes::SUCCESS
        }
        Ok(filters) => {
            if !filters.city.is_empty() {
                Status::field("city", &filters.city);
            }
            if filters.year != 0 {
                Status::field("year", &filters.year.to_string());
            }
            if filters.month != 0 {
                Status::field("month", &filters.month.to_string());
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&e.to_string());
            exit_codes::VALIDATION_ERROR
        }
    }
}

fn run_replay(schema: &ConfigSchema, file: &Path, json: bool) -> Result<i32> {
    let script = match replay::Script::from_file(file) {
        Ok(script) => script,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            return Ok(exit_codes::FAILURE);
        }
    };
    let total = script.steps.len();
    let started = Instant::now();

    let outcome = replay::run(&script, schema, |n, step| {
        if !json {
            Status::step(n, total, &format!("{:?}", step));
        }
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(exit_codes::SUCCESS);
    }

    for render in &outcome.renders {
        Status::header(&format!("Render at step {}", render.step));
        print_view(&render.view, render.viewport);
        Status::field("markers", &format_count(render.markers.len(), "marker", "markers"));
    }

    Status::header("History");
    for (i, entry) in outcome.entries.iter().enumerate() {
        let cursor = if i == outcome.current { ">" } else { " " };
        let token = entry
            .state
            .as_ref()
            .and_then(|s| s.auth_token.as_deref())
            .map(|_| " (token)")
            .unwrap_or("");
        println!("{} {}{}", cursor, entry.path(), token);
    }

    if let Some(stats) = clipmap_telemetry::metrics().histogram_stats(names::VIEW_RESOLVE_MS) {
        Status::field(
            "resolve",
            &format!("p50 {:.3}ms, p95 {:.3}ms over {}", stats.p50, stats.p95, format_count(stats.window, "render", "renders")),
        );
    }

    Status::success(&format!(
        "Replayed {} in {}",
        format_count(total, "step", "steps"),
        format_duration(started.elapsed())
    ));
    Ok(exit_codes::SUCCESS)
}

fn print_view(view: &MapView, viewport: Viewport) {
    Status::field("center", &format_coordinate(view.center.latitude, view.center.longitude));
    Status::field("zoom", &format_zoom(view.zoom));
    Status::field("viewport", &format_viewport(viewport.width, viewport.height));
}
