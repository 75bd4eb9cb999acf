mod app;
mod input;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use starmap::config::{default_settings_path, load_settings, Settings};
use starmap::layout::{LayoutEngine, LayoutMode, RandomSeeds};
use starmap::loader::{self, Source};
use starmap::scene::StarMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "starmap")]
#[command(about = "Interactive terminal star map of an exoplanet dataset")]
struct Cli {
    /// Newline-delimited JSON dataset: a file path or an http(s) URL.
    #[arg(long, default_value = "info.json")]
    data: String,

    /// Settings file (defaults to the per-user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout seed; 0 draws a fresh layout every run.
    #[arg(long)]
    seed: Option<u64>,

    /// spherical or flat.
    #[arg(long)]
    layout: Option<LayoutMode>,

    /// Frame rate cap, 10 to 240; values outside are clamped.
    #[arg(long)]
    fps: Option<u32>,

    /// Write log output here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print placed entities as NDJSON and exit.
    #[arg(long, default_value_t = false)]
    dump: bool,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("could not open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Settings {
    let path = match &cli.config {
        Some(p) => Some(p.clone()),
        None => default_settings_path()
            .map_err(|e| warn!("{:#}", e))
            .ok(),
    };
    let mut settings = path.map(|p| load_settings(&p)).unwrap_or_default();

    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(layout) = cli.layout {
        settings.layout = layout;
    }
    if let Some(fps) = cli.fps {
        settings.fps_cap = fps;
    }
    settings
}

fn dump(map: &StarMap) -> Result<()> {
    let mut out = io::stdout().lock();
    for e in map.entities() {
        serde_json::to_writer(&mut out, e)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let settings = resolve_settings(&cli);

    let report = loader::load(&Source::parse(&cli.data));
    let mut engine = LayoutEngine::new(settings.layout_config(), RandomSeeds::new(settings.seed));
    let map = StarMap::build(&report.records, &mut engine, settings.central_size);

    let t = map.bounds().temperature;
    info!(
        "{} bodies placed ({} layout), temperature range {} to {}",
        map.entities().len(),
        settings.layout,
        t.min,
        t.max
    );

    if cli.dump {
        return dump(&map);
    }

    app::run(&map, &settings)
}
