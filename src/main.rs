//! Command line front end for the Game of Life canvas

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use life_canvas::{
    config::{BackendKind, CliOverrides, Settings},
    driver::{create_rng, initial_world},
    game_of_life::{
        create_backend, io::create_example_patterns, load_pattern_from_file, rules, save_world_to_file,
        StepBackend,
    },
    render::{TerminalRenderer, TerminalSession},
    utils::{ColorOutput, WorldFormatter},
    Driver, DriverOptions,
};
use log::info;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const HEADLESS_COLUMNS: usize = 80;
const HEADLESS_ROWS: usize = 48;

#[derive(Parser)]
#[command(name = "life_canvas")]
#[command(about = "Conway's Game of Life on a terminal canvas")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the world in the terminal, press q or Esc to quit
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Step a pattern file and print the result
    Step {
        /// Pattern file to evolve
        #[arg(short, long)]
        pattern: PathBuf,

        /// Number of generations
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Print every generation
        #[arg(long)]
        show_evolution: bool,

        /// Print the final world as JSON
        #[arg(long)]
        json: bool,

        /// Also write the final world to this pattern file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run headless and write the final frame as a PPM image
    Snapshot {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Image to write
        #[arg(short, long, default_value = "snapshot.ppm")]
        output: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Cpu,
    Parallel,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Cpu => BackendKind::Cpu,
            BackendArg::Parallel => BackendKind::Parallel,
        }
    }
}

/// Settings that can be overridden from the command line
#[derive(Args, Default)]
struct OverrideArgs {
    /// Pixel size of one cell
    #[arg(long)]
    cell_size: Option<u32>,

    /// Gap between cells in pixels
    #[arg(long)]
    margin: Option<u32>,

    /// Visible columns
    #[arg(long)]
    columns: Option<usize>,

    /// Visible rows
    #[arg(long)]
    rows: Option<usize>,

    /// Animation frames per generation
    #[arg(short = 't', long)]
    frames_per_step: Option<u32>,

    /// Seed the world randomly
    #[arg(long)]
    populate: bool,

    /// Live probability of each cell when populating
    #[arg(long)]
    density: Option<f64>,

    /// Keep the hidden border as the automaton leaves it
    #[arg(long)]
    still_edges: bool,

    /// Compute backend
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Pattern file stamped into the middle of the world
    #[arg(short, long)]
    pattern: Option<PathBuf>,

    /// Overlay the current time
    #[arg(long)]
    clock: bool,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
}

impl From<OverrideArgs> for CliOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            cell_size: args.cell_size,
            margin: args.margin,
            columns: args.columns,
            rows: args.rows,
            frames_per_step: args.frames_per_step,
            populate: args.populate,
            initial_density: args.density,
            still_edges: args.still_edges,
            backend: args.backend.map(Into::into),
            seed: args.seed,
            pattern: args.pattern,
            clock: args.clock,
            frame_rate: args.fps,
            max_frames: args.frames,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, overrides } => run_command(&config, overrides),
        Commands::Step {
            pattern,
            generations,
            show_evolution,
            json,
            output,
        } => step_command(&pattern, generations, show_evolution, json, output.as_deref()),
        Commands::Snapshot {
            config,
            output,
            overrides,
        } => snapshot_command(&config, &output, overrides),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Load the config file, apply command line overrides and repair malformed values
fn load_settings(config_path: &Path, overrides: OverrideArgs) -> Settings {
    let mut settings = Settings::load_or_default(config_path);
    settings.merge_with_cli(&overrides.into());
    settings.sanitize();
    settings
}

fn is_exit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        }) | Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        })
    )
}

fn run_command(config_path: &Path, overrides: OverrideArgs) -> Result<()> {
    let settings = load_settings(config_path, overrides);

    let session = TerminalSession::start().context("Failed to set up the terminal")?;
    let (columns, rows) = match (settings.display.columns, settings.display.rows) {
        (Some(columns), Some(rows)) => (columns, rows),
        (columns, rows) => {
            let (term_columns, term_rows) = TerminalSession::visible_cells()?;
            (columns.unwrap_or(term_columns), rows.unwrap_or(term_rows))
        }
    };

    let mut rng = create_rng(settings.simulation.seed);
    let world = initial_world(&settings, columns, rows, &mut rng)?;
    let backend = create_backend(settings.simulation.backend);
    info!("Using {} backend", backend.name());

    let renderer = TerminalRenderer::new(io::stdout());
    let mut driver = Driver::new(world, DriverOptions::from(&settings), backend, renderer, rng);

    let frame_time = Duration::from_secs_f64(1.0 / settings.runtime.frame_rate as f64);
    let frames = driver.run(frame_time, settings.runtime.max_frames, |time_left| {
        if !event::poll(time_left)? {
            return Ok(false);
        }
        Ok(is_exit(&event::read()?))
    })?;

    drop(session);
    println!(
        "{}",
        ColorOutput::info(&format!(
            "{} frames, {} generations",
            frames,
            driver.generation()
        ))
    );

    Ok(())
}

fn step_command(
    pattern_path: &Path,
    generations: usize,
    show_evolution: bool,
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut world = load_pattern_from_file(pattern_path)?;

    if show_evolution && !json {
        println!("{}", WorldFormatter::format_statistics(&world, 0));
        println!("{}", WorldFormatter::format_world_compact(&world));
    }

    for generation in 1..=generations {
        world = rules::step(&world);

        if show_evolution && !json {
            println!("{}", WorldFormatter::format_statistics(&world, generation));
            println!("{}", WorldFormatter::format_world_compact(&world));
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&world).context("Failed to serialize world")?);
    } else if !show_evolution {
        println!("{}", WorldFormatter::format_statistics(&world, generations));
        println!("{}", WorldFormatter::format_world_with_coords(&world));
    }

    if let Some(output) = output {
        save_world_to_file(&world, output)?;
        info!("Saved generation {} to {}", generations, output.display());
    }

    Ok(())
}

fn snapshot_command(config_path: &Path, output: &Path, overrides: OverrideArgs) -> Result<()> {
    let settings = load_settings(config_path, overrides);

    let columns = settings.display.columns.unwrap_or(HEADLESS_COLUMNS);
    let rows = settings.display.rows.unwrap_or(HEADLESS_ROWS);
    let frames = settings.runtime.max_frames.unwrap_or(100);

    let raster = life_canvas::render_snapshot(&settings, columns, rows, frames)?;
    raster.save_ppm(output)?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Wrote {}x{} frame after {} frames to {}",
            raster.width(),
            raster.height(),
            frames,
            output.display()
        ))
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up configuration and patterns..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display()))
        );
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    let mut clock = Settings::default();
    clock.simulation.populate = true;
    clock.overlay.clock = true;
    clock.to_file(&config_dir.join("clock.yaml"))?;

    let mut glider = Settings::default();
    glider.simulation.randomize_edges = false;
    glider.simulation.pattern = Some(PathBuf::from("patterns/glider.txt"));
    glider.to_file(&config_dir.join("glider.yaml"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("Run: cargo run -- run --config {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_canvas",
            "run",
            "--config",
            "test.yaml",
            "-t",
            "2",
            "--populate",
            "--backend",
            "parallel",
        ]);
        assert!(cli.is_ok());

        let bad = Cli::try_parse_from(["life_canvas", "run", "--backend", "gpu"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_overrides_reach_settings() {
        let temp_dir = tempdir().unwrap();
        let overrides = OverrideArgs {
            cell_size: Some(0),
            frames_per_step: Some(2),
            backend: Some(BackendArg::Parallel),
            clock: true,
            ..Default::default()
        };

        let settings = load_settings(&temp_dir.path().join("missing.yaml"), overrides);
        assert_eq!(settings.display.cell_size, 5);
        assert_eq!(settings.simulation.frames_per_step, 2);
        assert_eq!(settings.simulation.backend, BackendKind::Parallel);
        assert!(settings.overlay.clock);
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config = temp_dir.path().join("config/default.yaml");
        assert!(config.exists());
        assert_eq!(Settings::from_file(&config).unwrap(), Settings::default());
        assert!(temp_dir.path().join("config/clock.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());
    }

    #[test]
    fn test_step_command() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("blinker.txt");
        std::fs::write(&path, ".....\n.###.\n.....\n").unwrap();

        assert!(step_command(&path, 3, true, false, None).is_ok());
        assert!(step_command(&path, 1, false, true, None).is_ok());
        assert!(step_command(&temp_dir.path().join("missing.txt"), 1, false, false, None).is_err());
    }

    #[test]
    fn test_step_command_writes_output() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("blinker.txt");
        let output = temp_dir.path().join("out/blinker_1.txt");
        std::fs::write(&path, ".....\n.###.\n.....\n").unwrap();

        step_command(&path, 1, false, false, Some(&output)).unwrap();

        let saved = load_pattern_from_file(&output).unwrap();
        assert_eq!(saved.living_cells(), vec![(2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_snapshot_command() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("frame.ppm");
        let overrides = OverrideArgs {
            columns: Some(12),
            rows: Some(8),
            cell_size: Some(2),
            populate: true,
            seed: Some(3),
            frames: Some(12),
            ..Default::default()
        };

        snapshot_command(&temp_dir.path().join("missing.yaml"), &output, overrides).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"P6\n24 16\n255\n"));
    }
}
