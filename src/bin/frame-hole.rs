use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use frame_hole_matte::config::{self, DEFAULT_LOG_FILE};
use frame_hole_matte::{probe_pixel, EngineConfig, FrameEngine, FrameResult, SeedEntry};

#[derive(Parser)]
#[command(
    name = "frame-hole",
    about = "Locate and matte the photo hole in frame overlays",
    version,
    after_help = "Frames that fake transparency with a white/grey checkerboard can be fixed with\n\
                  `frame-hole matte <dir> --seed frame.png:540,380`.\n\n\
                  NOTE: matting overwrites the source frames unless --output is given."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Report hole geometry for a frame or every frame in a directory
    Analyze {
        /// Input frame file or directory
        input: PathBuf,

        /// Append geometry records to this file
        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        log: PathBuf,

        /// Do not write geometry records
        #[arg(long, conflicts_with = "log")]
        no_log: bool,
    },

    /// Flood the checkerboard hole of seeded frames to real transparency
    Matte {
        /// Directory holding the frames named in the seed table
        frames_dir: PathBuf,

        /// Seed as <frame>:<x>,<y> (repeatable)
        #[arg(short, long = "seed", value_name = "FRAME:X,Y")]
        seeds: Vec<SeedEntry>,

        /// Seed table file, one <frame>:<x>,<y> per line
        #[arg(long)]
        seeds_file: Option<PathBuf>,

        /// Output directory (default: overwrite frames in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the RGBA value of one pixel
    Probe {
        /// Frame file
        image: PathBuf,
        /// Column
        #[arg(allow_negative_numbers = true)]
        x: i64,
        /// Row
        #[arg(allow_negative_numbers = true)]
        y: i64,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = OutputOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let results = match cli.command {
        Command::Analyze { input, log, no_log } => analyze(&input, (!no_log).then_some(log)),
        Command::Matte {
            frames_dir,
            seeds,
            seeds_file,
            output,
        } => matte(frames_dir, seeds, seeds_file.as_deref(), output, &opts),
        Command::Probe { image, x, y } => {
            probe(&image, x, y);
            return;
        }
    };

    let mut success_count = 0u32;
    let mut skip_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, &opts);
        if !r.success {
            fail_count += 1;
        } else if r.skipped {
            skip_count += 1;
        } else {
            success_count += 1;
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if skip_count > 0 {
            eprint!(", Skipped: {skip_count}");
        }
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

struct OutputOptions {
    verbose: bool,
    quiet: bool,
}

fn analyze(input: &Path, log: Option<PathBuf>) -> Vec<FrameResult> {
    if !input.exists() {
        eprintln!("Error: Input path does not exist: {}", input.display());
        process::exit(1);
    }

    let frames_dir = if input.is_dir() {
        input.to_path_buf()
    } else {
        input.parent().unwrap_or(Path::new(".")).to_path_buf()
    };
    let engine = FrameEngine::new(EngineConfig {
        log_path: log,
        ..EngineConfig::new(frames_dir)
    });

    if let Some(path) = &engine.config().log_path {
        tracing::info!("Appending geometry records to {}", path.display());
    }

    if input.is_dir() {
        engine.analyze_all()
    } else {
        let mut result = engine.analyze_file(input);
        if let Err(e) = engine.record(&result) {
            result.success = false;
            result.message = format!("Failed to write report: {e}");
        }
        vec![result]
    }
}

fn matte(
    frames_dir: PathBuf,
    mut seeds: Vec<SeedEntry>,
    seeds_file: Option<&Path>,
    output: Option<PathBuf>,
    opts: &OutputOptions,
) -> Vec<FrameResult> {
    if !frames_dir.is_dir() {
        eprintln!("Error: Frames directory does not exist: {}", frames_dir.display());
        process::exit(1);
    }

    if let Some(path) = seeds_file {
        match config::load_seed_table(path) {
            Ok(table) => seeds.extend(table),
            Err(e) => {
                eprintln!("Error: Failed to read seed table {}: {e}", path.display());
                process::exit(1);
            }
        }
    }

    if seeds.is_empty() {
        eprintln!("Error: No seeds given");
        eprintln!("Usage: frame-hole matte <frames_dir> --seed <frame>:<x>,<y>");
        process::exit(1);
    }

    if output.is_none() && !opts.quiet {
        eprintln!("WARNING: No --output given - source frames will be overwritten!");
        eprintln!();
    }

    let engine = FrameEngine::new(EngineConfig {
        output_dir: output,
        log_path: None,
        seeds,
        ..EngineConfig::new(frames_dir)
    });
    engine.matte_all()
}

fn probe(image: &Path, x: i64, y: i64) {
    let name = image
        .file_name()
        .map_or_else(|| image.display().to_string(), |f| f.to_string_lossy().to_string());

    match probe_pixel(image, x, y) {
        Ok(px) => {
            let [r, g, b, a] = px.0;
            println!("File: {name} | Pixel at {x},{y}: RGBA({r},{g},{b},{a})");
            if a < 255 {
                println!("  -> WARNING: This pixel is TRANSPARENT or SEMI-TRANSPARENT!");
            } else {
                println!("  -> OK: This pixel is OPAQUE.");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn print_result(result: &FrameResult, opts: &OutputOptions) {
    if opts.quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if !result.success {
        eprintln!("[FAIL] {filename}: {}", result.message);
    } else if result.skipped {
        eprintln!("[SKIP] {filename}: {}", result.message);
    } else {
        eprintln!("[OK] {filename}: {}", result.message);
    }

    if opts.verbose {
        if let Some(g) = result.detection.map(|d| d.geometry) {
            eprintln!(
                "  -> center ({}, {}), size {} x {}",
                g.center_x, g.center_y, g.width, g.height
            );
        }
        if let Some(m) = &result.matte {
            let [r, g, b, a] = m.seed_color.0;
            eprintln!("  -> seed colour RGBA({r},{g},{b},{a})");
        }
    }
}
