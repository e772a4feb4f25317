//! Texel CLI - gray level co-occurrence matrices from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use texel_algorithms::texture::{cooccurrence, cooccurrence_parallel, Direction, Glcm, GlcmParams};
use texel_core::io::{read_gray, write_matrix_csv, write_matrix_tiff};
use texel_core::GrayRaster;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "texel")]
#[command(author, version, about = "Gray level co-occurrence matrices for grayscale images", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dimensions, intensity range and pair counts of an image
    Info {
        /// Input image (PNG, JPEG, BMP, PNM, TIFF)
        input: PathBuf,
    },
    /// Compute a co-occurrence matrix
    Glcm {
        /// Input image (converted to 8-bit gray)
        input: PathBuf,
        /// Output file: .csv, .tif/.tiff or .json
        output: PathBuf,
        /// Pairing direction in degrees: 0, 45, 90, 135
        #[arg(short, long, default_value = "0")]
        direction: String,
        /// Use 256 levels instead of sizing to the brightest pixel
        #[arg(long)]
        fixed_range: bool,
        /// Keep raw pair counts instead of frequencies
        #[arg(long)]
        raw: bool,
        /// Scan row bands on all cores
        #[arg(short, long)]
        parallel: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Tiff,
    Json,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tif" | "tiff" => Ok(OutputFormat::Tiff),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!(
                "Unknown output format for {}. Use .csv, .tif or .json.",
                path.display()
            ),
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_image(path: &Path) -> Result<GrayRaster<u8>> {
    let pb = spinner("Reading image...");
    let image = read_gray(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    pb.finish_and_clear();
    info!("Input: {} x {}", image.cols(), image.rows());
    Ok(image)
}

fn parse_direction(s: &str) -> Result<Direction> {
    s.parse::<Direction>().context("Invalid --direction")
}

fn glcm_json(glcm: &Glcm) -> serde_json::Value {
    let rows: Vec<Vec<f64>> = glcm.matrix().rows().into_iter().map(|r| r.to_vec()).collect();
    serde_json::json!({
        "params": glcm.params(),
        "degrees": glcm.direction().degrees(),
        "levels": glcm.levels(),
        "pairs": glcm.pairs(),
        "normalized": glcm.is_normalized(),
        "matrix": rows,
    })
}

fn write_output(glcm: &Glcm, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    let pb = spinner("Writing output...");
    match format {
        OutputFormat::Csv => {
            let file = File::create(path).context("Failed to create output")?;
            write_matrix_csv(glcm.matrix(), BufWriter::new(file))
                .context("Failed to write CSV")?;
        }
        OutputFormat::Tiff => {
            write_matrix_tiff(glcm.matrix(), path).context("Failed to write TIFF")?;
        }
        OutputFormat::Json => {
            let file = File::create(path).context("Failed to create output")?;
            serde_json::to_writer_pretty(BufWriter::new(file), &glcm_json(glcm))
                .context("Failed to write JSON")?;
        }
    }
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let image = read_image(&input)?;
            let (rows, cols) = image.shape();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} pixels)", cols, rows, image.len());
            if let Some(stats) = image.statistics() {
                println!("\nIntensity:");
                println!("  Min: {}", stats.min);
                println!("  Max: {}", stats.max);
                println!("  Mean: {:.4}", stats.mean);
                println!("  Auto-range levels: {}", stats.max as usize + 1);
            }
            println!("\nPairs per direction:");
            for direction in Direction::ALL {
                println!("  {:>4}: {}", direction, direction.pair_count(rows, cols));
            }
        }

        Commands::Glcm {
            input,
            output,
            direction,
            fixed_range,
            raw,
            parallel,
        } => {
            let params = GlcmParams::new(parse_direction(&direction)?)
                .with_auto_range(!fixed_range)
                .with_normalize(!raw);
            // Reject a bad extension before doing any work.
            OutputFormat::from_path(&output)?;

            let image = read_image(&input)?;
            debug!(?params, parallel, "computing co-occurrence matrix");

            let start = Instant::now();
            let pb = spinner("Computing GLCM...");
            let glcm = if parallel {
                cooccurrence_parallel(&image, &params)
            } else {
                cooccurrence(&image, &params)
            }
            .context("GLCM computation failed")?;
            pb.finish_and_clear();
            let elapsed = start.elapsed();

            info!(
                "{} GLCM: {} levels, {} pairs",
                glcm.direction(),
                glcm.levels(),
                glcm.pairs()
            );
            write_output(&glcm, &output)?;
            done("GLCM", &output, elapsed);
        }
    }

    Ok(())
}
